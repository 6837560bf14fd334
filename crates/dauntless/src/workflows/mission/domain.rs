use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Scoring dimension a story can contribute to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Survival,
    Operations,
    Uncertainty,
    Strategic,
    Crew,
    Stakeholder,
    Latent,
}

impl Category {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Survival,
            Self::Operations,
            Self::Uncertainty,
            Self::Strategic,
            Self::Crew,
            Self::Stakeholder,
            Self::Latent,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Survival => "survival",
            Self::Operations => "operations",
            Self::Uncertainty => "uncertainty",
            Self::Strategic => "strategic",
            Self::Crew => "crew",
            Self::Stakeholder => "stakeholder",
            Self::Latent => "latent",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Survival => "Survival",
            Self::Operations => "Operations",
            Self::Uncertainty => "Uncertainty",
            Self::Strategic => "Strategic",
            Self::Crew => "Crew",
            Self::Stakeholder => "Stakeholder",
            Self::Latent => "Latent",
        }
    }

    /// Contribution per tagged story used when no instructor override is supplied.
    pub const fn default_weight(self) -> u32 {
        match self {
            Self::Survival => 20,
            Self::Operations => 10,
            Self::Uncertainty => 15,
            Self::Strategic => 8,
            Self::Crew => 10,
            Self::Stakeholder => 5,
            Self::Latent => 12,
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|category| category.key() == normalized)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Non-scoring tag carried for narrative checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InformationalFlag {
    Power,
    Propulsion,
    Compliance,
    Structural,
    Irreversible,
    LifeSupport,
    Radiation,
    Predictive,
}

impl InformationalFlag {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Power,
            Self::Propulsion,
            Self::Compliance,
            Self::Structural,
            Self::Irreversible,
            Self::LifeSupport,
            Self::Radiation,
            Self::Predictive,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Propulsion => "propulsion",
            Self::Compliance => "compliance",
            Self::Structural => "structural",
            Self::Irreversible => "irreversible",
            Self::LifeSupport => "life-support",
            Self::Radiation => "radiation",
            Self::Predictive => "predictive",
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|flag| flag.key() == normalized)
    }
}

/// A story tag: either a scoring category or an informational flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoryTag {
    Category(Category),
    Flag(InformationalFlag),
}

impl StoryTag {
    pub fn parse(raw: &str) -> Option<Self> {
        Category::from_key(raw)
            .map(Self::Category)
            .or_else(|| InformationalFlag::from_key(raw).map(Self::Flag))
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Category(category) => category.key(),
            Self::Flag(flag) => flag.key(),
        }
    }

    pub const fn category(self) -> Option<Category> {
        match self {
            Self::Category(category) => Some(category),
            Self::Flag(_) => None,
        }
    }
}

impl fmt::Display for StoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for StoryTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for StoryTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        StoryTag::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown story tag '{raw}'")))
    }
}

/// Catalog identifier such as `S14`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(pub String);

impl StoryId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display number shown on story cards (`S14` -> `14`).
    pub fn number(&self) -> &str {
        self.0.strip_prefix('S').unwrap_or(&self.0)
    }

    /// Orders `S2` before `S10`; ids without a numeric suffix sort last.
    pub fn natural_key(&self) -> (u32, &str) {
        let numeric = self.number().parse::<u32>().unwrap_or(u32::MAX);
        (numeric, self.as_str())
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    pub title: String,
    pub stakeholder: String,
    pub user_story: String,
    pub ru: u32,
    pub slots: u32,
    pub tags: Vec<StoryTag>,
}

impl Story {
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.tags.iter().filter_map(|tag| tag.category())
    }

    pub fn has_flag(&self, flag: InformationalFlag) -> bool {
        self.tags.contains(&StoryTag::Flag(flag))
    }
}

/// Per-category contribution for every tagged story occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weights(BTreeMap<Category, u32>);

impl Weights {
    pub fn standard() -> Self {
        Self(
            Category::ordered()
                .into_iter()
                .map(|category| (category, category.default_weight()))
                .collect(),
        )
    }

    pub fn zeroed() -> Self {
        Self::uniform(0)
    }

    pub fn uniform(value: u32) -> Self {
        Self(
            Category::ordered()
                .into_iter()
                .map(|category| (category, value))
                .collect(),
        )
    }

    pub fn with(mut self, category: Category, value: u32) -> Self {
        self.set(category, value);
        self
    }

    pub fn set(&mut self, category: Category, value: u32) {
        self.0.insert(category, value);
    }

    pub fn get(&self, category: Category) -> u32 {
        self.0.get(&category).copied().unwrap_or(0)
    }

    /// Builds weights from raw instructor inputs; anything unparseable becomes 0.
    pub fn from_raw_inputs<'a, I>(inputs: I) -> Self
    where
        I: IntoIterator<Item = (Category, Option<&'a str>)>,
    {
        let mut weights = Self::zeroed();
        for (category, raw) in inputs {
            weights.set(category, coerce_weight(raw));
        }
        weights
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ordered()
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::standard()
    }
}

/// Parses the leading integer of a raw weight; missing, invalid, or negative input yields 0.
/// Digit runs too large for a `u32` clamp to `u32::MAX`.
pub fn coerce_weight(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 0;
    };
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if negative || end == 0 {
        return 0;
    }
    digits[..end].bytes().fold(0u32, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(u32::from(digit - b'0'))
    })
}

/// Raw weight value as it arrives over the wire: a number or free text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WeightInput {
    Number(f64),
    Text(String),
}

impl WeightInput {
    pub fn coerce(&self) -> u32 {
        match self {
            WeightInput::Number(value) if value.is_finite() && *value >= 0.0 => {
                value.trunc().min(u32::MAX as f64) as u32
            }
            WeightInput::Number(_) => 0,
            WeightInput::Text(raw) => coerce_weight(Some(raw)),
        }
    }
}

/// Random perturbation applied to each weight contribution at scoring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Variability {
    #[default]
    Off,
    PlusMinusOne,
    PlusMinusTwo,
}

impl Variability {
    pub const fn level(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::PlusMinusOne => 1,
            Self::PlusMinusTwo => 2,
        }
    }

    pub const fn spread(self) -> i64 {
        self.level() as i64
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::PlusMinusOne => "±1",
            Self::PlusMinusTwo => "±2",
        }
    }

    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Off),
            1 => Some(Self::PlusMinusOne),
            2 => Some(Self::PlusMinusTwo),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Variability {
    type Error = InvalidVariability;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::from_level(level).ok_or(InvalidVariability(level))
    }
}

impl From<Variability> for u8 {
    fn from(value: Variability) -> Self {
        value.level()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("variability level {0} is not supported (expected 0, 1, or 2)")]
pub struct InvalidVariability(pub u8);

/// Budget ceilings a selection must respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    pub max_ru: u32,
    pub max_slots: u32,
}

impl ResourceLimits {
    pub const STANDARD: Self = Self {
        max_ru: 100,
        max_slots: 10,
    };

    pub fn admits(&self, totals: ResourceTotals) -> bool {
        totals.ru <= self.max_ru && totals.slots <= self.max_slots
    }
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Running resource consumption of a set of stories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTotals {
    pub ru: u32,
    pub slots: u32,
}

impl ResourceTotals {
    pub fn with_story(self, story: &Story) -> Self {
        Self {
            ru: self.ru.saturating_add(story.ru),
            slots: self.slots.saturating_add(story.slots),
        }
    }
}
