use super::super::domain::{Category, InformationalFlag, Story};
use super::outcome::OutcomeTier;
use super::rules::Breakdown;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsequenceKind {
    Critical,
    Warning,
    Success,
    Info,
}

impl ConsequenceKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Success => "Success",
            Self::Info => "Info",
        }
    }
}

/// Rule that produced a consequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "category")]
pub enum ConsequenceRule {
    Category(Category),
    PowerCoverage,
    PropulsionCoverage,
    MissionSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Consequence {
    pub kind: ConsequenceKind,
    pub message: &'static str,
    pub rule: ConsequenceRule,
}

/// Category checks in display order. The first matching band wins, so each
/// category contributes at most one message.
const CATEGORY_RULES: [(Category, &[Band]); 7] = [
    (
        Category::Survival,
        &[
            Band::Below(30, ConsequenceKind::Critical, "Hull breaches detected! Life support failing!"),
            Band::Below(50, ConsequenceKind::Warning, "Structural integrity questionable"),
            Band::AtLeast(80, ConsequenceKind::Success, "Life support systems optimal"),
        ],
    ),
    (
        Category::Uncertainty,
        &[
            Band::Below(20, ConsequenceKind::Warning, "Unknown threats lurk in the dark"),
            Band::AtLeast(50, ConsequenceKind::Success, "Risks thoroughly analyzed"),
        ],
    ),
    (
        Category::Strategic,
        &[
            Band::Above(50, ConsequenceKind::Info, "Long-term investment prioritized"),
            Band::Below(15, ConsequenceKind::Info, "No strategic planning implemented"),
        ],
    ),
    (
        Category::Crew,
        &[
            Band::Below(10, ConsequenceKind::Warning, "Crew morale collapsing"),
            Band::AtLeast(30, ConsequenceKind::Success, "Crew welfare maintained"),
        ],
    ),
    (
        Category::Stakeholder,
        &[
            Band::Above(35, ConsequenceKind::Info, "Politics over safety - risky choice"),
            Band::Below(5, ConsequenceKind::Warning, "Stakeholders furious - funding at risk"),
        ],
    ),
    (
        Category::Operations,
        &[
            Band::Below(20, ConsequenceKind::Warning, "Daily operations will suffer"),
            Band::AtLeast(40, ConsequenceKind::Success, "Operations running smoothly"),
        ],
    ),
    (
        Category::Latent,
        &[
            Band::Below(10, ConsequenceKind::Info, "Deferred maintenance will haunt you"),
            Band::AtLeast(30, ConsequenceKind::Success, "Preventive maintenance addressed"),
        ],
    ),
];

#[derive(Debug, Clone, Copy)]
enum Band {
    Below(u32, ConsequenceKind, &'static str),
    AtLeast(u32, ConsequenceKind, &'static str),
    Above(u32, ConsequenceKind, &'static str),
}

impl Band {
    fn matches(self, value: u32) -> Option<(ConsequenceKind, &'static str)> {
        let (hit, kind, message) = match self {
            Band::Below(threshold, kind, message) => (value < threshold, kind, message),
            Band::AtLeast(threshold, kind, message) => (value >= threshold, kind, message),
            Band::Above(threshold, kind, message) => (value > threshold, kind, message),
        };
        hit.then_some((kind, message))
    }
}

/// Builds the ordered consequence list: category checks, power and
/// propulsion coverage, then exactly one tier summary.
pub fn generate<'a, I>(breakdown: &Breakdown, tier: OutcomeTier, selected: I) -> Vec<Consequence>
where
    I: IntoIterator<Item = &'a Story>,
{
    let mut consequences = Vec::with_capacity(10);

    for (category, bands) in CATEGORY_RULES {
        let value = breakdown.get(category);
        if let Some((kind, message)) = bands.iter().find_map(|band| band.matches(value)) {
            consequences.push(Consequence {
                kind,
                message,
                rule: ConsequenceRule::Category(category),
            });
        }
    }

    let (mut power, mut propulsion) = (false, false);
    for story in selected {
        power |= story.has_flag(InformationalFlag::Power);
        propulsion |= story.has_flag(InformationalFlag::Propulsion);
    }

    if !power {
        consequences.push(Consequence {
            kind: ConsequenceKind::Critical,
            message: "POWER SYSTEMS UNCHECKED!",
            rule: ConsequenceRule::PowerCoverage,
        });
    }

    if !propulsion {
        consequences.push(Consequence {
            kind: ConsequenceKind::Critical,
            message: "PROPULSION UNINSPECTED!",
            rule: ConsequenceRule::PropulsionCoverage,
        });
    }

    let (kind, message) = match tier {
        OutcomeTier::Excellent => (ConsequenceKind::Success, "Exceptional mission planning!"),
        OutcomeTier::Good => (ConsequenceKind::Success, "Solid decision-making"),
        OutcomeTier::Moderate => (ConsequenceKind::Warning, "Risky prioritization choices"),
        OutcomeTier::Poor => (ConsequenceKind::Critical, "MISSION FAILURE IMMINENT"),
    };
    consequences.push(Consequence {
        kind,
        message,
        rule: ConsequenceRule::MissionSummary,
    });

    consequences
}
