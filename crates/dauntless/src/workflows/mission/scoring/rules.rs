use super::super::domain::{Category, Story, Variability, Weights};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Source of the per-occurrence offsets used when variability is enabled.
pub trait PerturbationSource {
    /// Uniform integer draw from `[-spread, spread]`.
    fn offset(&mut self, spread: i64) -> i64;
}

impl<R: Rng + ?Sized> PerturbationSource for R {
    fn offset(&mut self, spread: i64) -> i64 {
        self.gen_range(-spread..=spread)
    }
}

/// Accumulated score per category; every category is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakdown(BTreeMap<Category, u32>);

impl Breakdown {
    pub fn zeroed() -> Self {
        Self(
            Category::ordered()
                .into_iter()
                .map(|category| (category, 0))
                .collect(),
        )
    }

    pub fn get(&self, category: Category) -> u32 {
        self.0.get(&category).copied().unwrap_or(0)
    }

    pub fn add(&mut self, category: Category, value: u32) {
        let entry = self.0.entry(category).or_insert(0);
        *entry = entry.saturating_add(value);
    }

    pub fn total(&self) -> u32 {
        self.0.values().fold(0u32, |sum, value| sum.saturating_add(*value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ordered()
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

impl Default for Breakdown {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl FromIterator<(Category, u32)> for Breakdown {
    fn from_iter<T: IntoIterator<Item = (Category, u32)>>(iter: T) -> Self {
        let mut breakdown = Self::zeroed();
        for (category, value) in iter {
            breakdown.add(category, value);
        }
        breakdown
    }
}

/// Weight contribution of one tag occurrence, perturbed and floored at zero.
pub fn contribution<S>(base: u32, variability: Variability, source: &mut S) -> u32
where
    S: PerturbationSource + ?Sized,
{
    if variability == Variability::Off {
        return base;
    }
    let spread = variability.spread();
    let perturbed = i64::from(base) + source.offset(spread).clamp(-spread, spread);
    perturbed.clamp(0, i64::from(u32::MAX)) as u32
}

/// Sums weight contributions over every category tag of every story.
pub fn accumulate<'a, I, S>(
    stories: I,
    weights: &Weights,
    variability: Variability,
    source: &mut S,
) -> Breakdown
where
    I: IntoIterator<Item = &'a Story>,
    S: PerturbationSource + ?Sized,
{
    let mut breakdown = Breakdown::zeroed();
    for story in stories {
        for category in story.categories() {
            let value = contribution(weights.get(category), variability, source);
            breakdown.add(category, value);
        }
    }
    breakdown
}
