//! Monte Carlo cohort: many simulated students browsing the catalog in a
//! random order, each scored through the real engine with variability off.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::catalog::Catalog;
use super::domain::{Category, ResourceLimits, ResourceTotals, Story, StoryId, Variability, Weights};
use super::scoring::{OutcomeTier, RagStatus, ScoringEngine};

const MIN_TARGET: usize = 4;
const MAX_TARGET: usize = 10;
const BUCKET_WIDTH: u32 = 10;
const EXTREME_RUNS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CohortRun {
    pub run: usize,
    pub stories: Vec<StoryId>,
    pub used: ResourceTotals,
    pub total_score: u32,
    pub tier: OutcomeTier,
    pub tier_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeShare {
    pub tier: OutcomeTier,
    pub label: &'static str,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreStatistics {
    pub min: u32,
    pub p10: u32,
    pub p25: u32,
    pub median: u32,
    pub mean: f64,
    pub p75: u32,
    pub p90: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RagCounts {
    pub green: usize,
    pub amber: usize,
    pub red: usize,
}

impl RagCounts {
    fn record(&mut self, status: RagStatus) {
        match status {
            RagStatus::Green => self.green += 1,
            RagStatus::Amber => self.amber += 1,
            RagStatus::Red => self.red += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemDistribution {
    pub category: Category,
    pub system: &'static str,
    pub counts: RagCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistogramBucket {
    pub lower: u32,
    pub upper: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortReport {
    pub runs: usize,
    pub outcomes: Vec<OutcomeShare>,
    pub statistics: ScoreStatistics,
    pub systems: Vec<SystemDistribution>,
    pub histogram: Vec<HistogramBucket>,
    pub lowest: Vec<CohortRun>,
    pub highest: Vec<CohortRun>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("cohort simulation needs at least one run")]
    NoRuns,
}

/// Simulate `runs` students against the catalog.
pub fn simulate_cohort<G>(
    catalog: &Catalog,
    weights: &Weights,
    limits: ResourceLimits,
    runs: usize,
    rng: &mut G,
) -> Result<CohortReport, SimulationError>
where
    G: Rng + ?Sized,
{
    if runs == 0 {
        return Err(SimulationError::NoRuns);
    }

    let engine = ScoringEngine::new(weights.clone(), Variability::Off);
    let mut outcome_counts: BTreeMap<OutcomeTier, usize> = BTreeMap::new();
    let mut rag: BTreeMap<Category, (&'static str, RagCounts)> = BTreeMap::new();
    let mut results = Vec::with_capacity(runs);

    for run in 1..=runs {
        let (selected, used) = browse(catalog, limits, rng);
        let card = engine.score(&selected, rng);

        *outcome_counts.entry(card.outcome.tier).or_default() += 1;
        for system in &card.systems {
            rag.entry(system.category)
                .or_insert((system.system, RagCounts::default()))
                .1
                .record(system.status);
        }

        results.push(CohortRun {
            run,
            stories: selected.iter().map(|story| story.id.clone()).collect(),
            used,
            total_score: card.total_score,
            tier: card.outcome.tier,
            tier_label: card.outcome.label,
        });
    }

    let outcomes = OutcomeTier::ladder()
        .into_iter()
        .map(|tier| {
            let count = outcome_counts.get(&tier).copied().unwrap_or(0);
            OutcomeShare {
                tier,
                label: tier.label(),
                count,
                percent: count as f64 * 100.0 / runs as f64,
            }
        })
        .collect();

    let mut scores: Vec<u32> = results.iter().map(|run| run.total_score).collect();
    scores.sort_unstable();

    // Stable sort keeps run order among equal scores.
    let mut ranked = results;
    ranked.sort_by_key(|run| run.total_score);
    let lowest = ranked.iter().take(EXTREME_RUNS).cloned().collect();
    let highest = ranked
        .iter()
        .skip(ranked.len().saturating_sub(EXTREME_RUNS))
        .cloned()
        .collect();

    Ok(CohortReport {
        runs,
        outcomes,
        statistics: statistics(&scores),
        systems: rag
            .into_iter()
            .map(|(category, (system, counts))| SystemDistribution {
                category,
                system,
                counts,
            })
            .collect(),
        histogram: histogram(&scores),
        lowest,
        highest,
    })
}

/// One student: random browsing order, random target size, take what fits.
fn browse<'a, G>(
    catalog: &'a Catalog,
    limits: ResourceLimits,
    rng: &mut G,
) -> (Vec<&'a Story>, ResourceTotals)
where
    G: Rng + ?Sized,
{
    let mut order: Vec<&Story> = catalog.stories().iter().collect();
    order.shuffle(rng);
    let target = rng.gen_range(MIN_TARGET..=MAX_TARGET);

    let mut selected = Vec::with_capacity(target);
    let mut used = ResourceTotals::default();
    for story in order {
        if selected.len() >= target {
            break;
        }
        let prospective = used.with_story(story);
        if limits.admits(prospective) {
            used = prospective;
            selected.push(story);
        }
    }
    (selected, used)
}

/// Nearest-rank percentiles over ascending scores; `sorted` must be non-empty.
fn statistics(sorted: &[u32]) -> ScoreStatistics {
    let at = |fraction: f64| {
        let index = ((sorted.len() as f64) * fraction).floor() as usize;
        sorted[index.min(sorted.len() - 1)]
    };
    let sum: u64 = sorted.iter().map(|&score| u64::from(score)).sum();

    ScoreStatistics {
        min: sorted[0],
        p10: at(0.1),
        p25: at(0.25),
        median: at(0.5),
        mean: sum as f64 / sorted.len() as f64,
        p75: at(0.75),
        p90: at(0.9),
        max: sorted[sorted.len() - 1],
    }
}

fn histogram(scores: &[u32]) -> Vec<HistogramBucket> {
    let mut buckets: BTreeMap<u32, usize> = BTreeMap::new();
    for score in scores {
        *buckets.entry(score / BUCKET_WIDTH * BUCKET_WIDTH).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(lower, count)| HistogramBucket {
            lower,
            upper: lower.saturating_add(BUCKET_WIDTH - 1),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_use_nearest_rank_indices() {
        let scores: Vec<u32> = (0..10).map(|value| value * 10).collect();
        let stats = statistics(&scores);
        assert_eq!(stats.min, 0);
        assert_eq!(stats.p10, 10);
        assert_eq!(stats.p25, 20);
        assert_eq!(stats.median, 50);
        assert_eq!(stats.p90, 90);
        assert_eq!(stats.max, 90);
        assert!((stats.mean - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn histogram_groups_by_tens() {
        let buckets = histogram(&[3, 9, 10, 57, 59, 110]);
        assert_eq!(
            buckets,
            vec![
                HistogramBucket { lower: 0, upper: 9, count: 2 },
                HistogramBucket { lower: 10, upper: 19, count: 1 },
                HistogramBucket { lower: 50, upper: 59, count: 2 },
                HistogramBucket { lower: 110, upper: 119, count: 1 },
            ]
        );
    }

    #[test]
    fn top_bucket_saturates_instead_of_overflowing() {
        let buckets = histogram(&[u32::MAX, u32::MAX - 3]);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].upper, u32::MAX);
        assert_eq!(buckets[0].count, 2);
        assert!(buckets[0].lower <= u32::MAX - 3);
    }

    #[test]
    fn cohort_with_maximal_weight_completes() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut weights = Weights::zeroed();
        weights.set(Category::Survival, u32::MAX);
        let report = simulate_cohort(
            &Catalog::standard(),
            &weights,
            ResourceLimits::STANDARD,
            50,
            &mut StdRng::seed_from_u64(1),
        )
        .expect("cohort runs");
        assert_eq!(report.runs, 50);
        assert!(report
            .histogram
            .iter()
            .all(|bucket| bucket.lower <= bucket.upper));
    }

    #[test]
    fn single_run_statistics_collapse_to_one_score() {
        let stats = statistics(&[72]);
        assert_eq!((stats.min, stats.median, stats.max), (72, 72, 72));
    }
}
