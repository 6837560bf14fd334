pub mod consequences;
pub mod outcome;
pub mod rules;
pub mod systems;

pub use consequences::{Consequence, ConsequenceKind, ConsequenceRule};
pub use outcome::{OutcomeBand, OutcomeTier};
pub use rules::{Breakdown, PerturbationSource};
pub use systems::{RagStatus, SystemProfile, SystemStatus};

use super::domain::{Story, Variability, Weights};
use serde::Serialize;

/// Stateless scorer applying instructor weights to a frozen selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringEngine {
    weights: Weights,
    variability: Variability,
}

impl ScoringEngine {
    pub fn new(weights: Weights, variability: Variability) -> Self {
        Self {
            weights,
            variability,
        }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn variability(&self) -> Variability {
        self.variability
    }

    /// Runs one scoring pass. Randomness is only drawn when variability is on.
    pub fn score<S>(&self, stories: &[&Story], source: &mut S) -> ScoreCard
    where
        S: PerturbationSource + ?Sized,
    {
        let breakdown = rules::accumulate(
            stories.iter().copied(),
            &self.weights,
            self.variability,
            source,
        );
        let total_score = breakdown.total();
        let outcome = outcome::classify(total_score);
        let consequences =
            consequences::generate(&breakdown, outcome.tier, stories.iter().copied());
        let systems = systems::evaluate(&breakdown);

        ScoreCard {
            total_score,
            breakdown,
            outcome,
            consequences,
            systems,
        }
    }
}

/// Everything the results screen shows for one launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreCard {
    pub total_score: u32,
    pub breakdown: Breakdown,
    pub outcome: OutcomeBand,
    pub consequences: Vec<Consequence>,
    pub systems: Vec<SystemStatus>,
}
