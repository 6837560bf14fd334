use super::catalog::Catalog;
use super::domain::{ResourceLimits, ResourceTotals, StoryId, Variability, Weights};
use super::scoring::{PerturbationSource, ScoreCard, ScoringEngine};
use super::selection::{SelectionRejection, SelectionSet, Toggle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which screen the session is on. Selection controls only work in `Selecting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Selecting,
    Results,
}

impl SessionMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Selecting => "Selecting",
            Self::Results => "Results",
        }
    }
}

/// Outcome of one launch, captured before any further mutation is allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchRecord {
    pub launched_at: DateTime<Utc>,
    pub selected: Vec<StoryId>,
    pub used: ResourceTotals,
    pub limits: ResourceLimits,
    pub weights: Weights,
    pub variability: Variability,
    #[serde(flatten)]
    pub results: ScoreCard,
}

/// Owns the mutable state of one classroom run: selection, instructor
/// settings, and the most recent launch.
#[derive(Debug, Clone)]
pub struct MissionSession {
    selection: SelectionSet,
    weights: Weights,
    variability: Variability,
    mode: SessionMode,
    last_launch: Option<LaunchRecord>,
}

impl MissionSession {
    pub fn new(catalog: Arc<Catalog>, limits: ResourceLimits) -> Self {
        Self {
            selection: SelectionSet::new(catalog, limits),
            weights: Weights::standard(),
            variability: Variability::Off,
            mode: SessionMode::Selecting,
            last_launch: None,
        }
    }

    pub fn with_settings(mut self, weights: Weights, variability: Variability) -> Self {
        self.weights = weights;
        self.variability = variability;
        self
    }

    pub fn add(&mut self, id: &StoryId) -> Result<ResourceTotals, SessionError> {
        self.ensure_selecting()?;
        Ok(self.selection.add(id)?)
    }

    pub fn remove(&mut self, id: &StoryId) -> Result<bool, SessionError> {
        self.ensure_selecting()?;
        Ok(self.selection.remove(id))
    }

    pub fn toggle(&mut self, id: &StoryId) -> Result<Toggle, SessionError> {
        self.ensure_selecting()?;
        Ok(self.selection.toggle(id)?)
    }

    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.ensure_selecting()?;
        self.selection.clear();
        Ok(())
    }

    /// Instructor panel changes; read again at every launch.
    pub fn configure(&mut self, weights: Weights, variability: Variability) {
        self.weights = weights;
        self.variability = variability;
    }

    /// Freezes the selection, scores it once, and switches to the results screen.
    pub fn launch<S>(&mut self, source: &mut S) -> Result<&LaunchRecord, SessionError>
    where
        S: PerturbationSource + ?Sized,
    {
        self.ensure_selecting()?;
        if self.selection.is_empty() {
            return Err(SessionError::EmptySelection);
        }

        let engine = ScoringEngine::new(self.weights.clone(), self.variability);
        let stories: Vec<_> = self.selection.stories().collect();
        let results = engine.score(&stories, source);

        let record = LaunchRecord {
            launched_at: Utc::now(),
            selected: self.selection.ids().to_vec(),
            used: self.selection.totals(),
            limits: self.selection.limits(),
            weights: self.weights.clone(),
            variability: self.variability,
            results,
        };

        self.mode = SessionMode::Results;
        Ok(self.last_launch.insert(record))
    }

    /// Leaves the results screen with the selection intact.
    pub fn back_to_selection(&mut self) {
        self.mode = SessionMode::Selecting;
    }

    /// Clears the selection and returns to the selection screen.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.mode = SessionMode::Selecting;
        self.last_launch = None;
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn variability(&self) -> Variability {
        self.variability
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn last_launch(&self) -> Option<&LaunchRecord> {
        self.last_launch.as_ref()
    }

    fn ensure_selecting(&self) -> Result<(), SessionError> {
        match self.mode {
            SessionMode::Selecting => Ok(()),
            SessionMode::Results => Err(SessionError::SelectionLocked),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Rejected(#[from] SelectionRejection),
    #[error("Please select at least one story before launching!")]
    EmptySelection,
    #[error("selection is locked while results are displayed")]
    SelectionLocked,
}
