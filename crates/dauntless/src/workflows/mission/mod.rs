//! SCV Dauntless mission prioritisation.
//!
//! Students pick backlog stories under RU and slot budgets; a launch freezes
//! the selection and scores it against instructor weights. The scored result
//! drives an outcome tier, narrative consequences, and a RAG board of ship
//! systems. Sessions are stored behind [`SessionRepository`] and exposed over
//! HTTP by [`mission_router`].

pub mod catalog;
pub mod domain;
pub mod optimal;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod selection;
pub mod service;
pub mod session;
pub mod simulation;

#[cfg(test)]
mod tests;

pub use catalog::{Catalog, CatalogError};
pub use domain::{
    coerce_weight, Category, InformationalFlag, InvalidVariability, ResourceLimits,
    ResourceTotals, Story, StoryId, StoryTag, Variability, WeightInput, Weights,
};
pub use optimal::{GreedyEstimate, RankedStory, HEURISTIC_NOTICE};
pub use report::{render_text_report, MissionSnapshot, SessionView};
pub use repository::{RepositoryError, SessionId, SessionRepository};
pub use router::mission_router;
pub use scoring::{
    Breakdown, Consequence, ConsequenceKind, ConsequenceRule, OutcomeBand, OutcomeTier,
    PerturbationSource, RagStatus, ScoreCard, ScoringEngine, SystemStatus,
};
pub use selection::{SelectionRejection, SelectionSet, Toggle};
pub use service::{MissionService, MissionServiceError, MissionSettings, SettingsUpdate};
pub use session::{LaunchRecord, MissionSession, SessionError, SessionMode};
pub use simulation::{simulate_cohort, CohortReport, CohortRun, SimulationError};
