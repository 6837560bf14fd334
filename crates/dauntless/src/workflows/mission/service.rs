use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use super::catalog::Catalog;
use super::domain::{Category, ResourceLimits, StoryId, Variability, WeightInput, Weights};
use super::optimal::{self, GreedyEstimate};
use super::report::{render_text_report, MissionSnapshot, SessionView};
use super::repository::{RepositoryError, SessionId, SessionRepository};
use super::scoring::PerturbationSource;
use super::session::{LaunchRecord, MissionSession, SessionError};

/// Defaults applied to every new session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionSettings {
    pub weights: Weights,
    pub variability: Variability,
    pub limits: ResourceLimits,
    pub debug_analysis: bool,
}

impl Default for MissionSettings {
    fn default() -> Self {
        Self {
            weights: Weights::standard(),
            variability: Variability::Off,
            limits: ResourceLimits::STANDARD,
            debug_analysis: false,
        }
    }
}

/// Instructor panel submission. When `weights` is present every category is
/// read from it and anything missing or unparseable counts as 0.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default)]
    pub weights: Option<BTreeMap<Category, Option<WeightInput>>>,
    #[serde(default)]
    pub variability: Option<Variability>,
}

impl SettingsUpdate {
    fn apply(self, weights: &Weights, variability: Variability) -> (Weights, Variability) {
        let weights = match self.weights {
            Some(raw) => {
                let mut resolved = Weights::zeroed();
                for category in Category::ordered() {
                    let value = raw
                        .get(&category)
                        .and_then(Option::as_ref)
                        .map(WeightInput::coerce)
                        .unwrap_or(0);
                    resolved.set(category, value);
                }
                resolved
            }
            None => weights.clone(),
        };
        (weights, self.variability.unwrap_or(variability))
    }
}

/// Service composing the catalog, session repository, and scoring engine.
pub struct MissionService<R> {
    repository: Arc<R>,
    catalog: Arc<Catalog>,
    settings: MissionSettings,
    // Serializes read-modify-write cycles so one action completes before the next.
    write_lock: Mutex<()>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("mission-{id:06}"))
}

impl<R> MissionService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(repository: Arc<R>, catalog: Arc<Catalog>, settings: MissionSettings) -> Self {
        Self {
            repository,
            catalog,
            settings,
            write_lock: Mutex::new(()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &MissionSettings {
        &self.settings
    }

    /// Open a fresh session on the selection screen.
    pub fn create(&self) -> Result<SessionView, MissionServiceError> {
        let session = MissionSession::new(self.catalog.clone(), self.settings.limits)
            .with_settings(self.settings.weights.clone(), self.settings.variability);
        let id = next_session_id();
        let view = SessionView::from_session(&id, &session);
        self.repository.insert(id.clone(), session)?;
        info!(session = %id, "mission session created");
        Ok(view)
    }

    pub fn get(&self, id: &SessionId) -> Result<SessionView, MissionServiceError> {
        let session = self.load(id)?;
        Ok(SessionView::from_session(id, &session))
    }

    pub fn add_story(
        &self,
        id: &SessionId,
        story: &StoryId,
    ) -> Result<SessionView, MissionServiceError> {
        self.modify(id, |session| {
            session.add(story).map(|_| ()).map_err(|err| {
                warn!(session = %id, story = %story, reason = %err, "story rejected");
                err
            })
        })
    }

    pub fn remove_story(
        &self,
        id: &SessionId,
        story: &StoryId,
    ) -> Result<SessionView, MissionServiceError> {
        self.modify(id, |session| session.remove(story).map(|_| ()))
    }

    pub fn clear(&self, id: &SessionId) -> Result<SessionView, MissionServiceError> {
        self.modify(id, MissionSession::clear)
    }

    pub fn configure(
        &self,
        id: &SessionId,
        update: SettingsUpdate,
    ) -> Result<SessionView, MissionServiceError> {
        self.modify(id, |session| {
            let (weights, variability) = update.apply(session.weights(), session.variability());
            session.configure(weights, variability);
            Ok(())
        })
    }

    /// Score the frozen selection and move the session to the results screen.
    pub fn launch<S>(
        &self,
        id: &SessionId,
        source: &mut S,
    ) -> Result<LaunchRecord, MissionServiceError>
    where
        S: PerturbationSource + ?Sized,
    {
        let _guard = self.lock();
        let mut session = self.load(id)?;
        let record = session.launch(source)?.clone();
        self.repository.update(id, session)?;

        info!(
            session = %id,
            score = record.results.total_score,
            tier = record.results.outcome.label,
            stories = record.selected.len(),
            "mission launched"
        );
        Ok(record)
    }

    pub fn back_to_selection(&self, id: &SessionId) -> Result<SessionView, MissionServiceError> {
        self.modify(id, |session| {
            session.back_to_selection();
            Ok(())
        })
    }

    pub fn reset(&self, id: &SessionId) -> Result<SessionView, MissionServiceError> {
        let view = self.modify(id, |session| {
            session.reset();
            Ok(())
        })?;
        info!(session = %id, "mission reset");
        Ok(view)
    }

    /// Drop a finished session from the repository.
    pub fn close(&self, id: &SessionId) -> Result<(), MissionServiceError> {
        let _guard = self.lock();
        self.repository.remove(id)?;
        info!(session = %id, "mission session closed");
        Ok(())
    }

    pub fn snapshot(&self, id: &SessionId) -> Result<MissionSnapshot, MissionServiceError> {
        let session = self.load(id)?;
        Ok(MissionSnapshot::capture(&session, Utc::now()))
    }

    pub fn text_report(&self, id: &SessionId) -> Result<String, MissionServiceError> {
        let session = self.load(id)?;
        Ok(render_text_report(&session, Utc::now()))
    }

    /// Greedy reference estimate; `None` unless debug analysis is enabled.
    pub fn optimal_estimate(&self) -> Option<GreedyEstimate> {
        self.settings.debug_analysis.then(|| {
            optimal::estimate(&self.catalog, &self.settings.weights, self.settings.limits)
        })
    }

    fn load(&self, id: &SessionId) -> Result<MissionSession, MissionServiceError> {
        Ok(self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?)
    }

    fn modify<F>(&self, id: &SessionId, action: F) -> Result<SessionView, MissionServiceError>
    where
        F: FnOnce(&mut MissionSession) -> Result<(), SessionError>,
    {
        let _guard = self.lock();
        let mut session = self.load(id)?;
        action(&mut session)?;
        let view = SessionView::from_session(id, &session);
        self.repository.update(id, session)?;
        Ok(view)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Error raised by the mission service.
#[derive(Debug, thiserror::Error)]
pub enum MissionServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
