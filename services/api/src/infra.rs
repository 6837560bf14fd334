use dauntless::config::MissionConfig;
use dauntless::error::AppError;
use dauntless::workflows::mission::{
    coerce_weight, Catalog, Category, MissionSession, RepositoryError, SessionId,
    SessionRepository, Weights,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

type SessionMap<'a> = MutexGuard<'a, HashMap<SessionId, MissionSession>>;

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, MissionSession>>>,
}

impl InMemorySessionRepository {
    fn guard(&self) -> Result<SessionMap<'_>, RepositoryError> {
        self.sessions.lock().map_err(|_| {
            RepositoryError::Unavailable("session store mutex poisoned".to_string())
        })
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, id: SessionId, session: MissionSession) -> Result<(), RepositoryError> {
        let mut guard = self.guard()?;
        if guard.contains_key(&id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(id, session);
        Ok(())
    }

    fn update(&self, id: &SessionId, session: MissionSession) -> Result<(), RepositoryError> {
        let mut guard = self.guard()?;
        match guard.get_mut(id) {
            Some(existing) => {
                *existing = session;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<MissionSession>, RepositoryError> {
        Ok(self.guard()?.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        self.guard()?
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

/// Standard dataset unless a CSV override is given.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<Catalog, AppError> {
    match path {
        Some(path) => {
            let catalog = Catalog::from_path(path)?;
            info!(path = %path.display(), stories = catalog.len(), "loaded story catalog");
            Ok(catalog)
        }
        None => Ok(Catalog::standard()),
    }
}

pub(crate) fn catalog_for(
    config: &MissionConfig,
    cli_path: Option<&Path>,
) -> Result<Catalog, AppError> {
    load_catalog(cli_path.or(config.catalog_path.as_deref()))
}

/// `--weight survival=25` style override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WeightOverride {
    pub(crate) category: Category,
    pub(crate) value: u32,
}

pub(crate) fn parse_weight_override(raw: &str) -> Result<WeightOverride, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=VALUE, got '{raw}'"))?;
    let category = Category::from_key(key.trim()).ok_or_else(|| {
        let known: Vec<&str> = Category::ordered().iter().map(|c| c.key()).collect();
        format!(
            "unknown category '{}' (expected one of {})",
            key.trim(),
            known.join(", ")
        )
    })?;
    Ok(WeightOverride {
        category,
        value: coerce_weight(Some(value)),
    })
}

pub(crate) fn apply_overrides(mut weights: Weights, overrides: &[WeightOverride]) -> Weights {
    for WeightOverride { category, value } in overrides {
        weights.set(*category, *value);
    }
    weights
}
