use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::mission::domain::{Category, Story, StoryId, StoryTag};
use crate::workflows::mission::repository::{RepositoryError, SessionId, SessionRepository};
use crate::workflows::mission::{
    Catalog, MissionService, MissionSession, MissionSettings, PerturbationSource,
    ResourceLimits,
};

pub(super) fn id(raw: &str) -> StoryId {
    StoryId::new(raw)
}

pub(super) fn standard_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::standard())
}

/// Session on the standard catalog with the given stories already selected.
pub(super) fn session_with(stories: &[&str]) -> MissionSession {
    let mut session = MissionSession::new(standard_catalog(), ResourceLimits::STANDARD);
    for story in stories {
        session.add(&id(story)).expect("fixture story fits");
    }
    session
}

pub(super) fn selected<'a>(catalog: &'a Catalog, stories: &[&str]) -> Vec<&'a Story> {
    stories
        .iter()
        .map(|story| catalog.get(&id(story)).expect("fixture story exists"))
        .collect()
}

pub(super) fn custom_story(raw_id: &str, ru: u32, slots: u32, tags: &[StoryTag]) -> Story {
    Story {
        id: id(raw_id),
        title: format!("Fixture {raw_id}"),
        stakeholder: "Instructor".to_string(),
        user_story: String::new(),
        ru,
        slots,
        tags: tags.to_vec(),
    }
}

pub(super) fn tag(category: Category) -> StoryTag {
    StoryTag::Category(category)
}

/// Replays fixed offsets and counts how many were requested.
#[derive(Debug, Default)]
pub(super) struct ScriptedOffsets {
    offsets: VecDeque<i64>,
    pub(super) draws: usize,
}

impl ScriptedOffsets {
    pub(super) fn new(offsets: &[i64]) -> Self {
        Self {
            offsets: offsets.iter().copied().collect(),
            draws: 0,
        }
    }
}

impl PerturbationSource for ScriptedOffsets {
    fn offset(&mut self, _spread: i64) -> i64 {
        self.draws += 1;
        self.offsets.pop_front().unwrap_or(0)
    }
}

/// Fails the test if any randomness is requested.
pub(super) struct NoDraws;

impl PerturbationSource for NoDraws {
    fn offset(&mut self, spread: i64) -> i64 {
        panic!("unexpected perturbation draw (spread {spread})");
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    sessions: Mutex<HashMap<SessionId, MissionSession>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, id: SessionId, session: MissionSession) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("lock");
        if guard.contains_key(&id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(id, session);
        Ok(())
    }

    fn update(&self, id: &SessionId, session: MissionSession) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("lock");
        match guard.get_mut(id) {
            Some(slot) => {
                *slot = session;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<MissionSession>, RepositoryError> {
        Ok(self.sessions.lock().expect("lock").get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        self.sessions
            .lock()
            .expect("lock")
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _id: SessionId, _session: MissionSession) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn update(&self, _id: &SessionId, _session: MissionSession) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<MissionSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

pub(super) fn build_service(settings: MissionSettings) -> Arc<MissionService<MemoryRepository>> {
    Arc::new(MissionService::new(
        Arc::new(MemoryRepository::default()),
        standard_catalog(),
        settings,
    ))
}

pub(super) async fn response_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(super) async fn response_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
