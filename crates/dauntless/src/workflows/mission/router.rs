use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;

use super::domain::StoryId;
use super::repository::{RepositoryError, SessionId, SessionRepository};
use super::service::{MissionService, MissionServiceError, SettingsUpdate};
use super::session::SessionError;

/// Router builder exposing the selection, launch, and export endpoints.
pub fn mission_router<R>(service: Arc<MissionService<R>>) -> Router
where
    R: SessionRepository + 'static,
{
    Router::new()
        .route("/api/v1/catalog", get(catalog_handler::<R>))
        .route("/api/v1/missions", post(create_handler::<R>))
        .route(
            "/api/v1/missions/:session_id",
            get(session_handler::<R>).delete(close_handler::<R>),
        )
        .route(
            "/api/v1/missions/:session_id/stories",
            delete(clear_handler::<R>),
        )
        .route(
            "/api/v1/missions/:session_id/stories/:story_id",
            post(add_story_handler::<R>).delete(remove_story_handler::<R>),
        )
        .route(
            "/api/v1/missions/:session_id/settings",
            put(settings_handler::<R>),
        )
        .route(
            "/api/v1/missions/:session_id/launch",
            post(launch_handler::<R>),
        )
        .route(
            "/api/v1/missions/:session_id/return",
            post(return_handler::<R>),
        )
        .route("/api/v1/missions/:session_id/reset", post(reset_handler::<R>))
        .route(
            "/api/v1/missions/:session_id/export/snapshot",
            get(snapshot_handler::<R>),
        )
        .route(
            "/api/v1/missions/:session_id/export/report",
            get(report_handler::<R>),
        )
        .route(
            "/api/v1/debug/optimal-selection",
            get(optimal_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn catalog_handler<R>(State(service): State<Arc<MissionService<R>>>) -> Response
where
    R: SessionRepository + 'static,
{
    let stories = service.catalog().stories();
    (StatusCode::OK, axum::Json(stories)).into_response()
}

pub(crate) async fn create_handler<R>(State(service): State<Arc<MissionService<R>>>) -> Response
where
    R: SessionRepository + 'static,
{
    match service.create() {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn session_handler<R>(
    State(service): State<Arc<MissionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.get(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn close_handler<R>(
    State(service): State<Arc<MissionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.close(&SessionId(session_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn add_story_handler<R>(
    State(service): State<Arc<MissionService<R>>>,
    Path((session_id, story_id)): Path<(String, String)>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.add_story(&SessionId(session_id), &StoryId(story_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn remove_story_handler<R>(
    State(service): State<Arc<MissionService<R>>>,
    Path((session_id, story_id)): Path<(String, String)>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.remove_story(&SessionId(session_id), &StoryId(story_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn clear_handler<R>(
    State(service): State<Arc<MissionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.clear(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn settings_handler<R>(
    State(service): State<Arc<MissionService<R>>>,
    Path(session_id): Path<String>,
    axum::Json(update): axum::Json<SettingsUpdate>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.configure(&SessionId(session_id), update) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn launch_handler<R>(
    State(service): State<Arc<MissionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    let mut rng = StdRng::from_entropy();
    match service.launch(&SessionId(session_id), &mut rng) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn return_handler<R>(
    State(service): State<Arc<MissionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.back_to_selection(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reset_handler<R>(
    State(service): State<Arc<MissionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.reset(&SessionId(session_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn snapshot_handler<R>(
    State(service): State<Arc<MissionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.snapshot(&SessionId(session_id)) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<MissionService<R>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
{
    match service.text_report(&SessionId(session_id)) {
        Ok(report) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            report,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn optimal_handler<R>(State(service): State<Arc<MissionService<R>>>) -> Response
where
    R: SessionRepository + 'static,
{
    match service.optimal_estimate() {
        Some(estimate) => (StatusCode::OK, axum::Json(estimate)).into_response(),
        None => {
            let payload = json!({
                "error": "debug analysis is disabled",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

fn error_response(error: MissionServiceError) -> Response {
    match error {
        MissionServiceError::Session(SessionError::Rejected(rejection)) => {
            let payload = json!({
                "error": rejection.to_string(),
                "code": rejection.code(),
                "story_id": rejection.story(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        MissionServiceError::Session(SessionError::EmptySelection) => {
            let payload = json!({
                "error": SessionError::EmptySelection.to_string(),
                "code": "empty_selection",
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        MissionServiceError::Session(SessionError::SelectionLocked) => {
            let payload = json!({
                "error": SessionError::SelectionLocked.to_string(),
                "code": "selection_locked",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        MissionServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({
                "error": "mission session not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        MissionServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({
                "error": "mission session already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
