use std::collections::BTreeMap;
use std::sync::Arc;

use super::common::*;
use crate::workflows::mission::domain::Category;
use crate::workflows::mission::{
    MissionService, MissionServiceError, MissionSettings, RepositoryError, SessionError,
    SessionId, SessionMode, SettingsUpdate, Variability, WeightInput, Weights,
};

#[test]
fn create_starts_on_the_selection_screen_with_configured_defaults() {
    let settings = MissionSettings {
        weights: Weights::standard().with(Category::Crew, 25),
        variability: Variability::PlusMinusOne,
        ..MissionSettings::default()
    };
    let service = build_service(settings);
    let view = service.create().expect("session created");

    assert_eq!(view.mode, SessionMode::Selecting);
    assert!(view.selected.is_empty());
    assert_eq!(view.weights.get(Category::Crew), 25);
    assert_eq!(view.variability, Variability::PlusMinusOne);
    assert_eq!(view.resource_units.remaining, 100);
    assert_eq!(view.slots.remaining, 10);
}

#[test]
fn full_round_trip_through_the_service() {
    let service = build_service(MissionSettings::default());
    let session = service.create().expect("created").session_id;

    service.add_story(&session, &id("S13")).expect("added");
    let view = service.add_story(&session, &id("S14")).expect("added");
    assert_eq!(view.resource_units.used, 35);
    assert_eq!(view.slots.used, 3);

    let record = service.launch(&session, &mut NoDraws).expect("launched");
    assert_eq!(record.results.total_score, 40);

    let view = service.get(&session).expect("view");
    assert_eq!(view.mode, SessionMode::Results);
    assert_eq!(
        view.last_launch.map(|launch| launch.results.total_score),
        Some(40)
    );

    let view = service.back_to_selection(&session).expect("returned");
    assert_eq!(view.selected.len(), 2);
    let view = service.reset(&session).expect("reset");
    assert!(view.selected.is_empty());
    assert!(view.last_launch.is_none());
}

#[test]
fn configure_coerces_raw_panel_values() {
    let service = build_service(MissionSettings::default());
    let session = service.create().expect("created").session_id;

    let mut weights = BTreeMap::new();
    weights.insert(Category::Survival, Some(WeightInput::Text("25".to_string())));
    weights.insert(Category::Crew, Some(WeightInput::Text("abc".to_string())));
    weights.insert(Category::Operations, Some(WeightInput::Number(12.9)));
    weights.insert(Category::Latent, None);
    let update = SettingsUpdate {
        weights: Some(weights),
        variability: Some(Variability::PlusMinusTwo),
    };

    let view = service.configure(&session, update).expect("configured");
    assert_eq!(view.weights.get(Category::Survival), 25);
    assert_eq!(view.weights.get(Category::Crew), 0);
    assert_eq!(view.weights.get(Category::Operations), 12);
    assert_eq!(view.weights.get(Category::Latent), 0);
    assert_eq!(view.weights.get(Category::Strategic), 0);
    assert_eq!(view.variability, Variability::PlusMinusTwo);
}

#[test]
fn configure_without_weights_keeps_current_weights() {
    let service = build_service(MissionSettings::default());
    let session = service.create().expect("created").session_id;
    let update = SettingsUpdate {
        weights: None,
        variability: Some(Variability::PlusMinusOne),
    };
    let view = service.configure(&session, update).expect("configured");
    assert_eq!(view.weights, Weights::standard());
    assert_eq!(view.variability, Variability::PlusMinusOne);
}

#[test]
fn settings_change_during_results_applies_to_the_next_launch() {
    let service = build_service(MissionSettings::default());
    let session = service.create().expect("created").session_id;
    service.add_story(&session, &id("S13")).expect("added");
    service.launch(&session, &mut NoDraws).expect("launched");

    let mut weights = BTreeMap::new();
    weights.insert(Category::Survival, Some(WeightInput::Number(50.0)));
    service
        .configure(
            &session,
            SettingsUpdate {
                weights: Some(weights),
                variability: None,
            },
        )
        .expect("configured while on results");

    service.back_to_selection(&session).expect("returned");
    let record = service.launch(&session, &mut NoDraws).expect("relaunched");
    assert_eq!(record.results.total_score, 50);
}

#[test]
fn empty_launch_and_locked_selection_are_reported() {
    let service = build_service(MissionSettings::default());
    let session = service.create().expect("created").session_id;

    let err = service.launch(&session, &mut NoDraws).expect_err("empty");
    assert!(matches!(
        err,
        MissionServiceError::Session(SessionError::EmptySelection)
    ));

    service.add_story(&session, &id("S1")).expect("added");
    service.launch(&session, &mut NoDraws).expect("launched");
    let err = service.add_story(&session, &id("S2")).expect_err("locked");
    assert!(matches!(
        err,
        MissionServiceError::Session(SessionError::SelectionLocked)
    ));
}

#[test]
fn unknown_sessions_are_not_found() {
    let service = build_service(MissionSettings::default());
    let err = service
        .get(&SessionId("mission-missing".to_string()))
        .expect_err("missing");
    assert!(matches!(
        err,
        MissionServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[test]
fn closed_sessions_are_gone() {
    let service = build_service(MissionSettings::default());
    let id = service.create().expect("session created").session_id;

    service.close(&id).expect("closed");
    assert!(matches!(
        service.get(&id),
        Err(MissionServiceError::Repository(RepositoryError::NotFound))
    ));
    assert!(matches!(
        service.close(&id),
        Err(MissionServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn repository_failures_propagate() {
    let service = MissionService::new(
        Arc::new(UnavailableRepository),
        standard_catalog(),
        MissionSettings::default(),
    );
    let err = service.create().expect_err("repository offline");
    assert!(matches!(
        err,
        MissionServiceError::Repository(RepositoryError::Unavailable(_))
    ));
}

#[test]
fn optimal_estimate_requires_debug_analysis() {
    let disabled = build_service(MissionSettings::default());
    assert!(disabled.optimal_estimate().is_none());

    let enabled = build_service(MissionSettings {
        debug_analysis: true,
        ..MissionSettings::default()
    });
    let estimate = enabled.optimal_estimate().expect("enabled");
    assert!(estimate.used.ru <= 100 && estimate.used.slots <= 10);
}

#[test]
fn exports_reflect_the_stored_session() {
    let service = build_service(MissionSettings::default());
    let session = service.create().expect("created").session_id;
    service.add_story(&session, &id("S7")).expect("added");

    let snapshot = service.snapshot(&session).expect("snapshot");
    assert_eq!(snapshot.constraints.used_ru, 14);
    assert_eq!(snapshot.selected_stories.len(), 1);

    let report = service.text_report(&session).expect("report");
    assert!(report.contains("S7: Fuel Line Stress Inspection (RU: 14, Slots: 1)"));
}
