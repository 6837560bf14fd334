use std::sync::Arc;

use dauntless::workflows::mission::{
    Catalog, Category, ConsequenceKind, MissionSession, OutcomeTier, RagStatus, ResourceLimits,
    SessionMode, StoryId, Variability, Weights,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn session(stories: &[&str]) -> MissionSession {
    let mut session = MissionSession::new(Arc::new(Catalog::standard()), ResourceLimits::STANDARD);
    for story in stories {
        session
            .add(&StoryId::new(*story))
            .expect("story fits the standard budget");
    }
    session
}

#[test]
fn balanced_selection_clears_for_launch() {
    // One story per category plus both coverage flags.
    let mut session = session(&["S15", "S7", "S26", "S3", "S6", "S5", "S1", "S2", "S10"]);
    let used = session.selection().totals();
    assert!(used.ru <= 100 && used.slots <= 10);

    let mut rng = StdRng::seed_from_u64(1);
    let record = session.launch(&mut rng).expect("launches");
    let results = &record.results;

    assert_eq!(results.breakdown.get(Category::Survival), 40);
    assert_eq!(results.breakdown.get(Category::Stakeholder), 10);
    assert_eq!(results.total_score, 40 + 15 + 8 + 10 + 10 + 12 + 10);
    assert_eq!(results.outcome.tier, OutcomeTier::Good);
    assert!(results
        .consequences
        .iter()
        .all(|c| c.message != "POWER SYSTEMS UNCHECKED!"
            && c.message != "PROPULSION UNINSPECTED!"));
    assert_eq!(
        results.consequences.last().map(|c| (c.kind, c.message)),
        Some((ConsequenceKind::Success, "Solid decision-making"))
    );
    assert_eq!(session.mode(), SessionMode::Results);
}

#[test]
fn heavy_survival_weighting_flips_the_tier() {
    let mut session = session(&["S13", "S14", "S15", "S7", "S22"]);
    session.configure(Weights::standard().with(Category::Survival, 25), Variability::Off);
    let mut rng = StdRng::seed_from_u64(9);
    let record = session.launch(&mut rng).expect("launches");

    assert_eq!(record.results.total_score, 125);
    assert_eq!(record.results.outcome.tier, OutcomeTier::Excellent);
    let life_support = &record.results.systems[0];
    assert_eq!(life_support.system, "Life Support");
    assert_eq!(life_support.status, RagStatus::Green);
}

#[test]
fn launch_record_serializes_results_inline() {
    let mut session = session(&["S13", "S14"]);
    let mut rng = StdRng::seed_from_u64(3);
    let record = session.launch(&mut rng).expect("launches");
    let value = serde_json::to_value(record).expect("serializes");

    assert_eq!(value["total_score"], 40);
    assert_eq!(value["outcome"]["label"], "CATASTROPHIC FAILURE");
    assert_eq!(value["selected"], serde_json::json!(["S13", "S14"]));
    assert_eq!(value["used"]["ru"], 35);
    assert_eq!(value["variability"], 0);
    assert_eq!(value["consequences"][7]["rule"]["rule"], "power_coverage");
}
