use super::common::*;
use crate::workflows::mission::domain::{Category, Story};
use crate::workflows::mission::scoring::consequences::generate;
use crate::workflows::mission::{
    Breakdown, Catalog, ConsequenceKind, ConsequenceRule, OutcomeTier, ScoringEngine,
    Variability, Weights,
};

fn no_stories() -> Vec<&'static Story> {
    Vec::new()
}

fn breakdown(values: &[(Category, u32)]) -> Breakdown {
    values.iter().copied().collect()
}

fn messages_for(category: Category, value: u32) -> Vec<&'static str> {
    generate(&breakdown(&[(category, value)]), OutcomeTier::Moderate, no_stories())
        .into_iter()
        .filter(|c| c.rule == ConsequenceRule::Category(category))
        .map(|c| c.message)
        .collect()
}

#[test]
fn survival_pair_produces_the_full_ordered_narrative() {
    let catalog = Catalog::standard();
    let stories = selected(&catalog, &["S13", "S14"]);
    let card = ScoringEngine::new(Weights::standard(), Variability::Off)
        .score(&stories, &mut NoDraws);

    let narrative: Vec<(ConsequenceKind, &str)> = card
        .consequences
        .iter()
        .map(|c| (c.kind, c.message))
        .collect();

    assert_eq!(
        narrative,
        vec![
            (ConsequenceKind::Warning, "Structural integrity questionable"),
            (ConsequenceKind::Warning, "Unknown threats lurk in the dark"),
            (ConsequenceKind::Info, "No strategic planning implemented"),
            (ConsequenceKind::Warning, "Crew morale collapsing"),
            (ConsequenceKind::Warning, "Stakeholders furious - funding at risk"),
            (ConsequenceKind::Warning, "Daily operations will suffer"),
            (ConsequenceKind::Info, "Deferred maintenance will haunt you"),
            (ConsequenceKind::Critical, "POWER SYSTEMS UNCHECKED!"),
            (ConsequenceKind::Critical, "PROPULSION UNINSPECTED!"),
            (ConsequenceKind::Critical, "MISSION FAILURE IMMINENT"),
        ]
    );
}

#[test]
fn survival_bands_pick_the_first_match() {
    assert_eq!(
        messages_for(Category::Survival, 29),
        vec!["Hull breaches detected! Life support failing!"]
    );
    assert_eq!(
        messages_for(Category::Survival, 30),
        vec!["Structural integrity questionable"]
    );
    assert!(messages_for(Category::Survival, 50).is_empty());
    assert!(messages_for(Category::Survival, 79).is_empty());
    assert_eq!(
        messages_for(Category::Survival, 80),
        vec!["Life support systems optimal"]
    );
}

#[test]
fn strict_and_inclusive_thresholds_are_respected() {
    assert!(messages_for(Category::Strategic, 50).is_empty());
    assert_eq!(
        messages_for(Category::Strategic, 51),
        vec!["Long-term investment prioritized"]
    );
    assert!(messages_for(Category::Strategic, 15).is_empty());

    assert!(messages_for(Category::Stakeholder, 35).is_empty());
    assert_eq!(
        messages_for(Category::Stakeholder, 36),
        vec!["Politics over safety - risky choice"]
    );
    assert!(messages_for(Category::Stakeholder, 5).is_empty());

    assert_eq!(
        messages_for(Category::Uncertainty, 50),
        vec!["Risks thoroughly analyzed"]
    );
    assert_eq!(messages_for(Category::Crew, 30), vec!["Crew welfare maintained"]);
    assert_eq!(
        messages_for(Category::Operations, 40),
        vec!["Operations running smoothly"]
    );
    assert_eq!(
        messages_for(Category::Latent, 30),
        vec!["Preventive maintenance addressed"]
    );
}

#[test]
fn flagged_stories_silence_coverage_warnings() {
    let catalog = Catalog::standard();
    let stories = selected(&catalog, &["S7", "S26"]);
    let consequences = generate(&Breakdown::zeroed(), OutcomeTier::Poor, stories);
    assert!(consequences
        .iter()
        .all(|c| c.rule != ConsequenceRule::PowerCoverage
            && c.rule != ConsequenceRule::PropulsionCoverage));
}

#[test]
fn exactly_one_summary_closes_every_list() {
    let summaries = [
        (OutcomeTier::Excellent, ConsequenceKind::Success, "Exceptional mission planning!"),
        (OutcomeTier::Good, ConsequenceKind::Success, "Solid decision-making"),
        (OutcomeTier::Moderate, ConsequenceKind::Warning, "Risky prioritization choices"),
        (OutcomeTier::Poor, ConsequenceKind::Critical, "MISSION FAILURE IMMINENT"),
    ];
    for (tier, kind, message) in summaries {
        let consequences = generate(&Breakdown::zeroed(), tier, no_stories());
        let closing: Vec<_> = consequences
            .iter()
            .filter(|c| c.rule == ConsequenceRule::MissionSummary)
            .collect();
        assert_eq!(closing.len(), 1);
        let last = consequences.last().expect("summary present");
        assert_eq!((last.kind, last.message), (kind, message));
    }
}
