use crate::workflows::mission::domain::Category;
use crate::workflows::mission::scoring::systems::evaluate;
use crate::workflows::mission::{Breakdown, RagStatus};

const THRESHOLDS: [(Category, u32, u32); 7] = [
    (Category::Survival, 40, 20),
    (Category::Operations, 30, 15),
    (Category::Uncertainty, 30, 15),
    (Category::Strategic, 16, 8),
    (Category::Crew, 20, 10),
    (Category::Stakeholder, 10, 5),
    (Category::Latent, 24, 12),
];

fn status_of(category: Category, value: u32) -> RagStatus {
    let breakdown: Breakdown = [(category, value)].into_iter().collect();
    evaluate(&breakdown)
        .into_iter()
        .find(|system| system.category == category)
        .expect("every category evaluated")
        .status
}

#[test]
fn thresholds_are_inclusive_lower_bounds() {
    for (category, green, amber) in THRESHOLDS {
        assert_eq!(status_of(category, green), RagStatus::Green, "{category}");
        assert_eq!(status_of(category, green - 1), RagStatus::Amber, "{category}");
        assert_eq!(status_of(category, amber), RagStatus::Amber, "{category}");
        assert_eq!(status_of(category, amber - 1), RagStatus::Red, "{category}");
    }
}

#[test]
fn board_lists_every_system_in_category_order() {
    let board = evaluate(&Breakdown::zeroed());
    let names: Vec<&str> = board.iter().map(|system| system.system).collect();
    assert_eq!(
        names,
        vec![
            "Life Support",
            "Operations",
            "Risk Analysis",
            "Strategic",
            "Crew Welfare",
            "Stakeholders",
            "Maintenance",
        ]
    );
    assert!(board.iter().all(|system| system.status == RagStatus::Red));
}

#[test]
fn labels_and_comments_follow_status() {
    let breakdown: Breakdown = [(Category::Survival, 40), (Category::Crew, 12)]
        .into_iter()
        .collect();
    let board = evaluate(&breakdown);

    let life_support = &board[0];
    assert_eq!(life_support.status_label, "ONLINE");
    assert_eq!(life_support.comment, "All crew safety systems nominal");

    let crew = board
        .iter()
        .find(|system| system.category == Category::Crew)
        .expect("crew present");
    assert_eq!(crew.status_label, "WARNING");
    assert_eq!(crew.comment, "Crew under pressure, morale fragile");

    let strategic = board
        .iter()
        .find(|system| system.category == Category::Strategic)
        .expect("strategic present");
    assert_eq!(strategic.status_label, "CRITICAL");
    assert_eq!(strategic.comment, "No strategic planning - reactive only");
}
