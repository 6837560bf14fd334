use std::fmt::Write;

use chrono::{DateTime, Utc};

use super::super::domain::Story;
use super::super::session::MissionSession;

const HEAVY_RULE: &str = "═══════════════════════════════════════════════════════";
const LIGHT_RULE: &str = "───────────────────────────────────────────────────────";

/// Plain-text report of the current selection, plus the last launch when one exists.
pub fn render_text_report(session: &MissionSession, generated_at: DateTime<Utc>) -> String {
    let selection = session.selection();
    let used = selection.totals();
    let limits = selection.limits();

    let mut stories: Vec<&Story> = selection.stories().collect();
    stories.sort_by(|a, b| a.id.natural_key().cmp(&b.id.natural_key()));

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "SCV DAUNTLESS - MISSION PRIORITISATION REPORT");
    let _ = writeln!(out, "{HEAVY_RULE}");
    let _ = writeln!(
        out,
        "Generated: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "RESOURCE ALLOCATION:");
    let _ = writeln!(out, "RU Used: {}/{}", used.ru, limits.max_ru);
    let _ = writeln!(out, "Slots Used: {}/{}", used.slots, limits.max_slots);
    let _ = writeln!(out);
    let _ = writeln!(out, "SELECTED STORIES ({}):", stories.len());
    let _ = writeln!(out, "{LIGHT_RULE}");
    for story in &stories {
        let _ = writeln!(
            out,
            "{}: {} (RU: {}, Slots: {})",
            story.id, story.title, story.ru, story.slots
        );
    }

    if let Some(launch) = session.last_launch() {
        let results = &launch.results;
        let _ = writeln!(out);
        let _ = writeln!(out, "MISSION OUTCOME:");
        let _ = writeln!(out, "{LIGHT_RULE}");
        let _ = writeln!(
            out,
            "{} - {} points ({})",
            results.outcome.label, results.total_score, results.outcome.range
        );
        let _ = writeln!(out, "Variability: {}", launch.variability.label());
        let _ = writeln!(out);
        let _ = writeln!(out, "SYSTEM STATUS:");
        for system in &results.systems {
            let _ = writeln!(
                out,
                "{}: {} ({}) - {}",
                system.system, system.status_label, system.score, system.comment
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "CONSEQUENCES:");
        for consequence in &results.consequences {
            let _ = writeln!(
                out,
                "[{}] {}",
                consequence.kind.label(),
                consequence.message
            );
        }
    }

    out
}
