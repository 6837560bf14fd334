use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::domain::{Story, Weights};
use super::super::session::MissionSession;

/// Selection export. Field names match the classroom JSON export so saved
/// files stay interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionSnapshot {
    pub timestamp: DateTime<Utc>,
    pub constraints: SnapshotConstraints,
    pub weights: Weights,
    #[serde(rename = "selectedStories")]
    pub selected_stories: Vec<Story>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotConstraints {
    #[serde(rename = "maxRU")]
    pub max_ru: u32,
    #[serde(rename = "maxSlots")]
    pub max_slots: u32,
    #[serde(rename = "usedRU")]
    pub used_ru: u32,
    #[serde(rename = "usedSlots")]
    pub used_slots: u32,
}

impl MissionSnapshot {
    pub fn capture(session: &MissionSession, timestamp: DateTime<Utc>) -> Self {
        let selection = session.selection();
        let used = selection.totals();
        let limits = selection.limits();

        Self {
            timestamp,
            constraints: SnapshotConstraints {
                max_ru: limits.max_ru,
                max_slots: limits.max_slots,
                used_ru: used.ru,
                used_slots: used.slots,
            },
            weights: session.weights().clone(),
            selected_stories: selection.stories().cloned().collect(),
        }
    }

    /// Download-friendly file name, e.g. `scv-dauntless-selection-1760745600000.json`.
    pub fn file_name(&self) -> String {
        format!(
            "scv-dauntless-selection-{}.json",
            self.timestamp.timestamp_millis()
        )
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
