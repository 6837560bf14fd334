use serde::Serialize;

use super::super::domain::{ResourceLimits, ResourceTotals, StoryId, Variability, Weights};
use super::super::repository::SessionId;
use super::super::session::{LaunchRecord, MissionSession, SessionMode};

/// Story card as shown in the selection panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedStoryView {
    pub id: StoryId,
    pub title: String,
    pub ru: u32,
    pub slots: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceMeterView {
    pub used: u32,
    pub limit: u32,
    pub remaining: u32,
}

impl ResourceMeterView {
    fn new(used: u32, limit: u32) -> Self {
        Self {
            used,
            limit,
            remaining: limit.saturating_sub(used),
        }
    }
}

/// Everything a client needs to redraw the selection or results screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub mode: SessionMode,
    pub mode_label: &'static str,
    pub selected: Vec<SelectedStoryView>,
    pub resource_units: ResourceMeterView,
    pub slots: ResourceMeterView,
    pub used: ResourceTotals,
    pub limits: ResourceLimits,
    pub weights: Weights,
    pub variability: Variability,
    pub variability_label: &'static str,
    pub last_launch: Option<LaunchRecord>,
}

impl SessionView {
    pub fn from_session(id: &SessionId, session: &MissionSession) -> Self {
        let selection = session.selection();
        let used = selection.totals();
        let limits = selection.limits();
        let selected = selection
            .stories()
            .map(|story| SelectedStoryView {
                id: story.id.clone(),
                title: story.title.clone(),
                ru: story.ru,
                slots: story.slots,
            })
            .collect();

        Self {
            session_id: id.clone(),
            mode: session.mode(),
            mode_label: session.mode().label(),
            selected,
            resource_units: ResourceMeterView::new(used.ru, limits.max_ru),
            slots: ResourceMeterView::new(used.slots, limits.max_slots),
            used,
            limits,
            weights: session.weights().clone(),
            variability: session.variability(),
            variability_label: session.variability().label(),
            last_launch: session.last_launch().cloned(),
        }
    }
}
