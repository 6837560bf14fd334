//! Client-facing projections of a session: screen views and the two exports.

mod snapshot;
mod text;
mod views;

pub use snapshot::{MissionSnapshot, SnapshotConstraints};
pub use text::render_text_report;
pub use views::{ResourceMeterView, SelectedStoryView, SessionView};
