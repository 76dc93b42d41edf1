use crate::models::Settings;
use crate::view::TaskRow;

pub const EVENT_VIEW_UPDATED: &str = "view_updated";

/// Everything the frontend needs to redraw the page: the sorted (possibly
/// filtered) rows, whether the bulk-action buttons are visible, the current
/// input-error text, and the presentation settings.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ViewPayload {
    pub rows: Vec<TaskRow>,
    pub show_bulk_actions: bool,
    pub input_error: Option<String>,
    pub settings: Settings,
}
