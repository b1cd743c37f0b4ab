//! Scalar summaries for the status surface.

use pointmap_common::{CanonicalSet, CompositeLabel, ToggleState, ViewSummary};
use serde::Serialize;

pub fn summarize(points: &CanonicalSet, toggles: ToggleState) -> ViewSummary {
    ViewSummary {
        location_count: points.len(),
        composite_label: CompositeLabel::from_toggles(toggles),
    }
}

/// Text shown in the status region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StatusLine {
    Idle,
    Loading,
    Ready { count: usize },
    Failed { message: String },
}

impl StatusLine {
    pub fn message(&self) -> String {
        match self {
            StatusLine::Idle => "No data loaded".to_string(),
            StatusLine::Loading => "Loading data…".to_string(),
            StatusLine::Ready { count: 1 } => "Loaded 1 location".to_string(),
            StatusLine::Ready { count } => format!("Loaded {} locations", count),
            StatusLine::Failed { message } => format!("Failed to load data: {}", message),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StatusLine::Failed { .. })
    }
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
