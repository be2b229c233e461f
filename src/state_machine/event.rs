//! Events that drive a turn

use crate::search::{QueryParams, SearchResults};

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // Session events
    Launch,
    Help,
    Stop,

    // Search
    FindRestaurant {
        params: QueryParams,
    },
    SearchComplete {
        params: QueryParams,
        results: SearchResults,
    },
    SearchFailed {
        message: String,
    },

    // Preferences
    SetLocation {
        location: Option<String>,
        zip: Option<String>,
    },

    // List navigation
    ReadList,
    Back,
    Details {
        /// 1-based position in the last narrated chunk
        position: Option<usize>,
    },
    Repeat,
}

impl Event {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Event::Launch => "launch",
            Event::Help => "help",
            Event::Stop => "stop",
            Event::FindRestaurant { .. } => "find_restaurant",
            Event::SearchComplete { .. } => "search_complete",
            Event::SearchFailed { .. } => "search_failed",
            Event::SetLocation { .. } => "set_location",
            Event::ReadList => "read_list",
            Event::Back => "back",
            Event::Details { .. } => "details",
            Event::Repeat => "repeat",
        }
    }
}
