//! Application state for the web layer.

use crate::service::MetroService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Network, timetable and route planning
    pub metro: MetroService,
}

impl AppState {
    /// Create a new app state.
    pub fn new(metro: MetroService) -> Self {
        Self { metro }
    }
}
