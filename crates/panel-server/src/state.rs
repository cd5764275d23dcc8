//! Shared application state.

use panel_core::PanelConfig;

/// Shared application state accessible from all route handlers.
///
/// Extraction and rendering are pure transforms over the request body, so
/// the only thing handlers share is configuration.
pub struct AppState {
    pub config: PanelConfig,
}

impl AppState {
    pub fn new(config: PanelConfig) -> Self {
        Self { config }
    }
}
