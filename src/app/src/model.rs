use crate::config_store::{ConfigDocument, ConfigStore};
use crate::navigator::Navigator;
use crate::types::*;

/// Trait for types that can handle error messages
///
/// This allows HTTP helper functions to work with Model without directly depending on it.
pub trait ModelErrorHandler {
    fn set_error(&mut self, error: String);
}

/// Application Model - the complete state.
/// The shell sees it only through `ViewModel`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Model {
    // Editor state
    pub navigator: Navigator,
    pub store: ConfigStore,

    // Sync state
    pub sync_config: SyncConfig,
    /// Loaded configuration waiting for the status request to finish
    pub pending_config: Option<ConfigDocument>,
    pub load_state: LoadState,
    pub save_state: SaveState,

    // UI state
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,

    // Overlay spinner state
    pub overlay_spinner: OverlaySpinnerState,
}

impl Model {
    /// Start a loading operation (sets is_loading=true, clears error)
    pub fn start_loading(&mut self) {
        self.is_loading = true;
        self.error_message = None;
    }

    /// Stop loading and clear error
    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.error_message = None;
    }

    /// Set an error message and stop loading
    pub fn set_error(&mut self, error: String) {
        self.is_loading = false;
        self.error_message = Some(error);
    }

    /// Set an error message, stop loading, and return a render command
    pub fn set_error_and_render(
        &mut self,
        error: String,
    ) -> crux_core::Command<crate::Effect, crate::events::Event> {
        self.set_error(error);
        crux_core::render::render()
    }

    /// Clear the error message without affecting the loading state.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

impl ModelErrorHandler for Model {
    fn set_error(&mut self, error: String) {
        Model::set_error(self, error)
    }
}
