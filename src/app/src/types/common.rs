use serde::{Deserialize, Serialize};

/// Blocking overlay shown while the device restarts (UI state)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverlaySpinnerState {
    overlay: bool,
    title: String,
    text: Option<String>,
    countdown_seconds: Option<u32>,
}

impl OverlaySpinnerState {
    /// Create a visible overlay with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            overlay: true,
            title: title.into(),
            text: None,
            countdown_seconds: None,
        }
    }

    /// Builder pattern: add optional text to the spinner
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder pattern: add a countdown until the shell acts
    pub fn with_countdown(mut self, seconds: u32) -> Self {
        self.countdown_seconds = Some(seconds);
        self
    }

    /// Reset to default (hidden) state
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_visible(&self) -> bool {
        self.overlay
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn countdown_seconds(&self) -> Option<u32> {
        self.countdown_seconds
    }
}
