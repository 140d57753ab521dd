use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// Dummy absolute prefix; the shell strips it and issues relative requests.
pub const DEFAULT_BASE_URL: &str = "https://relative";
pub const DEFAULT_LOAD_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u32 = 500;
pub const DEFAULT_RELOAD_DELAY_MS: u32 = 3000;

/// Endpoints and timing of the device synchronisation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    #[validate(min_length = 1)]
    pub base_url: String,
    #[validate(pattern = "^/")]
    pub config_endpoint: String,
    #[validate(pattern = "^/")]
    pub status_endpoint: String,
    #[validate(pattern = "^/")]
    pub save_endpoint: String,
    #[validate(minimum = 1)]
    #[validate(maximum = 10)]
    pub load_attempts: u32,
    #[validate(maximum = 60000)]
    pub retry_delay_ms: u32,
    #[validate(maximum = 60000)]
    pub reload_delay_ms: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            config_endpoint: "/api/config".to_string(),
            status_endpoint: "/api/status".to_string(),
            save_endpoint: "/api/save".to_string(),
            load_attempts: DEFAULT_LOAD_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            reload_delay_ms: DEFAULT_RELOAD_DELAY_MS,
        }
    }
}

impl SyncConfig {
    /// Validates limits and that every endpoint is an absolute path
    pub fn check(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url.trim_end_matches('/'))
    }
}

/// Which document the load sequence is fetching
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LoadPhase {
    Config,
    Status,
}

/// Initial load of configuration and status
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LoadState {
    #[default]
    Idle,
    Loading {
        phase: LoadPhase,
        attempt: u32,
    },
    /// Shell sends `SyncEvent::RetryTick` after `delay_ms`
    RetryScheduled {
        phase: LoadPhase,
        attempt: u32,
        delay_ms: u32,
        last_error: String,
    },
    Ready,
    Unreachable {
        reason: String,
    },
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Loading { .. } | Self::RetryScheduled { .. })
    }
}

/// Submission of the settings snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
    /// Device accepted the settings and restarts; shell reloads after the delay
    Restarting {
        reload_after_ms: u32,
    },
    Failed {
        reason: String,
    },
}

impl SaveState {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Saving | Self::Restarting { .. })
    }
}
