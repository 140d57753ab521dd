use serde::{Deserialize, Serialize};

use crate::catalog::Network;
use crate::config_store::ConfigDocument;
use crate::types::*;

/// Page navigation events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    GoTo(PageId),
    GoBack,
}

/// Operator edits
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum FormEvent {
    SetToggle { key: String, enabled: bool },
    /// Raw text from an input or fixed-choice dropdown
    SetValue { key: String, value: String },
    SetRotationMode(RotationMode),
    SetNetwork { scope: Scope, network: Network },
    /// Empty id is the "Select..." placeholder
    SelectLine { scope: Scope, line_id: String },
    SelectStation { scope: Scope, station_id: String },
}

/// Loading and saving against the device
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum SyncEvent {
    /// Shell sends this `delay_ms` after entering `LoadState::RetryScheduled`
    RetryTick,
    /// Restart the load sequence after `LoadState::Unreachable`
    Reload,
    Save,

    // HTTP responses (internal events, skipped from serialization)
    #[serde(skip)]
    ConfigResponse(Result<ConfigDocument, String>),
    #[serde(skip)]
    StatusResponse(Result<DeviceStatus, String>),
    #[serde(skip)]
    SaveResponse(Result<(), String>),
}

/// UI-only events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ClearError,
    ClearSuccess,
}

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Event {
    Initialize,
    Configure(SyncConfig),
    Navigation(NavigationEvent),
    Form(FormEvent),
    Sync(SyncEvent),
    Ui(UiEvent),
}
