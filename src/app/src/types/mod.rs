//! Domain-based type organization
//!
//! - page: Page identifiers and transitions
//! - selection: Selection scopes, rotation modes and field blocks
//! - setting: Setting values and the field schema
//! - status: Device telemetry and its wire format
//! - sync: Load/save state and synchronisation config
//! - common: Shared UI state

pub mod common;
pub mod page;
pub mod selection;
pub mod setting;
pub mod status;
pub mod sync;

pub use common::*;
pub use page::*;
pub use selection::*;
pub use setting::*;
pub use status::*;
pub use sync::*;
