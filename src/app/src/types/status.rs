//! Device status telemetry.
//!
//! `StatusDocument` is the wire format returned by the device; it is mapped to
//! the read-only `DeviceStatus` shown on the main page.

use serde::{Deserialize, Serialize};

/// Read-only device telemetry
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceStatus {
    pub online: bool,
    pub firmware_version: String,
    pub uptime: String,
    /// Share of memory in use
    pub memory_pct: u8,
}

/// Uptime as reported by the device: preformatted or in seconds
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum WireUptime {
    Seconds(u64),
    Text(String),
}

/// Status document as served by the device
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct StatusDocument {
    pub wifi_connected: bool,
    pub version: Option<String>,
    pub uptime: Option<WireUptime>,
    pub memory_pct: Option<f64>,
    pub free_memory: Option<u64>,
    pub total_memory: Option<u64>,
}

/// Formats seconds as `"{h}h {m}m"`
pub fn format_uptime(seconds: u64) -> String {
    format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
}

impl From<StatusDocument> for DeviceStatus {
    fn from(doc: StatusDocument) -> Self {
        let uptime = match doc.uptime {
            Some(WireUptime::Seconds(s)) => format_uptime(s),
            Some(WireUptime::Text(t)) if !t.trim().is_empty() => t,
            _ => "0m".to_string(),
        };

        let memory_pct = match (doc.memory_pct, doc.free_memory, doc.total_memory) {
            (Some(pct), _, _) => pct,
            (None, Some(free), Some(total)) if total > 0 => {
                total.saturating_sub(free) as f64 / total as f64 * 100.0
            }
            _ => 0.0,
        };

        Self {
            online: doc.wifi_connected,
            firmware_version: doc
                .version
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "?".to_string()),
            uptime,
            memory_pct: memory_pct.clamp(0.0, 100.0).round() as u8,
        }
    }
}
