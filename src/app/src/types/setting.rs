//! Setting values and the fixed field schema of the configuration document.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

use crate::types::{PageId, Scope, SelectionField};

/// Value of a single setting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Ratio(f64),
    Text(String),
}

impl SettingValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Truthiness as a checkbox would render it
    pub fn as_bool(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Empty text (after trimming) counts as blank; numbers and booleans never do
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Ratio(r) => !r.is_finite(),
            Self::Bool(_) | Self::Int(_) => false,
        }
    }

    /// JSON form used in the submitted snapshot
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Self::Bool(b) => Some(Value::Bool(*b)),
            Self::Int(i) => Some(Value::Number(Number::from(*i))),
            Self::Ratio(r) => Number::from_f64(*r).map(Value::Number),
            Self::Text(s) => Some(Value::String(s.clone())),
        }
    }

    /// Untyped conversion for document keys outside the schema
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Ratio)),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Typed conversion of a loaded document value. `None` means absent.
    pub fn coerce(kind: FieldKind, value: &Value) -> Option<Self> {
        match (kind, value) {
            (_, Value::Null) => None,
            (FieldKind::Toggle, Value::Bool(b)) => Some(Self::Bool(*b)),
            (FieldKind::Toggle, Value::Number(n)) => {
                Some(Self::Bool(n.as_f64().is_some_and(|f| f != 0.0)))
            }
            (FieldKind::Toggle, Value::String(s)) => Some(Self::Bool(matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "on" | "yes"
            ))),
            (FieldKind::Integer | FieldKind::Ratio, Value::String(s)) => {
                Some(Self::parse_input(kind, s))
            }
            (FieldKind::Integer, Value::Number(n)) => match n.as_i64() {
                Some(i) => Some(Self::Int(i)),
                None => n.as_f64().map(|f| Self::Int(f.round() as i64)),
            },
            (FieldKind::Ratio, Value::Number(n)) => n.as_f64().map(Self::Ratio),
            (
                FieldKind::Text | FieldKind::Secret | FieldKind::Reference,
                Value::String(s),
            ) => Some(Self::Text(s.clone())),
            (
                FieldKind::Text | FieldKind::Secret | FieldKind::Reference,
                Value::Number(n),
            ) => Some(Self::Text(n.to_string())),
            (_, other) => {
                log::warn!("ignoring {kind:?} value of unexpected shape: {other}");
                None
            }
        }
    }

    /// Typed conversion of raw operator input.
    ///
    /// Numeric kinds parse the trimmed text; empty input clears the field and
    /// unparsable input is kept verbatim.
    pub fn parse_input(kind: FieldKind, raw: &str) -> Self {
        let trimmed = raw.trim();
        match kind {
            FieldKind::Toggle => Self::Bool(matches!(
                trimmed.to_ascii_lowercase().as_str(),
                "true" | "1" | "on" | "yes"
            )),
            FieldKind::Integer => trimmed
                .parse::<i64>()
                .map(Self::Int)
                .unwrap_or_else(|_| Self::Text(raw.to_string())),
            FieldKind::Ratio => trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Self::Ratio)
                .unwrap_or_else(|| Self::Text(raw.to_string())),
            FieldKind::Text | FieldKind::Secret | FieldKind::Reference => {
                Self::Text(raw.to_string())
            }
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Ratio(r) => write!(f, "{r}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Input control kind of a field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Toggle,
    Text,
    /// Write-only text, never pre-filled from the device
    Secret,
    Integer,
    Ratio,
    /// Derived id or display name, written only by selections
    Reference,
}

/// Advisory numeric range shown to the operator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RangeHint {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

/// Fixed option of a dropdown field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

const fn choice(value: &'static str, label: &'static str) -> Choice {
    Choice { value, label }
}

pub const ROTATION_MODE_CHOICES: &[Choice] = &[
    choice("direction", "Direction Rotation (1-2 lines)"),
    choice("station", "Station Rotation (3+ stations)"),
];
pub const NETWORK_CHOICES: &[Choice] = &[choice("metra", "Metra"), choice("cta", "CTA")];
const CHECK_UPDATE_CHOICES: &[Choice] = &[
    choice("86400", "Daily"),
    choice("604800", "Weekly"),
    choice("2592000", "Monthly"),
];
const WEATHER_SERVICE_CHOICES: &[Choice] = &[
    choice("weathergov", "Weather.gov (Free, US only)"),
    choice("openweathermap", "OpenWeatherMap (API key required)"),
];
const WEATHER_DISPLAY_CHOICES: &[Choice] = &[
    choice("icon_only", "Icon only"),
    choice("icon_and_temp", "Icon + Temperature"),
];
const WEATHER_INTERVAL_CHOICES: &[Choice] = &[
    choice("900", "15 minutes"),
    choice("1800", "30 minutes"),
    choice("3600", "1 hour"),
];
const WATCHDOG_CHOICES: &[Choice] = &[
    choice("5000", "5 seconds"),
    choice("8000", "8 seconds"),
    choice("10000", "10 seconds"),
];
const SLEEP_START_CHOICES: &[Choice] = &[
    choice("20", "8 PM"),
    choice("21", "9 PM"),
    choice("22", "10 PM"),
    choice("23", "11 PM"),
    choice("0", "Midnight"),
];
const SLEEP_END_CHOICES: &[Choice] = &[
    choice("5", "5 AM"),
    choice("6", "6 AM"),
    choice("7", "7 AM"),
    choice("8", "8 AM"),
];

/// Well-known setting keys
pub mod keys {
    pub const WIFI_SSID: &str = "wifi_ssid";
    pub const WIFI_PASSWORD: &str = "wifi_password";
    pub const METRA_TOKEN: &str = "metra_token";
    pub const CTA_TOKEN: &str = "cta_token";
    pub const ROTATION_MODE: &str = "rotation_mode";
    pub const ENABLE_SECONDARY: &str = "enable_secondary";
    pub const BRIGHTNESS: &str = "brightness";
    pub const ROTATION_TIME: &str = "rotation_time";
    pub const UPDATE_INTERVAL: &str = "update_interval";
    pub const NUM_TRAINS: &str = "num_trains";
    pub const ENABLE_SERVICE_ALERTS: &str = "enable_service_alerts";
    pub const ENABLE_ALERT_ICONS: &str = "enable_alert_icons";
    pub const ALERTS_UPDATE_INTERVAL: &str = "alerts_update_interval";
    pub const ENABLE_AUTO_UPDATE: &str = "enable_auto_update";
    pub const CHECK_UPDATE_INTERVAL: &str = "check_update_interval";
    pub const ENABLE_WEATHER: &str = "enable_weather";
    pub const WEATHER_API_SERVICE: &str = "weather_api_service";
    pub const WEATHER_ZIP_CODE: &str = "weather_zip_code";
    pub const WEATHER_API_KEY: &str = "weather_api_key";
    pub const WEATHER_DISPLAY_MODE: &str = "weather_display_mode";
    pub const WEATHER_UPDATE_INTERVAL: &str = "weather_update_interval";
    pub const ENABLE_WATCHDOG: &str = "enable_watchdog";
    pub const WATCHDOG_TIMEOUT: &str = "watchdog_timeout";
    pub const ENABLE_STATUS_LED: &str = "enable_status_led";
    pub const ENABLE_SLEEP_MODE: &str = "enable_sleep_mode";
    pub const SLEEP_START_HOUR: &str = "sleep_start_hour";
    pub const SLEEP_END_HOUR: &str = "sleep_end_hour";
    pub const SLEEP_BRIGHTNESS: &str = "sleep_brightness";
    pub const ENABLE_ADAPTIVE_BRIGHTNESS: &str = "enable_adaptive_brightness";
}

/// Schema entry for one editable field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub key: String,
    pub page: PageId,
    pub kind: FieldKind,
    pub default: Option<SettingValue>,
    pub hint: Option<RangeHint>,
    pub choices: &'static [Choice],
}

impl FieldSpec {
    pub fn new(key: impl Into<String>, page: PageId, kind: FieldKind) -> Self {
        let default = match kind {
            FieldKind::Toggle => Some(SettingValue::Bool(false)),
            _ => None,
        };
        Self {
            key: key.into(),
            page,
            kind,
            default,
            hint: None,
            choices: &[],
        }
    }

    pub fn with_default(mut self, value: SettingValue) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_range(mut self, min: f64, max: f64, step: Option<f64>) -> Self {
        self.hint = Some(RangeHint { min, max, step });
        self
    }

    pub fn with_choices(mut self, choices: &'static [Choice]) -> Self {
        self.choices = choices;
        self
    }
}

lazy_static! {
    static ref SCHEMA: Vec<FieldSpec> = build_schema();
}

/// Every editable field, in page order
pub fn schema() -> &'static [FieldSpec] {
    &SCHEMA
}

/// Schema entry for a key, if the key is part of the editable field set
pub fn field(key: &str) -> Option<&'static FieldSpec> {
    SCHEMA.iter().find(|f| f.key == key)
}

fn build_schema() -> Vec<FieldSpec> {
    use FieldKind::{Integer, Ratio, Secret, Text, Toggle};
    use SettingValue::{Int, Ratio as R};

    let mut fields = vec![
        FieldSpec::new(keys::WIFI_SSID, PageId::Wifi, Text),
        FieldSpec::new(keys::WIFI_PASSWORD, PageId::Wifi, Secret),
        FieldSpec::new(keys::METRA_TOKEN, PageId::ApiKeys, Text),
        FieldSpec::new(keys::CTA_TOKEN, PageId::ApiKeys, Text),
        FieldSpec::new(keys::ROTATION_MODE, PageId::Transit, Text)
            .with_default(SettingValue::text("direction"))
            .with_choices(ROTATION_MODE_CHOICES),
    ];

    for scope in Scope::ALL {
        for part in SelectionField::ALL {
            let spec = match part {
                SelectionField::Network => {
                    FieldSpec::new(scope.key(part), PageId::Transit, Text)
                        .with_default(SettingValue::text("metra"))
                        .with_choices(NETWORK_CHOICES)
                }
                _ => FieldSpec::new(scope.key(part), PageId::Transit, FieldKind::Reference),
            };
            fields.push(spec);
        }
        if scope == Scope::Primary {
            fields.push(FieldSpec::new(keys::ENABLE_SECONDARY, PageId::Transit, Toggle));
        }
    }

    fields.extend([
        FieldSpec::new(keys::BRIGHTNESS, PageId::Display, Ratio)
            .with_default(R(0.5))
            .with_range(0.1, 1.0, Some(0.1)),
        FieldSpec::new(keys::ROTATION_TIME, PageId::Display, Integer)
            .with_default(Int(5))
            .with_range(1.0, 30.0, None),
        FieldSpec::new(keys::UPDATE_INTERVAL, PageId::Display, Integer)
            .with_default(Int(30))
            .with_range(10.0, 300.0, None),
        FieldSpec::new(keys::NUM_TRAINS, PageId::Display, Integer)
            .with_default(Int(4))
            .with_range(1.0, 8.0, None),
        FieldSpec::new(keys::ENABLE_SERVICE_ALERTS, PageId::Features, Toggle),
        FieldSpec::new(keys::ENABLE_ALERT_ICONS, PageId::Features, Toggle),
        FieldSpec::new(keys::ALERTS_UPDATE_INTERVAL, PageId::Features, Integer)
            .with_default(Int(180))
            .with_range(60.0, 600.0, None),
        FieldSpec::new(keys::ENABLE_AUTO_UPDATE, PageId::Features, Toggle),
        FieldSpec::new(keys::CHECK_UPDATE_INTERVAL, PageId::Features, Integer)
            .with_default(Int(86400))
            .with_choices(CHECK_UPDATE_CHOICES),
        FieldSpec::new(keys::ENABLE_WEATHER, PageId::Weather, Toggle),
        FieldSpec::new(keys::WEATHER_API_SERVICE, PageId::Weather, Text)
            .with_default(SettingValue::text("weathergov"))
            .with_choices(WEATHER_SERVICE_CHOICES),
        FieldSpec::new(keys::WEATHER_ZIP_CODE, PageId::Weather, Text),
        FieldSpec::new(keys::WEATHER_API_KEY, PageId::Weather, Text),
        FieldSpec::new(keys::WEATHER_DISPLAY_MODE, PageId::Weather, Text)
            .with_default(SettingValue::text("icon_only"))
            .with_choices(WEATHER_DISPLAY_CHOICES),
        FieldSpec::new(keys::WEATHER_UPDATE_INTERVAL, PageId::Weather, Integer)
            .with_default(Int(1800))
            .with_choices(WEATHER_INTERVAL_CHOICES),
        FieldSpec::new(keys::ENABLE_WATCHDOG, PageId::System, Toggle),
        FieldSpec::new(keys::WATCHDOG_TIMEOUT, PageId::System, Integer)
            .with_default(Int(8000))
            .with_choices(WATCHDOG_CHOICES),
        FieldSpec::new(keys::ENABLE_STATUS_LED, PageId::System, Toggle),
        FieldSpec::new(keys::ENABLE_SLEEP_MODE, PageId::System, Toggle),
        FieldSpec::new(keys::SLEEP_START_HOUR, PageId::System, Integer)
            .with_default(Int(22))
            .with_choices(SLEEP_START_CHOICES),
        FieldSpec::new(keys::SLEEP_END_HOUR, PageId::System, Integer)
            .with_default(Int(6))
            .with_choices(SLEEP_END_CHOICES),
        FieldSpec::new(keys::SLEEP_BRIGHTNESS, PageId::System, Ratio)
            .with_default(R(0.1))
            .with_range(0.05, 0.3, Some(0.05)),
        FieldSpec::new(keys::ENABLE_ADAPTIVE_BRIGHTNESS, PageId::System, Toggle),
    ]);

    fields
}
