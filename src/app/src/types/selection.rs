use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Editing context of a line/station selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Scope {
    Primary,
    Secondary,
    Station1,
    Station2,
    Station3,
}

/// Setting written for one part of a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionField {
    Network,
    LineId,
    LineName,
    StationId,
    StationName,
}

impl SelectionField {
    pub const ALL: [SelectionField; 5] = [
        SelectionField::Network,
        SelectionField::LineId,
        SelectionField::LineName,
        SelectionField::StationId,
        SelectionField::StationName,
    ];

    const fn suffix(&self) -> &'static str {
        match self {
            Self::Network => "transit_type",
            Self::LineId => "line_id",
            Self::LineName => "line_name",
            Self::StationId => "station_id",
            Self::StationName => "station_name",
        }
    }
}

impl Scope {
    pub const ALL: [Scope; 5] = [
        Scope::Primary,
        Scope::Secondary,
        Scope::Station1,
        Scope::Station2,
        Scope::Station3,
    ];

    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Station1 => "station1",
            Self::Station2 => "station2",
            Self::Station3 => "station3",
        }
    }

    /// Setting key for one part of this scope's selection.
    ///
    /// The primary scope stores its line and station without a prefix
    /// (`line_id`, `station_name`, ...) but its network as `primary_transit_type`.
    pub fn key(&self, field: SelectionField) -> String {
        match (self, field) {
            (Self::Primary, f) if f != SelectionField::Network => f.suffix().to_string(),
            _ => format!("{}_{}", self.prefix(), field.suffix()),
        }
    }
}

/// How the display cycles through its content
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationMode {
    /// One or two lines, alternating inbound and outbound
    #[default]
    Direction,
    /// Three station slots shown one after another
    Station,
}

impl RotationMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Direction => "direction",
            Self::Station => "station",
        }
    }
}

impl fmt::Display for RotationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RotationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "direction" => Ok(Self::Direction),
            "station" => Ok(Self::Station),
            other => Err(format!("unknown rotation mode: {other}")),
        }
    }
}

/// Groups of fields whose visibility depends on a controlling field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Block {
    DirectionMode,
    StationMode,
    SecondarySelection,
    SleepSettings,
}

impl Block {
    pub const ALL: [Block; 4] = [
        Block::DirectionMode,
        Block::StationMode,
        Block::SecondarySelection,
        Block::SleepSettings,
    ];
}
