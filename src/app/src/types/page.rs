use serde::{Deserialize, Serialize};

/// Pages of the configuration portal
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum PageId {
    #[default]
    Main,
    Wifi,
    ApiKeys,
    Transit,
    Display,
    Features,
    Weather,
    System,
}

impl PageId {
    pub const ALL: [PageId; 8] = [
        PageId::Main,
        PageId::Wifi,
        PageId::ApiKeys,
        PageId::Transit,
        PageId::Display,
        PageId::Features,
        PageId::Weather,
        PageId::System,
    ];

    pub const fn title(&self) -> &'static str {
        match self {
            Self::Main => "Settings",
            Self::Wifi => "WiFi",
            Self::ApiKeys => "API Keys",
            Self::Transit => "Transit Lines",
            Self::Display => "Display",
            Self::Features => "Features",
            Self::Weather => "Weather",
            Self::System => "System",
        }
    }
}

/// Direction of a page change, used by the shell for slide animations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TransitionDirection {
    Forward,
    Back,
}

/// The most recent page change: `from` exits, `to` enters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageTransition {
    pub from: PageId,
    pub to: PageId,
    pub direction: TransitionDirection,
}
