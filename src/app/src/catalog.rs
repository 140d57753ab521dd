//! Static reference data for the two transit networks.
//!
//! The catalog is read-only and built once. Handlers receive it by reference
//! so tests can inject a reduced catalog.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Transit network a line or station belongs to
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Commuter rail
    #[default]
    Metra,
    /// Rapid transit
    Cta,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Metra, Network::Cta];

    /// Wire value used in the configuration document
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Metra => "metra",
            Self::Cta => "cta",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metra" => Ok(Self::Metra),
            "cta" => Ok(Self::Cta),
            other => Err(format!("unknown transit network: {other}")),
        }
    }
}

/// A transit line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub id: String,
    pub display_name: String,
    pub network: Network,
}

/// A station, tagged with the lines serving it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: String,
    pub display_name: String,
    pub network: Network,
    pub served_line_ids: Vec<String>,
}

/// Read-only line and station tables for all networks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    lines: Vec<Line>,
    stations: Vec<Station>,
}

impl Catalog {
    pub fn new(lines: Vec<Line>, stations: Vec<Station>) -> Self {
        Self { lines, stations }
    }

    /// The built-in Chicago catalog
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn lines(&self, network: Network) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(move |l| l.network == network)
    }

    pub fn stations(&self, network: Network) -> impl Iterator<Item = &Station> {
        self.stations.iter().filter(move |s| s.network == network)
    }

    pub fn line(&self, id: &str) -> Option<&Line> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Network of a known line id, used when a document omits the network
    pub fn network_of_line(&self, id: &str) -> Option<Network> {
        self.line(id).map(|l| l.network)
    }
}

fn line(id: &str, display_name: &str, network: Network) -> Line {
    Line {
        id: id.to_string(),
        display_name: display_name.to_string(),
        network,
    }
}

fn station(id: &str, display_name: &str, network: Network, served: &str) -> Station {
    Station {
        id: id.to_string(),
        display_name: display_name.to_string(),
        network,
        served_line_ids: served.split(',').map(|s| s.trim().to_string()).collect(),
    }
}

lazy_static! {
    static ref BUILTIN: Catalog = {
        use Network::{Cta, Metra};

        let lines = vec![
            line("UP-N", "Union Pacific North", Metra),
            line("UP-NW", "Union Pacific Northwest", Metra),
            line("UP-W", "Union Pacific West", Metra),
            line("MD-N", "Milwaukee District North", Metra),
            line("MD-W", "Milwaukee District West", Metra),
            line("NCS", "North Central Service", Metra),
            line("BNSF", "BNSF Railway", Metra),
            line("HC", "Heritage Corridor", Metra),
            line("ME", "Metra Electric", Metra),
            line("RI", "Rock Island", Metra),
            line("SWS", "SouthWest Service", Metra),
            line("Red", "Red Line", Cta),
            line("Blue", "Blue Line", Cta),
            line("Brown", "Brown Line", Cta),
            line("Green", "Green Line", Cta),
            line("Orange", "Orange Line", Cta),
            line("Pink", "Pink Line", Cta),
            line("Purple", "Purple Line", Cta),
            line("Yellow", "Yellow Line", Cta),
        ];

        let stations = vec![
            station("RAVENSWOOD", "Ravenswood", Metra, "UP-N"),
            station("CLYBOURN", "Clybourn", Metra, "UP-N, UP-NW, UP-W"),
            station("OTC", "Ogilvie Transportation Center", Metra, "UP-N, UP-NW, UP-W"),
            station("CUS", "Chicago Union Station", Metra, "BNSF, HC, MD-N, MD-W, NCS, SWS"),
            station("MILLENNIUM", "Millennium Station", Metra, "ME"),
            station("LAKEFOREST", "Lake Forest", Metra, "UP-N"),
            station("EVANSTON", "Evanston (Davis St)", Metra, "UP-N"),
            station("WILMETTE", "Wilmette", Metra, "UP-N"),
            station("GLENCOE", "Glencoe", Metra, "UP-N"),
            station("WINNETKA", "Winnetka", Metra, "UP-N"),
            station("ARLINGTON", "Arlington Heights", Metra, "UP-NW"),
            station("PALATINE", "Palatine", Metra, "UP-NW"),
            station("BARRINGTON", "Barrington", Metra, "UP-NW"),
            station("CRYSTAL", "Crystal Lake", Metra, "UP-NW"),
            station("ELMHURST", "Elmhurst", Metra, "UP-W"),
            station("DOWNERS", "Downers Grove", Metra, "BNSF"),
            station("NAPERVILLE", "Naperville", Metra, "BNSF"),
            station("AURORA", "Aurora", Metra, "BNSF"),
            station("JOLIET", "Joliet", Metra, "HC, RI"),
            station("GLENVIEW", "Glenview", Metra, "MD-N"),
            station("LIBERTYVILLE", "Libertyville", Metra, "MD-N"),
            station("40900", "Howard", Cta, "Red, Purple, Yellow"),
            station("41450", "95th/Dan Ryan", Cta, "Red"),
            station("40730", "O'Hare", Cta, "Blue"),
            station("40890", "Forest Park", Cta, "Blue"),
            station("30249", "Kimball", Cta, "Brown"),
            station("41290", "Harlem/Lake", Cta, "Green"),
            station("40130", "63rd/Ashland", Cta, "Green"),
            station("40960", "Midway", Cta, "Orange"),
            station("40580", "54th/Cermak", Cta, "Pink"),
            station("40090", "Linden", Cta, "Purple"),
            station("40140", "Dempster-Skokie", Cta, "Yellow"),
        ];

        Catalog::new(lines, stations)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_partitions_by_network() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.lines(Network::Metra).count(), 11);
        assert_eq!(catalog.lines(Network::Cta).count(), 8);
        assert!(catalog.stations(Network::Cta).all(|s| s.network == Network::Cta));
    }

    #[test]
    fn station_served_lines_are_split_and_trimmed() {
        let howard = Catalog::builtin().station("40900").unwrap();

        assert_eq!(howard.served_line_ids, vec!["Red", "Purple", "Yellow"]);
    }

    #[test]
    fn network_parses_case_insensitively() {
        assert_eq!("CTA".parse::<Network>(), Ok(Network::Cta));
        assert_eq!(" metra ".parse::<Network>(), Ok(Network::Metra));
        assert!("amtrak".parse::<Network>().is_err());
    }

    #[test]
    fn network_of_line_covers_both_networks() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.network_of_line("Brown"), Some(Network::Cta));
        assert_eq!(catalog.network_of_line("UP-N"), Some(Network::Metra));
        assert_eq!(catalog.network_of_line("Brn"), None);
    }
}
