//! Dependency rules between fields.
//!
//! Everything here is a pure function of the `ConfigStore` (and the
//! `Catalog` for option lists). Visibility never affects what is stored:
//! hidden blocks keep their values and are still submitted.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Network};
use crate::config_store::ConfigStore;
use crate::types::{keys, Block, RotationMode, Scope, SelectionField, SettingValue};

/// One entry of a line or station dropdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectOption {
    pub id: String,
    pub display_name: String,
    pub selected: bool,
    /// Lines serving a rapid-transit station; informational only
    pub served_lines: Vec<String>,
}

/// Id and display name written together by a selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePair {
    pub id_key: String,
    pub id: String,
    pub name_key: String,
    pub name: String,
}

impl ReferencePair {
    /// Writes both halves; there is no way to write one without the other
    pub fn apply(self, store: &mut ConfigStore) {
        store.set(self.id_key, SettingValue::Text(self.id));
        store.set(self.name_key, SettingValue::Text(self.name));
    }
}

/// Active rotation mode; an unrecognized stored value reads as the default
pub fn rotation_mode(store: &ConfigStore) -> RotationMode {
    let raw = store.text(keys::ROTATION_MODE);
    raw.parse().unwrap_or_else(|e| {
        log::warn!("{e}, using {}", RotationMode::default());
        RotationMode::default()
    })
}

/// Network of a scope; an unrecognized stored value reads as the default
pub fn network(scope: Scope, store: &ConfigStore) -> Network {
    let raw = store.text(&scope.key(SelectionField::Network));
    raw.parse().unwrap_or_else(|e| {
        log::warn!("{scope:?}: {e}, using {}", Network::default());
        Network::default()
    })
}

pub fn is_visible(block: Block, store: &ConfigStore) -> bool {
    match block {
        Block::DirectionMode => rotation_mode(store) == RotationMode::Direction,
        Block::StationMode => rotation_mode(store) == RotationMode::Station,
        Block::SecondarySelection => store.is_enabled(keys::ENABLE_SECONDARY),
        Block::SleepSettings => store.is_enabled(keys::ENABLE_SLEEP_MODE),
    }
}

fn scope_keys(scope: Scope) -> impl Iterator<Item = String> {
    SelectionField::ALL.into_iter().map(move |f| scope.key(f))
}

/// Keys of the fields a block shows or hides
pub fn block_keys(block: Block) -> Vec<String> {
    match block {
        Block::DirectionMode => scope_keys(Scope::Primary)
            .chain(std::iter::once(keys::ENABLE_SECONDARY.to_string()))
            .chain(scope_keys(Scope::Secondary))
            .collect(),
        Block::StationMode => [Scope::Station1, Scope::Station2, Scope::Station3]
            .into_iter()
            .flat_map(scope_keys)
            .collect(),
        Block::SecondarySelection => scope_keys(Scope::Secondary).collect(),
        Block::SleepSettings => [
            keys::SLEEP_START_HOUR,
            keys::SLEEP_END_HOUR,
            keys::SLEEP_BRIGHTNESS,
        ]
        .into_iter()
        .map(str::to_string)
        .collect(),
    }
}

/// A field is visible when every block containing it is visible
pub fn is_field_visible(key: &str, store: &ConfigStore) -> bool {
    Block::ALL
        .into_iter()
        .filter(|block| block_keys(*block).iter().any(|k| k == key))
        .all(|block| is_visible(block, store))
}

/// Lines of the scope's network, flagged with the stored selection
pub fn line_options(scope: Scope, store: &ConfigStore, catalog: &Catalog) -> Vec<SelectOption> {
    let selected = store.text(&scope.key(SelectionField::LineId));
    catalog
        .lines(network(scope, store))
        .map(|line| SelectOption {
            id: line.id.clone(),
            display_name: line.display_name.clone(),
            selected: line.id == selected,
            served_lines: Vec::new(),
        })
        .collect()
}

/// Stations of the scope's network, flagged with the stored selection
pub fn station_options(scope: Scope, store: &ConfigStore, catalog: &Catalog) -> Vec<SelectOption> {
    let selected = store.text(&scope.key(SelectionField::StationId));
    let network = network(scope, store);
    catalog
        .stations(network)
        .map(|station| SelectOption {
            id: station.id.clone(),
            display_name: station.display_name.clone(),
            selected: station.id == selected,
            served_lines: match network {
                Network::Cta => station.served_line_ids.clone(),
                Network::Metra => Vec::new(),
            },
        })
        .collect()
}

/// Writes the scope's network. The chosen line and station are kept even
/// when they belong to the other network.
pub fn set_network(scope: Scope, network: Network, store: &mut ConfigStore) {
    store.set(
        scope.key(SelectionField::Network),
        SettingValue::text(network.as_str()),
    );
}

/// Derived update for choosing a line. `Ok(None)` for the empty placeholder.
pub fn select_line(
    scope: Scope,
    line_id: &str,
    catalog: &Catalog,
) -> Result<Option<ReferencePair>, String> {
    if line_id.is_empty() {
        return Ok(None);
    }
    let line = catalog
        .line(line_id)
        .ok_or_else(|| format!("unknown line id: {line_id}"))?;
    Ok(Some(ReferencePair {
        id_key: scope.key(SelectionField::LineId),
        id: line.id.clone(),
        name_key: scope.key(SelectionField::LineName),
        name: line.display_name.clone(),
    }))
}

/// Derived update for choosing a station. `Ok(None)` for the empty placeholder.
pub fn select_station(
    scope: Scope,
    station_id: &str,
    catalog: &Catalog,
) -> Result<Option<ReferencePair>, String> {
    if station_id.is_empty() {
        return Ok(None);
    }
    let station = catalog
        .station(station_id)
        .ok_or_else(|| format!("unknown station id: {station_id}"))?;
    Ok(Some(ReferencePair {
        id_key: scope.key(SelectionField::StationId),
        id: station.id.clone(),
        name_key: scope.key(SelectionField::StationName),
        name: station.display_name.clone(),
    }))
}

/// Adaptive brightness and sleep mode must not be enabled together
pub fn brightness_conflict(store: &ConfigStore) -> bool {
    store.is_enabled(keys::ENABLE_SLEEP_MODE) && store.is_enabled(keys::ENABLE_ADAPTIVE_BRIGHTNESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Line, Station};

    fn small_catalog() -> Catalog {
        let line = |id: &str, network| Line {
            id: id.to_string(),
            display_name: format!("{id} Line"),
            network,
        };
        let station = |id: &str, network, served: &[&str]| Station {
            id: id.to_string(),
            display_name: format!("{id} Station"),
            network,
            served_line_ids: served.iter().map(|s| s.to_string()).collect(),
        };
        Catalog::new(
            vec![
                line("A1", Network::Metra),
                line("A2", Network::Metra),
                line("B1", Network::Cta),
            ],
            vec![
                station("S1", Network::Metra, &["A1"]),
                station("T1", Network::Cta, &["B1"]),
            ],
        )
    }

    #[test]
    fn rotation_mode_blocks_are_exclusive() {
        let mut store = ConfigStore::default();
        assert!(is_visible(Block::DirectionMode, &store));
        assert!(!is_visible(Block::StationMode, &store));

        store.set(keys::ROTATION_MODE, SettingValue::text("station"));

        assert!(!is_visible(Block::DirectionMode, &store));
        assert!(is_visible(Block::StationMode, &store));
    }

    #[test]
    fn switching_mode_keeps_other_block_values() {
        let mut store = ConfigStore::default();
        store.set("line_id", SettingValue::text("A1"));
        store.set(keys::ROTATION_MODE, SettingValue::text("station"));

        assert_eq!(store.text("line_id"), "A1");
        assert!(!is_field_visible("line_id", &store));
    }

    #[test]
    fn toggles_gate_their_blocks() {
        let mut store = ConfigStore::default();
        assert!(!is_visible(Block::SecondarySelection, &store));
        assert!(!is_field_visible(keys::SLEEP_START_HOUR, &store));

        store.set(keys::ENABLE_SECONDARY, SettingValue::Bool(true));
        store.set(keys::ENABLE_SLEEP_MODE, SettingValue::Bool(true));

        assert!(is_field_visible("secondary_line_id", &store));
        assert!(is_field_visible(keys::SLEEP_START_HOUR, &store));
        assert!(is_field_visible(keys::BRIGHTNESS, &store));
    }

    #[test]
    fn secondary_needs_direction_mode_too() {
        let mut store = ConfigStore::default();
        store.set(keys::ENABLE_SECONDARY, SettingValue::Bool(true));
        store.set(keys::ROTATION_MODE, SettingValue::text("station"));

        assert!(is_visible(Block::SecondarySelection, &store));
        assert!(!is_field_visible("secondary_line_id", &store));
    }

    #[test]
    fn options_never_leak_across_networks() {
        let catalog = small_catalog();
        let mut store = ConfigStore::default();

        for net in Network::ALL {
            set_network(Scope::Station2, net, &mut store);
            let lines = line_options(Scope::Station2, &store, &catalog);
            let expected: Vec<_> = catalog.lines(net).map(|l| l.id.clone()).collect();

            assert_eq!(lines.iter().map(|o| o.id.clone()).collect::<Vec<_>>(), expected);
        }
    }

    #[test]
    fn only_rapid_transit_stations_carry_served_lines() {
        let catalog = small_catalog();
        let mut store = ConfigStore::default();

        let metra = station_options(Scope::Primary, &store, &catalog);
        set_network(Scope::Primary, Network::Cta, &mut store);
        let cta = station_options(Scope::Primary, &store, &catalog);

        assert!(metra[0].served_lines.is_empty());
        assert_eq!(cta[0].served_lines, vec!["B1"]);
    }

    #[test]
    fn select_line_writes_id_and_name_together() {
        let catalog = small_catalog();
        let mut store = ConfigStore::default();

        select_line(Scope::Secondary, "A2", &catalog)
            .unwrap()
            .unwrap()
            .apply(&mut store);

        assert_eq!(store.text("secondary_line_id"), "A2");
        assert_eq!(store.text("secondary_line_name"), "A2 Line");
        let options = line_options(Scope::Secondary, &store, &catalog);
        assert!(options.iter().any(|o| o.id == "A2" && o.selected));
    }

    #[test]
    fn select_station_uses_prefixed_keys() {
        let pair = select_station(Scope::Station1, "T1", &small_catalog())
            .unwrap()
            .unwrap();

        assert_eq!(pair.id_key, "station1_station_id");
        assert_eq!(pair.name_key, "station1_station_name");
        assert_eq!(pair.name, "T1 Station");
    }

    #[test]
    fn empty_and_unknown_selections() {
        let catalog = small_catalog();

        assert_eq!(select_line(Scope::Primary, "", &catalog), Ok(None));
        assert!(select_station(Scope::Primary, "nope", &catalog).is_err());
    }

    #[test]
    fn network_change_keeps_stale_selection() {
        let catalog = small_catalog();
        let mut store = ConfigStore::default();
        select_line(Scope::Primary, "A1", &catalog)
            .unwrap()
            .unwrap()
            .apply(&mut store);

        set_network(Scope::Primary, Network::Cta, &mut store);

        assert_eq!(store.text("line_id"), "A1");
        assert!(line_options(Scope::Primary, &store, &catalog)
            .iter()
            .all(|o| !o.selected));
    }

    #[test]
    fn unknown_stored_network_reads_as_default() {
        let mut store = ConfigStore::default();
        store.set("station3_transit_type", SettingValue::text("amtrak"));

        assert_eq!(network(Scope::Station3, &store), Network::Metra);
    }

    #[test]
    fn brightness_conflict_needs_both_toggles() {
        let mut store = ConfigStore::default();
        store.set(keys::ENABLE_ADAPTIVE_BRIGHTNESS, SettingValue::Bool(true));
        assert!(!brightness_conflict(&store));

        store.set(keys::ENABLE_SLEEP_MODE, SettingValue::Bool(true));
        assert!(brightness_conflict(&store));
    }
}
