//! In-memory mirror of the device configuration and status.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::types::{
    field, schema, DeviceStatus, FieldKind, FieldSpec, Scope, SelectionField, SettingValue,
};

/// Configuration document as served by the device
pub type ConfigDocument = Map<String, Value>;

/// Loaded configuration (editable) and device status (read-only)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStore {
    values: BTreeMap<String, SettingValue>,
    status: Option<DeviceStatus>,
}

impl ConfigStore {
    /// Build a store from a loaded document, coercing values per field kind.
    ///
    /// `null` entries count as absent and write-only fields are dropped. A
    /// missing network is inferred from the scope's line id when the catalog
    /// knows it.
    pub fn from_document(doc: &ConfigDocument, catalog: &Catalog) -> Self {
        let mut values = BTreeMap::new();

        for (key, raw) in doc {
            let value = match field(key) {
                Some(spec) if spec.kind == FieldKind::Secret => None,
                Some(spec) => SettingValue::coerce(spec.kind, raw),
                None => {
                    log::debug!("keeping unknown setting {key}");
                    SettingValue::from_json(raw)
                }
            };
            if let Some(value) = value {
                values.insert(key.clone(), value);
            }
        }

        let mut store = Self {
            values,
            status: None,
        };
        store.infer_networks(catalog);
        store
    }

    fn infer_networks(&mut self, catalog: &Catalog) {
        for scope in Scope::ALL {
            let network_key = scope.key(SelectionField::Network);
            if self.values.contains_key(&network_key) {
                continue;
            }
            let inferred = self
                .values
                .get(&scope.key(SelectionField::LineId))
                .and_then(SettingValue::as_text)
                .and_then(|line_id| catalog.network_of_line(line_id));
            if let Some(network) = inferred {
                log::debug!("inferred {network_key}={network} from line id");
                self.values
                    .insert(network_key, SettingValue::text(network.as_str()));
            }
        }
    }

    /// Stored value or `default` when the key is absent
    pub fn get(&self, key: &str, default: SettingValue) -> SettingValue {
        self.values.get(key).cloned().unwrap_or(default)
    }

    /// Stored value, if any
    pub fn raw(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: SettingValue) {
        self.values.insert(key.into(), value);
    }

    /// Value the field shows: stored value, else the device default.
    ///
    /// Returns `None` for a field that is neither stored nor has a default.
    pub fn effective(&self, spec: &FieldSpec) -> Option<SettingValue> {
        self.values
            .get(&spec.key)
            .cloned()
            .or_else(|| spec.default.clone())
    }

    /// Effective value of a schema key
    pub fn effective_by_key(&self, key: &str) -> Option<SettingValue> {
        match field(key) {
            Some(spec) => self.effective(spec),
            None => self.values.get(key).cloned(),
        }
    }

    /// Whether a toggle is on, treating absence as off
    pub fn is_enabled(&self, key: &str) -> bool {
        self.effective_by_key(key)
            .is_some_and(|value| value.as_bool())
    }

    /// Effective text of a key, empty when absent
    pub fn text(&self, key: &str) -> String {
        match self.effective_by_key(key) {
            Some(value) => value.to_string(),
            None => String::new(),
        }
    }

    pub fn status(&self) -> Option<&DeviceStatus> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, status: DeviceStatus) {
        self.status = Some(status);
    }

    /// Number of schema fields that currently hold a stored value
    pub fn stored_field_count(&self) -> usize {
        schema()
            .iter()
            .filter(|spec| self.values.contains_key(&spec.key))
            .count()
    }
}
