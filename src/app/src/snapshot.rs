//! Settings snapshot submitted on save.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config_store::{ConfigDocument, ConfigStore};
use crate::types::{schema, FieldKind};

/// Flat key -> value document, serialized as a plain JSON object
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Snapshot(BTreeMap<String, Value>);

impl Snapshot {
    /// Walks every schema field, visible or not.
    ///
    /// Toggles are included only when on. Every other field is included with
    /// its effective value unless that value is blank. Keys outside the
    /// schema are never submitted.
    pub fn build(store: &ConfigStore) -> Self {
        let mut entries = BTreeMap::new();

        for spec in schema() {
            if spec.kind == FieldKind::Toggle {
                if store.is_enabled(&spec.key) {
                    entries.insert(spec.key.clone(), Value::Bool(true));
                }
                continue;
            }

            let Some(value) = store.effective(spec) else {
                continue;
            };
            if value.is_blank() {
                continue;
            }
            if let Some(json) = value.to_json() {
                entries.insert(spec.key.clone(), json);
            }
        }

        Self(entries)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The snapshot as a configuration document, as the device would serve it back
    pub fn into_document(self) -> ConfigDocument {
        self.0.into_iter().collect()
    }
}
