use crux_core::Command;

use crate::catalog::Catalog;
use crate::events::{Event, FormEvent};
use crate::field_graph::{self, ReferencePair};
use crate::model::Model;
use crate::types::{field, keys, FieldKind, SettingValue};
use crate::Effect;

use super::reject_programming_error;

/// Handle operator edits. Edits are only accepted once the device
/// configuration is loaded.
pub fn handle(event: FormEvent, model: &mut Model, catalog: &Catalog) -> Command<Effect, Event> {
    if !model.load_state.is_ready() {
        log::warn!("ignoring {event:?}: configuration not loaded");
        return Command::done();
    }

    match event {
        FormEvent::SetToggle { key, enabled } => handle_set_toggle(&key, enabled, model),
        FormEvent::SetValue { key, value } => handle_set_value(&key, &value, model),

        FormEvent::SetRotationMode(mode) => {
            model
                .store
                .set(keys::ROTATION_MODE, SettingValue::text(mode.as_str()));
            crux_core::render::render()
        }

        FormEvent::SetNetwork { scope, network } => {
            field_graph::set_network(scope, network, &mut model.store);
            crux_core::render::render()
        }

        FormEvent::SelectLine { scope, line_id } => apply_selection(
            field_graph::select_line(scope, &line_id, catalog),
            model,
        ),
        FormEvent::SelectStation { scope, station_id } => apply_selection(
            field_graph::select_station(scope, &station_id, catalog),
            model,
        ),
    }
}

fn handle_set_toggle(key: &str, enabled: bool, model: &mut Model) -> Command<Effect, Event> {
    match field(key) {
        Some(spec) if spec.kind == FieldKind::Toggle => {
            model.store.set(key, SettingValue::Bool(enabled));
            crux_core::render::render()
        }
        Some(spec) => reject_programming_error(format!("{key} is not a toggle ({:?})", spec.kind)),
        None => reject_programming_error(format!("unknown setting key: {key}")),
    }
}

fn handle_set_value(key: &str, raw: &str, model: &mut Model) -> Command<Effect, Event> {
    let Some(spec) = field(key) else {
        return reject_programming_error(format!("unknown setting key: {key}"));
    };

    match spec.kind {
        FieldKind::Toggle | FieldKind::Reference => {
            reject_programming_error(format!("{key} cannot be set from text ({:?})", spec.kind))
        }
        kind => {
            model.store.set(key, SettingValue::parse_input(kind, raw));
            crux_core::render::render()
        }
    }
}

fn apply_selection(
    selection: Result<Option<ReferencePair>, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    match selection {
        Ok(Some(pair)) => {
            log::debug!("{}={} ({})", pair.id_key, pair.id, pair.name);
            pair.apply(&mut model.store);
            crux_core::render::render()
        }
        Ok(None) => Command::done(),
        Err(e) => reject_programming_error(e),
    }
}
