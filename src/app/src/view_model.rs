//! Projection of the model handed to the shell on every render.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Network};
use crate::field_graph::{self, SelectOption};
use crate::model::Model;
use crate::types::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoiceView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// One editable field with its effective value
///
/// Secret fields never carry their value; `has_value` tells whether one was typed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldView {
    pub key: String,
    pub page: PageId,
    pub kind: FieldKind,
    pub value: Option<SettingValue>,
    pub has_value: bool,
    pub visible: bool,
    pub hint: Option<RangeHint>,
    pub choices: Vec<ChoiceView>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockVisibility {
    pub direction_mode: bool,
    pub station_mode: bool,
    pub secondary_selection: bool,
    pub sleep_settings: bool,
}

/// Network and network-filtered options of one scope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionView {
    pub scope: Scope,
    pub network: Network,
    pub lines: Vec<SelectOption>,
    pub stations: Vec<SelectOption>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    // Navigation
    pub current_page: PageId,
    pub page_title: String,
    pub can_go_back: bool,
    pub transition: Option<PageTransition>,

    // Sync
    pub ready: bool,
    pub load_state: LoadState,
    pub save_state: SaveState,
    pub can_save: bool,
    pub status: Option<DeviceStatus>,

    // Form
    pub fields: Vec<FieldView>,
    pub blocks: BlockVisibility,
    pub selections: Vec<SelectionView>,
    pub brightness_conflict: bool,

    // UI state
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub overlay_spinner: OverlaySpinnerState,
}

impl ViewModel {
    pub fn new(model: &Model, catalog: &Catalog) -> Self {
        let store = &model.store;
        let current_page = model.navigator.current();

        let fields = schema()
            .iter()
            .map(|spec| {
                let value = store.effective(spec);
                let has_value = value.as_ref().is_some_and(|v| !v.is_blank());
                let value = value.filter(|_| spec.kind != FieldKind::Secret);
                let current = value.as_ref().map(ToString::to_string);
                FieldView {
                    key: spec.key.clone(),
                    page: spec.page,
                    kind: spec.kind,
                    visible: field_graph::is_field_visible(&spec.key, store),
                    hint: spec.hint,
                    choices: spec
                        .choices
                        .iter()
                        .map(|c| ChoiceView {
                            value: c.value.to_string(),
                            label: c.label.to_string(),
                            selected: current.as_deref() == Some(c.value),
                        })
                        .collect(),
                    value,
                    has_value,
                }
            })
            .collect();

        let selections = Scope::ALL
            .into_iter()
            .map(|scope| SelectionView {
                scope,
                network: field_graph::network(scope, store),
                lines: field_graph::line_options(scope, store, catalog),
                stations: field_graph::station_options(scope, store, catalog),
            })
            .collect();

        let brightness_conflict = field_graph::brightness_conflict(store);

        Self {
            current_page,
            page_title: current_page.title().to_string(),
            can_go_back: model.navigator.can_go_back(),
            transition: model.navigator.last_transition(),
            ready: model.load_state.is_ready(),
            load_state: model.load_state.clone(),
            save_state: model.save_state.clone(),
            can_save: model.load_state.is_ready()
                && !model.save_state.is_busy()
                && !brightness_conflict,
            status: store.status().cloned(),
            fields,
            blocks: BlockVisibility {
                direction_mode: field_graph::is_visible(Block::DirectionMode, store),
                station_mode: field_graph::is_visible(Block::StationMode, store),
                secondary_selection: field_graph::is_visible(Block::SecondarySelection, store),
                sleep_settings: field_graph::is_visible(Block::SleepSettings, store),
            },
            selections,
            brightness_conflict,
            is_loading: model.is_loading,
            error_message: model.error_message.clone(),
            success_message: model.success_message.clone(),
            overlay_spinner: model.overlay_spinner.clone(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn selection(&self, scope: Scope) -> Option<&SelectionView> {
        self.selections.iter().find(|s| s.scope == scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_projects_defaults() {
        let view = ViewModel::new(&Model::default(), Catalog::builtin());

        assert_eq!(view.current_page, PageId::Main);
        assert_eq!(view.page_title, "Settings");
        assert!(!view.ready);
        assert!(!view.can_save);
        assert!(view.blocks.direction_mode);
        assert!(!view.blocks.station_mode);
        assert_eq!(view.fields.len(), schema().len());
        assert_eq!(view.selections.len(), Scope::ALL.len());
    }

    #[test]
    fn choices_mark_effective_value() {
        let view = ViewModel::new(&Model::default(), Catalog::builtin());

        let timeout = view.field(keys::WATCHDOG_TIMEOUT).unwrap();
        let selected: Vec<_> = timeout
            .choices
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.value.as_str())
            .collect();

        assert_eq!(selected, vec!["8000"]);
    }

    #[test]
    fn secret_value_is_not_projected() {
        let mut model = Model::default();
        let empty = ViewModel::new(&model, Catalog::builtin());
        assert!(!empty.field(keys::WIFI_PASSWORD).unwrap().has_value);

        model
            .store
            .set(keys::WIFI_PASSWORD, SettingValue::text("hunter22"));
        let view = ViewModel::new(&model, Catalog::builtin());

        let password = view.field(keys::WIFI_PASSWORD).unwrap();
        assert_eq!(password.value, None);
        assert!(password.has_value);
        assert!(!serde_json::to_string(&view).unwrap().contains("hunter22"));
    }

    #[test]
    fn sleep_fields_hidden_until_enabled() {
        let mut model = Model::default();
        let hidden = ViewModel::new(&model, Catalog::builtin());
        assert!(!hidden.field(keys::SLEEP_END_HOUR).unwrap().visible);

        model
            .store
            .set(keys::ENABLE_SLEEP_MODE, SettingValue::Bool(true));
        let shown = ViewModel::new(&model, Catalog::builtin());

        assert!(shown.blocks.sleep_settings);
        assert!(shown.field(keys::SLEEP_END_HOUR).unwrap().visible);
    }

    #[test]
    fn conflict_blocks_save() {
        let mut model = Model {
            load_state: LoadState::Ready,
            ..Default::default()
        };
        assert!(ViewModel::new(&model, Catalog::builtin()).can_save);

        model
            .store
            .set(keys::ENABLE_SLEEP_MODE, SettingValue::Bool(true));
        model
            .store
            .set(keys::ENABLE_ADAPTIVE_BRIGHTNESS, SettingValue::Bool(true));
        let view = ViewModel::new(&model, Catalog::builtin());

        assert!(view.brightness_conflict);
        assert!(!view.can_save);
    }
}
