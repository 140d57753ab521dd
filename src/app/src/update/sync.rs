use crux_core::Command;

use crate::catalog::Catalog;
use crate::config_store::{ConfigDocument, ConfigStore};
use crate::events::{Event, SyncEvent};
use crate::field_graph;
use crate::handle_response;
use crate::http_get;
use crate::model::Model;
use crate::post_json;
use crate::snapshot::Snapshot;
use crate::types::{
    DeviceStatus, LoadPhase, LoadState, OverlaySpinnerState, SaveState, StatusDocument,
    SyncConfig,
};
use crate::Effect;

use super::reject_programming_error;

/// Handle loading from and saving to the device
pub fn handle(event: SyncEvent, model: &mut Model, catalog: &Catalog) -> Command<Effect, Event> {
    match event {
        // Shell sends these tick events based on watching load_state
        SyncEvent::RetryTick => handle_retry_tick(model),
        SyncEvent::Reload => start_load(model),

        SyncEvent::ConfigResponse(result) => handle_config_response(result, model),
        SyncEvent::StatusResponse(result) => handle_status_response(result, model, catalog),

        SyncEvent::Save => handle_save(model),
        SyncEvent::SaveResponse(result) => handle_save_response(result, model),
    }
}

/// Replace the sync configuration; an invalid one keeps the previous in force
pub fn handle_configure(config: SyncConfig, model: &mut Model) -> Command<Effect, Event> {
    match config.check() {
        Ok(()) => {
            log::debug!("sync configuration replaced: {config:?}");
            model.sync_config = config;
            crux_core::render::render()
        }
        Err(e) => model.set_error_and_render(format!("Invalid sync configuration: {e}")),
    }
}

/// Start (or restart) the load sequence: configuration first, then status
pub fn start_load(model: &mut Model) -> Command<Effect, Event> {
    if model.load_state.is_in_flight() {
        log::warn!("load already in progress, ignoring");
        return Command::done();
    }
    if model.save_state == SaveState::Saving {
        log::warn!("save in progress, ignoring load request");
        return Command::done();
    }

    model.pending_config = None;
    model.save_state = SaveState::Idle;
    model.overlay_spinner.clear();
    model.start_loading();

    Command::all([crux_core::render::render(), request(LoadPhase::Config, 1, model)])
}

fn request(phase: LoadPhase, attempt: u32, model: &mut Model) -> Command<Effect, Event> {
    model.load_state = LoadState::Loading { phase, attempt };
    let config = &model.sync_config;
    log::debug!("loading {phase:?}, attempt {attempt}/{}", config.load_attempts);

    match phase {
        LoadPhase::Config => {
            let url = config.url(&config.config_endpoint);
            http_get!(Sync, SyncEvent, &url, ConfigResponse, "Load configuration", ConfigDocument)
        }
        LoadPhase::Status => {
            let url = config.url(&config.status_endpoint);
            http_get!(Sync, SyncEvent, &url, StatusResponse, "Load status", StatusDocument,
                map: DeviceStatus::from)
        }
    }
}

fn handle_retry_tick(model: &mut Model) -> Command<Effect, Event> {
    let LoadState::RetryScheduled { phase, attempt, .. } = model.load_state else {
        log::warn!("retry tick in {:?}, ignoring", model.load_state);
        return Command::done();
    };

    Command::all([
        crux_core::render::render(),
        request(phase, attempt + 1, model),
    ])
}

/// The in-flight attempt of `expected`, if the load sequence is waiting for it
fn in_flight_attempt(model: &Model, expected: LoadPhase) -> Option<u32> {
    match model.load_state {
        LoadState::Loading { phase, attempt } if phase == expected => Some(attempt),
        _ => None,
    }
}

fn handle_config_response(
    result: Result<ConfigDocument, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    let Some(attempt) = in_flight_attempt(model, LoadPhase::Config) else {
        return reject_programming_error(format!(
            "configuration response in {:?}",
            model.load_state
        ));
    };

    match result {
        Ok(doc) => {
            log::debug!("configuration loaded ({} keys)", doc.len());
            model.pending_config = Some(doc);
            Command::all([
                crux_core::render::render(),
                request(LoadPhase::Status, 1, model),
            ])
        }
        Err(e) => load_failed(LoadPhase::Config, attempt, e, model),
    }
}

fn handle_status_response(
    result: Result<DeviceStatus, String>,
    model: &mut Model,
    catalog: &Catalog,
) -> Command<Effect, Event> {
    let Some(attempt) = in_flight_attempt(model, LoadPhase::Status) else {
        return reject_programming_error(format!("status response in {:?}", model.load_state));
    };

    match result {
        Ok(status) => {
            let Some(doc) = model.pending_config.take() else {
                return reject_programming_error("status loaded without configuration".into());
            };
            let mut store = ConfigStore::from_document(&doc, catalog);
            store.set_status(status);
            log::info!(
                "device configuration ready ({} schema fields stored)",
                store.stored_field_count()
            );

            model.store = store;
            model.load_state = LoadState::Ready;
            model.stop_loading();
            crux_core::render::render()
        }
        Err(e) => load_failed(LoadPhase::Status, attempt, e, model),
    }
}

fn load_failed(
    phase: LoadPhase,
    attempt: u32,
    error: String,
    model: &mut Model,
) -> Command<Effect, Event> {
    let config = &model.sync_config;

    if attempt < config.load_attempts {
        log::warn!("{error} (attempt {attempt}/{}), retrying", config.load_attempts);
        model.load_state = LoadState::RetryScheduled {
            phase,
            attempt,
            delay_ms: config.retry_delay_ms,
            last_error: error,
        };
        return crux_core::render::render();
    }

    log::error!("device unreachable: {error}");
    model.pending_config = None;
    model.load_state = LoadState::Unreachable {
        reason: error.clone(),
    };
    model.set_error_and_render(format!("Cannot reach device: {error}"))
}

fn handle_save(model: &mut Model) -> Command<Effect, Event> {
    if !model.load_state.is_ready() {
        log::warn!("save requested before configuration loaded, ignoring");
        return Command::done();
    }
    if model.save_state.is_busy() {
        log::warn!("save requested in {:?}, ignoring", model.save_state);
        return Command::done();
    }
    if field_graph::brightness_conflict(&model.store) {
        return model.set_error_and_render(
            "Sleep mode and adaptive brightness cannot both be enabled".to_string(),
        );
    }

    let snapshot = Snapshot::build(&model.store);
    log::debug!("saving {} settings", snapshot.len());
    model.save_state = SaveState::Saving;

    let url = model.sync_config.url(&model.sync_config.save_endpoint);
    post_json!(Sync, SyncEvent, model, &url, SaveResponse, "Save settings",
        body_json: &snapshot
    )
}

fn handle_save_response(result: Result<(), String>, model: &mut Model) -> Command<Effect, Event> {
    if model.save_state != SaveState::Saving {
        return reject_programming_error(format!("save response in {:?}", model.save_state));
    }

    handle_response!(model, result, {
        on_success: |model, _| {
            let reload_after_ms = model.sync_config.reload_delay_ms;
            model.save_state = SaveState::Restarting { reload_after_ms };
            model.success_message = Some("Settings saved".to_string());
            model.overlay_spinner = OverlaySpinnerState::new("Saved! Restarting...")
                .with_text("The page reloads once the device is back.")
                .with_countdown(reload_after_ms.div_ceil(1000));
        },
        on_error: |model, e| {
            log::error!("{e}");
            model.save_state = SaveState::Failed { reason: e.clone() };
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::keys;
    use crate::types::SettingValue;
    use crux_http::protocol::HttpRequest;
    use serde_json::json;

    fn config_doc() -> ConfigDocument {
        match json!({
            "wifi_ssid": "home",
            "line_id": "UP-N",
            "line_name": "Union Pacific North",
            "enable_secondary": false
        }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn status() -> DeviceStatus {
        DeviceStatus {
            online: true,
            firmware_version: "1.3.0".to_string(),
            uptime: "1h 5m".to_string(),
            memory_pct: 41,
        }
    }

    fn ready_model() -> Model {
        let mut model = Model::default();
        let _ = start_load(&mut model);
        let _ = handle(
            SyncEvent::ConfigResponse(Ok(config_doc())),
            &mut model,
            Catalog::builtin(),
        );
        let _ = handle(
            SyncEvent::StatusResponse(Ok(status())),
            &mut model,
            Catalog::builtin(),
        );
        model
    }

    fn http_requests(mut cmd: Command<Effect, Event>) -> Vec<HttpRequest> {
        cmd.effects()
            .filter_map(|effect| match effect {
                Effect::Http(request) => Some(request.operation),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn initialize_requests_configuration_first() {
        let mut model = Model::default();

        let requests = http_requests(start_load(&mut model));

        assert!(model.is_loading);
        assert_eq!(
            model.load_state,
            LoadState::Loading {
                phase: LoadPhase::Config,
                attempt: 1
            }
        );
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].url, "https://relative/api/config");
    }

    #[test]
    fn configuration_then_status_commits_store() {
        let mut model = Model::default();
        let _ = start_load(&mut model);

        let requests = http_requests(handle(
            SyncEvent::ConfigResponse(Ok(config_doc())),
            &mut model,
            Catalog::builtin(),
        ));
        assert_eq!(requests[0].url, "https://relative/api/status");
        assert!(!model.load_state.is_ready());
        assert_eq!(model.store.raw(keys::WIFI_SSID), None);

        let _ = handle(
            SyncEvent::StatusResponse(Ok(status())),
            &mut model,
            Catalog::builtin(),
        );

        assert!(model.load_state.is_ready());
        assert!(!model.is_loading);
        assert!(model.pending_config.is_none());
        assert_eq!(model.store.text(keys::WIFI_SSID), "home");
        assert_eq!(model.store.status(), Some(&status()));
    }

    #[test]
    fn failed_attempt_schedules_retry() {
        let mut model = Model::default();
        let _ = start_load(&mut model);

        let _ = handle(
            SyncEvent::ConfigResponse(Err("Load configuration failed: timeout".into())),
            &mut model,
            Catalog::builtin(),
        );

        assert_eq!(
            model.load_state,
            LoadState::RetryScheduled {
                phase: LoadPhase::Config,
                attempt: 1,
                delay_ms: 500,
                last_error: "Load configuration failed: timeout".to_string(),
            }
        );
        assert_eq!(model.error_message, None);

        let requests = http_requests(handle(SyncEvent::RetryTick, &mut model, Catalog::builtin()));

        assert_eq!(requests.len(), 1);
        assert_eq!(
            model.load_state,
            LoadState::Loading {
                phase: LoadPhase::Config,
                attempt: 2
            }
        );
    }

    #[test]
    fn exhausted_attempts_make_device_unreachable() {
        let mut model = Model::default();
        let _ = start_load(&mut model);

        for _ in 1..model.sync_config.load_attempts {
            let _ = handle(
                SyncEvent::ConfigResponse(Err("boom".into())),
                &mut model,
                Catalog::builtin(),
            );
            let _ = handle(SyncEvent::RetryTick, &mut model, Catalog::builtin());
        }
        let _ = handle(
            SyncEvent::ConfigResponse(Err("boom".into())),
            &mut model,
            Catalog::builtin(),
        );

        assert_eq!(
            model.load_state,
            LoadState::Unreachable {
                reason: "boom".to_string()
            }
        );
        assert_eq!(model.error_message, Some("Cannot reach device: boom".to_string()));
        assert!(!model.is_loading);

        let requests = http_requests(handle(SyncEvent::Reload, &mut model, Catalog::builtin()));
        assert_eq!(requests.len(), 1);
        assert!(model.load_state.is_in_flight());
    }

    #[test]
    fn status_failure_restarts_attempt_count_for_status_only() {
        let mut model = Model::default();
        let _ = start_load(&mut model);
        let _ = handle(
            SyncEvent::ConfigResponse(Ok(config_doc())),
            &mut model,
            Catalog::builtin(),
        );

        let _ = handle(
            SyncEvent::StatusResponse(Err("flaky".into())),
            &mut model,
            Catalog::builtin(),
        );
        let requests = http_requests(handle(SyncEvent::RetryTick, &mut model, Catalog::builtin()));

        assert_eq!(requests[0].url, "https://relative/api/status");
        assert!(model.pending_config.is_some());
    }

    #[test]
    fn retry_tick_outside_retry_is_ignored() {
        let mut model = ready_model();
        let before = model.clone();

        let _ = handle(SyncEvent::RetryTick, &mut model, Catalog::builtin());

        assert_eq!(model, before);
    }

    #[test]
    fn second_initialize_while_loading_is_ignored() {
        let mut model = Model::default();
        let _ = start_load(&mut model);

        let requests = http_requests(start_load(&mut model));

        assert!(requests.is_empty());
    }

    #[test]
    fn save_posts_snapshot() {
        let mut model = ready_model();

        let requests = http_requests(handle(SyncEvent::Save, &mut model, Catalog::builtin()));

        assert_eq!(model.save_state, SaveState::Saving);
        assert!(model.is_loading);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].url, "https://relative/api/save");
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["line_id"], json!("UP-N"));
        assert!(body.get(keys::ENABLE_SECONDARY).is_none());
    }

    #[test]
    fn save_before_load_is_ignored() {
        let mut model = Model::default();

        let requests = http_requests(handle(SyncEvent::Save, &mut model, Catalog::builtin()));

        assert!(requests.is_empty());
        assert_eq!(model.save_state, SaveState::Idle);
    }

    #[test]
    fn second_save_while_saving_is_ignored() {
        let mut model = ready_model();
        let _ = handle(SyncEvent::Save, &mut model, Catalog::builtin());

        let requests = http_requests(handle(SyncEvent::Save, &mut model, Catalog::builtin()));

        assert!(requests.is_empty());
    }

    #[test]
    fn brightness_conflict_rejects_save() {
        let mut model = ready_model();
        model
            .store
            .set(keys::ENABLE_SLEEP_MODE, SettingValue::Bool(true));
        model
            .store
            .set(keys::ENABLE_ADAPTIVE_BRIGHTNESS, SettingValue::Bool(true));

        let requests = http_requests(handle(SyncEvent::Save, &mut model, Catalog::builtin()));

        assert!(requests.is_empty());
        assert_eq!(model.save_state, SaveState::Idle);
        assert!(model.error_message.is_some());
    }

    #[test]
    fn successful_save_shows_restart_overlay() {
        let mut model = ready_model();
        let _ = handle(SyncEvent::Save, &mut model, Catalog::builtin());

        let _ = handle(SyncEvent::SaveResponse(Ok(())), &mut model, Catalog::builtin());

        assert_eq!(
            model.save_state,
            SaveState::Restarting {
                reload_after_ms: 3000
            }
        );
        assert!(model.overlay_spinner.is_visible());
        assert_eq!(model.overlay_spinner.title(), "Saved! Restarting...");
        assert_eq!(model.overlay_spinner.countdown_seconds(), Some(3));
        assert!(!model.is_loading);
    }

    #[test]
    fn failed_save_keeps_store_untouched() {
        let mut model = ready_model();
        model
            .store
            .set(keys::NUM_TRAINS, SettingValue::Int(6));
        let store_before = model.store.clone();
        let _ = handle(SyncEvent::Save, &mut model, Catalog::builtin());

        let _ = handle(
            SyncEvent::SaveResponse(Err("Save settings failed: HTTP 500 (Empty body)".into())),
            &mut model,
            Catalog::builtin(),
        );

        assert_eq!(model.store, store_before);
        assert!(matches!(model.save_state, SaveState::Failed { .. }));
        assert_eq!(
            model.error_message,
            Some("Save settings failed: HTTP 500 (Empty body)".to_string())
        );

        let requests = http_requests(handle(SyncEvent::Save, &mut model, Catalog::builtin()));
        assert_eq!(requests.len(), 1);
    }

    #[test]
    fn reload_during_save_keeps_save_flow() {
        let mut model = ready_model();
        let _ = handle(SyncEvent::Save, &mut model, Catalog::builtin());

        let requests = http_requests(handle(SyncEvent::Reload, &mut model, Catalog::builtin()));
        assert!(requests.is_empty());
        assert_eq!(model.save_state, SaveState::Saving);
        assert!(model.load_state.is_ready());

        let _ = handle(SyncEvent::SaveResponse(Ok(())), &mut model, Catalog::builtin());

        assert_eq!(
            model.save_state,
            SaveState::Restarting {
                reload_after_ms: 3000
            }
        );
        assert!(model.overlay_spinner.is_visible());
    }

    #[test]
    fn reload_after_restart_notice_loads_again() {
        let mut model = ready_model();
        let _ = handle(SyncEvent::Save, &mut model, Catalog::builtin());
        let _ = handle(SyncEvent::SaveResponse(Ok(())), &mut model, Catalog::builtin());

        let requests = http_requests(handle(SyncEvent::Reload, &mut model, Catalog::builtin()));

        assert_eq!(requests.len(), 1);
        assert_eq!(model.save_state, SaveState::Idle);
        assert!(!model.overlay_spinner.is_visible());
    }

    #[test]
    fn invalid_sync_configuration_is_rejected() {
        let mut model = Model::default();

        let _ = handle_configure(
            SyncConfig {
                load_attempts: 0,
                ..Default::default()
            },
            &mut model,
        );

        assert_eq!(model.sync_config, SyncConfig::default());
        assert!(model.error_message.is_some());
    }

    #[test]
    fn configured_endpoints_are_used() {
        let mut model = Model::default();
        let _ = handle_configure(
            SyncConfig {
                base_url: "http://192.168.4.1".to_string(),
                config_endpoint: "/config".to_string(),
                ..Default::default()
            },
            &mut model,
        );

        let requests = http_requests(start_load(&mut model));

        assert_eq!(requests[0].url, "http://192.168.4.1/config");
    }
}
