mod form;
mod navigation;
mod sync;
mod ui;

use crux_core::Command;

use crate::catalog::Catalog;
use crate::events::Event;
use crate::model::Model;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model, catalog: &Catalog) -> Command<Effect, Event> {
    match event {
        // Initialization
        Event::Initialize => sync::start_load(model),
        Event::Configure(config) => sync::handle_configure(config, model),

        Event::Navigation(nav_event) => navigation::handle(nav_event, model),
        Event::Form(form_event) => form::handle(form_event, model, catalog),
        Event::Sync(sync_event) => sync::handle(sync_event, model, catalog),
        Event::Ui(ui_event) => ui::handle(ui_event, model),
    }
}

/// Logs a programming error (unknown key, stale event) and ignores it.
/// Trips an assertion in debug builds.
pub(crate) fn reject_programming_error(message: String) -> Command<Effect, Event> {
    log::error!("{message}");
    debug_assert!(false, "{message}");
    Command::done()
}
