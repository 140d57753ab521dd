pub mod catalog;
pub mod config_store;
pub mod events;
pub mod field_graph;
pub mod http_helpers;
pub mod macros;
pub mod model;
pub mod navigator;
pub mod snapshot;
pub mod types;
pub mod update;
pub mod view_model;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

use crux_core::Command;

// Re-export core types
pub use crate::{
    catalog::{Catalog, Line, Network, Station},
    config_store::{ConfigDocument, ConfigStore},
    events::Event,
    http_helpers::{
        check_response_status, extract_error_message, handle_request_error, is_response_success,
        map_http_error, parse_json_response, process_json_response, process_status_response,
    },
    model::Model,
    navigator::Navigator,
    snapshot::Snapshot,
    types::*,
    view_model::ViewModel,
};
pub use crux_http::Result as HttpResult;

#[crux_macros::effect(typegen)]
pub enum Effect {
    Render(crux_core::render::RenderOperation),
    Http(crux_http::protocol::HttpRequest),
}

pub type HttpCmd = crux_http::command::Http<Effect, Event>;

/// The Core application
pub struct App {
    catalog: &'static Catalog,
}

impl App {
    /// App backed by a custom catalog
    pub fn with_catalog(catalog: &'static Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }
}

impl Default for App {
    fn default() -> Self {
        Self::with_catalog(Catalog::builtin())
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Effect = Effect;

    fn update(&self, event: Self::Event, model: &mut Self::Model) -> Command<Effect, Event> {
        update::update(event, model, self.catalog)
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        ViewModel::new(model, self.catalog)
    }
}
