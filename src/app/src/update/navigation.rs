use crux_core::Command;

use crate::events::{Event, NavigationEvent};
use crate::model::Model;
use crate::Effect;

/// Handle page navigation. Independent of field and sync state.
pub fn handle(event: NavigationEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        NavigationEvent::GoTo(page) => {
            model.navigator.go_to(page);
            crux_core::render::render()
        }
        NavigationEvent::GoBack => {
            if model.navigator.go_back() {
                crux_core::render::render()
            } else {
                Command::done()
            }
        }
    }
}
