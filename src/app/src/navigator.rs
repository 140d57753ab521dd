//! Page stack of the editor.

use serde::{Deserialize, Serialize};

use crate::types::{PageId, PageTransition, TransitionDirection};

/// Current page plus a LIFO history of the pages left behind
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Navigator {
    current: PageId,
    history: Vec<PageId>,
    last_transition: Option<PageTransition>,
}

impl Navigator {
    pub fn current(&self) -> PageId {
        self.current
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history(&self) -> &[PageId] {
        &self.history
    }

    /// Outgoing/incoming pair of the most recent move, for exit/entry animation
    pub fn last_transition(&self) -> Option<PageTransition> {
        self.last_transition
    }

    /// Push the current page and show `target`. Any page is a legal target,
    /// including the current one.
    pub fn go_to(&mut self, target: PageId) {
        let from = self.current;
        self.history.push(from);
        self.current = target;
        self.last_transition = Some(PageTransition {
            from,
            to: target,
            direction: TransitionDirection::Forward,
        });
        log::debug!("page {from:?} -> {target:?} (depth {})", self.history.len());
    }

    /// Pop the previous page. Returns false when there is nothing to go back to.
    pub fn go_back(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        let from = self.current;
        self.current = previous;
        self.last_transition = Some(PageTransition {
            from,
            to: previous,
            direction: TransitionDirection::Back,
        });
        log::debug!("page {from:?} <- {previous:?}");
        true
    }
}
