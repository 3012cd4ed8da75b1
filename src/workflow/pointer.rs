use std::{
    collections::HashMap,
    sync::{Arc, Mutex, Weak},
};

use serde::Deserialize;

use super::state::Event;

/// Element id of the search control; its subtree counts as "inside".
pub const SEARCH_CONTROL_ID: &str = "search-control";

/// A pointer-down somewhere in the page
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PointerDown {
    /// Element ids from the document root down to the event target
    pub target: Vec<String>,
}

impl PointerDown {
    pub fn new<I, S>(target: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            target: target.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the target lies inside the subtree rooted at `element_id`
    pub fn is_within(&self, element_id: &str) -> bool {
        self.target.iter().any(|id| id == element_id)
    }
}

type Listener = Box<dyn Fn(&PointerDown) -> Option<Event> + Send + Sync>;
type Listeners = Mutex<HashMap<u64, Listener>>;

/// Document-level pointer listeners for one page view
#[derive(Default)]
pub struct PointerHub {
    listeners: Arc<Listeners>,
    next_id: u64,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener until the returned handle is dropped
    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: Fn(&PointerDown) -> Option<Event> + Send + Sync + 'static,
    {
        self.next_id += 1;
        let id = self.next_id;
        self.lock().insert(id, Box::new(listener));
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Runs every listener and collects the events they produce
    pub fn dispatch(&self, pointer: &PointerDown) -> Vec<Event> {
        self.lock()
            .values()
            .filter_map(|listener| listener(pointer))
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u64, Listener>> {
        // A panicking listener leaves the map itself intact.
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Handle to a registered listener; unregisters on drop.
#[must_use = "dropping the subscription removes the listener"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .remove(&self.id);
        }
    }
}

/// Listener that dismisses the suggestion panel on outside pointer-downs
pub fn dismiss_on_outside_pointer(pointer: &PointerDown) -> Option<Event> {
    (!pointer.is_within(SEARCH_CONTROL_ID)).then_some(Event::SuggestionsDismissed)
}
