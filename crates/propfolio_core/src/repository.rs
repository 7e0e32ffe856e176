//! Event loading capability.
//!
//! The engine's functions never hold a persistence handle; callers inject
//! an [`EventSource`] wherever event sets need to be fetched by property,
//! and hand the engine plain [`PropertyEvents`] values.

use rustc_hash::FxHashMap;

use crate::model::{PropertyEvents, PropertyId};

/// Capability to load the full event set for a property.
pub trait EventSource {
    /// Every property this source knows about.
    fn property_ids(&self) -> Vec<PropertyId>;

    /// Full event set for one property, `None` if unknown.
    fn events_for_property(&self, id: PropertyId) -> Option<PropertyEvents>;
}

/// Map-backed source for tests, benches and offline computation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventSource {
    events: FxHashMap<PropertyId, PropertyEvents>,
}

impl InMemoryEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: PropertyId, events: PropertyEvents) {
        self.events.insert(id, events);
    }
}

impl EventSource for InMemoryEventSource {
    fn property_ids(&self) -> Vec<PropertyId> {
        let mut ids: Vec<PropertyId> = self.events.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn events_for_property(&self, id: PropertyId) -> Option<PropertyEvents> {
        self.events.get(&id).cloned()
    }
}
