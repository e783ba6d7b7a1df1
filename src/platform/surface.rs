//! Entity registration surface for the render layer
//!
//! Add and remove are idempotent: adding a live entity or removing an
//! absent one changes nothing and records no change.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::sim::state::{EntityId, EntityKind};

/// Receiver of entity lifecycle notifications
pub trait RenderSurface {
    /// Returns true if the entity was newly added
    fn add_entity(&mut self, id: EntityId, kind: EntityKind) -> bool;
    /// Returns true if the entity was present and is now removed
    fn remove_entity(&mut self, id: EntityId) -> bool;
}

/// A lifecycle change the render layer has not consumed yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RenderChange {
    Added { id: EntityId, kind: EntityKind },
    Removed { id: EntityId },
}

/// Live entity set plus a log of pending changes
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    live: BTreeMap<EntityId, EntityKind>,
    pending: Vec<RenderChange>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Take all changes recorded since the last drain
    pub fn drain_changes(&mut self) -> Vec<RenderChange> {
        std::mem::take(&mut self.pending)
    }
}

impl RenderSurface for EntityRegistry {
    fn add_entity(&mut self, id: EntityId, kind: EntityKind) -> bool {
        if self.live.contains_key(&id) {
            return false;
        }
        self.live.insert(id, kind);
        self.pending.push(RenderChange::Added { id, kind });
        true
    }

    fn remove_entity(&mut self, id: EntityId) -> bool {
        if self.live.remove(&id).is_none() {
            return false;
        }
        self.pending.push(RenderChange::Removed { id });
        true
    }
}
