//! Replicated key/value state with single-writer-per-entity discipline.
//!
//! Participants never share memory; they share this store. Each entity's
//! simulation keys are written by exactly one logical owner (its host), so
//! last-writer-wins replication needs no locking protocol beyond the map
//! itself. Write capability is carried by the handle's [`Role`], resolved
//! at handle creation by host election (outside this crate).

use shared::{EntityId, Profile, StateKey, StateValue, Vec3, MAX_HEALTH};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("participant is not the host for entity {0}")]
    AuthorityDenied(EntityId),
}

/// Write capability for one entity's simulation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Host,
    Observer,
}

impl Role {
    pub fn is_host(&self) -> bool {
        matches!(self, Role::Host)
    }
}

type Entries = HashMap<EntityId, HashMap<StateKey, StateValue>>;

/// Process-wide replicated store, cheap to clone and share.
#[derive(Debug, Clone, Default)]
pub struct NetworkStateStore {
    entries: Arc<Mutex<Entries>>,
}

impl NetworkStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a capability handle for one entity. The role must come from
    /// host election; nothing here re-validates it.
    pub fn handle(&self, entity: EntityId, role: Role) -> StateHandle {
        StateHandle {
            store: self.clone(),
            entity,
            role,
        }
    }

    fn read(&self, entity: EntityId, key: StateKey) -> Option<StateValue> {
        let entries = self.entries.lock().expect("state store lock poisoned");
        entries.get(&entity).and_then(|kv| kv.get(&key)).cloned()
    }

    fn write(&self, entity: EntityId, key: StateKey, value: StateValue) {
        let mut entries = self.entries.lock().expect("state store lock poisoned");
        entries.entry(entity).or_default().insert(key, value);
    }
}

/// Per-entity view of the store, tagged with the participant's role.
#[derive(Debug, Clone)]
pub struct StateHandle {
    store: NetworkStateStore,
    entity: EntityId,
    role: Role,
}

impl StateHandle {
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn get(&self, key: StateKey) -> Option<StateValue> {
        self.store.read(self.entity, key)
    }

    /// Writes a value. Observers are refused at this boundary; the store
    /// never grants write authority to non-owners.
    pub fn set(&self, key: StateKey, value: StateValue) -> Result<(), StoreError> {
        if !self.role.is_host() {
            return Err(StoreError::AuthorityDenied(self.entity));
        }
        self.store.write(self.entity, key, value);
        Ok(())
    }

    /// Defaults below mirror a freshly joined entity: full health, no
    /// hits, no deaths, alive, position not yet replicated.
    pub fn health(&self) -> i32 {
        self.get(StateKey::Health)
            .and_then(|v| v.as_int())
            .unwrap_or(MAX_HEALTH)
    }

    pub fn hits(&self) -> u32 {
        self.get(StateKey::Hits)
            .and_then(|v| v.as_uint())
            .unwrap_or(0)
    }

    pub fn deaths(&self) -> u32 {
        self.get(StateKey::Deaths)
            .and_then(|v| v.as_uint())
            .unwrap_or(0)
    }

    pub fn dead(&self) -> bool {
        self.get(StateKey::Dead)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    pub fn pos(&self) -> Option<Vec3> {
        self.get(StateKey::Pos).and_then(|v| v.as_vec3())
    }

    pub fn profile(&self) -> Option<Profile> {
        self.get(StateKey::Profile)
            .and_then(|v| v.as_profile().cloned())
    }
}
