//! Events the simulation emits for collaborators.

use serde::{Deserialize, Serialize};
use shared::{EntityId, Vec3};

/// A projectile to be spawned by the game layer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProjectileSpawn {
    /// Unique per shot: owner id plus the firing timestamp.
    pub id: String,
    pub position: Vec3,
    pub angle: f32,
    pub owner: EntityId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Fired(ProjectileSpawn),
    Killed { victim: EntityId, shooter: EntityId },
}
