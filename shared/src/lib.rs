use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

pub const MOVEMENT_SPEED: f32 = 250.0;
pub const FIRE_RATE_MS: u64 = 380;
pub const RESPAWN_DELAY_MS: u64 = 2000;
pub const TURN_RATE_RUN: f32 = 1.2;
pub const TURN_RATE_AIM: f32 = 1.0;
pub const MAX_HEALTH: i32 = 100;
pub const LETHAL_HITS: u32 = 3;

/// Stable identifier for a networked character entity.
pub type EntityId = u32;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn scale(&self, scalar: f32) -> Vec3 {
        Vec3 {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }

    pub fn add(&self, other: &Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    /// Distance to another point, ignoring the vertical axis.
    pub fn horizontal_distance(&self, other: &Vec3) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Normalizes a signed angular difference into (-PI, PI].
///
/// A difference computed as `target - current` can exceed half a turn in
/// either direction; one correction of 2*PI is enough to bring it back.
pub fn wrap_angle(diff: f32) -> f32 {
    let mut d = diff;
    if d > PI {
        d -= 2.0 * PI;
    }
    if d <= -PI {
        d += 2.0 * PI;
    }
    d
}

/// Display metadata assigned at join time. Never changes while connected.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub color: String,
}

impl Profile {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Keys of the per-entity replicated state store.
///
/// Every key except `Profile` is written exclusively by the entity's host;
/// all participants may read.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Pos,
    Health,
    Hits,
    Deaths,
    Dead,
    Profile,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum StateValue {
    Vec3(Vec3),
    Int(i32),
    Uint(u32),
    Bool(bool),
    Profile(Profile),
}

impl StateValue {
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            StateValue::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            StateValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u32> {
        match self {
            StateValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StateValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_profile(&self) -> Option<&Profile> {
        match self {
            StateValue::Profile(p) => Some(p),
            _ => None,
        }
    }
}
