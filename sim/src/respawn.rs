//! Timed dead-to-alive transition.
//!
//! The controller holds at most one pending respawn. It is armed inside
//! the death transition, while the body's collision response is already
//! off, so re-entry while pending is impossible: a disabled body produces
//! no contacts and therefore no second death.

use crate::physics::PhysicsBody;
use crate::spawn::SpawnTable;
use crate::store::{StateHandle, StoreError};
use log::info;
use rand::Rng;
use shared::{StateKey, StateValue, MAX_HEALTH, RESPAWN_DELAY_MS};

#[derive(Debug, Clone, Copy)]
pub struct RespawnConfig {
    pub delay_ms: u64,
}

impl Default for RespawnConfig {
    fn default() -> Self {
        Self {
            delay_ms: RESPAWN_DELAY_MS,
        }
    }
}

#[derive(Debug)]
pub struct RespawnController {
    cfg: RespawnConfig,
    due_ms: Option<u64>,
}

impl RespawnController {
    pub fn new(cfg: RespawnConfig) -> Self {
        Self { cfg, due_ms: None }
    }

    /// Arms the timer. A second call while pending keeps the earlier
    /// deadline; timers never overlap or extend.
    pub fn schedule(&mut self, now_ms: u64) {
        if self.due_ms.is_none() {
            self.due_ms = Some(now_ms + self.cfg.delay_ms);
        }
    }

    /// Disarms without firing. Used at entity teardown so a stale timer
    /// can never act on a destroyed entity.
    pub fn cancel(&mut self) {
        self.due_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due_ms.is_some()
    }

    /// Fires the transition once the deadline passes: fresh random spawn,
    /// collision back on, stats reset. This is the only path that clears
    /// hits and restores health to full. Returns whether it fired.
    pub fn tick<R: Rng>(
        &mut self,
        now_ms: u64,
        handle: &StateHandle,
        body: &mut impl PhysicsBody,
        spawns: &SpawnTable,
        rng: &mut R,
    ) -> Result<bool, StoreError> {
        let Some(due) = self.due_ms else {
            return Ok(false);
        };
        if now_ms < due {
            return Ok(false);
        }
        self.due_ms = None;

        let pos = spawns.pick(rng);
        body.set_translation(pos);
        body.set_enabled(true);
        handle.set(StateKey::Health, StateValue::Int(MAX_HEALTH))?;
        handle.set(StateKey::Dead, StateValue::Bool(false))?;
        handle.set(StateKey::Hits, StateValue::Uint(0))?;

        info!(
            "entity {} respawned at ({:.1}, {:.1}, {:.1})",
            handle.entity(),
            pos.x,
            pos.y,
            pos.z
        );
        Ok(true)
    }
}
