//! Per-entity orchestration: one `tick` runs the full simulation order.

use crate::combat::{CombatConfig, CombatResolver};
use crate::events::SimEvent;
use crate::input::{InputDevice, FIRE_BUTTON};
use crate::movement::{self, Animation, MovementConfig};
use crate::physics::PhysicsBody;
use crate::replicate::replicate_position;
use crate::respawn::{RespawnConfig, RespawnController};
use crate::spawn::SpawnTable;
use crate::store::{StateHandle, StoreError};
use log::info;
use rand::rngs::StdRng;
use shared::{EntityId, Profile, StateKey, StateValue};
use std::sync::Arc;

/// Drives one networked character on one participant.
///
/// Every participant holds a controller per entity; the handle's role
/// decides which side of the authority split this instance is on. Hosts
/// run combat and own the body; observers simulate rotation locally for
/// smoothness and mirror the replicated position.
pub struct CharacterController<I: InputDevice, B: PhysicsBody> {
    id: EntityId,
    device: I,
    body: B,
    handle: StateHandle,
    movement_cfg: MovementConfig,
    combat: CombatResolver,
    respawn: RespawnController,
    spawns: Arc<SpawnTable>,
    rng: StdRng,
    heading: f32,
    animation: Animation,
}

impl<I: InputDevice, B: PhysicsBody> CharacterController<I, B> {
    /// Creates the controller. The host places the entity at a random
    /// spawn and publishes its profile; observers start wherever their
    /// mirror body is and wait for the first replicated position.
    pub fn new(
        id: EntityId,
        profile: Profile,
        device: I,
        mut body: B,
        handle: StateHandle,
        spawns: Arc<SpawnTable>,
        mut rng: StdRng,
    ) -> Result<Self, StoreError> {
        if handle.role().is_host() {
            let pos = spawns.pick(&mut rng);
            body.set_translation(pos);
            handle.set(StateKey::Profile, StateValue::Profile(profile))?;
            info!(
                "entity {} joined at ({:.1}, {:.1}, {:.1})",
                id, pos.x, pos.y, pos.z
            );
        }
        Ok(Self {
            id,
            device,
            body,
            handle,
            movement_cfg: MovementConfig::default(),
            combat: CombatResolver::new(CombatConfig::default()),
            respawn: RespawnController::new(RespawnConfig::default()),
            spawns,
            rng,
            heading: 0.0,
            animation: Animation::Idle,
        })
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn animation(&self) -> Animation {
        self.animation
    }

    pub fn handle(&self) -> &StateHandle {
        &self.handle
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn device_mut(&mut self) -> &mut I {
        &mut self.device
    }

    /// Advances one simulation tick. `dt` is the elapsed frame time in
    /// seconds, `now_ms` the participant's monotonic clock.
    ///
    /// Order within the tick: movement, fire intent, contact resolution,
    /// respawn timer, position replication. The whole sequence completes
    /// before the next tick, so contact arrival order is the only
    /// ordering that matters.
    pub fn tick(&mut self, dt: f32, now_ms: u64) -> Result<Vec<SimEvent>, StoreError> {
        let mut events = Vec::new();
        let is_host = self.handle.role().is_host();
        let dead = self.handle.dead();
        let firing = self.device.is_button_held(FIRE_BUTTON);

        let out = movement::simulate(self.heading, &self.device, firing, dead, dt, &self.movement_cfg);
        self.heading = out.heading;
        self.animation = out.animation;
        if is_host {
            if let Some(impulse) = out.impulse {
                self.body.apply_impulse(impulse, true);
            }
        }

        if is_host && firing {
            if let Some(spawn) =
                self.combat
                    .try_fire(now_ms, dead, self.body.translation(), self.heading, self.id)
            {
                events.push(SimEvent::Fired(spawn));
            }
        }

        // Observers drop their queue unread: resolving hits is the
        // victim host's job alone.
        let contacts = self.body.drain_contacts();
        if is_host {
            self.combat.resolve_contacts(
                &contacts,
                &self.handle,
                &mut self.body,
                &mut self.respawn,
                now_ms,
                &mut events,
            )?;
            self.respawn
                .tick(now_ms, &self.handle, &mut self.body, &self.spawns, &mut self.rng)?;
        }

        replicate_position(&self.handle, &mut self.body)?;
        Ok(events)
    }

    /// Disarms the respawn timer for disconnect teardown; a pending timer
    /// must never act on a destroyed entity.
    pub fn teardown(&mut self) {
        self.respawn.cancel();
    }
}
