//! Fire-rate limiting and projectile-contact damage resolution.
//!
//! Both paths run only on the entity's host. Firing is a debounce: intents
//! arriving before the window elapses are dropped, not queued. Contacts
//! are applied strictly in arrival order with no coalescing; each contact
//! independently increments the hit counter and may independently cross
//! the death threshold.

use crate::events::{ProjectileSpawn, SimEvent};
use crate::physics::{BodyTag, ContactEvent, PhysicsBody};
use crate::respawn::RespawnController;
use crate::store::{StateHandle, StoreError};
use log::{debug, info};
use shared::{EntityId, StateKey, StateValue, Vec3, FIRE_RATE_MS, LETHAL_HITS};

#[derive(Debug, Clone, Copy)]
pub struct CombatConfig {
    /// Minimum elapsed time between two accepted fire intents.
    pub fire_rate_ms: u64,
    /// Hits required to kill.
    pub lethal_hits: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            fire_rate_ms: FIRE_RATE_MS,
            lethal_hits: LETHAL_HITS,
        }
    }
}

#[derive(Debug)]
pub struct CombatResolver {
    cfg: CombatConfig,
    last_shot_ms: Option<u64>,
}

impl CombatResolver {
    pub fn new(cfg: CombatConfig) -> Self {
        Self {
            cfg,
            last_shot_ms: None,
        }
    }

    /// Converts a held fire button into at most one projectile per
    /// fire-rate window. Dead entities never fire.
    pub fn try_fire(
        &mut self,
        now_ms: u64,
        dead: bool,
        position: Vec3,
        heading: f32,
        owner: EntityId,
    ) -> Option<ProjectileSpawn> {
        if dead {
            return None;
        }
        if let Some(last) = self.last_shot_ms {
            if now_ms.saturating_sub(last) < self.cfg.fire_rate_ms {
                return None;
            }
        }
        self.last_shot_ms = Some(now_ms);
        debug!("entity {} fired at t={}ms", owner, now_ms);
        Some(ProjectileSpawn {
            id: format!("{}-{}", owner, now_ms),
            position,
            angle: heading,
            owner,
        })
    }

    /// Applies drained projectile contacts to this entity's replicated
    /// state. Contacts against an already-dead entity are defined no-ops.
    pub fn resolve_contacts(
        &mut self,
        contacts: &[ContactEvent],
        handle: &StateHandle,
        body: &mut impl PhysicsBody,
        respawn: &mut RespawnController,
        now_ms: u64,
        events: &mut Vec<SimEvent>,
    ) -> Result<(), StoreError> {
        for contact in contacts {
            let BodyTag::Projectile { damage, shooter } = contact.other else {
                continue;
            };
            if handle.health() <= 0 {
                continue;
            }

            let hits = handle.hits() + 1;
            handle.set(StateKey::Hits, StateValue::Uint(hits))?;

            // Health is display feedback; the death trigger is the counter.
            let health = (handle.health() - damage).max(0);
            handle.set(StateKey::Health, StateValue::Int(health))?;

            if hits >= self.cfg.lethal_hits {
                handle.set(StateKey::Deaths, StateValue::Uint(handle.deaths() + 1))?;
                handle.set(StateKey::Dead, StateValue::Bool(true))?;
                handle.set(StateKey::Health, StateValue::Int(0))?;

                // Disabling collision atomically with the transition is
                // what guarantees no further contacts and no overlapping
                // respawn timers.
                body.set_enabled(false);
                respawn.schedule(now_ms);

                info!("entity {} killed by {}", handle.entity(), shooter);
                events.push(SimEvent::Killed {
                    victim: handle.entity(),
                    shooter,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::DampedBody;
    use crate::respawn::{RespawnConfig, RespawnController};
    use crate::store::{NetworkStateStore, Role};
    use shared::MAX_HEALTH;

    fn resolver() -> CombatResolver {
        CombatResolver::new(CombatConfig::default())
    }

    fn projectile(damage: i32, shooter: EntityId) -> ContactEvent {
        ContactEvent {
            other: BodyTag::Projectile { damage, shooter },
        }
    }

    fn host_handle(entity: EntityId) -> StateHandle {
        NetworkStateStore::new().handle(entity, Role::Host)
    }

    #[test]
    fn test_first_shot_is_immediate() {
        let mut combat = resolver();
        let spawn = combat.try_fire(0, false, Vec3::default(), 0.5, 7).unwrap();
        assert_eq!(spawn.owner, 7);
        assert_eq!(spawn.angle, 0.5);
        assert_eq!(spawn.id, "7-0");
    }

    #[test]
    fn test_fire_rate_window_drops_early_intents() {
        let mut combat = resolver();
        assert!(combat.try_fire(0, false, Vec3::default(), 0.0, 1).is_some());
        assert!(combat.try_fire(379, false, Vec3::default(), 0.0, 1).is_none());
        assert!(combat.try_fire(380, false, Vec3::default(), 0.0, 1).is_some());
    }

    #[test]
    fn test_dropped_intent_does_not_reset_window() {
        let mut combat = resolver();
        assert!(combat.try_fire(0, false, Vec3::default(), 0.0, 1).is_some());
        // A rejected intent must not push the next accepted shot back.
        assert!(combat.try_fire(200, false, Vec3::default(), 0.0, 1).is_none());
        assert!(combat.try_fire(380, false, Vec3::default(), 0.0, 1).is_some());
    }

    #[test]
    fn test_dead_entity_never_fires() {
        let mut combat = resolver();
        assert!(combat.try_fire(0, true, Vec3::default(), 0.0, 1).is_none());
    }

    #[test]
    fn test_single_hit_damages_without_killing() {
        let mut combat = resolver();
        let handle = host_handle(1);
        let mut body = DampedBody::new(Vec3::default());
        let mut respawn = RespawnController::new(RespawnConfig::default());
        let mut events = Vec::new();

        combat
            .resolve_contacts(
                &[projectile(20, 2)],
                &handle,
                &mut body,
                &mut respawn,
                1000,
                &mut events,
            )
            .unwrap();

        assert_eq!(handle.hits(), 1);
        assert_eq!(handle.health(), MAX_HEALTH - 20);
        assert!(!handle.dead());
        assert!(events.is_empty());
        assert!(body.is_enabled());
    }

    #[test]
    fn test_third_hit_kills_and_credits_shooter() {
        let mut combat = resolver();
        let handle = host_handle(1);
        let mut body = DampedBody::new(Vec3::default());
        let mut respawn = RespawnController::new(RespawnConfig::default());
        let mut events = Vec::new();

        handle.set(StateKey::Hits, StateValue::Uint(2)).unwrap();
        handle.set(StateKey::Health, StateValue::Int(10)).unwrap();

        combat
            .resolve_contacts(
                &[projectile(20, 9)],
                &handle,
                &mut body,
                &mut respawn,
                5000,
                &mut events,
            )
            .unwrap();

        assert_eq!(handle.hits(), 3);
        assert!(handle.dead());
        assert_eq!(handle.health(), 0);
        assert_eq!(handle.deaths(), 1);
        assert!(!body.is_enabled());
        assert!(respawn.is_pending());
        assert_eq!(
            events,
            vec![SimEvent::Killed {
                victim: 1,
                shooter: 9
            }]
        );
    }

    #[test]
    fn test_contacts_after_death_in_same_drain_are_ignored() {
        let mut combat = resolver();
        let handle = host_handle(1);
        let mut body = DampedBody::new(Vec3::default());
        let mut respawn = RespawnController::new(RespawnConfig::default());
        let mut events = Vec::new();

        handle.set(StateKey::Hits, StateValue::Uint(2)).unwrap();

        // Two projectiles land in the same tick; the first processed
        // crosses the threshold and takes the credit.
        combat
            .resolve_contacts(
                &[projectile(20, 4), projectile(20, 8)],
                &handle,
                &mut body,
                &mut respawn,
                5000,
                &mut events,
            )
            .unwrap();

        assert_eq!(handle.hits(), 3);
        assert_eq!(handle.deaths(), 1);
        assert_eq!(
            events,
            vec![SimEvent::Killed {
                victim: 1,
                shooter: 4
            }]
        );
    }

    #[test]
    fn test_non_projectile_contacts_are_skipped() {
        let mut combat = resolver();
        let handle = host_handle(1);
        let mut body = DampedBody::new(Vec3::default());
        let mut respawn = RespawnController::new(RespawnConfig::default());
        let mut events = Vec::new();

        let bump = ContactEvent {
            other: BodyTag::Character { player: 3 },
        };
        combat
            .resolve_contacts(&[bump], &handle, &mut body, &mut respawn, 0, &mut events)
            .unwrap();

        assert_eq!(handle.hits(), 0);
        assert_eq!(handle.health(), MAX_HEALTH);
    }

    #[test]
    fn test_health_is_floored_at_zero() {
        let mut combat = resolver();
        let handle = host_handle(1);
        let mut body = DampedBody::new(Vec3::default());
        let mut respawn = RespawnController::new(RespawnConfig::default());
        let mut events = Vec::new();

        handle.set(StateKey::Health, StateValue::Int(5)).unwrap();

        combat
            .resolve_contacts(
                &[projectile(50, 2)],
                &handle,
                &mut body,
                &mut respawn,
                0,
                &mut events,
            )
            .unwrap();

        assert_eq!(handle.health(), 0);
        assert_eq!(handle.hits(), 1);
        // Dead only through the hit counter, never through health alone.
        assert!(!handle.dead());
    }
}
