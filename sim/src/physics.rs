//! Physics body interface and a damped point-mass implementation.
//!
//! The core never integrates rigid bodies itself; it issues impulses and
//! position writes through [`PhysicsBody`] and reacts to contact events the
//! physics layer queues on the body. Contact delivery is poll-based:
//! [`PhysicsBody::drain_contacts`] returns the events queued since the last
//! tick in arrival order, which keeps contact processing inside the
//! single-threaded tick.

use serde::{Deserialize, Serialize};
use shared::{EntityId, Vec3};

/// Identity a body carries into collision callbacks.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub enum BodyTag {
    Character { player: EntityId },
    Projectile { damage: i32, shooter: EntityId },
}

/// One intersection event, tagged with the other body's identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub other: BodyTag,
}

pub trait PhysicsBody {
    /// Applies an instantaneous impulse. `wake` requests that a sleeping
    /// body resume simulation, matching the underlying engine's contract.
    fn apply_impulse(&mut self, impulse: Vec3, wake: bool);

    fn translation(&self) -> Vec3;

    fn set_translation(&mut self, pos: Vec3);

    /// Enables or disables collision response. A disabled body accepts no
    /// impulses and produces no contacts.
    fn set_enabled(&mut self, enabled: bool);

    fn is_enabled(&self) -> bool;

    /// Returns contacts queued since the last drain, in arrival order.
    fn drain_contacts(&mut self) -> Vec<ContactEvent>;
}

/// Matches the damping of the original character rigid body.
const DEFAULT_LINEAR_DAMPING: f32 = 12.0;

/// Damped point mass used by the harness and tests.
///
/// Impulses add directly to velocity; `step` integrates position and
/// applies linear damping the way the underlying engine would
/// (`v /= 1 + damping * dt`).
#[derive(Debug, Clone)]
pub struct DampedBody {
    translation: Vec3,
    velocity: Vec3,
    linear_damping: f32,
    enabled: bool,
    contacts: Vec<ContactEvent>,
}

impl DampedBody {
    pub fn new(translation: Vec3) -> Self {
        Self {
            translation,
            velocity: Vec3::default(),
            linear_damping: DEFAULT_LINEAR_DAMPING,
            enabled: true,
            contacts: Vec::new(),
        }
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Queues a contact event for the next drain. Dropped while disabled:
    /// a body without collision response cannot be hit.
    pub fn queue_contact(&mut self, other: BodyTag) {
        if self.enabled {
            self.contacts.push(ContactEvent { other });
        }
    }

    /// Integrates one step of velocity and damping.
    pub fn step(&mut self, dt: f32) {
        if !self.enabled {
            return;
        }
        self.translation = self.translation.add(&self.velocity.scale(dt));
        self.velocity = self.velocity.scale(1.0 / (1.0 + self.linear_damping * dt));
    }
}

impl PhysicsBody for DampedBody {
    fn apply_impulse(&mut self, impulse: Vec3, _wake: bool) {
        if self.enabled {
            self.velocity = self.velocity.add(&impulse);
        }
    }

    fn translation(&self) -> Vec3 {
        self.translation
    }

    fn set_translation(&mut self, pos: Vec3) {
        self.translation = pos;
        self.velocity = Vec3::default();
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.velocity = Vec3::default();
            self.contacts.clear();
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn drain_contacts(&mut self) -> Vec<ContactEvent> {
        std::mem::take(&mut self.contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_impulse_moves_body_on_step() {
        let mut body = DampedBody::new(Vec3::default());
        body.apply_impulse(Vec3::new(10.0, 0.0, 0.0), true);
        body.step(0.1);
        assert_approx_eq!(body.translation().x, 1.0, 0.0001);
    }

    #[test]
    fn test_damping_decays_velocity() {
        let mut body = DampedBody::new(Vec3::default());
        body.apply_impulse(Vec3::new(12.0, 0.0, 0.0), true);
        body.step(0.1);
        let after_one = body.velocity().x;
        assert!(after_one < 12.0);
        body.step(0.1);
        assert!(body.velocity().x < after_one);
    }

    #[test]
    fn test_disabled_body_ignores_impulses_and_contacts() {
        let mut body = DampedBody::new(Vec3::new(1.0, 0.0, 1.0));
        body.set_enabled(false);

        body.apply_impulse(Vec3::new(5.0, 0.0, 0.0), true);
        body.queue_contact(BodyTag::Projectile {
            damage: 20,
            shooter: 2,
        });
        body.step(1.0);

        assert_eq!(body.translation(), Vec3::new(1.0, 0.0, 1.0));
        assert!(body.drain_contacts().is_empty());
    }

    #[test]
    fn test_disabling_clears_pending_contacts() {
        let mut body = DampedBody::new(Vec3::default());
        body.queue_contact(BodyTag::Projectile {
            damage: 20,
            shooter: 2,
        });
        body.set_enabled(false);
        body.set_enabled(true);
        assert!(body.drain_contacts().is_empty());
    }

    #[test]
    fn test_set_translation_zeroes_velocity() {
        let mut body = DampedBody::new(Vec3::default());
        body.apply_impulse(Vec3::new(5.0, 0.0, 5.0), true);
        body.set_translation(Vec3::new(2.0, 0.0, 2.0));
        body.step(1.0);
        assert_eq!(body.translation(), Vec3::new(2.0, 0.0, 2.0));
    }

    #[test]
    fn test_contacts_drain_in_arrival_order() {
        let mut body = DampedBody::new(Vec3::default());
        body.queue_contact(BodyTag::Projectile {
            damage: 20,
            shooter: 7,
        });
        body.queue_contact(BodyTag::Projectile {
            damage: 20,
            shooter: 9,
        });

        let contacts = body.drain_contacts();
        assert_eq!(contacts.len(), 2);
        assert_eq!(
            contacts[0].other,
            BodyTag::Projectile {
                damage: 20,
                shooter: 7
            }
        );
        assert_eq!(
            contacts[1].other,
            BodyTag::Projectile {
                damage: 20,
                shooter: 9
            }
        );
        assert!(body.drain_contacts().is_empty());
    }
}
