//! # Character Simulation Core
//!
//! This library implements the host-authoritative state machine for one
//! networked character entity: input becomes motion, projectile contacts
//! become damage, damage becomes death, and death becomes a timed respawn.
//! Exactly one participant (the entity's host) owns the ground truth;
//! every other participant converges to it through the replicated store.
//!
//! ## Authority Model
//!
//! There is no shared memory between participants and no locking. The only
//! shared resource is the [`store::NetworkStateStore`], a per-entity
//! key/value map with single-writer discipline: a participant holds either
//! a host or an observer [`store::StateHandle`] for each entity, and only
//! host handles can write. Write-write races are impossible by
//! construction, so last-writer-wins replication is safe.
//!
//! ## Tick Model
//!
//! Each participant drives its controllers from a single-threaded
//! cooperative loop. A call to [`controller::CharacterController::tick`]
//! runs to completion before the next begins, which is what makes the
//! arrival-order rule for contact processing well-defined: contacts
//! drained in one tick are applied strictly in the order the physics
//! layer queued them, with no coalescing.
//!
//! Per tick, in order:
//!
//! 1. Movement: turn-rate-limited heading plus a horizontal impulse
//!    (every participant simulates its own viewed rotation locally, but
//!    only the host's impulse reaches the authoritative body).
//! 2. Fire intent: debounced by the fire-rate window, host only.
//! 3. Contact resolution: hit accumulation, death transition, kill
//!    events, host only.
//! 4. Respawn timer: the only time-based deferral in the core.
//! 5. Position replication: host pushes, observers mirror.
//!
//! ## Collaborators
//!
//! Rendering, audio, UI, the physics engine proper, and the network
//! transport live outside this crate. They are reached through the
//! [`input::InputDevice`] and [`physics::PhysicsBody`] traits and the
//! [`events::SimEvent`]s a tick returns.

pub mod combat;
pub mod controller;
pub mod events;
pub mod input;
pub mod movement;
pub mod physics;
pub mod replicate;
pub mod respawn;
pub mod spawn;
pub mod store;

pub use controller::CharacterController;
pub use events::{ProjectileSpawn, SimEvent};
pub use store::{NetworkStateStore, Role, StateHandle, StoreError};
