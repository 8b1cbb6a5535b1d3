//! # Headless Arena Harness
//!
//! A runnable consumer of the simulation core: scripted bots drive
//! characters around a spawn ring, projectiles fly, hits accumulate, and
//! a scoreboard tracks kills and deaths. There is no rendering, audio, or
//! network transport here; this crate stands in for the host process the
//! core library is embedded in.
//!
//! The world advances in discrete ticks. Each tick the bots re-sample
//! their sticks, every character controller runs one simulation step,
//! fire events become live projectiles, and projectile overlap queues
//! contact events that the victim's controller resolves on its next tick.

pub mod bot;
pub mod world;

pub use world::{World, WorldConfig};
