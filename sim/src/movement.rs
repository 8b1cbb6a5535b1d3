//! Turn-rate-limited heading and movement impulse from stick input.
//!
//! Every participant runs this locally each tick for its own viewed
//! rotation; whether the resulting impulse reaches the authoritative body
//! is decided by the caller (host only).

use crate::input::InputDevice;
use shared::{wrap_angle, Vec3, MOVEMENT_SPEED, TURN_RATE_AIM, TURN_RATE_RUN};

#[derive(Debug, Clone, Copy)]
pub struct MovementConfig {
    /// Impulse magnitude per second of movement.
    pub speed: f32,
    /// Turn rate (rad/s) while only moving.
    pub turn_rate_run: f32,
    /// Turn rate (rad/s) while firing, for aiming stabilization.
    pub turn_rate_aim: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: MOVEMENT_SPEED,
            turn_rate_run: TURN_RATE_RUN,
            turn_rate_aim: TURN_RATE_AIM,
        }
    }
}

/// Animation tag produced alongside the motion, consumed by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    Idle,
    Run,
    IdleShoot,
    RunShoot,
    Death,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementOutput {
    pub heading: f32,
    pub impulse: Option<Vec3>,
    pub animation: Animation,
}

/// Computes one tick of movement. Pure: applying the proposed heading and
/// impulse is the caller's decision.
pub fn simulate(
    heading: f32,
    device: &impl InputDevice,
    firing: bool,
    dead: bool,
    dt: f32,
    cfg: &MovementConfig,
) -> MovementOutput {
    if dead {
        return MovementOutput {
            heading,
            impulse: None,
            animation: Animation::Death,
        };
    }

    let target = if device.is_direction_active() {
        device.angle()
    } else {
        None
    };

    let new_heading = match target {
        Some(target_angle) => {
            let turn_rate = if firing {
                cfg.turn_rate_aim
            } else {
                cfg.turn_rate_run
            };
            let max_step = turn_rate * dt;
            let diff = wrap_angle(target_angle - heading);
            heading + diff.clamp(-max_step, max_step)
        }
        None => heading,
    };

    // Motion follows the limited heading, not the raw stick angle.
    let impulse = target.map(|_| {
        Vec3::new(new_heading.sin(), 0.0, new_heading.cos()).scale(cfg.speed * dt)
    });

    let moving = impulse.is_some();
    let animation = match (moving, firing) {
        (true, true) => Animation::RunShoot,
        (true, false) => Animation::Run,
        (false, true) => Animation::IdleShoot,
        (false, false) => Animation::Idle,
    };

    MovementOutput {
        heading: new_heading,
        impulse,
        animation,
    }
}
