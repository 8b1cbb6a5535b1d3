//! Scripted stick driver: wander, occasionally stop, fire in bursts.

use rand::Rng;
use sim::input::{VirtualStick, FIRE_BUTTON};
use std::f32::consts::PI;

pub struct Bot {
    next_turn_ms: u64,
    next_fire_decision_ms: u64,
    fire_until_ms: u64,
}

impl Bot {
    pub fn new() -> Self {
        Self {
            next_turn_ms: 0,
            next_fire_decision_ms: 0,
            fire_until_ms: 0,
        }
    }

    /// Re-samples the stick. Headings re-roll at random intervals with an
    /// occasional full stop; firing comes in held bursts with pauses, so
    /// the fire-rate debounce actually gets exercised.
    pub fn drive<R: Rng>(&mut self, stick: &mut VirtualStick, now_ms: u64, rng: &mut R) {
        if now_ms >= self.next_turn_ms {
            self.next_turn_ms = now_ms + rng.gen_range(500..1500);
            if rng.gen_bool(0.85) {
                stick.point(rng.gen_range(-PI..PI));
            } else {
                stick.release();
            }
        }

        if now_ms >= self.next_fire_decision_ms {
            self.next_fire_decision_ms = now_ms + rng.gen_range(400..1200);
            if rng.gen_bool(0.6) {
                self.fire_until_ms = now_ms + rng.gen_range(300..900);
            }
        }

        if now_ms < self.fire_until_ms {
            stick.press(FIRE_BUTTON);
        } else {
            stick.release_button(FIRE_BUTTON);
        }
    }
}

impl Default for Bot {
    fn default() -> Self {
        Self::new()
    }
}
