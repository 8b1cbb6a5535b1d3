//! Input device abstraction for a virtual joystick with named buttons.

use std::collections::HashSet;

/// Name of the fire button on every device.
pub const FIRE_BUTTON: &str = "fire";

/// A virtual joystick as seen by the simulation.
///
/// Direction is only meaningful while the stick is actively pressed;
/// `angle` may report a stale value after release, so consumers must gate
/// on `is_direction_active`.
pub trait InputDevice {
    /// Current stick angle in radians, if the device has one to report.
    fn angle(&self) -> Option<f32>;

    /// Whether the stick is currently pressed in a direction.
    fn is_direction_active(&self) -> bool;

    /// Whether a named button is currently held.
    fn is_button_held(&self, name: &str) -> bool;
}

/// Settable in-memory device used by bots and tests.
#[derive(Debug, Clone, Default)]
pub struct VirtualStick {
    angle: Option<f32>,
    active: bool,
    held: HashSet<String>,
}

impl VirtualStick {
    pub fn new() -> Self {
        Self::default()
    }

    /// Presses the stick toward `angle` (radians).
    pub fn point(&mut self, angle: f32) {
        self.angle = Some(angle);
        self.active = true;
    }

    /// Releases the stick. The last angle is kept, mirroring real
    /// joystick widgets that report their rest value after release.
    pub fn release(&mut self) {
        self.active = false;
    }

    pub fn press(&mut self, button: &str) {
        self.held.insert(button.to_string());
    }

    pub fn release_button(&mut self, button: &str) {
        self.held.remove(button);
    }
}

impl InputDevice for VirtualStick {
    fn angle(&self) -> Option<f32> {
        self.angle
    }

    fn is_direction_active(&self) -> bool {
        self.active
    }

    fn is_button_held(&self, name: &str) -> bool {
        self.held.contains(name)
    }
}
