//! Per-tick position synchronization between body and store.

use crate::physics::PhysicsBody;
use crate::store::{StateHandle, StoreError};
use shared::{StateKey, StateValue};

/// Host pushes the authoritative body position; observers pull it and
/// force it onto their mirror body (no local integration). An absent
/// value before the first host write leaves the body untouched.
pub fn replicate_position(
    handle: &StateHandle,
    body: &mut impl PhysicsBody,
) -> Result<(), StoreError> {
    if handle.role().is_host() {
        handle.set(StateKey::Pos, StateValue::Vec3(body.translation()))?;
    } else if let Some(pos) = handle.pos() {
        body.set_translation(pos);
    }
    Ok(())
}
