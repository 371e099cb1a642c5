//! Order change notification
//!
//! Each controller holds at most one listener. Registering a new one
//! replaces the old one for that controller only.

use crate::state::ZoneState;

/// Receives a zone's state every time its order is (re)applied
///
/// Called synchronously from `set_order`, including when the order
/// did not actually change.
pub trait ChangeListener {
    fn on_change(&mut self, zone: &ZoneState);
}

impl<F> ChangeListener for F
where
    F: FnMut(&ZoneState),
{
    fn on_change(&mut self, zone: &ZoneState) {
        self(zone)
    }
}
