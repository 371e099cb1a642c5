//! One-shot timer trait
//!
//! The timer only *requests* a wake-up. Whoever drives the timer hardware
//! must hand the token back to
//! [`HeatingController::on_timer_fired`](crate::controller::HeatingController::on_timer_fired)
//! once the delay has elapsed.

/// Generation token identifying one timer arm
///
/// The controller bumps the token on every arm, so a firing that carries an
/// older token belongs to a superseded schedule and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArmToken(pub u32);

impl ArmToken {
    /// Token following this one (wraps on overflow)
    pub fn next(self) -> Self {
        ArmToken(self.0.wrapping_add(1))
    }
}

/// Single-shot timer with a bounded delay
pub trait OneShotTimer {
    /// Schedule one wake-up after `delay_s` seconds carrying `token`
    ///
    /// Arming replaces any previous arm.
    fn arm_once(&mut self, delay_s: u32, token: ArmToken);

    /// Drop the pending arm, if any
    fn cancel(&mut self);
}
