//! GPIO output pins
//!
//! Pilot wire outputs usually drive an opto-triac or a diode pair through a
//! GPIO, directly or via a transistor.

use core::convert::Infallible;

use pilotwire_core::traits::Level;

/// Trait for GPIO pin abstraction
pub trait OutputPin {
    /// Set the pin high
    fn set_high(&mut self);

    /// Set the pin low
    fn set_low(&mut self);

    /// Set the pin to a specific level
    fn set_level(&mut self, level: Level) {
        match level {
            Level::High => self.set_high(),
            Level::Low => self.set_low(),
        }
    }
}

/// Adapter for `embedded-hal` output pins that cannot fail
///
/// Chip HALs such as embassy-rp expose their outputs this way.
pub struct HalPin<P>(pub P);

impl<P> OutputPin for HalPin<P>
where
    P: embedded_hal::digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        match self.0.set_high() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    fn set_low(&mut self) {
        match self.0.set_low() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }
}
