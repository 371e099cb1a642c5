//! Two-pin output port
//!
//! Binds the two pins of a zone to the pin numbers the controller
//! addresses them by.

use pilotwire_core::traits::{Level, OutputPort};

use crate::gpio::OutputPin;

/// Output port over the two pins of one zone
///
/// Writes to a pin number this port does not own are ignored; the
/// controller only ever addresses the pins of its own configuration.
pub struct PinPairPort<A, B> {
    pin_a: A,
    pin_b: B,
    number_a: u8,
    number_b: u8,
}

impl<A: OutputPin, B: OutputPin> PinPairPort<A, B> {
    /// Create a port from two pins and their GPIO numbers
    pub fn new(pin_a: A, number_a: u8, pin_b: B, number_b: u8) -> Self {
        Self {
            pin_a,
            pin_b,
            number_a,
            number_b,
        }
    }

    /// Get access to the negative half-wave pin
    pub fn pin_a(&self) -> &A {
        &self.pin_a
    }

    /// Get access to the positive half-wave pin
    pub fn pin_b(&self) -> &B {
        &self.pin_b
    }
}

impl<A: OutputPin, B: OutputPin> OutputPort for PinPairPort<A, B> {
    fn configure(&mut self, pin: u8) {
        // Pins are handed over already in output mode; park them low
        self.write(pin, Level::Low);
    }

    fn write(&mut self, pin: u8, level: Level) {
        if pin == self.number_a {
            self.pin_a.set_level(level);
        } else if pin == self.number_b {
            self.pin_b.set_level(level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pilotwire_core::config::ZoneConfig;
    use pilotwire_core::traits::{ArmToken, OneShotTimer};
    use pilotwire_core::{HeatingController, Order, PeriodUnit};

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self { high: true }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }
    }

    /// Timer that only remembers the last token
    struct NullTimer(Option<ArmToken>);

    impl OneShotTimer for NullTimer {
        fn arm_once(&mut self, _delay_s: u32, token: ArmToken) {
            self.0 = Some(token);
        }

        fn cancel(&mut self) {
            self.0 = None;
        }
    }

    #[test]
    fn test_routes_by_pin_number() {
        let mut port = PinPairPort::new(MockPin::new(), 10, MockPin::new(), 11);

        port.write(10, Level::Low);
        assert!(!port.pin_a().high);
        assert!(port.pin_b().high);

        port.write(11, Level::Low);
        assert!(!port.pin_b().high);

        // Foreign pin: no effect
        port.write(12, Level::High);
        assert!(!port.pin_a().high);
        assert!(!port.pin_b().high);
    }

    #[test]
    fn test_configure_parks_low() {
        let mut port = PinPairPort::new(MockPin::new(), 1, MockPin::new(), 2);
        port.configure(1);
        port.configure(2);
        assert!(!port.pin_a().high);
        assert!(!port.pin_b().high);
    }

    #[test]
    fn test_zone_drives_pins() {
        let port = PinPairPort::new(MockPin::new(), 6, MockPin::new(), 7);
        let config = ZoneConfig::new(6, 7);
        let mut zone = HeatingController::new(config, port, NullTimer(None)).unwrap();

        // Frost protection: negative half only
        assert!(zone.port().pin_a().high);
        assert!(!zone.port().pin_b().high);

        zone.change_order(Order::Off, 2, PeriodUnit::Hours).unwrap();
        assert!(!zone.port().pin_a().high);
        assert!(zone.port().pin_b().high);

        let token = zone.timer().0.unwrap();
        zone.on_timer_fired(token);
        let token = zone.timer().0.unwrap();
        zone.on_timer_fired(token);
        assert_eq!(zone.order(), Order::FrostProtection);
        assert!(zone.port().pin_a().high);
    }
}
