//! Dynamic pin allocation for config-driven zone setup
//!
//! Provides a way to get GPIO pins by number at runtime, so the pins of
//! each zone come from zones.toml rather than being hardcoded.

use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;

/// Number of GPIO pins on the RP2040
pub const GPIO_COUNT: usize = 30;

/// Macro to move every GPIO out of the peripherals into a [`PinBank`]
///
/// Usage:
/// ```ignore
/// let p = embassy_rp::init(Default::default());
/// let mut pins = pin_bank!(p);
/// ```
#[macro_export]
macro_rules! pin_bank {
    ($p:expr) => {
        $crate::pins::PinBank::new([
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_0),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_1),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_2),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_3),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_4),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_5),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_6),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_7),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_8),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_9),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_10),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_11),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_12),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_13),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_14),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_15),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_16),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_17),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_18),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_19),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_20),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_21),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_22),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_23),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_24),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_25),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_26),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_27),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_28),
            embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.PIN_29),
        ])
    };
}

/// Error when requesting a pin
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
}

/// Pin bank that holds all GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl PinBank {
    /// Create a pin bank owning all GPIO pins
    pub fn new(pins: [Peri<'static, AnyPin>; GPIO_COUNT]) -> Self {
        Self {
            pins: pins.map(Some),
        }
    }

    /// Take a pin by number
    ///
    /// Returns the pin if available, or an error if:
    /// - Pin number is invalid (>= 30)
    /// - Pin was already taken
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        self.pins
            .get_mut(pin_num as usize)
            .ok_or(PinError::InvalidPin)?
            .take()
            .ok_or(PinError::AlreadyTaken)
    }
}
