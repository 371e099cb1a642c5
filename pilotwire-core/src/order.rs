//! Pilot wire orders and their waveforms
//!
//! Pin A keeps the negative half of the mains sine, pin B the positive
//! half. Each order is one combination of the two outputs:
//!
//! ```text
//! Order            pin A (neg)  pin B (pos)  signal on the wire
//! Comfort          LOW          LOW          full sine
//! FrostProtection  HIGH         LOW          negative half only
//! Off              LOW          HIGH         positive half only
//! Eco              HIGH         HIGH         no signal
//! ```

use crate::error::ControlError;
use crate::traits::Level;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of pilot wire orders
pub const ORDER_COUNT: usize = 4;

/// Heating order sent over the pilot wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Order {
    /// Full heating
    Comfort = 0,
    /// Keep the room above freezing
    #[default]
    FrostProtection = 1,
    /// Heating stopped
    Off = 2,
    /// Reduced setpoint
    Eco = 3,
}

impl Order {
    /// All orders, in code order
    pub const ALL: [Order; ORDER_COUNT] =
        [Order::Comfort, Order::FrostProtection, Order::Off, Order::Eco];

    /// Numeric order code (0..=3)
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Output levels `(pin A, pin B)` producing this order
    pub fn levels(self) -> (Level, Level) {
        match self {
            Order::Comfort => (Level::Low, Level::Low),
            Order::FrostProtection => (Level::High, Level::Low),
            Order::Off => (Level::Low, Level::High),
            Order::Eco => (Level::High, Level::High),
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Order::Comfort => "Comfort",
            Order::FrostProtection => "Frost-protection",
            Order::Off => "Off",
            Order::Eco => "Eco",
        }
    }

    /// French display label, as printed on radiator thermostats
    pub fn label_fr(self) -> &'static str {
        match self {
            Order::Comfort => "Confort",
            Order::FrostProtection => "Hors gel",
            Order::Off => "Arrêt",
            Order::Eco => "Eco",
        }
    }

    /// Parse an order name as written in the zone file
    ///
    /// Accepts English and French spellings, case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        const NAMES: [(&str, Order); 9] = [
            ("comfort", Order::Comfort),
            ("confort", Order::Comfort),
            ("frost", Order::FrostProtection),
            ("frost_protection", Order::FrostProtection),
            ("hors_gel", Order::FrostProtection),
            ("off", Order::Off),
            ("arret", Order::Off),
            ("eco", Order::Eco),
            ("economy", Order::Eco),
        ];

        let name = name.trim();
        NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, order)| *order)
    }
}

impl TryFrom<u8> for Order {
    type Error = ControlError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Order::Comfort),
            1 => Ok(Order::FrostProtection),
            2 => Ok(Order::Off),
            3 => Ok(Order::Eco),
            _ => Err(ControlError::InvalidOrder(code)),
        }
    }
}
