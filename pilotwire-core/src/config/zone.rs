//! Zone configuration types

use heapless::String;

use crate::error::ControlError;
use crate::order::Order;
use crate::schedule::PeriodUnit;
use crate::state::MAX_NAME_LEN;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Zone name used when none is configured
pub const DEFAULT_ZONE_NAME: &str = "room";

/// Static configuration of one pilot wire zone
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoneConfig {
    /// Negative half-wave output pin
    pub pin_a: u8,
    /// Positive half-wave output pin
    pub pin_b: u8,
    /// Order restored when a temporary order expires
    pub default_order: Order,
    /// Zone label
    pub name: String<MAX_NAME_LEN>,
}

impl ZoneConfig {
    /// Zone on `pin_a`/`pin_b` defaulting to frost protection, named "room"
    pub fn new(pin_a: u8, pin_b: u8) -> Self {
        let mut name = String::new();
        // DEFAULT_ZONE_NAME is shorter than MAX_NAME_LEN
        let _ = name.push_str(DEFAULT_ZONE_NAME);
        Self {
            pin_a,
            pin_b,
            default_order: Order::FrostProtection,
            name,
        }
    }

    pub fn with_default_order(mut self, order: Order) -> Self {
        self.default_order = order;
        self
    }

    pub fn with_name(mut self, name: &str) -> Result<Self, ControlError> {
        self.name = String::try_from(name).map_err(|_| ControlError::NameTooLong)?;
        Ok(self)
    }

    /// Check that the two halves use different pins
    pub fn validate(&self) -> Result<(), ControlError> {
        if self.pin_a == self.pin_b {
            return Err(ControlError::DuplicatePin(self.pin_a));
        }
        Ok(())
    }
}

/// Temporary order applied once at start-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Boost {
    pub order: Order,
    pub duration: u32,
    pub unit: PeriodUnit,
}

/// One `[zone.<name>]` entry of the zone file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoneEntry {
    pub config: ZoneConfig,
    pub boost: Option<Boost>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ZoneConfig::new(4, 5);
        assert_eq!(config.default_order, Order::FrostProtection);
        assert_eq!(config.name.as_str(), "room");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ZoneConfig::new(4, 5)
            .with_default_order(Order::Eco)
            .with_name("bedroom")
            .unwrap();
        assert_eq!(config.default_order, Order::Eco);
        assert_eq!(config.name.as_str(), "bedroom");
    }

    #[test]
    fn test_name_too_long() {
        let result = ZoneConfig::new(4, 5).with_name("a-very-long-zone-name-indeed");
        assert_eq!(result, Err(ControlError::NameTooLong));
    }

    #[test]
    fn test_duplicate_pin() {
        assert_eq!(
            ZoneConfig::new(7, 7).validate(),
            Err(ControlError::DuplicatePin(7))
        );
    }
}
