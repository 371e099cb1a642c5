//! Digital output port trait

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Logic level of a digital output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    /// Check if this is the high level
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Digital output port addressed by pin number
///
/// Implementations own the physical pins of one zone and route
/// writes by the pin numbers given in the zone configuration.
pub trait OutputPort {
    /// Put a pin into output mode
    fn configure(&mut self, pin: u8);

    /// Drive a pin to the given level
    fn write(&mut self, pin: u8, level: Level);
}
