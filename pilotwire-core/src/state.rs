//! Observable zone state

use heapless::String;

use crate::error::ControlError;
use crate::order::Order;
use crate::schedule::PeriodUnit;
use crate::traits::{ArmToken, Level};

/// Maximum zone name length
pub const MAX_NAME_LEN: usize = 16;

/// Maximum timestamp length (fits an ISO 8601 date-time with offset)
pub const MAX_TIMESTAMP_LEN: usize = 32;

/// One of the two outputs of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinSlot {
    /// Negative half-wave output
    A = 0,
    /// Positive half-wave output
    B = 1,
}

impl TryFrom<u8> for PinSlot {
    type Error = ControlError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(PinSlot::A),
            1 => Ok(PinSlot::B),
            _ => Err(ControlError::InvalidPin(index)),
        }
    }
}

/// Everything a listener or status query can see about a zone
#[derive(Debug, Clone)]
pub struct ZoneState {
    pub(crate) pins: [u8; 2],
    pub(crate) levels: [Level; 2],
    pub(crate) order: Order,
    pub(crate) default_order: Order,
    pub(crate) name: String<MAX_NAME_LEN>,
    pub(crate) timestamp: String<MAX_TIMESTAMP_LEN>,
    /// Duration requested by the last `change_order`
    pub(crate) duration: u32,
    /// Units still owed on the running schedule
    pub(crate) leftover: u32,
    pub(crate) unit: PeriodUnit,
    /// Token of the arm we are waiting for, `None` when idle
    pub(crate) token: Option<ArmToken>,
}

impl ZoneState {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn order_label(&self) -> &'static str {
        self.order.label()
    }

    pub fn default_order(&self) -> Order {
        self.default_order
    }

    pub fn default_order_label(&self) -> &'static str {
        self.default_order.label()
    }

    pub fn is_default_order(&self) -> bool {
        self.order == self.default_order
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Duration originally requested for the current temporary order
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Unit of the current (or last) schedule
    pub fn unit(&self) -> PeriodUnit {
        self.unit
    }

    /// Units left after the sub-period currently being timed
    pub fn time_leftover(&self) -> u32 {
        self.leftover
    }

    /// Check if no further sub-period is owed
    pub fn finished(&self) -> bool {
        self.leftover == 0
    }

    /// Token the controller expects on the next timer firing
    pub fn pending_token(&self) -> Option<ArmToken> {
        self.token
    }

    /// Last level written to a pin
    pub fn pin_value(&self, slot: PinSlot) -> Level {
        self.levels[slot as usize]
    }

    /// Pin number behind a slot
    pub fn pin_label(&self, slot: PinSlot) -> u8 {
        self.pins[slot as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_slot_from_index() {
        assert_eq!(PinSlot::try_from(0), Ok(PinSlot::A));
        assert_eq!(PinSlot::try_from(1), Ok(PinSlot::B));
        assert_eq!(PinSlot::try_from(2), Err(ControlError::InvalidPin(2)));
    }
}
