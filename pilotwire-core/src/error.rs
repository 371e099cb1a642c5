//! Controller errors

use core::fmt;

/// Errors reported at the controller boundary
///
/// Invalid inputs are rejected before any pin is written or any
/// timer is armed, so an `Err` always leaves the zone untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    /// Raw order code outside 0..=3
    InvalidOrder(u8),
    /// Pin slot index outside 0..=1
    InvalidPin(u8),
    /// Requested duration below zero
    NegativeDuration(i32),
    /// Both waveform halves assigned to the same pin
    DuplicatePin(u8),
    /// Zone name exceeds `MAX_NAME_LEN`
    NameTooLong,
    /// Timestamp exceeds `MAX_TIMESTAMP_LEN`
    TimestampTooLong,
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::InvalidOrder(code) => write!(f, "invalid order code {}", code),
            ControlError::InvalidPin(slot) => write!(f, "invalid pin slot {}", slot),
            ControlError::NegativeDuration(d) => write!(f, "negative duration {}", d),
            ControlError::DuplicatePin(pin) => write!(f, "pin {} used for both halves", pin),
            ControlError::NameTooLong => f.write_str("zone name too long"),
            ControlError::TimestampTooLong => f.write_str("timestamp too long"),
        }
    }
}
