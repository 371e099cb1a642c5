//! Duration splitting for the bounded one-shot timer
//!
//! The timer behind a zone cannot wait much longer than an hour, while a
//! temporary order may last a whole day or more. A requested duration is
//! therefore consumed in sub-periods no longer than a per-unit cap, and the
//! controller re-arms the timer with whatever is left after each firing.
//!
//! Caps are chosen so that every sub-period fits in [`MAX_TIMER_DELAY_S`]:
//!
//! | Unit    | Cap | Longest delay |
//! |---------|-----|---------------|
//! | Hours   | 1   | 3600 s        |
//! | Minutes | 60  | 3600 s        |
//! | Seconds | 300 | 300 s         |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest delay handed to the one-shot timer, in seconds
pub const MAX_TIMER_DELAY_S: u32 = 3600;

/// Unit of a scheduled duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PeriodUnit {
    Hours,
    #[default]
    Minutes,
    Seconds,
}

impl PeriodUnit {
    /// Largest sub-period the timer accepts in this unit
    pub fn max_sub_period(self) -> u32 {
        match self {
            PeriodUnit::Hours => 1,
            PeriodUnit::Minutes => 60,
            PeriodUnit::Seconds => 300,
        }
    }

    /// Convert an amount of this unit to seconds
    pub fn to_seconds(self, amount: u32) -> u32 {
        match self {
            PeriodUnit::Hours => amount.saturating_mul(3600),
            PeriodUnit::Minutes => amount.saturating_mul(60),
            PeriodUnit::Seconds => amount,
        }
    }

    /// Parse a unit name as written in the zone file
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "h" | "hour" | "hours" => Some(PeriodUnit::Hours),
            "m" | "min" | "minute" | "minutes" => Some(PeriodUnit::Minutes),
            "s" | "sec" | "second" | "seconds" => Some(PeriodUnit::Seconds),
            _ => None,
        }
    }
}

/// Length of the next sub-period for `duration` units
///
/// A zero duration yields a zero sub-period. Anything at or above the cap
/// is served one full cap at a time; a shorter remainder goes in one piece.
pub fn next_sub_period(duration: u32, unit: PeriodUnit) -> u32 {
    let max = unit.max_sub_period();

    if duration == 0 {
        0
    } else if duration / max > 0 {
        max
    } else if duration % max > 0 {
        duration % max
    } else {
        max
    }
}

/// One timer arm worth of a scheduled duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SubPeriod {
    /// Length of this sub-period, in `unit`
    pub units: u32,
    /// Unit of the whole schedule
    pub unit: PeriodUnit,
    /// Units still owed once this sub-period has elapsed
    pub leftover: u32,
}

impl SubPeriod {
    /// Plan the first sub-period of `duration` units
    pub fn plan(duration: u32, unit: PeriodUnit) -> Self {
        let units = next_sub_period(duration, unit);
        Self {
            units,
            unit,
            leftover: duration - units,
        }
    }

    /// Timer delay for this sub-period, in seconds
    pub fn delay_s(&self) -> u32 {
        self.unit.to_seconds(self.units)
    }

    /// Check if nothing is left to wait for
    pub fn is_empty(&self) -> bool {
        self.units == 0
    }
}

/// Iterator over the successive sub-periods of a duration
///
/// Yields nothing for a zero duration.
#[derive(Debug, Clone)]
pub struct SubPeriods {
    remaining: u32,
    unit: PeriodUnit,
}

impl SubPeriods {
    pub fn new(duration: u32, unit: PeriodUnit) -> Self {
        Self {
            remaining: duration,
            unit,
        }
    }
}

impl Iterator for SubPeriods {
    type Item = SubPeriod;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let sub = SubPeriod::plan(self.remaining, self.unit);
        self.remaining = sub.leftover;
        Some(sub)
    }
}
