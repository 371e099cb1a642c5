//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Every zone gets its own command channel and timer signal, indexed by the
//! zone's position in the zone file.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::String;

use pilotwire_core::config::MAX_ZONES;
use pilotwire_core::state::MAX_TIMESTAMP_LEN;
use pilotwire_core::traits::ArmToken;
use pilotwire_core::{Order, PeriodUnit};

/// Channel capacity for zone commands
const COMMAND_CHANNEL_SIZE: usize = 4;

/// Command handled by a zone task
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(dead_code)] // ChangeOrder, ToDefault, SetTimestamp reserved for a control link
pub enum ZoneCommand {
    /// Apply `order` for `duration` units, then revert to the default
    ChangeOrder {
        order: Order,
        duration: i32,
        unit: PeriodUnit,
    },
    /// Revert to the default order now
    ToDefault,
    /// Record when the last change was requested
    SetTimestamp(String<MAX_TIMESTAMP_LEN>),
    /// The zone's one-shot timer expired
    TimerFired(ArmToken),
}

/// Request from a zone controller to its timer task
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerRequest {
    /// Wake the zone after `delay_s` seconds with `token`
    Arm { delay_s: u32, token: ArmToken },
    /// Forget the pending wake-up
    Cancel,
}

/// Commands for each zone (timer firings and external requests)
pub static ZONE_COMMANDS: [Channel<CriticalSectionRawMutex, ZoneCommand, COMMAND_CHANNEL_SIZE>;
    MAX_ZONES] = [const { Channel::new() }; MAX_ZONES];

/// Timer requests for each zone (latest request wins)
pub static TIMER_REQUESTS: [Signal<CriticalSectionRawMutex, TimerRequest>; MAX_ZONES] =
    [const { Signal::new() }; MAX_ZONES];
