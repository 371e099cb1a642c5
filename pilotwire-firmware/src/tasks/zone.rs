//! Zone control task
//!
//! Owns one zone's controller. Every operation on the zone, including
//! timer expiries, arrives through the zone's command channel, so the
//! controller is only ever touched from this task.

use defmt::*;
use embassy_rp::gpio::Output;

use pilotwire_core::config::Boost;
use pilotwire_core::schedule::SubPeriods;
use pilotwire_core::{FireOutcome, HeatingController};
use pilotwire_drivers::{HalPin, PinPairPort};

use crate::channels::{ZoneCommand, ZONE_COMMANDS};
use crate::timer::ChannelTimer;

/// Port driving the two pilot wire outputs of a zone
pub type ZonePort = PinPairPort<HalPin<Output<'static>>, HalPin<Output<'static>>>;

/// Controller type run by every zone task
pub type ZoneController = HeatingController<ZonePort, ChannelTimer>;

/// Zone task
///
/// Applies the start-up boost if the zone has one, then handles commands
/// until the firmware stops.
#[embassy_executor::task(pool_size = pilotwire_core::config::MAX_ZONES)]
pub async fn zone_task(zone: usize, mut controller: ZoneController, boost: Option<Boost>) {
    info!("Zone {} ({}) task started", zone, controller.name());

    if let Some(boost) = boost {
        match i32::try_from(boost.duration) {
            Ok(duration) => {
                info!(
                    "Zone {}: boost {} for {} {} ({} timer arms)",
                    zone,
                    boost.order.label(),
                    duration,
                    boost.unit,
                    SubPeriods::new(boost.duration, boost.unit).count()
                );
                if let Err(e) = controller.change_order(boost.order, duration, boost.unit) {
                    warn!("Zone {}: boost rejected: {}", zone, e);
                }
            }
            Err(_) => warn!("Zone {}: boost duration {} out of range", zone, boost.duration),
        }
    }

    loop {
        let command = ZONE_COMMANDS[zone].receive().await;
        handle_command(zone, &mut controller, command);
    }
}

fn handle_command(zone: usize, controller: &mut ZoneController, command: ZoneCommand) {
    match command {
        ZoneCommand::ChangeOrder {
            order,
            duration,
            unit,
        } => {
            if let Err(e) = controller.change_order(order, duration, unit) {
                warn!("Zone {}: change order rejected: {}", zone, e);
            }
        }
        ZoneCommand::ToDefault => {
            info!("Zone {}: back to default", zone);
            controller.to_default();
        }
        ZoneCommand::SetTimestamp(stamp) => {
            if let Err(e) = controller.set_timestamp(stamp.as_str()) {
                warn!("Zone {}: timestamp rejected: {}", zone, e);
            }
        }
        ZoneCommand::TimerFired(token) => match controller.on_timer_fired(token) {
            FireOutcome::Stale => {
                debug!("Zone {}: ignoring stale timer (token {})", zone, token.0);
            }
            FireOutcome::Rearmed(sub) => {
                debug!(
                    "Zone {}: {} {} more, {} left",
                    zone, sub.units, sub.unit, sub.leftover
                );
            }
            FireOutcome::Reverted => {
                info!("Zone {}: schedule complete", zone);
            }
        },
    }
}
