//! Zone timer task
//!
//! Waits out the one-shot arms requested by a zone controller and reports
//! each expiry back to the zone task with the token it was armed with.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::Timer;

use pilotwire_core::traits::ArmToken;

use crate::channels::{TimerRequest, ZoneCommand, TIMER_REQUESTS, ZONE_COMMANDS};

/// One-shot timer task for the zone at `zone`
///
/// Holds at most one pending arm. A new request replaces it, so a cancel
/// or re-arm never lets the superseded wake-up through.
#[embassy_executor::task(pool_size = pilotwire_core::config::MAX_ZONES)]
pub async fn zone_timer_task(zone: usize) {
    info!("Zone {} timer task started", zone);

    let requests = &TIMER_REQUESTS[zone];
    let mut pending: Option<(u32, ArmToken)> = None;

    loop {
        let Some((delay_s, token)) = pending else {
            pending = armed(requests.wait().await);
            continue;
        };

        match select(Timer::after_secs(u64::from(delay_s)), requests.wait()).await {
            Either::First(()) => {
                debug!("Zone {} timer expired (token {})", zone, token.0);
                pending = None;
                ZONE_COMMANDS[zone].send(ZoneCommand::TimerFired(token)).await;
            }
            Either::Second(request) => {
                pending = armed(request);
            }
        }
    }
}

fn armed(request: TimerRequest) -> Option<(u32, ArmToken)> {
    match request {
        TimerRequest::Arm { delay_s, token } => Some((delay_s, token)),
        TimerRequest::Cancel => None,
    }
}
