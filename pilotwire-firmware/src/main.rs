//! Pilot wire heating controller firmware
//!
//! Drives up to four electric heaters through their pilot wire, one
//! two-output zone per heater, from an RP2040-based board. Zones are
//! described in zones.toml, which is embedded at build time.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use heapless::Vec;
use {defmt_rtt as _, panic_probe as _};

use pilotwire_core::config::{parse_zones, ZoneConfig, ZoneEntry, MAX_ZONES};
use pilotwire_core::{HeatingController, ZoneState};
use pilotwire_drivers::{HalPin, PinPairPort};

use crate::pins::PinBank;
use crate::tasks::ZoneController;
use crate::timer::ChannelTimer;

mod channels;
mod pins;
mod tasks;
mod timer;

/// Zone file compiled into the firmware
/// Edit zones.toml and rebuild to customize
const EMBEDDED_ZONES: &str = include_str!("../zones.toml");

/// Fallback zone pins if the embedded zone file is broken
const FALLBACK_PIN_A: u8 = 2;
const FALLBACK_PIN_B: u8 = 3;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Pilot wire firmware starting...");

    let p = embassy_rp::init(Default::default());
    let mut pins = pin_bank!(p);
    info!("Peripherals initialized");

    let zones = load_zones();
    info!("{} zone(s) configured", zones.len());

    for (index, entry) in zones.into_iter().enumerate() {
        let Some(controller) = build_zone(index, &entry.config, &mut pins) else {
            continue;
        };

        spawner.spawn(tasks::zone_timer_task(index)).unwrap();
        spawner
            .spawn(tasks::zone_task(index, controller, entry.boost))
            .unwrap();
    }

    info!("All tasks spawned, firmware running");

    // All work happens in the zone tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded zone file
///
/// Falls back to a single frost-protected zone on the default pins if the
/// file does not parse. build.rs rejects a broken file, so this only
/// happens when the two checks disagree.
fn load_zones() -> Vec<ZoneEntry, MAX_ZONES> {
    match parse_zones(EMBEDDED_ZONES) {
        Ok(zones) if !zones.is_empty() => zones,
        Ok(_) => {
            warn!("Zone file defines no zone, using fallback zone");
            fallback_zones()
        }
        Err(e) => {
            error!("Failed to parse embedded zone file: {}", e);
            error!("Using fallback zone");
            fallback_zones()
        }
    }
}

fn fallback_zones() -> Vec<ZoneEntry, MAX_ZONES> {
    let mut zones = Vec::new();
    let _ = zones.push(ZoneEntry {
        config: ZoneConfig::new(FALLBACK_PIN_A, FALLBACK_PIN_B),
        boost: None,
    });
    zones
}

/// Take the zone's pins and initialize its controller
///
/// Returns `None` (after logging why) if the zone cannot be driven.
fn build_zone(index: usize, config: &ZoneConfig, pins: &mut PinBank) -> Option<ZoneController> {
    let pin_a = match pins.take(config.pin_a) {
        Ok(pin) => pin,
        Err(e) => {
            error!("Zone {}: GPIO {} unavailable: {}", config.name.as_str(), config.pin_a, e);
            return None;
        }
    };
    let pin_b = match pins.take(config.pin_b) {
        Ok(pin) => pin,
        Err(e) => {
            error!("Zone {}: GPIO {} unavailable: {}", config.name.as_str(), config.pin_b, e);
            return None;
        }
    };

    let port = PinPairPort::new(
        HalPin(Output::new(pin_a, Level::Low)),
        config.pin_a,
        HalPin(Output::new(pin_b, Level::Low)),
        config.pin_b,
    );

    match HeatingController::with_listener(
        config.clone(),
        port,
        ChannelTimer::new(index),
        log_change as fn(&ZoneState),
    ) {
        Ok(controller) => {
            info!(
                "Zone {} on GPIO {}/{}, default {}",
                controller.name(),
                config.pin_a,
                config.pin_b,
                controller.default_order_label()
            );
            Some(controller)
        }
        Err(e) => {
            error!("Zone {} rejected: {}", config.name.as_str(), e);
            None
        }
    }
}

/// Listener installed on every zone
fn log_change(zone: &ZoneState) {
    info!(
        "Zone {}: {} ({} {} left)",
        zone.name(),
        zone.order_label(),
        zone.time_leftover(),
        zone.unit()
    );
}
