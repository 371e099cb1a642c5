//! Build script for pilotwire-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates zones.toml at compile time, with the `toml` crate and with
//!   the zone parser the firmware runs

use std::collections::BTreeMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Highest GPIO number on the RP2040
const MAX_GPIO: i64 = 29;

/// Zones the firmware can run at once (matches pilotwire_core::config::MAX_ZONES)
const MAX_ZONES: usize = 4;

const ORDERS: &[&str] = &[
    "comfort",
    "confort",
    "frost",
    "frost_protection",
    "hors_gel",
    "off",
    "arret",
    "eco",
    "economy",
];

const UNITS: &[&str] = &[
    "h", "hour", "hours", "m", "min", "minute", "minutes", "s", "sec", "second", "seconds",
];

const ZONE_KEYS: &[&str] = &[
    "pin_a",
    "pin_b",
    "default_order",
    "boost_order",
    "boost_duration",
    "boost_unit",
];

fn main() {
    setup_linker();
    validate_zones();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate zones.toml at compile time
fn validate_zones() {
    // Re-run if zones.toml changes
    println!("cargo:rerun-if-changed=zones.toml");

    let config_path = Path::new("zones.toml");

    if !config_path.exists() {
        fail(&["zones.toml not found!", "", "The firmware embeds zones.toml; create one next to Cargo.toml."]);
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail(&["Failed to read zones.toml", "", &format!("Error: {}", e)]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let msg = e.to_string();
            let mut lines = vec!["Invalid TOML syntax in zones.toml", ""];
            lines.extend(msg.lines());
            fail(&lines);
        }
    };

    let errors = check_zones(&config);
    if !errors.is_empty() {
        let mut lines = vec![String::from("Invalid zone definitions in zones.toml"), String::new()];
        lines.extend(errors);
        let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
        fail(&lines);
    }

    // The firmware reads the file with its own parser, which must agree
    if let Err(e) = pilotwire_core::config::parse_zones(&content) {
        fail(&[
            "zones.toml is valid TOML but the firmware cannot read it",
            "",
            &format!("Error: {:?}", e),
            "",
            "Stick to [zone.<name>] tables with plain key = value lines.",
        ]);
    }

    println!("cargo:warning=zones.toml validated successfully");
}

/// Collect every problem in the zone definitions
fn check_zones(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(table) = config.as_table() {
        for key in table.keys() {
            if key != "zone" {
                errors.push(format!("Unknown top-level section [{}]", key));
            }
        }
    }

    let zones = match config.get("zone").and_then(|z| z.as_table()) {
        Some(zones) => zones,
        None => {
            errors.push(String::from("Missing [zone.*] section - at least one zone is required"));
            return errors;
        }
    };

    if zones.len() > MAX_ZONES {
        errors.push(format!("{} zones defined, at most {} supported", zones.len(), MAX_ZONES));
    }

    let mut pin_owner: BTreeMap<i64, String> = BTreeMap::new();

    for (name, zone) in zones {
        if name.len() > 16 {
            errors.push(format!("zone.{}: name longer than 16 characters", name));
        }

        let Some(zone) = zone.as_table() else {
            errors.push(format!("zone.{}: must be a table", name));
            continue;
        };

        for key in zone.keys() {
            if !ZONE_KEYS.contains(&key.as_str()) {
                errors.push(format!("zone.{}: unknown key '{}'", name, key));
            }
        }

        for pin_key in ["pin_a", "pin_b"] {
            match zone.get(pin_key).and_then(|v| v.as_integer()) {
                Some(pin) if (0..=MAX_GPIO).contains(&pin) => {
                    if let Some(owner) = pin_owner.insert(pin, name.clone()) {
                        errors.push(format!("zone.{}: GPIO {} already used by zone.{}", name, pin, owner));
                    }
                }
                Some(pin) => errors.push(format!("zone.{}: {} = {} is not a GPIO (0-{})", name, pin_key, pin, MAX_GPIO)),
                None => errors.push(format!("zone.{}: missing integer {}", name, pin_key)),
            }
        }

        for order_key in ["default_order", "boost_order"] {
            if let Some(value) = zone.get(order_key) {
                match value.as_str() {
                    Some(order) if ORDERS.contains(&order.to_ascii_lowercase().as_str()) => {}
                    _ => errors.push(format!("zone.{}: {} must be one of {:?}", name, order_key, ORDERS)),
                }
            }
        }

        let boost_keys = ["boost_order", "boost_duration", "boost_unit"];
        let present = boost_keys.iter().filter(|k| zone.contains_key(**k)).count();
        if present != 0 && present != boost_keys.len() {
            errors.push(format!("zone.{}: boost needs boost_order, boost_duration and boost_unit", name));
        }

        if let Some(duration) = zone.get("boost_duration") {
            match duration.as_integer() {
                Some(d) if (0..=i64::from(i32::MAX)).contains(&d) => {}
                _ => errors.push(format!("zone.{}: boost_duration must be a non-negative integer", name)),
            }
        }

        if let Some(unit) = zone.get("boost_unit") {
            match unit.as_str() {
                Some(u) if UNITS.contains(&u) => {}
                _ => errors.push(format!("zone.{}: boost_unit must be hours, minutes or seconds", name)),
            }
        }
    }

    errors
}

/// Abort the build with a boxed error message
fn fail(lines: &[&str]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔════════════════════════════════════════════════════════════════════╗\n\
        {}\n\
        ╚════════════════════════════════════════════════════════════════════╝\n",
        body
    );
}
