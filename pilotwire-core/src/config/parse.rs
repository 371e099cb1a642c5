//! Zone file parser
//!
//! Minimal, allocation-free parser for the TOML subset used by the zone
//! file. It does NOT support full TOML.
//!
//! ```toml
//! [zone.living]
//! pin_a = 2
//! pin_b = 3
//! default_order = "eco"        # optional, defaults to frost protection
//! boost_order = "comfort"      # optional start-up boost, all three or none
//! boost_duration = 90
//! boost_unit = "minutes"
//! ```
//!
//! Supported features:
//! - `[zone.<name>]` section headers, name bare or quoted
//! - Key = value pairs, keys bare or quoted
//! - Basic (`"..."`, no escapes) and literal (`'...'`) strings
//! - Integers: decimal with sign and `_` separators, `0x`/`0o`/`0b`
//! - Comments (# ...)

use heapless::Vec;

use super::zone::{Boost, ZoneConfig, ZoneEntry};
use crate::error::ControlError;
use crate::order::Order;
use crate::schedule::PeriodUnit;

/// Maximum zones per zone file
pub const MAX_ZONES: usize = 4;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Section header other than `[zone.<name>]`
    InvalidSection,
    /// Key = value line before any section
    KeyOutsideZone,
    /// Key not recognised in a zone section
    UnknownKey,
    /// Value of the wrong type or out of range
    InvalidValue,
    /// Zone without `pin_a` or `pin_b`
    MissingPin,
    /// Only some of the boost keys present
    IncompleteBoost,
    /// Pin already used by another zone
    PinReused(u8),
    /// More than `MAX_ZONES` zones
    TooManyItems,
    /// Zone rejected by `ZoneConfig` validation
    Zone(ControlError),
}

impl From<ControlError> for ParseError {
    fn from(e: ControlError) -> Self {
        ParseError::Zone(e)
    }
}

/// Zone being assembled while its section is read
struct PendingZone<'a> {
    name: &'a str,
    pin_a: Option<u8>,
    pin_b: Option<u8>,
    default_order: Order,
    boost_order: Option<Order>,
    boost_duration: Option<u32>,
    boost_unit: Option<PeriodUnit>,
}

impl<'a> PendingZone<'a> {
    fn new(name: &'a str) -> Self {
        Self {
            name,
            pin_a: None,
            pin_b: None,
            default_order: Order::FrostProtection,
            boost_order: None,
            boost_duration: None,
            boost_unit: None,
        }
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ParseError> {
        match key {
            "pin_a" => self.pin_a = Some(parse_int(value)?),
            "pin_b" => self.pin_b = Some(parse_int(value)?),
            "default_order" => self.default_order = parse_order(value)?,
            "boost_order" => self.boost_order = Some(parse_order(value)?),
            "boost_duration" => self.boost_duration = Some(parse_int(value)?),
            "boost_unit" => {
                let unit = PeriodUnit::from_name(parse_str(value)?).ok_or(ParseError::InvalidValue)?;
                self.boost_unit = Some(unit);
            }
            _ => return Err(ParseError::UnknownKey),
        }
        Ok(())
    }

    fn finish(self) -> Result<ZoneEntry, ParseError> {
        let pin_a = self.pin_a.ok_or(ParseError::MissingPin)?;
        let pin_b = self.pin_b.ok_or(ParseError::MissingPin)?;

        let config = ZoneConfig::new(pin_a, pin_b)
            .with_default_order(self.default_order)
            .with_name(self.name)?;
        config.validate()?;

        let boost = match (self.boost_order, self.boost_duration, self.boost_unit) {
            (Some(order), Some(duration), Some(unit)) => Some(Boost {
                order,
                duration,
                unit,
            }),
            (None, None, None) => None,
            _ => return Err(ParseError::IncompleteBoost),
        };

        Ok(ZoneEntry { config, boost })
    }
}

/// Parse a zone file into its zone entries
pub fn parse_zones(input: &str) -> Result<Vec<ZoneEntry, MAX_ZONES>, ParseError> {
    let mut zones: Vec<ZoneEntry, MAX_ZONES> = Vec::new();
    let mut current: Option<PendingZone<'_>> = None;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let header = line
                .split('#')
                .next()
                .unwrap_or("")
                .trim_end()
                .strip_prefix('[')
                .and_then(|h| h.strip_suffix(']'))
                .ok_or(ParseError::InvalidSection)?;
            if let Some(zone) = current.take() {
                push_zone(&mut zones, zone.finish()?)?;
            }
            current = Some(PendingZone::new(parse_section_header(header)?));
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        match current.as_mut() {
            Some(zone) => zone.apply(key, value)?,
            None => return Err(ParseError::KeyOutsideZone),
        }
    }

    if let Some(zone) = current.take() {
        push_zone(&mut zones, zone.finish()?)?;
    }

    Ok(zones)
}

fn push_zone(zones: &mut Vec<ZoneEntry, MAX_ZONES>, entry: ZoneEntry) -> Result<(), ParseError> {
    for other in zones.iter() {
        for pin in [entry.config.pin_a, entry.config.pin_b] {
            if pin == other.config.pin_a || pin == other.config.pin_b {
                return Err(ParseError::PinReused(pin));
            }
        }
    }
    zones.push(entry).map_err(|_| ParseError::TooManyItems)
}

/// Parse section header like "zone.living"
fn parse_section_header(header: &str) -> Result<&str, ParseError> {
    let (kind, name) = header.trim().split_once('.').ok_or(ParseError::InvalidSection)?;
    let kind = unquote(kind.trim());
    let name = unquote(name.trim());
    if kind != "zone" || name.is_empty() || name.contains('.') {
        return Err(ParseError::InvalidSection);
    }
    Ok(name)
}

/// Strip one pair of matching `"` or `'` quotes
fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

/// Split `key = value`, dropping any trailing comment
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once('=')?;
    let rest = rest.trim();

    let value = match rest.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let end = rest[1..].find(quote)?;
            let tail = rest[end + 2..].trim();
            if !(tail.is_empty() || tail.starts_with('#')) {
                return None;
            }
            &rest[..end + 2]
        }
        _ => rest.split('#').next().unwrap_or("").trim(),
    };

    Some((unquote(key.trim()), value))
}

fn parse_str(value: &str) -> Result<&str, ParseError> {
    let inner = unquote(value);
    if inner.len() + 2 != value.len() || (value.starts_with('"') && inner.contains('\\')) {
        // Not quoted, or a basic string with escapes
        return Err(ParseError::InvalidValue);
    }
    Ok(inner)
}

fn parse_int<N: TryFrom<i64>>(value: &str) -> Result<N, ParseError> {
    N::try_from(parse_integer(value)?).map_err(|_| ParseError::InvalidValue)
}

/// Parse a TOML integer literal
fn parse_integer(value: &str) -> Result<i64, ParseError> {
    let (negative, unsigned) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") => (16, &unsigned[2..]),
        Some("0o") => (8, &unsigned[2..]),
        Some("0b") => (2, &unsigned[2..]),
        _ => (10, unsigned),
    };

    // No sign on prefixed integers, no leading zeros on decimal ones
    if radix != 10 && unsigned.len() != value.len() {
        return Err(ParseError::InvalidValue);
    }
    if radix == 10 && digits.len() > 1 && digits.starts_with('0') {
        return Err(ParseError::InvalidValue);
    }

    let mut result: i64 = 0;
    let mut after_digit = false;
    for c in digits.chars() {
        if c == '_' {
            // Underscores only between digits
            if !after_digit {
                return Err(ParseError::InvalidValue);
            }
            after_digit = false;
            continue;
        }
        let digit = c.to_digit(radix).ok_or(ParseError::InvalidValue)?;
        result = result
            .checked_mul(i64::from(radix))
            .and_then(|r| r.checked_add(i64::from(digit)))
            .ok_or(ParseError::InvalidValue)?;
        after_digit = true;
    }
    if !after_digit {
        return Err(ParseError::InvalidValue);
    }

    Ok(if negative { -result } else { result })
}

fn parse_order(value: &str) -> Result<Order, ParseError> {
    Order::from_name(parse_str(value)?).ok_or(ParseError::InvalidValue)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Ground floor
[zone.living]
pin_a = 2
pin_b = 3
default_order = "eco"
boost_order = "comfort"   # warm up after power-on
boost_duration = 90
boost_unit = "minutes"

[zone.bedroom]
pin_a = 4
pin_b = 5
"#;

    #[test]
    fn test_parse_sample() {
        let zones = parse_zones(SAMPLE).unwrap();
        assert_eq!(zones.len(), 2);

        let living = &zones[0];
        assert_eq!(living.config.name.as_str(), "living");
        assert_eq!(living.config.pin_a, 2);
        assert_eq!(living.config.pin_b, 3);
        assert_eq!(living.config.default_order, Order::Eco);
        assert_eq!(
            living.boost,
            Some(Boost {
                order: Order::Comfort,
                duration: 90,
                unit: PeriodUnit::Minutes,
            })
        );

        let bedroom = &zones[1];
        assert_eq!(bedroom.config.default_order, Order::FrostProtection);
        assert_eq!(bedroom.boost, None);
    }

    #[test]
    fn test_empty_file() {
        assert!(parse_zones("# nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_missing_pin() {
        let result = parse_zones("[zone.a]\npin_a = 1\n");
        assert_eq!(result.unwrap_err(), ParseError::MissingPin);
    }

    #[test]
    fn test_same_pin_twice_in_zone() {
        let result = parse_zones("[zone.a]\npin_a = 1\npin_b = 1\n");
        assert_eq!(
            result.unwrap_err(),
            ParseError::Zone(ControlError::DuplicatePin(1))
        );
    }

    #[test]
    fn test_pin_reused_across_zones() {
        let input = "[zone.a]\npin_a = 1\npin_b = 2\n[zone.b]\npin_a = 2\npin_b = 3\n";
        assert_eq!(parse_zones(input).unwrap_err(), ParseError::PinReused(2));
    }

    #[test]
    fn test_incomplete_boost() {
        let input = "[zone.a]\npin_a = 1\npin_b = 2\nboost_order = \"comfort\"\n";
        assert_eq!(parse_zones(input).unwrap_err(), ParseError::IncompleteBoost);
    }

    #[test]
    fn test_negative_duration_rejected() {
        let input = "[zone.a]\npin_a = 1\npin_b = 2\nboost_order = \"eco\"\nboost_duration = -5\nboost_unit = \"h\"\n";
        assert_eq!(parse_zones(input).unwrap_err(), ParseError::InvalidValue);
    }

    #[test]
    fn test_invalid_section() {
        assert_eq!(
            parse_zones("[heater.a]\n").unwrap_err(),
            ParseError::InvalidSection
        );
        assert_eq!(parse_zones("[zone]\n").unwrap_err(), ParseError::InvalidSection);
    }

    #[test]
    fn test_key_outside_zone() {
        assert_eq!(parse_zones("pin_a = 1\n").unwrap_err(), ParseError::KeyOutsideZone);
    }

    #[test]
    fn test_unknown_key_and_order() {
        let input = "[zone.a]\npin_a = 1\npin_b = 2\ncolour = \"red\"\n";
        assert_eq!(parse_zones(input).unwrap_err(), ParseError::UnknownKey);

        let input = "[zone.a]\npin_a = 1\npin_b = 2\ndefault_order = \"turbo\"\n";
        assert_eq!(parse_zones(input).unwrap_err(), ParseError::InvalidValue);
    }

    #[test]
    fn test_too_many_zones() {
        let input = "[zone.a]\npin_a = 1\npin_b = 2\n\
                     [zone.b]\npin_a = 3\npin_b = 4\n\
                     [zone.c]\npin_a = 5\npin_b = 6\n\
                     [zone.d]\npin_a = 7\npin_b = 8\n\
                     [zone.e]\npin_a = 9\npin_b = 10\n";
        assert_eq!(parse_zones(input).unwrap_err(), ParseError::TooManyItems);
    }

    #[test]
    fn test_literal_strings() {
        let input = "[zone.a]\npin_a = 1\npin_b = 2\ndefault_order = 'eco'\n\
                     boost_order = 'comfort' # literal\nboost_duration = 1\nboost_unit = 'hours'\n";
        let zones = parse_zones(input).unwrap();
        assert_eq!(zones[0].config.default_order, Order::Eco);
        assert_eq!(zones[0].boost.map(|b| b.order), Some(Order::Comfort));
    }

    #[test]
    fn test_integer_forms() {
        let input = "[zone.a]\npin_a = 0x1A\npin_b = 0o7\nboost_order = \"eco\"\n\
                     boost_duration = 1_000\nboost_unit = \"s\"\n\
                     [zone.b]\npin_a = 0b11\npin_b = +4\n";
        let zones = parse_zones(input).unwrap();
        assert_eq!(zones[0].config.pin_a, 26);
        assert_eq!(zones[0].config.pin_b, 7);
        assert_eq!(zones[0].boost.map(|b| b.duration), Some(1000));
        assert_eq!(zones[1].config.pin_a, 3);
        assert_eq!(zones[1].config.pin_b, 4);
    }

    #[test]
    fn test_malformed_integers() {
        for value in ["01", "1__0", "_1", "1_", "0x", "-0x1", "0xG", "300", ""] {
            assert_eq!(parse_int::<u8>(value), Err(ParseError::InvalidValue), "{}", value);
        }
    }

    #[test]
    fn test_quoted_keys_and_section() {
        let input = "[zone.\"living\"]\n\"pin_a\" = 1\n'pin_b' = 2\n";
        let zones = parse_zones(input).unwrap();
        assert_eq!(zones[0].config.name.as_str(), "living");
        assert_eq!(zones[0].config.pin_a, 1);
        assert_eq!(zones[0].config.pin_b, 2);
    }

    #[test]
    fn test_section_header_comment() {
        let input = "[zone.hall]  # entrance\npin_a = 1\npin_b = 2\n";
        assert_eq!(parse_zones(input).unwrap()[0].config.name.as_str(), "hall");
        assert_eq!(parse_zones("[[zone.a]]\n").unwrap_err(), ParseError::InvalidSection);
    }

    #[test]
    fn test_escapes_rejected() {
        let input = "[zone.a]\npin_a = 1\npin_b = 2\ndefault_order = \"e\\u0063o\"\n";
        assert_eq!(parse_zones(input).unwrap_err(), ParseError::InvalidValue);
    }

    #[test]
    fn test_name_too_long() {
        let input = "[zone.an_unreasonably_long_zone]\npin_a = 1\npin_b = 2\n";
        assert_eq!(
            parse_zones(input).unwrap_err(),
            ParseError::Zone(ControlError::NameTooLong)
        );
    }
}
