//! Zone configuration
//!
//! Types describing the zones wired to the board, and the parser for the
//! zone file compiled into the firmware.

pub mod parse;
pub mod zone;

pub use parse::{parse_zones, ParseError, MAX_ZONES};
pub use zone::{Boost, ZoneConfig, ZoneEntry, DEFAULT_ZONE_NAME};
