//! Board-agnostic core logic for pilot wire heating zones
//!
//! This crate contains all zone logic that does not depend on specific
//! hardware implementations:
//!
//! - Order model and the two-pin waveform table
//! - Duration splitting for the bounded one-shot timer
//! - Zone controller with per-zone change listener
//! - Hardware abstraction traits (output port, one-shot timer)
//! - Zone configuration types and zone file parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod error;
pub mod listener;
pub mod order;
pub mod schedule;
pub mod state;
pub mod traits;

pub use controller::{FireOutcome, HeatingController};
pub use error::ControlError;
pub use listener::ChangeListener;
pub use order::Order;
pub use schedule::{PeriodUnit, SubPeriod};
pub use state::{PinSlot, ZoneState};
