//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in pilotwire-core:
//!
//! - Two-pin output port for one zone
//! - GPIO pin adapter for `embedded-hal` 1.0 output pins

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gpio;
pub mod port;

pub use gpio::{HalPin, OutputPin};
pub use port::PinPairPort;
