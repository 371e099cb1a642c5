//! Hardware abstraction traits
//!
//! These traits define the interface between the zone controller
//! and the board: two digital outputs and a bounded one-shot timer.

pub mod output;
pub mod timer;

pub use output::{Level, OutputPort};
pub use timer::{ArmToken, OneShotTimer};
