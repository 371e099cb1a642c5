//! Embassy async tasks
//!
//! Each zone runs a control task and a timer task, linked by channels.

pub mod zone;
pub mod zone_timer;

pub use zone::{zone_task, ZoneController};
pub use zone_timer::zone_timer_task;
