//! One-shot timer backed by a zone timer task
//!
//! The controller cannot await, so arming only posts a request; the
//! zone's `zone_timer_task` does the waiting and reports back through the
//! zone command channel.

use pilotwire_core::traits::{ArmToken, OneShotTimer};

use crate::channels::{TimerRequest, TIMER_REQUESTS};

/// `OneShotTimer` for the zone at `zone` in the zone table
pub struct ChannelTimer {
    zone: usize,
}

impl ChannelTimer {
    pub fn new(zone: usize) -> Self {
        Self { zone }
    }
}

impl OneShotTimer for ChannelTimer {
    fn arm_once(&mut self, delay_s: u32, token: ArmToken) {
        TIMER_REQUESTS[self.zone].signal(TimerRequest::Arm { delay_s, token });
    }

    fn cancel(&mut self) {
        TIMER_REQUESTS[self.zone].signal(TimerRequest::Cancel);
    }
}
