//! Pilot wire zone controller
//!
//! Owns the two outputs of one zone, the order they currently encode, and
//! the bookkeeping that turns a long temporary order into a chain of
//! bounded timer arms.
//!
//! # Scheduling
//!
//! `change_order` applies the order right away and arms the timer for the
//! first sub-period (see [`crate::schedule`]). Each firing re-arms for the
//! next sub-period until nothing is left, then the zone falls back to its
//! default order:
//!
//! ```text
//! change_order(Comfort, 90, Minutes)
//!   -> arm 3600 s (leftover 30)
//! fire -> arm 1800 s (leftover 0)
//! fire -> to_default()
//! ```
//!
//! Every arm carries a fresh [`ArmToken`]. Superseding a schedule cancels
//! the old arm and bumps the token, so a late firing from the old schedule
//! is recognised and dropped.

use heapless::String;

use crate::config::ZoneConfig;
use crate::error::ControlError;
use crate::listener::ChangeListener;
use crate::order::Order;
use crate::schedule::{PeriodUnit, SubPeriod};
use crate::state::{PinSlot, ZoneState};
use crate::traits::{ArmToken, Level, OneShotTimer, OutputPort};

/// Result of handing a timer firing to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FireOutcome {
    /// Token did not match the pending arm; nothing changed
    Stale,
    /// More time owed; timer armed for the next sub-period
    Rearmed(SubPeriod),
    /// Schedule complete; default order restored
    Reverted,
}

/// Controller for one two-pin pilot wire zone
pub struct HeatingController<P, T, L = fn(&ZoneState)> {
    port: P,
    timer: T,
    listener: Option<L>,
    state: ZoneState,
    /// Last token handed to the timer
    generation: ArmToken,
}

impl<P: OutputPort, T: OneShotTimer> HeatingController<P, T> {
    /// Initialize a zone without a listener
    ///
    /// Both pins are configured as outputs and the default order is applied.
    pub fn new(config: ZoneConfig, port: P, timer: T) -> Result<Self, ControlError> {
        Self::build(config, port, timer, None)
    }
}

impl<P: OutputPort, T: OneShotTimer, L: ChangeListener> HeatingController<P, T, L> {
    /// Initialize a zone with a listener already registered
    ///
    /// The listener sees the initial application of the default order.
    pub fn with_listener(
        config: ZoneConfig,
        port: P,
        timer: T,
        listener: L,
    ) -> Result<Self, ControlError> {
        Self::build(config, port, timer, Some(listener))
    }

    fn build(
        config: ZoneConfig,
        mut port: P,
        timer: T,
        listener: Option<L>,
    ) -> Result<Self, ControlError> {
        config.validate()?;

        port.configure(config.pin_a);
        port.configure(config.pin_b);

        let mut controller = Self {
            port,
            timer,
            listener,
            state: ZoneState {
                pins: [config.pin_a, config.pin_b],
                levels: [Level::Low; 2],
                order: config.default_order,
                default_order: config.default_order,
                name: config.name,
                timestamp: String::new(),
                duration: 0,
                leftover: 0,
                unit: PeriodUnit::default(),
                token: None,
            },
            generation: ArmToken::default(),
        };
        controller.to_default();
        Ok(controller)
    }

    // --- Orders ---

    /// Drive both pins for `order` and notify the listener
    ///
    /// The listener fires even when `order` is already applied.
    pub fn set_order(&mut self, order: Order) {
        let (level_a, level_b) = order.levels();
        self.write_levels(level_a, level_b);
        self.state.order = order;

        if let Some(listener) = self.listener.as_mut() {
            listener.on_change(&self.state);
        }
    }

    /// Apply an order given as its raw code
    ///
    /// Codes outside 0..=3 are rejected without touching the pins or
    /// notifying the listener.
    pub fn set_order_code(&mut self, code: u8) -> Result<(), ControlError> {
        let order = Order::try_from(code)?;
        self.set_order(order);
        Ok(())
    }

    /// Apply `order` for `duration` units, then revert to the default order
    ///
    /// Supersedes any running schedule. A zero duration reverts at once.
    pub fn change_order(
        &mut self,
        order: Order,
        duration: i32,
        unit: PeriodUnit,
    ) -> Result<(), ControlError> {
        let duration = u32::try_from(duration).map_err(|_| ControlError::NegativeDuration(duration))?;

        // Listener sees the new schedule along with the new order
        self.state.duration = duration;
        let sub = self.plan(duration, unit);
        self.set_order(order);
        self.arm(sub);
        Ok(())
    }

    /// Restore the default order and drop any running schedule
    pub fn to_default(&mut self) {
        self.cancel_pending();
        self.state.leftover = 0;
        self.state.duration = 0;
        self.set_order(self.state.default_order);
    }

    // --- Scheduling ---

    /// Arm the timer for the next sub-period of `duration`
    pub(crate) fn schedule_wait(&mut self, duration: u32, unit: PeriodUnit) -> SubPeriod {
        let sub = self.plan(duration, unit);
        self.arm(sub);
        sub
    }

    /// Record the next sub-period of `duration` without arming anything
    fn plan(&mut self, duration: u32, unit: PeriodUnit) -> SubPeriod {
        let sub = SubPeriod::plan(duration, unit);
        self.state.unit = unit;
        self.state.leftover = sub.leftover;
        sub
    }

    /// Arm the timer for `sub`, or revert when there is nothing to wait for
    fn arm(&mut self, sub: SubPeriod) {
        if sub.is_empty() {
            self.to_default();
            return;
        }

        self.cancel_pending();
        self.generation = self.generation.next();
        self.state.token = Some(self.generation);
        self.timer.arm_once(sub.delay_s(), self.generation);
    }

    /// Handle a timer firing carrying `token`
    pub fn on_timer_fired(&mut self, token: ArmToken) -> FireOutcome {
        if self.state.token != Some(token) {
            return FireOutcome::Stale;
        }
        self.state.token = None;

        if self.state.finished() {
            self.to_default();
            FireOutcome::Reverted
        } else {
            let sub = self.schedule_wait(self.state.leftover, self.state.unit);
            FireOutcome::Rearmed(sub)
        }
    }

    fn cancel_pending(&mut self) {
        if self.state.token.take().is_some() {
            self.timer.cancel();
        }
    }

    fn write_levels(&mut self, level_a: Level, level_b: Level) {
        let [pin_a, pin_b] = self.state.pins;
        self.port.write(pin_a, level_a);
        self.state.levels[0] = level_a;
        self.port.write(pin_b, level_b);
        self.state.levels[1] = level_b;
    }

    // --- Listener ---

    /// Register the zone's listener, replacing any previous one
    pub fn on_change(&mut self, listener: L) {
        self.listener = Some(listener);
    }

    /// Remove the zone's listener
    pub fn clear_listener(&mut self) -> Option<L> {
        self.listener.take()
    }

    pub fn listener(&self) -> Option<&L> {
        self.listener.as_ref()
    }

    pub fn listener_mut(&mut self) -> Option<&mut L> {
        self.listener.as_mut()
    }

    // --- Accessors ---

    /// Snapshot of everything observable about the zone
    pub fn state(&self) -> &ZoneState {
        &self.state
    }

    pub fn name(&self) -> &str {
        self.state.name()
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ControlError> {
        self.state.name = String::try_from(name).map_err(|_| ControlError::NameTooLong)?;
        Ok(())
    }

    pub fn order(&self) -> Order {
        self.state.order
    }

    pub fn order_label(&self) -> &'static str {
        self.state.order_label()
    }

    pub fn default_order(&self) -> Order {
        self.state.default_order
    }

    pub fn default_order_label(&self) -> &'static str {
        self.state.default_order_label()
    }

    /// Change the order restored at the end of a schedule
    ///
    /// Takes effect at the next revert; the current order is left alone.
    pub fn set_default_order(&mut self, order: Order) {
        self.state.default_order = order;
    }

    pub fn is_default_order(&self) -> bool {
        self.state.is_default_order()
    }

    pub fn timestamp(&self) -> &str {
        self.state.timestamp()
    }

    pub fn set_timestamp(&mut self, stamp: &str) -> Result<(), ControlError> {
        self.state.timestamp =
            String::try_from(stamp).map_err(|_| ControlError::TimestampTooLong)?;
        Ok(())
    }

    pub fn duration(&self) -> u32 {
        self.state.duration
    }

    pub fn unit(&self) -> PeriodUnit {
        self.state.unit
    }

    pub fn time_leftover(&self) -> u32 {
        self.state.leftover
    }

    pub fn finished(&self) -> bool {
        self.state.finished()
    }

    pub fn pending_token(&self) -> Option<ArmToken> {
        self.state.token
    }

    pub fn pin_value(&self, slot: PinSlot) -> Level {
        self.state.pin_value(slot)
    }

    pub fn pin_label(&self, slot: PinSlot) -> u8 {
        self.state.pin_label(slot)
    }

    /// Access the output port
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Access the timer
    pub fn timer(&self) -> &T {
        &self.timer
    }
}
