//! Flash timer abstraction and a portable deadline-based implementation.
//!
//! The indicator arms its timer through [`FlashTimer`]. Whatever fires the
//! expiry (a hardware timer interrupt, an RTOS timer callback, or
//! [`DeadlineTimer::poll`]) must do nothing but call [`TimerExpiry::notify`];
//! the transition itself runs later in task context.

use core::cell::Cell;

use embassy_time::{Duration, Instant};

use crate::work::{Work, WorkSlot};

/// One-shot timer dedicated to a single indicator
pub trait FlashTimer {
    /// Arm the timer to expire once after `duration`, replacing any pending expiry
    fn start(&mut self, duration: Duration);

    /// Disarm the timer; no expiry is delivered afterwards
    fn stop(&mut self);
}

/// Interrupt-safe expiry notification bound to one indicator's work slot.
///
/// This is a lightweight reference that can be copied into an interrupt handler.
#[derive(Clone, Copy)]
pub struct TimerExpiry<'a> {
    slot: &'a WorkSlot,
}

impl<'a> TimerExpiry<'a> {
    pub(crate) const fn new(slot: &'a WorkSlot) -> Self {
        Self { slot }
    }

    /// Submit the pre-bound transition work item.
    ///
    /// Never blocks. Returns `false` if a transition was already pending.
    pub fn notify(&self) -> bool {
        self.slot.post(Work::TimerExpired)
    }
}

/// Source of the current time for [`DeadlineTimer`]
pub trait TimeSource {
    fn now(&self) -> Instant;
}

/// [`TimeSource`] backed by the `embassy-time` driver
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Software one-shot timer polled from the owning task.
///
/// Useful where no dedicated hardware timer is available, and on the host.
/// Call [`poll`](Self::poll) from the task loop; it delivers the expiry
/// through the same [`TimerExpiry`] path a hardware timer would and tells
/// the caller how long it may sleep.
///
/// # Usage
///
/// ```ignore
/// static SLOT: WorkSlot = WorkSlot::new();
///
/// let timer = DeadlineTimer::new(&SystemClock, SLOT.expiry());
/// let mut indicator = Indicator::new(transport, timer, &SLOT, &IndicatorConfig::default())?;
///
/// loop {
///     let sleep = indicator.timer().poll();
///     indicator.process_pending();
///     // Platform-specific sleep, bounded by `sleep`
/// }
/// ```
pub struct DeadlineTimer<'a, S: TimeSource> {
    source: &'a S,
    expiry: TimerExpiry<'a>,
    deadline: Cell<Option<Instant>>,
}

impl<'a, S: TimeSource> DeadlineTimer<'a, S> {
    pub const fn new(source: &'a S, expiry: TimerExpiry<'a>) -> Self {
        Self {
            source,
            expiry,
            deadline: Cell::new(None),
        }
    }

    /// Deliver the expiry if the deadline has passed.
    ///
    /// Returns the time left until the armed deadline, or `None` when the
    /// timer is not armed (including right after it fired).
    pub fn poll(&self) -> Option<Duration> {
        let deadline = self.deadline.get()?;
        let now = self.source.now();
        if now >= deadline {
            self.deadline.set(None);
            self.expiry.notify();
            return None;
        }
        deadline.checked_duration_since(now)
    }

    /// Instant the timer will expire at, if armed
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline.get()
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.get().is_some()
    }
}

impl<S: TimeSource> FlashTimer for DeadlineTimer<'_, S> {
    fn start(&mut self, duration: Duration) {
        let deadline = self
            .source
            .now()
            .checked_add(duration)
            .unwrap_or(Instant::MAX);
        self.deadline.set(Some(deadline));
    }

    fn stop(&mut self) {
        self.deadline.set(None);
    }
}
