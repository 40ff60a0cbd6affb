//! Shared test infrastructure for rgb-indicator integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;

use embassy_time::{Duration, Instant};
use rgb_indicator::{
    DeadlineTimer, FlashTimer, Indicator, IndicatorConfig, LedTransport, Rgb, TimeSource,
    WorkSlot,
};

// ============================================================================
// Mock Clock
// ============================================================================

/// Manually advanced time source
pub struct MockClock {
    now: Cell<Instant>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::from_millis(0)),
        }
    }

    pub fn set(&self, now: Instant) {
        self.now.set(now);
    }

    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration);
    }

    pub fn millis(&self) -> u64 {
        self.now.get().as_millis()
    }
}

impl TimeSource for MockClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

// ============================================================================
// Mock Transport
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteFailed;

/// Transport that records every write, optionally timestamped by a clock
pub struct MockTransport<'a> {
    clock: Option<&'a MockClock>,
    ready: bool,
    failures_left: Cell<u32>,
    current: Option<Rgb>,
    history: heapless::Vec<(u64, Rgb), 256>,
}

impl<'a> MockTransport<'a> {
    pub fn new() -> Self {
        Self {
            clock: None,
            ready: true,
            failures_left: Cell::new(0),
            current: None,
            history: heapless::Vec::new(),
        }
    }

    pub fn with_clock(clock: &'a MockClock) -> Self {
        Self {
            clock: Some(clock),
            ..Self::new()
        }
    }

    pub fn not_ready() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    /// Make the next `count` writes fail
    pub fn fail_next(&self, count: u32) {
        self.failures_left.set(count);
    }

    /// Color currently on the device, `None` if never written successfully
    pub fn current(&self) -> Option<Rgb> {
        self.current
    }

    /// Colors of all write attempts, including failed ones
    pub fn colors(&self) -> heapless::Vec<Rgb, 256> {
        self.history.iter().map(|(_, color)| *color).collect()
    }

    /// Timestamped write attempts
    pub fn history(&self) -> &[(u64, Rgb)] {
        &self.history
    }

    pub fn writes(&self) -> usize {
        self.history.len()
    }
}

impl LedTransport for MockTransport<'_> {
    type Error = WriteFailed;

    fn write(&mut self, color: Rgb) -> Result<(), Self::Error> {
        let at = self.clock.map_or(0, MockClock::millis);
        let _ = self.history.push((at, color));

        let failures = self.failures_left.get();
        if failures > 0 {
            self.failures_left.set(failures - 1);
            return Err(WriteFailed);
        }
        self.current = Some(color);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

// ============================================================================
// Mock Timer
// ============================================================================

/// Timer that only records how it was programmed
pub struct MockTimer {
    armed: Cell<Option<Duration>>,
    starts: heapless::Vec<Duration, 256>,
    stops: usize,
}

impl MockTimer {
    pub fn new() -> Self {
        Self {
            armed: Cell::new(None),
            starts: heapless::Vec::new(),
            stops: 0,
        }
    }

    /// Duration of the pending expiry, if armed
    pub fn armed(&self) -> Option<Duration> {
        self.armed.get()
    }

    pub fn starts(&self) -> &[Duration] {
        &self.starts
    }

    pub fn stops(&self) -> usize {
        self.stops
    }

    /// Consume the pending expiry, as the hardware would when it fires
    pub fn fire(&self) -> Option<Duration> {
        self.armed.take()
    }
}

impl FlashTimer for MockTimer {
    fn start(&mut self, duration: Duration) {
        self.armed.set(Some(duration));
        let _ = self.starts.push(duration);
    }

    fn stop(&mut self) {
        self.armed.set(None);
        self.stops += 1;
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub type MockIndicator<'a> = Indicator<'a, MockTransport<'a>, MockTimer>;

pub fn mock_indicator(slot: &WorkSlot) -> MockIndicator<'_> {
    Indicator::new(
        MockTransport::new(),
        MockTimer::new(),
        slot,
        &IndicatorConfig::default(),
    )
    .unwrap()
}

/// Let the armed mock timer expire and run the deferred transition.
///
/// Returns the duration that had been armed.
pub fn expire(indicator: &mut MockIndicator<'_>, slot: &WorkSlot) -> Duration {
    let armed = indicator.timer().fire().expect("timer is not armed");
    assert!(slot.expiry().notify());
    assert_eq!(indicator.process_pending(), 1);
    armed
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

pub type TimedIndicator<'a> = Indicator<'a, MockTransport<'a>, DeadlineTimer<'a, MockClock>>;

pub fn timed_indicator<'a>(clock: &'a MockClock, slot: &'a WorkSlot) -> TimedIndicator<'a> {
    Indicator::new(
        MockTransport::with_clock(clock),
        DeadlineTimer::new(clock, slot.expiry()),
        slot,
        &IndicatorConfig {
            name: "test",
            blank_on_init: false,
        },
    )
    .unwrap()
}

/// Advance virtual time to `until_ms`, servicing every deadline on the way
/// exactly when it falls due.
pub fn run_until(indicator: &mut TimedIndicator<'_>, clock: &MockClock, until_ms: u64) {
    let until = Instant::from_millis(until_ms);
    while let Some(deadline) = indicator.timer().deadline() {
        if deadline > until {
            break;
        }
        clock.set(deadline);
        assert_eq!(indicator.timer().poll(), None);
        indicator.process_pending();
    }
    clock.set(until);
}
