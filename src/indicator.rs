//! Public indicator API
//!
//! [`Indicator`] bundles one indicator's sequencer state, its transport, its
//! dedicated timer and its work slot. Commands run synchronously in the
//! caller's context; timer expiries are picked up by
//! [`process_pending`](Indicator::process_pending) in the owning task.

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::LedTransport;
use crate::color::{BLACK, Rgb, rgb};
use crate::error::Error;
use crate::sequencer::{CONTINUOUS, FlashPhase, FlashSequencer, FlashStep};
use crate::timer::FlashTimer;
use crate::work::{Work, WorkSlot};

/// Configuration for an indicator instance
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    /// Label used in log output
    pub name: &'static str,
    /// Write black to the transport during bring-up
    pub blank_on_init: bool,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            name: "rgbi",
            blank_on_init: true,
        }
    }
}

/// A single addressable RGB indicator
pub struct Indicator<'a, T: LedTransport, C: FlashTimer> {
    // External dependencies and configuration
    transport: T,
    timer: C,
    work: &'a WorkSlot,
    name: &'static str,

    // Internal state
    sequencer: FlashSequencer,
    fault: Option<T::Error>,
}

impl<'a, T: LedTransport, C: FlashTimer> Indicator<'a, T, C> {
    /// Bring up an indicator on `transport`.
    ///
    /// `timer` must deliver its expiries through `work.expiry()`. Fails with
    /// [`Error::DeviceNotReady`] if the transport is not ready.
    pub fn new(
        transport: T,
        timer: C,
        work: &'a WorkSlot,
        config: &IndicatorConfig,
    ) -> Result<Self, Error<T::Error>> {
        if !transport.is_ready() {
            #[cfg(feature = "esp32-log")]
            println!("[Indicator.new] {}: led transport not ready", config.name);
            return Err(Error::DeviceNotReady);
        }

        // Leftover from a previous owner of the slot
        work.discard();

        let mut indicator = Self {
            transport,
            timer,
            work,
            name: config.name,
            sequencer: FlashSequencer::new(),
            fault: None,
        };
        if config.blank_on_init {
            indicator.write(BLACK)?;
        }
        #[cfg(feature = "esp32-log")]
        println!("[Indicator.new] {}: ready", config.name);
        Ok(indicator)
    }

    /// Display `color` immediately.
    ///
    /// Works even during a flash sequence: the color is overridden until the
    /// sequence's next step, its timing is not affected.
    pub fn set_color(&mut self, color: Rgb) -> Result<(), Error<T::Error>> {
        self.write(color)
    }

    /// Display a color given as individual channel intensities
    pub fn set_color_from_pixels(
        &mut self,
        red: u8,
        green: u8,
        blue: u8,
    ) -> Result<(), Error<T::Error>> {
        self.set_color(rgb(red, green, blue))
    }

    /// Turn the indicator off. Rejected while a flash sequence is active.
    pub fn off(&mut self) -> Result<(), Error<T::Error>> {
        if self.is_busy() {
            return Err(Error::Busy);
        }
        self.set_color(BLACK)
    }

    /// Start a flash sequence of `count` on-pulses.
    ///
    /// A `count` of [`CONTINUOUS`] keeps flashing until [`cancel`](Self::cancel).
    ///
    /// Returns immediately after showing the first pulse. If that first write
    /// fails the sequence still runs and the transport error is returned.
    pub fn flash(
        &mut self,
        color: Rgb,
        on_duration: Duration,
        off_duration: Duration,
        count: u8,
    ) -> Result<(), Error<T::Error>> {
        if self.is_busy() {
            return Err(Error::Busy);
        }
        if on_duration.as_ticks() == 0 {
            return Err(Error::ZeroDuration);
        }

        // Idle, so anything still queued belongs to a finished sequence
        self.work.discard();

        #[cfg(feature = "esp32-log")]
        println!(
            "[Indicator.flash] {}: {:?} on={}ms off={}ms count={}",
            self.name,
            color,
            on_duration.as_millis(),
            off_duration.as_millis(),
            count
        );
        let step = self.sequencer.begin(color, on_duration, off_duration, count);
        self.apply(step)
    }

    /// Start a flash sequence that runs until cancelled
    pub fn flash_continuous(
        &mut self,
        color: Rgb,
        on_duration: Duration,
        off_duration: Duration,
    ) -> Result<(), Error<T::Error>> {
        self.flash(color, on_duration, off_duration, CONTINUOUS)
    }

    /// Stop any flash sequence and turn the indicator off.
    ///
    /// Always leaves the indicator idle with no expiry outstanding; only the
    /// final off write can fail.
    pub fn cancel(&mut self) -> Result<(), Error<T::Error>> {
        self.timer.stop();
        self.work.discard();
        #[cfg(feature = "esp32-log")]
        if self.sequencer.is_busy() {
            println!(
                "[Indicator.cancel] {}: cancelled after {} flashes",
                self.name,
                self.sequencer.flashes_completed()
            );
        }
        self.sequencer.reset();
        self.write(BLACK)
    }

    /// Whether a flash sequence is active
    pub fn is_busy(&self) -> bool {
        self.sequencer.is_busy()
    }

    /// Run the transitions for all pending timer expiries.
    ///
    /// Call from the task that owns the indicator whenever the timer may have
    /// fired. Returns the number of transitions executed.
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Some(work) = self.work.take() {
            match work {
                Work::TimerExpired => self.on_timer_expired(),
            }
            processed += 1;
        }
        processed
    }

    /// Advance the sequence after the timer elapsed
    fn on_timer_expired(&mut self) {
        let step = self.sequencer.advance();
        // No caller to report to; keep it for take_fault
        if let Err(Error::Transport(err)) = self.apply(step) {
            #[cfg(feature = "esp32-log")]
            println!(
                "[Indicator.on_timer_expired] {}: transport write failed: {:?}",
                self.name, err
            );
            self.fault = Some(err);
        }

        #[cfg(feature = "esp32-log")]
        if step.arm.is_none() && step.write.is_some() {
            println!("[Indicator.on_timer_expired] {}: sequence complete", self.name);
        }
    }

    /// Perform the side effects of a sequencer step.
    ///
    /// The timer is re-armed even if the write fails.
    fn apply(&mut self, step: FlashStep) -> Result<(), Error<T::Error>> {
        let written = match step.write {
            Some(color) => self.write(color),
            None => Ok(()),
        };
        if let Some(duration) = step.arm {
            self.timer.start(duration);
        }
        written
    }

    fn write(&mut self, color: Rgb) -> Result<(), Error<T::Error>> {
        self.transport.write(color).map_err(Error::Transport)
    }

    /// Take the last transport failure from a deferred transition
    pub fn take_fault(&mut self) -> Option<T::Error> {
        self.fault.take()
    }

    /// Current position in the flash sequence
    pub fn phase(&self) -> FlashPhase {
        self.sequencer.phase()
    }

    /// Color shown during the lit part of the current (or last) sequence
    pub fn sequence_color(&self) -> Rgb {
        self.sequencer.color()
    }

    /// Lit interval of the active sequence, zero while idle
    pub fn on_duration(&self) -> Duration {
        self.sequencer.on_duration()
    }

    /// Dark interval of the current (or last) sequence
    pub fn off_duration(&self) -> Duration {
        self.sequencer.off_duration()
    }

    /// Requested pulse count, [`CONTINUOUS`] for an endless sequence
    pub fn flashes_requested(&self) -> u8 {
        self.sequencer.flashes_requested()
    }

    /// Pulses finished so far in the active sequence
    pub fn flashes_completed(&self) -> u8 {
        self.sequencer.flashes_completed()
    }

    /// Label from [`IndicatorConfig::name`]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Get a reference to the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a reference to the timer
    pub fn timer(&self) -> &C {
        &self.timer
    }

    /// Tear down the indicator, handing back its transport and timer.
    ///
    /// The timer is stopped and any pending expiry discarded; the pixel is
    /// left as it is.
    pub fn release(mut self) -> (T, C) {
        self.timer.stop();
        self.work.discard();
        (self.transport, self.timer)
    }
}
