//! Flash sequence state machine
//!
//! Pure bookkeeping: the sequencer never touches hardware. Every entry point
//! returns a [`FlashStep`] describing the pixel write and timer re-arm the
//! caller has to perform, so the counts stay correct even if that write fails.
//!
//! A flash is counted on the lit -> dark edge: one completed "on" pulse is
//! one flash. A bounded sequence therefore goes idle as soon as the last
//! pulse's on-duration elapses, without waiting out the trailing off-duration.

use embassy_time::Duration;

use crate::color::{BLACK, Rgb};

/// Flash count meaning "repeat until cancelled"
pub const CONTINUOUS: u8 = 0;

/// Where the sequence currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashPhase {
    /// No sequence active
    Idle,
    /// Showing the sequence color, waiting for the on-duration
    LitPending,
    /// Dark, waiting for the off-duration
    DarkPending,
}

/// Side effects requested by a state machine step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlashStep {
    /// Color to write to the transport
    pub write: Option<Rgb>,
    /// Duration to arm the timer for
    pub arm: Option<Duration>,
}

impl FlashStep {
    /// Nothing to do
    pub const NONE: Self = Self {
        write: None,
        arm: None,
    };
}

/// Flash sequence state for one indicator
#[derive(Debug, Clone)]
pub struct FlashSequencer {
    color: Rgb,
    /// Zero means no sequence is active
    on_duration: Duration,
    off_duration: Duration,
    flashes_requested: u8,
    flashes_completed: u8,
    flash_state_on: bool,
}

impl FlashSequencer {
    /// Create an idle sequencer
    pub const fn new() -> Self {
        Self {
            color: BLACK,
            on_duration: Duration::from_ticks(0),
            off_duration: Duration::from_ticks(0),
            flashes_requested: 0,
            flashes_completed: 0,
            flash_state_on: false,
        }
    }

    /// Whether a sequence is active (non-zero on-duration)
    pub const fn is_busy(&self) -> bool {
        self.on_duration.as_ticks() != 0
    }

    pub const fn phase(&self) -> FlashPhase {
        if !self.is_busy() {
            FlashPhase::Idle
        } else if self.flash_state_on {
            FlashPhase::LitPending
        } else {
            FlashPhase::DarkPending
        }
    }

    /// Color shown while lit
    pub const fn color(&self) -> Rgb {
        self.color
    }

    pub const fn on_duration(&self) -> Duration {
        self.on_duration
    }

    pub const fn off_duration(&self) -> Duration {
        self.off_duration
    }

    /// Requested pulse count, [`CONTINUOUS`] for an endless sequence
    pub const fn flashes_requested(&self) -> u8 {
        self.flashes_requested
    }

    pub const fn flashes_completed(&self) -> u8 {
        self.flashes_completed
    }

    pub const fn is_continuous(&self) -> bool {
        self.flashes_requested == CONTINUOUS
    }

    /// Start a sequence: show `color` now and wait out `on_duration`.
    ///
    /// The caller is responsible for rejecting the request while busy. A zero
    /// `on_duration` cannot describe an active sequence: the sequencer is left
    /// untouched and nothing is requested.
    pub fn begin(
        &mut self,
        color: Rgb,
        on_duration: Duration,
        off_duration: Duration,
        count: u8,
    ) -> FlashStep {
        if on_duration.as_ticks() == 0 {
            return FlashStep::NONE;
        }

        self.on_duration = on_duration;
        self.off_duration = off_duration;
        self.flashes_requested = count;
        self.flashes_completed = 0;
        self.color = color;
        self.flash_state_on = true;

        FlashStep {
            write: Some(color),
            arm: Some(on_duration),
        }
    }

    /// Handle a timer expiry.
    ///
    /// A no-op while idle, so an expiry that raced a cancellation is harmless.
    pub fn advance(&mut self) -> FlashStep {
        match self.phase() {
            FlashPhase::Idle => FlashStep::NONE,
            FlashPhase::LitPending => self.lit_elapsed(),
            FlashPhase::DarkPending => self.dark_elapsed(),
        }
    }

    /// Return to idle, dropping any active sequence
    pub fn reset(&mut self) {
        self.on_duration = Duration::from_ticks(0);
        self.flashes_requested = 0;
        self.flashes_completed = 0;
        self.flash_state_on = false;
    }

    fn lit_elapsed(&mut self) -> FlashStep {
        self.flash_state_on = false;
        // Continuous runs are never compared against the request, so wrapping is harmless
        self.flashes_completed = self.flashes_completed.wrapping_add(1);

        if self.should_continue() {
            FlashStep {
                write: Some(BLACK),
                arm: Some(self.off_duration),
            }
        } else {
            self.reset();
            FlashStep {
                write: Some(BLACK),
                arm: None,
            }
        }
    }

    fn dark_elapsed(&mut self) -> FlashStep {
        self.flash_state_on = true;
        if self.should_continue() {
            FlashStep {
                write: Some(self.color),
                arm: Some(self.on_duration),
            }
        } else {
            // Guard only: lit_elapsed already ends exhausted runs before going dark
            self.reset();
            FlashStep::NONE
        }
    }

    fn should_continue(&self) -> bool {
        self.is_continuous() || self.flashes_completed < self.flashes_requested
    }
}

impl Default for FlashSequencer {
    fn default() -> Self {
        Self::new()
    }
}
