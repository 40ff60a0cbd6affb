#![no_std]

pub mod color;
pub mod error;
pub mod indicator;
pub mod sequencer;
pub mod timer;
pub mod transport;
pub mod work;

pub use color::{BLACK, BLUE, GREEN, RED, Rgb, WHITE, rgb};
pub use error::Error;
pub use indicator::{Indicator, IndicatorConfig};
pub use sequencer::{CONTINUOUS, FlashPhase, FlashSequencer, FlashStep};
pub use timer::{DeadlineTimer, FlashTimer, SystemClock, TimeSource, TimerExpiry};
pub use transport::SmartLedsTransport;
pub use work::{Work, WorkSlot};

pub use embassy_time::{Duration, Instant};

/// Abstract pixel transport
///
/// Implement this trait to drive the physical indicator (WS2812 over SPI,
/// RMT, PIO, ...). The indicator writes exactly one pixel per call and only
/// from the task context, so implementations may block.
pub trait LedTransport {
    /// Error reported by a failed write
    type Error: core::fmt::Debug;

    /// Write a single pixel color to the device
    fn write(&mut self, color: Rgb) -> Result<(), Self::Error>;

    /// Whether the underlying device is ready to accept writes
    fn is_ready(&self) -> bool {
        true
    }
}
