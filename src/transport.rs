//! Adapter from `smart-leds` strip drivers to [`LedTransport`].

use smart_leds::SmartLedsWrite;

use crate::LedTransport;
use crate::color::Rgb;

/// Drives a one-pixel strip through any [`SmartLedsWrite`] driver
/// (`ws2812-spi`, `ws2812-pio`, `esp-hal-smartled`, ...).
pub struct SmartLedsTransport<W> {
    driver: W,
}

impl<W> SmartLedsTransport<W> {
    pub const fn new(driver: W) -> Self {
        Self { driver }
    }

    /// Get back the wrapped driver
    pub fn into_inner(self) -> W {
        self.driver
    }
}

impl<W> LedTransport for SmartLedsTransport<W>
where
    W: SmartLedsWrite,
    W::Color: From<Rgb>,
    W::Error: core::fmt::Debug,
{
    type Error = W::Error;

    fn write(&mut self, color: Rgb) -> Result<(), Self::Error> {
        self.driver.write(core::iter::once(color))
    }
}
