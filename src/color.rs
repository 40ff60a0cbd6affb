//! Pixel color type and the handful of colors the indicator uses by name.

use smart_leds::RGB8;

pub type Rgb = RGB8;

/// All channels off; the indicator's dark state
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

/// Build a color from individual channel intensities (0 = off, 255 = full)
pub const fn rgb(red: u8, green: u8, blue: u8) -> Rgb {
    Rgb {
        r: red,
        g: green,
        b: blue,
    }
}
