//! Translation of concentrations into RGB colors
//!
//! Input values are nominally within 0..=1, but are not clamped here. What
//! happens to channel values that do not fit in a byte is governed by the
//! [`ByteCast`] policy.

use clap::ValueEnum;
use data::{grid::Grid, Precision};

/// Mapping from concentration to color
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, ValueEnum)]
pub enum ColorScheme {
    /// Concentration is used as a hue, from red through the rainbow and back
    #[default]
    Colorful,

    /// Like `Colorful`, with the hue running the other way
    ReverseColorful,

    /// Black to red
    Red,

    /// Black to green
    Green,

    /// Black to blue
    Blue,

    /// Red to black
    ReverseRed,

    /// Green to black
    ReverseGreen,

    /// Blue to black
    ReverseBlue,

    /// Black to white
    Grayscale,
}
//
impl ColorScheme {
    /// Every available color scheme
    pub const ALL: [Self; 9] = [
        Self::Colorful,
        Self::ReverseColorful,
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::ReverseRed,
        Self::ReverseGreen,
        Self::ReverseBlue,
        Self::Grayscale,
    ];
}

/// Conversion of out-of-range channel values to bytes
///
/// Channels are computed as floating-point numbers, then truncated towards
/// zero. This policy decides what happens to those that do not fit in 0..=255.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, ValueEnum)]
pub enum ByteCast {
    /// Clamp to 0..=255
    #[default]
    Saturating,

    /// Keep the low 8 bits, so that e.g. 256 becomes 0
    ///
    /// This reproduces the colors of older renderings of this simulation
    /// exactly, including the black pixels at maximal concentration.
    Wrapping,
}
//
impl ByteCast {
    /// Convert a channel value to a byte
    #[inline]
    pub fn cast(self, x: Precision) -> u8 {
        match self {
            Self::Saturating => x as u8,
            Self::Wrapping => x as i64 as u8,
        }
    }
}

/// Color scheme along with its byte conversion policy
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ColorMapper {
    /// Mapping from concentration to color
    pub scheme: ColorScheme,

    /// Handling of channel values that do not fit in a byte
    pub cast: ByteCast,
}
//
impl ColorMapper {
    /// Color of a single concentration value
    pub fn color(&self, value: Precision) -> [u8; 3] {
        let cast = self.cast;
        let channel = |x: Precision| cast.cast(x * 256.0);
        match self.scheme {
            ColorScheme::Colorful => hue_to_rgb(value, cast),
            ColorScheme::ReverseColorful => hue_to_rgb(1.0 - value, cast),
            ColorScheme::Red => [channel(value), 0, 0],
            ColorScheme::Green => [0, channel(value), 0],
            ColorScheme::Blue => [0, 0, channel(value)],
            ColorScheme::ReverseRed => [channel(1.0 - value), 0, 0],
            ColorScheme::ReverseGreen => [0, channel(1.0 - value), 0],
            ColorScheme::ReverseBlue => [0, 0, channel(1.0 - value)],
            ColorScheme::Grayscale => [cast.cast((value * 255.0).round_ties_even()); 3],
        }
    }

    /// Colorize a whole grid into a row-major RGB buffer
    pub fn colorize(&self, grid: &Grid) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(3 * grid.width() * grid.height());
        rgb.extend(grid.iter().flat_map(|&value| self.color(value)));
        rgb
    }
}

/// Colorize a grid with some color scheme, saturating out-of-range channels
pub fn colorize(grid: &Grid, scheme: ColorScheme) -> Vec<u8> {
    ColorMapper {
        scheme,
        ..Default::default()
    }
    .colorize(grid)
}

/// Convert a fully saturated and bright HSV hue, in turns, to RGB
///
/// The hue circle is split into six sectors, within which one channel is at
/// its maximum, one is off, and one ramps linearly. Halfway cases of the
/// ramping channel round to even.
fn hue_to_rgb(hue: Precision, cast: ByteCast) -> [u8; 3] {
    let sector_pos = hue * 6.0;
    let sector_start = sector_pos.floor();
    let sector = (sector_start as i64).rem_euclid(6);
    let frac = sector_pos - sector_start;

    let off = 0;
    let full = 255;
    let rising = cast.cast((frac * 256.0).round_ties_even());
    let falling = cast.cast(((1.0 - frac) * 256.0).round_ties_even());
    match sector {
        0 => [full, rising, off],
        1 => [falling, full, off],
        2 => [off, full, rising],
        3 => [off, falling, full],
        4 => [rising, off, full],
        _ => [full, off, falling],
    }
}
