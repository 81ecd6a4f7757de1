//! The 256 entry bitmap palette.
//!
//! A bitmap palette starts out as whatever the adaptive quantizer produced for the image, padded
//! with black. [`Palette::inject_reserved`] then overwrites fixed ranges:
//!
//! | Indices    | Content                                               |
//! |------------|-------------------------------------------------------|
//! | `0..=15`   | quantized image colors, untouched                     |
//! | `16..=31`  | grayscale ramp from 50 to 255                         |
//! | `32..=255` | fully saturated, full value HSV hue sweep (rainbow)   |
//!
//! The overwrite is unconditional. Quantized colors that landed on indices 16 and up are lost, and
//! pixels pointing at them will display the injected color instead.

use crate::{
    consts::*,
    utils::{hsv_to_rgb888, sprite_bpp16},
    Rgb888,
};
use byteorder::{ByteOrder, LittleEndian};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub entries: [Rgb888; PALETTE_LEN],
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    /// An all-black palette.
    pub const fn new() -> Self {
        Self {
            entries: [[0; 3]; PALETTE_LEN],
        }
    }

    /// Builds a palette from quantizer output. Missing entries are black, extra entries beyond
    /// 256 are dropped.
    pub fn from_colors(colors: &[Rgb888]) -> Self {
        let mut palette = Self::new();
        for (entry, &color) in palette.entries.iter_mut().zip(colors) {
            *entry = color;
        }
        palette
    }

    /// Overwrites the grayscale and rainbow ranges. [`QUANTIZED_RANGE`] is left alone.
    pub fn inject_reserved(&mut self) {
        for (step, entry) in self.entries[GRAYSCALE_RANGE].iter_mut().enumerate() {
            *entry = [grayscale_step(step); 3];
        }

        for (step, entry) in self.entries[RAINBOW_RANGE].iter_mut().enumerate() {
            *entry = rainbow_step(step);
        }
    }

    /// Serializes the palette as 256 little-endian [`SPRITE_BPP16`] words.
    pub fn to_bpp16_bytes(&self) -> [u8; PALETTE_BYTES] {
        let mut out = [0; PALETTE_BYTES];
        for (chunk, &color) in out.chunks_exact_mut(2).zip(&self.entries) {
            LittleEndian::write_u16(chunk, sprite_bpp16(color));
        }
        out
    }
}

/// Gray level of step `step` (`0..16`) of the ramp: 50 at the bottom, 255 at the top.
pub const fn grayscale_step(step: usize) -> u8 {
    let span = (u8::MAX - GRAYSCALE_MIN) as usize;
    let last = GRAYSCALE_RANGE.end - GRAYSCALE_RANGE.start - 1;
    (GRAYSCALE_MIN as usize + step * span / last) as u8
}

/// Color of step `step` (`0..224`) of the rainbow: hue sweeps once around the circle, starting at
/// red.
pub fn rainbow_step(step: usize) -> Rgb888 {
    let len = RAINBOW_RANGE.end - RAINBOW_RANGE.start;
    hsv_to_rgb888(step as f32 / len as f32, 1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_with_black() {
        let palette = Palette::from_colors(&[[1, 2, 3], [4, 5, 6]]);
        assert_eq!(palette.entries[0], [1, 2, 3]);
        assert_eq!(palette.entries[1], [4, 5, 6]);
        assert!(palette.entries[2..].iter().all(|&c| c == [0; 3]));
    }

    #[test]
    fn grayscale_ramp() {
        let palette = {
            let mut p = Palette::new();
            p.inject_reserved();
            p
        };
        let ramp = &palette.entries[GRAYSCALE_RANGE];

        assert_eq!(ramp[0], [50; 3]);
        assert_eq!(ramp[15], [255; 3]);
        assert!(ramp.windows(2).all(|w| w[0][0] <= w[1][0]));
        assert!(ramp.iter().all(|&[r, g, b]| r == g && g == b));
    }

    #[test]
    fn rainbow_is_saturated() {
        let mut palette = Palette::new();
        palette.inject_reserved();

        for (i, &color) in palette.entries[RAINBOW_RANGE].iter().enumerate() {
            let max = color.iter().max().copied();
            let min = color.iter().min().copied();
            // s == 1 means min is zero, v == 1 means max is full
            assert_eq!(max, Some(255), "entry {i}: {color:?}");
            assert_eq!(min, Some(0), "entry {i}: {color:?}");
        }

        assert_eq!(palette.entries[RAINBOW_RANGE.start], [255, 0, 0]);
    }

    #[test]
    fn injection_keeps_quantized_range() {
        let colors: Vec<Rgb888> = (0..=255u8).map(|i| [i, i, 0]).collect();
        let mut palette = Palette::from_colors(&colors);
        palette.inject_reserved();

        for i in QUANTIZED_RANGE {
            assert_eq!(palette.entries[i], colors[i]);
        }
        assert_eq!(palette.entries[16], [50; 3]);
    }

    #[test]
    fn serialized_size() {
        let mut palette = Palette::from_colors(&[[255, 0, 0]]);
        palette.inject_reserved();
        let bytes = palette.to_bpp16_bytes();

        assert_eq!(bytes.len(), 512);
        assert_eq!(&bytes[0..2], &[0x3F, 0x00]);
        // padded black is transparent
        assert_eq!(&bytes[2..4], &[0x00, 0x00]);
    }
}
