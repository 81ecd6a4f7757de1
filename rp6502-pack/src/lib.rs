//! Pixel packers for the RP6502 Picocomputer VGA.
//!
//! The VGA co-processor reads graphics straight out of XRAM, so assets have to be stored in the
//! exact bit layout the hardware expects. This crate converts decoded RGB888 pixels into three of
//! those layouts:
//!
//! - 4bpp tiles, two pixels per byte, one bit per channel ([`consts::TILE_BPP4`])
//! - 16bpp sprites, RGB555 plus an opacity bit ([`consts::SPRITE_BPP16`])
//! - 8bpp indexed bitmaps with a 256 entry palette stored as 16bpp sprite colors
//!   ([`palette::Palette`])
//!
//! # Frame strips
//!
//! Sprite and tile sources are horizontal strips of square frames: the frame size is the image
//! height and the image width must be a multiple of it. Frames are emitted left to right, each in
//! raster order. See [`frames::FrameSet`].
//!
//! Bitmaps ignore the strip layout and are emitted as a single image in raster order.
//!
//! # Black is transparent
//!
//! The 16bpp format reserves `0x0000` as the fully transparent color. Pure black source pixels map
//! to it, so they become transparent. Everything else gets the opacity bit set and is never zero.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "alloc")]
pub mod encode;
#[cfg(feature = "alloc")]
pub mod palette;
#[cfg(feature = "alloc")]
pub mod quantize;

pub mod frames;
pub mod utils;

pub use frames::FrameSet;
#[cfg(feature = "alloc")]
pub use palette::Palette;

/// An RGB888 pixel, `[r, g, b]`.
pub type Rgb888 = [u8; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

pub mod consts {
    /// Packs two horizontally adjacent pixels into one byte.
    ///
    /// ```plain
    /// .- TILE_BPP4 -------------.
    /// |         Byte[0]         |
    /// |  7  6  5  4  3  2  1  0 |
    /// |--+--+--+--+--+--+--+----|
    /// |  0 b1 g1 r1  0 b2 g2 r2 |
    /// `-------------------------`
    /// ```
    ///
    /// - Each channel bit is the most significant bit of the source channel (`c >> 7`). This is a
    ///   threshold, not a palette lookup.
    /// - Pixel 1 is the left pixel and lives in the high nibble.
    /// - Bits 7 and 3 are always zero.
    pub const TILE_BPP4: u8 = 4;

    /// Packs one pixel into a little-endian 16-bit word.
    ///
    /// ```plain
    /// .- SPRITE_BPP16 ----------------------------------------.
    /// |                       u16 (LE)                        |
    /// | 15 14 13 12 11 | 10  9  8  7  6 |  5 |  4  3  2  1  0 |
    /// |----------------+----------------+----+----------------|
    /// |      blue      |     green      |  A |      red       |
    /// `-------------------------------------------------------`
    /// ```
    ///
    /// - Channels are truncated to 5 bits (`c >> 3`), never rounded.
    /// - `A` is the opacity bit and is always set for visible pixels.
    /// - `0x0000` is transparent; pure black source pixels encode to it.
    pub const SPRITE_BPP16: u8 = 16;

    /// One palette index per pixel.
    pub const BITMAP_BPP8: u8 = 8;

    /// Opacity flag of [`SPRITE_BPP16`].
    pub const SPRITE_OPAQUE: u16 = 1 << 5;

    /// The transparent [`SPRITE_BPP16`] value.
    pub const SPRITE_TRANSPARENT: u16 = 0x0000;

    /// Number of entries in a bitmap palette.
    pub const PALETTE_LEN: usize = 256;

    /// Size of a serialized bitmap palette, in bytes.
    pub const PALETTE_BYTES: usize = PALETTE_LEN * 2;

    /// Palette indices kept from the adaptive quantizer.
    pub const QUANTIZED_RANGE: core::ops::Range<usize> = 0..16;

    /// Palette indices overwritten with the grayscale ramp.
    pub const GRAYSCALE_RANGE: core::ops::Range<usize> = 16..32;

    /// Palette indices overwritten with the rainbow spectrum.
    pub const RAINBOW_RANGE: core::ops::Range<usize> = 32..256;

    /// First (darkest) step of the grayscale ramp.
    pub const GRAYSCALE_MIN: u8 = 50;
}
