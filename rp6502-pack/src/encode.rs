use crate::{
    consts::*,
    frames::{validate_image, FrameSet, LayoutError},
    palette::Palette,
    quantize::Quantizer,
    utils::{sprite_bpp16, tile_bpp4},
    ImageInfo, Rgb888,
};
use alloc::vec::Vec;
use itertools::{Itertools, MinMaxResult};

#[cfg(feature = "std")]
mod std_api;
#[cfg(feature = "std")]
pub use std_api::*;

/// Packs a strip of square frames into [`SPRITE_BPP16`] words, appending them to `w`.
///
/// Writes `width * height * 2` bytes. Nothing is written if the layout is invalid.
pub fn pack_sprites_to_vec(
    width: u32,
    height: u32,
    pixels: &[Rgb888],
    w: &mut Vec<u8>,
) -> Result<FrameSet, LayoutError> {
    validate_image(width, height, pixels)?;
    let frames = FrameSet::new(width, height)?;

    w.reserve(frames.frame_pixels() * frames.frame_count as usize * 2);
    for row in frames.rows(pixels) {
        for &pixel in row {
            w.extend_from_slice(&sprite_bpp16(pixel).to_le_bytes());
        }
    }

    Ok(frames)
}

/// Packs a strip of square frames into [`TILE_BPP4`] bytes, appending them to `w`.
///
/// Writes `width * height / 2` bytes. Nothing is written if the layout is invalid or the frame
/// size is odd.
pub fn pack_tiles_to_vec(
    width: u32,
    height: u32,
    pixels: &[Rgb888],
    w: &mut Vec<u8>,
) -> Result<FrameSet, LayoutError> {
    validate_image(width, height, pixels)?;
    let frames = FrameSet::for_tiles(width, height)?;

    w.reserve(pixels.len() / 2);
    for row in frames.rows(pixels) {
        w.extend(row.iter().tuples().map(|(&a, &b)| tile_bpp4(a, b)));
    }

    Ok(frames)
}

/// An image converted to [`BITMAP_BPP8`] indices plus its injected palette.
#[derive(Debug, Clone)]
pub struct IndexedBitmap {
    pub image: ImageInfo,
    /// One palette index per pixel, raster order.
    pub indices: Vec<u8>,
    pub palette: Palette,
    /// Number of colors the quantizer returned, before padding.
    pub quantized_colors: usize,
    /// Lowest and highest index used by any pixel. Indices above the maximum were free for
    /// injection.
    pub used_range: Option<(u8, u8)>,
}

impl IndexedBitmap {
    /// The serialized palette, 512 bytes.
    pub fn palette_bytes(&self) -> [u8; PALETTE_BYTES] {
        self.palette.to_bpp16_bytes()
    }

    /// Number of quantized colors that survive injection. Only [`QUANTIZED_RANGE`] is kept.
    pub fn preserved_colors(&self) -> usize {
        self.quantized_colors.min(QUANTIZED_RANGE.end)
    }

    /// Looks every pixel up in the palette, i.e. what the hardware will display.
    pub fn resolve(&self) -> impl Iterator<Item = Rgb888> + '_ {
        self.indices
            .iter()
            .map(|&i| self.palette.entries[usize::from(i)])
    }
}

/// Quantizes the whole image (frames are ignored) and injects the reserved palette ranges.
///
/// Any non-empty rectangle is accepted.
pub fn pack_bitmap(
    width: u32,
    height: u32,
    pixels: &[Rgb888],
    quantizer: &impl Quantizer,
) -> Result<IndexedBitmap, LayoutError> {
    let image = validate_image(width, height, pixels)?;

    let quantized = quantizer.quantize(pixels, PALETTE_LEN);
    let quantized_colors = quantized.palette.len();
    let mut palette = Palette::from_colors(&quantized.palette);

    let used_range = match quantized.indices.iter().minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(&i) => Some((i, i)),
        MinMaxResult::MinMax(&min, &max) => Some((min, max)),
    };

    palette.inject_reserved();

    Ok(IndexedBitmap {
        image,
        indices: quantized.indices,
        palette,
        quantized_colors,
        used_range,
    })
}
