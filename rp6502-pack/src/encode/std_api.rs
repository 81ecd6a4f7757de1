use crate::{
    encode::IndexedBitmap,
    frames::{validate_image, FrameSet, LayoutError},
    utils::{sprite_bpp16, tile_bpp4},
    Rgb888,
};
use byteorder::{LittleEndian, WriteBytesExt};
use itertools::Itertools;
use snafu::{ResultExt, Snafu};
use std::io::Write;

#[derive(Debug, Snafu)]
pub enum EncodeError {
    #[snafu(context(false), display("{source}"))]
    Layout { source: LayoutError },
    #[snafu(display("Failed to write output: {source}"))]
    WriteIo { source: std::io::Error },
}

/// Streaming version of [`pack_sprites_to_vec`](super::pack_sprites_to_vec).
///
/// The layout is validated before the first write.
pub fn pack_sprites<W: Write>(
    width: u32,
    height: u32,
    pixels: &[Rgb888],
    mut w: W,
) -> Result<FrameSet, EncodeError> {
    validate_image(width, height, pixels)?;
    let frames = FrameSet::new(width, height)?;

    for row in frames.rows(pixels) {
        for &pixel in row {
            w.write_u16::<LittleEndian>(sprite_bpp16(pixel))
                .context(WriteIoSnafu)?;
        }
    }

    Ok(frames)
}

/// Streaming version of [`pack_tiles_to_vec`](super::pack_tiles_to_vec).
pub fn pack_tiles<W: Write>(
    width: u32,
    height: u32,
    pixels: &[Rgb888],
    mut w: W,
) -> Result<FrameSet, EncodeError> {
    validate_image(width, height, pixels)?;
    let frames = FrameSet::for_tiles(width, height)?;

    for row in frames.rows(pixels) {
        for (&a, &b) in row.iter().tuples() {
            w.write_u8(tile_bpp4(a, b)).context(WriteIoSnafu)?;
        }
    }

    Ok(frames)
}

impl IndexedBitmap {
    /// Writes the index plane, one byte per pixel.
    pub fn write_indices<W: Write>(&self, mut w: W) -> Result<(), EncodeError> {
        w.write_all(&self.indices).context(WriteIoSnafu)
    }

    /// Writes the 512 byte palette.
    pub fn write_palette<W: Write>(&self, mut w: W) -> Result<(), EncodeError> {
        w.write_all(&self.palette_bytes()).context(WriteIoSnafu)
    }
}

/// Splits an `[r, g, b, r, g, b, ..]` buffer into pixels, checking it matches the image size.
pub fn pixels_from_rgb_bytes(
    width: u32,
    height: u32,
    bytes: &[u8],
) -> Result<Vec<Rgb888>, LayoutError> {
    let pixels: Vec<Rgb888> = bytes
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect();
    validate_image(width, height, &pixels)?;
    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{pack_sprites_to_vec, pack_tiles_to_vec};

    #[test]
    fn streaming_matches_vec() {
        let pixels: Vec<Rgb888> = (0..32u32 * 16)
            .map(|i| [(i * 7) as u8, (i * 13) as u8, (i * 29) as u8])
            .collect();

        let mut a = Vec::new();
        let mut b = Vec::new();
        pack_sprites_to_vec(32, 16, &pixels, &mut a).unwrap();
        pack_sprites(32, 16, &pixels, &mut b).unwrap();
        assert_eq!(a, b);

        a.clear();
        b.clear();
        pack_tiles_to_vec(32, 16, &pixels, &mut a).unwrap();
        pack_tiles(32, 16, &pixels, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rgb_bytes() {
        let pixels = pixels_from_rgb_bytes(2, 1, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(pixels, [[1, 2, 3], [4, 5, 6]]);
        assert!(pixels_from_rgb_bytes(2, 2, &[1, 2, 3, 4, 5, 6]).is_err());
    }
}
