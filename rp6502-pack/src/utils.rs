use crate::{consts::*, Rgb888};

/// Packs two horizontally adjacent pixels into one [`TILE_BPP4`] byte.
#[inline]
pub const fn tile_bpp4([r1, g1, b1]: Rgb888, [r2, g2, b2]: Rgb888) -> u8 {
    ((b1 >> 7) << 6) | ((g1 >> 7) << 5) | ((r1 >> 7) << 4) | ((b2 >> 7) << 2) | ((g2 >> 7) << 1)
        | (r2 >> 7)
}

/// Packs one pixel into a [`SPRITE_BPP16`] word.
///
/// Pure black becomes [`SPRITE_TRANSPARENT`]. Green is shifted into bits 6..=10, so its top bit
/// occupies bit 10, which a plain RGB555 layout would leave unused.
#[inline]
pub const fn sprite_bpp16([r, g, b]: Rgb888) -> u16 {
    if r == 0 && g == 0 && b == 0 {
        return SPRITE_TRANSPARENT;
    }

    let (r, g, b) = ((r >> 3) as u16, (g >> 3) as u16, (b >> 3) as u16);
    (b << 11) | (g << 6) | r | SPRITE_OPAQUE
}

/// Splits a [`SPRITE_BPP16`] word back into its 5-bit channels.
///
/// Returns `None` for the transparent value.
#[inline]
pub const fn decode_bpp16(pixel: u16) -> Option<[u8; 3]> {
    if pixel == SPRITE_TRANSPARENT {
        return None;
    }

    let r = pixel & 0b0000_0000_0001_1111;
    let g = (pixel >> 6) & 0b1_1111;
    let b = (pixel >> 11) & 0b1_1111;

    Some([r as u8, g as u8, b as u8])
}

/// Converts an HSV color into RGB888. `h`, `s` and `v` are all in `0.0..=1.0`; a hue of `1.0`
/// wraps around to red.
///
/// Channels are truncated, so a fully saturated full-value color always has one channel at `0`
/// and one at `255`.
pub fn hsv_to_rgb888(h: f32, s: f32, v: f32) -> Rgb888 {
    let scale = |c: f32| (c * 255.0) as u8;

    if s == 0.0 {
        return [scale(v); 3];
    }

    let sector = h * 6.0;
    // `as` saturates, the `% 6` handles h == 1.0
    let i = (sector as u32) % 6;
    let f = sector - sector as u32 as f32;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match i {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [scale(r), scale(g), scale(b)]
}
