use crate::{consts::PALETTE_LEN, Rgb888};
use alloc::{collections::BTreeMap, vec::Vec};

/// Output of a [`Quantizer`]: a palette of at most the requested size and one palette index per
/// input pixel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Quantized {
    pub palette: Vec<Rgb888>,
    pub indices: Vec<u8>,
}

/// Reduces an image to a palette of at most `max_colors` (never more than 256) colors.
///
/// Implementations may return fewer colors than requested, e.g. for images that don't have that
/// many distinct colors to begin with.
pub trait Quantizer {
    fn quantize(&self, pixels: &[Rgb888], max_colors: usize) -> Quantized;
}

/// Maps every pixel onto the exact set of colors in the image, in order of first appearance.
///
/// Returns `None` if the image has more than `max_colors` distinct colors.
pub fn exact_palette(pixels: &[Rgb888], max_colors: usize) -> Option<Quantized> {
    let max_colors = max_colors.min(PALETTE_LEN);
    let mut lookup = BTreeMap::new();
    let mut quantized = Quantized {
        palette: Vec::new(),
        indices: Vec::with_capacity(pixels.len()),
    };

    for &pixel in pixels {
        let index = match lookup.get(&pixel) {
            Some(&index) => index,
            None => {
                if quantized.palette.len() == max_colors {
                    return None;
                }
                let index = quantized.palette.len() as u8;
                quantized.palette.push(pixel);
                lookup.insert(pixel, index);
                index
            }
        };
        quantized.indices.push(index);
    }

    Some(quantized)
}

/// The default quantizer: exact colors when they fit, NeuQuant otherwise.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveQuantizer {
    /// NeuQuant sampling factor, `1..=30`. Lower is slower and more accurate.
    pub sample_factor: i32,
}

#[cfg(feature = "std")]
impl Default for AdaptiveQuantizer {
    fn default() -> Self {
        Self { sample_factor: 10 }
    }
}

#[cfg(feature = "std")]
impl Quantizer for AdaptiveQuantizer {
    fn quantize(&self, pixels: &[Rgb888], max_colors: usize) -> Quantized {
        let max_colors = max_colors.clamp(1, PALETTE_LEN);

        if let Some(exact) = exact_palette(pixels, max_colors) {
            return exact;
        }

        let rgba: Vec<u8> = pixels
            .iter()
            .flat_map(|&[r, g, b]| [r, g, b, u8::MAX])
            .collect();
        let nq = color_quant::NeuQuant::new(self.sample_factor, max_colors, &rgba);

        let palette = nq
            .color_map_rgb()
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        let indices = rgba
            .chunks_exact(4)
            .map(|p| nq.index_of(p) as u8)
            .collect();

        Quantized { palette, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_in_first_appearance_order() {
        let pixels = [[9, 9, 9], [1, 1, 1], [9, 9, 9], [5, 0, 0]];
        let q = exact_palette(&pixels, 256).unwrap();

        assert_eq!(q.palette, [[9, 9, 9], [1, 1, 1], [5, 0, 0]]);
        assert_eq!(q.indices, [0, 1, 0, 2]);
    }

    #[test]
    fn exact_gives_up_on_too_many_colors() {
        let pixels: Vec<Rgb888> = (0..=255u8).map(|i| [i, 0, 0]).collect();
        assert!(exact_palette(&pixels, 256).is_some());
        assert!(exact_palette(&pixels, 255).is_none());
    }

    #[test]
    fn adaptive_falls_back_to_neuquant() {
        let pixels: Vec<Rgb888> = (0..64u32)
            .flat_map(|y| (0..64u32).map(move |x| [(x * 4) as u8, (y * 4) as u8, 128]))
            .collect();
        let q = AdaptiveQuantizer::default().quantize(&pixels, 256);

        assert!(q.palette.len() <= 256);
        assert_eq!(q.indices.len(), pixels.len());
        assert!(q
            .indices
            .iter()
            .all(|&i| usize::from(i) < q.palette.len()));
    }

    #[test]
    fn adaptive_keeps_simple_images_exact() {
        let pixels = [[255, 0, 0], [0, 0, 255]];
        let q = AdaptiveQuantizer::default().quantize(&pixels, 256);

        assert_eq!(q.palette, [[255, 0, 0], [0, 0, 255]]);
        assert_eq!(q.indices, [0, 1]);
    }
}
