use image::{imageops, imageops::FilterType, RgbImage};
use rp6502_pack::FrameSet;

/// Resamples every frame of a strip to `size`x`size`, keeping the frame order.
///
/// Frames are cropped before scaling so neighbouring frames never bleed into each other.
pub fn resample_frames(image: &RgbImage, frames: &FrameSet, size: u32) -> RgbImage {
    let mut out = RgbImage::new(size * frames.frame_count, size);

    for i in 0..frames.frame_count {
        let frame = imageops::crop_imm(
            image,
            i * frames.frame_size,
            0,
            frames.frame_size,
            frames.frame_size,
        );
        let scaled = imageops::resize(&*frame, size, size, FilterType::CatmullRom);
        imageops::replace(&mut out, &scaled, i64::from(i * size), 0);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn frames_stay_separate() {
        let red = Rgb([255, 0, 0]);
        let blue = Rgb([0, 0, 255]);
        let image = RgbImage::from_fn(8, 4, |x, _| if x < 4 { red } else { blue });
        let frames = FrameSet::new(8, 4).unwrap();

        let out = resample_frames(&image, &frames, 8);
        assert_eq!(out.dimensions(), (16, 8));
        assert!(out.enumerate_pixels().all(|(x, _, &p)| {
            if x < 8 {
                p == red
            } else {
                p == blue
            }
        }));
    }

    #[test]
    fn downscale() {
        let image = RgbImage::from_pixel(96, 32, Rgb([200, 100, 50]));
        let frames = FrameSet::new(96, 32).unwrap();

        let out = resample_frames(&image, &frames, 16);
        assert_eq!(out.dimensions(), (48, 16));
        assert!(out.pixels().all(|&p| p == Rgb([200, 100, 50])));
    }
}
