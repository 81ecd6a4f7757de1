use crate::{ImageInfo, Rgb888};
use snafu::{ensure, Snafu};

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(module)]
pub enum LayoutError {
    #[snafu(display("Image has no pixels ({width}x{height})"))]
    EmptyImage { width: u32, height: u32 },
    #[snafu(display(
        "Image width ({width}) must be a multiple of height ({height}); input must be a horizontal strip of square frames"
    ))]
    DimensionMismatch { width: u32, height: u32 },
    #[snafu(display("Frame size ({frame_size}) must be even for tile mode"))]
    OddFrameSize { frame_size: u32 },
    #[snafu(display(
        "Specified image dimensions don't match the number of pixels: {width} * {height} == {} pixels, but {pixel_count} pixels were given",
        *width as usize * *height as usize
    ))]
    PixelCountMismatch {
        width: u32,
        height: u32,
        pixel_count: usize,
    },
}

/// Checks that `pixels` holds exactly one pixel per position of a non-empty `width`x`height`
/// image.
pub fn validate_image(width: u32, height: u32, pixels: &[Rgb888]) -> Result<ImageInfo, LayoutError> {
    ensure!(
        width > 0 && height > 0,
        layout_error::EmptyImageSnafu { width, height }
    );

    let info = ImageInfo { width, height };
    ensure!(
        info.pixel_count() == pixels.len(),
        layout_error::PixelCountMismatchSnafu {
            width,
            height,
            pixel_count: pixels.len()
        }
    );

    Ok(info)
}

/// A horizontal strip of square frames.
///
/// The frame size is the image height. Frame `i` covers the columns
/// `i * frame_size..(i + 1) * frame_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSet {
    pub image: ImageInfo,
    pub frame_size: u32,
    pub frame_count: u32,
}

impl FrameSet {
    pub fn new(width: u32, height: u32) -> Result<Self, LayoutError> {
        ensure!(
            width > 0 && height > 0,
            layout_error::EmptyImageSnafu { width, height }
        );
        ensure!(
            width % height == 0,
            layout_error::DimensionMismatchSnafu { width, height }
        );

        Ok(Self {
            image: ImageInfo { width, height },
            frame_size: height,
            frame_count: width / height,
        })
    }

    /// Like [`FrameSet::new`], but also rejects odd frame sizes since tiles consume two pixels per
    /// byte.
    pub fn for_tiles(width: u32, height: u32) -> Result<Self, LayoutError> {
        let frames = Self::new(width, height)?;
        ensure!(
            frames.frame_size % 2 == 0,
            layout_error::OddFrameSizeSnafu {
                frame_size: frames.frame_size
            }
        );

        Ok(frames)
    }

    /// Number of pixels in a single frame.
    pub const fn frame_pixels(&self) -> usize {
        self.frame_size as usize * self.frame_size as usize
    }

    /// Iterates over the rows of every frame: frame by frame, top to bottom.
    ///
    /// Each item is the `frame_size` wide slice of `pixels` for one row of one frame.
    pub fn rows<'a>(&self, pixels: &'a [Rgb888]) -> FrameRows<'a> {
        FrameRows {
            pixels,
            width: self.image.width as usize,
            frame_size: self.frame_size as usize,
            frame_count: self.frame_count as usize,
            frame: 0,
            y: 0,
        }
    }
}

/// Iterator returned by [`FrameSet::rows`].
#[derive(Debug, Clone)]
pub struct FrameRows<'a> {
    pixels: &'a [Rgb888],
    width: usize,
    frame_size: usize,
    frame_count: usize,
    frame: usize,
    y: usize,
}

impl<'a> Iterator for FrameRows<'a> {
    type Item = &'a [Rgb888];

    fn next(&mut self) -> Option<Self::Item> {
        if self.frame >= self.frame_count {
            return None;
        }

        let start = self.y * self.width + self.frame * self.frame_size;
        let row = self.pixels.get(start..start + self.frame_size);

        self.y += 1;
        if self.y == self.frame_size {
            self.y = 0;
            self.frame += 1;
        }

        row
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.frame_count.saturating_sub(self.frame)) * self.frame_size - self.y;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameRows<'_> {}
