use argh::FromArgs;
use image::RgbImage;
use rp6502_pack::{
    encode::{pack_bitmap, pack_sprites, pack_tiles, pixels_from_rgb_bytes, EncodeError},
    frames::LayoutError,
    quantize::AdaptiveQuantizer,
    FrameSet,
};
use snafu::{ensure, ResultExt, Snafu};
use std::{
    fmt,
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{info, warn};

pub mod resample;

/// Widest strip `--size` may produce.
pub const MAX_STRIP_WIDTH: u32 = u16::MAX as u32;

/// Convert horizontal sprite strips and bitmaps to RP6502 binary data.
#[derive(FromArgs, Debug)]
pub struct Cli {
    /// input image, a horizontal strip of square frames (PNG, BMP, TIFF or JPEG)
    #[argh(positional)]
    pub input: PathBuf,

    /// output file, defaults to the input path with a `.bin` extension
    #[argh(option, short = 'o')]
    pub output: Option<PathBuf>,

    /// sprite (16-bit), tile (4-bit) or bitmap (8-bit indexed plus `_pal.bin` palette)
    #[argh(option, default = "Mode::Sprite")]
    pub mode: Mode,

    /// resample every frame to SIZE x SIZE pixels before packing (sprite and tile modes)
    #[argh(option)]
    pub size: Option<u32>,
}

impl Cli {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("bin"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Sprite,
    Tile,
    Bitmap,
}

impl FromStr for Mode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        #[rustfmt::skip]
        let Some(mode) = s.eq_ignore_ascii_case("sprite").then_some(Mode::Sprite)
               .or_else(|| s.eq_ignore_ascii_case("tile").then_some(Mode::Tile))
               .or_else(|| s.eq_ignore_ascii_case("bitmap").then_some(Mode::Bitmap))
        else { return Err("expected one of: sprite, tile, bitmap"); };

        Ok(mode)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Sprite => "sprite",
            Mode::Tile => "tile",
            Mode::Bitmap => "bitmap",
        })
    }
}

#[derive(Debug, Snafu)]
pub enum ConvertError {
    #[snafu(display("File '{}' not found", path.display()))]
    InputNotFound { path: PathBuf },
    #[snafu(display("Failed to read '{}': {source}", path.display()))]
    Read { path: PathBuf, source: io::Error },
    #[snafu(display("Failed to decode '{}': {source}", path.display()))]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[snafu(display(
        "Frame size {size} is out of range for {frame_count} frames (1..={MAX_STRIP_WIDTH} pixels wide in total)"
    ))]
    InvalidSize { size: u32, frame_count: u32 },
    #[snafu(context(false), display("{source}"))]
    Layout { source: LayoutError },
    #[snafu(context(false), display("{source}"))]
    Pack { source: EncodeError },
    #[snafu(display("Failed to write '{}': {source}", path.display()))]
    Write { path: PathBuf, source: io::Error },
}

/// Path of the palette written next to a bitmap: `<output stem>_pal.bin`.
pub fn palette_path(output: &Path) -> PathBuf {
    let stem = output.file_stem().unwrap_or_default().to_string_lossy();
    output.with_file_name(format!("{stem}_pal.bin"))
}

/// Decodes any supported image file into RGB888. Alpha is dropped.
pub fn load_rgb(path: &Path) -> Result<RgbImage, ConvertError> {
    let reader = match image::io::Reader::open(path) {
        Ok(reader) => reader,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return InputNotFoundSnafu { path }.fail();
        }
        Err(e) => return Err(e).context(ReadSnafu { path }),
    };

    let image = reader
        .with_guessed_format()
        .context(ReadSnafu { path })?
        .decode()
        .context(DecodeSnafu { path })?;

    Ok(image.into_rgb8())
}

/// Runs one conversion. Layouts are validated before the output file is created.
pub fn convert(cli: &Cli) -> Result<(), ConvertError> {
    let output = cli.output_path();
    let image = load_rgb(&cli.input)?;

    info!("Processing: {}", cli.input.display());

    match cli.mode {
        Mode::Sprite | Mode::Tile => convert_frames(cli, image, &output),
        Mode::Bitmap => convert_bitmap(cli, image, &output),
    }
}

fn convert_frames(cli: &Cli, image: RgbImage, output: &Path) -> Result<(), ConvertError> {
    let (width, height) = image.dimensions();
    let frames = FrameSet::new(width, height)?;

    info!(
        "Dimensions: {width}x{height} -> {} frames of {size}x{size}",
        frames.frame_count,
        size = frames.frame_size
    );

    let image = match cli.size {
        Some(size) if size != frames.frame_size => {
            let frame_count = frames.frame_count;
            ensure!(
                size > 0
                    && size
                        .checked_mul(frame_count)
                        .map_or(false, |width| width <= MAX_STRIP_WIDTH),
                InvalidSizeSnafu { size, frame_count }
            );
            info!("Resampling frames to {size}x{size}");
            resample::resample_frames(&image, &frames, size)
        }
        _ => image,
    };

    let (width, height) = image.dimensions();
    let pixels = pixels_from_rgb_bytes(width, height, image.as_raw())?;
    // odd frame sizes must fail before the output file exists
    if cli.mode == Mode::Tile {
        FrameSet::for_tiles(width, height)?;
    }

    info!("Output:     {} [{}]", output.display(), cli.mode);

    let mut w = create(output)?;
    match cli.mode {
        Mode::Tile => pack_tiles(width, height, &pixels, &mut w)?,
        _ => pack_sprites(width, height, &pixels, &mut w)?,
    };
    w.flush().context(WriteSnafu { path: output })?;

    info!("Done.");
    Ok(())
}

fn convert_bitmap(cli: &Cli, image: RgbImage, output: &Path) -> Result<(), ConvertError> {
    if cli.size.is_some() {
        warn!("--size is ignored in bitmap mode");
    }

    let (width, height) = image.dimensions();
    let pixels = pixels_from_rgb_bytes(width, height, image.as_raw())?;
    let bitmap = pack_bitmap(width, height, &pixels, &AdaptiveQuantizer::default())?;

    info!(
        "Dimensions: {width}x{height}, {} colors after quantization, {} kept",
        bitmap.quantized_colors,
        bitmap.preserved_colors()
    );
    match bitmap.used_range {
        Some((min, u8::MAX)) => info!("Used palette indices {min}..=255, none are free"),
        Some((min, max)) => info!(
            "Used palette indices {min}..={max}, indices {}..=255 are free",
            max + 1
        ),
        None => {}
    }

    let palette = palette_path(output);
    info!(
        "Output:     {} + {} [{}]",
        output.display(),
        palette.display(),
        cli.mode
    );

    let mut w = create(output)?;
    bitmap.write_indices(&mut w)?;
    w.flush().context(WriteSnafu { path: output })?;

    let mut w = create(&palette)?;
    bitmap.write_palette(&mut w)?;
    w.flush().context(WriteSnafu { path: &palette })?;

    info!("Done.");
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>, ConvertError> {
    File::create(path)
        .map(BufWriter::new)
        .context(WriteSnafu { path })
}
