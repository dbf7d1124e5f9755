//! Reads an audio file or stream, processes it into a waveform image using the given arguments,
//! and writes the image as PNG file.
//!
//! When no input file is given, the audio stream is read from stdin. When no output file is
//! given, the PNG image is written to stdout.

use std::{
    io::{self, Cursor, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use arg::{parse_args, Args};

use waveform::{
    color::{parse_hex_color, ColorFunction},
    colors::SolidColor,
    compute_values, draw_image_with_colors,
    image::{ImageFormat, Rgba, RgbaImage},
    reducer::{peak, rms},
    source::decoder::AudioDecoder,
    ComputeOptions, Error, ImageOptions,
};

// -------------------------------------------------------------------------------------------------

const DEFAULT_LOG_LEVEL: log::Level = if cfg!(debug_assertions) {
    log::Level::Info
} else {
    log::Level::Warn
};

// -------------------------------------------------------------------------------------------------

#[derive(Args, Debug, Default)]
struct Arguments {
    #[arg(short = "i", long = "input")]
    /// Audio file to read. Reads the audio stream from stdin when not set.
    input_path: Option<PathBuf>,
    #[arg(short = "o", long = "output")]
    /// PNG file to write. Writes the image to stdout when not set.
    output_path: Option<PathBuf>,
    #[arg(long = "bg")]
    /// Hex background color of the image (default: #FFFFFF)
    background: Option<String>,
    #[arg(long = "fg")]
    /// Hex foreground color of the image (default: #000000)
    foreground: Option<String>,
    #[arg(long = "alt")]
    /// Hex alternate color of the image (default: foreground color)
    alternate: Option<String>,
    #[arg(long = "fn")]
    /// Function used to color the waveform: solid, stripe, fuzz, gradient or checker (default: solid)
    color_function: Option<ColorFunction>,
    #[arg(short = "r", long = "resolution")]
    /// Number of times audio is read and drawn per second of audio (default: 1)
    resolution: Option<u32>,
    #[arg(short = "x", long = "scale-x")]
    /// Scaling factor for the image's X-axis (default: 1)
    scale_x: Option<u32>,
    #[arg(short = "y", long = "scale-y")]
    /// Scaling factor for the image's Y-axis (default: 1)
    scale_y: Option<u32>,
    #[arg(short = "s", long = "sharpness")]
    /// Curvature which is applied to X-scaled images (default: 1)
    sharpness: Option<u32>,
    #[arg(short = "c", long = "clipping")]
    /// Reduce the waveform's amplitude when the audio reaches clipping thresholds
    clipping: bool,
    #[arg(short = "p", long = "peak")]
    /// Draw peak instead of RMS values
    peak: bool,
    #[arg(short = "l", long = "log-level")]
    /// Set logging level to \"debug\", \"info\", \"warn\" or \"error\".
    /// By default \"info\" in dev builds and \"warn\" in release builds.
    log_level: Option<log::Level>,
}

// -------------------------------------------------------------------------------------------------

fn main() -> ExitCode {
    let args = parse_args::<Arguments>();
    create_logger(args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_decode_error() => {
            log::error!("Failed to decode audio stream: {err}");
            ExitCode::from(1)
        }
        Err(err) => {
            log::error!("Failed to generate waveform: {err}");
            ExitCode::from(2)
        }
    }
}

// -------------------------------------------------------------------------------------------------

fn run(args: &Arguments) -> Result<(), Error> {
    // Colors
    let background = parse_color_arg(args.background.as_deref(), Rgba([255, 255, 255, 255]))?;
    let foreground = parse_color_arg(args.foreground.as_deref(), Rgba([0, 0, 0, 255]))?;
    let alternate = args
        .alternate
        .as_deref()
        .map(parse_hex_color)
        .transpose()?;

    let mut background = SolidColor::new(background);
    let mut foreground = args
        .color_function
        .unwrap_or_default()
        .create(foreground, alternate)?;

    // Options
    let mut compute_options = ComputeOptions::default().resolution(args.resolution.unwrap_or(1));
    compute_options = if args.peak {
        compute_options.reducer(peak)
    } else {
        compute_options.reducer(rms)
    };
    compute_options.validate()?;

    let image_options = ImageOptions::default()
        .scale(args.scale_x.unwrap_or(1), args.scale_y.unwrap_or(1))
        .sharpness(args.sharpness.unwrap_or(1))
        .scale_clipping(args.clipping);
    image_options.validate()?;

    // Decode and compute
    let mut decoder = match &args.input_path {
        Some(path) => AudioDecoder::from_file(path)?,
        None => AudioDecoder::from_reader(io::stdin())?,
    };
    let values = compute_values(&mut decoder, &compute_options)?;

    // Draw and write
    let image =
        draw_image_with_colors(&values, &image_options, &mut background, &mut *foreground)?;
    match &args.output_path {
        Some(path) => write_png_file(&image, path),
        None => write_png_stdout(&image),
    }
}

fn parse_color_arg(arg: Option<&str>, default: Rgba<u8>) -> Result<Rgba<u8>, Error> {
    match arg {
        Some(string) => parse_hex_color(string),
        None => Ok(default),
    }
}

fn write_png_file(image: &RgbaImage, path: &Path) -> Result<(), Error> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|err| Error::IoError(io::Error::other(err)))?;
    log::info!("Wrote waveform image to '{}'", path.display());
    Ok(())
}

fn write_png_stdout(image: &RgbaImage) -> Result<(), Error> {
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|err| Error::IoError(io::Error::other(err)))?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(&png)?;
    stdout.flush()?;
    Ok(())
}

// -------------------------------------------------------------------------------------------------

fn create_logger(log_level: Option<log::Level>) {
    simple_logger::SimpleLogger::new()
        // use default or arg level by default
        .with_level(log_level.unwrap_or(DEFAULT_LOG_LEVEL).to_level_filter())
        // disable logging in chatty modules
        .with_module_level("symphonia_core", log::LevelFilter::Warn)
        .with_module_level("symphonia_format", log::LevelFilter::Warn)
        .init()
        .expect("Failed to set logger");
}
