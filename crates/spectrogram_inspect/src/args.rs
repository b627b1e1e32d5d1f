use crate::{
    constants::{DEFAULT_EPSILON, DEFAULT_OVERLAP_RATIO, DEFAULT_WINDOW_LENGTHS},
    plotting::Colormap,
};
use clap::{
    builder::{PossibleValuesParser, TypedValueParser as _},
    Args, Parser, ValueHint,
};
use log::Level;
use std::path::PathBuf;

/// Logging options.
#[derive(Args, Clone, Debug)]
pub struct LoggingOpt {
    /// The logging level to use.
    #[arg(
        short, long, default_value_t = Level::Info,
        // Needed because enum is foreign so can't use ValueEnum derive.
        value_parser = PossibleValuesParser::new(["trace", "debug", "info", "warn", "error"]).map(|s| s.parse::<Level>().unwrap()),
        ignore_case = true
    )]
    pub log_level: Level,
}

#[derive(Args, Clone, Debug)]
pub struct FileInOpt {
    /// The wav file to inspect.
    #[arg(value_hint = ValueHint::FilePath)]
    pub in_file: PathBuf,
}

/// Renders short time fourier transform magnitude spectrograms of a wav file,
/// one png per window length, for visually inspecting audio that may carry
/// embedded images or text.
#[derive(Parser, Clone, Debug)]
#[command(version)]
pub struct InspectCli {
    #[command(flatten)]
    pub log_opt: LoggingOpt,

    #[command(flatten)]
    pub file_in: FileInOpt,

    /// Window lengths in samples. One spectrogram is rendered per length.
    /// Smaller windows resolve time better, larger windows frequency.
    #[arg(short, long, num_args = 1.., default_values_t = DEFAULT_WINDOW_LENGTHS)]
    pub window_lengths: Vec<usize>,

    /// Fraction of each window shared with its successor.
    #[arg(long, default_value_t = DEFAULT_OVERLAP_RATIO, value_parser = parse_overlap_ratio)]
    pub overlap_ratio: f64,

    /// Additive floor that keeps zero magnitudes off the log singularity.
    /// Changing it moves the visible noise floor of the images.
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    pub epsilon: f64,

    /// The color map used for rasterization.
    #[arg(long, value_enum, default_value_t = Colormap::Viridis)]
    pub colormap: Colormap,
}

/// Overlap must stay below the full window or no step remains.
fn parse_overlap_ratio(s: &str) -> Result<f64, String> {
    let ratio: f64 = s.parse().map_err(|err| format!("{err}"))?;
    if (0.0..1.0).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!("overlap ratio {ratio} is not in [0, 1)"))
    }
}
