use crate::constants::{DEFAULT_EPSILON, RASTER_HEIGHT, RASTER_WIDTH};
use clap::ValueEnum;
use log::info;
use plotters::prelude::*;
use std::path::Path;
use stft::Stft;

/// Color maps available for rasterization.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Colormap {
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Cividis,
    Turbo,
    Greys,
}

impl Colormap {
    fn gradient(self) -> colorous::Gradient {
        match self {
            Colormap::Viridis => colorous::VIRIDIS,
            Colormap::Plasma => colorous::PLASMA,
            Colormap::Inferno => colorous::INFERNO,
            Colormap::Magma => colorous::MAGMA,
            Colormap::Cividis => colorous::CIVIDIS,
            Colormap::Turbo => colorous::TURBO,
            Colormap::Greys => colorous::GREYS,
        }
    }
}

/// How a decibel matrix becomes an image.
#[derive(Clone, Debug)]
pub struct RasterOptions {
    /// Additive floor for the decibel conversion.
    pub epsilon: f64,
    /// Color map applied to the normalized decibel values.
    pub colormap: Colormap,
    /// Output raster width in pixels.
    pub width: u32,
    /// Output raster height in pixels.
    pub height: u32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        RasterOptions {
            epsilon: DEFAULT_EPSILON,
            colormap: Colormap::Viridis,
            width: RASTER_WIDTH,
            height: RASTER_HEIGHT,
        }
    }
}

/// Plot 2d spectogram as a png. Time runs left to right and low frequencies
/// render at the bottom. No axes, captions, or padding are drawn.
pub fn plot_spectogram(
    stft: &Stft,
    out_file: &Path,
    options: &RasterOptions,
) -> anyhow::Result<()> {
    let data = stft.to_db(options.epsilon);

    // Find max and min of data
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    for transient in data.iter() {
        for datapoint in transient {
            max = datapoint.max(max);
            min = datapoint.min(min);
        }
    }
    info!("Max of plot is {max}");
    info!("Min of plot is {min}");

    let bin_cnt = data.len();
    let window_cnt = data[0].len();
    let gradient = options.colormap.gradient();

    // All drawing happens in memory. The png is emitted by the single
    // `present` call at the end, so a failure part way through leaves no
    // partially written output file behind.
    let root = BitMapBackend::new(out_file, (options.width, options.height)).into_drawing_area();
    for x in 0..options.width {
        let window_idx = (x as usize * window_cnt) / options.width as usize;
        for y in 0..options.height {
            // Flip so bin 0 (lowest frequency) lands on the bottom row.
            let bin_idx = bin_cnt - 1 - (y as usize * bin_cnt) / options.height as usize;
            // Normalize to the observed decibel range. A constant matrix
            // (pure silence) maps everything to the gradient floor.
            let t = if max > min {
                (data[bin_idx][window_idx] - min) / (max - min)
            } else {
                0.0
            };
            let color = gradient.eval_continuous(t);
            root.draw_pixel((x as i32, y as i32), &RGBColor(color.r, color.g, color.b))?;
        }
    }
    root.present()?;
    info!("Successfully saved spectogram to {}", out_file.display());
    Ok(())
}
