//! Renders magnitude spectrograms of a wav file at several window lengths.
//! Hidden images or text embedded in audio show up at some window length
//! even when they are invisible at others.

use clap::{error::ErrorKind, Parser as _};
use log::info;
use spectrogram_inspect::{
    args::InspectCli,
    file_io::read_wav,
    plotting::{plot_spectogram, RasterOptions},
};
use std::path::PathBuf;
use stft::{bin_width_from_time, fft::window_fn, window_to_time, SpecCompute, WindowLength};

fn main() -> Result<(), anyhow::Error> {
    // Handle commandline arguments. A usage error exits with status 1; help
    // and version keep clap's own exit behavior.
    let opt = match InspectCli::try_parse() {
        Ok(opt) => opt,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };
    simple_logger::init_with_level(opt.log_opt.log_level).unwrap();

    // Read in wav file once. Every window length reuses the same signal.
    let (spec, data) = read_wav(&opt.file_in.in_file)?;
    info!(
        "Loaded {}: {} Hz, {} samples",
        opt.file_in.in_file.display(),
        spec.sample_rate,
        data.len()
    );

    let options = RasterOptions {
        epsilon: opt.epsilon,
        colormap: opt.colormap,
        ..RasterOptions::default()
    };

    for &window_samples in &opt.window_lengths {
        let window_len = WindowLength::from_samples(window_samples);
        let overlap = (window_samples as f64 * opt.overlap_ratio).floor() as usize;
        let window_step = window_len - WindowLength::from_samples(overlap);

        let spec_compute = SpecCompute::new(&data, window_len, window_step, window_fn::hann)?;
        let frequency_analysis = spec_compute.stft();

        // Bin width is `Fs/N` where `Fs` is sampling frequency and `N` is samples.
        let bin_width = bin_width_from_time(spec.sample_rate as f32, window_samples);
        info!(
            "Window of {window_samples} samples: {} bins of {bin_width} Hz across {} windows ({:.2} s)",
            frequency_analysis.bin_cnt(),
            frequency_analysis.window_cnt(),
            window_to_time(
                window_step.samples(),
                frequency_analysis.window_cnt(),
                spec.sample_rate as f32
            ),
        );

        let out_file = PathBuf::from(format!("spect_{window_samples}.png"));
        plot_spectogram(&frequency_analysis, &out_file, &options)?;
        println!("Saved {}", out_file.display());
    }

    println!("Open the pngs in an image viewer and zoom in. If you see text, run OCR on it.");
    Ok(())
}
