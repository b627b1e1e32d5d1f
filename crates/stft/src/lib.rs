//! Crate for finding the Short Time Fourier Transform of a real signal.

use derive_more::{Add, Div, Mul, Sub};
use fft::window_fn::WindowFn;
use thiserror::Error;

/// Relating to frequency analysis ex. dtft and fft.
pub mod fft;

/// A window length. Wraps the number of samples used per transform segment.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Add, Div, Mul, Sub)]
pub struct WindowLength {
    sample_num: usize,
}

impl WindowLength {
    /// [`WindowLength`] constructor.
    #[must_use]
    pub fn from_samples(sample_num: usize) -> Self {
        WindowLength { sample_num }
    }

    /// Getter for samples
    #[must_use]
    pub fn samples(&self) -> usize {
        self.sample_num
    }
}

/// Precondition failures when setting up a spectrogram computation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StftError {
    #[error("window length must be nonzero")]
    EmptyWindow,
    #[error("window of {window} samples does not fit in signal of {signal} samples")]
    WindowExceedsSignal { window: usize, signal: usize },
    #[error("window step of {step} samples must be in 1..={window} (overlap must be less than the window length)")]
    InvalidStep { step: usize, window: usize },
}

/// `window*(time_samples/window)*(1/(time_sample/sec)) = sec`
#[must_use]
pub fn window_to_time(window_step: usize, window_idx: usize, sample_rate: f32) -> f32 {
    window_idx as f32 * window_step as f32 * (1.0 / sample_rate)
}

/// Calculates bin width of a dtft from the number of time samples.
/// Bin width is `Fs/N` where `Fs` is sampling frequency and `N` is samples.
#[must_use]
pub fn bin_width_from_time(sample_rate: f32, sample_cnt: usize) -> f32 {
    sample_rate / sample_cnt as f32
}

/// Converts a number of time samples to frequency samples.
/// N samples to (N/2)+1 samples.
#[must_use]
pub const fn time_samples_to_frequency(time_samples: usize) -> usize {
    (time_samples / 2) + 1
}

/// Converts a magnitude to decibels: `20*log10(magnitude + epsilon)`.
/// The additive `epsilon` keeps zero magnitudes off the log singularity and
/// sets the visible noise floor of a rendered spectrogram.
#[must_use]
pub fn magnitude_to_db(magnitude: f64, epsilon: f64) -> f64 {
    20.0 * (magnitude + epsilon).log10()
}

/// The information required to calculate a spectrograph.
#[derive(Debug)]
pub struct SpecCompute<'a> {
    data: &'a [f64],           // Time domain data. Borrowed so one signal serves many window lengths.
    window_len: WindowLength,  // The length of a window.
    window_step: WindowLength, // The step length used for each successive window.
    window_fn: WindowFn,       // The window function to use.
}

/// The calculated spectrograph.
#[derive(Debug, Clone, PartialEq)]
pub struct Stft {
    data: Vec<Vec<f64>>, // Vector of each frequency's individual time varying amplitude.
}

impl<'a> SpecCompute<'a> {
    /// Basic constructor. Checks the numerical preconditions of the transform:
    /// a nonzero window that fits the signal and a step in `1..=window`.
    pub fn new(
        data: &'a [f64],
        window_len: WindowLength,
        window_step: WindowLength,
        window_fn: WindowFn,
    ) -> Result<Self, StftError> {
        if window_len.samples() == 0 {
            return Err(StftError::EmptyWindow);
        }
        if window_len.samples() > data.len() {
            return Err(StftError::WindowExceedsSignal {
                window: window_len.samples(),
                signal: data.len(),
            });
        }
        if window_step.samples() == 0 || window_step > window_len {
            return Err(StftError::InvalidStep {
                step: window_step.samples(),
                window: window_len.samples(),
            });
        }
        Ok(SpecCompute {
            data,
            window_len,
            window_step,
            window_fn,
        })
    }

    /// Returns the time varying frequency analysis of frequencies.
    /// Outer vec is each frequency. Inner vec is each value per window step.
    #[must_use]
    pub fn stft(&self) -> Stft {
        // Given 2n time samples get n+1 frequency samples.
        let mut result = vec![vec![]; time_samples_to_frequency(self.window_len.samples())];

        // For the shifting window.
        for window_of_data in self
            .data
            // Take a window of samples at a time.
            .windows(self.window_len.samples())
            // Step by the window step.
            .step_by(self.window_step.samples())
        {
            // Apply windowing function.
            let mut window_of_data = window_of_data.to_owned();
            fft::window_fn::apply_window(&mut window_of_data, self.window_fn);

            // Take the fourier transform of the window.
            let freq_data = fft::scaled_real_fft(&mut window_of_data);

            // Add the analysis to the results.
            for (bin_idx, bin_value) in freq_data.into_iter().enumerate() {
                result[bin_idx].push(bin_value.norm());
            }
        }

        Stft { data: result }
    }

    /// Getter for time data
    #[must_use]
    pub fn data(&self) -> &[f64] {
        self.data
    }
}

impl Stft {
    /// Getter for frequency analysis data.
    #[must_use]
    pub fn data(&self) -> &Vec<Vec<f64>> {
        &self.data
    }

    /// Number of frequency bins.
    #[must_use]
    pub fn bin_cnt(&self) -> usize {
        self.data.len()
    }

    /// Number of windows of time.
    #[must_use]
    pub fn window_cnt(&self) -> usize {
        self.data[0].len()
    }

    /// Index of the strongest frequency bin at the given window of time.
    /// [`None`] if the window index is out of range.
    #[must_use]
    pub fn peak_bin(&self, window_idx: usize) -> Option<usize> {
        self.data[0].get(window_idx)?; // Check validity before iteration.
        (0..self.data.len())
            .map(|bin| (bin, self.data[bin][window_idx]))
            .max_by(|x, y| x.1.total_cmp(&y.1))
            .map(|(bin, _)| bin)
    }

    /// Decibel scaled copy of the magnitude matrix. See [`magnitude_to_db`].
    #[must_use]
    pub fn to_db(&self, epsilon: f64) -> Vec<Vec<f64>> {
        self.data
            .iter()
            .map(|transient| {
                transient
                    .iter()
                    .map(|&magnitude| magnitude_to_db(magnitude, epsilon))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
