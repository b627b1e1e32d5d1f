use crate::{
    bin_width_from_time, fft::window_fn, magnitude_to_db, SpecCompute, StftError, WindowLength,
};
use proptest::{prelude::ProptestConfig, proptest};

/// Generate `sample_cnt` samples of a pure tone.
fn tone(signal_frequency: f32, sample_rate: f32, sample_cnt: usize) -> Vec<f64> {
    let mut data = Vec::new();
    for sample_num in 0..sample_cnt {
        let t = sample_num as f32 / sample_rate;
        data.push((2.0 * std::f32::consts::PI * signal_frequency * t).sin() as f64);
    }
    data
}

#[test]
fn tone_peaks_in_nearest_bin() {
    // 1 kHz tone at 16 kHz sampling with a 1024 sample window lands exactly on bin 64.
    let sample_rate = 16_000.0;
    let signal_frequency = 1_000.0;
    let window_len = WindowLength::from_samples(1024);
    let data = tone(signal_frequency, sample_rate, 16_000);

    let bin_width = bin_width_from_time(sample_rate, window_len.samples());
    let expected_bin = (signal_frequency / bin_width).round() as usize;
    assert_eq!(expected_bin, 64);

    let spec_compute =
        SpecCompute::new(&data, window_len, window_len / 2, window_fn::hann).unwrap();
    let frequency_analysis = spec_compute.stft();

    assert!(frequency_analysis.window_cnt() > 0);
    for window_idx in 0..frequency_analysis.window_cnt() {
        assert_eq!(
            frequency_analysis.peak_bin(window_idx),
            Some(expected_bin),
            "peak off expected bin at window {window_idx}"
        );
    }
}

#[test]
fn silence_floors_at_epsilon_db() {
    let epsilon = 1e-10;
    let data = vec![0.0; 8_000];
    let window_len = WindowLength::from_samples(1024);

    let spec_compute =
        SpecCompute::new(&data, window_len, window_len / 2, window_fn::hann).unwrap();
    let db = spec_compute.stft().to_db(epsilon);

    // Zero magnitude everywhere, so every decibel value is the epsilon floor.
    let floor = magnitude_to_db(0.0, epsilon);
    assert!((floor - -200.0).abs() < 1e-9);
    for transient in &db {
        for &value in transient {
            assert_eq!(value, floor);
        }
    }
}

#[test]
fn window_equal_to_signal_is_single_window() {
    let data = tone(60.0, 1_000.0, 1024);
    let window_len = WindowLength::from_samples(1024);

    let spec_compute =
        SpecCompute::new(&data, window_len, window_len / 2, window_fn::hann).unwrap();
    let frequency_analysis = spec_compute.stft();

    assert_eq!(frequency_analysis.window_cnt(), 1);
    assert_eq!(frequency_analysis.bin_cnt(), 513);
}

#[test]
fn window_longer_than_signal_errors() {
    let data = vec![0.0; 1024];
    let window_len = WindowLength::from_samples(2048);

    let err = SpecCompute::new(&data, window_len, window_len / 2, window_fn::hann).unwrap_err();
    assert_eq!(
        err,
        StftError::WindowExceedsSignal {
            window: 2048,
            signal: 1024
        }
    );
}

#[test]
fn zero_window_errors() {
    let data = vec![0.0; 1024];
    let err = SpecCompute::new(
        &data,
        WindowLength::from_samples(0),
        WindowLength::from_samples(1),
        window_fn::hann,
    )
    .unwrap_err();
    assert_eq!(err, StftError::EmptyWindow);
}

#[test]
fn zero_step_errors() {
    // Overlap equal to the window length leaves no step at all.
    let data = vec![0.0; 1024];
    let window_len = WindowLength::from_samples(256);
    let err = SpecCompute::new(
        &data,
        window_len,
        WindowLength::from_samples(0),
        window_fn::hann,
    )
    .unwrap_err();
    assert_eq!(
        err,
        StftError::InvalidStep {
            step: 0,
            window: 256
        }
    );
}

#[test]
fn step_larger_than_window_errors() {
    let data = vec![0.0; 1024];
    let window_len = WindowLength::from_samples(256);
    let err = SpecCompute::new(
        &data,
        window_len,
        WindowLength::from_samples(512),
        window_fn::hann,
    )
    .unwrap_err();
    assert_eq!(
        err,
        StftError::InvalidStep {
            step: 512,
            window: 256
        }
    );
}

#[test]
fn stft_is_deterministic() {
    let data = tone(440.0, 8_000.0, 8_000);
    let window_len = WindowLength::from_samples(512);

    let first = SpecCompute::new(&data, window_len, window_len / 2, window_fn::hann)
        .unwrap()
        .stft();
    let second = SpecCompute::new(&data, window_len, window_len / 2, window_fn::hann)
        .unwrap()
        .stft();
    assert_eq!(first, second);
}

#[test]
fn peak_bin_out_of_range_is_none() {
    let data = tone(60.0, 1_000.0, 2048);
    let window_len = WindowLength::from_samples(1024);
    let frequency_analysis = SpecCompute::new(&data, window_len, window_len / 2, window_fn::hann)
        .unwrap()
        .stft();
    assert_eq!(
        frequency_analysis.peak_bin(frequency_analysis.window_cnt()),
        None
    );
}

fn test_signal_for_panics(signal_frequency: f32, sample_rate: f32) {
    // Nan and infinity don't describe a physical signal.
    if !signal_frequency.is_finite() || !sample_rate.is_finite() {
        return;
    }
    // Reassign invalid input.
    // Must have positive frequency.
    let mut signal_frequency = signal_frequency.abs();
    // Must have positive sample rate.
    let mut sample_rate = sample_rate.abs();
    // Must have nonzero sample rate.
    if sample_rate <= f32::EPSILON {
        sample_rate = 1.0
    }
    // If signal frequency is 0 the signal will not be detected because time data will be [0.0,0.0,...]
    if signal_frequency <= f32::EPSILON {
        signal_frequency = 1.0
    }
    // Signal frequency must be less than Nyquist frequency
    while signal_frequency > sample_rate / 2.0 {
        signal_frequency /= 2.0
    }

    let data = tone(signal_frequency, sample_rate, 20_000);
    let window_len = WindowLength::from_samples(2usize.pow(3));

    let spec_compute =
        SpecCompute::new(&data, window_len, window_len / 4, window_fn::rectangular).unwrap();
    let frequency_analysis = spec_compute.stft();

    // Check for zero lengths.
    assert!(
        !frequency_analysis.data.is_empty(),
        "No frequencies in frequency analysis."
    );
    for transient in frequency_analysis.data.iter() {
        assert!(!transient.is_empty(), "Transient length is 0.");
    }

    // All magnitudes are finite and non-negative.
    for transient in frequency_analysis.data.iter() {
        for &magnitude in transient {
            assert!(magnitude.is_finite());
            assert!(magnitude >= 0.0);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10))] // Decrease case default from 256 to 10 because these test are slow.
    #[test]
    fn proptest_single_frequency(signal_frequency: f32, sample_rate: f32) {
        test_signal_for_panics(signal_frequency, sample_rate);
    }
}

proptest! {
    #[test]
    fn proptest_db_monotonic(a in 0f64..1e6, b in 0f64..1e6) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        assert!(magnitude_to_db(small, 1e-10) <= magnitude_to_db(large, 1e-10));
    }
}
