use anyhow::{ensure, Context};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Read data from a wav file. Multichannel audio is down-mixed to mono by
/// averaging each frame across channels.
pub fn read_wav(file: &Path) -> anyhow::Result<(WavSpec, Vec<f64>)> {
    let mut reader = WavReader::open(file)
        .with_context(|| format!("reading wav file {}", file.display()))?;
    let spec = reader.spec();
    log::trace!("Spec: {:?}", spec);
    ensure!(
        spec.channels > 0,
        "wav file {} declares zero channels",
        file.display()
    );
    // Select correct format representation.
    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|sample| sample.map(f64::from))
            .collect::<Result<_, _>>()
            .with_context(|| format!("Invalid wav file {}", file.display()))?,
        SampleFormat::Int => {
            // Normalize integer pcm to [-1, 1] by the declared bit depth.
            let scale = f64::from(1u32 << (spec.bits_per_sample - 1));
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|x| f64::from(x) / scale))
                .collect::<Result<_, _>>()
                .with_context(|| format!("Invalid wav file {}", file.display()))?
        }
    };
    Ok((spec, downmix(&interleaved, spec.channels.into())))
}

/// Average each frame of interleaved samples into one channel. Lossy: stereo
/// phase and panning information does not survive.
fn downmix(interleaved: &[f64], channels: usize) -> Vec<f64> {
    if channels == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f64>() / channels as f64)
        .collect()
}

/// Write mono data to a wav file.
pub fn write_wav(
    file: &Path,
    samples: impl Iterator<Item = f32>,
    sample_rate: u32,
) -> anyhow::Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(file, spec)
        .with_context(|| format!("creating wav file {}", file.display()))?;
    for sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
