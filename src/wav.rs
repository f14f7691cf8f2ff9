use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::{error::Result, signal::AlertSignal};

const SCALE_16_BIT_PCM: f32 = i16::MAX as f32;

/// Writes `signal` as a mono 16 bit PCM wav file.
pub fn write(path: &Path, signal: &AlertSignal) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    log::trace!("Writing {} with {:?}", path.display(), spec);
    let mut writer = WavWriter::create(path, spec)?;
    for s in signal.samples() {
        let sample = (s.clamp(-1.0, 1.0) * SCALE_16_BIT_PCM) as i16;
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
