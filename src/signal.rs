use std::f64::consts::TAU;
use std::time::Duration;

use log::debug;

use crate::{
    error::{Error, Result},
    header::SameHeader,
};

// AFSK
const BAUD: f64 = 3125.0 / 6.0; // 520.83 bit/s, 1.92 ms per bit
const MARK_HZ: f64 = BAUD * 4.0; // 2083.3 Hz
const SPACE_HZ: f64 = BAUD * 3.0; // 1562.5 Hz
const PREAMBLE: [u8; 16] = [0xAB; 16];
const REPEAT: usize = 3;
const END_OF_MESSAGE: &[u8] = b"NNNN";

// Attention signal
const EAS_TONES: &[f64] = &[853.0, 960.0];
const NWS_TONES: &[f64] = &[1050.0];

const GAP: Duration = Duration::from_secs(1);

/// Which attention signal to put between the header and the trailer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttentionTone {
    /// Two-tone broadcast attention signal, 853 Hz + 960 Hz.
    #[default]
    Eas,
    /// NOAA Weather Radio single tone, 1050 Hz.
    Nws,
}

impl AttentionTone {
    fn frequencies(self) -> &'static [f64] {
        match self {
            AttentionTone::Eas => EAS_TONES,
            AttentionTone::Nws => NWS_TONES,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncoderConfig {
    pub sample_rate: u32,
    pub attention_tone: AttentionTone,
    pub attention_duration: Duration,
    /// Peak level in `0.0..=1.0`.
    pub amplitude: f32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            attention_tone: AttentionTone::Eas,
            attention_duration: Duration::from_secs(8),
            amplitude: 0.8,
        }
    }
}

/// Mono audio produced by [`encode`].
#[derive(Debug, Clone, PartialEq)]
pub struct AlertSignal {
    sample_rate: u32,
    samples: Vec<f32>,
}

impl AlertSignal {
    pub fn new(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples in `-1.0..=1.0`.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }
}

/// Encodes `header` with the default [`EncoderConfig`].
pub fn encode(header: &str, attention_tone: bool, end_of_message: bool) -> Result<AlertSignal> {
    encode_with(&EncoderConfig::default(), header, attention_tone, end_of_message)
}

/// Builds the full transmission: three header bursts, the optional attention
/// signal and the optional three `NNNN` bursts, each followed by one second
/// of silence.
pub fn encode_with(
    config: &EncoderConfig,
    header: &str,
    attention_tone: bool,
    end_of_message: bool,
) -> Result<AlertSignal> {
    if config.sample_rate == 0 {
        return Err(Error::ZeroSampleRate);
    }
    let header = SameHeader::parse(header)?;
    debug!(
        "Encoding {} event from {} for {} location(s)",
        header.event(),
        header.originator(),
        header.locations().count()
    );

    let mut synth = Synth::new(config);
    for _ in 0..REPEAT {
        synth.burst(header.as_str().as_bytes());
        synth.silence(GAP);
    }
    if attention_tone {
        debug!(
            "Adding {:?} attention tone for {:?}",
            config.attention_tone, config.attention_duration
        );
        synth.tone(config.attention_tone.frequencies(), config.attention_duration);
        synth.silence(GAP);
    }
    if end_of_message {
        for _ in 0..REPEAT {
            synth.burst(END_OF_MESSAGE);
            synth.silence(GAP);
        }
    }

    let signal = synth.finish();
    debug!(
        "Encoded {} samples ({:.2}s)",
        signal.samples.len(),
        signal.duration().as_secs_f64()
    );
    Ok(signal)
}

struct Synth {
    sample_rate: f64,
    amplitude: f32,
    samples: Vec<f32>,
}

impl Synth {
    fn new(config: &EncoderConfig) -> Self {
        Self {
            sample_rate: config.sample_rate as f64,
            amplitude: config.amplitude.clamp(0.0, 1.0),
            samples: Vec::new(),
        }
    }

    /// Preamble + payload as continuous phase FSK, least significant bit first.
    /// Bit `k` ends at sample `round((k + 1) * samples_per_bit)` so the burst
    /// does not drift when a bit is not a whole number of samples.
    fn burst(&mut self, payload: &[u8]) {
        let samples_per_bit = self.sample_rate / BAUD;
        let bits = PREAMBLE
            .iter()
            .chain(payload)
            .flat_map(|&byte| (0..8).map(move |i| (byte >> i) & 1 == 1));

        let mut phase = 0f64;
        let mut start = 0;
        for (k, bit) in bits.enumerate() {
            let end = ((k + 1) as f64 * samples_per_bit).round() as usize;
            let freq = if bit { MARK_HZ } else { SPACE_HZ };
            let step = TAU * freq / self.sample_rate;
            for _ in start..end {
                self.samples.push(self.amplitude * phase.sin() as f32);
                phase = (phase + step) % TAU;
            }
            start = end;
        }
    }

    /// Sum of equal-level sines, scaled so the peak stays at `amplitude`.
    fn tone(&mut self, frequencies: &[f64], duration: Duration) {
        let len = self.len_of(duration);
        let scale = self.amplitude / frequencies.len() as f32;
        self.samples.extend((0..len).map(|n| {
            let t = n as f64 / self.sample_rate;
            let sum: f64 = frequencies.iter().map(|f| (TAU * f * t).sin()).sum();
            scale * sum as f32
        }));
    }

    fn silence(&mut self, duration: Duration) {
        let len = self.len_of(duration);
        self.samples.resize(self.samples.len() + len, 0.0);
    }

    fn len_of(&self, duration: Duration) -> usize {
        (duration.as_secs_f64() * self.sample_rate).round() as usize
    }

    fn finish(self) -> AlertSignal {
        AlertSignal {
            sample_rate: self.sample_rate as u32,
            samples: self.samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::HeaderError;
    use proptest::{prelude::ProptestConfig, proptest};

    const HEADER: &str = "ZCZC-CIV-RWT-000000+0300-832257-XDIF/004-";

    // At 44.1 kHz a bit is exactly 84.672 samples.
    const HEADER_BURST: usize = 38610; // (16 + 41) * 8 bits
    const EOM_BURST: usize = 13548; // (16 + 4) * 8 bits
    const SECOND: usize = 44100;

    #[test]
    fn header_only() {
        let signal = encode(HEADER, false, false).unwrap();
        assert_eq!(signal.sample_rate(), 44100);
        assert_eq!(signal.samples().len(), 3 * (HEADER_BURST + SECOND));
    }

    #[test]
    fn with_end_of_message() {
        let signal = encode(HEADER, false, true).unwrap();
        assert_eq!(
            signal.samples().len(),
            3 * (HEADER_BURST + SECOND) + 3 * (EOM_BURST + SECOND)
        );
    }

    #[test]
    fn with_attention_tone() {
        let signal = encode(HEADER, true, true).unwrap();
        assert_eq!(
            signal.samples().len(),
            3 * (HEADER_BURST + SECOND) + 9 * SECOND + 3 * (EOM_BURST + SECOND)
        );
        let tone = &signal.samples()[3 * (HEADER_BURST + SECOND)..][..8 * SECOND];
        assert!(tone.iter().any(|s| s.abs() > 0.5));
    }

    #[test]
    fn silence_follows_each_burst() {
        let signal = encode(HEADER, false, false).unwrap();
        let gap = &signal.samples()[HEADER_BURST..HEADER_BURST + SECOND];
        assert!(gap.iter().all(|&s| s == 0.0));
        assert!(signal.samples()[..HEADER_BURST].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn samples_stay_in_range() {
        let signal = encode(HEADER, true, true).unwrap();
        assert!(signal.samples().iter().all(|s| s.abs() <= 0.8 + f32::EPSILON));
    }

    #[test]
    fn duration_matches_sample_count() {
        let signal = encode(HEADER, false, false).unwrap();
        let expected = (3 * (HEADER_BURST + SECOND)) as f64 / 44100.0;
        assert!((signal.duration().as_secs_f64() - expected).abs() < 1e-6);
    }

    #[test]
    fn invalid_header_is_rejected() {
        let err = encode("ZCZC-CIV-RWT", false, false).unwrap_err();
        assert!(matches!(
            err,
            Error::Header(HeaderError::MissingTerminator)
        ));
    }

    #[test]
    fn zero_sample_rate_is_rejected() {
        let config = EncoderConfig {
            sample_rate: 0,
            ..EncoderConfig::default()
        };
        let err = encode_with(&config, HEADER, false, false).unwrap_err();
        assert!(matches!(err, Error::ZeroSampleRate));
    }

    #[test]
    fn empty_signal_has_no_duration() {
        assert_eq!(AlertSignal::new(0, Vec::new()).duration(), Duration::ZERO);
        assert_eq!(AlertSignal::new(8000, Vec::new()).duration(), Duration::ZERO);
    }

    #[test]
    fn nws_tone_frequency() {
        let config = EncoderConfig {
            attention_tone: AttentionTone::Nws,
            ..EncoderConfig::default()
        };
        let mut synth = Synth::new(&config);
        synth.tone(config.attention_tone.frequencies(), Duration::from_secs(1));
        let rising = synth
            .samples
            .windows(2)
            .filter(|w| w[0] <= 0.0 && w[1] > 0.0)
            .count();
        assert!((1049..=1051).contains(&rising), "{rising}");
    }

    #[test]
    fn mark_and_space_cycles_per_bit() {
        // 4 cycles per mark bit and 3 per space bit, so a byte of ones
        // crosses zero upward 32 times and a byte of zeros 24 times.
        let config = EncoderConfig {
            sample_rate: 48000,
            ..EncoderConfig::default()
        };
        let rising = |payload: &[u8]| {
            let mut synth = Synth::new(&config);
            synth.burst(payload);
            let preamble_len = (128.0 * 48000.0 / BAUD).round() as usize;
            synth.samples[preamble_len..]
                .windows(2)
                .filter(|w| w[0] <= 0.0 && w[1] > 0.0)
                .count()
        };
        assert!((31..=33).contains(&rising(&[0xFF])));
        assert!((23..=25).contains(&rising(&[0x00])));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]
        #[test]
        fn burst_length_tracks_callsign(len in 1..=8usize, sample_rate in 8000..96000u32) {
            let header = format!("ZCZC-WXR-RWT-012345+0015-0321115-{}-", "K".repeat(len));
            let config = EncoderConfig { sample_rate, ..EncoderConfig::default() };
            let signal = encode_with(&config, &header, false, false).unwrap();
            let bits = (PREAMBLE.len() + header.len()) * 8;
            let burst = (bits as f64 * sample_rate as f64 / BAUD).round() as usize;
            assert_eq!(signal.samples().len(), 3 * (burst + sample_rate as usize));
        }
    }
}
