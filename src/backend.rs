use std::path::Path;

use crate::{
    error::Result,
    signal::{self, AlertSignal, EncoderConfig},
    wav,
};

/// What the command line driver needs from an encoder: turn a header into
/// audio, then put that audio in a file. The driver never looks inside
/// `Signal`.
pub trait AlertBackend {
    type Signal;

    fn encode(
        &self,
        header: &str,
        attention_tone: bool,
        end_of_message: bool,
    ) -> Result<Self::Signal>;

    fn write_audio_file(&self, path: &Path, signal: &Self::Signal) -> Result<()>;
}

/// AFSK encoder writing 16 bit wav files.
#[derive(Debug, Clone, Default)]
pub struct SameEncoder {
    config: EncoderConfig,
}

impl SameEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }
}

impl AlertBackend for SameEncoder {
    type Signal = AlertSignal;

    fn encode(
        &self,
        header: &str,
        attention_tone: bool,
        end_of_message: bool,
    ) -> Result<AlertSignal> {
        signal::encode_with(&self.config, header, attention_tone, end_of_message)
    }

    fn write_audio_file(&self, path: &Path, signal: &AlertSignal) -> Result<()> {
        wav::write(path, signal)
    }
}
