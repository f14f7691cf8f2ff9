use thiserror::Error;

use crate::header::HeaderError;

/// Errors surfaced by the encoder and the command line driver.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad arguments, or a request for help/version text.
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error("invalid SAME header")]
    Header(#[from] HeaderError),

    #[error("sample rate must be greater than zero")]
    ZeroSampleRate,

    #[error("failed to write wav file")]
    Wav(#[from] hound::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
