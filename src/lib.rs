//! Encode EAS/SAME alert headers into audio.
//!
//! ```no_run
//! use std::path::Path;
//! use same_encode::{AlertBackend, SameEncoder};
//!
//! let encoder = SameEncoder::default();
//! let alert = encoder.encode("ZCZC-WXR-RWT-012345+0015-0321115-KLOX/NWS-", true, true)?;
//! encoder.write_audio_file(Path::new("alert.wav"), &alert)?;
//! # Ok::<(), same_encode::Error>(())
//! ```

pub mod backend;
pub mod cli;
pub mod error;
pub mod header;
pub mod signal;
pub mod wav;

pub use backend::{AlertBackend, SameEncoder};
pub use cli::{execute, run, Args};
pub use error::{Error, Result};
pub use header::{HeaderError, SameHeader};
pub use signal::{encode, encode_with, AlertSignal, AttentionTone, EncoderConfig};
