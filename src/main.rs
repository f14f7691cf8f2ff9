use std::io;

use anyhow::Context;
use log::Level;
use same_encode::{Error, SameEncoder};

pub fn main() -> anyhow::Result<()> {
    // Diagnostics for the user go to stdout through `run`; the logger only
    // reports problems, on stderr.
    simple_logger::init_with_level(Level::Warn)?;

    let result = same_encode::run(
        std::env::args_os(),
        &SameEncoder::default(),
        &mut io::stdout().lock(),
    );
    match result {
        Err(Error::Usage(err)) => err.exit(),
        other => other.context("failed to encode alert"),
    }
}
