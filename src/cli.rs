use std::{ffi::OsString, io::Write, path::PathBuf};

use clap::Parser;

use crate::{backend::AlertBackend, error::Result};

const AFTER_HELP: &str = "\
Examples:
  same-encode 'ZCZC-CIV-RWT-000000+0300-832257-XDIF/004-' output.wav
  same-encode 'ZCZC-CIV-LOL-123456+7890-123456-XXXX/000-' test.wav --attention-tone
  same-encode --help

SAME Header Format:
  ZCZC-ORG-EEE-PSSCCC+TTTT-JJJHHMM-LLLLLLLL-

  Where:
    ZCZC       - Preamble (fixed)
    ORG        - Originator code (e.g., CIV, WXR, EAS)
    EEE        - Event code (e.g., RWT, TOR, EAN)
    PSSCCC     - Location codes (can be repeated, +PSSCCC)
    +TTTT      - Valid time period in minutes
    JJJHHMM    - Julian day and time
    LLLLLLLL   - Station callsign/identifier";

/// Encode EAS/SAME (Emergency Alert System/Specific Area Message Encoding)
/// messages to WAV files.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None, after_help = AFTER_HELP)]
pub struct Args {
    /// EAS/SAME header string (e.g., "ZCZC-CIV-RWT-000000+0300-832257-XDIF/004-")
    pub header: String,

    /// Path to the output WAV file
    pub output_file: PathBuf,

    /// Include attention tone in the generated audio
    #[arg(short, long)]
    pub attention_tone: bool,

    /// Disable end-of-message marker (NNNN)
    #[arg(long)]
    pub no_eom: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn end_of_message(&self) -> bool {
        !self.no_eom
    }
}

/// Parses `argv` (program name first) and runs the encoder.
///
/// Usage problems and `--help`/`--version` come back as [`Error::Usage`]
/// before `backend` is touched.
///
/// [`Error::Usage`]: crate::Error::Usage
pub fn run<I, T, B, W>(argv: I, backend: &B, out: &mut W) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    B: AlertBackend,
    W: Write,
{
    let args = Args::try_parse_from(argv)?;
    execute(&args, backend, out)
}

pub fn execute<B, W>(args: &Args, backend: &B, out: &mut W) -> Result<()>
where
    B: AlertBackend,
    W: Write,
{
    let output = args.output_file.display();
    if args.verbose {
        writeln!(out, "[INFO] Encoding header: {}", args.header)?;
        writeln!(out, "[INFO] Output file: {output}")?;
        writeln!(out, "[INFO] Attention tone: {}", args.attention_tone)?;
        writeln!(out, "[INFO] End-of-message: {}", args.end_of_message())?;
    }

    writeln!(out, "header = {}", args.header)?;
    writeln!(out, "output = {output}")?;

    let alert = backend.encode(&args.header, args.attention_tone, args.end_of_message())?;
    backend.write_audio_file(&args.output_file, &alert)?;

    if args.verbose {
        writeln!(out, "[INFO] Successfully created {output}")?;
    }
    Ok(())
}
