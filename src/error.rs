//! Error types and process exit codes
//!
//! Every failure branch of the pipeline maps onto one of the exit codes
//! below, so callers scripting this tool can tell configuration mistakes
//! apart from component failures.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Usage and input errors: bad flag values, unresolvable SDK root,
/// missing SDK files, empty input, empty conversion result.
pub const EXIT_USAGE: i32 = 2;
/// A component shared library could not be loaded or fully bound.
pub const EXIT_LOAD: i32 = 3;
/// The text-to-phoneme component failed (session create or line convert).
pub const EXIT_CONVERT: i32 = 4;
/// The waveform synthesis component failed.
pub const EXIT_SYNTH: i32 = 5;
/// The output file could not be written.
pub const EXIT_WRITE: i32 = 6;

/// Main error type for aqtts
#[derive(Error, Debug)]
pub enum TtsError {
    #[error("could not auto-detect the aquestalk root; use --aquestalk-root")]
    RootNotFound,

    #[error("missing SDK files:\n{}\nHint: check --aquestalk-root and --voice.", list_paths(.0))]
    MissingSdkFiles(Vec<PathBuf>),

    #[error("invalid output path {}: {source}", .path.display())]
    InvalidOutputPath { path: PathBuf, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error("no input text on stdin")]
    EmptyInput,

    #[error("conversion produced an empty phoneme stream")]
    EmptyKoe,

    #[error("unexpected NUL byte in {0}")]
    EmbeddedNul(&'static str),

    #[error("failed to load {}: {source}", .library.display())]
    LoadLibrary {
        library: PathBuf,
        source: libloading::Error,
    },

    #[error("{} does not export {symbol}: {source}", .library.display())]
    MissingSymbol {
        library: PathBuf,
        symbol: &'static str,
        source: libloading::Error,
    },

    #[error("AqKanji2Koe_Create failed: {code}")]
    CreateFailed { code: i32 },

    #[error("AqKanji2Koe_Convert failed: {code}")]
    ConvertFailed { code: i32 },

    #[error("AquesTalk_Synthe failed: {code}")]
    SyntheFailed { code: i32 },

    #[error("failed to write {}: {source}", .path.display())]
    WriteWave { path: PathBuf, source: io::Error },
}

/// Result type alias for aqtts operations
pub type Result<T> = std::result::Result<T, TtsError>;

impl TtsError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            TtsError::RootNotFound
            | TtsError::MissingSdkFiles(_)
            | TtsError::InvalidOutputPath { .. }
            | TtsError::Stdin(_)
            | TtsError::EmptyInput
            | TtsError::EmptyKoe
            | TtsError::EmbeddedNul(_) => EXIT_USAGE,
            TtsError::LoadLibrary { .. } | TtsError::MissingSymbol { .. } => EXIT_LOAD,
            TtsError::CreateFailed { .. } | TtsError::ConvertFailed { .. } => EXIT_CONVERT,
            TtsError::SyntheFailed { .. } => EXIT_SYNTH,
            TtsError::WriteWave { .. } => EXIT_WRITE,
        }
    }
}

/// One indented line per path, for the pre-flight diagnostic.
fn list_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("  {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}
