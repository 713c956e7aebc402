//! aqtts - Japanese speech synthesis from the command line
//!
//! Reads Japanese text from stdin, converts each line to phoneme notation
//! ("koe") with the AqKanji2Koe component, joins the lines with pause
//! separators, renders one waveform with the AquesTalk component, and
//! writes the result as a WAV file. Both components are shared libraries
//! loaded at run time from an unpacked AquesTalk SDK tree.
//!
//! The components keep license registration in process-global state, so a
//! process runs at most one pipeline; the adapters are not `Send`.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod sdk;
pub mod speech;
pub mod text;

pub use error::{Result, TtsError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "aqtts";
