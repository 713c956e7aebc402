//! Component traits the pipeline driver is written against
//!
//! Two independently versioned native components do the real work: a
//! text-to-phoneme converter and a phoneme-to-waveform synthesizer. The
//! driver only sees these traits, so tests can substitute in-memory
//! stand-ins and the SDK adapters stay in one place.

use std::path::Path;

use clap::ValueEnum;

use crate::Result;

/// Which SDK entry points receive the raw text bytes.
///
/// Both components expose parallel UTF-8 and Shift_JIS entry points; a
/// single run must use the same encoding for conversion and synthesis.
/// The program never transcodes - input bytes go to the selected entry
/// point as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TextEncoding {
    /// UTF-8 text
    Utf8,
    /// Shift_JIS (CP932) text
    #[value(alias = "shiftjis", alias = "cp932")]
    Sjis,
}

/// A loaded text-to-phoneme component.
pub trait KanjiConverter {
    /// Register a developer license key with the component.
    ///
    /// Called at most once per run, before any session is opened. The
    /// component's answer is logged, never fatal.
    fn set_dev_key(&self, key: &str);

    /// Open a conversion session bound to a phonetic dictionary directory.
    ///
    /// The session releases its native handle when dropped, exactly once.
    fn open_session<'a>(&'a self, dictionary: &Path) -> Result<Box<dyn ConvertSession + 'a>>;
}

/// One open text-to-phoneme conversion session.
pub trait ConvertSession {
    /// Convert one line of text to phoneme notation (koe).
    ///
    /// `capacity` sizes the output buffer handed to the component; a line
    /// whose phoneme form does not fit surfaces as the component's own
    /// error code. The returned bytes are the component's output up to
    /// its NUL terminator, untrimmed.
    fn convert(&mut self, line: &[u8], encoding: TextEncoding, capacity: usize) -> Result<Vec<u8>>;
}

/// A loaded phoneme-to-waveform synthesis component.
pub trait KoeSynthesizer {
    /// Register a developer license key; logged, never fatal.
    fn set_dev_key(&self, key: &str);

    /// Register a user license key; logged, never fatal.
    fn set_usr_key(&self, key: &str);

    /// Render the joined phoneme stream into a WAV image.
    ///
    /// `speed` is a percentage the caller has already clamped to the
    /// component's supported range.
    fn synthesize<'a>(
        &'a self,
        koe: &[u8],
        speed: i32,
        encoding: TextEncoding,
    ) -> Result<Box<dyn WaveBuffer + 'a>>;
}

/// A waveform owned by the component that produced it.
///
/// Dropping the buffer returns the memory to the owning component,
/// exactly once; the bytes must not be used afterwards.
pub trait WaveBuffer {
    /// The WAV image, byte-for-byte as the component produced it.
    fn bytes(&self) -> &[u8];
}
