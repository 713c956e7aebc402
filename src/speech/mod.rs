//! Speech component adapters
//!
//! The pipeline is written against the traits in [`engine`]; the
//! [`kanji2koe`] and [`aquestalk`] adapters implement them over the
//! dynamically loaded SDK libraries.

pub mod aquestalk;
pub mod engine;
pub mod kanji2koe;
mod loader;

pub use aquestalk::AquesTalk;
pub use engine::{ConvertSession, KanjiConverter, KoeSynthesizer, TextEncoding, WaveBuffer};
pub use kanji2koe::Kanji2Koe;
