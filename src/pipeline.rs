//! One end-to-end run: text in, WAV file out
//!
//! Input is split into lines and each line is converted to phoneme
//! notation on its own; a failing line aborts the run with that line's
//! component error code. The per-line results are joined with
//! [`PAUSE_SEPARATOR`] and synthesized in a single call, so the output
//! is one continuous waveform.

use std::fs;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::config::Settings;
use crate::speech::{KanjiConverter, KoeSynthesizer};
use crate::text;
use crate::{Result, TtsError};

/// Joins independently converted lines in the phoneme stream; the
/// synthesizer renders it as a short pause.
pub const PAUSE_SEPARATOR: u8 = b'/';

/// Convert `input` to speech and write the WAV to `settings.out_path`.
///
/// Returns the output path on success. License keys are pushed to the
/// components before the conversion session opens; the session is
/// closed again before synthesis starts.
pub fn run(
    converter: &dyn KanjiConverter,
    synthesizer: &dyn KoeSynthesizer,
    settings: &Settings,
    input: &[u8],
) -> Result<PathBuf> {
    let input = text::trim(input);
    if input.is_empty() {
        return Err(TtsError::EmptyInput);
    }

    if let Some(key) = settings.dev_key.as_deref() {
        converter.set_dev_key(key);
        synthesizer.set_dev_key(key);
    }
    if let Some(key) = settings.usr_key.as_deref() {
        synthesizer.set_usr_key(key);
    }

    let koe = {
        let mut session = converter.open_session(&settings.sdk.dictionary)?;
        let mut koe: Vec<u8> = Vec::new();
        let mut phrases = 0usize;
        for (idx, line) in text::split_lines(input).into_iter().enumerate() {
            let line = text::trim(&line);
            if line.is_empty() {
                continue;
            }
            let phrase = session.convert(line, settings.encoding, settings.koe_capacity)?;
            let phrase = text::trim(&phrase);
            if phrase.is_empty() {
                continue;
            }
            debug!("line {}: {} koe bytes", idx + 1, phrase.len());
            if !koe.is_empty() {
                koe.push(PAUSE_SEPARATOR);
            }
            koe.extend_from_slice(phrase);
            phrases += 1;
        }
        debug!("{phrases} phrases, {} koe bytes total", koe.len());
        koe
    };
    if koe.is_empty() {
        return Err(TtsError::EmptyKoe);
    }

    let wave = synthesizer.synthesize(&koe, settings.speed, settings.encoding)?;

    if let Some(dir) = settings.out_path.parent() {
        if !dir.as_os_str().is_empty() {
            if let Err(err) = fs::create_dir_all(dir) {
                warn!("could not create {}: {err}", dir.display());
            }
        }
    }
    fs::write(&settings.out_path, wave.bytes()).map_err(|source| TtsError::WriteWave {
        path: settings.out_path.clone(),
        source,
    })?;
    info!(
        "wrote {} bytes to {}",
        wave.bytes().len(),
        settings.out_path.display()
    );
    Ok(settings.out_path.clone())
}
