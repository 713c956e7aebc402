//! aqtts: Japanese text on stdin, synthesized WAV on disk
//!
//! Thin wrapper around the library crate: parse arguments, wire up the
//! logger, load the two SDK components, and hand everything to the
//! pipeline. On success the output path is printed on stdout; on failure
//! the error goes to stderr and the exit code says which stage failed.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use env_logger::Env;
use log::debug;

use aqtts::config::{Cli, Settings};
use aqtts::speech::{AquesTalk, Kanji2Koe};
use aqtts::{pipeline, Result, TtsError};

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(path) => println!("{}", path.display()),
        Err(err) => {
            eprintln!("{err}");
            process::exit(err.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<PathBuf> {
    let settings = Settings::from_cli(cli)?;
    debug!("resolved {:?}", settings.sdk);

    let converter = Kanji2Koe::load(&settings.sdk.converter_library)?;
    let synthesizer = AquesTalk::load(&settings.sdk.synthesizer_library)?;

    let mut input = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut input)
        .map_err(TtsError::Stdin)?;

    pipeline::run(&converter, &synthesizer, &settings, &input)
}
