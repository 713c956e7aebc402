//! Command-line surface and resolved run settings
//!
//! [`Cli`] is the raw argument set; [`Settings`] is what the rest of the
//! program works with, produced by [`Settings::from_cli`] after SDK path
//! resolution and range checks.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use std::{env, process};

use clap::Parser;
use log::warn;

use crate::sdk::{self, SdkPaths};
use crate::speech::TextEncoding;
use crate::{Result, TtsError};

/// Default speaking rate, percent.
pub const DEFAULT_SPEED: i32 = 100;
/// Slowest rate the synthesizer supports.
pub const SPEED_MIN: i32 = 50;
/// Fastest rate the synthesizer supports.
pub const SPEED_MAX: i32 = 300;
/// Default per-line phoneme buffer, bytes.
pub const DEFAULT_KOE_BUFFER: usize = 8192;

/// Read Japanese text on stdin, synthesize it, write a WAV file.
#[derive(Parser, Debug)]
#[command(name = crate::APP_NAME, version = crate::VERSION, about)]
pub struct Cli {
    /// Directory holding the unpacked SDK trees (auto-detected when omitted)
    #[arg(long, value_name = "DIR")]
    pub aquestalk_root: Option<PathBuf>,

    /// Voice library subdirectory under the synthesizer tree
    #[arg(long, default_value = sdk::DEFAULT_VOICE)]
    pub voice: String,

    /// Speaking rate in percent, clamped to 50-300
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    pub speed: i32,

    /// Output WAV path (a file in the system temp dir when omitted)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Encoding of the stdin text
    #[arg(long, value_enum, default_value_t = TextEncoding::Utf8)]
    pub encoding: TextEncoding,

    /// Developer license key, pushed to both components
    #[arg(long, env = "AQUEST_DEV_KEY", hide_env_values = true)]
    pub dev_key: Option<String>,

    /// User license key, pushed to the synthesizer
    #[arg(long, env = "AQUEST_USR_KEY", hide_env_values = true)]
    pub usr_key: Option<String>,

    /// Phoneme output buffer per line, in bytes
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_KOE_BUFFER)]
    pub koe_buffer: usize,

    /// Log at debug level instead of warn
    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated settings for one run.
#[derive(Debug)]
pub struct Settings {
    pub sdk: SdkPaths,
    pub speed: i32,
    pub encoding: TextEncoding,
    pub out_path: PathBuf,
    pub dev_key: Option<String>,
    pub usr_key: Option<String>,
    pub koe_capacity: usize,
}

impl Settings {
    /// Resolve arguments into run settings.
    ///
    /// Fails when no SDK root can be determined, when expected SDK files
    /// are absent, or when the output path cannot be made absolute.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let root = match cli.aquestalk_root {
            Some(root) => root,
            None => sdk::default_root().ok_or(TtsError::RootNotFound)?,
        };
        let paths = SdkPaths::resolve(&root, &cli.voice);
        let missing = paths.missing();
        if !missing.is_empty() {
            return Err(TtsError::MissingSdkFiles(missing));
        }

        let speed = cli.speed.clamp(SPEED_MIN, SPEED_MAX);
        if speed != cli.speed {
            warn!("speed {} out of range, using {speed}", cli.speed);
        }

        let out_path = cli.out.unwrap_or_else(default_output_path);
        let out_path =
            std::path::absolute(&out_path).map_err(|source| TtsError::InvalidOutputPath {
                path: out_path.clone(),
                source,
            })?;

        Ok(Settings {
            sdk: paths,
            speed,
            encoding: cli.encoding,
            out_path,
            dev_key: non_empty(cli.dev_key),
            usr_key: non_empty(cli.usr_key),
            koe_capacity: cli.koe_buffer,
        })
    }
}

/// An empty key means "no key", same as leaving the flag off.
fn non_empty(key: Option<String>) -> Option<String> {
    key.filter(|k| !k.is_empty())
}

fn default_output_path() -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    env::temp_dir().join(format!("aqt_{}_{millis}.wav", process::id()))
}
