//! On-disk layout of the AquesTalk SDK trees
//!
//! One root directory holds the two independently versioned component
//! trees: AqKanji2Koe (text-to-phoneme, with its dictionary directory)
//! and AquesTalk (phoneme-to-waveform, one library per voice). All three
//! paths the pipeline loads are verified to exist before any load
//! attempt, so load failures can be told apart from an incomplete SDK.

use std::path::{Path, PathBuf};

/// Directory name the auto-detection walk looks for.
pub const ROOT_DIR_NAME: &str = "aquestalk";

/// How many directory levels the auto-detection walk climbs, counting
/// the starting directory itself.
const MAX_ASCENT: usize = 6;

/// Default voice subdirectory of the synthesizer tree.
pub const DEFAULT_VOICE: &str = "f1";

const K2K_PACKAGE: &str = "aqk2k_win_413";
const K2K_TREE: &str = "aqk2k_win";
const K2K_LIBRARY: &str = "AqKanji2Koe.dll";
const K2K_DICTIONARY: &str = "aq_dic";
const TK_PACKAGE: &str = "aqtk1_win_200";
const TK_TREE: &str = "aqtk1_win";
const TK_LIBRARY: &str = "AquesTalk.dll";
const LIB_DIR: &str = "lib64";

/// Resolved locations of everything the pipeline loads from the SDK.
#[derive(Debug, Clone)]
pub struct SdkPaths {
    /// AqKanji2Koe shared library
    pub converter_library: PathBuf,

    /// Phonetic dictionary directory passed to AqKanji2Koe_Create
    pub dictionary: PathBuf,

    /// Voice-specific AquesTalk shared library
    pub synthesizer_library: PathBuf,
}

impl SdkPaths {
    /// Compute the three required paths under `root` for `voice`.
    pub fn resolve(root: &Path, voice: &str) -> Self {
        let k2k = root.join(K2K_PACKAGE).join(K2K_TREE);
        let tk = root.join(TK_PACKAGE).join(TK_TREE);
        SdkPaths {
            converter_library: k2k.join(LIB_DIR).join(K2K_LIBRARY),
            dictionary: k2k.join(K2K_DICTIONARY),
            synthesizer_library: tk.join(LIB_DIR).join(voice).join(TK_LIBRARY),
        }
    }

    /// Pre-flight existence check; returns the paths that are absent.
    pub fn missing(&self) -> Vec<PathBuf> {
        [
            &self.converter_library,
            &self.dictionary,
            &self.synthesizer_library,
        ]
        .into_iter()
        .filter(|p| !p.exists())
        .cloned()
        .collect()
    }
}

/// Walk upward from `start` looking for an `aquestalk` child directory.
pub fn find_root_from(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    for _ in 0..MAX_ASCENT {
        let candidate = dir.join(ROOT_DIR_NAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
    None
}

/// Auto-detect the SDK root relative to the running executable,
/// falling back to the current directory when the executable path is
/// unavailable.
pub fn default_root() -> Option<PathBuf> {
    let start = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())?;
    find_root_from(&start)
}
