//! Shared dynamic-library plumbing for the SDK adapters
//!
//! Binding is all-or-nothing: an adapter resolves every symbol it needs
//! before exposing the component, and a library that fails to bind is
//! dropped (unloaded) without any call into it. Resolved entry points
//! are plain fn pointers copied out of the library; the adapter keeps
//! the [`Library`] alive alongside them so the code they point into
//! stays mapped.

use std::path::Path;

use libloading::Library;
use log::debug;

use crate::{Result, TtsError};

/// Load a native component library from an explicit path.
pub(crate) fn open(path: &Path) -> Result<Library> {
    debug!("loading {}", path.display());
    unsafe { Library::new(path) }.map_err(|source| TtsError::LoadLibrary {
        library: path.to_path_buf(),
        source,
    })
}

/// Resolve one entry point out of `lib`, by exported name.
///
/// # Safety
///
/// `T` must be the correct fn-pointer type for the named export; calling
/// a symbol through a mismatched signature is undefined behavior.
pub(crate) unsafe fn resolve<T: Copy>(
    lib: &Library,
    library: &Path,
    symbol: &'static str,
) -> Result<T> {
    match lib.get::<T>(symbol.as_bytes()) {
        Ok(sym) => Ok(*sym),
        Err(source) => Err(TtsError::MissingSymbol {
            library: library.to_path_buf(),
            symbol,
            source,
        }),
    }
}
