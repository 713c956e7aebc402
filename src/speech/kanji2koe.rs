//! Adapter for the AqKanji2Koe text-to-phoneme component
//!
//! The component hands out an opaque instance handle from
//! `AqKanji2Koe_Create`; every conversion goes through that handle and
//! `AqKanji2Koe_Release` must be called on it exactly once. The adapter
//! wraps the handle in a session guard so release happens on drop, on
//! error paths included.

use std::ffi::{c_char, c_int, c_void, CString};
use std::marker::PhantomData;
use std::path::Path;

use libloading::Library;
use log::{debug, warn};

use crate::speech::engine::{ConvertSession, KanjiConverter, TextEncoding};
use crate::speech::loader;
use crate::{Result, TtsError};

const SYM_CREATE: &str = "AqKanji2Koe_Create";
const SYM_RELEASE: &str = "AqKanji2Koe_Release";
const SYM_CONVERT_UTF8: &str = "AqKanji2Koe_Convert_utf8";
const SYM_CONVERT_SJIS: &str = "AqKanji2Koe_Convert_sjis";
const SYM_SET_DEV_KEY: &str = "AqKanji2Koe_SetDevKey";

type CreateFn = unsafe extern "system" fn(*const c_char, *mut c_int) -> *mut c_void;
type ReleaseFn = unsafe extern "system" fn(*mut c_void);
type ConvertFn =
    unsafe extern "system" fn(*mut c_void, *const c_char, *mut c_char, c_int) -> c_int;
type SetKeyFn = unsafe extern "system" fn(*const c_char) -> c_int;

/// The text-to-phoneme component, loaded and fully bound.
pub struct Kanji2Koe {
    create: CreateFn,
    release: ReleaseFn,
    convert_utf8: ConvertFn,
    convert_sjis: ConvertFn,
    set_dev_key: SetKeyFn,
    _lib: Library,
    // License state behind the entry points is process-global; keep the
    // component on the thread that loaded it.
    _not_send: PhantomData<*const ()>,
}

impl Kanji2Koe {
    /// Load the component library and bind every entry point.
    ///
    /// Binding is all-or-nothing: if any symbol is absent the library is
    /// unloaded and nothing in it is ever called.
    pub fn load(path: &Path) -> Result<Self> {
        let lib = loader::open(path)?;
        unsafe {
            Ok(Kanji2Koe {
                create: loader::resolve(&lib, path, SYM_CREATE)?,
                release: loader::resolve(&lib, path, SYM_RELEASE)?,
                convert_utf8: loader::resolve(&lib, path, SYM_CONVERT_UTF8)?,
                convert_sjis: loader::resolve(&lib, path, SYM_CONVERT_SJIS)?,
                set_dev_key: loader::resolve(&lib, path, SYM_SET_DEV_KEY)?,
                _lib: lib,
                _not_send: PhantomData,
            })
        }
    }
}

impl KanjiConverter for Kanji2Koe {
    fn set_dev_key(&self, key: &str) {
        let key = match CString::new(key) {
            Ok(key) => key,
            Err(_) => {
                warn!("ignoring converter dev key with embedded NUL");
                return;
            }
        };
        let rc = unsafe { (self.set_dev_key)(key.as_ptr()) };
        debug!("{SYM_SET_DEV_KEY} returned {rc}");
    }

    fn open_session<'a>(&'a self, dictionary: &Path) -> Result<Box<dyn ConvertSession + 'a>> {
        let dic = CString::new(dictionary.to_string_lossy().into_owned())
            .map_err(|_| TtsError::EmbeddedNul("dictionary path"))?;
        let mut err: c_int = 0;
        let handle = unsafe { (self.create)(dic.as_ptr(), &mut err) };
        if handle.is_null() {
            return Err(TtsError::CreateFailed { code: err });
        }
        debug!("opened conversion session on {}", dictionary.display());
        Ok(Box::new(KanjiSession {
            owner: self,
            handle,
        }))
    }
}

/// One live `AqKanji2Koe_Create` handle; released on drop.
struct KanjiSession<'a> {
    owner: &'a Kanji2Koe,
    handle: *mut c_void,
}

impl ConvertSession for KanjiSession<'_> {
    fn convert(&mut self, line: &[u8], encoding: TextEncoding, capacity: usize) -> Result<Vec<u8>> {
        let text = CString::new(line).map_err(|_| TtsError::EmbeddedNul("input line"))?;
        let mut buf = vec![0u8; capacity];
        let len = c_int::try_from(buf.len()).unwrap_or(c_int::MAX);
        let entry = match encoding {
            TextEncoding::Utf8 => self.owner.convert_utf8,
            TextEncoding::Sjis => self.owner.convert_sjis,
        };
        let rc = unsafe { entry(self.handle, text.as_ptr(), buf.as_mut_ptr().cast(), len) };
        if rc != 0 {
            return Err(TtsError::ConvertFailed { code: rc });
        }
        // The component NUL-terminates its output inside the buffer.
        let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
        buf.truncate(end);
        Ok(buf)
    }
}

impl Drop for KanjiSession<'_> {
    fn drop(&mut self) {
        unsafe { (self.owner.release)(self.handle) };
        debug!("released conversion session");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_library() {
        let err = Kanji2Koe::load(Path::new("/no/such/dir/AqKanji2Koe.dll"))
            .err()
            .expect("load must fail");
        assert!(matches!(err, TtsError::LoadLibrary { .. }));
        assert_eq!(err.exit_code(), crate::error::EXIT_LOAD);
    }

    #[test]
    fn test_load_rejects_non_library_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"not a shared object")
            .expect("write stub bytes");
        let err = Kanji2Koe::load(file.path()).err().expect("load must fail");
        assert_eq!(err.exit_code(), crate::error::EXIT_LOAD);
    }
}
