//! Adapter for the AquesTalk phoneme-to-waveform component
//!
//! `AquesTalk_Synthe` renders a whole phoneme stream into an in-memory
//! WAV image. The returned memory belongs to the component and must go
//! back through `AquesTalk_FreeWave` exactly once; the adapter wraps it
//! in a guard that frees on drop.

use std::ffi::{c_char, c_int, CString};
use std::marker::PhantomData;
use std::path::Path;
use std::slice;

use libloading::Library;
use log::{debug, warn};

use crate::speech::engine::{KoeSynthesizer, TextEncoding, WaveBuffer};
use crate::speech::loader;
use crate::{Result, TtsError};

const SYM_SYNTHE: &str = "AquesTalk_Synthe";
const SYM_SYNTHE_UTF8: &str = "AquesTalk_Synthe_Utf8";
const SYM_FREE_WAVE: &str = "AquesTalk_FreeWave";
const SYM_SET_DEV_KEY: &str = "AquesTalk_SetDevKey";
const SYM_SET_USR_KEY: &str = "AquesTalk_SetUsrKey";

type SyntheFn = unsafe extern "system" fn(*const c_char, c_int, *mut c_int) -> *mut u8;
type FreeWaveFn = unsafe extern "system" fn(*mut u8);
type SetKeyFn = unsafe extern "system" fn(*const c_char) -> c_int;

/// The phoneme-to-waveform component, loaded and fully bound.
pub struct AquesTalk {
    synthe: SyntheFn,
    synthe_utf8: SyntheFn,
    free_wave: FreeWaveFn,
    set_dev_key: SetKeyFn,
    set_usr_key: SetKeyFn,
    _lib: Library,
    // License state behind the entry points is process-global; keep the
    // component on the thread that loaded it.
    _not_send: PhantomData<*const ()>,
}

impl AquesTalk {
    /// Load the component library and bind every entry point.
    ///
    /// Binding is all-or-nothing: if any symbol is absent the library is
    /// unloaded and nothing in it is ever called.
    pub fn load(path: &Path) -> Result<Self> {
        let lib = loader::open(path)?;
        unsafe {
            Ok(AquesTalk {
                synthe: loader::resolve(&lib, path, SYM_SYNTHE)?,
                synthe_utf8: loader::resolve(&lib, path, SYM_SYNTHE_UTF8)?,
                free_wave: loader::resolve(&lib, path, SYM_FREE_WAVE)?,
                set_dev_key: loader::resolve(&lib, path, SYM_SET_DEV_KEY)?,
                set_usr_key: loader::resolve(&lib, path, SYM_SET_USR_KEY)?,
                _lib: lib,
                _not_send: PhantomData,
            })
        }
    }

    fn push_key(&self, entry: SetKeyFn, symbol: &str, key: &str) {
        let key = match CString::new(key) {
            Ok(key) => key,
            Err(_) => {
                warn!("ignoring synthesizer key with embedded NUL");
                return;
            }
        };
        let rc = unsafe { entry(key.as_ptr()) };
        debug!("{symbol} returned {rc}");
    }
}

impl KoeSynthesizer for AquesTalk {
    fn set_dev_key(&self, key: &str) {
        self.push_key(self.set_dev_key, SYM_SET_DEV_KEY, key);
    }

    fn set_usr_key(&self, key: &str) {
        self.push_key(self.set_usr_key, SYM_SET_USR_KEY, key);
    }

    fn synthesize<'a>(
        &'a self,
        koe: &[u8],
        speed: i32,
        encoding: TextEncoding,
    ) -> Result<Box<dyn WaveBuffer + 'a>> {
        let koe = CString::new(koe).map_err(|_| TtsError::EmbeddedNul("phoneme stream"))?;
        let entry = match encoding {
            TextEncoding::Utf8 => self.synthe_utf8,
            TextEncoding::Sjis => self.synthe,
        };
        // On failure the size out-param carries the component's error code.
        let mut size: c_int = 0;
        let data = unsafe { entry(koe.as_ptr(), speed as c_int, &mut size) };
        if data.is_null() {
            return Err(TtsError::SyntheFailed { code: size });
        }
        if size <= 0 {
            unsafe { (self.free_wave)(data) };
            return Err(TtsError::SyntheFailed { code: size });
        }
        debug!("synthesized {size} wave bytes");
        Ok(Box::new(WaveHandle {
            owner: self,
            data,
            len: size as usize,
        }))
    }
}

/// A WAV image owned by the component; freed on drop.
struct WaveHandle<'a> {
    owner: &'a AquesTalk,
    data: *mut u8,
    len: usize,
}

impl WaveBuffer for WaveHandle<'_> {
    fn bytes(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.data, self.len) }
    }
}

impl Drop for WaveHandle<'_> {
    fn drop(&mut self) {
        unsafe { (self.owner.free_wave)(self.data) };
        debug!("freed wave buffer");
    }
}
