//! `dlopen`/`dlsym`/`dlclose` loader.

use std::ffi::{CStr, CString, c_int};
use std::ptr::NonNull;

use hrexx_core::dlfcn::{self as dlfcn_core, LoadFlags};

use super::{OsDiagnostic, PlatformLoader, RawLibrary, RawSymbol};

/// Loader backed by the system dynamic linker.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UnixLoader;

/// Translate portable flag bits to this host's `RTLD_*` values.
fn native_flags(flags: LoadFlags) -> c_int {
    let bits = flags.bits();
    let mut mode = if flags.is_lazy() {
        libc::RTLD_LAZY
    } else {
        libc::RTLD_NOW
    };
    if bits & dlfcn_core::RTLD_GLOBAL != 0 {
        mode |= libc::RTLD_GLOBAL;
    } else {
        mode |= libc::RTLD_LOCAL;
    }
    if bits & dlfcn_core::RTLD_NOLOAD != 0 {
        mode |= libc::RTLD_NOLOAD;
    }
    if bits & dlfcn_core::RTLD_NODELETE != 0 {
        mode |= libc::RTLD_NODELETE;
    }
    mode
}

fn c_name(name: &str, what: &str) -> Result<CString, OsDiagnostic> {
    CString::new(name).map_err(|_| OsDiagnostic::new(format!("{what} name contains a NUL byte")))
}

/// Take the pending `dlerror` text, or `fallback` if none is pending.
fn take_dlerror(fallback: &str) -> OsDiagnostic {
    // SAFETY: dlerror has no preconditions; the returned string is valid
    // until the next dl* call on this thread and is copied immediately.
    let msg = unsafe { libc::dlerror() };
    if msg.is_null() {
        return OsDiagnostic::new(fallback);
    }
    // SAFETY: non-null dlerror results are NUL-terminated C strings.
    let text = unsafe { CStr::from_ptr(msg) };
    OsDiagnostic::new(text.to_string_lossy().into_owned())
}

fn clear_dlerror() {
    // SAFETY: see take_dlerror.
    unsafe {
        libc::dlerror();
    }
}

impl PlatformLoader for UnixLoader {
    fn open(&self, library: &str, flags: LoadFlags) -> Result<RawLibrary, OsDiagnostic> {
        let name = c_name(library, "library")?;
        clear_dlerror();
        // SAFETY: `name` is a valid C string for the duration of the call.
        let handle = unsafe { libc::dlopen(name.as_ptr(), native_flags(flags)) };
        match NonNull::new(handle) {
            // SAFETY: non-null dlopen result is a live handle for this loader.
            Some(ptr) => Ok(unsafe { RawLibrary::from_ptr(ptr) }),
            None => Err(take_dlerror("shared object not found")),
        }
    }

    fn resolve(&self, library: RawLibrary, symbol: &str) -> Result<RawSymbol, OsDiagnostic> {
        let name = c_name(symbol, "symbol")?;
        clear_dlerror();
        // SAFETY: `library` came from dlopen and has not been closed (the
        // handle type enforces this); `name` is a valid C string.
        let sym = unsafe { libc::dlsym(library.as_ptr(), name.as_ptr()) };
        NonNull::new(sym)
            .map(RawSymbol::new)
            .ok_or_else(|| take_dlerror(&format!("undefined symbol: {symbol}")))
    }

    fn close(&self, library: RawLibrary) -> Result<(), OsDiagnostic> {
        clear_dlerror();
        // SAFETY: `library` came from dlopen and is released exactly once.
        let rc = unsafe { libc::dlclose(library.as_ptr()) };
        if rc == 0 {
            Ok(())
        } else {
            Err(take_dlerror("invalid handle"))
        }
    }
}
