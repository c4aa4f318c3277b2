//! `LoadLibraryA`/`GetProcAddress`/`FreeLibrary` loader.
//!
//! Load flags are validated by the caller and otherwise ignored; Windows
//! binds imports at load time.

use std::ffi::{CString, c_char, c_int, c_void};
use std::ptr::NonNull;

use hrexx_core::dlfcn::LoadFlags;

use super::{OsDiagnostic, PlatformLoader, RawLibrary, RawSymbol};

#[link(name = "kernel32")]
unsafe extern "system" {
    fn LoadLibraryA(name: *const c_char) -> *mut c_void;
    fn GetProcAddress(module: *mut c_void, name: *const c_char) -> *mut c_void;
    fn FreeLibrary(module: *mut c_void) -> c_int;
}

/// Loader backed by the Win32 module loader.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WindowsLoader;

fn c_name(name: &str, what: &str) -> Result<CString, OsDiagnostic> {
    CString::new(name).map_err(|_| OsDiagnostic::new(format!("{what} name contains a NUL byte")))
}

fn last_error() -> OsDiagnostic {
    let err = std::io::Error::last_os_error();
    let diag = OsDiagnostic::new(err.to_string());
    match err.raw_os_error() {
        Some(code) => diag.with_code(code),
        None => diag,
    }
}

impl PlatformLoader for WindowsLoader {
    fn open(&self, library: &str, _flags: LoadFlags) -> Result<RawLibrary, OsDiagnostic> {
        let name = c_name(library, "library")?;
        // SAFETY: `name` is a valid C string for the duration of the call.
        let module = unsafe { LoadLibraryA(name.as_ptr()) };
        match NonNull::new(module) {
            // SAFETY: non-null LoadLibraryA result is a live module handle.
            Some(ptr) => Ok(unsafe { RawLibrary::from_ptr(ptr) }),
            None => Err(last_error()),
        }
    }

    fn resolve(&self, library: RawLibrary, symbol: &str) -> Result<RawSymbol, OsDiagnostic> {
        let name = c_name(symbol, "symbol")?;
        // SAFETY: `library` is a live module handle; `name` is a valid C string.
        let proc = unsafe { GetProcAddress(library.as_ptr(), name.as_ptr()) };
        NonNull::new(proc).map(RawSymbol::new).ok_or_else(last_error)
    }

    fn close(&self, library: RawLibrary) -> Result<(), OsDiagnostic> {
        // SAFETY: `library` is a live module handle released exactly once.
        if unsafe { FreeLibrary(library.as_ptr()) } == 0 {
            Err(last_error())
        } else {
            Ok(())
        }
    }
}
