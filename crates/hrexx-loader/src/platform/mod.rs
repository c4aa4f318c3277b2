//! Platform loader abstraction: open, resolve, close.
//!
//! [`PlatformLoader`] is the only interface the rest of the crate uses.
//! [`SystemLoader`] is the implementation for the build target: `dlopen`
//! family on Unix, `LoadLibrary` family on Windows. Failures come back as an
//! [`OsDiagnostic`] carrying the loader's own text verbatim.

use std::ffi::c_void;
use std::fmt;
use std::ptr::NonNull;

use hrexx_core::dlfcn::LoadFlags;

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::UnixLoader as SystemLoader;
#[cfg(windows)]
pub use windows::WindowsLoader as SystemLoader;

/// Raw OS handle for a loaded library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawLibrary(NonNull<c_void>);

impl RawLibrary {
    /// Wrap a handle produced by a loader.
    ///
    /// # Safety
    ///
    /// `ptr` must be a live handle that the [`PlatformLoader`] it will be
    /// passed to recognizes (for a fake loader, any value it handed out).
    #[must_use]
    pub unsafe fn from_ptr(ptr: NonNull<c_void>) -> Self {
        Self(ptr)
    }

    #[must_use]
    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }
}

// SAFETY: a loader handle is an opaque process-wide token; dlclose/FreeLibrary
// may be called from any thread. Mutation goes through `&mut LibraryHandle`.
unsafe impl Send for RawLibrary {}
// SAFETY: shared references expose only the address value.
unsafe impl Sync for RawLibrary {}

/// Address of a resolved symbol. Never null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawSymbol(NonNull<c_void>);

impl RawSymbol {
    #[must_use]
    pub fn new(ptr: NonNull<c_void>) -> Self {
        Self(ptr)
    }

    #[must_use]
    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }

    #[must_use]
    pub fn addr(self) -> usize {
        self.0.as_ptr() as usize
    }
}

// SAFETY: symbol addresses stay valid process-wide while the library is
// loaded; this type never dereferences them.
unsafe impl Send for RawSymbol {}
// SAFETY: as above; the address is immutable.
unsafe impl Sync for RawSymbol {}

/// Loader failure as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsDiagnostic {
    /// OS error number, where the platform has one (`GetLastError`).
    pub code: Option<i32>,
    pub message: String,
}

impl OsDiagnostic {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: i32) -> Self {
        self.code = Some(code);
        self
    }
}

impl fmt::Display for OsDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} (os error {code})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// The three loader operations, uniform across operating systems.
///
/// Implementations perform blocking calls with no internal locking.
pub trait PlatformLoader {
    /// Load `library` by absolute path or through the OS default search rules.
    ///
    /// Loading runs the library's initialization routines. `flags` has
    /// already been validated by the caller.
    fn open(&self, library: &str, flags: LoadFlags) -> Result<RawLibrary, OsDiagnostic>;

    /// Look up the exported symbol `symbol` by exact name.
    fn resolve(&self, library: RawLibrary, symbol: &str) -> Result<RawSymbol, OsDiagnostic>;

    /// Release `library`. The handle must not be used again, whatever the result.
    fn close(&self, library: RawLibrary) -> Result<(), OsDiagnostic>;
}

impl<L: PlatformLoader + ?Sized> PlatformLoader for &L {
    fn open(&self, library: &str, flags: LoadFlags) -> Result<RawLibrary, OsDiagnostic> {
        (**self).open(library, flags)
    }

    fn resolve(&self, library: RawLibrary, symbol: &str) -> Result<RawSymbol, OsDiagnostic> {
        (**self).resolve(library, symbol)
    }

    fn close(&self, library: RawLibrary) -> Result<(), OsDiagnostic> {
        (**self).close(library)
    }
}
