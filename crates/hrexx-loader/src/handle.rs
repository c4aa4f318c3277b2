//! Library handles and resolved symbol tables.

use hrexx_core::dlfcn::{self as dlfcn_core, LoadFlags};

use crate::error::LoaderError;
use crate::platform::{OsDiagnostic, PlatformLoader, RawLibrary, RawSymbol};

const ERR_HANDLE_CLOSED: &str = "library handle is not open";
const ERR_EMPTY_NAME: &str = "empty library name";

/// Ownership token for one loaded library.
///
/// Either open (usable for symbol resolution) or closed. Closing is one-way;
/// every operation on a closed handle fails.
#[derive(Debug, PartialEq, Eq)]
pub struct LibraryHandle {
    package: String,
    library: String,
    raw: Option<RawLibrary>,
}

impl LibraryHandle {
    /// Load `library` on behalf of `package`.
    ///
    /// A blank `library` and invalid `flags` are rejected before the OS
    /// loader is consulted; `dlopen("")` would hand back the main program.
    pub fn open<L: PlatformLoader + ?Sized>(
        loader: &L,
        package: &str,
        library: &str,
        flags: LoadFlags,
    ) -> Result<Self, LoaderError> {
        let open_error = |diagnostic| LoaderError::LibraryOpen {
            package: package.to_string(),
            library: library.to_string(),
            diagnostic,
        };

        if hrexx_core::trim_str(library).is_empty() {
            return Err(open_error(OsDiagnostic::new(ERR_EMPTY_NAME)));
        }
        if !flags.is_valid() {
            return Err(open_error(OsDiagnostic::new(dlfcn_core::ERR_INVALID_FLAGS)));
        }
        let raw = loader.open(library, flags).map_err(open_error)?;
        Ok(Self {
            package: package.to_string(),
            library: library.to_string(),
            raw: Some(raw),
        })
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.raw.is_some()
    }

    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    #[must_use]
    pub fn library(&self) -> &str {
        &self.library
    }

    /// The OS handle while open.
    #[must_use]
    pub fn raw(&self) -> Option<RawLibrary> {
        self.raw
    }

    /// Resolve `symbol` in this library.
    pub fn resolve<L: PlatformLoader + ?Sized>(
        &self,
        loader: &L,
        symbol: &str,
    ) -> Result<RawSymbol, LoaderError> {
        let resolve_error = |diagnostic| LoaderError::SymbolResolution {
            package: self.package.clone(),
            symbol: symbol.to_string(),
            diagnostic,
        };

        let raw = self
            .raw
            .ok_or_else(|| resolve_error(OsDiagnostic::new(ERR_HANDLE_CLOSED)))?;
        loader.resolve(raw, symbol).map_err(resolve_error)
    }

    /// Release the library.
    ///
    /// The handle is closed afterwards even if the OS reports a failure; a
    /// second close is an error, not a no-op.
    pub fn close<L: PlatformLoader + ?Sized>(&mut self, loader: &L) -> Result<(), LoaderError> {
        let close_error = |diagnostic| LoaderError::LibraryClose {
            package: self.package.clone(),
            library: self.library.clone(),
            diagnostic,
        };

        let raw = self
            .raw
            .take()
            .ok_or_else(|| close_error(OsDiagnostic::new(ERR_HANDLE_CLOSED)))?;
        loader.close(raw).map_err(close_error)
    }
}

/// Symbols resolved from one library, in resolution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: Vec<(&'static str, RawSymbol)>,
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, symbol: RawSymbol) {
        self.entries.push((name, symbol));
    }

    /// Address of `name`, if it was resolved.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<RawSymbol> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, sym)| *sym)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, RawSymbol)> + '_ {
        self.entries.iter().copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
