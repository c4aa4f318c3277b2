//! Binding orchestrator: open a runtime library and resolve its API, all or
//! nothing.
//!
//! ```text
//! RuntimeEntry -> Binder::bind -> open -> resolve* -> Binding
//!                                   \-- first failure -> close -> BindFailure
//! ```
//!
//! A failed attempt never leaves a library open and is never retried against
//! another package; choosing a different package is up to the caller.

use hrexx_core::dlfcn::LoadFlags;
use hrexx_core::registry::RuntimeEntry;

use crate::error::{BindFailure, LoaderError};
use crate::handle::{LibraryHandle, SymbolTable};
use crate::platform::{PlatformLoader, SystemLoader};
use crate::saa::RexxEntryPoints;

/// Produces [`Binding`]s through one loader.
#[derive(Debug, Clone)]
pub struct Binder<L = SystemLoader> {
    loader: L,
    flags: LoadFlags,
}

impl Binder<SystemLoader> {
    /// Binder using the platform loader and `RTLD_NOW`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_loader(SystemLoader::default())
    }
}

impl Default for Binder<SystemLoader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: PlatformLoader + Clone> Binder<L> {
    #[must_use]
    pub fn with_loader(loader: L) -> Self {
        Self {
            loader,
            flags: LoadFlags::default(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: LoadFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn flags(&self) -> LoadFlags {
        self.flags
    }

    #[must_use]
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Open `entry.library` and resolve every symbol in `entry.symbols`, in
    /// order.
    ///
    /// On the first resolution failure the library is closed before
    /// returning. A failure to close is attached as `cleanup` and does not
    /// replace the resolution error.
    pub fn bind(&self, entry: &RuntimeEntry) -> Result<Binding<L>, BindFailure> {
        let mut handle =
            LibraryHandle::open(&self.loader, &entry.package, &entry.library, self.flags)?;

        let mut symbols = SymbolTable::new();
        for &name in entry.symbols {
            match handle.resolve(&self.loader, name) {
                Ok(sym) => symbols.push(name, sym),
                Err(error) => {
                    let cleanup = handle.close(&self.loader).err();
                    return Err(BindFailure { error, cleanup });
                }
            }
        }

        Ok(Binding {
            loader: self.loader.clone(),
            entry: entry.clone(),
            handle,
            symbols,
        })
    }
}

/// A runtime library held open together with its resolved symbols.
///
/// Released by [`Binding::teardown`]. Dropping a binding that was not torn
/// down releases the library and discards any error.
#[derive(Debug)]
pub struct Binding<L: PlatformLoader = SystemLoader> {
    loader: L,
    entry: RuntimeEntry,
    handle: LibraryHandle,
    symbols: SymbolTable,
}

impl<L: PlatformLoader> Binding<L> {
    #[must_use]
    pub fn package(&self) -> &str {
        &self.entry.package
    }

    #[must_use]
    pub fn entry(&self) -> &RuntimeEntry {
        &self.entry
    }

    #[must_use]
    pub fn handle(&self) -> &LibraryHandle {
        &self.handle
    }

    /// Resolved symbols; empty after teardown.
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.handle.is_open()
    }

    /// Typed SAA entry points, while bound.
    ///
    /// # Safety
    ///
    /// The bound library must implement the SAA REXX API with the standard
    /// signatures, and the pointers must not be called after teardown.
    #[must_use]
    pub unsafe fn entry_points(&self) -> Option<RexxEntryPoints> {
        if !self.is_bound() {
            return None;
        }
        // SAFETY: forwarded to the caller.
        unsafe { RexxEntryPoints::from_table(&self.symbols) }
    }

    /// Close the library and drop the symbol table.
    ///
    /// Calling this on a binding already torn down is an error.
    pub fn teardown(&mut self) -> Result<(), LoaderError> {
        self.symbols = SymbolTable::new();
        self.handle.close(&self.loader)
    }
}

impl<L: PlatformLoader> Drop for Binding<L> {
    fn drop(&mut self) {
        if self.handle.is_open() {
            let _ = self.handle.close(&self.loader);
        }
    }
}
