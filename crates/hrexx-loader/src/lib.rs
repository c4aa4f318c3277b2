//! # hrexx-loader
//!
//! Dynamic-library binding for REXX runtimes.
//!
//! ```text
//! RuntimeEntry (hrexx-core) -> Binder -> PlatformLoader (dlopen / LoadLibrary) -> Binding
//! ```
//!
//! [`platform::PlatformLoader`] unifies the OS loader calls behind one trait
//! with a single implementation per target. [`Binder`] opens a runtime's
//! library and resolves its whole API or nothing. Failures are returned as
//! [`LoaderError`]/[`BindFailure`] values; this crate never logs.
//!
//! Everything here is synchronous and unlocked. A [`Binding`] is `Send` and
//! `Sync` but has a single owner; callers sharing one across threads wrap it
//! in a `Mutex`.

pub mod binding;
pub mod error;
pub mod handle;
pub mod platform;
pub mod saa;

pub use binding::{Binder, Binding};
pub use error::{BindFailure, LoaderError};
pub use handle::{LibraryHandle, SymbolTable};
pub use platform::{OsDiagnostic, PlatformLoader, RawLibrary, RawSymbol, SystemLoader};
pub use saa::RexxEntryPoints;
