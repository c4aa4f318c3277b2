//! # hrexx-core
//!
//! Safe building blocks for binding a host application to an installed REXX
//! runtime (Regina or ooRexx) and for dispatching `name(arg arg ...)`
//! invocation strings.
//!
//! - [`string`]: in-place trimming and invocation tokenizing over caller-owned
//!   byte buffers.
//! - [`registry`]: known runtime packages, their per-OS library names and the
//!   SAA REXX symbols a binding must resolve.
//! - [`search`]: script search conventions (delimiters, extensions, path join).
//! - [`message`]: message codes and reports for the error-reporting channel.
//! - [`config`]: environment-driven runtime selection.
//! - [`dlfcn`]: loader mode flags.
//!
//! No `unsafe` code is permitted at the crate level; the FFI boundary lives in
//! `hrexx-loader`.

#![deny(unsafe_code)]

pub mod config;
pub mod ctype;
pub mod dlfcn;
pub mod message;
pub mod registry;
pub mod search;
pub mod string;

pub use config::RuntimeConfig;
pub use message::{MessageCode, Report, Severity};
pub use registry::{RuntimeEntry, RuntimePackage};
pub use string::{CommandArgs, parse_command, trim, trim_str};
