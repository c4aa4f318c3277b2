//! Command-line probe for REXX runtime bindings.
//!
//! This crate provides:
//! - Invocation parsing: trim + tokenize a host command line
//! - Registry listing: the built-in runtime table for this OS
//! - Bind probe: bind, report the symbol table, tear down
//! - Script lookup: first existing search candidate
//! - Structured logging: JSONL sink for the error-reporting channel

#![forbid(unsafe_code)]

pub mod error;
pub mod invocation;
pub mod locate;
pub mod probe;
pub mod registry_view;
pub mod structured_log;

pub use error::HarnessError;
pub use invocation::{ParsedInvocation, parse_invocation};
pub use probe::{BindSummary, probe};
pub use structured_log::{LogEmitter, LogEntry, LogLevel};
