//! In-place string operations over caller-owned byte buffers.
//!
//! Both operations rewrite the buffer they are given and return views into
//! it rather than copies.

pub mod command;
pub mod trim;

pub use command::{CommandArgs, parse_command};
pub use trim::{trim, trim_str};
