//! Command-line view of the invocation tokenizer.
//!
//! The input is copied into a NUL-terminated buffer, trimmed, then split, the
//! same path a host command line takes before dispatch.

use hrexx_core::{parse_command, trim};
use serde::Serialize;

/// Default argument cap for `hrexx parse`.
pub const DEFAULT_MAX_ARGS: usize = 64;

/// Tokenizer output as printed by `hrexx parse`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedInvocation {
    pub count: usize,
    pub args: Vec<String>,
}

/// Trim and tokenize `input`, keeping at most `max_args` entries.
#[must_use]
pub fn parse_invocation(input: &str, max_args: usize) -> ParsedInvocation {
    let mut buf = Vec::with_capacity(input.len() + 1);
    buf.extend_from_slice(input.as_bytes());
    buf.push(0);

    let len = trim(&mut buf).len();
    let args = parse_command(&mut buf[..=len], max_args).to_strings();
    ParsedInvocation {
        count: args.len(),
        args,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name() {
        let parsed = parse_invocation("foo", 5);
        assert_eq!(parsed.count, 1);
        assert_eq!(parsed.args, ["foo"]);
    }

    #[test]
    fn outer_blanks_are_trimmed_first() {
        let parsed = parse_invocation("   foo  ( x )  ", 5);
        assert_eq!(parsed.args, ["foo  ", "x", ")"]);
    }

    #[test]
    fn cap_applies() {
        let parsed = parse_invocation("foo(a b c)", 2);
        assert_eq!(parsed.args, ["foo", "a"]);
        assert_eq!(parsed.count, 2);
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(parse_invocation("", 5).count, 0);
        assert_eq!(parse_invocation(" \t ", 5).count, 0);
    }

    #[test]
    fn serializes_count_and_args() {
        let json = serde_json::to_value(parse_invocation("say(hi)", 5)).unwrap();
        assert_eq!(json, serde_json::json!({"count": 2, "args": ["say", "hi)"]}));
    }
}
