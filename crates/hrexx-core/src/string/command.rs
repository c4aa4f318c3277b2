//! Invocation string tokenizer: `name` or `name(arg arg ...)`.
//!
//! Like `strtok`, this writes NUL bytes over delimiter positions in the
//! caller's buffer and hands back token boundaries instead of copies. The
//! buffer is consumed destructively; read the tokens through the returned
//! [`CommandArgs`], which borrows it.
//!
//! There is no closing-parenthesis handling. A `)` is ordinary content of
//! whichever argument it touches: `foo(a b)` yields `foo`, `a`, `b)`.

use std::ops::Range;

use crate::ctype::{c_strlen, is_space};

/// Argument vector produced by [`parse_command`].
///
/// Holds at most `capacity` views into the tokenized buffer. Entry 0, when
/// present, is the command name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArgs<'a> {
    buf: &'a [u8],
    spans: Vec<Range<usize>>,
    capacity: usize,
}

impl<'a> CommandArgs<'a> {
    /// Number of entries produced.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The `argm` cap this vector was produced under.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entry `index`, without its NUL terminator.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a [u8]> {
        let buf = self.buf;
        self.spans.get(index).map(|span| &buf[span.clone()])
    }

    /// The command name (entry 0).
    #[must_use]
    pub fn name(&self) -> Option<&'a [u8]> {
        self.get(0)
    }

    /// Arguments following the command name.
    pub fn args(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        self.iter().skip(1)
    }

    /// All entries in order, command name first.
    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        let buf = self.buf;
        self.spans.iter().map(move |span| &buf[span.clone()])
    }

    /// Byte offsets of each entry within the tokenized buffer.
    #[must_use]
    pub fn spans(&self) -> &[Range<usize>] {
        &self.spans
    }

    /// Owned copies of every entry, lossily decoded as UTF-8.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.iter()
            .map(|arg| String::from_utf8_lossy(arg).into_owned())
            .collect()
    }
}

fn skip_space(buf: &[u8], mut pos: usize, end: usize) -> usize {
    while pos < end && is_space(buf[pos]) {
        pos += 1;
    }
    pos
}

/// Splits an invocation string into a command name and up to `argm - 1`
/// arguments.
///
/// `buf` holds a NUL-terminated string (or ends at the slice end). The name
/// runs from the first non-whitespace byte to the first `(`; it keeps any
/// whitespace preceding the `(`. If a `(` is present it is overwritten with
/// NUL, and the remainder is split on runs of whitespace, each token's
/// trailing delimiter overwritten with NUL. Scanning stops once `argm`
/// entries have been produced, leaving the rest of the buffer unparsed.
pub fn parse_command(buf: &mut [u8], argm: usize) -> CommandArgs<'_> {
    let end = c_strlen(buf);
    let mut spans = Vec::with_capacity(argm.min(end + 1));

    if argm > 0 {
        tokenize(buf, end, argm, &mut spans);
    }

    CommandArgs {
        buf,
        spans,
        capacity: argm,
    }
}

fn tokenize(buf: &mut [u8], end: usize, argm: usize, spans: &mut Vec<Range<usize>>) {
    // argv[0]
    let mut pos = skip_space(buf, 0, end);
    if pos >= end {
        return;
    }
    let name_start = pos;
    while pos < end && buf[pos] != b'(' {
        pos += 1;
    }
    spans.push(name_start..pos);
    if pos >= end {
        return;
    }

    buf[pos] = 0;
    pos += 1;

    while pos < end && spans.len() < argm {
        pos = skip_space(buf, pos, end);
        if pos >= end {
            return;
        }

        let start = pos;
        while pos < end && !is_space(buf[pos]) {
            pos += 1;
        }
        spans.push(start..pos);
        if pos >= end {
            return;
        }

        buf[pos] = 0;
        pos += 1;
    }
}
