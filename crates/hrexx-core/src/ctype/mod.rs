//! Character classification for invocation text.
//!
//! C locale only. Invocation strings are ASCII by contract; bytes above
//! 0x7F are never whitespace and pass through as ordinary content.

/// Returns `true` if `c` is a whitespace character.
///
/// Whitespace: space, tab, newline, vertical tab, form feed, carriage return.
#[inline]
pub fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Returns `true` if `c` terminates a C string.
#[inline]
pub fn is_nul(c: u8) -> bool {
    c == 0
}

/// Length of the NUL-terminated string held in `buf`.
///
/// A buffer without a NUL byte is terminated by the end of the slice.
#[inline]
pub fn c_strlen(buf: &[u8]) -> usize {
    buf.iter().position(|&c| is_nul(c)).unwrap_or(buf.len())
}
