//! In-place whitespace trimming of NUL-terminated buffers.
//!
//! The buffer is rewritten: content is shifted to index 0 and trailing
//! whitespace is overwritten with NUL bytes. The caller's original text is
//! not preserved.

use crate::ctype::{c_strlen, is_space};

/// Trims leading and trailing whitespace from `buf` in place.
///
/// `buf` holds a NUL-terminated string; a buffer with no NUL is terminated by
/// the end of the slice. Leading whitespace is removed by shifting the rest of
/// the string (terminator included) to the front, then trailing whitespace is
/// replaced with NUL bytes, scanning backwards and stopping at index 0.
///
/// Returns the trimmed content, which always starts at `buf[0]`. An empty or
/// all-whitespace buffer yields an empty slice.
pub fn trim(buf: &mut [u8]) -> &mut [u8] {
    let end = c_strlen(buf);

    let mut skip = 0;
    while skip < end && is_space(buf[skip]) {
        skip += 1;
    }

    let mut len = end - skip;
    if skip > 0 {
        buf.copy_within(skip..end, 0);
        // `skip > 0` guarantees room for the shifted terminator.
        buf[len] = 0;
    }

    while len > 0 && is_space(buf[len - 1]) {
        buf[len - 1] = 0;
        len -= 1;
    }

    &mut buf[..len]
}

/// Borrowing counterpart of [`trim`] for text that need not be rewritten.
#[must_use]
pub fn trim_str(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_ascii() && is_space(c as u8))
}
