use std::borrow::Cow;
use std::str;

use crate::error::{Error, Result};

#[inline(always)]
fn char_to_digit(c: u8) -> Option<u8> {
    char::from(c).to_digit(16).map(|d| d as u8)
}

/// Decodes one key or value, applying the following:
/// - Replaces `+` with a space
/// - Decodes percent-encoded characters
/// - Checks the result is UTF-8
///
/// A `%` that is not followed by two hex digits is an error carrying the `%`
/// and up to two bytes after it.
pub fn decode(input: &[u8]) -> Result<Cow<'_, str>> {
    if !input.iter().any(|&b| b == b'+' || b == b'%') {
        // nothing to decode, just check for UTF-8
        return Ok(Cow::Borrowed(str::from_utf8(input)?));
    }

    let mut decoded = Vec::with_capacity(input.len());
    let mut last_segment = 0;
    let mut idx = 0;

    while idx < input.len() {
        match input[idx] {
            b'+' => {
                decoded.extend_from_slice(&input[last_segment..idx]);
                decoded.push(b' ');
                idx += 1;
                last_segment = idx;
            }
            b'%' => {
                let (Some(h), Some(l)) = (
                    input.get(idx + 1).copied().and_then(char_to_digit),
                    input.get(idx + 2).copied().and_then(char_to_digit),
                ) else {
                    let end = input.len().min(idx + 3);
                    return Err(Error::InvalidEscape(
                        String::from_utf8_lossy(&input[idx..end]).into_owned(),
                    ));
                };
                decoded.extend_from_slice(&input[last_segment..idx]);
                decoded.push(h * 0x10 + l);
                idx += 3;
                last_segment = idx;
            }
            _ => idx += 1,
        }
    }

    decoded.extend_from_slice(&input[last_segment..]);
    String::from_utf8(decoded)
        .map(Cow::Owned)
        .map_err(|e| Error::Utf8(e.utf8_error()))
}
