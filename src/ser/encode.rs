use std::borrow::Cow;

use percent_encoding::AsciiSet;

/// Query component escaping, as done by most query-string encoders.
///
/// Everything except the ASCII alphanumerics and `-`, `.`, `_`, `~` is
/// percent-encoded. Space is left in the set's complement here and written
/// as `+` by [`encode`].
const QUERY_SET: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b' ')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// As defined in https://url.spec.whatwg.org/#application-x-www-form-urlencoded-percent-encode-set
///
/// The application/x-www-form-urlencoded percent-encode set contains all code points, except the ASCII alphanumeric,
/// U+002A (*), U+002D (-), U+002E (.), and U+005F (_).
const FORM_URLENCODED_SET: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Escapes one key or value.
///
/// ## Query escaping (default)
/// Spaces are written as `+`.
///
/// ## Form encoding
/// The stricter `application/x-www-form-urlencoded` set. Spaces are
/// percent-encoded as `%20`.
///
/// Borrows the input when nothing needs escaping.
pub fn encode(s: &str, use_form_encoding: bool) -> Cow<'_, str> {
    let set = if use_form_encoding {
        FORM_URLENCODED_SET
    } else {
        QUERY_SET
    };
    let escaped: Cow<'_, str> = percent_encoding::utf8_percent_encode(s, set).into();
    if !use_form_encoding && escaped.contains(' ') {
        Cow::Owned(escaped.replace(' ', "+"))
    } else {
        escaped
    }
}
