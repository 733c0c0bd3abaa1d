//! Splitting wire bytes into [`Values`].

use crate::error::Result;
use crate::values::Values;

mod decode;

/// Parses a query string or urlencoded body into its key/value pairs.
///
/// Pairs are separated by `&`, and by `;` when the config allows it. Empty
/// pairs are skipped, and a pair without `=` is a key with an empty value.
pub fn parse(encoded: &[u8], config: crate::Config) -> Result<Values> {
    let mut parser = Parser::new(encoded, config);
    let mut output = Values::new();
    parser.parse(&mut output)?;

    Ok(output)
}

/// A stateful pair splitter.
///
/// Walks the input once, slicing out each pair without copying; only keys
/// and values that carry escapes are decoded into fresh buffers.
struct Parser<'qs> {
    inner: &'qs [u8],
    index: usize,
    config: crate::Config,
}

impl<'qs> Parser<'qs> {
    fn new(encoded: &'qs [u8], config: crate::Config) -> Self {
        Parser {
            inner: encoded,
            index: 0,
            config,
        }
    }

    fn is_separator(&self, b: u8) -> bool {
        b == b'&' || (b == b';' && self.config.semicolon_separator)
    }

    /// The next pair, up to the next separator or the end of the input.
    fn next_pair(&mut self) -> Option<&'qs [u8]> {
        if self.index > self.inner.len() {
            return None;
        }
        let inner = self.inner;
        let rest = &inner[self.index..];
        let end = rest
            .iter()
            .position(|&b| self.is_separator(b))
            .unwrap_or(rest.len());
        self.index += end + 1;
        Some(&rest[..end])
    }

    fn parse(&mut self, output: &mut Values) -> Result<()> {
        if self.inner.is_empty() {
            // empty string -- nothing to parse
            return Ok(());
        }
        while let Some(pair) = self.next_pair() {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = match pair.iter().position(|&b| b == b'=') {
                Some(eq) => (&pair[..eq], &pair[eq + 1..]),
                None => (pair, &[][..]),
            };
            let key = decode::decode(key)?;
            let value = decode::decode(value)?;
            output.add(key, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{Config, Error, Values};

    use super::parse;

    use pretty_assertions::assert_eq;

    static DEFAULT_CONFIG: Config = Config::new();

    fn values(pairs: &[(&str, &str)]) -> Values {
        pairs.iter().copied().collect()
    }

    #[test]
    fn parse_empty() {
        let parsed = parse(b"", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, Values::new());
    }

    #[test]
    fn parse_map() {
        let parsed = parse(b"abc=def", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, values(&[("abc", "def")]));
    }

    #[test]
    fn parse_map_no_value() {
        let parsed = parse(b"abc&def=", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, values(&[("abc", ""), ("def", "")]));
    }

    #[test]
    fn parse_repeated_keys_in_order() {
        let parsed = parse(b"Ints=3&Ints=1;Ints=2", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed.get_all("Ints"), ["3", "1", "2"]);
    }

    #[test]
    fn parse_skips_empty_pairs() {
        let parsed = parse(b"&&a=1&;&b=2&", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, values(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn parse_without_semicolons() {
        let config = Config::new().semicolon_separator(false);
        let parsed = parse(b"a=1;b=2", config).unwrap();
        assert_eq!(parsed, values(&[("a", "1;b=2")]));
    }

    #[test]
    fn parse_decodes_keys_and_values() {
        let parsed = parse(b"first+name=Ada%20Lovelace&eq=a%3Db", DEFAULT_CONFIG).unwrap();
        assert_eq!(
            parsed,
            values(&[("first name", "Ada Lovelace"), ("eq", "a=b")])
        );
    }

    #[test]
    fn parse_value_with_equals() {
        let parsed = parse(b"a=b=c", DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed.get("a"), Some("b=c"));
    }

    #[test]
    fn parse_invalid_escape() {
        let err = parse(b"a=100%", DEFAULT_CONFIG).unwrap_err();
        assert_eq!(err.to_string(), r#"invalid URL escape "%""#);
        assert!(matches!(err, Error::InvalidEscape(_)));
    }
}
