use std::io::Write;

use crate::error::Result;
use crate::reflect::Reflect;
use crate::ser::Encoder;
use crate::values::Values;

/// Configuration for parsing, decoding and encoding.
///
/// ```
/// use urlform::{Config, Form};
///
/// #[derive(Debug, Default, Form)]
/// struct Query {
///     pub q: String,
/// }
///
/// let config = Config::new().semicolon_separator(false);
/// let query: Query = config.decode_str("q=a;b").unwrap();
/// assert_eq!(query.q, "a;b");
///
/// let config = Config::new().use_form_encoding(true);
/// assert_eq!(config.serialize_string(&query).unwrap(), "q=a%3Bb");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub(crate) use_form_encoding: bool,
    pub(crate) semicolon_separator: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            use_form_encoding: cfg!(feature = "default_to_form_encoding"),
            semicolon_separator: true,
        }
    }

    /// By default, keys and values are escaped the way query strings
    /// usually are: ASCII alphanumerics and `-`, `.`, `_`, `~` are kept,
    /// spaces become `+`.
    ///
    /// With form encoding the stricter
    /// [`application/x-www-form-urlencoded`](https://url.spec.whatwg.org/#application-x-www-form-urlencoded-percent-encode-set)
    /// set is used and spaces become `%20`.
    ///
    /// Alternatively, you can use the `default_to_form_encoding` Cargo feature
    /// to set this to `true` by default.
    pub const fn use_form_encoding(mut self, use_form_encoding: bool) -> Self {
        self.use_form_encoding = use_form_encoding;
        self
    }

    /// Whether `;` separates pairs like `&` does. Default is `true`.
    pub const fn semicolon_separator(mut self, semicolon_separator: bool) -> Self {
        self.semicolon_separator = semicolon_separator;
        self
    }

    /// Splits wire bytes into their key/value pairs.
    pub fn parse_bytes(self, input: &[u8]) -> Result<Values> {
        crate::de::parse::parse(input, self)
    }

    /// Decodes a struct from a `&[u8]` using this `Config`.
    pub fn decode_bytes<T: Reflect + Default>(self, input: &[u8]) -> Result<T> {
        let mut value = T::default();
        self.decode_bytes_into(input, &mut value)?;
        Ok(value)
    }

    /// Decodes a struct from a `&str` using this `Config`.
    pub fn decode_str<T: Reflect + Default>(self, input: &str) -> Result<T> {
        self.decode_bytes(input.as_bytes())
    }

    /// Decodes into an existing value using this `Config`.
    pub fn decode_bytes_into(self, input: &[u8], dst: &mut dyn Reflect) -> Result<()> {
        let src = self.parse_bytes(input)?;
        crate::de::decode_values(&src, dst)
    }

    /// Encodes a struct to a query string using this `Config`.
    pub fn serialize_string(self, input: &dyn Reflect) -> Result<String> {
        let mut output = String::with_capacity(128);
        for (key, value) in crate::ser::to_pairs(input)? {
            crate::ser::write_pair(&mut output, &key, &value, self.use_form_encoding);
        }
        Ok(output)
    }

    /// Encodes a struct into a writer using this `Config`.
    pub fn serialize_to_writer<W: Write>(self, input: &dyn Reflect, writer: &mut W) -> Result<()> {
        Encoder::new(writer, self).encode(input)
    }
}
