//! Codecs for sequences packed into a single value.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::codec::{BoxError, TextCodec};
use crate::reflect::{Reflect, ReflectMut, ReflectRef};

/// A sequence written as one value, its elements joined by `DELIM`.
///
/// Decoding appends the elements of every value for the key, so
/// `ids=1,2&ids=3` decodes to `[1, 2, 3]`. Empty values add nothing.
///
/// ## Example
///
/// ```
/// use urlform::Form;
/// use urlform::helpers::Delimited;
///
/// #[derive(Debug, Default, PartialEq, Form)]
/// struct Query {
///     pub values: Delimited<u8, '.'>,
/// }
///
/// let query = Query { values: Delimited(vec![1, 2, 3]) };
/// let serialized = urlform::to_string(&query).unwrap();
/// assert_eq!(serialized, "values=1.2.3");
/// assert_eq!(urlform::from_str::<Query>(&serialized).unwrap(), query);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Delimited<T, const DELIM: char>(pub Vec<T>);

/// Comma-separated values, e.g. `ids=1,2,3`.
///
/// Equivalent to `style=form, explode=false` query parameters in [OpenAPI 3.0](https://swagger.io/docs/specification/v3_0/serialization/#query-parameters)
pub type CommaSeparated<T> = Delimited<T, ','>;

/// Pipe-delimited values, e.g. `ids=1|2|3`.
///
/// Equivalent to `style=pipeDelimited` query parameters in [OpenAPI 3.0](https://swagger.io/docs/specification/v3_0/serialization/#query-parameters)
pub type PipeDelimited<T> = Delimited<T, '|'>;

/// Space-delimited values, e.g. `ids=1+2+3`.
///
/// Equivalent to `style=spaceDelimited` query parameters in [OpenAPI 3.0](https://swagger.io/docs/specification/v3_0/serialization/#query-parameters)
pub type SpaceDelimited<T> = Delimited<T, ' '>;

impl<T, const DELIM: char> Default for Delimited<T, DELIM> {
    fn default() -> Self {
        Delimited(Vec::new())
    }
}

impl<T: fmt::Debug, const DELIM: char> fmt::Debug for Delimited<T, DELIM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.0).finish()
    }
}

impl<T, const DELIM: char> From<Vec<T>> for Delimited<T, DELIM> {
    fn from(values: Vec<T>) -> Self {
        Delimited(values)
    }
}

impl<T, const DELIM: char> std::ops::Deref for Delimited<T, DELIM> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T, const DELIM: char> TextCodec for Delimited<T, DELIM>
where
    T: FromStr + Display,
    <T as FromStr>::Err: Display,
{
    fn encode_text(&self) -> Result<String, BoxError> {
        let mut text = String::new();
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                text.push(DELIM);
            }
            text.push_str(&value.to_string());
        }
        Ok(text)
    }

    fn decode_text(&mut self, text: &str) -> Result<(), BoxError> {
        if text.is_empty() {
            return Ok(());
        }
        for piece in text.split(DELIM) {
            let value = piece
                .parse::<T>()
                .map_err(|e| BoxError::from(format!("{piece:?}: {e}")))?;
            self.0.push(value);
        }
        Ok(())
    }

    fn is_empty_text(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T, const DELIM: char> Reflect for Delimited<T, DELIM>
where
    T: FromStr + Display,
    <T as FromStr>::Err: Display,
{
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Codec(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Codec(self)
    }

    fn resolves_to_codec() -> bool {
        true
    }
}
