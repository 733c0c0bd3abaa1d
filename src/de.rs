//! Decoding key/value pairs into structs.
//!
//! The walk visits a struct's fields in declaration order. Each field claims
//! the values of its wire key, unless an earlier field already claimed that
//! key during the same call. Direct fields of a struct are visited before the
//! fields of its flattened structs, so an outer field shadows an inner field
//! with the same key:
//!
//! ```
//! use urlform::Form;
//!
//! #[derive(Debug, Default, Form)]
//! struct Inner {
//!     pub id: u32,
//!     pub name: String,
//! }
//!
//! #[derive(Debug, Default, Form)]
//! struct Outer {
//!     pub name: String,
//!     #[form(flatten)]
//!     pub inner: Inner,
//! }
//!
//! let outer: Outer = urlform::from_str("id=7&name=outer").unwrap();
//! assert_eq!(outer.name, "outer");
//! assert_eq!(outer.inner.id, 7);
//! assert_eq!(outer.inner.name, "");
//! ```

pub(crate) mod parse;

use std::collections::HashSet;
use std::io::Read;

use tracing::{debug, trace};

use crate::codec;
use crate::coerce;
use crate::error::{Error, Result, ValueError};
use crate::reflect::{Reflect, ReflectMut, Struct};
use crate::values::Values;

/// Decodes a struct from a urlencoded `&[u8]`.
///
/// ```
/// use urlform::Form;
///
/// #[derive(Debug, Default, PartialEq, Form)]
/// struct Query {
///     pub name: String,
///     pub age: u8,
///     pub tags: Vec<String>,
/// }
///
/// let q: Query = urlform::from_bytes(b"name=Alice&age=24&tags=a&tags=b").unwrap();
/// assert_eq!(
///     q,
///     Query {
///         name: "Alice".to_owned(),
///         age: 24,
///         tags: vec!["a".to_owned(), "b".to_owned()],
///     }
/// );
/// ```
pub fn from_bytes<T: Reflect + Default>(input: &[u8]) -> Result<T> {
    crate::Config::default().decode_bytes(input)
}

/// Decodes a struct from a urlencoded `&str`.
pub fn from_str<T: Reflect + Default>(input: &str) -> Result<T> {
    from_bytes(input.as_bytes())
}

/// Reads all bytes from `reader` and decodes them with [`from_bytes`].
pub fn from_reader<T: Reflect + Default, R: Read>(reader: R) -> Result<T> {
    let mut value = T::default();
    Decoder::from_reader(reader)?.decode(&mut value)?;
    Ok(value)
}

/// Decodes urlencoded bytes into an existing value, in place.
///
/// On a value failure the fields decoded before it keep their new values.
pub fn from_bytes_into(input: &[u8], dst: &mut dyn Reflect) -> Result<()> {
    crate::Config::default().decode_bytes_into(input, dst)
}

/// Decodes already parsed values into `dst`, bypassing the wire parser.
///
/// ```
/// use urlform::{Form, Values};
///
/// #[derive(Default, Form)]
/// struct Page {
///     pub number: Option<u32>,
/// }
///
/// let mut values = Values::new();
/// values.add("number", "3");
///
/// let mut page = Page::default();
/// urlform::transform(&values, &mut page).unwrap();
/// assert_eq!(page.number, Some(3));
/// ```
pub fn transform(src: &Values, dst: &mut dyn Reflect) -> Result<()> {
    decode_values(src, dst)
}

/// A reusable source of values to decode from.
///
/// Every call to [`Decoder::decode`] starts with no key bound, so one
/// decoder may fill several destinations.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    src: Values,
}

impl Decoder {
    pub fn new(src: Values) -> Self {
        Decoder { src }
    }

    /// Parses `input` with the default config.
    pub fn from_bytes(input: &[u8]) -> Result<Self> {
        Self::with_config(input, crate::Config::default())
    }

    pub fn with_config(input: &[u8], config: crate::Config) -> Result<Self> {
        Ok(Decoder::new(config.parse_bytes(input)?))
    }

    /// Reads `reader` to the end and parses what it read.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Self::from_bytes(&buf)
    }

    /// The parsed values.
    pub fn values(&self) -> &Values {
        &self.src
    }

    /// Decodes the values into `dst`, which must be a struct or a set
    /// pointer to one.
    pub fn decode(&self, dst: &mut dyn Reflect) -> Result<()> {
        decode_values(&self.src, dst)
    }
}

impl From<Values> for Decoder {
    fn from(src: Values) -> Self {
        Decoder::new(src)
    }
}

pub(crate) fn decode_values(src: &Values, dst: &mut dyn Reflect) -> Result<()> {
    let target = dst.type_name();
    let dst = target_struct(dst)?;
    debug!(target_type = target, keys = src.len(), "decoding form values");

    let mut walk = DecodeWalk {
        src,
        done: HashSet::new(),
    };
    walk.decode_struct(dst)
}

/// Follows set pointers down to the struct they lead to.
fn target_struct(dst: &mut dyn Reflect) -> Result<&mut dyn Struct> {
    let type_name = dst.type_name();
    match dst.reflect_mut() {
        ReflectMut::Struct(s) => Ok(s),
        ReflectMut::Pointer(pointer) => match pointer.get_mut() {
            Some(inner) => target_struct(inner),
            None => Err(Error::nil_argument()),
        },
        _ => Err(Error::argument(type_name)),
    }
}

/// Per-call state: the source and the keys bound so far.
struct DecodeWalk<'s> {
    src: &'s Values,
    done: HashSet<&'static str>,
}

impl DecodeWalk<'_> {
    fn decode_struct(&mut self, dst: &mut dyn Struct) -> Result<()> {
        let mut embedded = Vec::new();

        for field in dst.descriptors() {
            if !field.participates() {
                continue;
            }
            if self.done.contains(field.key) {
                trace!(key = field.key, field = field.ident, "key already bound");
                continue;
            }
            let Some(value) = dst.field_mut(field.index) else {
                continue;
            };

            let vals = self.src.get_all(field.key);
            if vals.is_empty() {
                if field.embedded && matches!(value.reflect_mut(), ReflectMut::Struct(_)) {
                    embedded.push(field.index);
                }
                continue;
            }

            decode_field(field.key, value, vals)?;
            self.done.insert(field.key);
        }

        let parent = dst.struct_name();
        for index in embedded {
            let Some(value) = dst.field_mut(index) else {
                continue;
            };
            if let ReflectMut::Struct(inner) = value.reflect_mut() {
                trace!(parent, embedded = inner.struct_name(), "entering embedded struct");
                self.decode_struct(inner)?;
            }
        }

        Ok(())
    }
}

/// Binds every value of `key` to one field.
fn decode_field(key: &str, value: &mut dyn Reflect, vals: &[String]) -> Result<()> {
    if let Some(codec) = codec::detect_mut(value) {
        for raw in vals {
            codec.decode_text(raw).map_err(Error::Codec)?;
        }
        return Ok(());
    }

    // a pointer to a sequence is allocated and filled like the sequence
    if let ReflectMut::Pointer(pointer) = value.reflect_mut() {
        if pointer.points_to_sequence() {
            return decode_field(key, pointer.get_or_alloc(), vals);
        }
    }

    if let ReflectMut::Sequence(seq) = value.reflect_mut() {
        return seq.rebuild(vals.len(), &mut |index, element| {
            decode_string(key, element, &vals[index])
        });
    }

    // only the first value binds to a single field
    decode_string(key, value, &vals[0])
}

/// Coerces one raw string into `dst`.
///
/// An empty string leaves `dst` as it was. Shapes that cannot hold a single
/// value are left alone.
fn decode_string(key: &str, dst: &mut dyn Reflect, raw: &str) -> Result<()> {
    if raw.is_empty() {
        return Ok(());
    }

    match dst.reflect_mut() {
        ReflectMut::Scalar(scalar) => coerce::parse_into(raw, scalar).map_err(|kind| {
            debug!(key, value = raw, kind = kind.name(), "value could not be parsed");
            Error::from(ValueError::new(key, raw, kind.name()))
        }),
        ReflectMut::Pointer(pointer) => decode_string(key, pointer.get_or_alloc(), raw),
        ReflectMut::Codec(codec) => codec.decode_text(raw).map_err(Error::Codec),
        ReflectMut::Sequence(_) | ReflectMut::Struct(_) => Ok(()),
    }
}
