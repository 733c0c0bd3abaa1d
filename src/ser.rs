//! Encoding structs into key/value pairs.

mod encode;

use std::io::Write;

use tracing::{debug, trace};

use crate::codec::{self, Dispatch};
use crate::coerce;
use crate::error::{Error, Result};
use crate::reflect::{Reflect, ReflectRef, Sequence, Struct};
use crate::values::Values;

pub(crate) use encode::encode;

/// Encodes a struct into a query string.
///
/// Fields are written in declaration order, flattened structs spliced in
/// where they are declared and sequences as one pair per element.
///
/// Encoding keeps no record of the keys it has written: when an outer field
/// and a flattened field share a key, both are written, although decoding
/// that output binds the key only to the outer field.
///
/// ```
/// use urlform::Form;
///
/// #[derive(Form)]
/// struct Query {
///     pub name: String,
///     pub age: u8,
///     #[form("tag")]
///     pub tags: Vec<String>,
///     #[form(",omitempty")]
///     pub note: Option<String>,
/// }
///
/// let q = Query {
///     name: "Alice Smith".to_owned(),
///     age: 24,
///     tags: vec!["a".to_owned(), "b".to_owned()],
///     note: None,
/// };
///
/// assert_eq!(
///     urlform::to_string(&q).unwrap(),
///     "name=Alice+Smith&age=24&tag=a&tag=b"
/// );
/// ```
pub fn to_string(input: &dyn Reflect) -> Result<String> {
    crate::Config::default().serialize_string(input)
}

/// Encodes a struct into a writer.
///
/// ```
/// use urlform::Form;
///
/// #[derive(Form)]
/// struct Query {
///     pub name: String,
///     pub age: u8,
/// }
///
/// let q = Query {
///     name: "Alice".to_owned(),
///     age: 24,
/// };
///
/// let mut buffer = Vec::new();
/// urlform::to_writer(&q, &mut buffer).unwrap();
/// assert_eq!(String::from_utf8(buffer).unwrap(), "name=Alice&age=24");
/// ```
pub fn to_writer<W: Write>(input: &dyn Reflect, writer: &mut W) -> Result<()> {
    crate::Config::default().serialize_to_writer(input, writer)
}

/// The unescaped pairs a struct encodes to, in emission order.
pub fn to_pairs(input: &dyn Reflect) -> Result<Vec<(String, String)>> {
    let src = source_struct(input)?;
    debug!(source_type = input.type_name(), "encoding form values");

    let mut pairs = Vec::new();
    encode_struct(src, &mut pairs)?;
    Ok(pairs)
}

/// The pairs a struct encodes to, grouped by key.
pub fn to_values(input: &dyn Reflect) -> Result<Values> {
    Ok(to_pairs(input)?.into_iter().collect())
}

/// Writes escaped pairs to a writer, separated by `&`.
pub struct Encoder<W: Write> {
    writer: W,
    first_kv: bool,
    config: crate::Config,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W, config: crate::Config) -> Self {
        Self {
            writer,
            first_kv: true,
            config,
        }
    }

    /// Encodes `input` and writes its pairs.
    pub fn encode(&mut self, input: &dyn Reflect) -> Result<()> {
        for (key, value) in to_pairs(input)? {
            self.write_pair(&key, &value)?;
        }
        Ok(())
    }

    /// Writes one pair, escaping the key and value.
    pub fn write_pair(&mut self, key: &str, value: &str) -> Result<()> {
        if self.first_kv {
            self.first_kv = false;
        } else {
            self.writer.write_all(b"&")?;
        }
        let form = self.config.use_form_encoding;
        self.writer.write_all(encode(key, form).as_bytes())?;
        self.writer.write_all(b"=")?;
        self.writer.write_all(encode(value, form).as_bytes())?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Appends one escaped pair to `output`.
pub(crate) fn write_pair(output: &mut String, key: &str, value: &str, use_form_encoding: bool) {
    if !output.is_empty() {
        output.push('&');
    }
    output.push_str(&encode(key, use_form_encoding));
    output.push('=');
    output.push_str(&encode(value, use_form_encoding));
}

/// Follows set pointers down to the struct they lead to.
fn source_struct(input: &dyn Reflect) -> Result<&dyn Struct> {
    match input.reflect_ref() {
        ReflectRef::Struct(s) => Ok(s),
        ReflectRef::Pointer(pointer) => match pointer.get() {
            Some(inner) => source_struct(inner),
            None => Err(Error::nil_argument()),
        },
        _ => Err(Error::argument(input.type_name())),
    }
}

fn encode_struct(src: &dyn Struct, pairs: &mut Vec<(String, String)>) -> Result<()> {
    for field in src.descriptors() {
        if !field.participates() {
            continue;
        }
        let Some(value) = src.field(field.index) else {
            continue;
        };
        if field.omit_empty && is_empty_value(value) {
            continue;
        }

        match codec::detect_ref(value) {
            Dispatch::Codec(codec) => {
                let text = codec.encode_text().map_err(Error::Codec)?;
                pairs.push((field.key.to_owned(), text));
                continue;
            }
            Dispatch::Unset => continue,
            Dispatch::NotCodec => {}
        }

        if let Some(seq) = sequence_behind(value) {
            for index in 0..seq.len() {
                let text = match seq.get(index) {
                    Some(element) => encode_string(element)?.unwrap_or_default(),
                    None => String::new(),
                };
                pairs.push((field.key.to_owned(), text));
            }
            continue;
        }

        match value.reflect_ref() {
            ReflectRef::Struct(inner) => {
                // plain nested structs are not encoded
                if field.embedded {
                    trace!(
                        parent = src.struct_name(),
                        embedded = inner.struct_name(),
                        "entering embedded struct"
                    );
                    encode_struct(inner, pairs)?;
                }
            }
            _ => {
                if let Some(text) = encode_string(value)? {
                    pairs.push((field.key.to_owned(), text));
                }
            }
        }
    }
    Ok(())
}

/// The sequence `value` is, or the one its set pointers lead to.
fn sequence_behind(value: &dyn Reflect) -> Option<&dyn Sequence> {
    match value.reflect_ref() {
        ReflectRef::Sequence(seq) => Some(seq),
        ReflectRef::Pointer(pointer) => pointer.get().and_then(sequence_behind),
        _ => None,
    }
}

/// The text of a single value, or `None` when there is nothing to write.
fn encode_string(value: &dyn Reflect) -> Result<Option<String>> {
    match value.reflect_ref() {
        ReflectRef::Scalar(scalar) => Ok(Some(coerce::format(scalar))),
        ReflectRef::Pointer(pointer) => match pointer.get() {
            Some(inner) => encode_string(inner),
            None => Ok(None),
        },
        ReflectRef::Codec(codec) => codec.encode_text().map(Some).map_err(Error::Codec),
        ReflectRef::Sequence(_) | ReflectRef::Struct(_) => Ok(None),
    }
}

/// Whether `value` is the zero value of its shape, for `omitempty`.
fn is_empty_value(value: &dyn Reflect) -> bool {
    match value.reflect_ref() {
        ReflectRef::Scalar(scalar) => scalar.is_zero(),
        ReflectRef::Pointer(pointer) => pointer.get().is_none(),
        ReflectRef::Sequence(seq) => seq.is_empty(),
        ReflectRef::Codec(codec) => codec.is_empty_text(),
        ReflectRef::Struct(_) => false,
    }
}
