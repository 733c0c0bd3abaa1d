//! Types that bring their own text form.
//!
//! A field whose type implements [`TextCodec`] (and declares it with
//! [`text_codec!`](crate::text_codec)) bypasses built-in coercion in both
//! directions: every raw value for its key is handed to
//! [`TextCodec::decode_text`] in arrival order, and encoding emits exactly
//! one pair from [`TextCodec::encode_text`].
//!
//! ```
//! use urlform::codec::{BoxError, TextCodec};
//! use urlform::Form;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Names(Vec<String>);
//!
//! impl TextCodec for Names {
//!     fn encode_text(&self) -> Result<String, BoxError> {
//!         Ok(self.0.join(","))
//!     }
//!
//!     fn decode_text(&mut self, text: &str) -> Result<(), BoxError> {
//!         self.0.push(text.to_owned());
//!         Ok(())
//!     }
//! }
//!
//! urlform::text_codec!(Names);
//!
//! #[derive(Debug, Default, Form)]
//! struct Query {
//!     pub names: Names,
//! }
//!
//! let query: Query = urlform::from_str("names=John+Doe&names=Jane+Doe").unwrap();
//! assert_eq!(query.names.0, ["John Doe", "Jane Doe"]);
//! assert_eq!(urlform::to_string(&query).unwrap(), "names=John+Doe%2CJane+Doe");
//! ```

use std::error::Error as StdError;

use crate::reflect::{Reflect, ReflectMut, ReflectRef};

/// Error returned by a codec, surfaced unchanged as
/// [`Error::Codec`](crate::Error::Codec).
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// A pair of text conversions a type supplies for itself.
pub trait TextCodec {
    /// The value's text form.
    fn encode_text(&self) -> Result<String, BoxError>;

    /// Absorb one raw value.
    ///
    /// Called once per value for the field's key, so an implementation may
    /// accumulate.
    fn decode_text(&mut self, text: &str) -> Result<(), BoxError>;

    /// Whether the value counts as empty for `omitempty`.
    fn is_empty_text(&self) -> bool {
        false
    }
}

/// Declare that the listed types reflect as text codecs.
///
/// Each type must implement [`TextCodec`].
#[macro_export]
macro_rules! text_codec {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::reflect::Reflect for $ty {
                fn reflect_ref(&self) -> $crate::reflect::ReflectRef<'_> {
                    $crate::reflect::ReflectRef::Codec(self)
                }

                fn reflect_mut(&mut self) -> $crate::reflect::ReflectMut<'_> {
                    $crate::reflect::ReflectMut::Codec(self)
                }

                fn resolves_to_codec() -> bool {
                    true
                }
            }
        )+
    };
}

/// What encoding found when it checked a value for a codec.
pub enum Dispatch<'a> {
    /// The value, possibly behind pointers, is a codec.
    Codec(&'a dyn TextCodec),
    /// The pointer chain to a codec ends at an unset pointer.
    Unset,
    /// The value is not a codec.
    NotCodec,
}

/// Find the codec behind `value`, allocating unset pointers on the way.
///
/// Allocation only happens when the pointee type is a codec, so probing a
/// plain `Option<i32>` leaves it unset.
pub fn detect_mut(value: &mut dyn Reflect) -> Option<&mut dyn TextCodec> {
    match value.reflect_mut() {
        ReflectMut::Codec(codec) => Some(codec),
        ReflectMut::Pointer(pointer) if pointer.points_to_codec() => {
            detect_mut(pointer.get_or_alloc())
        }
        _ => None,
    }
}

/// Find the codec behind `value` without allocating.
pub fn detect_ref(value: &dyn Reflect) -> Dispatch<'_> {
    match value.reflect_ref() {
        ReflectRef::Codec(codec) => Dispatch::Codec(codec),
        ReflectRef::Pointer(pointer) if pointer.points_to_codec() => match pointer.get() {
            Some(inner) => detect_ref(inner),
            None => Dispatch::Unset,
        },
        _ => Dispatch::NotCodec,
    }
}
