//! Map urlencoded forms and query strings onto Rust structs.
//!
//! `urlform` converts between the flat, multi-valued `key=value&key=value`
//! shape of `application/x-www-form-urlencoded` bodies and query strings, and
//! plain structs annotated with `#[derive(Form)]`.
//!
//! ## Usage
//!
//! ```
//! use urlform::Form;
//!
//! #[derive(Debug, Default, PartialEq, Form)]
//! struct Paging {
//!     pub limit: u32,
//!     pub offset: Option<u32>,
//! }
//!
//! #[derive(Debug, Default, PartialEq, Form)]
//! struct Search {
//!     #[form("q")]
//!     pub query: String,
//!     #[form("tag,omitempty")]
//!     pub tags: Vec<String>,
//!     #[form(flatten)]
//!     pub paging: Paging,
//!     #[form("-")]
//!     pub internal: bool,
//! }
//!
//! let search: Search = urlform::from_str("q=rust+forms&tag=web&tag=io&limit=20").unwrap();
//! assert_eq!(
//!     search,
//!     Search {
//!         query: "rust forms".to_owned(),
//!         tags: vec!["web".to_owned(), "io".to_owned()],
//!         paging: Paging { limit: 20, offset: None },
//!         internal: false,
//!     }
//! );
//!
//! assert_eq!(
//!     urlform::to_string(&search).unwrap(),
//!     "q=rust+forms&tag=web&tag=io&limit=20"
//! );
//! ```
//!
//! ## Mapping rules
//!
//! - A field's wire key is the name in its `#[form("...")]` tag, or the field
//!   identifier when the tag has no name. The name `-` excludes the field.
//! - Only fields visible outside their struct, and `#[form(flatten)]` fields,
//!   take part.
//! - Scalars (`bool`, integers, floats, `String`) bind the first value of
//!   their key. An empty value leaves the field as it was.
//! - `Option<T>` and `Box<T>` fields allocate on demand.
//! - `Vec<T>` fields are replaced by one element per value, in order.
//!   Behind `Option` or `Box` they work the same way; an unset `Option`
//!   is allocated once its key has values.
//! - Types implementing [`codec::TextCodec`] see every value of their key.
//! - Flattened structs share the namespace of the struct that holds them.
//!   During one decode a key binds to at most one field: direct fields first,
//!   then the flattened structs, each in declaration order. Encoding has no
//!   such rule and writes every field, so a key shared across flattened
//!   structs appears more than once in the output.
//! - Other struct-valued fields are not traversed.
//!
//! Decoding stops at the first value that cannot be coerced and leaves the
//! fields decoded so far in place.

extern crate self as urlform;

#[cfg(feature = "axum")]
pub mod axum;
pub mod codec;
pub mod coerce;
mod config;
mod de;
mod error;
pub mod helpers;
pub mod reflect;
mod ser;
pub mod tags;
mod values;

#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use de::{Decoder, from_bytes, from_bytes_into, from_reader, from_str, transform};
#[doc(inline)]
pub use error::{Error, Result, ValueError};
#[doc(inline)]
pub use reflect::Reflect;
#[doc(inline)]
pub use ser::{Encoder, to_pairs, to_string, to_values, to_writer};
#[doc(inline)]
pub use values::Values;

pub use urlform_derive::Form;
