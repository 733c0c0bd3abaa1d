//! Derive macro for [`urlform`](https://docs.rs/urlform).
//!
//! `#[derive(Form)]` implements `urlform::reflect::Reflect` and
//! `urlform::reflect::Struct` for a struct with named fields, which is all the
//! engine needs to decode into and encode from it.
//!
//! ## Field attributes
//!
//! - `#[form("name,option,...")]`: the field's tag. The name portion becomes
//!   the wire key (the field identifier is used when it is empty), `-` excludes
//!   the field and `omitempty` drops it from encoded output when it holds its
//!   zero value.
//! - `#[form(flatten)]`: promote the fields of a struct-typed field into the
//!   containing struct's namespace.
//!
//! Both may appear in one attribute: `#[form(flatten, "name")]`.
//!
//! Only fields visible outside the struct (`pub`, `pub(crate)`, ...) and
//! flattened fields take part in the mapping.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod expand;

static FORM_ATTRIBUTE_NAME: &str = "form";

#[proc_macro_derive(Form, attributes(form))]
pub fn derive_form(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand::expand_form(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
