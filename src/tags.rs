//! Field tag parsing and key resolution.
//!
//! A tag is the string inside `#[form("...")]`: a name, optionally followed
//! by comma-separated options, e.g. `"email,omitempty"`. An empty name keeps
//! the field identifier as the wire key; the name `-` excludes the field.

use crate::reflect::FieldInfo;

/// Tag name that excludes a field from both directions.
pub const SKIP_MARKER: &str = "-";

/// Tag option that drops a zero-valued field from encoded output.
pub const OMIT_EMPTY: &str = "omitempty";

/// The comma-separated options following a tag's name, without the leading
/// comma.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TagOptions<'a>(&'a str);

impl<'a> TagOptions<'a> {
    /// Whether `option` appears as a whole element of the option list.
    pub fn contains(&self, option: &str) -> bool {
        !self.0.is_empty() && self.0.split(',').any(|o| o == option)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

/// Split a tag into its name and options at the first comma.
///
/// Never fails: text without a comma is all name.
pub fn parse_tag(tag: &str) -> (&str, TagOptions<'_>) {
    match tag.split_once(',') {
        Some((name, options)) => (name, TagOptions(options)),
        None => (tag, TagOptions("")),
    }
}

/// Resolved mapping facts for one struct field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Declaration index, as accepted by [`Struct::field`](crate::reflect::Struct::field).
    pub index: usize,
    pub ident: &'static str,
    /// The wire key.
    pub key: &'static str,
    pub public: bool,
    pub embedded: bool,
    pub skip: bool,
    pub omit_empty: bool,
}

impl FieldDescriptor {
    /// Whether the walk looks at this field at all.
    pub fn participates(&self) -> bool {
        !self.skip && (self.public || self.embedded)
    }
}

/// Resolve the descriptor table for a struct's fields.
pub fn describe(fields: &[FieldInfo]) -> Vec<FieldDescriptor> {
    fields
        .iter()
        .enumerate()
        .map(|(index, info)| {
            let (name, options) = parse_tag(info.tag.unwrap_or_default());
            let key = if name.is_empty() { info.ident } else { name };
            FieldDescriptor {
                index,
                ident: info.ident,
                key,
                public: info.public,
                embedded: info.embedded,
                skip: name == SKIP_MARKER,
                omit_empty: options.contains(OMIT_EMPTY),
            }
        })
        .collect()
}
