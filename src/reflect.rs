//! Runtime shape information for the values the engine walks.
//!
//! Every value the engine touches is viewed through [`Reflect`], which
//! classifies it once into one of five shapes and hands out a typed view of
//! it:
//!
//! | Shape      | Rust types                                   |
//! |------------|----------------------------------------------|
//! | `Scalar`   | `bool`, integers, floats, `String`           |
//! | `Pointer`  | `Option<T>`, `Box<T>`                        |
//! | `Sequence` | `Vec<T>`                                     |
//! | `Struct`   | anything with `#[derive(Form)]`              |
//! | `Codec`    | anything declared with [`text_codec!`](crate::text_codec) |
//!
//! Structs are described by a static table of [`FieldInfo`] emitted by the
//! derive macro, which the tag resolver turns into
//! [`FieldDescriptor`](crate::tags::FieldDescriptor)s on first use.

mod impls;

use crate::codec::TextCodec;
use crate::coerce::{ScalarMut, ScalarRef};
use crate::error::Result;
use crate::tags::FieldDescriptor;

/// A value whose shape can be inspected at runtime.
///
/// Implemented for the std scalars, `Option<T>`, `Box<T>` and `Vec<T>`,
/// generated by `#[derive(Form)]` for structs, and by
/// [`text_codec!`](crate::text_codec) for types with their own text form.
pub trait Reflect {
    /// Borrow this value as its shape.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Mutably borrow this value as its shape.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Name of the concrete type, used in diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Whether this type, looked at through any pointer layers, is a text
    /// codec.
    ///
    /// Lets an unset `Option` decide whether it must be allocated before a
    /// codec can be detected.
    #[doc(hidden)]
    fn resolves_to_codec() -> bool
    where
        Self: Sized,
    {
        false
    }

    /// Whether this type, looked at through any pointer layers, is a
    /// sequence.
    #[doc(hidden)]
    fn resolves_to_sequence() -> bool
    where
        Self: Sized,
    {
        false
    }
}

/// An immutable view of a [`Reflect`] value's shape.
pub enum ReflectRef<'a> {
    Scalar(ScalarRef<'a>),
    Pointer(&'a dyn Pointer),
    Sequence(&'a dyn Sequence),
    Struct(&'a dyn Struct),
    Codec(&'a dyn TextCodec),
}

/// A mutable view of a [`Reflect`] value's shape.
pub enum ReflectMut<'a> {
    Scalar(ScalarMut<'a>),
    Pointer(&'a mut dyn Pointer),
    Sequence(&'a mut dyn Sequence),
    Struct(&'a mut dyn Struct),
    Codec(&'a mut dyn TextCodec),
}

/// Static facts about one struct field, as written in the source.
///
/// `#[derive(Form)]` emits one per field in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldInfo {
    /// The field identifier.
    pub ident: &'static str,
    /// The raw `#[form("...")]` tag, if any.
    pub tag: Option<&'static str>,
    /// Whether the field is visible outside its struct.
    pub public: bool,
    /// Whether the field is marked `#[form(flatten)]`.
    pub embedded: bool,
}

/// A struct whose fields can be enumerated in declaration order.
pub trait Struct {
    /// The struct's name.
    fn struct_name(&self) -> &'static str;

    /// The resolved descriptor of every field, in declaration order.
    ///
    /// A descriptor's `index` is the argument to [`Struct::field`].
    fn descriptors(&self) -> &'static [FieldDescriptor];

    /// The field at `index`, or `None` for excluded fields.
    fn field(&self, index: usize) -> Option<&dyn Reflect>;

    /// The field at `index`, or `None` for excluded fields.
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;
}

/// A reference that may be unset (`Option<T>`) or is always set (`Box<T>`).
pub trait Pointer {
    /// The pointee, if set.
    fn get(&self) -> Option<&dyn Reflect>;

    /// The pointee, if set.
    fn get_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// The pointee, allocating a zero value first if unset.
    fn get_or_alloc(&mut self) -> &mut dyn Reflect;

    /// Whether the pointee type resolves to a text codec.
    fn points_to_codec(&self) -> bool;

    /// Whether the pointee type resolves to a sequence.
    fn points_to_sequence(&self) -> bool;
}

/// A growable sequence of homogeneous elements.
pub trait Sequence {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Replace the contents with `len` fresh zero elements, each passed to
    /// `fill` in order.
    ///
    /// The sequence is only replaced once every call to `fill` succeeded; on
    /// the first error the previous contents are left as they were.
    fn rebuild(
        &mut self,
        len: usize,
        fill: &mut dyn FnMut(usize, &mut dyn Reflect) -> Result<()>,
    ) -> Result<()>;
}
