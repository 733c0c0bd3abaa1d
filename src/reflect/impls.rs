use crate::coerce::{ScalarMut, ScalarRef};
use crate::error::Result;

use super::{Pointer, Reflect, ReflectMut, ReflectRef, Sequence};

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::Scalar(ScalarRef::$variant(self))
                }

                fn reflect_mut(&mut self) -> ReflectMut<'_> {
                    ReflectMut::Scalar(ScalarMut::$variant(self))
                }
            }
        )*
    };
}

impl_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
}

impl<T: Reflect + Default> Reflect for Option<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Pointer(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Pointer(self)
    }

    fn resolves_to_codec() -> bool {
        T::resolves_to_codec()
    }

    fn resolves_to_sequence() -> bool {
        T::resolves_to_sequence()
    }
}

impl<T: Reflect + Default> Pointer for Option<T> {
    fn get(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|v| v as &dyn Reflect)
    }

    fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|v| v as &mut dyn Reflect)
    }

    fn get_or_alloc(&mut self) -> &mut dyn Reflect {
        self.get_or_insert_with(T::default)
    }

    fn points_to_codec(&self) -> bool {
        T::resolves_to_codec()
    }

    fn points_to_sequence(&self) -> bool {
        T::resolves_to_sequence()
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Pointer(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Pointer(self)
    }

    fn resolves_to_codec() -> bool {
        T::resolves_to_codec()
    }

    fn resolves_to_sequence() -> bool {
        T::resolves_to_sequence()
    }
}

impl<T: Reflect> Pointer for Box<T> {
    fn get(&self) -> Option<&dyn Reflect> {
        Some(&**self)
    }

    fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        Some(&mut **self)
    }

    fn get_or_alloc(&mut self) -> &mut dyn Reflect {
        &mut **self
    }

    fn points_to_codec(&self) -> bool {
        T::resolves_to_codec()
    }

    fn points_to_sequence(&self) -> bool {
        T::resolves_to_sequence()
    }
}

impl<T: Reflect + Default> Reflect for Vec<T> {
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Sequence(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Sequence(self)
    }

    fn resolves_to_sequence() -> bool {
        true
    }
}

impl<T: Reflect + Default> Sequence for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|v| v as &dyn Reflect)
    }

    fn rebuild(
        &mut self,
        len: usize,
        fill: &mut dyn FnMut(usize, &mut dyn Reflect) -> Result<()>,
    ) -> Result<()> {
        let mut fresh = Vec::with_capacity(len);
        for index in 0..len {
            let mut element = T::default();
            fill(index, &mut element)?;
            fresh.push(element);
        }
        *self = fresh;
        Ok(())
    }
}
