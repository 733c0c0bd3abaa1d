//! Conversion between one raw string and one scalar value.

use std::fmt;

/// The scalar kinds the engine knows how to coerce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    String,
}

impl Kind {
    /// The Rust name of the kind, as reported in value errors.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::String => "String",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A borrowed scalar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScalarRef<'a> {
    Bool(&'a bool),
    I8(&'a i8),
    I16(&'a i16),
    I32(&'a i32),
    I64(&'a i64),
    Isize(&'a isize),
    U8(&'a u8),
    U16(&'a u16),
    U32(&'a u32),
    U64(&'a u64),
    Usize(&'a usize),
    F32(&'a f32),
    F64(&'a f64),
    String(&'a String),
}

/// A mutably borrowed scalar.
#[derive(Debug)]
pub enum ScalarMut<'a> {
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    String(&'a mut String),
}

impl ScalarRef<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            ScalarRef::Bool(_) => Kind::Bool,
            ScalarRef::I8(_) => Kind::I8,
            ScalarRef::I16(_) => Kind::I16,
            ScalarRef::I32(_) => Kind::I32,
            ScalarRef::I64(_) => Kind::I64,
            ScalarRef::Isize(_) => Kind::Isize,
            ScalarRef::U8(_) => Kind::U8,
            ScalarRef::U16(_) => Kind::U16,
            ScalarRef::U32(_) => Kind::U32,
            ScalarRef::U64(_) => Kind::U64,
            ScalarRef::Usize(_) => Kind::Usize,
            ScalarRef::F32(_) => Kind::F32,
            ScalarRef::F64(_) => Kind::F64,
            ScalarRef::String(_) => Kind::String,
        }
    }

    /// Whether the scalar holds its zero value (`false`, `0`, `""`).
    pub fn is_zero(&self) -> bool {
        match *self {
            ScalarRef::Bool(v) => !*v,
            ScalarRef::I8(v) => *v == 0,
            ScalarRef::I16(v) => *v == 0,
            ScalarRef::I32(v) => *v == 0,
            ScalarRef::I64(v) => *v == 0,
            ScalarRef::Isize(v) => *v == 0,
            ScalarRef::U8(v) => *v == 0,
            ScalarRef::U16(v) => *v == 0,
            ScalarRef::U32(v) => *v == 0,
            ScalarRef::U64(v) => *v == 0,
            ScalarRef::Usize(v) => *v == 0,
            ScalarRef::F32(v) => *v == 0.0,
            ScalarRef::F64(v) => *v == 0.0,
            ScalarRef::String(v) => v.is_empty(),
        }
    }
}

impl ScalarMut<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            ScalarMut::Bool(_) => Kind::Bool,
            ScalarMut::I8(_) => Kind::I8,
            ScalarMut::I16(_) => Kind::I16,
            ScalarMut::I32(_) => Kind::I32,
            ScalarMut::I64(_) => Kind::I64,
            ScalarMut::Isize(_) => Kind::Isize,
            ScalarMut::U8(_) => Kind::U8,
            ScalarMut::U16(_) => Kind::U16,
            ScalarMut::U32(_) => Kind::U32,
            ScalarMut::U64(_) => Kind::U64,
            ScalarMut::Usize(_) => Kind::Usize,
            ScalarMut::F32(_) => Kind::F32,
            ScalarMut::F64(_) => Kind::F64,
            ScalarMut::String(_) => Kind::String,
        }
    }
}

/// Parse `raw` into `dst`, leaving `dst` untouched on failure.
///
/// Integers are base 10 and must fit the target's width. Unsigned targets
/// reject any sign. Floats that overflow to infinity are rejected unless
/// they were spelled as infinity. Floats are decimal only, so hexadecimal
/// literals such as `0x1p-2` are rejected. The error is the kind of the
/// target.
pub fn parse_into(raw: &str, dst: ScalarMut<'_>) -> Result<(), Kind> {
    let kind = dst.kind();
    let ok = match dst {
        ScalarMut::Bool(v) => parse_bool(raw).map(|b| *v = b),
        ScalarMut::I8(v) => raw.parse().ok().map(|n| *v = n),
        ScalarMut::I16(v) => raw.parse().ok().map(|n| *v = n),
        ScalarMut::I32(v) => raw.parse().ok().map(|n| *v = n),
        ScalarMut::I64(v) => raw.parse().ok().map(|n| *v = n),
        ScalarMut::Isize(v) => raw.parse().ok().map(|n| *v = n),
        ScalarMut::U8(v) => parse_unsigned(raw).map(|n| *v = n),
        ScalarMut::U16(v) => parse_unsigned(raw).map(|n| *v = n),
        ScalarMut::U32(v) => parse_unsigned(raw).map(|n| *v = n),
        ScalarMut::U64(v) => parse_unsigned(raw).map(|n| *v = n),
        ScalarMut::Usize(v) => parse_unsigned(raw).map(|n| *v = n),
        ScalarMut::F32(v) => parse_float(raw, f32::is_infinite).map(|n| *v = n),
        ScalarMut::F64(v) => parse_float(raw, f64::is_infinite).map(|n| *v = n),
        ScalarMut::String(v) => {
            raw.clone_into(v);
            Some(())
        }
    };
    ok.ok_or(kind)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_unsigned<T: std::str::FromStr>(raw: &str) -> Option<T> {
    if raw.starts_with('+') {
        return None;
    }
    raw.parse().ok()
}

fn parse_float<T: std::str::FromStr + Copy>(raw: &str, is_infinite: fn(T) -> bool) -> Option<T> {
    let value = raw.parse().ok()?;
    if is_infinite(value) && !spells_infinity(raw) {
        // a finite literal out of range for the width
        return None;
    }
    Some(value)
}

fn spells_infinity(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// The canonical text of a scalar.
///
/// Integers are plain decimal, floats the shortest text that parses back to
/// the same value (integral floats without a fractional part), booleans
/// `true` or `false`.
pub fn format(value: ScalarRef<'_>) -> String {
    match value {
        ScalarRef::Bool(v) => v.to_string(),
        ScalarRef::I8(v) => format_int(*v),
        ScalarRef::I16(v) => format_int(*v),
        ScalarRef::I32(v) => format_int(*v),
        ScalarRef::I64(v) => format_int(*v),
        ScalarRef::Isize(v) => format_int(*v),
        ScalarRef::U8(v) => format_int(*v),
        ScalarRef::U16(v) => format_int(*v),
        ScalarRef::U32(v) => format_int(*v),
        ScalarRef::U64(v) => format_int(*v),
        ScalarRef::Usize(v) => format_int(*v),
        ScalarRef::F32(v) => format_float(*v),
        ScalarRef::F64(v) => format_float(*v),
        ScalarRef::String(v) => v.clone(),
    }
}

fn format_int<I: itoa::Integer>(value: I) -> String {
    itoa::Buffer::new().format(value).to_owned()
}

fn format_float<F: ryu::Float>(value: F) -> String {
    let mut buffer = ryu::Buffer::new();
    let text = buffer.format(value);
    text.strip_suffix(".0").unwrap_or(text).to_owned()
}
