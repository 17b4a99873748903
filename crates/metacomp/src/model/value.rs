// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member values.

use crate::record::RecordInstance;
use std::fmt;
use std::sync::Arc;

const F32_CANONICAL_NAN: u32 = 0x7fc0_0000;
const F64_CANONICAL_NAN: u64 = 0x7ff8_0000_0000_0000;

/// A member value of a metadata record.
///
/// Floats compare by canonical bit pattern: `NaN` equals `NaN` and `0.0`
/// differs from `-0.0`. This keeps equality reflexive so `Value` is `Eq`.
#[derive(Debug, Clone)]
pub enum Value {
    // Scalars
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),

    // Structured
    Enum(EnumValue),
    Record(RecordInstance),
    Array(Vec<Value>),

    /// Absent value. Never accepted as a member value.
    Null,
}

/// A constant of an enumeration type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    type_name: Arc<str>,
    constant: Arc<str>,
}

impl EnumValue {
    pub fn new(type_name: &str, constant: &str) -> Self {
        Self {
            type_name: Arc::from(type_name),
            constant: Arc::from(constant),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn constant(&self) -> &str {
        &self.constant
    }
}

impl Value {
    /// Enum constant value.
    pub fn enum_value(type_name: &str, constant: &str) -> Self {
        Self::Enum(EnumValue::new(type_name, constant))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as enum constant.
    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Self::Enum(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as nested record.
    pub fn as_record(&self) -> Option<&RecordInstance> {
        match self {
            Self::Record(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    /// Short name of the runtime kind, for diagnostics.
    pub fn kind_name(&self) -> String {
        match self {
            Self::Bool(_) => "bool".into(),
            Self::I8(_) => "i8".into(),
            Self::I16(_) => "i16".into(),
            Self::I32(_) => "i32".into(),
            Self::I64(_) => "i64".into(),
            Self::F32(_) => "f32".into(),
            Self::F64(_) => "f64".into(),
            Self::Char(_) => "char".into(),
            Self::String(_) => "string".into(),
            Self::Enum(e) => e.type_name().to_string(),
            Self::Record(r) => r.record_type().name().to_string(),
            Self::Array(_) => "array".into(),
            Self::Null => "null".into(),
        }
    }

    /// Structural hash, stable across independently built values.
    ///
    /// Arrays hash element-wise (`31 * acc + h`, seeded with 1).
    pub fn value_hash(&self) -> i32 {
        match self {
            Self::Bool(true) => 1231,
            Self::Bool(false) => 1237,
            Self::I8(v) => i32::from(*v),
            Self::I16(v) => i32::from(*v),
            Self::I32(v) => *v,
            Self::I64(v) => (*v ^ ((*v as u64) >> 32) as i64) as i32,
            Self::F32(v) => f32_bits(*v) as i32,
            Self::F64(v) => {
                let bits = f64_bits(*v);
                (bits ^ (bits >> 32)) as i32
            }
            Self::Char(c) => *c as u32 as i32,
            Self::String(s) => string_hash(s),
            Self::Enum(e) => string_hash(e.constant()),
            Self::Record(r) => r.hash_code(),
            Self::Array(items) => items
                .iter()
                .fold(1i32, |acc, item| acc.wrapping_mul(31).wrapping_add(item.value_hash())),
            Self::Null => 0,
        }
    }
}

/// Conventional 31-multiplier string hash over UTF-16 code units.
pub(crate) fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

fn f32_bits(v: f32) -> u32 {
    if v.is_nan() {
        F32_CANONICAL_NAN
    } else {
        v.to_bits()
    }
}

fn f64_bits(v: f64) -> u64 {
    if v.is_nan() {
        F64_CANONICAL_NAN
    } else {
        v.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::I8(a), Self::I8(b)) => a == b,
            (Self::I16(a), Self::I16(b)) => a == b,
            (Self::I32(a), Self::I32(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::F32(a), Self::F32(b)) => f32_bits(*a) == f32_bits(*b),
            (Self::F64(a), Self::F64(b)) => f64_bits(*a) == f64_bits(*b),
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Null, Self::Null) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", v),
            Self::I8(v) => write!(f, "{}", v),
            Self::I16(v) => write!(f, "{}", v),
            Self::I32(v) => write!(f, "{}", v),
            Self::I64(v) => write!(f, "{}", v),
            Self::F32(v) => write!(f, "{:?}", v),
            Self::F64(v) => write!(f, "{:?}", v),
            Self::Char(v) => write!(f, "{}", v),
            Self::String(v) => f.write_str(v),
            Self::Enum(e) => f.write_str(e.constant()),
            Self::Record(r) => write!(f, "{}", r),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Self::Null => f.write_str("null"),
        }
    }
}

macro_rules! impl_from_scalar {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant(v)
            }
        }
    };
}

impl_from_scalar!(bool, Bool);
impl_from_scalar!(i8, I8);
impl_from_scalar!(i16, I16);
impl_from_scalar!(i32, I32);
impl_from_scalar!(i64, I64);
impl_from_scalar!(f32, F32);
impl_from_scalar!(f64, F64);
impl_from_scalar!(char, Char);
impl_from_scalar!(String, String);
impl_from_scalar!(EnumValue, Enum);
impl_from_scalar!(RecordInstance, Record);
impl_from_scalar!(Vec<Value>, Array);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}
