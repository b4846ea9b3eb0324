//! The SHON value model.
//!
//! [`Value`] is the closed set of variants a field or array element may hold.
//! Two variants deserve a note:
//!
//! - [`Value::Decimal`] and [`Value::Timestamp`] carry the *original literal
//!   text* of their payload, verbatim. A decimal never passes through a
//!   floating-point intermediate at any point in the pipeline, so
//!   `$decimal("1042.750")` keeps its trailing zero through every
//!   transcoding.
//! - [`Value::Reference`] is an unresolved `&namespace.id` pointer. It stays
//!   unresolved through all default transcoding paths; resolution is an
//!   explicit, separate pass on [`crate::Document`].
//!
//! Integers are exact: `i64` where they fit, [`num_bigint::BigInt`] beyond.
//!
//! ## Examples
//!
//! ```rust
//! use shon::Value;
//!
//! let v = Value::Decimal("19.99".to_string());
//! assert!(v.is_decimal());
//! assert_eq!(v.as_decimal(), Some("19.99"));
//!
//! let n = Value::from(42);
//! assert_eq!(n.as_i64(), Some(42));
//! ```

use crate::ShonMap;
use num_bigint::BigInt;
use std::fmt;

/// An unresolved cross-block pointer of the form `&namespace.id`.
///
/// The id may itself contain dots (`&geo.region.north` has namespace `geo`
/// and id `region.north`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub namespace: String,
    pub id: String,
}

impl Reference {
    #[must_use]
    pub fn new(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Reference {
            namespace: namespace.into(),
            id: id.into(),
        }
    }

    /// The dotted path without the leading `&`, as exported to JSON.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}.{}", self.namespace, self.id)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "&{}.{}", self.namespace, self.id)
    }
}

/// A dynamically-typed SHON value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// An exact signed 64-bit integer. Never passes through floating point.
    Integer(i64),
    /// An exact integer outside the i64 range.
    BigInt(BigInt),
    /// The original literal text of a decimal number, preserved verbatim.
    Decimal(String),
    /// An opaque timestamp-shaped string, carried verbatim. No calendar
    /// parsing is performed anywhere in the crate.
    Timestamp(String),
    String(String),
    Array(Vec<Value>),
    Object(ShonMap),
    Reference(Reference),
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::BigInt(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_decimal(&self) -> bool {
        matches!(self, Value::Decimal(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_timestamp(&self) -> bool {
        matches!(self, Value::Timestamp(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_reference(&self) -> bool {
        matches!(self, Value::Reference(_))
    }

    /// True for every variant that renders on a single line: everything
    /// except arrays and objects.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The stored literal text of a decimal, if this is one.
    #[inline]
    #[must_use]
    pub fn as_decimal(&self) -> Option<&str> {
        match self {
            Value::Decimal(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_timestamp(&self) -> Option<&str> {
        match self {
            Value::Timestamp(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ShonMap> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Value::Reference(r) => Some(r),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<ShonMap> for Value {
    fn from(value: ShonMap) -> Self {
        Value::Object(value)
    }
}

impl From<Reference> for Value {
    fn from(value: Reference) -> Self {
        Value::Reference(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i64), Value::Integer(42));
        assert_eq!(Value::from("test"), Value::String("test".to_string()));
        assert_eq!(
            Value::from(Reference::new("title", "title_1")),
            Value::Reference(Reference {
                namespace: "title".to_string(),
                id: "title_1".to_string()
            })
        );
    }

    #[test]
    fn test_scalar_classification() {
        assert!(Value::Null.is_scalar());
        assert!(Value::Decimal("1.5".to_string()).is_scalar());
        assert!(Value::Reference(Reference::new("a", "b")).is_scalar());
        assert!(!Value::Array(vec![]).is_scalar());
        assert!(!Value::Object(ShonMap::new()).is_scalar());
    }

    #[test]
    fn test_reference_display() {
        let r = Reference::new("address", "address_2");
        assert_eq!(r.to_string(), "&address.address_2");
        assert_eq!(r.path(), "address.address_2");
    }

    #[test]
    fn test_accessors() {
        let v = Value::Timestamp("2025-03-22T14:45:00Z".to_string());
        assert_eq!(v.as_timestamp(), Some("2025-03-22T14:45:00Z"));
        assert_eq!(v.as_str(), None);
        assert!(v.is_timestamp());
    }
}
