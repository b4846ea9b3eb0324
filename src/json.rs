//! JSON bridge: lossless-where-possible conversion between [`Document`] and
//! a generic JSON value tree.
//!
//! ## Export
//!
//! The primary block's body becomes the JSON root object. Integers (of any
//! width) and booleans and nulls pass through natively; `Decimal` and
//! `Timestamp` emit their stored literal text verbatim as JSON *strings*
//! (never a JSON number, so `$decimal("1042.750")` keeps its trailing zero);
//! references emit as `"namespace.id"` strings without resolution. Key order
//! is preserved.
//!
//! ## Import
//!
//! JSON numbers with zero fractional part become `Integer` (or `BigInt`
//! beyond i64); all other numbers become `Decimal` carrying the *original
//! numeric token text*, never a value reconstructed by formatting a float.
//! JSON strings are classified by heuristic: an all-digit-plus-single-dot
//! pattern becomes `Decimal`, a string containing both `T` and `:` becomes
//! `Timestamp`, everything else stays a plain string. This inference is
//! best-effort, not validation.
//!
//! ## Examples
//!
//! ```rust
//! use shon::{from_json_str, to_json_string};
//!
//! let doc = from_json_str(r#"{"total": "1042.75"}"#, "data").unwrap();
//! let back = to_json_string(&doc).unwrap();
//! assert!(back.contains("\"1042.75\""));
//! ```

use crate::error::Result;
use crate::{Document, NamedBlock, ShonMap, Value};
use num_bigint::BigInt;
use serde::ser::{SerializeMap, SerializeSeq, Serializer as _};
use serde::Serialize;
use std::str::FromStr;

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::BigInt(bi) => serde_json::Number::from_str(&bi.to_string())
                .map_err(serde::ser::Error::custom)?
                .serialize(serializer),
            Value::Decimal(text) => serializer.serialize_str(text),
            Value::Timestamp(text) => serializer.serialize_str(text),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => map.serialize(serializer),
            Value::Reference(r) => serializer.serialize_str(&r.path()),
        }
    }
}

impl Serialize for ShonMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A document serializes as its JSON projection: the primary block's body.
/// Dictionary blocks are reachable only through references, which export as
/// opaque `"namespace.id"` strings; resolve first if inlined values are
/// wanted.
impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.primary_block() {
            Some(block) => block.body.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

/// Convert a document to a generic JSON value tree.
pub fn to_json(doc: &Document) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(doc)?)
}

/// Convert a document to pretty-printed JSON text (2-space indent).
pub fn to_json_string(doc: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Parse JSON text and import it as a single-block document named
/// `namespace`.
pub fn from_json_str(input: &str, namespace: &str) -> Result<Document> {
    let json: serde_json::Value = serde_json::from_str(input)?;
    Ok(from_json_value(&json, namespace))
}

/// Import a generic JSON value tree as a single-block document named
/// `namespace`. A non-object root is wrapped as a lone `value` entry so the
/// block body is always an object.
#[must_use]
pub fn from_json_value(json: &serde_json::Value, namespace: &str) -> Document {
    let body = match json {
        serde_json::Value::Object(map) => import_object(map),
        other => {
            let mut map = ShonMap::new();
            map.insert("value".to_string(), import_value(other));
            map
        }
    };
    Document {
        schema: None,
        blocks: vec![NamedBlock::with_body(namespace, body)],
        leading_comments: Vec::new(),
        trailing_comments: Vec::new(),
    }
}

fn import_object(map: &serde_json::Map<String, serde_json::Value>) -> ShonMap {
    let mut out = ShonMap::with_capacity(map.len());
    for (key, value) in map {
        out.insert(identifier_key(key), import_value(value));
    }
    out
}

fn import_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => import_number(n),
        serde_json::Value::String(s) => classify_string(s),
        serde_json::Value::Array(items) => Value::Array(items.iter().map(import_value).collect()),
        serde_json::Value::Object(map) => Value::Object(import_object(map)),
    }
}

/// Numbers import from their original token text, never through f64.
fn import_number(n: &serde_json::Number) -> Value {
    if let Some(i) = n.as_i64() {
        return Value::Integer(i);
    }
    let text = n.to_string();
    if text.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        // Integer beyond i64 range.
        return text
            .parse::<BigInt>()
            .map(Value::BigInt)
            .unwrap_or_else(|_| Value::Decimal(text));
    }
    // Zero fractional part, e.g. "2.0", still counts as an integer.
    if let Some((int_part, frac)) = text.split_once('.') {
        if !frac.is_empty()
            && frac.bytes().all(|b| b == b'0')
            && int_part
                .bytes()
                .all(|b| b.is_ascii_digit() || b == b'-')
        {
            if let Ok(i) = int_part.parse::<i64>() {
                return Value::Integer(i);
            }
            if let Ok(bi) = int_part.parse::<BigInt>() {
                return Value::BigInt(bi);
            }
        }
    }
    Value::Decimal(text)
}

/// Best-effort classification of JSON strings into typed literals.
fn classify_string(s: &str) -> Value {
    if is_decimal_literal(s) {
        Value::Decimal(s.to_string())
    } else if s.contains('T') && s.contains(':') {
        Value::Timestamp(s.to_string())
    } else {
        Value::String(s.to_string())
    }
}

/// An all-digit-plus-single-dot pattern, optionally signed: `-?digits.digits`.
fn is_decimal_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let Some((int_part, frac_part)) = unsigned.split_once('.') else {
        return false;
    };
    !int_part.is_empty()
        && !frac_part.is_empty()
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit())
}

/// Map an arbitrary bridge-side key onto the identifier grammar
/// (`[A-Za-z_][A-Za-z0-9_]*`) so serialized output always re-parses.
/// Characters outside the grammar become `_`; a leading digit gains a `_`
/// prefix.
pub(crate) fn identifier_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() || out.as_bytes()[0].is_ascii_digit() {
        out.insert(0, '_');
    }
    out
}
