//! # shon
//!
//! A transcoding engine for the SHON configuration format: a lexer, parser,
//! typed document model, and configurable serializer, with JSON and CSV
//! bridges built on the model rather than on text substitution.
//!
//! ## What is SHON?
//!
//! SHON is a JSON-like, typed, namespace-based configuration format. A
//! document is an optional `$schema` declaration followed by named blocks;
//! one block is the primary content and the rest act as reference tables
//! addressed through `&namespace.id` pointers. Decimals and timestamps are
//! tagged literals whose exact text survives every conversion. See the
//! [`spec`] module for the full format reference.
//!
//! ## Key Guarantees
//!
//! - **No precision loss**: `$decimal("1042.750")` keeps its trailing zero
//!   through parse, serialize, and both bridges; nothing numeric ever passes
//!   through a floating-point intermediate.
//! - **Formatting never changes meaning**: every option combination of the
//!   serializer (pretty, minified, sorted, compact arrays, trailing commas)
//!   parses back to the same value tree.
//! - **Order is structural**: objects are ordered maps; insertion order is
//!   preserved end-to-end unless sorted rendering is requested.
//! - **Errors are values**: one `Error` taxonomy with source positions, no
//!   partial-document recovery, no panics in the public API.
//!
//! ## Quick Start
//!
//! ```rust
//! use shon::{parse, to_string, to_string_with_options, ShonOptions};
//!
//! let source = r#"
//! @config {
//!     name: "api",
//!     retries: 3,
//!     timeout: $decimal("2.5"),
//! }
//! "#;
//!
//! let doc = parse(source).unwrap();
//! assert_eq!(doc.blocks[0].name, "config");
//!
//! // Reformat, minify, or sort without touching the document.
//! let pretty = to_string(&doc);
//! let minified = to_string_with_options(&doc, &ShonOptions::minified());
//! assert_eq!(parse(&pretty).unwrap(), parse(&minified).unwrap());
//! ```
//!
//! ## Converting
//!
//! ```rust
//! use shon::{from_json_str, from_csv_str, to_json_string, to_string};
//!
//! // JSON → SHON: decimals and timestamps are recognized and tagged.
//! let doc = from_json_str(r#"{"total": "19.99", "qty": 2}"#, "order").unwrap();
//! assert!(to_string(&doc).contains("$decimal(\"19.99\")"));
//!
//! // SHON → JSON: tagged literals come back as strings, verbatim.
//! assert!(to_json_string(&doc).unwrap().contains("\"19.99\""));
//!
//! // CSV → SHON: duplicated column values become reference tables.
//! let doc = from_csv_str("name,title\nSean,Engineer\nDarcy,Engineer\n", "people").unwrap();
//! assert!(to_string(&doc).contains("&title.title_1"));
//! ```
//!
//! ## Pipeline
//!
//! Every conversion is a pure, synchronous function from an input buffer to
//! an output buffer or an error: no shared state, no locks, linear in input
//! size. The formatter is the parser and serializer composed; the bridges
//! sit on the same model. Reference resolution
//! ([`Document::verify_references`]) is an explicit extra pass that default
//! transcoding never runs.

pub mod csv;
pub mod document;
pub mod error;
pub mod json;
pub mod lexer;
pub mod macros;
pub mod map;
pub mod parser;
pub mod ser;
pub mod spec;
pub mod value;

pub use csv::from_csv_str;
pub use document::{Document, NamedBlock};
pub use error::{BridgeError, Error, LexError, ParseError, Pos, Result};
pub use json::{from_json_str, from_json_value, to_json, to_json_string};
pub use map::ShonMap;
pub use parser::parse;
pub use ser::{to_string_with_options, Serializer, ShonOptions};
pub use value::{Reference, Value};

/// Render a document with default options (4-space indent, insertion order,
/// expanded arrays).
///
/// # Examples
///
/// ```rust
/// use shon::{parse, to_string};
///
/// let doc = parse("@a { x: 1 }").unwrap();
/// assert_eq!(to_string(&doc), "@a {\n    x: 1\n}\n");
/// ```
#[must_use]
pub fn to_string(doc: &Document) -> String {
    to_string_with_options(doc, &ShonOptions::default())
}

/// Reformat SHON text under the given options.
///
/// This is the parse-then-serialize pipeline: the output always parses back
/// to the same value tree as the input, comments are preserved anchored to
/// the construct that follows them, and nothing is interpreted along the
/// way.
///
/// # Errors
///
/// Returns an error if the input is not valid SHON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn format(input: &str, options: &ShonOptions) -> Result<String> {
    let doc = parse(input)?;
    Ok(to_string_with_options(&doc, options))
}

/// Collapse SHON text to a single line, dropping comments.
///
/// # Errors
///
/// Returns an error if the input is not valid SHON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn minify(input: &str) -> Result<String> {
    format(input, &ShonOptions::minified())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"$schema: "inventory.shos"

@inventory {
    records: [
        { sku: "WIDGET-001", price: $decimal("29.99"), qty: 2 },
    ],
    updated: $timestamp("2025-03-22T14:45:00Z"),
}
"#;

    #[test]
    fn test_format_is_semantics_preserving() {
        let original = parse(SAMPLE).unwrap();
        for options in [
            ShonOptions::new(),
            ShonOptions::minified(),
            ShonOptions::new().with_sort_keys(true),
            ShonOptions::new().with_compact_arrays(true).with_trailing_commas(true),
        ] {
            let formatted = format(SAMPLE, &options).unwrap();
            assert_eq!(parse(&formatted).unwrap(), original, "options: {options:?}");
        }
    }

    #[test]
    fn test_minify_is_one_line() {
        let out = minify(SAMPLE).unwrap();
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_format_rejects_invalid_input() {
        assert!(format("@a { x: }", &ShonOptions::new()).is_err());
    }
}
