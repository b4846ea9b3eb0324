//! SHON serialization.
//!
//! [`Serializer`] renders a [`Document`] back to SHON text under a
//! [`ShonOptions`] configuration. Serialization never mutates the document
//! and never fails: every formatting behavior is a parameter, and every
//! rendering the serializer can produce parses back to the same value tree.
//!
//! ## Options
//!
//! All options are independent and composable:
//!
//! - `indent`: spaces per nesting level (default 4; moot under `minify`)
//! - `sort_keys`: alphabetical instead of preserved insertion order
//! - `compact_arrays`: arrays of flat objects render one `{ k: v }` per line
//! - `trailing_commas`: multi-line entry/element lists end with a comma
//! - `minify`: whole document on one line, comments dropped
//! - `type_annotation`: injected as a `$type` first key on the primary block
//!
//! ## Examples
//!
//! ```rust
//! use shon::{parse, to_string_with_options, ShonOptions};
//!
//! let doc = parse("@config { b: 1, a: 2 }").unwrap();
//! let sorted = to_string_with_options(&doc, &ShonOptions::new().with_sort_keys(true));
//! assert!(sorted.find("a: 2").unwrap() < sorted.find("b: 1").unwrap());
//! ```

use crate::{Document, NamedBlock, ShonMap, Value};

/// Configuration for SHON rendering. One immutable value, threaded through
/// the whole serialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShonOptions {
    pub indent: usize,
    pub sort_keys: bool,
    pub compact_arrays: bool,
    pub trailing_commas: bool,
    pub minify: bool,
    pub type_annotation: Option<String>,
}

impl Default for ShonOptions {
    fn default() -> Self {
        ShonOptions {
            indent: 4,
            sort_keys: false,
            compact_arrays: false,
            trailing_commas: false,
            minify: false,
            type_annotation: None,
        }
    }
}

impl ShonOptions {
    /// Default pretty output: 4-space indent, insertion order, expanded
    /// arrays, no trailing commas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output with comments stripped.
    #[must_use]
    pub fn minified() -> Self {
        ShonOptions {
            minify: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    #[must_use]
    pub fn with_compact_arrays(mut self, compact_arrays: bool) -> Self {
        self.compact_arrays = compact_arrays;
        self
    }

    #[must_use]
    pub fn with_trailing_commas(mut self, trailing_commas: bool) -> Self {
        self.trailing_commas = trailing_commas;
        self
    }

    #[must_use]
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    #[must_use]
    pub fn with_type_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.type_annotation = Some(annotation.into());
        self
    }
}

/// Render a document with the given options.
#[must_use]
pub fn to_string_with_options(doc: &Document, options: &ShonOptions) -> String {
    let mut serializer = Serializer::new(options);
    serializer.write_document(doc);
    serializer.into_inner()
}

/// The SHON serializer. Writes into an owned output buffer; created fresh
/// for each document.
pub struct Serializer<'a> {
    output: String,
    options: &'a ShonOptions,
}

impl<'a> Serializer<'a> {
    #[must_use]
    pub fn new(options: &'a ShonOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.output
    }

    fn push_indent(&mut self, level: usize) {
        if !self.options.minify {
            for _ in 0..level * self.options.indent {
                self.output.push(' ');
            }
        }
    }

    fn push_newline(&mut self) {
        if !self.options.minify {
            self.output.push('\n');
        }
    }

    fn push_comments(&mut self, comments: &[String], level: usize) {
        if self.options.minify {
            return;
        }
        for comment in comments {
            self.push_indent(level);
            self.output.push_str(comment);
            self.output.push('\n');
        }
    }

    /// Separator after entry `idx` of `count`: a comma between entries, and a
    /// trailing comma after the last one when configured.
    fn push_separator(&mut self, idx: usize, count: usize) {
        if idx + 1 < count {
            self.output.push(',');
        } else if self.options.trailing_commas && !self.options.minify {
            self.output.push(',');
        }
    }

    pub fn write_document(&mut self, doc: &Document) {
        self.push_comments(&doc.leading_comments, 0);
        if let Some(schema) = &doc.schema {
            self.output.push_str("$schema:");
            if !self.options.minify {
                self.output.push(' ');
            }
            self.write_quoted(schema);
            if !self.options.minify {
                self.output.push('\n');
                if !doc.blocks.is_empty() {
                    self.output.push('\n');
                }
            }
        }

        for (i, block) in doc.blocks.iter().enumerate() {
            if i > 0 {
                self.push_newline();
            }
            self.write_block(block, i == 0);
            self.push_newline();
        }

        self.push_comments(&doc.trailing_comments, 0);
    }

    fn write_block(&mut self, block: &NamedBlock, primary: bool) {
        self.push_comments(&block.comments, 0);
        self.output.push('@');
        self.output.push_str(&block.name);
        if !self.options.minify {
            self.output.push(' ');
        }

        // The type_annotation option overrides or injects on the primary
        // block only; other blocks keep their own annotation.
        let annotation = if primary {
            self.options
                .type_annotation
                .clone()
                .or_else(|| block.type_annotation.clone())
        } else {
            block.type_annotation.clone()
        };

        self.write_object(&block.body, 0, annotation.as_deref());
    }

    fn write_value(&mut self, value: &Value, level: usize) {
        match value {
            Value::Array(items) => self.write_array(items, level),
            Value::Object(map) => self.write_object(map, level, None),
            scalar => self.write_scalar(scalar),
        }
    }

    fn write_scalar(&mut self, value: &Value) {
        match value {
            Value::Null => self.output.push_str("null"),
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Integer(i) => self.output.push_str(&i.to_string()),
            Value::BigInt(bi) => self.output.push_str(&bi.to_string()),
            Value::Decimal(text) => {
                self.output.push_str("$decimal(");
                self.write_quoted(text);
                self.output.push(')');
            }
            Value::Timestamp(text) => {
                self.output.push_str("$timestamp(");
                self.write_quoted(text);
                self.output.push(')');
            }
            Value::String(s) => self.write_quoted(s),
            Value::Reference(r) => {
                self.output.push('&');
                self.output.push_str(&r.namespace);
                self.output.push('.');
                self.output.push_str(&r.id);
            }
            Value::Array(_) | Value::Object(_) => unreachable!("handled by write_value"),
        }
    }

    fn write_quoted(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                _ => self.output.push(ch),
            }
        }
        self.output.push('"');
    }

    /// Write an object from `{` through `}`. `annotation` injects a `$type`
    /// first entry (block top-level objects only).
    fn write_object(&mut self, map: &ShonMap, level: usize, annotation: Option<&str>) {
        if map.is_empty() && annotation.is_none() {
            self.output.push_str("{}");
            return;
        }

        let entries = self.entries_in_order(map);
        let count = entries.len() + usize::from(annotation.is_some());

        self.output.push('{');
        self.push_newline();

        let inner = level + 1;
        let mut idx = 0;
        if let Some(annotation) = annotation {
            self.push_indent(inner);
            self.output.push_str("$type:");
            if !self.options.minify {
                self.output.push(' ');
            }
            self.write_quoted(annotation);
            self.push_separator(idx, count);
            self.push_newline();
            idx += 1;
        }

        for (key, value) in entries {
            self.push_comments(map.comments_of(key), inner);
            self.push_indent(inner);
            self.output.push_str(key);
            self.output.push(':');
            if !self.options.minify {
                self.output.push(' ');
            }
            self.write_value(value, inner);
            self.push_separator(idx, count);
            self.push_newline();
            idx += 1;
        }

        self.push_indent(level);
        self.output.push('}');
    }

    fn entries_in_order<'m>(&self, map: &'m ShonMap) -> Vec<(&'m String, &'m Value)> {
        if self.options.sort_keys {
            map.sorted_iter().collect()
        } else {
            map.iter().collect()
        }
    }

    fn write_array(&mut self, items: &[Value], level: usize) {
        if items.is_empty() {
            self.output.push_str("[]");
            return;
        }

        if self.options.minify {
            self.output.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    self.output.push(',');
                }
                self.write_value(item, level);
            }
            self.output.push(']');
            return;
        }

        if items.iter().all(Value::is_scalar) {
            self.output.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    self.output.push_str(", ");
                }
                self.write_scalar(item);
            }
            self.output.push(']');
            return;
        }

        if self.options.compact_arrays && items.iter().all(is_compactable_object) {
            self.output.push('[');
            self.push_newline();
            let inner = level + 1;
            for (idx, item) in items.iter().enumerate() {
                let map = item.as_object().expect("checked by is_compactable_object");
                self.push_indent(inner);
                self.write_compact_object(map);
                self.push_separator(idx, items.len());
                self.push_newline();
            }
            self.push_indent(level);
            self.output.push(']');
            return;
        }

        self.output.push('[');
        self.push_newline();
        let inner = level + 1;
        for (idx, item) in items.iter().enumerate() {
            self.push_indent(inner);
            self.write_value(item, inner);
            self.push_separator(idx, items.len());
            self.push_newline();
        }
        self.push_indent(level);
        self.output.push(']');
    }

    /// One flat object on a single line: `{ k: v, k2: v2 }`.
    fn write_compact_object(&mut self, map: &ShonMap) {
        if map.is_empty() {
            self.output.push_str("{}");
            return;
        }
        self.output.push_str("{ ");
        let entries = self.entries_in_order(map);
        for (idx, (key, value)) in entries.into_iter().enumerate() {
            if idx > 0 {
                self.output.push_str(", ");
            }
            self.output.push_str(key);
            self.output.push_str(": ");
            self.write_scalar(value);
        }
        self.output.push_str(" }");
    }
}

/// Compact-array element check: an Object whose own values are all scalar.
/// An element carrying entry comments falls back to expanded form so the
/// comments are not lost.
fn is_compactable_object(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.has_comments() && map.values().all(Value::is_scalar),
        _ => false,
    }
}
