//! SHON Format Reference
//!
//! This module documents the SHON format as implemented by this library. It
//! contains no code; it is the single place where the syntax, the type
//! system, and the transcoding rules are written down together.
//!
//! # Overview
//!
//! SHON is a JSON-like, typed, namespace-based configuration format. A file
//! holds an optional schema declaration followed by one or more named
//! blocks. The first block (or the one a caller names) is the document's
//! primary content; additional blocks (conventionally lower-cased singular
//! nouns) act as reference tables addressed through `&namespace.id`
//! pointers.
//!
//! ```text
//! $schema: "people.shos"
//!
//! @people {
//!     $type: "person",
//!     records: [
//!         { name: "Sean", title: &title.title_1 },
//!         { name: "Darcy", title: &title.title_1 },
//!     ],
//! }
//!
//! @title {
//!     title_1: "Engineer",
//! }
//! ```
//!
//! # Grammar
//!
//! ```text
//! Document     := SchemaDecl? NamedBlock+
//! SchemaDecl   := '$schema' ':' String
//! NamedBlock   := '@' Ident '{' ObjectBody '}'
//! ObjectBody   := TypeDecl? (KeyValue (',' KeyValue)* ','?)?
//! TypeDecl     := '$type' ':' String ','?
//! KeyValue     := Ident ':' Value
//! Value        := Object | Array | String | Number | 'true' | 'false' | 'null'
//!               | TypedLiteral | Reference
//! Object       := '{' ObjectBody '}'
//! Array        := '[' (Value (',' Value)* ','?)? ']'
//! TypedLiteral := '$' Ident '(' ... ')'
//! Reference    := '&' Ident ('.' Ident)+
//! ```
//!
//! Identifiers match `[A-Za-z_][A-Za-z0-9_]*`. Trailing commas are accepted
//! everywhere on input, whether or not the writer emitted them. `$type` is
//! legal only as the first entry of a block's top-level object; it is block
//! metadata, not a general metadata slot, and nested objects reject it.
//!
//! # Types
//!
//! | Type      | Syntax                       | Notes                                   |
//! |-----------|------------------------------|-----------------------------------------|
//! | Null      | `null`                       |                                         |
//! | Boolean   | `true` / `false`             |                                         |
//! | Integer   | `42`, `-17`                  | exact; i64 or arbitrary precision       |
//! | Decimal   | `$decimal("19.99")`          | literal text preserved verbatim         |
//! | Timestamp | `$timestamp("…T…:…")`        | opaque string; never calendar-parsed    |
//! | String    | `"text"`                     | escapes: `\"` and `\\` only             |
//! | Array     | `[a, b, c]`                  | order significant                       |
//! | Object    | `{ key: value }`             | ordered; duplicate keys are an error    |
//! | Reference | `&namespace.id`              | unresolved pointer, resolved on request |
//!
//! A bare number containing a `.` is a decimal; without one it is an
//! integer. Decimals and timestamps never pass through a floating-point
//! representation anywhere in the pipeline, so their exact spelling
//! (trailing zeros included) survives every transcoding.
//!
//! An unknown typed literal such as `$tuple(1, 2)` is call syntax for an
//! array literal: its comma-parsed payload is structurally identical to
//! `[1, 2]`.
//!
//! # Comments
//!
//! Line comments `// …` and non-nesting block comments `/* … */` are
//! trivia: they never affect parsing, and the formatter preserves them
//! anchored to the construct that follows them (an entry, a block header,
//! or the document tail). Minified output drops them.
//!
//! # JSON mapping
//!
//! | SHON                 | JSON                                  |
//! |----------------------|---------------------------------------|
//! | `null`/`true`/`42`   | same, natively                        |
//! | `$decimal("1.50")`   | `"1.50"` (string, text verbatim)      |
//! | `$timestamp("…")`    | the inner string, verbatim            |
//! | `&ns.id`             | `"ns.id"` (string, unresolved)        |
//! | arrays, objects      | structural, key order preserved       |
//!
//! Importing JSON inverts the table: numbers with a zero fractional part
//! become integers from their original token text; other numbers become
//! decimals the same way. Strings matching `-?digits.digits` become
//! decimals, strings containing both `T` and `:` become timestamps, and
//! everything else stays a string. The inference is best-effort tagging,
//! not validation.
//!
//! # CSV mapping
//!
//! A CSV file (header + at least one data row) imports as a primary block
//! holding a `records` array of row objects. Any column with at least one
//! repeated value is extracted into a reference table block named after the
//! lower-cased header, its distinct values keyed `<header>_<n>` in first
//! encounter order, and its cells replaced by references. Empty cells stay
//! empty strings.
