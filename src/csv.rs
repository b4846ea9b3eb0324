//! CSV importer: builds a document from tabular rows, extracting duplicated
//! column values into reference tables.
//!
//! For each column the importer counts distinct values across all data rows.
//! A column whose distinct count is *strictly less* than the row count
//! (that is, any column with at least one repeated value) becomes a
//! **dictionary column**: its distinct values move into an auxiliary block
//! named after the lower-cased header, keyed `<header>_<n>` in first
//! encounter order, and each cell in that column becomes a
//! `&header.header_n` reference. Columns with all-distinct values stay
//! inline as strings. Empty cells stay empty strings, never null.
//!
//! The distinct-count heuristic is deliberately kept as-is: it flags a
//! two-row file whose column repeats one value exactly twice, and it misses
//! unique-but-referenced columns. That is a documented trait of the
//! extraction, not something this importer second-guesses.
//!
//! ## Examples
//!
//! ```rust
//! use shon::from_csv_str;
//!
//! let csv = "name,title\nSean,Engineer\nDarcy,Engineer\n";
//! let doc = from_csv_str(csv, "people").unwrap();
//! assert_eq!(doc.blocks[0].name, "people");
//! assert_eq!(doc.blocks[1].name, "title");
//! ```

use crate::error::{BridgeError, Error, Result};
use crate::json::identifier_key;
use crate::{Document, NamedBlock, Reference, ShonMap, Value};
use indexmap::{IndexMap, IndexSet};

/// A dictionary column extracted into a reference table.
struct Dictionary {
    column: usize,
    /// Lower-cased header; block name and reference namespace.
    name: String,
    /// Distinct cell value → assigned id, in first-encounter order.
    ids: IndexMap<String, String>,
}

/// Import CSV text (header row + at least one data row) as a document named
/// `namespace`.
pub fn from_csv_str(input: &str, namespace: &str) -> Result<Document> {
    let mut reader = csv::ReaderBuilder::new().from_reader(input.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(Error::from)?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(Error::Bridge(BridgeError::EmptyCsv));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record.map_err(Error::from)?);
    }
    if rows.is_empty() {
        return Err(Error::Bridge(BridgeError::EmptyCsv));
    }

    // Distinct values per column, in first-encounter order.
    let mut distinct: Vec<IndexSet<String>> = vec![IndexSet::new(); headers.len()];
    for row in &rows {
        for (col, cell) in row.iter().enumerate() {
            if col < distinct.len() {
                distinct[col].insert(cell.to_string());
            }
        }
    }

    // A column is a dictionary column iff it has at least one duplicate.
    let mut dictionaries = Vec::new();
    for (col, values) in distinct.iter().enumerate() {
        if values.len() < rows.len() {
            let name = identifier_key(&headers[col].to_lowercase());
            let ids = values
                .iter()
                .enumerate()
                .map(|(n, value)| (value.clone(), format!("{}_{}", name, n + 1)))
                .collect();
            dictionaries.push(Dictionary { column: col, name, ids });
        }
    }

    let mut records = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut record = ShonMap::with_capacity(headers.len());
        for (col, header) in headers.iter().enumerate() {
            let cell = row.get(col).unwrap_or("");
            let value = match dictionaries.iter().find(|d| d.column == col) {
                Some(dict) => Value::Reference(Reference::new(
                    dict.name.clone(),
                    dict.ids[cell].clone(),
                )),
                None => Value::String(cell.to_string()),
            };
            record.insert(identifier_key(header), value);
        }
        records.push(Value::Object(record));
    }

    let mut body = ShonMap::new();
    body.insert("records".to_string(), Value::Array(records));

    let mut blocks = vec![NamedBlock::with_body(namespace, body)];
    for dict in dictionaries {
        let mut table = ShonMap::with_capacity(dict.ids.len());
        for (value, id) in dict.ids {
            table.insert(id, Value::String(value));
        }
        blocks.push(NamedBlock::with_body(dict.name, table));
    }

    Ok(Document {
        schema: None,
        blocks,
        leading_comments: Vec::new(),
        trailing_comments: Vec::new(),
    })
}
