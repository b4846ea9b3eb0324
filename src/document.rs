//! The document model: named blocks under an optional schema declaration.
//!
//! A [`Document`] is the root every other component operates on. It is
//! produced once, by the parser or by one of the bridges, and is never
//! mutated by serialization; all formatting behavior lives in
//! [`crate::ShonOptions`].
//!
//! Exactly one block is semantically *primary* (the first, or the one a
//! caller names); the remaining blocks act as reference tables that are only
//! reachable through `&namespace.id` pointers. Resolution of those pointers
//! is an explicit pass ([`Document::verify_references`] /
//! [`Document::resolve`]) and is deliberately not part of any default
//! transcoding path: the format is forward-reference friendly, so references
//! travel as opaque pointers unless a caller asks otherwise.

use crate::error::{Error, Result};
use crate::{Reference, ShonMap, Value};

/// A top-level `@name { ... }` container.
///
/// `$type`, when present, is block metadata rather than an ordinary entry;
/// the grammar only allows it as the first key of the block's top-level
/// object, and modeling it here makes that rule structural.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamedBlock {
    pub name: String,
    pub type_annotation: Option<String>,
    /// Comments anchored in front of the `@name` header.
    pub comments: Vec<String>,
    pub body: ShonMap,
}

impl NamedBlock {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        NamedBlock {
            name: name.into(),
            type_annotation: None,
            comments: Vec::new(),
            body: ShonMap::new(),
        }
    }

    #[must_use]
    pub fn with_body(name: impl Into<String>, body: ShonMap) -> Self {
        NamedBlock {
            name: name.into(),
            type_annotation: None,
            comments: Vec::new(),
            body,
        }
    }
}

/// A parsed SHON document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// The raw `$schema` path, carried as an opaque string and never
    /// resolved.
    pub schema: Option<String>,
    pub blocks: Vec<NamedBlock>,
    /// Comments anchored in front of the `$schema` declaration.
    pub leading_comments: Vec<String>,
    /// Comments with no following content token (end of input).
    pub trailing_comments: Vec<String>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Document::default()
    }

    /// The primary block: the first one, if any.
    #[must_use]
    pub fn primary_block(&self) -> Option<&NamedBlock> {
        self.blocks.first()
    }

    /// The block named `name`, if any.
    #[must_use]
    pub fn block(&self, name: &str) -> Option<&NamedBlock> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// Look up a reference target without error reporting.
    #[must_use]
    pub fn lookup(&self, reference: &Reference) -> Option<&Value> {
        self.block(&reference.namespace)?.body.get(&reference.id)
    }

    /// Resolve one reference, failing with [`Error::DanglingReference`] when
    /// either the namespace or the id is missing.
    pub fn resolve(&self, reference: &Reference) -> Result<&Value> {
        self.lookup(reference).ok_or_else(|| Error::DanglingReference {
            namespace: reference.namespace.clone(),
            id: reference.id.clone(),
        })
    }

    /// Walk the whole document and verify every reference resolves.
    ///
    /// This is the optional resolution pass: default transcoding never calls
    /// it, so dangling references are only ever reported when a caller asks.
    pub fn verify_references(&self) -> Result<()> {
        for block in &self.blocks {
            for (_, value) in block.body.iter() {
                self.verify_value(value)?;
            }
        }
        Ok(())
    }

    fn verify_value(&self, value: &Value) -> Result<()> {
        match value {
            Value::Reference(r) => {
                self.resolve(r)?;
                Ok(())
            }
            Value::Array(items) => {
                for item in items {
                    self.verify_value(item)?;
                }
                Ok(())
            }
            Value::Object(map) => {
                for (_, v) in map.iter() {
                    self.verify_value(v)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut title = NamedBlock::new("title");
        title
            .body
            .insert("title_1".to_string(), Value::from("Engineer"));

        let mut data = NamedBlock::new("people");
        let mut rec = ShonMap::new();
        rec.insert(
            "title".to_string(),
            Value::Reference(Reference::new("title", "title_1")),
        );
        data.body
            .insert("records".to_string(), Value::Array(vec![Value::Object(rec)]));

        Document {
            schema: None,
            blocks: vec![data, title],
            leading_comments: Vec::new(),
            trailing_comments: Vec::new(),
        }
    }

    #[test]
    fn test_primary_block_is_first() {
        let doc = sample();
        assert_eq!(doc.primary_block().unwrap().name, "people");
    }

    #[test]
    fn test_resolve_existing() {
        let doc = sample();
        let r = Reference::new("title", "title_1");
        assert_eq!(doc.resolve(&r).unwrap(), &Value::from("Engineer"));
        assert!(doc.verify_references().is_ok());
    }

    #[test]
    fn test_dangling_namespace_and_id() {
        let doc = sample();
        let missing_ns = Reference::new("address", "address_1");
        assert!(matches!(
            doc.resolve(&missing_ns),
            Err(Error::DanglingReference { .. })
        ));

        let missing_id = Reference::new("title", "title_9");
        assert!(matches!(
            doc.resolve(&missing_id),
            Err(Error::DanglingReference { .. })
        ));
    }

    #[test]
    fn test_verify_walks_nested_values() {
        let mut doc = sample();
        let mut nested = ShonMap::new();
        nested.insert(
            "bad".to_string(),
            Value::Array(vec![Value::Reference(Reference::new("ghost", "g_1"))]),
        );
        doc.blocks[0]
            .body
            .insert("extra".to_string(), Value::Object(nested));

        assert!(matches!(
            doc.verify_references(),
            Err(Error::DanglingReference { namespace, .. }) if namespace == "ghost"
        ));
    }
}
