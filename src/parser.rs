//! SHON parser.
//!
//! A hand-written recursive-descent parser over the token stream from
//! [`crate::lexer`]. One token of lookahead, one forward pass, no
//! backtracking; every error is fatal for the document and carries a source
//! position.
//!
//! Grammar:
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
//! Trailing commas are always accepted. `$type` is only legal as the first
//! entry of a block's top-level object. A number with a fractional part
//! becomes a [`Value::Decimal`] carrying its raw text; an integer literal
//! outside i64 range becomes a [`Value::BigInt`]. `$decimal("…")` and
//! `$timestamp("…")` wrap their inner string; any other `$name(...)` call is
//! structurally an array literal.
//!
//! Comment trivia flows through the parser into the model: comments anchor
//! to the construct that follows them (an object entry, a block header, the
//! schema declaration) so the formatter can put them back. Comments in
//! positions without an anchor of their own (inside an array, before a
//! closing delimiter) re-anchor to the next entry or block, or to the
//! document tail at end of input.

use crate::error::{Error, ParseError, Pos, Result};
use crate::lexer::{tokenize, Token, TokenKind};
use crate::{Document, NamedBlock, Reference, ShonMap, Value};
use num_bigint::BigInt;

/// Lex and parse SHON source text into a [`Document`].
pub fn parse(input: &str) -> Result<Document> {
    let tokens = tokenize(input).map_err(Error::from)?;
    Parser::new(tokens).parse_document().map_err(Error::from)
}

struct Parser {
    tokens: Vec<Token>,
    index: usize,
    /// Comment trivia carried forward until the next anchor drains it.
    pending_comments: Vec<String>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(matches!(
            tokens.last().map(|t| &t.kind),
            Some(TokenKind::Eof)
        ));
        Parser {
            tokens,
            index: 0,
            pending_comments: Vec::new(),
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.index]
    }

    /// Consume the current token, moving its leading comments into the
    /// pending pool. Never advances past Eof.
    fn advance(&mut self) -> Token {
        let tok = &mut self.tokens[self.index];
        self.pending_comments.append(&mut tok.comments);
        let out = tok.clone();
        if !matches!(out.kind, TokenKind::Eof) {
            self.index += 1;
        }
        out
    }

    fn take_comments(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_comments)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let tok = self.peek();
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: tok.kind.describe(),
            pos: tok.pos,
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> std::result::Result<Token, ParseError> {
        if &self.peek().kind == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_ident(&mut self) -> std::result::Result<(String, Pos), ParseError> {
        match &self.peek().kind {
            TokenKind::Ident(_) => {
                let tok = self.advance();
                match tok.kind {
                    TokenKind::Ident(name) => Ok((name, tok.pos)),
                    _ => unreachable!(),
                }
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    fn expect_string(&mut self) -> std::result::Result<String, ParseError> {
        match &self.peek().kind {
            TokenKind::Str(_) => {
                let tok = self.advance();
                match tok.kind {
                    TokenKind::Str(s) => Ok(s),
                    _ => unreachable!(),
                }
            }
            _ => Err(self.unexpected("a string literal")),
        }
    }

    fn parse_document(mut self) -> std::result::Result<Document, ParseError> {
        let mut doc = Document::new();

        // SchemaDecl: the only legal use of '$' at document level.
        if matches!(self.peek().kind, TokenKind::Dollar) {
            self.advance();
            doc.leading_comments = self.take_comments();
            let (name, pos) = self.expect_ident()?;
            if name != "schema" {
                return Err(ParseError::UnexpectedToken {
                    expected: "'schema'".to_string(),
                    found: format!("identifier '{name}'"),
                    pos,
                });
            }
            self.expect(&TokenKind::Colon, "':'")?;
            doc.schema = Some(self.expect_string()?);
        }

        loop {
            match self.peek().kind {
                TokenKind::At => {
                    let block = self.parse_block()?;
                    doc.blocks.push(block);
                }
                TokenKind::Eof => break,
                _ => return Err(self.unexpected("'@' block or end of input")),
            }
        }

        if doc.blocks.is_empty() && doc.schema.is_none() {
            return Err(ParseError::EmptyDocument);
        }

        self.advance(); // Eof trivia
        doc.trailing_comments = self.take_comments();
        Ok(doc)
    }

    fn parse_block(&mut self) -> std::result::Result<NamedBlock, ParseError> {
        self.advance(); // '@'
        let comments = self.take_comments();
        let (name, _) = self.expect_ident()?;
        let open = self.expect(&TokenKind::LBrace, "'{'")?;
        let (body, type_annotation) = self.parse_object_body(open.pos, true)?;
        Ok(NamedBlock {
            name,
            type_annotation,
            comments,
            body,
        })
    }

    /// Parse object entries up to and including the closing `}`.
    ///
    /// `top_level` is true only for a block's own body, the single position
    /// where a `$type` declaration is legal.
    fn parse_object_body(
        &mut self,
        open_pos: Pos,
        top_level: bool,
    ) -> std::result::Result<(ShonMap, Option<String>), ParseError> {
        let mut map = ShonMap::new();
        let mut type_annotation = None;
        let mut first = true;

        loop {
            match &self.peek().kind {
                TokenKind::RBrace => {
                    self.advance();
                    return Ok((map, type_annotation));
                }
                TokenKind::Eof => {
                    return Err(ParseError::UnbalancedDelimiter {
                        open: '{',
                        pos: open_pos,
                    })
                }
                TokenKind::Dollar => {
                    let dollar = self.advance();
                    let (name, _) = self.expect_ident()?;
                    if name != "type" {
                        return Err(ParseError::UnexpectedToken {
                            expected: "an identifier key or '}'".to_string(),
                            found: format!("'${name}'"),
                            pos: dollar.pos,
                        });
                    }
                    if !(top_level && first) {
                        return Err(ParseError::MisplacedTypeDecl { pos: dollar.pos });
                    }
                    self.expect(&TokenKind::Colon, "':'")?;
                    type_annotation = Some(self.expect_string()?);
                    first = false;
                    if matches!(self.peek().kind, TokenKind::Comma) {
                        self.advance();
                    }
                }
                TokenKind::Ident(_) => {
                    let (key, key_pos) = self.expect_ident()?;
                    let comments = self.take_comments();
                    if map.contains_key(&key) {
                        return Err(ParseError::DuplicateKey { key, pos: key_pos });
                    }
                    self.expect(&TokenKind::Colon, "':'")?;
                    let value = self.parse_value()?;
                    map.set_comments(&key, comments);
                    map.insert(key, value);
                    first = false;
                    match self.peek().kind {
                        TokenKind::Comma => {
                            self.advance();
                        }
                        TokenKind::RBrace | TokenKind::Eof => {}
                        _ => return Err(self.unexpected("',' or '}'")),
                    }
                }
                _ => return Err(self.unexpected("an identifier key or '}'")),
            }
        }
    }

    fn parse_value(&mut self) -> std::result::Result<Value, ParseError> {
        match &self.peek().kind {
            TokenKind::LBrace => {
                let open = self.advance();
                let (map, _) = self.parse_object_body(open.pos, false)?;
                Ok(Value::Object(map))
            }
            TokenKind::LBracket => self.parse_array(),
            TokenKind::Str(_) => {
                let tok = self.advance();
                match tok.kind {
                    TokenKind::Str(s) => Ok(Value::String(s)),
                    _ => unreachable!(),
                }
            }
            TokenKind::Number { .. } => {
                let tok = self.advance();
                match tok.kind {
                    TokenKind::Number { text, decimal } => {
                        if decimal {
                            Ok(Value::Decimal(text))
                        } else {
                            self.integer_value(text, tok.pos)
                        }
                    }
                    _ => unreachable!(),
                }
            }
            TokenKind::Ident(_) => {
                let (word, pos) = self.expect_ident()?;
                match word.as_str() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" => Ok(Value::Null),
                    _ => Err(ParseError::UnexpectedToken {
                        expected: "a value".to_string(),
                        found: format!("identifier '{word}'"),
                        pos,
                    }),
                }
            }
            TokenKind::Dollar => self.parse_typed_literal(),
            TokenKind::Amp => self.parse_reference(),
            _ => Err(self.unexpected("a value")),
        }
    }

    fn integer_value(&self, text: String, pos: Pos) -> std::result::Result<Value, ParseError> {
        match text.parse::<i64>() {
            Ok(i) => Ok(Value::Integer(i)),
            Err(_) => text
                .parse::<BigInt>()
                .map(Value::BigInt)
                .map_err(|_| ParseError::UnexpectedToken {
                    expected: "an integer literal".to_string(),
                    found: format!("number '{text}'"),
                    pos,
                }),
        }
    }

    fn parse_array(&mut self) -> std::result::Result<Value, ParseError> {
        let open = self.advance(); // '['
        let mut items = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::RBracket => {
                    self.advance();
                    return Ok(Value::Array(items));
                }
                TokenKind::Eof => {
                    return Err(ParseError::UnbalancedDelimiter {
                        open: '[',
                        pos: open.pos,
                    })
                }
                _ => {
                    items.push(self.parse_value()?);
                    match self.peek().kind {
                        TokenKind::Comma => {
                            self.advance();
                        }
                        TokenKind::RBracket | TokenKind::Eof => {}
                        _ => return Err(self.unexpected("',' or ']'")),
                    }
                }
            }
        }
    }

    /// `$decimal("…")` and `$timestamp("…")` wrap an opaque string; any
    /// other `$name(...)` is call syntax for an array literal.
    fn parse_typed_literal(&mut self) -> std::result::Result<Value, ParseError> {
        self.advance(); // '$'
        let (name, _) = self.expect_ident()?;
        let open = self.expect(&TokenKind::LParen, "'('")?;

        if name == "decimal" || name == "timestamp" {
            let inner = self.expect_string()?;
            self.expect(&TokenKind::RParen, "')'")?;
            return Ok(if name == "decimal" {
                Value::Decimal(inner)
            } else {
                Value::Timestamp(inner)
            });
        }

        let mut items = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::RParen => {
                    self.advance();
                    return Ok(Value::Array(items));
                }
                TokenKind::Eof => {
                    return Err(ParseError::UnbalancedDelimiter {
                        open: '(',
                        pos: open.pos,
                    })
                }
                _ => {
                    items.push(self.parse_value()?);
                    match self.peek().kind {
                        TokenKind::Comma => {
                            self.advance();
                        }
                        TokenKind::RParen | TokenKind::Eof => {}
                        _ => return Err(self.unexpected("',' or ')'")),
                    }
                }
            }
        }
    }

    fn parse_reference(&mut self) -> std::result::Result<Value, ParseError> {
        let amp = self.advance(); // '&'
        let namespace = match self.expect_ident() {
            Ok((ns, _)) => ns,
            Err(_) => return Err(ParseError::MalformedReference { pos: amp.pos }),
        };
        if !matches!(self.peek().kind, TokenKind::Dot) {
            return Err(ParseError::MalformedReference { pos: amp.pos });
        }
        let mut segments = Vec::new();
        while matches!(self.peek().kind, TokenKind::Dot) {
            self.advance();
            match self.expect_ident() {
                Ok((seg, _)) => segments.push(seg),
                Err(_) => return Err(ParseError::MalformedReference { pos: amp.pos }),
            }
        }
        Ok(Value::Reference(Reference {
            namespace,
            id: segments.join("."),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_document() {
        let doc = parse(r#"@config { name: "api", port: 8080, debug: true, tag: null }"#).unwrap();
        assert_eq!(doc.blocks.len(), 1);
        let body = &doc.blocks[0].body;
        assert_eq!(body.get("name"), Some(&Value::String("api".to_string())));
        assert_eq!(body.get("port"), Some(&Value::Integer(8080)));
        assert_eq!(body.get("debug"), Some(&Value::Bool(true)));
        assert_eq!(body.get("tag"), Some(&Value::Null));
    }

    #[test]
    fn test_schema_and_block() {
        let doc = parse("$schema: \"people.shos\"\n\n@people { records: [] }").unwrap();
        assert_eq!(doc.schema.as_deref(), Some("people.shos"));
        assert_eq!(doc.blocks[0].name, "people");
    }

    #[test]
    fn test_schema_only_document_is_degenerate_but_legal() {
        let doc = parse("$schema: \"empty.shos\"").unwrap();
        assert!(doc.blocks.is_empty());
        assert_eq!(doc.schema.as_deref(), Some("empty.shos"));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(parse(""), Err(Error::Parse(ParseError::EmptyDocument))));
        assert!(matches!(
            parse("   // nothing\n"),
            Err(Error::Parse(ParseError::EmptyDocument))
        ));
    }

    #[test]
    fn test_trailing_commas_accepted_everywhere() {
        let doc = parse("@a { list: [1, 2, 3,], obj: { x: 1, }, }").unwrap();
        let body = &doc.blocks[0].body;
        assert_eq!(
            body.get("list"),
            Some(&Value::Array(vec![
                Value::Integer(1),
                Value::Integer(2),
                Value::Integer(3)
            ]))
        );
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let err = parse("@a { id: 1, id: 2 }").unwrap_err();
        assert!(
            matches!(err, Error::Parse(ParseError::DuplicateKey { ref key, .. }) if key == "id")
        );
    }

    #[test]
    fn test_duplicate_key_in_nested_object() {
        let err = parse("@a { o: { x: 1, x: 2 } }").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::DuplicateKey { .. })));
    }

    #[test]
    fn test_typed_literals() {
        let doc = parse(
            r#"@a { price: $decimal("1042.75"), seen: $timestamp("2025-03-22T14:45:00Z") }"#,
        )
        .unwrap();
        let body = &doc.blocks[0].body;
        assert_eq!(
            body.get("price"),
            Some(&Value::Decimal("1042.75".to_string()))
        );
        assert_eq!(
            body.get("seen"),
            Some(&Value::Timestamp("2025-03-22T14:45:00Z".to_string()))
        );
    }

    #[test]
    fn test_unknown_typed_literal_is_call_syntax_array() {
        let doc = parse(r#"@a { pair: $tuple(1, "two", true,) }"#).unwrap();
        assert_eq!(
            doc.blocks[0].body.get("pair"),
            Some(&Value::Array(vec![
                Value::Integer(1),
                Value::String("two".to_string()),
                Value::Bool(true),
            ]))
        );
    }

    #[test]
    fn test_call_syntax_equivalent_to_bracket_literal() {
        let a = parse("@a { v: $point(1, 2) }").unwrap();
        let b = parse("@a { v: [1, 2] }").unwrap();
        assert_eq!(a.blocks[0].body.get("v"), b.blocks[0].body.get("v"));
    }

    #[test]
    fn test_references() {
        let doc = parse("@a { home: &address.address_1, deep: &geo.region.north }").unwrap();
        let body = &doc.blocks[0].body;
        assert_eq!(
            body.get("home"),
            Some(&Value::Reference(Reference::new("address", "address_1")))
        );
        assert_eq!(
            body.get("deep"),
            Some(&Value::Reference(Reference::new("geo", "region.north")))
        );
    }

    #[test]
    fn test_malformed_reference() {
        assert!(matches!(
            parse("@a { r: &lonely }"),
            Err(Error::Parse(ParseError::MalformedReference { .. }))
        ));
        assert!(matches!(
            parse("@a { r: &ns. }"),
            Err(Error::Parse(ParseError::MalformedReference { .. }))
        ));
    }

    #[test]
    fn test_type_decl_on_block() {
        let doc = parse(r#"@people { $type: "person", count: 2 }"#).unwrap();
        assert_eq!(doc.blocks[0].type_annotation.as_deref(), Some("person"));
        assert_eq!(doc.blocks[0].body.get("count"), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_type_decl_must_be_first() {
        assert!(matches!(
            parse(r#"@a { x: 1, $type: "t" }"#),
            Err(Error::Parse(ParseError::MisplacedTypeDecl { .. }))
        ));
    }

    #[test]
    fn test_type_decl_rejected_in_nested_object() {
        assert!(matches!(
            parse(r#"@a { o: { $type: "t" } }"#),
            Err(Error::Parse(ParseError::MisplacedTypeDecl { .. }))
        ));
    }

    #[test]
    fn test_unbalanced_delimiters() {
        assert!(matches!(
            parse("@a { x: 1"),
            Err(Error::Parse(ParseError::UnbalancedDelimiter { open: '{', .. }))
        ));
        assert!(matches!(
            parse("@a { x: [1, 2 }"),
            Err(Error::Parse(ParseError::UnexpectedToken { .. }))
        ));
        assert!(matches!(
            parse("@a { x: [1, 2"),
            Err(Error::Parse(ParseError::UnbalancedDelimiter { open: '[', .. }))
        ));
    }

    #[test]
    fn test_big_integer_literal() {
        let doc = parse("@a { big: 123456789012345678901234567890 }").unwrap();
        match doc.blocks[0].body.get("big") {
            Some(Value::BigInt(bi)) => {
                assert_eq!(bi.to_string(), "123456789012345678901234567890");
            }
            other => panic!("expected BigInt, got {other:?}"),
        }
    }

    #[test]
    fn test_comments_anchor_to_entries_and_blocks() {
        let src = "// top of file\n@config {\n    // the port\n    port: 8080,\n}\n// tail\n";
        let doc = parse(src).unwrap();
        assert_eq!(doc.blocks[0].comments, vec!["// top of file".to_string()]);
        assert_eq!(
            doc.blocks[0].body.comments_of("port"),
            ["// the port".to_string()]
        );
        assert_eq!(doc.trailing_comments, vec!["// tail".to_string()]);
    }

    #[test]
    fn test_error_position_reported() {
        let err = parse("@a {\n  x: ,\n}").unwrap_err();
        match err {
            Error::Parse(ParseError::UnexpectedToken { pos, .. }) => {
                assert_eq!(pos.line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
