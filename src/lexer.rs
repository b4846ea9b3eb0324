//! SHON tokenizer.
//!
//! A single forward pass over the source text produces a flat [`Token`]
//! sequence. Tokens carry their 1-based source position for error reporting,
//! and every comment lexed since the previous content token rides along as
//! leading trivia on the next token (or on the final [`TokenKind::Eof`]).
//! That trivia is what lets the formatter re-emit comments anchored to the
//! construct that follows them; the parser itself never looks at it for
//! grammar decisions.
//!
//! Number literals are captured as raw text and never evaluated here, so the
//! exact spelling of a decimal survives all the way into the document model.

use crate::error::{LexError, Pos};

/// One lexical unit of SHON source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Pos,
    /// Comments between the previous content token and this one, verbatim
    /// including their `//` or `/* */` delimiters.
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Colon,
    Comma,
    At,
    Dollar,
    Amp,
    Dot,
    /// A bare identifier: `[A-Za-z_][A-Za-z0-9_]*`.
    Ident(String),
    /// A double-quoted string with `\"` and `\\` escapes applied.
    Str(String),
    /// A number literal, raw and unevaluated. `decimal` is true when the
    /// literal contains a fractional part.
    Number { text: String, decimal: bool },
    Eof,
}

impl TokenKind {
    /// Human-readable description used in parse error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
            TokenKind::LBracket => "'['".to_string(),
            TokenKind::RBracket => "']'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::Colon => "':'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::At => "'@'".to_string(),
            TokenKind::Dollar => "'$'".to_string(),
            TokenKind::Amp => "'&'".to_string(),
            TokenKind::Dot => "'.'".to_string(),
            TokenKind::Ident(name) => format!("identifier '{name}'"),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Number { text, .. } => format!("number '{text}'"),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

/// Tokenize SHON source text into a finite token sequence ending in
/// [`TokenKind::Eof`].
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).run()
}

struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    pending_comments: Vec<String>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
            column: 1,
            pending_comments: Vec::new(),
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.position..].chars();
        chars.next();
        chars.next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.input[self.position..].chars().next()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn pos(&self) -> Pos {
        Pos::new(self.line, self.column)
    }

    fn run(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia()?;
            let pos = self.pos();
            let comments = std::mem::take(&mut self.pending_comments);

            let Some(ch) = self.peek_char() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    pos,
                    comments,
                });
                return Ok(tokens);
            };

            let kind = match ch {
                '{' => self.punct(TokenKind::LBrace),
                '}' => self.punct(TokenKind::RBrace),
                '[' => self.punct(TokenKind::LBracket),
                ']' => self.punct(TokenKind::RBracket),
                '(' => self.punct(TokenKind::LParen),
                ')' => self.punct(TokenKind::RParen),
                ':' => self.punct(TokenKind::Colon),
                ',' => self.punct(TokenKind::Comma),
                '@' => self.punct(TokenKind::At),
                '$' => self.punct(TokenKind::Dollar),
                '&' => self.punct(TokenKind::Amp),
                '.' => self.punct(TokenKind::Dot),
                '"' => self.lex_string(pos)?,
                '-' => {
                    if self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
                        self.lex_number()
                    } else {
                        return Err(LexError::UnexpectedChar { ch, pos });
                    }
                }
                c if c.is_ascii_digit() => self.lex_number(),
                c if c.is_ascii_alphabetic() || c == '_' => self.lex_ident(),
                other => return Err(LexError::UnexpectedChar { ch: other, pos }),
            };

            tokens.push(Token {
                kind,
                pos,
                comments,
            });
        }
    }

    fn punct(&mut self, kind: TokenKind) -> TokenKind {
        self.next_char();
        kind
    }

    /// Skip whitespace and collect comments into `pending_comments`.
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => {
                    self.next_char();
                }
                Some('/') if self.peek_second() == Some('/') => {
                    let start = self.position;
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.next_char();
                    }
                    self.pending_comments
                        .push(self.input[start..self.position].trim_end().to_string());
                }
                Some('/') if self.peek_second() == Some('*') => {
                    let start = self.position;
                    let open = self.pos();
                    self.next_char();
                    self.next_char();
                    loop {
                        match self.peek_char() {
                            Some('*') if self.peek_second() == Some('/') => {
                                self.next_char();
                                self.next_char();
                                break;
                            }
                            Some(_) => {
                                self.next_char();
                            }
                            None => return Err(LexError::UnterminatedComment(open)),
                        }
                    }
                    self.pending_comments
                        .push(self.input[start..self.position].to_string());
                }
                _ => return Ok(()),
            }
        }
    }

    fn lex_string(&mut self, open: Pos) -> Result<TokenKind, LexError> {
        self.next_char(); // opening quote
        let mut result = String::new();
        loop {
            match self.next_char() {
                Some('"') => return Ok(TokenKind::Str(result)),
                Some('\\') => {
                    let esc_pos = self.pos();
                    match self.next_char() {
                        Some('"') => result.push('"'),
                        Some('\\') => result.push('\\'),
                        Some(other) => {
                            return Err(LexError::InvalidEscape {
                                ch: other,
                                pos: esc_pos,
                            })
                        }
                        None => return Err(LexError::UnterminatedString(open)),
                    }
                }
                Some(other) => result.push(other),
                None => return Err(LexError::UnterminatedString(open)),
            }
        }
    }

    fn lex_number(&mut self) -> TokenKind {
        let start = self.position;
        if self.peek_char() == Some('-') {
            self.next_char();
        }
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.next_char();
        }
        let mut decimal = false;
        // A '.' only belongs to the number when a digit follows; otherwise it
        // lexes as a separate Dot token.
        if self.peek_char() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            decimal = true;
            self.next_char();
            while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.next_char();
            }
        }
        TokenKind::Number {
            text: self.input[start..self.position].to_string(),
            decimal,
        }
    }

    fn lex_ident(&mut self) -> TokenKind {
        let start = self.position;
        while self
            .peek_char()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.next_char();
        }
        TokenKind::Ident(self.input[start..self.position].to_string())
    }
}
