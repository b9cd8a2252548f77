//! Token model consumed by the parsing engine.
//!
//! Tokenization and preprocessing happen upstream. The engine only needs the
//! kind and text of every token, plus a source position for diagnostics.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Number,
    String,
    Character,
    Punctuator,
    /// Characters the tokenizer could not classify.
    Unknown,
    /// End of input. Exactly one, always last.
    Eof,
}

impl TokenKind {
    pub const ALL: [TokenKind; 8] = [
        TokenKind::Identifier,
        TokenKind::Keyword,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Character,
        TokenKind::Punctuator,
        TokenKind::Unknown,
        TokenKind::Eof,
    ];

    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name used in "expected one of" messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Character => "CHARACTER",
            TokenKind::Punctuator => "PUNCTUATOR",
            TokenKind::Unknown => "UNKNOWN",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// One token of the (already preprocessed) input.
///
/// `line` and `column` are 1-based. `offset` is the byte offset of the token in
/// the original source and is only used to anchor diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
            offset: 0,
        }
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn eof(line: u32, column: u32) -> Self {
        Self::new(TokenKind::Eof, "", line, column)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_keyword(&self, text: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTokenStream {
    #[error("token stream is empty; it must end with an end-of-input token")]
    Empty,
    #[error("token stream does not end with an end-of-input token")]
    MissingEof,
    #[error("end-of-input token at index {index} is not the last token")]
    EarlyEof { index: usize },
}

/// Immutable, indexed sequence of tokens terminated by exactly one `Eof`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Result<Self, InvalidTokenStream> {
        let Some(last) = tokens.last() else {
            return Err(InvalidTokenStream::Empty);
        };
        if !last.is_eof() {
            return Err(InvalidTokenStream::MissingEof);
        }
        if let Some(index) = tokens[..tokens.len() - 1].iter().position(Token::is_eof) {
            return Err(InvalidTokenStream::EarlyEof { index });
        }
        Ok(Self { tokens })
    }

    /// Appends `eof` to `tokens`, dropping any end-of-input tokens already present.
    pub fn terminated(mut tokens: Vec<Token>, eof: Token) -> Self {
        tokens.retain(|t| !t.is_eof());
        tokens.push(Token { kind: TokenKind::Eof, ..eof });
        Self { tokens }
    }

    /// Number of tokens, including the trailing `Eof`.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// A stream always holds at least `Eof`; this is true when that is all it holds.
    pub fn is_empty(&self) -> bool {
        self.tokens.len() == 1
    }

    pub fn eof_index(&self) -> u32 {
        (self.tokens.len() - 1) as u32
    }

    pub fn get(&self, pos: u32) -> Option<&Token> {
        self.tokens.get(pos as usize)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

impl Index<u32> for TokenStream {
    type Output = Token;

    fn index(&self, pos: u32) -> &Token {
        &self.tokens[pos as usize]
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
