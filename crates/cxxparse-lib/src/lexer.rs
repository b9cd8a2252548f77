//! Reference tokenizer for already-preprocessed C and C++ source.
//!
//! The engine only consumes a [`TokenStream`]; this lexer is one way to build
//! it. Comments and `#` lines are dropped as trivia; nothing is expanded.
//!
//! ## C mode
//!
//! C++-only reserved words (`class`, `template`, `new`, ...) are reported as
//! identifiers when lexing C, so C code using them as names parses.
//!
//! ## Error handling
//!
//! Adjacent characters the lexer cannot classify are coalesced into a single
//! `Unknown` token. Lexing never fails.

use logos::Logos;

use cxxparse_core::{Keyword, Token, TokenKind, TokenStream};

use crate::Language;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f\x0B]+")]
#[logos(skip r"\\\r?\n")]
enum Lexeme {
    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")]
    BlockComment,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    Directive,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Word,

    #[regex(r"(?:[0-9]|\.[0-9])(?:[0-9A-Za-z_.']|[eEpP][+-])*")]
    Number,

    #[regex(r#"(?:u8|u|U|L)?"(?:[^"\\\n]|\\.)*""#)]
    String,

    #[regex(r"(?:u8|u|U|L)?'(?:[^'\\\n]|\\.)*'")]
    Character,

    #[token("{")]
    #[token("}")]
    #[token("[")]
    #[token("]")]
    #[token("(")]
    #[token(")")]
    #[token(";")]
    #[token(":")]
    #[token("::")]
    #[token("...")]
    #[token("?")]
    #[token(".")]
    #[token(".*")]
    #[token("->")]
    #[token("->*")]
    #[token("~")]
    #[token("!")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("^")]
    #[token("&")]
    #[token("|")]
    #[token("=")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("^=")]
    #[token("&=")]
    #[token("|=")]
    #[token("==")]
    #[token("!=")]
    #[token("<")]
    #[token(">")]
    #[token("<=")]
    #[token(">=")]
    #[token("&&")]
    #[token("||")]
    #[token("<<")]
    #[token(">>")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("++")]
    #[token("--")]
    #[token(",")]
    Punctuator,
}

/// Maps byte offsets to 1-based line/column pairs.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    fn position(&self, offset: usize) -> (u32, u32) {
        let line = self.starts.partition_point(|&start| start <= offset) - 1;
        let column = offset - self.starts[line];
        (line as u32 + 1, column as u32 + 1)
    }
}

struct TokenSink<'s> {
    source: &'s str,
    lines: LineIndex,
    language: Language,
    tokens: Vec<Token>,
}

impl<'s> TokenSink<'s> {
    fn push(&mut self, kind: TokenKind, span: std::ops::Range<usize>) {
        let text = &self.source[span.clone()];
        let kind = match kind {
            TokenKind::Identifier => self.classify_word(text),
            kind => kind,
        };
        let (line, column) = self.lines.position(span.start);
        self.tokens
            .push(Token::new(kind, text, line, column).with_offset(span.start as u32));
    }

    fn classify_word(&self, text: &str) -> TokenKind {
        match Keyword::from_text(text) {
            Some(keyword) if self.language == Language::Cxx || keyword.is_c_keyword() => {
                TokenKind::Keyword
            }
            _ => TokenKind::Identifier,
        }
    }

    fn finish(self) -> TokenStream {
        let end = self.source.len();
        let (line, column) = self.lines.position(end);
        TokenStream::terminated(self.tokens, Token::eof(line, column).with_offset(end as u32))
    }
}

/// Tokenizes `source`. The returned stream always ends with `Eof`.
pub fn lex(source: &str, language: Language) -> TokenStream {
    let mut sink = TokenSink {
        source,
        lines: LineIndex::new(source),
        language,
        tokens: Vec::new(),
    };
    let mut lexer = Lexeme::lexer(source);
    let mut error: Option<std::ops::Range<usize>> = None;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let lexeme = match result {
            Ok(lexeme) => lexeme,
            Err(()) => {
                error = match error.take() {
                    Some(open) if open.end == span.start => Some(open.start..span.end),
                    Some(open) => {
                        sink.push(TokenKind::Unknown, open);
                        Some(span)
                    }
                    None => Some(span),
                };
                continue;
            }
        };
        if let Some(open) = error.take() {
            sink.push(TokenKind::Unknown, open);
        }
        let kind = match lexeme {
            Lexeme::Word => TokenKind::Identifier,
            Lexeme::Number => TokenKind::Number,
            Lexeme::String => TokenKind::String,
            Lexeme::Character => TokenKind::Character,
            Lexeme::Punctuator => TokenKind::Punctuator,
            Lexeme::LineComment | Lexeme::BlockComment | Lexeme::Directive => continue,
        };
        sink.push(kind, span);
    }
    if let Some(open) = error.take() {
        sink.push(TokenKind::Unknown, open);
    }

    sink.finish()
}
