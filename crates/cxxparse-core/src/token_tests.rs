use crate::{InvalidTokenStream, Token, TokenKind, TokenStream};

fn ident(text: &str) -> Token {
    Token::new(TokenKind::Identifier, text, 1, 1)
}

#[test]
fn stream_must_end_with_eof() {
    assert_eq!(TokenStream::new(vec![]), Err(InvalidTokenStream::Empty));
    assert_eq!(
        TokenStream::new(vec![ident("a")]),
        Err(InvalidTokenStream::MissingEof)
    );
    assert_eq!(
        TokenStream::new(vec![Token::eof(1, 1), ident("a"), Token::eof(1, 3)]),
        Err(InvalidTokenStream::EarlyEof { index: 0 })
    );
}

#[test]
fn stream_accessors() {
    let stream = TokenStream::new(vec![ident("a"), ident("b"), Token::eof(1, 4)]).unwrap();
    assert_eq!(stream.len(), 3);
    assert!(!stream.is_empty());
    assert_eq!(stream.eof_index(), 2);
    assert_eq!(stream[1].text, "b");
    assert!(stream.get(3).is_none());

    let empty = TokenStream::new(vec![Token::eof(1, 1)]).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.eof_index(), 0);
}

#[test]
fn keyword_check_requires_keyword_kind() {
    let kw = Token::new(TokenKind::Keyword, "class", 1, 1);
    let id = Token::new(TokenKind::Identifier, "class", 1, 1);
    assert!(kw.is_keyword("class"));
    assert!(!id.is_keyword("class"));
}

#[test]
fn terminated_always_yields_valid_stream() {
    let stream = TokenStream::terminated(vec![ident("a"), Token::eof(1, 2), ident("b")], Token::eof(1, 4));
    assert_eq!(stream.len(), 3);
    assert_eq!(stream[1].text, "b");
    assert!(stream[2].is_eof());
    assert_eq!(TokenStream::new(stream.as_slice().to_vec()), Ok(stream));
}
