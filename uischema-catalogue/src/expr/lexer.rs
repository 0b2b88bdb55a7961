//! Token definitions for the type expression grammar.

use logos::Logos;

use crate::SyntaxError;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum Token {
    #[token("|")]
    Pipe,
    #[token("+")]
    Plus,
    #[token("?")]
    Question,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    /// Separator between members of a literal set.
    #[token("_")]
    Join,
    #[regex(r#""[^"]*""#)]
    Quoted,
    /// Dot-separated qualified name, e.g. `UI.Flow.Direction`.
    #[regex(r"[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)*")]
    Name,
}

impl Token {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Token::Pipe => "'|'",
            Token::Plus => "'+'",
            Token::Question => "'?'",
            Token::LBracket => "'['",
            Token::RBracket => "']'",
            Token::LAngle => "'<'",
            Token::RAngle => "'>'",
            Token::LParen => "'('",
            Token::RParen => "')'",
            Token::Comma => "','",
            Token::Join => "'_'",
            Token::Quoted => "a quoted literal",
            Token::Name => "a type name",
        }
    }
}

/// A token with its byte range in the raw expression.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Lexeme<'a> {
    pub token: Token,
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

/// Split a raw expression into lexemes.
pub(crate) fn tokenize(raw: &str) -> Result<Vec<Lexeme<'_>>, SyntaxError> {
    let mut lexer = Token::lexer(raw);
    let mut lexemes = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        match result {
            Ok(token) => lexemes.push(Lexeme {
                token,
                start: span.start,
                end: span.end,
                text,
            }),
            Err(()) => {
                let message = if text.starts_with('"') {
                    "unterminated string literal".to_string()
                } else {
                    format!("unexpected character '{}'", text)
                };
                return Err(SyntaxError::new(raw, span.start, text.len(), message));
            }
        }
    }

    Ok(lexemes)
}
