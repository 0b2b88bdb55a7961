//! Recursive-descent parser for type expressions.
//!
//! Precedence, tightest first: trailing `?`, then `[ ]` / `< >`, then `+`,
//! then `|`. A literal set of two or more members may only be combined with
//! `|` or `+` inside parentheses.

use uischema_ir::{LiteralSet, Primitive, TypeExpression};

use super::lexer::{Lexeme, Token, tokenize};
use crate::SyntaxError;

/// Parse a raw type expression.
///
/// Unknown names are accepted here; they are checked when the expression is
/// composed against a registry.
pub fn parse(raw: &str) -> Result<TypeExpression, SyntaxError> {
    let tokens = tokenize(raw)?;
    let mut parser = Parser {
        raw,
        tokens,
        pos: 0,
    };
    let operand = parser.union()?;
    if let Some(lexeme) = parser.peek() {
        return Err(parser.error_at(lexeme, format!("unexpected '{}'", lexeme.text)));
    }
    Ok(operand.expr)
}

/// A parsed operand and whether it is an ungrouped multi-member literal set.
struct Operand {
    expr: TypeExpression,
    start: usize,
    bare_set: bool,
}

struct Parser<'a> {
    raw: &'a str,
    tokens: Vec<Lexeme<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Lexeme<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn at(&self, token: Token) -> bool {
        self.peek().is_some_and(|l| l.token == token)
    }

    fn bump(&mut self) -> Option<Lexeme<'a>> {
        let lexeme = self.peek();
        if lexeme.is_some() {
            self.pos += 1;
        }
        lexeme
    }

    fn eat(&mut self, token: Token) -> bool {
        if self.at(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Byte offset of the next token, or the end of input.
    fn offset(&self) -> usize {
        self.peek().map_or(self.raw.len(), |l| l.start)
    }

    fn error_at(&self, lexeme: Lexeme<'_>, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.raw, lexeme.start, lexeme.end - lexeme.start, message)
    }

    fn error_here(&self, message: impl Into<String>) -> SyntaxError {
        match self.peek() {
            Some(lexeme) => self.error_at(lexeme, message),
            None => SyntaxError::new(self.raw, self.raw.len(), 0, message),
        }
    }

    fn expect(&mut self, token: Token) -> Result<Lexeme<'a>, SyntaxError> {
        match self.peek() {
            Some(lexeme) if lexeme.token == token => {
                self.pos += 1;
                Ok(lexeme)
            }
            Some(lexeme) => Err(self.error_at(
                lexeme,
                format!("expected {}, found '{}'", token.describe(), lexeme.text),
            )),
            None => Err(self.error_here(format!("expected {}", token.describe()))),
        }
    }

    fn reject_bare_set(&self, operand: &Operand, operator: &str) -> Result<(), SyntaxError> {
        if !operand.bare_set {
            return Ok(());
        }
        let end = self.offset().max(operand.start);
        Err(SyntaxError::new(
            self.raw,
            operand.start,
            end - operand.start,
            format!("a literal set cannot be combined with '{operator}' without parentheses"),
        ))
    }

    /// Union := Intersection ('|' Intersection)*
    fn union(&mut self) -> Result<Operand, SyntaxError> {
        self.operator_chain(Token::Pipe, "|", Self::intersection, TypeExpression::Union)
    }

    /// Intersection := Modifier ('+' Modifier)*
    fn intersection(&mut self) -> Result<Operand, SyntaxError> {
        self.operator_chain(Token::Plus, "+", Self::modifier, TypeExpression::Intersection)
    }

    fn operator_chain(
        &mut self,
        token: Token,
        operator: &str,
        mut operand: impl FnMut(&mut Self) -> Result<Operand, SyntaxError>,
        build: fn(Vec<TypeExpression>) -> TypeExpression,
    ) -> Result<Operand, SyntaxError> {
        let first = operand(self)?;
        if !self.at(token) {
            return Ok(first);
        }
        self.reject_bare_set(&first, operator)?;

        let start = first.start;
        let mut members = vec![first.expr];
        while self.eat(token) {
            let next = operand(self)?;
            self.reject_bare_set(&next, operator)?;
            members.push(next.expr);
        }
        Ok(Operand {
            expr: build(members),
            start,
            bare_set: false,
        })
    }

    /// Modifier := ('[' Expr ']' | '<' Expr '>' | Atom) '?'?
    fn modifier(&mut self) -> Result<Operand, SyntaxError> {
        let start = self.offset();
        let mut operand = if self.eat(Token::LBracket) {
            let inner = self.union()?;
            self.expect(Token::RBracket)?;
            Operand {
                expr: TypeExpression::sequence(inner.expr),
                start,
                bare_set: false,
            }
        } else if self.eat(Token::LAngle) {
            let inner = self.union()?;
            self.expect(Token::RAngle)?;
            Operand {
                expr: TypeExpression::mapping(inner.expr),
                start,
                bare_set: false,
            }
        } else {
            self.atom()?
        };

        if self.eat(Token::Question) {
            operand.expr = TypeExpression::optional(operand.expr);
        }
        Ok(operand)
    }

    /// Atom := Name ('(' Expr (',' Expr)* ')')? | LiteralSet | '(' Expr ')'
    fn atom(&mut self) -> Result<Operand, SyntaxError> {
        let start = self.offset();
        let Some(lexeme) = self.bump() else {
            return Err(self.error_here("expected a type"));
        };

        let (expr, bare_set) = match lexeme.token {
            Token::Quoted => self.literal_set(lexeme)?,
            Token::Name => (self.named(lexeme)?, false),
            Token::LParen => {
                let inner = self.union()?;
                self.expect(Token::RParen)?;
                (inner.expr, false)
            }
            _ => {
                return Err(self.error_at(
                    lexeme,
                    format!("expected a type, found '{}'", lexeme.text),
                ));
            }
        };

        Ok(Operand {
            expr,
            start,
            bare_set,
        })
    }

    fn named(&mut self, name: Lexeme<'a>) -> Result<TypeExpression, SyntaxError> {
        let primitive = Primitive::from_name(name.text);
        if !self.at(Token::LParen) {
            return Ok(match primitive {
                Some(p) => TypeExpression::Primitive(p),
                None => TypeExpression::reference(name.text),
            });
        }
        if primitive.is_some() {
            return Err(self.error_at(
                name,
                format!("primitive type '{}' takes no arguments", name.text),
            ));
        }

        let open = self.expect(Token::LParen)?;
        if self.at(Token::RParen) {
            return Err(self.error_at(open, "generic application needs at least one argument"));
        }
        let mut args = vec![self.union()?.expr];
        while self.eat(Token::Comma) {
            args.push(self.union()?.expr);
        }
        self.expect(Token::RParen)?;
        Ok(TypeExpression::Generic(name.text.to_string(), args))
    }

    /// LiteralSet := QuotedString ('_' QuotedString)*
    fn literal_set(&mut self, first: Lexeme<'a>) -> Result<(TypeExpression, bool), SyntaxError> {
        let mut members = vec![unquote(first.text).to_string()];
        while self.eat(Token::Join) {
            let lexeme = self.expect(Token::Quoted)?;
            let member = unquote(lexeme.text);
            if members.iter().any(|m| m == member) {
                return Err(self.error_at(lexeme, format!("duplicate literal \"{}\"", member)));
            }
            members.push(member.to_string());
        }

        if members.len() == 1 {
            let value = members.pop().unwrap_or_default();
            return Ok((TypeExpression::Literal(value), false));
        }
        Ok((TypeExpression::EnumSet(LiteralSet::new(members)), true))
    }
}

fn unquote(text: &str) -> &str {
    &text[1..text.len() - 1]
}
