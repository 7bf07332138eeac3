use alg_error::Error;
use std::{fmt, ops::Range};
use super::{
    alias::{self, Alias},
    binary::Binary,
    call::Call,
    error::{UnexpectedEof, UnexpectedToken},
    literal::Literal,
    paren::Paren,
    unary::Unary,
    Parse,
    Parser,
    Precedence,
};
use crate::tokenizer::TokenKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents any expression that can be parsed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `ln(x)`.
    Call(Call),

    /// A unary operation, such as `-1`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Call(call) => call.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = Unary::parse_or_lower(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}

/// Represents a primary expression: an operand that does not contain any operator at its top
/// level.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression, such as `(1 + 2)`.
    Paren(Paren),

    /// A function call, such as `ln(x)`.
    Call(Call),
}

impl Parse for Primary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let Some((kind, lexeme)) = input.peek_token().map(|token| (token.kind, token.lexeme)) else {
            return Err(input.error(UnexpectedEof));
        };

        match kind {
            TokenKind::Number => input.try_parse::<Literal>().map(Self::Literal),
            TokenKind::Name => match alias::lookup(lexeme) {
                Some(Alias::Function(_)) => input.try_parse::<Call>().map(Self::Call),
                _ => input.try_parse::<Literal>().map(Self::Literal),
            },
            TokenKind::OpenParen => input.try_parse::<Paren>().map(Self::Paren),
            found => Err(input.error(UnexpectedToken {
                expected: &[TokenKind::Number, TokenKind::Name, TokenKind::OpenParen],
                found,
            })),
        }
    }
}

impl From<Primary> for Expr {
    fn from(primary: Primary) -> Self {
        match primary {
            Primary::Literal(literal) => Self::Literal(literal),
            Primary::Paren(paren) => Self::Paren(paren),
            Primary::Call(call) => Self::Call(call),
        }
    }
}
