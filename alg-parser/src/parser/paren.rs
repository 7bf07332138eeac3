use alg_error::Error;
use std::{fmt, ops::Range};
use super::{
    error::{EmptyParenthesis, UnclosedParenthesis, UnexpectedToken},
    expr::Expr,
    token::OpenParen,
    Parse,
    Parser,
};
use crate::tokenizer::TokenKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this parenthesized expression was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;
        if input.peek_kind() == Some(TokenKind::CloseParen) {
            let close_span = input.next_token()?.span;
            return Err(Error::new(vec![open_paren.span.start..close_span.end], EmptyParenthesis));
        }

        let expr = Expr::parse(input)?;
        match input.peek_kind() {
            Some(TokenKind::CloseParen) => {
                let close_span = input.next_token()?.span;
                Ok(Self {
                    expr: Box::new(expr),
                    span: open_paren.span.start..close_span.end,
                })
            },
            None => Err(Error::new(vec![open_paren.span], UnclosedParenthesis { opening: true })),
            Some(found) => Err(input.error(UnexpectedToken {
                expected: &[TokenKind::CloseParen],
                found,
            })),
        }
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.expr)
    }
}
