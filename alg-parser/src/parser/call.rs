use alg_error::Error;
use std::{fmt, ops::Range};
use super::{
    alias::{self, Alias},
    error::{MissingArgument, UnknownName},
    expr::Expr,
    paren::Paren,
    token::Name,
    Parse,
    Parser,
};
use crate::tokenizer::TokenKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The functions that can be called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Func {
    Exp,
    Ln,
    Sqrt,
    Factorial,
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
    Asin,
    Acos,
    Atan,
}

impl Func {
    /// Returns the canonical name of the function.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
            Self::Factorial => "factorial",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Asin => "arcsin",
            Self::Acos => "arccos",
            Self::Atan => "arctan",
        }
    }

    /// Returns true if the function is one of the trigonometric or hyperbolic functions.
    pub fn is_trigonometric(&self) -> bool {
        !matches!(self, Self::Exp | Self::Ln | Self::Sqrt | Self::Factorial)
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A function call, such as `sqrt(x + 1)`. Every function takes exactly one argument, which must be
/// wrapped in parentheses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The function being called.
    pub func: Func,

    /// The argument of the function, without its parentheses.
    pub arg: Box<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<Name>()?;
        let Some(Alias::Function(func)) = alias::lookup(&name.lexeme) else {
            return Err(Error::new(vec![name.span], UnknownName { name: name.lexeme }));
        };

        if input.peek_kind() != Some(TokenKind::OpenParen) {
            return Err(Error::new(vec![name.span], MissingArgument {
                name: func.name().to_string(),
            }));
        }

        let paren = Paren::parse(input)?;
        Ok(Self {
            func,
            arg: paren.expr,
            span: name.span.start..paren.span.end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.func, self.arg)
    }
}
