use alg_error::Error;
use std::{fmt, ops::Range};
use super::{
    alias::{self, Alias},
    error::UnknownName,
    token::{Name, Number},
    Parse,
    Parser,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A number literal, such as `2`, `3.25` or `.5`.
///
/// The value is kept as written (with `.` as the decimal separator) so that it can be converted to
/// an exact value later.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    /// The digits of the number literal, using `.` as the decimal separator.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitNum {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Number>()?;
        Ok(Self {
            value: token.lexeme.replace(',', "."),
            span: token.span,
        })
    }
}

impl fmt::Display for LitNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A variable, which is always a single letter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the variable.
    pub name: char,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The named constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConstKind {
    /// The circle constant `pi`.
    Pi,

    /// Euler's number `e`.
    E,

    /// The imaginary unit `i`.
    I,
}

impl fmt::Display for ConstKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pi => write!(f, "pi"),
            Self::E => write!(f, "e"),
            Self::I => write!(f, "i"),
        }
    }
}

/// A named constant, such as `pi`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitConst {
    /// The constant.
    pub kind: ConstKind,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl fmt::Display for LitConst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

/// Represents a literal value.
///
/// A literal is any value that is written directly into the source code, such as the number `1`,
/// the variable `x`, or the constant `pi`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// A number literal.
    Number(LitNum),

    /// A single-letter variable.
    Symbol(LitSym),

    /// A named constant.
    Constant(LitConst),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
            Literal::Constant(constant) => constant.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        if let Ok(num) = input.try_parse::<LitNum>() {
            return Ok(Literal::Number(num));
        }

        let token = input.try_parse::<Name>()?;
        match alias::lookup(&token.lexeme) {
            Some(Alias::Constant(kind)) => Ok(Literal::Constant(LitConst {
                kind,
                span: token.span,
            })),
            None if token.lexeme.len() == 1 => Ok(Literal::Symbol(LitSym {
                name: token.lexeme.chars().next().unwrap_or_default(),
                span: token.span,
            })),
            // functions are parsed by `Call`
            Some(Alias::Function(_)) | None => Err(Error::new(vec![token.span], UnknownName {
                name: token.lexeme,
            })),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(num) => num.fmt(f),
            Literal::Symbol(sym) => sym.fmt(f),
            Literal::Constant(constant) => constant.fmt(f),
        }
    }
}
