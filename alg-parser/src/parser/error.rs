//! The kinds of errors that can occur while parsing.

use alg_attrs::ErrorKind;
use alg_error::{Category, ErrorKind, EXPR};
use ariadne::Fmt;
use crate::tokenizer::TokenKind;

/// A character outside of the accepted alphabet was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Category::Syntax,
    message = format!("invalid character `{}`", character),
    labels = ["this character is not allowed"],
    help = format!(
        "only {} are allowed",
        "letters, digits, whitespace and `+ - * / ^ ( ) . ,`".fg(EXPR),
    ),
)]
pub struct InvalidCharacter {
    /// The offending character.
    pub character: char,
}

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Category::Syntax,
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Category::Syntax,
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Category::Syntax,
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Category::Syntax,
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Category::Syntax,
    message = "missing expression inside parenthesis",
    labels = ["add an expression here"],
)]
pub struct EmptyParenthesis;

/// A function name was not followed by a parenthesized argument.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Category::Syntax,
    message = format!("missing argument for function `{}`", name),
    labels = ["this function"],
    help = format!("wrap the argument in parentheses: {}", format!("{}(...)", name).fg(EXPR)),
)]
pub struct MissingArgument {
    /// The name of the function.
    pub name: String,
}

/// The expression is nested deeper than the parser allows.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Category::Syntax,
    message = "expression is nested too deeply",
    labels = ["nesting limit reached here"],
    help = format!("at most {} levels of nesting are allowed", max_depth),
)]
pub struct NestingTooDeep {
    /// The maximum nesting depth of the parser.
    pub max_depth: usize,
}

/// A name that is neither a variable, a constant, nor a function was used.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Category::Name,
    message = format!("unknown name `{}`", name),
    labels = ["this name"],
    help = "variables are single letters; multi-letter names must be known constants or functions, such as `pi`, `exp`, `ln` or `sqrt`",
)]
pub struct UnknownName {
    /// The unrecognized name.
    pub name: String,
}
