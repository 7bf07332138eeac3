//! Errors produced while building, converting, or transforming expressions.

use alg_attrs::ErrorKind;
use alg_error::{Category, ErrorKind, EXPR};
use ariadne::Fmt;

/// A value of an unsupported kind was given, such as a non-finite float.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Category::InvalidType,
    message = format!("invalid value `{}`", value),
    labels = ["this value"],
    help = reason,
)]
pub struct InvalidType {
    /// The rejected value, as text.
    pub value: String,

    /// Why the value was rejected.
    pub reason: String,
}

/// A variable name was rejected.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Category::InvalidName,
    message = format!("invalid variable name `{}`", name),
    labels = ["this name"],
    help = reason,
)]
pub struct InvalidName {
    /// The rejected name.
    pub name: String,

    /// Why the name was rejected.
    pub reason: String,
}

/// A division by zero was attempted.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Category::DivisionByZero,
    message = "division by zero",
    labels = [format!("this {} is zero", "divisor".fg(EXPR))],
)]
pub struct DivisionByZero;

/// The operation is not supported for the given operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    category = Category::UnsupportedOperation,
    message = format!("unsupported operation: {}", operation),
    labels = ["here"],
)]
pub struct UnsupportedOperation {
    /// A description of the operation.
    pub operation: String,
}
