//! Tokenizer and parser for the textual notation accepted by the expression engine.
//!
//! The notation is a restricted infix syntax: the operators `+ - * / ^ **`, parentheses, decimal
//! literals (using `.` or `,` as the decimal separator), single-letter variables, and a fixed set
//! of function and constant names. Adjacent operands are multiplied implicitly, so `2x`, `2(x + 1)`
//! and `2pi` are all valid.
//!
//! ```
//! use alg_parser::parser::{expr::Expr, Parser};
//!
//! let mut parser = Parser::new("2x^2 + sqrt(y)");
//! let expr = parser.try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.to_string(), "2x^2 + sqrt(y)");
//! ```

pub mod parser;
pub mod tokenizer;
