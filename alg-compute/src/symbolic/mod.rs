//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Expressions are represented as a tree of [`Expr`] nodes. Unlike the syntax tree produced by
//! [`alg_parser`], the tree is **flattened** and kept in a canonical shape by its builders: the
//! expression `x + (y + z)` is a single [`Expr::Add`] node with three terms, numeric terms are
//! folded into one constant, and every node carries its own sign instead of being wrapped in a
//! negation.
//!
//! Terms of a sum and factors of a product are stored in a [`Multiset`](crate::multiset::Multiset),
//! so `x + y` and `y + x` are the same expression.
//!
//! ```
//! use alg_compute::{parse, symbolic::Expr};
//!
//! let expr = parse("x + (y + 2) + 1").unwrap();
//! let x = Expr::var("x").unwrap();
//! let y = Expr::var("y").unwrap();
//! assert_eq!(expr, y + x + Expr::number(3));
//! ```
//!
//! # Simplification
//!
//! [`simplify()`] reduces an expression to a canonical form by repeatedly applying the rules in
//! [`simplify::rules`] until nothing changes. Simplification is idempotent, and does not depend
//! on the order operands were written in.
//!
//! ```
//! use alg_compute::parse;
//!
//! // `x + x + x = 3x`
//! assert_eq!(parse("x + x + x").unwrap().simplify().to_string(), "3x");
//! ```
//!
//! # Differentiation
//!
//! [`derivative()`] computes the partial derivative of an expression with respect to a variable.
//! For more information, see the [`mod@derivative`] module.

pub mod derivative;
pub mod expr;
pub mod simplify;
pub mod step_collector;

pub use derivative::derivative;
pub use expr::Expr;
pub use simplify::{simplify, simplify_with_steps};
pub use step_collector::StepCollector;
