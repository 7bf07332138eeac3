//! An exact symbolic-algebra engine.
//!
//! Expressions are built from exact rational numbers, single-letter variables, the constants `pi`
//! and `e`, and the imaginary unit, combined with sums, products, powers, exponentials, natural
//! logarithms and square roots. They can be simplified to a canonical form, differentiated,
//! evaluated by substitution, and written back out as text that [`parse`] accepts.
//!
//! ```
//! use alg_compute::parse;
//!
//! let expr = parse("2*x + 3*x").unwrap();
//! assert_eq!(expr.simplify().to_string(), "5x");
//!
//! let derivative = parse("x**2").unwrap().derivative("x").unwrap();
//! assert_eq!(derivative.simplify().to_string(), "2x");
//! ```

pub mod error;
pub mod multiset;
pub mod primitive;
pub mod rational;
pub mod symbolic;

pub use rational::Rational;
pub use symbolic::Expr;

use alg_error::Error;
use alg_parser::parser::{expr::Expr as AstExpr, Parser};
use log::debug;

/// Parses the given text into an expression.
///
/// The returned expression is built with the builders, so it is flattened and its numbers are
/// folded, but it is not simplified. Errors carry the input they were produced from.
pub fn parse(input: &str) -> Result<Expr, Error> {
    let ast = Parser::new(input)
        .try_parse_full::<AstExpr>()
        .map_err(|err| err.with_input(input))?;
    debug!("parsed `{}` as `{}`", input, ast);
    let expr = Expr::try_from(&ast).map_err(|err| err.with_input(input))?;
    debug!("lowered `{}` to `{}`", input, expr);
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use alg_error::Category;
    use pretty_assertions::assert_eq;
    use super::*;

    fn simplified(input: &str) -> String {
        parse(input).unwrap().simplify().to_string()
    }

    #[test]
    fn scenarios() {
        assert_eq!(simplified("2*x + 3*x"), "5x");
        assert_eq!(simplified("x**2 / x"), "x");
        assert_eq!(Expr::number(0).exp().simplify(), Expr::number(1));
        assert_eq!(Expr::e().ln().simplify(), Expr::number(1));
        assert_eq!(Expr::number(8).sqrt().simplify().to_string(), "2 * sqrt(2)");
        assert_eq!(
            parse("x**2").unwrap().derivative("x").unwrap().simplify().to_string(),
            "2x",
        );

        assert_eq!(Expr::var("i").unwrap_err().category(), Category::InvalidName);
        let x = Expr::var("x").unwrap();
        let y = Expr::var("y").unwrap();
        assert_ne!(x, y);
        assert_eq!(x.get_variables().len(), 1);
        assert_eq!(y.get_variables().len(), 1);
    }

    #[test]
    fn errors_carry_the_input() {
        let err = parse("2 + $").unwrap_err();
        assert_eq!(err.category(), Category::Syntax);
        assert_eq!(err.input(), Some("2 + $"));

        let err = parse("x / 0").unwrap_err();
        assert_eq!(err.category(), Category::DivisionByZero);
        assert_eq!(err.input(), Some("x / 0"));

        let err = parse("foo(x)").unwrap_err();
        assert_eq!(err.category(), Category::Name);
    }

    #[test]
    fn long_chains() {
        assert_eq!(simplified(&vec!["x"; 100].join(" + ")), "100x");

        let input = vec!["x"; 10_000].join(" + ");
        let err = parse(&input).unwrap_err();
        assert_eq!(err.category(), Category::Syntax);
        assert!(err.is::<alg_parser::parser::error::NestingTooDeep>());
    }

    #[test]
    fn sign_consistency() {
        for input in ["x + 1", "2x * y", "sqrt(8) - exp(x)", "ln(x^2)"] {
            let expr = parse(input).unwrap();
            assert_eq!((-(-expr.clone())).simplify(), expr.simplify(), "{}", input);
        }
    }

    #[test]
    fn order_independence() {
        assert_eq!(parse("x + 2y + 3").unwrap().simplify(), parse("3 + 2y + x").unwrap().simplify());
        assert_eq!(parse("x * y^2 * 3").unwrap().simplify(), parse("3x * y^2").unwrap().simplify());
    }
}
