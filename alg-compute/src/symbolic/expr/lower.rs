//! Conversion from the syntax tree produced by [`alg_parser`] into [`Expr`].

use alg_error::Error;
use alg_parser::parser::{
    binary::Binary,
    call::{Call, Func},
    expr::Expr as AstExpr,
    literal::{ConstKind, Literal},
    token::op::{BinOpKind, UnaryOpKind},
    unary::Unary,
};
use crate::{error::UnsupportedOperation, rational::Rational};
use super::Expr;

/// Attaches the span of the syntax tree node to errors that have none.
fn at(span: std::ops::Range<usize>) -> impl FnOnce(Error) -> Error {
    move |mut err| {
        if err.spans.is_empty() {
            err.spans.push(span);
        }
        err
    }
}

fn lower_literal(literal: &Literal) -> Result<Expr, Error> {
    match literal {
        Literal::Number(num) => num.value
            .parse::<Rational>()
            .map(Expr::Number)
            .map_err(at(num.span.clone())),
        Literal::Symbol(sym) => Expr::var(&sym.name.to_string()).map_err(at(sym.span.clone())),
        Literal::Constant(constant) => Ok(match constant.kind {
            ConstKind::Pi => Expr::pi(),
            ConstKind::E => Expr::e(),
            ConstKind::I => Expr::i(),
        }),
    }
}

fn lower_call(call: &Call) -> Result<Expr, Error> {
    let arg = Expr::try_from(call.arg.as_ref())?;
    match call.func {
        Func::Exp => Ok(arg.exp()),
        Func::Ln => Ok(arg.ln()),
        Func::Sqrt => Ok(arg.sqrt()),
        Func::Factorial => Ok(arg.factorial()),
        func => Err(Error::new(vec![call.span()], UnsupportedOperation {
            operation: format!("the function `{}` is recognized, but cannot be represented yet", func.name()),
        })),
    }
}

fn lower_unary(unary: &Unary) -> Result<Expr, Error> {
    let operand = Expr::try_from(unary.operand.as_ref())?;
    Ok(match unary.op.kind {
        UnaryOpKind::Neg => -operand,
        UnaryOpKind::Pos => operand,
    })
}

fn lower_binary(binary: &Binary) -> Result<Expr, Error> {
    let lhs = Expr::try_from(binary.lhs.as_ref())?;
    let rhs = Expr::try_from(binary.rhs.as_ref())?;
    match binary.op.kind {
        BinOpKind::Add => Ok(lhs + rhs),
        BinOpKind::Sub => Ok(lhs - rhs),
        BinOpKind::Mul => Ok(lhs * rhs),
        BinOpKind::Div => lhs.divide(rhs).map_err(at(binary.rhs.span())),
        BinOpKind::Exp => Ok(lhs.pow(rhs)),
    }
}

/// Converts a parsed expression into a symbolic expression.
///
/// Trigonometric functions are parsed, but have no symbolic representation, and fail with
/// [`UnsupportedOperation`]. Dividing by an expression that is the number zero after folding fails
/// with [`crate::error::DivisionByZero`].
impl TryFrom<&AstExpr> for Expr {
    type Error = Error;

    fn try_from(expr: &AstExpr) -> Result<Self, Self::Error> {
        match expr {
            AstExpr::Literal(literal) => lower_literal(literal),
            AstExpr::Paren(paren) => Expr::try_from(paren.expr.as_ref()),
            AstExpr::Call(call) => lower_call(call),
            AstExpr::Unary(unary) => lower_unary(unary),
            AstExpr::Binary(binary) => lower_binary(binary),
        }
    }
}

#[cfg(test)]
mod tests {
    use alg_error::Category;
    use alg_parser::parser::Parser;
    use crate::error::DivisionByZero;
    use pretty_assertions::assert_eq;
    use super::*;

    fn lower(input: &str) -> Result<Expr, Error> {
        let ast = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        Expr::try_from(&ast)
    }

    fn x() -> Expr {
        Expr::var("x").unwrap()
    }

    #[test]
    fn numbers_are_exact() {
        assert_eq!(lower("0.25").unwrap(), Expr::Number(Rational::new(1, 4).unwrap()));
        assert_eq!(lower("3/4").unwrap(), Expr::Number(Rational::new(3, 4).unwrap()));
        assert_eq!(lower("-3/4").unwrap(), Expr::Number(Rational::new(-3, 4).unwrap()));
        assert_eq!(lower("2^-2").unwrap(), Expr::number(2).pow(Expr::number(-2)));
    }

    #[test]
    fn operators() {
        assert_eq!(lower("2x").unwrap(), Expr::number(2) * x());
        assert_eq!(lower("x - 1").unwrap(), x() - Expr::number(1));
        assert_eq!(lower("-x^2").unwrap(), -x().pow(Expr::number(2)));
        assert_eq!(lower("+x").unwrap(), x());
    }

    #[test]
    fn constants_and_functions() {
        assert_eq!(lower("e^x").unwrap(), x().exp());
        assert_eq!(lower("ln(pi)").unwrap(), Expr::pi().ln());
        assert_eq!(lower("sqrt(x)").unwrap(), x().sqrt());
        assert_eq!(lower("factorial(3)").unwrap(), Expr::number(3).factorial());
        assert_eq!(lower("E").unwrap(), Expr::var("E").unwrap());
    }

    #[test]
    fn trigonometry_is_unsupported() {
        let err = lower("2 + sin(x)").unwrap_err();
        assert_eq!(err.category(), Category::UnsupportedOperation);
        assert_eq!(err.spans, vec![4..10]);
    }

    #[test]
    fn division_by_zero() {
        let err = lower("x / (1 - 1)").unwrap_err();
        assert!(err.is::<DivisionByZero>());
        assert_eq!(err.spans, vec![4..11]);
    }
}
