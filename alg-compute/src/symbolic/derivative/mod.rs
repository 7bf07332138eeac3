//! Symbolic differentiation.
//!
//! The derivative is computed node by node with the sum, product, and chain rules, and assembled
//! with the builders. The result is not simplified; call [`Expr::simplify`] on it to get a
//! readable form.
//!
//! ```
//! use alg_compute::parse;
//!
//! let derivative = parse("x^2").unwrap().derivative("x").unwrap();
//! assert_eq!(derivative.simplify().to_string(), "2x");
//! ```

use alg_error::Error;
use crate::{
    error::UnsupportedOperation,
    multiset::Multiset,
    rational::Rational,
    symbolic::expr::{validate_name, Expr},
};
use log::debug;

/// `(f + g)' = f' + g'`
fn sum_rule(terms: &Multiset<Expr>, var: char) -> Result<Expr, Error> {
    let derivatives = terms
        .iter()
        .map(|term| differentiate(term, var))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Expr::sum(derivatives))
}

/// `(k * f * g * h)' = k * (f' * g * h + f * g' * h + f * g * h')`
fn product_rule(coefficient: &Rational, factors: &Multiset<Expr>, var: char) -> Result<Expr, Error> {
    let factors = factors.iter().collect::<Vec<_>>();
    let mut terms = Vec::with_capacity(factors.len());

    for derivative_index in 0..factors.len() {
        if !factors[derivative_index].contains_variable(var) {
            continue;
        }

        let mut term = vec![Expr::Number(coefficient.clone())];
        for (term_index, factor) in factors.iter().enumerate() {
            if term_index == derivative_index {
                term.push(differentiate(factor, var)?);
            } else {
                term.push((*factor).clone());
            }
        }
        terms.push(Expr::product(term));
    }

    Ok(Expr::sum(terms))
}

/// `(f^g)' = f' * g * f^(g - 1) + g' * ln(f) * f^g`
///
/// Only the terms whose base or power contain the variable are produced.
fn power_rule(base: &Expr, power: &Expr, var: char) -> Result<Expr, Error> {
    let mut terms = Vec::with_capacity(2);

    if base.contains_variable(var) {
        let lowered = Expr::sum([power.clone(), Expr::number(-1)]);
        terms.push(Expr::product([
            differentiate(base, var)?,
            power.clone(),
            base.clone().pow(lowered),
        ]));
    }

    if power.contains_variable(var) {
        terms.push(Expr::product([
            differentiate(power, var)?,
            base.clone().ln(),
            base.clone().pow(power.clone()),
        ]));
    }

    Ok(Expr::sum(terms))
}

/// Differentiates the expression with respect to the given (already validated) variable.
fn differentiate(f: &Expr, var: char) -> Result<Expr, Error> {
    if !f.contains_variable(var) {
        return Ok(Expr::number(0));
    }

    let derivative = match f {
        Expr::Number(_) | Expr::Constant { .. } | Expr::ImaginaryUnit { .. } => Expr::number(0),
        Expr::Variable { name, .. } => Expr::number(i64::from(*name == var)),
        Expr::Add { terms, .. } => sum_rule(terms, var)?,
        Expr::Mul { coefficient, factors, .. } => product_rule(coefficient, factors, var)?,
        Expr::Pow { base, power, .. } => power_rule(base, power, var)?,
        Expr::Exp { power, .. } => Expr::product([
            differentiate(power, var)?,
            power.as_ref().clone().exp(),
        ]),
        Expr::Ln { arg, .. } => Expr::product([
            differentiate(arg, var)?,
            arg.as_ref().clone().pow(Expr::number(-1)),
        ]),
        Expr::Sqrt { radicand, .. } => Expr::product([
            Expr::Number(Rational::half()),
            differentiate(radicand, var)?,
            radicand.as_ref().clone().pow(Expr::Number(-Rational::half())),
        ]),
        Expr::Factorial { .. } => {
            return Err(Error::spanless(UnsupportedOperation {
                operation: "the derivative of the factorial function".to_string(),
            }));
        },
    };

    Ok(derivative.with_sign(f.is_negated()))
}

/// Computes the partial derivative of the given expression with respect to the variable `with`.
///
/// Subtrees that do not contain the variable differentiate to zero. Returns [`Err`] if the name is
/// not a valid variable name, or if the expression contains a node that cannot be differentiated
/// (only [`Expr::Factorial`]).
pub fn derivative(f: &Expr, with: &str) -> Result<Expr, Error> {
    let var = validate_name(with)?;
    let result = differentiate(f, var)?;
    debug!("d/d{} `{}` = `{}`", var, f, result);
    Ok(result)
}

impl Expr {
    /// Computes the partial derivative of the expression with respect to the variable `with`. See
    /// [`derivative`](fn@derivative).
    pub fn derivative(&self, with: &str) -> Result<Expr, Error> {
        derivative(self, with)
    }

    /// Computes the derivative, and simplifies it.
    pub fn simplified_derivative(&self, with: &str) -> Result<Expr, Error> {
        self.derivative(with).map(|derivative| derivative.simplify())
    }
}

#[cfg(test)]
mod tests {
    use alg_error::Category;
    use assert_float_eq::{
        afe_abs,
        afe_absolute_error_msg,
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use crate::{error::InvalidName, parse};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use super::*;

    fn simplified(input: &str, with: &str) -> String {
        parse(input).unwrap().simplified_derivative(with).unwrap().to_string()
    }

    /// Evaluates the expression with `x` set to the given value.
    fn at(expr: &Expr, x: f64) -> f64 {
        let values = HashMap::from([('x', Expr::from_f64(x).unwrap())]);
        expr.substitute(&values).approximate().unwrap()
    }

    #[test]
    fn polynomials() {
        assert_eq!(simplified("x^2", "x"), "2x");
        assert_eq!(simplified("3x + 2", "x"), "3");
        assert_eq!(simplified("-x", "x"), "-1");
        assert_eq!(simplified("x * y", "x"), "y");
        assert_eq!(simplified("y^2", "x"), "0");
    }

    #[test]
    fn transcendental() {
        assert_eq!(simplified("exp(2x)", "x"), "2 * exp(2x)");
        assert_eq!(simplified("ln(x)", "x"), "x^(-1)");
        assert_eq!(simplified("sqrt(x)", "x"), "1/2 * x^(-1/2)");
        assert_eq!(simplified("x^y", "y"), "ln(x) * x^y");
    }

    #[test]
    fn linearity() {
        let f = parse("x^3").unwrap();
        let g = parse("exp(x) * x").unwrap();
        let sum = f.clone() + g.clone();

        let separately = f.derivative("x").unwrap() + g.derivative("x").unwrap();
        assert_eq!(sum.derivative("x").unwrap().simplify(), separately.simplify());
    }

    #[test]
    fn finite_differences() {
        let h = 1e-6;
        for input in ["x^3 * exp(x)", "ln(x) * sqrt(x)", "x^x", "exp(-x^2) / (x + 1)", "sqrt(x^2 + 1)"] {
            let f = parse(input).unwrap();
            let derivative = f.derivative("x").unwrap();
            for x in [0.5, 1.5, 2.0] {
                let expected = (at(&f, x + h) - at(&f, x - h)) / (2.0 * h);
                assert_float_absolute_eq!(at(&derivative, x), expected, 1e-4);
            }
        }
    }

    #[test]
    fn errors() {
        let err = parse("factorial(x)").unwrap().derivative("x").unwrap_err();
        assert_eq!(err.category(), Category::UnsupportedOperation);

        assert_eq!(parse("factorial(3) + x").unwrap().derivative("x").unwrap(), Expr::number(1));

        let err = parse("x").unwrap().derivative("xy").unwrap_err();
        assert!(err.is::<InvalidName>());
    }
}
