//! Simplification rules for square roots, `sqrt(a)`.
//!
//! `sqrt(a^b) = a^(b/2)` assumes that `a` is a non-negative real.

use crate::{
    primitive::square_part,
    rational::Rational,
    symbolic::{expr::Expr, simplify::step::Step, step_collector::StepCollector},
};
use rug::Integer;

/// If the expression is a square root, calls the given transformation function with the radicand.
/// The sign of the square root is applied to the result.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
fn do_sqrt(expr: &Expr, f: impl FnOnce(&Expr) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Sqrt { radicand, neg } = expr {
        f(radicand.as_ref()).map(|result| result.with_sign(*neg))
    } else {
        None
    }
}

/// Splits a positive rational `q` into `(s, t)` such that `sqrt(q) = s * sqrt(t)`, where `t` is a
/// square-free integer.
fn split_square(q: &Rational) -> Option<(Rational, Integer)> {
    let (outside, inside) = square_part(&Integer::from(q.numer() * q.denom()));
    Some((Rational::new(outside, q.denom().clone()).ok()?, inside))
}

/// `sqrt(0) = 0`
/// `sqrt(1) = 1`
pub fn sqrt_trivial(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sqrt(expr, |radicand| {
        (radicand.is_zero() || radicand.is_one()).then(|| radicand.clone())
    })?;
    step_collector.push(Step::SqrtTrivial);
    Some(opt)
}

/// Takes square factors out of numeric radicands, and the imaginary unit out of negative ones.
///
/// `sqrt(8) = 2 * sqrt(2)`
/// `sqrt(1/2) = 1/2 * sqrt(2)`
/// `sqrt(-4) = i * sqrt(4)`
pub fn sqrt_number(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sqrt(expr, |radicand| {
        let q = radicand.as_number()?;
        if q.is_negative() {
            return Some(Expr::product([Expr::i(), Expr::Number(q.abs()).sqrt()]));
        }
        if q.is_zero() {
            return None;
        }

        let (outside, inside) = split_square(q)?;
        if outside.is_one() {
            return None;
        }
        if inside == 1 {
            return Some(Expr::Number(outside));
        }
        Some(Expr::product([Expr::Number(outside), Expr::number(inside).sqrt()]))
    })?;
    step_collector.push(Step::SqrtNumber);
    Some(opt)
}

/// `sqrt(a^b) = a^(b/2)`
/// `sqrt(exp(a)) = exp(a/2)`
pub fn sqrt_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sqrt(expr, |radicand| {
        let half = Expr::Number(Rational::half());
        match radicand {
            Expr::Pow { base, power, neg: false } => {
                Some((**base).clone().pow(Expr::product([half, (**power).clone()])))
            },
            Expr::Exp { power, neg: false } => Some(Expr::product([half, (**power).clone()]).exp()),
            _ => None,
        }
    })?;
    step_collector.push(Step::SqrtPower);
    Some(opt)
}

/// Takes the square part of the coefficient and the powers out of a product under a square root.
///
/// `sqrt(4x^2y) = 2x * sqrt(y)`
/// `sqrt(8x) = 2 * sqrt(2x)`
pub fn sqrt_product(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_sqrt(expr, |radicand| {
        let Expr::Mul { coefficient, factors, neg: false } = radicand else {
            return None;
        };

        let (outside_coefficient, inside_coefficient) = split_square(coefficient)?;
        let mut outside = vec![Expr::Number(outside_coefficient)];
        let mut inside = vec![Expr::number(inside_coefficient)];
        for factor in factors.iter() {
            let half = Expr::Number(Rational::half());
            match factor {
                Expr::Pow { base, power, .. } => {
                    outside.push((**base).clone().pow(Expr::product([half, (**power).clone()])));
                },
                Expr::Exp { power, .. } => outside.push(Expr::product([half, (**power).clone()]).exp()),
                other => inside.push(other.clone()),
            }
        }

        let pulled_out = outside.len() > 1 || !outside[0].is_one();
        if !pulled_out {
            return None;
        }

        let inside = Expr::product(inside);
        if !inside.is_one() {
            outside.push(inside.sqrt());
        }
        Some(Expr::product(outside))
    })?;
    step_collector.push(Step::SqrtProduct);
    Some(opt)
}

/// Applies all rules for square roots.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    sqrt_trivial(expr, step_collector)
        .or_else(|| sqrt_number(expr, step_collector))
        .or_else(|| sqrt_power(expr, step_collector))
        .or_else(|| sqrt_product(expr, step_collector))
}
