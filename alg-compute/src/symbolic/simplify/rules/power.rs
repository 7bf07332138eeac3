//! Simplification rules for powers.

use crate::{
    rational::Rational,
    symbolic::{
        expr::{Expr, MAX_FOLD_EXPONENT},
        simplify::step::Step,
        step_collector::StepCollector,
    },
};
use std::iter;

/// If the expression is a power, calls the given transformation function with the base and the
/// power. The sign of the power node is applied to the result.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
fn do_power(expr: &Expr, f: impl FnOnce(&Expr, &Expr) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Pow { base, power, neg } = expr {
        f(base.as_ref(), power.as_ref()).map(|result| result.with_sign(*neg))
    } else {
        None
    }
}

/// Evaluates `base^exponent` for an integer exponent small enough to evaluate.
fn fold(base: &Rational, exponent: &Rational) -> Option<Rational> {
    let exponent = exponent.to_i64()?;
    if exponent.unsigned_abs() > u64::from(MAX_FOLD_EXPONENT) {
        return None;
    }
    base.pow(i32::try_from(exponent).ok()?).ok()
}

/// `a^0 = 1`
pub fn power_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |_, power| power.is_zero().then(|| Expr::number(1)))?;
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, power| power.is_one().then(|| base.clone()))?;
    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `a^(1/2) = sqrt(a)`
pub fn power_half(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, power| {
        power.is_number(&Rational::half()).then(|| base.clone().sqrt())
    })?;
    step_collector.push(Step::PowerHalf);
    Some(opt)
}

/// Evaluates powers of numbers where the result is exact, and splits the integer part off
/// fractional exponents.
///
/// `2^3 = 8`
/// `(4/9)^(3/2) = 8/27`
/// `2^(3/2) = 2 * 2^(1/2)`
/// `2^(-1/2) = 1/2 * 2^(1/2)`
pub fn numeric_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, power| {
        let (Expr::Number(base), Expr::Number(power)) = (base, power) else {
            return None;
        };

        if base.is_one() {
            return Some(Expr::number(1));
        }
        if base.is_zero() {
            return power.is_positive().then(|| Expr::number(0));
        }
        if power.is_integer() {
            return fold(base, power).map(Expr::Number);
        }

        // the principal root of a negative number is not real, so `(-8)^(1/3)` stays as written
        if !base.is_positive() {
            return None;
        }

        // `(b^(1/n))^m` is exact if `b` is a perfect `n`-th power
        let root = power.denom().to_u32().and_then(|n| base.root_exact(n));
        if let Some(root) = root {
            return fold(&root, &Rational::from(power.numer().clone())).map(Expr::Number);
        }

        let whole = power.floor();
        if whole.is_zero() {
            return None;
        }
        let fraction = power - &whole;
        let whole = fold(base, &whole)?;
        Some(Expr::product([
            Expr::Number(whole),
            Expr::Number(base.clone()).pow(Expr::Number(fraction)),
        ]))
    })?;
    step_collector.push(Step::NumericPower);
    Some(opt)
}

/// `(-a)^n = a^n` for even integers `n`, and `-a^n` for odd integers `n`.
pub fn negated_base(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, power| {
        let n = power.as_number()?.to_integer()?;
        if !base.is_negated() {
            return None;
        }
        Some((-base.clone()).pow(power.clone()).with_sign(n.is_odd()))
    })?;
    step_collector.push(Step::NegatedBase);
    Some(opt)
}

/// Distributes an integer power over the factors of a product.
///
/// `(2xy)^2 = 4x^2y^2`
pub fn distribute_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, power| {
        let Expr::Mul { coefficient, factors, neg } = base else {
            return None;
        };
        let n = power.as_number()?.to_integer()?;
        let coefficient = fold(coefficient, &Rational::from(n.clone()))?;

        let factors = factors.iter().map(|factor| factor.clone().pow(power.clone()));
        let product = Expr::product(iter::once(Expr::Number(coefficient)).chain(factors));
        Some(product.with_sign(*neg && n.is_odd()))
    })?;
    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// Splits the coefficient off a product raised to a power, except for the power `-1/2`.
///
/// `(2x)^y = 2^y * x^y`
pub fn split_coefficient_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_power(expr, |base, power| {
        let Expr::Mul { coefficient, factors, neg } = base else {
            return None;
        };
        let minus_half = -Rational::half();
        if coefficient.is_one() || power.is_number(&minus_half) {
            return None;
        }

        let rest = Expr::product(factors.iter().cloned()).with_sign(*neg);
        Some(Expr::product([
            Expr::Number(coefficient.clone()).pow(power.clone()),
            rest.pow(power.clone()),
        ]))
    })?;
    step_collector.push(Step::SplitCoefficientPower);
    Some(opt)
}

/// Applies all rules for powers.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| power_half(expr, step_collector))
        .or_else(|| numeric_power(expr, step_collector))
        .or_else(|| negated_base(expr, step_collector))
        .or_else(|| distribute_power(expr, step_collector))
        .or_else(|| split_coefficient_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var("x").unwrap()
    }

    fn ratio(numer: i64, denom: i64) -> Expr {
        Expr::Number(Rational::new(numer, denom).unwrap())
    }

    #[test]
    fn trivial_powers() {
        assert_eq!(power_zero(&x().pow(Expr::number(0)), &mut ()), Some(Expr::number(1)));
        assert_eq!(power_zero(&-x().pow(Expr::number(0)), &mut ()), Some(Expr::number(-1)));
        assert_eq!(power_one(&x().pow(Expr::number(1)), &mut ()), Some(x()));
        assert_eq!(power_half(&x().pow(ratio(1, 2)), &mut ()), Some(x().sqrt()));
    }

    #[test]
    fn numbers() {
        let mut steps = Vec::new();
        let power = Expr::number(2).pow(Expr::number(10));
        assert_eq!(numeric_power(&power, &mut steps), Some(Expr::number(1024)));
        assert_eq!(steps, vec![Step::NumericPower]);

        let power = ratio(4, 9).pow(ratio(3, 2));
        assert_eq!(numeric_power(&power, &mut ()), Some(ratio(8, 27)));

        let power = Expr::number(2).pow(ratio(5, 3));
        assert_eq!(
            numeric_power(&power, &mut ()),
            Some(Expr::number(2) * Expr::number(2).pow(ratio(2, 3))),
        );

        let power = Expr::number(2).pow(ratio(1, 3));
        assert_eq!(numeric_power(&power, &mut ()), None);

        let power = Expr::number(0).pow(Expr::number(-1));
        assert_eq!(numeric_power(&power, &mut ()), None);
    }

    #[test]
    fn negative_bases_keep_the_principal_root() {
        for (numer, denom) in [(1, 3), (2, 3), (5, 3)] {
            let power = Expr::number(-8).pow(ratio(numer, denom));
            assert_eq!(numeric_power(&power, &mut ()), None);
            assert_eq!(power.simplify(), power);
        }

        assert_eq!(Expr::number(-1).pow(ratio(1, 3)).simplify(), Expr::number(-1).pow(ratio(1, 3)));
        assert_eq!(Expr::number(-2).pow(Expr::number(3)).simplify(), Expr::number(-8));
        assert_eq!(Expr::number(-4).pow(ratio(1, 2)).simplify(), Expr::number(2) * Expr::i());
    }

    #[test]
    fn products() {
        let power = (Expr::number(-2) * x()).pow(Expr::number(3));
        assert_eq!(
            distribute_power(&power, &mut ()),
            Some(Expr::number(-8) * x().pow(Expr::number(3))),
        );

        let y = Expr::var("y").unwrap();
        let power = (Expr::number(2) * x()).pow(y.clone());
        assert_eq!(
            split_coefficient_power(&power, &mut ()),
            Some(Expr::number(2).pow(y.clone()) * x().pow(y)),
        );

        let power = (Expr::number(2) * x()).pow(ratio(-1, 2));
        assert_eq!(split_coefficient_power(&power, &mut ()), None);
    }

    #[test]
    fn negated_bases() {
        assert_eq!(
            negated_base(&(-x()).pow(Expr::number(2)), &mut ()),
            Some(x().pow(Expr::number(2))),
        );
        assert_eq!(
            negated_base(&(-x()).pow(Expr::number(3)), &mut ()),
            Some(-x().pow(Expr::number(3))),
        );
        assert_eq!(negated_base(&(-x()).pow(ratio(1, 3)), &mut ()), None);
    }
}
