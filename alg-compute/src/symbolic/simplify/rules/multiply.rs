//! Simplification rules for products, namely combining like factors.

use crate::{
    primitive::prime_factorization,
    rational::Rational,
    symbolic::{
        expr::{ConstantKind, Expr, MAX_FOLD_EXPONENT},
        simplify::step::Step,
        step_collector::StepCollector,
    },
};
use std::iter;

/// Maps each base to the exponents it is raised to throughout a product.
#[derive(Default)]
struct Powers(Vec<(Expr, Vec<Expr>)>);

impl Powers {
    fn add(&mut self, base: Expr, exponent: Expr) {
        match self.0.iter_mut().find(|(other, _)| *other == base) {
            Some((_, exponents)) => exponents.push(exponent),
            None => self.0.push((base, vec![exponent])),
        }
    }
}

/// Returns true if the factor is a power of a number.
fn has_numeric_base(factor: &Expr) -> bool {
    match factor {
        Expr::Pow { base, .. } => matches!(**base, Expr::Number(_)),
        Expr::Sqrt { radicand, .. } => matches!(**radicand, Expr::Number(_)),
        _ => false,
    }
}

/// Product of the factors rebuilt from a [`Powers`] table, along with the numeric part.
struct Rebuilt {
    coefficient: Rational,
    negative: bool,
    factors: Vec<Expr>,
}

impl Rebuilt {
    /// Adds `base^exponent` where both are numbers. The integer part of the exponent is folded
    /// into the coefficient, and the fractional part, which lies in `(0, 1)`, is kept as a power.
    fn push_numeric(&mut self, base: &Rational, exponent: &Rational) {
        let whole = exponent.floor();
        let fraction = exponent - &whole;

        let folded = whole
            .to_i64()
            .filter(|whole| whole.unsigned_abs() <= u64::from(MAX_FOLD_EXPONENT))
            .and_then(|whole| i32::try_from(whole).ok())
            .and_then(|whole| base.pow(whole).ok());
        let Some(value) = folded else {
            self.factors.push(Expr::Number(base.clone()).pow(Expr::Number(exponent.clone())));
            return;
        };

        self.negative ^= value.is_negative();
        self.coefficient *= value.abs();
        if fraction == Rational::half() {
            self.factors.push(Expr::Number(base.clone()).sqrt());
        } else if !fraction.is_zero() {
            self.factors.push(Expr::Number(base.clone()).pow(Expr::Number(fraction)));
        }
    }

    /// Adds `base^exponent`.
    fn push(&mut self, base: Expr, exponent: Expr) {
        if exponent.is_zero() || base.is_one() {
            return;
        }
        if let (Expr::Number(base), Some(exponent)) = (&base, exponent.as_number()) {
            self.push_numeric(base, exponent);
            return;
        }

        let factor = if exponent.is_one() {
            base
        } else if matches!(base, Expr::Constant { kind: ConstantKind::E, .. }) {
            base.pow(exponent)
        } else if exponent.is_number(&Rational::half()) {
            base.sqrt()
        } else {
            base.pow(exponent)
        };
        self.factors.push(factor);
    }
}

/// Combines factors with the same base by adding their exponents, including the prime factors of
/// the coefficient when there are powers of numbers they could combine with.
///
/// `x * x = x^2`
/// `x^2 * x^-1 = x`
/// `e * exp(x) = exp(x + 1)`
/// `2 * 2^(1/2) = 2 * sqrt(2)`
/// `(-x)^3 * (-x) = x^4`
pub fn combine_like_factors(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let Expr::Mul { coefficient, factors, neg } = expr else {
        return None;
    };

    let mut powers = Powers::default();
    let mut negative = *neg;
    let mut remaining = coefficient.clone();

    if factors.iter().any(has_numeric_base) {
        for (prime, multiplicity) in prime_factorization(coefficient.numer()) {
            powers.add(Expr::number(prime), Expr::number(multiplicity));
        }
        for (prime, multiplicity) in prime_factorization(coefficient.denom()) {
            powers.add(Expr::number(prime), Expr::number(-i64::from(multiplicity)));
        }
        remaining = Rational::one();
    }

    for factor in Expr::sorted(factors) {
        match factor {
            Expr::Pow { base, power, .. } => {
                let integer_power = power.as_number().and_then(Rational::to_integer);
                match integer_power {
                    Some(n) if base.is_negated() => {
                        negative ^= n.is_odd();
                        powers.add(-(**base).clone(), (**power).clone());
                    },
                    _ => powers.add((**base).clone(), (**power).clone()),
                }
            },
            Expr::Exp { power, .. } => powers.add(Expr::e(), (**power).clone()),
            Expr::Sqrt { radicand, .. } => powers.add((**radicand).clone(), Expr::Number(Rational::half())),
            other => powers.add(other.clone(), Expr::number(1)),
        }
    }

    let mut rebuilt = Rebuilt { coefficient: remaining, negative, factors: Vec::new() };
    for (base, exponents) in powers.0 {
        rebuilt.push(base, Expr::sum(exponents));
    }

    let result = Expr::product(iter::once(Expr::Number(rebuilt.coefficient)).chain(rebuilt.factors))
        .with_sign(rebuilt.negative);
    if result == *expr {
        return None;
    }

    step_collector.push(Step::CombineLikeFactors);
    Some(result)
}

/// Applies all rules for products.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    combine_like_factors(expr, step_collector)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var("x").unwrap()
    }

    #[test]
    fn adds_exponents() {
        let product = Expr::product([x(), x()]);
        assert_eq!(combine_like_factors(&product, &mut ()), Some(x().pow(Expr::number(2))));

        let product = Expr::product([x().pow(Expr::number(2)), x().pow(Expr::number(-1))]);
        assert_eq!(combine_like_factors(&product, &mut ()), Some(x()));
    }

    #[test]
    fn merges_coefficient_with_roots() {
        let product = Expr::product([Expr::number(8), Expr::number(2).sqrt()]);
        assert_eq!(combine_like_factors(&product, &mut ()), None);

        let product = Expr::product([Expr::number(2).sqrt(), Expr::number(2).sqrt()]);
        assert_eq!(combine_like_factors(&product, &mut ()), Some(Expr::number(2)));
    }

    #[test]
    fn negated_bases() {
        let cube = (-x()).pow(Expr::number(3));
        let product = Expr::product([cube, -x()]);
        assert_eq!(combine_like_factors(&product, &mut ()), Some(x().pow(Expr::number(4))));
    }

    #[test]
    fn exponentials() {
        let product = Expr::product([Expr::e(), x().exp()]);
        assert_eq!(
            combine_like_factors(&product, &mut ()),
            Some((x() + Expr::number(1)).exp()),
        );
    }
}
