//! Simplification rules for exponentials, `exp(a)`.

use crate::{
    multiset::Multiset,
    rational::Rational,
    symbolic::{expr::Expr, simplify::step::Step, step_collector::StepCollector},
};

/// If the expression is an exponential, calls the given transformation function with the power.
/// The sign of the exponential is applied to the result.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
fn do_exp(expr: &Expr, f: impl FnOnce(&Expr) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Exp { power, neg } = expr {
        f(power.as_ref()).map(|result| result.with_sign(*neg))
    } else {
        None
    }
}

/// `exp(0) = 1`
pub fn exp_zero(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_exp(expr, |power| power.is_zero().then(|| Expr::number(1)))?;
    step_collector.push(Step::ExpZero);
    Some(opt)
}

/// `exp(1) = e`
pub fn exp_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_exp(expr, |power| power.is_one().then(Expr::e))?;
    step_collector.push(Step::ExpOne);
    Some(opt)
}

/// `exp(ln(a)) = a`
/// `exp(-ln(a)) = a^-1`
pub fn exp_ln(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_exp(expr, |power| match power {
        Expr::Ln { arg, neg: false } => Some((**arg).clone()),
        Expr::Ln { arg, neg: true } => Some((**arg).clone().pow(Expr::number(-1))),
        _ => None,
    })?;
    step_collector.push(Step::ExpLn);
    Some(opt)
}

/// Evaluates `exp(k * i * pi)` for multiples `k` of `1/2`.
///
/// `exp(i * pi) = -1`
/// `exp(1/2 * i * pi) = i`
/// `exp(3/2 * i * pi) = -i`
/// `exp(2 * i * pi) = 1`
pub fn euler(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_exp(expr, |power| {
        let Expr::Mul { coefficient, factors, neg } = power else {
            return None;
        };
        if *factors != Multiset::from(vec![Expr::i(), Expr::pi()]) {
            return None;
        }

        let turns = if *neg { -coefficient } else { coefficient.clone() };
        let turns = turns.modulo(&Rational::from(2)).ok()?;
        let quarter = (turns * Rational::from(2)).to_i64()?;
        match quarter {
            0 => Some(Expr::number(1)),
            1 => Some(Expr::i()),
            2 => Some(Expr::number(-1)),
            3 => Some(-Expr::i()),
            _ => None,
        }
    })?;
    step_collector.push(Step::Euler);
    Some(opt)
}

/// Applies all rules for exponentials.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    exp_zero(expr, step_collector)
        .or_else(|| exp_one(expr, step_collector))
        .or_else(|| exp_ln(expr, step_collector))
        .or_else(|| euler(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var("x").unwrap()
    }

    fn turns(numer: i64, denom: i64) -> Expr {
        let coefficient = Expr::Number(Rational::new(numer, denom).unwrap());
        Expr::product([coefficient, Expr::i(), Expr::pi()]).exp()
    }

    #[test]
    fn trivial_exponentials() {
        assert_eq!(exp_zero(&Expr::number(0).exp(), &mut ()), Some(Expr::number(1)));
        assert_eq!(exp_one(&-Expr::number(1).exp(), &mut ()), Some(-Expr::e()));
        assert_eq!(exp_zero(&x().exp(), &mut ()), None);
    }

    #[test]
    fn logarithms_cancel() {
        assert_eq!(exp_ln(&x().ln().exp(), &mut ()), Some(x()));
        assert_eq!(exp_ln(&(-x().ln()).exp(), &mut ()), Some(x().pow(Expr::number(-1))));
    }

    #[test]
    fn eulers_formula() {
        let mut steps = Vec::new();
        assert_eq!(euler(&turns(1, 1), &mut steps), Some(Expr::number(-1)));
        assert_eq!(steps, vec![Step::Euler]);

        assert_eq!(euler(&turns(1, 2), &mut ()), Some(Expr::i()));
        assert_eq!(euler(&turns(-1, 2), &mut ()), Some(-Expr::i()));
        assert_eq!(euler(&turns(4, 1), &mut ()), Some(Expr::number(1)));
        assert_eq!(euler(&turns(7, 2), &mut ()), Some(-Expr::i()));
        assert_eq!(euler(&turns(1, 3), &mut ()), None);
    }

    #[test]
    fn other_exponentials_are_kept() {
        let exp = (x() * Expr::i() * Expr::pi()).exp();
        assert_eq!(all(&exp, &mut ()), None);
    }
}
