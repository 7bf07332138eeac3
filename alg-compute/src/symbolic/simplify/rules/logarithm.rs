//! Simplification rules for natural logarithms, `ln(a)`.
//!
//! The product and power rules assume that the arguments are positive reals.

use crate::{
    rational::Rational,
    symbolic::{
        expr::{ConstantKind, Expr},
        simplify::step::Step,
        step_collector::StepCollector,
    },
};

/// If the expression is a logarithm, calls the given transformation function with the argument.
/// The sign of the logarithm is applied to the result.
///
/// Returns `Some(expr)` with the transformed expression if a transformation was applied.
fn do_ln(expr: &Expr, f: impl FnOnce(&Expr) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Ln { arg, neg } = expr {
        f(arg.as_ref()).map(|result| result.with_sign(*neg))
    } else {
        None
    }
}

/// `ln(1) = 0`
pub fn ln_one(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_ln(expr, |arg| arg.is_one().then(|| Expr::number(0)))?;
    step_collector.push(Step::LnOne);
    Some(opt)
}

/// `ln(e) = 1`
pub fn ln_e(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_ln(expr, |arg| {
        matches!(arg, Expr::Constant { kind: ConstantKind::E, neg: false }).then(|| Expr::number(1))
    })?;
    step_collector.push(Step::LnE);
    Some(opt)
}

/// `ln(exp(a)) = a`
pub fn ln_exp(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_ln(expr, |arg| match arg {
        Expr::Exp { power, neg: false } => Some((**power).clone()),
        _ => None,
    })?;
    step_collector.push(Step::LnExp);
    Some(opt)
}

/// `ln(ab) = ln(a) + ln(b)`
/// `ln(2x) = ln(2) + ln(x)`
pub fn ln_product(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_ln(expr, |arg| {
        let Expr::Mul { coefficient, factors, neg: false } = arg else {
            return None;
        };

        let coefficient = (!coefficient.is_one()).then(|| Expr::Number(coefficient.clone()).ln());
        let logs = factors.iter().map(|factor| factor.clone().ln());
        Some(Expr::sum(coefficient.into_iter().chain(logs)))
    })?;
    step_collector.push(Step::LnProduct);
    Some(opt)
}

/// `ln(a^b) = b * ln(a)`
/// `ln(sqrt(a)) = 1/2 * ln(a)`
pub fn ln_power(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let opt = do_ln(expr, |arg| {
        let (base, power) = match arg {
            Expr::Pow { base, power, neg: false } => ((**base).clone(), (**power).clone()),
            Expr::Sqrt { radicand, neg: false } => ((**radicand).clone(), Expr::Number(Rational::half())),
            _ => return None,
        };
        Some(Expr::product([power, base.ln()]))
    })?;
    step_collector.push(Step::LnPower);
    Some(opt)
}

/// Applies all rules for logarithms.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    ln_one(expr, step_collector)
        .or_else(|| ln_e(expr, step_collector))
        .or_else(|| ln_exp(expr, step_collector))
        .or_else(|| ln_product(expr, step_collector))
        .or_else(|| ln_power(expr, step_collector))
}
