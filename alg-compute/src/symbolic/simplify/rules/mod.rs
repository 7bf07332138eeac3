//! The simplification rules.
//!
//! Each rule is a function that takes the expression to simplify, and returns `Some(expr)` with
//! the rewritten expression if the rule applies, or `None` if it does not. Rules only look at the
//! node they are given; its children have already been simplified by the time a rule runs.

pub mod add;
pub mod exponential;
pub mod logarithm;
pub mod multiply;
pub mod power;
pub mod root;

use crate::symbolic::{expr::Expr, step_collector::StepCollector};
use super::step::Step;

/// Applies the first rule that matches the given node.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    match expr {
        Expr::Add { .. } => add::all(expr, step_collector),
        Expr::Mul { .. } => multiply::all(expr, step_collector),
        Expr::Pow { .. } => power::all(expr, step_collector),
        Expr::Exp { .. } => exponential::all(expr, step_collector),
        Expr::Ln { .. } => logarithm::all(expr, step_collector),
        Expr::Sqrt { .. } => root::all(expr, step_collector),
        _ => None,
    }
}
