//! Simplification of expressions into a canonical form.
//!
//! Simplification runs in passes. Each pass rebuilds the expression bottom-up: the children of a
//! node are simplified first, the node is reassembled from them with the builders (which already
//! flatten, fold numbers, and absorb signs), and then the rule for the node's kind is applied once.
//! Passes are repeated until one leaves the expression unchanged, or until [`MAX_PASSES`] passes
//! have run.
//!
//! The rules are listed in [`rules`]. A few of them are only valid for non-negative real values,
//! such as `sqrt(x^2) = x` and `ln(ab) = ln(a) + ln(b)`, and are applied regardless.

pub mod rules;
pub mod step;

use crate::symbolic::{expr::Expr, step_collector::StepCollector};
use log::{debug, trace, warn};
use step::Step;

/// The maximum number of simplification passes.
pub const MAX_PASSES: usize = 64;

/// Runs one bottom-up pass over the expression.
fn simplify_pass(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let rebuilt = expr.rebuild(|child| simplify_pass(child, &mut *step_collector));
    rules::all(&rebuilt, step_collector).unwrap_or(rebuilt)
}

/// Simplifies the given expression.
pub fn simplify(expr: &Expr) -> Expr {
    simplify_with_steps(expr, &mut ())
}

/// Simplifies the given expression, recording every rule that changed it.
pub fn simplify_with_steps(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    let mut current = expr.clone();
    for pass in 1..=MAX_PASSES {
        let next = simplify_pass(&current, step_collector);
        if next == current {
            debug!("simplified `{}` to `{}` in {} passes", expr, next, pass);
            return next;
        }

        trace!("pass {}: {}", pass, next);
        current = next;
    }

    warn!("simplification of `{}` did not settle after {} passes", expr, MAX_PASSES);
    current
}

impl Expr {
    /// Simplifies the expression. See the [module-level documentation](self) for details.
    pub fn simplify(&self) -> Expr {
        simplify(self)
    }

    /// Simplifies the expression, recording every rule that changed it.
    pub fn simplify_with_steps(&self, step_collector: &mut dyn StepCollector<Step>) -> Expr {
        simplify_with_steps(self, step_collector)
    }
}
