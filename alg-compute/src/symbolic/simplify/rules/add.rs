//! Simplification rules for sums, namely combining like terms.

use crate::{
    multiset::Multiset,
    symbolic::{expr::Expr, simplify::step::Step, step_collector::StepCollector},
};
use std::iter;

/// A group of terms that share a factor, the key. The group's value is `key * sum(coefficients)`.
struct Group {
    key: Expr,
    coefficients: Vec<Expr>,
}

/// Returns the factor to group a product by: a factor that already keys a group if there is one,
/// otherwise the smallest factor, preferring the one that comes first in canonical order.
fn group_key(factors: &Multiset<Expr>, groups: &[Group]) -> Option<Expr> {
    factors
        .first_shared(groups.iter().map(|group| &group.key))
        .or_else(|| {
            Expr::sorted(factors)
                .into_iter()
                .min_by_key(|factor| factor.size())
        })
        .cloned()
}

/// Splits a term into the factor it is grouped by and the rest of the term.
fn split_term(term: Expr, groups: &[Group]) -> (Expr, Expr) {
    let (magnitude, negated) = term.split_sign();
    let (key, rest) = match magnitude {
        Expr::Mul { coefficient, factors, .. } => match group_key(&factors, groups) {
            Some(key) => {
                let mut rest = factors;
                rest.remove_one(&key);
                let rest = Expr::product(iter::once(Expr::Number(coefficient)).chain(rest));
                (key, rest)
            },
            None => (Expr::Mul { coefficient, factors, neg: false }, Expr::number(1)),
        },
        other => (other, Expr::number(1)),
    };
    (key, rest.with_sign(negated))
}

/// Combines like terms, factoring out a shared factor from the terms that have one.
///
/// `2x + 3x = 5x`
/// `x - x = 0`
/// `x + xy = x(1 + y)`
pub fn combine_like_terms(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    let Expr::Add { constant, terms, neg } = expr else {
        return None;
    };

    let mut groups = Vec::<Group>::new();
    for term in Expr::sorted(terms) {
        let (key, coefficient) = split_term(term.clone().with_sign(*neg), &groups);
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.coefficients.push(coefficient),
            None => groups.push(Group { key, coefficients: vec![coefficient] }),
        }
    }

    let constant = if *neg { -constant } else { constant.clone() };
    let result = Expr::sum(
        groups
            .into_iter()
            .map(|group| Expr::product([Expr::sum(group.coefficients), group.key]))
            .chain(iter::once(Expr::Number(constant))),
    );

    if result == *expr {
        return None;
    }

    step_collector.push(Step::CombineLikeTerms);
    Some(result)
}

/// Applies all rules for sums.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    combine_like_terms(expr, step_collector)
}

#[cfg(test)]
mod tests {
    use crate::rational::Rational;
    use pretty_assertions::assert_eq;
    use super::*;

    fn var(name: &str) -> Expr {
        Expr::var(name).unwrap()
    }

    #[test]
    fn combines_coefficients() {
        let sum = Expr::number(2) * var("x") + Expr::number(3) * var("x");
        let mut steps = Vec::new();
        assert_eq!(combine_like_terms(&sum, &mut steps), Some(Expr::number(5) * var("x")));
        assert_eq!(steps, vec![Step::CombineLikeTerms]);
    }

    #[test]
    fn distributes_the_sign_of_the_sum() {
        let sum = -(var("x") + Expr::number(1));
        assert_eq!(
            combine_like_terms(&sum, &mut ()),
            Some(Expr::sum([-var("x"), Expr::number(-1)])),
        );
    }

    #[test]
    fn fractional_coefficients() {
        let half = Expr::Number(Rational::new(1, 2).unwrap());
        let sum = half.clone() * var("x") + half * var("x");
        assert_eq!(combine_like_terms(&sum, &mut ()), Some(var("x")));
    }

    #[test]
    fn leaves_unrelated_terms() {
        let sum = var("x") + var("y").pow(Expr::number(2));
        assert_eq!(combine_like_terms(&sum, &mut ()), None);
    }
}
