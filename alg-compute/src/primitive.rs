//! Integer helpers used by the exact arithmetic in this crate.

use rug::{ops::Pow, Integer};

/// Trial division stops once the candidate divisor exceeds this value. Whatever remains of the
/// number afterwards is treated as a single factor.
pub const TRIAL_DIVISION_LIMIT: u32 = 100_000;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Computes the prime factorization of a positive integer, returning each prime factor along with
/// its multiplicity, in increasing order of the factor.
///
/// Factors larger than [`TRIAL_DIVISION_LIMIT`] are not searched for; if the number has any, their
/// product is returned as the last entry with multiplicity 1, even if it is not prime.
pub fn prime_factorization(n: &Integer) -> Vec<(Integer, u32)> {
    let mut factors = Vec::new();
    if *n <= 1 {
        return factors;
    }

    let mut n = n.clone();
    let mut push_factor = |n: &mut Integer, divisor: u32| {
        let mut multiplicity = 0;
        while n.is_divisible_u(divisor) {
            n.div_exact_u_mut(divisor);
            multiplicity += 1;
        }
        if multiplicity > 0 {
            factors.push((int(divisor), multiplicity));
        }
    };

    push_factor(&mut n, 2);
    let mut divisor = 3;
    while divisor <= TRIAL_DIVISION_LIMIT && int(divisor).square() <= n {
        push_factor(&mut n, divisor);
        divisor += 2;
    }

    if n > 1 {
        factors.push((n, 1));
    }
    factors
}

/// Splits a non-negative integer `n` into `(s, t)` such that `n = s^2 * t`, where `t` has no
/// square factors below [`TRIAL_DIVISION_LIMIT`].
pub fn square_part(n: &Integer) -> (Integer, Integer) {
    if *n <= 1 {
        return (int(1), n.clone());
    }

    let mut outside = int(1);
    let mut inside = int(1);
    for (factor, multiplicity) in prime_factorization(n) {
        if factor > TRIAL_DIVISION_LIMIT && factor.is_perfect_square() {
            outside *= factor.sqrt();
            continue;
        }

        outside *= factor.clone().pow(multiplicity / 2);
        if multiplicity % 2 == 1 {
            inside *= factor;
        }
    }

    (outside, inside)
}

/// Returns the exact `n`-th root of the integer, if there is one.
pub fn exact_root(value: &Integer, n: u32) -> Option<Integer> {
    if n == 0 || value.is_negative() && n % 2 == 0 {
        return None;
    }

    let root = value.clone().abs().root(n);
    if root.clone().pow(n) == value.clone().abs() {
        Some(if value.is_negative() { -root } else { root })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn factorization() {
        assert_eq!(prime_factorization(&int(1)), vec![]);
        assert_eq!(prime_factorization(&int(360)), vec![(int(2), 3), (int(3), 2), (int(5), 1)]);
        assert_eq!(prime_factorization(&int(97)), vec![(int(97), 1)]);
    }

    #[test]
    fn square_parts() {
        assert_eq!(square_part(&int(8)), (int(2), int(2)));
        assert_eq!(square_part(&int(72)), (int(6), int(2)));
        assert_eq!(square_part(&int(49)), (int(7), int(1)));
        assert_eq!(square_part(&int(30)), (int(1), int(30)));
        assert_eq!(square_part(&int(0)), (int(1), int(0)));
    }

    #[test]
    fn roots() {
        assert_eq!(exact_root(&int(27), 3), Some(int(3)));
        assert_eq!(exact_root(&int(-8), 3), Some(int(-2)));
        assert_eq!(exact_root(&int(-4), 2), None);
        assert_eq!(exact_root(&int(10), 2), None);
    }
}
