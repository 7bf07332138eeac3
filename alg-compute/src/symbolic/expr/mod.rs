//! The symbolic expression tree.
//!
//! Every node except [`Expr::Number`] carries its own sign flag, so `-x` is a single
//! [`Expr::Variable`] node rather than a multiplication by `-1`. Numbers carry their sign in their
//! value.
//!
//! Expressions should be built with the builder functions ([`Expr::sum`], [`Expr::product`],
//! [`Expr::pow`], and so on) or the arithmetic operators, which keep the tree in a canonical shape:
//!
//! - additions never directly contain additions or numbers; numbers are folded into the constant
//! term,
//! - multiplications never directly contain multiplications or numbers, none of their factors are
//! negated, and their coefficient is never negative; signs are absorbed into the node's own flag,
//! - exponentiations never have an unsigned exponentiation, exponential, or square root as their
//! base, since those are composed into a single power,
//! - an operation left with a single operand is replaced by that operand.
//!
//! Equality is structural: two additions are equal if they have the same constant and the same
//! multiset of terms, regardless of the order the terms were added in. Use
//! [`Expr::simplify`] before comparing expressions that are only mathematically equivalent.

mod fmt;
mod lower;
mod name;

pub use name::validate_name;

use alg_error::Error;
use crate::{error::DivisionByZero, multiset::Multiset, rational::Rational};
use std::{
    collections::{BTreeSet, HashMap},
    iter,
    ops::{Add, Mul, Neg, Sub},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer powers of numbers are only evaluated if the magnitude of the exponent is at most this
/// value. Larger powers are kept symbolic.
pub const MAX_FOLD_EXPONENT: u32 = 1024;

/// A named real constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConstantKind {
    /// The circle constant, `pi`.
    Pi,

    /// Euler's number, `e`.
    E,
}

impl ConstantKind {
    /// Returns the name of the constant, as it is written.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "e",
        }
    }

    /// Returns an approximation of the constant's value.
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }
}

/// A symbolic expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// An exact rational number.
    Number(Rational),

    /// A single-letter variable.
    Variable {
        /// The name of the variable.
        name: char,

        /// Whether the variable is negated.
        neg: bool,
    },

    /// A named real constant.
    Constant {
        /// Which constant this is.
        kind: ConstantKind,

        /// Whether the constant is negated.
        neg: bool,
    },

    /// The imaginary unit, `i`.
    ImaginaryUnit {
        /// Whether the imaginary unit is negated.
        neg: bool,
    },

    /// A sum of a rational constant and any number of terms.
    Add {
        /// The sum of all numeric terms.
        constant: Rational,

        /// The non-numeric terms.
        terms: Multiset<Expr>,

        /// Whether the whole sum is negated.
        neg: bool,
    },

    /// A product of a non-negative rational coefficient and any number of factors.
    Mul {
        /// The product of all numeric factors, never negative.
        coefficient: Rational,

        /// The non-numeric factors, none of which are negated.
        factors: Multiset<Expr>,

        /// Whether the whole product is negated.
        neg: bool,
    },

    /// A base raised to a power.
    Pow {
        /// The base.
        base: Box<Expr>,

        /// The power.
        power: Box<Expr>,

        /// Whether the whole power is negated.
        neg: bool,
    },

    /// Euler's number raised to a power, `exp(power)`.
    Exp {
        /// The power.
        power: Box<Expr>,

        /// Whether the exponential is negated.
        neg: bool,
    },

    /// The natural logarithm, `ln(arg)`.
    Ln {
        /// The argument.
        arg: Box<Expr>,

        /// Whether the logarithm is negated.
        neg: bool,
    },

    /// The principal square root, `sqrt(radicand)`.
    Sqrt {
        /// The radicand.
        radicand: Box<Expr>,

        /// Whether the root is negated.
        neg: bool,
    },

    /// The factorial, `factorial(arg)`. It can be built, displayed, and evaluated for small
    /// non-negative integers, but is not otherwise simplified or differentiated.
    Factorial {
        /// The argument.
        arg: Box<Expr>,

        /// Whether the factorial is negated.
        neg: bool,
    },
}

/// If the given power is a number raised to an integer power small enough to evaluate, returns the
/// value of the power.
fn fold_power(base: &Expr, power: &Expr) -> Option<Rational> {
    let (Expr::Number(base), Expr::Number(power)) = (base, power) else {
        return None;
    };
    let exponent = power.to_i64()?;
    if exponent.unsigned_abs() > u64::from(MAX_FOLD_EXPONENT) {
        return None;
    }
    base.pow(i32::try_from(exponent).ok()?).ok()
}

impl Expr {
    /// Creates a number.
    pub fn number(n: impl Into<Rational>) -> Self {
        Self::Number(n.into())
    }

    /// Creates the number exactly equal to the shortest decimal representation of the float.
    pub fn from_f64(n: f64) -> Result<Self, Error> {
        Rational::from_f64(n).map(Self::Number)
    }

    /// Creates a variable, checking that the name is a single letter that is not reserved.
    pub fn var(name: &str) -> Result<Self, Error> {
        validate_name(name).map(|name| Self::Variable { name, neg: false })
    }

    /// Creates the constant `pi`.
    pub fn pi() -> Self {
        Self::Constant { kind: ConstantKind::Pi, neg: false }
    }

    /// Creates the constant `e`.
    pub fn e() -> Self {
        Self::Constant { kind: ConstantKind::E, neg: false }
    }

    /// Creates the imaginary unit.
    pub fn i() -> Self {
        Self::ImaginaryUnit { neg: false }
    }

    /// Creates the sum of the given terms.
    ///
    /// Nested additions are flattened, with their signs distributed over their terms, and numbers
    /// are folded into the constant term.
    pub fn sum(terms: impl IntoIterator<Item = Expr>) -> Self {
        let mut constant = Rational::zero();
        let mut out = Multiset::new();

        for term in terms {
            match term {
                Expr::Number(n) => constant += n,
                Expr::Add { constant: inner, terms, neg: false } => {
                    constant += inner;
                    out.extend(terms);
                },
                Expr::Add { constant: inner, terms, neg: true } => {
                    constant -= inner;
                    out.extend(terms.map(|term| -term));
                },
                other => out.push(other),
            }
        }

        if out.is_empty() {
            return Expr::Number(constant);
        }
        if constant.is_zero() {
            match out.into_single() {
                Ok(term) => term,
                Err(terms) => Expr::Add { constant, terms, neg: false },
            }
        } else {
            Expr::Add { constant, terms: out, neg: false }
        }
    }

    /// Creates the product of the given factors.
    ///
    /// Nested multiplications are flattened, numbers (and numbers raised to small integer powers)
    /// are folded into the coefficient, and the sign of every factor is absorbed into the sign of
    /// the product.
    pub fn product(factors: impl IntoIterator<Item = Expr>) -> Self {
        let mut coefficient = Rational::one();
        let mut negative = false;
        let mut out = Multiset::new();

        for factor in factors {
            match factor {
                Expr::Number(n) => {
                    negative ^= n.is_negative();
                    coefficient *= n.abs();
                },
                Expr::Mul { coefficient: inner, factors, neg } => {
                    negative ^= neg;
                    coefficient *= inner;
                    out.extend(factors);
                },
                Expr::Pow { base, power, neg } => {
                    negative ^= neg;
                    match fold_power(&base, &power) {
                        Some(value) => {
                            negative ^= value.is_negative();
                            coefficient *= value.abs();
                        },
                        None => out.push(Expr::Pow { base, power, neg: false }),
                    }
                },
                other => {
                    let (magnitude, negated) = other.split_sign();
                    negative ^= negated;
                    out.push(magnitude);
                },
            }
        }

        if coefficient.is_zero() {
            return Expr::Number(coefficient);
        }

        let product = if out.is_empty() {
            Expr::Number(coefficient)
        } else if coefficient.is_one() {
            match out.into_single() {
                Ok(factor) => factor,
                Err(factors) => Expr::Mul { coefficient, factors, neg: false },
            }
        } else {
            Expr::Mul { coefficient, factors: out, neg: false }
        };
        product.with_sign(negative)
    }

    /// Raises the expression to the given power.
    ///
    /// Powers of (unsigned) powers, exponentials, and square roots are composed into a single
    /// power, `e` raised to a power becomes an [`Expr::Exp`], and powers of the imaginary unit are
    /// rewritten with Euler's formula: `i^p = exp(1/2 * i * pi * p)`.
    pub fn pow(self, power: Expr) -> Self {
        match self {
            Expr::Pow { base, power: inner, neg: false } => Expr::Pow {
                base,
                power: Box::new(Expr::product([*inner, power])),
                neg: false,
            },
            Expr::Exp { power: inner, neg: false } => Expr::Exp {
                power: Box::new(Expr::product([*inner, power])),
                neg: false,
            },
            Expr::Sqrt { radicand, neg: false } => {
                radicand.pow(Expr::product([Expr::Number(Rational::half()), power]))
            },
            Expr::Constant { kind: ConstantKind::E, neg: false } => power.exp(),
            Expr::ImaginaryUnit { neg } => {
                let turns = if neg {
                    Rational::from(3) * Rational::half()
                } else {
                    Rational::half()
                };
                Expr::product([Expr::Number(turns), Expr::i(), Expr::pi(), power]).exp()
            },
            base => Expr::Pow {
                base: Box::new(base),
                power: Box::new(power),
                neg: false,
            },
        }
    }

    /// Divides the expression by the given divisor, as `self * divisor^-1`.
    ///
    /// Returns [`DivisionByZero`] if the divisor is the number zero.
    pub fn divide(self, divisor: Expr) -> Result<Self, Error> {
        if divisor.is_zero() {
            return Err(Error::spanless(DivisionByZero));
        }
        Ok(Expr::product([self, divisor.pow(Expr::number(-1))]))
    }

    /// Creates `exp(self)`.
    pub fn exp(self) -> Self {
        Expr::Exp { power: Box::new(self), neg: false }
    }

    /// Creates `ln(self)`.
    pub fn ln(self) -> Self {
        Expr::Ln { arg: Box::new(self), neg: false }
    }

    /// Creates `sqrt(self)`.
    pub fn sqrt(self) -> Self {
        Expr::Sqrt { radicand: Box::new(self), neg: false }
    }

    /// Creates `factorial(self)`.
    pub fn factorial(self) -> Self {
        Expr::Factorial { arg: Box::new(self), neg: false }
    }

    /// Returns the expression negated if `negate` is true, or unchanged otherwise.
    pub fn with_sign(self, negate: bool) -> Self {
        if negate {
            -self
        } else {
            self
        }
    }

    /// Returns a mutable reference to the node's sign flag. Numbers have no sign flag.
    fn neg_flag_mut(&mut self) -> Option<&mut bool> {
        match self {
            Expr::Number(_) => None,
            Expr::Variable { neg, .. }
            | Expr::Constant { neg, .. }
            | Expr::ImaginaryUnit { neg }
            | Expr::Add { neg, .. }
            | Expr::Mul { neg, .. }
            | Expr::Pow { neg, .. }
            | Expr::Exp { neg, .. }
            | Expr::Ln { neg, .. }
            | Expr::Sqrt { neg, .. }
            | Expr::Factorial { neg, .. } => Some(neg),
        }
    }

    /// Returns true if the expression is negated, or is a negative number.
    pub fn is_negated(&self) -> bool {
        match self {
            Expr::Number(n) => n.is_negative(),
            Expr::Variable { neg, .. }
            | Expr::Constant { neg, .. }
            | Expr::ImaginaryUnit { neg }
            | Expr::Add { neg, .. }
            | Expr::Mul { neg, .. }
            | Expr::Pow { neg, .. }
            | Expr::Exp { neg, .. }
            | Expr::Ln { neg, .. }
            | Expr::Sqrt { neg, .. }
            | Expr::Factorial { neg, .. } => *neg,
        }
    }

    /// Splits the expression into its magnitude and whether it was negated.
    pub fn split_sign(self) -> (Self, bool) {
        let negated = self.is_negated();
        (self.with_sign(negated), negated)
    }

    /// Returns the number, if the expression is one.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Expr::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns true if the expression is the number zero.
    pub fn is_zero(&self) -> bool {
        self.as_number().is_some_and(Rational::is_zero)
    }

    /// Returns true if the expression is the number one.
    pub fn is_one(&self) -> bool {
        self.as_number().is_some_and(Rational::is_one)
    }

    /// Returns true if the expression is exactly the given number.
    pub fn is_number(&self, n: &Rational) -> bool {
        self.as_number() == Some(n)
    }

    /// Returns the rank of the node's kind, used to order operands for display. Atoms come first,
    /// followed by function-like nodes, powers, products, and sums.
    pub fn rank(&self) -> u8 {
        match self {
            Expr::Number(_) | Expr::Variable { .. } | Expr::Constant { .. } | Expr::ImaginaryUnit { .. } => 0,
            Expr::Exp { .. } | Expr::Ln { .. } | Expr::Sqrt { .. } | Expr::Factorial { .. } => 1,
            Expr::Pow { .. } => 2,
            Expr::Mul { .. } => 3,
            Expr::Add { .. } => 4,
        }
    }

    /// Returns the operands of an addition or multiplication in canonical order: by rank, then by
    /// their rendered text.
    pub(crate) fn sorted<'a>(operands: impl IntoIterator<Item = &'a Expr>) -> Vec<&'a Expr> {
        let mut operands = operands.into_iter().collect::<Vec<_>>();
        operands.sort_by_cached_key(|operand| (operand.rank(), operand.to_string()));
        operands
    }

    /// Returns the number of nodes in the expression. The constant of an addition and the
    /// coefficient of a multiplication count as nodes unless they are the identity.
    pub fn size(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Variable { .. } | Expr::Constant { .. } | Expr::ImaginaryUnit { .. } => 1,
            Expr::Add { constant, terms, .. } => {
                1 + usize::from(!constant.is_zero()) + terms.iter().map(Expr::size).sum::<usize>()
            },
            Expr::Mul { coefficient, factors, .. } => {
                1 + usize::from(!coefficient.is_one()) + factors.iter().map(Expr::size).sum::<usize>()
            },
            Expr::Pow { base, power, .. } => 1 + base.size() + power.size(),
            Expr::Exp { power: arg, .. }
            | Expr::Ln { arg, .. }
            | Expr::Sqrt { radicand: arg, .. }
            | Expr::Factorial { arg, .. } => 1 + arg.size(),
        }
    }

    /// Returns true if the expression contains no variables and no named constants, and so could
    /// be computed from its numbers alone.
    pub fn is_calculable(&self) -> bool {
        match self {
            Expr::Number(_) => true,
            Expr::Variable { .. } | Expr::Constant { .. } | Expr::ImaginaryUnit { .. } => false,
            Expr::Add { terms: operands, .. } | Expr::Mul { factors: operands, .. } => {
                operands.iter().all(Expr::is_calculable)
            },
            Expr::Pow { base, power, .. } => base.is_calculable() && power.is_calculable(),
            Expr::Exp { power: arg, .. }
            | Expr::Ln { arg, .. }
            | Expr::Sqrt { radicand: arg, .. }
            | Expr::Factorial { arg, .. } => arg.is_calculable(),
        }
    }

    /// Returns the names of all variables in the expression.
    pub fn get_variables(&self) -> BTreeSet<char> {
        let mut variables = BTreeSet::new();
        self.collect_variables(&mut variables);
        variables
    }

    fn collect_variables(&self, variables: &mut BTreeSet<char>) {
        match self {
            Expr::Variable { name, .. } => {
                variables.insert(*name);
            },
            Expr::Number(_) | Expr::Constant { .. } | Expr::ImaginaryUnit { .. } => (),
            Expr::Add { terms: operands, .. } | Expr::Mul { factors: operands, .. } => {
                operands.iter().for_each(|operand| operand.collect_variables(variables));
            },
            Expr::Pow { base, power, .. } => {
                base.collect_variables(variables);
                power.collect_variables(variables);
            },
            Expr::Exp { power: arg, .. }
            | Expr::Ln { arg, .. }
            | Expr::Sqrt { radicand: arg, .. }
            | Expr::Factorial { arg, .. } => arg.collect_variables(variables),
        }
    }

    /// Returns true if the expression contains the given variable.
    pub fn contains_variable(&self, var: char) -> bool {
        match self {
            Expr::Variable { name, .. } => *name == var,
            Expr::Number(_) | Expr::Constant { .. } | Expr::ImaginaryUnit { .. } => false,
            Expr::Add { terms: operands, .. } | Expr::Mul { factors: operands, .. } => {
                operands.iter().any(|operand| operand.contains_variable(var))
            },
            Expr::Pow { base, power, .. } => base.contains_variable(var) || power.contains_variable(var),
            Expr::Exp { power: arg, .. }
            | Expr::Ln { arg, .. }
            | Expr::Sqrt { radicand: arg, .. }
            | Expr::Factorial { arg, .. } => arg.contains_variable(var),
        }
    }

    /// Applies `f` to every direct child of the node, and reassembles the results with the
    /// builders, keeping the node's sign.
    pub(crate) fn rebuild(&self, mut f: impl FnMut(&Expr) -> Expr) -> Expr {
        let (rebuilt, neg) = match self {
            Expr::Number(_) | Expr::Variable { .. } | Expr::Constant { .. } | Expr::ImaginaryUnit { .. } => {
                return self.clone();
            },
            Expr::Add { constant, terms, neg } => {
                let terms = terms.iter().map(&mut f);
                (Expr::sum(iter::once(Expr::Number(constant.clone())).chain(terms)), *neg)
            },
            Expr::Mul { coefficient, factors, neg } => {
                let factors = factors.iter().map(&mut f);
                (Expr::product(iter::once(Expr::Number(coefficient.clone())).chain(factors)), *neg)
            },
            Expr::Pow { base, power, neg } => {
                let base = f(base.as_ref());
                (base.pow(f(power.as_ref())), *neg)
            },
            Expr::Exp { power, neg } => (f(power.as_ref()).exp(), *neg),
            Expr::Ln { arg, neg } => (f(arg.as_ref()).ln(), *neg),
            Expr::Sqrt { radicand, neg } => (f(radicand.as_ref()).sqrt(), *neg),
            Expr::Factorial { arg, neg } => (f(arg.as_ref()).factorial(), *neg),
        };
        rebuilt.with_sign(neg)
    }

    /// Replaces every occurrence of the variables in the mapping with their assigned expressions.
    /// The result is rebuilt with the builders, but not simplified.
    pub fn substitute(&self, values: &HashMap<char, Expr>) -> Expr {
        match self {
            Expr::Variable { name, neg } => match values.get(name) {
                Some(value) => value.clone().with_sign(*neg),
                None => self.clone(),
            },
            _ => self.rebuild(|child| child.substitute(values)),
        }
    }

    /// Approximates the value of the expression as a real number.
    ///
    /// Returns [`None`] if the expression contains variables or the imaginary unit, or if its
    /// value is not a finite real number.
    pub fn approximate(&self) -> Option<f64> {
        let magnitude = match self {
            Expr::Number(n) => return Some(n.to_f64()),
            Expr::Variable { .. } | Expr::ImaginaryUnit { .. } => return None,
            Expr::Constant { kind, .. } => kind.value(),
            Expr::Add { constant, terms, .. } => terms
                .iter()
                .map(Expr::approximate)
                .sum::<Option<f64>>()?
                + constant.to_f64(),
            Expr::Mul { coefficient, factors, .. } => factors
                .iter()
                .map(Expr::approximate)
                .product::<Option<f64>>()?
                * coefficient.to_f64(),
            Expr::Pow { base, power, .. } => base.approximate()?.powf(power.approximate()?),
            Expr::Exp { power, .. } => power.approximate()?.exp(),
            Expr::Ln { arg, .. } => {
                let arg = arg.approximate()?;
                if arg <= 0.0 {
                    return None;
                }
                arg.ln()
            },
            Expr::Sqrt { radicand, .. } => {
                let radicand = radicand.approximate()?;
                if radicand < 0.0 {
                    return None;
                }
                radicand.sqrt()
            },
            Expr::Factorial { arg, .. } => {
                let n = arg.as_number()?.to_i64()?;
                if !(0..=170).contains(&n) {
                    return None;
                }
                (1..=n).map(|k| k as f64).product()
            },
        };

        let value = if self.is_negated() { -magnitude } else { magnitude };
        value.is_finite().then_some(value)
    }
}

impl From<Rational> for Expr {
    fn from(n: Rational) -> Self {
        Expr::Number(n)
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::number(n)
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        match self {
            Expr::Number(n) => Expr::Number(-n),
            mut expr => {
                if let Some(neg) = expr.neg_flag_mut() {
                    *neg = !*neg;
                }
                expr
            },
        }
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::sum([self, rhs])
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::sum([self, -rhs])
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::product([self, rhs])
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
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var("x").unwrap()
    }

    fn y() -> Expr {
        Expr::var("y").unwrap()
    }

    fn ratio(numer: i64, denom: i64) -> Expr {
        Expr::Number(Rational::new(numer, denom).unwrap())
    }

    #[test]
    fn reserved_variable_names() {
        assert_eq!(Expr::var("i").unwrap_err().category(), Category::InvalidName);
        assert_eq!(Expr::var("e").unwrap_err().category(), Category::InvalidName);
        assert_eq!(Expr::var("ab").unwrap_err().category(), Category::InvalidName);
    }

    #[test]
    fn sum_flattens_and_folds() {
        let sum = Expr::sum([Expr::number(2), x(), Expr::sum([y(), Expr::number(3)])]);
        assert_eq!(sum, Expr::Add {
            constant: Rational::from(5),
            terms: vec![x(), y()].into(),
            neg: false,
        });
    }

    #[test]
    fn sum_distributes_sign_of_nested_sum() {
        let inner = -(x() + Expr::number(1));
        let sum = Expr::sum([y(), inner]);
        assert_eq!(sum, Expr::Add {
            constant: Rational::from(-1),
            terms: vec![y(), -x()].into(),
            neg: false,
        });
    }

    #[test]
    fn sum_downgrades() {
        assert_eq!(x() + Expr::number(0), x());
        assert_eq!(Expr::number(2) + Expr::number(3), Expr::number(5));
        assert_eq!(Expr::sum([]), Expr::number(0));
    }

    #[test]
    fn product_absorbs_signs() {
        let product = Expr::product([-x(), Expr::number(-3), -y()]);
        assert_eq!(product, Expr::Mul {
            coefficient: Rational::from(3),
            factors: vec![x(), y()].into(),
            neg: true,
        });
    }

    #[test]
    fn product_fast_paths() {
        assert_eq!(x() * Expr::number(0), Expr::number(0));
        assert_eq!(x() * Expr::number(1), x());
        assert_eq!(Expr::number(-1) * x(), -x());
    }

    #[test]
    fn product_folds_integer_powers_of_numbers() {
        let product = Expr::product([x(), Expr::number(2).pow(Expr::number(-1))]);
        assert_eq!(product, Expr::Mul {
            coefficient: Rational::new(1, 2).unwrap(),
            factors: vec![x()].into(),
            neg: false,
        });
    }

    #[test]
    fn divide() {
        assert_eq!(Expr::number(1).divide(Expr::number(3)).unwrap(), ratio(1, 3));
        let err = x().divide(Expr::number(0)).unwrap_err();
        assert_eq!(err.category(), Category::DivisionByZero);
    }

    #[test]
    fn power_composition() {
        let composed = x().pow(Expr::number(2)).pow(Expr::number(3));
        assert_eq!(composed, Expr::Pow {
            base: Box::new(x()),
            power: Box::new(Expr::number(6)),
            neg: false,
        });

        assert_eq!(x().sqrt().pow(Expr::number(4)), x().pow(Expr::number(2)));
        assert_eq!(x().exp().pow(y()), Expr::product([x(), y()]).exp());
        assert_eq!(Expr::e().pow(x()), x().exp());

        // a negated base is kept as is
        let negated = (-x().pow(Expr::number(2))).pow(Expr::number(3));
        assert!(matches!(negated, Expr::Pow { ref base, .. } if base.is_negated()));
    }

    #[test]
    fn powers_of_i() {
        let half = Rational::new(1, 2).unwrap();
        assert_eq!(
            Expr::i().pow(x()),
            Expr::product([Expr::Number(half), Expr::i(), Expr::pi(), x()]).exp(),
        );

        let three_halves = Rational::new(3, 2).unwrap();
        assert_eq!(
            (-Expr::i()).pow(x()),
            Expr::product([Expr::Number(three_halves), Expr::i(), Expr::pi(), x()]).exp(),
        );
    }

    #[test]
    fn structural_equality_ignores_order() {
        assert_eq!(x() + y(), y() + x());
        assert_eq!(x() * y(), y() * x());
        assert_ne!(x() + y(), x() - y());
        assert_ne!(x(), -x());
    }

    #[test]
    fn size() {
        assert_eq!(x().size(), 1);
        assert_eq!((Expr::number(2) * x()).size(), 3);
        assert_eq!((x() + y()).size(), 3);
        assert_eq!((x() + Expr::number(1)).size(), 3);
        assert_eq!(x().pow(Expr::number(2)).sqrt().size(), 4);
    }

    #[test]
    fn calculable() {
        assert!(Expr::number(2).sqrt().is_calculable());
        assert!(!x().is_calculable());
        assert!(!Expr::pi().is_calculable());
        assert!(!(Expr::number(2) + Expr::i()).is_calculable());
    }

    #[test]
    fn variables() {
        let expr = x().pow(y()) + Expr::var("z").unwrap().ln();
        assert_eq!(expr.get_variables().into_iter().collect::<Vec<_>>(), vec!['x', 'y', 'z']);
        assert!(expr.contains_variable('z'));
        assert!(!expr.contains_variable('w'));
    }

    #[test]
    fn substitute() {
        let expr = -x() + y();
        let values = HashMap::from([('x', Expr::number(2)), ('y', Expr::number(5))]);
        assert_eq!(expr.substitute(&values), Expr::number(3));

        let partial = HashMap::from([('x', y())]);
        assert_eq!((x() * x()).substitute(&partial), y() * y());
    }

    #[test]
    fn approximate() {
        assert_float_absolute_eq!(Expr::number(2).sqrt().approximate().unwrap(), std::f64::consts::SQRT_2, 1e-12);
        assert_float_absolute_eq!((-Expr::pi()).approximate().unwrap(), -std::f64::consts::PI, 1e-12);
        assert_float_absolute_eq!(Expr::number(5).factorial().approximate().unwrap(), 120.0, 1e-9);
        assert_float_absolute_eq!(
            (Expr::number(3) * Expr::e().ln() + ratio(1, 2)).approximate().unwrap(),
            3.5,
            1e-12
        );
        assert_eq!(x().approximate(), None);
        assert_eq!(Expr::i().approximate(), None);
        assert_eq!(Expr::number(-1).ln().approximate(), None);
        assert_eq!(Expr::number(-4).sqrt().approximate(), None);
    }
}
