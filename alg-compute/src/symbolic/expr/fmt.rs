use std::fmt::{self, Display, Formatter};
use super::Expr;

impl Expr {
    /// Returns true if the expression can be written as the base or exponent of a power without
    /// parentheses.
    fn is_power_operand(&self) -> bool {
        match self {
            Expr::Number(n) => n.is_integer() && !n.is_negative(),
            Expr::Variable { neg, .. }
            | Expr::Constant { neg, .. }
            | Expr::ImaginaryUnit { neg }
            | Expr::Exp { neg, .. }
            | Expr::Ln { neg, .. }
            | Expr::Sqrt { neg, .. }
            | Expr::Factorial { neg, .. } => !neg,
            _ => false,
        }
    }

    /// Returns true if an integer coefficient can be written directly in front of this factor, as
    /// in `2x` or `3pi^2`.
    fn adjoins_coefficient(&self) -> bool {
        match self {
            Expr::Variable { .. } | Expr::Constant { .. } | Expr::ImaginaryUnit { .. } => true,
            Expr::Pow { base, .. } => matches!(
                **base,
                Expr::Variable { neg: false, .. }
                    | Expr::Constant { neg: false, .. }
                    | Expr::ImaginaryUnit { neg: false }
            ),
            _ => false,
        }
    }

    /// Writes the operand of a power, adding parentheses if needed.
    fn fmt_power_operand(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_power_operand() {
            write!(f, "{}", self)
        } else {
            write!(f, "({})", self)
        }
    }

    /// Writes a factor of a product. Only sums need parentheses, since factors are never negated.
    fn fmt_factor(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if matches!(self, Expr::Add { .. }) {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }

    /// Writes the expression without its sign.
    fn fmt_magnitude(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n.abs()),
            Expr::Variable { name, .. } => write!(f, "{}", name),
            Expr::Constant { kind, .. } => write!(f, "{}", kind.name()),
            Expr::ImaginaryUnit { .. } => write!(f, "i"),
            Expr::Add { constant, terms, .. } => {
                let constant = (!constant.is_zero()).then(|| Expr::Number(constant.clone()));
                let terms = Expr::sorted(terms).into_iter().chain(constant.as_ref());

                for (i, term) in terms.enumerate() {
                    if i == 0 {
                        write!(f, "{}", term)?;
                    } else if term.is_negated() {
                        write!(f, " - ")?;
                        term.fmt_magnitude(f)?;
                    } else {
                        write!(f, " + {}", term)?;
                    }
                }
                Ok(())
            },
            Expr::Mul { coefficient, factors, .. } => {
                let factors = Expr::sorted(factors);
                let mut factors = factors.into_iter().peekable();

                if !coefficient.is_one() {
                    write!(f, "{}", coefficient)?;
                    let adjoins = coefficient.is_integer()
                        && factors.peek().is_some_and(|factor| factor.adjoins_coefficient());
                    if adjoins {
                        if let Some(factor) = factors.next() {
                            factor.fmt_factor(f)?;
                        }
                    }
                    for factor in factors {
                        write!(f, " * ")?;
                        factor.fmt_factor(f)?;
                    }
                } else {
                    for (i, factor) in factors.enumerate() {
                        if i > 0 {
                            write!(f, " * ")?;
                        }
                        factor.fmt_factor(f)?;
                    }
                }
                Ok(())
            },
            Expr::Pow { base, power, .. } => {
                base.fmt_power_operand(f)?;
                write!(f, "^")?;
                power.fmt_power_operand(f)
            },
            Expr::Exp { power, .. } => write!(f, "exp({})", power),
            Expr::Ln { arg, .. } => write!(f, "ln({})", arg),
            Expr::Sqrt { radicand, .. } => write!(f, "sqrt({})", radicand),
            Expr::Factorial { arg, .. } => write!(f, "factorial({})", arg),
        }
    }
}

/// Writes the expression in the notation accepted by the parser, so that parsing the output and
/// simplifying it gives back the simplified expression.
///
/// The terms of a sum and the factors of a product are written in a fixed order, so equal
/// expressions are always written the same way.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if !self.is_negated() {
            return self.fmt_magnitude(f);
        }

        if matches!(self, Expr::Add { .. }) {
            write!(f, "-(")?;
            self.fmt_magnitude(f)?;
            write!(f, ")")
        } else {
            write!(f, "-")?;
            self.fmt_magnitude(f)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::rational::Rational;
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> Expr {
        Expr::var("x").unwrap()
    }

    fn y() -> Expr {
        Expr::var("y").unwrap()
    }

    #[test]
    fn atoms() {
        assert_eq!(Expr::number(-3).to_string(), "-3");
        assert_eq!(Expr::Number(Rational::new(3, 4).unwrap()).to_string(), "3/4");
        assert_eq!((-Expr::pi()).to_string(), "-pi");
        assert_eq!(Expr::i().to_string(), "i");
    }

    #[test]
    fn sums_put_the_constant_last() {
        assert_eq!((Expr::number(1) + x()).to_string(), "x + 1");
        assert_eq!((x() - Expr::number(3)).to_string(), "x - 3");
        assert_eq!((y() - x()).to_string(), "-x + y");
        assert_eq!((-(x() + Expr::number(1))).to_string(), "-(x + 1)");
    }

    #[test]
    fn coefficients() {
        assert_eq!((Expr::number(5) * x()).to_string(), "5x");
        assert_eq!((Expr::number(-2) * x() * y()).to_string(), "-2x * y");
        assert_eq!((Expr::number(2) * Expr::number(2).sqrt()).to_string(), "2 * sqrt(2)");
        assert_eq!(
            (Expr::Number(Rational::new(1, 2).unwrap()) * x()).to_string(),
            "1/2 * x",
        );
        assert_eq!((Expr::number(3) * Expr::pi().pow(Expr::number(2))).to_string(), "3pi^2");
    }

    #[test]
    fn factors_and_powers() {
        assert_eq!((x() * (y() + Expr::number(1))).to_string(), "x * (y + 1)");
        assert_eq!(x().pow(Expr::number(-1)).to_string(), "x^(-1)");
        assert_eq!((x() + y()).pow(Expr::number(2)).to_string(), "(x + y)^2");
        assert_eq!((-x()).pow(Expr::number(3)).to_string(), "(-x)^3");
        assert_eq!(x().pow(Expr::Number(Rational::new(1, 3).unwrap())).to_string(), "x^(1/3)");
        assert_eq!((-x().pow(Expr::number(2))).to_string(), "-x^2");
        assert_eq!(x().exp().pow(y()).to_string(), "exp(x * y)");
    }

    #[test]
    fn functions() {
        assert_eq!(x().ln().to_string(), "ln(x)");
        assert_eq!((-x().sqrt()).to_string(), "-sqrt(x)");
        assert_eq!(Expr::number(4).factorial().to_string(), "factorial(4)");
        assert_eq!((Expr::number(2) * x()).exp().to_string(), "exp(2x)");
    }
}
