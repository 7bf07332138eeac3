/// A rewrite applied during simplification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `2x + 3x = 5x`, `x + xy = x(1 + y)`
    CombineLikeTerms,

    /// `x^2 * x^-1 = x`, `2 * sqrt(2) * sqrt(2) = 4`
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `a^(1/2) = sqrt(a)`
    PowerHalf,

    /// `(-a)^2 = a^2`, `(-a)^3 = -a^3`
    NegatedBase,

    /// `2^3 = 8`, `(4/9)^(3/2) = 8/27`, `2^(3/2) = 2 * 2^(1/2)`
    NumericPower,

    /// `(2xy)^2 = 4x^2y^2`
    DistributePower,

    /// `(2x)^y = 2^y * x^y`
    SplitCoefficientPower,

    /// `exp(0) = 1`
    ExpZero,

    /// `exp(1) = e`
    ExpOne,

    /// `exp(ln(a)) = a`
    ExpLn,

    /// `exp(i * pi) = -1`, `exp(1/2 * i * pi) = i`
    Euler,

    /// `ln(1) = 0`
    LnOne,

    /// `ln(e) = 1`
    LnE,

    /// `ln(exp(a)) = a`
    LnExp,

    /// `ln(ab) = ln(a) + ln(b)`
    LnProduct,

    /// `ln(a^b) = b * ln(a)`, `ln(sqrt(a)) = 1/2 * ln(a)`
    LnPower,

    /// `sqrt(0) = 0`, `sqrt(1) = 1`
    SqrtTrivial,

    /// `sqrt(8) = 2 * sqrt(2)`, `sqrt(-4) = 2i`
    SqrtNumber,

    /// `sqrt(a^b) = a^(b/2)`
    SqrtPower,

    /// `sqrt(4x^2y) = 2x * sqrt(y)`
    SqrtProduct,
}
