use alg_error::Error;
use std::{fmt, ops::Range};
use super::{
    expr::Expr,
    token::op::{BinOp, BinOpKind},
    unary::Unary,
    Associativity,
    Parser,
    Precedence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What follows an operand in the token stream.
enum Next {
    /// An explicit binary operator.
    Op(BinOpKind),

    /// Another operand, which is multiplied implicitly, such as in `2x` or `x(x + 1)`.
    ImplicitMultiplication,
}

impl Next {
    /// Peeks at the next token to find out what follows the current operand, if anything.
    fn peek(input: &Parser) -> Option<Self> {
        let kind = input.peek_kind()?;
        if let Some(op) = BinOpKind::from_token(kind) {
            Some(Next::Op(op))
        } else if kind.starts_operand() {
            Some(Next::ImplicitMultiplication)
        } else {
            None
        }
    }

    /// Returns the precedence of the operation.
    fn precedence(&self) -> Precedence {
        match self {
            Next::Op(op) => op.precedence(),
            Next::ImplicitMultiplication => BinOpKind::Mul.precedence(),
        }
    }

    /// Returns the associativity of the operation.
    fn associativity(&self) -> Associativity {
        match self {
            Next::Op(op) => op.associativity(),
            Next::ImplicitMultiplication => Associativity::Left,
        }
    }
}

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// After parsing the left-hand-side, the operator, and the right-hand-side of a potential
    /// binary expression, parse ahead to see if the right-hand-side is incomplete.
    fn complete_rhs(input: &mut Parser, lhs: Expr, op: BinOp, rhs: Expr) -> Result<Expr, Error> {
        let precedence = op.precedence();
        let rhs = input.nested(|input| {
            let mut rhs = rhs;

            // before creating the `lhs op rhs` node, we should check the precedence of the
            // following operator, if any
            // this is because we can't parse an expression like `3 + 4 * 5`, as (3 + 4) * 5
            while let Some(next) = Next::peek(input) {
                if next.precedence() > precedence
                    || next.precedence() == precedence && next.associativity() == Associativity::Right {
                    // this operator has a higher precedence or it is right associative, so we
                    // should parse its expression starting with `rhs` first
                    rhs = Self::parse_expr(input, rhs, next.precedence())?;
                } else {
                    // this operator has lower precedence, or equal precedence and
                    // left-associativity; this is in scenarios like:
                    // `1 * 2 + 3` or `1 * 2 * 3`
                    //
                    // so just break out of the loop and let `lhs` become `1 * 2`
                    // we will parse this operator on the next iteration of the outside loop
                    break;
                }
            }

            Ok(rhs)
        })?;

        let (start_span, end_span) = (lhs.span().start, rhs.span().end);
        Ok(Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span: start_span..end_span,
        }))
    }

    /// Parses a chain of binary operations that bind at least as tightly as `precedence`, starting
    /// with the already parsed `lhs`.
    pub fn parse_expr(input: &mut Parser, lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        // every link of a chain like `1 + 2 + 3` nests the tree one level deeper on its left, so
        // the links count against the nesting limit until the chain ends
        let depth = input.depth;
        let result = Self::parse_chain(input, lhs, precedence);
        input.depth = depth;
        result
    }

    fn parse_chain(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        while let Some(next) = Next::peek(input) {
            if next.precedence() < precedence {
                break;
            }
            input.deepen()?;

            let op = match next {
                Next::Op(_) => input.try_parse::<BinOp>()?,
                Next::ImplicitMultiplication => {
                    let start = lhs.span().end;
                    let end = input.span().start;
                    BinOp {
                        kind: BinOpKind::Mul,
                        implicit: true,
                        span: start..end,
                    }
                },
            };
            let rhs = Unary::parse_or_lower(input)?;
            lhs = Self::complete_rhs(input, lhs, op, rhs)?;
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op.kind {
            BinOpKind::Exp => write!(f, "{}^{}", self.lhs, self.rhs),
            BinOpKind::Mul if self.op.implicit => {
                let (lhs, rhs) = (self.lhs.to_string(), self.rhs.to_string());
                let last = lhs.chars().last().unwrap_or(' ');
                let first = rhs.chars().next().unwrap_or(' ');

                // keep adjacent operands from merging into a single number or name
                if first.is_ascii_digit() || last.is_ascii_alphabetic() && first.is_ascii_alphabetic() {
                    write!(f, "{} {}", lhs, rhs)
                } else {
                    write!(f, "{}{}", lhs, rhs)
                }
            },
            _ => write!(f, "{} {} {}", self.lhs, self.op, self.rhs),
        }
    }
}
