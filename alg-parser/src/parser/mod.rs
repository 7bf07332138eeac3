pub mod alias;
pub mod binary;
pub mod call;
pub mod error;
pub mod expr;
pub mod literal;
pub mod paren;
pub mod token;
pub mod unary;

use alg_error::Error;
use error::{ExpectedEof, InvalidCharacter, NestingTooDeep, UnclosedParenthesis, UnexpectedEof};
use log::{debug, trace};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// The default maximum nesting depth of parentheses, unary operators, and operator chains.
pub const MAX_DEPTH: usize = 128;

/// A high-level parser for the notation. This is the type to use to parse an arbitrary piece of
/// text into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The current nesting depth.
    depth: usize,

    /// The maximum nesting depth before parsing fails with [`NestingTooDeep`].
    max_depth: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        debug!("parsing `{}`", source);
        let tokens = alias::split_names(tokenize_complete(source));
        trace!("tokens: {:?}", tokens);
        Self {
            tokens,
            cursor: 0,
            depth: 0,
            max_depth: MAX_DEPTH,
        }
    }

    /// Sets the maximum nesting depth of the parser.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl alg_error::ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the next non-whitespace token, or the end of the source code if there
    /// is none.
    pub fn span(&self) -> Range<usize> {
        self.peek_token()
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns the next non-whitespace token without moving the cursor.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the kind of the next non-whitespace token without moving the cursor.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek_token().map(|token| token.kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Moves the parser one nesting level deeper, failing with [`NestingTooDeep`] if the maximum
    /// depth would be exceeded. The caller is responsible for restoring the depth.
    pub(crate) fn deepen(&mut self) -> Result<(), Error> {
        if self.depth >= self.max_depth {
            return Err(self.error(NestingTooDeep { max_depth: self.max_depth }));
        }

        self.depth += 1;
        Ok(())
    }

    /// Runs the given parsing function one nesting level deeper, failing with
    /// [`NestingTooDeep`] if the maximum depth would be exceeded.
    pub(crate) fn nested<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser) -> Result<T, Error>,
    {
        self.deepen()?;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    ///
    /// Characters outside of the accepted alphabet are reported before anything is parsed.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        if let Some(token) = self.tokens.iter().find(|token| token.kind == TokenKind::Symbol) {
            let character = token.lexeme.chars().next().unwrap_or_default();
            return Err(Error::new(vec![token.span.clone()], InvalidCharacter { character }));
        }

        let value = T::parse(self)?;
        match self.peek_token() {
            None => Ok(value),
            Some(token) if token.kind == TokenKind::CloseParen => {
                Err(self.error(UnclosedParenthesis { opening: false }))
            },
            Some(_) => Err(self.error(ExpectedEof)),
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`.
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)` (the operators appear to the
    /// left of the operand).
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`), division (`/`), and implicit multiplication, which
    /// separate factors.
    Factor,

    /// Precedence of unary negation (`-`) and unary plus (`+`).
    Neg,

    /// Precedence of exponentiation (`^` or `**`).
    Exp,
}

#[cfg(test)]
mod tests {
    use alg_error::Category;
    use pretty_assertions::assert_eq;
    use super::*;

    use binary::Binary;
    use call::{Call, Func};
    use error::{EmptyParenthesis, MissingArgument, UnexpectedToken, UnknownName};
    use expr::Expr;
    use literal::{ConstKind, LitConst, LitNum, LitSym, Literal};
    use paren::Paren;
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};
    use unary::Unary;

    fn parse(source: &str) -> Result<Expr, Error> {
        Parser::new(source).try_parse_full::<Expr>()
    }

    fn num(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Number(LitNum { value: value.to_string(), span }))
    }

    fn sym(name: char, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name, span }))
    }

    fn op(kind: BinOpKind, implicit: bool, span: Range<usize>) -> BinOp {
        BinOp { kind, implicit, span }
    }

    fn binary(lhs: Expr, op: BinOp, rhs: Expr, span: Range<usize>) -> Expr {
        Expr::Binary(Binary { lhs: Box::new(lhs), op, rhs: Box::new(rhs), span })
    }

    #[test]
    fn literal_int() {
        assert_eq!(parse("16").unwrap(), num("16", 0..2));
    }

    #[test]
    fn literal_decimal_comma() {
        assert_eq!(parse("3,14").unwrap(), num("3.14", 0..4));
    }

    #[test]
    fn literal_symbol_keeps_case() {
        assert_eq!(parse("X").unwrap(), sym('X', 0..1));
    }

    #[test]
    fn constants() {
        assert_eq!(parse("e").unwrap(), Expr::Literal(Literal::Constant(LitConst {
            kind: ConstKind::E,
            span: 0..1,
        })));
        assert_eq!(parse("PI").unwrap(), Expr::Literal(Literal::Constant(LitConst {
            kind: ConstKind::Pi,
            span: 0..2,
        })));
    }

    #[test]
    fn binary_precedence() {
        let expr = parse("1 + 2 * x").unwrap();
        assert_eq!(expr, binary(
            num("1", 0..1),
            op(BinOpKind::Add, false, 2..3),
            binary(
                num("2", 4..5),
                op(BinOpKind::Mul, false, 6..7),
                sym('x', 8..9),
                4..9,
            ),
            0..9,
        ));
    }

    #[test]
    fn left_associative_subtraction() {
        let expr = parse("a - b - c").unwrap();
        assert_eq!(expr, binary(
            binary(
                sym('a', 0..1),
                op(BinOpKind::Sub, false, 2..3),
                sym('b', 4..5),
                0..5,
            ),
            op(BinOpKind::Sub, false, 6..7),
            sym('c', 8..9),
            0..9,
        ));
    }

    #[test]
    fn right_associative_power() {
        let expr = parse("a^b**c").unwrap();
        assert_eq!(expr, binary(
            sym('a', 0..1),
            op(BinOpKind::Exp, false, 1..2),
            binary(
                sym('b', 2..3),
                op(BinOpKind::Exp, false, 3..5),
                sym('c', 5..6),
                2..6,
            ),
            0..6,
        ));
    }

    #[test]
    fn implicit_multiplication() {
        let expr = parse("2x^2").unwrap();
        assert_eq!(expr, binary(
            num("2", 0..1),
            op(BinOpKind::Mul, true, 1..1),
            binary(
                sym('x', 1..2),
                op(BinOpKind::Exp, false, 2..3),
                num("2", 3..4),
                1..4,
            ),
            0..4,
        ));
    }

    #[test]
    fn implicit_multiplication_of_parens() {
        let expr = parse("(a)(b)").unwrap();
        assert_eq!(expr, binary(
            Expr::Paren(Paren { expr: Box::new(sym('a', 1..2)), span: 0..3 }),
            op(BinOpKind::Mul, true, 3..3),
            Expr::Paren(Paren { expr: Box::new(sym('b', 4..5)), span: 3..6 }),
            0..6,
        ));
    }

    #[test]
    fn split_constants() {
        let expr = parse("2epi").unwrap();
        assert_eq!(expr.to_string(), "2e pi");
    }

    #[test]
    fn unary_binds_looser_than_power() {
        let expr = parse("-x^2").unwrap();
        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(binary(
                sym('x', 1..2),
                op(BinOpKind::Exp, false, 2..3),
                num("2", 3..4),
                1..4,
            )),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn negative_exponent() {
        let expr = parse("2^-x").unwrap();
        assert_eq!(expr.to_string(), "2^-x");
    }

    #[test]
    fn function_call() {
        let expr = parse("sqrt(x + 1)").unwrap();
        assert_eq!(expr, Expr::Call(Call {
            func: Func::Sqrt,
            arg: Box::new(binary(
                sym('x', 5..6),
                op(BinOpKind::Add, false, 7..8),
                num("1", 9..10),
                5..10,
            )),
            span: 0..11,
        }));
    }

    #[test]
    fn display_round_trip() {
        for source in ["2x^2 + sqrt(y)", "-(a + b) / c", "exp(2x) - ln(x^(1/2))", "2 3"] {
            let expr = parse(source).unwrap();
            assert_eq!(expr.to_string(), source);
        }
    }

    #[test]
    fn invalid_character() {
        let err = parse("x + $").unwrap_err();
        assert_eq!(err.category(), Category::Syntax);
        assert_eq!(err.kind_ref::<InvalidCharacter>(), Some(&InvalidCharacter { character: '$' }));
        assert_eq!(err.spans, vec![4..5]);
    }

    #[test]
    fn unknown_name() {
        let err = parse("2xy").unwrap_err();
        assert_eq!(err.category(), Category::Name);
        assert_eq!(err.kind_ref::<UnknownName>(), Some(&UnknownName { name: "xy".to_string() }));
    }

    #[test]
    fn missing_function_argument() {
        let err = parse("sqrt x").unwrap_err();
        assert!(err.is::<MissingArgument>());
        assert_eq!(err.spans, vec![0..4]);
    }

    #[test]
    fn unclosed_parens() {
        let err = parse("(x + 1").unwrap_err();
        assert_eq!(err.kind_ref::<UnclosedParenthesis>(), Some(&UnclosedParenthesis { opening: true }));

        let err = parse("x + 1)").unwrap_err();
        assert_eq!(err.kind_ref::<UnclosedParenthesis>(), Some(&UnclosedParenthesis { opening: false }));
    }

    #[test]
    fn empty_parens() {
        let err = parse("2 * ()").unwrap_err();
        assert!(err.is::<EmptyParenthesis>());
    }

    #[test]
    fn dangling_operator() {
        let err = parse("x +").unwrap_err();
        assert!(err.is::<UnexpectedEof>());

        let err = parse("* x").unwrap_err();
        assert!(err.is::<UnexpectedToken>());
    }

    #[test]
    fn nesting_limit() {
        let source = format!("{}x{}", "(".repeat(20), ")".repeat(20));
        assert!(Parser::new(&source).try_parse_full::<Expr>().is_ok());

        let err = Parser::new(&source)
            .with_max_depth(10)
            .try_parse_full::<Expr>()
            .unwrap_err();
        assert!(err.is::<NestingTooDeep>());

        let deep = format!("{}x{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert!(parse(&deep).unwrap_err().is::<NestingTooDeep>());
    }

    #[test]
    fn operator_chains_count_towards_nesting() {
        let sum = vec!["x"; 100].join(" + ");
        assert!(Parser::new(&sum).try_parse_full::<Expr>().is_ok());

        let err = Parser::new(&sum)
            .with_max_depth(50)
            .try_parse_full::<Expr>()
            .unwrap_err();
        assert!(err.is::<NestingTooDeep>());

        let long = vec!["x"; 10_000].join(" + ");
        assert!(Parser::new(&long).try_parse_full::<Expr>().unwrap_err().is::<NestingTooDeep>());

        let product = vec!["x"; 200].join(" * ");
        assert!(Parser::new(&product)
            .with_max_depth(256)
            .try_parse_full::<Expr>()
            .is_ok());
    }
}
