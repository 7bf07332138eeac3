use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\n\r]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("^")]
    #[token("**")]
    Exp,

    #[regex(r"[a-zA-Z]+")]
    Name,

    #[regex(r"[0-9]+([.,][0-9]*)?")]
    #[regex(r"[.,][0-9]+")]
    Number,

    #[token(".")]
    #[token(",")]
    Dot,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    /// Returns true if a token of this kind can start an operand. Two adjacent operands are
    /// multiplied implicitly.
    pub fn starts_operand(self) -> bool {
        matches!(self, TokenKind::Number | TokenKind::Name | TokenKind::OpenParen)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    ///
    /// Names that were split into several aliases by the parser hold the canonical, lower-case
    /// spelling of the alias instead of a slice of the source.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}
