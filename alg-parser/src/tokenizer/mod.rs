pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Input the lexer cannot match is kept as a [`TokenKind::Symbol`] token, so that the parser can
/// report it.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Number, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, "2"),
            ],
        );
    }

    #[test]
    fn power_operators() {
        compare_tokens(
            "x**2^y",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "**"),
                (TokenKind::Number, "2"),
                (TokenKind::Exp, "^"),
                (TokenKind::Name, "y"),
            ],
        );
    }

    #[test]
    fn decimal_separators() {
        compare_tokens(
            "3.25 + 3,25 - .5 * 2.",
            [
                (TokenKind::Number, "3.25"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, "3,25"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Sub, "-"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, ".5"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Mul, "*"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, "2."),
            ],
        );
    }

    #[test]
    fn names_and_symbols() {
        compare_tokens(
            "2sqrt(x)\t$ y",
            [
                (TokenKind::Number, "2"),
                (TokenKind::Name, "sqrt"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "x"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Whitespace, "\t"),
                (TokenKind::Symbol, "$"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "y"),
            ],
        );
    }

    #[test]
    fn complete_keeps_spans() {
        let tokens = tokenize_complete("ab + 1");
        let spans = tokens.iter().map(|token| token.span.clone()).collect::<Vec<_>>();
        assert_eq!(spans, vec![0..2, 2..3, 3..4, 4..5, 5..6]);
    }
}
