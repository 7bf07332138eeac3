//! Resolution of function and constant names.
//!
//! Multi-letter names are matched case-insensitively against a fixed table of aliases. A name that
//! is not an alias itself may be a concatenation of aliases, such as `epi` (`e * pi`) or `pisqrt`
//! (`pi * sqrt`), in which case it is split into one token per alias. When several aliases could
//! start at the same position, the longest one wins, so `sinh` is never read as `sin * h`.

use crate::tokenizer::{Token, TokenKind};
use once_cell::sync::Lazy;
use super::{call::Func, literal::ConstKind};

/// What an alias resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alias {
    /// A function that must be followed by a parenthesized argument.
    Function(Func),

    /// A named constant.
    Constant(ConstKind),
}

/// The alias table, sorted from the longest name to the shortest.
static ALIASES: Lazy<Vec<(&'static str, Alias)>> = Lazy::new(|| {
    let mut aliases = vec![
        ("sinh", Alias::Function(Func::Sinh)),
        ("sh", Alias::Function(Func::Sinh)),
        ("arcsin", Alias::Function(Func::Asin)),
        ("asin", Alias::Function(Func::Asin)),
        ("sin", Alias::Function(Func::Sin)),
        ("cosh", Alias::Function(Func::Cosh)),
        ("ch", Alias::Function(Func::Cosh)),
        ("arccos", Alias::Function(Func::Acos)),
        ("acos", Alias::Function(Func::Acos)),
        ("cos", Alias::Function(Func::Cos)),
        ("tanh", Alias::Function(Func::Tanh)),
        ("th", Alias::Function(Func::Tanh)),
        ("arctan", Alias::Function(Func::Atan)),
        ("atan", Alias::Function(Func::Atan)),
        ("tan", Alias::Function(Func::Tan)),
        ("exp", Alias::Function(Func::Exp)),
        ("ln", Alias::Function(Func::Ln)),
        ("sqrt", Alias::Function(Func::Sqrt)),
        ("factorial", Alias::Function(Func::Factorial)),
        ("pi", Alias::Constant(ConstKind::Pi)),
        ("e", Alias::Constant(ConstKind::E)),
        ("i", Alias::Constant(ConstKind::I)),
    ];

    // stable sort keeps the table order between aliases of the same length
    aliases.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));
    aliases
});

/// Returns what the given name resolves to.
///
/// Single letters are variables unless they are exactly `e` or `i` (lower-case); longer names are
/// matched case-insensitively.
pub fn lookup(name: &str) -> Option<Alias> {
    if name.len() == 1 && name != "e" && name != "i" {
        return None;
    }

    ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        .map(|(_, resolved)| *resolved)
}

/// Splits a name into a sequence of aliases, returning the offset of each alias within the name
/// and its canonical spelling. Returns [`None`] if the name cannot be split completely.
pub fn split(name: &str) -> Option<Vec<(usize, &'static str)>> {
    fn split_from(lower: &str, pos: usize, out: &mut Vec<(usize, &'static str)>) -> bool {
        if pos == lower.len() {
            return true;
        }

        for (alias, _) in ALIASES.iter() {
            if lower[pos..].starts_with(alias) {
                out.push((pos, *alias));
                if split_from(lower, pos + alias.len(), out) {
                    return true;
                }
                out.pop();
            }
        }

        false
    }

    let lower = name.to_ascii_lowercase();
    let mut out = Vec::new();
    split_from(&lower, 0, &mut out).then_some(out)
}

/// Splits every multi-letter name token that is not an alias by itself, but is a concatenation of
/// aliases, into one token per alias. Tokens that cannot be split are kept as they are, and will
/// be reported as unknown names by the parser.
pub fn split_names<'source>(tokens: Box<[Token<'source>]>) -> Box<[Token<'source>]> {
    let mut result = Vec::with_capacity(tokens.len());

    for token in tokens.into_vec() {
        if token.kind != TokenKind::Name || token.lexeme.len() == 1 || lookup(token.lexeme).is_some() {
            result.push(token);
            continue;
        }

        match split(token.lexeme) {
            Some(parts) => {
                result.extend(parts.into_iter().map(|(offset, alias)| {
                    let start = token.span.start + offset;
                    Token {
                        span: start..start + alias.len(),
                        kind: TokenKind::Name,
                        lexeme: alias,
                    }
                }));
            },
            None => result.push(token),
        }
    }

    result.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_for_long_names() {
        assert_eq!(lookup("PI"), Some(Alias::Constant(ConstKind::Pi)));
        assert_eq!(lookup("Sqrt"), Some(Alias::Function(Func::Sqrt)));
        assert_eq!(lookup("sh"), Some(Alias::Function(Func::Sinh)));
        assert_eq!(lookup("foo"), None);
    }

    #[test]
    fn single_letters_keep_their_case() {
        assert_eq!(lookup("e"), Some(Alias::Constant(ConstKind::E)));
        assert_eq!(lookup("i"), Some(Alias::Constant(ConstKind::I)));
        assert_eq!(lookup("E"), None);
        assert_eq!(lookup("I"), None);
        assert_eq!(lookup("x"), None);
    }

    #[test]
    fn split_longest_first() {
        assert_eq!(split("epi"), Some(vec![(0, "e"), (1, "pi")]));
        assert_eq!(split("sinh"), Some(vec![(0, "sinh")]));
        assert_eq!(split("PIexp"), Some(vec![(0, "pi"), (2, "exp")]));
        assert_eq!(split("ie"), Some(vec![(0, "i"), (1, "e")]));
    }

    #[test]
    fn split_ends_with_function() {
        assert_eq!(split("pisqrt"), Some(vec![(0, "pi"), (2, "sqrt")]));
        assert_eq!(split("epie"), Some(vec![(0, "e"), (1, "pi"), (3, "e")]));
    }

    #[test]
    fn split_fails_on_unknown_letters() {
        assert_eq!(split("xy"), None);
        assert_eq!(split("sinx"), None);
    }

    #[test]
    fn split_tokens() {
        let tokens = split_names(crate::tokenizer::tokenize_complete("2Epi"));
        let parts = tokens
            .iter()
            .map(|token| (token.kind, token.lexeme, token.span.clone()))
            .collect::<Vec<_>>();
        assert_eq!(parts, vec![
            (TokenKind::Number, "2", 0..1),
            (TokenKind::Name, "e", 1..2),
            (TokenKind::Name, "pi", 2..4),
        ]);
    }
}
