pub mod op;

use alg_error::Error;
use crate::{
    parser::{error::UnexpectedToken, Parser, Parse},
    tokenizer::TokenKind,
};
use std::ops::Range;

/// Declares one struct per listed [`TokenKind`], each parseable on its own.
///
/// Parsing one of these structs consumes exactly one token, and fails with [`UnexpectedToken`] if
/// the next token is of any other kind.
macro_rules! token_kinds {
    ($($name:ident)*) => {
        $(
            #[derive(Clone, Debug, PartialEq)]
            pub(crate) struct $name {
                pub(crate) lexeme: String,
                pub(crate) span: Range<usize>,
            }

            impl Parse for $name {
                fn parse(input: &mut Parser) -> Result<Self, Error> {
                    let token = input.next_token()?;

                    if token.kind == TokenKind::$name {
                        Ok(Self {
                            lexeme: token.lexeme.to_owned(),
                            span: token.span,
                        })
                    } else {
                        Err(Error::new(vec![token.span], UnexpectedToken {
                            expected: &[TokenKind::$name],
                            found: token.kind,
                        }))
                    }
                }
            }
        )*
    };
}

token_kinds!(
    Name
    Number
    OpenParen
    CloseParen
);
