mod structures;

use proc_macro::TokenStream;
use quote::quote;
use structures::ErrorKindTarget;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for any struct with named fields, or for unit structs.
///
/// The information of the error is customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```
/// use alg_attrs::ErrorKind;
/// use alg_error::{Category, ErrorKind};
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     category = Category::Syntax,
///     message = "unexpected end of input",
///     labels = ["add something here"],
/// )]
/// pub struct Foo;
///
/// assert_eq!(Foo.message(), "unexpected end of input");
/// assert_eq!(Foo.category(), Category::Syntax);
/// ```
///
/// The following tags are available:
///
/// | Tag        | Description                                                                  |
/// | ---------- | ---------------------------------------------------------------------------- |
/// | `category` | The [`Category`] of the error. Required.                                     |
/// | `message`  | The message displayed at the top of the error when it is displayed. Required. |
/// | `labels`   | An array of label texts, each pointing to the span with the same index.      |
/// | `help`     | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression. `message` and `help` should evaluate to something that
/// implements [`ToString`], and `labels` to an array of such values. The expressions are evaluated
/// with the fields of the struct in scope, so they can be used in the expression (tuple structs
/// are not supported).
///
/// [`Category`]: https://docs.rs/alg-error
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            #target
        }
    }.into()
}
