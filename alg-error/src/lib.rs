//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that carries an error kind together with the regions of the
//! input it originated from.
//!
//! Every error belongs to exactly one [`Category`], which callers can match on without knowing
//! the concrete error type.

// lets the `ErrorKind` derive refer to this crate by name in its own tests
extern crate self as alg_error;

use ariadne::{Color, Label, Report, ReportKind};
use std::{any::Any, fmt::{self, Debug, Display}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// The broad category an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// A value of an unsupported type or shape was given, such as a non-finite float.
    InvalidType,

    /// A variable name was rejected.
    InvalidName,

    /// A division by zero, or an operation equivalent to one, was attempted.
    DivisionByZero,

    /// The operation is not supported for the given operands.
    UnsupportedOperation,

    /// The input text is not well-formed.
    Syntax,

    /// The input text refers to a name that does not exist.
    Name,
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidType => "invalid type",
            Self::InvalidName => "invalid name",
            Self::DivisionByZero => "division by zero",
            Self::UnsupportedOperation => "unsupported operation",
            Self::Syntax => "syntax error",
            Self::Name => "name error",
        };
        f.write_str(name)
    }
}

/// Represents any kind of error that can occur during some operation.
///
/// This trait is usually derived with `alg_attrs::ErrorKind`.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns the category of this error.
    fn category(&self) -> Category;

    /// Returns the message displayed at the top of the error.
    fn message(&self) -> String;

    /// Returns the text of the labels, each pointing at the span with the same index.
    fn labels(&self) -> Vec<String> {
        Vec::new()
    }

    /// Returns help text describing what the user can do to fix the error, if any.
    fn help(&self) -> Option<String> {
        None
    }

    /// Returns `self` as [`Any`], so that the concrete error kind can be recovered.
    fn as_any(&self) -> &dyn Any;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)> {
        let offset = spans.first().map_or(0, |span| span.start);
        let mut builder = Report::build(ReportKind::Error, src_id, offset)
            .with_message(self.message())
            .with_labels(
                self.labels()
                    .into_iter()
                    .zip(spans)
                    .map(|(label_str, span)| {
                        let mut label = Label::new((src_id, span.clone()))
                            .with_color(EXPR);

                        if !label_str.is_empty() {
                            label = label.with_message(label_str);
                        }

                        label
                    })
                    .collect::<Vec<_>>()
            );

        if let Some(help) = self.help() {
            builder.set_help(help);
        }
        builder.finish()
    }
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,

    /// The source code the spans point into, if known.
    pub input: Option<String>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind), input: None }
    }

    /// Creates a new error that is not associated with any region of source code.
    pub fn spanless(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Attaches the source code this error originated from.
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Returns the source code this error originated from, if it was attached.
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// Returns the category of the error.
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Returns the concrete error kind, if it is of type `K`.
    pub fn kind_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Returns true if the concrete error kind is of type `K`.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind_ref::<K>().is_some()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use alg_attrs::ErrorKind;
    use ariadne::Source;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        category = Category::Name,
        message = format!("unknown name `{}`", name),
        labels = ["this name", "and this one"],
        help = "check the spelling",
    )]
    struct UnknownThing {
        name: String,
    }

    #[derive(Debug, ErrorKind)]
    #[error(category = Category::DivisionByZero, message = "cannot divide by zero")]
    struct Zero;

    #[test]
    fn derived_methods() {
        let kind = UnknownThing { name: "foo".to_string() };
        assert_eq!(kind.category(), Category::Name);
        assert_eq!(kind.message(), "unknown name `foo`");
        assert_eq!(kind.labels(), vec!["this name".to_string(), "and this one".to_string()]);
        assert_eq!(kind.help(), Some("check the spelling".to_string()));

        assert!(Zero.labels().is_empty());
        assert_eq!(Zero.help(), None);
    }

    #[test]
    fn downcast() {
        let err = Error::new(vec![0..3], UnknownThing { name: "foo".to_string() });
        assert!(err.is::<UnknownThing>());
        assert!(!err.is::<Zero>());
        assert_eq!(err.kind_ref::<UnknownThing>().map(|kind| kind.name.as_str()), Some("foo"));
        assert_eq!(err.to_string(), "name error: unknown name `foo`");
    }

    #[test]
    fn report_contains_message() {
        let input = "foo + 2";
        let err = Error::new(vec![0..3], UnknownThing { name: "foo".to_string() })
            .with_input(input);
        assert_eq!(err.input(), Some(input));

        let mut buf = Vec::new();
        err.build_report("input")
            .write(("input", Source::from(input)), &mut buf)
            .unwrap();
        let text = String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap();
        assert!(text.contains("unknown name `foo`"));
        assert!(text.contains("this name"));
        assert!(text.contains("check the spelling"));
    }

    #[test]
    fn spanless_report() {
        let err = Error::spanless(Zero);
        assert_eq!(err.category(), Category::DivisionByZero);

        let mut buf = Vec::new();
        err.build_report("input")
            .write(("input", Source::from("1/0")), &mut buf)
            .unwrap();
        let text = String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap();
        assert!(text.contains("cannot divide by zero"));
    }
}
