//! Error adapter for converting TraceryError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Errors in the
//! input graph file are shown with a snippet of the offending source.

use std::{fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use tracery::TraceryError;

/// Adapter for an input-file error with an optional source location.
pub struct InputAdapter<'a> {
    message: &'a str,
    span: Option<Range<usize>>,
    src: &'a str,
}

impl<'a> InputAdapter<'a> {
    /// Create a new input adapter.
    pub fn new(message: &'a str, span: Option<Range<usize>>, src: &'a str) -> Self {
        Self { message, span, src }
    }
}

impl fmt::Debug for InputAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputAdapter")
            .field("message", &self.message)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for InputAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for InputAdapter<'_> {}

impl MietteDiagnostic for InputAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("tracery::input"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span.clone()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some("here".to_string()), span),
        )))
    }
}

/// Adapter for [`TraceryError`] variants without source locations.
pub struct ErrorAdapter<'a>(pub &'a TraceryError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TraceryError::Io(_) => "tracery::io",
            TraceryError::Input { .. } => "tracery::input",
            TraceryError::UnknownNode(_) => "tracery::unknown_node",
            TraceryError::DuplicateNode(_) => "tracery::duplicate_node",
            TraceryError::InvalidSize { .. } => "tracery::invalid_size",
            TraceryError::Engine(_) => "tracery::engine",
            TraceryError::Plain { .. } => "tracery::plain",
            TraceryError::Layout(_) => "tracery::layout",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            TraceryError::UnknownNode(_) => Some(Box::new(
                "edges and groups may only reference nodes declared in [[nodes]]",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An input error with source location information.
    Input(InputAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Input(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Input(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Input(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Input(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Input(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Input(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`TraceryError`] into a reportable error.
pub fn to_reportable(err: &TraceryError) -> Reportable<'_> {
    match err {
        TraceryError::Input { message, span, src } => {
            Reportable::Input(InputAdapter::new(message, span.clone(), src))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_has_labeled_span() {
        let err = TraceryError::new_input_error("missing field `width`", Some(4..9), "[[nodes]]");

        let reportable = to_reportable(&err);
        assert_eq!(reportable.to_string(), "missing field `width`");

        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 4);
        assert_eq!(labels[0].len(), 5);
        assert!(labels[0].primary());
    }

    #[test]
    fn test_input_error_without_span() {
        let err = TraceryError::new_input_error("bad input", None, "");
        let reportable = to_reportable(&err);
        assert!(reportable.labels().is_none());
        assert_eq!(reportable.code().unwrap().to_string(), "tracery::input");
    }

    #[test]
    fn test_non_input_error() {
        let err = TraceryError::UnknownNode("Z".to_string());

        let reportable = to_reportable(&err);
        match &reportable {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Unknown node identifier `Z`");
            }
            Reportable::Input(_) => panic!("Expected Error"),
        }
        assert_eq!(
            reportable.code().unwrap().to_string(),
            "tracery::unknown_node"
        );
        assert!(reportable.help().is_some());
    }

    #[test]
    fn test_engine_error_code() {
        let err = TraceryError::Engine("syntax error".to_string());
        let reportable = to_reportable(&err);
        assert_eq!(reportable.code().unwrap().to_string(), "tracery::engine");
        assert!(reportable.help().is_none());
    }
}
