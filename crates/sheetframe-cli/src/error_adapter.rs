//! Error adapter for converting FrameError to miette diagnostics.
//!
//! Load errors carry the drawing source, so they render with a labelled
//! snippet at the failing byte offset. Everything else renders as a plain
//! error with a diagnostic code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use sheetframe::{FrameError, markup::MarkupError};

/// Adapter for a markup error raised while loading a drawing.
pub struct LoadAdapter<'a> {
    err: &'a MarkupError,
    src: &'a str,
}

impl<'a> LoadAdapter<'a> {
    /// Create a new load adapter.
    pub fn new(err: &'a MarkupError, src: &'a str) -> Self {
        Self { err, src }
    }

    fn span(&self) -> Option<SourceSpan> {
        let offset = usize::try_from(self.err.offset()?).ok()?;
        let offset = offset.min(self.src.len());
        let len = usize::from(offset < self.src.len());
        Some(SourceSpan::new(offset.into(), len))
    }
}

impl fmt::Debug for LoadAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadAdapter").field("err", &self.err).finish()
    }
}

impl fmt::Display for LoadAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for LoadAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.err)
    }
}

impl MietteDiagnostic for LoadAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("sheetframe::load"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("the input must be a well-formed xdr:wsDr drawing part"))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span()?;
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Adapter for [`FrameError`] variants without source text.
pub struct ErrorAdapter<'a>(pub &'a FrameError);

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
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            FrameError::Io(_) => "sheetframe::io",
            FrameError::MissingNode { .. } | FrameError::MissingAttribute { .. } => {
                "sheetframe::structure"
            }
            FrameError::InvalidValue { .. } => "sheetframe::value",
            FrameError::InvalidIdentity(_) => "sheetframe::identity",
            FrameError::PayloadAlreadyAttached { .. } => "sheetframe::attach",
            FrameError::RelationshipInUse { .. } | FrameError::RelationshipIdsExhausted => {
                "sheetframe::relationship"
            }
            FrameError::UnknownHandle { .. } => "sheetframe::handle",
            FrameError::Markup(_) => "sheetframe::markup",
            FrameError::Load { .. } => "sheetframe::load",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            FrameError::InvalidIdentity(_) => Some(Box::new(
                "frame identities are unsigned 32-bit integers",
            )),
            FrameError::RelationshipInUse { .. } => Some(Box::new(
                "omit --rel-id to allocate the next free relationship id",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A load failure with source location information.
    Load(LoadAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Load(l) => fmt::Display::fmt(l, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Load(l) => std::error::Error::source(l),
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Load(l) => l.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Load(l) => l.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Load(l) => l.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Load(l) => l.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`FrameError`] into a list of reportable errors.
pub fn to_reportables(err: &FrameError) -> Vec<Reportable<'_>> {
    match err {
        FrameError::Load { err, src } => vec![Reportable::Load(LoadAdapter::new(err, src))],
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
