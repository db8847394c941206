//! Error type for markup parsing and serialization.

use std::{io, str::Utf8Error};

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Errors produced while reading or writing markup.
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("XML syntax error at byte {offset}: {source}")]
    Syntax {
        offset: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Malformed attribute at byte {offset}: {source}")]
    Attribute {
        offset: u64,
        #[source]
        source: AttrError,
    },

    #[error("Unexpected closing tag at byte {offset}")]
    UnexpectedEnd { offset: u64 },

    #[error("Element `{name}` is never closed")]
    Unclosed { name: String, offset: u64 },

    #[error("Document has no root element")]
    NoRoot,

    #[error("Document has {count} root elements, expected one")]
    MultipleRoots { count: usize },

    #[error("Invalid UTF-8 in markup: {0}")]
    Utf8(#[from] Utf8Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl MarkupError {
    /// Byte offset into the source the error refers to, when known.
    pub fn offset(&self) -> Option<u64> {
        match self {
            Self::Syntax { offset, .. }
            | Self::Attribute { offset, .. }
            | Self::UnexpectedEnd { offset }
            | Self::Unclosed { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}
