//! XML namespaces used by spreadsheet drawing parts.
//!
//! A [`Namespace`] pairs the conventional prefix with the namespace URI. The
//! prefixes are the ones Office writes, so serialized output matches what
//! other producers expect byte for byte.

/// A namespace prefix bound to a URI.
///
/// # Examples
///
/// ```
/// # use sheetframe_core::namespace::Namespace;
/// let ns = Namespace::new("c", "chart-ns");
/// assert_eq!(ns.qualify("chart"), "c:chart");
/// assert_eq!(ns.declaration(), "xmlns:c");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Namespace<'a> {
    prefix: &'a str,
    uri: &'a str,
}

impl Namespace<'static> {
    /// SpreadsheetML drawing (`xdr`).
    pub const SPREADSHEET_DRAWING: Namespace<'static> = Namespace::new(
        "xdr",
        "http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing",
    );

    /// DrawingML main (`a`).
    pub const DRAWINGML: Namespace<'static> =
        Namespace::new("a", "http://schemas.openxmlformats.org/drawingml/2006/main");

    /// DrawingML chart (`c`).
    pub const CHART: Namespace<'static> =
        Namespace::new("c", "http://schemas.openxmlformats.org/drawingml/2006/chart");

    /// Office document relationships (`r`).
    pub const RELATIONSHIPS: Namespace<'static> = Namespace::new(
        "r",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships",
    );
}

impl<'a> Namespace<'a> {
    /// Creates a namespace from a prefix and a URI.
    pub const fn new(prefix: &'a str, uri: &'a str) -> Self {
        Self { prefix, uri }
    }

    pub fn prefix(&self) -> &'a str {
        self.prefix
    }

    pub fn uri(&self) -> &'a str {
        self.uri
    }

    /// Returns `prefix:local`.
    pub fn qualify(&self, local: &str) -> String {
        format!("{}:{}", self.prefix, local)
    }

    /// Returns the attribute name declaring this namespace (`xmlns:prefix`).
    pub fn declaration(&self) -> String {
        format!("xmlns:{}", self.prefix)
    }
}
