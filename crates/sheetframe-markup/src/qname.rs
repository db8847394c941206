//! Prefix-qualified element and attribute names.

use std::fmt;

/// A qualified name: an optional prefix and a local part.
///
/// Names are stored exactly as written; `c:chart` keeps the `c` prefix
/// regardless of which URI it is bound to.
///
/// # Examples
///
/// ```
/// # use sheetframe_markup::QName;
/// let name = QName::from("r:id");
/// assert_eq!(name.prefix(), Some("r"));
/// assert_eq!(name.local(), "id");
/// assert_eq!(name.to_string(), "r:id");
/// assert!(name.matches("r:id"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    prefix: Option<String>,
    local: String,
}

impl QName {
    /// Creates a name from an explicit prefix and local part.
    pub fn new(prefix: Option<&str>, local: impl Into<String>) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
            local: local.into(),
        }
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    /// Returns true if this name is written as `qualified`.
    pub fn matches(&self, qualified: &str) -> bool {
        match (self.prefix.as_deref(), qualified.split_once(':')) {
            (Some(prefix), Some((other_prefix, local))) => {
                prefix == other_prefix && self.local == local
            }
            (None, None) => self.local == qualified,
            _ => false,
        }
    }

    /// Returns true for `xmlns` and `xmlns:*` attribute names.
    pub fn is_namespace_declaration(&self) -> bool {
        match self.prefix.as_deref() {
            Some(prefix) => prefix == "xmlns",
            None => self.local == "xmlns",
        }
    }
}

impl From<&str> for QName {
    fn from(qualified: &str) -> Self {
        match qualified.split_once(':') {
            Some((prefix, local)) => Self::new(Some(prefix), local),
            None => Self::new(None, qualified),
        }
    }
}

impl From<String> for QName {
    fn from(qualified: String) -> Self {
        Self::from(qualified.as_str())
    }
}

impl From<&QName> for QName {
    fn from(name: &QName) -> Self {
        name.clone()
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{prefix}:{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}
