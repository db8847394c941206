//! Package relationship identifiers.

use std::fmt;

/// An indirection key resolved by the package layer to locate another part.
///
/// Values are opaque: any string is accepted, including the empty string.
///
/// # Examples
///
/// ```
/// # use sheetframe_core::relationship::RelationshipId;
/// let id = RelationshipId::from_index(3);
/// assert_eq!(id, "rId3");
/// assert_eq!(id.index(), Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationshipId(String);

impl RelationshipId {
    /// Wraps a relationship id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates the conventional `rId<n>` identifier.
    pub fn from_index(index: u32) -> Self {
        Self(format!("rId{index}"))
    }

    /// Returns the numeric suffix of an `rId<n>` identifier, if it has that shape.
    pub fn index(&self) -> Option<u32> {
        self.0.strip_prefix("rId")?.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RelationshipId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RelationshipId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for RelationshipId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RelationshipId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RelationshipId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_of_conventional_id() {
        assert_eq!(RelationshipId::new("rId12").index(), Some(12));
    }

    #[test]
    fn test_index_of_custom_id() {
        assert_eq!(RelationshipId::new("chart7").index(), None);
        assert_eq!(RelationshipId::new("rIdx").index(), None);
    }

    #[test]
    fn test_empty_id_is_accepted() {
        let id = RelationshipId::new("");

        assert_eq!(id.as_str(), "");
        assert_eq!(id.to_string(), "");
    }
}
