//! Cell-relative anchors for drawing objects.
//!
//! A [`ClientAnchor`] places a drawing object between two cell markers. The
//! drawing canvas owns anchors; frames only refer to them.

use serde::Deserialize;

/// A cell position plus an EMU offset inside that cell (`xdr:from` / `xdr:to`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct AnchorMarker {
    /// Zero-based column index.
    #[serde(default)]
    col: u32,

    /// Offset within the column, in EMU.
    #[serde(default)]
    col_off: i64,

    /// Zero-based row index.
    #[serde(default)]
    row: u32,

    /// Offset within the row, in EMU.
    #[serde(default)]
    row_off: i64,
}

impl AnchorMarker {
    /// Creates a marker at the top-left corner of a cell.
    pub fn new(col: u32, row: u32) -> Self {
        Self {
            col,
            row,
            ..Self::default()
        }
    }

    /// Sets the in-cell offsets (builder style).
    pub fn with_offsets(mut self, col_off: i64, row_off: i64) -> Self {
        self.col_off = col_off;
        self.row_off = row_off;
        self
    }

    pub fn col(&self) -> u32 {
        self.col
    }

    pub fn col_off(&self) -> i64 {
        self.col_off
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn row_off(&self) -> i64 {
        self.row_off
    }
}

/// A two-cell anchor spanning from one marker to another.
///
/// # Examples
///
/// ```
/// # use sheetframe_core::anchor::ClientAnchor;
/// let anchor = ClientAnchor::from_cells(0, 0, 8, 15);
/// assert_eq!(anchor.to().col(), 8);
/// assert_eq!(anchor.to().row(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct ClientAnchor {
    from: AnchorMarker,
    to: AnchorMarker,
}

impl ClientAnchor {
    /// Creates an anchor from two markers.
    pub fn new(from: AnchorMarker, to: AnchorMarker) -> Self {
        Self { from, to }
    }

    /// Creates an anchor spanning whole cells, with zero in-cell offsets.
    pub fn from_cells(col1: u32, row1: u32, col2: u32, row2: u32) -> Self {
        Self::new(AnchorMarker::new(col1, row1), AnchorMarker::new(col2, row2))
    }

    pub fn from(&self) -> AnchorMarker {
        self.from
    }

    pub fn to(&self) -> AnchorMarker {
        self.to
    }
}

impl Default for ClientAnchor {
    /// An eight columns by fifteen rows anchor at the top-left of the sheet.
    fn default() -> Self {
        Self::from_cells(0, 0, 8, 15)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_with_offsets() {
        let marker = AnchorMarker::new(2, 3).with_offsets(100, 200);

        assert_eq!(marker.col(), 2);
        assert_eq!(marker.row(), 3);
        assert_eq!(marker.col_off(), 100);
        assert_eq!(marker.row_off(), 200);
    }

    #[test]
    fn test_default_anchor_spans_cells() {
        let anchor = ClientAnchor::default();

        assert_eq!(anchor.from(), AnchorMarker::new(0, 0));
        assert_eq!(anchor.to(), AnchorMarker::new(8, 15));
    }
}
