//! Behaviour shared by drawing entities.

use sheetframe_markup::Element;

use crate::handle::AnchorHandle;

/// A trait for entities placed on a drawing canvas.
pub trait Shape {
    /// The anchor this entity is attached to, if the canvas assigned one.
    fn anchor(&self) -> Option<AnchorHandle>;

    /// The shape-properties node (fill, line, effects) of this entity.
    ///
    /// Entity kinds without an independent shape-style node return `None`;
    /// callers applying shape-level styling must handle that case.
    fn shape_properties(&self) -> Option<&Element> {
        None
    }
}
