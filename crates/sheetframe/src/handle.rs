//! Non-owning handles into a [`Drawing`](crate::Drawing).
//!
//! Frames and payloads refer to each other through these indices rather than
//! through pointers, so the frame/payload back-references never form an
//! ownership cycle.

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(usize);

        impl $name {
            pub(crate) fn new(index: usize) -> Self {
                Self(index)
            }

            /// Position of the entity in its owning drawing.
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

define_handle!(
    /// Refers to a [`ClientAnchor`](crate::anchor::ClientAnchor) owned by a drawing.
    AnchorHandle
);

define_handle!(
    /// Refers to a [`GraphicFrame`](crate::GraphicFrame) owned by a drawing.
    FrameHandle
);

define_handle!(
    /// Refers to a [`Chart`](crate::Chart) owned by a drawing.
    ChartHandle
);
