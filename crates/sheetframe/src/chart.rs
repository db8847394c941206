//! Payload entities hosted by graphical-object frames.
//!
//! A payload lives in its own package part. The frame only stores the
//! relationship id pointing at it; the payload in turn remembers which frame
//! hosts it through a [`FrameHandle`].

use sheetframe_core::namespace::Namespace;

use crate::handle::{ChartHandle, FrameHandle};

/// Content that can be attached to a [`GraphicFrame`](crate::GraphicFrame).
pub trait PayloadEntity {
    /// Local name of the reference element written into `a:graphicData`.
    fn element_name(&self) -> &str;

    /// Namespace identifying the payload kind.
    ///
    /// Its URI also becomes the `uri` attribute of `a:graphicData`.
    fn payload_namespace(&self) -> Namespace<'_>;

    /// Namespace qualifying the relationship id attribute.
    fn relationship_namespace(&self) -> Namespace<'_> {
        Namespace::RELATIONSHIPS
    }

    /// Records the frame this payload is hosted by.
    fn register_owning_frame(&mut self, frame: FrameHandle);
}

/// A DrawingML chart payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    handle: ChartHandle,
    owning_frame: Option<FrameHandle>,
}

impl Chart {
    pub(crate) fn new(handle: ChartHandle) -> Self {
        Self {
            handle,
            owning_frame: None,
        }
    }

    pub fn handle(&self) -> ChartHandle {
        self.handle
    }

    /// The frame hosting this chart, once attached.
    pub fn owning_frame(&self) -> Option<FrameHandle> {
        self.owning_frame
    }
}

impl PayloadEntity for Chart {
    fn element_name(&self) -> &str {
        "chart"
    }

    fn payload_namespace(&self) -> Namespace<'_> {
        Namespace::CHART
    }

    fn register_owning_frame(&mut self, frame: FrameHandle) {
        self.owning_frame = Some(frame);
    }
}
