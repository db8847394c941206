//! The graphical-object frame entity.
//!
//! [`GraphicFrame`] is a typed view over one `xdr:graphicFrame` node. It
//! holds no field state of its own apart from the canvas bookkeeping
//! (handle and anchor); identity, name, macro, transform and the payload
//! reference are all read from and written to the node on every call.

mod non_visual;
mod payload;

use std::sync::OnceLock;

use log::debug;

use sheetframe_core::{
    geometry::{Point2D, PositiveSize2D, Transform2D},
    relationship::RelationshipId,
};
use sheetframe_markup::Element;

use crate::{
    FrameError,
    chart::PayloadEntity,
    handle::{AnchorHandle, FrameHandle},
    shape::Shape,
};

/// Qualified element names used inside a frame.
pub(crate) mod tag {
    pub const GRAPHIC_FRAME: &str = "xdr:graphicFrame";
    pub const NV_GRAPHIC_FRAME_PR: &str = "xdr:nvGraphicFramePr";
    pub const C_NV_PR: &str = "xdr:cNvPr";
    pub const C_NV_GRAPHIC_FRAME_PR: &str = "xdr:cNvGraphicFramePr";
    pub const XFRM: &str = "xdr:xfrm";
    pub const OFF: &str = "a:off";
    pub const EXT: &str = "a:ext";
    pub const GRAPHIC: &str = "a:graphic";
    pub const GRAPHIC_DATA: &str = "a:graphicData";
}

/// Name given to frames built by [`GraphicFrame::prototype`].
pub const DEFAULT_FRAME_NAME: &str = "Diagram 1";

static PROTOTYPE: OnceLock<Element> = OnceLock::new();

/// A graphical-object frame hosting a non-native payload such as a chart.
///
/// # Examples
///
/// ```
/// use sheetframe::{Drawing, anchor::ClientAnchor, config::AppConfig};
///
/// let mut drawing = Drawing::new(AppConfig::default());
/// let anchor = drawing.add_anchor(ClientAnchor::default());
/// let handle = drawing.create_graphic_frame(anchor).unwrap();
///
/// let frame = drawing.frame_mut(handle).unwrap();
/// frame.set_name("Sales Chart").unwrap();
/// frame.set_id(7).unwrap();
///
/// assert_eq!(frame.name().unwrap(), "Sales Chart");
/// assert_eq!(frame.id().unwrap(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct GraphicFrame {
    handle: FrameHandle,
    node: Element,
    anchor: Option<AnchorHandle>,
}

impl GraphicFrame {
    /// Wraps an existing `xdr:graphicFrame` node.
    ///
    /// Nothing is validated here; accessors report missing structure when
    /// they are called.
    pub fn new(handle: FrameHandle, node: Element) -> Self {
        Self {
            handle,
            node,
            anchor: None,
        }
    }

    /// Builds a minimal valid frame tree.
    ///
    /// The tree has identity `0`, name [`DEFAULT_FRAME_NAME`], an empty
    /// `xdr:cNvGraphicFramePr`, a zero transform and an empty `a:graphic`.
    /// Every call returns an independent copy.
    pub fn prototype() -> Element {
        PROTOTYPE.get_or_init(build_prototype).clone()
    }

    pub fn handle(&self) -> FrameHandle {
        self.handle
    }

    /// The underlying node.
    pub fn node(&self) -> &Element {
        &self.node
    }

    /// The underlying node, for collaborators editing the tree directly.
    pub fn node_mut(&mut self) -> &mut Element {
        &mut self.node
    }

    pub fn into_node(self) -> Element {
        self.node
    }

    // =========================================================================
    // Identity and naming
    // =========================================================================

    /// Returns the frame name.
    ///
    /// # Errors
    ///
    /// Returns `MissingNode` if the non-visual properties are absent.
    pub fn name(&self) -> Result<&str, FrameError> {
        non_visual::resolve(&self.node)?
            .attr("name")
            .ok_or(FrameError::MissingAttribute {
                element: tag::C_NV_PR,
                attribute: "name",
            })
    }

    /// Sets the frame name.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FrameError> {
        non_visual::resolve_mut(&mut self.node)?.set_attr("name", name);
        Ok(())
    }

    /// Returns the frame identity.
    pub fn id(&self) -> Result<u32, FrameError> {
        let value = non_visual::resolve(&self.node)?
            .attr("id")
            .ok_or(FrameError::MissingAttribute {
                element: tag::C_NV_PR,
                attribute: "id",
            })?;

        value.parse().map_err(|_| FrameError::InvalidValue {
            location: format!("{}@id", tag::C_NV_PR),
            value: value.to_string(),
        })
    }

    /// Sets the frame identity.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentity` if `id` does not fit an unsigned 32-bit
    /// integer; the tree is left unchanged.
    pub fn set_id(&mut self, id: i64) -> Result<(), FrameError> {
        let id = u32::try_from(id).map_err(|_| FrameError::InvalidIdentity(id))?;
        non_visual::resolve_mut(&mut self.node)?.set_attr("id", id.to_string());
        Ok(())
    }

    /// Sets the macro bound to the frame. The value is not validated.
    pub fn set_macro(&mut self, value: impl Into<String>) {
        self.node.set_attr("macro", value);
    }

    // =========================================================================
    // Anchor and geometry
    // =========================================================================

    /// Binds the frame to an anchor owned by the canvas.
    pub fn set_anchor(&mut self, anchor: AnchorHandle) {
        self.anchor = Some(anchor);
    }

    /// Returns the `xdr:xfrm` offset and extent.
    pub fn transform(&self) -> Result<Transform2D, FrameError> {
        let xfrm = self
            .node
            .child(tag::XFRM)
            .ok_or(FrameError::MissingNode { path: tag::XFRM })?;
        let off = xfrm.child(tag::OFF).ok_or(FrameError::MissingNode {
            path: "xdr:xfrm/a:off",
        })?;
        let ext = xfrm.child(tag::EXT).ok_or(FrameError::MissingNode {
            path: "xdr:xfrm/a:ext",
        })?;

        Ok(Transform2D::new(
            Point2D::new(coordinate(off, tag::OFF, "x")?, coordinate(off, tag::OFF, "y")?),
            PositiveSize2D::new(
                coordinate(ext, tag::EXT, "cx")?,
                coordinate(ext, tag::EXT, "cy")?,
            ),
        ))
    }

    /// Writes the `xdr:xfrm` offset and extent.
    pub fn set_transform(&mut self, transform: Transform2D) -> Result<(), FrameError> {
        let xfrm = self
            .node
            .child_mut(tag::XFRM)
            .ok_or(FrameError::MissingNode { path: tag::XFRM })?;

        let off = xfrm.child_mut(tag::OFF).ok_or(FrameError::MissingNode {
            path: "xdr:xfrm/a:off",
        })?;
        off.set_attr("x", transform.offset().x().to_string());
        off.set_attr("y", transform.offset().y().to_string());

        let ext = xfrm.child_mut(tag::EXT).ok_or(FrameError::MissingNode {
            path: "xdr:xfrm/a:ext",
        })?;
        ext.set_attr("cx", transform.extent().cx().to_string());
        ext.set_attr("cy", transform.extent().cy().to_string());

        Ok(())
    }

    // =========================================================================
    // Payload
    // =========================================================================

    /// Returns the relationship id of the attached payload, if any.
    pub fn relationship_id(&self) -> Result<Option<RelationshipId>, FrameError> {
        let graphic = self
            .node
            .child(tag::GRAPHIC)
            .ok_or(FrameError::MissingNode { path: tag::GRAPHIC })?;

        Ok(graphic.child(tag::GRAPHIC_DATA).and_then(payload::relationship_id))
    }

    /// Attaches `payload` by reference and registers this frame as its owner.
    ///
    /// # Errors
    ///
    /// Returns `MissingNode` if `a:graphic` is absent and
    /// `PayloadAlreadyAttached` if the frame already hosts content.
    pub(crate) fn attach_payload<P: PayloadEntity>(
        &mut self,
        payload: &mut P,
        relationship_id: &RelationshipId,
    ) -> Result<(), FrameError> {
        let graphic = self
            .node
            .child_mut(tag::GRAPHIC)
            .ok_or(FrameError::MissingNode { path: tag::GRAPHIC })?;

        if let Some(data) = graphic.child(tag::GRAPHIC_DATA) {
            if data.elements().next().is_some() {
                let existing = payload::relationship_id(data)
                    .map(|id| id.to_string())
                    .unwrap_or_default();
                return Err(FrameError::PayloadAlreadyAttached { existing });
            }
        }
        graphic.remove_children(tag::GRAPHIC_DATA);

        payload::attach(
            graphic.add_child(tag::GRAPHIC_DATA),
            payload.element_name(),
            relationship_id,
            payload.payload_namespace(),
            payload.relationship_namespace(),
        );
        payload.register_owning_frame(self.handle);

        debug!(
            frame = self.handle.index(),
            relationship_id = relationship_id.as_str();
            "Attached payload to graphic frame"
        );

        Ok(())
    }
}

impl Shape for GraphicFrame {
    fn anchor(&self) -> Option<AnchorHandle> {
        self.anchor
    }

    /// Frames have no shape-properties node.
    fn shape_properties(&self) -> Option<&Element> {
        None
    }
}

fn build_prototype() -> Element {
    let mut frame = Element::new(tag::GRAPHIC_FRAME).with_attr("macro", "");

    non_visual::create(&mut frame, 0, DEFAULT_FRAME_NAME);

    let xfrm = frame.add_child(tag::XFRM);
    xfrm.push_element(Element::new(tag::OFF).with_attr("x", "0").with_attr("y", "0"));
    xfrm.push_element(Element::new(tag::EXT).with_attr("cx", "0").with_attr("cy", "0"));

    frame.add_child(tag::GRAPHIC);

    frame
}

fn coordinate(
    element: &Element,
    name: &'static str,
    attribute: &'static str,
) -> Result<i64, FrameError> {
    let value = element.attr(attribute).ok_or(FrameError::MissingAttribute {
        element: name,
        attribute,
    })?;

    value.parse().map_err(|_| FrameError::InvalidValue {
        location: format!("{name}@{attribute}"),
        value: value.to_string(),
    })
}
