//! A minimal drawing canvas.
//!
//! [`Drawing`] owns the anchors, frames and charts of one spreadsheet
//! drawing part in flat arenas. Entities refer to each other through
//! handles, which keeps frame/chart back-references non-owning.
//!
//! A loaded part keeps its root attributes and every node the canvas does
//! not model (pictures, shapes, other anchor kinds), and writes them back
//! in their original order.

use std::{collections::BTreeSet, str::FromStr};

use indexmap::IndexMap;
use log::{debug, trace};

use sheetframe_core::{
    anchor::{AnchorMarker, ClientAnchor},
    namespace::Namespace,
    relationship::RelationshipId,
};
use sheetframe_markup::{Element, Node};

use crate::{
    FrameError,
    chart::{Chart, PayloadEntity},
    config::AppConfig,
    frame::{GraphicFrame, tag as frame_tag},
    handle::{AnchorHandle, ChartHandle, FrameHandle},
    shape::Shape,
};

mod tag {
    pub const WS_DR: &str = "xdr:wsDr";
    pub const TWO_CELL_ANCHOR: &str = "xdr:twoCellAnchor";
    pub const FROM: &str = "xdr:from";
    pub const TO: &str = "xdr:to";
    pub const COL: &str = "xdr:col";
    pub const COL_OFF: &str = "xdr:colOff";
    pub const ROW: &str = "xdr:row";
    pub const ROW_OFF: &str = "xdr:rowOff";
    pub const CLIENT_DATA: &str = "xdr:clientData";
}

/// One top-level entry of the drawing part, in document order.
#[derive(Debug, Clone)]
enum Slot {
    /// A frame; `shell` is the anchor node it was loaded from, if any.
    Frame {
        frame: FrameHandle,
        shell: Option<Element>,
    },
    /// A node the canvas does not model, written back unchanged.
    Preserved(Node),
}

/// A spreadsheet drawing part holding graphical-object frames.
///
/// # Examples
///
/// ```
/// use sheetframe::{Drawing, anchor::ClientAnchor, config::AppConfig};
///
/// let mut drawing = Drawing::new(AppConfig::default());
/// let anchor = drawing.add_anchor(ClientAnchor::from_cells(1, 1, 6, 12));
/// drawing.create_chart(anchor).unwrap();
///
/// let xml = drawing.to_xml().unwrap();
/// let reloaded = Drawing::from_xml(AppConfig::default(), &xml).unwrap();
/// assert_eq!(reloaded.frames().count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Drawing {
    config: AppConfig,
    root: Option<Element>,
    layout: Vec<Slot>,
    anchors: Vec<ClientAnchor>,
    frames: Vec<GraphicFrame>,
    charts: Vec<Chart>,
    relationships: IndexMap<RelationshipId, ChartHandle>,
    reserved_relationships: BTreeSet<RelationshipId>,
    last_relationship: u32,
}

impl Drawing {
    /// Creates an empty drawing.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Loads a drawing from a serialized `xdr:wsDr` part.
    ///
    /// Every `xdr:graphicFrame` inside a two-cell anchor becomes a
    /// [`GraphicFrame`] view over its node, and chart references are
    /// registered as [`Chart`]s owned by their frame. All other content is
    /// kept as-is and written back by [`Drawing::to_xml`].
    ///
    /// # Errors
    ///
    /// Returns `Load` for malformed markup and `MissingNode` or
    /// `InvalidValue` for frame anchors that cannot be read.
    pub fn from_xml(config: AppConfig, source: &str) -> Result<Self, FrameError> {
        let root = Element::parse(source).map_err(|err| FrameError::new_load_error(err, source))?;
        if !root.name().matches(tag::WS_DR) {
            return Err(FrameError::MissingNode { path: tag::WS_DR });
        }

        let mut drawing = Self::new(config);
        drawing.root = Some(shell_of(&root));
        collect_relationship_ids(&root, &mut drawing.reserved_relationships);
        drawing.last_relationship = drawing
            .reserved_relationships
            .iter()
            .filter_map(RelationshipId::index)
            .max()
            .unwrap_or(0);

        for node in root.children() {
            let anchor_node = match node {
                Node::Element(element) if element.name().matches(tag::TWO_CELL_ANCHOR) => element,
                other => {
                    drawing.layout.push(Slot::Preserved(other.clone()));
                    continue;
                }
            };
            let Some(frame_node) = anchor_node.child(frame_tag::GRAPHIC_FRAME) else {
                trace!("Preserving anchor without a graphic frame");
                drawing.layout.push(Slot::Preserved(node.clone()));
                continue;
            };

            let anchor = ClientAnchor::new(
                read_marker(anchor_node, tag::FROM)?,
                read_marker(anchor_node, tag::TO)?,
            );
            let anchor = drawing.add_anchor(anchor);
            let handle = drawing.insert_frame(
                GraphicFrame::new(FrameHandle::new(drawing.frames.len()), frame_node.clone()),
                Some(anchor),
                Some(anchor_node.clone()),
            );
            drawing.register_loaded_payload(handle);
        }

        debug!(
            frames = drawing.frames.len(),
            charts = drawing.charts.len(),
            preserved = drawing.layout.len() - drawing.frames.len();
            "Loaded drawing"
        );
        Ok(drawing)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // =========================================================================
    // Anchors
    // =========================================================================

    /// Registers an anchor owned by this drawing.
    pub fn add_anchor(&mut self, anchor: ClientAnchor) -> AnchorHandle {
        self.anchors.push(anchor);
        AnchorHandle::new(self.anchors.len() - 1)
    }

    pub fn anchor(&self, handle: AnchorHandle) -> Option<&ClientAnchor> {
        self.anchors.get(handle.index())
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Creates a frame from the prototype and binds it to `anchor`.
    ///
    /// The frame gets the next free identity and a name built from the
    /// configured prefix, e.g. `Chart 1`.
    pub fn create_graphic_frame(&mut self, anchor: AnchorHandle) -> Result<FrameHandle, FrameError> {
        if self.anchor(anchor).is_none() {
            return Err(FrameError::UnknownHandle {
                kind: "anchor",
                index: anchor.index(),
            });
        }

        let id = self.next_shape_id();
        let mut frame = GraphicFrame::new(FrameHandle::new(self.frames.len()), GraphicFrame::prototype());
        frame.set_id(id)?;
        frame.set_name(format!("{} {id}", self.config.frame().name_prefix()))?;
        let handle = self.insert_frame(frame, Some(anchor), None);

        debug!(frame = handle.index(), id; "Created graphic frame");
        Ok(handle)
    }

    /// Wraps an existing frame node owned by this drawing.
    pub fn add_frame(&mut self, node: Element, anchor: Option<AnchorHandle>) -> FrameHandle {
        let frame = GraphicFrame::new(FrameHandle::new(self.frames.len()), node);
        self.insert_frame(frame, anchor, None)
    }

    pub fn frame(&self, handle: FrameHandle) -> Option<&GraphicFrame> {
        self.frames.get(handle.index())
    }

    pub fn frame_mut(&mut self, handle: FrameHandle) -> Option<&mut GraphicFrame> {
        self.frames.get_mut(handle.index())
    }

    pub fn frames(&self) -> impl Iterator<Item = &GraphicFrame> {
        self.frames.iter()
    }

    fn insert_frame(
        &mut self,
        mut frame: GraphicFrame,
        anchor: Option<AnchorHandle>,
        shell: Option<Element>,
    ) -> FrameHandle {
        let handle = frame.handle();
        if let Some(anchor) = anchor {
            frame.set_anchor(anchor);
        }
        self.frames.push(frame);
        self.layout.push(Slot::Frame {
            frame: handle,
            shell,
        });
        handle
    }

    // =========================================================================
    // Charts
    // =========================================================================

    /// Creates a frame hosting a new chart.
    ///
    /// The chart is referenced under the next free `rId<n>` relationship id.
    pub fn create_chart(
        &mut self,
        anchor: AnchorHandle,
    ) -> Result<(FrameHandle, ChartHandle), FrameError> {
        let relationship_id = self.next_relationship_id()?;
        let frame = self.create_graphic_frame(anchor)?;
        let chart = self.add_chart();
        self.attach_chart(frame, chart, relationship_id)?;
        Ok((frame, chart))
    }

    /// Creates an unattached chart.
    pub fn add_chart(&mut self) -> ChartHandle {
        let handle = ChartHandle::new(self.charts.len());
        self.charts.push(Chart::new(handle));
        handle
    }

    /// Attaches an existing chart to an existing frame.
    ///
    /// # Errors
    ///
    /// Returns `UnknownHandle` for stale handles, `PayloadAlreadyAttached` if
    /// either side is already attached and `RelationshipInUse` if another
    /// payload is already referenced under `relationship_id`. Nothing is
    /// changed on error.
    pub fn attach_chart(
        &mut self,
        frame: FrameHandle,
        chart: ChartHandle,
        relationship_id: RelationshipId,
    ) -> Result<(), FrameError> {
        if self.frames.get(frame.index()).is_none() {
            return Err(FrameError::UnknownHandle {
                kind: "frame",
                index: frame.index(),
            });
        }
        let Some(chart_entity) = self.charts.get(chart.index()) else {
            return Err(FrameError::UnknownHandle {
                kind: "chart",
                index: chart.index(),
            });
        };

        if chart_entity.owning_frame().is_some() {
            let existing = self
                .relationships
                .iter()
                .find(|(_, handle)| **handle == chart)
                .map(|(id, _)| id.to_string())
                .unwrap_or_default();
            return Err(FrameError::PayloadAlreadyAttached { existing });
        }
        if self.relationship_in_use(&relationship_id) {
            return Err(FrameError::RelationshipInUse {
                id: relationship_id.to_string(),
            });
        }

        let frame_entity = &mut self.frames[frame.index()];
        let chart_entity = &mut self.charts[chart.index()];
        frame_entity.attach_payload(chart_entity, &relationship_id)?;
        self.relationships.insert(relationship_id, chart);
        Ok(())
    }

    pub fn chart(&self, handle: ChartHandle) -> Option<&Chart> {
        self.charts.get(handle.index())
    }

    pub fn charts(&self) -> impl Iterator<Item = &Chart> {
        self.charts.iter()
    }

    /// Resolves a relationship id to the chart registered under it.
    pub fn chart_for(&self, relationship_id: &RelationshipId) -> Option<&Chart> {
        self.relationships
            .get(relationship_id)
            .and_then(|handle| self.chart(*handle))
    }

    /// Chart relationship ids of this drawing, loaded ones first, then in
    /// allocation order.
    pub fn relationships(&self) -> impl Iterator<Item = (&RelationshipId, ChartHandle)> {
        self.relationships.iter().map(|(id, handle)| (id, *handle))
    }

    /// Allocates the next unused `rId<n>` identifier.
    ///
    /// # Errors
    ///
    /// Returns `RelationshipIdsExhausted` once `rId4294967295` has been
    /// handed out or seen on load.
    pub fn next_relationship_id(&mut self) -> Result<RelationshipId, FrameError> {
        loop {
            self.last_relationship = self
                .last_relationship
                .checked_add(1)
                .ok_or(FrameError::RelationshipIdsExhausted)?;
            let id = RelationshipId::from_index(self.last_relationship);
            if !self.relationship_in_use(&id) {
                return Ok(id);
            }
        }
    }

    /// Returns true if a chart is registered under `id`, any frame
    /// references a payload by it or loaded content refers to it.
    fn relationship_in_use(&self, id: &RelationshipId) -> bool {
        self.relationships.contains_key(id)
            || self.reserved_relationships.contains(id)
            || self
                .frames
                .iter()
                .any(|frame| frame.relationship_id().ok().flatten().as_ref() == Some(id))
    }

    fn register_loaded_payload(&mut self, handle: FrameHandle) {
        let Some(frame) = self.frames.get(handle.index()) else {
            return;
        };
        let Some(relationship_id) = frame.relationship_id().ok().flatten() else {
            return;
        };
        let is_chart = payload_uri(frame) == Some(Namespace::CHART.uri());
        if !is_chart || self.relationships.contains_key(&relationship_id) {
            return;
        }

        let chart = self.add_chart();
        if let Some(entity) = self.charts.get_mut(chart.index()) {
            entity.register_owning_frame(handle);
        }
        trace!(frame = handle.index(), relationship_id = relationship_id.as_str(); "Registered loaded chart");
        self.relationships.insert(relationship_id, chart);
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Serializes the drawing as an `xdr:wsDr` part.
    ///
    /// Loaded frames are written back into their original anchor node with
    /// the current anchor and frame content. Frames never bound to an anchor
    /// use the configured default anchor.
    pub fn to_xml(&self) -> Result<String, FrameError> {
        let mut root = self
            .root
            .clone()
            .unwrap_or_else(|| Element::new(tag::WS_DR));
        for ns in [Namespace::SPREADSHEET_DRAWING, Namespace::DRAWINGML] {
            if root.namespace_uri(ns.prefix()).is_none() {
                root.declare_namespace(ns.prefix(), ns.uri());
            }
        }

        for slot in &self.layout {
            match slot {
                Slot::Preserved(node) => root.push_node(node.clone()),
                Slot::Frame { frame, shell } => {
                    let frame = self.frame(*frame).ok_or(FrameError::UnknownHandle {
                        kind: "frame",
                        index: frame.index(),
                    })?;
                    let anchor_node = self.anchor_node(frame, shell.as_ref())?;
                    root.push_element(anchor_node);
                }
            }
        }

        let xml = root.to_xml_with(&self.config.output().write_options())?;
        trace!(bytes = xml.len(); "Serialized drawing");
        Ok(xml)
    }

    fn anchor_node(
        &self,
        frame: &GraphicFrame,
        shell: Option<&Element>,
    ) -> Result<Element, FrameError> {
        let anchor = match frame.anchor() {
            Some(handle) => *self.anchor(handle).ok_or(FrameError::UnknownHandle {
                kind: "anchor",
                index: handle.index(),
            })?,
            None => self.config.frame().anchor(),
        };

        let node = match shell {
            Some(shell) => {
                let mut node = shell.clone();
                node.replace_child(tag::FROM, marker_element(tag::FROM, anchor.from()));
                node.replace_child(tag::TO, marker_element(tag::TO, anchor.to()));
                node.replace_child(frame_tag::GRAPHIC_FRAME, frame.node().clone());
                node
            }
            None => {
                let mut node = Element::new(tag::TWO_CELL_ANCHOR);
                node.push_element(marker_element(tag::FROM, anchor.from()));
                node.push_element(marker_element(tag::TO, anchor.to()));
                node.push_element(frame.node().clone());
                node.add_child(tag::CLIENT_DATA);
                node
            }
        };
        Ok(node)
    }

    fn next_shape_id(&self) -> i64 {
        self.frames
            .iter()
            .filter_map(|frame| frame.id().ok())
            .max()
            .map_or(1, |id| i64::from(id) + 1)
    }
}

/// The root element with its attributes but without children.
fn shell_of(root: &Element) -> Element {
    let mut shell = Element::new(root.name().clone());
    for (key, value) in root.attributes() {
        shell.set_attr(key.clone(), value);
    }
    shell
}

/// Collects every `r:*` attribute value (`r:id`, `r:embed`, `r:link`, ...)
/// in the subtree.
fn collect_relationship_ids(element: &Element, ids: &mut BTreeSet<RelationshipId>) {
    for (key, value) in element.attributes() {
        if key.prefix() == Some(Namespace::RELATIONSHIPS.prefix()) {
            ids.insert(RelationshipId::new(value));
        }
    }
    for child in element.elements() {
        collect_relationship_ids(child, ids);
    }
}

fn payload_uri(frame: &GraphicFrame) -> Option<&str> {
    frame
        .node()
        .child(frame_tag::GRAPHIC)?
        .child(frame_tag::GRAPHIC_DATA)?
        .attr("uri")
}

fn marker_element(name: &'static str, marker: AnchorMarker) -> Element {
    let mut element = Element::new(name);
    element.add_child(tag::COL).set_text(marker.col().to_string());
    element.add_child(tag::COL_OFF).set_text(marker.col_off().to_string());
    element.add_child(tag::ROW).set_text(marker.row().to_string());
    element.add_child(tag::ROW_OFF).set_text(marker.row_off().to_string());
    element
}

fn read_marker(anchor: &Element, name: &'static str) -> Result<AnchorMarker, FrameError> {
    let marker = anchor
        .child(name)
        .ok_or(FrameError::MissingNode { path: name })?;

    Ok(AnchorMarker::new(
        marker_value(marker, name, tag::COL)?,
        marker_value(marker, name, tag::ROW)?,
    )
    .with_offsets(
        marker_value(marker, name, tag::COL_OFF)?,
        marker_value(marker, name, tag::ROW_OFF)?,
    ))
}

fn marker_value<T: FromStr>(
    marker: &Element,
    marker_name: &'static str,
    field: &'static str,
) -> Result<T, FrameError> {
    let text = marker
        .child(field)
        .ok_or(FrameError::MissingNode { path: field })?
        .text();

    text.trim().parse().map_err(|_| FrameError::InvalidValue {
        location: format!("{marker_name}/{field}"),
        value: text.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawing_with_anchor() -> (Drawing, AnchorHandle) {
        let mut drawing = Drawing::new(AppConfig::default());
        let anchor = drawing.add_anchor(ClientAnchor::from_cells(0, 0, 5, 10));
        (drawing, anchor)
    }

    #[test]
    fn test_create_graphic_frame_assigns_identity_and_name() {
        let (mut drawing, anchor) = drawing_with_anchor();

        let first = drawing.create_graphic_frame(anchor).unwrap();
        let second = drawing.create_graphic_frame(anchor).unwrap();

        let first = drawing.frame(first).unwrap();
        let second = drawing.frame(second).unwrap();
        assert_eq!(first.id().unwrap(), 1);
        assert_eq!(first.name().unwrap(), "Chart 1");
        assert_eq!(second.id().unwrap(), 2);
        assert_eq!(second.name().unwrap(), "Chart 2");
        assert_eq!(first.anchor(), Some(anchor));
    }

    #[test]
    fn test_create_graphic_frame_rejects_unknown_anchor() {
        let mut drawing = Drawing::new(AppConfig::default());

        let err = drawing
            .create_graphic_frame(AnchorHandle::new(3))
            .unwrap_err();

        assert!(matches!(
            err,
            FrameError::UnknownHandle {
                kind: "anchor",
                index: 3
            }
        ));
    }

    #[test]
    fn test_create_chart_links_both_sides() {
        let (mut drawing, anchor) = drawing_with_anchor();

        let (frame, chart) = drawing.create_chart(anchor).unwrap();

        assert_eq!(drawing.chart(chart).unwrap().owning_frame(), Some(frame));
        let relationship_id = drawing.frame(frame).unwrap().relationship_id().unwrap();
        assert_eq!(relationship_id, Some(RelationshipId::new("rId1")));
        assert_eq!(
            drawing.chart_for(&RelationshipId::new("rId1")).map(Chart::handle),
            Some(chart)
        );
    }

    #[test]
    fn test_relationship_ids_increase() {
        let (mut drawing, anchor) = drawing_with_anchor();

        drawing.create_chart(anchor).unwrap();
        drawing.create_chart(anchor).unwrap();

        let ids: Vec<String> = drawing.relationships().map(|(id, _)| id.to_string()).collect();
        assert_eq!(ids, vec!["rId1", "rId2"]);
    }

    #[test]
    fn test_attach_chart_twice_fails() {
        let (mut drawing, anchor) = drawing_with_anchor();
        let (frame, _) = drawing.create_chart(anchor).unwrap();
        let other_chart = drawing.add_chart();

        let err = drawing
            .attach_chart(frame, other_chart, RelationshipId::new("rId9"))
            .unwrap_err();

        assert!(matches!(err, FrameError::PayloadAlreadyAttached { .. }));
        assert_eq!(drawing.chart(other_chart).unwrap().owning_frame(), None);
        assert!(drawing.chart_for(&RelationshipId::new("rId9")).is_none());
    }

    #[test]
    fn test_chart_cannot_be_hosted_twice() {
        let (mut drawing, anchor) = drawing_with_anchor();
        let (_, chart) = drawing.create_chart(anchor).unwrap();
        let empty_frame = drawing.create_graphic_frame(anchor).unwrap();

        let err = drawing
            .attach_chart(empty_frame, chart, RelationshipId::new("rId5"))
            .unwrap_err();

        match err {
            FrameError::PayloadAlreadyAttached { existing } => assert_eq!(existing, "rId1"),
            other => panic!("Expected PayloadAlreadyAttached, got {other:?}"),
        }
    }

    #[test]
    fn test_attach_chart_unknown_handles() {
        let (mut drawing, _) = drawing_with_anchor();
        let chart = drawing.add_chart();

        let err = drawing
            .attach_chart(FrameHandle::new(0), chart, RelationshipId::new("rId1"))
            .unwrap_err();

        assert!(matches!(err, FrameError::UnknownHandle { kind: "frame", .. }));
    }

    #[test]
    fn test_to_xml_structure() {
        let (mut drawing, anchor) = drawing_with_anchor();
        drawing.create_chart(anchor).unwrap();

        let xml = drawing.to_xml().unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"));
        assert!(xml.contains(concat!(
            r#"<xdr:from><xdr:col>0</xdr:col><xdr:colOff>0</xdr:colOff>"#,
            r#"<xdr:row>0</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from>"#
        )));
        assert!(xml.contains(r#"<xdr:to><xdr:col>5</xdr:col>"#));
        assert!(xml.contains(concat!(
            r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart">"#,
            r#"<c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
            r#"r:id="rId1"/></a:graphicData>"#
        )));
        assert!(xml.ends_with("<xdr:clientData/></xdr:twoCellAnchor></xdr:wsDr>"));
    }

    #[test]
    fn test_unanchored_frame_uses_default_anchor() {
        let mut drawing = Drawing::new(AppConfig::default());
        drawing.add_frame(GraphicFrame::prototype(), None);

        let xml = drawing.to_xml().unwrap();

        assert!(xml.contains(r#"<xdr:to><xdr:col>8</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>15</xdr:row>"#));
    }

    #[test]
    fn test_load_round_trip() {
        let (mut drawing, anchor) = drawing_with_anchor();
        let (frame, _) = drawing.create_chart(anchor).unwrap();
        drawing.frame_mut(frame).unwrap().set_name("Revenue").unwrap();
        let xml = drawing.to_xml().unwrap();

        let loaded = Drawing::from_xml(AppConfig::default(), &xml).unwrap();

        let loaded_frame = loaded.frames().next().unwrap();
        assert_eq!(loaded_frame.name().unwrap(), "Revenue");
        assert_eq!(loaded_frame.id().unwrap(), 1);
        assert_eq!(
            loaded.anchor(loaded_frame.anchor().unwrap()),
            Some(&ClientAnchor::from_cells(0, 0, 5, 10))
        );
        assert_eq!(loaded.to_xml().unwrap(), xml);
    }

    #[test]
    fn test_load_continues_relationship_numbering() {
        let (mut drawing, anchor) = drawing_with_anchor();
        drawing.create_chart(anchor).unwrap();
        drawing.create_chart(anchor).unwrap();
        let xml = drawing.to_xml().unwrap();

        let mut loaded = Drawing::from_xml(AppConfig::default(), &xml).unwrap();

        assert_eq!(
            loaded.next_relationship_id().unwrap(),
            RelationshipId::new("rId3")
        );
    }

    #[test]
    fn test_load_then_create_uses_next_identity() {
        let (mut drawing, anchor) = drawing_with_anchor();
        drawing.create_chart(anchor).unwrap();
        let xml = drawing.to_xml().unwrap();
        let mut loaded = Drawing::from_xml(AppConfig::default(), &xml).unwrap();
        let anchor = loaded.add_anchor(ClientAnchor::default());

        let (frame, _) = loaded.create_chart(anchor).unwrap();

        let frame = loaded.frame(frame).unwrap();
        assert_eq!(frame.id().unwrap(), 2);
        assert_eq!(
            frame.relationship_id().unwrap(),
            Some(RelationshipId::new("rId2"))
        );
    }

    #[test]
    fn test_load_rejects_wrong_root() {
        let err = Drawing::from_xml(AppConfig::default(), "<worksheet/>").unwrap_err();

        assert!(matches!(err, FrameError::MissingNode { path: "xdr:wsDr" }));
    }

    #[test]
    fn test_load_reports_malformed_markup_with_source() {
        let source = "<xdr:wsDr><xdr:twoCellAnchor></xdr:wsDr>";

        let err = Drawing::from_xml(AppConfig::default(), source).unwrap_err();

        match err {
            FrameError::Load { src, .. } => assert_eq!(src, source),
            other => panic!("Expected Load, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_bad_marker() {
        let source = concat!(
            r#"<xdr:wsDr><xdr:twoCellAnchor>"#,
            r#"<xdr:from><xdr:col>x</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>0</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from>"#,
            r#"<xdr:graphicFrame/>"#,
            r#"</xdr:twoCellAnchor></xdr:wsDr>"#
        );

        let err = Drawing::from_xml(AppConfig::default(), source).unwrap_err();

        match err {
            FrameError::InvalidValue { location, value } => {
                assert_eq!(location, "xdr:from/xdr:col");
                assert_eq!(value, "x");
            }
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_loaded_malformed_frame_reports_missing_node() {
        let source = concat!(
            r#"<xdr:wsDr><xdr:twoCellAnchor>"#,
            r#"<xdr:from><xdr:col>0</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>0</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from>"#,
            r#"<xdr:to><xdr:col>1</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>1</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:to>"#,
            r#"<xdr:graphicFrame/><xdr:clientData/>"#,
            r#"</xdr:twoCellAnchor></xdr:wsDr>"#
        );

        let drawing = Drawing::from_xml(AppConfig::default(), source).unwrap();

        let frame = drawing.frames().next().unwrap();
        assert!(matches!(frame.name(), Err(FrameError::MissingNode { .. })));
    }

    const MIXED_PART: &str = concat!(
        r#"<xdr:wsDr xmlns:xdr="http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing" "#,
        r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        r#"<xdr:twoCellAnchor editAs="oneCell">"#,
        r#"<xdr:from><xdr:col>0</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>0</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from>"#,
        r#"<xdr:to><xdr:col>2</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>4</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:to>"#,
        r#"<xdr:pic><xdr:nvPicPr><xdr:cNvPr id="1" name="Picture 1"/><xdr:cNvPicPr/></xdr:nvPicPr>"#,
        r#"<xdr:blipFill><a:blip r:embed="rId7"/></xdr:blipFill><xdr:spPr/></xdr:pic>"#,
        r#"<xdr:clientData/></xdr:twoCellAnchor>"#,
        r#"<xdr:twoCellAnchor editAs="absolute">"#,
        r#"<xdr:from><xdr:col>3</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>0</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from>"#,
        r#"<xdr:to><xdr:col>9</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>12</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:to>"#,
        r#"<xdr:graphicFrame macro=""><xdr:nvGraphicFramePr><xdr:cNvPr id="2" name="Chart 2"/>"#,
        r#"<xdr:cNvGraphicFramePr/></xdr:nvGraphicFramePr>"#,
        r#"<xdr:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/></xdr:xfrm>"#,
        r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart">"#,
        r#"<c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" r:id="rId1"/>"#,
        r#"</a:graphicData></a:graphic></xdr:graphicFrame>"#,
        r#"<xdr:clientData fLocksWithSheet="0"/></xdr:twoCellAnchor>"#,
        r#"</xdr:wsDr>"#
    );

    fn part_with_relationship(relationship_id: &str) -> String {
        format!(
            concat!(
                r#"<xdr:wsDr xmlns:xdr="http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing" "#,
                r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><xdr:twoCellAnchor>"#,
                r#"<xdr:from><xdr:col>0</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>0</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from>"#,
                r#"<xdr:to><xdr:col>1</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>1</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:to>"#,
                r#"<xdr:graphicFrame macro=""><xdr:nvGraphicFramePr><xdr:cNvPr id="1" name="Chart 1"/>"#,
                r#"<xdr:cNvGraphicFramePr/></xdr:nvGraphicFramePr>"#,
                r#"<xdr:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/></xdr:xfrm>"#,
                r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart">"#,
                r#"<c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" "#,
                r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" r:id="{}"/>"#,
                r#"</a:graphicData></a:graphic></xdr:graphicFrame><xdr:clientData/></xdr:twoCellAnchor></xdr:wsDr>"#
            ),
            relationship_id
        )
    }

    #[test]
    fn test_attach_chart_rejects_relationship_in_use() {
        let (mut drawing, anchor) = drawing_with_anchor();
        let (first_frame, first_chart) = drawing.create_chart(anchor).unwrap();
        let second_frame = drawing.create_graphic_frame(anchor).unwrap();
        let second_chart = drawing.add_chart();

        let err = drawing
            .attach_chart(second_frame, second_chart, RelationshipId::new("rId1"))
            .unwrap_err();

        match err {
            FrameError::RelationshipInUse { id } => assert_eq!(id, "rId1"),
            other => panic!("Expected RelationshipInUse, got {other:?}"),
        }
        assert_eq!(drawing.relationships().count(), 1);
        assert_eq!(
            drawing.chart_for(&RelationshipId::new("rId1")).map(Chart::handle),
            Some(first_chart)
        );
        assert_eq!(drawing.chart(first_chart).unwrap().owning_frame(), Some(first_frame));
        assert_eq!(drawing.chart(second_chart).unwrap().owning_frame(), None);
        assert_eq!(drawing.frame(second_frame).unwrap().relationship_id().unwrap(), None);
    }

    #[test]
    fn test_loaded_charts_are_registered() {
        let mut drawing = Drawing::from_xml(AppConfig::default(), &part_with_relationship("rId4")).unwrap();

        let loaded = drawing.chart_for(&RelationshipId::new("rId4")).unwrap();
        let frame = drawing.frames().next().unwrap().handle();
        assert_eq!(loaded.owning_frame(), Some(frame));

        let anchor = drawing.add_anchor(ClientAnchor::default());
        let new_frame = drawing.create_graphic_frame(anchor).unwrap();
        let chart = drawing.add_chart();
        let err = drawing
            .attach_chart(new_frame, chart, RelationshipId::new("rId4"))
            .unwrap_err();

        assert!(matches!(err, FrameError::RelationshipInUse { .. }));
    }

    #[test]
    fn test_relationship_allocation_skips_foreign_payloads() {
        let source = part_with_relationship("rId2").replace(
            "http://schemas.openxmlformats.org/drawingml/2006/chart\">",
            "http://example.com/diagram\">",
        );
        let mut drawing = Drawing::from_xml(AppConfig::default(), &source).unwrap();
        assert_eq!(drawing.charts().count(), 0);
        drawing.last_relationship = 0;

        assert_eq!(drawing.next_relationship_id().unwrap(), RelationshipId::new("rId1"));
        assert_eq!(drawing.next_relationship_id().unwrap(), RelationshipId::new("rId3"));
    }

    #[test]
    fn test_relationship_ids_exhausted() {
        let mut drawing =
            Drawing::from_xml(AppConfig::default(), &part_with_relationship("rId4294967295")).unwrap();
        let anchor = drawing.add_anchor(ClientAnchor::default());

        let err = drawing.create_chart(anchor).unwrap_err();

        assert!(matches!(err, FrameError::RelationshipIdsExhausted));
        assert_eq!(drawing.frames().count(), 1);
        assert_eq!(drawing.charts().count(), 1);
    }

    #[test]
    fn test_unmodelled_content_survives_round_trip() {
        let drawing = Drawing::from_xml(AppConfig::default(), MIXED_PART).unwrap();

        let xml = drawing.to_xml().unwrap();

        assert_eq!(drawing.frames().count(), 1);
        assert!(xml.contains(r#"<xdr:twoCellAnchor editAs="oneCell">"#));
        assert!(xml.contains(r#"<a:blip r:embed="rId7"/>"#));
        assert!(xml.contains(r#"<xdr:pic><xdr:nvPicPr><xdr:cNvPr id="1" name="Picture 1"/>"#));
        assert!(xml.contains(r#"<xdr:twoCellAnchor editAs="absolute">"#));
        assert!(xml.contains(r#"<xdr:clientData fLocksWithSheet="0"/>"#));
        assert!(xml.contains(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#
        ));
        let reloaded = Drawing::from_xml(AppConfig::default(), &xml).unwrap();
        assert_eq!(reloaded.to_xml().unwrap(), xml);
    }

    #[test]
    fn test_new_frames_follow_loaded_content() {
        let mut drawing = Drawing::from_xml(AppConfig::default(), MIXED_PART).unwrap();
        let anchor = drawing.add_anchor(ClientAnchor::default());

        let (frame, _) = drawing.create_chart(anchor).unwrap();
        let xml = drawing.to_xml().unwrap();

        assert_eq!(drawing.frame(frame).unwrap().id().unwrap(), 3);
        assert_eq!(
            drawing.frame(frame).unwrap().relationship_id().unwrap(),
            Some(RelationshipId::new("rId8"))
        );
        let picture = xml.find("<xdr:pic>").unwrap();
        let loaded_chart = xml.find(r#"name="Chart 2""#).unwrap();
        let new_chart = xml.find(r#"name="Chart 3""#).unwrap();
        assert!(picture < loaded_chart && loaded_chart < new_chart);
        assert!(xml.contains(r#"r:id="rId8""#));
    }

    #[test]
    fn test_loaded_frame_edits_are_written_into_original_anchor() {
        let mut drawing = Drawing::from_xml(AppConfig::default(), MIXED_PART).unwrap();
        let handle = drawing.frames().next().unwrap().handle();

        drawing.frame_mut(handle).unwrap().set_name("Renamed").unwrap();
        let xml = drawing.to_xml().unwrap();

        assert!(xml.contains(
            r#"<xdr:twoCellAnchor editAs="absolute"><xdr:from><xdr:col>3</xdr:col>"#
        ));
        assert!(xml.contains(r#"<xdr:cNvPr id="2" name="Renamed"/>"#));
        assert!(!xml.contains(r#"name="Chart 2""#));
    }
}
