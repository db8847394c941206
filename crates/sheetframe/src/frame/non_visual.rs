//! Access to the non-visual properties node (`xdr:cNvPr`).
//!
//! The node is resolved from the frame on every call. Other collaborators may
//! restructure the tree between accesses, so no reference is ever kept.

use sheetframe_markup::Element;

use crate::{FrameError, frame::tag};

const PATH: &str = "xdr:nvGraphicFramePr/xdr:cNvPr";

/// Resolves `xdr:nvGraphicFramePr/xdr:cNvPr` under `frame`.
pub(super) fn resolve(frame: &Element) -> Result<&Element, FrameError> {
    frame
        .child(tag::NV_GRAPHIC_FRAME_PR)
        .ok_or(FrameError::MissingNode {
            path: tag::NV_GRAPHIC_FRAME_PR,
        })?
        .child(tag::C_NV_PR)
        .ok_or(FrameError::MissingNode { path: PATH })
}

/// Resolves `xdr:nvGraphicFramePr/xdr:cNvPr` under `frame`, mutably.
pub(super) fn resolve_mut(frame: &mut Element) -> Result<&mut Element, FrameError> {
    frame
        .child_mut(tag::NV_GRAPHIC_FRAME_PR)
        .ok_or(FrameError::MissingNode {
            path: tag::NV_GRAPHIC_FRAME_PR,
        })?
        .child_mut(tag::C_NV_PR)
        .ok_or(FrameError::MissingNode { path: PATH })
}

/// Builds the non-visual properties subtree. Only the prototype path creates it.
pub(super) fn create(frame: &mut Element, id: u32, name: &str) {
    let nv = frame.add_child(tag::NV_GRAPHIC_FRAME_PR);
    let props = nv.add_child(tag::C_NV_PR);
    props.set_attr("id", id.to_string());
    props.set_attr("name", name);
    nv.add_child(tag::C_NV_GRAPHIC_FRAME_PR);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_created_node() {
        let mut frame = Element::new(tag::GRAPHIC_FRAME);
        create(&mut frame, 5, "Frame");

        let props = resolve(&frame).unwrap();

        assert_eq!(props.attr("id"), Some("5"));
        assert_eq!(props.attr("name"), Some("Frame"));
    }

    #[test]
    fn test_missing_outer_node() {
        let frame = Element::new(tag::GRAPHIC_FRAME);

        let err = resolve(&frame).unwrap_err();

        assert!(matches!(
            err,
            FrameError::MissingNode {
                path: "xdr:nvGraphicFramePr"
            }
        ));
    }

    #[test]
    fn test_missing_inner_node() {
        let mut frame = Element::new(tag::GRAPHIC_FRAME);
        frame.add_child(tag::NV_GRAPHIC_FRAME_PR);

        let err = resolve_mut(&mut frame).unwrap_err();

        assert!(matches!(err, FrameError::MissingNode { path: PATH }));
    }

    #[test]
    fn test_resolve_sees_external_edits() {
        let mut frame = Element::new(tag::GRAPHIC_FRAME);
        create(&mut frame, 1, "Before");

        frame
            .child_mut(tag::NV_GRAPHIC_FRAME_PR)
            .unwrap()
            .remove_children(tag::C_NV_PR);

        assert!(resolve(&frame).is_err());
    }
}
