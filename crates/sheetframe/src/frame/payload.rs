//! Payload reference construction inside `a:graphicData`.
//!
//! A frame hosts a payload from another package part by reference only: a
//! single namespace-qualified element carrying the relationship id, e.g.
//!
//! ```text
//! <c:chart xmlns:c="…/chart" xmlns:r="…/relationships" r:id="rId3"/>
//! ```
//!
//! The element is built structurally, so the relationship id is escaped like
//! any other attribute value.

use sheetframe_core::{namespace::Namespace, relationship::RelationshipId};
use sheetframe_markup::Element;

/// Appends the payload reference element to `graphic_data` and marks the
/// payload kind on the container's `uri` attribute.
pub(super) fn attach(
    graphic_data: &mut Element,
    element_name: &str,
    relationship_id: &RelationshipId,
    payload_namespace: Namespace<'_>,
    relationship_namespace: Namespace<'_>,
) {
    let reference = Element::new(payload_namespace.qualify(element_name))
        .with_attr(payload_namespace.declaration(), payload_namespace.uri())
        .with_attr(relationship_namespace.declaration(), relationship_namespace.uri())
        .with_attr(relationship_namespace.qualify("id"), relationship_id.as_str());

    graphic_data.set_attr("uri", payload_namespace.uri());
    graphic_data.push_element(reference);
}

/// Reads the relationship id back from the first reference element.
pub(super) fn relationship_id(graphic_data: &Element) -> Option<RelationshipId> {
    graphic_data.elements().find_map(|reference| {
        reference
            .attributes()
            .find(|(key, _)| {
                key.local() == "id"
                    && key.prefix().is_some_and(|prefix| {
                        reference.namespace_uri(prefix) == Some(Namespace::RELATIONSHIPS.uri())
                            || prefix == Namespace::RELATIONSHIPS.prefix()
                    })
            })
            .map(|(_, value)| RelationshipId::new(value))
    })
}
