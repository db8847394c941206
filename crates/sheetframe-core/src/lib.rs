//! Sheetframe Core Types and Definitions
//!
//! This crate provides the foundational, markup-independent types used to
//! describe objects in a spreadsheet drawing part. It includes:
//!
//! - **Geometry**: EMU-based points, extents and transforms ([`geometry`] module)
//! - **Anchors**: Cell-relative positioning descriptors ([`anchor`] module)
//! - **Namespaces**: Prefix/URI pairs used by the drawing markup ([`namespace`] module)
//! - **Relationships**: Package relationship identifiers ([`relationship::RelationshipId`])

pub mod anchor;
pub mod geometry;
pub mod namespace;
pub mod relationship;
