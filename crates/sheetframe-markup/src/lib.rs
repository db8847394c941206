//! Markup tree layer for spreadsheet drawing parts.
//!
//! This crate provides a small, order-preserving element tree on top of
//! [`quick_xml`]. It is the layer typed drawing entities read from and write
//! through to, so it keeps exactly what was constructed or parsed:
//!
//! - Attribute order, including namespace declarations, survives a round trip.
//! - Prefixes are stored verbatim; no namespace resolution is performed.
//! - Childless elements serialize in self-closing form.
//!
//! # Example
//!
//! ```
//! use sheetframe_markup::Element;
//!
//! let mut data = Element::new("a:graphicData");
//! data.append_raw(r#"<c:chart xmlns:c="chart-ns" r:id="rId1"/>"#).unwrap();
//! data.set_attr("uri", "chart-ns");
//!
//! assert_eq!(
//!     data.to_xml().unwrap(),
//!     r#"<a:graphicData uri="chart-ns"><c:chart xmlns:c="chart-ns" r:id="rId1"/></a:graphicData>"#
//! );
//! ```

mod element;
mod error;
mod qname;
mod reader;
mod writer;

pub use element::{Element, Node};
pub use error::MarkupError;
pub use qname::QName;
pub use writer::WriteOptions;
