//! Sheetframe - typed graphical-object frames for spreadsheet drawings.
//!
//! A graphical-object frame (`xdr:graphicFrame`) hosts non-native content
//! such as charts inside a worksheet drawing. This crate exposes the frame as
//! a typed entity over its markup node: every read and write goes straight to
//! the tree that is later serialized into the package, so the typed view and
//! the markup never diverge.
//!
//! # Overview
//!
//! - [`GraphicFrame`] - the typed frame facade
//! - [`Chart`] / [`PayloadEntity`] - payloads a frame can host by relationship id
//! - [`Drawing`] - a minimal canvas owning anchors, frames and charts
//! - [`Shape`] - behaviour shared by drawing entities
//!
//! # Example
//!
//! ```
//! use sheetframe::{Drawing, anchor::ClientAnchor, config::AppConfig};
//!
//! let mut drawing = Drawing::new(AppConfig::default());
//! let anchor = drawing.add_anchor(ClientAnchor::from_cells(0, 0, 8, 15));
//! let (frame, chart) = drawing.create_chart(anchor).expect("Failed to create chart");
//!
//! let frame = drawing.frame(frame).unwrap();
//! assert_eq!(frame.name().unwrap(), "Chart 1");
//! assert_eq!(drawing.chart(chart).unwrap().owning_frame(), Some(frame.handle()));
//!
//! let xml = drawing.to_xml().expect("Failed to serialize drawing");
//! assert!(xml.contains(r#"r:id="rId1""#));
//! ```
//!
//! # Threading
//!
//! Nothing here synchronizes. A drawing and its frames are meant to be edited
//! by a single session at a time.

pub mod config;

mod chart;
mod drawing;
mod error;
mod frame;
mod handle;
mod shape;

pub use sheetframe_core::{anchor, geometry, namespace, relationship};
pub use sheetframe_markup as markup;

pub use chart::{Chart, PayloadEntity};
pub use drawing::Drawing;
pub use error::FrameError;
pub use frame::{DEFAULT_FRAME_NAME, GraphicFrame};
pub use handle::{AnchorHandle, ChartHandle, FrameHandle};
pub use shape::Shape;
