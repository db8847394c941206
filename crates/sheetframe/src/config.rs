//! Configuration types for drawing construction and output.
//!
//! All types implement [`serde::Deserialize`] with every field defaulted, so
//! a partial (or empty) configuration source is always valid.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining frame and output settings.
//! - [`FrameConfig`] - Naming and placement defaults for new frames.
//! - [`OutputConfig`] - How drawing parts are serialized.
//!
//! # Example
//!
//! ```
//! # use sheetframe::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.frame().name_prefix(), "Chart");
//! assert!(config.output().xml_declaration());
//! ```

use serde::Deserialize;

use sheetframe_core::anchor::ClientAnchor;
use sheetframe_markup::WriteOptions;

/// Top-level configuration combining frame and output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Frame configuration section.
    #[serde(default)]
    frame: FrameConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(frame: FrameConfig, output: OutputConfig) -> Self {
        Self { frame, output }
    }

    /// Returns the frame configuration.
    pub fn frame(&self) -> &FrameConfig {
        &self.frame
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Defaults applied to frames created by a [`Drawing`](crate::Drawing).
#[derive(Debug, Clone, Deserialize)]
pub struct FrameConfig {
    /// Prefix of generated frame names; the frame identity is appended.
    #[serde(default = "default_name_prefix")]
    name_prefix: String,

    /// Anchor used for frames that were never bound to one.
    #[serde(default)]
    anchor: ClientAnchor,
}

impl FrameConfig {
    /// Creates a frame configuration.
    pub fn new(name_prefix: impl Into<String>, anchor: ClientAnchor) -> Self {
        Self {
            name_prefix: name_prefix.into(),
            anchor,
        }
    }

    pub fn name_prefix(&self) -> &str {
        &self.name_prefix
    }

    pub fn anchor(&self) -> ClientAnchor {
        self.anchor
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self::new(default_name_prefix(), ClientAnchor::default())
    }
}

/// Serialization settings for drawing parts.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Emit the XML declaration before the root element.
    #[serde(default = "default_xml_declaration")]
    xml_declaration: bool,

    /// Indent nested elements by this many spaces.
    #[serde(default)]
    indent: Option<usize>,
}

impl OutputConfig {
    /// Creates an output configuration.
    pub fn new(xml_declaration: bool, indent: Option<usize>) -> Self {
        Self {
            xml_declaration,
            indent,
        }
    }

    pub fn xml_declaration(&self) -> bool {
        self.xml_declaration
    }

    pub fn indent(&self) -> Option<usize> {
        self.indent
    }

    /// Converts to the markup layer's [`WriteOptions`].
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            declaration: self.xml_declaration,
            indent: self.indent,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(default_xml_declaration(), None)
    }
}

fn default_name_prefix() -> String {
    "Chart".to_string()
}

fn default_xml_declaration() -> bool {
    true
}
