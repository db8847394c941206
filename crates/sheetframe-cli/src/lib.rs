//! CLI logic for the sheetframe tool.
//!
//! The tool adds one chart frame to a spreadsheet drawing part and writes
//! the resulting part to disk.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{debug, info};

use sheetframe::{Drawing, FrameError, relationship::RelationshipId};

/// Run the sheetframe CLI application
///
/// Loads (or creates) a drawing, adds a chart frame configured from
/// `args` and writes the drawing to the output path.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `FrameError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input drawings
/// - Invalid frame properties
/// - Relationship ids already used by the drawing
pub fn run(args: &Args) -> Result<(), FrameError> {
    info!(
        input_path = args.input.as_deref().unwrap_or("<new drawing>"),
        output_path = args.output;
        "Processing drawing"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let anchor = app_config.frame().anchor();

    let mut drawing = match &args.input {
        Some(path) => {
            let source = fs::read_to_string(path)?;
            Drawing::from_xml(app_config, &source)?
        }
        None => Drawing::new(app_config),
    };

    let anchor = drawing.add_anchor(anchor);
    let frame = drawing.create_graphic_frame(anchor)?;
    let chart = drawing.add_chart();
    let relationship_id = match &args.rel_id {
        Some(id) => RelationshipId::new(id.as_str()),
        None => drawing.next_relationship_id()?,
    };

    if let Some(frame) = drawing.frame_mut(frame) {
        if let Some(id) = args.id {
            frame.set_id(id)?;
        }
        if let Some(name) = &args.name {
            frame.set_name(name.as_str())?;
        }
        if let Some(macro_name) = &args.macro_name {
            frame.set_macro(macro_name.as_str());
        }
    }

    drawing.attach_chart(frame, chart, relationship_id.clone())?;
    debug!(frame = frame.index(), relationship_id = relationship_id.as_str(); "Added chart frame");

    fs::write(&args.output, drawing.to_xml()?)?;

    info!(output_file = args.output; "Drawing exported successfully");

    Ok(())
}
