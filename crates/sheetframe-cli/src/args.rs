//! Command-line argument definitions for the sheetframe CLI.
//!
//! Arguments select the drawing to extend, the output path, the
//! configuration file and the properties of the new chart frame.

use clap::Parser;

/// Command-line arguments for the sheetframe tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Existing drawing part to extend; a new drawing is created if omitted
    #[arg(help = "Path to an existing drawing part (xdr:wsDr)")]
    pub input: Option<String>,

    /// Path to the output drawing part
    #[arg(short, long, default_value = "drawing1.xml")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Name of the new frame; defaults to `<prefix> <id>`
    #[arg(long)]
    pub name: Option<String>,

    /// Identity of the new frame; defaults to the next free id
    #[arg(long, allow_negative_numbers = true)]
    pub id: Option<i64>,

    /// Relationship id referencing the chart part; defaults to the next `rId<n>`
    #[arg(long)]
    pub rel_id: Option<String>,

    /// Macro bound to the frame
    #[arg(long = "macro")]
    pub macro_name: Option<String>,
}
