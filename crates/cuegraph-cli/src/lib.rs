//! CLI logic for the cuegraph converter.
//!
//! This module contains the core CLI logic: configuration loading, reading
//! the export, conversion, and writing the editor text.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use cuegraph::{CueGraphBuilder, CueGraphError};

/// Output path that selects standard output.
const STDOUT_PATH: &str = "-";

/// Run the cuegraph CLI application
///
/// This function processes the input file through the cuegraph pipeline
/// and writes the resulting text to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CueGraphError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), CueGraphError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing SoundCue export"
    );

    // Load configuration
    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.stable {
        app_config.export_mut().set_stable_tokens(true);
    }

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Convert using the CueGraphBuilder API
    let builder = CueGraphBuilder::new(app_config);
    let cue = builder.parse(&source)?;
    let text = builder.render_text(&cue, !args.no_guids)?;

    // Write output
    if args.output == STDOUT_PATH {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
    } else {
        fs::write(&args.output, text)?;
        info!(output_file = args.output; "SoundCueGraph text exported successfully");
    }

    Ok(())
}
