//! Command-line argument definitions for the cuegraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, identity token generation, and logging verbosity.

use clap::Parser;

/// Convert a SoundCue JSON export into SoundCueGraph editor text
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input SoundCue JSON export
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output text file, `-` for standard output
    #[arg(short, long, default_value = "Converted_SoundCueGraph.txt")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Write all-zero node identity tokens
    #[arg(long)]
    pub no_guids: bool,

    /// Use sequential identity tokens for byte-reproducible output
    #[arg(long)]
    pub stable: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["cuegraph", "cue.json"]);
        assert_eq!(args.input, "cue.json");
        assert_eq!(args.output, "Converted_SoundCueGraph.txt");
        assert!(!args.no_guids);
        assert!(!args.stable);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_flags() {
        let args = Args::parse_from([
            "cuegraph",
            "cue.json",
            "-o",
            "-",
            "--no-guids",
            "--stable",
            "-c",
            "custom.toml",
        ]);
        assert_eq!(args.output, "-");
        assert!(args.no_guids);
        assert!(args.stable);
        assert_eq!(args.config.as_deref(), Some("custom.toml"));
    }
}
