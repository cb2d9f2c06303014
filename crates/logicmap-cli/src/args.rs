//! Command-line argument definitions for the logicmap CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select a subcommand, configuration file, and
//! logging verbosity.

use clap::{Parser, Subcommand};

/// Command-line arguments for the logicmap tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// Subcommands of the logicmap tool
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a map to SVG
    Render {
        /// Path to the input map file
        input: String,

        /// Path to the output SVG file
        #[arg(short, long, default_value = "out.svg")]
        output: String,
    },

    /// Export the bibliography of a map as plain text
    Bib {
        /// Path to the input map file
        input: String,

        /// Path to the output text file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print a summary of a map
    Info {
        /// Path to the input map file
        input: String,
    },

    /// Check that a map file parses cleanly
    Validate {
        /// Path to the input map file
        input: String,
    },
}
