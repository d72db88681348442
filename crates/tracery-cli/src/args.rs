//! Command-line argument definitions for the Tracery CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, layout overrides,
//! configuration file selection, and logging verbosity.

use clap::Parser;

use tracery::options::{EngineKind, OutputFormat, RankDir};

/// Command-line arguments for the Tracery layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph file (TOML), or a DOT document with `--raw`
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the rendered output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Also write node placements as JSON to this path
    #[arg(long)]
    pub json: Option<String>,

    /// Treat the input as a ready DOT document and pass it straight to the engine
    #[arg(long)]
    pub raw: bool,

    /// Output format of the rendering (svg, plain, dot, json)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Layout engine (dot, neato, fdp, sfdp, circo, twopi, osage, patchwork)
    #[arg(long)]
    pub engine: Option<EngineKind>,

    /// Rank direction (TB, LR, BT, RL)
    #[arg(long)]
    pub rankdir: Option<RankDir>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
