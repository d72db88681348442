//! CLI logic for the Tracery layout tool.
//!
//! This module contains the core CLI logic: it reads a graph file, lays it
//! out, and writes the rendering plus an optional JSON placement report.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, sync::Arc};

use log::{debug, info};

use tracery::{
    LayoutManager, TraceryError,
    engine::{Graphviz, LayoutEngine},
    graph::GraphDescription,
    options::EngineKind,
};

/// Run the Tracery CLI application with the shared Graphviz engine.
///
/// # Errors
///
/// Returns `TraceryError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Graph file errors
/// - Engine errors
/// - Layout errors
pub fn run(args: &Args) -> Result<(), TraceryError> {
    let engine = Graphviz::shared()?;
    debug!(path = engine.executable().display().to_string(); "Using Graphviz");
    run_with_engine(args, engine)
}

/// Run the Tracery CLI application with the given engine.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_engine<E: LayoutEngine + ?Sized>(
    args: &Args,
    engine: Arc<E>,
) -> Result<(), TraceryError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let layout_config = app_config.layout();

    let source = fs::read_to_string(&args.input)?;
    let format = args.format.unwrap_or(layout_config.render_format());
    let mut manager = LayoutManager::new(engine).with_render_format(format);

    if args.raw {
        let engine_kind = args
            .engine
            .or(layout_config.engine())
            .unwrap_or(EngineKind::Dot);
        let output = manager.layout(&source, format, engine_kind)?;
        fs::write(&args.output, output)?;

        info!(output_file = args.output; "Raw document rendered");
        return Ok(());
    }

    let graph = parse_graph(&source)?;
    manager.load(&graph)?;

    let rankdir = args
        .rankdir
        .or(graph.rankdir)
        .unwrap_or(layout_config.rankdir());
    let engine_kind = args.engine.or(graph.engine).or(layout_config.engine());

    let result = manager.calculate(rankdir, engine_kind)?;
    fs::write(&args.output, result.svg())?;
    info!(output_file = args.output; "Rendering exported successfully");

    if let Some(json_path) = &args.json {
        let report = serde_json::to_string_pretty(&result)
            .map_err(|err| TraceryError::Io(err.into()))?;
        fs::write(json_path, report)?;
        info!(json_file = json_path.as_str(); "Placements exported");
    }

    Ok(())
}

/// Parse a TOML graph file, keeping the error location for diagnostics.
fn parse_graph(source: &str) -> Result<GraphDescription, TraceryError> {
    toml::from_str(source)
        .map_err(|err| TraceryError::new_input_error(err.message(), err.span(), source))
}
