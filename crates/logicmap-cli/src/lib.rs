//! CLI logic for the logicmap tool.
//!
//! This module contains the core CLI logic for rendering, bibliography
//! export, and inspection of map files.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::fs;

use log::info;

use logicmap::{
    LogicMap, LogicMapError, bibliography, export::svg::SvgExporter,
};

/// Run the logicmap CLI application
///
/// Dispatches to the selected subcommand.
///
/// # Errors
///
/// Returns `LogicMapError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Document parsing errors
pub fn run(args: &Args) -> Result<(), LogicMapError> {
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Render { input, output } => {
            info!(input_path = input, output_path = output; "Rendering map");
            let map = LogicMap::load(input)?;

            let background = app_config
                .style()
                .background_color()
                .map_err(LogicMapError::Export)?;
            let svg = SvgExporter::default().with_background(background).export(&map);

            fs::write(output, svg)?;
            info!(output_file = output; "SVG exported successfully");
        }

        Command::Bib { input, output } => {
            let map = LogicMap::load(input)?;
            let text = bibliography::render(&map);
            match output {
                Some(path) => {
                    fs::write(path, text)?;
                    info!(output_file = path; "Bibliography exported successfully");
                }
                None => print!("{text}"),
            }
        }

        Command::Info { input } => {
            let map = LogicMap::load(input)?;
            print_summary(&map);
        }

        Command::Validate { input } => {
            let map = LogicMap::load(input)?;
            println!(
                "{input}: OK ({} nodes, {} connections)",
                map.node_count(),
                map.connections().len()
            );
        }
    }

    Ok(())
}

fn print_summary(map: &LogicMap) {
    println!("project: {}", map.project());
    println!("nodes: {}", map.node_count());

    for kind in logicmap::core::node::NodeKind::ALL {
        let count = map.nodes().filter(|node| node.kind() == kind).count();
        if count > 0 {
            println!("  {kind}: {count}");
        }
    }

    println!("connections: {}", map.connections().len());

    let references: usize = map.nodes().map(|node| node.references().len()).sum();
    println!("references: {references}");

    if let Some(bounds) = map.bounds() {
        println!(
            "extent: {}x{} at ({}, {})",
            bounds.width(),
            bounds.height(),
            bounds.min_x(),
            bounds.min_y()
        );
    }
}
