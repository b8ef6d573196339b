use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::render::LabelFormat;

#[derive(Parser)]
#[command(name = "bladegraph", version, about = "Blade template dependency mapper")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enumerate templates and write the id map and dependency records as JSON
    Scan {
        root: PathBuf,
        /// Directory for templates.json and dependencies.json
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Print the dependency graph in Graphviz DOT format
    Render(RenderArgs),
    /// Report dangling references, cycles and unreadable templates
    Check {
        root: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// List templates above or below one template
    Query {
        root: PathBuf,
        /// Template id, relative path or dotted name
        template: String,
        /// Walk edges backwards (templates this one is reached from)
        #[arg(long, conflicts_with = "descendants")]
        ancestors: bool,
        /// Walk edges forwards (the default)
        #[arg(long)]
        descendants: bool,
    },
}

#[derive(Args)]
pub struct RenderArgs {
    pub root: PathBuf,
    /// Only render this template and its descendants
    #[arg(long, value_name = "TEMPLATE")]
    pub from: Option<String>,
    #[arg(long, value_enum)]
    pub labels: Option<LabelFormat>,
    #[arg(long, overrides_with = "no_edge_labels")]
    pub edge_labels: bool,
    #[arg(long)]
    pub no_edge_labels: bool,
    /// Draw unresolved targets as dashed nodes (ignored with --from)
    #[arg(long)]
    pub dangling: bool,
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
