// src/cli/handlers.rs
//! Command handlers. Each returns the exit code to use.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use super::args::RenderArgs;
use crate::analysis::{self, Analysis};
use crate::config::Config;
use crate::exit::BladeGraphExit;
use crate::graph::records;
use crate::render::{self, RenderOptions};
use crate::report::{self, CheckReport};

pub const ID_MAP_FILE: &str = "templates.json";
pub const RECORDS_FILE: &str = "dependencies.json";

fn load(root: &Path) -> Result<(Config, Analysis)> {
    let config = Config::load(root)?;
    let analysis = analysis::run(root, &config)
        .with_context(|| format!("failed to scan {}", root.display()))?;
    Ok((config, analysis))
}

/// Writes the id map and dependency records.
///
/// # Errors
/// Returns error if scanning or writing fails.
pub fn handle_scan(root: &Path, out: &Path) -> Result<BladeGraphExit> {
    let (_, analysis) = load(root)?;

    fs::create_dir_all(out).with_context(|| format!("cannot create {}", out.display()))?;
    let id_map = out.join(ID_MAP_FILE);
    let deps = out.join(RECORDS_FILE);
    fs::write(&id_map, analysis.index.to_json()?)
        .with_context(|| format!("cannot write {}", id_map.display()))?;
    fs::write(&deps, records::records_to_json(&analysis.graph.records())?)
        .with_context(|| format!("cannot write {}", deps.display()))?;
    info!(id_map = %id_map.display(), records = %deps.display(), "wrote scan output");

    report::print_summary(&analysis);
    println!("  {} {}", "→".dimmed(), id_map.display());
    println!("  {} {}", "→".dimmed(), deps.display());
    Ok(BladeGraphExit::Success)
}

/// Prints or writes the DOT rendering.
///
/// # Errors
/// Returns error if scanning fails, the scope template is unknown, or the
/// output file cannot be written.
pub fn handle_render(args: &RenderArgs) -> Result<BladeGraphExit> {
    let (config, analysis) = load(&args.root)?;

    let scope_root = args
        .from
        .as_deref()
        .map(|key| analysis.lookup(key))
        .transpose()?;

    let options = RenderOptions {
        label_format: args.labels.unwrap_or(config.render.labels),
        edge_labels: edge_labels(args, config.render.edge_labels),
        scope_root,
        rankdir: config.render.rankdir.clone(),
        show_dangling: args.dangling || config.render.show_dangling,
    };
    let dot = render::render(&analysis.graph, &analysis.index, &options)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &dot).with_context(|| format!("cannot write {}", path.display()))?;
            info!(path = %path.display(), "wrote DOT output");
        }
        None => print!("{dot}"),
    }
    Ok(BladeGraphExit::Success)
}

fn edge_labels(args: &RenderArgs, configured: bool) -> bool {
    if args.no_edge_labels {
        false
    } else {
        args.edge_labels || configured
    }
}

/// Reports problems; fails when an inheritance cycle exists.
///
/// # Errors
/// Returns error if scanning fails.
pub fn handle_check(root: &Path, json: bool) -> Result<BladeGraphExit> {
    let (_, analysis) = load(root)?;
    let report = CheckReport::from_analysis(&analysis);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report::print_full_report(&analysis, &report);
    }

    if report.passed {
        Ok(BladeGraphExit::Success)
    } else {
        Ok(BladeGraphExit::CheckFailed)
    }
}

/// Lists ancestors or descendants of one template.
///
/// # Errors
/// Returns error if scanning fails or the template is unknown.
pub fn handle_query(root: &Path, template: &str, ancestors: bool) -> Result<BladeGraphExit> {
    let (_, analysis) = load(root)?;
    let id = analysis.lookup(template)?;
    let found = if ancestors {
        analysis.graph.ancestors(id)?
    } else {
        analysis.graph.descendants(id)?
    };
    report::print_paths(&analysis, &found);
    Ok(BladeGraphExit::Success)
}
