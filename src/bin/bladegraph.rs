// src/bin/bladegraph.rs
use std::env;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use bladegraph_core::cli::{self, Cli, Commands};
use bladegraph_core::exit::BladeGraphExit;

fn main() -> BladeGraphExit {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return usage_exit(&e),
    };
    init_tracing(cli.verbose);

    match dispatch(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            BladeGraphExit::Error
        }
    }
}

/// `--help` and `--version` are successes; anything else is bad input.
fn usage_exit(e: &clap::Error) -> BladeGraphExit {
    let _ = e.print();
    if e.use_stderr() {
        BladeGraphExit::InvalidInput
    } else {
        BladeGraphExit::Success
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("BLADEGRAPH_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "bladegraph_core=debug,info"
        } else {
            "warn"
        })
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

fn dispatch(cli: &Cli) -> Result<BladeGraphExit> {
    match &cli.command {
        Commands::Scan { root, out } => cli::handle_scan(root, out),
        Commands::Render(args) => cli::handle_render(args),
        Commands::Check { root, json } => cli::handle_check(root, *json),
        Commands::Query {
            root,
            template,
            ancestors,
            descendants: _,
        } => cli::handle_query(root, template, *ancestors),
    }
}
