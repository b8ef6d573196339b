// src/config/io.rs
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;

use super::types::{BladeGraphToml, Config};
use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = "bladegraph.toml";

/// Reads `bladegraph.toml` from `root` if present.
///
/// # Errors
/// Returns `Error::Config` if the file exists but cannot be read or parsed.
pub fn load_toml(root: &Path) -> Result<Option<BladeGraphToml>> {
    let path = root.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    debug!(path = %path.display(), "loading config");
    let content = fs::read_to_string(&path).map_err(|e| Error::io(e, &path))?;
    parse_toml(&content)
        .map(Some)
        .map_err(|message| Error::Config { path, message })
}

/// Parses config text; the error is a human-readable message.
///
/// # Errors
/// Returns the TOML parser message on invalid input.
pub fn parse_toml(content: &str) -> std::result::Result<BladeGraphToml, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}

/// Applies a parsed file onto a runtime config.
///
/// # Errors
/// Returns `Error::Config` if an exclude pattern is not a valid regex.
pub fn apply(config: &mut Config, file: BladeGraphToml, origin: &Path) -> Result<()> {
    if !file.suffix.is_empty() {
        config.suffix = file.suffix;
    }
    config.exclude_patterns = compile_patterns(&file.exclude).map_err(|message| Error::Config {
        path: origin.to_path_buf(),
        message,
    })?;
    config.render = file.render;
    Ok(())
}

fn compile_patterns(patterns: &[String]) -> std::result::Result<Vec<Regex>, String> {
    patterns
        .iter()
        .map(|p| Regex::new(p).map_err(|e| format!("bad exclude pattern '{p}': {e}")))
        .collect()
}
