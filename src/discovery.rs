// src/discovery.rs
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::DEFAULT_SUFFIX;
use crate::error::{Error, Result};
use crate::index::TemplateIndex;

/// What counts as a template during the walk.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    pub suffix: String,
    pub exclude_patterns: Vec<Regex>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            exclude_patterns: Vec::new(),
        }
    }
}

/// Walks `root` and assigns ids to every template file found.
///
/// Ids follow (directory, file name) order, starting at 1.
///
/// # Errors
/// Returns `RootNotFound` if `root` is missing, not a directory or unreadable,
/// and `Walk` if any directory below it cannot be read. A partial index is
/// never returned.
pub fn enumerate(root: &Path, options: &DiscoveryOptions) -> Result<TemplateIndex> {
    ensure_root(root)?;

    let walker = WalkDir::new(root).follow_links(false).into_iter();
    let (paths, errors) = accumulate_walker(root, walker);
    if let Some(first) = errors.into_iter().next() {
        let path = first.path().unwrap_or(root).to_path_buf();
        return Err(Error::Walk { source: first, path });
    }

    let mut templates: Vec<String> = paths
        .into_iter()
        .filter(|p| is_template(p, options))
        .collect();
    templates.sort_by(|a, b| split_dir(a).cmp(&split_dir(b)));

    debug!(count = templates.len(), root = %root.display(), "enumerated templates");
    TemplateIndex::from_paths(templates)
}

fn ensure_root(root: &Path) -> Result<()> {
    let readable = fs::metadata(root).is_ok_and(|m| m.is_dir()) && fs::read_dir(root).is_ok();
    if readable {
        Ok(())
    } else {
        Err(Error::RootNotFound {
            path: root.to_path_buf(),
        })
    }
}

fn accumulate_walker<I>(root: &Path, walker: I) -> (Vec<String>, Vec<walkdir::Error>)
where
    I: Iterator<Item = walkdir::Result<walkdir::DirEntry>>,
{
    let mut paths = Vec::new();
    let mut errors = Vec::new();
    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
                    paths.push(normalize_path(rel));
                }
            }
            Err(e) => {
                warn!("walk error: {e}");
                errors.push(e);
            }
        }
    }
    (paths, errors)
}

fn is_template(rel: &str, options: &DiscoveryOptions) -> bool {
    let name = rel.rsplit('/').next().unwrap_or(rel);
    if name.len() <= options.suffix.len() || !name.ends_with(&options.suffix) {
        return false;
    }
    !options.exclude_patterns.iter().any(|re| re.is_match(rel))
}

/// Splits a relative path into (directory, file name); root-level files get "".
fn split_dir(rel: &str) -> (&str, &str) {
    rel.rsplit_once('/').unwrap_or(("", rel))
}

/// Normalizes a path to use forward slashes (cross-platform pattern matching).
#[must_use]
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
