// src/analysis.rs
//! End-to-end pipeline: enumerate, extract, resolve, build.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::discovery;
use crate::error::Result;
use crate::graph::{directives, resolver, CycleReport, DependencyGraph, Resolution};
use crate::index::TemplateIndex;
use crate::types::{DirectiveOccurrence, TemplateId};

/// Supplies template text by root-relative path.
pub trait TemplateSource: Sync {
    /// # Errors
    /// Returns the underlying read error (missing file, invalid UTF-8, ...).
    fn read(&self, path: &str) -> io::Result<String>;
}

/// Reads templates from disk under a root directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateSource for FsSource {
    fn read(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(self.root.join(path))
    }
}

impl<S: std::hash::BuildHasher + Sync> TemplateSource for HashMap<String, String, S> {
    fn read(&self, path: &str) -> io::Result<String> {
        self.get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
    }
}

/// A template that could not be read; it contributes no occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub id: TemplateId,
    pub path: String,
    pub message: String,
}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub index: TemplateIndex,
    pub graph: DependencyGraph,
    pub file_errors: Vec<FileError>,
    pub suffix: String,
}

impl Analysis {
    #[must_use]
    pub fn cycles(&self) -> CycleReport {
        self.graph.detect_cycles()
    }

    #[must_use]
    pub fn path_of(&self, id: TemplateId) -> &str {
        self.index.get_path(id).unwrap_or("<unknown>")
    }

    /// Finds a template by id, relative path or dotted logical name.
    ///
    /// # Errors
    /// Returns `UnknownPath` if nothing matches.
    pub fn lookup(&self, key: &str) -> Result<TemplateId> {
        if let Ok(n) = key.parse::<u32>() {
            let id = TemplateId(n);
            if self.index.get_path(id).is_some() {
                return Ok(id);
            }
        }
        let normalized = key.replace('\\', "/");
        self.index
            .get_id(&normalized)
            .or_else(|| self.index.get_id(&resolver::logical_to_path(key, &self.suffix)))
            .ok_or_else(|| crate::error::Error::UnknownPath(key.to_string()))
    }
}

/// Runs the full pipeline over a directory.
///
/// # Errors
/// Returns error if the root cannot be enumerated. Unreadable files are
/// recorded in [`Analysis::file_errors`] instead.
pub fn run(root: &Path, config: &Config) -> Result<Analysis> {
    let index = discovery::enumerate(root, &config.discovery_options())?;
    info!(templates = index.len(), root = %root.display(), "scanning templates");
    Ok(analyze(index, &FsSource::new(root), &config.suffix))
}

/// Extracts, resolves and builds over an already enumerated index.
#[must_use]
pub fn analyze<S: TemplateSource>(index: TemplateIndex, source: &S, suffix: &str) -> Analysis {
    let entries: Vec<(TemplateId, &str)> = index.iter().collect();

    let extracted: Vec<(TemplateId, io::Result<String>)> = entries
        .par_iter()
        .map(|(id, path)| (*id, source.read(path)))
        .collect();

    let mut occurrences = Vec::new();
    let mut file_errors = Vec::new();
    for (id, content) in extracted {
        match content {
            Ok(text) => {
                let found = directives::extract(&text);
                debug!(template = %id, directives = found.len(), "extracted");
                occurrences.extend(found.into_iter().map(|d| DirectiveOccurrence::new(id, d)));
            }
            Err(e) => {
                let path = index.get_path(id).unwrap_or_default().to_string();
                warn!(%path, "skipping unreadable template: {e}");
                file_errors.push(FileError { id, path, message: e.to_string() });
            }
        }
    }

    let resolutions: Vec<Resolution> = resolver::resolve_all(occurrences, &index, suffix);
    let graph = DependencyGraph::build_over(index.ids(), &resolutions);

    Analysis {
        index,
        graph,
        file_errors,
        suffix: suffix.to_string(),
    }
}
