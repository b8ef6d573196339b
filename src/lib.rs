pub mod analysis;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod graph;
pub mod index;
pub mod render;
pub mod report;
pub mod types;

pub use analysis::{analyze, Analysis, FileError, FsSource, TemplateSource};
pub use error::{Error, Result};
pub use graph::{CycleReport, DependencyGraph, Resolution};
pub use index::TemplateIndex;
pub use render::{render, LabelFormat, RenderOptions};
pub use types::{DependencyEdge, DirectiveKind, DirectiveOccurrence, TemplateId};
