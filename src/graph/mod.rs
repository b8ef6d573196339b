// src/graph/mod.rs
//! Directive extraction, reference resolution and the dependency graph.

pub mod cycles;
pub mod directives;
pub mod model;
pub mod records;
pub mod resolver;
pub mod traverse;

pub use cycles::{Cycle, CycleCategory, CycleReport};
pub use model::DependencyGraph;
pub use records::{DependencyRecord, RecordSet};
pub use resolver::Resolution;
