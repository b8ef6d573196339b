// src/report.rs
//! Terminal and JSON output for a completed analysis.

use colored::Colorize;
use serde::Serialize;

use crate::analysis::{Analysis, FileError};
use crate::graph::{Cycle, CycleCategory, CycleReport};
use crate::types::{DirectiveKind, TemplateId};

/// Machine-readable summary for `check --json`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub templates: usize,
    pub edges: usize,
    pub dangling: Vec<DanglingEntry>,
    pub cycles: CycleReport,
    pub file_errors: Vec<FileError>,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DanglingEntry {
    pub source: String,
    pub line: usize,
    pub kind: DirectiveKind,
    pub target: String,
}

impl CheckReport {
    #[must_use]
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let cycles = analysis.cycles();
        let dangling = analysis
            .graph
            .dangling()
            .iter()
            .map(|d| DanglingEntry {
                source: analysis.path_of(d.source).to_string(),
                line: d.line,
                kind: d.kind,
                target: d.raw_target.clone(),
            })
            .collect();
        Self {
            templates: analysis.index.len(),
            edges: analysis.graph.edge_count(),
            dangling,
            passed: !cycles.has_inheritance_cycles(),
            cycles,
            file_errors: analysis.file_errors.clone(),
        }
    }
}

/// Prints the scan summary line.
pub fn print_summary(analysis: &Analysis) {
    println!("\n{}", summary_line(analysis, &analysis.cycles()));
}

fn summary_line(analysis: &Analysis, cycles: &CycleReport) -> String {
    format!(
        "{} {} templates | {} edges | {} dangling | {} cycles | {} unreadable",
        "TEMPLATE SCAN".cyan().bold(),
        analysis.index.len(),
        analysis.graph.edge_count(),
        format_count(analysis.graph.dangling().len()),
        format_count(cycles.total()),
        format_count(analysis.file_errors.len()),
    )
}

/// Prints the full check report.
pub fn print_full_report(analysis: &Analysis, report: &CheckReport) {
    println!("\n{}", summary_line(analysis, &report.cycles));

    if report.dangling.is_empty() && report.cycles.is_empty() && report.file_errors.is_empty() {
        println!("{}", "  ✓ All template references resolve, no cycles.".green());
        return;
    }

    print_dangling(report);
    print_cycles(analysis, &report.cycles);
    print_file_errors(&report.file_errors);
}

fn format_count(n: usize) -> String {
    if n == 0 {
        n.to_string().green().to_string()
    } else {
        n.to_string().red().to_string()
    }
}

fn print_dangling(report: &CheckReport) {
    if report.dangling.is_empty() {
        return;
    }
    println!("\n{} {}", "▸".yellow(), "DANGLING REFERENCES".yellow().bold());
    for d in &report.dangling {
        println!(
            "    {}:{} @{}('{}')",
            d.source,
            d.line,
            d.kind,
            d.target.red()
        );
    }
}

fn print_cycles(analysis: &Analysis, cycles: &CycleReport) {
    for (category, cycle) in cycles.iter() {
        let heading = match category {
            CycleCategory::Inheritance => "INHERITANCE CYCLE".red().bold(),
            CycleCategory::Composition => "COMPOSITION CYCLE".yellow().bold(),
        };
        println!("\n{} {} ({} templates)", "▸".yellow(), heading, cycle.members.len());
        println!("    {}", format_walk(analysis, cycle));
    }
}

fn format_walk(analysis: &Analysis, cycle: &Cycle) -> String {
    cycle
        .walk
        .iter()
        .map(|id| analysis.path_of(*id))
        .collect::<Vec<_>>()
        .join(" → ")
}

fn print_file_errors(errors: &[FileError]) {
    if errors.is_empty() {
        return;
    }
    println!("\n{} {}", "▸".yellow(), "UNREADABLE TEMPLATES".red().bold());
    for e in errors {
        println!("    {} {}", e.path.red(), e.message.dimmed());
    }
}

/// Prints one template path per line.
pub fn print_paths<'a, I>(analysis: &Analysis, ids: I)
where
    I: IntoIterator<Item = &'a TemplateId>,
{
    for id in ids {
        println!("{}", analysis.path_of(*id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::index::TemplateIndex;
    use std::collections::HashMap;

    #[test]
    fn test_summary_counts_cycles_of_both_categories() {
        colored::control::set_override(false);
        let files = [
            ("a.blade.php", "@extends('b')"),
            ("b.blade.php", "@extends('a')"),
            ("c.blade.php", "@include('c') @include('gone')"),
        ];
        let index = TemplateIndex::from_paths(files.iter().map(|(p, _)| *p)).unwrap();
        let map: HashMap<String, String> = files
            .iter()
            .map(|(p, c)| ((*p).to_string(), (*c).to_string()))
            .collect();
        let analysis = analyze(index, &map, ".blade.php");
        let report = CheckReport::from_analysis(&analysis);

        assert_eq!(report.cycles.total(), 2);
        assert!(!report.passed);
        assert_eq!(
            summary_line(&analysis, &report.cycles),
            "TEMPLATE SCAN 3 templates | 3 edges | 1 dangling | 2 cycles | 0 unreadable"
        );
    }
}
