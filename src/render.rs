// src/render.rs
//! Graphviz DOT output for the dependency graph.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::DependencyGraph;
use crate::index::TemplateIndex;
use crate::types::{DanglingReference, DependencyEdge, DirectiveKind, TemplateId};

/// How nodes are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LabelFormat {
    /// Numeric template id.
    Id,
    /// Root-relative path.
    #[default]
    Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub label_format: LabelFormat,
    pub edge_labels: bool,
    /// Render only this template and its descendants.
    pub scope_root: Option<TemplateId>,
    pub rankdir: String,
    /// Draw unresolved targets as dashed placeholder nodes (unscoped only).
    pub show_dangling: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            label_format: LabelFormat::Path,
            edge_labels: true,
            scope_root: None,
            rankdir: "LR".to_string(),
            show_dangling: false,
        }
    }
}

/// Renders `graph` as a DOT digraph.
///
/// Output is deterministic: nodes ascend by id, edges by (from, to, kind)
/// with duplicates kept in insertion order.
///
/// # Errors
/// Returns `UnknownTemplate` if `scope_root` is not in the graph.
pub fn render(graph: &DependencyGraph, index: &TemplateIndex, options: &RenderOptions) -> Result<String> {
    let scoped;
    let graph = match options.scope_root {
        Some(root) => {
            scoped = graph.subgraph_from(root)?;
            &scoped
        }
        None => graph,
    };

    let mut out = String::new();
    let _ = writeln!(out, "digraph templates {{");
    let _ = writeln!(out, "  rankdir={};", quote_id(&options.rankdir));
    let _ = writeln!(out, "  node [shape=box, style=filled, color=lightblue];");

    for id in graph.nodes() {
        let label = node_label(*id, index, options.label_format);
        let _ = writeln!(out, "  {} [label={}];", quote(&id.to_string()), quote(&label));
    }

    let mut edges: Vec<&DependencyEdge> = graph.edges().iter().collect();
    edges.sort_by_key(|e| (e.from, e.to, e.kind));
    for edge in edges {
        write_edge(&mut out, &edge.from.to_string(), &edge.to.to_string(), edge.kind, options, false);
    }

    // A scoped render holds only the scope root and its descendants.
    if options.show_dangling && options.scope_root.is_none() {
        write_dangling(&mut out, graph.dangling(), options);
    }

    out.push_str("}\n");
    Ok(out)
}

fn node_label(id: TemplateId, index: &TemplateIndex, format: LabelFormat) -> String {
    match format {
        LabelFormat::Id => id.to_string(),
        LabelFormat::Path => index
            .get_path(id)
            .map_or_else(|| id.to_string(), str::to_string),
    }
}

fn write_edge(out: &mut String, from: &str, to: &str, kind: DirectiveKind, options: &RenderOptions, dashed: bool) {
    let mut attrs = Vec::new();
    if options.edge_labels {
        attrs.push(format!("label={}", quote(kind.keyword())));
    }
    if dashed {
        attrs.push("style=dashed".to_string());
    }
    if attrs.is_empty() {
        let _ = writeln!(out, "  {} -> {};", quote(from), quote(to));
    } else {
        let _ = writeln!(out, "  {} -> {} [{}];", quote(from), quote(to), attrs.join(", "));
    }
}

fn write_dangling(out: &mut String, dangling: &[DanglingReference], options: &RenderOptions) {
    let mut targets: BTreeMap<&str, Vec<&DanglingReference>> = BTreeMap::new();
    for d in dangling {
        targets.entry(d.raw_target.as_str()).or_default().push(d);
    }

    for (target, refs) in &targets {
        let node = format!("?{target}");
        let _ = writeln!(
            out,
            "  {} [label={}, style=dashed, color=gray];",
            quote(&node),
            quote(target)
        );
        let mut refs = refs.clone();
        refs.sort_by_key(|d| (d.source, d.kind));
        for d in refs {
            let source = d.source.to_string();
            let (from, to) = if d.kind == DirectiveKind::Extends {
                (node.as_str(), source.as_str())
            } else {
                (source.as_str(), node.as_str())
            };
            write_edge(out, from, to, d.kind, options, true);
        }
    }
}

/// Double-quotes a DOT id, escaping backslashes, quotes and line breaks.
#[must_use]
pub fn quote(s: &str) -> String {
    let mut q = String::with_capacity(s.len() + 2);
    q.push('"');
    for c in s.chars() {
        match c {
            '"' => q.push_str("\\\""),
            '\\' => q.push_str("\\\\"),
            '\n' => q.push_str("\\n"),
            '\r' => {}
            _ => q.push(c),
        }
    }
    q.push('"');
    q
}

// Plain identifiers stay bare (`LR`); anything else is quoted.
fn quote_id(s: &str) -> String {
    if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()) {
        s.to_string()
    } else {
        quote(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote("c:\\views"), "\"c:\\\\views\"");
        assert_eq!(quote("x\ny"), "\"x\\ny\"");
    }

    #[test]
    fn test_empty_graph() {
        let out = render(
            &DependencyGraph::default(),
            &TemplateIndex::default(),
            &RenderOptions::default(),
        )
        .unwrap();
        assert_eq!(
            out,
            "digraph templates {\n  rankdir=LR;\n  node [shape=box, style=filled, color=lightblue];\n}\n"
        );
    }
}
