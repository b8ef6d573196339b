// src/graph/records.rs
//! Serialized edge set, grouped by the template that declares each directive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::model::DependencyGraph;
use crate::error::Result;
use crate::types::{DependencyEdge, DirectiveKind, TemplateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    pub target: TemplateId,
    pub kind: DirectiveKind,
}

/// `{source id: [{target, kind}, ...]}` for every template, lists in order of
/// appearance.
pub type RecordSet = BTreeMap<TemplateId, Vec<DependencyRecord>>;

impl DependencyGraph {
    /// Groups resolved edges by declaring template.
    ///
    /// Every node gets an entry; templates that reference nothing map to `[]`.
    #[must_use]
    pub fn records(&self) -> RecordSet {
        let mut set: RecordSet = self.nodes.iter().map(|id| (*id, Vec::new())).collect();
        for edge in &self.edges {
            set.entry(edge.declaring()).or_default().push(DependencyRecord {
                target: edge.referenced(),
                kind: edge.kind,
            });
        }
        set
    }

    /// Rebuilds a graph from a record set, re-applying edge orientation.
    ///
    /// Dangling references and slots are not part of the record set.
    #[must_use]
    pub fn from_records(records: &RecordSet) -> Self {
        let mut graph = Self::default();
        for (source, list) in records {
            graph.nodes.insert(*source);
            for record in list {
                if !record.kind.is_reference() {
                    warn!(source = %source, "ignoring yield entry in dependency records");
                    continue;
                }
                graph.add_edge(DependencyEdge::oriented(*source, record.target, record.kind));
            }
        }
        graph
    }
}

/// # Errors
/// Returns error if serialization fails.
pub fn records_to_json(records: &RecordSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// # Errors
/// Returns error on malformed JSON.
pub fn records_from_json(json: &str) -> Result<RecordSet> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::resolver::Resolution;
    use crate::types::{Directive, DirectiveOccurrence};

    fn resolved(source: u32, target: u32, kind: DirectiveKind) -> Resolution {
        let mut occ = DirectiveOccurrence::new(
            TemplateId(source),
            Directive { kind, raw_target: String::new(), line: 1 },
        );
        occ.resolved = Some(TemplateId(target));
        Resolution::Resolved(occ)
    }

    #[test]
    fn test_records_grouped_by_declaring_template() {
        let graph = DependencyGraph::build(&[
            resolved(2, 1, DirectiveKind::Extends),
            resolved(2, 3, DirectiveKind::Include),
            resolved(2, 3, DirectiveKind::Include),
        ]);
        let records = graph.records();
        assert_eq!(records.len(), 3);
        assert!(records[&TemplateId(1)].is_empty());
        assert!(records[&TemplateId(3)].is_empty());
        let list = &records[&TemplateId(2)];
        assert_eq!(list.len(), 3);
        assert_eq!(list[0], DependencyRecord { target: TemplateId(1), kind: DirectiveKind::Extends });
    }

    #[test]
    fn test_records_rebuild_same_edges() {
        let graph = DependencyGraph::build(&[
            resolved(2, 1, DirectiveKind::Extends),
            resolved(3, 4, DirectiveKind::Component),
        ]);
        let json = records_to_json(&graph.records()).unwrap();
        let rebuilt = DependencyGraph::from_records(&records_from_json(&json).unwrap());
        assert_eq!(rebuilt.edges(), graph.edges());
        assert_eq!(rebuilt.nodes(), graph.nodes());
        assert!(json.contains("\"extends\""));
    }
}
