// src/graph/model.rs
//! The dependency graph structure and query interface.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::cycles::{self, CycleReport};
use super::resolver::Resolution;
use super::traverse::{self, Direction};
use crate::error::{Error, Result};
use crate::types::{DanglingReference, DependencyEdge, SlotDeclaration, TemplateId};

/// Directed multigraph of template relationships.
///
/// Built once per run and immutable afterwards. Traversals keep their own
/// visited sets, so concurrent queries never share state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    pub(crate) nodes: BTreeSet<TemplateId>,
    /// Edges in insertion order; duplicates are kept.
    pub(crate) edges: Vec<DependencyEdge>,
    pub(crate) outgoing: BTreeMap<TemplateId, Vec<usize>>,
    pub(crate) incoming: BTreeMap<TemplateId, Vec<usize>>,
    pub(crate) dangling: Vec<DanglingReference>,
    pub(crate) slots: Vec<SlotDeclaration>,
}

impl DependencyGraph {
    /// Builds a graph from resolved, dangling and slot occurrences.
    ///
    /// Every source and every resolved target becomes a node; every resolved
    /// occurrence becomes one edge.
    #[must_use]
    pub fn build(resolutions: &[Resolution]) -> Self {
        Self::build_over(std::iter::empty(), resolutions)
    }

    /// Like [`DependencyGraph::build`], but seeds `ids` as nodes first so
    /// templates without relationships still appear.
    #[must_use]
    pub fn build_over<I>(ids: I, resolutions: &[Resolution]) -> Self
    where
        I: IntoIterator<Item = TemplateId>,
    {
        let mut graph = Self::default();
        graph.nodes.extend(ids);

        for resolution in resolutions {
            match resolution {
                Resolution::Resolved(occ) => {
                    graph.nodes.insert(occ.source);
                    if let Some(target) = occ.resolved {
                        graph.add_edge(DependencyEdge::oriented(occ.source, target, occ.kind));
                    }
                }
                Resolution::Dangling(d) => {
                    graph.nodes.insert(d.source);
                    graph.dangling.push(d.clone());
                }
                Resolution::Slot(s) => {
                    graph.nodes.insert(s.source);
                    graph.slots.push(s.clone());
                }
            }
        }

        debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            dangling = graph.dangling.len(),
            "built dependency graph"
        );
        graph
    }

    pub(crate) fn add_edge(&mut self, edge: DependencyEdge) {
        let idx = self.edges.len();
        self.nodes.insert(edge.from);
        self.nodes.insert(edge.to);
        self.outgoing.entry(edge.from).or_default().push(idx);
        self.incoming.entry(edge.to).or_default().push(idx);
        self.edges.push(edge);
    }

    #[must_use]
    pub fn contains(&self, id: TemplateId) -> bool {
        self.nodes.contains(&id)
    }

    #[must_use]
    pub fn nodes(&self) -> &BTreeSet<TemplateId> {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    #[must_use]
    pub fn dangling(&self) -> &[DanglingReference] {
        &self.dangling
    }

    #[must_use]
    pub fn slots(&self) -> &[SlotDeclaration] {
        &self.slots
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges leaving `id`, in insertion order.
    pub fn outgoing_edges(&self, id: TemplateId) -> impl Iterator<Item = &DependencyEdge> + '_ {
        self.edge_refs(self.outgoing.get(&id))
    }

    /// Edges entering `id`, in insertion order.
    pub fn incoming_edges(&self, id: TemplateId) -> impl Iterator<Item = &DependencyEdge> + '_ {
        self.edge_refs(self.incoming.get(&id))
    }

    fn edge_refs<'a>(
        &'a self,
        indices: Option<&'a Vec<usize>>,
    ) -> impl Iterator<Item = &'a DependencyEdge> + 'a {
        indices
            .into_iter()
            .flatten()
            .filter_map(move |i| self.edges.get(*i))
    }

    /// Direct successors of `id`.
    ///
    /// # Errors
    /// Returns `UnknownTemplate` if `id` is not a node.
    pub fn children(&self, id: TemplateId) -> Result<BTreeSet<TemplateId>> {
        self.require(id)?;
        Ok(self.outgoing_edges(id).map(|e| e.to).collect())
    }

    /// Direct predecessors of `id`.
    ///
    /// # Errors
    /// Returns `UnknownTemplate` if `id` is not a node.
    pub fn parents(&self, id: TemplateId) -> Result<BTreeSet<TemplateId>> {
        self.require(id)?;
        Ok(self.incoming_edges(id).map(|e| e.from).collect())
    }

    /// Every node reachable by following edges forward from `id`.
    ///
    /// `id` itself is included only when it lies on a cycle.
    ///
    /// # Errors
    /// Returns `UnknownTemplate` if `id` is not a node.
    pub fn descendants(&self, id: TemplateId) -> Result<BTreeSet<TemplateId>> {
        self.require(id)?;
        Ok(traverse::reachable(self, id, Direction::Forward))
    }

    /// Every node from which `id` can be reached.
    ///
    /// # Errors
    /// Returns `UnknownTemplate` if `id` is not a node.
    pub fn ancestors(&self, id: TemplateId) -> Result<BTreeSet<TemplateId>> {
        self.require(id)?;
        Ok(traverse::reachable(self, id, Direction::Backward))
    }

    /// Inheritance and composition cycles.
    #[must_use]
    pub fn detect_cycles(&self) -> CycleReport {
        cycles::detect(self)
    }

    /// The graph restricted to `id` and its descendants.
    ///
    /// Dangling references and slots are kept for templates inside the scope.
    ///
    /// # Errors
    /// Returns `UnknownTemplate` if `id` is not a node.
    pub fn subgraph_from(&self, id: TemplateId) -> Result<Self> {
        let mut keep = self.descendants(id)?;
        keep.insert(id);

        let mut sub = Self {
            nodes: keep.clone(),
            ..Self::default()
        };
        for edge in &self.edges {
            if keep.contains(&edge.from) && keep.contains(&edge.to) {
                sub.add_edge(*edge);
            }
        }
        sub.dangling = self
            .dangling
            .iter()
            .filter(|d| keep.contains(&d.source))
            .cloned()
            .collect();
        sub.slots = self
            .slots
            .iter()
            .filter(|s| keep.contains(&s.source))
            .cloned()
            .collect();
        Ok(sub)
    }

    fn require(&self, id: TemplateId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(Error::UnknownTemplate(id))
        }
    }
}
