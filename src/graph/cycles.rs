// src/graph/cycles.rs
//! Cycle detection over the template graph.
//!
//! Inheritance cycles (`@extends` loops) cannot render and are errors.
//! Composition cycles (include/component loops) may terminate at runtime
//! behind conditions, so they are reported separately as warnings.
//! Both use Tarjan's SCC over the subset of edges of that category.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use serde::Serialize;

use super::model::DependencyGraph;
use crate::types::{DirectiveKind, TemplateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleCategory {
    Inheritance,
    Composition,
}

impl CycleCategory {
    fn admits(self, kind: DirectiveKind) -> bool {
        match self {
            Self::Inheritance => kind == DirectiveKind::Extends,
            Self::Composition => kind.is_composition(),
        }
    }
}

impl fmt::Display for CycleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inheritance => f.write_str("inheritance"),
            Self::Composition => f.write_str("composition"),
        }
    }
}

/// One strongly connected component that contains a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    /// Every template in the component, ascending.
    pub members: Vec<TemplateId>,
    /// A closed walk starting and ending at the smallest member.
    pub walk: Vec<TemplateId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub inheritance: Vec<Cycle>,
    pub composition: Vec<Cycle>,
}

impl CycleReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inheritance.is_empty() && self.composition.is_empty()
    }

    #[must_use]
    pub fn has_inheritance_cycles(&self) -> bool {
        !self.inheritance.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.inheritance.len() + self.composition.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CycleCategory, &Cycle)> + '_ {
        self.inheritance
            .iter()
            .map(|c| (CycleCategory::Inheritance, c))
            .chain(self.composition.iter().map(|c| (CycleCategory::Composition, c)))
    }
}

pub(crate) fn detect(graph: &DependencyGraph) -> CycleReport {
    CycleReport {
        inheritance: detect_category(graph, CycleCategory::Inheritance),
        composition: detect_category(graph, CycleCategory::Composition),
    }
}

fn detect_category(graph: &DependencyGraph, category: CycleCategory) -> Vec<Cycle> {
    let mut sub: DiGraphMap<TemplateId, ()> = DiGraphMap::new();
    for edge in graph.edges().iter().filter(|e| category.admits(e.kind)) {
        sub.add_edge(edge.from, edge.to, ());
    }

    let mut cycles: Vec<Cycle> = tarjan_scc(&sub)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component.first().is_some_and(|n| sub.contains_edge(*n, *n))
        })
        .filter_map(|component| {
            let members: BTreeSet<TemplateId> = component.into_iter().collect();
            let walk = closed_walk(&sub, &members)?;
            Some(Cycle {
                members: members.into_iter().collect(),
                walk,
            })
        })
        .collect();

    cycles.sort_by(|a, b| a.members.cmp(&b.members));
    cycles
}

/// Shortest closed walk from the smallest member back to itself, staying
/// inside the component.
fn closed_walk(
    sub: &DiGraphMap<TemplateId, ()>,
    members: &BTreeSet<TemplateId>,
) -> Option<Vec<TemplateId>> {
    let start = *members.first()?;
    let mut queue: VecDeque<TemplateId> = VecDeque::from([start]);
    let mut visited: HashSet<TemplateId> = HashSet::new();
    let mut parent: HashMap<TemplateId, TemplateId> = HashMap::new();

    while let Some(current) = queue.pop_front() {
        let mut next: Vec<TemplateId> = sub
            .neighbors(current)
            .filter(|n| members.contains(n))
            .collect();
        next.sort_unstable();

        for n in next {
            if n == start {
                return Some(rebuild(start, current, &parent));
            }
            if visited.insert(n) {
                parent.insert(n, current);
                queue.push_back(n);
            }
        }
    }

    None
}

fn rebuild(
    start: TemplateId,
    last: TemplateId,
    parent: &HashMap<TemplateId, TemplateId>,
) -> Vec<TemplateId> {
    let mut path = vec![start, last];
    let mut cursor = last;
    while cursor != start {
        match parent.get(&cursor) {
            Some(p) => {
                cursor = *p;
                path.push(cursor);
            }
            None => break,
        }
    }
    path.reverse();
    path
}
