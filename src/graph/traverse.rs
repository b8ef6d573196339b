// src/graph/traverse.rs
use std::collections::{BTreeSet, HashSet, VecDeque};

use super::model::DependencyGraph;
use crate::types::TemplateId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Breadth-first reachability from `start`, excluding `start` unless a cycle
/// leads back to it.
pub(crate) fn reachable(
    graph: &DependencyGraph,
    start: TemplateId,
    direction: Direction,
) -> BTreeSet<TemplateId> {
    let mut queue: VecDeque<TemplateId> = VecDeque::from([start]);
    let mut visited: HashSet<TemplateId> = HashSet::new();
    let mut found = BTreeSet::new();

    while let Some(current) = queue.pop_front() {
        for next in step(graph, current, direction) {
            found.insert(next);
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    found
}

fn step(graph: &DependencyGraph, node: TemplateId, direction: Direction) -> Vec<TemplateId> {
    match direction {
        Direction::Forward => graph.outgoing_edges(node).map(|e| e.to).collect(),
        Direction::Backward => graph.incoming_edges(node).map(|e| e.from).collect(),
    }
}
