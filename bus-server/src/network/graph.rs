//! The location graph: nodes and the local edges between them.

use std::collections::HashMap;

use crate::domain::{DomainError, Edge, Node, NodeId};

use super::local_path::{LocalPath, LocalPathFinder};

/// Directed graph of locations joined by local (walk / short-hop) edges.
///
/// Nodes keep their insertion order, which is the order the dataset listed
/// them in. Outgoing edges also keep insertion order; the path search relies
/// on that for deterministic tie-breaking.
#[derive(Debug, Clone, Default)]
pub struct LocationGraph {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl LocationGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns false, leaving the graph unchanged, if a node
    /// with the same id already exists.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.index.contains_key(node.id.as_str()) {
            return false;
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        true
    }

    /// Add a directed edge.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownNode` if either endpoint is missing.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), DomainError> {
        let from = self
            .index_of(edge.from.as_str())
            .ok_or_else(|| DomainError::UnknownNode(edge.from.clone()))?;
        if !self.has_node(edge.to.as_str()) {
            return Err(DomainError::UnknownNode(edge.to.clone()));
        }
        self.adjacency[from].push(edge);
        self.edge_count += 1;
        Ok(())
    }

    /// Check whether a node exists.
    pub fn has_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|idx| &self.nodes[idx])
    }

    /// Outgoing edges of a node. Empty for unknown nodes.
    pub fn neighbors(&self, id: &str) -> &[Edge] {
        self.index_of(id)
            .map(|idx| self.adjacency[idx].as_slice())
            .unwrap_or(&[])
    }

    /// All nodes, in dataset order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Shortest path using local edges only.
    ///
    /// See [`LocalPathFinder`] for the weighting rules.
    pub fn local_shortest_path(&self, from: &str, to: &str) -> LocalPath {
        LocalPathFinder::new(self).shortest_path(from, to)
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn node_at(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub(crate) fn edges_at(&self, idx: usize) -> &[Edge] {
        &self.adjacency[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Mode, NodeCategory};

    fn id(s: &str) -> NodeId {
        NodeId::parse(s).unwrap()
    }

    fn node(s: &str) -> Node {
        Node::new(id(s), format!("{s} name"), NodeCategory::Stop)
    }

    fn edge(from: &str, to: &str, mode: Mode, time: u32, cost: u32, dist: u32) -> Edge {
        Edge::new(id(from), id(to), mode, time, cost, dist)
    }

    fn sample() -> LocationGraph {
        let mut g = LocationGraph::new();
        for n in ["A", "B", "C"] {
            g.add_node(node(n));
        }
        g.add_edge(edge("A", "B", Mode::Walk, 10, 0, 800)).unwrap();
        g.add_edge(edge("A", "B", Mode::Rickshaw, 4, 20, 800)).unwrap();
        g.add_edge(edge("B", "C", Mode::Walk, 8, 0, 600)).unwrap();
        g
    }

    #[test]
    fn empty_graph() {
        let g = LocationGraph::new();
        assert_eq!(g.node_count(), 0);
        assert!(!g.has_node("A"));
        assert!(g.node("A").is_none());
        assert!(g.neighbors("A").is_empty());
    }

    #[test]
    fn every_node_is_found() {
        let g = sample();
        for n in g.nodes() {
            assert!(g.has_node(n.id.as_str()));
            assert_eq!(g.node(n.id.as_str()), Some(n));
        }
        assert_eq!(g.node_count(), 3);
    }

    #[test]
    fn nodes_keep_dataset_order() {
        let g = sample();
        let ids: Vec<&str> = g.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut g = sample();
        let mut dup = node("A");
        dup.name = "Other".to_string();

        assert!(!g.add_node(dup));
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.node("A").map(|n| n.name.as_str()), Some("A name"));
    }

    #[test]
    fn neighbors_include_every_edge() {
        let g = sample();
        let from_a = g.neighbors("A");
        assert_eq!(from_a.len(), 2);
        assert!(from_a.contains(&edge("A", "B", Mode::Walk, 10, 0, 800)));
        assert!(from_a.contains(&edge("A", "B", Mode::Rickshaw, 4, 20, 800)));
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn edges_are_directed() {
        let g = sample();
        assert!(g.neighbors("C").is_empty());
        assert!(g.neighbors("B").iter().all(|e| e.to.as_str() != "A"));
    }

    #[test]
    fn edge_to_unknown_node_rejected() {
        let mut g = sample();
        let err = g.add_edge(edge("A", "Z", Mode::Walk, 1, 0, 1)).unwrap_err();
        assert_eq!(err, DomainError::UnknownNode(id("Z")));

        let err = g.add_edge(edge("Y", "A", Mode::Walk, 1, 0, 1)).unwrap_err();
        assert_eq!(err, DomainError::UnknownNode(id("Y")));

        assert_eq!(g.edge_count(), 3);
    }
}
