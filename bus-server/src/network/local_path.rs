//! Shortest paths over local edges.
//!
//! A Dijkstra search where the weight of a path is the triple
//! (total time, total cost, hop count), compared lexicographically. Every
//! component is a non-negative sum, so the ordering is preserved when a
//! path is extended and the usual label-setting argument holds: the first
//! time a node is popped its weight is final. Ties on the full triple keep
//! whichever path was found first; with edges explored in dataset order
//! and the heap ordered by (weight, node index) that is deterministic.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::domain::{Edge, Node};

use super::graph::LocationGraph;

/// Result of a local shortest-path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPath {
    /// False when either endpoint is unknown or no path exists.
    pub found: bool,
    /// Edges followed, in order.
    pub legs: Vec<Edge>,
    pub total_time: u32,
    pub total_cost: u32,
    pub total_distance: u32,
}

impl LocalPath {
    /// The "no path" result.
    pub fn not_found() -> Self {
        Self {
            found: false,
            legs: Vec::new(),
            total_time: 0,
            total_cost: 0,
            total_distance: 0,
        }
    }

    fn from_edges(legs: Vec<Edge>) -> Self {
        let total_time = legs.iter().map(|e| e.time_mins).sum();
        let total_cost = legs.iter().map(|e| e.cost).sum();
        let total_distance = legs.iter().map(|e| e.distance_m).sum();
        Self {
            found: true,
            legs,
            total_time,
            total_cost,
            total_distance,
        }
    }
}

/// Path weight, compared field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Weight {
    time: u64,
    cost: u64,
    hops: u64,
}

impl Weight {
    const ZERO: Weight = Weight {
        time: 0,
        cost: 0,
        hops: 0,
    };

    fn extend(self, edge: &Edge) -> Self {
        Self {
            time: self.time + u64::from(edge.time_mins),
            cost: self.cost + u64::from(edge.cost),
            hops: self.hops + 1,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct QueueEntry {
    weight: Weight,
    node: usize,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Settled search state from one source node.
///
/// Produced by [`LocalPathFinder::tree_from`]; lets the itinerary planner
/// ask for paths to many targets after a single search.
#[derive(Debug)]
pub struct ShortestPathTree<'g> {
    graph: &'g LocationGraph,
    best: Vec<Option<Weight>>,
    /// (predecessor node, index into its adjacency list)
    parent: Vec<Option<(usize, usize)>>,
}

impl<'g> ShortestPathTree<'g> {
    /// Path from the source to `to`.
    pub fn path_to(&self, to: &str) -> LocalPath {
        match self.graph.index_of(to) {
            Some(target) => self.path_to_index(target),
            None => LocalPath::not_found(),
        }
    }

    /// Nodes reachable from the source (the source included) with their
    /// travel time, in graph order.
    pub fn reachable(&self) -> impl Iterator<Item = (&'g Node, u32)> + '_ {
        self.best.iter().enumerate().filter_map(|(idx, weight)| {
            weight.map(|w| {
                (
                    self.graph.node_at(idx),
                    u32::try_from(w.time).unwrap_or(u32::MAX),
                )
            })
        })
    }

    fn path_to_index(&self, target: usize) -> LocalPath {
        if self.best[target].is_none() {
            return LocalPath::not_found();
        }

        let mut legs = Vec::new();
        let mut current = target;
        while let Some((prev, edge_idx)) = self.parent[current] {
            legs.push(self.graph.edges_at(prev)[edge_idx].clone());
            current = prev;
        }
        legs.reverse();

        LocalPath::from_edges(legs)
    }
}

/// Dijkstra search over a [`LocationGraph`].
pub struct LocalPathFinder<'g> {
    graph: &'g LocationGraph,
}

impl<'g> LocalPathFinder<'g> {
    pub fn new(graph: &'g LocationGraph) -> Self {
        Self { graph }
    }

    /// Shortest path from `from` to `to`.
    ///
    /// Time is the primary weight; equal times prefer lower cost, then fewer
    /// hops. `from == to` on an existing node yields an empty, zero-weight,
    /// found path.
    pub fn shortest_path(&self, from: &str, to: &str) -> LocalPath {
        let (Some(source), Some(target)) = (self.graph.index_of(from), self.graph.index_of(to))
        else {
            return LocalPath::not_found();
        };

        self.search(source, Some(target)).path_to_index(target)
    }

    /// Full shortest-path tree from `from`, or `None` for an unknown node.
    pub fn tree_from(&self, from: &str) -> Option<ShortestPathTree<'g>> {
        let source = self.graph.index_of(from)?;
        Some(self.search(source, None))
    }

    fn search(&self, source: usize, target: Option<usize>) -> ShortestPathTree<'g> {
        let n = self.graph.node_count();
        let mut best: Vec<Option<Weight>> = vec![None; n];
        let mut parent: Vec<Option<(usize, usize)>> = vec![None; n];
        let mut settled = vec![false; n];
        let mut heap = BinaryHeap::new();

        best[source] = Some(Weight::ZERO);
        heap.push(QueueEntry {
            weight: Weight::ZERO,
            node: source,
        });

        while let Some(QueueEntry { weight, node }) = heap.pop() {
            if settled[node] {
                continue;
            }
            settled[node] = true;

            if Some(node) == target {
                break;
            }

            for (edge_idx, edge) in self.graph.edges_at(node).iter().enumerate() {
                // Endpoints resolve by construction of the graph
                let Some(next) = self.graph.index_of(edge.to.as_str()) else {
                    continue;
                };
                if settled[next] {
                    continue;
                }

                let candidate = weight.extend(edge);
                let improves = best[next].is_none_or(|current| candidate < current);
                if improves {
                    best[next] = Some(candidate);
                    parent[next] = Some((node, edge_idx));
                    heap.push(QueueEntry {
                        weight: candidate,
                        node: next,
                    });
                }
            }
        }

        ShortestPathTree {
            graph: self.graph,
            best,
            parent,
        }
    }
}
