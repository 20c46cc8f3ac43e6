//! Graph store: forward and transpose adjacency over integer node ids.
//!
//! # Overview
//!
//! Nodes are plain `usize` ids in `0..capacity()`. Callers keep their own
//! mapping from ids to whatever the nodes stand for; the graph never sees
//! labels or payloads.
//!
//! ## Representation
//!
//! The store is a dense array indexed by node id. Each slot is either a live
//! node holding both adjacency lists (`out` and its transpose `inc`) or a
//! tombstone left behind by [`Graph::remove`]. Tombstones keep "never existed
//! or removed" distinct from "exists with no edges", which is what lets the
//! dense form support removal. Ids are never compacted or recycled; a later
//! [`Graph::add`] or [`Graph::link`] naming a tombstoned id revives it.
//!
//! ## Edge Direction
//!
//! `link(src, dst)` records `src → dst`: `dst` is appended to `out[src]` and
//! `src` to `in[dst]`. For every edge `dst ∈ out[src]` iff `src ∈ in[dst]`,
//! with equal multiplicity. Duplicate edges and self-loops are stored as given.

#![allow(clippy::module_name_repetitions)]

use tracing::trace;

/// A node identifier.
pub type Node = usize;

// ---------------------------------------------------------------------------
// Adjacency
// ---------------------------------------------------------------------------

/// Both adjacency lists of one live node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Adjacency {
    /// Nodes this node has an edge to.
    pub(crate) out: Vec<Node>,
    /// Nodes that have an edge to this node.
    pub(crate) inc: Vec<Node>,
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// A directed graph maintaining forward and transpose adjacency.
///
/// All mutators are total: out-of-range ids grow the store, and unlinking or
/// removing something that does not exist is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    /// `None` marks a removed id.
    pub(crate) slots: Vec<Option<Adjacency>>,
}

impl Graph {
    /// Create an empty graph with no nodes.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Create a graph whose nodes `0..nodes` already exist with no edges.
    #[must_use]
    pub fn with_size(nodes: usize) -> Self {
        let mut slots = Vec::with_capacity(nodes);
        slots.resize_with(nodes, || Some(Adjacency::default()));
        Self { slots }
    }

    /// Ensure `node` exists.
    ///
    /// Grows the store to `node + 1` slots if needed; every slot created by
    /// the growth is a live node with no edges. A tombstoned id is revived.
    /// Adding a live node does nothing.
    ///
    /// # Panics
    ///
    /// Panics with a capacity overflow if `node` is `usize::MAX`; a store
    /// that large cannot be allocated.
    pub fn add(&mut self, node: Node) {
        let need = node.saturating_add(1);
        if self.slots.len() < need {
            trace!(from = self.slots.len(), to = need, "growing graph");
            self.slots.resize_with(need, || Some(Adjacency::default()));
            return;
        }
        let slot = &mut self.slots[node];
        if slot.is_none() {
            trace!(node, "reviving removed node");
            *slot = Some(Adjacency::default());
        }
    }

    /// Add the edge `src → dst`, creating either endpoint if needed.
    ///
    /// Duplicate edges are kept; `link(n, n)` records a self-loop.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is `usize::MAX`, as [`Graph::add`] does.
    pub fn link(&mut self, src: Node, dst: Node) {
        self.add(src);
        self.add(dst);
        self.adjacency_mut(src).out.push(dst);
        self.adjacency_mut(dst).inc.push(src);
    }

    /// Remove one occurrence of the edge `src → dst`.
    ///
    /// The first matching entry is removed from both lists; the order of the
    /// remaining neighbors is preserved. Does nothing if the edge is absent.
    pub fn unlink(&mut self, src: Node, dst: Node) {
        let Some(pos) = self
            .successors(src)
            .iter()
            .position(|&next| next == dst)
        else {
            return;
        };
        self.adjacency_mut(src).out.remove(pos);

        let inc = &mut self.adjacency_mut(dst).inc;
        if let Some(back) = inc.iter().position(|&prev| prev == src) {
            inc.remove(back);
        }
    }

    /// Remove `node` and every edge touching it.
    ///
    /// Each predecessor loses `node` from its `out` list and each successor
    /// loses it from its `in` list (all duplicates included). The slot becomes
    /// a tombstone: `node` no longer exists, and no traversal will report it.
    /// Does nothing if `node` does not exist.
    pub fn remove(&mut self, node: Node) {
        let Some(adj) = self.slots.get_mut(node).and_then(Option::take) else {
            return;
        };

        for &pred in &adj.inc {
            if let Some(Some(p)) = self.slots.get_mut(pred) {
                p.out.retain(|&n| n != node);
            }
        }
        for &succ in &adj.out {
            if let Some(Some(s)) = self.slots.get_mut(succ) {
                s.inc.retain(|&n| n != node);
            }
        }
        trace!(node, edges = adj.out.len() + adj.inc.len(), "removed node");
    }

    /// Number of id slots, live or removed. Every live id is below this.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Number of edges, counting duplicates.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.slots.iter().flatten().map(|adj| adj.out.len()).sum()
    }

    /// Return `true` if the graph has no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Return `true` if `node` exists.
    #[must_use]
    pub fn contains(&self, node: Node) -> bool {
        matches!(self.slots.get(node), Some(Some(_)))
    }

    /// Return `true` if at least one edge `src → dst` exists.
    #[must_use]
    pub fn contains_edge(&self, src: Node, dst: Node) -> bool {
        self.successors(src).contains(&dst)
    }

    /// Return `true` if `node` has an edge to itself.
    #[must_use]
    pub fn has_self_loop(&self, node: Node) -> bool {
        self.contains_edge(node, node)
    }

    /// Nodes `node` has an edge to, in link order.
    ///
    /// Empty for a node that does not exist.
    #[must_use]
    pub fn successors(&self, node: Node) -> &[Node] {
        self.adjacency(node).map_or(&[], |adj| adj.out.as_slice())
    }

    /// Nodes that have an edge to `node`, in link order.
    ///
    /// Empty for a node that does not exist.
    #[must_use]
    pub fn predecessors(&self, node: Node) -> &[Node] {
        self.adjacency(node).map_or(&[], |adj| adj.inc.as_slice())
    }

    /// Iterate over live nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(node, slot)| slot.as_ref().map(|_| node))
    }

    /// Iterate over every edge as `(src, dst)`, grouped by source.
    pub fn edges(&self) -> impl Iterator<Item = (Node, Node)> + '_ {
        self.slots.iter().enumerate().flat_map(|(src, slot)| {
            slot.iter()
                .flat_map(move |adj| adj.out.iter().map(move |&dst| (src, dst)))
        })
    }

    fn adjacency(&self, node: Node) -> Option<&Adjacency> {
        self.slots.get(node).and_then(Option::as_ref)
    }

    /// Callers must have ensured `node` exists via [`Graph::add`] or checked
    /// that it has an edge, which implies it exists.
    fn adjacency_mut(&mut self, node: Node) -> &mut Adjacency {
        self.slots[node].get_or_insert_with(Adjacency::default)
    }
}

impl Extend<(Node, Node)> for Graph {
    fn extend<I: IntoIterator<Item = (Node, Node)>>(&mut self, edges: I) {
        for (src, dst) in edges {
            self.link(src, dst);
        }
    }
}

impl FromIterator<(Node, Node)> for Graph {
    fn from_iter<I: IntoIterator<Item = (Node, Node)>>(edges: I) -> Self {
        let mut graph = Self::new();
        graph.extend(edges);
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_graph_is_empty() {
        let g = Graph::new();
        assert!(g.is_empty());
        assert_eq!(g.capacity(), 0);
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn with_size_creates_isolated_nodes() {
        let g = Graph::with_size(3);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert!(g.successors(1).is_empty());
    }

    #[test]
    fn add_grows_and_fills_gap() {
        let mut g = Graph::new();
        g.add(4);
        assert_eq!(g.capacity(), 5);
        assert_eq!(g.node_count(), 5);
        assert!(g.contains(2));

        g.add(1);
        assert_eq!(g.capacity(), 5, "adding a live node never grows");
    }

    #[test]
    fn link_maintains_both_directions() {
        let mut g = Graph::new();
        g.link(0, 2);
        g.link(1, 2);

        assert_eq!(g.successors(0), &[2]);
        assert_eq!(g.predecessors(2), &[0, 1]);
        assert_eq!(g.capacity(), 3);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn link_keeps_duplicates_and_self_loops() {
        let mut g = Graph::new();
        g.link(0, 1);
        g.link(0, 1);
        g.link(1, 1);

        assert_eq!(g.successors(0), &[1, 1]);
        assert_eq!(g.predecessors(1), &[0, 0, 1]);
        assert!(g.has_self_loop(1));
        assert!(!g.has_self_loop(0));
    }

    #[test]
    fn unlink_removes_one_occurrence() {
        let mut g = Graph::new();
        g.link(0, 1);
        g.link(0, 2);
        g.link(0, 1);

        g.unlink(0, 1);
        assert_eq!(g.successors(0), &[2, 1]);
        assert_eq!(g.predecessors(1), &[0]);

        g.unlink(0, 1);
        assert_eq!(g.successors(0), &[2]);
        assert!(g.predecessors(1).is_empty());
    }

    #[test]
    fn unlink_missing_edge_is_noop() {
        let mut g = Graph::new();
        g.link(0, 1);
        let before = g.clone();

        g.unlink(1, 0);
        g.unlink(5, 6);
        g.unlink(0, 9);

        assert_eq!(g, before);
    }

    #[test]
    fn remove_strips_edges_and_tombstones() {
        let mut g = Graph::new();
        g.link(0, 1);
        g.link(1, 2);
        g.link(2, 1);
        g.link(1, 1);
        g.link(3, 1);
        g.link(3, 1);

        g.remove(1);

        assert!(!g.contains(1));
        assert_eq!(g.capacity(), 4, "removal never shrinks the id space");
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec![0, 2, 3]);
        assert!(g.successors(0).is_empty());
        assert!(g.successors(2).is_empty());
        assert!(g.successors(3).is_empty());
        assert!(g.predecessors(2).is_empty());
        assert!(g.successors(1).is_empty());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn remove_missing_node_is_noop() {
        let mut g = Graph::with_size(2);
        g.link(0, 1);
        let before = g.clone();

        g.remove(7);
        assert_eq!(g, before);

        g.remove(1);
        let after_first = g.clone();
        g.remove(1);
        assert_eq!(g, after_first);
    }

    #[test]
    fn add_revives_removed_node_without_edges() {
        let mut g = Graph::new();
        g.link(0, 1);
        g.remove(1);
        g.add(1);

        assert!(g.contains(1));
        assert!(g.predecessors(1).is_empty());
        assert!(g.successors(0).is_empty());
    }

    #[test]
    fn link_revives_removed_endpoints() {
        let mut g = Graph::with_size(3);
        g.remove(2);
        g.link(2, 0);

        assert!(g.contains(2));
        assert_eq!(g.successors(2), &[0]);
        assert_eq!(g.predecessors(0), &[2]);
    }

    #[test]
    fn edges_iterates_in_source_order() {
        let g: Graph = [(1, 0), (0, 2), (0, 1)].into_iter().collect();
        assert_eq!(g.edges().collect::<Vec<_>>(), vec![(0, 2), (0, 1), (1, 0)]);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn add_largest_id_panics() {
        Graph::new().add(usize::MAX);
    }
}
