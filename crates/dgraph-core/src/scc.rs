//! Strongly connected components in dependency order (Kosaraju).
//!
//! # Algorithm
//!
//! 1. **Forward pass** — visit live nodes in ascending id order and run a
//!    depth-first search over `out` edges from each unvisited root. Nodes are
//!    marked on entry and appended to a finishing list in post-order.
//! 2. **Transpose pass** — walk the finishing list backwards. Every node not
//!    yet claimed roots a depth-first search over `in` edges; all nodes it
//!    reaches form one component.
//!
//! Components come out in the order their transpose search started, which is
//! dependency order: for an edge `u → v` across components, `u`'s component is
//! emitted before `v`'s. On an acyclic graph every component is a singleton and
//! the result is a topological sort.
//!
//! # Visitation state
//!
//! One bit per node serves both passes. The forward pass sets a node's bit
//! when it is first seen; the transpose pass treats a set bit as "not yet
//! claimed" and clears it on claim. The two passes still behave as two
//! independent visited sets.
//!
//! # Stack safety
//!
//! Both searches run on an explicit frame stack (`(node, next neighbor)`), in
//! the same order a recursive search would visit, so a long dependency chain
//! costs heap rather than call stack.

use std::ops::Deref;

use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

use crate::graph::{Graph, Node};

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// One strongly connected component: a non-empty set of mutually reachable
/// nodes.
///
/// A component is a snapshot taken when it was computed; mutating the graph
/// afterwards does not change it. Node order inside a component reflects
/// traversal order and carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component {
    nodes: Box<[Node]>,
}

impl Component {
    /// The member nodes in traversal order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return `true` if this component groups more than one node.
    ///
    /// A lone node with a self-loop is still a singleton here; see
    /// [`Graph::cycles`] for a view that also reports self-loops.
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        self.nodes.len() > 1
    }

    /// The members sorted ascending.
    #[must_use]
    pub fn sorted(&self) -> Vec<Node> {
        let mut nodes = self.nodes.to_vec();
        nodes.sort_unstable();
        nodes
    }
}

impl Deref for Component {
    type Target = [Node];

    fn deref(&self) -> &[Node] {
        &self.nodes
    }
}

impl From<Component> for Vec<Node> {
    fn from(component: Component) -> Self {
        component.nodes.into_vec()
    }
}

impl IntoIterator for Component {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Component {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

impl Graph {
    /// Return the strongly connected components in dependency order.
    ///
    /// See [`strong_components`].
    #[must_use]
    pub fn strong_components(&self) -> Vec<Component> {
        strong_components(self)
    }
}

/// Return the strongly connected components of `graph` in dependency order.
///
/// Every live node appears in exactly one component. The graph is only read;
/// each call recomputes from scratch, and repeated calls on an unchanged graph
/// return the same components in the same order.
#[must_use]
#[instrument(level = "debug", skip(graph), fields(capacity = graph.capacity()))]
pub fn strong_components(graph: &Graph) -> Vec<Component> {
    let mut marks = FixedBitSet::with_capacity(graph.capacity());
    let mut stack: Vec<(Node, usize)> = Vec::new();

    // Forward pass: finishing order over `out`.
    let mut order: Vec<Node> = Vec::with_capacity(graph.capacity());
    for root in graph.nodes() {
        if marks.put(root) {
            continue;
        }
        depth_first(
            root,
            |node| graph.successors(node),
            |node| marks.put(node),
            |node| order.push(node),
            &mut stack,
        );
    }

    // Transpose pass: a set bit now means "not yet claimed".
    let mut components: Vec<Component> = Vec::new();
    let mut members: Vec<Node> = Vec::new();
    for &root in order.iter().rev() {
        if !claim(&mut marks, root) {
            continue;
        }
        depth_first(
            root,
            |node| graph.predecessors(node),
            |node| !claim(&mut marks, node),
            |node| members.push(node),
            &mut stack,
        );
        components.push(Component {
            nodes: members.as_slice().into(),
        });
        members.clear();
    }

    debug!(
        nodes = order.len(),
        components = components.len(),
        cycles = components.iter().filter(|c| c.is_cycle()).count(),
        "computed strong components"
    );
    components
}

/// Clear `node`'s bit, returning `true` if it was still set.
fn claim(marks: &mut FixedBitSet, node: Node) -> bool {
    let unclaimed = marks.contains(node);
    marks.set(node, false);
    unclaimed
}

/// Iterative depth-first search from an already-marked `root`.
///
/// `seen` marks a node and reports whether it had been seen before; unseen
/// neighbors are descended into immediately, in adjacency order. `finish` is
/// called for each node once all of its descendants are done (post-order),
/// ending with `root`.
fn depth_first<'g>(
    root: Node,
    neighbors: impl Fn(Node) -> &'g [Node],
    mut seen: impl FnMut(Node) -> bool,
    mut finish: impl FnMut(Node),
    stack: &mut Vec<(Node, usize)>,
) {
    stack.push((root, 0));
    while let Some(frame) = stack.last_mut() {
        let (node, next) = *frame;
        if let Some(&neighbor) = neighbors(node).get(next) {
            frame.1 = next + 1;
            if !seen(neighbor) {
                stack.push((neighbor, 0));
            }
        } else {
            stack.pop();
            finish(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_components(graph: &Graph) -> Vec<Vec<Node>> {
        graph.strong_components().iter().map(Component::sorted).collect()
    }

    #[test]
    fn empty_graph_has_no_components() {
        assert!(Graph::new().strong_components().is_empty());
    }

    #[test]
    fn isolated_nodes_come_out_in_reverse_finish_order() {
        let g = Graph::with_size(3);
        assert_eq!(sorted_components(&g), vec![vec![2], vec![1], vec![0]]);
    }

    #[test]
    fn chain_is_topologically_ordered() {
        let g: Graph = [(2, 1), (1, 0)].into_iter().collect();
        assert_eq!(sorted_components(&g), vec![vec![2], vec![1], vec![0]]);
    }

    #[test]
    fn two_node_cycle_is_one_component() {
        let g: Graph = [(0, 1), (1, 0)].into_iter().collect();
        let comps = g.strong_components();

        assert_eq!(comps.len(), 1);
        assert!(comps[0].is_cycle());
        assert_eq!(comps[0].sorted(), vec![0, 1]);
    }

    #[test]
    fn self_loops_stay_singletons() {
        let g: Graph = [(0, 0), (1, 1), (2, 2)].into_iter().collect();
        let comps = g.strong_components();

        assert_eq!(comps.len(), 3);
        assert!(comps.iter().all(|c| !c.is_cycle()));
    }

    #[test]
    fn removed_nodes_are_skipped() {
        let mut g: Graph = [(0, 1), (1, 2), (2, 0), (2, 3)].into_iter().collect();
        g.remove(1);

        // Left with 2 -> 0 and 2 -> 3.
        let comps = sorted_components(&g);
        assert_eq!(comps, vec![vec![2], vec![3], vec![0]]);
    }

    #[test]
    fn components_are_snapshots() {
        let mut g: Graph = [(0, 1), (1, 0)].into_iter().collect();
        let before = g.strong_components();
        g.remove(1);

        assert_eq!(before[0].sorted(), vec![0, 1]);
        assert_eq!(sorted_components(&g), vec![vec![0]]);
    }

    #[test]
    fn component_accessors() {
        let g: Graph = [(3, 1), (1, 3)].into_iter().collect();
        let comp = g
            .strong_components()
            .into_iter()
            .find(|c| c.is_cycle())
            .expect("cycle component");

        assert_eq!(comp.len(), 2);
        assert!(comp.contains(&3));
        let mut owned: Vec<Node> = comp.into();
        owned.sort_unstable();
        assert_eq!(owned, vec![1, 3]);
    }

    #[test]
    fn depth_first_matches_recursive_post_order() {
        // 0 -> 1 -> 2, 0 -> 3, 1 -> 3
        let g: Graph = [(0, 1), (1, 2), (0, 3), (1, 3)].into_iter().collect();
        let mut marks = FixedBitSet::with_capacity(g.capacity());
        let mut order = Vec::new();
        let mut stack = Vec::new();

        marks.insert(0);
        depth_first(
            0,
            |n| g.successors(n),
            |n| marks.put(n),
            |n| order.push(n),
            &mut stack,
        );

        assert_eq!(order, vec![2, 3, 1, 0]);
        assert!(stack.is_empty());
    }
}
