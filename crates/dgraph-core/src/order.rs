//! Answers derived from one strong-components run.
//!
//! - [`Graph::cycles`] — the components that represent circular dependencies.
//! - [`Graph::topological_order`] — a flat dependency order, or the first
//!   cycle that prevents one.
//! - [`ComponentIndex`] — node → component lookup over a single run.

#![allow(clippy::module_name_repetitions)]

use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, Node};
use crate::scc::Component;

impl Graph {
    /// Return the components that are cycles, in dependency order.
    ///
    /// A component is reported when it has more than one member, or when its
    /// single member has a self-loop.
    #[must_use]
    pub fn cycles(&self) -> Vec<Component> {
        self.strong_components()
            .into_iter()
            .filter(|component| self.is_cyclic(component))
            .collect()
    }

    /// Return every live node in dependency order.
    ///
    /// For each edge `u → v`, `u` comes before `v`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Cycle`] naming the first cyclic component in
    /// dependency order (a self-loop counts) if the graph is not acyclic.
    pub fn topological_order(&self) -> Result<Vec<Node>> {
        let components = self.strong_components();
        let mut order = Vec::with_capacity(components.len());

        for component in components {
            if self.is_cyclic(&component) {
                let members = component.sorted();
                debug!(?members, "topological order blocked by cycle");
                return Err(GraphError::Cycle { members });
            }
            order.extend(component);
        }

        Ok(order)
    }

    /// Run the SCC engine once and index the result by node.
    #[must_use]
    pub fn component_index(&self) -> ComponentIndex {
        ComponentIndex::new(self.capacity(), self.strong_components())
    }

    /// Return `true` if `component` is a cycle in this graph: it has more
    /// than one member, or its single member has a self-loop.
    #[must_use]
    pub fn is_cyclic(&self, component: &Component) -> bool {
        component.is_cycle() || self.has_self_loop(component[0])
    }
}

// ---------------------------------------------------------------------------
// ComponentIndex
// ---------------------------------------------------------------------------

/// Strong components of one graph snapshot plus a node → position lookup.
///
/// Positions are indices into [`ComponentIndex::components`], so a lower
/// position means earlier in dependency order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentIndex {
    components: Vec<Component>,
    /// Sized to the graph's capacity; `None` for ids that were not live.
    component_of: Vec<Option<usize>>,
}

impl ComponentIndex {
    fn new(capacity: usize, components: Vec<Component>) -> Self {
        let mut component_of = vec![None; capacity];
        for (position, component) in components.iter().enumerate() {
            for &node in component {
                component_of[node] = Some(position);
            }
        }
        Self {
            components,
            component_of,
        }
    }

    /// All components in dependency order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Return `true` if the indexed graph had no live nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Position of the component containing `node`.
    #[must_use]
    pub fn component_of(&self, node: Node) -> Option<usize> {
        self.component_of.get(node).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_include_self_loops_and_groups() {
        // 0 <-> 1, 2 -> 2, 3 isolated
        let mut g: Graph = [(0, 1), (1, 0), (2, 2)].into_iter().collect();
        g.add(3);

        let cycles: Vec<Vec<Node>> = g.cycles().iter().map(Component::sorted).collect();
        assert_eq!(cycles.len(), 2);
        assert!(cycles.contains(&vec![0, 1]));
        assert!(cycles.contains(&vec![2]));
    }

    #[test]
    fn cycles_empty_for_dag() {
        let g: Graph = [(0, 1), (1, 2), (0, 2)].into_iter().collect();
        assert!(g.cycles().is_empty());
    }

    #[test]
    fn topological_order_for_dag() {
        let g: Graph = [(3, 1), (1, 0), (3, 2), (2, 0)].into_iter().collect();
        let order = g.topological_order().expect("acyclic");

        let position = |n: Node| order.iter().position(|&x| x == n).expect("present");
        for (src, dst) in g.edges() {
            assert!(position(src) < position(dst), "{src} before {dst}");
        }
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn topological_order_reports_cycle() {
        let g: Graph = [(0, 1), (1, 2), (2, 1)].into_iter().collect();
        let err = g.topological_order().expect_err("cyclic");
        assert_eq!(err, GraphError::Cycle { members: vec![1, 2] });
    }

    #[test]
    fn topological_order_rejects_self_loop() {
        let g: Graph = [(0, 0)].into_iter().collect();
        assert_eq!(
            g.topological_order(),
            Err(GraphError::Cycle { members: vec![0] })
        );
    }

    #[test]
    fn topological_order_empty_graph() {
        assert_eq!(Graph::new().topological_order(), Ok(Vec::new()));
    }

    #[test]
    fn component_index_lookups() {
        // 0 -> 1 <-> 2, node 4 removed, 3 isolated
        let mut g: Graph = [(0, 1), (1, 2), (2, 1)].into_iter().collect();
        g.add(4);
        g.remove(4);
        g.add(3);

        let index = g.component_index();
        assert_eq!(index.len(), 3);
        assert_eq!(index.component_of(1), index.component_of(2));
        assert_eq!(index.component_of(4), None);
        assert_eq!(index.component_of(99), None);

        let of_zero = index.component_of(0).expect("0 is live");
        let of_one = index.component_of(1).expect("1 is live");
        assert!(of_zero < of_one, "0 depends-before the 1/2 cycle");
        assert_eq!(index.components()[of_one].sorted(), vec![1, 2]);
    }

    #[test]
    fn is_cyclic_counts_self_loops() {
        let g: Graph = [(0, 0), (1, 2), (2, 1), (2, 3)].into_iter().collect();
        let flags: Vec<(Vec<Node>, bool)> = g
            .strong_components()
            .iter()
            .map(|c| (c.sorted(), g.is_cyclic(c)))
            .collect();

        assert!(flags.contains(&(vec![0], true)));
        assert!(flags.contains(&(vec![1, 2], true)));
        assert!(flags.contains(&(vec![3], false)));
    }
}
