#![forbid(unsafe_code)]
//! dgraph-core library.
//!
//! A directed graph over plain integer node ids whose one job is reporting
//! strongly connected components in dependency order.
//!
//! ```text
//! Graph::link(src, dst)            (forward + transpose adjacency)
//!        ↓  Graph::strong_components()
//! Vec<Component>                   (Kosaraju, dependency order)
//!        ↓  order::{cycles, topological_order, ComponentIndex}
//! cycle sets / flat order / node → component lookup
//! ```
//!
//! # Conventions
//!
//! - **Errors**: Fallible helpers return [`error::Result`]; the store and the
//!   SCC engine themselves are total.
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`).
//!
//! # Example
//!
//! ```
//! use dgraph_core::Graph;
//!
//! let mut g = Graph::with_size(7);
//! for (src, dst) in [(0, 2), (2, 1), (1, 3), (3, 4), (4, 5), (5, 6), (6, 4)] {
//!     g.link(src, dst);
//! }
//!
//! let order: Vec<Vec<usize>> = g
//!     .strong_components()
//!     .iter()
//!     .map(|c| c.sorted())
//!     .collect();
//! assert_eq!(order, vec![vec![0], vec![2], vec![1], vec![3], vec![4, 5, 6]]);
//! ```

pub mod error;
pub mod graph;
pub mod order;
pub mod parse;
pub mod scc;

pub use error::{GraphError, Result};
pub use graph::{Graph, Node};
pub use order::ComponentIndex;
pub use scc::{Component, strong_components};
