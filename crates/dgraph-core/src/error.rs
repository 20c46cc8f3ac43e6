//! Error types for the fallible helpers built on top of the graph.
//!
//! The store and the SCC engine never fail; only derived queries that demand
//! an acyclic graph and the edge-list parser report errors.

use crate::graph::Node;

/// Convenience alias used throughout `dgraph-core`.
pub type Result<T> = std::result::Result<T, GraphError>;

// ---------------------------------------------------------------------------
// GraphError
// ---------------------------------------------------------------------------

/// Errors reported by graph helpers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The graph contains a dependency cycle, so no topological order exists.
    ///
    /// `members` holds the node ids of the first offending component in
    /// dependency order, sorted ascending.
    #[error("dependency cycle among nodes {}", format_members(.members))]
    Cycle { members: Vec<Node> },

    /// An edge-list line could not be parsed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl GraphError {
    /// Machine-readable code for structured output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Cycle { .. } => "cycle_detected",
            Self::Parse { .. } => "parse_error",
        }
    }
}

fn format_members(members: &[Node]) -> String {
    let parts: Vec<String> = members.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
