//! Edge-list input: read the source and map names to node ids.
//!
//! The graph only knows integer ids, so the CLI owns the name table. Ids are
//! handed out densely in first-seen order.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use dgraph_core::parse::{Entry, parse_edge_list};
use dgraph_core::{Graph, Node};
use tracing::debug;

use crate::config::InputConfig;

/// A [`Graph`] plus the names its node ids stand for.
#[derive(Debug, Default)]
pub struct LabeledGraph {
    graph: Graph,
    labels: Vec<String>,
    ids: HashMap<String, Node>,
}

impl LabeledGraph {
    /// Parse edge-list text and build the graph.
    ///
    /// # Errors
    ///
    /// Returns the parser's [`dgraph_core::GraphError::Parse`] for a
    /// malformed line.
    pub fn parse(text: &str, config: &InputConfig) -> dgraph_core::Result<Self> {
        let entries = parse_edge_list(text, &config.comment_prefix)?;
        Ok(Self::from_entries(&entries, config.dedup_edges))
    }

    /// Build from parsed declarations, optionally skipping repeated edges.
    pub fn from_entries(entries: &[Entry<'_>], dedup_edges: bool) -> Self {
        let mut labeled = Self::default();
        let mut seen: HashSet<(Node, Node)> = HashSet::new();
        let mut skipped = 0_usize;

        for entry in entries {
            match *entry {
                Entry::Node(name) => {
                    let node = labeled.intern(name);
                    labeled.graph.add(node);
                }
                Entry::Edge(src, dst) => {
                    let src = labeled.intern(src);
                    let dst = labeled.intern(dst);
                    if dedup_edges && !seen.insert((src, dst)) {
                        skipped += 1;
                        continue;
                    }
                    labeled.graph.link(src, dst);
                }
            }
        }

        debug!(
            nodes = labeled.graph.node_count(),
            edges = labeled.graph.edge_count(),
            skipped,
            "built graph from edge list"
        );
        labeled
    }

    fn intern(&mut self, name: &str) -> Node {
        if let Some(&node) = self.ids.get(name) {
            return node;
        }
        let node = self.labels.len();
        self.labels.push(name.to_string());
        self.ids.insert(name.to_string(), node);
        node
    }

    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The name behind `node`; empty for an id this graph never handed out.
    pub fn label(&self, node: Node) -> &str {
        self.labels.get(node).map_or("", String::as_str)
    }

    /// Names for `nodes`, sorted by name when `sort` is set.
    pub fn names(&self, nodes: &[Node], sort: bool) -> Vec<String> {
        let mut names: Vec<String> = nodes.iter().map(|&n| self.label(n).to_string()).collect();
        if sort {
            names.sort_unstable();
        }
        names
    }
}

/// Read the edge list from `path`, or from stdin when `path` is `None` or `-`.
///
/// # Errors
///
/// Returns an error naming the file if it cannot be read.
pub fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read edge list from stdin")?;
            Ok(text)
        }
    }
}
