//! Plain-text edge lists.
//!
//! # Format
//!
//! One declaration per line:
//!
//! ```text
//! # comment
//! app lib
//! lib -> core
//! a -> b -> c
//! orphan
//! ```
//!
//! Two names separated by whitespace or by `->` declare an edge. A chain
//! `a -> b -> c` declares `a -> b` and `b -> c`. A lone name declares an
//! isolated node.
//!
//! Blank lines and lines starting with the comment prefix are skipped.
//! Trailing comments are not recognised; the prefix only counts at the start
//! of a line.
//!
//! Parsing yields borrowed names only. Mapping names to [`crate::Node`] ids is
//! the caller's job, since the graph itself never stores labels.

use crate::error::{GraphError, Result};

const ARROW: &str = "->";

/// One declaration from an edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    /// A node named on a line by itself.
    Node(&'a str),
    /// An edge `src -> dst`.
    Edge(&'a str, &'a str),
}

/// Parse an edge list into declarations, in input order.
///
/// An empty `comment_prefix` disables comment handling.
///
/// # Errors
///
/// Returns [`GraphError::Parse`] with the 1-based line number for a line with
/// more than two whitespace-separated names and no arrow, or for an arrow
/// with a missing or multi-word endpoint.
pub fn parse_edge_list<'a>(input: &'a str, comment_prefix: &str) -> Result<Vec<Entry<'a>>> {
    let mut entries = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || (!comment_prefix.is_empty() && line.starts_with(comment_prefix)) {
            continue;
        }
        let line_no = idx + 1;

        if line.contains(ARROW) {
            let endpoints = line
                .split(ARROW)
                .map(|part| endpoint(part, line_no))
                .collect::<Result<Vec<_>>>()?;
            entries.extend(
                endpoints
                    .windows(2)
                    .map(|pair| Entry::Edge(pair[0], pair[1])),
            );
            continue;
        }

        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(node), None, None) => entries.push(Entry::Node(node)),
            (Some(src), Some(dst), None) => entries.push(Entry::Edge(src, dst)),
            _ => {
                return Err(GraphError::Parse {
                    line: line_no,
                    message: format!(
                        "expected `src dst` or `src -> dst`, found {} names",
                        line.split_whitespace().count()
                    ),
                });
            }
        }
    }

    Ok(entries)
}

fn endpoint(part: &str, line: usize) -> Result<&str> {
    let name = part.trim();
    if name.is_empty() {
        return Err(GraphError::Parse {
            line,
            message: "missing node name around `->`".to_string(),
        });
    }
    if name.split_whitespace().nth(1).is_some() {
        return Err(GraphError::Parse {
            line,
            message: format!("node name `{name}` contains whitespace"),
        });
    }
    Ok(name)
}
