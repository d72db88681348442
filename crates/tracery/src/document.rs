//! Graph document synthesis.
//!
//! Serializes registered nodes, edges and groups into the DOT language. Only
//! engine indices and numbers are interpolated, so caller identifiers never
//! reach the document and need no escaping.

use std::fmt;

use tracery_core::{identifier::NodeIndex, options::RankDir};

/// A node as the engine sees it: its index and its size in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NodeEntry {
    pub(crate) index: NodeIndex,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

/// A directed edge between two registered nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EdgeEntry {
    pub(crate) from: NodeIndex,
    pub(crate) to: NodeIndex,
}

/// The DOT document for a registered graph.
///
/// Groups become `cluster_<n>` subgraphs, numbered in registration order.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GraphDocument<'a> {
    pub(crate) rankdir: RankDir,
    pub(crate) nodes: &'a [NodeEntry],
    pub(crate) edges: &'a [EdgeEntry],
    pub(crate) groups: &'a [Vec<NodeIndex>],
}

impl fmt::Display for GraphDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph G {{")?;
        writeln!(f, "  rankdir={};", self.rankdir)?;
        writeln!(f, "  node [shape=record];")?;

        for node in self.nodes {
            writeln!(
                f,
                "  {} [width=\"{}\",height=\"{}\"];",
                node.index, node.width, node.height
            )?;
        }

        for edge in self.edges {
            writeln!(f, "  {} -> {};", edge.from, edge.to)?;
        }

        for (group, members) in self.groups.iter().enumerate() {
            writeln!(f, "  subgraph cluster_{group} {{")?;
            for member in members {
                writeln!(f, "    {member};")?;
            }
            writeln!(f, "  }}")?;
        }

        writeln!(f, "}}")
    }
}
