//! Serializable description of a whole graph.
//!
//! A [`GraphDescription`] lists nodes, edges and groups declaratively and can
//! be loaded into a [`LayoutManager`](crate::LayoutManager) in one call.
//!
//! ```toml
//! rankdir = "LR"
//!
//! [[nodes]]
//! id = "api"
//! width = 120
//! height = 48
//!
//! [[edges]]
//! from = "api"
//! to = "db"
//!
//! [[groups]]
//! members = ["api", "db"]
//! ```

use serde::Deserialize;

use tracery_core::options::{EngineKind, RankDir};

/// A complete graph: nodes, edges, groups and optional layout choices.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphDescription {
    #[serde(default)]
    pub rankdir: Option<RankDir>,
    #[serde(default)]
    pub engine: Option<EngineKind>,
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
    #[serde(default)]
    pub edges: Vec<EdgeDescription>,
    #[serde(default)]
    pub groups: Vec<GroupDescription>,
}

/// A node with its size in pixels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDescription {
    #[serde(default)]
    pub id: Option<String>,
    pub width: f64,
    pub height: f64,
}

/// A directed edge between two node identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeDescription {
    pub from: String,
    pub to: String,
}

/// A cluster of node identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupDescription {
    pub members: Vec<String>,
}
