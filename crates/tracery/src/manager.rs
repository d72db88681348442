//! The layout manager: an imperative builder over the layout engine.

use std::sync::Arc;

use log::{debug, info, trace};

use tracery_core::{
    identifier::{IdentifierMap, NodeIndex},
    options::{EngineKind, OutputFormat, RankDir},
    units::px_to_inches,
};

use crate::{
    TraceryError,
    document::{EdgeEntry, GraphDocument, NodeEntry},
    engine::{Graphviz, LayoutEngine},
    graph::GraphDescription,
    layout::{self, LayoutResult},
    plain,
};

/// Collects nodes, edges and groups and lays them out on demand.
///
/// Sizes and positions are pixels with a top-left origin. Nodes are known to
/// the engine only by their [`NodeIndex`]; callers keep using their own
/// identifiers.
///
/// # Examples
///
/// ```rust,no_run
/// use tracery::{LayoutManager, options::RankDir};
///
/// let mut manager = LayoutManager::with_graphviz()?;
/// manager.add_node(100.0, 50.0, Some("A"))?;
/// manager.add_node(100.0, 50.0, Some("B"))?;
/// manager.add_edge("A", "B")?;
///
/// let result = manager.calculate(RankDir::TopToBottom, None)?;
/// for node in result.nodes() {
///     println!("{} at ({}, {})", node.id(), node.x(), node.y());
/// }
/// # Ok::<(), tracery::TraceryError>(())
/// ```
#[derive(Debug)]
pub struct LayoutManager<E: LayoutEngine + ?Sized> {
    engine: Arc<E>,
    ids: IdentifierMap,
    nodes: Vec<NodeEntry>,
    edges: Vec<EdgeEntry>,
    groups: Vec<Vec<NodeIndex>>,
    render_format: OutputFormat,
}

impl LayoutManager<Graphviz> {
    /// Create a manager backed by the shared Graphviz engine.
    ///
    /// # Errors
    ///
    /// Returns [`TraceryError::Engine`] if Graphviz cannot be bootstrapped.
    pub fn with_graphviz() -> Result<Self, TraceryError> {
        Ok(Self::new(Graphviz::shared()?))
    }
}

impl<E: LayoutEngine + ?Sized> LayoutManager<E> {
    /// Create an empty manager using the given engine.
    pub fn new(engine: Arc<E>) -> Self {
        Self {
            engine,
            ids: IdentifierMap::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            groups: Vec::new(),
            render_format: OutputFormat::Svg,
        }
    }

    /// Set the format of the visual rendering pass (builder style).
    pub fn with_render_format(mut self, format: OutputFormat) -> Self {
        self.render_format = format;
        self
    }

    /// Register a node of `width` x `height` pixels.
    ///
    /// When `id` is `None` the returned index, as a string, becomes the node's
    /// identifier for [`add_edge`](Self::add_edge) and
    /// [`add_group`](Self::add_group).
    ///
    /// # Errors
    ///
    /// Returns [`TraceryError::InvalidSize`] for non-positive or non-finite
    /// sizes and [`TraceryError::DuplicateNode`] if `id` is already taken.
    pub fn add_node(
        &mut self,
        width: f64,
        height: f64,
        id: Option<&str>,
    ) -> Result<NodeIndex, TraceryError> {
        let valid = |value: f64| value.is_finite() && value > 0.0;
        if !valid(width) || !valid(height) {
            return Err(TraceryError::InvalidSize { width, height });
        }

        let index = self.ids.insert(id)?;
        self.nodes.push(NodeEntry {
            index,
            width: px_to_inches(width),
            height: px_to_inches(height),
        });

        Ok(index)
    }

    /// Register a directed edge between two node identifiers.
    ///
    /// Duplicate edges are kept.
    ///
    /// # Errors
    ///
    /// Returns [`TraceryError::UnknownNode`] if either identifier was never
    /// registered.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<(), TraceryError> {
        let from = self.ids.resolve(from)?;
        let to = self.ids.resolve(to)?;
        self.edges.push(EdgeEntry { from, to });
        Ok(())
    }

    /// Register a group that encloses the given nodes in a cluster.
    ///
    /// # Errors
    ///
    /// Returns [`TraceryError::UnknownNode`] for the first identifier that
    /// was never registered. Nothing is registered in that case.
    pub fn add_group<I, S>(&mut self, ids: I) -> Result<(), TraceryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let members = ids
            .into_iter()
            .map(|id| self.ids.resolve(id.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        self.groups.push(members);
        Ok(())
    }

    /// Register every node, edge and group of a [`GraphDescription`].
    ///
    /// # Errors
    ///
    /// Fails on the first entry that [`add_node`](Self::add_node),
    /// [`add_edge`](Self::add_edge) or [`add_group`](Self::add_group) rejects.
    pub fn load(&mut self, graph: &GraphDescription) -> Result<(), TraceryError> {
        for node in &graph.nodes {
            self.add_node(node.width, node.height, node.id.as_deref())?;
        }
        for edge in &graph.edges {
            self.add_edge(&edge.from, &edge.to)?;
        }
        for group in &graph.groups {
            self.add_group(&group.members)?;
        }
        Ok(())
    }

    /// Returns the number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of registered edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of registered groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Returns the graph document that [`calculate`](Self::calculate) submits.
    pub fn document(&self, rankdir: RankDir) -> String {
        GraphDocument {
            rankdir,
            nodes: &self.nodes,
            edges: &self.edges,
            groups: &self.groups,
        }
        .to_string()
    }

    /// Lay out the registered graph.
    ///
    /// Without an explicit `engine`, graphs with edges use `dot` and graphs
    /// without edges use `neato`. The engine runs twice: once for the `plain`
    /// geometry and once for the visual rendering.
    ///
    /// # Errors
    ///
    /// Returns [`TraceryError::Engine`] if the engine rejects the document,
    /// [`TraceryError::Plain`] if its geometry output cannot be read, and
    /// [`TraceryError::Layout`] if it does not place every node exactly once.
    pub fn calculate(
        &self,
        rankdir: RankDir,
        engine: Option<EngineKind>,
    ) -> Result<LayoutResult, TraceryError> {
        let engine = engine.unwrap_or_else(|| EngineKind::default_for(self.edges.len()));
        info!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            groups = self.groups.len(),
            engine = engine.as_str(),
            rankdir = rankdir.as_str();
            "Calculating layout"
        );

        let document = self.document(rankdir);
        trace!(document = document.as_str(); "Generated graph document");

        let geometry = self.engine.layout(&document, OutputFormat::Plain, engine)?;
        let parsed = plain::parse(&geometry)?;
        debug!(nodes = parsed.nodes().len(); "Parsed plain output");

        let rendering = self.engine.layout(&document, self.render_format, engine)?;

        let result = layout::place(&parsed, &self.ids, rendering)?;
        info!(width = result.width(), height = result.height(); "Layout calculated");

        Ok(result)
    }

    /// Pass a ready graph document straight to the engine.
    ///
    /// # Errors
    ///
    /// Returns [`TraceryError::Engine`] if the engine rejects the document.
    pub fn layout(
        &self,
        document: &str,
        format: OutputFormat,
        engine: EngineKind,
    ) -> Result<String, TraceryError> {
        self.engine.layout(document, format, engine)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Replays canned outputs and records every request.
    #[derive(Debug, Default)]
    struct ScriptedEngine {
        plain: String,
        calls: Mutex<Vec<(OutputFormat, EngineKind)>>,
    }

    impl ScriptedEngine {
        fn new(plain: &str) -> Arc<Self> {
            Arc::new(Self {
                plain: plain.to_string(),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(OutputFormat, EngineKind)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl LayoutEngine for ScriptedEngine {
        fn layout(
            &self,
            _document: &str,
            format: OutputFormat,
            engine: EngineKind,
        ) -> Result<String, TraceryError> {
            self.calls.lock().unwrap().push((format, engine));
            match format {
                OutputFormat::Plain => Ok(self.plain.clone()),
                _ => Ok(format!("<{format}/>")),
            }
        }
    }

    struct RejectingEngine;

    impl LayoutEngine for RejectingEngine {
        fn layout(&self, _: &str, _: OutputFormat, _: EngineKind) -> Result<String, TraceryError> {
            Err(TraceryError::Engine("syntax error in line 1".to_string()))
        }
    }

    const ONE_NODE: &str = "graph 1 1.0417 0.52083\nnode 1 0.52083 0.26042 1.0417 0.52083 1 solid record black lightgrey\nstop\n";

    #[test]
    fn test_add_node_returns_sequential_indices() {
        let mut manager = LayoutManager::new(ScriptedEngine::new(ONE_NODE));
        let a = manager.add_node(10.0, 10.0, Some("a")).unwrap();
        let b = manager.add_node(10.0, 10.0, None).unwrap();

        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
        assert_eq!(manager.node_count(), 2);

        // The returned index doubles as the identifier of an anonymous node
        manager.add_edge("a", &b.to_string()).unwrap();
        assert_eq!(manager.edge_count(), 1);
    }

    #[test]
    fn test_add_node_rejects_invalid_sizes() {
        let mut manager = LayoutManager::new(ScriptedEngine::new(ONE_NODE));
        for (width, height) in [(0.0, 10.0), (10.0, -1.0), (f64::NAN, 10.0), (f64::INFINITY, 1.0)] {
            let err = manager.add_node(width, height, None).unwrap_err();
            assert!(matches!(err, TraceryError::InvalidSize { .. }));
        }
        assert_eq!(manager.node_count(), 0);
    }

    #[test]
    fn test_add_node_rejects_duplicate_id() {
        let mut manager = LayoutManager::new(ScriptedEngine::new(ONE_NODE));
        manager.add_node(10.0, 10.0, Some("A")).unwrap();

        let err = manager.add_node(20.0, 20.0, Some("A")).unwrap_err();
        assert!(matches!(err, TraceryError::DuplicateNode(ref id) if id == "A"));
        assert_eq!(manager.node_count(), 1);
    }

    #[test]
    fn test_add_edge_with_unknown_node_fails_fast() {
        let mut manager = LayoutManager::new(ScriptedEngine::new(ONE_NODE));
        manager.add_node(10.0, 10.0, Some("A")).unwrap();

        let err = manager.add_edge("A", "Z").unwrap_err();
        assert!(matches!(err, TraceryError::UnknownNode(ref id) if id == "Z"));
        assert_eq!(manager.edge_count(), 0);
        assert!(!manager.document(RankDir::TopToBottom).contains("->"));
    }

    #[test]
    fn test_add_group_is_all_or_nothing() {
        let mut manager = LayoutManager::new(ScriptedEngine::new(ONE_NODE));
        manager.add_node(10.0, 10.0, Some("A")).unwrap();

        assert!(manager.add_group(["A", "missing"]).is_err());
        assert_eq!(manager.group_count(), 0);

        manager.add_group(Vec::<String>::new()).unwrap();
        manager.add_group(vec!["A".to_string()]).unwrap();
        assert_eq!(manager.group_count(), 2);
    }

    #[test]
    fn test_document_uses_indices_and_inches() {
        let mut manager = LayoutManager::new(ScriptedEngine::new(ONE_NODE));
        manager.add_node(96.0, 48.0, Some("left")).unwrap();
        manager.add_node(192.0, 24.0, Some("right")).unwrap();
        manager.add_edge("left", "right").unwrap();
        manager.add_group(["left", "right"]).unwrap();

        let doc = manager.document(RankDir::RightToLeft);
        assert!(doc.starts_with("digraph G {\n  rankdir=RL;\n  node [shape=record];\n"));
        assert!(doc.contains("  1 [width=\"1\",height=\"0.5\"];\n"));
        assert!(doc.contains("  2 [width=\"2\",height=\"0.25\"];\n"));
        assert!(doc.contains("  1 -> 2;\n"));
        assert!(doc.contains("  subgraph cluster_0 {\n    1;\n    2;\n  }\n"));
        assert!(!doc.contains("left"));
    }

    #[test]
    fn test_calculate_selects_neato_without_edges() {
        let engine = ScriptedEngine::new(ONE_NODE);
        let mut manager = LayoutManager::new(Arc::clone(&engine));
        manager.add_node(100.0, 50.0, Some("A")).unwrap();

        let result = manager.calculate(RankDir::default(), None).unwrap();

        assert_eq!(
            engine.calls(),
            [
                (OutputFormat::Plain, EngineKind::Neato),
                (OutputFormat::Svg, EngineKind::Neato)
            ]
        );
        assert_eq!(result.nodes().len(), 1);
        assert_eq!(result.nodes()[0].id(), "A");
        assert_eq!(result.width(), 100);
        assert_eq!(result.height(), 50);
        assert_eq!(result.nodes()[0].x(), 0);
        assert_eq!(result.nodes()[0].y(), 0);
        assert_eq!(result.svg(), "<svg/>");
    }

    #[test]
    fn test_calculate_selects_dot_with_edges() {
        let plain = "graph 1 1.0417 1.5\nnode 1 0.52083 1.2396 1.0417 0.52083\nnode 2 0.52083 0.26042 1.0417 0.52083\nedge 1 2 4 0 0 0 0 0 0 0 0 solid black\nstop\n";
        let engine = ScriptedEngine::new(plain);
        let mut manager = LayoutManager::new(Arc::clone(&engine));
        manager.add_node(100.0, 50.0, Some("A")).unwrap();
        manager.add_node(100.0, 50.0, Some("B")).unwrap();
        manager.add_edge("A", "B").unwrap();

        let result = manager.calculate(RankDir::default(), None).unwrap();

        assert!(engine.calls().iter().all(|(_, kind)| *kind == EngineKind::Dot));
        assert_eq!(result.nodes().len(), 2);
        assert_eq!(result.node("A").map(|n| n.y()), Some(0));
        // 144 - round(0.26042 * 96) = 119, minus 25
        assert_eq!(result.node("B").map(|n| n.y()), Some(94));
    }

    #[test]
    fn test_calculate_honours_explicit_engine_and_render_format() {
        let engine = ScriptedEngine::new(ONE_NODE);
        let mut manager =
            LayoutManager::new(Arc::clone(&engine)).with_render_format(OutputFormat::Json);
        manager.add_node(100.0, 50.0, Some("A")).unwrap();

        let result = manager
            .calculate(RankDir::LeftToRight, Some(EngineKind::Circo))
            .unwrap();

        assert_eq!(
            engine.calls(),
            [
                (OutputFormat::Plain, EngineKind::Circo),
                (OutputFormat::Json, EngineKind::Circo)
            ]
        );
        assert_eq!(result.svg(), "<json/>");
    }

    #[test]
    fn test_calculate_propagates_engine_rejection() {
        let mut manager = LayoutManager::new(Arc::new(RejectingEngine));
        manager.add_node(10.0, 10.0, None).unwrap();

        let err = manager.calculate(RankDir::default(), None).unwrap_err();
        assert_eq!(err.to_string(), "Engine error: syntax error in line 1");
    }

    #[test]
    fn test_calculate_propagates_malformed_plain_output() {
        let engine = ScriptedEngine::new("garbage");
        let mut manager = LayoutManager::new(Arc::clone(&engine));
        manager.add_node(10.0, 10.0, None).unwrap();

        let err = manager.calculate(RankDir::default(), None).unwrap_err();
        assert!(matches!(err, TraceryError::Plain { .. }));
        // The rendering pass is never issued after a parse failure
        assert_eq!(engine.calls().len(), 1);
    }

    #[test]
    fn test_calculate_fails_on_out_of_range_coordinates() {
        let engine = ScriptedEngine::new("graph 1 1 1e30\nnode 1 1 -1e30 1 1\nstop\n");
        let mut manager = LayoutManager::new(Arc::clone(&engine));
        manager.add_node(10.0, 10.0, Some("A")).unwrap();

        let err = manager.calculate(RankDir::TopToBottom, None).unwrap_err();
        assert!(matches!(err, TraceryError::Layout(_)));
    }

    #[test]
    fn test_layout_passes_through() {
        let engine = ScriptedEngine::new(ONE_NODE);
        let manager = LayoutManager::new(Arc::clone(&engine));

        let out = manager
            .layout("digraph { a -> b }", OutputFormat::Dot, EngineKind::Fdp)
            .unwrap();

        assert_eq!(out, "<dot/>");
        assert_eq!(engine.calls(), [(OutputFormat::Dot, EngineKind::Fdp)]);
    }

    #[test]
    fn test_load_graph_description() {
        let graph = GraphDescription {
            nodes: vec![
                crate::graph::NodeDescription {
                    id: Some("A".to_string()),
                    width: 100.0,
                    height: 50.0,
                },
                crate::graph::NodeDescription {
                    id: None,
                    width: 40.0,
                    height: 40.0,
                },
            ],
            edges: vec![crate::graph::EdgeDescription {
                from: "A".to_string(),
                to: "2".to_string(),
            }],
            groups: vec![crate::graph::GroupDescription {
                members: vec!["A".to_string(), "2".to_string()],
            }],
            ..GraphDescription::default()
        };

        let mut manager = LayoutManager::new(ScriptedEngine::new(ONE_NODE));
        manager.load(&graph).unwrap();

        assert_eq!(manager.node_count(), 2);
        assert_eq!(manager.edge_count(), 1);
        assert_eq!(manager.group_count(), 1);
    }
}
