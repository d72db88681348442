//! Shared test engine.

use tracery::{
    TraceryError,
    engine::LayoutEngine,
    options::{EngineKind, OutputFormat},
};

/// Lays nodes out on a single row, left to right in index order, and writes
/// the plain records in reverse so callers cannot rely on output order.
#[derive(Debug, Default)]
pub struct RowEngine;

impl RowEngine {
    /// Extracts `(index, width, height)` from the node statements of a document.
    fn nodes(document: &str) -> Vec<(String, f64, f64)> {
        document
            .lines()
            .filter_map(|line| {
                let (index, attrs) = line.trim().split_once(" [width=\"")?;
                let (width, rest) = attrs.split_once("\",height=\"")?;
                let (height, _) = rest.split_once('"')?;
                Some((index.to_string(), width.parse().ok()?, height.parse().ok()?))
            })
            .collect()
    }
}

impl LayoutEngine for RowEngine {
    fn layout(
        &self,
        document: &str,
        format: OutputFormat,
        _engine: EngineKind,
    ) -> Result<String, TraceryError> {
        if !document.starts_with("digraph") {
            return Err(TraceryError::Engine("syntax error in line 1".to_string()));
        }

        let nodes = Self::nodes(document);
        let width: f64 = nodes.iter().map(|(_, w, _)| w).sum();
        let height = nodes.iter().map(|(_, _, h)| *h).fold(0.0, f64::max);

        match format {
            OutputFormat::Plain => {
                let mut out = format!("graph 1 {width:.5} {height:.5}\n");
                let mut left = 0.0;
                let mut records = Vec::new();
                for (index, w, h) in &nodes {
                    records.push(format!(
                        "node {index} {:.5} {:.5} {w:.5} {h:.5} {index} solid record black lightgrey\n",
                        left + w / 2.0,
                        height / 2.0,
                    ));
                    left += w;
                }
                for record in records.iter().rev() {
                    out.push_str(record);
                }
                out.push_str("stop\n");
                Ok(out)
            }
            _ => {
                let titles: String = nodes
                    .iter()
                    .map(|(index, _, _)| format!("<g class=\"node\"><title>{index}</title></g>"))
                    .collect();
                Ok(format!("<svg>{titles}</svg>"))
            }
        }
    }
}
