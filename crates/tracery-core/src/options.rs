//! Layout options understood by the Graphviz toolchain.
//!
//! Each option displays as the exact token Graphviz expects on its command
//! line or inside a graph document. Parsing and deserialization both go
//! through [`FromStr`] and ignore case.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string does not name a known option value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`, expected one of: {expected}")]
pub struct UnknownOption {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl UnknownOption {
    fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

/// The direction along which a hierarchical layout flows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum RankDir {
    /// Top to bottom.
    #[default]
    #[serde(rename = "TB")]
    TopToBottom,
    /// Left to right.
    #[serde(rename = "LR")]
    LeftToRight,
    /// Bottom to top.
    #[serde(rename = "BT")]
    BottomToTop,
    /// Right to left.
    #[serde(rename = "RL")]
    RightToLeft,
}

impl RankDir {
    /// Returns the token used for the `rankdir` graph attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            RankDir::TopToBottom => "TB",
            RankDir::LeftToRight => "LR",
            RankDir::BottomToTop => "BT",
            RankDir::RightToLeft => "RL",
        }
    }
}

impl fmt::Display for RankDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankDir {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TB" => Ok(RankDir::TopToBottom),
            "LR" => Ok(RankDir::LeftToRight),
            "BT" => Ok(RankDir::BottomToTop),
            "RL" => Ok(RankDir::RightToLeft),
            _ => Err(UnknownOption::new("rank direction", s, "TB, LR, BT, RL")),
        }
    }
}

impl TryFrom<String> for RankDir {
    type Error = UnknownOption;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The placement algorithm requested from the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum EngineKind {
    /// Hierarchical layered drawing of directed graphs.
    Dot,
    /// Spring model (stress majorization).
    Neato,
    /// Force-directed placement.
    Fdp,
    /// Multiscale force-directed placement for large graphs.
    Sfdp,
    /// Circular layout.
    Circo,
    /// Radial layout.
    Twopi,
    /// Array-based layout for clustered graphs.
    Osage,
    /// Squarified treemap layout.
    Patchwork,
}

impl EngineKind {
    /// Chooses the engine used when the caller does not name one.
    ///
    /// Graphs with at least one edge get the hierarchical `dot` engine; graphs
    /// made only of nodes and groups are placed by `neato`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tracery_core::options::EngineKind;
    ///
    /// assert_eq!(EngineKind::default_for(0), EngineKind::Neato);
    /// assert_eq!(EngineKind::default_for(3), EngineKind::Dot);
    /// ```
    pub fn default_for(edge_count: usize) -> Self {
        if edge_count > 0 {
            EngineKind::Dot
        } else {
            EngineKind::Neato
        }
    }

    /// Returns the engine name as passed to `-K`.
    pub fn as_str(self) -> &'static str {
        match self {
            EngineKind::Dot => "dot",
            EngineKind::Neato => "neato",
            EngineKind::Fdp => "fdp",
            EngineKind::Sfdp => "sfdp",
            EngineKind::Circo => "circo",
            EngineKind::Twopi => "twopi",
            EngineKind::Osage => "osage",
            EngineKind::Patchwork => "patchwork",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dot" => Ok(EngineKind::Dot),
            "neato" => Ok(EngineKind::Neato),
            "fdp" => Ok(EngineKind::Fdp),
            "sfdp" => Ok(EngineKind::Sfdp),
            "circo" => Ok(EngineKind::Circo),
            "twopi" => Ok(EngineKind::Twopi),
            "osage" => Ok(EngineKind::Osage),
            "patchwork" => Ok(EngineKind::Patchwork),
            _ => Err(UnknownOption::new(
                "layout engine",
                s,
                "dot, neato, fdp, sfdp, circo, twopi, osage, patchwork",
            )),
        }
    }
}

impl TryFrom<String> for EngineKind {
    type Error = UnknownOption;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Output formats requested from the layout engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OutputFormat {
    /// SVG markup.
    #[default]
    Svg,
    /// Line-oriented machine-readable geometry.
    Plain,
    /// The input graph annotated with layout attributes.
    Dot,
    /// JSON encoding of the annotated graph.
    Json,
}

impl OutputFormat {
    /// Returns the format name as passed to `-T`.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Plain => "plain",
            OutputFormat::Dot => "dot",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "plain" => Ok(OutputFormat::Plain),
            "dot" => Ok(OutputFormat::Dot),
            "json" => Ok(OutputFormat::Json),
            _ => Err(UnknownOption::new("output format", s, "svg, plain, dot, json")),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = UnknownOption;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
