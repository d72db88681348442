//! Configuration types for Tracery layouts.
//!
//! All types implement [`serde::Deserialize`] for loading from external
//! sources such as a TOML file.
//!
//! # Example
//!
//! ```
//! # use tracery::config::AppConfig;
//! # use tracery::options::{OutputFormat, RankDir};
//! let config = AppConfig::default();
//! assert_eq!(config.layout().rankdir(), RankDir::TopToBottom);
//! assert_eq!(config.layout().engine(), None);
//! assert_eq!(config.layout().render_format(), OutputFormat::Svg);
//! ```

use serde::Deserialize;

use tracery_core::options::{EngineKind, OutputFormat, RankDir};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout configuration.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Defaults applied when a graph does not choose for itself.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Rank direction used for hierarchical layouts.
    #[serde(default)]
    rankdir: RankDir,

    /// Engine override. When unset the engine is picked from the graph shape.
    #[serde(default)]
    engine: Option<EngineKind>,

    /// Format of the visual rendering pass.
    #[serde(default)]
    render_format: OutputFormat,
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `rankdir` - Rank direction for hierarchical layouts.
    /// * `engine` - Engine override, or `None` to pick by graph shape.
    /// * `render_format` - Format of the visual rendering.
    pub fn new(rankdir: RankDir, engine: Option<EngineKind>, render_format: OutputFormat) -> Self {
        Self {
            rankdir,
            engine,
            render_format,
        }
    }

    /// Returns the configured [`RankDir`].
    pub fn rankdir(&self) -> RankDir {
        self.rankdir
    }

    /// Returns the engine override, if any.
    pub fn engine(&self) -> Option<EngineKind> {
        self.engine
    }

    /// Returns the render [`OutputFormat`].
    pub fn render_format(&self) -> OutputFormat {
        self.render_format
    }
}
