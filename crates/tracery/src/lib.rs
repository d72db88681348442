//! Tracery - graph layout on top of Graphviz, in caller pixels.
//!
//! Register nodes (with their pixel size), directed edges and clustering
//! groups with a [`LayoutManager`], then call
//! [`calculate`](LayoutManager::calculate) to receive the top-left pixel
//! position of every node together with a rendered diagram.
//!
//! The engine itself is reached through the [`engine::LayoutEngine`] trait.
//! [`engine::Graphviz`] runs the Graphviz tools and is bootstrapped at most
//! once per process.

pub mod config;
pub mod engine;
pub mod graph;
pub mod layout;
pub mod plain;

mod document;
mod error;
mod manager;

pub use tracery_core::{geometry, identifier, options, units};

pub use error::TraceryError;
pub use layout::{Completion, LayoutResult, Placement};
pub use manager::LayoutManager;
