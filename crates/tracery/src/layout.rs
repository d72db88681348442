//! Layout results in caller coordinates.
//!
//! Converts a [`PlainLayout`] (inches, bottom-left origin, node centers) into
//! pixel placements with a top-left origin that mark each node's top-left
//! corner.

use std::collections::HashSet;

use log::trace;
use serde::Serialize;

use tracery_core::{
    geometry::{Point, Size},
    identifier::{IdentifierMap, NodeIndex},
    units::inches_to_px,
};

use crate::{TraceryError, plain::PlainLayout};

/// Final geometry of one node, in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    id: String,
    index: NodeIndex,
    #[serde(flatten)]
    position: Point,
    #[serde(flatten)]
    size: Size,
}

impl Placement {
    /// Returns the caller-visible identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the engine index assigned at registration.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the top-left corner.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the node size.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn x(&self) -> i64 {
        self.position.x()
    }

    pub fn y(&self) -> i64 {
        self.position.y()
    }

    pub fn width(&self) -> i64 {
        self.size.width()
    }

    pub fn height(&self) -> i64 {
        self.size.height()
    }
}

/// Notification that a node has received its final position.
///
/// One completion is produced per node and per calculation, in the order the
/// engine reported the nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    id: String,
    index: NodeIndex,
    position: Point,
}

impl Completion {
    /// Returns the caller-visible identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the engine index.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the final top-left corner.
    pub fn position(&self) -> Point {
        self.position
    }
}

/// Result of a layout calculation.
///
/// The serialized form carries the geometry only: canvas size and placements.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutResult {
    width: i64,
    height: i64,
    nodes: Vec<Placement>,
    #[serde(skip)]
    completions: Vec<Completion>,
    #[serde(skip)]
    svg: String,
}

impl LayoutResult {
    /// Returns the canvas width in pixels.
    pub fn width(&self) -> i64 {
        self.width
    }

    /// Returns the canvas height in pixels.
    pub fn height(&self) -> i64 {
        self.height
    }

    /// Returns one placement per registered node, sorted by index.
    pub fn nodes(&self) -> &[Placement] {
        &self.nodes
    }

    /// Returns the placement of the node registered as `id`.
    pub fn node(&self, id: &str) -> Option<&Placement> {
        self.nodes.iter().find(|placement| placement.id == id)
    }

    /// Returns the completions in engine order.
    pub fn completions(&self) -> &[Completion] {
        &self.completions
    }

    /// Returns the rendered diagram.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Consumes the result and returns the rendered diagram.
    pub fn into_svg(self) -> String {
        self.svg
    }
}

/// Maps a parsed plain layout onto caller pixels.
///
/// # Errors
///
/// Returns [`TraceryError::Layout`] if the engine reported a node that was
/// never registered, reported a node twice, left a registered node out, or
/// reported a coordinate too large to express in pixels.
pub(crate) fn place(
    plain: &PlainLayout,
    ids: &IdentifierMap,
    svg: String,
) -> Result<LayoutResult, TraceryError> {
    let width = to_px(plain.width(), "canvas width")?;
    let height = to_px(plain.height(), "canvas height")?;

    let mut seen = HashSet::with_capacity(plain.nodes().len());
    let mut nodes = Vec::with_capacity(plain.nodes().len());
    let mut completions = Vec::with_capacity(plain.nodes().len());

    for record in plain.nodes() {
        let index = record.index();
        let id = ids.id_of(index).ok_or_else(|| {
            TraceryError::Layout(format!("engine reported unregistered node {index}"))
        })?;
        if !seen.insert(index) {
            return Err(TraceryError::Layout(format!(
                "engine reported node {index} more than once"
            )));
        }

        let size = Size::new(
            to_px(record.width(), "node width")?,
            to_px(record.height(), "node height")?,
        );
        let center_x = to_px(record.x(), "node x")?;
        // Flip from a bottom-left origin; both operands are within `i32` range
        let center_y = height - to_px(record.y(), "node y")?;
        let position = Point::top_left_of_center(center_x, center_y, size);

        trace!(id = id, index = index.get(), x = position.x(), y = position.y(); "Placed node");

        completions.push(Completion {
            id: id.to_string(),
            index,
            position,
        });
        nodes.push(Placement {
            id: id.to_string(),
            index,
            position,
            size,
        });
    }

    if nodes.len() != ids.len() {
        let missing: Vec<&str> = ids
            .iter()
            .filter(|(index, _)| !seen.contains(index))
            .map(|(_, id)| id)
            .collect();
        return Err(TraceryError::Layout(format!(
            "engine did not place nodes: {}",
            missing.join(", ")
        )));
    }

    nodes.sort_by_key(Placement::index);

    Ok(LayoutResult {
        width,
        height,
        nodes,
        completions,
        svg,
    })
}

fn to_px(inches: f64, what: &str) -> Result<i64, TraceryError> {
    inches_to_px(inches).ok_or_else(|| {
        TraceryError::Layout(format!("engine reported {what} {inches} in, outside the pixel range"))
    })
}
