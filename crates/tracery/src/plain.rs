//! Parser for the engine's `plain` output format.
//!
//! The format is line oriented:
//!
//! ```text
//! graph 1 2.0833 0.52083
//! node 1 1.0417 0.26042 2.0833 0.52083 1 solid record black lightgrey
//! edge 1 2 4 ...
//! stop
//! ```
//!
//! The first line ends with the canvas width and height, every `node` line
//! carries a center position and size, and the output is closed by a footer.
//! All numbers are inches with the origin at the bottom-left corner.

use tracery_core::identifier::NodeIndex;

use crate::TraceryError;

/// Tag of the only record kind Tracery consumes.
const NODE_TAG: &str = "node";

/// Minimum token count of a node line: tag, name, x, y, width, height.
const NODE_FIELDS: usize = 6;

/// Number of footer lines closing the output.
const FOOTER_LINES: usize = 2;

/// One node record, in engine units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlainNode {
    index: NodeIndex,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl PlainNode {
    /// Returns the node's engine index.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the horizontal center, in inches from the left edge.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Returns the vertical center, in inches from the bottom edge.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns the width in inches.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the height in inches.
    pub fn height(&self) -> f64 {
        self.height
    }
}

/// The parsed content of a `plain` output.
#[derive(Debug, Clone, PartialEq)]
pub struct PlainLayout {
    width: f64,
    height: f64,
    nodes: Vec<PlainNode>,
}

impl PlainLayout {
    /// Returns the canvas width in inches.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the canvas height in inches.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the node records in the order they appeared.
    pub fn nodes(&self) -> &[PlainNode] {
        &self.nodes
    }
}

/// Parses the engine's `plain` output.
///
/// Edge and graph records are skipped. The last two lines are treated as the
/// footer and never inspected.
///
/// # Errors
///
/// Returns [`TraceryError::Plain`] with the 1-based line number when the
/// output is too short, the header lacks the canvas size, or a node line has
/// missing or non-numeric fields.
///
/// # Examples
///
/// ```
/// use tracery::plain;
///
/// let output = "graph 1 2 1\nnode 1 1 0.5 1 0.5 1 solid record black lightgrey\nstop\n";
/// let layout = plain::parse(output).unwrap();
///
/// assert_eq!(layout.width(), 2.0);
/// assert_eq!(layout.nodes().len(), 1);
/// assert_eq!(layout.nodes()[0].x(), 1.0);
/// ```
pub fn parse(output: &str) -> Result<PlainLayout, TraceryError> {
    let lines: Vec<&str> = output.split('\n').collect();
    if lines.len() <= FOOTER_LINES {
        return Err(TraceryError::plain(
            lines.len(),
            format!(
                "expected a header, records and a {FOOTER_LINES}-line footer, found {} lines",
                lines.len()
            ),
        ));
    }

    let (width, height) = parse_header(lines[0])?;

    let mut nodes = Vec::new();
    for (offset, line) in lines[..lines.len() - FOOTER_LINES].iter().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() != Some(&NODE_TAG) {
            continue;
        }
        nodes.push(parse_node(offset + 1, &tokens)?);
    }

    Ok(PlainLayout {
        width,
        height,
        nodes,
    })
}

/// Reads the canvas size from the trailing two tokens of the header.
fn parse_header(line: &str) -> Result<(f64, f64), TraceryError> {
    let mut tokens: Vec<&str> = line.split_whitespace().collect();
    let (Some(height), Some(width)) = (tokens.pop(), tokens.pop()) else {
        return Err(TraceryError::plain(
            1,
            "header does not end with the canvas width and height",
        ));
    };

    Ok((
        parse_number(1, "canvas width", width)?,
        parse_number(1, "canvas height", height)?,
    ))
}

fn parse_node(line: usize, tokens: &[&str]) -> Result<PlainNode, TraceryError> {
    if tokens.len() < NODE_FIELDS {
        return Err(TraceryError::plain(
            line,
            format!(
                "expected at least {NODE_FIELDS} fields in node record, found {}",
                tokens.len()
            ),
        ));
    }

    let index = tokens[1].parse::<NodeIndex>().map_err(|_| {
        TraceryError::plain(line, format!("node name `{}` is not a node index", tokens[1]))
    })?;

    Ok(PlainNode {
        index,
        x: parse_number(line, "x", tokens[2])?,
        y: parse_number(line, "y", tokens[3])?,
        width: parse_number(line, "width", tokens[4])?,
        height: parse_number(line, "height", tokens[5])?,
    })
}

fn parse_number(line: usize, field: &str, token: &str) -> Result<f64, TraceryError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| TraceryError::plain(line, format!("{field} `{token}` is not a number")))
}
