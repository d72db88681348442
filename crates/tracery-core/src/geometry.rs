//! Integer pixel geometry with a top-left origin.

use serde::Serialize;

use crate::units::round_half_up;

/// A position in pixels, measured from the top-left corner of the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    x: i64,
    y: i64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the top-left corner of a box of `size` centered on (`center_x`, `center_y`).
    ///
    /// Half sizes are rounded half up, and each axis is clamped at zero so a
    /// box flush against the canvas edge never reports a negative corner.
    ///
    /// # Examples
    ///
    /// ```
    /// use tracery_core::geometry::{Point, Size};
    ///
    /// let corner = Point::top_left_of_center(50, 25, Size::new(100, 50));
    /// assert_eq!(corner, Point::new(0, 0));
    ///
    /// let corner = Point::top_left_of_center(10, 10, Size::new(100, 50));
    /// assert_eq!(corner, Point::new(0, 0));
    /// ```
    pub fn top_left_of_center(center_x: i64, center_y: i64, size: Size) -> Self {
        let corner = |center: i64, extent: i64| {
            let edge = round_half_up(center as f64 - extent as f64 / 2.0) as i64;
            edge.max(0)
        };

        Self {
            x: corner(center_x, size.width),
            y: corner(center_y, size.height),
        }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> i64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> i64 {
        self.y
    }
}

/// Represents the dimensions of an element in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    width: i64,
    height: i64,
}

impl Size {
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> i64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> i64 {
        self.height
    }
}
