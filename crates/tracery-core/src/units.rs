//! Unit conversions between caller pixels and engine inches.
//!
//! The layout engine speaks inches exclusively; every public width, height
//! and position in Tracery is expressed in pixels at [`PIXELS_PER_INCH`].

/// Pixel density used for every conversion.
pub const PIXELS_PER_INCH: f64 = 96.0;

/// Rounds to the nearest integer, with halves rounded towards positive infinity.
///
/// This differs from [`f64::round`] for negative halves: `-2.5` becomes `-2`.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Converts a pixel measurement into inches.
///
/// # Examples
///
/// ```
/// use tracery_core::units::px_to_inches;
///
/// assert_eq!(px_to_inches(96.0), 1.0);
/// assert_eq!(px_to_inches(48.0), 0.5);
/// ```
pub fn px_to_inches(px: f64) -> f64 {
    px / PIXELS_PER_INCH
}

/// Largest pixel magnitude a converted value may have.
///
/// Keeping every coordinate within `i32` range leaves room for the
/// differences taken when flipping and centering in `i64`.
pub const MAX_PIXELS: i64 = i32::MAX as i64;

/// Converts inches into whole pixels, rounding half up.
///
/// Returns `None` for non-finite input or when the result exceeds
/// [`MAX_PIXELS`] in magnitude.
///
/// # Examples
///
/// ```
/// use tracery_core::units::inches_to_px;
///
/// assert_eq!(inches_to_px(1.0), Some(96));
/// assert_eq!(inches_to_px(0.5), Some(48));
/// assert_eq!(inches_to_px(1e30), None);
/// ```
pub fn inches_to_px(inches: f64) -> Option<i64> {
    let px = round_half_up(inches * PIXELS_PER_INCH);
    if px.is_finite() && px.abs() <= MAX_PIXELS as f64 {
        Some(px as i64)
    } else {
        None
    }
}
