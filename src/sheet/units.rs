//! # Units and Page Constants
//!
//! All geometry in this crate is expressed in PostScript points. Label
//! vendors publish their sheets in millimetres, so templates are converted
//! once when they are registered.
//!
//! ## Constants
//!
//! | Constant | Value | Meaning |
//! |----------|-------|---------|
//! | [`POINTS_PER_MM`] | 2.8346 | millimetres → points |
//! | [`SCREEN_SCALE`] | 1.0 | on-screen canvas vs. printed page |
//! | [`PREVIEW_SCALE`] | 0.27 | slot icon grid vs. printed page |
//! | [`PAGE_WIDTH`] × [`PAGE_HEIGHT`] | 595 × 842 | A4 in points |
//!
//! ## Usage
//!
//! ```
//! use labelsheet::sheet::units::{mm_to_points, points_to_mm};
//!
//! let width = mm_to_points(63.5);
//! assert!((points_to_mm(width) - 63.5).abs() < 1e-3);
//! ```

/// Points per millimetre.
///
/// ```text
/// 72 points per inch / 25.4 mm per inch ≈ 2.8346
/// ```
pub const POINTS_PER_MM: f32 = 2.8346;

/// Scaling between the on-screen page canvas and the printed page.
pub const SCREEN_SCALE: f32 = 1.0;

/// Scale of the slot icon grid relative to the printed page.
pub const PREVIEW_SCALE: f32 = 0.27 / SCREEN_SCALE;

/// Printed page width in points (A4).
pub const PAGE_WIDTH: f32 = 595.0;

/// Printed page height in points (A4).
pub const PAGE_HEIGHT: f32 = 842.0;

/// Amount trimmed from the right and top edge of every preview icon so that
/// neighbouring icons stay visibly separate.
pub const PREVIEW_INSET: f32 = 2.0;

/// Where the slot icon grid sits inside its canvas, in pixels.
pub const PREVIEW_OFFSET: (f32, f32) = (20.0, 4.0);

/// Where the printed-page grid sits on the page canvas, in points.
pub const PAGE_REGISTRATION: (f32, f32) = (6.0, 4.0);

/// Convert millimetres to points.
#[inline]
pub fn mm_to_points(mm: f32) -> f32 {
    mm * POINTS_PER_MM * SCREEN_SCALE
}

/// Convert points to millimetres.
#[inline]
pub fn points_to_mm(points: f32) -> f32 {
    points / (POINTS_PER_MM * SCREEN_SCALE)
}
