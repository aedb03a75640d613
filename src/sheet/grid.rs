//! # Grid Calculator
//!
//! Turns a template into the ordered list of label boxes on a page.
//!
//! ## Enumeration Order
//!
//! Boxes are generated row by row starting at the bottom margin, left to
//! right within a row:
//!
//! ```text
//!  18 19 20
//!  ...
//!   3  4  5
//!   0  1  2   ← bottom_margin
//! ```
//!
//! Rows are packed directly on top of each other; the template gap only
//! separates columns. The flat index of a box is its [`SlotId`], and callers
//! rely on this order being stable.
//!
//! Two entry points share the same topology but not the same placement:
//! [`compute_grid`] for the printed page and [`compute_preview_grid`] for the
//! shrunken slot icons.

use serde::Serialize;
use tracing::debug;

use super::template::{Template, TemplateRegistry};
use super::units::PREVIEW_INSET;
use crate::error::{LabelError, Result};

/// An axis-aligned rectangle given by two opposite corners, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl LabelBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box with its lower-left corner at `(x, y)`.
    pub fn from_origin(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Centre point.
    pub fn centre(&self) -> (f32, f32) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }

    /// Scale all four coordinates about the origin.
    pub fn scale(&self, factor: f32) -> Self {
        Self::new(
            self.x0 * factor,
            self.y0 * factor,
            self.x1 * factor,
            self.y1 * factor,
        )
    }

    /// Corners as an array, handy for emitters.
    pub fn corners(&self) -> [f32; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}

/// Position of a box within a [`Page`], in enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SlotId(pub usize);

impl SlotId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The ordered boxes of one template at one scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Template the page was computed from
    pub template: String,
    /// Number of boxes per row (1 for single-region templates)
    pub columns: usize,
    boxes: Vec<LabelBox>,
}

impl Page {
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn get(&self, slot: SlotId) -> Option<&LabelBox> {
        self.boxes.get(slot.0)
    }

    pub fn boxes(&self) -> &[LabelBox] {
        &self.boxes
    }

    /// Iterate `(SlotId, &LabelBox)` in enumeration order.
    pub fn slots(&self) -> impl Iterator<Item = (SlotId, &LabelBox)> {
        self.boxes.iter().enumerate().map(|(i, b)| (SlotId(i), b))
    }

    /// Boxes grouped by row, bottom row first.
    pub fn rows(&self) -> impl Iterator<Item = &[LabelBox]> {
        self.boxes.chunks(self.columns.max(1))
    }

    /// A copy of the page moved by `(dx, dy)`.
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            template: self.template.clone(),
            columns: self.columns,
            boxes: self.boxes.iter().map(|b| b.translate(dx, dy)).collect(),
        }
    }
}

fn check_scale(scale: f32) -> Result<()> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(LabelError::InvalidScale(scale))
    }
}

/// Lay out the boxes of `template` at `scale`.
fn layout(template: &Template, scale: f32) -> Page {
    let width = template.cell_width * scale;
    let height = template.cell_height * scale;
    let margin = template.left_margin * scale;
    let gap = template.gap * scale;
    let bottom = template.bottom_margin * scale;

    if template.is_single() {
        return Page {
            template: template.name.clone(),
            columns: 1,
            boxes: vec![LabelBox::from_origin(margin, bottom, width, height)],
        };
    }

    let columns = template.columns as usize;
    let mut boxes = Vec::with_capacity(template.slot_count());
    let mut y0 = bottom;
    for _ in 0..template.rows {
        let mut x0 = margin;
        for _ in 0..columns {
            boxes.push(LabelBox::from_origin(x0, y0, width, height));
            x0 += width + gap;
        }
        y0 += height;
    }

    Page {
        template: template.name.clone(),
        columns,
        boxes,
    }
}

/// Compute the printed-page grid for a template.
///
/// `scale` of 1.0 gives physical page coordinates in points.
///
/// ## Example
///
/// ```
/// use labelsheet::sheet::{TemplateRegistry, compute_grid};
///
/// let registry = TemplateRegistry::builtin();
/// let page = compute_grid(&registry, "2x4", 1.0)?;
/// assert_eq!(page.len(), 8);
/// # Ok::<(), labelsheet::LabelError>(())
/// ```
pub fn compute_grid(registry: &TemplateRegistry, name: &str, scale: f32) -> Result<Page> {
    let template = registry.get(name)?;
    check_scale(scale)?;
    let page = layout(template, scale);
    debug!(template = %template.name, scale, boxes = page.len(), "computed grid");
    Ok(page)
}

/// Compute the slot icon grid for a template.
///
/// Same topology as [`compute_grid`], then each box loses
/// [`PREVIEW_INSET`] from its right and top edge and the whole grid is moved
/// by the canvas offset.
///
/// Fails with [`LabelError::InvalidScale`] when the scaled label is too
/// small to survive the inset.
pub fn compute_preview_grid(
    registry: &TemplateRegistry,
    name: &str,
    scale: f32,
    offset_x: i32,
    offset_y: i32,
) -> Result<Page> {
    let template = registry.get(name)?;
    check_scale(scale)?;
    if template.cell_width.min(template.cell_height) * scale <= PREVIEW_INSET {
        return Err(LabelError::InvalidScale(scale));
    }
    let mut page = layout(template, scale);
    let (dx, dy) = (offset_x as f32, offset_y as f32);
    for b in &mut page.boxes {
        *b = LabelBox::new(
            b.x0 + dx,
            b.y0 + dy,
            b.x1 - PREVIEW_INSET + dx,
            b.y1 - PREVIEW_INSET + dy,
        );
    }
    debug!(template = %template.name, scale, offset_x, offset_y, "computed preview grid");
    Ok(page)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::template::Dimensions;
    use crate::sheet::units::{POINTS_PER_MM, PREVIEW_SCALE};

    const EPS: f32 = 1e-3;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS * a.abs().max(1.0)
    }

    #[test]
    fn test_box_counts_and_extent() {
        let registry = TemplateRegistry::builtin();
        for name in registry.names() {
            let template = registry.get(name).unwrap();
            let page = compute_grid(&registry, name, 1.0).unwrap();
            assert_eq!(page.len(), template.slot_count(), "{}", name);
            for b in page.boxes() {
                assert!(b.x1 > b.x0 && b.y1 > b.y0, "{}: {:?}", name, b);
            }
        }
    }

    #[test]
    fn test_row_adjacency() {
        let registry = TemplateRegistry::builtin();
        for name in ["3x7", "2x7", "5x13", "2x4", "4x8"] {
            let gap = registry.get(name).unwrap().gap;
            let page = compute_grid(&registry, name, 1.0).unwrap();
            for row in page.rows() {
                for pair in row.windows(2) {
                    assert!(close(pair[1].x0, pair[0].x1 + gap), "{}", name);
                }
            }
        }
    }

    #[test]
    fn test_row_stacking() {
        let registry = TemplateRegistry::builtin();
        let page = compute_grid(&registry, "5x13", 1.0).unwrap();
        let rows: Vec<_> = page.rows().collect();
        assert_eq!(rows.len(), 13);
        for pair in rows.windows(2) {
            for b in pair[0] {
                assert!(close(pair[1][0].y0, b.y1));
            }
        }
    }

    #[test]
    fn test_scale_linearity() {
        let registry = TemplateRegistry::builtin();
        let full = compute_grid(&registry, "3x7", 1.0).unwrap();
        for s in [0.27, 0.5, 2.0] {
            let scaled = compute_grid(&registry, "3x7", s).unwrap();
            for (a, b) in full.boxes().iter().zip(scaled.boxes()) {
                let expected = a.scale(s);
                for (x, y) in expected.corners().iter().zip(b.corners()) {
                    assert!(close(*x, y), "scale {}: {} vs {}", s, x, y);
                }
            }
        }
    }

    #[test]
    fn test_three_by_seven_scenario() {
        let dims = Dimensions::new(63.5, 38.1, 7.0, 3.0, 13.5);
        let mut registry = TemplateRegistry::new();
        registry.insert(Template::from_mm("scenario", 7, 3, dims).unwrap());

        let page = compute_grid(&registry, "scenario", 1.0).unwrap();
        assert_eq!(page.len(), 21);
        let b0 = page.get(SlotId(0)).unwrap();
        assert!(close(b0.x0, 7.0 * POINTS_PER_MM));
        assert!(close(b0.y0, 13.5 * POINTS_PER_MM));
        let b1 = page.get(SlotId(1)).unwrap();
        assert!(close(b1.x0 - b0.x0, (63.5 + 3.0) * POINTS_PER_MM));
        assert!(close(b1.y0, b0.y0));
    }

    #[test]
    fn test_single_region() {
        let registry = TemplateRegistry::builtin();
        let page = compute_grid(&registry, "envelope", 1.0).unwrap();
        assert_eq!(page.len(), 1);
        let b = page.get(SlotId(0)).unwrap();
        assert_eq!((b.x0, b.y0), (0.0, 0.0));
        assert!(close(b.width(), 229.0 * POINTS_PER_MM));
    }

    #[test]
    fn test_single_column_keeps_one_box() {
        let mut registry = TemplateRegistry::new();
        let dims = Dimensions::new(90.0, 30.0, 5.0, 0.0, 10.0);
        registry.insert(Template::from_mm("strip", 1, 5, dims).unwrap());
        let page = compute_grid(&registry, "strip", 1.0).unwrap();
        assert_eq!(page.len(), 1);
    }

    #[test]
    fn test_unknown_template() {
        let registry = TemplateRegistry::builtin();
        let err = compute_grid(&registry, "9x9", 1.0).unwrap_err();
        assert!(matches!(err, LabelError::UnknownTemplate(ref n) if n == "9x9"));
        assert!(compute_preview_grid(&registry, "9x9", 0.27, 20, 4).is_err());
    }

    #[test]
    fn test_invalid_scale() {
        let registry = TemplateRegistry::builtin();
        assert!(matches!(
            compute_grid(&registry, "3x7", 0.0),
            Err(LabelError::InvalidScale(_))
        ));
        assert!(compute_grid(&registry, "3x7", f32::NAN).is_err());
    }

    #[test]
    fn test_preview_grid_inset_and_offset() {
        let registry = TemplateRegistry::builtin();
        let page = compute_grid(&registry, "2x4", PREVIEW_SCALE).unwrap();
        let preview = compute_preview_grid(&registry, "2x4", PREVIEW_SCALE, 20, 4).unwrap();
        assert_eq!(page.len(), preview.len());
        for (a, b) in page.boxes().iter().zip(preview.boxes()) {
            assert!(close(b.x0, a.x0 + 20.0));
            assert!(close(b.y0, a.y0 + 4.0));
            assert!(close(b.x1, a.x1 - 2.0 + 20.0));
            assert!(close(b.y1, a.y1 - 2.0 + 4.0));
        }
    }

    #[test]
    fn test_preview_boxes_keep_positive_area() {
        let registry = TemplateRegistry::builtin();
        for name in registry.names() {
            for scale in [0.02, 0.05, 0.1, PREVIEW_SCALE, 1.0] {
                match compute_preview_grid(&registry, name, scale, 20, 4) {
                    Ok(page) => {
                        for b in page.boxes() {
                            assert!(b.x1 > b.x0 && b.y1 > b.y0, "{} at {}: {:?}", name, scale, b);
                        }
                    }
                    Err(e) => assert!(matches!(e, LabelError::InvalidScale(_))),
                }
            }
        }
        assert!(matches!(
            compute_preview_grid(&registry, "5x13", 0.02, 20, 4),
            Err(LabelError::InvalidScale(_))
        ));
        assert!(compute_preview_grid(&registry, "5x13", PREVIEW_SCALE, 20, 4).is_ok());
    }

    #[test]
    fn test_translate_and_slots() {
        let registry = TemplateRegistry::builtin();
        let page = compute_grid(&registry, "2x4", 1.0).unwrap();
        let moved = page.translate(6.0, 4.0);
        let ids: Vec<_> = moved.slots().map(|(id, _)| id.index()).collect();
        assert_eq!(ids, (0..8).collect::<Vec<_>>());
        assert!(close(moved.boxes()[3].x0, page.boxes()[3].x0 + 6.0));
    }
}
