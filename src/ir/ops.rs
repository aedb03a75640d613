//! # IR Opcodes
//!
//! This module defines the intermediate representation (IR) for page
//! emission. The IR is a sequence of opcodes that can be inspected,
//! optimized, and compiled to PostScript.
//!
//! ## Design Philosophy
//!
//! The IR sits between the scene and the document bytes:
//!
//! ```text
//! Scene → IR (inspectable) → Optimizer → Codegen → PostScript
//! ```
//!
//! State changes (colour, font, line width) are individual ops so the
//! optimizer can drop the redundant ones. Drawing ops are the document's
//! primitives; each carries the tag of the scene item it came from.

use image::RgbImage;

use crate::postscript::text::Justify;
use crate::scene::{Rgb, Tag};

/// Graphics state tracked for optimization.
///
/// Starts unknown for colour and font; PostScript's default line width is 1.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub colour: Option<Rgb>,
    pub font: Option<(String, f32)>,
    pub line_width: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            colour: None,
            font: None,
            line_width: 1.0,
        }
    }
}

/// IR opcodes - the "bytecode" for a label page.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    // ========== State Changes ==========
    /// Set the current colour (used by text).
    SetColour(Rgb),

    /// Set the stroke width for outlines.
    SetLineWidth(f32),

    /// Select a font family at a size in points.
    SetFont { family: String, size: f32 },

    // ========== Primitives ==========
    /// Filled and/or stroked rectangle. Carries its own colours.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
        tag: Option<Tag>,
    },

    /// One line of text in the current colour and font.
    Show {
        x: f32,
        y: f32,
        text: String,
        justify: Justify,
        tag: Option<Tag>,
    },

    /// RGB image stretched over a rectangle.
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        image: RgbImage,
        tag: Option<Tag>,
    },
}

impl Op {
    /// Whether the op draws something on the page.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Op::Rect { .. } | Op::Show { .. } | Op::Image { .. })
    }

    /// Tag of a primitive, if any.
    pub fn tag(&self) -> Option<&Tag> {
        match self {
            Op::Rect { tag, .. } | Op::Show { tag, .. } | Op::Image { tag, .. } => tag.as_ref(),
            _ => None,
        }
    }
}

/// A compiled IR program for one page.
///
/// `scale` maps canvas units onto points.
#[derive(Debug, Clone)]
pub struct Program {
    pub ops: Vec<Op>,
    pub scale: f32,
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Program {
    /// Create an empty program at 1:1 scale.
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            scale: 1.0,
        }
    }

    /// Create an empty program with a canvas-to-page scale.
    pub fn with_scale(scale: f32) -> Self {
        Self {
            ops: Vec::new(),
            scale,
        }
    }

    /// Add an op to the program.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Add multiple ops to the program.
    pub fn extend(&mut self, ops: impl IntoIterator<Item = Op>) {
        self.ops.extend(ops);
    }

    /// Get the number of ops in the program.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the program is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over ops.
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }

    /// Number of drawing primitives.
    pub fn primitive_count(&self) -> usize {
        self.ops.iter().filter(|op| op.is_primitive()).count()
    }

    /// Number of drawing primitives carrying `tag`.
    pub fn tagged_count(&self, tag: &Tag) -> usize {
        self.ops.iter().filter(|op| op.tag() == Some(tag)).count()
    }
}

impl FromIterator<Op> for Program {
    fn from_iter<T: IntoIterator<Item = Op>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
            scale: 1.0,
        }
    }
}

impl IntoIterator for Program {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(text: &str, tag: Option<&str>) -> Op {
        Op::Show {
            x: 0.0,
            y: 0.0,
            text: text.into(),
            justify: Justify::Left,
            tag: tag.map(Tag::from),
        }
    }

    #[test]
    fn test_program_new() {
        let program = Program::new();
        assert!(program.is_empty());
        assert_eq!(program.scale, 1.0);
    }

    #[test]
    fn test_primitive_count() {
        let mut program = Program::new();
        program.push(Op::SetColour(Rgb::new(0.0, 0.0, 0.0)));
        program.push(show("a", None));
        program.push(show("b", Some("leaf")));
        assert_eq!(program.len(), 3);
        assert_eq!(program.primitive_count(), 2);
        assert_eq!(program.tagged_count(&Tag::from("leaf")), 1);
    }

    #[test]
    fn test_state_ops_are_not_primitives() {
        assert!(!Op::SetLineWidth(2.0).is_primitive());
        assert!(Op::SetLineWidth(2.0).tag().is_none());
    }

    #[test]
    fn test_draw_state_default() {
        let state = DrawState::default();
        assert!(state.colour.is_none());
        assert!(state.font.is_none());
        assert_eq!(state.line_width, 1.0);
    }

    #[test]
    fn test_op_debug() {
        let debug = format!("{:?}", show("12 Acacia Avenue", Some("label-3")));
        assert!(debug.contains("Show"));
        assert!(debug.contains("Acacia"));
    }
}
