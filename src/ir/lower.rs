//! # Lowering
//!
//! Converts a scene into IR ops. Each item type emits its own ops, in scene
//! order, so later items paint over earlier ones.

use super::ops::{Op, Program};
use crate::postscript::text::Justify;
use crate::scene::{ColourTable, ImageItem, Item, RectItem, Scene, TextAlign, TextItem, lines};

/// Cap height as a fraction of the font size, used to centre text blocks
/// optically.
const CAP_HEIGHT: f32 = 0.7;

impl Program {
    /// Lower `scene` with colours resolved through `table`.
    ///
    /// `scale` is recorded on the program and applied by codegen; op
    /// coordinates stay in canvas units.
    pub fn from_scene(scene: &Scene, table: &ColourTable, scale: f32) -> Self {
        let mut program = Program::with_scale(scale);
        for item in scene.items() {
            match item {
                Item::Rect(rect) => rect.emit(table, &mut program.ops),
                Item::Text(text) => text.emit(table, &mut program.ops),
                Item::Image(image) => image.emit(&mut program.ops),
            }
        }
        program
    }
}

impl RectItem {
    /// Emit IR ops for this rectangle.
    pub fn emit(&self, table: &ColourTable, ops: &mut Vec<Op>) {
        if self.fill.is_none() && self.outline.is_none() {
            return;
        }
        if self.outline.is_some() {
            ops.push(Op::SetLineWidth(self.line_width));
        }
        ops.push(Op::Rect {
            x: self.bbox.x0,
            y: self.bbox.y0,
            width: self.bbox.width(),
            height: self.bbox.height(),
            fill: self.fill.map(|c| table.resolve(c)),
            stroke: self.outline.map(|c| table.resolve(c)),
            tag: self.tag.clone(),
        });
    }
}

impl TextItem {
    /// Emit IR ops for this text block: one `Show` per line.
    pub fn emit(&self, table: &ColourTable, ops: &mut Vec<Op>) {
        let block: Vec<&str> = lines(&self.text).collect();
        if block.is_empty() {
            return;
        }

        let size = self.typeface.size;
        let leading = self.typeface.line_height();
        let (x, y) = self.anchor;

        // First baseline
        let (justify, top) = match self.align {
            TextAlign::Left => (Justify::Left, y),
            TextAlign::Centre => {
                let span = (block.len() - 1) as f32 * leading;
                (Justify::Centre, y + span / 2.0 - size * CAP_HEIGHT / 2.0)
            }
        };

        ops.push(Op::SetColour(table.resolve(self.colour)));
        ops.push(Op::SetFont {
            family: self.typeface.family.clone(),
            size,
        });
        for (i, line) in block.iter().enumerate() {
            ops.push(Op::Show {
                x,
                y: top - i as f32 * leading,
                text: line.to_string(),
                justify,
                tag: self.tag.clone(),
            });
        }
    }
}

impl ImageItem {
    /// Emit IR ops for this image.
    pub fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::Image {
            x: self.bbox.x0,
            y: self.bbox.y0,
            width: self.bbox.width(),
            height: self.bbox.height(),
            image: self.image.clone(),
            tag: self.tag.clone(),
        });
    }
}
