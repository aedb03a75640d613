//! # Code Generation
//!
//! Converts IR programs to a PostScript document.

use super::ops::{Op, Program};
use crate::postscript::commands::{self, DocumentInfo};
use crate::postscript::{graphics, text};

impl Program {
    /// Compile the IR program to a PostScript document.
    ///
    /// Uses default header info (no creation date), so output is stable.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes_with_info(&DocumentInfo::default())
    }

    /// Compile the IR program to a PostScript document with header info.
    pub fn to_bytes_with_info(&self, info: &DocumentInfo) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend(commands::header(info));
        out.extend(commands::prolog());
        out.extend(commands::page_begin(self.scale));

        for op in &self.ops {
            if let Some(tag) = op.tag() {
                out.extend(commands::tag(tag.as_str()));
            }
            match op {
                // ===== State Changes =====
                Op::SetColour(rgb) => {
                    out.extend(graphics::set_colour(*rgb));
                }
                Op::SetLineWidth(width) => {
                    out.extend(graphics::set_line_width(*width));
                }
                Op::SetFont { family, size } => {
                    out.extend(text::set_font(family, *size));
                }

                // ===== Primitives =====
                Op::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                    stroke,
                    ..
                } => {
                    out.extend(graphics::rect(*x, *y, *width, *height, *fill, *stroke));
                }
                Op::Show {
                    x,
                    y,
                    text: line,
                    justify,
                    ..
                } => {
                    out.extend(text::show(*x, *y, line, *justify));
                }
                Op::Image {
                    x,
                    y,
                    width,
                    height,
                    image,
                    ..
                } => {
                    out.extend(graphics::image(*x, *y, *width, *height, image));
                }
            }
        }

        out.extend(commands::page_end());
        out.extend(commands::trailer(self.primitive_count()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postscript::text::Justify;
    use crate::scene::{Rgb, Tag};

    #[test]
    fn test_empty_program() {
        let bytes = Program::new().to_bytes();
        let doc = String::from_utf8(bytes).unwrap();
        assert!(doc.starts_with("%!PS-Adobe-3.0\n"));
        assert!(doc.contains("%%BoundingBox: 0 0 595 842"));
        assert!(doc.contains("showpage\n"));
        assert!(doc.ends_with("%%Primitives: 0\n%%EOF\n"));
    }

    #[test]
    fn test_tagged_primitive_comment() {
        let mut program = Program::new();
        program.push(Op::Rect {
            x: 1.0,
            y: 2.0,
            width: 3.0,
            height: 4.0,
            fill: None,
            stroke: Some(Rgb::new(0.0, 0.0, 0.0)),
            tag: Some(Tag::from("ghost")),
        });
        let doc = String::from_utf8(program.to_bytes()).unwrap();
        assert!(doc.contains(
            "%%Tag: ghost\ngsave 0.000 0.000 0.000 setrgbcolor 1 2 3 4 R stroke grestore\n"
        ));
        assert!(doc.contains("%%Primitives: 1\n"));
    }

    #[test]
    fn test_show_and_state_order() {
        let mut program = Program::with_scale(0.5);
        program.push(Op::SetColour(Rgb::new(1.0, 0.0, 0.0)));
        program.push(Op::SetFont {
            family: "Times Roman".into(),
            size: 12.0,
        });
        program.push(Op::Show {
            x: 10.0,
            y: 20.0,
            text: "Hi".into(),
            justify: Justify::Left,
            tag: None,
        });
        let doc = String::from_utf8(program.to_bytes()).unwrap();
        let colour = doc.find("1.000 0.000 0.000 setrgbcolor").unwrap();
        let font = doc.find("/Times-Roman 12 SF").unwrap();
        let show = doc.find("10 20 moveto (Hi) show").unwrap();
        assert!(colour < font && font < show);
        assert!(doc.contains("0.5 0.5 scale\n"));
    }
}
