//! # Graphics Fragments
//!
//! Colour, line width, rectangles and RGB images.
//!
//! ## Coordinate System
//!
//! ```text
//!   Y (up)
//!   ▲
//!   │   ┌─────┐ (x + w, y + h)
//!   │   │     │
//!   │   └─────┘
//!   │ (x, y)
//! (0,0) ──────────────────────► X
//! ```
//!
//! Rectangles use the prolog's `R` procedure; images are written inline
//! as hex after a `colorimage` call and are read back by the interpreter
//! from the file itself.

use image::RgbImage;

use super::commands::RECT_PROC;
use super::num;
use crate::scene::Rgb;

/// Hex digits per line of inline image data.
const HEX_LINE: usize = 72;

/// Set the current colour.
pub fn set_colour(rgb: Rgb) -> Vec<u8> {
    format!("{:.3} {:.3} {:.3} setrgbcolor\n", rgb.r, rgb.g, rgb.b).into_bytes()
}

/// Set the stroke width, in canvas units.
pub fn set_line_width(width: f32) -> Vec<u8> {
    format!("{} setlinewidth\n", num(width)).into_bytes()
}

/// # Rectangle
///
/// Fills and/or strokes one rectangle. The fill is painted first so the
/// outline stays visible. Colours are set inside `gsave`/`grestore`, so
/// the current colour is unchanged afterwards.
///
/// Returns an empty fragment when neither paint is requested.
pub fn rect(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    fill: Option<Rgb>,
    stroke: Option<Rgb>,
) -> Vec<u8> {
    let path = format!("{} {} {} {} {}", num(x), num(y), num(width), num(height), RECT_PROC);
    let mut out = String::new();
    match (fill, stroke) {
        (None, None) => {}
        (Some(f), None) => {
            out.push_str(&format!("gsave {} {} fill grestore\n", colour_op(f), path));
        }
        (None, Some(s)) => {
            out.push_str(&format!("gsave {} {} stroke grestore\n", colour_op(s), path));
        }
        (Some(f), Some(s)) => {
            out.push_str(&format!(
                "gsave {} {} gsave fill grestore {} stroke grestore\n",
                colour_op(f),
                path,
                colour_op(s)
            ));
        }
    }
    out.into_bytes()
}

fn colour_op(rgb: Rgb) -> String {
    format!("{:.3} {:.3} {:.3} setrgbcolor", rgb.r, rgb.g, rgb.b)
}

/// # RGB Image
///
/// Stretches `image` over the rectangle at `(x, y)` with size
/// `width × height`. The top image row lands at the top of the rectangle.
///
/// ## Data Format
///
/// 8 bits per component, three components per pixel, written as hex
/// digits, [`HEX_LINE`] digits per line.
pub fn image(x: f32, y: f32, width: f32, height: f32, image: &RgbImage) -> Vec<u8> {
    let (w, h) = image.dimensions();
    let mut out = String::new();
    out.push_str("gsave\n");
    out.push_str(&format!(
        "{} {} translate {} {} scale\n",
        num(x),
        num(y),
        num(width),
        num(height)
    ));
    out.push_str(&format!("/picstr {} string def\n", w * 3));
    out.push_str(&format!("{w} {h} 8 [{w} 0 0 -{h} 0 {h}] "));
    out.push_str("{ currentfile picstr readhexstring pop } false 3 colorimage\n");

    let mut column = 0;
    for byte in image.as_raw() {
        out.push_str(&format!("{:02x}", byte));
        column += 2;
        if column >= HEX_LINE {
            out.push('\n');
            column = 0;
        }
    }
    if column > 0 {
        out.push('\n');
    }
    out.push_str("grestore\n");
    out.into_bytes()
}
