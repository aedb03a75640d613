//! # PostScript Command Builders
//!
//! Low-level builders for the PostScript fragments this crate emits. Each
//! builder returns the bytes of one complete fragment, newline-terminated,
//! so a document is just their concatenation.
//!
//! ## Module Structure
//!
//! - [`commands`]: Document structure (header, prolog, page, trailer)
//! - [`graphics`]: Colour, line width, rectangles, images
//! - [`text`]: String escaping, font selection, text show
//!
//! ## Usage Example
//!
//! ```
//! use labelsheet::postscript::{commands, graphics, text};
//! use labelsheet::scene::Rgb;
//!
//! let mut data = Vec::new();
//! data.extend(commands::header(&commands::DocumentInfo::default()));
//! data.extend(commands::prolog());
//! data.extend(commands::page_begin(1.0));
//! data.extend(graphics::set_colour(Rgb::new(0.0, 0.0, 0.0)));
//! data.extend(text::set_font("Helvetica", 11.0));
//! data.extend(text::show(72.0, 720.0, "Hello", text::Justify::Left));
//! data.extend(commands::page_end());
//! data.extend(commands::trailer(1));
//!
//! assert!(data.starts_with(b"%!PS-Adobe-3.0"));
//! ```
//!
//! ## Reference
//!
//! Based on the "PostScript Language Reference, third edition" and the
//! "Document Structuring Conventions Specification, version 3.0" by Adobe.

pub mod commands;
pub mod graphics;
pub mod text;

/// Format a number for the output stream.
///
/// At most two decimals, trailing zeros dropped, no negative zero:
/// `12.50 → "12.5"`, `3.0 → "3"`, `-0.001 → "0"`.
pub fn num(v: f32) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}
