//! # Document Structure
//!
//! Header comments, procedure prolog, page setup and trailer.
//!
//! ## Layout
//!
//! ```text
//! %!PS-Adobe-3.0                  header()
//! %%BoundingBox: 0 0 595 842
//! %%EndComments
//! %%BeginProlog ... %%EndProlog   prolog()
//! %%BeginSetup ... %%EndSetup     (part of prolog: page size)
//! %%Page: 1 1                     page_begin()
//! ... primitives ...
//! showpage                        page_end()
//! %%Trailer                       trailer()
//! %%EOF
//! ```
//!
//! The page is always A4 (595 × 842 points). Print queues downstream
//! expect that size, so it is not a parameter.

use super::num;
use crate::sheet::units::{PAGE_HEIGHT, PAGE_WIDTH};

/// Name of the rectangle path procedure: `x y w h R`
pub const RECT_PROC: &str = "R";

/// Name of the font selection procedure: `/Family size SF`
pub const FONT_PROC: &str = "SF";

/// Name of the centred show procedure: `(text) CS`
pub const CENTRE_PROC: &str = "CS";

/// DSC comment prefix marking a tagged primitive.
pub const TAG_COMMENT: &str = "%%Tag: ";

/// DSC comment carrying the number of drawing primitives.
pub const PRIMITIVES_COMMENT: &str = "%%Primitives: ";

/// Header metadata.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub creator: String,
    /// `None` omits the `%%CreationDate` line (stable output for tests)
    pub creation_date: Option<String>,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: "labels".to_string(),
            creator: format!("labelsheet {}", env!("CARGO_PKG_VERSION")),
            creation_date: None,
        }
    }
}

impl DocumentInfo {
    /// Default info stamped with the current local time.
    pub fn now() -> Self {
        Self {
            creation_date: Some(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
            ..Default::default()
        }
    }
}

/// Strip characters that would end a DSC text value.
fn dsc_text(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_control() || c == ')' || c == '(' { ' ' } else { c })
        .collect()
}

/// # Document Header
///
/// DSC 3.0 header with a fixed A4 bounding box and a single page.
pub fn header(info: &DocumentInfo) -> Vec<u8> {
    let mut out = String::new();
    out.push_str("%!PS-Adobe-3.0\n");
    out.push_str(&format!("%%Title: ({})\n", dsc_text(&info.title)));
    out.push_str(&format!("%%Creator: ({})\n", dsc_text(&info.creator)));
    if let Some(date) = &info.creation_date {
        out.push_str(&format!("%%CreationDate: ({})\n", dsc_text(date)));
    }
    out.push_str(&format!(
        "%%BoundingBox: 0 0 {} {}\n",
        num(PAGE_WIDTH),
        num(PAGE_HEIGHT)
    ));
    out.push_str(&format!(
        "%%DocumentMedia: A4 {} {} 0 () ()\n",
        num(PAGE_WIDTH),
        num(PAGE_HEIGHT)
    ));
    out.push_str("%%Pages: 1\n");
    out.push_str("%%EndComments\n");
    out.into_bytes()
}

/// # Prolog and Setup
///
/// Defines the procedures used by the body:
///
/// - `R` (`x y w h`): rectangle path
/// - `SF` (`/Family size`): select an ISO Latin-1 re-encoded font
/// - `CS` (`(text)`): show text centred on the current point
///
/// The setup section requests an A4 page from the device.
pub fn prolog() -> Vec<u8> {
    let mut out = String::new();
    out.push_str("%%BeginProlog\n");
    out.push_str(&format!(
        concat!(
            "/{} {{ 4 2 roll moveto 1 index 0 rlineto 0 exch rlineto neg 0 rlineto ",
            "closepath }} bind def\n"
        ),
        RECT_PROC
    ));
    out.push_str(&format!(
        concat!(
            "/{} {{ exch findfont dup length dict begin\n",
            "  {{ 1 index /FID ne {{ def }} {{ pop pop }} ifelse }} forall\n",
            "  /Encoding ISOLatin1Encoding def currentdict end\n",
            "  /LabelFont exch definefont exch scalefont setfont }} bind def\n"
        ),
        FONT_PROC
    ));
    out.push_str(&format!(
        "/{} {{ dup stringwidth pop 2 div neg 0 rmoveto show }} bind def\n",
        CENTRE_PROC
    ));
    out.push_str("%%EndProlog\n");
    out.push_str("%%BeginSetup\n");
    out.push_str(&format!(
        "<< /PageSize [{} {}] >> setpagedevice\n",
        num(PAGE_WIDTH),
        num(PAGE_HEIGHT)
    ));
    out.push_str("%%EndSetup\n");
    out.into_bytes()
}

/// # Begin Page
///
/// Opens the single page and maps canvas units onto points with a uniform
/// `scale` about the lower-left corner.
pub fn page_begin(scale: f32) -> Vec<u8> {
    let mut out = String::from("%%Page: 1 1\n%%BeginPageSetup\nsave\n");
    if (scale - 1.0).abs() > f32::EPSILON {
        out.push_str(&format!("{} {} scale\n", num_precise(scale), num_precise(scale)));
    }
    out.push_str("%%EndPageSetup\n");
    out.into_bytes()
}

/// # End Page
pub fn page_end() -> Vec<u8> {
    b"restore\nshowpage\n".to_vec()
}

/// # Trailer
///
/// Records the primitive count so a reader can check the body without
/// interpreting it.
pub fn trailer(primitives: usize) -> Vec<u8> {
    format!("%%Trailer\n{}{}\n%%EOF\n", PRIMITIVES_COMMENT, primitives).into_bytes()
}

/// # Tag Comment
///
/// Precedes a primitive that belongs to a tag group.
pub fn tag(name: &str) -> Vec<u8> {
    format!("{}{}\n", TAG_COMMENT, dsc_text(name)).into_bytes()
}

/// Scale factors need more precision than coordinates.
fn num_precise(v: f32) -> String {
    let s = format!("{:.6}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_header_fixed_page() {
        let h = text(header(&DocumentInfo::default()));
        assert!(h.starts_with("%!PS-Adobe-3.0\n"));
        assert!(h.contains("%%BoundingBox: 0 0 595 842\n"));
        assert!(h.contains("%%Pages: 1\n"));
        assert!(!h.contains("%%CreationDate"));
        assert!(h.ends_with("%%EndComments\n"));
    }

    #[test]
    fn test_header_with_date() {
        let info = DocumentInfo {
            creation_date: Some("2024-01-02 03:04:05".into()),
            ..Default::default()
        };
        assert!(text(header(&info)).contains("%%CreationDate: (2024-01-02 03:04:05)\n"));
    }

    #[test]
    fn test_title_sanitised() {
        let info = DocumentInfo {
            title: "a)b\nc".into(),
            ..Default::default()
        };
        assert!(text(header(&info)).contains("%%Title: (a b c)\n"));
    }

    #[test]
    fn test_prolog_defines_procs() {
        let p = text(prolog());
        assert!(p.contains("/R {"));
        assert!(p.contains("/SF {"));
        assert!(p.contains("/CS {"));
        assert!(p.contains("<< /PageSize [595 842] >> setpagedevice"));
    }

    #[test]
    fn test_page_begin_scale() {
        assert!(!text(page_begin(1.0)).contains("scale"));
        assert!(text(page_begin(0.5)).contains("0.5 0.5 scale\n"));
    }

    #[test]
    fn test_trailer() {
        assert_eq!(text(trailer(7)), "%%Trailer\n%%Primitives: 7\n%%EOF\n");
    }
}
