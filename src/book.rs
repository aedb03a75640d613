//! # Address Book
//!
//! Lays a list of entries out over as many label pages as needed, one entry
//! per slot, with a banner naming the category and page number.
//!
//! ## Page Layout
//!
//! ```text
//! +----------------------------------------------+
//! | [## family : page 2 ##]                      |  banner (ground) + header
//! |  +----------+  +----------+  +----------+    |
//! |  | entry 21 |  | entry 22 |  | entry 23 |    |  leaf
//! |  +----------+  +----------+  +----------+    |
//! |  ...                                         |
//! +----------------------------------------------+
//! ```
//!
//! Entries fill slots in grid order: bottom row first, left to right.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::emit::emit;
use crate::error::{LabelError, Result};
use crate::scene::{
    Colour, ColourTable, NamedColour, RectItem, Scene, SceneBuilder, TextItem, Typeface,
};
use crate::sheet::grid::compute_grid;
use crate::sheet::template::TemplateRegistry;
use crate::sheet::units::{PAGE_HEIGHT, PAGE_REGISTRATION, PAGE_WIDTH};
use crate::sheet::LabelBox;

pub const BANNER_TAG: &str = "ground";
pub const HEADER_TAG: &str = "header";
pub const ENTRY_TAG: &str = "leaf";

/// Banner strip across the top-left of each page.
const BANNER: LabelBox = LabelBox {
    x0: 18.0,
    y0: PAGE_HEIGHT - 40.0,
    x1: 158.0,
    y1: PAGE_HEIGHT - 20.0,
};

/// One address book entry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Entry {
    pub name: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

impl Entry {
    pub fn new(name: impl Into<String>, lines: &[&str]) -> Self {
        Self {
            name: name.into(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Printed text: the address lines, or the name when there are none.
    pub fn text(&self) -> String {
        if self.lines.is_empty() {
            self.name.clone()
        } else {
            self.lines.join("\n")
        }
    }
}

/// Read a JSON list of entries from `path`.
///
/// Both a missing file and malformed JSON are reported as
/// [`LabelError::Input`].
pub fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    let text = fs::read_to_string(path)
        .map_err(|e| LabelError::Input(format!("failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&text)
        .map_err(|e| LabelError::Input(format!("{}: {}", path.display(), e)))
}

/// How entries are drawn inside their slot.
#[derive(Debug, Clone, PartialEq)]
pub struct BookStyle {
    pub colour: Colour,
    pub typeface: Typeface,
    /// Distance from the slot's left edge to the text
    pub margin: f32,
    /// Distance from the slot's top edge to the first baseline
    pub inset: f32,
}

impl Default for BookStyle {
    fn default() -> Self {
        Self {
            colour: Colour::BLACK,
            typeface: Typeface::new("Helvetica Narrow", 9.0),
            margin: 6.0,
            inset: 14.0,
        }
    }
}

fn page_header(builder: &mut SceneBuilder, category: &str, page: usize) {
    builder.add(
        RectItem::filled(BANNER, NamedColour::Grey22)
            .with_outline(NamedColour::Grey22)
            .tag(BANNER_TAG),
    );
    builder.add(
        TextItem::new(BANNER.centre(), format!("{} : page {}", category, page))
            .colour(NamedColour::White)
            .centred()
            .tag(HEADER_TAG),
    );
}

/// Split `entries` into pages of the template's slot count.
///
/// Returns no pages for an empty list.
pub fn paginate(
    registry: &TemplateRegistry,
    template: &str,
    category: &str,
    entries: &[Entry],
    style: &BookStyle,
) -> Result<Vec<Scene>> {
    let (dx, dy) = PAGE_REGISTRATION;
    let page = compute_grid(registry, template, 1.0)?.translate(dx, dy);

    let scenes: Vec<Scene> = entries
        .chunks(page.len())
        .enumerate()
        .map(|(n, chunk)| {
            let mut builder = Scene::builder();
            page_header(&mut builder, category, n + 1);
            for (bbox, entry) in page.boxes().iter().zip(chunk) {
                builder.add(
                    TextItem::new((bbox.x0 + style.margin, bbox.y1 - style.inset), entry.text())
                        .colour(style.colour)
                        .typeface(style.typeface.clone())
                        .tag(ENTRY_TAG),
                );
            }
            builder.build()
        })
        .collect();

    info!(template, category, entries = entries.len(), pages = scenes.len(), "paginated book");
    Ok(scenes)
}

/// Path of page `n` (1-based) inside `dir`.
pub fn page_path(dir: &Path, n: usize) -> PathBuf {
    dir.join(format!("book-{}.ps", n))
}

/// Write every page to `dir/book-<n>.ps`. Returns the written paths.
pub fn write_pages(
    pages: &[Scene],
    colours: &ColourTable,
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut written = Vec::with_capacity(pages.len());
    for (n, scene) in pages.iter().enumerate() {
        let path = page_path(dir, n + 1);
        emit(scene, colours, PAGE_WIDTH, PAGE_HEIGHT, &path)?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Tag;

    fn entries(n: usize) -> Vec<Entry> {
        (0..n)
            .map(|i| Entry::new(format!("person {}", i), &["1 High Street", "Anytown"]))
            .collect()
    }

    #[test]
    fn test_entry_text() {
        assert_eq!(entries(1)[0].text(), "1 High Street\nAnytown");
        assert_eq!(Entry::new("Solo", &[]).text(), "Solo");
    }

    #[test]
    fn test_entry_deserialize() {
        let json = r#"[{"name":"A","lines":["x","y"]},{"name":"B"}]"#;
        let e: Vec<Entry> = serde_json::from_str(json).unwrap();
        assert_eq!(e[0].lines, vec!["x", "y"]);
        assert!(e[1].lines.is_empty());
    }

    #[test]
    fn test_load_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.json");
        fs::write(&path, r#"[{"name":"A","lines":["x"]}]"#).unwrap();
        assert_eq!(load_entries(&path).unwrap(), vec![Entry::new("A", &["x"])]);

        fs::write(&path, "[{").unwrap();
        assert!(matches!(load_entries(&path), Err(LabelError::Input(_))));

        let missing = dir.path().join("missing.json");
        assert!(matches!(load_entries(&missing), Err(LabelError::Input(_))));
    }

    #[test]
    fn test_paginate_page_count() {
        let registry = TemplateRegistry::builtin();
        let style = BookStyle::default();
        let pages = paginate(&registry, "2x4", "family", &entries(17), &style).unwrap();
        assert_eq!(pages.len(), 3);
        let leaf = Tag::new(ENTRY_TAG);
        assert_eq!(pages[0].tagged_count(&leaf), 8);
        assert_eq!(pages[2].tagged_count(&leaf), 1);
        assert!(paginate(&registry, "2x4", "family", &[], &style).unwrap().is_empty());
    }

    #[test]
    fn test_paginate_headers() {
        let registry = TemplateRegistry::builtin();
        let pages = paginate(&registry, "2x4", "work", &entries(9), &BookStyle::default()).unwrap();
        let header = |scene: &Scene| {
            scene
                .texts()
                .find(|t| t.tag == Some(Tag::new(HEADER_TAG)))
                .map(|t| t.text.clone())
        };
        assert_eq!(header(&pages[0]).as_deref(), Some("work : page 1"));
        assert_eq!(header(&pages[1]).as_deref(), Some("work : page 2"));
        assert_eq!(pages[1].tagged_count(&Tag::new(BANNER_TAG)), 1);
    }

    #[test]
    fn test_entries_fill_slots_in_order() {
        let registry = TemplateRegistry::builtin();
        let style = BookStyle::default();
        let pages = paginate(&registry, "2x4", "family", &entries(2), &style).unwrap();
        let grid = compute_grid(&registry, "2x4", 1.0).unwrap();
        let leaves: Vec<_> = pages[0]
            .texts()
            .filter(|t| t.tag == Some(Tag::new(ENTRY_TAG)))
            .collect();
        let first = grid.boxes()[0];
        let second = grid.boxes()[1];
        let inset = PAGE_REGISTRATION.0 + style.margin;
        assert!((leaves[0].anchor.0 - (first.x0 + inset)).abs() < 1e-3);
        assert!((leaves[1].anchor.0 - (second.x0 + inset)).abs() < 1e-3);
    }

    #[test]
    fn test_write_pages() {
        let dir = tempfile::tempdir().unwrap();
        let registry = TemplateRegistry::builtin();
        let style = BookStyle::default();
        let pages = paginate(&registry, "envelope", "family", &entries(2), &style).unwrap();
        let paths = write_pages(&pages, &ColourTable::default(), dir.path()).unwrap();
        assert_eq!(paths, vec![dir.path().join("book-1.ps"), dir.path().join("book-2.ps")]);
        let second = std::fs::read_to_string(&paths[1]).unwrap();
        assert!(second.contains("(family : page 2) CS"));
    }
}
