//! # Label Templates
//!
//! A template describes one kind of label sheet: how many labels sit across
//! and down the page and the physical size of each label.
//!
//! ## Built-in Templates
//!
//! | Name | Shape | Label (mm) | Left / Gap / Bottom (mm) | Product codes |
//! |------|-------|------------|--------------------------|---------------|
//! | `3x7` | 3 × 7 | 63.5 × 38.1 | 7.0 / 3.0 / 13.5 | L7159, J8160 |
//! | `2x7` | 2 × 7 | 97.8 × 38.8 | 4.8 / 2.1 / 15.0 | L7163, J8163 |
//! | `5x13` | 5 × 13 | 38.1 × 21.2 | 2.5 / 2.625 / 11.0 | L7651, J8551 |
//! | `2x4` | 2 × 4 | 99.1 × 67.7 | 4.5 / 2.8 / 13.0 | L7165, J7165 |
//! | `4x8` | 4 × 8 | 51.0 × 34.0 | 5.0 / 0.0 / 19.0 | |
//! | `long` | 1 × 1 | 220.0 × 110.0 | 0 / 0 / 0 | |
//! | `envelope` | 1 × 1 | 229.0 × 162.0 | 0 / 0 / 0 | |
//!
//! The shape is written columns × rows, matching how the sheets are sold.
//!
//! ## Usage
//!
//! ```
//! use labelsheet::sheet::TemplateRegistry;
//!
//! let registry = TemplateRegistry::builtin();
//! let template = registry.get("L7159")?;
//! assert_eq!(template.name, "3x7");
//! assert_eq!((template.columns, template.rows), (3, 7));
//! # Ok::<(), labelsheet::LabelError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::units::mm_to_points;
use crate::error::{LabelError, Result};

/// Physical label dimensions in millimetres, as printed on the box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Label width
    pub width: f32,
    /// Label height
    pub height: f32,
    /// Distance from the left page edge to the first column
    pub left_margin: f32,
    /// Horizontal gap between columns
    pub gap: f32,
    /// Distance from the page edge to the first row
    pub bottom_margin: f32,
}

impl Dimensions {
    pub const fn new(
        width: f32,
        height: f32,
        left_margin: f32,
        gap: f32,
        bottom_margin: f32,
    ) -> Self {
        Self {
            width,
            height,
            left_margin,
            gap,
            bottom_margin,
        }
    }
}

/// # Label Template
///
/// Immutable once registered. All lengths are in points.
///
/// ## Layout
///
/// ```text
///  ┌──────────────────────────────────────┐
///  │ ┌──────┐ gap ┌──────┐ gap ┌──────┐   │
///  │ │      │     │      │     │      │   │  row rows-1
///  │ └──────┘     └──────┘     └──────┘   │
///  │    ...                               │
///  │ ┌──────┐     ┌──────┐     ┌──────┐   │
///  │ │  0   │     │  1   │     │  2   │   │  row 0
///  │ └──────┘     └──────┘     └──────┘   │
///  │ ↑ bottom_margin                      │
///  └──────────────────────────────────────┘
///  ← left_margin
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: String,
    /// Number of rows down the sheet
    pub rows: u32,
    /// Number of labels across one row. `<= 1` means a single region.
    pub columns: u32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub left_margin: f32,
    pub gap: f32,
    pub bottom_margin: f32,
    /// Print registration (horizontal, vertical) applied to label text
    pub registration: (f32, f32),
}

impl Template {
    /// Build a template from millimetre dimensions.
    ///
    /// Fails with [`LabelError::InvalidTemplate`] when a length is negative
    /// or not finite, when the label has no area, or when the shape has a
    /// zero count.
    pub fn from_mm(
        name: impl Into<String>,
        columns: u32,
        rows: u32,
        dims: Dimensions,
    ) -> Result<Self> {
        let name = name.into();
        let lengths = [
            ("width", dims.width),
            ("height", dims.height),
            ("left margin", dims.left_margin),
            ("gap", dims.gap),
            ("bottom margin", dims.bottom_margin),
        ];
        for (what, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(LabelError::InvalidTemplate(format!(
                    "{}: {} must be a non-negative length, got {}",
                    name, what, value
                )));
            }
        }
        if dims.width <= 0.0 || dims.height <= 0.0 {
            return Err(LabelError::InvalidTemplate(format!(
                "{}: label width and height must be positive",
                name
            )));
        }
        if rows == 0 || columns == 0 {
            return Err(LabelError::InvalidTemplate(format!(
                "{}: shape {}x{} has no labels",
                name, columns, rows
            )));
        }

        Ok(Self {
            name,
            rows,
            columns,
            cell_width: mm_to_points(dims.width),
            cell_height: mm_to_points(dims.height),
            left_margin: mm_to_points(dims.left_margin),
            gap: mm_to_points(dims.gap),
            bottom_margin: mm_to_points(dims.bottom_margin),
            registration: (0.0, 0.0),
        })
    }

    /// Set the print registration, in points.
    pub fn with_registration(mut self, horizontal: f32, vertical: f32) -> Self {
        self.registration = (horizontal, vertical);
        self
    }

    /// Whether the template lays out a single region per page.
    #[inline]
    pub fn is_single(&self) -> bool {
        self.columns <= 1
    }

    /// Number of slots a page of this template holds.
    pub fn slot_count(&self) -> usize {
        if self.is_single() {
            1
        } else {
            (self.rows * self.columns) as usize
        }
    }
}

// ============================================================================
// BUILT-IN TABLE
// ============================================================================

/// (name, columns, rows, dimensions, registration, product codes)
type BuiltinEntry = (&'static str, u32, u32, Dimensions, (f32, f32), &'static [&'static str]);

const BUILTIN: &[BuiltinEntry] = &[
    ("3x7", 3, 7, Dimensions::new(63.5, 38.1, 7.0, 3.0, 13.5), (-8.0, 0.0), &["L7159", "J8160"]),
    ("2x7", 2, 7, Dimensions::new(97.8, 38.8, 4.8, 2.1, 15.0), (-5.0, 5.0), &["L7163", "J8163"]),
    ("5x13", 5, 13, Dimensions::new(38.1, 21.2, 2.5, 2.625, 11.0), (0.0, 0.0), &["L7651", "J8551"]),
    ("2x4", 2, 4, Dimensions::new(99.1, 67.7, 4.5, 2.8, 13.0), (-11.0, 2.0), &["L7165", "J7165"]),
    ("4x8", 4, 8, Dimensions::new(51.0, 34.0, 5.0, 0.0, 19.0), (0.0, 0.0), &[]),
    ("long", 1, 1, Dimensions::new(220.0, 110.0, 0.0, 0.0, 0.0), (0.0, 0.0), &[]),
    ("envelope", 1, 1, Dimensions::new(229.0, 162.0, 0.0, 0.0, 0.0), (0.0, 0.0), &[]),
];

/// Template used when the caller has no preference.
pub const DEFAULT_TEMPLATE: &str = "3x7";

// ============================================================================
// REGISTRY
// ============================================================================

/// Read-only lookup of templates by name or product code.
///
/// Build it once at startup and pass it by reference; nothing in the crate
/// mutates a registry after construction.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, Template>,
    aliases: BTreeMap<String, String>,
}

impl TemplateRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry of built-in sheets.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for &(name, columns, rows, dims, (dx, dy), codes) in BUILTIN {
            // Built-in dimensions are all valid; skip rather than panic if edited badly
            let Ok(template) = Template::from_mm(name, columns, rows, dims) else {
                continue;
            };
            registry.insert(template.with_registration(dx, dy));
            for code in codes {
                registry.alias(*code, name);
            }
        }
        registry
    }

    /// Add or replace a template.
    pub fn insert(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Register a product code for an existing template name.
    pub fn alias(&mut self, code: impl Into<String>, name: impl Into<String>) {
        self.aliases.insert(code.into(), name.into());
    }

    /// Look up a template by name, falling back to product codes.
    pub fn get(&self, name: &str) -> Result<&Template> {
        if let Some(template) = self.templates.get(name) {
            return Ok(template);
        }
        self.aliases
            .get(name)
            .and_then(|target| self.templates.get(target))
            .ok_or_else(|| LabelError::UnknownTemplate(name.to_string()))
    }

    /// Whether `name` resolves to a template.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// Template names in sorted order (product codes excluded).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Product codes that resolve to `name`.
    pub fn aliases_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.aliases
            .iter()
            .filter(move |(_, target)| target.as_str() == name)
            .map(|(code, _)| code.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
