//! # Scene Model
//!
//! A [`Scene`] is the set of draw instructions for one emission pass:
//! rectangles, text blocks and raster images, each optionally tagged.
//! Scenes are values. Build one with [`SceneBuilder`], emit it, drop it;
//! to print without some elements, derive a new scene with
//! [`Scene::without_tag`] instead of editing the old one.
//!
//! ## Coordinates
//!
//! Scene coordinates are canvas units with the origin at the lower-left
//! corner and y growing upward, the same space the grid calculator uses.
//!
//! ```
//! use labelsheet::scene::{NamedColour, RectItem, Scene, TextItem};
//! use labelsheet::sheet::LabelBox;
//!
//! let cell = LabelBox::new(20.0, 38.0, 200.0, 146.0);
//! let scene = Scene::builder()
//!     .push(RectItem::outline(cell, NamedColour::Grey64).tag("ghost"))
//!     .push(TextItem::new(cell.centre(), "Ada Lovelace\n12 St James's Square").centred())
//!     .build();
//!
//! assert_eq!(scene.primitive_count(), 3);
//! assert_eq!(scene.without_tag(&"ghost".into()).primitive_count(), 2);
//! ```

pub mod colour;
pub mod text;

pub use colour::{Colour, ColourTable, NamedColour, Rgb};
pub use text::{blocks, lines, split_lines};

use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LabelError, Result};
use crate::sheet::LabelBox;

/// Largest coordinate magnitude accepted by [`Scene::validate`], in points.
///
/// 200 inches, the upper page limit of common PostScript interpreters.
pub const MAX_COORDINATE: f32 = 14_400.0;

/// Identifies a group of scene items for selective removal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag(String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Font family and size. The family is passed through to the document
/// untouched; whether it exists is the renderer's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typeface {
    pub family: String,
    /// Size in points
    pub size: f32,
}

impl Typeface {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// Baseline-to-baseline distance.
    #[inline]
    pub fn line_height(&self) -> f32 {
        self.size * 1.2
    }
}

impl Default for Typeface {
    fn default() -> Self {
        Self::new("Helvetica", 11.0)
    }
}

/// Horizontal placement of a text block relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Anchor is the start of the first baseline.
    #[default]
    Left,
    /// Anchor is the centre of the whole block, both axes.
    Centre,
}

// ============================================================================
// ITEMS
// ============================================================================

/// A filled and/or outlined rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectItem {
    pub bbox: LabelBox,
    pub fill: Option<Colour>,
    pub outline: Option<Colour>,
    pub line_width: f32,
    pub tag: Option<Tag>,
}

impl RectItem {
    pub fn new(bbox: LabelBox) -> Self {
        Self {
            bbox,
            fill: None,
            outline: None,
            line_width: 1.0,
            tag: None,
        }
    }

    /// Outline only.
    pub fn outline(bbox: LabelBox, colour: impl Into<Colour>) -> Self {
        Self::new(bbox).with_outline(colour)
    }

    /// Fill only.
    pub fn filled(bbox: LabelBox, colour: impl Into<Colour>) -> Self {
        Self::new(bbox).with_fill(colour)
    }

    pub fn with_fill(mut self, colour: impl Into<Colour>) -> Self {
        self.fill = Some(colour.into());
        self
    }

    pub fn with_outline(mut self, colour: impl Into<Colour>) -> Self {
        self.outline = Some(colour.into());
        self
    }

    pub fn line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// A block of text, one or more lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub anchor: (f32, f32),
    pub text: String,
    pub colour: Colour,
    pub typeface: Typeface,
    pub align: TextAlign,
    pub tag: Option<Tag>,
}

impl TextItem {
    pub fn new(anchor: (f32, f32), text: impl Into<String>) -> Self {
        Self {
            anchor,
            text: text.into(),
            colour: Colour::default(),
            typeface: Typeface::default(),
            align: TextAlign::Left,
            tag: None,
        }
    }

    pub fn colour(mut self, colour: impl Into<Colour>) -> Self {
        self.colour = colour.into();
        self
    }

    pub fn typeface(mut self, typeface: Typeface) -> Self {
        self.typeface = typeface;
        self
    }

    pub fn centred(mut self) -> Self {
        self.align = TextAlign::Centre;
        self
    }

    pub fn tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// An RGB raster stretched over a box.
#[derive(Debug, Clone)]
pub struct ImageItem {
    pub bbox: LabelBox,
    pub image: RgbImage,
    pub tag: Option<Tag>,
}

impl ImageItem {
    pub fn new(bbox: LabelBox, image: RgbImage) -> Self {
        Self {
            bbox,
            image,
            tag: None,
        }
    }

    pub fn tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// One draw instruction.
#[derive(Debug, Clone)]
pub enum Item {
    Rect(RectItem),
    Text(TextItem),
    Image(ImageItem),
}

impl Item {
    pub fn tag(&self) -> Option<&Tag> {
        match self {
            Item::Rect(r) => r.tag.as_ref(),
            Item::Text(t) => t.tag.as_ref(),
            Item::Image(i) => i.tag.as_ref(),
        }
    }

    /// Number of document primitives this item turns into.
    ///
    /// A rectangle is one primitive (fill and outline together), unless it
    /// has neither. Text yields one primitive per line.
    pub fn primitive_count(&self) -> usize {
        match self {
            Item::Rect(r) => usize::from(r.fill.is_some() || r.outline.is_some()),
            Item::Text(t) => lines(&t.text).count(),
            Item::Image(_) => 1,
        }
    }

    fn points(&self) -> Vec<f32> {
        match self {
            Item::Rect(r) => r.bbox.corners().to_vec(),
            Item::Text(t) => vec![t.anchor.0, t.anchor.1, t.typeface.size],
            Item::Image(i) => i.bbox.corners().to_vec(),
        }
    }

    /// Paint parameters the interpreter cannot use: a bad line width, a
    /// non-finite RGB colour or an empty raster.
    fn paint_fault(&self) -> Option<String> {
        let colours: Vec<Colour> = match self {
            Item::Rect(r) => {
                if !r.line_width.is_finite() || r.line_width < 0.0 {
                    return Some(format!("line width {}", r.line_width));
                }
                r.fill.into_iter().chain(r.outline).collect()
            }
            Item::Text(t) => {
                if t.typeface.size <= 0.0 {
                    return Some(format!("font size {}", t.typeface.size));
                }
                vec![t.colour]
            }
            Item::Image(i) => {
                let (w, h) = i.image.dimensions();
                if w == 0 || h == 0 {
                    return Some(format!("empty {}x{} image", w, h));
                }
                Vec::new()
            }
        };
        colours.into_iter().find_map(|c| match c {
            Colour::Rgb(rgb) if ![rgb.r, rgb.g, rgb.b].iter().all(|v| v.is_finite()) => {
                Some(format!("colour {:?}", rgb))
            }
            _ => None,
        })
    }
}

impl From<RectItem> for Item {
    fn from(r: RectItem) -> Self {
        Item::Rect(r)
    }
}

impl From<TextItem> for Item {
    fn from(t: TextItem) -> Self {
        Item::Text(t)
    }
}

impl From<ImageItem> for Item {
    fn from(i: ImageItem) -> Self {
        Item::Image(i)
    }
}

// ============================================================================
// SCENE
// ============================================================================

/// Immutable, ordered set of draw instructions. Later items paint over
/// earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    items: Vec<Item>,
}

impl Scene {
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectItem> {
        self.items.iter().filter_map(|item| match item {
            Item::Rect(r) => Some(r),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextItem> {
        self.items.iter().filter_map(|item| match item {
            Item::Text(t) => Some(t),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageItem> {
        self.items.iter().filter_map(|item| match item {
            Item::Image(i) => Some(i),
            _ => None,
        })
    }

    /// Total document primitives the scene emits.
    pub fn primitive_count(&self) -> usize {
        self.items.iter().map(Item::primitive_count).sum()
    }

    /// Primitives emitted by items carrying `tag`.
    pub fn tagged_count(&self, tag: &Tag) -> usize {
        self.items
            .iter()
            .filter(|item| item.tag() == Some(tag))
            .map(Item::primitive_count)
            .sum()
    }

    /// A new scene with every item tagged `tag` removed.
    pub fn without_tag(&self, tag: &Tag) -> Scene {
        Scene {
            items: self
                .items
                .iter()
                .filter(|item| item.tag() != Some(tag))
                .cloned()
                .collect(),
        }
    }

    /// A new scene with `other`'s items painted after this scene's.
    pub fn merged(&self, other: &Scene) -> Scene {
        Scene {
            items: self.items.iter().chain(&other.items).cloned().collect(),
        }
    }

    /// Reject scenes with coordinates that are not finite or lie beyond
    /// [`MAX_COORDINATE`], and items whose paint cannot be rendered.
    pub fn validate(&self) -> Result<()> {
        for (i, item) in self.items.iter().enumerate() {
            if let Some(fault) = item.paint_fault() {
                return Err(LabelError::MalformedScene(format!("item {} has {}", i, fault)));
            }
            for v in item.points() {
                if !v.is_finite() || v.abs() > MAX_COORDINATE {
                    return Err(LabelError::MalformedScene(format!(
                        "item {} has coordinate {}",
                        i, v
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Accumulates items for a [`Scene`].
#[derive(Debug, Default)]
pub struct SceneBuilder {
    items: Vec<Item>,
}

impl SceneBuilder {
    pub fn push(mut self, item: impl Into<Item>) -> Self {
        self.items.push(item.into());
        self
    }

    pub fn add(&mut self, item: impl Into<Item>) {
        self.items.push(item.into());
    }

    pub fn extend(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn build(self) -> Scene {
        Scene { items: self.items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Scene {
        let cell = LabelBox::new(10.0, 10.0, 100.0, 60.0);
        Scene::builder()
            .push(RectItem::outline(cell, NamedColour::Grey64).tag("ghost"))
            .push(RectItem::outline(cell.translate(100.0, 0.0), NamedColour::Grey64).tag("ghost"))
            .push(TextItem::new((20.0, 50.0), "a\nb\nc\n").tag("label-0"))
            .push(RectItem::new(cell))
            .build()
    }

    #[test]
    fn test_primitive_count() {
        let scene = sample();
        assert_eq!(scene.items().len(), 4);
        // two outlines + three lines; the bare rect draws nothing
        assert_eq!(scene.primitive_count(), 5);
    }

    #[test]
    fn test_without_tag() {
        let scene = sample();
        let ghost = Tag::from("ghost");
        let stripped = scene.without_tag(&ghost);
        assert_eq!(
            stripped.primitive_count(),
            scene.primitive_count() - scene.tagged_count(&ghost)
        );
        assert_eq!(stripped.rects().count(), 1);
        // original is untouched
        assert_eq!(scene.rects().count(), 3);
    }

    #[test]
    fn test_validate_rejects_nan() {
        let scene = Scene::builder()
            .push(TextItem::new((f32::NAN, 0.0), "x"))
            .build();
        assert!(matches!(scene.validate(), Err(LabelError::MalformedScene(_))));
    }

    #[test]
    fn test_validate_rejects_far_coordinates() {
        let far = LabelBox::new(0.0, 0.0, 20_000.0, 10.0);
        let scene = Scene::builder().push(RectItem::filled(far, Colour::BLACK)).build();
        assert!(scene.validate().is_err());
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unusable_paint() {
        let cell = LabelBox::new(0.0, 0.0, 50.0, 20.0);
        let malformed = |item: Item| {
            let scene = Scene::builder().push(item).build();
            matches!(scene.validate(), Err(LabelError::MalformedScene(_)))
        };
        assert!(malformed(RectItem::outline(cell, Colour::BLACK).line_width(f32::NAN).into()));
        assert!(malformed(RectItem::outline(cell, Colour::BLACK).line_width(-1.0).into()));
        assert!(malformed(RectItem::filled(cell, Rgb::new(f32::NAN, 0.0, 0.0)).into()));
        let text = TextItem::new((5.0, 5.0), "x");
        assert!(malformed(text.clone().colour(Rgb::new(0.0, f32::INFINITY, 0.0)).into()));
        assert!(malformed(text.typeface(Typeface::new("Helvetica", 0.0)).into()));
        assert!(malformed(ImageItem::new(cell, RgbImage::new(0, 0)).into()));
        assert!(!malformed(ImageItem::new(cell, RgbImage::new(1, 1)).into()));
        assert!(!malformed(RectItem::outline(cell, Colour::BLACK).line_width(0.0).into()));
    }

    #[test]
    fn test_merged_preserves_order() {
        let a = sample();
        let b = Scene::builder().push(TextItem::new((0.0, 0.0), "z")).build();
        let m = a.merged(&b);
        assert_eq!(m.items().len(), 5);
        assert!(matches!(m.items()[4], Item::Text(_)));
    }

    #[test]
    fn test_typeface_line_height() {
        let face = Typeface::new("Times-Roman", 10.0);
        assert!((face.line_height() - 12.0).abs() < 1e-6);
    }
}
