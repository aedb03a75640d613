//! # Slot Sheet
//!
//! Tracks which slots of a label sheet are in use and turns the filled ones
//! into a printable scene.
//!
//! ## Slot States
//!
//! | State | Meaning | Icon colour |
//! |-------|---------|-------------|
//! | `Free` | available for the next label | grey81 |
//! | `Reserved` | skipped, e.g. already peeled off | BlanchedAlmond |
//! | `Filled` | holds a label | BlanchedAlmond |
//!
//! Sheets are often fed through the printer more than once, so slots can
//! be reserved to keep new labels off positions that are already gone.
//!
//! ## Usage
//!
//! ```
//! use labelsheet::sheet::{Label, Sheet, SlotId, TemplateRegistry};
//!
//! let registry = TemplateRegistry::builtin();
//! let mut sheet = Sheet::new(&registry, "2x4")?;
//! sheet.toggle(SlotId(0))?; // first label already used
//! let slot = sheet.place(Label::new("Ada Lovelace\nOckham Park"))?;
//! assert_eq!(slot, SlotId(1));
//! # Ok::<(), labelsheet::LabelError>(())
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use image::RgbImage;

use super::grid::{LabelBox, Page, SlotId, compute_grid, compute_preview_grid};
use super::template::{Template, TemplateRegistry};
use super::units::{PAGE_HEIGHT, PAGE_REGISTRATION, PAGE_WIDTH, PREVIEW_OFFSET, PREVIEW_SCALE};
use crate::emit::emit;
use crate::error::{LabelError, Result};
use crate::scene::{
    Colour, ColourTable, ImageItem, NamedColour, RectItem, Scene, Tag, TextItem, Typeface,
};

/// Tag of the guide outlines. Guides are dropped before printing.
pub const GUIDE_TAG: &str = "ghost";

/// Tag of the background image behind each label.
pub const BACKDROP_TAG: &str = "backdrop";

/// Tag of the label text in `slot`.
pub fn label_tag(slot: SlotId) -> Tag {
    Tag::new(format!("label-{}", slot))
}

/// Tag of the preview icon for `slot`.
pub fn icon_tag(slot: SlotId) -> Tag {
    Tag::new(format!("slot-{}", slot))
}

/// Occupancy of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotState {
    #[default]
    Free,
    Reserved,
    Filled,
}

/// Text to print on one label.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub colour: Colour,
    pub typeface: Typeface,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            colour: Colour::default(),
            typeface: Typeface::default(),
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
}

/// One physical sheet of labels.
#[derive(Debug, Clone)]
pub struct Sheet {
    template: Template,
    page: Page,
    preview: Page,
    states: Vec<SlotState>,
    labels: BTreeMap<SlotId, Label>,
    background: Option<RgbImage>,
}

impl Sheet {
    /// An empty sheet for template `name`.
    pub fn new(registry: &TemplateRegistry, name: &str) -> Result<Self> {
        let template = registry.get(name)?.clone();
        let (dx, dy) = PAGE_REGISTRATION;
        let page = compute_grid(registry, name, 1.0)?.translate(dx, dy);
        let preview = compute_preview_grid(
            registry,
            name,
            PREVIEW_SCALE,
            PREVIEW_OFFSET.0 as i32,
            PREVIEW_OFFSET.1 as i32,
        )?;
        let states = vec![SlotState::Free; page.len()];
        Ok(Self {
            template,
            page,
            preview,
            states,
            labels: BTreeMap::new(),
            background: None,
        })
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Label boxes on the printed page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Slot icon boxes.
    pub fn preview(&self) -> &Page {
        &self.preview
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, slot: SlotId) -> Result<SlotState> {
        self.states
            .get(slot.index())
            .copied()
            .ok_or(LabelError::InvalidSlot(slot.index()))
    }

    pub fn label(&self, slot: SlotId) -> Option<&Label> {
        self.labels.get(&slot)
    }

    /// First free slot in enumeration order.
    pub fn next_free(&self) -> Option<SlotId> {
        self.states
            .iter()
            .position(|s| *s == SlotState::Free)
            .map(SlotId)
    }

    pub fn free_count(&self) -> usize {
        self.states.iter().filter(|s| **s == SlotState::Free).count()
    }

    pub fn filled_count(&self) -> usize {
        self.labels.len()
    }

    /// Flip a slot between free and reserved. A filled slot loses its label
    /// and becomes free. Returns the new state.
    pub fn toggle(&mut self, slot: SlotId) -> Result<SlotState> {
        let state = self
            .states
            .get_mut(slot.index())
            .ok_or(LabelError::InvalidSlot(slot.index()))?;
        *state = match *state {
            SlotState::Free => SlotState::Reserved,
            SlotState::Reserved => SlotState::Free,
            SlotState::Filled => {
                self.labels.remove(&slot);
                SlotState::Free
            }
        };
        Ok(*state)
    }

    /// Reserve the first `n` slots that are still free.
    pub fn reserve_first(&mut self, n: usize) {
        for state in self.states.iter_mut().filter(|s| **s == SlotState::Free).take(n) {
            *state = SlotState::Reserved;
        }
    }

    /// Reserve every free slot.
    pub fn reserve_all(&mut self) {
        self.reserve_first(usize::MAX);
    }

    /// Free every slot and drop all labels.
    pub fn clear(&mut self) {
        self.states.fill(SlotState::Free);
        self.labels.clear();
    }

    /// Image stretched behind every filled label, or `None` for plain labels.
    pub fn set_background(&mut self, image: Option<RgbImage>) {
        self.background = image;
    }

    /// Put `label` in the next free slot.
    pub fn place(&mut self, label: Label) -> Result<SlotId> {
        let slot = self.next_free().ok_or(LabelError::SheetFull)?;
        self.place_at(slot, label)?;
        Ok(slot)
    }

    /// Put `label` in `slot`, replacing any label already there.
    pub fn place_at(&mut self, slot: SlotId, label: Label) -> Result<()> {
        let state = self
            .states
            .get_mut(slot.index())
            .ok_or(LabelError::InvalidSlot(slot.index()))?;
        *state = SlotState::Filled;
        self.labels.insert(slot, label);
        Ok(())
    }

    /// Text item for a label centred in `bbox`, shifted by the template's
    /// print registration.
    fn label_item(&self, slot: SlotId, bbox: &LabelBox, label: &Label) -> TextItem {
        let (cx, cy) = bbox.centre();
        let (dx, dy) = self.template.registration;
        TextItem::new((cx + dx, cy + dy), label.text.clone())
            .colour(label.colour)
            .typeface(label.typeface.clone())
            .centred()
            .tag(label_tag(slot))
    }

    /// The printed page: optional guide outlines, then every label over its
    /// backdrop.
    pub fn scene(&self, guides: bool) -> Scene {
        let mut builder = Scene::builder();
        if guides {
            for (_, bbox) in self.page.slots() {
                builder.add(RectItem::outline(*bbox, NamedColour::Grey64).tag(GUIDE_TAG));
            }
        }
        for (slot, label) in &self.labels {
            if let Some(bbox) = self.page.get(*slot) {
                if let Some(image) = &self.background {
                    builder.add(ImageItem::new(*bbox, image.clone()).tag(BACKDROP_TAG));
                }
                builder.add(self.label_item(*slot, bbox, label));
            }
        }
        builder.build()
    }

    /// The slot icon grid, coloured by occupancy.
    pub fn preview_scene(&self) -> Scene {
        let mut builder = Scene::builder();
        for ((slot, bbox), state) in self.preview.slots().zip(&self.states) {
            let colour = match state {
                SlotState::Free => NamedColour::Grey81,
                SlotState::Reserved | SlotState::Filled => NamedColour::BlanchedAlmond,
            };
            builder.add(
                RectItem::filled(*bbox, colour)
                    .with_outline(colour)
                    .tag(icon_tag(slot)),
            );
        }
        builder.build()
    }

    /// Write the page without guides. Returns the primitive count.
    pub fn print(&self, colours: &ColourTable, destination: impl AsRef<Path>) -> Result<usize> {
        let scene = self.scene(true).without_tag(&Tag::new(GUIDE_TAG));
        emit(&scene, colours, PAGE_WIDTH, PAGE_HEIGHT, destination)
    }
}
