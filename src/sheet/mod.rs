//! # Sheet Module
//!
//! Label sheet geometry: units, templates, the grid calculator and slot
//! occupancy.
//!
//! ## Modules
//!
//! - [`units`]: Conversion constants and page size
//! - [`template`]: Template definitions and the registry
//! - [`grid`]: Box computation for the page and the preview
//! - [`slots`]: Which slots hold which labels

pub mod grid;
pub mod slots;
pub mod template;
pub mod units;

pub use grid::{LabelBox, Page, SlotId, compute_grid, compute_preview_grid};
pub use slots::{Label, Sheet, SlotState};
pub use template::{DEFAULT_TEMPLATE, Dimensions, Template, TemplateRegistry};
