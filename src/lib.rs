//! # Labelsheet - Label Sheet Layout and PostScript Output
//!
//! Labelsheet computes where the labels of a pre-cut sheet sit on an A4 page
//! and prints text onto them as a PostScript document. It provides:
//!
//! - **Templates**: Built-in Avery-style sheets plus a JSON config layer
//! - **Grid calculation**: Label boxes for printing and for slot previews
//! - **Scenes**: Tagged rectangles, text blocks and images
//! - **Emission**: Scene → IR → optimised PostScript
//!
//! ## Quick Start
//!
//! ```no_run
//! use labelsheet::{
//!     scene::ColourTable,
//!     sheet::{Label, Sheet, TemplateRegistry},
//! };
//!
//! let registry = TemplateRegistry::builtin();
//! let mut sheet = Sheet::new(&registry, "L7159")?;
//!
//! // Two labels were peeled off last time
//! sheet.reserve_first(2);
//! sheet.place(Label::new("Ada Lovelace\nOckham Park\nSurrey"))?;
//!
//! let primitives = sheet.print(&ColourTable::default(), "/tmp/labels.ps")?;
//! assert_eq!(primitives, 3);
//!
//! # Ok::<(), labelsheet::LabelError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`sheet`] | Units, templates, grids and slot occupancy |
//! | [`scene`] | Draw instructions and the colour table |
//! | [`ir`] | Intermediate representation and optimiser |
//! | [`postscript`] | PostScript fragment builders |
//! | [`emit`] | Scene → document file |
//! | [`book`] | Multi-page address book output |
//! | [`config`] | JSON configuration |
//! | [`error`] | Error types |
//!
//! ## Coordinates
//!
//! Everything is in PostScript points with the origin at the lower-left
//! corner of the page. Templates are specified in millimetres and converted
//! once, when they are built.

pub mod book;
pub mod config;
pub mod emit;
pub mod error;
pub mod ir;
pub mod logging;
pub mod postscript;
pub mod scene;
pub mod sheet;

// Re-exports for convenience
pub use config::Config;
pub use error::LabelError;
pub use sheet::TemplateRegistry;
