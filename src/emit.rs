//! # Document Emitter
//!
//! Serialises a [`Scene`] into a one-page A4 PostScript document.
//!
//! ## Canvas Mapping
//!
//! Scenes are drawn on a canvas of any size. The canvas is mapped onto the
//! 595 × 842 point page with one uniform scale, `595 / canvas_width`,
//! anchored at the lower-left corner, so the canvas always spans the page
//! width. A canvas of exactly 595 × 842 maps 1:1; a taller canvas runs off
//! the top of the page.
//!
//! ## Failure
//!
//! Invalid scenes are rejected before anything is written. A failed write
//! surfaces as [`LabelError::Io`]; a partially written file is left for the
//! caller to deal with.
//!
//! ```no_run
//! use labelsheet::emit::emit;
//! use labelsheet::scene::{ColourTable, Scene};
//! use labelsheet::sheet::units::{PAGE_HEIGHT, PAGE_WIDTH};
//!
//! let scene = Scene::default();
//! let n = emit(&scene, &ColourTable::default(), PAGE_WIDTH, PAGE_HEIGHT, "/tmp/blank.ps")?;
//! assert_eq!(n, 0);
//! # Ok::<(), labelsheet::LabelError>(())
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::error::{LabelError, Result};
use crate::ir::Program;
use crate::postscript::commands::DocumentInfo;
use crate::scene::{ColourTable, Scene};
use crate::sheet::units::PAGE_WIDTH;

/// A rendered document held in memory.
#[derive(Debug, Clone)]
pub struct Document {
    pub bytes: Vec<u8>,
    /// Number of drawing primitives in the document
    pub primitives: usize,
}

/// Scale from canvas units to points.
pub fn canvas_scale(canvas_width: f32, canvas_height: f32) -> Result<f32> {
    for (what, v) in [("width", canvas_width), ("height", canvas_height)] {
        if !v.is_finite() || v <= 0.0 {
            return Err(LabelError::MalformedScene(format!(
                "canvas {} must be positive, got {}",
                what, v
            )));
        }
    }
    Ok(PAGE_WIDTH / canvas_width)
}

/// Render `scene` into an in-memory document.
pub fn render(
    scene: &Scene,
    colours: &ColourTable,
    canvas_width: f32,
    canvas_height: f32,
    info: &DocumentInfo,
) -> Result<Document> {
    let scale = canvas_scale(canvas_width, canvas_height)?;
    scene.validate()?;

    let program = Program::from_scene(scene, colours, scale).optimize();
    let primitives = program.primitive_count();
    debug!(ops = program.len(), primitives, scale, "lowered scene");

    Ok(Document {
        bytes: program.to_bytes_with_info(info),
        primitives,
    })
}

/// Render `scene` and write it to `writer`. Returns the primitive count.
pub fn emit_to_writer<W: Write>(
    scene: &Scene,
    colours: &ColourTable,
    canvas_width: f32,
    canvas_height: f32,
    writer: &mut W,
) -> Result<usize> {
    let document = render(scene, colours, canvas_width, canvas_height, &DocumentInfo::now())?;
    writer.write_all(&document.bytes)?;
    writer.flush()?;
    Ok(document.primitives)
}

/// Render `scene` and write it to the file at `destination`, replacing any
/// existing file. Returns the primitive count.
///
/// Callers must not emit to the same destination from two threads at once.
pub fn emit(
    scene: &Scene,
    colours: &ColourTable,
    canvas_width: f32,
    canvas_height: f32,
    destination: impl AsRef<Path>,
) -> Result<usize> {
    let destination = destination.as_ref();
    let document = render(scene, colours, canvas_width, canvas_height, &DocumentInfo::now())?;

    let mut file = BufWriter::new(File::create(destination)?);
    file.write_all(&document.bytes)?;
    file.flush()?;

    info!(
        destination = %destination.display(),
        primitives = document.primitives,
        bytes = document.bytes.len(),
        "wrote document"
    );
    Ok(document.primitives)
}
