//! # Intermediate Representation (IR)
//!
//! This module provides the IR layer for page emission. The IR is a
//! "bytecode" representation that sits between a [`Scene`](crate::scene::Scene)
//! and the PostScript document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌───────────┐     ┌────────────┐
//! │    Scene    │ ──► │     IR      │ ──► │ Optimizer │ ──► │  Codegen   │
//! │  (items)    │     │  (Vec<Op>)  │     │           │     │(PostScript)│
//! └─────────────┘     └─────────────┘     └───────────┘     └────────────┘
//! ```
//!
//! Lowering resolves colours through the colour table and splits text
//! blocks into lines, so the IR is already in device terms.
//!
//! ## Example
//!
//! ```
//! use labelsheet::ir::{Op, Program};
//! use labelsheet::postscript::text::Justify;
//! use labelsheet::scene::Rgb;
//!
//! let mut program = Program::new();
//! program.push(Op::SetColour(Rgb::new(0.0, 0.0, 0.0)));
//! program.push(Op::SetFont { family: "Helvetica".into(), size: 11.0 });
//! program.push(Op::Show {
//!     x: 72.0,
//!     y: 720.0,
//!     text: "HELLO".into(),
//!     justify: Justify::Left,
//!     tag: None,
//! });
//!
//! let bytes = program.optimize().to_bytes();
//! assert!(bytes.ends_with(b"%%EOF\n"));
//! ```

mod codegen;
mod lower;
mod ops;
mod optimize;

// Re-export the ops types (codegen, lower and optimize add methods to Program via impl)
pub use ops::*;
