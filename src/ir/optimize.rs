//! # IR Optimizer
//!
//! Optimization passes that transform IR programs to reduce redundancy.
//!
//! ## Optimization Passes
//!
//! 1. **Drop dangling state**: State changes with no primitive after them
//! 2. **Remove redundant state**: Don't emit SetColour(c) if c is current
//!
//! Primitives are never removed or reordered, so the primitive count of a
//! program survives optimization.

use super::ops::{DrawState, Op, Program};

impl Program {
    /// Apply all optimization passes.
    pub fn optimize(self) -> Self {
        let scale = self.scale;
        let ops = self.ops;
        let ops = drop_dangling_state(ops);
        let ops = remove_redundant_state(ops);
        Program { ops, scale }
    }
}

/// Remove state changes after the last primitive.
fn drop_dangling_state(mut ops: Vec<Op>) -> Vec<Op> {
    let keep = ops
        .iter()
        .rposition(Op::is_primitive)
        .map(|i| i + 1)
        .unwrap_or(0);
    ops.truncate(keep);
    ops
}

/// Remove state changes that don't change the current state.
///
/// Rectangles set their colours inside a saved graphics state, so they do
/// not disturb the tracked colour.
fn remove_redundant_state(ops: Vec<Op>) -> Vec<Op> {
    let mut result = Vec::with_capacity(ops.len());
    let mut state = DrawState::default();

    for op in ops {
        match &op {
            Op::SetColour(c) => {
                if state.colour != Some(*c) {
                    state.colour = Some(*c);
                    result.push(op);
                }
            }
            Op::SetLineWidth(w) => {
                if *w != state.line_width {
                    state.line_width = *w;
                    result.push(op);
                }
            }
            Op::SetFont { family, size } => {
                let font = Some((family.clone(), *size));
                if state.font != font {
                    state.font = font;
                    result.push(op);
                }
            }

            // Primitives pass through unchanged
            _ => result.push(op),
        }
    }

    result
}
