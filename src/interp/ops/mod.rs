//! Built-in operator implementations.
//!
//! Operators are grouped by category:
//! - `graphics_state` - state stack, CTM, ExtGState (q, Q, cm, gs)
//! - `text` - text objects, state, positioning, showing (BT, ET, Tc, Tw,
//!   Tz, TL, Tf, Tr, Ts, Td, TD, Tm, T\*, Tj, TJ, ', ")
//! - `xobject` - nested streams (Do)
//!
//! Handlers are lenient about operands: a missing or mistyped operand
//! skips the operator with a debug log instead of failing the stream.

mod graphics_state;
mod text;
mod xobject;

use crate::error::Result;
use crate::interp::engine::StreamEngine;
use crate::interp::position::TextPositionSink;
use crate::interp::registry::BuiltinOp;
use crate::model::PdfObject;
use log::debug;

/// Dispatch a built-in operator to its implementation.
pub(crate) fn process_builtin<S: TextPositionSink>(
    op: BuiltinOp,
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    match op {
        BuiltinOp::SaveGraphicsState => graphics_state::save(engine),
        BuiltinOp::RestoreGraphicsState => graphics_state::restore(engine),
        BuiltinOp::Concatenate => graphics_state::concatenate(engine, mnemonic, operands),
        BuiltinOp::SetGraphicsStateParameters => {
            graphics_state::set_parameters(engine, mnemonic, operands)
        }
        BuiltinOp::BeginText => text::begin_text(engine),
        BuiltinOp::EndText => text::end_text(engine),
        BuiltinOp::SetCharacterSpacing => text::set_character_spacing(engine, mnemonic, operands),
        BuiltinOp::SetWordSpacing => text::set_word_spacing(engine, mnemonic, operands),
        BuiltinOp::SetHorizontalScaling => {
            text::set_horizontal_scaling(engine, mnemonic, operands)
        }
        BuiltinOp::SetTextLeading => text::set_leading(engine, mnemonic, operands),
        BuiltinOp::SetTextFont => text::set_font(engine, mnemonic, operands),
        BuiltinOp::SetTextRenderingMode => text::set_rendering_mode(engine, mnemonic, operands),
        BuiltinOp::SetTextRise => text::set_rise(engine, mnemonic, operands),
        BuiltinOp::MoveText => text::move_text(engine, mnemonic, operands),
        BuiltinOp::MoveTextSetLeading => text::move_text_set_leading(engine, mnemonic, operands),
        BuiltinOp::SetTextMatrix => text::set_matrix(engine, mnemonic, operands),
        BuiltinOp::NextLine => text::next_line(engine),
        BuiltinOp::ShowText => text::show_text(engine, mnemonic, operands),
        BuiltinOp::ShowAdjustedText => text::show_adjusted_text(engine, mnemonic, operands),
        BuiltinOp::MoveAndShowText => text::move_and_show_text(engine, mnemonic, operands),
        BuiltinOp::SetSpacingMoveAndShowText => {
            text::set_spacing_move_and_show_text(engine, mnemonic, operands)
        }
        BuiltinOp::Invoke => xobject::invoke(engine, mnemonic, operands),
    }
}

/// Numeric operand at `index`.
pub(crate) fn num_operand(mnemonic: &str, operands: &[PdfObject], index: usize) -> Option<f64> {
    match operands.get(index).map(PdfObject::as_num) {
        Some(Ok(n)) => Some(n),
        _ => {
            debug!("{mnemonic}: missing numeric operand {index}; skipped");
            None
        }
    }
}

/// Integer operand at `index`; reals are truncated.
pub(crate) fn int_operand(mnemonic: &str, operands: &[PdfObject], index: usize) -> Option<i64> {
    match operands.get(index) {
        Some(PdfObject::Int(n)) => Some(*n),
        Some(PdfObject::Real(n)) => Some(*n as i64),
        _ => {
            debug!("{mnemonic}: missing integer operand {index}; skipped");
            None
        }
    }
}

/// Name operand at `index`.
pub(crate) fn name_operand<'o>(
    mnemonic: &str,
    operands: &'o [PdfObject],
    index: usize,
) -> Option<&'o str> {
    match operands.get(index).map(PdfObject::as_name) {
        Some(Ok(s)) => Some(s),
        _ => {
            debug!("{mnemonic}: missing name operand {index}; skipped");
            None
        }
    }
}

/// String operand at `index`.
pub(crate) fn string_operand<'o>(
    mnemonic: &str,
    operands: &'o [PdfObject],
    index: usize,
) -> Option<&'o [u8]> {
    match operands.get(index).map(PdfObject::as_string) {
        Some(Ok(s)) => Some(s),
        _ => {
            debug!("{mnemonic}: missing string operand {index}; skipped");
            None
        }
    }
}
