//! Graphics-state operators.
//!
//! Handles: q, Q, cm, gs

use super::{name_operand, num_operand};
use crate::error::Result;
use crate::interp::engine::StreamEngine;
use crate::interp::position::TextPositionSink;
use crate::model::{DashPattern, PdfObject};
use crate::utils::Matrix;
use log::warn;

/// q - save the current graphics state.
pub(crate) fn save<S: TextPositionSink>(engine: &mut StreamEngine<'_, S>) -> Result<()> {
    engine.save_graphics_state();
    Ok(())
}

/// Q - restore the most recently saved graphics state.
pub(crate) fn restore<S: TextPositionSink>(engine: &mut StreamEngine<'_, S>) -> Result<()> {
    engine.restore_graphics_state();
    Ok(())
}

/// cm - concatenate a matrix into the CTM.
pub(crate) fn concatenate<S: TextPositionSink>(
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    let (Some(a), Some(b), Some(c), Some(d), Some(e), Some(f)) = (
        num_operand(mnemonic, operands, 0),
        num_operand(mnemonic, operands, 1),
        num_operand(mnemonic, operands, 2),
        num_operand(mnemonic, operands, 3),
        num_operand(mnemonic, operands, 4),
        num_operand(mnemonic, operands, 5),
    ) else {
        return Ok(());
    };
    let ctm = engine.graphics_state().ctm;
    engine.graphics_state_mut().ctm = Matrix::new(a, b, c, d, e, f).multiply(&ctm);
    Ok(())
}

/// gs - apply a named extended graphics state.
pub(crate) fn set_parameters<S: TextPositionSink>(
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    let Some(name) = name_operand(mnemonic, operands, 0) else {
        return Ok(());
    };
    let Some(ext) = engine.ext_graphics_state(name) else {
        warn!("unknown extended graphics state: {name}");
        return Ok(());
    };

    let gs = engine.graphics_state_mut();
    if let Some(width) = ext.line_width {
        gs.line_width = width;
    }
    if let Some(cap) = ext.line_cap {
        gs.line_cap = cap;
    }
    if let Some(join) = ext.line_join {
        gs.line_join = join;
    }
    if let Some(limit) = ext.miter_limit {
        gs.miter_limit = limit;
    }
    if let Some((array, phase)) = &ext.dash {
        gs.dash = DashPattern {
            array: array.clone(),
            phase: *phase,
        };
    }
    if let Some(knockout) = ext.knockout {
        gs.text_state.knockout = knockout;
    }
    if let Some((font, size)) = &ext.font {
        gs.text_state.font = Some(font.clone());
        gs.text_state.font_size = *size;
    }
    Ok(())
}
