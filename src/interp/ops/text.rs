//! Text operators.
//!
//! Handles: BT, ET, Tc, Tw, Tz, TL, Tf, Tr, Ts, Td, TD, Tm, T*, Tj, TJ, ', "
//!
//! The text matrix and text line matrix exist only between BT and ET;
//! positioning and showing operators outside a text object are skipped
//! with a warning rather than failing the stream.

use super::{int_operand, name_operand, num_operand, string_operand};
use crate::error::{PdfError, Result};
use crate::interp::engine::StreamEngine;
use crate::interp::position::TextPositionSink;
use crate::model::{PdfObject, RenderingMode};
use crate::utils::Matrix;
use log::warn;

/// BT - begin a text object; both text matrices become the identity.
pub(crate) fn begin_text<S: TextPositionSink>(engine: &mut StreamEngine<'_, S>) -> Result<()> {
    engine.set_text_matrix(Some(Matrix::identity()));
    engine.set_text_line_matrix(Some(Matrix::identity()));
    Ok(())
}

/// ET - end a text object; both text matrices become undefined.
pub(crate) fn end_text<S: TextPositionSink>(engine: &mut StreamEngine<'_, S>) -> Result<()> {
    engine.set_text_matrix(None);
    engine.set_text_line_matrix(None);
    Ok(())
}

/// Tc - set character spacing.
pub(crate) fn set_character_spacing<S: TextPositionSink>(
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    if let Some(spacing) = num_operand(mnemonic, operands, 0) {
        engine.graphics_state_mut().text_state.character_spacing = spacing;
    }
    Ok(())
}

/// Tw - set word spacing.
pub(crate) fn set_word_spacing<S: TextPositionSink>(
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    if let Some(spacing) = num_operand(mnemonic, operands, 0) {
        engine.graphics_state_mut().text_state.word_spacing = spacing;
    }
    Ok(())
}

/// Tz - set horizontal scaling, as a percentage.
pub(crate) fn set_horizontal_scaling<S: TextPositionSink>(
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    if let Some(scale) = num_operand(mnemonic, operands, 0) {
        engine.graphics_state_mut().text_state.horizontal_scaling = scale;
    }
    Ok(())
}

/// TL - set text leading.
pub(crate) fn set_leading<S: TextPositionSink>(
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    if let Some(leading) = num_operand(mnemonic, operands, 0) {
        engine.graphics_state_mut().text_state.leading = leading;
    }
    Ok(())
}

/// Tf - set font and size.
///
/// A font name that is absent from the current resource scope is an
/// execution error and propagates, unwinding any nested streams.
pub(crate) fn set_font<S: TextPositionSink>(
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    let (Some(name), Some(size)) = (
        name_operand(mnemonic, operands, 0),
        num_operand(mnemonic, operands, 1),
    ) else {
        return Ok(());
    };
    let font = engine
        .font(name)
        .ok_or_else(|| PdfError::FontError(format!("could not find font {name} in resources")))?;
    let text_state = &mut engine.graphics_state_mut().text_state;
    text_state.font = Some(font);
    text_state.font_size = size;
    Ok(())
}

/// Tr - set text rendering mode.
pub(crate) fn set_rendering_mode<S: TextPositionSink>(
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    if let Some(mode) = int_operand(mnemonic, operands, 0) {
        engine.graphics_state_mut().text_state.rendering_mode = RenderingMode::from_i64(mode);
    }
    Ok(())
}

/// Ts - set text rise.
pub(crate) fn set_rise<S: TextPositionSink>(
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    if let Some(rise) = num_operand(mnemonic, operands, 0) {
        engine.graphics_state_mut().text_state.rise = rise;
    }
    Ok(())
}

/// Td - move to the start of the next line, offset by (tx, ty).
pub(crate) fn move_text<S: TextPositionSink>(
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    let (Some(tx), Some(ty)) = (
        num_operand(mnemonic, operands, 0),
        num_operand(mnemonic, operands, 1),
    ) else {
        return Ok(());
    };
    let Some(line_matrix) = engine.text_line_matrix() else {
        warn!("{mnemonic} outside BT/ET; ignored");
        return Ok(());
    };
    let moved = Matrix::translation(tx, ty).multiply(&line_matrix);
    engine.set_text_line_matrix(Some(moved));
    engine.set_text_matrix(Some(moved));
    Ok(())
}

/// TD - like Td, but first sets the leading to -ty.
pub(crate) fn move_text_set_leading<S: TextPositionSink>(
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    if let Some(ty) = num_operand(mnemonic, operands, 1) {
        engine.graphics_state_mut().text_state.leading = -ty;
    }
    move_text(engine, mnemonic, operands)
}

/// Tm - set the text matrix and text line matrix directly.
pub(crate) fn set_matrix<S: TextPositionSink>(
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
    let matrix = Matrix::new(a, b, c, d, e, f);
    engine.set_text_matrix(Some(matrix));
    engine.set_text_line_matrix(Some(matrix));
    Ok(())
}

/// T* - move to the start of the next line using the current leading.
pub(crate) fn next_line<S: TextPositionSink>(engine: &mut StreamEngine<'_, S>) -> Result<()> {
    let Some(line_matrix) = engine.text_line_matrix() else {
        warn!("T* outside BT/ET; ignored");
        return Ok(());
    };
    let leading = engine.graphics_state().text_state.leading;
    let moved = Matrix::translation(0.0, -leading).multiply(&line_matrix);
    engine.set_text_line_matrix(Some(moved));
    engine.set_text_matrix(Some(moved));
    Ok(())
}

/// Tj - show a text string.
pub(crate) fn show_text<S: TextPositionSink>(
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    let Some(string) = string_operand(mnemonic, operands, 0) else {
        return Ok(());
    };
    engine.show_encoded_text(string)
}

/// TJ - show text with per-element position adjustments.
///
/// Numbers in the array are offsets in thousandths of a text unit,
/// subtracted from the current position.
pub(crate) fn show_adjusted_text<S: TextPositionSink>(
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    let Some(PdfObject::Array(elements)) = operands.first() else {
        warn!("{mnemonic} without array operand; ignored");
        return Ok(());
    };
    for element in elements {
        match element {
            PdfObject::Int(_) | PdfObject::Real(_) => {
                let Ok(adjustment) = element.as_num() else {
                    continue;
                };
                let Some(text_matrix) = engine.text_matrix() else {
                    warn!("{mnemonic} outside BT/ET; ignored");
                    return Ok(());
                };
                let text_state = &engine.graphics_state().text_state;
                let tx = -adjustment / 1000.0
                    * text_state.font_size
                    * (text_state.horizontal_scaling / 100.0);
                engine.set_text_matrix(Some(Matrix::translation(tx, 0.0).multiply(&text_matrix)));
            }
            PdfObject::String(bytes) => {
                engine.show_encoded_text(bytes)?;
            }
            _ => {}
        }
    }
    Ok(())
}

/// ' - move to the next line and show a text string.
pub(crate) fn move_and_show_text<S: TextPositionSink>(
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    next_line(engine)?;
    show_text(engine, mnemonic, operands)
}

/// " - set word and character spacing, move to the next line, show text.
pub(crate) fn set_spacing_move_and_show_text<S: TextPositionSink>(
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    let (Some(word_spacing), Some(character_spacing)) = (
        num_operand(mnemonic, operands, 0),
        num_operand(mnemonic, operands, 1),
    ) else {
        return Ok(());
    };
    {
        let text_state = &mut engine.graphics_state_mut().text_state;
        text_state.word_spacing = word_spacing;
        text_state.character_spacing = character_spacing;
    }
    next_line(engine)?;
    let Some(string) = string_operand(mnemonic, operands, 2) else {
        return Ok(());
    };
    engine.show_encoded_text(string)
}
