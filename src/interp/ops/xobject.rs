//! XObject operators.
//!
//! Handles: Do
//!
//! Form XObjects execute their content as a nested stream on the same
//! engine, against their private resource scope when they carry one. The
//! invoking stream's graphics state and text matrices are restored
//! afterwards, on success and on failure, so nested streams inherit state
//! without leaking changes back out.

use super::name_operand;
use crate::error::Result;
use crate::interp::engine::StreamEngine;
use crate::interp::position::TextPositionSink;
use crate::interp::resources::XObject;
use crate::model::PdfObject;
use crate::parser::TokenBuffer;
use log::{debug, warn};

/// Do - invoke a named XObject.
pub(crate) fn invoke<S: TextPositionSink>(
    engine: &mut StreamEngine<'_, S>,
    mnemonic: &str,
    operands: &[PdfObject],
) -> Result<()> {
    let Some(name) = name_operand(mnemonic, operands, 0) else {
        return Ok(());
    };
    let Some(xobject) = engine.xobject(name) else {
        warn!("cannot find XObject: {name}");
        return Ok(());
    };
    match xobject.as_ref() {
        XObject::Image => {
            debug!("skipping image XObject: {name}");
            Ok(())
        }
        XObject::Form(form) => {
            engine.save_graphics_state();
            let saved_text_matrix = engine.text_matrix();
            let saved_text_line_matrix = engine.text_line_matrix();
            if let Some(matrix) = form.matrix {
                let ctm = engine.graphics_state().ctm;
                engine.graphics_state_mut().ctm = matrix.multiply(&ctm);
            }
            let mut content = TokenBuffer::new(form.content.clone());
            let result = engine.process_sub_stream(form.resources.clone(), &mut content);
            engine.set_text_matrix(saved_text_matrix);
            engine.set_text_line_matrix(saved_text_line_matrix);
            engine.restore_graphics_state();
            result
        }
    }
}
