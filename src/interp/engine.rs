//! The content-stream interpretation engine.
//!
//! `StreamEngine` owns the graphics-state stack, the resource-scope stack,
//! and the two text matrices, and drives the interpretation loop: operands
//! accumulate until an operator token arrives, the operator dispatches
//! through the registry, handlers mutate state or show text. Showing text
//! funnels through `show_encoded_text`, which converts glyph-unit metrics
//! through text space into display space and emits one `TextPosition` per
//! code to the sink.
//!
//! The engine is single-threaded. Re-entrant calls to `process_sub_stream`
//! on the same instance are part of the design: Form XObjects and Type 3
//! character procedures execute their streams while the parent stream is
//! still on the call stack, against the same state and stacks.

use crate::error::Result;
use crate::font::{Font, GLYPH_UNITS};
use crate::interp::ops;
use crate::interp::position::{TextPosition, TextPositionSink};
use crate::interp::registry::{OperatorConfig, OperatorHandler, OperatorProcessor, OperatorRegistry};
use crate::interp::resources::{ExtGState, ResourceScope, XObject};
use crate::model::{GraphicsState, PdfObject};
use crate::parser::{Token, TokenSource};
use crate::utils::{rect_height, rect_width, Matrix, Rect};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// Content-stream interpreter emitting text positions to a sink.
pub struct StreamEngine<'a, S: TextPositionSink> {
    registry: OperatorRegistry<S>,
    /// Current graphics state; saved copies live on the stack
    graphics_state: GraphicsState,
    graphics_stack: Vec<GraphicsState>,
    /// Text matrix; Some only between BT and ET
    text_matrix: Option<Matrix>,
    /// Text line matrix; Some only between BT and ET
    text_line_matrix: Option<Matrix>,
    /// Resource scopes of the nested (sub-)streams, innermost last
    resources_stack: Vec<ResourceScope>,
    page_rotation: i32,
    drawing_rect: Rect,
    /// Ask downstream parsers to recover from malformed input
    force_parsing: bool,
    sink: &'a mut S,
}

impl<'a, S: TextPositionSink> StreamEngine<'a, S> {
    /// Create an engine with the default text-extraction operator table.
    pub fn new(sink: &'a mut S) -> Self {
        let registry = OperatorConfig::text_extraction()
            .build_registry()
            .expect("default operator table must resolve");
        Self::with_registry(registry, sink)
    }

    /// Create an engine from an operator configuration.
    ///
    /// Fails when a handler identifier does not resolve.
    pub fn with_config(config: &OperatorConfig, sink: &'a mut S) -> Result<Self> {
        Ok(Self::with_registry(config.build_registry()?, sink))
    }

    fn with_registry(registry: OperatorRegistry<S>, sink: &'a mut S) -> Self {
        Self {
            registry,
            graphics_state: GraphicsState::new((0.0, 0.0, 0.0, 0.0)),
            graphics_stack: Vec::new(),
            text_matrix: None,
            text_line_matrix: None,
            resources_stack: Vec::new(),
            page_rotation: 0,
            drawing_rect: (0.0, 0.0, 0.0, 0.0),
            force_parsing: false,
            sink,
        }
    }

    /// Bind a custom processor to an operator mnemonic.
    pub fn register_operator_processor(
        &mut self,
        mnemonic: &str,
        processor: Rc<dyn OperatorProcessor<S>>,
    ) {
        self.registry
            .register(mnemonic, OperatorHandler::Custom(processor));
    }

    /// Whether downstream parsers are asked to recover from malformed input.
    pub const fn force_parsing(&self) -> bool {
        self.force_parsing
    }

    /// Enable or disable force parsing.
    pub const fn set_force_parsing(&mut self, value: bool) {
        self.force_parsing = value;
    }

    /// Inter-document flush: forgets which unsupported operators have been
    /// reported so the next document logs them afresh.
    pub fn reset_engine(&mut self) {
        self.registry.reset_unsupported();
    }

    /// Drop all stacks and handler registrations. Afterwards every operator
    /// is unsupported and every resource query is empty; the engine is not
    /// meant to be used again.
    pub fn dispose(&mut self) {
        self.graphics_stack.clear();
        self.resources_stack.clear();
        self.text_matrix = None;
        self.text_line_matrix = None;
        self.registry.clear();
    }

    // ========================================================================
    // Stream processing
    // ========================================================================

    /// Reset per-page state: fresh graphics state scoped to the page,
    /// cleared stacks, no open text object.
    fn init_stream(&mut self, page_size: Rect, rotation: i32) {
        self.drawing_rect = page_size;
        self.page_rotation = rotation;
        self.graphics_state = GraphicsState::new(page_size);
        self.text_matrix = None;
        self.text_line_matrix = None;
        self.graphics_stack.clear();
        self.resources_stack.clear();
    }

    /// Initialise and process a page's content stream.
    pub fn process_stream(
        &mut self,
        resources: Option<ResourceScope>,
        stream: &mut dyn TokenSource,
        page_size: Rect,
        rotation: i32,
    ) -> Result<()> {
        self.init_stream(page_size, rotation);
        self.process_sub_stream(resources, stream)
    }

    /// Process a nested stream against its own resource scope.
    ///
    /// The scope is pushed for the duration of the stream and popped on
    /// every exit path, so the stack depth on return (or failure) always
    /// equals the depth at entry.
    pub fn process_sub_stream(
        &mut self,
        resources: Option<ResourceScope>,
        stream: &mut dyn TokenSource,
    ) -> Result<()> {
        match resources {
            Some(scope) => {
                self.resources_stack.push(scope);
                let result = self.run_stream(stream);
                self.resources_stack.pop();
                result
            }
            None => self.run_stream(stream),
        }
    }

    /// The interpretation loop: accumulate operands, dispatch operators.
    fn run_stream(&mut self, stream: &mut dyn TokenSource) -> Result<()> {
        let mut operands: Vec<PdfObject> = Vec::new();
        let result = loop {
            match stream.next_token() {
                Ok(Some(Token::Operand(obj))) => operands.push(obj.resolve()),
                Ok(Some(Token::Operator(mnemonic))) => {
                    if let Err(e) = self.execute_operator(&mnemonic, &operands) {
                        break Err(e);
                    }
                    operands.clear();
                }
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        stream.close();
        result
    }

    /// Dispatch one operator; handler failures propagate.
    pub(crate) fn execute_operator(
        &mut self,
        mnemonic: &str,
        operands: &[PdfObject],
    ) -> Result<()> {
        let Some(handler) = self.registry.get(mnemonic) else {
            if self.registry.note_unsupported(mnemonic) {
                info!("unsupported/disabled operation: {mnemonic}");
            }
            return Ok(());
        };
        match handler {
            OperatorHandler::Builtin(op) => ops::process_builtin(op, self, mnemonic, operands),
            OperatorHandler::Custom(processor) => processor.process(self, mnemonic, operands),
        }
    }

    /// Dispatch one operator from outside a stream; failures are logged
    /// instead of propagated.
    pub fn process_operator(&mut self, mnemonic: &str, operands: &[PdfObject]) {
        if let Err(e) = self.execute_operator(mnemonic, operands) {
            warn!("operator {mnemonic} failed: {e}");
        }
    }

    // ========================================================================
    // Text showing
    // ========================================================================

    /// Show an encoded glyph run in the current font.
    ///
    /// Walks the byte string code by code (retrying failed decodes as
    /// two-byte codes), converts glyph-unit metrics through text space to
    /// display space, advances the text matrix, and emits one
    /// `TextPosition` per code.
    ///
    /// Three unit systems meet here: character metrics arrive in glyph
    /// units, positions are computed in text units, and the emitted record
    /// is in display units. Variables carry a `_text` or `_disp` suffix
    /// accordingly.
    pub fn show_encoded_text(&mut self, string: &[u8]) -> Result<()> {
        let Some(mut text_matrix) = self.text_matrix else {
            warn!("text-showing operator outside BT/ET; ignored");
            return Ok(());
        };
        let text_state = &self.graphics_state.text_state;
        let Some(font) = text_state.font.clone() else {
            warn!("text-showing operator before Tf; ignored");
            return Ok(());
        };

        let font_size_text = text_state.font_size;
        let horizontal_scaling_text = text_state.horizontal_scaling / 100.0;
        let rise_text = text_state.rise;
        let word_spacing_text = text_state.word_spacing;
        let character_spacing_text = text_state.character_spacing;

        // Character metrics come back in thousandths of a text unit, except
        // for Type 3 fonts, which carry their own font matrix.
        let mut font_matrix_x_scaling = 1.0 / GLYPH_UNITS;
        let mut font_matrix_y_scaling = 1.0 / GLYPH_UNITS;
        let mut glyph_to_text_factor = 1.0 / GLYPH_UNITS;
        if font.is_type3() {
            let font_matrix = font.font_matrix();
            font_matrix_x_scaling = font_matrix.value(0, 0);
            font_matrix_y_scaling = font_matrix.value(1, 1);
            glyph_to_text_factor = 1.0 / font_matrix.value(0, 0);
        }

        let mut space_width_text = match font.space_width() {
            Ok(w) => w * glyph_to_text_factor,
            Err(e) => {
                warn!("space width unavailable: {e}");
                0.0
            }
        };
        if space_width_text == 0.0 {
            // the average width tends to run high, so shrink it
            space_width_text = font.average_font_width() * glyph_to_text_factor * 0.80;
        }
        if space_width_text == 0.0 {
            space_width_text = 1.0;
        }

        let mut max_vertical_displacement_text: f64 = 0.0;

        let mut text_state_parameters = Matrix::identity();
        text_state_parameters.set_value(0, 0, font_size_text * horizontal_scaling_text);
        text_state_parameters.set_value(1, 1, font_size_text);
        text_state_parameters.set_value(2, 1, rise_text);

        let page_rotation = self.page_rotation;
        let page_width = rect_width(self.drawing_rect);
        let page_height = rect_height(self.drawing_rect);
        let ctm = self.graphics_state.ctm;

        let mut i = 0;
        while i < string.len() {
            let mut code_length = 1;
            let mut decoded = font.encode(string, i, code_length);
            if decoded.is_none() && i + 1 < string.len() {
                // maybe a multibyte encoding
                code_length += 1;
                decoded = font.encode(string, i, code_length);
            }
            let code_points = vec![font.code_from_array(string, i, code_length)];

            let space_width_disp = space_width_text
                * font_size_text
                * horizontal_scaling_text
                * text_matrix.x_scale()
                * ctm.x_scale();

            // TODO: vertical writing mode would advance ty by the height
            // instead; fonts carry the writing direction.
            let char_horizontal_displacement_text =
                font.font_width(string, i, code_length) * font_matrix_x_scaling;
            let char_vertical_displacement_text =
                font.font_height(string, i, code_length) * font_matrix_y_scaling;
            max_vertical_displacement_text =
                max_vertical_displacement_text.max(char_vertical_displacement_text);

            // Word spacing applies only to single-byte code 0x20; byte
            // value 0x20 inside a multi-byte code never receives it.
            let mut spacing_text = 0.0;
            if string[i] == 0x20 && code_length == 1 {
                spacing_text += word_spacing_text;
            }

            let text_x_ctm = text_matrix.multiply(&ctm);
            // Fresh instance: it is handed to the TextPosition below.
            let text_matrix_start = text_state_parameters.multiply(&text_x_ctm);

            // End of glyph without Tc/Tw, so consumers can measure the raw
            // inter-glyph gap for word-break detection.
            let tx = char_horizontal_displacement_text * font_size_text * horizontal_scaling_text;
            let td = Matrix::translation(tx, 0.0);
            let text_matrix_end = text_state_parameters.multiply(&td).multiply(&text_x_ctm);
            let end_x_position = text_matrix_end.x_position();
            let end_y_position = text_matrix_end.y_position();

            // The actual advance does include the spacing terms.
            let tx = (char_horizontal_displacement_text * font_size_text
                + character_spacing_text
                + spacing_text)
                * horizontal_scaling_text;
            text_matrix = Matrix::translation(tx, 0.0).multiply(&text_matrix);
            self.text_matrix = Some(text_matrix);

            let width_text = end_x_position - text_matrix_start.x_position();

            // A failed decode still emits, as "?", so downstream text never
            // contains a literal null.
            let text = decoded.unwrap_or_else(|| "?".to_string());

            let total_vertical_displacement_disp =
                max_vertical_displacement_text * font_size_text * text_x_ctm.y_scale();

            self.sink.on_text_position(TextPosition {
                page_rotation,
                page_width,
                page_height,
                text_matrix: text_matrix_start,
                end_x: end_x_position,
                end_y: end_y_position,
                height: total_vertical_displacement_disp,
                width: width_text,
                space_width: space_width_disp,
                text,
                code_points,
                font: Arc::clone(&font),
                font_size: font_size_text,
                font_size_px: (font_size_text * text_matrix.x_scale()) as i32,
            });

            i += code_length;
        }
        Ok(())
    }

    // ========================================================================
    // Graphics-state stack
    // ========================================================================

    /// Push a deep copy of the current graphics state.
    pub fn save_graphics_state(&mut self) {
        self.graphics_stack.push(self.graphics_state.clone());
    }

    /// Pop the stack into the current graphics state.
    ///
    /// Underflow is reported and leaves the state unchanged.
    pub fn restore_graphics_state(&mut self) {
        match self.graphics_stack.pop() {
            Some(state) => self.graphics_state = state,
            None => warn!("graphics state restore with empty stack; ignored"),
        }
    }

    /// Depth of the graphics-state stack.
    pub fn graphics_stack_size(&self) -> usize {
        self.graphics_stack.len()
    }

    /// The current graphics state.
    pub const fn graphics_state(&self) -> &GraphicsState {
        &self.graphics_state
    }

    /// The current graphics state, mutable.
    pub const fn graphics_state_mut(&mut self) -> &mut GraphicsState {
        &mut self.graphics_state
    }

    /// Replace the current graphics state.
    pub fn set_graphics_state(&mut self, state: GraphicsState) {
        self.graphics_state = state;
    }

    // ========================================================================
    // Text matrices
    // ========================================================================

    /// The text matrix; Some only inside a text object.
    pub const fn text_matrix(&self) -> Option<Matrix> {
        self.text_matrix
    }

    /// Set the text matrix.
    pub const fn set_text_matrix(&mut self, value: Option<Matrix>) {
        self.text_matrix = value;
    }

    /// The text line matrix; Some only inside a text object.
    pub const fn text_line_matrix(&self) -> Option<Matrix> {
        self.text_line_matrix
    }

    /// Set the text line matrix.
    pub const fn set_text_line_matrix(&mut self, value: Option<Matrix>) {
        self.text_line_matrix = value;
    }

    /// Page rotation in degrees.
    pub const fn page_rotation(&self) -> i32 {
        self.page_rotation
    }

    /// Page size in user space.
    pub const fn drawing_rect(&self) -> Rect {
        self.drawing_rect
    }

    // ========================================================================
    // Resource scopes
    // ========================================================================

    /// The innermost resource scope, if any stream is executing.
    pub fn get_resources(&self) -> Option<&ResourceScope> {
        self.resources_stack.last()
    }

    /// Look up a font in the innermost scope.
    pub fn font(&self, name: &str) -> Option<Arc<dyn Font>> {
        self.resources_stack.last().and_then(|s| s.font(name))
    }

    /// Look up an XObject in the innermost scope.
    pub fn xobject(&self, name: &str) -> Option<Arc<XObject>> {
        self.resources_stack.last().and_then(|s| s.xobject(name))
    }

    /// Look up an extended graphics state in the innermost scope.
    pub fn ext_graphics_state(&self, name: &str) -> Option<Arc<ExtGState>> {
        self.resources_stack
            .last()
            .and_then(|s| s.graphics_state(name))
    }

    /// The font map of the innermost scope; empty when no stream executes.
    pub fn get_fonts(&self) -> HashMap<String, Arc<dyn Font>> {
        self.resources_stack
            .last()
            .map(|s| s.fonts().clone())
            .unwrap_or_default()
    }

    /// Replace the font map of the innermost scope.
    pub fn set_fonts(&mut self, fonts: HashMap<String, Arc<dyn Font>>) {
        match self.resources_stack.last_mut() {
            Some(scope) => scope.set_fonts(fonts),
            None => debug!("set_fonts with no resource scope; ignored"),
        }
    }

    /// The XObject map of the innermost scope; empty when no stream executes.
    pub fn get_xobjects(&self) -> HashMap<String, Arc<XObject>> {
        self.resources_stack
            .last()
            .map(|s| s.xobjects().clone())
            .unwrap_or_default()
    }

    /// The extended-graphics-state map of the innermost scope.
    pub fn get_graphics_states(&self) -> HashMap<String, Arc<ExtGState>> {
        self.resources_stack
            .last()
            .map(|s| s.graphics_states().clone())
            .unwrap_or_default()
    }

    /// Replace the extended-graphics-state map of the innermost scope.
    pub fn set_graphics_states(&mut self, states: HashMap<String, Arc<ExtGState>>) {
        match self.resources_stack.last_mut() {
            Some(scope) => scope.set_graphics_states(states),
            None => debug!("set_graphics_states with no resource scope; ignored"),
        }
    }

    /// Depth of the resource-scope stack.
    pub fn resources_stack_size(&self) -> usize {
        self.resources_stack.len()
    }
}
