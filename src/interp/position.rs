//! Text positions and the sink that receives them.
//!
//! For every glyph shown, the engine emits one `TextPosition` carrying the
//! decoded text together with its fully resolved display-space geometry.
//! Consumers implement `TextPositionSink`; the default implementation
//! drops everything so extractors only override what they need.

use crate::font::Font;
use crate::utils::Matrix;
use std::sync::Arc;

/// One glyph (or multi-byte code) as placed on the page.
#[derive(Clone)]
pub struct TextPosition {
    /// Page rotation in degrees
    pub page_rotation: i32,
    /// Page width in user units
    pub page_width: f64,
    /// Page height in user units
    pub page_height: f64,
    /// Start-of-glyph matrix in display space
    pub text_matrix: Matrix,
    /// End-of-glyph x in display space, excluding Tc/Tw contributions
    pub end_x: f64,
    /// End-of-glyph y in display space, excluding Tc/Tw contributions
    pub end_y: f64,
    /// Maximum vertical displacement of the run so far, in display units
    pub height: f64,
    /// Advance width of this code, in text units
    pub width: f64,
    /// Width of a space in this font, in display units
    pub space_width: f64,
    /// Decoded Unicode text ("?" when the font could not decode the code)
    pub text: String,
    /// Raw character codes backing `text`
    pub code_points: Vec<u32>,
    /// The font the code was shown in
    pub font: Arc<dyn Font>,
    /// Font size in user units
    pub font_size: f64,
    /// Font size scaled to display units, as a whole-pixel hint
    pub font_size_px: i32,
}

impl std::fmt::Debug for TextPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPosition")
            .field("text", &self.text)
            .field("code_points", &self.code_points)
            .field("x", &self.text_matrix.x_position())
            .field("y", &self.text_matrix.y_position())
            .field("end_x", &self.end_x)
            .field("end_y", &self.end_y)
            .field("width", &self.width)
            .field("font_size", &self.font_size)
            .finish()
    }
}

impl TextPosition {
    /// Start-of-glyph x in display space.
    pub const fn x(&self) -> f64 {
        self.text_matrix.x_position()
    }

    /// Start-of-glyph y in display space.
    pub const fn y(&self) -> f64 {
        self.text_matrix.y_position()
    }
}

/// Callback surface invoked for every emitted glyph.
pub trait TextPositionSink {
    /// Receive one text position. Default drops it.
    fn on_text_position(&mut self, _position: TextPosition) {}
}

/// Sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TextPositionSink for NullSink {}

/// Sink that accumulates every position in order of emission.
#[derive(Default)]
pub struct CollectingSink {
    /// Emitted positions, in glyph order
    pub positions: Vec<TextPosition>,
}

impl TextPositionSink for CollectingSink {
    fn on_text_position(&mut self, position: TextPosition) {
        self.positions.push(position);
    }
}

impl CollectingSink {
    /// Concatenation of all decoded text received so far.
    pub fn text(&self) -> String {
        self.positions.iter().map(|p| p.text.as_str()).collect()
    }
}
