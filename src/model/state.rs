//! Graphics and text state.
//!
//! The graphics state is the record saved and restored by the q/Q operator
//! pair; it embeds the text state mutated by the Tf/Tc/Tw/Tz/TL/Ts/Tr
//! operators. Both must clone deeply: mutating a saved copy never affects
//! the state it was taken from.

use crate::font::Font;
use crate::utils::{Matrix, Rect};
use std::sync::Arc;

/// Color value types used in the graphics state.
///
/// - `Gray` for greyscale
/// - `Rgb` for (r, g, b)
/// - `Cmyk` for (c, m, y, k)
/// - `Pattern` for a named pattern
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// Greyscale color (0.0 = black, 1.0 = white)
    Gray(f64),
    /// RGB color
    Rgb(f64, f64, f64),
    /// CMYK color
    Cmyk(f64, f64, f64, f64),
    /// Named tiling/shading pattern
    Pattern(String),
}

impl Default for Color {
    fn default() -> Self {
        Self::Gray(0.0)
    }
}

/// Dash pattern: array of on/off lengths plus a phase offset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashPattern {
    pub array: Vec<f64>,
    pub phase: f64,
}

/// Text rendering mode (Tr operand, 0-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderingMode {
    #[default]
    Fill,
    Stroke,
    FillStroke,
    Invisible,
    FillClip,
    StrokeClip,
    FillStrokeClip,
    Clip,
}

impl RenderingMode {
    /// Convert the Tr operand value; out-of-range values fall back to Fill.
    pub const fn from_i64(value: i64) -> Self {
        match value {
            1 => Self::Stroke,
            2 => Self::FillStroke,
            3 => Self::Invisible,
            4 => Self::FillClip,
            5 => Self::StrokeClip,
            6 => Self::FillStrokeClip,
            7 => Self::Clip,
            _ => Self::Fill,
        }
    }
}

/// Text state - the text-related parameters of the graphics state.
#[derive(Clone)]
pub struct TextState {
    /// Current font (None until Tf runs)
    pub font: Option<Arc<dyn Font>>,
    /// Font size in user units
    pub font_size: f64,
    /// Character spacing (Tc)
    pub character_spacing: f64,
    /// Word spacing (Tw), applied to single-byte code 0x20
    pub word_spacing: f64,
    /// Horizontal scaling percentage (Tz, 100 = normal)
    pub horizontal_scaling: f64,
    /// Text leading (TL)
    pub leading: f64,
    /// Text rise (Ts, superscript/subscript offset)
    pub rise: f64,
    /// Text rendering mode (Tr)
    pub rendering_mode: RenderingMode,
    /// Text knockout flag (TK entry of an ExtGState)
    pub knockout: bool,
}

impl TextState {
    /// Create a new text state with PDF default values.
    pub fn new() -> Self {
        Self {
            font: None,
            font_size: 0.0,
            character_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scaling: 100.0,
            leading: 0.0,
            rise: 0.0,
            rendering_mode: RenderingMode::Fill,
            knockout: true,
        }
    }
}

impl Default for TextState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextState")
            .field("font", &self.font.is_some())
            .field("font_size", &self.font_size)
            .field("character_spacing", &self.character_spacing)
            .field("word_spacing", &self.word_spacing)
            .field("horizontal_scaling", &self.horizontal_scaling)
            .field("leading", &self.leading)
            .field("rise", &self.rise)
            .field("rendering_mode", &self.rendering_mode)
            .field("knockout", &self.knockout)
            .finish()
    }
}

/// Graphics state - the full record saved and restored by q/Q.
#[derive(Debug, Clone)]
pub struct GraphicsState {
    /// Current transformation matrix (user space to device space)
    pub ctm: Matrix,
    /// Embedded text state
    pub text_state: TextState,
    /// Line width for stroke operations
    pub line_width: f64,
    /// Line cap style (0, 1, or 2)
    pub line_cap: i64,
    /// Line join style (0, 1, or 2)
    pub line_join: i64,
    /// Miter limit for line joins
    pub miter_limit: f64,
    /// Dash pattern
    pub dash: DashPattern,
    /// Stroking color
    pub stroking_color: Color,
    /// Non-stroking (fill) color
    pub nonstroking_color: Color,
    /// Rendering intent name
    pub rendering_intent: Option<String>,
    /// Flatness tolerance
    pub flatness: f64,
    /// Smoothness tolerance
    pub smoothness: f64,
    /// Current clipping region, kept as its bounding rectangle
    pub clipping_path: Rect,
}

impl GraphicsState {
    /// Create a new graphics state scoped to a drawing rectangle, with the
    /// identity CTM and PDF default values.
    pub fn new(drawing_rect: Rect) -> Self {
        Self {
            ctm: Matrix::identity(),
            text_state: TextState::new(),
            line_width: 1.0,
            line_cap: 0,
            line_join: 0,
            miter_limit: 10.0,
            dash: DashPattern::default(),
            stroking_color: Color::default(),
            nonstroking_color: Color::default(),
            rendering_intent: None,
            flatness: 1.0,
            smoothness: 0.0,
            clipping_path: drawing_rect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_state_defaults() {
        let ts = TextState::new();
        assert!(ts.font.is_none());
        assert_eq!(ts.font_size, 0.0);
        assert_eq!(ts.character_spacing, 0.0);
        assert_eq!(ts.word_spacing, 0.0);
        assert_eq!(ts.horizontal_scaling, 100.0);
        assert_eq!(ts.leading, 0.0);
        assert_eq!(ts.rise, 0.0);
        assert_eq!(ts.rendering_mode, RenderingMode::Fill);
        assert!(ts.knockout);
    }

    #[test]
    fn test_graphics_state_clone_isolation() {
        let gs = GraphicsState::new((0.0, 0.0, 612.0, 792.0));
        let mut copy = gs.clone();
        copy.ctm = Matrix::scaled(2.0, 2.0);
        copy.line_width = 4.0;
        copy.dash.array.push(3.0);
        copy.text_state.font_size = 12.0;
        copy.stroking_color = Color::Rgb(1.0, 0.0, 0.0);

        assert_eq!(gs.ctm, Matrix::identity());
        assert_eq!(gs.line_width, 1.0);
        assert!(gs.dash.array.is_empty());
        assert_eq!(gs.text_state.font_size, 0.0);
        assert_eq!(gs.stroking_color, Color::Gray(0.0));
    }

    #[test]
    fn test_rendering_mode_from_i64() {
        assert_eq!(RenderingMode::from_i64(0), RenderingMode::Fill);
        assert_eq!(RenderingMode::from_i64(3), RenderingMode::Invisible);
        assert_eq!(RenderingMode::from_i64(7), RenderingMode::Clip);
        assert_eq!(RenderingMode::from_i64(42), RenderingMode::Fill);
    }
}
