//! Font capability consumed by the engine.
//!
//! Fonts are opaque here: encoding tables, width tables, and font matrices
//! live behind this trait, supplied by whoever builds the resource scopes.
//! Widths and heights are in glyph units; the engine converts them to text
//! units with the font matrix (1/1000 for everything except Type 3).

use crate::error::Result;
use crate::utils::Matrix;

/// Glyph-unit scale of the standard font matrix.
pub const GLYPH_UNITS: f64 = 1000.0;

/// Access to the per-font data the engine needs while showing text.
///
/// Implementations are read-only from the engine's point of view; they may
/// be shared between engine instances if they are themselves thread-safe.
pub trait Font {
    /// Decode the code at `bytes[offset..offset + len]` to a Unicode string.
    ///
    /// Returns None when the code has no mapping at this length; the engine
    /// then retries with a two-byte code before substituting "?".
    fn encode(&self, bytes: &[u8], offset: usize, len: usize) -> Option<String>;

    /// Numeric character code at `bytes[offset..offset + len]`.
    fn code_from_array(&self, bytes: &[u8], offset: usize, len: usize) -> u32;

    /// Advance width of the code, in glyph units.
    fn font_width(&self, bytes: &[u8], offset: usize, len: usize) -> f64;

    /// Height of the code, in glyph units.
    fn font_height(&self, bytes: &[u8], offset: usize, len: usize) -> f64;

    /// Width of the space glyph, in glyph units. Fonts with no usable space
    /// metric fail here and the engine falls back to the average width.
    fn space_width(&self) -> Result<f64>;

    /// Average glyph width, in glyph units.
    fn average_font_width(&self) -> f64;

    /// The font matrix mapping glyph space to text space.
    ///
    /// Everything except Type 3 fonts uses the standard 1/1000 scale.
    fn font_matrix(&self) -> Matrix {
        Matrix::scaled(1.0 / GLYPH_UNITS, 1.0 / GLYPH_UNITS)
    }

    /// Whether this is a Type 3 font carrying its own font matrix.
    fn is_type3(&self) -> bool {
        false
    }
}
