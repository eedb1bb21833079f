//! Shared test fixtures: a configurable mock font and token helpers.
#![allow(dead_code)]

use orinoco::error::{PdfError, Result};
use orinoco::font::Font;
use orinoco::model::PdfObject;
use orinoco::parser::Token;
use orinoco::utils::Matrix;
use std::collections::HashMap;

/// Numeric operand token.
pub fn num(value: f64) -> Token {
    Token::Operand(PdfObject::Real(value))
}

/// Integer operand token.
pub fn int(value: i64) -> Token {
    Token::Operand(PdfObject::Int(value))
}

/// Name operand token.
pub fn name(value: &str) -> Token {
    Token::Operand(PdfObject::Name(value.to_string()))
}

/// String operand token.
pub fn string(value: &[u8]) -> Token {
    Token::Operand(PdfObject::String(value.to_vec()))
}

/// Operator token.
pub fn op(mnemonic: &str) -> Token {
    Token::Operator(mnemonic.to_string())
}

/// Letter-size page used throughout the tests.
pub const PAGE: (f64, f64, f64, f64) = (0.0, 0.0, 612.0, 792.0);

/// Configurable font: single-byte Latin decoding by default, optional
/// multi-byte mode, per-byte width overrides, optional Type 3 matrix.
pub struct MockFont {
    /// Width in glyph units, keyed by first byte of the code
    pub widths: HashMap<u8, f64>,
    /// Width when no override matches
    pub default_width: f64,
    /// Height in glyph units for every code
    pub height: f64,
    /// Space width; None makes space_width() fail
    pub space: Option<f64>,
    /// Average width fallback
    pub average_width: f64,
    /// Codes are two bytes long when set
    pub multibyte: bool,
    /// Decode always fails when set
    pub undecodable: bool,
    /// Type 3 font matrix; None means a standard font
    pub type3_matrix: Option<Matrix>,
}

impl Default for MockFont {
    fn default() -> Self {
        Self {
            widths: HashMap::new(),
            default_width: 500.0,
            height: 700.0,
            space: Some(250.0),
            average_width: 450.0,
            multibyte: false,
            undecodable: false,
            type3_matrix: None,
        }
    }
}

impl MockFont {
    pub fn with_width(byte: u8, width: f64) -> Self {
        let mut font = Self::default();
        font.widths.insert(byte, width);
        font
    }
}

impl Font for MockFont {
    fn encode(&self, bytes: &[u8], offset: usize, len: usize) -> Option<String> {
        if self.undecodable {
            return None;
        }
        if self.multibyte != (len == 2) {
            return None;
        }
        Some(
            bytes[offset..offset + len]
                .iter()
                .map(|&b| b as char)
                .collect(),
        )
    }

    fn code_from_array(&self, bytes: &[u8], offset: usize, len: usize) -> u32 {
        bytes[offset..offset + len]
            .iter()
            .fold(0u32, |code, &b| (code << 8) | u32::from(b))
    }

    fn font_width(&self, bytes: &[u8], offset: usize, _len: usize) -> f64 {
        self.widths
            .get(&bytes[offset])
            .copied()
            .unwrap_or(self.default_width)
    }

    fn font_height(&self, _bytes: &[u8], _offset: usize, _len: usize) -> f64 {
        self.height
    }

    fn space_width(&self) -> Result<f64> {
        self.space
            .ok_or_else(|| PdfError::FontError("no space glyph".to_string()))
    }

    fn average_font_width(&self) -> f64 {
        self.average_width
    }

    fn font_matrix(&self) -> Matrix {
        self.type3_matrix
            .unwrap_or_else(|| Matrix::scaled(0.001, 0.001))
    }

    fn is_type3(&self) -> bool {
        self.type3_matrix.is_some()
    }
}
