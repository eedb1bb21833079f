//! orinoco - a PDF content-stream interpretation engine.
//!
//! The engine consumes the token stream of a page's content (operands and
//! operators), maintains the graphics and text state of the PDF imaging
//! model, and emits one fully resolved [`TextPosition`] per shown glyph to
//! a [`TextPositionSink`] such as a text extractor.
//!
//! Lexing raw bytes into tokens, font tables, and document access live
//! outside this crate: tokens arrive through the [`parser::TokenSource`]
//! trait and fonts behind the [`font::Font`] trait.
//!
//! [`TextPosition`]: interp::TextPosition
//! [`TextPositionSink`]: interp::TextPositionSink

pub mod error;
pub mod font;
pub mod interp;
pub mod model;
pub mod parser;
pub mod utils;

pub use error::{PdfError, Result};
pub use font::Font;
pub use interp::{
    CollectingSink, NullSink, OperatorConfig, ResourceScope, StreamEngine, TextPosition,
    TextPositionSink,
};
pub use model::{GraphicsState, PdfObject, TextState};
pub use parser::{Token, TokenBuffer, TokenSource};
pub use utils::{Matrix, Point, Rect};
