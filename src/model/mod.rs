//! Data model: operand values and graphics/text state.

pub mod objects;
pub mod state;

pub use objects::PdfObject;
pub use state::{Color, DashPattern, GraphicsState, RenderingMode, TextState};
