//! Content-stream interpretation.
//!
//! This module contains:
//! - `engine`: the interpretation loop, state stacks, and text showing
//! - `registry`: operator table and configuration
//! - `resources`: resource scopes (fonts, XObjects, ExtGStates)
//! - `position`: emitted text positions and the sink trait
//! - `ops`: built-in operator implementations

pub mod engine;
mod ops;
pub mod position;
pub mod registry;
pub mod resources;

pub use engine::StreamEngine;
pub use position::{CollectingSink, NullSink, TextPosition, TextPositionSink};
pub use registry::{BuiltinOp, OperatorConfig, OperatorHandler, OperatorProcessor, OperatorRegistry};
pub use resources::{ExtGState, FormXObject, ResourceScope, XObject};
