//! Resource scopes.
//!
//! Each (sub-)stream executes against a scope of named resources: fonts for
//! Tf, XObjects for Do, extended graphics state dictionaries for gs. Scopes
//! stack: XObject forms and Type 3 character procedures push their private
//! scope for the duration of their stream and pop it on the way out.

use crate::font::Font;
use crate::model::PdfObject;
use crate::parser::Token;
use crate::utils::Matrix;
use std::collections::HashMap;
use std::sync::Arc;

/// A named, reusable content stream or image invoked via Do.
#[derive(Clone)]
pub enum XObject {
    /// Form XObject: a nested content stream
    Form(FormXObject),
    /// Image XObject: skipped by the text engine
    Image,
}

/// A Form XObject's content and private resources.
#[derive(Clone, Default)]
pub struct FormXObject {
    /// Private resource scope; None inherits the invoking stream's scope
    pub resources: Option<ResourceScope>,
    /// Form matrix concatenated into the CTM for the duration of the form
    pub matrix: Option<Matrix>,
    /// Pre-tokenised form content
    pub content: Vec<Token>,
}

/// The subset of an extended graphics state (ExtGState) dictionary that the
/// engine applies, plus the raw entries for anything else.
#[derive(Clone, Default)]
pub struct ExtGState {
    /// LW - line width
    pub line_width: Option<f64>,
    /// LC - line cap
    pub line_cap: Option<i64>,
    /// LJ - line join
    pub line_join: Option<i64>,
    /// ML - miter limit
    pub miter_limit: Option<f64>,
    /// D - dash array and phase
    pub dash: Option<(Vec<f64>, f64)>,
    /// TK - text knockout
    pub knockout: Option<bool>,
    /// Font - font and size pair
    pub font: Option<(Arc<dyn Font>, f64)>,
    /// Remaining entries, untyped
    pub entries: HashMap<String, PdfObject>,
}

/// Name-keyed access to the resources of the executing (sub-)stream.
///
/// Values are shared handles, so cloning a scope is cheap; the clone is
/// what gets pushed for a nested stream and released when it pops.
#[derive(Clone, Default)]
pub struct ResourceScope {
    fonts: HashMap<String, Arc<dyn Font>>,
    xobjects: HashMap<String, Arc<XObject>>,
    graphics_states: HashMap<String, Arc<ExtGState>>,
}

impl ResourceScope {
    /// Create an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a font by resource name.
    pub fn font(&self, name: &str) -> Option<Arc<dyn Font>> {
        self.fonts.get(name).cloned()
    }

    /// Look up an XObject by resource name.
    pub fn xobject(&self, name: &str) -> Option<Arc<XObject>> {
        self.xobjects.get(name).cloned()
    }

    /// Look up an extended graphics state by resource name.
    pub fn graphics_state(&self, name: &str) -> Option<Arc<ExtGState>> {
        self.graphics_states.get(name).cloned()
    }

    /// The font map.
    pub const fn fonts(&self) -> &HashMap<String, Arc<dyn Font>> {
        &self.fonts
    }

    /// The XObject map.
    pub const fn xobjects(&self) -> &HashMap<String, Arc<XObject>> {
        &self.xobjects
    }

    /// The extended-graphics-state map.
    pub const fn graphics_states(&self) -> &HashMap<String, Arc<ExtGState>> {
        &self.graphics_states
    }

    /// Replace the font map.
    pub fn set_fonts(&mut self, fonts: HashMap<String, Arc<dyn Font>>) {
        self.fonts = fonts;
    }

    /// Replace the extended-graphics-state map.
    pub fn set_graphics_states(&mut self, states: HashMap<String, Arc<ExtGState>>) {
        self.graphics_states = states;
    }

    /// Add a named font.
    pub fn insert_font(&mut self, name: &str, font: Arc<dyn Font>) {
        self.fonts.insert(name.to_string(), font);
    }

    /// Add a named XObject.
    pub fn insert_xobject(&mut self, name: &str, xobject: XObject) {
        self.xobjects.insert(name.to_string(), Arc::new(xobject));
    }

    /// Add a named extended graphics state.
    pub fn insert_graphics_state(&mut self, name: &str, state: ExtGState) {
        self.graphics_states.insert(name.to_string(), Arc::new(state));
    }
}
