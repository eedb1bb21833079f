//! Operator registry and configuration.
//!
//! The registry maps operator mnemonics to handlers. Handlers are either
//! one of the built-in operators (a plain enum dispatched statically) or a
//! custom processor registered at runtime. A configuration maps mnemonics
//! to handler identifiers resolved against the compile-time table below;
//! binding a mnemonic to the empty string disables it silently.

use crate::error::{PdfError, Result};
use crate::interp::engine::StreamEngine;
use crate::interp::position::TextPositionSink;
use crate::model::PdfObject;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// The built-in operator handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinOp {
    // Graphics state
    SaveGraphicsState,
    RestoreGraphicsState,
    Concatenate,
    SetGraphicsStateParameters,
    // Text objects
    BeginText,
    EndText,
    // Text state
    SetCharacterSpacing,
    SetWordSpacing,
    SetHorizontalScaling,
    SetTextLeading,
    SetTextFont,
    SetTextRenderingMode,
    SetTextRise,
    // Text positioning
    MoveText,
    MoveTextSetLeading,
    SetTextMatrix,
    NextLine,
    // Text showing
    ShowText,
    ShowAdjustedText,
    MoveAndShowText,
    SetSpacingMoveAndShowText,
    // XObjects
    Invoke,
}

impl BuiltinOp {
    /// Resolve a configuration handler identifier.
    pub fn resolve(identifier: &str) -> Option<Self> {
        let op = match identifier {
            "SaveGraphicsState" => Self::SaveGraphicsState,
            "RestoreGraphicsState" => Self::RestoreGraphicsState,
            "Concatenate" => Self::Concatenate,
            "SetGraphicsStateParameters" => Self::SetGraphicsStateParameters,
            "BeginText" => Self::BeginText,
            "EndText" => Self::EndText,
            "SetCharacterSpacing" => Self::SetCharacterSpacing,
            "SetWordSpacing" => Self::SetWordSpacing,
            "SetHorizontalScaling" => Self::SetHorizontalScaling,
            "SetTextLeading" => Self::SetTextLeading,
            "SetTextFont" => Self::SetTextFont,
            "SetTextRenderingMode" => Self::SetTextRenderingMode,
            "SetTextRise" => Self::SetTextRise,
            "MoveText" => Self::MoveText,
            "MoveTextSetLeading" => Self::MoveTextSetLeading,
            "SetTextMatrix" => Self::SetTextMatrix,
            "NextLine" => Self::NextLine,
            "ShowText" => Self::ShowText,
            "ShowAdjustedText" => Self::ShowAdjustedText,
            "MoveAndShowText" => Self::MoveAndShowText,
            "SetSpacingMoveAndShowText" => Self::SetSpacingMoveAndShowText,
            "Invoke" => Self::Invoke,
            _ => return None,
        };
        Some(op)
    }
}

/// A custom operator handler registered at runtime.
pub trait OperatorProcessor<S: TextPositionSink> {
    /// Execute the operator against the engine.
    fn process(
        &self,
        engine: &mut StreamEngine<'_, S>,
        mnemonic: &str,
        operands: &[PdfObject],
    ) -> Result<()>;
}

/// A registered handler: built-in or custom.
pub enum OperatorHandler<S: TextPositionSink> {
    Builtin(BuiltinOp),
    Custom(Rc<dyn OperatorProcessor<S>>),
}

impl<S: TextPositionSink> Clone for OperatorHandler<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Builtin(op) => Self::Builtin(*op),
            Self::Custom(p) => Self::Custom(Rc::clone(p)),
        }
    }
}

/// Mnemonic-keyed handler table plus the silently-ignored set.
pub struct OperatorRegistry<S: TextPositionSink> {
    handlers: HashMap<String, OperatorHandler<S>>,
    /// Operators never logged: configured-off plus already-reported unknowns
    unsupported: HashSet<String>,
}

impl<S: TextPositionSink> Default for OperatorRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TextPositionSink> std::fmt::Debug for OperatorRegistry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("unsupported", &self.unsupported)
            .finish()
    }
}

impl<S: TextPositionSink> OperatorRegistry<S> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            unsupported: HashSet::new(),
        }
    }

    /// Bind a handler to an operator mnemonic.
    pub fn register(&mut self, mnemonic: &str, handler: OperatorHandler<S>) {
        self.handlers.insert(mnemonic.to_string(), handler);
    }

    /// Mark an operator as silently ignored.
    pub fn disable(&mut self, mnemonic: &str) {
        self.handlers.remove(mnemonic);
        self.unsupported.insert(mnemonic.to_string());
    }

    /// Look up the handler for a mnemonic.
    pub fn get(&self, mnemonic: &str) -> Option<OperatorHandler<S>> {
        self.handlers.get(mnemonic).cloned()
    }

    /// Record an unknown mnemonic; true if this is its first sighting.
    pub fn note_unsupported(&mut self, mnemonic: &str) -> bool {
        self.unsupported.insert(mnemonic.to_string())
    }

    /// Forget which unknown operators have been reported.
    pub fn reset_unsupported(&mut self) {
        self.unsupported.clear();
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        self.handlers.clear();
        self.unsupported.clear();
    }
}

/// Operator configuration: mnemonic to handler identifier, where the empty
/// string means the operator is recognised but silently ignored.
#[derive(Debug, Clone, Default)]
pub struct OperatorConfig {
    bindings: HashMap<String, String>,
}

/// Mnemonics bound to built-in handlers in the text-extraction table.
const TEXT_EXTRACTION_BINDINGS: &[(&str, &str)] = &[
    ("q", "SaveGraphicsState"),
    ("Q", "RestoreGraphicsState"),
    ("cm", "Concatenate"),
    ("gs", "SetGraphicsStateParameters"),
    ("BT", "BeginText"),
    ("ET", "EndText"),
    ("Tc", "SetCharacterSpacing"),
    ("Tw", "SetWordSpacing"),
    ("Tz", "SetHorizontalScaling"),
    ("TL", "SetTextLeading"),
    ("Tf", "SetTextFont"),
    ("Tr", "SetTextRenderingMode"),
    ("Ts", "SetTextRise"),
    ("Td", "MoveText"),
    ("TD", "MoveTextSetLeading"),
    ("Tm", "SetTextMatrix"),
    ("T*", "NextLine"),
    ("Tj", "ShowText"),
    ("TJ", "ShowAdjustedText"),
    ("'", "MoveAndShowText"),
    ("\"", "SetSpacingMoveAndShowText"),
    ("Do", "Invoke"),
];

/// Mnemonics the text-extraction table recognises but ignores: path
/// construction and painting, colour, clipping, inline images, marked
/// content, compatibility sections, and Type 3 glyph metrics.
const TEXT_EXTRACTION_DISABLED: &[&str] = &[
    "b", "B", "b*", "B*", "BDC", "BI", "BMC", "BX", "c", "cs", "CS", "d", "d0", "d1", "DP", "EI",
    "EMC", "EX", "f", "F", "f*", "g", "G", "h", "i", "ID", "j", "J", "k", "K", "l", "m", "M", "MP",
    "n", "re", "rg", "RG", "ri", "s", "S", "sc", "SC", "scn", "SCN", "sh", "v", "w", "W", "W*", "y",
];

impl OperatorConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default table for text extraction: text, graphics-state, and
    /// XObject operators bound; painting and colour operators ignored.
    pub fn text_extraction() -> Self {
        let mut config = Self::new();
        for (mnemonic, identifier) in TEXT_EXTRACTION_BINDINGS {
            config.bind(mnemonic, identifier);
        }
        for mnemonic in TEXT_EXTRACTION_DISABLED {
            config.disable(mnemonic);
        }
        config
    }

    /// Bind a mnemonic to a handler identifier.
    pub fn bind(&mut self, mnemonic: &str, identifier: &str) {
        self.bindings
            .insert(mnemonic.to_string(), identifier.to_string());
    }

    /// Mark a mnemonic as silently ignored.
    pub fn disable(&mut self, mnemonic: &str) {
        self.bind(mnemonic, "");
    }

    /// Build a registry, resolving every identifier against the built-in
    /// table. Unresolvable identifiers are a fatal configuration error.
    pub fn build_registry<S: TextPositionSink>(&self) -> Result<OperatorRegistry<S>> {
        let mut registry = OperatorRegistry::new();
        for (mnemonic, identifier) in &self.bindings {
            if identifier.is_empty() {
                registry.disable(mnemonic);
            } else {
                let op = BuiltinOp::resolve(identifier)
                    .ok_or_else(|| PdfError::UnknownHandler(identifier.clone()))?;
                registry.register(mnemonic, OperatorHandler::Builtin(op));
            }
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::position::NullSink;

    #[test]
    fn test_default_table_resolves() {
        let config = OperatorConfig::text_extraction();
        let registry: OperatorRegistry<NullSink> = config.build_registry().unwrap();
        assert!(matches!(
            registry.get("Tj"),
            Some(OperatorHandler::Builtin(BuiltinOp::ShowText))
        ));
        assert!(registry.get("re").is_none());
    }

    #[test]
    fn test_unknown_identifier_is_fatal() {
        let mut config = OperatorConfig::new();
        config.bind("Tj", "NoSuchHandler");
        let err = config.build_registry::<NullSink>().unwrap_err();
        assert!(matches!(err, PdfError::UnknownHandler(_)));
    }

    #[test]
    fn test_note_unsupported_once() {
        let mut registry: OperatorRegistry<NullSink> = OperatorRegistry::new();
        assert!(registry.note_unsupported("Foo"));
        assert!(!registry.note_unsupported("Foo"));
    }
}
