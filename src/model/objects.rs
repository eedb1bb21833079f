//! Operand value model.
//!
//! Content-stream operands are full PDF objects. The engine receives them
//! already parsed from the token source; indirect objects arrive wrapped in
//! `PdfObject::Indirect` and are unwrapped before operand accumulation.

use crate::error::{PdfError, Result};
use std::collections::HashMap;

/// PDF object types - the operand value type of the content-stream language.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfObject {
    /// Null object
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Real (floating point) value
    Real(f64),
    /// Name object (e.g., /F1, /Im3)
    Name(String),
    /// String (byte array)
    String(Vec<u8>),
    /// Array of objects
    Array(Vec<Self>),
    /// Dictionary (name -> object mapping)
    Dict(HashMap<String, Self>),
    /// Indirect object, carrying its resolved target
    Indirect(Box<Self>),
}

impl PdfObject {
    /// Check if this is a null object
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get as boolean
    pub const fn as_bool(&self) -> Result<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(PdfError::TypeError {
                expected: "bool",
                got: self.type_name(),
            }),
        }
    }

    /// Get as integer
    pub const fn as_int(&self) -> Result<i64> {
        match self {
            Self::Int(n) => Ok(*n),
            _ => Err(PdfError::TypeError {
                expected: "int",
                got: self.type_name(),
            }),
        }
    }

    /// Get numeric value (int or real coerced to f64)
    pub const fn as_num(&self) -> Result<f64> {
        match self {
            Self::Int(n) => Ok(*n as f64),
            Self::Real(n) => Ok(*n),
            _ => Err(PdfError::TypeError {
                expected: "number",
                got: self.type_name(),
            }),
        }
    }

    /// Get as name string
    pub fn as_name(&self) -> Result<&str> {
        match self {
            Self::Name(s) => Ok(s),
            _ => Err(PdfError::TypeError {
                expected: "name",
                got: self.type_name(),
            }),
        }
    }

    /// Get as byte string
    pub fn as_string(&self) -> Result<&[u8]> {
        match self {
            Self::String(s) => Ok(s),
            _ => Err(PdfError::TypeError {
                expected: "string",
                got: self.type_name(),
            }),
        }
    }

    /// Get as array
    pub const fn as_array(&self) -> Result<&Vec<Self>> {
        match self {
            Self::Array(arr) => Ok(arr),
            _ => Err(PdfError::TypeError {
                expected: "array",
                got: self.type_name(),
            }),
        }
    }

    /// Get as dictionary
    pub const fn as_dict(&self) -> Result<&HashMap<String, Self>> {
        match self {
            Self::Dict(d) => Ok(d),
            _ => Err(PdfError::TypeError {
                expected: "dict",
                got: self.type_name(),
            }),
        }
    }

    /// Unwrap indirect objects, yielding the resolved target.
    ///
    /// Non-indirect objects pass through unchanged. Nested indirection is
    /// unwrapped fully.
    pub fn resolve(self) -> Self {
        let mut obj = self;
        while let Self::Indirect(inner) = obj {
            obj = *inner;
        }
        obj
    }

    /// Get type name for error messages
    const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Real(_) => "real",
            Self::Name(_) => "name",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Dict(_) => "dict",
            Self::Indirect(_) => "indirect",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_num_coercion() {
        assert_eq!(PdfObject::Int(3).as_num().unwrap(), 3.0);
        assert_eq!(PdfObject::Real(2.5).as_num().unwrap(), 2.5);
        assert!(PdfObject::Null.as_num().is_err());
    }

    #[test]
    fn test_resolve_indirect() {
        let obj = PdfObject::Indirect(Box::new(PdfObject::Indirect(Box::new(PdfObject::Int(7)))));
        assert_eq!(obj.resolve(), PdfObject::Int(7));
        assert_eq!(PdfObject::Bool(true).resolve(), PdfObject::Bool(true));
    }
}
