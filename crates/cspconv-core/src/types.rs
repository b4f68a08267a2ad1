//! Semantic types and typed expressions.

use std::fmt;

/// Semantic type of an emitted expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    Int,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
        }
    }
}

/// Emitted expression text paired with its semantic type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedExpr {
    pub text: String,
    pub ty: Type,
}

impl TypedExpr {
    pub fn new(text: impl Into<String>, ty: Type) -> Self {
        Self {
            text: text.into(),
            ty,
        }
    }

    /// Integer literal.
    pub fn int(value: i64) -> Self {
        Self::new(value.to_string(), Type::Int)
    }

    /// Coerce to `Int`: booleans become `(if e 1 0)`.
    pub fn as_int(&self) -> TypedExpr {
        match self.ty {
            Type::Bool => TypedExpr::new(format!("(if {} 1 0)", self.text), Type::Int),
            Type::Int => self.clone(),
        }
    }

    /// Coerce to `Bool`: integers become `(> e 0)`.
    pub fn as_bool(&self) -> TypedExpr {
        match self.ty {
            Type::Int => TypedExpr::new(format!("(> {} 0)", self.text), Type::Bool),
            Type::Bool => self.clone(),
        }
    }

    /// Coerce to `expected`.
    pub fn as_type(&self, expected: Type) -> TypedExpr {
        match expected {
            Type::Bool => self.as_bool(),
            Type::Int => self.as_int(),
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for TypedExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
