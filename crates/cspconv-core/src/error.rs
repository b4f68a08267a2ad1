//! Conversion error types.

use crate::tree::Arity;
use cspconv_model::{OperatorKind, Rank};
use thiserror::Error;

/// A conversion error. Every variant aborts the current conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unknown variable: {id}")]
    UnknownVariable { id: String },

    #[error("duplicate variable declaration: {id}")]
    DuplicateVariable { id: String },

    #[error("variable {id} reuses the name of an emitted auxiliary variable")]
    AuxiliaryNameClash { id: String },

    #[error("malformed expression: `{op}` expects {expected} argument(s), found {found}")]
    MalformedExpression {
        op: OperatorKind,
        expected: Arity,
        found: usize,
    },

    #[error("unsupported operator in expression: `{op}`")]
    UnsupportedOperator { op: OperatorKind },

    #[error("size mismatch in {what}: expected {expected}, found {found}")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("jagged matrix: row {row} has {found} columns, expected {expected}")]
    JaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unsupported operand: {context} does not accept {form} operands")]
    UnsupportedOperand {
        context: &'static str,
        form: &'static str,
    },

    #[error("unsupported rank {rank:?}: only `any` is supported")]
    UnsupportedRank { rank: Rank },

    #[error("index overflow: position {offset} from start {start} exceeds the integer range")]
    IndexOverflow { start: i64, offset: usize },

    #[error("cardinality of closed form is not supported")]
    UnsupportedClosedForm,

    #[error("empty domain for {id}")]
    EmptyDomain { id: String },

    #[error("variable '{id}': {source}")]
    Variable {
        id: String,
        #[source]
        source: Box<ConvertError>,
    },

    #[error("constraint '{id}' ({kind}): {source}")]
    Constraint {
        id: String,
        kind: &'static str,
        #[source]
        source: Box<ConvertError>,
    },
}

impl ConvertError {
    /// The innermost error, with declaration context stripped.
    pub fn root(&self) -> &ConvertError {
        match self {
            ConvertError::Variable { source, .. } | ConvertError::Constraint { source, .. } => {
                source.root()
            }
            other => other,
        }
    }

    /// Id of the declaration that failed, if known.
    pub fn declaration(&self) -> Option<&str> {
        match self {
            ConvertError::Variable { id, .. } | ConvertError::Constraint { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
