//! Constraint encoders.
//!
//! Each submodule adds `Converter` methods for one family of constraints.
//! Encoders resolve every operand before emitting, so a failing constraint
//! does not leave a partial statement behind (auxiliary declarations made
//! before the failure excepted).

mod counting;
mod element;
mod extension;
mod instantiation;
mod ordering;
mod regular;
mod sum;
mod variables;

pub use regular::{StateTable, TransitionIds};

use crate::error::{ConvertError, ConvertResult};
use crate::registry::VariableRegistry;
use crate::session::Converter;
use crate::types::Type;
use cspconv_model::Operand;
use std::fmt::Display;

/// `(op a b ...)`; `(op)` when `items` is empty.
pub(crate) fn nary<I, S>(op: &str, items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = format!("({op}");
    for item in items {
        out.push(' ');
        out.push_str(item.as_ref());
    }
    out.push(')');
    out
}

/// `(== lhs rhs)`.
pub(crate) fn eq(lhs: &str, rhs: impl Display) -> String {
    format!("(== {lhs} {rhs})")
}

/// `(if (== term value) 1 0)`.
pub(crate) fn indicator(term: &str, value: impl Display) -> String {
    format!("(if {} 1 0)", eq(term, value))
}

/// Integer or variable operand as integer text.
pub(crate) fn operand_text(
    registry: &VariableRegistry,
    operand: &Operand,
    context: &'static str,
) -> ConvertResult<String> {
    match operand {
        Operand::Integer { value } => Ok(value.to_string()),
        Operand::Variable { id } => registry.int_text(id),
        Operand::Interval { .. } | Operand::Set { .. } => Err(ConvertError::UnsupportedOperand {
            context,
            form: operand.form(),
        }),
    }
}

impl Converter {
    /// Declare a fresh auxiliary integer variable with the given domain text
    /// (`lo hi` or `(v1 v2 ...)`), emitting its declaration.
    pub(crate) fn declare_aux_int(&mut self, domain: &str) -> ConvertResult<String> {
        let name = self.registry.declare_auxiliary(Type::Int);
        self.sink.push(format!("(int {name} {domain})"));
        Ok(name)
    }
}
