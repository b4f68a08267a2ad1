//! Instantiation: fix each variable to a literal value.

use crate::error::{ConvertError, ConvertResult};
use crate::session::Converter;
use crate::types::Type;

impl Converter {
    /// Fix `list[i]` to `values[i]`.
    ///
    /// With `broadcast_instantiation` set, a single value applies to every
    /// variable of a longer list.
    pub fn instantiation(&mut self, list: &[String], values: &[i64]) -> ConvertResult<()> {
        let broadcast = values.len() == 1 && self.config.broadcast_instantiation;
        if list.len() != values.len() && !broadcast {
            return Err(ConvertError::SizeMismatch {
                what: "instantiation values",
                expected: list.len(),
                found: values.len(),
            });
        }

        let entries = list
            .iter()
            .map(|id| self.registry.lookup(id).cloned())
            .collect::<ConvertResult<Vec<_>>>()?;

        for (i, entry) in entries.iter().enumerate() {
            let value = if broadcast { values[0] } else { values[i] };
            let name = &entry.name;
            let statement = match (entry.ty, value) {
                (Type::Bool, 0) => format!("(! {name})"),
                (Type::Bool, 1) => name.clone(),
                (Type::Bool, _) => "false".to_string(),
                (Type::Int, v) => format!("(== {name} {v})"),
            };
            self.sink.push(statement);
        }
        Ok(())
    }
}
