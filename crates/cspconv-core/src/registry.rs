//! Variable registry: declared ids, emitted names and auxiliary allocation.

use crate::config::{ConvertConfig, DuplicatePolicy};
use crate::error::{ConvertError, ConvertResult};
use crate::types::{Type, TypedExpr};
use std::collections::{HashMap, HashSet};

/// A registered variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarEntry {
    /// Name used in the emitted program.
    pub name: String,
    pub ty: Type,
}

/// Registry of declared and auxiliary variables for one conversion session.
#[derive(Debug, Clone)]
pub struct VariableRegistry {
    vars: HashMap<String, VarEntry>,
    duplicates: DuplicatePolicy,
    aux_prefix: String,
    /// Auxiliary names handed out so far.
    auxiliaries: HashSet<String>,
    /// Next auxiliary suffix. Only ever increases.
    next_aux: usize,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::with_config(&ConvertConfig::default())
    }

    pub fn with_config(config: &ConvertConfig) -> Self {
        Self {
            vars: HashMap::new(),
            duplicates: config.duplicates,
            aux_prefix: config.aux_prefix.clone(),
            auxiliaries: HashSet::new(),
            next_aux: 0,
        }
    }

    /// Register `id` under `name` with type `ty`.
    ///
    /// An id equal to an auxiliary already handed out is rejected under either
    /// duplicate policy, since its declaration has been emitted.
    pub fn declare(&mut self, id: &str, ty: Type, name: String) -> ConvertResult<()> {
        if self.auxiliaries.contains(id) {
            return Err(ConvertError::AuxiliaryNameClash { id: id.to_string() });
        }
        if self.vars.contains_key(id) && self.duplicates == DuplicatePolicy::Reject {
            return Err(ConvertError::DuplicateVariable { id: id.to_string() });
        }
        self.vars.insert(id.to_string(), VarEntry { name, ty });
        Ok(())
    }

    /// Look up a declared variable.
    pub fn lookup(&self, id: &str) -> ConvertResult<&VarEntry> {
        self.vars
            .get(id)
            .ok_or_else(|| ConvertError::UnknownVariable { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.vars.contains_key(id)
    }

    /// The variable as a typed expression, with its declared type.
    pub fn expr(&self, id: &str) -> ConvertResult<TypedExpr> {
        let entry = self.lookup(id)?;
        Ok(TypedExpr::new(entry.name.clone(), entry.ty))
    }

    /// The variable's text coerced to `Int`.
    pub fn int_text(&self, id: &str) -> ConvertResult<String> {
        Ok(self.expr(id)?.as_int().into_text())
    }

    /// Resolve every id of `ids` to integer text.
    pub fn int_texts(&self, ids: &[String]) -> ConvertResult<Vec<String>> {
        ids.iter().map(|id| self.int_text(id)).collect()
    }

    /// Allocate a fresh auxiliary name, skipping names already registered.
    pub fn fresh_auxiliary_name(&mut self) -> String {
        loop {
            let name = format!("{}{}", self.aux_prefix, self.next_aux);
            self.next_aux += 1;
            if !self.vars.contains_key(&name) {
                return name;
            }
        }
    }

    /// Allocate and register a fresh auxiliary variable of type `ty`.
    pub fn declare_auxiliary(&mut self, ty: Type) -> String {
        let name = self.fresh_auxiliary_name();
        self.vars.insert(
            name.clone(),
            VarEntry {
                name: name.clone(),
                ty,
            },
        );
        self.auxiliaries.insert(name.clone());
        name
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Default for VariableRegistry {
    fn default() -> Self {
        Self::new()
    }
}
