//! Regular constraints: automaton membership through auxiliary trace variables.
//!
//! Encoding happens in two passes. `StateTable::assign` relabels the automaton
//! states to dense ids (start first, then finals, then transition endpoints,
//! each in first-seen order). `Converter::regular` then declares one trace
//! variable per word position and constrains each step with a disjunction over
//! the transitions.

use super::{eq, nary};
use crate::error::ConvertResult;
use crate::session::Converter;
use cspconv_model::Transition;
use std::collections::HashMap;
use tracing::warn;

/// A transition with relabeled states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionIds {
    pub from: usize,
    pub to: usize,
    pub value: i64,
}

/// Dense relabeling of an automaton's states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTable {
    /// State labels, indexed by id.
    pub labels: Vec<String>,
    pub start: usize,
    /// Final state ids, in first-seen order (may repeat if the input repeats).
    pub finals: Vec<usize>,
    pub transitions: Vec<TransitionIds>,
}

impl StateTable {
    pub fn assign(start: &str, finals: &[String], transitions: &[Transition]) -> Self {
        let mut ids: HashMap<String, usize> = HashMap::new();
        let mut labels = Vec::new();
        let mut id_of = |label: &str| -> usize {
            if let Some(&id) = ids.get(label) {
                return id;
            }
            let id = labels.len();
            labels.push(label.to_string());
            ids.insert(label.to_string(), id);
            id
        };

        let start = id_of(start);
        let finals = finals.iter().map(|s| id_of(s.as_str())).collect();
        let transitions = transitions
            .iter()
            .map(|t| TransitionIds {
                from: id_of(t.from.as_str()),
                to: id_of(t.to.as_str()),
                value: t.value,
            })
            .collect();

        Self {
            labels,
            start,
            finals,
            transitions,
        }
    }

    pub fn num_states(&self) -> usize {
        self.labels.len()
    }

    /// Sorted, deduplicated final ids.
    pub fn final_domain(&self) -> Vec<usize> {
        let mut domain = self.finals.clone();
        domain.sort_unstable();
        domain.dedup();
        domain
    }

    pub fn accepts_empty_word(&self) -> bool {
        self.finals.contains(&self.start)
    }
}

impl Converter {
    /// `list` is accepted by the automaton `(start, finals, transitions)`.
    pub fn regular(
        &mut self,
        list: &[String],
        start: &str,
        finals: &[String],
        transitions: &[Transition],
    ) -> ConvertResult<()> {
        let table = StateTable::assign(start, finals, transitions);
        let symbols = self.registry.int_texts(list)?;
        self.encode_automaton(&symbols, &table)
    }

    fn encode_automaton(&mut self, symbols: &[String], table: &StateTable) -> ConvertResult<()> {
        if symbols.is_empty() {
            if !table.accepts_empty_word() {
                warn!("empty word rejected by automaton; emitting false");
                self.sink.push("false");
            }
            return Ok(());
        }
        if table.finals.is_empty() {
            warn!("automaton has no final state; emitting false");
            self.sink.push("false");
            return Ok(());
        }

        let mut trace = Vec::with_capacity(symbols.len() + 1);
        trace.push(table.start.to_string());
        for i in 0..symbols.len() {
            let domain = if i + 1 == symbols.len() {
                let finals: Vec<String> =
                    table.final_domain().iter().map(|id| id.to_string()).collect();
                format!("({})", finals.join(" "))
            } else {
                format!("0 {}", table.num_states() - 1)
            };
            trace.push(self.declare_aux_int(&domain)?);
        }

        for (i, symbol) in symbols.iter().enumerate() {
            let (current, next) = (&trace[i], &trace[i + 1]);
            let steps = table.transitions.iter().map(|t| {
                format!(
                    "(&& {} {} {})",
                    eq(current, t.from),
                    eq(next, t.to),
                    eq(symbol, t.value)
                )
            });
            self.sink.push(nary("||", steps));
        }
        Ok(())
    }
}
