//! Counting constraints: cardinality and exactly-k.

use super::{indicator, nary};
use crate::error::{ConvertError, ConvertResult};
use crate::session::Converter;
use cspconv_model::Occurs;
use std::fmt::Display;

/// `(== (+ (if (== t v) 1 0) ...) count)`.
fn count_equals(terms: &[String], value: impl Display + Copy, count: &str) -> String {
    let indicators = terms.iter().map(|t| indicator(t, value));
    format!("(== {} {count})", nary("+", indicators))
}

impl Converter {
    /// For each `values[i]`, the number of occurrences in `list` equals
    /// `occurs[i]`. Interval occurrences get a fresh bounded auxiliary.
    pub fn cardinality(
        &mut self,
        list: &[String],
        values: &[i64],
        occurs: &Occurs,
        closed: bool,
    ) -> ConvertResult<()> {
        if closed {
            return Err(ConvertError::UnsupportedClosedForm);
        }
        if values.len() != occurs.len() {
            return Err(ConvertError::SizeMismatch {
                what: "cardinality occurrences",
                expected: values.len(),
                found: occurs.len(),
            });
        }

        let terms = self.registry.int_texts(list)?;
        let counts: Vec<String> = match occurs {
            Occurs::Integers { values: fixed } => fixed.iter().map(|v| v.to_string()).collect(),
            Occurs::Variables { ids } => self.registry.int_texts(ids)?,
            Occurs::Intervals { intervals } => {
                if let Some(empty) = intervals.iter().find(|iv| iv.min > iv.max) {
                    return Err(ConvertError::EmptyDomain {
                        id: format!("occurrence interval {}..{}", empty.min, empty.max),
                    });
                }
                intervals
                    .iter()
                    .map(|iv| self.declare_aux_int(&format!("{} {}", iv.min, iv.max)))
                    .collect::<ConvertResult<Vec<_>>>()?
            }
        };

        for (value, count) in values.iter().zip(&counts) {
            self.sink.push(count_equals(&terms, value, count));
        }
        Ok(())
    }

    /// Exactly `k` elements of `list` equal `value`.
    pub fn exactly_k(&mut self, list: &[String], value: i64, k: i64) -> ConvertResult<()> {
        let terms = self.registry.int_texts(list)?;
        self.sink.push(count_equals(&terms, value, &k.to_string()));
        Ok(())
    }
}
