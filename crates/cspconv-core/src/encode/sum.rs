//! Linear sum constraints.

use super::{nary, operand_text};
use crate::error::{ConvertError, ConvertResult};
use crate::session::Converter;
use cspconv_model::{Condition, Relation};

pub(crate) fn relation_symbol(relation: Relation) -> &'static str {
    match relation {
        Relation::Eq => "==",
        Relation::Ne => "!=",
        Relation::Lt => "<",
        Relation::Le => "<=",
        Relation::Gt => ">",
        Relation::Ge => ">=",
    }
}

fn weighted(term: &str, coeff: i64) -> String {
    match coeff {
        1 => term.to_string(),
        -1 => format!("(- {term})"),
        c => format!("(* {term} {c})"),
    }
}

impl Converter {
    /// `(rel (+ c1*x1 ... cn*xn) bound)`. `None` coefficients are all 1.
    pub fn sum(
        &mut self,
        list: &[String],
        coeffs: Option<&[i64]>,
        condition: &Condition,
    ) -> ConvertResult<()> {
        if let Some(coeffs) = coeffs {
            if coeffs.len() != list.len() {
                return Err(ConvertError::SizeMismatch {
                    what: "sum coefficients",
                    expected: list.len(),
                    found: coeffs.len(),
                });
            }
        }

        let bound = operand_text(&self.registry, &condition.operand, "sum")?;
        let terms = self.registry.int_texts(list)?;
        let weighted_terms = terms.iter().enumerate().map(|(i, term)| {
            let coeff = coeffs.map_or(1, |c| c[i]);
            weighted(term, coeff)
        });

        self.sink.push(format!(
            "({} {} {bound})",
            relation_symbol(condition.relation),
            nary("+", weighted_terms)
        ));
        Ok(())
    }
}
