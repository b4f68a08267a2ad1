//! Extensional (table) constraints.

use super::nary;
use crate::error::{ConvertError, ConvertResult};
use crate::session::Converter;
use cspconv_model::TupleValue;
use tracing::warn;

impl Converter {
    /// Table constraint over `list`.
    ///
    /// Support tables become a disjunction of per-tuple conjunctions of
    /// equalities; conflict tables a conjunction of per-tuple disjunctions of
    /// disequalities. Wildcard positions are skipped. A tuple made only of
    /// wildcards matches everything: the constraint is then trivially true
    /// (support, nothing emitted) or unsatisfiable (conflict, `false`).
    pub fn extension(
        &mut self,
        list: &[String],
        tuples: &[Vec<TupleValue>],
        support: bool,
    ) -> ConvertResult<()> {
        if let Some(tuple) = tuples.iter().find(|t| t.len() != list.len()) {
            return Err(ConvertError::SizeMismatch {
                what: "extension tuple",
                expected: list.len(),
                found: tuple.len(),
            });
        }

        if tuples.iter().any(|t| t.iter().all(TupleValue::is_star)) {
            if support {
                warn!("support table contains an all-wildcard tuple; constraint dropped");
            } else {
                warn!("conflict table contains an all-wildcard tuple; emitting false");
                self.sink.push("false");
            }
            return Ok(());
        }

        let terms = self.registry.int_texts(list)?;
        let (outer, inner, cmp) = if support {
            ("||", "&&", "==")
        } else {
            ("&&", "||", "!=")
        };

        let clauses = tuples.iter().map(|tuple| {
            let literals = tuple
                .iter()
                .zip(&terms)
                .filter_map(|(cell, term)| cell.value().map(|v| format!("({cmp} {term} {v})")));
            nary(inner, literals)
        });
        self.sink.push(nary(outer, clauses));
        Ok(())
    }

    /// Table constraint over one variable: each value is a one-cell tuple.
    pub fn extension_unary(
        &mut self,
        variable: &str,
        values: &[i64],
        support: bool,
    ) -> ConvertResult<()> {
        let tuples: Vec<Vec<TupleValue>> =
            values.iter().map(|&v| vec![TupleValue::Value(v)]).collect();
        self.extension(&[variable.to_string()], &tuples, support)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::testutil::{converter, ids};

    fn row(cells: &[Option<i64>]) -> Vec<TupleValue> {
        cells
            .iter()
            .map(|c| c.map_or(TupleValue::STAR, TupleValue::Value))
            .collect()
    }

    #[test]
    fn test_support_table() {
        let mut conv = converter(&["x", "y"], &[]);
        let tuples = vec![row(&[Some(1), Some(2)]), row(&[None, Some(3)])];
        conv.extension(&ids(&["x", "y"]), &tuples, true).unwrap();
        assert_eq!(
            conv.sink().statements(),
            ["(|| (&& (== x 1) (== y 2)) (&& (== y 3)))"]
        );
    }

    #[test]
    fn test_conflict_table() {
        let mut conv = converter(&["x", "y"], &[]);
        let tuples = vec![row(&[Some(1), Some(2)]), row(&[Some(0), None])];
        conv.extension(&ids(&["x", "y"]), &tuples, false).unwrap();
        assert_eq!(
            conv.sink().statements(),
            ["(&& (|| (!= x 1) (!= y 2)) (|| (!= x 0)))"]
        );
    }

    #[test]
    fn test_all_wildcard_conflict_is_false() {
        let mut conv = converter(&["x", "y"], &[]);
        let tuples = vec![row(&[Some(1), Some(2)]), row(&[None, None])];
        conv.extension(&ids(&["x", "y"]), &tuples, false).unwrap();
        assert_eq!(conv.sink().statements(), ["false"]);
    }

    #[test]
    fn test_all_wildcard_support_emits_nothing() {
        let mut conv = converter(&["x", "y"], &[]);
        let tuples = vec![row(&[None, None])];
        conv.extension(&ids(&["x", "y"]), &tuples, true).unwrap();
        assert!(conv.sink().is_empty());
    }

    #[test]
    fn test_tuple_arity_mismatch() {
        let mut conv = converter(&["x", "y"], &[]);
        let tuples = vec![row(&[Some(1)])];
        let err = conv.extension(&ids(&["x", "y"]), &tuples, true).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::SizeMismatch {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_unary_support() {
        let mut conv = converter(&[], &["p"]);
        conv.extension_unary("p", &[0, 1], true).unwrap();
        assert_eq!(
            conv.sink().statements(),
            ["(|| (&& (== (if p 1 0) 0)) (&& (== (if p 1 0) 1)))"]
        );
    }

    #[test]
    fn test_empty_support_table() {
        let mut conv = converter(&["x"], &[]);
        conv.extension(&ids(&["x"]), &[], true).unwrap();
        assert_eq!(conv.sink().statements(), ["(||)"]);
    }
}
