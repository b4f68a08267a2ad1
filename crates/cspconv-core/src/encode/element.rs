//! Element constraints over lists and matrices.

use super::{eq, nary, operand_text};
use crate::error::{ConvertError, ConvertResult};
use crate::session::Converter;
use cspconv_model::{Operand, Rank};

/// Index values `start, start + 1, ...` for `len` positions.
fn positions(start: i64, len: usize) -> ConvertResult<Vec<i64>> {
    (0..len)
        .map(|offset| {
            i64::try_from(offset)
                .ok()
                .and_then(|o| start.checked_add(o))
                .ok_or(ConvertError::IndexOverflow { start, offset })
        })
        .collect()
}

impl Converter {
    /// `list[index - start_index] == value`, as a disjunction over positions.
    pub fn element(
        &mut self,
        list: &[String],
        start_index: i64,
        index: &str,
        rank: Rank,
        value: &Operand,
    ) -> ConvertResult<()> {
        if rank != Rank::Any {
            return Err(ConvertError::UnsupportedRank { rank });
        }

        let value = operand_text(&self.registry, value, "element")?;
        let index = self.registry.int_text(index)?;
        let terms = self.registry.int_texts(list)?;
        let indices = positions(start_index, terms.len())?;

        let cases = terms.iter().zip(indices).map(|(term, i)| {
            format!("(&& {} {})", eq(term, &value), eq(&index, i))
        });
        self.sink.push(nary("||", cases));
        Ok(())
    }

    /// `matrix[row - row_start][col - col_start] == value`, as a disjunction
    /// over every cell. Rows may differ in length.
    pub fn element_matrix(
        &mut self,
        matrix: &[Vec<String>],
        (row_start, row_index): (i64, &str),
        (col_start, col_index): (i64, &str),
        value: &Operand,
    ) -> ConvertResult<()> {
        let value = operand_text(&self.registry, value, "element")?;
        let row_index = self.registry.int_text(row_index)?;
        let col_index = self.registry.int_text(col_index)?;
        let cells = matrix
            .iter()
            .map(|row| self.registry.int_texts(row))
            .collect::<ConvertResult<Vec<_>>>()?;
        let rows = positions(row_start, cells.len())?;
        let widest = cells.iter().map(Vec::len).max().unwrap_or(0);
        let cols = positions(col_start, widest)?;

        let mut cases = Vec::new();
        for (row, &y) in cells.iter().zip(&rows) {
            for (cell, &x) in row.iter().zip(&cols) {
                cases.push(format!(
                    "(&& {} {} {})",
                    eq(cell, &value),
                    eq(&row_index, y),
                    eq(&col_index, x)
                ));
            }
        }
        self.sink.push(nary("||", &cases));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::testutil::{converter, ids};

    #[test]
    fn test_element_constant_value() {
        let mut conv = converter(&["a", "b", "i"], &[]);
        conv.element(
            &ids(&["a", "b"]),
            1,
            "i",
            Rank::Any,
            &Operand::Integer { value: 7 },
        )
        .unwrap();
        assert_eq!(
            conv.sink().statements(),
            ["(|| (&& (== a 7) (== i 1)) (&& (== b 7) (== i 2)))"]
        );
    }

    #[test]
    fn test_element_variable_value() {
        let mut conv = converter(&["a", "i", "v"], &[]);
        conv.element(
            &ids(&["a"]),
            0,
            "i",
            Rank::Any,
            &Operand::Variable { id: "v".into() },
        )
        .unwrap();
        assert_eq!(conv.sink().statements(), ["(|| (&& (== a v) (== i 0)))"]);
    }

    #[test]
    fn test_element_rank_rejected() {
        let mut conv = converter(&["a", "i"], &[]);
        for rank in [Rank::First, Rank::Last] {
            let err = conv
                .element(&ids(&["a"]), 0, "i", rank, &Operand::Integer { value: 1 })
                .unwrap_err();
            assert!(matches!(err, ConvertError::UnsupportedRank { .. }));
        }
        assert!(conv.sink().is_empty());
    }

    #[test]
    fn test_element_set_operand_rejected() {
        let mut conv = converter(&["a", "i"], &[]);
        let err = conv
            .element(
                &ids(&["a"]),
                0,
                "i",
                Rank::Any,
                &Operand::Set { values: vec![1, 2] },
            )
            .unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedOperand { .. }));
    }

    #[test]
    fn test_element_matrix() {
        let mut conv = converter(&["a", "b", "c", "r", "k"], &[]);
        let matrix = vec![ids(&["a", "b"]), ids(&["c"])];
        conv.element_matrix(&matrix, (0, "r"), (1, "k"), &Operand::Integer { value: 3 })
            .unwrap();
        assert_eq!(
            conv.sink().statements(),
            ["(|| (&& (== a 3) (== r 0) (== k 1)) (&& (== b 3) (== r 0) (== k 2)) \
              (&& (== c 3) (== r 1) (== k 1)))"]
        );
    }

    #[test]
    fn test_start_index_at_integer_limit() {
        let mut conv = converter(&["a", "b", "i"], &[]);
        let one = Operand::Integer { value: 1 };
        conv.element(&ids(&["a"]), i64::MAX, "i", Rank::Any, &one)
            .unwrap();
        assert_eq!(
            conv.sink().statements(),
            [format!("(|| (&& (== a 1) (== i {})))", i64::MAX)]
        );

        let err = conv
            .element(&ids(&["a", "b"]), i64::MAX, "i", Rank::Any, &one)
            .unwrap_err();
        assert!(matches!(err, ConvertError::IndexOverflow { offset: 1, .. }));
        assert_eq!(conv.sink().len(), 1);
    }

    #[test]
    fn test_matrix_starts_at_integer_limit() {
        let mut conv = converter(&["a", "b", "r", "k"], &[]);
        let zero = Operand::Integer { value: 0 };
        conv.element_matrix(&[ids(&["a"])], (i64::MAX, "r"), (i64::MAX, "k"), &zero)
            .unwrap();
        assert_eq!(conv.sink().len(), 1);

        let tall = conv
            .element_matrix(&[ids(&["a"]), ids(&["b"])], (i64::MAX, "r"), (0, "k"), &zero)
            .unwrap_err();
        assert!(matches!(tall, ConvertError::IndexOverflow { .. }));

        let wide = conv
            .element_matrix(&[ids(&["a", "b"])], (0, "r"), (i64::MAX, "k"), &zero)
            .unwrap_err();
        assert!(matches!(wide, ConvertError::IndexOverflow { .. }));
        assert_eq!(conv.sink().len(), 1);
    }
}
