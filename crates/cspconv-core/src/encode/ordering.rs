//! Ordering and all-different constraints.

use super::nary;
use crate::error::{ConvertError, ConvertResult};
use crate::session::Converter;
use crate::tree::convert_tree;
use cspconv_model::{Node, Order};

fn order_symbol(order: Order) -> &'static str {
    match order {
        Order::Lt => "<",
        Order::Le => "<=",
        Order::Gt => ">",
        Order::Ge => ">=",
    }
}

impl Converter {
    /// One comparison per adjacent pair of `list`.
    pub fn ordered(&mut self, list: &[String], order: Order) -> ConvertResult<()> {
        let terms = self.registry.int_texts(list)?;
        let op = order_symbol(order);
        for pair in terms.windows(2) {
            self.sink.push(format!("({op} {} {})", pair[0], pair[1]));
        }
        Ok(())
    }

    pub fn all_different(&mut self, list: &[String]) -> ConvertResult<()> {
        let terms = self.registry.int_texts(list)?;
        self.sink.push(nary("alldifferent", &terms));
        Ok(())
    }

    /// All-different over integer expressions.
    pub fn all_different_exprs(&mut self, list: &[Node]) -> ConvertResult<()> {
        let terms = list
            .iter()
            .map(|tree| Ok(convert_tree(tree, &self.registry)?.as_int().into_text()))
            .collect::<ConvertResult<Vec<_>>>()?;
        self.sink.push(nary("alldifferent", &terms));
        Ok(())
    }

    /// All-different on every row, then on every column.
    pub fn all_different_matrix(&mut self, matrix: &[Vec<String>]) -> ConvertResult<()> {
        let Some(first) = matrix.first() else {
            return Ok(());
        };
        let n_col = first.len();
        if let Some((row, found)) = matrix
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != n_col)
            .map(|(i, r)| (i, r.len()))
        {
            return Err(ConvertError::JaggedMatrix {
                row,
                expected: n_col,
                found,
            });
        }

        let cells = matrix
            .iter()
            .map(|row| self.registry.int_texts(row))
            .collect::<ConvertResult<Vec<_>>>()?;

        for row in &cells {
            self.sink.push(nary("alldifferent", row));
        }
        for x in 0..n_col {
            self.sink
                .push(nary("alldifferent", cells.iter().map(|row| &row[x])));
        }
        Ok(())
    }
}
