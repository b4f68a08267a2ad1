use cspconv_core::{convert_tree, Converter, Type, TypedExpr, VariableRegistry};
use cspconv_model::{Node, Order, TupleValue};
use proptest::prelude::*;

fn ints(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("x{i}")).collect()
}

fn converter_with(names: &[String]) -> Converter {
    let mut conv = Converter::default();
    for name in names {
        conv.declare_range(name, -5, 5).unwrap();
    }
    conv
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn constants_convert_to_decimal_ints(c in any::<i64>()) {
        let reg = VariableRegistry::new();
        let e = convert_tree(&Node::constant(c), &reg).unwrap();
        prop_assert_eq!(e, TypedExpr::new(c.to_string(), Type::Int));
    }

    #[test]
    fn coercion_is_idempotent(text in "[a-z][a-z0-9_]{0,8}", is_bool in any::<bool>()) {
        let ty = if is_bool { Type::Bool } else { Type::Int };
        let e = TypedExpr::new(text, ty);
        prop_assert_eq!(e.as_int().as_int(), e.as_int());
        prop_assert_eq!(e.as_bool().as_bool(), e.as_bool());
        prop_assert_eq!(e.as_type(Type::Int).ty, Type::Int);
        prop_assert_eq!(e.as_type(Type::Bool).ty, Type::Bool);
    }

    #[test]
    fn bool_to_int_wraps_in_if(text in "[a-z]{1,6}") {
        let e = TypedExpr::new(text.clone(), Type::Bool).as_int();
        prop_assert_eq!(e.text, format!("(if {text} 1 0)"));
    }

    #[test]
    fn ordered_emits_one_statement_per_adjacent_pair(n in 0usize..12) {
        let list = ints(n);
        let mut conv = converter_with(&list);
        let before = conv.sink().len();
        conv.ordered(&list, Order::Le).unwrap();
        prop_assert_eq!(conv.sink().len() - before, n.saturating_sub(1));
    }

    #[test]
    fn matrix_all_different_emits_rows_plus_columns(rows in 1usize..6, cols in 0usize..6) {
        let cells = ints(rows * cols);
        let matrix: Vec<Vec<String>> = (0..rows)
            .map(|r| cells[r * cols..(r + 1) * cols].to_vec())
            .collect();
        let mut conv = converter_with(&cells);
        let before = conv.sink().len();
        conv.all_different_matrix(&matrix).unwrap();
        prop_assert_eq!(conv.sink().len() - before, rows + cols);
    }

    #[test]
    fn wildcard_free_tables_emit_one_statement(
        table in prop::collection::vec(prop::collection::vec(-3i64..3, 3), 0..8),
        support in any::<bool>(),
    ) {
        let list = ints(3);
        let mut conv = converter_with(&list);
        let before = conv.sink().len();
        let tuples: Vec<Vec<TupleValue>> = table
            .iter()
            .map(|row| row.iter().copied().map(TupleValue::Value).collect())
            .collect();
        conv.extension(&list, &tuples, support).unwrap();
        prop_assert_eq!(conv.sink().len() - before, 1);
    }

    #[test]
    fn regular_declares_one_trace_variable_per_symbol(n in 1usize..8) {
        let list = ints(n);
        let mut conv = converter_with(&list);
        let before = conv.sink().len();
        conv.regular(
            &list,
            "a",
            &["b".to_string()],
            &[
                cspconv_model::Transition::new("a", "b", 0),
                cspconv_model::Transition::new("b", "b", 1),
            ],
        )
        .unwrap();
        let emitted = &conv.sink().statements()[before..];
        prop_assert_eq!(emitted.len(), 2 * n);
        prop_assert!(emitted[..n].iter().all(|s| s.starts_with("(int converter_aux_var_")));
        prop_assert!(emitted[n - 1].ends_with(" (1))"));
    }
}
