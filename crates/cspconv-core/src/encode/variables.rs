//! Variable declarations.

use crate::error::{ConvertError, ConvertResult};
use crate::session::Converter;
use crate::types::Type;

impl Converter {
    /// Declare `id` over `min..=max`.
    ///
    /// Ranges inside `0..=1` become boolean variables; a collapsed range is
    /// fixed with an extra unconditional statement.
    pub fn declare_range(&mut self, id: &str, min: i64, max: i64) -> ConvertResult<()> {
        if min > max {
            return Err(ConvertError::EmptyDomain { id: id.to_string() });
        }

        if 0 <= min && max <= 1 {
            self.registry.declare(id, Type::Bool, id.to_string())?;
            self.sink.push(format!("(bool {id})"));
            if min == 1 {
                self.sink.push(id);
            }
            if max == 0 {
                self.sink.push(format!("(! {id})"));
            }
        } else {
            self.registry.declare(id, Type::Int, id.to_string())?;
            self.sink.push(format!("(int {id} {min} {max})"));
        }
        Ok(())
    }

    /// Declare `id` over an explicit value set, as an enumerated domain.
    pub fn declare_values(&mut self, id: &str, values: &[i64]) -> ConvertResult<()> {
        let mut values = values.to_vec();
        values.sort_unstable();
        values.dedup();

        let (Some(&lo), Some(&hi)) = (values.first(), values.last()) else {
            return Err(ConvertError::EmptyDomain { id: id.to_string() });
        };
        if 0 <= lo && hi <= 1 {
            return self.declare_range(id, lo, hi);
        }

        self.registry.declare(id, Type::Int, id.to_string())?;
        let listed: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        self.sink.push(format!("(int {id} ({}))", listed.join(" ")));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_range() {
        let mut conv = Converter::default();
        conv.declare_range("x", -3, 7).unwrap();
        assert_eq!(conv.sink().statements(), ["(int x -3 7)"]);
        assert_eq!(conv.registry().lookup("x").unwrap().ty, Type::Int);
    }

    #[test]
    fn test_bool_range() {
        let mut conv = Converter::default();
        conv.declare_range("b", 0, 1).unwrap();
        assert_eq!(conv.sink().statements(), ["(bool b)"]);
        assert_eq!(conv.registry().lookup("b").unwrap().ty, Type::Bool);
    }

    #[test]
    fn test_collapsed_bool_ranges() {
        let mut conv = Converter::default();
        conv.declare_range("t", 1, 1).unwrap();
        conv.declare_range("f", 0, 0).unwrap();
        assert_eq!(
            conv.sink().statements(),
            ["(bool t)", "t", "(bool f)", "(! f)"]
        );
    }

    #[test]
    fn test_empty_range() {
        let mut conv = Converter::default();
        let err = conv.declare_range("x", 4, 2).unwrap_err();
        assert!(matches!(err, ConvertError::EmptyDomain { id } if id == "x"));
        assert!(conv.sink().is_empty());
        assert!(!conv.registry().contains("x"));
    }

    #[test]
    fn test_enumerated_values() {
        let mut conv = Converter::default();
        conv.declare_values("v", &[9, 2, 5, 2]).unwrap();
        assert_eq!(conv.sink().statements(), ["(int v (2 5 9))"]);
    }

    #[test]
    fn test_zero_one_values_are_bool() {
        let mut conv = Converter::default();
        conv.declare_values("b", &[1, 0]).unwrap();
        conv.declare_values("t", &[1]).unwrap();
        assert_eq!(conv.sink().statements(), ["(bool b)", "(bool t)", "t"]);
    }

    #[test]
    fn test_empty_values() {
        let mut conv = Converter::default();
        assert!(matches!(
            conv.declare_values("e", &[]),
            Err(ConvertError::EmptyDomain { .. })
        ));
    }
}
