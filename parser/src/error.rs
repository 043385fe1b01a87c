//! `FormulaError` is evaluation-time data, not a control-flow exception: it
//! flows through `Result<f64, FormulaError>` during evaluation and surfaces
//! to the host only as `CellValue::Error`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaError {
    /// A formula referenced a position that does not resolve (out of bounds).
    Ref,
    /// A referenced value could not be interpreted as a number.
    Value,
    /// Division by zero or a non-finite arithmetic result.
    Arithmetic,
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormulaError::Ref => "#REF!",
            FormulaError::Value => "#VALUE!",
            FormulaError::Arithmetic => "#ARITHM!",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(FormulaError::Ref.to_string(), "#REF!");
        assert_eq!(FormulaError::Value.to_string(), "#VALUE!");
        assert_eq!(FormulaError::Arithmetic.to_string(), "#ARITHM!");
    }
}
