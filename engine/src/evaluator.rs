//! FILENAME: engine/src/evaluator.rs
//! PURPOSE: Walks a formula AST against a `Sheet` to produce a number or a
//! `FormulaError`.
//!
//! Every value flowing into a binary operator is already finite (literals
//! are finite; a non-finite intermediate result is converted to
//! `FormulaError::Arithmetic` the step it's produced), so a single
//! post-operation finiteness check correctly implements both "division by
//! zero" and "general non-finite result" in one place.

use parser::{BinaryOperator, Expression, FormulaError, UnaryOperator};

use crate::cell::CellValue;
use crate::sheet::Sheet;

pub fn evaluate(expr: &Expression, sheet: &Sheet) -> Result<f64, FormulaError> {
    match expr {
        Expression::Number(n) => Ok(*n),

        Expression::CellRef(r) => {
            let pos = r.resolve().ok_or(FormulaError::Ref)?;
            match sheet.get_cell(pos) {
                None => Ok(0.0),
                Some(view) => match view.value() {
                    CellValue::Empty => Ok(0.0),
                    CellValue::Number(n) => Ok(n),
                    CellValue::Text(s) => s.trim().parse::<f64>().map_err(|_| FormulaError::Value),
                    CellValue::Error(e) => Err(e),
                },
            }
        }

        Expression::UnaryOp { op, operand } => {
            let v = evaluate(operand, sheet)?;
            Ok(match op {
                UnaryOperator::Negate => -v,
                UnaryOperator::Plus => v,
            })
        }

        Expression::BinaryOp { left, op, right } => {
            let l = evaluate(left, sheet)?;
            let r = evaluate(right, sheet)?;
            let result = match op {
                BinaryOperator::Add => l + r,
                BinaryOperator::Subtract => l - r,
                BinaryOperator::Multiply => l * r,
                BinaryOperator::Divide => l / r,
            };
            if result.is_finite() {
                Ok(result)
            } else {
                Err(FormulaError::Arithmetic)
            }
        }
    }
}
