//! FILENAME: engine/src/error.rs
//! PURPOSE: Mutation-time error type for `Sheet` operations.
//!
//! Distinct from `parser::FormulaError`: that type is evaluation-time data
//! carried inside `CellValue::Error`, never an `Err` the host must handle.

use parser::ParseError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    #[error("could not parse formula: {0}")]
    Parse(#[from] ParseError),

    #[error("formula would create a circular dependency")]
    CircularDependency,
}
