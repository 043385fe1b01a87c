//! FILENAME: engine/src/lib.rs
//! PURPOSE: Main library entry point for the spreadsheet engine.
//! CONTEXT: Re-exports public types for use by the `cli` crate.

pub mod cell;
pub mod dependency_graph;
pub mod error;
pub mod evaluator;
pub mod sheet;

pub use cell::{Cell, CellValue};
pub use dependency_graph::DependencyGraph;
pub use error::SheetError;
pub use parser::{FormulaError, Position, Size};
pub use sheet::{CellView, Sheet};
