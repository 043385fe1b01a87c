//! FILENAME: engine/src/sheet.rs
//! PURPOSE: The sparse cell table, its mutation protocol, cycle protection
//! and cache-invalidation cascade.
//! CONTEXT: `Sheet` owns every `Cell` and the `DependencyGraph` describing
//! the edges between their positions. Cells hold no references to each
//! other, so there is nothing here that needs lifetimes across cells.

use std::collections::{HashMap, HashSet};

use log::{debug, trace, warn};
use parser::Position;

use crate::cell::{Cell, CellValue};
use crate::dependency_graph::DependencyGraph;
use crate::error::SheetError;

/// The bounding rectangle of a sheet's occupied cells, anchored at (0, 0).
pub use parser::Size;

/// A sparse, position-addressed table of cells.
#[derive(Debug, Default)]
pub struct Sheet {
    cells: HashMap<Position, Cell>,
    graph: DependencyGraph,
    scope: Size,
}

impl Sheet {
    pub fn new() -> Sheet {
        Sheet::default()
    }

    /// Installs `text` at `pos`: parses it, materializes any newly-referenced
    /// cells, checks for a cycle, and — only on success — swaps the cell in
    /// and runs the invalidation cascade. A failure leaves the prior cell and
    /// dependency graph untouched, though `scope` and any newly-materialized
    /// empty cells from step 2 may persist (see crate design notes).
    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<(), SheetError> {
        self.grow_scope(pos);

        let cell = Cell::parse(text)?;

        let references = cell.references();
        for &referenced in &references {
            self.ensure_cell(referenced);
        }

        let new_precedents: HashSet<Position> = references.into_iter().collect();
        if self.graph.would_create_cycle(pos, &new_precedents) {
            warn!("rejected formula at {} ({:?}): would create a cycle", pos, text);
            return Err(SheetError::CircularDependency);
        }

        debug!("set_cell {} (formula: {})", pos, matches!(cell, Cell::Formula { .. }));
        self.graph.set_dependencies(pos, new_precedents);
        self.cells.insert(pos, cell);
        self.invalidate_cascade(pos);

        Ok(())
    }

    /// Removes the cell at `pos`, if any, detaching its forward edges first
    /// and running the invalidation cascade before the entry disappears.
    pub fn clear_cell(&mut self, pos: Position) {
        if !self.cells.contains_key(&pos) {
            return;
        }

        debug!("clear_cell {}", pos);
        self.graph.clear_dependencies(pos);
        self.invalidate_cascade(pos);
        self.cells.remove(&pos);

        if self.is_edge_position(pos) {
            self.recompute_scope();
        }
    }

    pub fn get_cell(&self, pos: Position) -> Option<CellView<'_>> {
        self.cells.get(&pos).map(|cell| CellView {
            cell,
            sheet: self,
            pos,
        })
    }

    pub fn printable_size(&self) -> Size {
        self.scope
    }

    pub fn print_values(&self, out: &mut impl std::io::Write) -> std::io::Result<()> {
        self.print_grid(out, |view| view.value().to_string())
    }

    pub fn print_texts(&self, out: &mut impl std::io::Write) -> std::io::Result<()> {
        self.print_grid(out, |view| view.text())
    }

    fn print_grid(
        &self,
        out: &mut impl std::io::Write,
        render: impl Fn(&CellView) -> String,
    ) -> std::io::Result<()> {
        for row in 0..self.scope.rows {
            for col in 0..self.scope.cols {
                if col > 0 {
                    write!(out, "\t")?;
                }
                let pos = Position::try_new(row, col).expect("within scope implies within bounds");
                if let Some(view) = self.get_cell(pos) {
                    write!(out, "{}", render(&view))?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn grow_scope(&mut self, pos: Position) {
        self.scope.rows = self.scope.rows.max(pos.row() + 1);
        self.scope.cols = self.scope.cols.max(pos.col() + 1);
    }

    fn ensure_cell(&mut self, pos: Position) {
        self.grow_scope(pos);
        self.cells.entry(pos).or_insert(Cell::Empty);
    }

    fn is_edge_position(&self, pos: Position) -> bool {
        pos.row() + 1 == self.scope.rows || pos.col() + 1 == self.scope.cols
    }

    fn recompute_scope(&mut self) {
        let mut rows = 0;
        let mut cols = 0;
        for pos in self.cells.keys() {
            rows = rows.max(pos.row() + 1);
            cols = cols.max(pos.col() + 1);
        }
        self.scope = Size::new(rows, cols);
    }

    /// Clears the memoized value of every position transitively reachable
    /// from `pos` along reverse edges. Unconditional: a text or empty cell
    /// with dependants still relays the cascade through itself, since
    /// invalidation is about *reachability*, not about whether the cell
    /// itself has anything cached.
    fn invalidate_cascade(&mut self, pos: Position) {
        let affected = self.graph.transitive_dependents(pos);
        trace!("invalidation cascade from {}: {} cell(s) touched", pos, affected.len());
        for affected_pos in affected {
            if let Some(cell) = self.cells.get(&affected_pos) {
                cell.invalidate();
            }
        }
    }
}

/// A read-only handle to a stored cell plus the sheet it lives in, so its
/// value can be (re)computed lazily.
pub struct CellView<'a> {
    cell: &'a Cell,
    sheet: &'a Sheet,
    pos: Position,
}

impl CellView<'_> {
    pub fn value(&self) -> CellValue {
        self.cell.value(self.sheet)
    }

    pub fn text(&self) -> String {
        self.cell.text()
    }

    pub fn referenced_cells(&self) -> Vec<Position> {
        self.cell.references()
    }

    pub fn is_referenced(&self) -> bool {
        self.sheet.graph.has_dependents(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        Position::parse(s).unwrap()
    }

    #[test]
    fn set_and_get_number() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "42").unwrap();
        assert_eq!(sheet.get_cell(pos("A1")).unwrap().value(), CellValue::Number(42.0));
        assert_eq!(sheet.get_cell(pos("A1")).unwrap().text(), "42");
    }

    #[test]
    fn set_and_get_escaped_text() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "'hello").unwrap();
        assert_eq!(sheet.get_cell(pos("A1")).unwrap().value(), CellValue::Text("hello".to_string()));
        assert_eq!(sheet.get_cell(pos("A1")).unwrap().text(), "'hello");
    }

    #[test]
    fn formula_recomputes_after_dependency_changes() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "1").unwrap();
        sheet.set_cell(pos("A2"), "2").unwrap();
        sheet.set_cell(pos("A3"), "=A1+A2").unwrap();
        assert_eq!(sheet.get_cell(pos("A3")).unwrap().value(), CellValue::Number(3.0));

        sheet.set_cell(pos("A1"), "10").unwrap();
        assert_eq!(sheet.get_cell(pos("A3")).unwrap().value(), CellValue::Number(12.0));
    }

    #[test]
    fn cycle_is_rejected_and_leaves_prior_cell_value_intact() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("B1"), "=B2").unwrap();
        let err = sheet.set_cell(pos("B2"), "=B1").unwrap_err();
        assert_eq!(err, SheetError::CircularDependency);
        // B2 was materialized empty as a side effect of installing B1's formula.
        assert_eq!(sheet.get_cell(pos("B1")).unwrap().value(), CellValue::Number(0.0));
    }

    #[test]
    fn division_by_zero_is_an_arithmetic_error() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("C1"), "=1/0").unwrap();
        assert_eq!(
            sheet.get_cell(pos("C1")).unwrap().value(),
            CellValue::Error(parser::FormulaError::Arithmetic)
        );
    }

    #[test]
    fn referencing_non_numeric_text_is_a_value_error() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("D1"), "hi").unwrap();
        sheet.set_cell(pos("D2"), "=D1+1").unwrap();
        assert_eq!(
            sheet.get_cell(pos("D2")).unwrap().value(),
            CellValue::Error(parser::FormulaError::Value)
        );
    }

    #[test]
    fn referencing_a_formula_cell_shares_its_cache() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "5").unwrap();
        sheet.set_cell(pos("A2"), "=A1*2").unwrap();
        sheet.set_cell(pos("A3"), "=A2+1").unwrap();
        assert_eq!(sheet.get_cell(pos("A3")).unwrap().value(), CellValue::Number(11.0));
    }

    #[test]
    fn clear_cell_shrinks_scope() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("B2"), "1").unwrap();
        assert_eq!(sheet.printable_size(), Size::new(2, 2));
        sheet.clear_cell(pos("B2"));
        assert_eq!(sheet.printable_size(), Size::new(0, 0));
    }

    #[test]
    fn clear_cell_invalidates_dependents() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "5").unwrap();
        sheet.set_cell(pos("A2"), "=A1+1").unwrap();
        assert_eq!(sheet.get_cell(pos("A2")).unwrap().value(), CellValue::Number(6.0));

        sheet.clear_cell(pos("A1"));
        assert_eq!(sheet.get_cell(pos("A2")).unwrap().value(), CellValue::Number(1.0));
    }

    #[test]
    fn get_cell_on_absent_position_is_none() {
        let sheet = Sheet::new();
        assert!(sheet.get_cell(pos("Z9")).is_none());
    }

    #[test]
    fn is_referenced_reflects_dependants() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "1").unwrap();
        assert!(!sheet.get_cell(pos("A1")).unwrap().is_referenced());
        sheet.set_cell(pos("A2"), "=A1").unwrap();
        assert!(sheet.get_cell(pos("A1")).unwrap().is_referenced());
    }

    #[test]
    fn print_values_and_texts_use_tabs_and_newlines() {
        let mut sheet = Sheet::new();
        sheet.set_cell(pos("A1"), "1").unwrap();
        sheet.set_cell(pos("B1"), "hello").unwrap();

        let mut values = Vec::new();
        sheet.print_values(&mut values).unwrap();
        assert_eq!(String::from_utf8(values).unwrap(), "1\thello\n");

        let mut texts = Vec::new();
        sheet.print_texts(&mut texts).unwrap();
        assert_eq!(String::from_utf8(texts).unwrap(), "1\thello\n");
    }
}
