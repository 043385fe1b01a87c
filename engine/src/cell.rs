//! FILENAME: engine/src/cell.rs
//! PURPOSE: Defines the fundamental data structures for a single spreadsheet cell.
//! CONTEXT: Separates the user's raw input from its interpreted value. A cell
//! holds no pointers to other cells — all graph edges live in `Sheet`'s
//! `DependencyGraph`, keyed by position.

use std::cell::RefCell;

use parser::{parse, Expression, FormulaError, ParseError, Position};

const ESCAPE_SIGN: char = '\'';
const FORMULA_SIGN: char = '=';

/// The calculated or literal result held by a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Error(FormulaError),
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", parser::ast::format_number(*n)),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Error(e) => write!(f, "{}", e),
        }
    }
}

/// The content a cell can hold. Formulas cache their evaluated result.
#[derive(Debug, Clone)]
pub enum Cell {
    Empty,
    Text(String),
    Formula {
        source: String,
        expr: Expression,
        cache: RefCell<Option<Result<f64, FormulaError>>>,
    },
}

impl Cell {
    /// Builds a tentative, uninstalled cell from raw input text.
    pub fn parse(text: &str) -> Result<Cell, ParseError> {
        if text.is_empty() {
            return Ok(Cell::Empty);
        }
        if text.starts_with(ESCAPE_SIGN) {
            return Ok(Cell::Text(text.to_string()));
        }
        if text.starts_with(FORMULA_SIGN) && text.len() > 1 {
            let body = &text[1..];
            let expr = parse(body)?;
            return Ok(Cell::Formula {
                source: text.to_string(),
                expr,
                cache: RefCell::new(None),
            });
        }
        Ok(Cell::Text(text.to_string()))
    }

    /// The textual form this cell was (or would have been) set from.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Formula { expr, .. } => format!("{}{}", FORMULA_SIGN, expr.print()),
        }
    }

    /// Forward references, for installing this cell's dependency edges.
    pub fn references(&self) -> Vec<Position> {
        match self {
            Cell::Empty | Cell::Text(_) => Vec::new(),
            Cell::Formula { expr, .. } => expr.references(),
        }
    }

    /// Clears a formula's memoized result. A no-op for non-formula cells.
    pub fn invalidate(&self) {
        if let Cell::Formula { cache, .. } = self {
            *cache.borrow_mut() = None;
        }
    }

    /// The interpreted value, evaluating and memoizing a formula's result on
    /// first access.
    pub fn value(&self, sheet: &crate::sheet::Sheet) -> CellValue {
        match self {
            Cell::Empty => CellValue::Empty,
            Cell::Text(s) => text_value(s),
            Cell::Formula { expr, cache, .. } => {
                if cache.borrow().is_none() {
                    let result = crate::evaluator::evaluate(expr, sheet);
                    *cache.borrow_mut() = Some(result);
                }
                match cache.borrow().clone().expect("just populated above") {
                    Ok(n) => CellValue::Number(n),
                    Err(e) => CellValue::Error(e),
                }
            }
        }
    }
}

/// Interprets a `Text` cell's stored string per the narrow numeric rule: the
/// escape character strips to a literal string, a non-empty run of ASCII
/// digits becomes a number, anything else stays text. This is deliberately
/// narrower than the broad reparse the evaluator applies when a formula
/// dereferences a text cell — see the crate's design notes.
fn text_value(s: &str) -> CellValue {
    if let Some(stripped) = s.strip_prefix(ESCAPE_SIGN) {
        CellValue::Text(stripped.to_string())
    } else if is_narrow_number(s) {
        CellValue::Number(s.parse().expect("is_narrow_number guarantees this parses"))
    } else {
        CellValue::Text(s.to_string())
    }
}

fn is_narrow_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Sheet;

    #[test]
    fn empty_text_parses_to_empty_cell() {
        assert!(matches!(Cell::parse("").unwrap(), Cell::Empty));
    }

    #[test]
    fn escaped_text_strips_leading_quote_in_value_only() {
        let cell = Cell::parse("'hello").unwrap();
        assert_eq!(cell.text(), "'hello");
        let sheet = Sheet::new();
        assert_eq!(cell.value(&sheet), CellValue::Text("hello".to_string()));
    }

    #[test]
    fn digit_only_text_becomes_a_number() {
        let cell = Cell::parse("42").unwrap();
        let sheet = Sheet::new();
        assert_eq!(cell.value(&sheet), CellValue::Number(42.0));
    }

    #[test]
    fn decimal_text_stays_text() {
        let cell = Cell::parse("3.14").unwrap();
        let sheet = Sheet::new();
        assert_eq!(cell.value(&sheet), CellValue::Text("3.14".to_string()));
    }

    #[test]
    fn bare_equals_sign_is_plain_text() {
        let cell = Cell::parse("=").unwrap();
        assert!(matches!(cell, Cell::Text(_)));
        assert_eq!(cell.text(), "=");
    }

    #[test]
    fn formula_parse_error_does_not_build_a_cell() {
        assert!(Cell::parse("=1+").is_err());
    }

    #[test]
    fn formula_text_roundtrips_through_canonical_print() {
        let cell = Cell::parse("=1+2*3").unwrap();
        assert_eq!(cell.text(), "=1+2*3");
    }
}
