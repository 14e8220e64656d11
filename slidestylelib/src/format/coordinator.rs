//! Apply a list of rules to a table.
//!
//! This is the entry point that ties the pipeline together:
//!
//! 1. **Resolve**: every rule's column reference is looked up first, so an
//!    unknown column fails the whole call before any rule runs
//! 2. **Evaluate**: each rule produces attributes for its column's rows
//! 3. **Merge**: rules are folded in list order; for each cell a later
//!    rule's set fields replace earlier ones, unset fields keep them
//!
//! The result is a [`CellFormats`] map keyed by (row, column).

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::data::Table;
use crate::format::CellAttribute;
use crate::rules::{evaluate, Rule};
use crate::Result;

/// Options controlling how rules are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// First data row; rows before it are neither read nor styled
    pub start_row: usize,
}

impl FormatOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the first `row` rows (headers, for example).
    pub fn start_row(mut self, row: usize) -> Self {
        self.start_row = row;
        self
    }
}

/// One styled cell, as serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellFormat<'a> {
    pub row: usize,
    pub column: &'a str,
    #[serde(flatten)]
    pub attribute: &'a CellAttribute,
}

/// Attributes of every styled cell, keyed by (row, column position).
///
/// Cells no rule touched are absent. Iteration runs in row order, then
/// column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellFormats {
    columns: Vec<String>,
    cells: BTreeMap<(usize, usize), CellAttribute>,
}

impl CellFormats {
    fn new(table: &Table) -> Self {
        Self {
            columns: table.columns().iter().map(|c| c.name.clone()).collect(),
            cells: BTreeMap::new(),
        }
    }

    /// Attributes of the cell at `row` in column `name`.
    pub fn get(&self, row: usize, name: &str) -> Option<&CellAttribute> {
        let index = self.columns.iter().position(|c| c == name)?;
        self.cells.get(&(row, index))
    }

    /// Attributes of the cell at (`row`, column position `column`).
    pub fn get_at(&self, row: usize, column: usize) -> Option<&CellAttribute> {
        self.cells.get(&(row, column))
    }

    /// Styled cells in (row, column) order.
    pub fn entries(&self) -> impl Iterator<Item = CellFormat<'_>> {
        self.cells.iter().map(|(&(row, col), attribute)| CellFormat {
            row,
            column: &self.columns[col],
            attribute,
        })
    }

    /// Number of styled cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn overlay(&mut self, row: usize, column: usize, attribute: &CellAttribute) {
        if attribute.is_empty() {
            return;
        }
        self.cells
            .entry((row, column))
            .or_default()
            .merge(attribute);
    }
}

impl Serialize for CellFormats {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries())
    }
}

/// Apply `rules` to `table`, leaving rows before `start_row` untouched.
///
/// ```
/// use serde_json::json;
/// use slidestylelib::data::{Column, Table};
/// use slidestylelib::{apply, Rule};
///
/// let table = Table::new(vec![Column::numeric("margin", [0.12, -0.03, 0.25])]).unwrap();
/// let rules = vec![Rule::from_value(&json!({
///     "type": "highlight_cells", "column": "margin", "operator": "less_than", "value": 0
/// })).unwrap()];
///
/// let formats = apply(&table, &rules, 0).unwrap();
/// assert_eq!(formats.len(), 1);
/// assert_eq!(formats.get(1, "margin").unwrap().fill_color.unwrap().to_hex(), "FF0000");
/// ```
pub fn apply(table: &Table, rules: &[Rule], start_row: usize) -> Result<CellFormats> {
    apply_with(table, rules, &FormatOptions::new().start_row(start_row))
}

/// Apply `rules` to `table` with explicit options.
pub fn apply_with(table: &Table, rules: &[Rule], options: &FormatOptions) -> Result<CellFormats> {
    let positions = rules
        .iter()
        .map(|rule| table.position(rule.column()))
        .collect::<Result<Vec<_>>>()?;

    let mut formats = CellFormats::new(table);
    for (rule, position) in rules.iter().zip(positions) {
        let column = &table.columns()[position];
        let attrs = evaluate(rule, column, options.start_row);
        log::debug!(
            "{} on '{}': {} cells styled",
            rule.kind(),
            column.name,
            attrs.len()
        );
        for (row, attribute) in &attrs {
            formats.overlay(*row, position, attribute);
        }
    }
    Ok(formats)
}
