//! The rectangular table that rules are evaluated against.
//!
//! A [`Table`] is an ordered list of named [`Column`]s, all the same
//! length. The row index is the shared key across columns. Cells keep
//! whatever the caller handed over (numbers, display text, or nothing);
//! numeric rules read them through [`CellValue::as_number`], which also
//! understands display text such as `"$1,250"`, `"12.5%"` or `"(300)"`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StyleError;
use crate::Result;

/// Declared semantic type of a column.
///
/// Drives how cells are displayed; numeric rules do not depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Plain number
    #[default]
    Numeric,
    /// Free text
    Text,
    /// Money amount
    Currency,
    /// Ratio or percentage
    Percentage,
    /// Whole count
    Count,
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// A numeric value
    Number(f64),
    /// Text, possibly a formatted number
    Text(String),
    /// No value
    #[default]
    Missing,
}

impl CellValue {
    /// Numeric reading of the cell, if it has one.
    ///
    /// Numbers must be finite. Text is trimmed, stripped of `$`, `,` and
    /// `%`, and an accounting negative `(x)` reads as `-x`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) if v.is_finite() => Some(*v),
            CellValue::Number(_) => None,
            CellValue::Text(text) => parse_numeric_text(text),
            CellValue::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Missing => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Number(v as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Missing)
    }
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let (negative, body) = match trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };

    let cleaned: String = body
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%'))
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// A named, typed column of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ColumnType,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnType, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Column of plain numbers.
    pub fn numeric(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(
            name,
            ColumnType::Numeric,
            values.into_iter().map(CellValue::Number).collect(),
        )
    }

    /// Column of text cells.
    pub fn text<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            name,
            ColumnType::Text,
            values.into_iter().map(|s| CellValue::Text(s.into())).collect(),
        )
    }

    /// Builder: set the column type.
    pub fn with_kind(mut self, kind: ColumnType) -> Self {
        self.kind = kind;
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// How a rule names its target column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    /// Zero-based column position
    Index(usize),
    /// Column name
    Name(String),
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRef::Index(i) => write!(f, "#{}", i),
            ColumnRef::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::Name(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        ColumnRef::Name(name)
    }
}

impl From<usize> for ColumnRef {
    fn from(index: usize) -> Self {
        ColumnRef::Index(index)
    }
}

/// Ordered columns of equal length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "TableData", into = "TableData")]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

/// Wire form of a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableData {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, checking that all columns have the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != rows) {
            return Err(StyleError::RaggedTable {
                column: bad.name.clone(),
                expected: rows,
                found: bad.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Position of a referenced column, failing with [`StyleError::UnknownColumn`].
    pub fn position(&self, column: &ColumnRef) -> Result<usize> {
        let found = match column {
            ColumnRef::Name(name) => self.columns.iter().position(|c| &c.name == name),
            ColumnRef::Index(i) => Some(*i).filter(|i| *i < self.columns.len()),
        };
        found.ok_or_else(|| StyleError::UnknownColumn(column.to_string()))
    }

    /// Resolve a column reference, failing with [`StyleError::UnknownColumn`].
    pub fn resolve(&self, column: &ColumnRef) -> Result<&Column> {
        let index = self.position(column)?;
        Ok(&self.columns[index])
    }

    /// Cell at (`row`, column `name`).
    pub fn cell(&self, row: usize, name: &str) -> Option<&CellValue> {
        self.column(name).and_then(|c| c.values.get(row))
    }
}

impl TryFrom<TableData> for Table {
    type Error = StyleError;

    fn try_from(data: TableData) -> Result<Self> {
        Table::new(data.columns)
    }
}

impl From<Table> for TableData {
    fn from(table: Table) -> Self {
        TableData {
            columns: table.columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_number_plain_and_text() {
        assert_eq!(CellValue::Number(4.5).as_number(), Some(4.5));
        assert_eq!(CellValue::from("$1,250").as_number(), Some(1250.0));
        assert_eq!(CellValue::from(" 12.5% ").as_number(), Some(12.5));
        assert_eq!(CellValue::from("($300)").as_number(), Some(-300.0));
        assert_eq!(CellValue::from("-7").as_number(), Some(-7.0));
    }

    #[test]
    fn test_as_number_rejects_non_numeric() {
        assert_eq!(CellValue::from("n/a").as_number(), None);
        assert_eq!(CellValue::from("").as_number(), None);
        assert_eq!(CellValue::from("$").as_number(), None);
        assert_eq!(CellValue::from("NaN").as_number(), None);
        assert_eq!(CellValue::Number(f64::INFINITY).as_number(), None);
        assert_eq!(CellValue::Missing.as_number(), None);
    }

    #[test]
    fn test_table_rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::numeric("a", [1.0, 2.0]),
            Column::numeric("b", [1.0]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            StyleError::RaggedTable {
                column: "b".to_string(),
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_resolve_by_name_and_index() {
        let table = Table::new(vec![
            Column::text("region", ["North", "South"]),
            Column::numeric("revenue", [1.0, 2.0]),
        ])
        .unwrap();
        assert_eq!(table.resolve(&"revenue".into()).unwrap().name, "revenue");
        assert_eq!(table.resolve(&ColumnRef::Index(0)).unwrap().name, "region");
        assert_eq!(
            table.resolve(&"profit".into()).unwrap_err(),
            StyleError::UnknownColumn("profit".to_string())
        );
        assert!(table.resolve(&ColumnRef::Index(2)).is_err());
        assert_eq!(table.position(&"revenue".into()).unwrap(), 1);
        assert_eq!(table.cell(1, "region"), Some(&CellValue::from("South")));
    }

    #[test]
    fn test_table_from_json() {
        let json = r#"{"columns": [
            {"name": "region", "type": "text", "values": ["North", null]},
            {"name": "revenue", "type": "currency", "values": [100, "$2,000"]}
        ]}"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns()[1].kind, ColumnType::Currency);
        assert_eq!(table.cell(1, "region"), Some(&CellValue::Missing));
        assert_eq!(table.cell(1, "revenue").unwrap().as_number(), Some(2000.0));
    }

    #[test]
    fn test_table_from_json_checks_lengths() {
        let json = r#"{"columns": [
            {"name": "a", "values": [1, 2]},
            {"name": "b", "values": [1]}
        ]}"#;
        assert!(serde_json::from_str::<Table>(json).is_err());
    }
}
