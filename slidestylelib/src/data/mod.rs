//! Table data: the input the rules run against.
//!
//! - **Table**: named, typed columns of equal length (`Table`, `Column`)
//! - **Cells**: numbers, display text or missing values (`CellValue`)
//! - **Display**: house-style formatting of numeric cells (`NumberFormats`)
//!
//! ## Example
//!
//! ```rust
//! use slidestylelib::data::{Column, ColumnType, NumberFormats, Table};
//!
//! let table = Table::new(vec![
//!     Column::text("region", ["North", "South"]),
//!     Column::numeric("revenue", [1250.0, -80.0]).with_kind(ColumnType::Currency),
//! ]).unwrap();
//!
//! let formats = NumberFormats::default();
//! let cell = table.cell(1, "revenue").unwrap();
//! assert_eq!(formats.format(cell, ColumnType::Currency), "$(80)");
//! ```

pub mod number;
pub mod table;

pub use number::{CountFormat, CurrencyFormat, NumberFormats, PercentageFormat, Scaling};
pub use table::{CellValue, Column, ColumnRef, ColumnType, Table};
