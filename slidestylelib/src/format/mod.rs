//! Combining rule output into per-cell formatting.
//!
//! The coordinator resolves every rule's column, evaluates the rules in
//! order and overlays their attributes cell by cell.

pub mod attribute;
pub mod coordinator;

pub use attribute::CellAttribute;
pub use coordinator::{apply, apply_with, CellFormat, CellFormats, FormatOptions};
