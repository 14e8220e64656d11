//! # slidestylelib
//!
//! Visual encoding for report tables: conditional formatting rules, color
//! scales and palettes, computed as plain data.
//!
//! ## Overview
//!
//! Report decks show the same tables over and over: regional P&L, margin
//! trends, top products. This library decides how each cell of such a table
//! should look. Given a [`Table`] and an ordered list of [`Rule`]s it
//! produces a [`CellFormats`] map of fill colors, font colors and data
//! bars. Rendering into a slide is left to the caller.
//!
//! The pipeline has four stages, each usable on its own:
//!
//! - **Color** ([`color`]): hex parsing, RGB/HSL conversion, scale
//!   interpolation, palette generation and named schemes
//! - **Data** ([`data`]): typed columns, cell values and number display
//! - **Rules** ([`rules`]): color scales, highlights, top/bottom ranking,
//!   data bars and icon sets, each evaluated over one column
//! - **Format** ([`format`]): resolving columns and merging rule output,
//!   later rules overriding earlier ones field by field
//!
//! Everything is synchronous and side-effect free. Diagnostics go through
//! the `log` facade; no logger is installed here.
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use slidestylelib::{apply, generate, Color, PaletteMode, Rule, Table};
//! use slidestylelib::data::Column;
//!
//! let table = Table::new(vec![
//!     Column::text("region", ["North", "South", "East", "West"]),
//!     Column::numeric("profit", [300000.0, 400000.0, 400000.0, 500000.0]),
//! ]).unwrap();
//!
//! let rules = Rule::from_values(&[
//!     json!({"type": "color_scale", "column": "profit",
//!            "min_color": "F8696B", "max_color": "63BE7B"}),
//!     json!({"type": "data_bar", "column": "profit"}),
//! ]).unwrap();
//!
//! let formats = apply(&table, &rules, 0).unwrap();
//! let north = formats.get(0, "profit").unwrap();
//! assert_eq!(north.fill_color.unwrap().to_hex(), "F8696B");
//! assert_eq!(north.bar_fraction, Some(0.0));
//!
//! let palette = generate(Color::parse("3C2F80").unwrap(), 5, PaletteMode::Analogous).unwrap();
//! assert_eq!(palette.len(), 5);
//! ```

pub mod color;
pub mod data;
pub mod error;
pub mod format;
pub mod rules;

pub use color::{
    generate, interpolate, scheme, scheme_names, Color, ColorScale, ColorStop, Hsl, Palette,
    PaletteCache, PaletteMode,
};
pub use data::{CellValue, Column, ColumnRef, ColumnType, NumberFormats, Table};
pub use error::StyleError;
pub use format::{apply, apply_with, CellAttribute, CellFormat, CellFormats, FormatOptions};
pub use rules::{evaluate, Comparison, Rule, RuleKind};

/// Result type for slidestylelib operations
pub type Result<T> = std::result::Result<T, StyleError>;
