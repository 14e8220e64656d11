//! Error types for slidestylelib

use thiserror::Error;

/// Errors raised by color parsing, palette generation and rule evaluation.
///
/// Every variant is a caller or configuration mistake. Bad data inside an
/// otherwise valid table (missing or non-numeric cells) is never an error:
/// those cells are simply left without attributes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    /// Color text is not 3 or 6 hex digits (optionally prefixed by `#`)
    #[error("invalid color format '{0}': expected 6 or 3 hex digits")]
    InvalidColorFormat(String),

    /// A rule targets a column the table does not have
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Palette size is not valid for the requested mode
    #[error("unsupported palette count {count} for mode '{mode}'")]
    UnsupportedCount { count: usize, mode: String },

    /// Top/bottom rank out of range
    #[error("invalid rank {rank}: {message}")]
    InvalidRank { rank: i64, message: String },

    /// Rule type tag not recognized
    #[error("unknown rule type: {0}")]
    UnknownRuleType(String),

    /// Palette mode not recognized
    #[error("unknown palette mode: {0}")]
    UnknownMode(String),

    /// Comparison operator not recognized
    #[error("unknown comparison operator: {0}")]
    UnknownOperator(String),

    /// Named color scheme not found
    #[error("unknown color scheme: {0}")]
    UnknownScheme(String),

    /// Color scale stops are empty, out of range or unordered
    #[error("invalid color scale: {0}")]
    InvalidScale(String),

    /// A rule parameter is present but unusable
    #[error("invalid {rule} rule: {message}")]
    InvalidRule { rule: String, message: String },

    /// A required rule parameter is absent
    #[error("{rule} rule is missing required parameter '{name}'")]
    MissingParameter { rule: String, name: String },

    /// Table columns have different lengths
    #[error("column '{column}' has {found} values, expected {expected}")]
    RaggedTable {
        column: String,
        expected: usize,
        found: usize,
    },
}
