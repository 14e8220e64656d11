//! Conditional formatting rules and their evaluation.
//!
//! - **Rules**: typed rule kinds built from JSON or in code (`Rule`)
//! - **Parameters**: typed reads of a rule specification (`RuleParams`)
//! - **Evaluation**: one rule over one column (`evaluate`)
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use slidestylelib::data::Column;
//! use slidestylelib::rules::{evaluate, Rule};
//!
//! let rule = Rule::from_value(&json!({
//!     "type": "top_bottom", "column": "revenue", "rank": 1
//! })).unwrap();
//! let column = Column::numeric("revenue", [120.0, 340.0, 90.0]);
//!
//! let attrs = evaluate(&rule, &column, 0);
//! assert_eq!(attrs.keys().copied().collect::<Vec<_>>(), vec![1]);
//! ```

pub mod evaluate;
pub mod params;
pub mod rule;

pub use evaluate::{evaluate, RowAttributes};
pub use params::RuleParams;
pub use rule::{
    ColorScaleRule, Comparison, DataBarRule, HighlightRule, IconSetRule, Rule, RuleKind,
    TopBottomRule,
};
