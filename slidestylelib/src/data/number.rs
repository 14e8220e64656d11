//! Display formatting for table cells.
//!
//! Report tables show money, percentages and counts in a house style:
//! thousands separators, optional scaling to K/M/B, and negatives wrapped
//! in parentheses. [`NumberFormats`] holds those settings; every field has
//! a default so a partial JSON object is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::data::table::{CellValue, ColumnType};

/// Magnitude suffix applied to currency values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scaling {
    /// Thousands
    K,
    /// Millions
    M,
    /// Billions
    B,
}

impl Scaling {
    fn divisor(&self) -> f64 {
        match self {
            Scaling::K => 1e3,
            Scaling::M => 1e6,
            Scaling::B => 1e9,
        }
    }

    fn suffix(&self) -> &'static str {
        match self {
            Scaling::K => "K",
            Scaling::M => "M",
            Scaling::B => "B",
        }
    }
}

/// Currency display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub decimal_places: usize,
    pub show_symbol: bool,
    pub negative_in_parentheses: bool,
    pub scaling: Option<Scaling>,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            decimal_places: 0,
            show_symbol: true,
            negative_in_parentheses: true,
            scaling: None,
        }
    }
}

/// Percentage display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PercentageFormat {
    pub decimal_places: usize,
    pub show_symbol: bool,
    pub negative_in_parentheses: bool,
}

impl Default for PercentageFormat {
    fn default() -> Self {
        Self {
            decimal_places: 1,
            show_symbol: true,
            negative_in_parentheses: true,
        }
    }
}

/// Count display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountFormat {
    pub show_commas: bool,
    pub negative_in_parentheses: bool,
}

impl Default for CountFormat {
    fn default() -> Self {
        Self {
            show_commas: true,
            negative_in_parentheses: true,
        }
    }
}

/// Display settings per column type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormats {
    pub dollars: CurrencyFormat,
    pub percentages: PercentageFormat,
    pub counts: CountFormat,
}

impl NumberFormats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format a cell for display under its column type.
    ///
    /// Missing cells are empty. Text cells, and anything in a text column,
    /// are shown as-is.
    pub fn format(&self, value: &CellValue, kind: ColumnType) -> String {
        let number = match value {
            CellValue::Missing => return String::new(),
            CellValue::Text(s) => return s.clone(),
            CellValue::Number(v) => *v,
        };

        if !number.is_finite() {
            return String::new();
        }

        match kind {
            ColumnType::Text | ColumnType::Numeric => value.to_string(),
            ColumnType::Currency => self.format_currency(number),
            ColumnType::Percentage => self.format_percentage(number),
            ColumnType::Count => self.format_count(number),
        }
    }

    fn format_currency(&self, value: f64) -> String {
        let cfg = &self.dollars;
        let (value, suffix) = match cfg.scaling {
            Some(scaling) if value.abs() >= scaling.divisor() => {
                (value / scaling.divisor(), scaling.suffix())
            }
            _ => (value, ""),
        };

        let symbol = if cfg.show_symbol { "$" } else { "" };
        let body = group_thousands(value.abs(), cfg.decimal_places);
        if value < 0.0 && cfg.negative_in_parentheses {
            format!("{}({}){}", symbol, body, suffix)
        } else if value < 0.0 {
            format!("{}-{}{}", symbol, body, suffix)
        } else {
            format!("{}{}{}", symbol, body, suffix)
        }
    }

    fn format_percentage(&self, value: f64) -> String {
        let cfg = &self.percentages;
        let value = if value.abs() <= 1.0 { value * 100.0 } else { value };

        let body = group_thousands(value.abs(), cfg.decimal_places);
        let body = if value < 0.0 && cfg.negative_in_parentheses {
            format!("({})", body)
        } else if value < 0.0 {
            format!("-{}", body)
        } else {
            body
        };

        if cfg.show_symbol {
            format!("{}%", body)
        } else {
            body
        }
    }

    fn format_count(&self, value: f64) -> String {
        let cfg = &self.counts;
        let value = value.round();

        let body = if cfg.show_commas {
            group_thousands(value.abs(), 0)
        } else {
            format!("{:.0}", value.abs())
        };

        if value < 0.0 && cfg.negative_in_parentheses {
            format!("({})", body)
        } else if value < 0.0 {
            format!("-{}", body)
        } else {
            body
        }
    }
}

/// Format a non-negative number with `decimals` places and comma separators.
fn group_thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}.{}", grouped, frac),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(value: f64, kind: ColumnType) -> String {
        NumberFormats::default().format(&CellValue::Number(value), kind)
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0, 0), "0");
        assert_eq!(group_thousands(999.0, 0), "999");
        assert_eq!(group_thousands(1000.0, 0), "1,000");
        assert_eq!(group_thousands(1234567.891, 2), "1,234,567.89");
    }

    #[test]
    fn test_currency_defaults() {
        assert_eq!(fmt(300000.0, ColumnType::Currency), "$300,000");
        assert_eq!(fmt(-1500.0, ColumnType::Currency), "$(1,500)");
    }

    #[test]
    fn test_currency_scaling() {
        let mut formats = NumberFormats::default();
        formats.dollars.scaling = Some(Scaling::K);
        formats.dollars.decimal_places = 1;
        let value = CellValue::Number(12_500.0);
        assert_eq!(formats.format(&value, ColumnType::Currency), "$12.5K");
        let small = CellValue::Number(950.0);
        assert_eq!(formats.format(&small, ColumnType::Currency), "$950.0");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(fmt(0.125, ColumnType::Percentage), "12.5%");
        assert_eq!(fmt(45.0, ColumnType::Percentage), "45.0%");
        assert_eq!(fmt(-0.05, ColumnType::Percentage), "(5.0)%");
    }

    #[test]
    fn test_count() {
        assert_eq!(fmt(1234.4, ColumnType::Count), "1,234");
        assert_eq!(fmt(-20.0, ColumnType::Count), "(20)");

        let mut formats = NumberFormats::default();
        formats.counts.show_commas = false;
        formats.counts.negative_in_parentheses = false;
        assert_eq!(formats.format(&CellValue::Number(-1234.0), ColumnType::Count), "-1234");
    }

    #[test]
    fn test_text_and_missing() {
        let formats = NumberFormats::default();
        assert_eq!(formats.format(&CellValue::Missing, ColumnType::Currency), "");
        assert_eq!(formats.format(&CellValue::from("n/a"), ColumnType::Count), "n/a");
        assert_eq!(formats.format(&CellValue::Number(2.5), ColumnType::Numeric), "2.5");
    }

    #[test]
    fn test_partial_config_from_json() {
        let formats: NumberFormats =
            serde_json::from_str(r#"{"dollars": {"scaling": "M"}}"#).unwrap();
        assert_eq!(formats.dollars.scaling, Some(Scaling::M));
        assert!(formats.dollars.show_symbol);
        assert_eq!(formats.percentages.decimal_places, 1);
    }
}
