//! Typed access to a rule's named parameters.
//!
//! Rule specifications arrive as a JSON object: a `"type"` tag plus named
//! parameters. [`RuleParams`] reads those parameters with the right error
//! for each failure: a malformed color reports
//! [`StyleError::InvalidColorFormat`], a wrong JSON type reports
//! [`StyleError::InvalidRule`], and an absent required key reports
//! [`StyleError::MissingParameter`]. Keys a rule does not know are ignored.

use serde_json::{Map, Value};

use crate::color::Color;
use crate::data::ColumnRef;
use crate::error::StyleError;
use crate::Result;

/// Parameters of one rule specification.
#[derive(Debug, Clone, Copy)]
pub struct RuleParams<'a> {
    rule: &'a str,
    map: &'a Map<String, Value>,
}

impl<'a> RuleParams<'a> {
    pub fn new(rule: &'a str, map: &'a Map<String, Value>) -> Self {
        Self { rule, map }
    }

    /// Present and not `null`.
    fn get(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name).filter(|v| !v.is_null())
    }

    fn invalid(&self, name: &str, expected: &str, found: &Value) -> StyleError {
        StyleError::InvalidRule {
            rule: self.rule.to_string(),
            message: format!("parameter '{}' must be {}, got {}", name, expected, found),
        }
    }

    fn missing(&self, name: &str) -> StyleError {
        StyleError::MissingParameter {
            rule: self.rule.to_string(),
            name: name.to_string(),
        }
    }

    /// The required `column` parameter: a name or a zero-based index.
    pub fn column(&self) -> Result<ColumnRef> {
        match self.get("column") {
            Some(Value::String(name)) => Ok(ColumnRef::Name(name.clone())),
            Some(other) => other
                .as_u64()
                .map(|i| ColumnRef::Index(i as usize))
                .ok_or_else(|| self.invalid("column", "a name or a non-negative index", other)),
            None => Err(self.missing("column")),
        }
    }

    pub fn color(&self, name: &str) -> Result<Option<Color>> {
        match self.get(name) {
            Some(Value::String(text)) => Color::parse(text).map(Some),
            Some(other) => Err(self.invalid(name, "a hex color string", other)),
            None => Ok(None),
        }
    }

    pub fn color_or(&self, name: &str, default: Color) -> Result<Color> {
        Ok(self.color(name)?.unwrap_or(default))
    }

    pub fn number(&self, name: &str) -> Result<Option<f64>> {
        match self.get(name) {
            Some(other) => other
                .as_f64()
                .map(Some)
                .ok_or_else(|| self.invalid(name, "a number", other)),
            None => Ok(None),
        }
    }

    pub fn number_or(&self, name: &str, default: f64) -> Result<f64> {
        Ok(self.number(name)?.unwrap_or(default))
    }

    pub fn required_number(&self, name: &str) -> Result<f64> {
        self.number(name)?.ok_or_else(|| self.missing(name))
    }

    pub fn integer_or(&self, name: &str, default: i64) -> Result<i64> {
        match self.get(name) {
            Some(other) => other
                .as_i64()
                .ok_or_else(|| self.invalid(name, "an integer", other)),
            None => Ok(default),
        }
    }

    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool> {
        match self.get(name) {
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(self.invalid(name, "true or false", other)),
            None => Ok(default),
        }
    }

    pub fn string(&self, name: &str) -> Result<Option<&'a str>> {
        match self.get(name) {
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.invalid(name, "a string", other)),
            None => Ok(None),
        }
    }

    pub fn number_list(&self, name: &str) -> Result<Option<Vec<f64>>> {
        match self.get(name) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_f64()
                        .ok_or_else(|| self.invalid(name, "a list of numbers", item))
                })
                .collect::<Result<Vec<_>>>()
                .map(Some),
            Some(other) => Err(self.invalid(name, "a list of numbers", other)),
            None => Ok(None),
        }
    }

    pub fn color_list(&self, name: &str) -> Result<Option<Vec<Color>>> {
        match self.get(name) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(text) => Color::parse(text),
                    other => Err(self.invalid(name, "a list of hex color strings", other)),
                })
                .collect::<Result<Vec<_>>>()
                .map(Some),
            Some(other) => Err(self.invalid(name, "a list of hex color strings", other)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_column_by_name_or_index() {
        let m = map(json!({"column": "revenue"}));
        assert_eq!(RuleParams::new("data_bar", &m).column().unwrap(), ColumnRef::from("revenue"));

        let m = map(json!({"column": 2}));
        assert_eq!(RuleParams::new("data_bar", &m).column().unwrap(), ColumnRef::Index(2));

        let m = map(json!({"column": -1}));
        assert!(matches!(
            RuleParams::new("data_bar", &m).column(),
            Err(StyleError::InvalidRule { .. })
        ));

        let m = map(json!({}));
        assert_eq!(
            RuleParams::new("data_bar", &m).column().unwrap_err(),
            StyleError::MissingParameter {
                rule: "data_bar".to_string(),
                name: "column".to_string()
            }
        );
    }

    #[test]
    fn test_color_errors_keep_their_kind() {
        let m = map(json!({"color": "XYZ123", "other": 5}));
        let params = RuleParams::new("highlight_cells", &m);
        assert_eq!(
            params.color("color").unwrap_err(),
            StyleError::InvalidColorFormat("XYZ123".to_string())
        );
        assert!(matches!(params.color("other"), Err(StyleError::InvalidRule { .. })));
        assert_eq!(params.color("absent").unwrap(), None);
    }

    #[test]
    fn test_null_counts_as_absent() {
        let m = map(json!({"mid_color": null, "top": null}));
        let params = RuleParams::new("color_scale", &m);
        assert_eq!(params.color("mid_color").unwrap(), None);
        assert!(params.bool_or("top", true).unwrap());
    }

    #[test]
    fn test_lists() {
        let m = map(json!({"thresholds": [10, 50.5], "colors": ["F00", "00FF00"]}));
        let params = RuleParams::new("icon_set", &m);
        assert_eq!(params.number_list("thresholds").unwrap(), Some(vec![10.0, 50.5]));
        assert_eq!(
            params.color_list("colors").unwrap(),
            Some(vec![Color::rgb(255, 0, 0), Color::rgb(0, 255, 0)])
        );

        let m = map(json!({"thresholds": [10, "x"]}));
        assert!(RuleParams::new("icon_set", &m).number_list("thresholds").is_err());
    }

    #[test]
    fn test_integer_rejects_fractions() {
        let m = map(json!({"rank": 2.5}));
        assert!(RuleParams::new("top_bottom", &m).integer_or("rank", 10).is_err());
        let m = map(json!({}));
        assert_eq!(RuleParams::new("top_bottom", &m).integer_or("rank", 10).unwrap(), 10);
    }
}
