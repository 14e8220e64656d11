//! Conditional formatting rules.
//!
//! A [`Rule`] is pure configuration: a target column plus the parameters
//! of one of a closed set of rule kinds. Rules are built either in code
//! through the per-kind constructors, or from a JSON rule specification
//! with [`Rule::from_value`]:
//!
//! ```json
//! {"type": "top_bottom", "column": "revenue", "top": true, "rank": 3}
//! ```
//!
//! Parameters are validated when the rule is built, so evaluating a rule
//! against a table cannot fail.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::color::{Color, ColorScale};
use crate::data::ColumnRef;
use crate::error::StyleError;
use crate::rules::params::RuleParams;
use crate::Result;

/// Default low end of a color scale (green).
pub const DEFAULT_SCALE_MIN: Color = Color::rgb(0x63, 0xBE, 0x7B);
/// Default high end of a color scale (red).
pub const DEFAULT_SCALE_MAX: Color = Color::rgb(0xF8, 0x69, 0x6B);
/// Default highlight fill (red).
pub const DEFAULT_HIGHLIGHT: Color = Color::rgb(0xFF, 0x00, 0x00);
/// Default top/bottom fill (green).
pub const DEFAULT_TOP_BOTTOM: Color = Color::rgb(0x63, 0xBE, 0x7B);
/// Default data bar color (blue).
pub const DEFAULT_DATA_BAR: Color = Color::rgb(0x63, 0x8E, 0xC6);
/// Default icon set bucket boundaries, in percent of the column range.
pub const DEFAULT_ICON_THRESHOLDS: [f64; 2] = [33.0, 67.0];
/// Default icon set bucket colors: red, yellow, green.
pub const DEFAULT_ICON_COLORS: [Color; 3] = [
    Color::rgb(0xF8, 0x69, 0x6B),
    Color::rgb(0xFF, 0xEB, 0x84),
    Color::rgb(0x63, 0xBE, 0x7B),
];

/// Rule kind tags as they appear in rule specifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    ColorScale,
    HighlightCells,
    TopBottom,
    DataBar,
    IconSet,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::ColorScale => "color_scale",
            RuleKind::HighlightCells => "highlight_cells",
            RuleKind::TopBottom => "top_bottom",
            RuleKind::DataBar => "data_bar",
            RuleKind::IconSet => "icon_set",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "color_scale" => Ok(RuleKind::ColorScale),
            "highlight_cells" => Ok(RuleKind::HighlightCells),
            "top_bottom" => Ok(RuleKind::TopBottom),
            "data_bar" => Ok(RuleKind::DataBar),
            "icon_set" => Ok(RuleKind::IconSet),
            _ => Err(StyleError::UnknownRuleType(s.to_string())),
        }
    }
}

/// A conditional formatting rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    /// Fill each cell with a color interpolated from its value
    ColorScale(ColorScaleRule),
    /// Fill cells whose value satisfies a comparison
    HighlightCells(HighlightRule),
    /// Fill the highest or lowest ranked cells
    TopBottom(TopBottomRule),
    /// Give each cell a bar proportional to its value
    DataBar(DataBarRule),
    /// Fill each cell with the color of its value bucket
    IconSet(IconSetRule),
}

impl Rule {
    /// Build a rule from a JSON specification (`"type"` tag plus parameters).
    ///
    /// ```
    /// use serde_json::json;
    /// use slidestylelib::{Rule, StyleError};
    ///
    /// let rule = Rule::from_value(&json!({"type": "data_bar", "column": "units"})).unwrap();
    /// assert_eq!(rule.kind().as_str(), "data_bar");
    ///
    /// let err = Rule::from_value(&json!({"type": "sparkline", "column": "units"})).unwrap_err();
    /// assert_eq!(err, StyleError::UnknownRuleType("sparkline".to_string()));
    /// ```
    pub fn from_value(value: &Value) -> Result<Rule> {
        let map = value.as_object().ok_or_else(|| StyleError::InvalidRule {
            rule: "rule".to_string(),
            message: format!("expected a JSON object, got {}", value),
        })?;
        let tag = match map.get("type") {
            Some(Value::String(tag)) => tag.as_str(),
            _ => {
                return Err(StyleError::InvalidRule {
                    rule: "rule".to_string(),
                    message: "missing string field 'type'".to_string(),
                })
            }
        };

        let kind = RuleKind::from_str(tag)?;
        let params = RuleParams::new(kind.as_str(), map);
        let rule = match kind {
            RuleKind::ColorScale => Rule::ColorScale(ColorScaleRule::from_params(&params)?),
            RuleKind::HighlightCells => Rule::HighlightCells(HighlightRule::from_params(&params)?),
            RuleKind::TopBottom => Rule::TopBottom(TopBottomRule::from_params(&params)?),
            RuleKind::DataBar => Rule::DataBar(DataBarRule::from_params(&params)?),
            RuleKind::IconSet => Rule::IconSet(IconSetRule::from_params(&params)?),
        };
        Ok(rule)
    }

    /// Build a list of rules, stopping at the first invalid one.
    pub fn from_values(values: &[Value]) -> Result<Vec<Rule>> {
        values.iter().map(Rule::from_value).collect()
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::ColorScale(_) => RuleKind::ColorScale,
            Rule::HighlightCells(_) => RuleKind::HighlightCells,
            Rule::TopBottom(_) => RuleKind::TopBottom,
            Rule::DataBar(_) => RuleKind::DataBar,
            Rule::IconSet(_) => RuleKind::IconSet,
        }
    }

    /// The column this rule targets.
    pub fn column(&self) -> &ColumnRef {
        match self {
            Rule::ColorScale(r) => &r.column,
            Rule::HighlightCells(r) => &r.column,
            Rule::TopBottom(r) => &r.column,
            Rule::DataBar(r) => &r.column,
            Rule::IconSet(r) => &r.column,
        }
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Rule::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl From<ColorScaleRule> for Rule {
    fn from(rule: ColorScaleRule) -> Self {
        Rule::ColorScale(rule)
    }
}

impl From<HighlightRule> for Rule {
    fn from(rule: HighlightRule) -> Self {
        Rule::HighlightCells(rule)
    }
}

impl From<TopBottomRule> for Rule {
    fn from(rule: TopBottomRule) -> Self {
        Rule::TopBottom(rule)
    }
}

impl From<DataBarRule> for Rule {
    fn from(rule: DataBarRule) -> Self {
        Rule::DataBar(rule)
    }
}

impl From<IconSetRule> for Rule {
    fn from(rule: IconSetRule) -> Self {
        Rule::IconSet(rule)
    }
}

// ---------------------------------------------------------------------------
// color_scale
// ---------------------------------------------------------------------------

/// Two- or three-color scale over the column's numeric range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScaleRule {
    pub column: ColumnRef,
    pub min_color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid_color: Option<Color>,
    pub max_color: Color,
}

impl ColorScaleRule {
    pub fn new(column: impl Into<ColumnRef>, min_color: Color, max_color: Color) -> Self {
        Self {
            column: column.into(),
            min_color,
            mid_color: None,
            max_color,
        }
    }

    /// Builder: add a midpoint color.
    pub fn with_mid(mut self, mid: Color) -> Self {
        self.mid_color = Some(mid);
        self
    }

    /// The interpolation scale this rule describes.
    pub fn scale(&self) -> ColorScale {
        match self.mid_color {
            Some(mid) => ColorScale::three(self.min_color, mid, self.max_color),
            None => ColorScale::two(self.min_color, self.max_color),
        }
    }

    fn from_params(params: &RuleParams<'_>) -> Result<Self> {
        Ok(Self {
            column: params.column()?,
            min_color: params.color_or("min_color", DEFAULT_SCALE_MIN)?,
            mid_color: params.color("mid_color")?,
            max_color: params.color_or("max_color", DEFAULT_SCALE_MAX)?,
        })
    }
}

// ---------------------------------------------------------------------------
// highlight_cells
// ---------------------------------------------------------------------------

/// Comparison applied by a highlight rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    GreaterThan,
    LessThan,
    EqualTo,
    NotEqualTo,
    GreaterThanOrEqual,
    LessThanOrEqual,
    /// Inclusive range
    Between,
    /// Outside the inclusive range
    NotBetween,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::GreaterThan => "greater_than",
            Comparison::LessThan => "less_than",
            Comparison::EqualTo => "equal_to",
            Comparison::NotEqualTo => "not_equal_to",
            Comparison::GreaterThanOrEqual => "greater_than_or_equal",
            Comparison::LessThanOrEqual => "less_than_or_equal",
            Comparison::Between => "between",
            Comparison::NotBetween => "not_between",
        }
    }

    /// Whether this comparison needs a second bound.
    pub fn is_range(&self) -> bool {
        matches!(self, Comparison::Between | Comparison::NotBetween)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Comparison {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "greater_than" => Ok(Comparison::GreaterThan),
            "less_than" => Ok(Comparison::LessThan),
            "equal_to" => Ok(Comparison::EqualTo),
            "not_equal_to" => Ok(Comparison::NotEqualTo),
            "greater_than_or_equal" => Ok(Comparison::GreaterThanOrEqual),
            "less_than_or_equal" => Ok(Comparison::LessThanOrEqual),
            "between" => Ok(Comparison::Between),
            "not_between" => Ok(Comparison::NotBetween),
            _ => Err(StyleError::UnknownOperator(s.to_string())),
        }
    }
}

/// Color cells whose value passes a comparison against fixed thresholds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightRule {
    pub column: ColumnRef,
    pub operator: Comparison,
    pub value: f64,
    /// Upper bound for range comparisons
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value2: Option<f64>,
    #[serde(rename = "color", skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<Color>,
}

impl HighlightRule {
    /// Single-threshold highlight with the default fill.
    ///
    /// Range comparisons need [`HighlightRule::range`] instead; built
    /// through this constructor they collapse to the point `value`.
    pub fn new(column: impl Into<ColumnRef>, operator: Comparison, value: f64) -> Self {
        Self {
            column: column.into(),
            operator,
            value,
            value2: operator.is_range().then_some(value),
            fill_color: Some(DEFAULT_HIGHLIGHT),
            font_color: None,
        }
    }

    /// Range highlight (`between` / `not_between`), bounds in either order.
    pub fn range(column: impl Into<ColumnRef>, operator: Comparison, low: f64, high: f64) -> Self {
        Self {
            value2: Some(high),
            value: low,
            ..Self::new(column, operator, low)
        }
    }

    /// Builder: set (or clear) the fill color.
    pub fn fill(mut self, color: Option<Color>) -> Self {
        self.fill_color = color;
        self
    }

    /// Builder: set (or clear) the font color.
    pub fn font(mut self, color: Option<Color>) -> Self {
        self.font_color = color;
        self
    }

    /// Does `v` pass this rule's comparison?
    pub fn matches(&self, v: f64) -> bool {
        let (lo, hi) = {
            let other = self.value2.unwrap_or(self.value);
            (self.value.min(other), self.value.max(other))
        };
        match self.operator {
            Comparison::GreaterThan => v > self.value,
            Comparison::LessThan => v < self.value,
            Comparison::EqualTo => v == self.value,
            Comparison::NotEqualTo => v != self.value,
            Comparison::GreaterThanOrEqual => v >= self.value,
            Comparison::LessThanOrEqual => v <= self.value,
            Comparison::Between => lo <= v && v <= hi,
            Comparison::NotBetween => v < lo || v > hi,
        }
    }

    fn from_params(params: &RuleParams<'_>) -> Result<Self> {
        let column = params.column()?;
        let operator = match params.string("operator")? {
            Some(op) => Comparison::from_str(op)?,
            None => Comparison::GreaterThan,
        };
        let value = params.number_or("value", 0.0)?;
        let value2 = if operator.is_range() {
            Some(params.required_number("value2")?)
        } else {
            None
        };
        let (fill_color, font_color) = fill_and_font(params, DEFAULT_HIGHLIGHT)?;

        Ok(Self {
            column,
            operator,
            value,
            value2,
            fill_color,
            font_color,
        })
    }
}

/// Read `color` / `font_color`. The fill falls back to `default` only when
/// neither is given, so a font-only rule leaves fills alone.
fn fill_and_font(params: &RuleParams<'_>, default: Color) -> Result<(Option<Color>, Option<Color>)> {
    let fill = params.color("color")?;
    let font = params.color("font_color")?;
    if fill.is_none() && font.is_none() {
        Ok((Some(default), None))
    } else {
        Ok((fill, font))
    }
}

// ---------------------------------------------------------------------------
// top_bottom
// ---------------------------------------------------------------------------

/// Color the `rank` highest (or lowest) values of a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopBottomRule {
    pub column: ColumnRef,
    /// Highest values when true, lowest when false
    pub top: bool,
    rank: usize,
    percent: bool,
    #[serde(rename = "color", skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_color: Option<Color>,
}

impl TopBottomRule {
    /// Mark the `rank` highest values.
    pub fn top(column: impl Into<ColumnRef>, rank: i64) -> Result<Self> {
        Self::build(column.into(), true, rank, false)
    }

    /// Mark the `rank` lowest values.
    pub fn bottom(column: impl Into<ColumnRef>, rank: i64) -> Result<Self> {
        Self::build(column.into(), false, rank, false)
    }

    /// Builder: treat the rank as a percentage of the numeric rows.
    pub fn percent(self) -> Result<Self> {
        Self::build(self.column, self.top, self.rank as i64, true).map(|rule| Self {
            fill_color: self.fill_color,
            font_color: self.font_color,
            ..rule
        })
    }

    /// Builder: set (or clear) the fill color.
    pub fn fill(mut self, color: Option<Color>) -> Self {
        self.fill_color = color;
        self
    }

    /// Builder: set (or clear) the font color.
    pub fn font(mut self, color: Option<Color>) -> Self {
        self.font_color = color;
        self
    }

    /// How many rows (or what percentage of rows) to mark.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Whether `rank` is a percentage of the numeric rows.
    pub fn is_percent(&self) -> bool {
        self.percent
    }

    /// Number of rows to mark out of `available` numeric rows.
    ///
    /// A count rank larger than `available` is clamped. A percentage rank
    /// rounds down, so a small percentage of a short column marks nothing.
    pub fn count(&self, available: usize) -> usize {
        if self.percent {
            let marked = available as u128 * self.rank.min(100) as u128 / 100;
            marked as usize
        } else {
            self.rank.min(available)
        }
    }

    fn build(column: ColumnRef, top: bool, rank: i64, percent: bool) -> Result<Self> {
        if rank <= 0 {
            return Err(StyleError::InvalidRank {
                rank,
                message: "rank must be at least 1".to_string(),
            });
        }
        if percent && rank > 100 {
            return Err(StyleError::InvalidRank {
                rank,
                message: "a percentage rank must be between 1 and 100".to_string(),
            });
        }
        Ok(Self {
            column,
            top,
            rank: rank as usize,
            percent,
            fill_color: Some(DEFAULT_TOP_BOTTOM),
            font_color: None,
        })
    }

    fn from_params(params: &RuleParams<'_>) -> Result<Self> {
        let column = params.column()?;
        let top = params.bool_or("top", true)?;
        let rank = params.integer_or("rank", 10)?;
        let percent = params.bool_or("percent", false)?;
        let (fill_color, font_color) = fill_and_font(params, DEFAULT_TOP_BOTTOM)?;

        Ok(Self {
            fill_color,
            font_color,
            ..Self::build(column, top, rank, percent)?
        })
    }
}

// ---------------------------------------------------------------------------
// data_bar
// ---------------------------------------------------------------------------

/// Bar length proportional to the value's position in the column range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataBarRule {
    pub column: ColumnRef,
    pub color: Color,
}

impl DataBarRule {
    pub fn new(column: impl Into<ColumnRef>) -> Self {
        Self {
            column: column.into(),
            color: DEFAULT_DATA_BAR,
        }
    }

    /// Builder: set the bar color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    fn from_params(params: &RuleParams<'_>) -> Result<Self> {
        Ok(Self {
            column: params.column()?,
            color: params.color_or("color", DEFAULT_DATA_BAR)?,
        })
    }
}

// ---------------------------------------------------------------------------
// icon_set
// ---------------------------------------------------------------------------

/// Bucket values by thresholds (percent of the column range) and color
/// each bucket. Slides have no native icon sets, so buckets become fills.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconSetRule {
    pub column: ColumnRef,
    thresholds: Vec<f64>,
    colors: Vec<Color>,
}

impl IconSetRule {
    /// Three buckets with the default thresholds and colors.
    pub fn new(column: impl Into<ColumnRef>) -> Self {
        Self {
            column: column.into(),
            thresholds: DEFAULT_ICON_THRESHOLDS.to_vec(),
            colors: DEFAULT_ICON_COLORS.to_vec(),
        }
    }

    /// Custom buckets: `colors` needs one more entry than `thresholds`.
    pub fn with_buckets(
        column: impl Into<ColumnRef>,
        thresholds: Vec<f64>,
        colors: Vec<Color>,
    ) -> Result<Self> {
        Self::validate(&thresholds, &colors)?;
        Ok(Self {
            column: column.into(),
            thresholds,
            colors,
        })
    }

    /// Ascending bucket bounds, as percentages of the column range.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// One color per bucket, always one more than there are thresholds.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    fn validate(thresholds: &[f64], colors: &[Color]) -> Result<()> {
        let invalid = |message: String| StyleError::InvalidRule {
            rule: RuleKind::IconSet.to_string(),
            message,
        };
        if colors.len() != thresholds.len() + 1 {
            return Err(invalid(format!(
                "{} thresholds need {} colors, got {}",
                thresholds.len(),
                thresholds.len() + 1,
                colors.len()
            )));
        }
        if thresholds.iter().any(|t| !(0.0..=100.0).contains(t)) {
            return Err(invalid("thresholds must be percentages in [0, 100]".to_string()));
        }
        if thresholds.windows(2).any(|w| w[1] < w[0]) {
            return Err(invalid("thresholds must be in ascending order".to_string()));
        }
        Ok(())
    }

    fn from_params(params: &RuleParams<'_>) -> Result<Self> {
        let column = params.column()?;
        let thresholds = params
            .number_list("thresholds")?
            .unwrap_or_else(|| DEFAULT_ICON_THRESHOLDS.to_vec());
        let colors = params
            .color_list("colors")?
            .unwrap_or_else(|| DEFAULT_ICON_COLORS.to_vec());
        Self::with_buckets(column, thresholds, colors)
    }
}
