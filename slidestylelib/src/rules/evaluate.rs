//! Rule evaluation: one column in, per-row attributes out.
//!
//! Every rule kind reduces to the same shape. Collect the numeric rows at
//! or after `start_row`, derive whatever the rule needs from them (range,
//! ranking), then emit an attribute for each qualifying row. Rows before
//! `start_row` are never read, so header or total rows do not skew the
//! range. Cells without a numeric reading are skipped.

use std::collections::BTreeMap;

use crate::color::{domain_position, Color};
use crate::data::Column;
use crate::format::CellAttribute;
use crate::rules::rule::{
    ColorScaleRule, DataBarRule, HighlightRule, IconSetRule, Rule, TopBottomRule,
};

/// Bar length used when every value in the column is the same.
pub const FLAT_BAR_FRACTION: f64 = 0.5;

/// Attributes produced by one rule, keyed by row index.
pub type RowAttributes = BTreeMap<usize, CellAttribute>;

/// Evaluate `rule` over `column`, ignoring rows before `start_row`.
///
/// The rule's column reference is not consulted; the caller has already
/// resolved it to `column`.
pub fn evaluate(rule: &Rule, column: &Column, start_row: usize) -> RowAttributes {
    let values = numeric_rows(column, start_row);
    match rule {
        Rule::ColorScale(r) => color_scale(r, &values),
        Rule::HighlightCells(r) => highlight_cells(r, &values),
        Rule::TopBottom(r) => top_bottom(r, &values),
        Rule::DataBar(r) => data_bar(r, &values),
        Rule::IconSet(r) => icon_set(r, &values),
    }
}

/// `(row, value)` for every numeric cell at or after `start_row`.
fn numeric_rows(column: &Column, start_row: usize) -> Vec<(usize, f64)> {
    column
        .values
        .iter()
        .enumerate()
        .skip(start_row)
        .filter_map(|(row, cell)| match cell.as_number() {
            Some(v) => Some((row, v)),
            None => {
                log::trace!("{}: row {} has no numeric value, skipped", column.name, row);
                None
            }
        })
        .collect()
}

fn range(values: &[(usize, f64)]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &(_, v)| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn color_scale(rule: &ColorScaleRule, values: &[(usize, f64)]) -> RowAttributes {
    let Some((min, max)) = range(values) else {
        return RowAttributes::new();
    };
    let scale = rule.scale();
    values
        .iter()
        .map(|&(row, v)| (row, CellAttribute::fill(scale.color_at(v, min, max))))
        .collect()
}

fn highlight_cells(rule: &HighlightRule, values: &[(usize, f64)]) -> RowAttributes {
    let attribute = CellAttribute::new()
        .with_fill(rule.fill_color)
        .with_font(rule.font_color);
    values
        .iter()
        .filter(|&&(_, v)| rule.matches(v))
        .map(|&(row, _)| (row, attribute))
        .collect()
}

fn top_bottom(rule: &TopBottomRule, values: &[(usize, f64)]) -> RowAttributes {
    let mut ranked = values.to_vec();
    // sort_by is stable: equal values keep their row order
    if rule.top {
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    } else {
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    }

    let attribute = CellAttribute::new()
        .with_fill(rule.fill_color)
        .with_font(rule.font_color);
    ranked
        .into_iter()
        .take(rule.count(values.len()))
        .map(|(row, _)| (row, attribute))
        .collect()
}

fn data_bar(rule: &DataBarRule, values: &[(usize, f64)]) -> RowAttributes {
    let Some((min, max)) = range(values) else {
        return RowAttributes::new();
    };
    values
        .iter()
        .map(|&(row, v)| {
            let fraction = domain_position(v, min, max).unwrap_or(FLAT_BAR_FRACTION);
            (row, CellAttribute::new().with_bar(fraction, rule.color))
        })
        .collect()
}

fn icon_set(rule: &IconSetRule, values: &[(usize, f64)]) -> RowAttributes {
    let Some((min, max)) = range(values) else {
        return RowAttributes::new();
    };
    values
        .iter()
        .filter_map(|&(row, v)| {
            // a flat column sits at the bottom of its range
            let position = domain_position(v, min, max).unwrap_or(0.0);
            bucket_color(position, rule.thresholds(), rule.colors())
                .map(|color| (row, CellAttribute::fill(color)))
        })
        .collect()
}

/// Color of the first bucket whose threshold reaches `position`.
fn bucket_color(position: f64, thresholds: &[f64], colors: &[Color]) -> Option<Color> {
    let bucket = thresholds
        .iter()
        .position(|pct| position <= pct / 100.0)
        .unwrap_or(thresholds.len());
    colors.get(bucket).or(colors.last()).copied()
}
