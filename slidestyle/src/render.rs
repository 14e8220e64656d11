//! Template contexts for text output.
//!
//! Handlers hand outstanding a serialized context; in text mode the
//! matching template lays it out. Everything here is pre-formatted (padded
//! cells, hex strings) so templates stay free of logic.

use serde::Serialize;
use slidestylelib::{CellAttribute, CellFormats, Color, ColumnType, NumberFormats, Palette, Table};

/// Column separator in the table view
const GUTTER: &str = "  ";

/// Data context for the apply template
#[derive(Debug, Serialize)]
pub struct ApplyContext {
    /// Pre-padded header line
    pub header: String,
    /// Dashes under the header
    pub separator: String,
    /// Pre-padded data rows
    pub rows: Vec<String>,
    /// One line per styled cell
    pub cells: Vec<StyledCell>,
}

/// A styled cell for the apply template
#[derive(Debug, Serialize)]
pub struct StyledCell {
    pub row: usize,
    pub column: String,
    /// The cell as displayed
    pub display: String,
    /// Attributes as `key=value` pairs
    pub attributes: String,
}

/// Build the apply view: the table with display values, then its styled cells.
pub fn apply_context(table: &Table, formats: &CellFormats, numbers: &NumberFormats) -> ApplyContext {
    let display: Vec<Vec<String>> = table
        .columns()
        .iter()
        .map(|column| {
            column
                .values
                .iter()
                .map(|cell| numbers.format(cell, column.kind))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = table
        .columns()
        .iter()
        .zip(&display)
        .map(|(column, cells)| {
            cells
                .iter()
                .map(|s| s.chars().count())
                .chain(std::iter::once(column.name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let pad = |text: &str, width: usize, kind: ColumnType| {
        if kind == ColumnType::Text {
            format!("{:<width$}", text, width = width)
        } else {
            format!("{:>width$}", text, width = width)
        }
    };

    let header = table
        .columns()
        .iter()
        .zip(&widths)
        .map(|(column, &width)| pad(&column.name, width, column.kind))
        .collect::<Vec<_>>()
        .join(GUTTER);

    let rows = (0..table.row_count())
        .map(|row| {
            table
                .columns()
                .iter()
                .zip(&display)
                .zip(&widths)
                .map(|((column, cells), &width)| pad(&cells[row], width, column.kind))
                .collect::<Vec<_>>()
                .join(GUTTER)
        })
        .collect();

    let column_index = |name: &str| table.columns().iter().position(|c| c.name == name);
    let cells = formats
        .entries()
        .map(|cell| StyledCell {
            row: cell.row,
            column: cell.column.to_string(),
            display: column_index(cell.column)
                .map(|i| display[i][cell.row].clone())
                .unwrap_or_default(),
            attributes: describe(cell.attribute),
        })
        .collect();

    ApplyContext {
        separator: "-".repeat(header.chars().count()),
        header,
        rows,
        cells,
    }
}

/// `fill=F8696B font=FFFFFF bar=25% (638EC6)`
pub fn describe(attribute: &CellAttribute) -> String {
    let mut parts = Vec::new();
    if let Some(fill) = attribute.fill_color {
        parts.push(format!("fill={}", fill));
    }
    if let Some(font) = attribute.font_color {
        parts.push(format!("font={}", font));
    }
    if let Some(fraction) = attribute.bar_fraction {
        let mut bar = format!("bar={:.0}%", fraction * 100.0);
        if let Some(color) = attribute.bar_color {
            bar.push_str(&format!(" ({})", color));
        }
        parts.push(bar);
    }
    parts.join(" ")
}

/// One color with its readings
#[derive(Debug, Serialize)]
pub struct Swatch {
    pub hex: String,
    pub rgb: [u8; 3],
    /// Hue in degrees, saturation and lightness in percent, rounded
    pub hsl: [i64; 3],
}

impl From<Color> for Swatch {
    fn from(color: Color) -> Self {
        let hsl = color.to_hsl();
        Swatch {
            hex: color.to_hex(),
            rgb: [color.r, color.g, color.b],
            hsl: [
                hsl.h.round() as i64,
                (hsl.s * 100.0).round() as i64,
                (hsl.l * 100.0).round() as i64,
            ],
        }
    }
}

/// Data context for the palette template
#[derive(Debug, Serialize)]
pub struct PaletteContext {
    pub base: String,
    pub mode: String,
    pub colors: Vec<Swatch>,
}

impl From<&Palette> for PaletteContext {
    fn from(palette: &Palette) -> Self {
        PaletteContext {
            base: palette.base.to_hex(),
            mode: palette.mode.to_string(),
            colors: palette.iter().copied().map(Swatch::from).collect(),
        }
    }
}

/// Data context for the convert template
#[derive(Debug, Serialize)]
pub struct ConvertContext {
    pub input: String,
    #[serde(flatten)]
    pub color: Swatch,
    pub complement: String,
}

impl ConvertContext {
    pub fn new(input: &str, color: Color) -> Self {
        ConvertContext {
            input: input.to_string(),
            color: Swatch::from(color),
            complement: color.complement().to_hex(),
        }
    }
}

/// One stepped color of a scale
#[derive(Debug, Serialize)]
pub struct ScaleStep {
    /// Position along the scale, in percent
    pub position: String,
    pub hex: String,
}

/// Data context for the scale template
#[derive(Debug, Serialize)]
pub struct ScaleContext {
    pub stops: Vec<String>,
    pub steps: Vec<ScaleStep>,
}

impl ScaleContext {
    pub fn new(stops: &[Color], colors: &[Color]) -> Self {
        let last = colors.len().saturating_sub(1).max(1) as f64;
        ScaleContext {
            stops: stops.iter().map(Color::to_hex).collect(),
            steps: colors
                .iter()
                .enumerate()
                .map(|(i, color)| ScaleStep {
                    position: format!("{:>5.1}%", i as f64 / last * 100.0),
                    hex: color.to_hex(),
                })
                .collect(),
        }
    }
}

/// A named scheme
#[derive(Debug, Serialize)]
pub struct SchemeEntry {
    pub name: String,
    pub colors: Vec<String>,
}

/// Data context for the scheme template
#[derive(Debug, Serialize)]
pub struct SchemeContext {
    pub schemes: Vec<SchemeEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidestylelib::data::Column;
    use slidestylelib::rules::DataBarRule;
    use slidestylelib::{apply, generate, PaletteMode, Rule};

    fn sales() -> Table {
        Table::new(vec![
            Column::text("region", ["North", "South"]),
            Column::numeric("revenue", [1250.0, -80.0]).with_kind(ColumnType::Currency),
        ])
        .unwrap()
    }

    #[test]
    fn test_apply_context_pads_columns() {
        let table = sales();
        let formats = apply(&table, &[], 0).unwrap();
        let ctx = apply_context(&table, &formats, &NumberFormats::default());

        assert_eq!(ctx.header, "region  revenue");
        assert_eq!(ctx.rows[0], "North    $1,250");
        assert_eq!(ctx.rows[1], "South     $(80)");
        assert_eq!(ctx.separator.len(), ctx.header.len());
        assert!(ctx.cells.is_empty());
    }

    #[test]
    fn test_apply_context_lists_styled_cells() {
        let table = sales();
        let rules: Vec<Rule> = vec![DataBarRule::new("revenue").into()];
        let formats = apply(&table, &rules, 0).unwrap();
        let ctx = apply_context(&table, &formats, &NumberFormats::default());

        assert_eq!(ctx.cells.len(), 2);
        assert_eq!(ctx.cells[0].display, "$1,250");
        assert_eq!(ctx.cells[0].attributes, "bar=100% (638EC6)");
        assert_eq!(ctx.cells[1].attributes, "bar=0% (638EC6)");
    }

    #[test]
    fn test_describe() {
        let attr = CellAttribute::fill(Color::rgb(255, 0, 0)).with_font(Some(Color::WHITE));
        assert_eq!(describe(&attr), "fill=FF0000 font=FFFFFF");
        assert_eq!(describe(&CellAttribute::new()), "");
    }

    #[test]
    fn test_swatch_readings() {
        let swatch = Swatch::from(Color::rgb(255, 0, 0));
        assert_eq!(swatch.hex, "FF0000");
        assert_eq!(swatch.rgb, [255, 0, 0]);
        assert_eq!(swatch.hsl, [0, 100, 50]);
    }

    #[test]
    fn test_palette_context_keeps_order() {
        let palette = generate(Color::rgb(0x44, 0x72, 0xC4), 3, PaletteMode::Analogous).unwrap();
        let ctx = PaletteContext::from(&palette);
        assert_eq!(ctx.mode, "analogous");
        assert_eq!(ctx.colors.len(), 3);
        assert_eq!(ctx.colors[0].hex, "4472C4");
    }

    #[test]
    fn test_scale_context_positions() {
        let ctx = ScaleContext::new(&[Color::BLACK, Color::WHITE], &[Color::BLACK, Color::WHITE]);
        assert_eq!(ctx.steps[0].position, "  0.0%");
        assert_eq!(ctx.steps[1].position, "100.0%");
    }
}
