//! Palette generation from a single base color.
//!
//! Every mode returns the base color verbatim as the first entry and
//! derives the remaining entries in HSL space:
//!
//! | Mode            | Hues                                  | Lightness                  |
//! |-----------------|---------------------------------------|----------------------------|
//! | `monochromatic` | base                                  | stepped across the band    |
//! | `analogous`     | base, +30°, −30°, +60°, −60°, ...     | base                       |
//! | `complementary` | base, +180°, then alternating         | stepped across the band    |
//! | `triadic`       | base, +120°, −120°, then cycling      | stepped across the band    |
//!
//! The lightness band is [`LIGHTNESS_MIN`, `LIGHTNESS_MAX`]. Generation is
//! deterministic: the same arguments always give the same palette.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::color::model::{Color, Hsl};
use crate::error::StyleError;
use crate::Result;

/// Darkest lightness used when stepping a palette.
pub const LIGHTNESS_MIN: f64 = 0.2;
/// Lightest lightness used when stepping a palette.
pub const LIGHTNESS_MAX: f64 = 0.8;

/// Hue step between analogous neighbours, in degrees.
const ANALOGOUS_STEP: f64 = 30.0;

/// How a palette derives its colors from the base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteMode {
    /// Shades of the base hue
    #[default]
    Monochromatic,
    /// Neighbouring hues around the base
    Analogous,
    /// Base and its opposite hue
    Complementary,
    /// Three hues spaced 120° apart
    Triadic,
}

impl PaletteMode {
    /// All modes, in documentation order.
    pub const ALL: [PaletteMode; 4] = [
        PaletteMode::Monochromatic,
        PaletteMode::Analogous,
        PaletteMode::Complementary,
        PaletteMode::Triadic,
    ];

    /// The mode's tag as accepted by `from_str`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteMode::Monochromatic => "monochromatic",
            PaletteMode::Analogous => "analogous",
            PaletteMode::Complementary => "complementary",
            PaletteMode::Triadic => "triadic",
        }
    }

    /// Smallest count this mode accepts.
    pub fn min_count(&self) -> usize {
        match self {
            PaletteMode::Complementary => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for PaletteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaletteMode {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "monochromatic" | "mono" => Ok(PaletteMode::Monochromatic),
            "analogous" => Ok(PaletteMode::Analogous),
            "complementary" | "complement" => Ok(PaletteMode::Complementary),
            "triadic" => Ok(PaletteMode::Triadic),
            _ => Err(StyleError::UnknownMode(s.to_string())),
        }
    }
}

/// An ordered list of colors derived from one base color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub base: Color,
    pub mode: PaletteMode,
    pub colors: Vec<Color>,
}

impl Palette {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.colors.iter()
    }

    /// Colors as hex text, in palette order.
    pub fn to_hex(&self) -> Vec<String> {
        self.colors.iter().map(Color::to_hex).collect()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

/// Generate `count` colors from `base` under `mode`.
///
/// Fails with [`StyleError::UnsupportedCount`] when `count` is zero, or
/// below two for [`PaletteMode::Complementary`].
///
/// ```
/// use slidestylelib::{generate, Color, PaletteMode};
///
/// let base = Color::parse("3C2F80").unwrap();
/// let palette = generate(base, 5, PaletteMode::Analogous).unwrap();
/// assert_eq!(palette.len(), 5);
/// assert_eq!(palette.colors[0], base);
/// ```
pub fn generate(base: Color, count: usize, mode: PaletteMode) -> Result<Palette> {
    if count < mode.min_count() {
        return Err(StyleError::UnsupportedCount {
            count,
            mode: mode.to_string(),
        });
    }

    let hsl = base.to_hsl();
    let mut colors = Vec::with_capacity(count);
    colors.push(base);

    match mode {
        PaletteMode::Monochromatic => {
            let extra = count - 1;
            colors.extend((0..extra).map(|i| hsl.with_lightness(band_step(i, extra)).to_rgb()));
        }
        PaletteMode::Analogous => {
            colors.extend((1..count).map(|i| hsl.rotate(analogous_offset(i)).to_rgb()));
        }
        PaletteMode::Complementary => {
            fill_from_anchors(&mut colors, hsl, &[0.0, 180.0], count);
        }
        PaletteMode::Triadic => {
            fill_from_anchors(&mut colors, hsl, &[0.0, 120.0, -120.0], count);
        }
    }

    log::debug!(
        "generated {} palette of {} colors from {}",
        mode,
        colors.len(),
        base
    );

    Ok(Palette { base, mode, colors })
}

/// Push the anchor hues (after the base) at base lightness, then fill the
/// remaining slots cycling through the anchors with lightness stepped
/// across the band.
fn fill_from_anchors(colors: &mut Vec<Color>, base: Hsl, offsets: &[f64], count: usize) {
    for offset in offsets.iter().skip(1) {
        if colors.len() == count {
            return;
        }
        colors.push(base.rotate(*offset).to_rgb());
    }

    let extra = count - colors.len();
    for i in 0..extra {
        let offset = offsets[i % offsets.len()];
        let hsl = base.rotate(offset).with_lightness(band_step(i, extra));
        colors.push(hsl.to_rgb());
    }
}

/// Lightness of step `i` of `steps` evenly spaced across the band.
/// A single step sits in the middle.
fn band_step(i: usize, steps: usize) -> f64 {
    if steps <= 1 {
        return (LIGHTNESS_MIN + LIGHTNESS_MAX) / 2.0;
    }
    let t = i as f64 / (steps - 1) as f64;
    LIGHTNESS_MIN + (LIGHTNESS_MAX - LIGHTNESS_MIN) * t
}

/// Hue offset of the `i`-th analogous color (i >= 1): +30, −30, +60, −60, ...
fn analogous_offset(i: usize) -> f64 {
    let ring = i.div_ceil(2) as f64;
    let sign = if i % 2 == 1 { 1.0 } else { -1.0 };
    sign * ring * ANALOGOUS_STEP
}

/// Explicit memoization of generated palettes.
///
/// Nothing is cached unless a caller owns one of these and routes
/// generation through it.
#[derive(Debug, Default)]
pub struct PaletteCache {
    entries: HashMap<(Color, usize, PaletteMode), Palette>,
}

impl PaletteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached palette for these arguments, generating it on first use.
    pub fn get_or_generate(
        &mut self,
        base: Color,
        count: usize,
        mode: PaletteMode,
    ) -> Result<&Palette> {
        let key = (base, count, mode);
        if !self.entries.contains_key(&key) {
            let palette = generate(base, count, mode)?;
            self.entries.insert(key, palette);
        }
        Ok(&self.entries[&key])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
