//! Color scales: map a value inside a numeric domain to a color.
//!
//! A [`ColorScale`] is an ordered list of [`ColorStop`]s positioned in
//! `[0, 1]`. A value is first normalized against its domain, then the two
//! stops bracketing that position are blended channel by channel in RGB.
//!
//! Interpolation is plain linear RGB, so a two-stop scale hits both end
//! colors exactly and every channel moves monotonically between them.
//! When the domain is flat (`min == max`) there is no meaningful position;
//! the scale's color at position 0.5 is used instead.

use serde::{Deserialize, Serialize};

use crate::color::model::Color;
use crate::error::StyleError;
use crate::Result;

/// Position used for every value of a flat domain.
pub const FLAT_DOMAIN_POSITION: f64 = 0.5;

/// Where `value` sits in `[min, max]`, clamped to `[0, 1]`.
///
/// `None` when the domain is flat or the position is undefined. The
/// arithmetic works on halves so domains spanning most of the `f64` range
/// do not overflow.
pub fn domain_position(value: f64, min: f64, max: f64) -> Option<f64> {
    let half_span = max / 2.0 - min / 2.0;
    if half_span == 0.0 {
        return None;
    }
    let t = (value / 2.0 - min / 2.0) / half_span;
    if t.is_nan() {
        return None;
    }
    Some(t.clamp(0.0, 1.0))
}

/// An anchor point of a color scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position along the scale, in `[0, 1]`
    pub position: f64,
    pub color: Color,
}

impl ColorStop {
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

/// A validated, non-empty list of stops in non-decreasing position order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColorStop>", into = "Vec<ColorStop>")]
pub struct ColorScale {
    stops: Vec<ColorStop>,
}

impl ColorScale {
    /// Build a scale from explicit stops.
    pub fn new(stops: Vec<ColorStop>) -> Result<Self> {
        if stops.is_empty() {
            return Err(StyleError::InvalidScale("a scale needs at least one stop".into()));
        }
        if let Some(stop) = stops
            .iter()
            .find(|s| !(0.0..=1.0).contains(&s.position))
        {
            return Err(StyleError::InvalidScale(format!(
                "stop position {} is outside [0, 1]",
                stop.position
            )));
        }
        if stops.windows(2).any(|w| w[1].position < w[0].position) {
            return Err(StyleError::InvalidScale(
                "stop positions must be in ascending order".into(),
            ));
        }
        Ok(Self { stops })
    }

    /// Two-color scale from `min` at 0 to `max` at 1.
    pub fn two(min: Color, max: Color) -> Self {
        Self {
            stops: vec![ColorStop::new(0.0, min), ColorStop::new(1.0, max)],
        }
    }

    /// Three-color scale with `mid` at 0.5.
    pub fn three(min: Color, mid: Color, max: Color) -> Self {
        Self {
            stops: vec![
                ColorStop::new(0.0, min),
                ColorStop::new(0.5, mid),
                ColorStop::new(1.0, max),
            ],
        }
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color for `value` within `[domain_min, domain_max]`.
    ///
    /// Values outside the domain clamp to the end colors. A flat domain
    /// yields the color at position 0.5.
    pub fn color_at(&self, value: f64, domain_min: f64, domain_max: f64) -> Color {
        let t = domain_position(value, domain_min, domain_max).unwrap_or(FLAT_DOMAIN_POSITION);
        self.color_at_position(t)
    }

    /// Color at normalized position `t`.
    pub fn color_at_position(&self, t: f64) -> Color {
        let first = &self.stops[0];
        let last = &self.stops[self.stops.len() - 1];

        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            if lo.position <= t && t <= hi.position {
                let width = hi.position - lo.position;
                if width <= 0.0 {
                    return hi.color;
                }
                return lo.color.lerp(&hi.color, (t - lo.position) / width);
            }
        }

        last.color
    }

    /// `steps` colors evenly spaced along the scale, first stop to last.
    pub fn steps(&self, steps: usize) -> Vec<Color> {
        match steps {
            0 => Vec::new(),
            1 => vec![self.stops[0].color],
            n => (0..n)
                .map(|i| self.color_at_position(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}

impl TryFrom<Vec<ColorStop>> for ColorScale {
    type Error = StyleError;

    fn try_from(stops: Vec<ColorStop>) -> Result<Self> {
        ColorScale::new(stops)
    }
}

impl From<ColorScale> for Vec<ColorStop> {
    fn from(scale: ColorScale) -> Self {
        scale.stops
    }
}

/// Interpolate `value` over `scale` within `[domain_min, domain_max]`.
///
/// ```
/// use slidestylelib::{interpolate, Color, ColorScale};
///
/// let scale = ColorScale::two(Color::parse("F8696B").unwrap(), Color::parse("63BE7B").unwrap());
/// assert_eq!(interpolate(300.0, 300.0, 500.0, &scale).to_hex(), "F8696B");
/// assert_eq!(interpolate(500.0, 300.0, 500.0, &scale).to_hex(), "63BE7B");
/// ```
pub fn interpolate(value: f64, domain_min: f64, domain_max: f64, scale: &ColorScale) -> Color {
    scale.color_at(value, domain_min, domain_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn red() -> Color {
        Color::parse("F8696B").unwrap()
    }

    fn green() -> Color {
        Color::parse("63BE7B").unwrap()
    }

    #[test]
    fn test_two_stop_ends_exact() {
        let scale = ColorScale::two(red(), green());
        assert_eq!(scale.color_at(-5.0, -5.0, 12.5), red());
        assert_eq!(scale.color_at(12.5, -5.0, 12.5), green());
    }

    #[test]
    fn test_two_stop_midpoint() {
        let scale = ColorScale::two(Color::rgb(0, 0, 0), Color::rgb(200, 100, 50));
        assert_eq!(scale.color_at(5.0, 0.0, 10.0), Color::rgb(100, 50, 25));
    }

    #[test]
    fn test_values_outside_domain_clamp() {
        let scale = ColorScale::two(red(), green());
        assert_eq!(scale.color_at(-100.0, 0.0, 1.0), red());
        assert_eq!(scale.color_at(100.0, 0.0, 1.0), green());
    }

    #[test]
    fn test_flat_domain_uses_midpoint() {
        let scale = ColorScale::two(Color::rgb(0, 0, 0), Color::rgb(200, 100, 50));
        assert_eq!(scale.color_at(7.0, 7.0, 7.0), Color::rgb(100, 50, 25));

        let three = ColorScale::three(red(), Color::rgb(1, 2, 3), green());
        assert_eq!(three.color_at(0.0, 0.0, 0.0), Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_domain_spanning_f64_range() {
        let scale = ColorScale::three(red(), Color::rgb(1, 2, 3), green());
        assert_eq!(scale.color_at(0.0, -1e308, 1e308), Color::rgb(1, 2, 3));
        assert_eq!(scale.color_at(1e308, -1e308, 1e308), green());
        assert_eq!(scale.color_at(-1e308, -1e308, 1e308), red());
        assert_eq!(scale.color_at(f64::MAX, f64::MIN, f64::MAX), green());

        assert_eq!(domain_position(0.0, -1e308, 1e308), Some(0.5));
        assert_eq!(domain_position(f64::MAX, f64::MIN, f64::MAX), Some(1.0));
        assert_eq!(domain_position(4.0, 4.0, 4.0), None);
    }

    #[test]
    fn test_three_stop_segments() {
        let scale = ColorScale::three(
            Color::rgb(0, 0, 0),
            Color::rgb(100, 100, 100),
            Color::rgb(100, 200, 100),
        );
        assert_eq!(scale.color_at_position(0.25), Color::rgb(50, 50, 50));
        assert_eq!(scale.color_at_position(0.5), Color::rgb(100, 100, 100));
        assert_eq!(scale.color_at_position(0.75), Color::rgb(100, 150, 100));
    }

    #[test]
    fn test_partial_stops_hold_end_colors() {
        let scale = ColorScale::new(vec![
            ColorStop::new(0.25, Color::rgb(10, 10, 10)),
            ColorStop::new(0.75, Color::rgb(90, 90, 90)),
        ])
        .unwrap();
        assert_eq!(scale.color_at_position(0.0), Color::rgb(10, 10, 10));
        assert_eq!(scale.color_at_position(1.0), Color::rgb(90, 90, 90));
        assert_eq!(scale.color_at_position(0.5), Color::rgb(50, 50, 50));
    }

    #[test]
    fn test_single_stop_is_constant() {
        let scale = ColorScale::new(vec![ColorStop::new(0.3, red())]).unwrap();
        assert_eq!(scale.color_at(1.0, 0.0, 10.0), red());
        assert_eq!(scale.color_at(9.0, 0.0, 10.0), red());
    }

    #[test]
    fn test_invalid_scales() {
        assert!(matches!(ColorScale::new(vec![]), Err(StyleError::InvalidScale(_))));
        assert!(matches!(
            ColorScale::new(vec![ColorStop::new(1.5, red())]),
            Err(StyleError::InvalidScale(_))
        ));
        assert!(matches!(
            ColorScale::new(vec![ColorStop::new(0.8, red()), ColorStop::new(0.2, green())]),
            Err(StyleError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_steps() {
        let scale = ColorScale::two(Color::rgb(0, 0, 0), Color::rgb(255, 255, 255));
        let steps = scale.steps(3);
        assert_eq!(
            steps,
            vec![Color::rgb(0, 0, 0), Color::rgb(128, 128, 128), Color::rgb(255, 255, 255)]
        );
        assert_eq!(scale.steps(1), vec![Color::rgb(0, 0, 0)]);
        assert!(scale.steps(0).is_empty());
    }

    fn monotonic(from: u8, to: u8, a: u8, b: u8) -> bool {
        if from <= to {
            a <= b
        } else {
            a >= b
        }
    }

    proptest! {
        #[test]
        fn prop_two_stop_monotonic(
            min in any::<(u8, u8, u8)>(),
            max in any::<(u8, u8, u8)>(),
            lo in -1.0e6f64..1.0e6,
            width in 0.001f64..1.0e6,
            v1 in 0.0f64..1.0,
            v2 in 0.0f64..1.0,
        ) {
            let min = Color::rgb(min.0, min.1, min.2);
            let max = Color::rgb(max.0, max.1, max.2);
            let scale = ColorScale::two(min, max);
            let hi = lo + width;
            let (v1, v2) = if v1 <= v2 { (v1, v2) } else { (v2, v1) };
            let a = scale.color_at(lo + v1 * width, lo, hi);
            let b = scale.color_at(lo + v2 * width, lo, hi);
            prop_assert!(monotonic(min.r, max.r, a.r, b.r));
            prop_assert!(monotonic(min.g, max.g, a.g, b.g));
            prop_assert!(monotonic(min.b, max.b, a.b, b.b));
        }

        #[test]
        fn prop_two_stop_bounds_exact(
            min in any::<(u8, u8, u8)>(),
            max in any::<(u8, u8, u8)>(),
            lo in -1.0e6f64..1.0e6,
            width in 0.001f64..1.0e6,
        ) {
            let min = Color::rgb(min.0, min.1, min.2);
            let max = Color::rgb(max.0, max.1, max.2);
            let scale = ColorScale::two(min, max);
            prop_assert_eq!(interpolate(lo, lo, lo + width, &scale), min);
            prop_assert_eq!(interpolate(lo + width, lo, lo + width, &scale), max);
        }
    }
}
