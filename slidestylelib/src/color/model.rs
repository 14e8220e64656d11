//! RGB and HSL color values and their text form.
//!
//! Colors travel through the library as [`Color`], an sRGB triplet of
//! bytes. The hex text form (`"F8696B"`) is what rule parameters carry on
//! input and what the rendering layer receives on output.
//!
//! [`Hsl`] is used by the palette generator, which rotates hue and steps
//! lightness. Converting RGB → HSL → RGB is lossy by at most one unit per
//! channel: HSL components are floats, but the trip back has to round to
//! whole bytes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StyleError;
use crate::Result;

/// An sRGB color with 8-bit channels.
///
/// Equality and hashing are by channel values. Serializes as 6 uppercase
/// hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create a color from channel values.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse hex color text.
    ///
    /// Accepts `RRGGBB` or the `RGB` shorthand, either case, with an
    /// optional leading `#`. Anything else is rejected.
    ///
    /// ```
    /// use slidestylelib::Color;
    ///
    /// assert_eq!(Color::parse("#f8696b").unwrap(), Color::rgb(248, 105, 107));
    /// assert_eq!(Color::parse("F00").unwrap(), Color::rgb(255, 0, 0));
    /// assert!(Color::parse("F8696").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || StyleError::InvalidColorFormat(text.to_string());
        let digits = text.strip_prefix('#').unwrap_or(text).as_bytes();

        match digits.len() {
            3 => {
                let r = hex_digit(digits[0]).ok_or_else(invalid)?;
                let g = hex_digit(digits[1]).ok_or_else(invalid)?;
                let b = hex_digit(digits[2]).ok_or_else(invalid)?;
                Ok(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => {
                let r = hex_byte(&digits[0..2]).ok_or_else(invalid)?;
                let g = hex_byte(&digits[2..4]).ok_or_else(invalid)?;
                let b = hex_byte(&digits[4..6]).ok_or_else(invalid)?;
                Ok(Self::rgb(r, g, b))
            }
            _ => Err(invalid()),
        }
    }

    /// Six uppercase hex digits, no prefix.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Convert to hue/saturation/lightness.
    pub fn to_hsl(&self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        let d = max - min;
        if d.abs() < f64::EPSILON {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let sector = if (max - r).abs() < f64::EPSILON {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl::new(sector * 60.0, s, l)
    }

    /// Linear RGB interpolation toward `other`.
    ///
    /// Each channel is interpolated independently and rounded to the
    /// nearest byte. `t` is clamped to [0, 1]; `t == 0` returns `self`
    /// and `t == 1` returns `other` exactly.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color::rgb(
            lerp_channel(self.r, other.r, t),
            lerp_channel(self.g, other.g, t),
            lerp_channel(self.b, other.b, t),
        )
    }

    /// The color with its hue rotated by 180°.
    pub fn complement(&self) -> Color {
        self.to_hsl().rotate(180.0).to_rgb()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Hue/saturation/lightness.
///
/// `h` is in degrees, `[0, 360)`; `s` and `l` are in `[0, 1]`. Values
/// built through [`Hsl::new`] are normalized into those ranges.
///
/// `Hsl::to_rgb` inverts [`Color::to_hsl`] up to rounding: a round trip
/// can move each channel by one unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Build a normalized HSL value: hue wrapped, saturation and lightness clamped.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: wrap_hue(h),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
        }
    }

    /// Rotate hue by `degrees` (either sign).
    pub fn rotate(self, degrees: f64) -> Self {
        Self::new(self.h + degrees, self.s, self.l)
    }

    /// Same hue and saturation at another lightness.
    pub fn with_lightness(self, l: f64) -> Self {
        Self::new(self.h, self.s, l)
    }

    /// Convert back to an RGB color.
    pub fn to_rgb(&self) -> Color {
        let Hsl { h, s, l } = Hsl::new(self.h, self.s, self.l);

        if s.abs() < f64::EPSILON {
            let v = unit_to_byte(l);
            return Color::rgb(v, v, v);
        }

        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l + s - l * s
        };
        let p = 2.0 * l - q;
        let h = h / 360.0;

        Color::rgb(
            unit_to_byte(hue_to_channel(p, q, h + 1.0 / 3.0)),
            unit_to_byte(hue_to_channel(p, q, h)),
            unit_to_byte(hue_to_channel(p, q, h - 1.0 / 3.0)),
        )
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn wrap_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

fn unit_to_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    let from = f64::from(from);
    let to = f64::from(to);
    (from + (to - from) * t).round().clamp(0.0, 255.0) as u8
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = hex_digit(bytes[0])?;
    let lo = hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}
