//! Color handling: conversions, scales and palettes.
//!
//! This module is the leaf of the pipeline. It knows nothing about tables
//! or rules and is used by both:
//!
//! - **Model**: [`Color`] (RGB bytes) and [`Hsl`], hex parsing and formatting
//! - **Scales**: [`ColorScale`] interpolation over a numeric domain
//! - **Palettes**: [`generate`] related colors from one base color
//! - **Schemes**: fixed, named palettes for charts
//!
//! ## Example
//!
//! ```rust
//! use slidestylelib::color::{generate, Color, ColorScale, PaletteMode};
//!
//! let base = Color::parse("3C2F80").unwrap();
//! let palette = generate(base, 4, PaletteMode::Triadic).unwrap();
//! assert_eq!(palette.to_hex()[0], "3C2F80");
//!
//! let scale = ColorScale::two(Color::WHITE, base);
//! assert_eq!(scale.color_at(10.0, 0.0, 10.0), base);
//! ```

pub mod model;
pub mod palette;
pub mod scale;
pub mod schemes;

pub use model::{Color, Hsl};
pub use palette::{generate, Palette, PaletteCache, PaletteMode};
pub use scale::{domain_position, interpolate, ColorScale, ColorStop};
pub use schemes::{scheme, scheme_names};
