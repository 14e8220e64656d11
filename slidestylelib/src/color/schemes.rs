//! Built-in named color schemes for charts and tables.

use crate::color::model::Color;
use crate::error::StyleError;
use crate::Result;

const SCHEMES: &[(&str, &[&str])] = &[
    ("blue", &["4472C4", "5B9BD5", "8FAADC", "B4C7E7", "D9E1F2"]),
    ("green", &["70AD47", "9BBB59", "A9D08E", "C5E0B4", "E2EFD9"]),
    ("red", &["C00000", "FF0000", "FF6666", "FF9999", "FFCCCC"]),
    ("orange", &["ED7D31", "F4B183", "F8CBAD", "FCE4D6", "FFF2CC"]),
    ("purple", &["7030A0", "8064A2", "9B82BB", "B2A1C7", "CCC0DA"]),
    ("grayscale", &["000000", "444444", "888888", "BBBBBB", "EEEEEE"]),
    (
        "pastel",
        &[
            "FFCCCC", "FFEBCC", "FFFFCC", "EBFFCC", "CCFFCC", "CCFFEB", "CCFFFF", "CCEBFF",
            "CCCCFF", "EBCCFF",
        ],
    ),
    (
        "contrast",
        &[
            "004489", "E8BD00", "A40122", "53A2BE", "15846B", "AA57AA", "F5793A", "0BA02C",
            "333333", "8C8C8C",
        ],
    ),
    (
        "financial",
        &[
            "3366CC", "DC3912", "FF9900", "109618", "990099", "0099C6", "DD4477", "66AA00",
            "B82E2E", "316395",
        ],
    ),
];

/// Names of the built-in schemes.
pub fn scheme_names() -> Vec<&'static str> {
    SCHEMES.iter().map(|(name, _)| *name).collect()
}

/// Look up a built-in scheme by name (case-insensitive).
pub fn scheme(name: &str) -> Result<Vec<Color>> {
    let wanted = name.to_lowercase();
    let (_, hexes) = SCHEMES
        .iter()
        .find(|(n, _)| *n == wanted)
        .ok_or_else(|| StyleError::UnknownScheme(name.to_string()))?;
    hexes.iter().map(|hex| Color::parse(hex)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scheme_parses() {
        for name in scheme_names() {
            let colors = scheme(name).unwrap();
            assert!(colors.len() >= 5, "{name}");
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let colors = scheme("Financial").unwrap();
        assert_eq!(colors[0], Color::rgb(0x33, 0x66, 0xCC));
        assert_eq!(colors.len(), 10);
    }

    #[test]
    fn test_unknown_scheme() {
        assert_eq!(
            scheme("neon"),
            Err(StyleError::UnknownScheme("neon".to_string()))
        );
    }
}
