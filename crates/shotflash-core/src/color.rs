//! Marker colors.

use std::fmt;
use std::str::FromStr;

use crate::error::{AnimError, AnimResult};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Default marker color.
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Parse a named color (case-insensitive) or a `#rrggbb` / `#rgb` hex code.
    pub fn parse(s: &str) -> AnimResult<Self> {
        let name = s.trim().to_lowercase();
        if let Some(hex) = name.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| AnimError::InvalidColor(s.to_string()));
        }
        let compact: String = name.chars().filter(|c| !matches!(c, ' ' | '_' | '-')).collect();
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == compact)
            .map(|(_, c)| *c)
            .ok_or_else(|| AnimError::InvalidColor(s.to_string()))
    }
}

impl FromStr for Rgb {
    type Err = AnimError;

    fn from_str(s: &str) -> AnimResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => Some(Rgb(
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
            Some(Rgb(digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}

/// CSS named colors commonly used for microwave flashes.
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("white", Rgb(255, 255, 255)),
    ("black", Rgb(0, 0, 0)),
    ("red", Rgb(255, 0, 0)),
    ("green", Rgb(0, 128, 0)),
    ("lime", Rgb(0, 255, 0)),
    ("blue", Rgb(0, 0, 255)),
    ("yellow", Rgb(255, 255, 0)),
    ("cyan", Rgb(0, 255, 255)),
    ("aqua", Rgb(0, 255, 255)),
    ("magenta", Rgb(255, 0, 255)),
    ("fuchsia", Rgb(255, 0, 255)),
    ("orange", Rgb(255, 165, 0)),
    ("purple", Rgb(128, 0, 128)),
    ("violet", Rgb(238, 130, 238)),
    ("pink", Rgb(255, 192, 203)),
    ("hotpink", Rgb(255, 105, 180)),
    ("gold", Rgb(255, 215, 0)),
    ("gray", Rgb(128, 128, 128)),
    ("grey", Rgb(128, 128, 128)),
    ("silver", Rgb(192, 192, 192)),
    ("lightgray", Rgb(211, 211, 211)),
    ("lightgrey", Rgb(211, 211, 211)),
    ("lightblue", Rgb(173, 216, 230)),
    ("skyblue", Rgb(135, 206, 235)),
    ("deepskyblue", Rgb(0, 191, 255)),
    ("dodgerblue", Rgb(30, 144, 255)),
    ("navy", Rgb(0, 0, 128)),
    ("teal", Rgb(0, 128, 128)),
    ("turquoise", Rgb(64, 224, 208)),
    ("lightgreen", Rgb(144, 238, 144)),
    ("springgreen", Rgb(0, 255, 127)),
    ("lightyellow", Rgb(255, 255, 224)),
    ("lightpink", Rgb(255, 182, 193)),
    ("lightcyan", Rgb(224, 255, 255)),
    ("coral", Rgb(255, 127, 80)),
    ("salmon", Rgb(250, 128, 114)),
    ("crimson", Rgb(220, 20, 60)),
    ("tomato", Rgb(255, 99, 71)),
    ("orchid", Rgb(218, 112, 214)),
    ("lavender", Rgb(230, 230, 250)),
    ("khaki", Rgb(240, 230, 140)),
    ("ivory", Rgb(255, 255, 240)),
];
