//! Hex color helpers for the `Color32` values stored in a picture.
//!
//! Accepts `#rgb` and `#rrggbb`; formatting always produces `#rrggbb`.

use egui::Color32;
use thiserror::Error;

/// Errors produced when parsing a hex color string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color must start with '#'")]
    MissingHash,
    #[error("invalid color length {0}, expected 3 or 6")]
    InvalidLength(usize),
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Parse `#rgb` or `#rrggbb` into an opaque color.
pub fn parse_hex(s: &str) -> Result<Color32, ColorError> {
    let digits = s.trim().strip_prefix('#').ok_or(ColorError::MissingHash)?;

    let mut nibbles = Vec::with_capacity(6);
    for c in digits.chars() {
        let value = c.to_digit(16).ok_or(ColorError::InvalidHex(c))?;
        nibbles.push(value as u8);
    }

    match nibbles.as_slice() {
        [r, g, b] => Ok(Color32::from_rgb(r * 17, g * 17, b * 17)),
        [r1, r2, g1, g2, b1, b2] => Ok(Color32::from_rgb(
            (r1 << 4) | r2,
            (g1 << 4) | g2,
            (b1 << 4) | b2,
        )),
        other => Err(ColorError::InvalidLength(other.len())),
    }
}

/// Format a color as `#rrggbb`, ignoring alpha.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}
