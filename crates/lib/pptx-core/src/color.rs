//! RGB colors and hex-string parsing.

use std::error::Error;
use std::fmt;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Raised when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorError {
    value: String,
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex color '{}'", self.value)
    }
}

impl Error for ColorError {}

impl Color {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` or `RRGGBB` into a color.
    ///
    /// A leading `#` is stripped; the remainder must be exactly three
    /// 2-digit base-16 channels.
    ///
    /// # Errors
    /// Returns [`ColorError`] when the input is not six hex digits.
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let hex = input.strip_prefix('#').unwrap_or(input);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError {
                value: input.to_string(),
            });
        }
        let channel = |range| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorError {
                value: input.to_string(),
            })
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Renders the color as the 6-digit uppercase hex the XML schema wants.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_hash_prefix() {
        assert_eq!(Color::from_hex("#44B4FF"), Ok(Color::new(68, 180, 255)));
    }

    #[test]
    fn parses_without_hash_prefix() {
        assert_eq!(Color::from_hex("44B4FF"), Ok(Color::new(68, 180, 255)));
    }

    #[test]
    fn parses_lowercase() {
        assert_eq!(Color::from_hex("#ff0000"), Ok(Color::new(255, 0, 0)));
    }

    #[test]
    fn rejects_short_input() {
        assert!(Color::from_hex("#FFF").is_err());
    }

    #[test]
    fn rejects_non_hex_digits() {
        assert!(Color::from_hex("#GGHHII").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn renders_uppercase_hex() {
        assert_eq!(Color::new(68, 114, 196).to_hex(), "4472C4");
    }
}
