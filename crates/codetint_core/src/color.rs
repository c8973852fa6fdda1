//! Hex colour decoding for theme colour strings.

use serde::Serialize;
use std::fmt;

use crate::error::FormatError;

/// Opaque 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decodes `#rrggbb` or `rrggbb`.
    ///
    /// Exactly six hex digits are accepted, read as fixed two-digit windows
    /// at offsets 0, 2 and 4. Shorthand (`#abc`) and alpha (`#rrggbbaa`)
    /// forms are rejected.
    ///
    /// # Errors
    /// Returns [`FormatError`] for any other length or a non-hex digit.
    pub fn from_hex(value: &str) -> Result<Self, FormatError> {
        let digits = value.strip_prefix('#').unwrap_or(value);
        let len = digits.chars().count();
        if len != 6 {
            return Err(FormatError::InvalidLength {
                value: value.to_string(),
                len,
            });
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FormatError::InvalidDigit(value.to_string()));
        }

        let channel = |offset: usize| {
            u8::from_str_radix(&digits[offset..offset + 2], 16)
                .map_err(|_| FormatError::InvalidDigit(value.to_string()))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
