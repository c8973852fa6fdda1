//! Host appearance mode and the foreground it implies.

use serde::Deserialize;
use std::str::FromStr;

use crate::color::Rgb;

/// Appearance mode the host reports at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    Dark,
    /// Host did not say. Treated like [`Appearance::Dark`]; the real system
    /// appearance is never introspected.
    #[default]
    Default,
}

impl Appearance {
    /// Foreground used for tokens no theme rule coloured.
    pub fn default_foreground(self) -> Rgb {
        match self {
            Appearance::Light => Rgb::BLACK,
            Appearance::Dark | Appearance::Default => Rgb::WHITE,
        }
    }

    /// Lowercase name, as accepted by [`str::parse`].
    pub fn as_str(self) -> &'static str {
        match self {
            Appearance::Light => "light",
            Appearance::Dark => "dark",
            Appearance::Default => "default",
        }
    }
}

impl FromStr for Appearance {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Appearance::Light),
            "dark" => Ok(Appearance::Dark),
            "" | "default" | "system" => Ok(Appearance::Default),
            other => Err(format!("unknown appearance '{}'", other)),
        }
    }
}
