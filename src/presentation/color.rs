//! ARGB colors
//!
//! Colors are parsed from `#RRGGBB` or `#AARRGGBB` strings, the latter
//! putting alpha first.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{de, Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Argb(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}, expected #RRGGBB or #AARRGGBB")]
pub struct ParseColorError(String);

impl Argb {
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    pub const BLACK: Self = Self(0xFF00_0000);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    pub const fn is_opaque(self) -> bool {
        self.alpha() == 0xFF
    }

    /// Source-over composition onto an opaque `base`.
    pub fn over(self, base: Argb) -> Argb {
        let alpha = u32::from(self.alpha());
        let mix = |top: u8, bottom: u8| -> u8 {
            let value = (u32::from(top) * alpha + u32::from(bottom) * (255 - alpha) + 127) / 255;
            value as u8
        };
        Argb::from_argb(
            0xFF,
            mix(self.red(), base.red()),
            mix(self.green(), base.green()),
            mix(self.blue(), base.blue()),
        )
    }

    /// Terminal color, dropping alpha.
    pub fn to_color(self) -> Color {
        Color::Rgb(self.red(), self.green(), self.blue())
    }

    /// Inverse of [`Self::to_color`] for RGB terminal colors.
    pub fn from_color(color: Color) -> Option<Argb> {
        match color {
            Color::Rgb(r, g, b) => Some(Argb::from_argb(0xFF, r, g, b)),
            Color::Black => Some(Argb::BLACK),
            Color::White => Some(Argb::WHITE),
            _ => None,
        }
    }
}

impl FromStr for Argb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseColorError(s.to_owned());
        let hex = s.trim().strip_prefix('#').ok_or_else(error)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(error());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| error())?;
        match hex.len() {
            6 => Ok(Argb(0xFF00_0000 | value)),
            8 => Ok(Argb(value)),
            _ => Err(error()),
        }
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
        } else {
            write!(f, "#{:08X}", self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Argb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
