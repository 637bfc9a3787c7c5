//! RGB colors used by the gradient renderer and the label compositor.

use image::Rgb;
use serde::Deserialize;
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Errors produced while parsing a color string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    /// The string is not exactly six hex digits (an optional `#` aside)
    #[error("expected 6 hex digits, got {0:?}")]
    InvalidHex(String),

    /// The string is not a color `css-color` understands
    #[error("unrecognised CSS color {0:?}")]
    InvalidCss(String),
}

/// An immutable 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a strict `RRGGBB` / `#RRGGBB` string.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(hex.to_string()));
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self::rgb(r, g, b)),
            _ => Err(ColorError::InvalidHex(hex.to_string())),
        }
    }

    /// Parses any CSS color (`#fff`, `white`, `rgb(46, 124, 238)`, ...).
    /// Alpha is discarded.
    pub fn from_css(css: &str) -> Result<Self, ColorError> {
        let color = css_color::Srgb::from_str(css)
            .map_err(|_| ColorError::InvalidCss(css.to_string()))?;

        let to_channel = |v: f32| (v.clamp(0.0, 1.0) * 255.).round() as u8;
        Ok(Self::rgb(
            to_channel(color.red),
            to_channel(color.green),
            to_channel(color.blue),
        ))
    }

    /// Linear per-channel interpolation, truncated toward zero.
    pub fn lerp(self, other: Color, ratio: f64) -> Color {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * ratio) as u8;
        Color::rgb(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_css(value.trim())
    }
}

impl From<Rgb<u8>> for Color {
    fn from(Rgb([r, g, b]): Rgb<u8>) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        color.to_rgb()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
