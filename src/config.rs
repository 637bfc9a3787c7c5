//! Palette and branding passed explicitly to every image builder.

use crate::color::Color;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("can't read config {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Brand colors. Entries in a config file accept any CSS color.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub primary: Color,
    pub dark: Color,
    pub light: Color,
    pub white: Color,
    pub gold: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::rgb(0x2E, 0x7C, 0xEE),
            dark: Color::rgb(0x1E, 0x5B, 0xB8),
            light: Color::rgb(0x5B, 0xA3, 0xFF),
            white: Color::rgb(0xFF, 0xFF, 0xFF),
            gold: Color::rgb(0xFF, 0xD7, 0x00),
        }
    }
}

/// Strings stamped on the images.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Branding {
    /// Shown above the symbol on the icons
    pub app_name: String,
    /// The large centered mark
    pub symbol: String,
    /// Splash screen title
    pub title: String,
    /// Splash screen subtitle
    pub tagline: String,
    /// Author credit on the app icon
    pub credit: String,
    /// Author credit on the splash screen
    pub splash_credit: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            app_name: "UWtopia".to_string(),
            symbol: "Rx".to_string(),
            title: "UWtopia Rx".to_string(),
            tagline: "Medical Question Bank".to_string(),
            credit: "@DrEndris".to_string(),
            splash_credit: "by @DrEndris".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetConfig {
    pub palette: Palette,
    pub branding: Branding,
}

impl AssetConfig {
    /// Reads a JSON config; absent fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
