//! Draws branded app icons, an adaptive icon, a splash screen and a favicon
//! from vertical gradients and outlined text labels.

pub mod assets;
pub mod canvas;
pub mod color;
pub mod config;
pub mod font;
pub mod label;
pub mod logging;

pub use assets::{generate_all_assets, AssetKind, GeneratedAsset};
pub use canvas::{render_gradient, Canvas, RenderError};
pub use color::{Color, ColorError};
pub use config::{AssetConfig, Branding, Palette};
pub use font::{resolve_font, FontBook, FontHandle, SkipReason};
pub use label::{outline_offsets, stamp_label, stamp_mask, LabelSpec, StampOutcome};
