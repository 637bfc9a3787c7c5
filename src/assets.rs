//! Layout and generation of the four brand images.

use crate::{
    canvas::{render_gradient, Canvas, RenderError},
    color::Color,
    config::AssetConfig,
    font::FontBook,
    label::stamp_mask,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const ICON_SIZE: u32 = 1024;
pub const SPLASH_WIDTH: u32 = 1284;
pub const SPLASH_HEIGHT: u32 = 2778;
pub const FAVICON_SIZE: u32 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Icon,
    AdaptiveIcon,
    Splash,
    Favicon,
}

impl AssetKind {
    /// Generation order; the favicon is derived from the icon.
    pub const ALL: [AssetKind; 4] = [
        AssetKind::Icon,
        AssetKind::AdaptiveIcon,
        AssetKind::Splash,
        AssetKind::Favicon,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            AssetKind::Icon => "icon.png",
            AssetKind::AdaptiveIcon => "adaptive-icon.png",
            AssetKind::Splash => "splash.png",
            AssetKind::Favicon => "favicon.png",
        }
    }

    pub fn dimensions(self) -> (u32, u32) {
        match self {
            AssetKind::Icon | AssetKind::AdaptiveIcon => (ICON_SIZE, ICON_SIZE),
            AssetKind::Splash => (SPLASH_WIDTH, SPLASH_HEIGHT),
            AssetKind::Favicon => (FAVICON_SIZE, FAVICON_SIZE),
        }
    }

    fn label(self) -> &'static str {
        match self {
            AssetKind::Icon => "app icon",
            AssetKind::AdaptiveIcon => "adaptive icon",
            AssetKind::Splash => "splash screen",
            AssetKind::Favicon => "favicon",
        }
    }
}

/// A file written by [`generate_all_assets`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAsset {
    pub kind: AssetKind,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy)]
enum Vertical {
    /// Vertically centered, then raised by this fraction of the canvas height
    Centered { lift: f64 },
    /// Top of the line box at this fraction of the canvas height
    At(f64),
}

/// Placement of one label, relative to the canvas size.
#[derive(Debug, Clone, Copy)]
struct LabelLayout<'a> {
    text: &'a str,
    /// Font size as a fraction of the canvas width
    size: f64,
    bold: bool,
    vertical: Vertical,
    fill: Color,
    outline: Color,
    outline_width: u32,
}

fn compose(canvas: &mut Canvas, fonts: &mut FontBook, labels: &[LabelLayout<'_>]) {
    let width = canvas.width() as i32;
    let height = canvas.height() as i32;

    for layout in labels {
        let font_size = (width as f64 * layout.size).trunc() as f32;
        let font = fonts.font(font_size, layout.bold);

        let mask = match font.rasterize(layout.text) {
            Ok(mask) => mask,
            Err(reason) => {
                log::warn!("skipping label {:?}: {reason}", layout.text);
                continue;
            }
        };

        let bounds = mask.bounds();
        let x = (width - bounds.width()).div_euclid(2);
        let y = match layout.vertical {
            Vertical::Centered { lift } => {
                (height - bounds.height()).div_euclid(2) - (height as f64 * lift) as i32
            }
            Vertical::At(fraction) => (height as f64 * fraction) as i32,
        };

        stamp_mask(
            canvas,
            (x, y),
            &mask,
            layout.fill,
            layout.outline,
            layout.outline_width,
        );
    }
}

/// Gradient icon with the symbol, the app name above it and the credit below.
pub fn create_app_icon(
    size: u32,
    config: &AssetConfig,
    fonts: &mut FontBook,
) -> Result<Canvas, RenderError> {
    log::info!("Creating app icon ({size}x{size})...");
    let palette = &config.palette;
    let branding = &config.branding;

    let mut icon = render_gradient(size, size, palette.light, palette.dark)?;
    compose(
        &mut icon,
        fonts,
        &[
            LabelLayout {
                text: &branding.symbol,
                size: 0.5,
                bold: true,
                vertical: Vertical::Centered { lift: 0.05 },
                fill: palette.white,
                outline: palette.dark,
                outline_width: 4,
            },
            LabelLayout {
                text: &branding.app_name,
                size: 0.1,
                bold: true,
                vertical: Vertical::At(0.15),
                fill: palette.white,
                outline: palette.dark,
                outline_width: 2,
            },
            LabelLayout {
                text: &branding.credit,
                size: 0.055,
                bold: false,
                vertical: Vertical::At(0.85),
                fill: palette.gold,
                outline: palette.dark,
                outline_width: 2,
            },
        ],
    );

    Ok(icon)
}

/// Light icon meant to be masked by the platform: blue symbol over a white
/// to light-blue gradient.
pub fn create_adaptive_icon(
    size: u32,
    config: &AssetConfig,
    fonts: &mut FontBook,
) -> Result<Canvas, RenderError> {
    log::info!("Creating adaptive icon ({size}x{size})...");
    let palette = &config.palette;
    let branding = &config.branding;

    let mut icon = render_gradient(size, size, palette.white, palette.light)?;
    compose(
        &mut icon,
        fonts,
        &[
            LabelLayout {
                text: &branding.symbol,
                size: 0.55,
                bold: true,
                vertical: Vertical::Centered { lift: 0.08 },
                fill: palette.primary,
                outline: palette.white,
                outline_width: 3,
            },
            LabelLayout {
                text: &branding.app_name,
                size: 0.08,
                bold: true,
                vertical: Vertical::At(0.65),
                fill: palette.primary,
                outline: palette.white,
                outline_width: 2,
            },
        ],
    );

    Ok(icon)
}

pub fn create_splash_screen(
    width: u32,
    height: u32,
    config: &AssetConfig,
    fonts: &mut FontBook,
) -> Result<Canvas, RenderError> {
    log::info!("Creating splash screen ({width}x{height})...");
    let palette = &config.palette;
    let branding = &config.branding;

    let mut splash = render_gradient(width, height, palette.light, palette.dark)?;
    compose(
        &mut splash,
        fonts,
        &[
            LabelLayout {
                text: &branding.symbol,
                size: 0.5,
                bold: true,
                vertical: Vertical::Centered { lift: 0.1 },
                fill: palette.white,
                outline: palette.dark,
                outline_width: 5,
            },
            LabelLayout {
                text: &branding.title,
                size: 0.12,
                bold: true,
                vertical: Vertical::At(0.15),
                fill: palette.white,
                outline: palette.dark,
                outline_width: 3,
            },
            LabelLayout {
                text: &branding.tagline,
                size: 0.06,
                bold: false,
                vertical: Vertical::At(0.24),
                fill: palette.white,
                outline: palette.dark,
                outline_width: 2,
            },
            LabelLayout {
                text: &branding.splash_credit,
                size: 0.055,
                bold: false,
                vertical: Vertical::At(0.88),
                fill: palette.gold,
                outline: palette.dark,
                outline_width: 2,
            },
        ],
    );

    Ok(splash)
}

pub fn create_favicon(icon: &Canvas, size: u32) -> Result<Canvas, RenderError> {
    log::info!("Creating favicon ({size}x{size})...");
    icon.resized(size, size)
}

fn save_asset(canvas: &Canvas, out_dir: &Path, kind: AssetKind) -> Result<GeneratedAsset> {
    let path = out_dir.join(kind.file_name());
    canvas
        .save_png(&path)
        .with_context(|| format!("Failed to save {}", kind.label()))?;
    println!(
        "  ✓ Saved: {} ({}x{})",
        path.display(),
        canvas.width(),
        canvas.height()
    );

    Ok(GeneratedAsset {
        kind,
        path,
        width: canvas.width(),
        height: canvas.height(),
    })
}

/// Renders and writes every asset into `out_dir`, creating it if needed.
pub fn generate_all_assets(
    out_dir: &Path,
    config: &AssetConfig,
    fonts: &mut FontBook,
) -> Result<Vec<GeneratedAsset>> {
    std::fs::create_dir_all(out_dir).context("Can't create output directory")?;

    let mut generated = Vec::with_capacity(AssetKind::ALL.len());

    let icon = create_app_icon(ICON_SIZE, config, fonts).context("Failed to render app icon")?;
    generated.push(save_asset(&icon, out_dir, AssetKind::Icon)?);

    let adaptive = create_adaptive_icon(ICON_SIZE, config, fonts)
        .context("Failed to render adaptive icon")?;
    generated.push(save_asset(&adaptive, out_dir, AssetKind::AdaptiveIcon)?);

    let splash = create_splash_screen(SPLASH_WIDTH, SPLASH_HEIGHT, config, fonts)
        .context("Failed to render splash screen")?;
    generated.push(save_asset(&splash, out_dir, AssetKind::Splash)?);

    let favicon = create_favicon(&icon, FAVICON_SIZE).context("Failed to render favicon")?;
    generated.push(save_asset(&favicon, out_dir, AssetKind::Favicon)?);

    Ok(generated)
}
