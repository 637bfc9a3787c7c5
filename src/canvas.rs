//! Gradient canvases and their PNG encoding.

use crate::color::Color;
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    imageops::{self, FilterType},
    ColorType, ImageEncoder, RgbImage,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid canvas dimensions {width}x{height}: both must be positive")]
    InvalidDimension { width: u32, height: u32 },

    #[error("failed to write {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode PNG")]
    Encode(#[from] image::ImageError),
}

/// An RGB pixel buffer whose dimensions are fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbImage,
}

/// Fills a `width` x `height` canvas with a vertical gradient.
///
/// Row `y` takes `top.lerp(bottom, y / height)`, so the first row is exactly
/// `top` and the last row stops one step short of `bottom`.
pub fn render_gradient(
    width: u32,
    height: u32,
    top: Color,
    bottom: Color,
) -> Result<Canvas, RenderError> {
    check_dimensions(width, height)?;

    let mut image = RgbImage::new(width, height);
    for (y, row) in image.enumerate_rows_mut() {
        let color = top.lerp(bottom, y as f64 / height as f64).to_rgb();
        for (_, _, pixel) in row {
            *pixel = color;
        }
    }

    Ok(Canvas { image })
}

fn check_dimensions(width: u32, height: u32) -> Result<(), RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimension { width, height });
    }
    Ok(())
}

impl Canvas {
    /// A canvas filled with a single color.
    pub fn solid(width: u32, height: u32, color: Color) -> Result<Self, RenderError> {
        render_gradient(width, height, color, color)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        (*self.image.get_pixel(x, y)).into()
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }

    /// Blends `color` over the pixel at (`x`, `y`) with the given coverage.
    /// Coordinates outside the canvas are ignored.
    pub(crate) fn blend(&mut self, x: i64, y: i64, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }

        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        if coverage >= 1.0 {
            *pixel = color.to_rgb();
            return;
        }

        let src = [color.r, color.g, color.b];
        for (dst, src) in pixel.0.iter_mut().zip(src) {
            let mixed = *dst as f32 + (src as f32 - *dst as f32) * coverage;
            *dst = mixed.round().clamp(0.0, 255.0) as u8;
        }
    }

    /// Returns a new canvas resampled to `width` x `height` with Lanczos3.
    pub fn resized(&self, width: u32, height: u32) -> Result<Canvas, RenderError> {
        check_dimensions(width, height)?;
        Ok(Canvas {
            image: imageops::resize(&self.image, width, height, FilterType::Lanczos3),
        })
    }

    /// Encodes the canvas as an 8-bit RGB PNG at `path`.
    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        let io_err = |source| RenderError::Io {
            path: path.display().to_string(),
            source,
        };

        let mut out_file = BufWriter::new(File::create(path).map_err(io_err)?);
        write_png(&self.image, &mut out_file)?;
        out_file.flush().map_err(io_err)?;
        Ok(())
    }
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image: &RgbImage, w: W) -> Result<(), RenderError> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgb8)?;
    Ok(())
}
