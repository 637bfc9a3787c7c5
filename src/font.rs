//! Font resolution and text rasterization.
//!
//! A [`FontHandle`] is either a TrueType face loaded from disk through
//! `rusttype` or the built-in 5x7 bitmap font. Resolution walks an ordered
//! list of candidate paths and never fails: when nothing loads, the bitmap
//! font is used.

use rusttype::{point, Scale};
use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontError {
    #[error("can't read font {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a usable TrueType/OpenType font")]
    Parse { path: String },
}

/// Why a piece of text could not be rendered with a given font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    EmptyText,
    MissingGlyph(char),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyText => write!(f, "text is empty"),
            SkipReason::MissingGlyph(c) => write!(f, "font has no glyph for {c:?}"),
        }
    }
}

/// Ink bounding box of rendered text, relative to the draw anchor.
/// `max_x`/`max_y` are exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskPixel {
    pub x: i32,
    pub y: i32,
    pub coverage: f32,
}

/// Per-pixel coverage of a rendered string, relative to its anchor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMask {
    pixels: Vec<MaskPixel>,
    bounds: Bounds,
}

impl TextMask {
    /// Builds a mask, keeping the highest coverage where glyphs overlap.
    fn from_pixels(pixels: Vec<MaskPixel>) -> Self {
        let mut merged: HashMap<(i32, i32), f32> = HashMap::with_capacity(pixels.len());
        for pixel in pixels {
            let coverage = merged.entry((pixel.y, pixel.x)).or_insert(0.0);
            *coverage = coverage.max(pixel.coverage);
        }

        let mut pixels: Vec<MaskPixel> = merged
            .into_iter()
            .map(|((y, x), coverage)| MaskPixel { x, y, coverage })
            .collect();
        pixels.sort_by_key(|p| (p.y, p.x));

        let bounds = pixels
            .iter()
            .map(|p| Bounds {
                min_x: p.x,
                min_y: p.y,
                max_x: p.x + 1,
                max_y: p.y + 1,
            })
            .reduce(|a, b| Bounds {
                min_x: a.min_x.min(b.min_x),
                min_y: a.min_y.min(b.min_y),
                max_x: a.max_x.max(b.max_x),
                max_y: a.max_y.max(b.max_y),
            })
            .unwrap_or_default();

        Self { pixels, bounds }
    }

    pub fn pixels(&self) -> &[MaskPixel] {
        &self.pixels
    }

    /// Ink bounds; all zero when the text has no visible pixels.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.is_empty()
    }
}

#[derive(Clone)]
enum Face {
    Outline {
        font: rusttype::Font<'static>,
        path: PathBuf,
    },
    Builtin,
}

/// A glyph source plus a pixel size.
#[derive(Clone)]
pub struct FontHandle {
    face: Face,
    size: f32,
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.face {
            Face::Outline { path, .. } => path.display().to_string(),
            Face::Builtin => "<builtin>".to_string(),
        };
        f.debug_struct("FontHandle")
            .field("source", &source)
            .field("size", &self.size)
            .finish()
    }
}

impl FontHandle {
    /// Loads a TrueType/OpenType face from `path`.
    pub fn load(path: &Path, size: f32) -> Result<Self, FontError> {
        let bytes = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let font = rusttype::Font::try_from_vec(bytes).ok_or_else(|| FontError::Parse {
            path: path.display().to_string(),
        })?;

        Ok(Self {
            face: Face::Outline {
                font,
                path: path.to_path_buf(),
            },
            size,
        })
    }

    /// The built-in bitmap font; always available.
    pub fn builtin(size: f32) -> Self {
        Self {
            face: Face::Builtin,
            size,
        }
    }

    /// Same face at another pixel size.
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            face: self.face.clone(),
            size,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Builtin)
    }

    /// Path of the loaded face, `None` for the built-in font.
    pub fn path(&self) -> Option<&Path> {
        match &self.face {
            Face::Outline { path, .. } => Some(path),
            Face::Builtin => None,
        }
    }

    /// Renders `text` into a coverage mask anchored at the top-left of its
    /// line box (left edge, ascender line).
    pub fn rasterize(&self, text: &str) -> Result<TextMask, SkipReason> {
        if text.is_empty() {
            return Err(SkipReason::EmptyText);
        }

        match &self.face {
            Face::Outline { font, .. } => rasterize_outline(font, self.size, text),
            Face::Builtin => rasterize_builtin(self.size, text),
        }
    }
}

fn rasterize_outline(
    font: &rusttype::Font<'static>,
    size: f32,
    text: &str,
) -> Result<TextMask, SkipReason> {
    if let Some(missing) = text
        .chars()
        .find(|c| !c.is_whitespace() && font.glyph(*c).id().0 == 0)
    {
        return Err(SkipReason::MissingGlyph(missing));
    }

    // `size` is the em size, rusttype scales by ascent - descent.
    let unscaled = font.v_metrics_unscaled();
    let units_per_em = f32::from(font.units_per_em().max(1));
    let scale = Scale::uniform(size * (unscaled.ascent - unscaled.descent) / units_per_em);
    let ascent = font.v_metrics(scale).ascent;

    let mut pixels = Vec::new();
    for glyph in font.layout(text, scale, point(0.0, ascent)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            if coverage > 0.0 {
                pixels.push(MaskPixel {
                    x: bb.min.x + gx as i32,
                    y: bb.min.y + gy as i32,
                    coverage: coverage.min(1.0),
                });
            }
        });
    }

    Ok(TextMask::from_pixels(pixels))
}

const BUILTIN_COLUMNS: i32 = 5;
const BUILTIN_ADVANCE: i32 = BUILTIN_COLUMNS + 1;

/// Integer block size for the bitmap font at a requested pixel size.
pub fn builtin_scale(size: f32) -> i32 {
    ((size / 8.0).round() as i32).max(1)
}

fn rasterize_builtin(size: f32, text: &str) -> Result<TextMask, SkipReason> {
    let rows = text
        .chars()
        .map(|c| builtin_glyph(c).ok_or(SkipReason::MissingGlyph(c)))
        .collect::<Result<Vec<_>, _>>()?;

    let scale = builtin_scale(size);
    let mut pixels = Vec::new();
    for (index, glyph) in rows.iter().enumerate() {
        let origin_x = index as i32 * BUILTIN_ADVANCE * scale;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..BUILTIN_COLUMNS {
                if (*bits >> (BUILTIN_COLUMNS - 1 - col)) & 1 == 0 {
                    continue;
                }
                for by in 0..scale {
                    for bx in 0..scale {
                        pixels.push(MaskPixel {
                            x: origin_x + col * scale + bx,
                            y: row as i32 * scale + by,
                            coverage: 1.0,
                        });
                    }
                }
            }
        }
    }

    Ok(TextMask::from_pixels(pixels))
}

/// 5x7 glyph rows, most significant of the low five bits is the leftmost column.
fn builtin_glyph(c: char) -> Option<[u8; 7]> {
    let rows = match c {
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x00, 0x00, 0x04],
        '"' => [0x0A, 0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00],
        '#' => [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A],
        '&' => [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D],
        '\'' => [0x0C, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x04],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        '@' => [0x0E, 0x11, 0x01, 0x0D, 0x15, 0x15, 0x0E],
        'A' => [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        'a' => [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F],
        'b' => [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x1E],
        'c' => [0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E],
        'd' => [0x01, 0x01, 0x0D, 0x13, 0x11, 0x11, 0x0F],
        'e' => [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E],
        'f' => [0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08],
        'g' => [0x00, 0x0F, 0x11, 0x11, 0x0F, 0x01, 0x0E],
        'h' => [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x11],
        'i' => [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E],
        'j' => [0x02, 0x00, 0x06, 0x02, 0x02, 0x12, 0x0C],
        'k' => [0x10, 0x10, 0x12, 0x14, 0x18, 0x14, 0x12],
        'l' => [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'm' => [0x00, 0x00, 0x1A, 0x15, 0x15, 0x11, 0x11],
        'n' => [0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11],
        'o' => [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E],
        'p' => [0x00, 0x00, 0x1E, 0x11, 0x1E, 0x10, 0x10],
        'q' => [0x00, 0x00, 0x0D, 0x13, 0x0F, 0x01, 0x01],
        'r' => [0x00, 0x00, 0x16, 0x19, 0x10, 0x10, 0x10],
        's' => [0x00, 0x00, 0x0E, 0x10, 0x0E, 0x01, 0x1E],
        't' => [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06],
        'u' => [0x00, 0x00, 0x11, 0x11, 0x11, 0x13, 0x0D],
        'v' => [0x00, 0x00, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'w' => [0x00, 0x00, 0x11, 0x11, 0x15, 0x15, 0x0A],
        'x' => [0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11],
        'y' => [0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E],
        'z' => [0x00, 0x00, 0x1F, 0x02, 0x04, 0x08, 0x1F],
        _ => return None,
    };
    Some(rows)
}

/// Ordered font files probed for a regular or bold face.
pub fn font_candidates(bold: bool) -> Vec<PathBuf> {
    let pick = |bold_path: &str, regular_path: &str| {
        PathBuf::from(if bold { bold_path } else { regular_path })
    };

    vec![
        // Android
        pick("/system/fonts/Roboto-Bold.ttf", "/system/fonts/Roboto-Regular.ttf"),
        pick("/system/fonts/DroidSans-Bold.ttf", "/system/fonts/DroidSans.ttf"),
        // Termux
        pick(
            "/data/data/com.termux/files/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
            "/data/data/com.termux/files/usr/share/fonts/TTF/DejaVuSans.ttf",
        ),
        // Desktop Linux
        pick(
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        ),
        pick(
            "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
        ),
        pick(
            "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        ),
    ]
}

/// Returns the first candidate that loads, or the built-in font.
pub fn resolve_font(candidates: &[PathBuf], size: f32) -> FontHandle {
    candidates
        .iter()
        .find_map(|path| match FontHandle::load(path, size) {
            Ok(font) => {
                log::debug!("using font {}", path.display());
                Some(font)
            }
            Err(err) => {
                log::debug!("skipping font candidate: {err}");
                None
            }
        })
        .unwrap_or_else(|| {
            log::debug!("no font candidate loaded, using the built-in bitmap font");
            FontHandle::builtin(size)
        })
}

/// Resolves each face (regular, bold) once per run and hands out sized handles.
#[derive(Debug)]
pub struct FontBook {
    regular: Vec<PathBuf>,
    bold: Vec<PathBuf>,
    faces: HashMap<bool, FontHandle>,
}

impl FontBook {
    /// System candidates, preceded by `extra` user-supplied paths.
    pub fn system(extra: &[PathBuf]) -> Self {
        let with_extra = |bold| {
            let mut candidates = extra.to_vec();
            candidates.extend(font_candidates(bold));
            candidates
        };
        Self::with_candidates(with_extra(false), with_extra(true))
    }

    pub fn with_candidates(regular: Vec<PathBuf>, bold: Vec<PathBuf>) -> Self {
        Self {
            regular,
            bold,
            faces: HashMap::new(),
        }
    }

    pub fn font(&mut self, size: f32, bold: bool) -> FontHandle {
        let candidates = if bold { &self.bold } else { &self.regular };
        self.faces
            .entry(bold)
            .or_insert_with(|| resolve_font(candidates, size))
            .with_size(size)
    }
}
