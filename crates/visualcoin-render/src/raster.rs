//! Software raster backend.
//!
//! Paints into an RGBA pixmap and encodes it as PNG. Text needs a font; a
//! canvas without one silently drops labels.

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle as GlyphStyle};
use fontdue::{Font, FontSettings};
use image::{ImageFormat, Rgba, RgbaImage};
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use visualcoin_core::{Canvas, Color, Point, Rect, Size, TextAlign, TextBaseline, TextStyle};

/// Errors from the raster backend.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Font bytes could not be parsed.
    #[error("failed to load font: {0}")]
    Font(String),

    /// PNG encoding or writing failed.
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Reading a font file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested surface exceeds [`RasterCanvas::MAX_DIMENSION`] or cannot
    /// be addressed in memory.
    #[error("surface {width}x{height} is too large")]
    TooLarge {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
}

/// A [`Canvas`] backed by an in-memory RGBA image.
pub struct RasterCanvas {
    image: RgbaImage,
    font: Option<Font>,
    layout: Layout,
}

impl fmt::Debug for RasterCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterCanvas")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("has_font", &self.font.is_some())
            .finish_non_exhaustive()
    }
}

impl RasterCanvas {
    /// Largest accepted width or height in pixels.
    pub const MAX_DIMENSION: u32 = 16_384;

    /// Create a white surface of `width` x `height` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::TooLarge`] when either side exceeds
    /// [`Self::MAX_DIMENSION`] or the pixel buffer would overflow `usize`.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let too_large = || RasterError::TooLarge { width, height };
        if width > Self::MAX_DIMENSION || height > Self::MAX_DIMENSION {
            return Err(too_large());
        }
        usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h))
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(too_large)?;

        Ok(Self {
            image: RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255])),
            font: None,
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        })
    }

    /// Attach a parsed font for labels.
    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Parse TTF/OTF bytes into a font.
    pub fn parse_font(bytes: &[u8]) -> Result<Font, RasterError> {
        Font::from_bytes(bytes, FontSettings::default()).map_err(|e| RasterError::Font(e.to_string()))
    }

    /// Read and parse a font file.
    pub fn load_font(path: impl AsRef<Path>) -> Result<Font, RasterError> {
        let bytes = std::fs::read(path)?;
        Self::parse_font(&bytes)
    }

    /// Check if labels will be drawn.
    #[must_use]
    pub const fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Borrow the pixmap.
    #[must_use]
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the canvas and return the pixmap.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Read one pixel, `None` when out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Encode the surface as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, RasterError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Write the surface to `path` as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RasterError> {
        self.image
            .save_with_format(path.as_ref(), ImageFormat::Png)?;
        Ok(())
    }

    /// Pixel span `[start, end)` covered by `[from, to)`, clipped to `limit`.
    fn span(from: f32, to: f32, limit: u32) -> Option<(u32, u32)> {
        let start = from.round().max(0.0);
        let end = to.round().min(limit as f32);
        (end > start).then_some((start as u32, end as u32))
    }

    fn blend(&mut self, x: u32, y: u32, color: [u8; 4], coverage: u8) {
        let Some(dst) = self.image.get_pixel_mut_checked(x, y) else {
            return;
        };
        let alpha = u32::from(color[3]) * u32::from(coverage) / 255;
        if alpha == 0 {
            return;
        }
        let inv = 255 - alpha;
        for c in 0..3 {
            dst.0[c] = ((u32::from(color[c]) * alpha + u32::from(dst.0[c]) * inv) / 255) as u8;
        }
        dst.0[3] = (alpha + u32::from(dst.0[3]) * inv / 255) as u8;
    }

    fn fill_span(&mut self, rect: Rect, color: [u8; 4], coverage: u8) {
        let rect = rect.sanitized();
        let Some((x0, x1)) = Self::span(rect.x, rect.right(), self.image.width()) else {
            return;
        };
        let Some((y0, y1)) = Self::span(rect.y, rect.bottom(), self.image.height()) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color, coverage);
            }
        }
    }
}

impl Canvas for RasterCanvas {
    fn size(&self) -> Size {
        Size::from((self.image.width(), self.image.height()))
    }

    fn clear(&mut self, color: Color) {
        let pixel = Rgba(color.to_rgba8());
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_span(rect, color.to_rgba8(), 255);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        if !width.is_finite() || width <= 0.0 {
            return;
        }
        let rect = rect.sanitized();
        // Sub-pixel widths become a one pixel hairline at partial coverage.
        let coverage = (width.min(1.0) * 255.0).round() as u8;
        let w = width.max(1.0).min(rect.width.min(rect.height));
        if w <= 0.0 || coverage == 0 {
            return;
        }
        let rgba = color.to_rgba8();
        // Edges are drawn inside the rectangle; corners are not double-blended.
        self.fill_span(Rect::new(rect.x, rect.y, rect.width, w), rgba, coverage);
        self.fill_span(Rect::new(rect.x, rect.bottom() - w, rect.width, w), rgba, coverage);
        let inner = (rect.height - 2.0 * w).max(0.0);
        self.fill_span(Rect::new(rect.x, rect.y + w, w, inner), rgba, coverage);
        self.fill_span(Rect::new(rect.right() - w, rect.y + w, w, inner), rgba, coverage);
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        let Some(font) = self.font.as_ref() else {
            debug!(text, "no font loaded, skipping label");
            return;
        };
        if text.is_empty() || !position.is_finite() {
            return;
        }

        self.layout.reset(&LayoutSettings::default());
        self.layout
            .append(&[font], &GlyphStyle::new(text, style.size, 0));

        let width = self
            .layout
            .glyphs()
            .iter()
            .map(|g| g.x + g.width as f32)
            .fold(0.0_f32, f32::max);
        let height = self.layout.height();
        let baseline = self
            .layout
            .lines()
            .and_then(|lines| lines.first().map(|l| l.baseline_y))
            .unwrap_or(height);

        let dx = match style.align {
            TextAlign::Left => position.x,
            TextAlign::Center => position.x - width / 2.0,
            TextAlign::Right => position.x - width,
        };
        let dy = match style.baseline {
            TextBaseline::Top => position.y,
            TextBaseline::Middle => position.y - height / 2.0,
            TextBaseline::Alphabetic => position.y - baseline,
        };

        let glyphs: Vec<_> = self
            .layout
            .glyphs()
            .iter()
            .map(|g| (g.key, g.x, g.y))
            .collect();
        let rasters: Vec<_> = glyphs
            .into_iter()
            .map(|(key, gx, gy)| (font.rasterize_config(key), gx, gy))
            .collect();

        let rgba = style.color.to_rgba8();
        for ((metrics, bitmap), gx, gy) in rasters {
            if metrics.width == 0 {
                continue;
            }
            let ox = (dx + gx).round() as i64;
            let oy = (dy + gy).round() as i64;
            for (i, coverage) in bitmap.into_iter().enumerate() {
                if coverage == 0 {
                    continue;
                }
                let px = ox + (i % metrics.width) as i64;
                let py = oy + (i / metrics.width) as i64;
                if let (Ok(px), Ok(py)) = (u32::try_from(px), u32::try_from(py)) {
                    self.blend(px, py, rgba, coverage);
                }
            }
        }
    }
}
