//! Loaded fonts: metrics, lazy glyph rasterization, kerning, and fallback.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};

use fontdue::Font as FontdueFont;

use astrelis_render::GraphicsContext;

use crate::atlas::{AtlasPixelFormat, MultiAtlas};
use crate::error::{TextError, TextResult};
use crate::rasterize::{parse_font, rasterize_codepoint};

/// Rasterization quality, mapping to an SDF/MSDF distance-field range in
/// pixels. Higher quality costs more atlas memory per glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Low,
    Medium,
    High,
    Ultra,
}

impl Quality {
    pub fn sdf_range(self) -> f32 {
        match self {
            Quality::Low => 8.0,
            Quality::Medium => 16.0,
            Quality::High => 32.0,
            Quality::Ultra => 64.0,
        }
    }
}

/// Ascent/descent/line-gap metrics for a font at its loaded pixel size.
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
    pub x_height: f32,
    pub cap_height: f32,
    pub line_height: f32,
}

/// A single glyph's placement in the atlas plus metrics needed to position
/// it relative to the pen. `valid = false` marks a synthetic or degraded
/// glyph that carries no atlas tile — layout can still use its `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Glyph {
    pub atlas_id: u32,
    pub tile_x: u32,
    pub tile_y: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub uv_min: (f32, f32),
    pub uv_max: (f32, f32),
    pub bearing_x: f32,
    pub bearing_y: f32,
    pub advance: f32,
    pub valid: bool,
}

impl Glyph {
    fn synthetic(advance: f32) -> Self {
        Self {
            atlas_id: 0,
            tile_x: 0,
            tile_y: 0,
            tile_width: 0,
            tile_height: 0,
            uv_min: (0.0, 0.0),
            uv_max: (0.0, 0.0),
            bearing_x: 0.0,
            bearing_y: 0.0,
            advance,
            valid: false,
        }
    }
}

const ESSENTIAL_ASCII: std::ops::RangeInclusive<u32> = 0x20..=0x7E;
const FALLBACK_CODEPOINT: char = '?';

/// A loaded TrueType/OpenType font at a fixed (pixel-size, quality) pair,
/// with an owned glyph atlas and lazy-rasterization cache.
pub struct Font {
    name: String,
    size: f32,
    quality: Quality,
    pixel_format: AtlasPixelFormat,
    raw: Vec<u8>,
    inner: FontdueFont,
    metrics: FontMetrics,
    glyphs: RwLock<HashMap<char, Glyph>>,
    kerning: RwLock<HashMap<(char, char), f32>>,
    atlas: Mutex<MultiAtlas>,
    rasterize_lock: Mutex<()>,
}

impl Font {
    /// Load a font from a `.ttf`/`.otf` file. If `device` is `None`, loading
    /// still succeeds but atlas GPU uploads queue up until
    /// [`Font::flush_pending_uploads`] is called.
    pub fn load(
        path: impl AsRef<Path>,
        quality: Quality,
        size: f32,
        pixel_format: AtlasPixelFormat,
        device: Option<Arc<GraphicsContext>>,
    ) -> TextResult<Self> {
        let raw = std::fs::read(path.as_ref())?;
        let name = path
            .as_ref()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "font".to_string());
        Self::from_bytes(raw, name, quality, size, pixel_format, device)
    }

    /// Load a font from an in-memory TTF/OTF buffer.
    pub fn from_bytes(
        raw: Vec<u8>,
        name: String,
        quality: Quality,
        size: f32,
        pixel_format: AtlasPixelFormat,
        device: Option<Arc<GraphicsContext>>,
    ) -> TextResult<Self> {
        let inner = parse_font(&raw)?;

        let line_metrics = inner.horizontal_line_metrics(size);
        let metrics = FontMetrics {
            ascent: line_metrics.map(|m| m.ascent).unwrap_or(size * 0.8),
            descent: line_metrics.map(|m| m.descent).unwrap_or(-size * 0.2),
            line_gap: line_metrics.map(|m| m.line_gap).unwrap_or(0.0),
            // fontdue doesn't expose x-height/cap-height directly; approximate
            // from common TrueType proportions at this pixel size.
            x_height: size * 0.5,
            cap_height: size * 0.7,
            line_height: line_metrics.map(|m| m.new_line_size).unwrap_or(size * 1.2),
        };

        let mut atlas = MultiAtlas::new(1024, 1024, pixel_format);
        if let Some(device) = &device {
            atlas.bind_device(device.clone());
        }

        let font = Self {
            name,
            size,
            quality,
            pixel_format,
            raw,
            inner,
            metrics,
            glyphs: RwLock::new(HashMap::new()),
            kerning: RwLock::new(HashMap::new()),
            atlas: Mutex::new(atlas),
            rasterize_lock: Mutex::new(()),
        };

        for cp in ESSENTIAL_ASCII {
            if let Some(c) = char::from_u32(cp) {
                font.glyph(c);
            }
        }

        Ok(font)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    /// Approximate resident memory: the raw font buffer plus every atlas
    /// page's CPU-side pixel storage.
    pub fn memory_usage(&self) -> usize {
        self.raw.len() + self.atlas.lock().unwrap().memory_usage()
    }

    /// Bind a device to this font's atlas, draining any uploads queued while
    /// it had none.
    pub fn flush_pending_uploads(&self, device: Arc<GraphicsContext>) {
        self.atlas.lock().unwrap().bind_device(device);
    }

    /// Look up (lazily rasterizing if needed) the glyph for a codepoint.
    /// Falls back to `?`, then to a synthetic empty glyph, if rasterization
    /// is impossible.
    pub fn glyph(&self, codepoint: char) -> Glyph {
        if let Some(g) = self.glyphs.read().unwrap().get(&codepoint) {
            return *g;
        }

        // Serialize rasterization per font; readers of already-cached glyphs
        // never take this lock.
        let _guard = self.rasterize_lock.lock().unwrap();
        if let Some(g) = self.glyphs.read().unwrap().get(&codepoint) {
            return *g;
        }

        let glyph = self.rasterize(codepoint).unwrap_or_else(|| self.fallback_glyph());
        self.glyphs.write().unwrap().insert(codepoint, glyph);
        glyph
    }

    /// Rasterize one non-cached codepoint. Returns `None` only when the
    /// codepoint itself isn't printable (caller substitutes the fallback).
    fn rasterize(&self, codepoint: char) -> Option<Glyph> {
        if codepoint.is_control() {
            return None;
        }

        let raster = rasterize_codepoint(&self.inner, codepoint, self.size);

        if raster.width == 0 || raster.height == 0 {
            return Some(Glyph::synthetic(raster.advance));
        }

        let pixels = match self.pixel_format {
            AtlasPixelFormat::Grayscale => raster.bitmap.clone(),
            AtlasPixelFormat::Sdf => {
                crate::sdf::generate_sdf(&raster.bitmap, raster.width, raster.height, self.quality.sdf_range())
            }
            AtlasPixelFormat::Msdf => {
                crate::sdf::generate_msdf(&raster.bitmap, raster.width, raster.height, self.quality.sdf_range())
            }
        };

        let mut atlas = self.atlas.lock().unwrap();
        match atlas.allocate(raster.width, raster.height, &pixels) {
            Ok((atlas_id, region)) => {
                let (uv_min, uv_max) = atlas.page(atlas_id).unwrap().uv(&region);
                Some(Glyph {
                    atlas_id,
                    tile_x: region.x,
                    tile_y: region.y,
                    tile_width: region.width,
                    tile_height: region.height,
                    uv_min,
                    uv_max,
                    bearing_x: raster.bearing_x,
                    bearing_y: raster.bearing_y,
                    advance: raster.advance,
                    valid: true,
                })
            }
            // Atlas full even after spilling to a new page (tile too large):
            // degrade gracefully so layout still has a correct advance.
            Err(_) => Some(Glyph::synthetic(raster.advance)),
        }
    }

    fn fallback_glyph(&self) -> Glyph {
        if let Some(g) = self.glyphs.read().unwrap().get(&FALLBACK_CODEPOINT) {
            return *g;
        }
        if let Some(g) = self.rasterize(FALLBACK_CODEPOINT) {
            self.glyphs.write().unwrap().insert(FALLBACK_CODEPOINT, g);
            return g;
        }
        Glyph::synthetic(self.size * 0.3)
    }

    /// Scaled horizontal kerning adjustment between two adjacent codepoints,
    /// zero if the font has no kerning data for the pair.
    pub fn kerning(&self, left: char, right: char) -> f32 {
        if let Some(&v) = self.kerning.read().unwrap().get(&(left, right)) {
            return v;
        }
        let v = self.inner.horizontal_kern(left, right, self.size).unwrap_or(0.0);
        self.kerning.write().unwrap().insert((left, right), v);
        v
    }

    /// Sum of glyph advances plus kerning across `text`, honoring `\n` as a
    /// line break. Returns `(width, height)` where width is the widest line.
    pub fn measure(&self, text: &str) -> (f32, f32) {
        let mut width = 0.0f32;
        let mut max_width = 0.0f32;
        let mut lines = 1u32;
        let mut prev: Option<char> = None;

        for c in text.chars() {
            if c == '\n' {
                max_width = max_width.max(width);
                width = 0.0;
                lines += 1;
                prev = None;
                continue;
            }
            let glyph = self.glyph(c);
            if let Some(p) = prev {
                width += self.kerning(p, c);
            }
            width += glyph.advance;
            prev = Some(c);
        }
        max_width = max_width.max(width);

        (max_width, lines as f32 * self.metrics.line_height)
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("quality", &self.quality)
            .finish()
    }
}

/// `?`-error wiring so `?` on `std::fs::read` inside [`Font::load`] works.
impl From<std::io::Error> for TextError {
    fn from(err: std::io::Error) -> Self {
        TextError::IoError(err.to_string())
    }
}
