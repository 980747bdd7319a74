//! `fontdue`-backed glyph rasterization: bytes in, coverage bitmap out.

use fontdue::{Font as FontdueFont, FontSettings};

use crate::error::{TextError, TextResult};

/// Parse raw TTF/OTF bytes into a `fontdue` font usable for rasterization
/// and metrics queries.
pub fn parse_font(data: &[u8]) -> TextResult<FontdueFont> {
    FontdueFont::from_bytes(data, FontSettings::default())
        .map_err(|e| TextError::InvalidFontData(e.to_string()))
}

/// A single rasterized glyph: grayscale coverage plus the metrics needed to
/// place it relative to the pen position.
pub struct RasterizedGlyph {
    pub width: u32,
    pub height: u32,
    /// Left bearing: horizontal offset from the pen to the bitmap's left edge.
    pub bearing_x: f32,
    /// Bottom bearing: vertical offset from the baseline to the bitmap's
    /// bottom edge (fontdue's `ymin`, positive extends below baseline).
    pub bearing_y: f32,
    pub advance: f32,
    /// Tightly packed grayscale coverage, `width * height` bytes.
    pub bitmap: Vec<u8>,
}

/// Rasterize one codepoint at the given pixel size.
pub fn rasterize_codepoint(font: &FontdueFont, codepoint: char, size_px: f32) -> RasterizedGlyph {
    let (metrics, bitmap) = font.rasterize(codepoint, size_px);
    RasterizedGlyph {
        width: metrics.width as u32,
        height: metrics.height as u32,
        bearing_x: metrics.xmin as f32,
        bearing_y: metrics.ymin as f32,
        advance: metrics.advance_width,
        bitmap,
    }
}

/// Advance width for a codepoint without rasterizing its bitmap.
pub fn advance_for(font: &FontdueFont, codepoint: char, size_px: f32) -> f32 {
    font.metrics(codepoint, size_px).advance_width
}

#[cfg(test)]
pub(crate) mod test_support {
    /// Best-effort lookup of a real TTF on the host, so rasterization tests
    /// exercise the actual `fontdue` path instead of a fabricated blob.
    /// Tests using this skip (rather than fail) when none is found.
    pub fn find_system_font() -> Option<Vec<u8>> {
        const CANDIDATES: &[&str] = &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];
        CANDIDATES.iter().find_map(|p| std::fs::read(p).ok())
    }
}
