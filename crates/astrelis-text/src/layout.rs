//! Multi-line text layout: word wrap, kerning, and horizontal/vertical
//! alignment over a [`crate::font::Font`].

use crate::font::Font;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
    pub align: TextAlign,
    pub vertical_align: VerticalAlign,
    /// Multiplier applied to the font's line height.
    pub line_spacing: f32,
    pub letter_spacing: f32,
    pub enable_kerning: bool,
    pub enable_word_wrap: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_width: None,
            max_height: None,
            align: TextAlign::Left,
            vertical_align: VerticalAlign::Top,
            line_spacing: 1.0,
            letter_spacing: 0.0,
            enable_kerning: true,
            enable_word_wrap: true,
        }
    }
}

/// One positioned character, ready to be turned into a textured-rect draw
/// call by the UI batcher.
#[derive(Debug, Clone, Copy)]
pub struct LayoutChar {
    pub codepoint: char,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub uv_min: (f32, f32),
    pub uv_max: (f32, f32),
    pub advance: f32,
    pub is_whitespace: bool,
    pub is_linebreak: bool,
    pub line_index: u32,
}

#[derive(Debug, Clone)]
pub struct LayoutLine {
    pub start: usize,
    pub end: usize,
    pub width: f32,
}

#[derive(Debug, Clone)]
pub struct TextLayout {
    pub chars: Vec<LayoutChar>,
    pub lines: Vec<LayoutLine>,
    pub width: f32,
    pub height: f32,
    pub truncated: bool,
}

impl TextLayout {
    /// Positioned, textured glyph quads ready for
    /// [`astrelis_render::batch::UiBatcher::add_text`], skipping whitespace
    /// and linebreak characters which have no atlas tile.
    pub fn glyph_quads(&self) -> impl Iterator<Item = astrelis_render::batch::GlyphQuad> + '_ {
        self.chars
            .iter()
            .filter(|c| !c.is_whitespace && !c.is_linebreak)
            .map(|c| astrelis_render::batch::GlyphQuad {
                dx: c.x,
                dy: c.y,
                width: c.width,
                height: c.height,
                uv_min: [c.uv_min.0, c.uv_min.1],
                uv_max: [c.uv_max.0, c.uv_max.1],
            })
    }
}

struct Token {
    codepoint: char,
    advance: f32,
    is_whitespace: bool,
    glyph: crate::font::Glyph,
}

/// Tokenize `text` into per-codepoint advances (kerning already folded in),
/// without deciding line breaks yet.
fn tokenize(font: &Font, text: &str, config: &LayoutConfig) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut prev: Option<char> = None;

    for c in text.chars() {
        if c == '\n' {
            tokens.push(Token {
                codepoint: c,
                advance: 0.0,
                is_whitespace: false,
                glyph: crate::font::Glyph::default(),
            });
            prev = None;
            continue;
        }

        let glyph = font.glyph(c);
        let kerning = if config.enable_kerning {
            prev.map(|p| font.kerning(p, c)).unwrap_or(0.0)
        } else {
            0.0
        };
        tokens.push(Token {
            codepoint: c,
            advance: glyph.advance + kerning + config.letter_spacing,
            is_whitespace: c.is_whitespace(),
            glyph,
        });
        prev = Some(c);
    }

    tokens
}

/// Split tokens (already split on explicit `\n`) into wrapped sub-lines of
/// token index ranges, breaking at the most recent whitespace when a line
/// would exceed `max_width`.
fn wrap_line(tokens: &[Token], max_width: Option<f32>, word_wrap: bool) -> Vec<(usize, usize)> {
    if !word_wrap || max_width.is_none() {
        return vec![(0, tokens.len())];
    }
    let max_width = max_width.unwrap();

    let mut lines = Vec::new();
    let mut line_start = 0usize;
    let mut pen_x = 0.0f32;
    let mut last_whitespace: Option<usize> = None;

    for (i, tok) in tokens.iter().enumerate() {
        if pen_x + tok.advance > max_width && i > line_start {
            let break_at = last_whitespace.map(|w| w + 1).unwrap_or(i);
            let break_at = break_at.max(line_start + 1);
            lines.push((line_start, break_at));
            line_start = break_at;
            pen_x = tokens[line_start..=i].iter().map(|t| t.advance).sum();
            last_whitespace = None;
            continue;
        }
        if tok.is_whitespace {
            last_whitespace = Some(i);
        }
        pen_x += tok.advance;
    }
    lines.push((line_start, tokens.len()));
    lines
}

/// Run full layout: word wrap, per-character positions, then horizontal and
/// vertical alignment.
pub fn layout_text(font: &Font, text: &str, config: &LayoutConfig) -> TextLayout {
    let metrics = font.metrics();
    let line_height = metrics.line_height * config.line_spacing;

    let mut chars = Vec::new();
    let mut lines = Vec::new();
    let mut line_index = 0u32;

    for raw_line in split_on_linebreaks(text) {
        let tokens = tokenize(font, &raw_line, config);
        for (start, end) in wrap_line(&tokens, config.max_width, config.enable_word_wrap) {
            let mut pen_x = 0.0f32;
            let line_start = chars.len();
            for tok in &tokens[start..end] {
                let glyph = &tok.glyph;
                chars.push(LayoutChar {
                    codepoint: tok.codepoint,
                    x: pen_x,
                    y: 0.0,
                    width: glyph.tile_width as f32,
                    height: glyph.tile_height as f32,
                    uv_min: glyph.uv_min,
                    uv_max: glyph.uv_max,
                    advance: tok.advance,
                    is_whitespace: tok.is_whitespace,
                    is_linebreak: false,
                    line_index,
                });
                pen_x += tok.advance;
            }
            lines.push(LayoutLine {
                start: line_start,
                end: chars.len(),
                width: pen_x,
            });
            line_index += 1;
        }
    }

    let content_width = lines.iter().map(|l| l.width).fold(0.0f32, f32::max);
    let align_width = config.max_width.unwrap_or(content_width);

    for line in &lines {
        apply_horizontal_align(&mut chars[line.start..line.end], line.width, align_width, config.align);
    }

    let total_height = line_height * lines.len().max(1) as f32;
    let truncated = apply_vertical_align(&mut chars, total_height, config.max_height, config.vertical_align, line_height, &lines);

    TextLayout {
        chars,
        lines,
        width: content_width,
        height: total_height,
        truncated,
    }
}

fn split_on_linebreaks(text: &str) -> Vec<String> {
    text.split('\n').map(|s| s.to_string()).collect()
}

fn apply_horizontal_align(chars: &mut [LayoutChar], line_width: f32, align_width: f32, align: TextAlign) {
    let dx = match align {
        TextAlign::Left => 0.0,
        TextAlign::Center => (align_width - line_width) / 2.0,
        TextAlign::Right => align_width - line_width,
        TextAlign::Justify => 0.0,
    };
    for c in chars.iter_mut() {
        c.x += dx;
    }

    if align == TextAlign::Justify && !chars.is_empty() {
        let gap_count = chars.iter().filter(|c| c.is_whitespace).count();
        if gap_count > 0 {
            let extra = (align_width - line_width).max(0.0) / gap_count as f32;
            let mut shift = 0.0f32;
            for c in chars.iter_mut() {
                c.x += shift;
                if c.is_whitespace {
                    shift += extra;
                }
            }
        }
    }
}

fn apply_vertical_align(
    chars: &mut [LayoutChar],
    total_height: f32,
    max_height: Option<f32>,
    align: VerticalAlign,
    line_height: f32,
    lines: &[LayoutLine],
) -> bool {
    let dy = match (align, max_height) {
        (VerticalAlign::Top, _) | (_, None) => 0.0,
        (VerticalAlign::Middle, Some(h)) => (h - total_height) / 2.0,
        (VerticalAlign::Bottom, Some(h)) => h - total_height,
    };

    for (i, line) in lines.iter().enumerate() {
        let y = dy + i as f32 * line_height;
        for c in chars[line.start..line.end].iter_mut() {
            c.y = y;
        }
    }

    max_height.is_some_and(|h| total_height > h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::AtlasPixelFormat;
    use crate::font::Quality;
    use crate::rasterize::test_support::find_system_font;

    fn test_font() -> Option<Font> {
        let data = find_system_font()?;
        Some(Font::from_bytes(data, "test".to_string(), Quality::Low, 16.0, AtlasPixelFormat::Grayscale, None).unwrap())
    }

    #[test]
    fn linebreak_starts_a_new_line() {
        let Some(font) = test_font() else {
            eprintln!("skipping: no system font found");
            return;
        };
        let layout = layout_text(&font, "ab\ncd", &LayoutConfig::default());
        assert_eq!(layout.lines.len(), 2);
    }

    #[test]
    fn word_wrap_breaks_at_whitespace() {
        let Some(font) = test_font() else {
            eprintln!("skipping: no system font found");
            return;
        };
        let (word_w, _) = font.measure("hello");
        let config = LayoutConfig {
            max_width: Some(word_w * 1.5),
            ..Default::default()
        };
        let layout = layout_text(&font, "hello world", &config);
        assert!(layout.lines.len() >= 2, "expected a wrap, got {} lines", layout.lines.len());
    }

    #[test]
    fn left_align_keeps_zero_offset() {
        let Some(font) = test_font() else {
            eprintln!("skipping: no system font found");
            return;
        };
        let layout = layout_text(&font, "hi", &LayoutConfig::default());
        assert_eq!(layout.chars[0].x, 0.0);
    }

    #[test]
    fn center_align_shifts_short_line_right_of_left_align() {
        let Some(font) = test_font() else {
            eprintln!("skipping: no system font found");
            return;
        };
        let config = LayoutConfig {
            max_width: Some(200.0),
            align: TextAlign::Center,
            enable_word_wrap: false,
            ..Default::default()
        };
        let layout = layout_text(&font, "hi", &config);
        assert!(layout.chars[0].x > 0.0);
    }

    #[test]
    fn vertical_bottom_align_pushes_lines_down() {
        let Some(font) = test_font() else {
            eprintln!("skipping: no system font found");
            return;
        };
        let config = LayoutConfig {
            max_height: Some(500.0),
            vertical_align: VerticalAlign::Bottom,
            ..Default::default()
        };
        let layout = layout_text(&font, "hi", &config);
        assert!(layout.chars[0].y > 0.0);
        assert!(!layout.truncated);
    }
}
