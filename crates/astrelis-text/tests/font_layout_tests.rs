//! Integration tests exercising font loading, glyph rasterization, and
//! layout against a real system TTF.

use astrelis_text::{AtlasPixelFormat, Font, LayoutConfig, Quality, TextAlign, layout_text};

fn find_system_font() -> Option<Vec<u8>> {
    const CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    ];
    CANDIDATES.iter().find_map(|p| std::fs::read(p).ok())
}

macro_rules! require_font {
    () => {
        match find_system_font() {
            Some(data) => data,
            None => {
                eprintln!("skipping: no system font found");
                return;
            }
        }
    };
}

#[test]
fn load_without_device_defers_gpu_upload_but_still_succeeds() {
    let data = require_font!();
    let font = Font::from_bytes(data, "no_device".into(), Quality::Medium, 18.0, AtlasPixelFormat::Sdf, None)
        .expect("load should succeed without a device");
    let glyph = font.glyph('A');
    assert!(glyph.valid);
}

#[test]
fn same_glyph_requested_twice_returns_same_atlas_region() {
    let data = require_font!();
    let font = Font::from_bytes(data, "dup".into(), Quality::Medium, 20.0, AtlasPixelFormat::Sdf, None).unwrap();
    let first = font.glyph('A');
    let second = font.glyph('A');
    assert_eq!(first.atlas_id, second.atlas_id);
    assert_eq!((first.tile_x, first.tile_y), (second.tile_x, second.tile_y));
}

#[test]
fn layout_justify_distributes_gap_across_whitespace() {
    let data = require_font!();
    let font = Font::from_bytes(data, "justify".into(), Quality::Low, 16.0, AtlasPixelFormat::Grayscale, None).unwrap();

    let config = LayoutConfig {
        max_width: Some(400.0),
        align: TextAlign::Justify,
        enable_word_wrap: false,
        ..Default::default()
    };
    let layout = layout_text(&font, "one two three", &config);
    assert_eq!(layout.lines.len(), 1);

    // The last non-space char should land further right than it would
    // under left alignment, since justify pushes inter-word gaps wider.
    let last = layout.chars.last().unwrap();
    assert!(last.x > 0.0);
}

#[test]
fn truncation_is_reported_when_content_exceeds_max_height() {
    let data = require_font!();
    let font = Font::from_bytes(data, "trunc".into(), Quality::Low, 16.0, AtlasPixelFormat::Grayscale, None).unwrap();
    let config = LayoutConfig {
        max_height: Some(1.0),
        ..Default::default()
    };
    let layout = layout_text(&font, "a\nb\nc\nd", &config);
    assert!(layout.truncated);
}
