//! Astrelis Text - glyph atlas and font layer for the Astrelis engine.
//!
//! This crate turns Unicode codepoints into GPU-sampleable glyph tiles and
//! lays out multi-line text over them:
//! - [`atlas`]: shelf-packed [`atlas::AtlasPage`]/[`atlas::MultiAtlas`]
//! - [`font`]: [`font::Font`] loading, lazy glyph rasterization, kerning,
//!   fallback
//! - [`layout`]: word wrap and horizontal/vertical alignment over a font
//! - [`sdf`]: SDF/MSDF generation from rasterized coverage
//! - [`rasterize`]: the `fontdue` bytes-in/bitmap-out glyph rasterizer
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use astrelis_text::{Font, Quality, AtlasPixelFormat, LayoutConfig, layout_text};
//!
//! let font = Font::load("my_font.ttf", Quality::Medium, 18.0, AtlasPixelFormat::Sdf, None)
//!     .expect("font should load");
//! let layout = layout_text(&font, "Hello, world!", &LayoutConfig::default());
//! assert!(!layout.chars.is_empty());
//! ```

pub mod atlas;
pub mod error;
pub mod font;
pub mod layout;
pub mod rasterize;
pub mod sdf;

pub use atlas::{AtlasPage, AtlasPixelFormat, GlyphRegion, MultiAtlas};
pub use error::{TextError, TextResult};
pub use font::{Font, FontMetrics, Glyph, Quality};
pub use layout::{LayoutChar, LayoutConfig, LayoutLine, TextAlign, TextLayout, VerticalAlign, layout_text};
pub use sdf::{generate_msdf, generate_sdf};
