//! Astrelis - per-frame GPU ring buffers, glyph atlases, and a UI batcher
//! backed by a type-indexed asset cache.
//!
//! Astrelis is the 2D rendering core shared by Astrelis applications. It
//! provides:
//!
//! - **Ring buffering**: N-buffered GPU scratch allocations for per-frame
//!   uniform/vertex uploads without stalling the GPU.
//! - **Glyph atlases**: lazy glyph rasterization (bitmap, SDF, MSDF) packed
//!   into growable atlas pages, with kerning and text layout.
//! - **UI batching**: an immediate-mode vertex/index batcher that coalesces
//!   2D draw primitives into the minimum number of draw calls, with a
//!   scissor-rect stack and texture-slot binding.
//! - **Asset caching**: a type-indexed, LRU, memory-budgeted cache with a
//!   priority-ordered background loader pool.
//!
//! # Quick Start
//!
//! ```ignore
//! use astrelis::prelude::*;
//!
//! let mut cache = AssetCache::new(AssetCacheConfig::default());
//! cache.register_loader(TextureLoader::new());
//! let handle = cache.load::<Texture>("sprites/hero.png", AssetPriority::High)?;
//! ```

pub mod task_pool;

// Re-export core types
pub use astrelis_core as core;
pub use astrelis_core::math;

#[cfg(feature = "assets")]
pub use astrelis_assets as assets;

#[cfg(feature = "render")]
pub use astrelis_render as render;

#[cfg(feature = "text")]
pub use astrelis_text as text;

pub use task_pool::TaskPool;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::task_pool::TaskPool;

    // Core math types
    pub use astrelis_core::math::{Mat4, Vec2, Vec3, Vec4};
    pub use astrelis_core::geometry::{Pos, Rect, Size};

    // Render types: ring buffer and UI batcher
    #[cfg(feature = "render")]
    pub use astrelis_render::{
        GraphicsContext,
        batch::{BatcherConfig, GlyphQuad, RenderError, ScissorRect, UiBatcher, Vertex},
        ring_buffer::{RingBuffer, RingBufferAllocation, RingBufferConfig, RingBufferError},
    };

    // Text types: glyph atlas, font, layout
    #[cfg(feature = "text")]
    pub use astrelis_text::{
        AtlasPage, AtlasPixelFormat, Font, FontMetrics, Glyph, GlyphRegion, LayoutChar,
        LayoutConfig, LayoutLine, MultiAtlas, Quality, TextAlign, TextError, TextLayout,
        VerticalAlign, layout_text,
    };

    // Asset types
    #[cfg(feature = "assets")]
    pub use astrelis_assets::{
        AssetCache, AssetCacheConfig, AssetError, AssetEvent, AssetKey, AssetLoader,
        AssetPriority, AssetRecord, FontLoader, TextureLoader,
    };
}
