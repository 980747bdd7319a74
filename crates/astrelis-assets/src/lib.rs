//! Astrelis Assets - bounded, type-erased asset cache.
//!
//! A single cache maps `(path, type, variant)` keys to reference-counted
//! assets, loading them through a small per-type loader registry either
//! synchronously or on a background priority pool, and evicting least-
//! recently-used entries once configured memory or count limits are
//! exceeded.
//!
//! # Quick start
//!
//! ```ignore
//! use astrelis_assets::prelude::*;
//!
//! let cache = AssetCache::new(AssetCacheConfig::default());
//! cache.register_loader::<String>(MyTextLoader);
//!
//! let doc: Arc<String> = cache.load_sync("readme.txt", "", &())?;
//! ```

pub mod cache;
pub mod error;
pub mod event;
pub mod key;
pub mod loader;
pub mod pool;
pub mod record;

pub use cache::{AssetCache, AssetCacheConfig, AssetCacheStats, AssetCallbacks, AssetFuture};
pub use error::*;
pub use event::{AssetEvent, AssetEventBuffer};
pub use key::{AssetKey, AssetPriority};
pub use loader::{AssetLoader, ErasedAssetLoader, FontLoadParams, FontLoader, LoaderRegistry, TextureLoadParams, TextureLoader};
pub use pool::AssetThreadPool;
pub use record::{AssetRecord, AssetStatus};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Asset, AssetCache, AssetCacheConfig, AssetCacheStats, AssetCallbacks, AssetError, AssetEvent, AssetFuture,
        AssetKey, AssetLoader, AssetPriority, AssetResult, FontLoadParams, FontLoader, TextureLoadParams, TextureLoader,
    };
}

use std::any::Any;

/// Marker trait for types that can be managed as assets.
///
/// This trait combines `Any` (for type erasure) with `Send + Sync` (for
/// thread safety). Types implementing this trait can be loaded, cached, and
/// evicted by [`AssetCache`].
///
/// # Example
///
/// ```ignore
/// use astrelis_assets::Asset;
///
/// #[derive(Debug)]
/// pub struct Texture {
///     pub width: u32,
///     pub height: u32,
///     pub data: Vec<u8>,
/// }
///
/// impl Asset for Texture {
///     fn type_name() -> &'static str {
///         "Texture"
///     }
/// }
/// ```
pub trait Asset: Any + Send + Sync + 'static {
    /// Returns a human-readable name for this asset type.
    /// Used for logging and debugging.
    fn type_name() -> &'static str
    where
        Self: Sized;

    /// Estimated resident memory in bytes, used by the cache's budget and
    /// eviction accounting. Default of zero is appropriate for assets whose
    /// footprint isn't worth tracking.
    fn memory_usage(&self) -> usize {
        0
    }
}

// Implement Asset for common types that might be useful
impl Asset for String {
    fn type_name() -> &'static str {
        "String"
    }

    fn memory_usage(&self) -> usize {
        self.len()
    }
}

impl Asset for Vec<u8> {
    fn type_name() -> &'static str {
        "Bytes"
    }

    fn memory_usage(&self) -> usize {
        self.len()
    }
}

impl Asset for astrelis_render::rhi::Texture {
    fn type_name() -> &'static str {
        "Texture"
    }

    fn memory_usage(&self) -> usize {
        self.width() as usize * self.height() as usize * self.format().bytes_per_texel() as usize
    }
}

impl Asset for astrelis_text::Font {
    fn type_name() -> &'static str {
        "Font"
    }

    fn memory_usage(&self) -> usize {
        self.memory_usage()
    }
}
