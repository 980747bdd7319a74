//! Asset loader traits, the type-erased registry, and built-in loaders.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use astrelis_render::GraphicsContext;
use astrelis_render::rhi::{PixelFormat, Texture};
use astrelis_text::{AtlasPixelFormat, Font, Quality};

use crate::Asset;
use crate::error::{AssetError, AssetResult};

/// Loads one asset type from disk.
///
/// Implementors describe which extensions they handle and produce an
/// `Arc<Self::Asset>` synchronously; the cache is responsible for running
/// this off the calling thread when invoked through `load_async`.
pub trait AssetLoader: Send + Sync + 'static {
    type Asset: Asset;

    /// Load the asset at `path`. `params` carries loader-specific options,
    /// downcast from the `&dyn Any` passed to `AssetCache::load_*`.
    fn load(&self, path: &Path, params: &dyn Any) -> AssetResult<Self::Asset>;

    /// Extensions this loader handles, lowercase and without a leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Whether this loader can handle `path`, based on its extension by
    /// default. Loaders with content-sniffing needs may override this.
    fn can_load(&self, path: &Path) -> bool {
        extension_of(path)
            .map(|ext| self.supported_extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    /// Best-effort memory estimate before the asset is actually decoded.
    /// Used only to pre-size bookkeeping; the cache re-measures after load
    /// via [`crate::Asset::memory_usage`].
    fn estimate_memory(&self, _path: &Path) -> usize {
        0
    }
}

fn extension_of(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Type-erased façade over an [`AssetLoader`], so the cache can hold one
/// registry keyed by `TypeId` regardless of concrete asset type.
pub trait ErasedAssetLoader: Send + Sync {
    fn load_erased(&self, path: &Path, params: &dyn Any) -> AssetResult<Arc<dyn Any + Send + Sync>>;
    fn can_load(&self, path: &Path) -> bool;
    fn supported_extensions(&self) -> &[&str];
    fn estimate_memory(&self, path: &Path) -> usize;
    fn asset_type_name(&self) -> &'static str;
}

impl<L: AssetLoader> ErasedAssetLoader for L {
    fn load_erased(&self, path: &Path, params: &dyn Any) -> AssetResult<Arc<dyn Any + Send + Sync>> {
        let asset = self.load(path, params)?;
        Ok(Arc::new(asset) as Arc<dyn Any + Send + Sync>)
    }

    fn can_load(&self, path: &Path) -> bool {
        AssetLoader::can_load(self, path)
    }

    fn supported_extensions(&self) -> &[&str] {
        AssetLoader::supported_extensions(self)
    }

    fn estimate_memory(&self, path: &Path) -> usize {
        AssetLoader::estimate_memory(self, path)
    }

    fn asset_type_name(&self) -> &'static str {
        L::Asset::type_name()
    }
}

/// One loader registered per asset type.
#[derive(Default)]
pub struct LoaderRegistry {
    loaders: HashMap<TypeId, Arc<dyn ErasedAssetLoader>>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: Asset>(&mut self, loader: impl AssetLoader<Asset = T>) {
        self.loaders.insert(TypeId::of::<T>(), Arc::new(loader));
    }

    pub fn unregister<T: Asset>(&mut self) {
        self.loaders.remove(&TypeId::of::<T>());
    }

    pub fn get<T: Asset>(&self) -> Option<Arc<dyn ErasedAssetLoader>> {
        self.loaders.get(&TypeId::of::<T>()).cloned()
    }

    pub fn get_by_type_id(&self, type_id: TypeId) -> Option<Arc<dyn ErasedAssetLoader>> {
        self.loaders.get(&type_id).cloned()
    }
}

/// Parameters accepted by [`TextureLoader`].
#[derive(Debug, Clone)]
pub struct TextureLoadParams {
    pub generate_mipmaps: bool,
    pub srgb: bool,
}

impl Default for TextureLoadParams {
    fn default() -> Self {
        Self {
            generate_mipmaps: false,
            srgb: false,
        }
    }
}

/// Decodes common raster formats (PNG, JPEG, BMP, TGA, GIF, WebP - whatever
/// the `image` crate supports) into a GPU-resident [`Texture`].
///
/// Mip generation and color-space conversion are accepted as load
/// parameters but not yet implemented; `generate_mipmaps`/`srgb` are
/// currently no-ops beyond being recorded. DDS/KTX container formats are
/// not decoded by the `image` crate and are rejected with a loader error.
pub struct TextureLoader {
    context: Arc<GraphicsContext>,
}

impl TextureLoader {
    pub fn new(context: Arc<GraphicsContext>) -> Self {
        Self { context }
    }
}

impl AssetLoader for TextureLoader {
    type Asset = Texture;

    fn load(&self, path: &Path, params: &dyn Any) -> AssetResult<Self::Asset> {
        let _params = params.downcast_ref::<TextureLoadParams>();

        let image = image::open(path).map_err(|err| AssetError::LoaderError {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();

        let texture = Texture::new(self.context.clone(), width, height, PixelFormat::Rgba8Unorm);
        texture.update(rgba.as_raw());
        Ok(texture)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["png", "jpg", "jpeg", "bmp", "tga", "gif", "webp"]
    }

    fn estimate_memory(&self, path: &Path) -> usize {
        std::fs::metadata(path).map(|meta| meta.len() as usize).unwrap_or(0)
    }
}

/// Parameters accepted by [`FontLoader`].
#[derive(Debug, Clone, Copy)]
pub struct FontLoadParams {
    pub size: f32,
    pub quality: Quality,
    pub pixel_format: AtlasPixelFormat,
}

impl Default for FontLoadParams {
    fn default() -> Self {
        Self {
            size: 18.0,
            quality: Quality::Medium,
            pixel_format: AtlasPixelFormat::Sdf,
        }
    }
}

/// Loads TTF/OTF files into a [`Font`] at a caller-chosen size and quality.
/// Without a bound device, the resulting font still loads; atlas GPU
/// uploads queue up until a device is attached later.
pub struct FontLoader {
    context: Option<Arc<GraphicsContext>>,
}

impl FontLoader {
    pub fn new(context: Option<Arc<GraphicsContext>>) -> Self {
        Self { context }
    }
}

impl AssetLoader for FontLoader {
    type Asset = Font;

    fn load(&self, path: &Path, params: &dyn Any) -> AssetResult<Self::Asset> {
        let params = params.downcast_ref::<FontLoadParams>().copied().unwrap_or_default();
        Font::load(path, params.quality, params.size, params.pixel_format, self.context.clone()).map_err(|err| {
            AssetError::LoaderError {
                path: path.to_path_buf(),
                message: err.to_string(),
            }
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["ttf", "otf"]
    }

    fn estimate_memory(&self, path: &Path) -> usize {
        std::fs::metadata(path).map(|meta| meta.len() as usize).unwrap_or(0)
    }
}
