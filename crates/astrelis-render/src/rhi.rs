//! Thin RHI (rendering hardware interface) wrapper types.
//!
//! These wrap the concrete `wgpu` resources the rest of the crate consumes
//! (ring buffer, UI batcher) behind the small, opaque surface a backend is
//! expected to provide: buffers, textures, samplers, and pipeline state.
//! Device/context access stays on [`crate::GraphicsContext`]; this module
//! only adds the resource wrappers `GraphicsContext` doesn't already have.

use std::sync::Arc;

use crate::GraphicsContext;

/// Pixel formats the core is aware of. Maps 1:1 onto a `wgpu::TextureFormat`
/// subset; backends that don't support a given format surface that as a
/// [`crate::GraphicsError::ResourceCreation`]-style error at texture
/// creation time, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    R8Unorm,
    Rg8Unorm,
    Rgba8Unorm,
    R16Uint,
    R32Uint,
    Depth24PlusStencil8,
    Bc1RgbaUnorm,
    Bc3RgbaUnorm,
}

impl PixelFormat {
    pub fn to_wgpu(self) -> wgpu::TextureFormat {
        match self {
            PixelFormat::R8Unorm => wgpu::TextureFormat::R8Unorm,
            PixelFormat::Rg8Unorm => wgpu::TextureFormat::Rg8Unorm,
            PixelFormat::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
            PixelFormat::R16Uint => wgpu::TextureFormat::R16Uint,
            PixelFormat::R32Uint => wgpu::TextureFormat::R32Uint,
            PixelFormat::Depth24PlusStencil8 => wgpu::TextureFormat::Depth24PlusStencil8,
            PixelFormat::Bc1RgbaUnorm => wgpu::TextureFormat::Bc1RgbaUnorm,
            PixelFormat::Bc3RgbaUnorm => wgpu::TextureFormat::Bc3RgbaUnorm,
        }
    }

    /// Bytes per texel, for formats the atlas/texture loader write linearly.
    /// Block-compressed formats are not expected to go through this path.
    pub fn bytes_per_texel(self) -> u32 {
        match self {
            PixelFormat::R8Unorm => 1,
            PixelFormat::Rg8Unorm => 2,
            PixelFormat::Rgba8Unorm => 4,
            PixelFormat::R16Uint => 2,
            PixelFormat::R32Uint => 4,
            PixelFormat::Depth24PlusStencil8 => 4,
            PixelFormat::Bc1RgbaUnorm | PixelFormat::Bc3RgbaUnorm => 0,
        }
    }
}

/// Primitive topologies the core may bind before an indexed/non-indexed draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    PointList,
    LineList,
    LineStrip,
    TriangleList,
    TriangleStrip,
}

impl PrimitiveTopology {
    pub fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            PrimitiveTopology::PointList => wgpu::PrimitiveTopology::PointList,
            PrimitiveTopology::LineList => wgpu::PrimitiveTopology::LineList,
            PrimitiveTopology::LineStrip => wgpu::PrimitiveTopology::LineStrip,
            PrimitiveTopology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
            PrimitiveTopology::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
        }
    }
}

/// An opaque GPU texture plus the view the pipeline samples from.
pub struct Texture {
    context: Arc<GraphicsContext>,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    format: PixelFormat,
    width: u32,
    height: u32,
}

impl Texture {
    /// Create an empty texture of the given size, usable as a sampled
    /// texture and as a copy destination (atlas pages, loaded textures).
    pub fn new(context: Arc<GraphicsContext>, width: u32, height: u32, format: PixelFormat) -> Self {
        let texture = context.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("astrelis texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: format.to_wgpu(),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            context,
            texture,
            view,
            format,
            width,
            height,
        }
    }

    pub fn backend_handle(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Upload pixel data covering the whole texture, tightly packed.
    pub fn update(&self, data: &[u8]) {
        self.update_subresource(0, 0, self.width, self.height, data);
    }

    /// Upload a subresource region of this texture. `data` must be tightly
    /// packed rows of `w * bytes_per_texel` bytes.
    pub fn update_subresource(&self, x: u32, y: u32, w: u32, h: u32, data: &[u8]) {
        let bpt = self.format.bytes_per_texel();
        self.context.queue().write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w * bpt),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );
    }

    pub fn memory_usage(&self) -> u64 {
        self.width as u64 * self.height as u64 * self.format.bytes_per_texel() as u64
    }
}

/// Texture filtering mode for a [`Sampler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Point,
    Linear,
    Anisotropic,
}

/// Texture addressing mode for a [`Sampler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    Wrap,
    Mirror,
    Clamp,
    Border,
}

impl AddressMode {
    fn to_wgpu(self) -> wgpu::AddressMode {
        match self {
            AddressMode::Wrap => wgpu::AddressMode::Repeat,
            AddressMode::Mirror => wgpu::AddressMode::MirrorRepeat,
            AddressMode::Clamp => wgpu::AddressMode::ClampToEdge,
            AddressMode::Border => wgpu::AddressMode::ClampToBorder,
        }
    }
}

/// Descriptor used to construct a [`Sampler`].
#[derive(Debug, Clone, Copy)]
pub struct SamplerDescriptor {
    pub filter: FilterMode,
    pub address_u: AddressMode,
    pub address_v: AddressMode,
    pub address_w: AddressMode,
    pub mip_lod_bias: f32,
    pub max_anisotropy: u16,
    pub min_lod: f32,
    pub max_lod: f32,
}

impl Default for SamplerDescriptor {
    fn default() -> Self {
        Self {
            filter: FilterMode::Linear,
            address_u: AddressMode::Clamp,
            address_v: AddressMode::Clamp,
            address_w: AddressMode::Clamp,
            mip_lod_bias: 0.0,
            max_anisotropy: 1,
            min_lod: 0.0,
            max_lod: 32.0,
        }
    }
}

/// An opaque sampler, constructed once and reused across draws.
pub struct Sampler {
    sampler: wgpu::Sampler,
}

impl Sampler {
    pub fn new(context: &GraphicsContext, desc: SamplerDescriptor) -> Self {
        let filter = match desc.filter {
            FilterMode::Point => wgpu::FilterMode::Nearest,
            FilterMode::Linear | FilterMode::Anisotropic => wgpu::FilterMode::Linear,
        };

        let sampler = context.device().create_sampler(&wgpu::SamplerDescriptor {
            label: Some("astrelis sampler"),
            address_mode_u: desc.address_u.to_wgpu(),
            address_mode_v: desc.address_v.to_wgpu(),
            address_mode_w: desc.address_w.to_wgpu(),
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: filter,
            lod_min_clamp: desc.min_lod,
            lod_max_clamp: desc.max_lod,
            anisotropy_clamp: desc.max_anisotropy.max(1),
            ..Default::default()
        });

        Self { sampler }
    }

    pub fn backend_handle(&self) -> &wgpu::Sampler {
        &self.sampler
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_format_bytes_per_texel() {
        assert_eq!(PixelFormat::R8Unorm.bytes_per_texel(), 1);
        assert_eq!(PixelFormat::Rgba8Unorm.bytes_per_texel(), 4);
    }

    #[test]
    fn texture_memory_usage_scales_with_dimensions() {
        let ctx = GraphicsContext::new_owned_sync().expect("failed to create graphics context");
        let texture = Texture::new(ctx, 256, 128, PixelFormat::R8Unorm);
        assert_eq!(texture.memory_usage(), 256 * 128);
    }
}
