//! Shelf-packed glyph atlas pages.
//!
//! A page is a single CPU-side pixel buffer backed by one GPU texture. Tiles
//! are placed with a row ("shelf") packer in arrival order; once placed, a
//! tile's region is immutable for the page's lifetime. [`MultiAtlas`] owns a
//! growing list of pages and allocates a new one whenever the active page is
//! full.

use std::sync::Arc;

use astrelis_render::GraphicsContext;
use astrelis_render::rhi::{PixelFormat, Texture};

use crate::error::{TextError, TextResult};

/// Pixel layout a page stores glyph tiles in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtlasPixelFormat {
    /// Single-channel rasterized coverage.
    Grayscale,
    /// Single-channel signed distance field.
    Sdf,
    /// Three-channel multi-channel signed distance field.
    Msdf,
}

impl AtlasPixelFormat {
    fn channels(self) -> u32 {
        match self {
            AtlasPixelFormat::Grayscale | AtlasPixelFormat::Sdf => 1,
            AtlasPixelFormat::Msdf => 3,
        }
    }

    fn to_rhi(self) -> PixelFormat {
        match self {
            AtlasPixelFormat::Grayscale | AtlasPixelFormat::Sdf => PixelFormat::R8Unorm,
            // No 3-channel RHI format; MSDF pages upload padded to 4 channels.
            AtlasPixelFormat::Msdf => PixelFormat::Rgba8Unorm,
        }
    }
}

/// A placed tile's position and size within a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Row-based ("shelf") packer: glyphs fill the current row left to right;
/// when one doesn't fit, a new row starts below the tallest glyph placed so
/// far in the current row.
struct ShelfPacker {
    page_width: u32,
    page_height: u32,
    current_x: u32,
    current_y: u32,
    shelf_height: u32,
}

impl ShelfPacker {
    fn new(page_width: u32, page_height: u32) -> Self {
        Self {
            page_width,
            page_height,
            current_x: 0,
            current_y: 0,
            shelf_height: 0,
        }
    }

    fn pack(&mut self, width: u32, height: u32) -> Option<GlyphRegion> {
        if self.current_x + width > self.page_width {
            self.current_y += self.shelf_height;
            self.current_x = 0;
            self.shelf_height = 0;
        }

        if self.current_y + height > self.page_height {
            return None;
        }

        let region = GlyphRegion {
            x: self.current_x,
            y: self.current_y,
            width,
            height,
        };

        self.current_x += width;
        self.shelf_height = self.shelf_height.max(height);

        Some(region)
    }

    fn reset(&mut self) {
        self.current_x = 0;
        self.current_y = 0;
        self.shelf_height = 0;
    }
}

/// One rectangular page of packed glyph tiles, backed by a GPU texture once
/// a device becomes available.
pub struct AtlasPage {
    id: u32,
    width: u32,
    height: u32,
    format: AtlasPixelFormat,
    packer: ShelfPacker,
    pixels: Vec<u8>,
    texture: Option<Arc<Texture>>,
    pending_uploads: Vec<(GlyphRegion, Vec<u8>)>,
}

impl AtlasPage {
    fn new(id: u32, width: u32, height: u32, format: AtlasPixelFormat) -> Self {
        let channels = format.channels() as usize;
        Self {
            id,
            width,
            height,
            format,
            packer: ShelfPacker::new(width, height),
            pixels: vec![0u8; width as usize * height as usize * channels],
            texture: None,
            pending_uploads: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn texture(&self) -> Option<&Arc<Texture>> {
        self.texture.as_ref()
    }

    /// Create the backing GPU texture and drain any uploads queued while the
    /// page had no device.
    pub fn bind_device(&mut self, context: &Arc<GraphicsContext>) {
        if self.texture.is_some() {
            return;
        }
        let texture = Texture::new(context.clone(), self.width, self.height, self.format.to_rhi());
        self.texture = Some(Arc::new(texture));
        self.flush_pending_uploads();
    }

    /// Place a tile and copy its pixels into the page. Returns `None` if the
    /// tile does not fit in the remaining space.
    pub fn allocate(&mut self, width: u32, height: u32, pixels: &[u8]) -> Option<GlyphRegion> {
        let region = self.packer.pack(width, height)?;
        self.blit(&region, pixels);

        if self.texture.is_some() {
            self.upload(&region, pixels);
        } else {
            self.pending_uploads.push((region, pixels.to_vec()));
        }

        Some(region)
    }

    fn blit(&mut self, region: &GlyphRegion, pixels: &[u8]) {
        let channels = self.format.channels() as usize;
        let page_stride = self.width as usize * channels;
        let tile_stride = region.width as usize * channels;

        for row in 0..region.height as usize {
            let dst_start = (region.y as usize + row) * page_stride + region.x as usize * channels;
            let src_start = row * tile_stride;
            self.pixels[dst_start..dst_start + tile_stride]
                .copy_from_slice(&pixels[src_start..src_start + tile_stride]);
        }
    }

    fn upload(&self, region: &GlyphRegion, pixels: &[u8]) {
        let Some(texture) = &self.texture else { return };
        match self.format {
            AtlasPixelFormat::Msdf => {
                // Pad 3-channel MSDF data to RGBA8 for upload.
                let mut padded = Vec::with_capacity(pixels.len() / 3 * 4);
                for chunk in pixels.chunks_exact(3) {
                    padded.extend_from_slice(&[chunk[0], chunk[1], chunk[2], 255]);
                }
                texture.update_subresource(region.x, region.y, region.width, region.height, &padded);
            }
            AtlasPixelFormat::Grayscale | AtlasPixelFormat::Sdf => {
                texture.update_subresource(region.x, region.y, region.width, region.height, pixels);
            }
        }
    }

    /// Upload every tile placed while this page had no bound device.
    pub fn flush_pending_uploads(&mut self) {
        if self.texture.is_none() {
            return;
        }
        let pending = std::mem::take(&mut self.pending_uploads);
        for (region, pixels) in &pending {
            self.upload(region, pixels);
        }
    }

    /// Normalized UV min/max for a placed region.
    pub fn uv(&self, region: &GlyphRegion) -> ((f32, f32), (f32, f32)) {
        let u0 = region.x as f32 / self.width as f32;
        let v0 = region.y as f32 / self.height as f32;
        let u1 = (region.x + region.width) as f32 / self.width as f32;
        let v1 = (region.y + region.height) as f32 / self.height as f32;
        ((u0, v0), (u1, v1))
    }

    /// Reset packing state and pixel storage; used when a font drops all its
    /// cached glyphs. Eviction is page-granular, never per-glyph.
    pub fn clear(&mut self) {
        self.packer.reset();
        self.pixels.iter_mut().for_each(|b| *b = 0);
        self.pending_uploads.clear();
    }
}

/// A growing collection of atlas pages, all the same size and pixel format.
pub struct MultiAtlas {
    page_width: u32,
    page_height: u32,
    format: AtlasPixelFormat,
    pages: Vec<AtlasPage>,
    context: Option<Arc<GraphicsContext>>,
}

impl MultiAtlas {
    pub fn new(page_width: u32, page_height: u32, format: AtlasPixelFormat) -> Self {
        Self {
            page_width,
            page_height,
            format,
            pages: Vec::new(),
            context: None,
        }
    }

    pub fn bind_device(&mut self, context: Arc<GraphicsContext>) {
        for page in &mut self.pages {
            page.bind_device(&context);
        }
        self.context = Some(context);
    }

    pub fn page(&self, id: u32) -> Option<&AtlasPage> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Place a tile, allocating a new page if every existing page is full.
    pub fn allocate(&mut self, width: u32, height: u32, pixels: &[u8]) -> TextResult<(u32, GlyphRegion)> {
        if width > self.page_width || height > self.page_height {
            return Err(TextError::AtlasFull {
                requested_width: width,
                requested_height: height,
                atlas_width: self.page_width,
                atlas_height: self.page_height,
            });
        }

        if let Some(last) = self.pages.last_mut() {
            if let Some(region) = last.allocate(width, height, pixels) {
                return Ok((last.id(), region));
            }
        }

        let mut page = AtlasPage::new(self.pages.len() as u32, self.page_width, self.page_height, self.format);
        if let Some(context) = &self.context {
            page.bind_device(context);
        }
        let region = page
            .allocate(width, height, pixels)
            .expect("fresh page must fit a tile no larger than page dimensions");
        let id = page.id();
        self.pages.push(page);
        Ok((id, region))
    }

    pub fn flush_pending_uploads(&mut self) {
        for page in &mut self.pages {
            page.flush_pending_uploads();
        }
    }

    /// Total CPU-side pixel storage across all pages, in bytes.
    pub fn memory_usage(&self) -> usize {
        self.pages.iter().map(|p| p.pixels.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shelf_packer_fills_row_then_wraps() {
        let mut packer = ShelfPacker::new(100, 100);
        let a = packer.pack(30, 20).unwrap();
        assert_eq!((a.x, a.y), (0, 0));
        let b = packer.pack(30, 20).unwrap();
        assert_eq!((b.x, b.y), (30, 0));
        let c = packer.pack(50, 25).unwrap();
        assert_eq!((c.x, c.y), (0, 20));
    }

    #[test]
    fn shelf_packer_reports_full() {
        let mut packer = ShelfPacker::new(10, 10);
        assert!(packer.pack(10, 10).is_some());
        assert!(packer.pack(10, 10).is_none());
    }

    #[test]
    fn page_allocate_is_immutable_region_once_placed() {
        let mut page = AtlasPage::new(0, 16, 16, AtlasPixelFormat::Grayscale);
        let pixels = vec![255u8; 4 * 4];
        let region = page.allocate(4, 4, &pixels).unwrap();
        assert_eq!(region, GlyphRegion { x: 0, y: 0, width: 4, height: 4 });
        assert_eq!(page.pixels[0], 255);
    }

    #[test]
    fn multi_atlas_spills_into_new_page_when_full() {
        let mut atlas = MultiAtlas::new(8, 8, AtlasPixelFormat::Grayscale);
        let pixels = vec![1u8; 8 * 8];
        let (id0, _) = atlas.allocate(8, 8, &pixels).unwrap();
        let (id1, _) = atlas.allocate(8, 8, &pixels).unwrap();
        assert_eq!(id0, 0);
        assert_eq!(id1, 1);
        assert_eq!(atlas.page_count(), 2);
    }

    #[test]
    fn multi_atlas_rejects_tile_larger_than_page() {
        let mut atlas = MultiAtlas::new(8, 8, AtlasPixelFormat::Grayscale);
        let pixels = vec![1u8; 16 * 16];
        assert!(matches!(
            atlas.allocate(16, 16, &pixels),
            Err(TextError::AtlasFull { .. })
        ));
    }

    #[test]
    fn uv_coords_are_normalized_to_page_size() {
        let page = AtlasPage::new(0, 1000, 1000, AtlasPixelFormat::Grayscale);
        let region = GlyphRegion { x: 100, y: 50, width: 20, height: 30 };
        let (min, max) = page.uv(&region);
        assert_eq!(min, (0.1, 0.05));
        assert_eq!(max, (0.12, 0.08));
    }
}
