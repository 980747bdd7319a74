//! Immediate-mode 2D UI batching.
//!
//! [`UiBatcher`] accumulates rectangles, quads, textured rects, and text into
//! CPU-side vertex/index batches, splitting on texture, pipeline variant, and
//! scissor-rect changes, then emits the minimum number of draw calls through
//! the ring buffer and a `wgpu::RenderPass`.
//!
//! Usage mirrors the RHI-facing contract: accumulate during a frame with
//! `add_*`/`push_scissor`/`set_texture`, call `end()` once, then `render()`
//! against an open render pass.
//!
//! ```ignore
//! batcher.begin();
//! batcher.set_screen_size(800.0, 600.0);
//! batcher.add_rect(100.0, 100.0, 200.0, 50.0, 0xFFFF0000);
//! batcher.end();
//! batcher.render(&mut pass);
//! ```

use std::sync::Arc;

use astrelis_core::geometry::Rect;
use astrelis_core::profiling::profile_function;
use bytemuck::{Pod, Zeroable};

use crate::GraphicsContext;
use crate::capability::{GpuRequirements, RenderCapability};
use crate::features::GpuFeatures;
use crate::ring_buffer::{RingBuffer, RingBufferAllocation, RingBufferConfig, RingBufferError};
use crate::rhi::Texture;

/// Maximum number of textures bound to a batch at once. Vertex texture
/// slots outside `0..MAX_TEXTURE_SLOTS` are invalid.
pub const MAX_TEXTURE_SLOTS: usize = 8;

/// GPU requirements for [`UiBatcher`]: a binding array of textures, with
/// slots left unbound until a texture is set.
///
/// ```ignore
/// let ctx = GraphicsContext::new_owned_with_descriptor(
///     GraphicsContextDescriptor::new().require_capability::<UiBatchCapability>(),
/// ).await?;
/// ```
pub struct UiBatchCapability;

impl RenderCapability for UiBatchCapability {
    fn requirements() -> GpuRequirements {
        GpuRequirements::new()
            .require_features(GpuFeatures::TEXTURE_BINDING_ARRAY | GpuFeatures::PARTIALLY_BOUND_BINDING_ARRAY)
            .with_min_limits(|l| {
                l.max_binding_array_elements_per_shader_stage =
                    l.max_binding_array_elements_per_shader_stage.max(MAX_TEXTURE_SLOTS as u32);
            })
    }

    fn name() -> &'static str {
        "UiBatchCapability"
    }
}

/// Sentinel texture slot meaning "no texture, use vertex color only".
pub const NO_TEXTURE: u32 = MAX_TEXTURE_SLOTS as u32;

/// A packed 2D UI vertex: clip-space position, UV, byte color, texture slot.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    /// Memory-layout RGBA: byte 0 = R, byte 1 = G, byte 2 = B, byte 3 = A.
    pub color: [u8; 4],
    pub texture_slot: u32,
}

unsafe impl Pod for Vertex {}
unsafe impl Zeroable for Vertex {}

impl Vertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: &[wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
            0 => Float32x2,
            1 => Float32x2,
            2 => Unorm8x4,
            3 => Uint32,
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: ATTRS,
        }
    }
}

/// Convert a 32-bit packed ARGB color (`0xAARRGGBB`) to memory-layout RGBA
/// bytes, with the alpha byte landing in the high-order byte of the word on
/// little-endian targets.
pub fn argb_to_rgba(argb: u32) -> [u8; 4] {
    let a = ((argb >> 24) & 0xFF) as u8;
    let r = ((argb >> 16) & 0xFF) as u8;
    let g = ((argb >> 8) & 0xFF) as u8;
    let b = (argb & 0xFF) as u8;
    [r, g, b, a]
}

/// Convert a screen-space point (origin top-left, y down) to clip space
/// (origin center, y up).
pub fn to_clip(px: f32, py: f32, screen_w: f32, screen_h: f32) -> [f32; 2] {
    let clip_x = (px / screen_w) * 2.0 - 1.0;
    let clip_y = 1.0 - (py / screen_h) * 2.0;
    [clip_x, clip_y]
}

/// An axis-aligned clip rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScissorRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ScissorRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn full_screen(screen_w: f32, screen_h: f32) -> Self {
        Self::new(0.0, 0.0, screen_w, screen_h)
    }

    pub fn is_valid(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }

    /// Clip `self` against `other`, returning `None` if the intersection is
    /// empty.
    pub fn intersect(&self, other: &ScissorRect) -> Option<ScissorRect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.w).min(other.x + other.w);
        let y2 = (self.y + self.h).min(other.y + other.h);

        if x2 <= x1 || y2 <= y1 {
            None
        } else {
            Some(ScissorRect::new(x1, y1, x2 - x1, y2 - y1))
        }
    }

}

/// Which pipeline a flushed batch draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineVariant {
    /// Solid-colored geometry, no texture sampling.
    Opaque,
    /// Textured geometry (sprites, UI chrome).
    Textured,
    /// Text rendered from an SDF/MSDF/bitmap glyph atlas.
    Text,
}

/// Errors a batcher operation can report. All are non-fatal to the frame;
/// see the module docs for flush semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// `slot` is not in `0..MAX_TEXTURE_SLOTS`.
    TextureSlotOutOfRange(u32),
    /// The ring buffer could not satisfy a batch's vertex/index allocation.
    RingBufferOom(RingBufferError),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::TextureSlotOutOfRange(slot) => {
                write!(f, "texture slot {slot} exceeds MAX_TEXTURE_SLOTS ({MAX_TEXTURE_SLOTS})")
            }
            RenderError::RingBufferOom(e) => write!(f, "batch flush dropped: {e}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Configuration for a [`UiBatcher`].
#[derive(Debug, Clone, Copy)]
pub struct BatcherConfig {
    pub max_vertices: usize,
    pub max_indices: usize,
}

impl Default for BatcherConfig {
    fn default() -> Self {
        Self {
            max_vertices: 65_536,
            max_indices: 131_072,
        }
    }
}

/// Per-frame batching statistics, reset on [`UiBatcher::begin`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub draw_calls: u64,
    pub vertices_rendered: u64,
    pub indices_rendered: u64,
    pub batches_created: u64,
    pub texture_switches: u64,
    pub culled_elements: u64,
}

/// A batch that has been flushed: its vertex/index data is already written
/// into the ring buffer, and it is queued for [`UiBatcher::render`].
struct FlushedBatch {
    vertex_alloc: RingBufferAllocation,
    index_alloc: RingBufferAllocation,
    index_count: u32,
    pipeline: PipelineVariant,
    scissor: ScissorRect,
    bind_group: Arc<wgpu::BindGroup>,
}

/// Immediate-mode batcher: accumulates vertices/indices, splits into the
/// minimum number of draw calls on texture/pipeline/scissor changes.
pub struct UiBatcher {
    context: Arc<GraphicsContext>,
    config: BatcherConfig,
    ring: RingBuffer,

    opaque_pipeline: wgpu::RenderPipeline,
    textured_pipeline: wgpu::RenderPipeline,
    text_pipeline: wgpu::RenderPipeline,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    fallback_view: wgpu::TextureView,
    _fallback_texture: wgpu::Texture,

    screen_w: f32,
    screen_h: f32,

    textures: [Option<Arc<Texture>>; MAX_TEXTURE_SLOTS],
    texture_bind_group: Option<Arc<wgpu::BindGroup>>,
    texture_changed: bool,

    scissor_stack: Vec<ScissorRect>,
    is_text: bool,

    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    current_pipeline: Option<PipelineVariant>,
    current_scissor: ScissorRect,

    flushed: Vec<FlushedBatch>,
    stats: BatchStats,
}

/// One glyph's position (relative to a text run's origin) and atlas UVs.
/// Built by a text layout and fed to [`UiBatcher::add_text`].
#[derive(Debug, Clone, Copy)]
pub struct GlyphQuad {
    pub dx: f32,
    pub dy: f32,
    pub width: f32,
    pub height: f32,
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

impl UiBatcher {
    pub fn new(context: Arc<GraphicsContext>, config: BatcherConfig, surface_format: wgpu::TextureFormat) -> Self {
        let device = context.device();
        let queue = context.queue();

        let ring_config = RingBufferConfig {
            frames_in_flight: 3,
            frame_size: ((config.max_vertices * std::mem::size_of::<Vertex>())
                + (config.max_indices * std::mem::size_of::<u32>())) as u64,
        };
        let ring = RingBuffer::new(
            context.clone(),
            ring_config,
            wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::INDEX,
        );

        let texture_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ui_batch_texture_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: std::num::NonZeroU32::new(MAX_TEXTURE_SLOTS as u32),
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("ui_batch_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let (fallback_texture, fallback_view) = create_fallback_texture(device, queue);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ui_batch_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/ui_batch.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ui_batch_pipeline_layout"),
            bind_group_layouts: &[&texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let opaque_pipeline = create_ui_pipeline(device, &shader, &pipeline_layout, surface_format, "fs_opaque");
        let textured_pipeline = create_ui_pipeline(device, &shader, &pipeline_layout, surface_format, "fs_textured");
        let text_pipeline = create_ui_pipeline(device, &shader, &pipeline_layout, surface_format, "fs_text");

        Self {
            context,
            config,
            ring,
            opaque_pipeline,
            textured_pipeline,
            text_pipeline,
            texture_bind_group_layout,
            sampler,
            fallback_view,
            _fallback_texture: fallback_texture,
            screen_w: 0.0,
            screen_h: 0.0,
            textures: Default::default(),
            texture_bind_group: None,
            texture_changed: true,
            scissor_stack: Vec::new(),
            is_text: false,
            vertices: Vec::with_capacity(256),
            indices: Vec::with_capacity(384),
            current_pipeline: None,
            current_scissor: ScissorRect::new(0.0, 0.0, 0.0, 0.0),
            flushed: Vec::new(),
            stats: BatchStats::default(),
        }
    }

    /// Begin a new frame: advance the ring buffer, reset per-frame state.
    pub fn begin(&mut self) {
        profile_function!();
        self.ring.next_frame();
        self.stats = BatchStats::default();
        self.vertices.clear();
        self.indices.clear();
        self.current_pipeline = None;
        self.is_text = false;
        self.current_scissor = self.effective_scissor();
        self.flushed.clear();
    }

    pub fn set_screen_size(&mut self, w: f32, h: f32) {
        self.screen_w = w;
        self.screen_h = h;
    }

    pub fn stats(&self) -> BatchStats {
        self.stats
    }

    fn effective_scissor(&self) -> ScissorRect {
        self.scissor_stack
            .last()
            .copied()
            .unwrap_or_else(|| ScissorRect::full_screen(self.screen_w, self.screen_h))
    }

    pub fn current_scissor(&self) -> ScissorRect {
        self.effective_scissor()
    }

    pub fn push_scissor(&mut self, rect: ScissorRect) {
        let clipped = match self.scissor_stack.last() {
            Some(top) => rect.intersect(top).unwrap_or(ScissorRect::new(0.0, 0.0, 0.0, 0.0)),
            None => rect,
        };
        self.scissor_stack.push(clipped);
        self.on_scissor_changed();
    }

    pub fn pop_scissor(&mut self) {
        self.scissor_stack.pop();
        self.on_scissor_changed();
    }

    pub fn clear_scissor(&mut self) {
        self.scissor_stack.clear();
        self.on_scissor_changed();
    }

    fn on_scissor_changed(&mut self) {
        let effective = self.effective_scissor();
        if effective != self.current_scissor {
            self.flush();
            self.current_scissor = effective;
        }
    }

    /// Bind `texture` to `slot`. Flushes the current batch if the slot was
    /// already bound to a different texture.
    pub fn set_texture(&mut self, slot: u32, texture: Arc<Texture>) -> Result<(), RenderError> {
        let idx = slot as usize;
        if idx >= MAX_TEXTURE_SLOTS {
            return Err(RenderError::TextureSlotOutOfRange(slot));
        }

        let rebind = match &self.textures[idx] {
            Some(existing) => !Arc::ptr_eq(existing, &texture),
            None => true,
        };

        if rebind {
            self.flush();
            self.textures[idx] = Some(texture);
            self.texture_changed = true;
        }

        Ok(())
    }

    pub fn clear_textures(&mut self) {
        self.flush();
        self.textures = Default::default();
        self.texture_changed = true;
    }

    fn ensure_pipeline(&mut self, pipeline: PipelineVariant) {
        if self.current_pipeline != Some(pipeline) {
            self.flush();
            self.current_pipeline = Some(pipeline);
        }
    }

    /// Add an axis-aligned solid rectangle. `color_argb` is `0xAARRGGBB`.
    pub fn add_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color_argb: u32) {
        let scissor = self.effective_scissor();
        let rect = Rect::new(x, y, w, h);
        let Some(clipped) = clip_rect(&rect, &scissor) else {
            self.stats.culled_elements += 1;
            return;
        };

        self.ensure_pipeline(PipelineVariant::Opaque);
        if self.is_text {
            self.flush();
            self.is_text = false;
        }

        let color = argb_to_rgba(color_argb);
        self.push_quad_screen(
            clipped.x,
            clipped.y,
            clipped.x + clipped.width,
            clipped.y + clipped.height,
            color,
            NO_TEXTURE,
            [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        );
    }

    /// Add an arbitrary convex quad with a single color. Culled only by
    /// bounding-box intersection against the effective scissor (coordinates
    /// are not clipped, since the quad need not be axis-aligned).
    #[allow(clippy::too_many_arguments)]
    pub fn add_quad(
        &mut self,
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        x3: f32,
        y3: f32,
        color_argb: u32,
    ) {
        let min_x = x0.min(x1).min(x2).min(x3);
        let min_y = y0.min(y1).min(y2).min(y3);
        let max_x = x0.max(x1).max(x2).max(x3);
        let max_y = y0.max(y1).max(y2).max(y3);
        let bbox = Rect::new(min_x, min_y, max_x - min_x, max_y - min_y);

        let scissor = self.effective_scissor();
        if clip_rect(&bbox, &scissor).is_none() {
            self.stats.culled_elements += 1;
            return;
        }

        self.ensure_pipeline(PipelineVariant::Opaque);
        if self.is_text {
            self.flush();
            self.is_text = false;
        }

        let color = argb_to_rgba(color_argb);
        let clip = [
            to_clip(x0, y0, self.screen_w, self.screen_h),
            to_clip(x1, y1, self.screen_w, self.screen_h),
            to_clip(x2, y2, self.screen_w, self.screen_h),
            to_clip(x3, y3, self.screen_w, self.screen_h),
        ];
        self.push_quad_clip(clip, color, NO_TEXTURE, [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    }

    /// Add an axis-aligned rect sampling `texture_slot` over `uv0..uv1`.
    #[allow(clippy::too_many_arguments)]
    pub fn add_textured_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        uv0: [f32; 2],
        uv1: [f32; 2],
        color_argb: u32,
        texture_slot: u32,
    ) {
        let scissor = self.effective_scissor();
        let rect = Rect::new(x, y, w, h);
        let Some(clipped) = clip_rect(&rect, &scissor) else {
            self.stats.culled_elements += 1;
            return;
        };

        self.ensure_pipeline(PipelineVariant::Textured);
        if self.is_text {
            self.flush();
            self.is_text = false;
        }

        // Re-derive UVs for the clipped rect so glyphs at a scissor edge
        // are not over-drawn outside the clip.
        let u0 = lerp(uv0[0], uv1[0], (clipped.x - x) / w.max(f32::EPSILON));
        let v0 = lerp(uv0[1], uv1[1], (clipped.y - y) / h.max(f32::EPSILON));
        let u1 = lerp(uv0[0], uv1[0], (clipped.x + clipped.width - x) / w.max(f32::EPSILON));
        let v1 = lerp(uv0[1], uv1[1], (clipped.y + clipped.height - y) / h.max(f32::EPSILON));

        let color = argb_to_rgba(color_argb);
        self.push_quad_screen(
            clipped.x,
            clipped.y,
            clipped.x + clipped.width,
            clipped.y + clipped.height,
            color,
            texture_slot,
            [[u0, v0], [u1, v0], [u1, v1], [u0, v1]],
        );
    }

    /// Enter text mode without flushing between consecutive calls.
    pub fn begin_text(&mut self) {
        if !self.is_text {
            self.flush();
            self.is_text = true;
        }
        self.ensure_pipeline(PipelineVariant::Text);
    }

    /// Exit text mode, flushing the accumulated glyph quads.
    pub fn end_text(&mut self) {
        self.flush();
        self.is_text = false;
    }

    /// Add a single glyph quad while already in text mode (used by the text
    /// layout/rendering layer, one call per glyph).
    #[allow(clippy::too_many_arguments)]
    pub fn add_glyph_quad(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        uv0: [f32; 2],
        uv1: [f32; 2],
        color_argb: u32,
        texture_slot: u32,
    ) {
        let scissor = self.effective_scissor();
        let rect = Rect::new(x, y, w, h);
        if clip_rect(&rect, &scissor).is_none() {
            self.stats.culled_elements += 1;
            return;
        }

        let color = argb_to_rgba(color_argb);
        self.push_quad_screen(x, y, x + w, y + h, color, texture_slot, [uv0, [uv1[0], uv0[1]], uv1, [uv0[0], uv1[1]]]);
    }

    /// Draw a run of glyphs as one cohesive piece of text: enter text mode,
    /// emit a textured rect per glyph at `(x + glyph.dx, y + glyph.dy)` using
    /// the atlas UVs already baked into `glyphs`, then exit text mode and
    /// flush. `texture_slot` must already be bound to the atlas page the
    /// glyphs were rasterized into.
    pub fn add_text(
        &mut self,
        x: f32,
        y: f32,
        glyphs: impl IntoIterator<Item = GlyphQuad>,
        color_argb: u32,
        texture_slot: u32,
    ) {
        self.begin_text();
        for glyph in glyphs {
            self.add_glyph_quad(
                x + glyph.dx,
                y + glyph.dy,
                glyph.width,
                glyph.height,
                glyph.uv_min,
                glyph.uv_max,
                color_argb,
                texture_slot,
            );
        }
        self.end_text();
    }

    fn push_quad_screen(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: [u8; 4], texture_slot: u32, uvs: [[f32; 2]; 4]) {
        let clip = [
            to_clip(x0, y0, self.screen_w, self.screen_h),
            to_clip(x1, y0, self.screen_w, self.screen_h),
            to_clip(x1, y1, self.screen_w, self.screen_h),
            to_clip(x0, y1, self.screen_w, self.screen_h),
        ];
        self.push_quad_clip(clip, color, texture_slot, uvs);
    }

    fn push_quad_clip(&mut self, positions: [[f32; 2]; 4], color: [u8; 4], texture_slot: u32, uvs: [[f32; 2]; 4]) {
        if self.vertices.len() + 4 > self.config.max_vertices || self.indices.len() + 6 > self.config.max_indices {
            self.flush();
        }

        let base = self.vertices.len() as u32;
        for i in 0..4 {
            self.vertices.push(Vertex {
                position: positions[i],
                uv: uvs[i],
                color,
                texture_slot,
            });
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    fn pipeline_for_current(&self) -> PipelineVariant {
        self.current_pipeline.unwrap_or(PipelineVariant::Opaque)
    }

    fn rebuild_texture_bind_group(&mut self) -> Arc<wgpu::BindGroup> {
        if !self.texture_changed {
            if let Some(bg) = &self.texture_bind_group {
                return bg.clone();
            }
        }
        let had_previous = self.texture_bind_group.is_some();

        let mut views: Vec<&wgpu::TextureView> = Vec::with_capacity(MAX_TEXTURE_SLOTS);
        for slot in &self.textures {
            match slot {
                Some(tex) => views.push(tex.view()),
                None => views.push(&self.fallback_view),
            }
        }

        let bind_group = self.context.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ui_batch_texture_bg"),
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureViewArray(&views),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        let bind_group = Arc::new(bind_group);
        self.texture_bind_group = Some(bind_group.clone());
        self.texture_changed = false;
        if had_previous {
            self.stats.texture_switches += 1;
        }
        bind_group
    }

    /// Flush the current batch: allocate ring-buffer space, copy vertex/index
    /// data, and queue a draw. No-op if the batch is empty.
    pub fn flush(&mut self) {
        profile_function!();
        if self.vertices.is_empty() {
            return;
        }

        let vertex_bytes = bytemuck::cast_slice(&self.vertices);
        let index_bytes = bytemuck::cast_slice(&self.indices);

        let vertex_alloc = match self.ring.allocate(vertex_bytes.len() as u64, 16) {
            Ok(alloc) => alloc,
            Err(e) => {
                tracing::warn!("ui batch flush dropped: {}", RenderError::RingBufferOom(e));
                self.vertices.clear();
                self.indices.clear();
                return;
            }
        };
        let index_alloc = match self.ring.allocate(index_bytes.len() as u64, 4) {
            Ok(alloc) => alloc,
            Err(e) => {
                tracing::warn!("ui batch flush dropped: {}", RenderError::RingBufferOom(e));
                self.vertices.clear();
                self.indices.clear();
                return;
            }
        };

        vertex_alloc.write(self.ring.queue(), vertex_bytes);
        index_alloc.write(self.ring.queue(), index_bytes);

        let bind_group = self.rebuild_texture_bind_group();

        self.stats.draw_calls += 1;
        self.stats.vertices_rendered += self.vertices.len() as u64;
        self.stats.indices_rendered += self.indices.len() as u64;
        self.stats.batches_created += 1;

        self.flushed.push(FlushedBatch {
            index_count: self.indices.len() as u32,
            vertex_alloc,
            index_alloc,
            pipeline: self.pipeline_for_current(),
            scissor: self.current_scissor,
            bind_group,
        });

        self.vertices.clear();
        self.indices.clear();
    }

    /// Flush any remaining batch. Call once per frame after all `add_*`
    /// calls.
    pub fn end(&mut self) {
        self.flush();
    }

    /// Record the flushed batches into `pass`. Call after [`Self::end`],
    /// with `pass`'s target matching the surface format this batcher was
    /// constructed with.
    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        profile_function!();
        for batch in &self.flushed {
            let pipeline = match batch.pipeline {
                PipelineVariant::Opaque => &self.opaque_pipeline,
                PipelineVariant::Textured => &self.textured_pipeline,
                PipelineVariant::Text => &self.text_pipeline,
            };
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, batch.bind_group.as_ref(), &[]);
            pass.set_scissor_rect(
                batch.scissor.x.max(0.0) as u32,
                batch.scissor.y.max(0.0) as u32,
                batch.scissor.w.max(0.0) as u32,
                batch.scissor.h.max(0.0) as u32,
            );
            pass.set_vertex_buffer(
                0,
                batch
                    .vertex_alloc
                    .buffer()
                    .slice(batch.vertex_alloc.offset()..batch.vertex_alloc.offset() + batch.vertex_alloc.size()),
            );
            pass.set_index_buffer(
                batch
                    .index_alloc
                    .buffer()
                    .slice(batch.index_alloc.offset()..batch.index_alloc.offset() + batch.index_alloc.size()),
                wgpu::IndexFormat::Uint32,
            );
            pass.draw_indexed(0..batch.index_count, 0, 0..1);
        }
    }

}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

fn clip_rect(rect: &Rect<f32>, scissor: &ScissorRect) -> Option<Rect<f32>> {
    let x1 = rect.x.max(scissor.x);
    let y1 = rect.y.max(scissor.y);
    let x2 = (rect.x + rect.width).min(scissor.x + scissor.w);
    let y2 = (rect.y + rect.height).min(scissor.y + scissor.h);
    if x2 <= x1 || y2 <= y1 {
        None
    } else {
        Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
    }
}

fn create_fallback_texture(device: &wgpu::Device, queue: &wgpu::Queue) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("ui_batch_fallback_texture"),
        size: wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &[255, 255, 255, 255],
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4),
            rows_per_image: Some(1),
        },
        wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

fn create_ui_pipeline(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    surface_format: wgpu::TextureFormat,
    fs_entry: &'static str,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("ui_batch_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState {
                    color: wgpu::BlendComponent {
                        src_factor: wgpu::BlendFactor::SrcAlpha,
                        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                        operation: wgpu::BlendOperation::Add,
                    },
                    alpha: wgpu::BlendComponent {
                        src_factor: wgpu::BlendFactor::One,
                        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                        operation: wgpu::BlendOperation::Add,
                    },
                }),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_to_rgba_places_bytes_in_ascending_order() {
        let bytes = argb_to_rgba(0xAABBCCDD);
        assert_eq!(bytes, [0xBB, 0xCC, 0xDD, 0xAA]);
    }

    #[test]
    fn to_clip_maps_corners() {
        assert_eq!(to_clip(0.0, 0.0, 800.0, 600.0), [-1.0, 1.0]);
        assert_eq!(to_clip(800.0, 600.0, 800.0, 600.0), [1.0, -1.0]);
    }

    #[test]
    fn scissor_intersect_empty_when_disjoint() {
        let a = ScissorRect::new(0.0, 0.0, 10.0, 10.0);
        let b = ScissorRect::new(20.0, 20.0, 10.0, 10.0);
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn scissor_intersect_clips_to_overlap() {
        let a = ScissorRect::new(0.0, 0.0, 100.0, 100.0);
        let b = ScissorRect::new(50.0, 50.0, 100.0, 100.0);
        let clipped = a.intersect(&b).unwrap();
        assert_eq!(clipped, ScissorRect::new(50.0, 50.0, 50.0, 50.0));
    }

    #[test]
    fn clip_rect_drops_fully_outside_primitives() {
        let rect = Rect::new(0.0, 0.0, 50.0, 50.0);
        let scissor = ScissorRect::new(100.0, 100.0, 100.0, 100.0);
        assert!(clip_rect(&rect, &scissor).is_none());
    }

    fn test_context() -> Arc<GraphicsContext> {
        pollster::block_on(GraphicsContext::new_owned_with_descriptor(
            crate::context::GraphicsContextDescriptor::new().require_capability::<UiBatchCapability>(),
        ))
        .expect("failed to create graphics context")
    }

    #[test]
    fn scenario_a_single_rectangle() {
        let ctx = test_context();
        let mut batcher = UiBatcher::new(ctx, BatcherConfig::default(), wgpu::TextureFormat::Bgra8UnormSrgb);

        batcher.begin();
        batcher.set_screen_size(800.0, 600.0);
        batcher.add_rect(100.0, 100.0, 200.0, 50.0, 0xFFFF0000);
        batcher.end();

        assert_eq!(batcher.flushed.len(), 1);
        let batch = &batcher.flushed[0];
        assert_eq!(batch.index_count, 6);
        assert_eq!(batcher.stats().draw_calls, 1);
    }

    #[test]
    fn scenario_b_flush_on_texture_change() {
        let ctx = test_context();
        let mut batcher = UiBatcher::new(ctx.clone(), BatcherConfig::default(), wgpu::TextureFormat::Bgra8UnormSrgb);
        let texture = Arc::new(Texture::new(ctx, 4, 4, crate::rhi::PixelFormat::Rgba8Unorm));

        batcher.begin();
        batcher.set_screen_size(800.0, 600.0);
        batcher.add_rect(0.0, 0.0, 10.0, 10.0, 0xFFFFFFFF);
        batcher.set_texture(0, texture).unwrap();
        batcher.add_textured_rect(0.0, 0.0, 10.0, 10.0, [0.0, 0.0], [1.0, 1.0], 0xFFFFFFFF, 0);
        batcher.end();

        assert_eq!(batcher.stats().draw_calls, 2);
    }

    #[test]
    fn scenario_c_scissor_cull() {
        let ctx = test_context();
        let mut batcher = UiBatcher::new(ctx, BatcherConfig::default(), wgpu::TextureFormat::Bgra8UnormSrgb);

        batcher.begin();
        batcher.set_screen_size(800.0, 600.0);
        batcher.push_scissor(ScissorRect::new(100.0, 100.0, 100.0, 100.0));
        batcher.add_rect(0.0, 0.0, 50.0, 50.0, 0xFFFFFFFF);
        batcher.pop_scissor();
        batcher.end();

        assert_eq!(batcher.stats().draw_calls, 0);
        assert_eq!(batcher.stats().culled_elements, 1);
    }

    #[test]
    fn texture_slot_out_of_range_is_rejected() {
        let ctx = test_context();
        let mut batcher = UiBatcher::new(ctx.clone(), BatcherConfig::default(), wgpu::TextureFormat::Bgra8UnormSrgb);
        let texture = Arc::new(Texture::new(ctx, 4, 4, crate::rhi::PixelFormat::Rgba8Unorm));

        let err = batcher.set_texture(MAX_TEXTURE_SLOTS as u32, texture).unwrap_err();
        assert_eq!(err, RenderError::TextureSlotOutOfRange(MAX_TEXTURE_SLOTS as u32));
    }
}
