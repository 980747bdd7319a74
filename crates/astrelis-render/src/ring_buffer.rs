//! Per-frame GPU ring buffering.
//!
//! A ring buffer cycles through `N` frames worth of buffer space so the CPU
//! can keep writing new per-frame data (uniforms, UI vertices) while the GPU
//! is still consuming the previous frames', without a pipeline stall.
//!
//! ```ignore
//! use astrelis_render::ring_buffer::{RingBuffer, RingBufferConfig};
//!
//! let mut ring = RingBuffer::new(ctx, RingBufferConfig::default(), wgpu::BufferUsages::UNIFORM);
//!
//! // Each frame
//! let allocation = ring.allocate(256, 256)?;
//! allocation.write(ring.queue(), &data);
//!
//! // At frame end
//! ring.next_frame();
//! ```

use astrelis_core::profiling::profile_function;

use crate::GraphicsContext;
use std::sync::Arc;

/// Configuration for a [`RingBuffer`].
#[derive(Debug, Clone, Copy)]
pub struct RingBufferConfig {
    /// Number of frames to buffer. 3 (triple buffering) is the default and
    /// matches the swapchain depth this engine targets.
    pub frames_in_flight: u64,
    /// Size in bytes of a single frame's region. The buffer allocated on the
    /// GPU is `frames_in_flight * frame_size` bytes.
    pub frame_size: u64,
}

impl Default for RingBufferConfig {
    fn default() -> Self {
        Self {
            frames_in_flight: 3,
            frame_size: 1024 * 1024,
        }
    }
}

/// Why a [`RingBuffer::allocate`] call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingBufferError {
    /// The requested allocation does not fit in the remaining space of the
    /// current frame's region. Carries the requested size and the space that
    /// was actually available so the caller can log or grow the buffer.
    OutOfSpace { requested: u64, available: u64 },
}

impl std::fmt::Display for RingBufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RingBufferError::OutOfSpace {
                requested,
                available,
            } => write!(
                f,
                "ring buffer out of space: requested {requested} bytes, {available} available in current frame"
            ),
        }
    }
}

impl std::error::Error for RingBufferError {}

/// A region allocated from a [`RingBuffer`].
pub struct RingBufferAllocation {
    buffer: Arc<wgpu::Buffer>,
    offset: u64,
    size: u64,
}

impl RingBufferAllocation {
    /// The underlying GPU buffer. Binding ranges must use [`Self::offset`]
    /// and [`Self::size`], never the whole buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Byte offset into [`Self::buffer`] where this allocation begins.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Size in bytes of this allocation.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Write data into this allocation.
    ///
    /// # Panics
    ///
    /// Panics if `data` is larger than the allocation.
    pub fn write(&self, queue: &wgpu::Queue, data: &[u8]) {
        assert!(
            data.len() as u64 <= self.size,
            "data size {} exceeds allocation size {}",
            data.len(),
            self.size
        );
        queue.write_buffer(&self.buffer, self.offset, data);
    }

    /// A binding resource pointing at this allocation's range.
    pub fn as_binding(&self) -> wgpu::BindingResource<'_> {
        wgpu::BindingResource::Buffer(wgpu::BufferBinding {
            buffer: &self.buffer,
            offset: self.offset,
            size: std::num::NonZeroU64::new(self.size),
        })
    }
}

/// An N-buffered GPU scratch allocator for per-frame data.
pub struct RingBuffer {
    context: Arc<GraphicsContext>,
    buffer: Arc<wgpu::Buffer>,
    config: RingBufferConfig,
    total_size: u64,
    offset: u64,
    frame: u64,
}

impl RingBuffer {
    /// Create a new ring buffer sized for `config.frames_in_flight *
    /// config.frame_size` bytes.
    pub fn new(context: Arc<GraphicsContext>, config: RingBufferConfig, usage: wgpu::BufferUsages) -> Self {
        let total_size = config.frame_size * config.frames_in_flight;

        let buffer = context.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("astrelis ring buffer"),
            size: total_size,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            context,
            buffer: Arc::new(buffer),
            config,
            total_size,
            offset: 0,
            frame: 0,
        }
    }

    /// The GPU queue backing this ring buffer's context, for convenience when
    /// writing an allocation right after allocating it.
    pub fn queue(&self) -> &wgpu::Queue {
        self.context.queue()
    }

    /// Allocate `size` bytes aligned to `alignment` (typically 256, the wgpu
    /// uniform-offset alignment) from the current frame's region.
    ///
    /// Returns [`RingBufferError::OutOfSpace`] rather than panicking or
    /// silently wrapping, so the caller can decide whether to flush early,
    /// grow the buffer, or drop the draw.
    pub fn allocate(&mut self, size: u64, alignment: u64) -> Result<RingBufferAllocation, RingBufferError> {
        profile_function!();

        let aligned_offset = if self.offset.is_multiple_of(alignment) {
            self.offset
        } else {
            self.offset + (alignment - (self.offset % alignment))
        };

        let frame_size = self.frame_size();
        let frame_start = (self.frame % self.config.frames_in_flight) * frame_size;
        let frame_end = frame_start + frame_size;

        if aligned_offset + size > frame_end {
            return Err(RingBufferError::OutOfSpace {
                requested: size,
                available: frame_end.saturating_sub(aligned_offset),
            });
        }

        self.offset = aligned_offset + size;

        Ok(RingBufferAllocation {
            buffer: self.buffer.clone(),
            offset: aligned_offset,
            size,
        })
    }

    /// Advance to the next frame's region, wrapping after
    /// `frames_in_flight`. Call once per frame; any allocations from
    /// `frames_in_flight` frames ago are now free to be overwritten.
    pub fn next_frame(&mut self) {
        self.frame += 1;
        let frame_size = self.frame_size();
        self.offset = (self.frame % self.config.frames_in_flight) * frame_size;
    }

    /// Reset to frame zero. Useful in tests, or after a device loss forces a
    /// full resource recreation.
    pub fn reset(&mut self) {
        self.frame = 0;
        self.offset = 0;
    }

    /// The current frame index (monotonically increasing, wraps only in the
    /// underlying buffer region, not in this counter).
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Current write offset within [`Self::current_buffer`].
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Total size of the underlying buffer, across all frames.
    pub fn size(&self) -> u64 {
        self.total_size
    }

    /// Size of a single frame's region.
    pub fn frame_size(&self) -> u64 {
        self.total_size / self.config.frames_in_flight
    }

    /// Bytes remaining in the current frame's region.
    pub fn remaining(&self) -> u64 {
        let frame_size = self.frame_size();
        let frame_end = ((self.frame % self.config.frames_in_flight) + 1) * frame_size;
        frame_end.saturating_sub(self.offset)
    }

    /// The underlying GPU buffer, spanning all frames. Bind using an
    /// allocation's offset and size, not the whole buffer.
    pub fn current_buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> RingBufferConfig {
        RingBufferConfig {
            frames_in_flight: 3,
            frame_size: 1024,
        }
    }

    #[test]
    fn allocate_advances_offset() {
        let ctx = GraphicsContext::new_owned_sync().expect("failed to create graphics context");
        let mut ring = RingBuffer::new(ctx, test_config(), wgpu::BufferUsages::UNIFORM);

        let alloc1 = ring.allocate(256, 256).expect("first allocation should fit");
        assert_eq!(alloc1.offset(), 0);
        assert_eq!(alloc1.size(), 256);

        let alloc2 = ring.allocate(256, 256).expect("second allocation should fit");
        assert_eq!(alloc2.offset(), 256);
    }

    #[test]
    fn allocate_respects_alignment() {
        let ctx = GraphicsContext::new_owned_sync().expect("failed to create graphics context");
        let mut ring = RingBuffer::new(ctx, test_config(), wgpu::BufferUsages::UNIFORM);

        ring.allocate(10, 256).unwrap();
        let alloc = ring.allocate(10, 256).unwrap();
        assert_eq!(alloc.offset(), 256);
    }

    #[test]
    fn out_of_space_reports_requested_and_available() {
        let ctx = GraphicsContext::new_owned_sync().expect("failed to create graphics context");
        let mut ring = RingBuffer::new(ctx, test_config(), wgpu::BufferUsages::UNIFORM);

        let err = ring.allocate(2048, 256).unwrap_err();
        assert_eq!(
            err,
            RingBufferError::OutOfSpace {
                requested: 2048,
                available: 1024,
            }
        );
    }

    #[test]
    fn next_frame_wraps_after_frames_in_flight() {
        let ctx = GraphicsContext::new_owned_sync().expect("failed to create graphics context");
        let mut ring = RingBuffer::new(ctx, test_config(), wgpu::BufferUsages::UNIFORM);

        ring.allocate(512, 256).unwrap();
        ring.next_frame();
        assert_eq!(ring.frame(), 1);
        let alloc = ring.allocate(512, 256).unwrap();
        assert_eq!(alloc.offset(), 1024);

        ring.next_frame();
        ring.next_frame();
        assert_eq!(ring.frame(), 3);
        // frame 3 wraps back to region 0
        let alloc = ring.allocate(10, 256).unwrap();
        assert_eq!(alloc.offset(), 0);
    }

    #[test]
    fn reset_returns_to_frame_zero() {
        let ctx = GraphicsContext::new_owned_sync().expect("failed to create graphics context");
        let mut ring = RingBuffer::new(ctx, test_config(), wgpu::BufferUsages::UNIFORM);

        ring.allocate(256, 256).unwrap();
        ring.next_frame();
        ring.reset();
        assert_eq!(ring.frame(), 0);
        assert_eq!(ring.offset(), 0);
    }

    #[test]
    fn remaining_shrinks_as_allocations_land() {
        let ctx = GraphicsContext::new_owned_sync().expect("failed to create graphics context");
        let mut ring = RingBuffer::new(ctx, test_config(), wgpu::BufferUsages::UNIFORM);

        assert_eq!(ring.remaining(), 1024);
        ring.allocate(256, 256).unwrap();
        assert_eq!(ring.remaining(), 768);
    }
}
