//! Astrelis Render - GPU device management, ring-buffered scratch
//! allocations, and the 2D UI batcher.
//!
//! This crate provides:
//! - Graphics context management (device/queue/adapter)
//! - GPU feature and capability detection
//! - A minimal RHI surface (textures, samplers, pixel formats)
//! - N-buffered ring allocations for per-frame uploads
//! - An immediate-mode vertex/index batcher for 2D UI primitives

pub mod batch;
mod capability;
mod context;
mod features;
pub mod ring_buffer;
pub mod rhi;

// Re-export all modules
pub use capability::*;
pub use context::*;
pub use features::*;

// Re-export wgpu under 'wgpu' module
pub use wgpu;
