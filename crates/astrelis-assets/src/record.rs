//! Per-key cache entries and the asset load state machine.

use std::any::Any;
use std::sync::Arc;

use crate::key::AssetPriority;

/// Where a cached key sits in the load pipeline.
///
/// Transitions: `NotLoaded -> Loading -> (Loaded | Failed)`, `Loaded ->
/// Unloading -> NotLoaded`, `Failed -> NotLoaded` on an explicit reload
/// attempt. No other transition is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    NotLoaded,
    Loading,
    Loaded,
    Failed,
    Unloading,
}

/// One cache entry: the type-erased asset (once loaded), bookkeeping for
/// LRU eviction, and status/error reporting.
pub struct AssetRecord {
    pub(crate) asset: Option<Arc<dyn Any + Send + Sync>>,
    pub status: AssetStatus,
    pub access_count: u64,
    pub last_access: u64,
    pub memory_usage: usize,
    pub priority: AssetPriority,
    pub error_message: Option<String>,
    pub is_async_loading: bool,
}

impl AssetRecord {
    pub fn pending(priority: AssetPriority) -> Self {
        Self {
            asset: None,
            status: AssetStatus::NotLoaded,
            access_count: 0,
            last_access: 0,
            memory_usage: 0,
            priority,
            error_message: None,
            is_async_loading: false,
        }
    }

    /// Bump LRU bookkeeping; called on every cache hit.
    pub fn touch(&mut self, sequence: u64) {
        self.access_count += 1;
        self.last_access = sequence;
    }

    pub fn mark_loading(&mut self, priority: AssetPriority, is_async: bool) {
        self.status = AssetStatus::Loading;
        self.priority = priority;
        self.is_async_loading = is_async;
    }

    pub fn mark_loaded(&mut self, asset: Arc<dyn Any + Send + Sync>, memory_usage: usize, sequence: u64) {
        self.asset = Some(asset);
        self.status = AssetStatus::Loaded;
        self.memory_usage = memory_usage;
        self.is_async_loading = false;
        self.error_message = None;
        self.access_count = 1;
        self.last_access = sequence;
    }

    pub fn mark_failed(&mut self, message: impl Into<String>) {
        self.asset = None;
        self.status = AssetStatus::Failed;
        self.is_async_loading = false;
        self.error_message = Some(message.into());
    }

    pub fn mark_unloading(&mut self) {
        self.status = AssetStatus::Unloading;
    }

    pub fn is_loaded(&self) -> bool {
        self.status == AssetStatus::Loaded
    }

    pub fn is_loading(&self) -> bool {
        self.status == AssetStatus::Loading
    }
}
