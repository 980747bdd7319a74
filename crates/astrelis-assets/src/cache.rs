//! The central asset cache: lookup, synchronous/asynchronous loading,
//! LRU eviction, and lifecycle callbacks.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};
use std::time::Duration;

use crate::Asset;
use crate::error::{AssetError, AssetResult};
use crate::event::{AssetEvent, AssetEventBuffer};
use crate::key::{AssetKey, AssetPriority};
use crate::loader::{AssetLoader, LoaderRegistry};
use crate::pool::AssetThreadPool;
use crate::record::{AssetRecord, AssetStatus};

/// Tunable limits and feature toggles for an [`AssetCache`].
#[derive(Debug, Clone)]
pub struct AssetCacheConfig {
    pub max_assets: usize,
    pub max_memory_bytes: usize,
    /// Fraction of `max_memory_bytes` that `trim_to_threshold` trims down to.
    pub trim_threshold: f32,
    /// Worker thread count for the background pool. `0` picks `cores - 1`.
    pub max_concurrent_loads: usize,
    pub enable_async: bool,
    pub enable_preloading: bool,
}

impl Default for AssetCacheConfig {
    fn default() -> Self {
        Self {
            max_assets: 1000,
            max_memory_bytes: 1024 * 1024 * 1024,
            trim_threshold: 0.8,
            max_concurrent_loads: 0,
            enable_async: true,
            enable_preloading: true,
        }
    }
}

/// Point-in-time cache counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetCacheStats {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub load_count: u64,
    pub async_load_count: u64,
    pub current_memory_bytes: usize,
    pub asset_count: usize,
}

/// Lifecycle callbacks, invoked outside the cache's internal lock.
#[derive(Default)]
pub struct AssetCallbacks {
    pub on_loaded: Option<Box<dyn Fn(&Path, &'static str) + Send + Sync>>,
    pub on_unloaded: Option<Box<dyn Fn(&Path, &'static str) + Send + Sync>>,
    pub on_failed: Option<Box<dyn Fn(&Path, &'static str, &str) + Send + Sync>>,
}

struct FutureState<T> {
    result: Mutex<Option<AssetResult<Arc<T>>>>,
    waker: Mutex<Option<Waker>>,
}

/// The future returned by [`AssetCache::load_async`]. Resolves once the
/// backing record transitions to `Loaded` or `Failed`.
pub struct AssetFuture<T> {
    state: Arc<FutureState<T>>,
}

impl<T> AssetFuture<T> {
    fn ready(value: AssetResult<Arc<T>>) -> Self {
        Self {
            state: Arc::new(FutureState {
                result: Mutex::new(Some(value)),
                waker: Mutex::new(None),
            }),
        }
    }

    fn pending() -> (Self, Arc<FutureState<T>>) {
        let state = Arc::new(FutureState {
            result: Mutex::new(None),
            waker: Mutex::new(None),
        });
        (Self { state: state.clone() }, state)
    }
}

fn resolve<T>(state: &FutureState<T>, value: AssetResult<Arc<T>>) {
    *state.result.lock().unwrap() = Some(value);
    if let Some(waker) = state.waker.lock().unwrap().take() {
        waker.wake();
    }
}

impl<T> Future for AssetFuture<T> {
    type Output = AssetResult<Arc<T>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut result = self.state.result.lock().unwrap();
        if let Some(value) = result.take() {
            return Poll::Ready(value);
        }
        *self.state.waker.lock().unwrap() = Some(cx.waker().clone());
        Poll::Pending
    }
}

struct Inner {
    records: HashMap<AssetKey, AssetRecord>,
    loaders: LoaderRegistry,
    stats: AssetCacheStats,
    sequence: u64,
}

struct Shared {
    inner: Mutex<Inner>,
    config: Mutex<AssetCacheConfig>,
    callbacks: Mutex<AssetCallbacks>,
    events: Mutex<AssetEventBuffer>,
    pool: AssetThreadPool,
}

impl Shared {
    fn insert_loaded(
        &self,
        key: &AssetKey,
        asset: Arc<dyn Any + Send + Sync>,
        memory: usize,
        type_name: &'static str,
        is_async: bool,
    ) {
        let config = self.config.lock().unwrap().clone();
        let mut inner = self.inner.lock().unwrap();
        let mut evicted = Vec::new();

        while inner.stats.current_memory_bytes + memory > config.max_memory_bytes {
            match evict_one(&mut inner) {
                Some(victim) => evicted.push(victim),
                None => break,
            }
        }

        inner.sequence += 1;
        let sequence = inner.sequence;
        let record = inner
            .records
            .entry(key.clone())
            .or_insert_with(|| AssetRecord::pending(AssetPriority::Normal));
        record.mark_loaded(asset, memory, sequence);
        inner.stats.current_memory_bytes += memory;
        inner.stats.load_count += 1;
        if is_async {
            inner.stats.async_load_count += 1;
        }

        if inner.records.len() > config.max_assets {
            if let Some(victim) = evict_one(&mut inner) {
                evicted.push(victim);
            }
        }

        drop(inner);
        for (path, evicted_type_name) in evicted {
            self.fire_unloaded(&path, evicted_type_name);
        }
        self.fire_loaded(key.path(), type_name);
    }

    fn mark_failed(&self, key: &AssetKey, message: impl Into<String>) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(record) = inner.records.get_mut(key) {
            record.mark_failed(message);
        }
    }

    fn fire_loaded(&self, path: &Path, type_name: &'static str) {
        self.events.lock().unwrap().push(AssetEvent::Loaded {
            path: path.to_path_buf(),
            type_name,
        });
        if let Some(callback) = &self.callbacks.lock().unwrap().on_loaded {
            callback(path, type_name);
        }
    }

    fn fire_unloaded(&self, path: &Path, type_name: &'static str) {
        self.events.lock().unwrap().push(AssetEvent::Unloaded {
            path: path.to_path_buf(),
            type_name,
        });
        if let Some(callback) = &self.callbacks.lock().unwrap().on_unloaded {
            callback(path, type_name);
        }
    }

    fn fire_failed(&self, path: &Path, type_name: &'static str, message: &str) {
        self.events.lock().unwrap().push(AssetEvent::Failed {
            path: path.to_path_buf(),
            type_name,
            error: message.to_string(),
        });
        if let Some(callback) = &self.callbacks.lock().unwrap().on_failed {
            callback(path, type_name, message);
        }
    }
}

/// Evict the record with the smallest `(access_count, last_access)` among
/// non-`Loading` records. Returns the evicted path and its type name.
fn evict_one(inner: &mut Inner) -> Option<(PathBuf, &'static str)> {
    let victim_key = inner
        .records
        .iter()
        .filter(|(_, record)| !record.is_loading())
        .min_by_key(|(_, record)| (record.access_count, record.last_access))
        .map(|(key, _)| key.clone())?;

    let type_name = inner
        .loaders
        .get_by_type_id(victim_key.type_id)
        .map(|loader| loader.asset_type_name())
        .unwrap_or("unknown");

    if let Some(mut record) = inner.records.remove(&victim_key) {
        record.mark_unloading();
        inner.stats.current_memory_bytes = inner.stats.current_memory_bytes.saturating_sub(record.memory_usage);
    }

    Some((victim_key.path, type_name))
}

fn type_mismatch_error<T: Asset>() -> AssetError {
    AssetError::TypeMismatch {
        expected: T::type_name(),
        actual: TypeId::of::<T>(),
    }
}

/// Run a registered loader for `key`/`path`, store the result, and fire the
/// matching callback. Assumes a `Loading` record for `key` already exists;
/// no-ops if that record was cancelled or overwritten in the meantime.
fn run_load_job<T: Asset>(shared: &Arc<Shared>, key: &AssetKey, path: &Path, params: &dyn Any, is_async: bool) {
    let loader = {
        let inner = shared.inner.lock().unwrap();
        inner.loaders.get::<T>()
    };

    let loader = match loader {
        Some(loader) => loader,
        None => {
            shared.mark_failed(key, "no loader registered for this type");
            shared.fire_failed(path, T::type_name(), "no loader registered for this type");
            return;
        }
    };

    {
        let inner = shared.inner.lock().unwrap();
        if !matches!(inner.records.get(key).map(|record| record.status), Some(AssetStatus::Loading)) {
            // Cancelled or otherwise no longer ours to complete.
            return;
        }
    }

    match loader.load_erased(path, params) {
        Ok(asset_any) => match asset_any.downcast::<T>() {
            Ok(asset) => {
                let memory = asset.memory_usage();
                shared.insert_loaded(key, asset as Arc<dyn Any + Send + Sync>, memory, T::type_name(), is_async);
            }
            Err(_) => {
                let message = "loaded asset type mismatch";
                shared.mark_failed(key, message);
                shared.fire_failed(path, T::type_name(), message);
            }
        },
        Err(err) => {
            let message = err.to_string();
            shared.mark_failed(key, message.clone());
            shared.fire_failed(path, T::type_name(), &message);
        }
    }
}

/// A bounded, type-erased cache of lazily-loaded assets. Cheap to clone -
/// clones share the same underlying records, loaders, and worker pool.
#[derive(Clone)]
pub struct AssetCache {
    shared: Arc<Shared>,
}

impl AssetCache {
    pub fn new(config: AssetCacheConfig) -> Self {
        let pool = AssetThreadPool::new(config.max_concurrent_loads);
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    records: HashMap::new(),
                    loaders: LoaderRegistry::new(),
                    stats: AssetCacheStats::default(),
                    sequence: 0,
                }),
                config: Mutex::new(config),
                callbacks: Mutex::new(AssetCallbacks::default()),
                events: Mutex::new(AssetEventBuffer::new()),
                pool,
            }),
        }
    }

    pub fn register_loader<T: Asset>(&self, loader: impl AssetLoader<Asset = T>) {
        self.shared.inner.lock().unwrap().loaders.register(loader);
    }

    pub fn unregister_loader<T: Asset>(&self) {
        self.shared.inner.lock().unwrap().loaders.unregister::<T>();
    }

    pub fn set_config(&self, config: AssetCacheConfig) {
        *self.shared.config.lock().unwrap() = config;
    }

    pub fn config(&self) -> AssetCacheConfig {
        self.shared.config.lock().unwrap().clone()
    }

    pub fn set_callbacks(&self, callbacks: AssetCallbacks) {
        *self.shared.callbacks.lock().unwrap() = callbacks;
    }

    pub fn stats(&self) -> AssetCacheStats {
        let inner = self.shared.inner.lock().unwrap();
        let mut stats = inner.stats;
        stats.asset_count = inner.records.len();
        stats
    }

    pub fn drain_events(&self) -> Vec<AssetEvent> {
        self.shared.events.lock().unwrap().drain()
    }

    /// Load `path` synchronously, blocking the calling thread on I/O or on
    /// an in-flight `Loading` record for the same key.
    pub fn load_sync<T: Asset>(
        &self,
        path: impl AsRef<Path>,
        variant: impl Into<String>,
        params: &dyn Any,
    ) -> AssetResult<Arc<T>> {
        let path = path.as_ref().to_path_buf();
        let key = AssetKey::new::<T>(path.clone(), variant.into());

        loop {
            let mut inner = self.shared.inner.lock().unwrap();
            match inner.records.get(&key).map(|record| record.status) {
                Some(AssetStatus::Loaded) => {
                    inner.stats.cache_hits += 1;
                    inner.sequence += 1;
                    let sequence = inner.sequence;
                    let record = inner.records.get_mut(&key).unwrap();
                    record.touch(sequence);
                    let asset = record.asset.clone().unwrap();
                    drop(inner);
                    return asset.downcast::<T>().map_err(|_| type_mismatch_error::<T>());
                }
                Some(AssetStatus::Loading) => {
                    drop(inner);
                    std::thread::sleep(Duration::from_millis(1));
                    continue;
                }
                _ => {
                    inner.stats.cache_misses += 1;
                    if inner.loaders.get::<T>().is_none() {
                        return Err(AssetError::NoLoader {
                            type_id: TypeId::of::<T>(),
                            type_name: Some(T::type_name()),
                        });
                    }
                    inner
                        .records
                        .entry(key.clone())
                        .or_insert_with(|| AssetRecord::pending(AssetPriority::Normal))
                        .mark_loading(AssetPriority::Normal, false);
                    break;
                }
            }
        }

        run_load_job::<T>(&self.shared, &key, &path, params, false);

        let inner = self.shared.inner.lock().unwrap();
        match inner.records.get(&key) {
            Some(record) if record.status == AssetStatus::Loaded => {
                let asset = record.asset.clone().unwrap();
                drop(inner);
                asset.downcast::<T>().map_err(|_| type_mismatch_error::<T>())
            }
            Some(record) => {
                let message = record.error_message.clone().unwrap_or_else(|| "load failed".to_string());
                drop(inner);
                Err(AssetError::LoaderError { path, message })
            }
            None => Err(AssetError::LoaderError {
                path,
                message: "load failed".to_string(),
            }),
        }
    }

    /// Load `path` on the background pool at `priority`. `Critical` runs
    /// inline on the calling thread; other priorities queue behind any
    /// already-running jobs of equal or higher priority. If
    /// [`AssetCacheConfig::enable_async`] is false, behaves like
    /// `load_sync` and returns an already-resolved future.
    pub fn load_async<T: Asset>(
        &self,
        path: impl AsRef<Path>,
        variant: impl Into<String>,
        params: Box<dyn Any + Send>,
        priority: AssetPriority,
    ) -> AssetFuture<T> {
        let path = path.as_ref().to_path_buf();
        let variant = variant.into();

        if !self.shared.config.lock().unwrap().enable_async {
            let result = self.load_sync::<T>(&path, variant, params.as_ref());
            return AssetFuture::ready(result);
        }

        let key = AssetKey::new::<T>(path.clone(), variant);
        let needs_submit;
        {
            let mut inner = self.shared.inner.lock().unwrap();
            match inner.records.get(&key).map(|record| record.status) {
                Some(AssetStatus::Loaded) => {
                    inner.stats.cache_hits += 1;
                    inner.sequence += 1;
                    let sequence = inner.sequence;
                    let record = inner.records.get_mut(&key).unwrap();
                    record.touch(sequence);
                    let asset = record.asset.clone().unwrap();
                    drop(inner);
                    let result = asset.downcast::<T>().map_err(|_| type_mismatch_error::<T>());
                    return AssetFuture::ready(result);
                }
                Some(AssetStatus::Loading) => {
                    needs_submit = false;
                }
                _ => {
                    inner.stats.cache_misses += 1;
                    if inner.loaders.get::<T>().is_none() {
                        drop(inner);
                        return AssetFuture::ready(Err(AssetError::NoLoader {
                            type_id: TypeId::of::<T>(),
                            type_name: Some(T::type_name()),
                        }));
                    }
                    inner
                        .records
                        .entry(key.clone())
                        .or_insert_with(|| AssetRecord::pending(priority))
                        .mark_loading(priority, true);
                    needs_submit = true;
                }
            }
        }

        let (future, state) = AssetFuture::pending();
        let shared = self.shared.clone();
        let key_for_job = key.clone();
        let path_for_job = path.clone();

        self.shared.pool.submit(priority, move || {
            if needs_submit {
                run_load_job::<T>(&shared, &key_for_job, &path_for_job, params.as_ref(), true);
            }

            loop {
                let (status, asset) = {
                    let inner = shared.inner.lock().unwrap();
                    match inner.records.get(&key_for_job) {
                        Some(record) => (record.status, record.asset.clone()),
                        None => (AssetStatus::Failed, None),
                    }
                };

                match status {
                    AssetStatus::Loaded => {
                        let asset = asset.expect("Loaded record always carries an asset");
                        let result = asset.downcast::<T>().map_err(|_| type_mismatch_error::<T>());
                        resolve(&state, result);
                        break;
                    }
                    AssetStatus::Loading => {
                        std::thread::sleep(Duration::from_millis(1));
                        continue;
                    }
                    _ => {
                        let message = {
                            let inner = shared.inner.lock().unwrap();
                            inner
                                .records
                                .get(&key_for_job)
                                .and_then(|record| record.error_message.clone())
                                .unwrap_or_else(|| "load failed".to_string())
                        };
                        resolve(&state, Err(AssetError::LoaderError { path: path_for_job.clone(), message }));
                        break;
                    }
                }
            }
        });

        future
    }

    /// Lookup without loading. Bumps access stats on a hit.
    pub fn get<T: Asset>(&self, path: impl AsRef<Path>, variant: impl Into<String>) -> Option<Arc<T>> {
        let key = AssetKey::new::<T>(path.as_ref(), variant.into());
        let mut inner = self.shared.inner.lock().unwrap();
        if matches!(inner.records.get(&key).map(|record| record.status), Some(AssetStatus::Loaded)) {
            inner.stats.cache_hits += 1;
            inner.sequence += 1;
            let sequence = inner.sequence;
            let record = inner.records.get_mut(&key).unwrap();
            record.touch(sequence);
            let asset = record.asset.clone().unwrap();
            return asset.downcast::<T>().ok();
        }
        inner.stats.cache_misses += 1;
        None
    }

    pub fn get_or_load<T: Asset>(
        &self,
        path: impl AsRef<Path>,
        variant: impl Into<String>,
        params: &dyn Any,
    ) -> AssetResult<Arc<T>> {
        let path = path.as_ref();
        let variant = variant.into();
        if let Some(asset) = self.get::<T>(path, variant.clone()) {
            return Ok(asset);
        }
        self.load_sync::<T>(path, variant, params)
    }

    /// Background-load at `Low` priority with no caller-visible future.
    /// A no-op when [`AssetCacheConfig::enable_preloading`] is false.
    pub fn preload<T: Asset>(&self, path: impl AsRef<Path>, variant: impl Into<String>, params: Box<dyn Any + Send>) {
        if !self.shared.config.lock().unwrap().enable_preloading {
            return;
        }
        let _ = self.load_async::<T>(path, variant, params, AssetPriority::Low);
    }

    pub fn unload<T: Asset>(&self, path: impl AsRef<Path>, variant: impl Into<String>) -> bool {
        let key = AssetKey::new::<T>(path.as_ref(), variant.into());
        self.unload_key(&key, T::type_name())
    }

    pub fn unload_all_of_type<T: Asset>(&self) {
        let keys: Vec<AssetKey> = {
            let inner = self.shared.inner.lock().unwrap();
            inner.records.keys().filter(|key| key.type_id == TypeId::of::<T>()).cloned().collect()
        };
        for key in keys {
            self.unload_key(&key, T::type_name());
        }
    }

    /// Unload every `Loaded` record whose asset is referenced only by the
    /// cache itself (no outstanding caller-held `Arc`).
    pub fn unload_unused(&self) {
        let victims: Vec<(AssetKey, &'static str)> = {
            let inner = self.shared.inner.lock().unwrap();
            inner
                .records
                .iter()
                .filter(|(_, record)| {
                    record.is_loaded() && record.asset.as_ref().map(|asset| Arc::strong_count(asset) == 1).unwrap_or(false)
                })
                .map(|(key, _)| {
                    let type_name = inner
                        .loaders
                        .get_by_type_id(key.type_id)
                        .map(|loader| loader.asset_type_name())
                        .unwrap_or("unknown");
                    (key.clone(), type_name)
                })
                .collect()
        };
        for (key, type_name) in victims {
            self.unload_key(&key, type_name);
        }
    }

    pub fn clear(&self) {
        let victims: Vec<(AssetKey, &'static str)> = {
            let inner = self.shared.inner.lock().unwrap();
            inner
                .records
                .keys()
                .map(|key| {
                    let type_name = inner
                        .loaders
                        .get_by_type_id(key.type_id)
                        .map(|loader| loader.asset_type_name())
                        .unwrap_or("unknown");
                    (key.clone(), type_name)
                })
                .collect()
        };
        for (key, type_name) in victims {
            self.unload_key(&key, type_name);
        }
    }

    /// Evict lowest `(access_count, last_access)` records until resident
    /// memory is at or below `trim_threshold * max_memory_bytes`.
    pub fn trim_to_threshold(&self) {
        let config = self.shared.config.lock().unwrap().clone();
        let threshold = (config.max_memory_bytes as f64 * config.trim_threshold as f64) as usize;
        loop {
            let victim = {
                let mut inner = self.shared.inner.lock().unwrap();
                if inner.stats.current_memory_bytes <= threshold {
                    None
                } else {
                    evict_one(&mut inner)
                }
            };
            match victim {
                Some((path, type_name)) => self.shared.fire_unloaded(&path, type_name),
                None => break,
            }
        }
    }

    /// Mark every `Loading` record `Failed` with message `"cancelled"`.
    /// The corresponding background jobs notice the status change on their
    /// next poll and resolve their futures accordingly.
    pub fn cancel_all_loads(&self) {
        let victims: Vec<(PathBuf, &'static str)> = {
            let mut inner = self.shared.inner.lock().unwrap();
            let mut victims = Vec::new();
            for (key, record) in inner.records.iter_mut() {
                if record.status == AssetStatus::Loading {
                    record.mark_failed("cancelled");
                    victims.push(key.clone());
                }
            }
            victims
                .into_iter()
                .map(|key| {
                    let type_name = inner
                        .loaders
                        .get_by_type_id(key.type_id)
                        .map(|loader| loader.asset_type_name())
                        .unwrap_or("unknown");
                    (key.path, type_name)
                })
                .collect()
        };
        for (path, type_name) in victims {
            self.shared.fire_failed(&path, type_name, "cancelled");
        }
    }

    fn unload_key(&self, key: &AssetKey, type_name: &'static str) -> bool {
        let removed = {
            let mut inner = self.shared.inner.lock().unwrap();
            match inner.records.remove(key) {
                Some(mut record) => {
                    record.mark_unloading();
                    inner.stats.current_memory_bytes = inner.stats.current_memory_bytes.saturating_sub(record.memory_usage);
                    true
                }
                None => false,
            }
        };
        if removed {
            self.shared.fire_unloaded(key.path(), type_name);
        }
        removed
    }
}

impl Default for AssetCache {
    fn default() -> Self {
        Self::new(AssetCacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct FixedSizeAsset {
        bytes: usize,
    }

    impl Asset for FixedSizeAsset {
        fn type_name() -> &'static str {
            "FixedSizeAsset"
        }

        fn memory_usage(&self) -> usize {
            self.bytes
        }
    }

    struct FixedSizeLoader {
        bytes: usize,
    }

    impl AssetLoader for FixedSizeLoader {
        type Asset = FixedSizeAsset;

        fn load(&self, _path: &Path, _params: &dyn Any) -> AssetResult<Self::Asset> {
            Ok(FixedSizeAsset { bytes: self.bytes })
        }

        fn supported_extensions(&self) -> &[&str] {
            &[]
        }
    }

    struct AlwaysFailLoader;

    impl AssetLoader for AlwaysFailLoader {
        type Asset = FixedSizeAsset;

        fn load(&self, path: &Path, _params: &dyn Any) -> AssetResult<Self::Asset> {
            Err(AssetError::LoaderError {
                path: path.to_path_buf(),
                message: "synthetic failure".to_string(),
            })
        }

        fn supported_extensions(&self) -> &[&str] {
            &[]
        }
    }

    #[test]
    fn lru_eviction_picks_lowest_access_count_then_oldest_access() {
        let cache = AssetCache::new(AssetCacheConfig {
            max_memory_bytes: 1024,
            trim_threshold: 0.5,
            ..AssetCacheConfig::default()
        });
        cache.register_loader::<FixedSizeAsset>(FixedSizeLoader { bytes: 512 });

        let _a = cache.load_sync::<FixedSizeAsset>("a", "", &()).unwrap();
        let _b = cache.load_sync::<FixedSizeAsset>("b", "", &()).unwrap();
        let _c = cache.load_sync::<FixedSizeAsset>("c", "", &()).unwrap();
        let _a_again = cache.load_sync::<FixedSizeAsset>("a", "", &()).unwrap();

        cache.trim_to_threshold();

        assert!(cache.get::<FixedSizeAsset>("a", "").is_some());
        assert!(cache.get::<FixedSizeAsset>("b", "").is_none());
        assert!(cache.stats().current_memory_bytes <= 512);
    }

    #[test]
    fn async_load_failure_sets_status_and_fires_callback_once() {
        let cache = AssetCache::new(AssetCacheConfig::default());
        cache.register_loader::<FixedSizeAsset>(AlwaysFailLoader);

        let failures = Arc::new(AtomicUsize::new(0));
        let failures_clone = failures.clone();
        cache.set_callbacks(AssetCallbacks {
            on_failed: Some(Box::new(move |_path, _type_name, _message| {
                failures_clone.fetch_add(1, Ordering::SeqCst);
            })),
            ..Default::default()
        });

        let future = cache.load_async::<FixedSizeAsset>("broken.bin", "", Box::new(()), AssetPriority::Normal);
        let result = futures_lite::future::block_on(future);

        assert!(result.is_err());
        assert_eq!(failures.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn get_without_prior_load_is_a_cache_miss() {
        let cache = AssetCache::new(AssetCacheConfig::default());
        assert!(cache.get::<FixedSizeAsset>("missing", "").is_none());
        assert_eq!(cache.stats().cache_misses, 1);
    }

    #[test]
    fn unload_removes_record_and_frees_memory() {
        let cache = AssetCache::new(AssetCacheConfig::default());
        cache.register_loader::<FixedSizeAsset>(FixedSizeLoader { bytes: 128 });
        cache.load_sync::<FixedSizeAsset>("a", "", &()).unwrap();
        assert_eq!(cache.stats().current_memory_bytes, 128);

        assert!(cache.unload::<FixedSizeAsset>("a", ""));
        assert_eq!(cache.stats().current_memory_bytes, 0);
        assert!(cache.get::<FixedSizeAsset>("a", "").is_none());
    }

    #[test]
    fn cancel_all_loads_fails_in_flight_records_with_cancelled_message() {
        let cache = AssetCache::new(AssetCacheConfig::default());
        cache.register_loader::<FixedSizeAsset>(FixedSizeLoader { bytes: 64 });

        {
            let mut inner = cache.shared.inner.lock().unwrap();
            let key = AssetKey::new::<FixedSizeAsset>(PathBuf::from("slow"), String::new());
            inner
                .records
                .entry(key)
                .or_insert_with(|| AssetRecord::pending(AssetPriority::Normal))
                .mark_loading(AssetPriority::Normal, true);
        }

        cache.cancel_all_loads();

        let inner = cache.shared.inner.lock().unwrap();
        let key = AssetKey::new::<FixedSizeAsset>(PathBuf::from("slow"), String::new());
        let record = inner.records.get(&key).unwrap();
        assert_eq!(record.status, AssetStatus::Failed);
        assert_eq!(record.error_message.as_deref(), Some("cancelled"));
    }
}
