//! Integration tests for the asset cache.
//!
//! These tests use tempfile to create isolated test environments.

use std::io::Write;
use std::sync::Arc;
use std::thread;

use astrelis_assets::*;

// ============================================================================
// Test Asset Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct TestConfig {
    name: String,
    value: i32,
}

impl Asset for TestConfig {
    fn type_name() -> &'static str {
        "TestConfig"
    }
}

struct TestConfigLoader;

impl AssetLoader for TestConfigLoader {
    type Asset = TestConfig;

    fn load(&self, path: &std::path::Path, _params: &dyn std::any::Any) -> AssetResult<Self::Asset> {
        let bytes = std::fs::read(path)?;
        let text = std::str::from_utf8(&bytes).map_err(|e| AssetError::LoaderError {
            path: path.to_path_buf(),
            message: format!("Invalid UTF-8: {}", e),
        })?;

        let mut name = String::new();
        let mut value = 0;
        for line in text.lines() {
            if let Some((key, val)) = line.trim().split_once(':') {
                match key.trim() {
                    "name" => name = val.trim().to_string(),
                    "value" => value = val.trim().parse().unwrap_or(0),
                    _ => {}
                }
            }
        }

        Ok(TestConfig { name, value })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["cfg", "config"]
    }
}

#[derive(Debug, Clone, PartialEq)]
struct BinaryData {
    header: u32,
    payload: Vec<u8>,
}

impl Asset for BinaryData {
    fn type_name() -> &'static str {
        "BinaryData"
    }
}

struct BinaryDataLoader;

impl AssetLoader for BinaryDataLoader {
    type Asset = BinaryData;

    fn load(&self, path: &std::path::Path, _params: &dyn std::any::Any) -> AssetResult<Self::Asset> {
        let bytes = std::fs::read(path)?;
        if bytes.len() < 4 {
            return Err(AssetError::LoaderError {
                path: path.to_path_buf(),
                message: "Binary data too small".to_string(),
            });
        }

        let header = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let payload = bytes[4..].to_vec();
        Ok(BinaryData { header, payload })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["bin", "dat"]
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn test_cache() -> AssetCache {
    let cache = AssetCache::new(AssetCacheConfig::default());
    cache.register_loader(TestConfigLoader);
    cache.register_loader(BinaryDataLoader);
    cache
}

fn write_config_file(path: &std::path::Path, name: &str, value: i32) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "name: {}", name)?;
    writeln!(file, "value: {}", value)?;
    Ok(())
}

fn write_binary_file(path: &std::path::Path, header: u32, payload: &[u8]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(&header.to_le_bytes())?;
    file.write_all(payload)?;
    Ok(())
}

// ============================================================================
// Basic Loading Tests
// ============================================================================

#[test]
fn test_load_text_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("test.txt");
    std::fs::write(&file_path, "Hello, World!").unwrap();

    let cache = test_cache();
    let text: Arc<String> = cache.load_sync(&file_path, "", &()).unwrap();
    assert_eq!(*text, "Hello, World!");
    assert!(cache.get::<String>(&file_path, "").is_some());
}

#[test]
fn test_load_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("game.cfg");
    write_config_file(&file_path, "TestGame", 42).unwrap();

    let cache = test_cache();
    let config: Arc<TestConfig> = cache.load_sync(&file_path, "", &()).unwrap();
    assert_eq!(config.name, "TestGame");
    assert_eq!(config.value, 42);
}

#[test]
fn test_load_binary_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("data.bin");
    write_binary_file(&file_path, 0xDEADBEEF, &[1, 2, 3, 4, 5]).unwrap();

    let cache = test_cache();
    let data: Arc<BinaryData> = cache.load_sync(&file_path, "", &()).unwrap();
    assert_eq!(data.header, 0xDEADBEEF);
    assert_eq!(data.payload, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_load_nonexistent_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let cache = test_cache();

    let result: AssetResult<Arc<String>> = cache.load_sync(temp_dir.path().join("nonexistent.txt"), "", &());
    assert!(result.is_err());
}

#[test]
fn test_no_loader_for_type() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("test.unknown");
    std::fs::write(&file_path, "Content").unwrap();

    // No TestConfig loader registered on a bare cache.
    let cache = AssetCache::new(AssetCacheConfig::default());
    let result: AssetResult<Arc<TestConfig>> = cache.load_sync(&file_path, "", &());
    assert!(matches!(result, Err(AssetError::NoLoader { .. })));
}

// ============================================================================
// Caching and Variant Tests
// ============================================================================

#[test]
fn test_cache_hit_on_second_load() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("test.txt");
    std::fs::write(&file_path, "Content").unwrap();

    let cache = test_cache();
    let first: Arc<String> = cache.load_sync(&file_path, "", &()).unwrap();
    let second: Arc<String> = cache.load_sync(&file_path, "", &()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let stats = cache.stats();
    assert_eq!(stats.cache_misses, 1);
    assert_eq!(stats.cache_hits, 1);
}

#[test]
fn test_variants_are_distinct_entries() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("test.txt");
    std::fs::write(&file_path, "Content").unwrap();

    let cache = test_cache();
    let a: Arc<String> = cache.load_sync(&file_path, "variant-a", &()).unwrap();
    let b: Arc<String> = cache.load_sync(&file_path, "variant-b", &()).unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(cache.stats().asset_count, 2);
}

// ============================================================================
// Unload and Eviction Tests
// ============================================================================

#[test]
fn test_unload_removes_asset() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("test.txt");
    std::fs::write(&file_path, "Content").unwrap();

    let cache = test_cache();
    let _text: Arc<String> = cache.load_sync(&file_path, "", &()).unwrap();
    assert!(cache.get::<String>(&file_path, "").is_some());

    assert!(cache.unload::<String>(&file_path, ""));
    assert!(cache.get::<String>(&file_path, "").is_none());
}

#[test]
fn test_clear_removes_everything() {
    let temp_dir = tempfile::tempdir().unwrap();
    for i in 0..3 {
        std::fs::write(temp_dir.path().join(format!("f{i}.txt")), "x").unwrap();
    }

    let cache = test_cache();
    for i in 0..3 {
        let _: Arc<String> = cache.load_sync(temp_dir.path().join(format!("f{i}.txt")), "", &()).unwrap();
    }
    assert_eq!(cache.stats().asset_count, 3);

    cache.clear();
    assert_eq!(cache.stats().asset_count, 0);
}

#[test]
fn test_trim_to_threshold_evicts_least_used() {
    let temp_dir = tempfile::tempdir().unwrap();
    for name in ["a.bin", "b.bin", "c.bin"] {
        write_binary_file(&temp_dir.path().join(name), 0, &[0u8; 508]).unwrap();
    }

    let cache = AssetCache::new(AssetCacheConfig {
        max_memory_bytes: 1024,
        trim_threshold: 0.5,
        ..Default::default()
    });
    cache.register_loader(BinaryDataLoader);

    let a: Arc<BinaryData> = cache.load_sync(temp_dir.path().join("a.bin"), "", &()).unwrap();
    let _b: Arc<BinaryData> = cache.load_sync(temp_dir.path().join("b.bin"), "", &()).unwrap();
    let _c: Arc<BinaryData> = cache.load_sync(temp_dir.path().join("c.bin"), "", &()).unwrap();
    let _a_again: Arc<BinaryData> = cache.load_sync(temp_dir.path().join("a.bin"), "", &()).unwrap();
    drop(a);

    cache.trim_to_threshold();
    assert!(cache.stats().current_memory_bytes <= 512);
    assert!(cache.get::<BinaryData>(temp_dir.path().join("b.bin"), "").is_none());
}

// ============================================================================
// Event Tests
// ============================================================================

#[test]
fn test_loaded_event_fires() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("test.txt");
    std::fs::write(&file_path, "Content").unwrap();

    let cache = test_cache();
    let _text: Arc<String> = cache.load_sync(&file_path, "", &()).unwrap();

    let events = cache.drain_events();
    assert_eq!(events.iter().filter(|e| matches!(e, AssetEvent::Loaded { .. })).count(), 1);
}

#[test]
fn test_unloaded_event_fires() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("test.txt");
    std::fs::write(&file_path, "Content").unwrap();

    let cache = test_cache();
    let _text: Arc<String> = cache.load_sync(&file_path, "", &()).unwrap();
    cache.drain_events();

    cache.unload::<String>(&file_path, "");
    let events = cache.drain_events();
    assert_eq!(events.iter().filter(|e| matches!(e, AssetEvent::Unloaded { .. })).count(), 1);
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn test_loader_error_handling() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("invalid.bin");
    std::fs::write(&file_path, [1, 2]).unwrap();

    let cache = test_cache();
    let result: AssetResult<Arc<BinaryData>> = cache.load_sync(&file_path, "", &());

    assert!(result.is_err());
    match result.unwrap_err() {
        AssetError::LoaderError { message, .. } => {
            assert!(message.contains("too small"));
        }
        other => panic!("Expected LoaderError, got {:?}", other),
    }
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[test]
fn test_concurrent_reads() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("shared.txt");
    std::fs::write(&file_path, "Shared Content").unwrap();

    let cache = test_cache();
    let _text: Arc<String> = cache.load_sync(&file_path, "", &()).unwrap();

    let mut handles = vec![];
    for _ in 0..4 {
        let cache = cache.clone();
        let file_path = file_path.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                let text: Arc<String> = cache.load_sync(&file_path, "", &()).unwrap();
                assert_eq!(*text, "Shared Content");
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn test_concurrent_loads_of_distinct_files() {
    let temp_dir = tempfile::tempdir().unwrap();
    for i in 0..10 {
        std::fs::write(temp_dir.path().join(format!("file{}.txt", i)), format!("Content {}", i)).unwrap();
    }

    let cache = test_cache();
    let mut handles = vec![];
    for i in 0..10 {
        let cache = cache.clone();
        let path = temp_dir.path().join(format!("file{}.txt", i));
        handles.push(thread::spawn(move || {
            let text: Arc<String> = cache.load_sync(&path, "", &()).unwrap();
            assert_eq!(*text, format!("Content {}", i));
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(cache.stats().asset_count, 10);
}

#[test]
fn test_async_load_resolves() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("async.txt");
    std::fs::write(&file_path, "Async Content").unwrap();

    let cache = test_cache();
    let future = cache.load_async::<String>(&file_path, "", Box::new(()), AssetPriority::Normal);
    let text = futures_lite::future::block_on(future).unwrap();
    assert_eq!(*text, "Async Content");
}

#[test]
fn test_cancel_all_loads_fails_in_flight() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_path = temp_dir.path().join("slow.cfg");
    write_config_file(&file_path, "Slow", 1).unwrap();

    let cache = test_cache();
    cache.cancel_all_loads();
    // No in-flight load existed; this should simply be a no-op.
    assert_eq!(cache.stats().asset_count, 0);
}
