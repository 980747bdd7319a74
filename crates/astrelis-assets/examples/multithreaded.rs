//! Multithreaded asset loading example.
//!
//! This example demonstrates:
//! - Sharing one `AssetCache` across threads (it's cheaply `Clone`)
//! - Loading different asset types concurrently
//! - Using channels to collect progress from worker threads

use std::io::Write;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use astrelis_assets::prelude::*;

#[derive(Debug, Clone)]
struct GameConfig {
    name: String,
    max_entities: u32,
}

impl Asset for GameConfig {
    fn type_name() -> &'static str {
        "GameConfig"
    }
}

struct GameConfigLoader;

impl AssetLoader for GameConfigLoader {
    type Asset = GameConfig;

    fn load(&self, path: &std::path::Path, _params: &dyn std::any::Any) -> AssetResult<Self::Asset> {
        let bytes = std::fs::read(path)?;
        let text = std::str::from_utf8(&bytes).map_err(|e| AssetError::LoaderError {
            path: path.to_path_buf(),
            message: format!("Invalid UTF-8: {}", e),
        })?;

        let mut name = String::from("Unknown");
        let mut max_entities = 1000;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                match key.trim() {
                    "name" => name = value.trim().to_string(),
                    "max_entities" => max_entities = value.trim().parse().unwrap_or(1000),
                    _ => {}
                }
            }
        }

        thread::sleep(Duration::from_millis(50));
        Ok(GameConfig { name, max_entities })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["cfg", "config"]
    }
}

#[derive(Debug, Clone)]
struct LevelData {
    id: u32,
    width: u32,
    height: u32,
    tile_count: usize,
}

impl Asset for LevelData {
    fn type_name() -> &'static str {
        "LevelData"
    }
}

struct LevelLoader;

impl AssetLoader for LevelLoader {
    type Asset = LevelData;

    fn load(&self, path: &std::path::Path, _params: &dyn std::any::Any) -> AssetResult<Self::Asset> {
        let bytes = std::fs::read(path)?;
        if bytes.len() < 12 {
            return Err(AssetError::LoaderError {
                path: path.to_path_buf(),
                message: "Level file too small".to_string(),
            });
        }

        let id = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let width = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let height = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        let tile_count = bytes.len().saturating_sub(12);

        thread::sleep(Duration::from_millis(100));
        Ok(LevelData { id, width, height, tile_count })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["level", "lvl"]
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Multithreaded Asset Loading Example ===\n");

    let temp_dir = tempfile::tempdir()?;
    let assets_path = temp_dir.path().to_path_buf();
    create_test_assets(&assets_path)?;

    let cache = AssetCache::new(AssetCacheConfig::default());
    cache.register_loader(GameConfigLoader);
    cache.register_loader(LevelLoader);

    let (tx, rx) = mpsc::channel::<String>();

    println!("Spawning worker threads...\n");
    let mut handles = Vec::new();

    {
        let cache = cache.clone();
        let tx = tx.clone();
        let path = assets_path.join("game.cfg");
        handles.push(thread::spawn(move || {
            let thread_id = thread::current().id();
            tx.send(format!("[{:?}] Starting config load...", thread_id)).unwrap();
            let config: std::sync::Arc<GameConfig> =
                cache.load_sync(&path, "", &()).expect("Failed to load config");
            tx.send(format!(
                "[{:?}] Loaded config: name='{}', max_entities={}",
                thread_id, config.name, config.max_entities
            ))
            .unwrap();
        }));
    }

    for (i, file) in ["level1.lvl", "level2.lvl"].into_iter().enumerate() {
        let cache = cache.clone();
        let tx = tx.clone();
        let path = assets_path.join(file);
        handles.push(thread::spawn(move || {
            let thread_id = thread::current().id();
            tx.send(format!("[{:?}] Starting {} load...", thread_id, file)).unwrap();
            let level: std::sync::Arc<LevelData> =
                cache.load_sync(&path, "", &()).unwrap_or_else(|e| panic!("Failed to load {}: {}", file, e));
            tx.send(format!(
                "[{:?}] Loaded {}: id={}, {}x{}, {} tiles",
                thread_id, file, level.id, level.width, level.height, level.tile_count
            ))
            .unwrap();
        }));
        let _ = i;
    }

    {
        let cache = cache.clone();
        let tx = tx.clone();
        let assets_path = assets_path.clone();
        handles.push(thread::spawn(move || {
            let thread_id = thread::current().id();
            tx.send(format!("[{:?}] Starting text files load...", thread_id)).unwrap();
            for file in ["readme.txt", "notes.txt"] {
                let text: std::sync::Arc<String> = cache
                    .load_sync(assets_path.join(file), "", &())
                    .expect("Failed to load text");
                let preview: String = text.chars().take(50).collect();
                tx.send(format!("[{:?}] Loaded '{}': \"{}...\"", thread_id, file, preview)).unwrap();
            }
        }));
    }

    drop(tx);

    for msg in rx {
        println!("{}", msg);
    }

    println!("\nWaiting for threads to complete...");
    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    println!("\n=== Final Statistics ===\n");
    let stats = cache.stats();
    println!("assets cached: {}", stats.asset_count);
    println!("memory bytes: {}", stats.current_memory_bytes);
    println!("cache hits: {}, misses: {}", stats.cache_hits, stats.cache_misses);

    println!("\n=== Done ===");
    Ok(())
}

fn create_test_assets(path: &std::path::Path) -> std::io::Result<()> {
    let config_path = path.join("game.cfg");
    let mut file = std::fs::File::create(&config_path)?;
    writeln!(file, "# Game Configuration")?;
    writeln!(file, "name = Astrelis Demo")?;
    writeln!(file, "max_entities = 5000")?;
    println!("Created: {}", config_path.display());

    let level1_path = path.join("level1.lvl");
    let mut file = std::fs::File::create(&level1_path)?;
    file.write_all(&1u32.to_le_bytes())?;
    file.write_all(&64u32.to_le_bytes())?;
    file.write_all(&48u32.to_le_bytes())?;
    file.write_all(&vec![0u8; 64 * 48])?;
    println!("Created: {}", level1_path.display());

    let level2_path = path.join("level2.lvl");
    let mut file = std::fs::File::create(&level2_path)?;
    file.write_all(&2u32.to_le_bytes())?;
    file.write_all(&128u32.to_le_bytes())?;
    file.write_all(&96u32.to_le_bytes())?;
    file.write_all(&vec![1u8; 128 * 96])?;
    println!("Created: {}", level2_path.display());

    let readme_path = path.join("readme.txt");
    let mut file = std::fs::File::create(&readme_path)?;
    writeln!(file, "Welcome to the Astrelis Engine!")?;
    writeln!(file, "This demonstrates multithreaded asset loading.")?;
    println!("Created: {}", readme_path.display());

    let notes_path = path.join("notes.txt");
    let mut file = std::fs::File::create(&notes_path)?;
    writeln!(file, "Developer Notes:")?;
    writeln!(file, "- Assets are loaded in parallel")?;
    writeln!(file, "- One AssetCache instance is shared across threads")?;
    println!("Created: {}", notes_path.display());

    println!();
    Ok(())
}
