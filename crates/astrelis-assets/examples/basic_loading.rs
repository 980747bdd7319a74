//! Basic asset loading example.
//!
//! This example shows:
//! - Registering custom loaders with an `AssetCache`
//! - Loading assets synchronously
//! - Reading back cache statistics
//! - Draining change events

use std::io::Write;

use astrelis_assets::prelude::*;

/// A simple JSON config asset.
#[derive(Debug)]
struct JsonConfig {
    data: serde_json::Value,
}

impl Asset for JsonConfig {
    fn type_name() -> &'static str {
        "JsonConfig"
    }

    fn memory_usage(&self) -> usize {
        self.data.to_string().len()
    }
}

struct JsonConfigLoader;

impl AssetLoader for JsonConfigLoader {
    type Asset = JsonConfig;

    fn load(&self, path: &std::path::Path, _params: &dyn std::any::Any) -> AssetResult<Self::Asset> {
        let bytes = std::fs::read(path)?;
        let data: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| AssetError::LoaderError {
            path: path.to_path_buf(),
            message: format!("JSON parse error: {}", e),
        })?;
        Ok(JsonConfig { data })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}

/// A simple image asset (just stores dimensions and pixel count).
#[derive(Debug)]
struct SimpleImage {
    width: u32,
    height: u32,
    pixel_count: usize,
}

impl Asset for SimpleImage {
    fn type_name() -> &'static str {
        "SimpleImage"
    }

    fn memory_usage(&self) -> usize {
        self.pixel_count * 4
    }
}

/// Loader for a fake "image" format: first 8 bytes are width/height as u32 LE.
struct SimpleImageLoader;

impl AssetLoader for SimpleImageLoader {
    type Asset = SimpleImage;

    fn load(&self, path: &std::path::Path, _params: &dyn std::any::Any) -> AssetResult<Self::Asset> {
        let bytes = std::fs::read(path)?;
        if bytes.len() < 8 {
            return Err(AssetError::LoaderError {
                path: path.to_path_buf(),
                message: "Image file too small".to_string(),
            });
        }

        let width = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let height = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let pixel_count = bytes.len().saturating_sub(8) / 4;

        Ok(SimpleImage { width, height, pixel_count })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["img"]
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let assets_path = temp_dir.path();

    println!("Created temp directory: {}", assets_path.display());
    create_test_assets(assets_path)?;

    let cache = AssetCache::new(AssetCacheConfig::default());
    cache.register_loader(JsonConfigLoader);
    cache.register_loader(SimpleImageLoader);

    println!("\n=== Loading Assets ===\n");

    let config: std::sync::Arc<JsonConfig> =
        cache.load_sync(assets_path.join("config.json"), "", &())?;
    let readme: std::sync::Arc<String> = cache.load_sync(assets_path.join("readme.txt"), "", &())?;
    let image: std::sync::Arc<SimpleImage> =
        cache.load_sync(assets_path.join("sprite.img"), "", &())?;

    println!("Config data: {}", config.data);
    println!("Readme contents:\n{}", *readme);
    println!(
        "Image: {}x{} ({} pixels)",
        image.width, image.height, image.pixel_count
    );

    println!("\n=== Cache Hit On Second Load ===\n");
    let _config_again: std::sync::Arc<JsonConfig> =
        cache.load_sync(assets_path.join("config.json"), "", &())?;
    let stats = cache.stats();
    println!(
        "hits={} misses={} assets={} memory_bytes={}",
        stats.cache_hits, stats.cache_misses, stats.asset_count, stats.current_memory_bytes
    );

    println!("\n=== Events ===\n");
    for event in cache.drain_events() {
        match event {
            AssetEvent::Loaded { path, type_name } => {
                println!("Loaded {} ({})", path.display(), type_name);
            }
            AssetEvent::Unloaded { path, type_name } => {
                println!("Unloaded {} ({})", path.display(), type_name);
            }
            AssetEvent::Failed { path, error, .. } => {
                println!("Failed to load {}: {}", path.display(), error);
            }
        }
    }

    println!("\n=== Done ===");
    Ok(())
}

fn create_test_assets(path: &std::path::Path) -> std::io::Result<()> {
    let config_path = path.join("config.json");
    let mut config_file = std::fs::File::create(&config_path)?;
    writeln!(
        config_file,
        r#"{{
    "game_name": "Astrelis Demo",
    "version": "1.0.0",
    "settings": {{
        "fullscreen": false,
        "vsync": true,
        "volume": 0.8
    }}
}}"#
    )?;
    println!("Created: {}", config_path.display());

    let readme_path = path.join("readme.txt");
    let mut readme_file = std::fs::File::create(&readme_path)?;
    writeln!(readme_file, "Welcome to the Astrelis Asset System!")?;
    writeln!(readme_file, "This is a simple text asset loaded from disk.")?;
    println!("Created: {}", readme_path.display());

    let image_path = path.join("sprite.img");
    let mut image_file = std::fs::File::create(&image_path)?;
    image_file.write_all(&64u32.to_le_bytes())?;
    image_file.write_all(&64u32.to_le_bytes())?;
    let pixels: Vec<u8> = (0..64 * 64 * 4).map(|i| (i % 256) as u8).collect();
    image_file.write_all(&pixels)?;
    println!("Created: {}", image_path.display());

    Ok(())
}
