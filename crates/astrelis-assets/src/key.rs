//! Asset keys and load priority.

use std::any::TypeId;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Loading priority for async/preload requests. `Critical` is never queued -
/// the cache runs it synchronously on the calling thread instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AssetPriority {
    Low = 0,
    Normal = 1,
    High = 2,
    Critical = 3,
}

impl Default for AssetPriority {
    fn default() -> Self {
        AssetPriority::Normal
    }
}

/// Identifies one cached asset: a file path, the asset's Rust type, and an
/// optional variant tag. The same path can back multiple logical assets -
/// one `.ttf` loaded at several (size, quality) pairs, for example - so all
/// three components participate in equality and hashing.
#[derive(Debug, Clone, Eq)]
pub struct AssetKey {
    pub path: PathBuf,
    pub type_id: TypeId,
    pub variant: String,
}

impl AssetKey {
    pub fn new<T: 'static>(path: impl Into<PathBuf>, variant: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            type_id: TypeId::of::<T>(),
            variant: variant.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PartialEq for AssetKey {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.type_id == other.type_id && self.variant == other.variant
    }
}

impl Hash for AssetKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
        self.type_id.hash(state);
        self.variant.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_path_type_and_variant_are_equal() {
        let a = AssetKey::new::<String>("fonts/body.ttf", "18px");
        let b = AssetKey::new::<String>("fonts/body.ttf", "18px");
        assert_eq!(a, b);
    }

    #[test]
    fn different_variant_is_a_different_key() {
        let a = AssetKey::new::<String>("fonts/body.ttf", "18px");
        let b = AssetKey::new::<String>("fonts/body.ttf", "24px");
        assert_ne!(a, b);
    }

    #[test]
    fn different_type_is_a_different_key_for_same_path() {
        let a = AssetKey::new::<String>("sprites/hero.png", "");
        let b = AssetKey::new::<Vec<u8>>("sprites/hero.png", "");
        assert_ne!(a, b);
    }

    #[test]
    fn priority_ordering_places_critical_highest() {
        assert!(AssetPriority::Critical > AssetPriority::High);
        assert!(AssetPriority::High > AssetPriority::Normal);
        assert!(AssetPriority::Normal > AssetPriority::Low);
    }
}
