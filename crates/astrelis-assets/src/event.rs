//! Change notifications for loaded, unloaded, and failed assets.

use std::path::PathBuf;

/// A notification about a cache key's status changing. Emitted (and
/// delivered via callback) outside the cache's internal mutex.
#[derive(Debug, Clone)]
pub enum AssetEvent {
    Loaded { path: PathBuf, type_name: &'static str },
    Unloaded { path: PathBuf, type_name: &'static str },
    Failed { path: PathBuf, type_name: &'static str, error: String },
}

/// A simple append/drain buffer for polling consumers that don't want to
/// register a callback.
#[derive(Default)]
pub struct AssetEventBuffer {
    events: Vec<AssetEvent>,
}

impl AssetEventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: AssetEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<AssetEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssetEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_the_buffer_and_returns_prior_contents() {
        let mut buffer = AssetEventBuffer::new();
        buffer.push(AssetEvent::Loaded {
            path: "a.png".into(),
            type_name: "Texture",
        });
        buffer.push(AssetEvent::Unloaded {
            path: "b.png".into(),
            type_name: "Texture",
        });
        assert_eq!(buffer.len(), 2);

        let drained = buffer.drain();
        assert_eq!(drained.len(), 2);
        assert!(buffer.is_empty());
    }
}
