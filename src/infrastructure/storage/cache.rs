// In-memory cache implementation using DashMap
use crate::domain::model::CacheKey;
use dashmap::DashMap;

/// Thread-safe memo of completed translations
///
/// Unbounded and never evicted; it lives as long as its dispatcher.
/// Writes to an existing key overwrite it.
pub struct MemoryCache {
    map: DashMap<CacheKey, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }

    pub fn get(&self, text: &str, target_lang: &str) -> Option<String> {
        self.map
            .get(&CacheKey::new(text, target_lang))
            .map(|entry| entry.value().clone())
    }

    pub fn insert(&self, text: &str, target_lang: &str, value: String) {
        self.map.insert(CacheKey::new(text, target_lang), value);
    }

    pub fn clear(&self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}
