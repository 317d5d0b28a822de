//! Decoded sprite sheet and slide cache.
//!
//! Keeps RGBA8 pixel data of recently preloaded assets under an LRU policy,
//! so tiles sharing a sprite sheet decode it once.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Decoded RGBA8 pixels of one asset.
#[derive(Clone, Debug)]
pub struct CachedSprite {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl CachedSprite {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }
}

/// LRU cache for decoded assets, keyed by location.
pub struct SpriteCache {
    cache: LruCache<PathBuf, CachedSprite>,
}

impl SpriteCache {
    /// Creates a new cache. A zero capacity is bumped to one entry.
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// Retrieves a decoded asset if it exists.
    pub fn get(&mut self, path: &Path) -> Option<CachedSprite> {
        let result = self.cache.get(path).cloned();
        if result.is_some() {
            log::debug!("Sprite cache HIT: {}", path.display());
        } else {
            log::debug!("Sprite cache MISS: {}", path.display());
        }
        result
    }

    pub fn put(&mut self, path: PathBuf, sprite: CachedSprite) {
        log::info!(
            "Sprite cache PUT: {} ({}x{})",
            path.display(),
            sprite.width,
            sprite.height
        );
        self.cache.put(path, sprite);
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.cache.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(width: u32) -> CachedSprite {
        CachedSprite::new(vec![0; (width * 4) as usize], width, 1)
    }

    #[test]
    fn test_get_after_put() {
        let mut cache = SpriteCache::new(2);
        cache.put(PathBuf::from("a.png"), sprite(3));
        let hit = cache.get(Path::new("a.png")).unwrap();
        assert_eq!(hit.width, 3);
        assert!(cache.get(Path::new("b.png")).is_none());
    }

    #[test]
    fn test_least_recently_used_is_evicted() {
        let mut cache = SpriteCache::new(2);
        cache.put(PathBuf::from("a.png"), sprite(1));
        cache.put(PathBuf::from("b.png"), sprite(2));
        cache.get(Path::new("a.png"));
        cache.put(PathBuf::from("c.png"), sprite(3));

        assert!(cache.contains(Path::new("a.png")));
        assert!(!cache.contains(Path::new("b.png")));
        assert!(cache.contains(Path::new("c.png")));
    }

    #[test]
    fn test_zero_capacity_still_caches_one() {
        let mut cache = SpriteCache::new(0);
        cache.put(PathBuf::from("a.png"), sprite(1));
        assert!(cache.contains(Path::new("a.png")));
    }
}
