//! Explicit, concurrency-safe embedding cache
//!
//! The cache is an object passed in at construction time with an explicit
//! invalidation method, replacing the module-level caching singletons of the
//! source system. Duplicate concurrent computation of the same embedding is
//! wasteful but not unsafe, so a plain RwLock'd map is sufficient.

use crate::{EmbeddingError, EmbeddingModel};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Concurrency-safe, text-keyed embedding cache.
///
/// Cloning is cheap and shares the underlying storage, so one cache can be
/// handed to several concurrent pipeline workers.
#[derive(Clone, Default)]
pub struct EmbeddingCache {
    entries: Arc<RwLock<HashMap<String, Arc<Vec<f32>>>>>,
}

impl EmbeddingCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the embedding for exact text
    pub fn get(&self, text: &str) -> Option<Arc<Vec<f32>>> {
        self.entries
            .read()
            .ok()
            .and_then(|map| map.get(text).cloned())
    }

    /// Insert an embedding, returning the cached (possibly pre-existing) value.
    ///
    /// If two threads race on the same text, the first insert wins and both
    /// observe the same vector afterwards.
    pub fn insert(&self, text: &str, embedding: Vec<f32>) -> Arc<Vec<f32>> {
        let mut map = match self.entries.write() {
            Ok(map) => map,
            // A poisoned lock means a panic elsewhere; serve the value uncached.
            Err(_) => return Arc::new(embedding),
        };
        map.entry(text.to_string())
            .or_insert_with(|| Arc::new(embedding))
            .clone()
    }

    /// Drop all cached entries. Call after swapping the underlying model.
    pub fn invalidate(&self) {
        if let Ok(mut map) = self.entries.write() {
            map.clear();
        }
    }

    /// Number of cached texts
    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An embedding model wrapped with a text-level cache.
///
/// Callers that embed the same section text repeatedly (the retriever does,
/// once per candidate pool) go through this wrapper so recomputation only
/// happens on cache misses.
pub struct CachingEmbedder<M: EmbeddingModel> {
    model: M,
    cache: EmbeddingCache,
}

impl<M: EmbeddingModel> CachingEmbedder<M> {
    /// Wrap a model with the given cache
    pub fn new(model: M, cache: EmbeddingCache) -> Self {
        Self { model, cache }
    }

    /// Embed text, consulting the cache first
    pub fn embed(&self, text: &str) -> Result<Arc<Vec<f32>>, EmbeddingError> {
        if let Some(cached) = self.cache.get(text) {
            return Ok(cached);
        }
        let embedding = self.model.embed(text)?;
        Ok(self.cache.insert(text, embedding))
    }

    /// Dimension of the wrapped model
    pub fn dimension(&self) -> usize {
        self.model.dimension()
    }

    /// Access the cache (for invalidation or inspection)
    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }
}
