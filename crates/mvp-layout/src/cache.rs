#![forbid(unsafe_code)]

//! Memoizing wrapper around any [`LineLayout`].
//!
//! Card decks lay out the same verse many times. [`CachedLayout`] keeps the
//! lines of the most recently used texts in an LRU keyed by the exact input
//! string. A hit returns the stored lines without calling the inner engine.
//!
//! Engines that record a graph (see [`LineLayout::layout_with_graph`]) have
//! their snapshot cached with the lines. [`CachedLayout::debug_graph`]
//! returns the snapshot of the text served last, hit or miss, so the debug
//! surface never lags behind the cache.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;
use rustc_hash::FxBuildHasher;

use crate::LineLayout;
use crate::config::ConfigError;
use crate::inspect::GraphSnapshot;

#[derive(Debug, Clone)]
struct CachedLines {
    lines: Vec<String>,
    graph: Option<GraphSnapshot>,
}

type LineCache = LruCache<String, CachedLines, FxBuildHasher>;

/// LRU-memoized layout engine.
#[derive(Debug)]
pub struct CachedLayout<L> {
    inner: L,
    cache: Mutex<LineCache>,
    last: Mutex<Option<GraphSnapshot>>,
}

impl<L: LineLayout> CachedLayout<L> {
    /// Wrap `inner`, keeping at most `capacity` distinct texts.
    pub fn new(inner: L, capacity: usize) -> Result<Self, ConfigError> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| ConfigError::new("cache_capacity", "0", "must be >= 1"))?;
        Ok(Self {
            inner,
            cache: Mutex::new(LruCache::with_hasher(capacity, FxBuildHasher)),
            last: Mutex::new(None),
        })
    }

    #[must_use]
    pub fn inner(&self) -> &L {
        &self.inner
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    /// Number of cached texts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Graph behind the most recent `layout` call, served from the cache on
    /// a hit. `None` before the first call or when the inner engine records
    /// no graph.
    #[must_use]
    pub fn debug_graph(&self) -> Option<GraphSnapshot> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock(&self) -> MutexGuard<'_, LineCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, graph: Option<GraphSnapshot>) {
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = graph;
    }
}

impl<L: LineLayout> LineLayout for CachedLayout<L> {
    fn layout(&self, text: &str) -> Vec<String> {
        self.layout_with_graph(text).0
    }

    fn layout_with_graph(&self, text: &str) -> (Vec<String>, Option<GraphSnapshot>) {
        let hit = self.lock().get(text).cloned();
        if let Some(entry) = hit {
            tracing::trace!(len = text.len(), "layout cache hit");
            self.publish(entry.graph.clone());
            return (entry.lines, entry.graph);
        }

        // Lock released while the inner engine runs.
        let (lines, graph) = self.inner.layout_with_graph(text);
        self.publish(graph.clone());
        self.lock().put(
            text.to_string(),
            CachedLines {
                lines: lines.clone(),
                graph: graph.clone(),
            },
        );
        (lines, graph)
    }

    fn debug_graph(&self) -> Option<GraphSnapshot> {
        CachedLayout::debug_graph(self)
    }
}
