//! Memoized loading of the resolved table.
//!
//! Resolving scans and parses whole files, so the result is kept for the life of
//! the process. Nothing varies the source, so the cache holds a single entry under
//! the unit key and is only invalidated by restarting.

use std::sync::Arc;

use moka::sync::Cache;

use super::{Resolved, Resolver};

/// Storage for the single resolved table.
pub trait TableCache: Send + Sync {
    /// Return the cached value, running `load` only if nothing is cached yet.
    fn get_or_load(&self, load: &dyn Fn() -> Resolved) -> Arc<Resolved>;
}

/// Process-lifetime cache backed by moka. No TTL or idle expiry.
#[derive(Clone)]
pub struct MokaTableCache {
    inner: Cache<(), Arc<Resolved>>,
}

impl MokaTableCache {
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Cache::builder().max_capacity(1).build() }
    }
}

impl Default for MokaTableCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TableCache for MokaTableCache {
    fn get_or_load(&self, load: &dyn Fn() -> Resolved) -> Arc<Resolved> {
        self.inner.get_with((), || {
            tracing::debug!("Table cache miss, resolving sources");
            Arc::new(load())
        })
    }
}

impl std::fmt::Debug for MokaTableCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaTableCache").field("cached", &self.inner.contains_key(&())).finish()
    }
}

/// Resolves on every call. For one-shot CLI runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uncached;

impl TableCache for Uncached {
    fn get_or_load(&self, load: &dyn Fn() -> Resolved) -> Arc<Resolved> {
        Arc::new(load())
    }
}

/// Zero-argument loader: the resolver behind an injected cache.
pub struct DataLoader {
    resolver: Resolver,
    cache: Box<dyn TableCache>,
}

impl DataLoader {
    #[must_use]
    pub fn new(resolver: Resolver, cache: impl TableCache + 'static) -> Self {
        Self { resolver, cache: Box::new(cache) }
    }

    /// The resolved table, loading it on first use.
    #[must_use]
    pub fn load(&self) -> Arc<Resolved> {
        self.cache.get_or_load(&|| self.resolver.resolve())
    }
}

impl std::fmt::Debug for DataLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataLoader").field("resolver", &self.resolver).finish_non_exhaustive()
    }
}
