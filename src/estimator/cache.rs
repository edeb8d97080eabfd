// ABOUTME: Bounded memoization wrapper around any meal estimator
// ABOUTME: LRU eviction with per-entry TTL, keyed by normalized meal text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrack

use super::{normalize_meal_text, MealEstimator};
use crate::config::EstimateCacheConfig;
use crate::errors::AppResult;
use crate::models::MacroTotals;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Cached estimate with insertion timestamp for TTL expiry
#[derive(Debug, Clone, Copy)]
struct CachedEstimate {
    estimate: MacroTotals,
    stored_at: Instant,
}

impl CachedEstimate {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

/// Memoizing wrapper: identical normalized meal text within the retention
/// window returns the stored estimate without a second external call
///
/// The cache is process-lifetime, bounded by max-entries (LRU eviction) and
/// per-entry TTL, and keyed by normalized text only, not per user: the
/// estimate for "two eggs" does not depend on who logged them. Failures are
/// never cached.
pub struct CachedEstimator<E> {
    inner: E,
    store: Mutex<LruCache<String, CachedEstimate>>,
    ttl: Duration,
}

impl<E> CachedEstimator<E> {
    /// Fallback capacity when config specifies zero entries
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Wrap an estimator with a bounded cache
    pub fn new(inner: E, config: &EstimateCacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(Self::DEFAULT_CAPACITY);
        Self {
            inner,
            store: Mutex::new(LruCache::new(capacity)),
            ttl: config.ttl,
        }
    }
}

#[async_trait::async_trait]
impl<E: MealEstimator> MealEstimator for CachedEstimator<E> {
    async fn estimate(&self, meal_text: &str) -> AppResult<MacroTotals> {
        let key = normalize_meal_text(meal_text);

        {
            let mut store = self.store.lock().await;
            if let Some(cached) = store.get(&key) {
                if cached.is_expired(self.ttl) {
                    store.pop(&key);
                } else {
                    debug!(meal = %key, "Meal estimate cache hit");
                    return Ok(cached.estimate);
                }
            }
        }

        // Lock is released during the external call; two concurrent misses
        // for the same text may both call through, which only costs an extra
        // request and never violates the cache contract.
        let estimate = self.inner.estimate(&key).await?;

        let mut store = self.store.lock().await;
        store.push(
            key.clone(),
            CachedEstimate {
                estimate,
                stored_at: Instant::now(),
            },
        );
        drop(store);

        debug!(meal = %key, "Meal estimate cached");
        Ok(estimate)
    }
}
