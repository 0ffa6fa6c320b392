//! Two-tier step cache.
//!
//! The in-process tier is a `DashMap` keyed by step identity. The durable tier is a
//! `StorageService` namespace keyed by the step's display form, holding JSON payloads.
//! Failed results are never written to either tier.
//!
//! Every durable operation runs under the time budget the caller passes in. A read that
//! runs out of time counts as a miss and a write that runs out of time is dropped, so a slow
//! store can never hold a step past its timeout or the request deadline.

use crate::config::PipelineConfig;
use crate::entry::EngineQueryResult;
use crate::query::types::{QueryStep, QueryStepResult};
use crate::storage::{StorageError, StorageJsonExt, StorageService};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// What the durable tier stores for a successful step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedStepResult {
    pub result: EngineQueryResult,
    pub execution_time_ms: u64,
}

pub struct StepCache {
    /// Step identity -> last successful result.
    local: DashMap<QueryStep, QueryStepResult>,
    /// Durable tier, shared with other caches and processes.
    storage: Arc<dyn StorageService>,
    namespace: String,
    /// Local entries held before the local tier is cleared.
    capacity: usize,
}

impl StepCache {
    /// Creates a cache over `storage`.
    ///
    /// # Arguments
    /// * `namespace`: Storage namespace of the durable tier.
    /// * `capacity`: Local entries held before the local tier is cleared; at least 1.
    pub fn new(storage: Arc<dyn StorageService>, namespace: &str, capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            local: DashMap::new(),
            storage,
            namespace: namespace.to_string(),
            capacity: capacity.max(1),
        })
    }

    /// Creates a cache using the namespace and capacity from `config`.
    pub fn from_config(storage: Arc<dyn StorageService>, config: &PipelineConfig) -> Arc<Self> {
        Self::new(storage, &config.storage_namespace, config.local_cache_capacity)
    }

    /// Looks the step up in the local tier, then in the durable tier. A durable hit is
    /// promoted into the local tier.
    ///
    /// # Arguments
    /// * `budget`: Upper bound for the durable lookup. `None` waits as long as the store does.
    ///
    /// # Returns
    /// `None` on a miss, a storage error, a corrupted entry or an expired budget.
    pub async fn lookup(&self, step: &QueryStep, budget: Option<Duration>) -> Option<QueryStepResult> {
        if let Some(hit) = self.local.get(step) {
            tracing::trace!("Local cache hit for {}", step);
            return Some(hit.value().clone());
        }

        let key = step.to_string();
        let Some(cached) = within(budget, self.read_durable(&key)).await else {
            tracing::warn!("Reading cache entry {} timed out, treating it as a miss", key);
            return None;
        };
        let cached = cached?;
        tracing::trace!("Durable cache hit for {}", step);
        let result = QueryStepResult::success(
            step.clone(),
            cached.result,
            Duration::from_millis(cached.execution_time_ms),
        );
        self.insert_local(result.clone());
        Some(result)
    }

    /// Writes a successful result to both tiers. A failed result only evicts the local entry.
    ///
    /// The durable write is skipped when it does not finish within `budget`. An entry
    /// another writer created first is overwritten.
    ///
    /// # Arguments
    /// * `result`: Outcome of a live call; its step is the cache key.
    /// * `budget`: Upper bound for the durable write. `None` waits as long as the store does.
    pub async fn store(&self, result: &QueryStepResult, budget: Option<Duration>) {
        if result.is_failed() {
            self.invalidate(&result.step);
            return;
        }

        self.insert_local(result.clone());

        let key = result.step.to_string();
        let payload = CachedStepResult {
            result: result.result.as_ref().clone(),
            execution_time_ms: result.execution_time.as_millis() as u64,
        };
        if within(budget, self.write_durable(&key, &payload)).await.is_none() {
            tracing::warn!("Writing cache entry {} timed out, skipping it", key);
        }
    }

    /// Drops the local entry for `step`. The durable tier is left alone.
    pub fn invalidate(&self, step: &QueryStep) {
        self.local.remove(step);
    }

    /// Number of entries in the local tier.
    pub fn local_len(&self) -> usize {
        self.local.len()
    }

    /// Storage namespace of the durable tier.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn read_durable(&self, key: &str) -> Option<CachedStepResult> {
        match self
            .storage
            .read_json::<CachedStepResult>(&self.namespace, key)
            .await
        {
            Ok(hit) => hit,
            Err(StorageError::Corrupted { reason, .. }) => {
                tracing::warn!("Discarding corrupted cache entry {}: {}", key, reason);
                if let Err(e) = self.storage.delete(&self.namespace, key).await {
                    tracing::warn!("Deleting corrupted cache entry {} failed: {}", key, e);
                }
                None
            }
            Err(e) => {
                tracing::warn!("Reading cache entry {} failed: {}", key, e);
                None
            }
        }
    }

    async fn write_durable(&self, key: &str, payload: &CachedStepResult) {
        let error = match self.storage.create_json(&self.namespace, key, payload).await {
            Ok(()) => {
                tracing::trace!("Cached result for {}", key);
                return;
            }
            Err(e) => e,
        };

        if !error.is_recoverable() {
            tracing::warn!("Writing cache entry {} failed: {}", key, error);
            return;
        }

        // Written concurrently by another step; last writer wins
        tracing::debug!("Cache entry {} already exists, updating it", key);
        if let Err(e) = self.storage.update_json(&self.namespace, key, payload).await {
            tracing::warn!("Updating cache entry {} failed: {}", key, e);
        }
    }

    fn insert_local(&self, result: QueryStepResult) {
        if self.local.len() >= self.capacity && !self.local.contains_key(&result.step) {
            tracing::debug!("Local step cache reached {} entries, clearing", self.capacity);
            self.local.clear();
        }
        self.local.insert(result.step.clone(), result);
    }
}

/// Runs `operation` under `budget`; `None` when the budget ran out first.
async fn within<F: Future>(budget: Option<Duration>, operation: F) -> Option<F::Output> {
    match budget {
        Some(limit) => tokio::time::timeout(limit, operation).await.ok(),
        None => Some(operation.await),
    }
}
