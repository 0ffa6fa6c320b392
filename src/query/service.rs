//! Pipeline Entry Point
//!
//! `QueryService` owns everything a request needs (registry, execution strategy with its
//! step cache, mergers) and runs the phases in a fixed order:
//! plan → execute → collect → merge → group → order.
//!
//! ## Responsibilities
//! - **Validation**: a request that fails validation aborts before any engine is called.
//! - **Deadline**: the configured request deadline bounds the execution phase only; steps
//!   that miss it are reported as failed and the response is built from the rest.
//! - **Statistics**: every phase is timed into `QueryPerformanceStatistics`.

use super::collector::collect_results;
use super::planner::plan_query;
use super::request::QueryRequest;
use super::response::QueryResponse;
use super::statistics::QueryPerformanceStatistics;
use crate::aggregation::{
    DictionaryObjectMerger, EntryMerger, NormalizationService, SimilarElementsMerger,
    SourcedEntry, order_monolingual_entries,
};
use crate::config::{ExecutionMode, PipelineConfig};
use crate::engine::EngineRegistry;
use crate::entry::{BilingualEntry, MonolingualEntry};
use crate::error::QueryError;
use crate::executor::{
    CachedConcurrentExecutionStrategy, CachedLinearExecutionStrategy, QueryPlanExecutionStrategy,
    StepCache,
};
use crate::storage::StorageService;

use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

pub struct QueryService {
    registry: Arc<EngineRegistry>,
    strategy: Arc<dyn QueryPlanExecutionStrategy>,
    bilingual_merger: EntryMerger<SourcedEntry<BilingualEntry>>,
    monolingual_merger: EntryMerger<MonolingualEntry>,
    recommendation_merger: DictionaryObjectMerger,
    request_deadline: Option<Duration>,
}

impl QueryService {
    /// Builds a service whose execution strategy follows `config.execution_mode`, backed by a
    /// step cache on `storage`.
    pub fn new(
        registry: Arc<EngineRegistry>,
        storage: Arc<dyn StorageService>,
        config: &PipelineConfig,
    ) -> Arc<Self> {
        let cache = StepCache::from_config(storage, config);
        let strategy: Arc<dyn QueryPlanExecutionStrategy> = match config.execution_mode {
            ExecutionMode::Linear => Arc::new(CachedLinearExecutionStrategy::new(
                cache,
                config.step_timeout(),
            )),
            ExecutionMode::Concurrent => Arc::new(CachedConcurrentExecutionStrategy::new(
                cache,
                config.step_timeout(),
                config.max_concurrent_steps,
            )),
        };

        tracing::info!(
            "Query service ready: mode={:?}, step timeout={:?}, deadline={:?}",
            config.execution_mode,
            config.step_timeout(),
            config.request_deadline()
        );
        Self::with_strategy(registry, strategy, config.request_deadline())
    }

    /// Builds a service around an already constructed execution strategy.
    pub fn with_strategy(
        registry: Arc<EngineRegistry>,
        strategy: Arc<dyn QueryPlanExecutionStrategy>,
        request_deadline: Option<Duration>,
    ) -> Arc<Self> {
        let normalizer = Arc::new(NormalizationService::with_defaults());
        Arc::new(Self {
            registry,
            strategy,
            bilingual_merger: EntryMerger::new(normalizer.clone()),
            monolingual_merger: EntryMerger::new(normalizer),
            recommendation_merger: DictionaryObjectMerger,
            request_deadline,
        })
    }

    pub fn registry(&self) -> &Arc<EngineRegistry> {
        &self.registry
    }

    /// Runs the whole pipeline for `request`.
    ///
    /// Only validation failures and unresolvable engines are errors. Engine failures, timeouts
    /// and storage trouble shrink the response instead.
    pub async fn execute_query(&self, request: &QueryRequest) -> Result<QueryResponse, QueryError> {
        request.validate()?;

        let request_id = Uuid::new_v4();
        let started = Instant::now();
        let mut statistics = QueryPerformanceStatistics::default();
        tracing::info!(
            "Query {} started: '{}' ({} dictionaries, {} languages)",
            request_id,
            request.query_string(),
            request.bilingual_dictionaries().len(),
            request.monolingual_languages().len()
        );

        // 1. Plan:
        let phase = Instant::now();
        let plan = plan_query(request, &self.registry)?;
        statistics.planning = phase.elapsed();
        statistics.planned_steps = plan.len();

        // 2. Execute:
        let phase = Instant::now();
        let deadline = self.request_deadline.map(|budget| phase + budget);
        let step_results = self.strategy.execute_query_plan(&plan, deadline).await;
        statistics.query = phase.elapsed();
        statistics.failed_steps = step_results.iter().filter(|r| r.is_failed()).count();
        if statistics.failed_steps > 0 {
            tracing::warn!(
                "Query {}: {} of {} steps failed",
                request_id,
                statistics.failed_steps,
                statistics.planned_steps
            );
        }

        // 3. Collect:
        let phase = Instant::now();
        let collected = collect_results(&step_results);
        statistics.collection = phase.elapsed();
        tracing::trace!(
            "Query {}: collected {} bilingual and {} monolingual entries",
            request_id,
            collected.bilingual_entries.len(),
            collected.monolingual_entries.len()
        );

        // 4. Merge:
        let phase = Instant::now();
        let bilingual_entries = self.bilingual_merger.merge(collected.bilingual_entries);
        let monolingual_entries = self.monolingual_merger.merge(collected.monolingual_entries);
        let similar_recommendations = self
            .recommendation_merger
            .merge(collected.similar_recommendations);
        statistics.merging = phase.elapsed();

        // 5. Group:
        let phase = Instant::now();
        let groups = request.grouping().strategy().group_entries(bilingual_entries);
        statistics.grouping = phase.elapsed();

        // 6. Order:
        let phase = Instant::now();
        let grouped_bilingual_results = request
            .ordering()
            .strategy()
            .sort_groups(groups, request.query_string());
        let monolingual_entries =
            order_monolingual_entries(monolingual_entries, request.query_string());
        statistics.ordering = phase.elapsed();

        statistics.total = started.elapsed();
        tracing::info!("Query {} finished: {}", request_id, statistics);

        Ok(QueryResponse {
            request_id,
            query_string: request.query_string().to_string(),
            statistics,
            grouping_type: request.grouping(),
            grouped_bilingual_results,
            monolingual_entries,
            synonym_entries: collected.synonym_entries,
            external_contents: collected.external_contents,
            similar_recommendations,
        })
    }
}
