use super::cache::StepCache;
use super::strategy::{
    QueryPlanExecutionStrategy, deadline_exceeded, deadline_passed, execute_cached_step,
};
use crate::query::types::{QueryPlan, QueryStepResult};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;

/// Executes steps as parallel tokio tasks, at most `max_concurrent_steps` at a time.
///
/// The permit pool is shared by every plan this strategy runs, so the bound holds across
/// concurrent requests too. Results are reassembled into plan order.
pub struct CachedConcurrentExecutionStrategy {
    cache: Arc<StepCache>,
    step_timeout: Option<Duration>,
    permits: Arc<Semaphore>,
    max_concurrent_steps: usize,
}

impl CachedConcurrentExecutionStrategy {
    pub fn new(
        cache: Arc<StepCache>,
        step_timeout: Option<Duration>,
        max_concurrent_steps: usize,
    ) -> Self {
        let max_concurrent_steps = max_concurrent_steps.max(1);
        Self {
            cache,
            step_timeout,
            permits: Arc::new(Semaphore::new(max_concurrent_steps)),
            max_concurrent_steps,
        }
    }

    pub fn max_concurrent_steps(&self) -> usize {
        self.max_concurrent_steps
    }

    pub fn cache(&self) -> &Arc<StepCache> {
        &self.cache
    }
}

#[async_trait]
impl QueryPlanExecutionStrategy for CachedConcurrentExecutionStrategy {
    async fn execute_query_plan(
        &self,
        plan: &QueryPlan,
        deadline: Option<Instant>,
    ) -> Vec<QueryStepResult> {
        let mut tasks = JoinSet::new();

        for (index, step) in plan.steps().iter().enumerate() {
            let cache = self.cache.clone();
            let permits = self.permits.clone();
            let step = step.clone();
            let step_timeout = self.step_timeout;

            tasks.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return (
                        index,
                        QueryStepResult::failure(step, "execution pool closed", Duration::ZERO),
                    );
                };
                if deadline_passed(deadline) {
                    return (index, deadline_exceeded(&step));
                }
                (index, execute_cached_step(&cache, &step, step_timeout, deadline).await)
            });
        }

        let mut slots: Vec<Option<QueryStepResult>> = vec![None; plan.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => tracing::error!("Step task aborted: {}", e),
            }
        }

        plan.steps()
            .iter()
            .zip(slots)
            .map(|(step, slot)| {
                slot.unwrap_or_else(|| {
                    QueryStepResult::failure(step.clone(), "step task aborted", Duration::ZERO)
                })
            })
            .collect()
    }
}
