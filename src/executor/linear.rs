use super::cache::StepCache;
use super::strategy::{
    QueryPlanExecutionStrategy, deadline_exceeded, deadline_passed, execute_cached_step,
};
use crate::query::types::{QueryPlan, QueryStepResult};

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Executes steps one after another, consulting the step cache for each.
pub struct CachedLinearExecutionStrategy {
    cache: Arc<StepCache>,
    step_timeout: Option<Duration>,
}

impl CachedLinearExecutionStrategy {
    pub fn new(cache: Arc<StepCache>, step_timeout: Option<Duration>) -> Self {
        Self {
            cache,
            step_timeout,
        }
    }

    pub fn cache(&self) -> &Arc<StepCache> {
        &self.cache
    }
}

#[async_trait]
impl QueryPlanExecutionStrategy for CachedLinearExecutionStrategy {
    async fn execute_query_plan(
        &self,
        plan: &QueryPlan,
        deadline: Option<Instant>,
    ) -> Vec<QueryStepResult> {
        let mut results = Vec::with_capacity(plan.len());

        for step in plan.steps() {
            if deadline_passed(deadline) {
                results.push(deadline_exceeded(step));
                continue;
            }
            results.push(execute_cached_step(&self.cache, step, self.step_timeout, deadline).await);
        }

        results
    }
}
