use super::cache::StepCache;
use crate::query::types::{QueryPlan, QueryStep, QueryStepResult};

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;

/// Error message of steps skipped because the request deadline had already passed.
pub const DEADLINE_EXCEEDED_MESSAGE: &str = "request deadline exceeded";

/// Runs every step of a plan and returns one result per step, in plan order.
///
/// Implementations never fail as a whole: engine errors, timeouts and a passed `deadline`
/// all become failed step results.
#[async_trait]
pub trait QueryPlanExecutionStrategy: Send + Sync {
    async fn execute_query_plan(
        &self,
        plan: &QueryPlan,
        deadline: Option<Instant>,
    ) -> Vec<QueryStepResult>;
}

/// Calls the engine for `step`, bypassing every cache.
///
/// # Arguments
/// * `timeout`: Bound on the engine call. `None` waits for the engine.
///
/// # Returns
/// A successful result, or a failed one carrying the engine error or the timeout.
pub async fn execute_step(step: &QueryStep, timeout: Option<Duration>) -> QueryStepResult {
    let started = Instant::now();
    let outcome = match timeout {
        Some(limit) => match tokio::time::timeout(limit, step.run()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(anyhow::anyhow!(
                "step timed out after {} ms",
                limit.as_millis()
            )),
        },
        None => step.run().await,
    };
    let elapsed = started.elapsed();

    match outcome {
        Ok(result) => {
            tracing::debug!("Step {} finished in {:?}", step, elapsed);
            QueryStepResult::success(step.clone(), result, elapsed)
        }
        Err(e) => {
            tracing::warn!("Step {} failed: {}", step, e);
            QueryStepResult::failure(step.clone(), &e.to_string(), elapsed)
        }
    }
}

/// Cache lookup, live call on a miss, then write-back of the outcome.
///
/// Each of the three stages gets its own `step_timeout`, clipped to whatever is left before
/// `deadline`. A slow durable tier therefore costs at most one timeout per stage and never
/// pushes the step past the deadline.
///
/// # Arguments
/// * `step_timeout`: Per-stage bound. `None` leaves only the deadline.
/// * `deadline`: End of the request's execution phase, if any.
pub async fn execute_cached_step(
    cache: &StepCache,
    step: &QueryStep,
    step_timeout: Option<Duration>,
    deadline: Option<Instant>,
) -> QueryStepResult {
    if let Some(hit) = cache
        .lookup(step, effective_timeout(step_timeout, deadline))
        .await
    {
        tracing::debug!("Using cached result for {}", step);
        return hit;
    }

    let result = execute_step(step, effective_timeout(step_timeout, deadline)).await;
    cache
        .store(&result, effective_timeout(step_timeout, deadline))
        .await;
    result
}

/// The tighter of the per-step timeout and the time left until the deadline.
pub(crate) fn effective_timeout(
    step_timeout: Option<Duration>,
    deadline: Option<Instant>,
) -> Option<Duration> {
    let remaining = deadline.map(|d| d.saturating_duration_since(Instant::now()));
    match (step_timeout, remaining) {
        (Some(step), Some(left)) => Some(step.min(left)),
        (step, left) => step.or(left),
    }
}

/// Whether `deadline` is set and already behind us.
pub(crate) fn deadline_passed(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|d| Instant::now() >= d)
}

/// Failed result for a step that never ran because the deadline had passed.
pub(crate) fn deadline_exceeded(step: &QueryStep) -> QueryStepResult {
    QueryStepResult::failure(step.clone(), DEADLINE_EXCEEDED_MESSAGE, Duration::ZERO)
}
