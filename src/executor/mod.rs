//! Query Plan Execution
//!
//! Turns a `QueryPlan` into one `QueryStepResult` per step, shielding the rest of the pipeline
//! from engine failures and avoiding repeated engine calls through a two-tier cache.
//!
//! ## Architecture Overview
//! For every step:
//! 1. **Local lookup**: the in-process cache, keyed by step identity.
//! 2. **Durable lookup**: the `StorageService` namespace, keyed by the step's display form.
//!    Backend errors count as a miss; undecodable entries are deleted and count as a miss.
//! 3. **Live call**: the engine is invoked, bounded by the step timeout and request deadline.
//! 4. **Write-back**: successful results go to both tiers, failures evict the local entry.
//!
//! ## Submodules
//! - **`cache`**: The two-tier `StepCache`.
//! - **`strategy`**: The `QueryPlanExecutionStrategy` trait and the shared per-step routine.
//! - **`linear`**: Sequential execution.
//! - **`concurrent`**: Semaphore-bounded parallel execution on the tokio runtime.

pub mod cache;
pub mod concurrent;
pub mod linear;
pub mod strategy;

pub use cache::{CachedStepResult, StepCache};
pub use concurrent::CachedConcurrentExecutionStrategy;
pub use linear::CachedLinearExecutionStrategy;
pub use strategy::{QueryPlanExecutionStrategy, execute_cached_step, execute_step};
