//! Query Pipeline
//!
//! From a `QueryRequest` to a `QueryResponse`.
//!
//! ## Architecture Overview
//! 1. **Plan**: the request's dictionaries and languages are expanded against the
//!    `EngineRegistry` into a `QueryPlan` of independent `QueryStep`s.
//! 2. **Execute**: a `QueryPlanExecutionStrategy` (see `executor`) turns the plan into one
//!    `QueryStepResult` per step.
//! 3. **Collect**: step results are flattened into typed buckets.
//! 4. **Aggregate**: buckets are merged, grouped and ordered (see `aggregation`).
//!
//! ## Submodules
//! - **`types`**: `QueryStep`, `QueryPlan`, `QueryStepResult`.
//! - **`request`**: `QueryRequest` and its builder.
//! - **`planner`**: Plan construction.
//! - **`collector`**: Result flattening.
//! - **`statistics`**: Per-phase timings.
//! - **`response`**: `QueryResponse`.
//! - **`service`**: `QueryService`, the pipeline entry point.

pub mod collector;
pub mod planner;
pub mod request;
pub mod response;
pub mod service;
pub mod statistics;
pub mod types;

pub use collector::{CollectedResults, collect_results};
pub use planner::plan_query;
pub use request::{QueryRequest, QueryRequestBuilder};
pub use response::QueryResponse;
pub use service::QueryService;
pub use statistics::QueryPerformanceStatistics;
pub use types::{QueryPlan, QueryStep, QueryStepKind, QueryStepResult};
