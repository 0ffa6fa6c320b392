//! Pipeline configuration.
//!
//! All fields have defaults, so an empty JSON object (or `PipelineConfig::default()`) yields
//! a working setup.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Storage namespace of the durable step cache.
pub const DEFAULT_CACHE_NAMESPACE: &str = "QueryCache";

/// Entries the in-process step cache holds before it is cleared.
pub const DEFAULT_LOCAL_CACHE_CAPACITY: usize = 8192;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Steps run one after another.
    #[default]
    Linear,
    /// Steps run in parallel, bounded by `max_concurrent_steps`.
    Concurrent,
}

impl std::str::FromStr for ExecutionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(ExecutionMode::Linear),
            "concurrent" => Ok(ExecutionMode::Concurrent),
            other => Err(anyhow::anyhow!("Unknown execution mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub execution_mode: ExecutionMode,
    /// Upper bound for a single engine call. `None` disables the per-step timeout.
    pub step_timeout_ms: Option<u64>,
    /// Upper bound for the execution phase of a whole request.
    pub request_deadline_ms: Option<u64>,
    pub max_concurrent_steps: usize,
    pub local_cache_capacity: usize,
    pub storage_namespace: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            execution_mode: ExecutionMode::Linear,
            step_timeout_ms: Some(10_000),
            request_deadline_ms: None,
            max_concurrent_steps: 8,
            local_cache_capacity: DEFAULT_LOCAL_CACHE_CAPACITY,
            storage_namespace: DEFAULT_CACHE_NAMESPACE.to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn step_timeout(&self) -> Option<Duration> {
        self.step_timeout_ms.map(Duration::from_millis)
    }

    pub fn request_deadline(&self) -> Option<Duration> {
        self.request_deadline_ms.map(Duration::from_millis)
    }

    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_concurrent_steps == 0 {
            anyhow::bail!("max_concurrent_steps must be at least 1");
        }
        if self.local_cache_capacity == 0 {
            anyhow::bail!("local_cache_capacity must be at least 1");
        }
        if self.storage_namespace.trim().is_empty() {
            anyhow::bail!("storage_namespace must not be blank");
        }
        Ok(())
    }
}
