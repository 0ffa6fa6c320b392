use crate::engine::SearchEngine;
use crate::entry::EngineQueryResult;
use crate::language::Language;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

/// Language parameters of a step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryStepKind {
    Bilingual {
        input_language: Language,
        output_language: Language,
        allow_both_way: bool,
    },
    Monolingual {
        language: Language,
    },
}

/// One call to one engine.
///
/// Two steps are equal when they target the same engine handle under the same id with the
/// same query and languages. The `Display` form leaves the handle out and is used as the
/// durable cache key.
#[derive(Clone)]
pub struct QueryStep {
    engine_id: String,
    engine: Arc<dyn SearchEngine>,
    query_string: String,
    kind: QueryStepKind,
}

impl QueryStep {
    pub fn bilingual(
        engine_id: &str,
        engine: Arc<dyn SearchEngine>,
        query_string: &str,
        input_language: Language,
        output_language: Language,
        allow_both_way: bool,
    ) -> Self {
        Self {
            engine_id: engine_id.to_string(),
            engine,
            query_string: query_string.to_string(),
            kind: QueryStepKind::Bilingual {
                input_language,
                output_language,
                allow_both_way,
            },
        }
    }

    pub fn monolingual(
        engine_id: &str,
        engine: Arc<dyn SearchEngine>,
        query_string: &str,
        language: Language,
    ) -> Self {
        Self {
            engine_id: engine_id.to_string(),
            engine,
            query_string: query_string.to_string(),
            kind: QueryStepKind::Monolingual { language },
        }
    }

    pub fn engine_id(&self) -> &str {
        &self.engine_id
    }

    pub fn engine(&self) -> &Arc<dyn SearchEngine> {
        &self.engine
    }

    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    pub fn kind(&self) -> &QueryStepKind {
        &self.kind
    }

    pub fn is_bilingual(&self) -> bool {
        matches!(self.kind, QueryStepKind::Bilingual { .. })
    }

    /// Calls the engine this step targets.
    pub async fn run(&self) -> anyhow::Result<EngineQueryResult> {
        match &self.kind {
            QueryStepKind::Bilingual {
                input_language,
                output_language,
                allow_both_way,
            } => {
                self.engine
                    .execute_bilingual_query(
                        &self.query_string,
                        input_language,
                        output_language,
                        *allow_both_way,
                    )
                    .await
            }
            QueryStepKind::Monolingual { language } => {
                self.engine
                    .execute_monolingual_query(&self.query_string, language)
                    .await
            }
        }
    }

    fn engine_addr(&self) -> *const () {
        Arc::as_ptr(&self.engine) as *const ()
    }
}

impl PartialEq for QueryStep {
    fn eq(&self, other: &Self) -> bool {
        self.engine_id == other.engine_id
            && std::ptr::eq(self.engine_addr(), other.engine_addr())
            && self.query_string == other.query_string
            && self.kind == other.kind
    }
}

impl Eq for QueryStep {}

impl Hash for QueryStep {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.engine_id.hash(state);
        self.engine_addr().hash(state);
        self.query_string.hash(state);
        self.kind.hash(state);
    }
}

impl fmt::Display for QueryStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            QueryStepKind::Bilingual {
                input_language,
                output_language,
                allow_both_way,
            } => write!(
                f,
                "bilingual[engine={}, query={}, input={}, output={}, both_ways={}]",
                self.engine_id, self.query_string, input_language, output_language, allow_both_way
            ),
            QueryStepKind::Monolingual { language } => write!(
                f,
                "monolingual[engine={}, query={}, language={}]",
                self.engine_id, self.query_string, language
            ),
        }
    }
}

impl fmt::Debug for QueryStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueryStep({})", self)
    }
}

/// Ordered list of steps for one request.
#[derive(Debug, Clone, Default)]
pub struct QueryPlan {
    steps: Vec<QueryStep>,
}

impl QueryPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, step: QueryStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[QueryStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Outcome of one step. A failed step carries the empty sentinel result and an error message.
#[derive(Debug, Clone)]
pub struct QueryStepResult {
    pub step: QueryStep,
    pub result: Arc<EngineQueryResult>,
    pub execution_time: Duration,
    pub failed: bool,
    pub error_message: Option<String>,
}

impl QueryStepResult {
    pub fn success(step: QueryStep, result: EngineQueryResult, execution_time: Duration) -> Self {
        Self {
            step,
            result: Arc::new(result),
            execution_time,
            failed: false,
            error_message: None,
        }
    }

    pub fn failure(step: QueryStep, error_message: &str, execution_time: Duration) -> Self {
        Self {
            step,
            result: Arc::new(EngineQueryResult::empty()),
            execution_time,
            failed: true,
            error_message: Some(error_message.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }
}
