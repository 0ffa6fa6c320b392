use super::request::QueryRequest;
use super::types::{QueryPlan, QueryStep};
use crate::engine::{EngineRegistry, SearchEngine};
use crate::error::QueryError;

use std::sync::Arc;

/// Expands a request into one step per (target, capable engine) pair.
///
/// Bilingual steps come first, in dictionary order, then monolingual steps in language order.
/// Within a target, engines appear in registration order. A target no engine serves
/// contributes no step.
pub fn plan_query(request: &QueryRequest, registry: &EngineRegistry) -> Result<QueryPlan, QueryError> {
    let mut plan = QueryPlan::new();

    for dictionary in request.bilingual_dictionaries() {
        let engine_ids = registry.engine_names_for_dictionary(dictionary);
        if engine_ids.is_empty() {
            tracing::debug!("No search engine serves dictionary {}", dictionary);
        }
        for engine_id in engine_ids {
            let engine = resolve(registry, &engine_id)?;
            plan.add_step(QueryStep::bilingual(
                &engine_id,
                engine,
                request.query_string(),
                dictionary.source().clone(),
                dictionary.target().clone(),
                dictionary.is_bidirectional(),
            ));
        }
    }

    for language in request.monolingual_languages() {
        let engine_ids = registry.engine_names_for_language(language);
        if engine_ids.is_empty() {
            tracing::debug!("No search engine serves monolingual lookups in {}", language);
        }
        for engine_id in engine_ids {
            let engine = resolve(registry, &engine_id)?;
            plan.add_step(QueryStep::monolingual(
                &engine_id,
                engine,
                request.query_string(),
                language.clone(),
            ));
        }
    }

    tracing::trace!("Planned {} steps for '{}'", plan.len(), request.query_string());
    Ok(plan)
}

fn resolve(registry: &EngineRegistry, engine_id: &str) -> Result<Arc<dyn SearchEngine>, QueryError> {
    registry.resolve_engine(engine_id).ok_or_else(|| {
        tracing::error!("Registry lists engine '{}' but cannot resolve it", engine_id);
        QueryError::UnknownEngine(engine_id.to_string())
    })
}
