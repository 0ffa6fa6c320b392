use metadict::aggregation::{GroupingType, OrderType};
use metadict::config::PipelineConfig;
use metadict::engine::{DummyEngine, EngineCapabilities, EngineRegistry};
use metadict::language::{BilingualDictionary, Language};
use metadict::query::{QueryRequest, QueryService};
use metadict::storage::{InMemoryStorage, StorageService};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        // .with_max_level(tracing::Level::DEBUG)
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!(
            "Usage: {} --query <text> [--dict <de<>en,...>] [--lang <id>] [--mode linear|concurrent] \
             [--timeout-ms <ms>] [--deadline-ms <ms>] [--grouping none|entry_type|dictionary] \
             [--order relevance|passthrough]",
            args[0]
        );
        eprintln!("Example: {} --query haus --dict de<>en", args[0]);
        eprintln!("Example: {} --query haus --dict de-en,no<>de --lang de --grouping entry_type", args[0]);

        std::process::exit(1);
    }

    let mut query: Option<String> = None;
    let mut dictionaries: Vec<BilingualDictionary> = vec![];
    let mut languages: Vec<Language> = vec![];
    let mut config = PipelineConfig::default();
    let mut grouping = GroupingType::default();
    let mut ordering = OrderType::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1).map(String::as_str);
        match (args[i].as_str(), value) {
            ("--query", Some(value)) => {
                query = Some(value.to_string());
                i += 2;
            }
            ("--dict", Some(value)) => {
                dictionaries.extend(parse_dictionaries(value)?);
                i += 2;
            }
            ("--lang", Some(value)) => {
                languages.push(Language::by_id(value)?);
                i += 2;
            }
            ("--mode", Some(value)) => {
                config.execution_mode = value.parse()?;
                i += 2;
            }
            ("--timeout-ms", Some(value)) => {
                config.step_timeout_ms = Some(value.parse()?);
                i += 2;
            }
            ("--deadline-ms", Some(value)) => {
                config.request_deadline_ms = Some(value.parse()?);
                i += 2;
            }
            ("--grouping", Some(value)) => {
                grouping = parse_enum(value)?;
                i += 2;
            }
            ("--order", Some(value)) => {
                ordering = parse_enum(value)?;
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }
    config.validate()?;

    let Some(query) = query else {
        anyhow::bail!("--query is required");
    };

    // 1. Engines:
    let registry = EngineRegistry::new();
    let mut capabilities = EngineCapabilities::new();
    for dictionary in &dictionaries {
        capabilities = capabilities.with_dictionary(dictionary.clone());
    }
    for language in &languages {
        capabilities = capabilities.with_language(language.clone());
    }
    registry.register("dummy", Arc::new(DummyEngine::new()), capabilities)?;

    // 2. Storage and pipeline:
    let storage: Arc<dyn StorageService> = InMemoryStorage::new();
    let service = QueryService::new(registry, storage, &config);

    // 3. Request:
    let request = QueryRequest::builder(&query)
        .dictionaries(dictionaries)
        .grouping(grouping)
        .ordering(ordering);
    let request = languages
        .into_iter()
        .fold(request, |builder, language| builder.monolingual_language(language))
        .build()?;

    let response = service.execute_query(&request).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

/// Accepts a comma-separated list; each item keeps the direction written in it.
fn parse_dictionaries(value: &str) -> anyhow::Result<Vec<BilingualDictionary>> {
    let mut dictionaries = vec![];
    for item in value.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        dictionaries.push(BilingualDictionary::from_query_string(item)?);
    }
    Ok(dictionaries)
}

/// Parses a serde enum from its snake-case command-line spelling.
fn parse_enum<T: serde::de::DeserializeOwned>(value: &str) -> anyhow::Result<T> {
    Ok(serde_json::from_value(serde_json::Value::String(
        value.trim().to_uppercase(),
    ))?)
}
