use super::service::{StorageError, StorageService, check_coordinates};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// Process-local `StorageService`: one `DashMap` per namespace, values kept as JSON strings.
///
/// Every read hands out a fresh copy of the stored string, so callers never observe later
/// mutations of what they wrote.
pub struct InMemoryStorage {
    namespaces: Arc<DashMap<String, DashMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Total number of keys across all namespaces.
    pub fn entry_count(&self) -> usize {
        self.namespaces.iter().map(|ns| ns.value().len()).sum()
    }

    /// Drops every namespace.
    pub fn reset(&self) {
        self.namespaces.clear();
        tracing::debug!("In-memory storage reset");
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self {
            namespaces: Arc::new(DashMap::new()),
        }
    }
}

#[async_trait]
impl StorageService for InMemoryStorage {
    async fn create(&self, namespace: &str, key: &str, value: String) -> Result<(), StorageError> {
        check_coordinates(namespace, Some(key))?;
        let ns = self.namespaces.entry(namespace.to_string()).or_default();

        match ns.entry(key.to_string()) {
            Entry::Occupied(_) => Err(StorageError::AlreadyExists {
                namespace: namespace.to_string(),
                key: key.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(value);
                tracing::trace!("CREATE {}/{}", namespace, key);
                Ok(())
            }
        }
    }

    async fn put(&self, namespace: &str, key: &str, value: String) -> Result<(), StorageError> {
        check_coordinates(namespace, Some(key))?;
        self.namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
        tracing::trace!("PUT {}/{}", namespace, key);
        Ok(())
    }

    async fn read(&self, namespace: &str, key: &str) -> Result<Option<String>, StorageError> {
        check_coordinates(namespace, Some(key))?;
        Ok(self
            .namespaces
            .get(namespace)
            .and_then(|ns| ns.get(key).map(|value| value.value().clone())))
    }

    async fn update(&self, namespace: &str, key: &str, value: String) -> Result<(), StorageError> {
        check_coordinates(namespace, Some(key))?;
        let not_found = || StorageError::NotFound {
            namespace: namespace.to_string(),
            key: key.to_string(),
        };

        let ns = self.namespaces.get(namespace).ok_or_else(not_found)?;
        let mut slot = ns.get_mut(key).ok_or_else(not_found)?;
        *slot = value;
        Ok(())
    }

    async fn delete(&self, namespace: &str, key: &str) -> Result<bool, StorageError> {
        check_coordinates(namespace, Some(key))?;
        let removed = self
            .namespaces
            .get(namespace)
            .map(|ns| ns.remove(key).is_some())
            .unwrap_or(false);
        if removed {
            tracing::trace!("DELETE {}/{}", namespace, key);
        }
        Ok(removed)
    }

    async fn contains_key(&self, namespace: &str, key: &str) -> Result<bool, StorageError> {
        check_coordinates(namespace, Some(key))?;
        Ok(self
            .namespaces
            .get(namespace)
            .map(|ns| ns.contains_key(key))
            .unwrap_or(false))
    }

    async fn count_keys(&self, namespace: &str) -> Result<usize, StorageError> {
        check_coordinates(namespace, None)?;
        Ok(self.namespaces.get(namespace).map(|ns| ns.len()).unwrap_or(0))
    }

    async fn list_namespaces(&self) -> Result<Vec<String>, StorageError> {
        let mut names: Vec<String> = self
            .namespaces
            .iter()
            .filter(|ns| !ns.value().is_empty())
            .map(|ns| ns.key().clone())
            .collect();
        names.sort();
        Ok(names)
    }
}
