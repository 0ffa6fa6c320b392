//! Storage Service Contract
//!
//! A namespaced key/value store holding JSON encoded values. The execution layer uses it as the
//! durable tier of the step cache; any backend (in-memory, disk, a remote store) can sit
//! behind this trait.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Key '{key}' already exists in namespace '{namespace}'")]
    AlreadyExists { namespace: String, key: String },

    #[error("Key '{key}' not found in namespace '{namespace}'")]
    NotFound { namespace: String, key: String },

    /// The stored bytes could not be decoded into the requested type.
    #[error("Corrupted value for key '{key}' in namespace '{namespace}': {reason}")]
    Corrupted {
        namespace: String,
        key: String,
        reason: String,
    },

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl StorageError {
    /// Whether the write can still go through as an `update`. Only `AlreadyExists` is
    /// recoverable; a backend outage is not, and the caller should abandon the write.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StorageError::AlreadyExists { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, StorageError::AlreadyExists { .. })
    }
}

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Stores a new value; fails with `AlreadyExists` if the key is taken.
    async fn create(&self, namespace: &str, key: &str, value: String) -> Result<(), StorageError>;

    /// Stores a value, overwriting whatever was there.
    async fn put(&self, namespace: &str, key: &str, value: String) -> Result<(), StorageError>;

    async fn read(&self, namespace: &str, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces an existing value; fails with `NotFound` if the key is absent.
    async fn update(&self, namespace: &str, key: &str, value: String) -> Result<(), StorageError>;

    /// Returns whether something was deleted.
    async fn delete(&self, namespace: &str, key: &str) -> Result<bool, StorageError>;

    async fn contains_key(&self, namespace: &str, key: &str) -> Result<bool, StorageError>;

    async fn count_keys(&self, namespace: &str) -> Result<usize, StorageError>;

    async fn list_namespaces(&self) -> Result<Vec<String>, StorageError>;
}

/// Typed access on top of the string-valued store.
#[async_trait]
pub trait StorageJsonExt: StorageService {
    async fn read_json<T>(&self, namespace: &str, key: &str) -> Result<Option<T>, StorageError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let Some(raw) = self.read(namespace, key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Corrupted {
                namespace: namespace.to_string(),
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    async fn create_json<T>(&self, namespace: &str, key: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + Sync,
    {
        let raw = encode(value)?;
        self.create(namespace, key, raw).await
    }

    async fn update_json<T>(&self, namespace: &str, key: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + Sync,
    {
        let raw = encode(value)?;
        self.update(namespace, key, raw).await
    }

    async fn put_json<T>(&self, namespace: &str, key: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + Sync,
    {
        let raw = encode(value)?;
        self.put(namespace, key, raw).await
    }
}

impl<S: StorageService + ?Sized> StorageJsonExt for S {}

fn encode<T: Serialize>(value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value)
        .map_err(|e| StorageError::InvalidArgument(format!("value is not serializable: {}", e)))
}

/// Rejects blank namespaces and keys.
pub(crate) fn check_coordinates(namespace: &str, key: Option<&str>) -> Result<(), StorageError> {
    if namespace.trim().is_empty() {
        return Err(StorageError::InvalidArgument(
            "namespace must not be blank".to_string(),
        ));
    }
    if let Some(key) = key
        && key.trim().is_empty()
    {
        return Err(StorageError::InvalidArgument("key must not be blank".to_string()));
    }
    Ok(())
}
