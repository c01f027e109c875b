//! JSON records on top of an [`ObjectStore`].

use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::store::ObjectStore;

const JSON: &str = "application/json";

/// Load and deserialize a JSON record.
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn ObjectStore,
    key: &str,
) -> Result<T, StorageError> {
    let object = store.get(key).await?;
    serde_json::from_slice(&object.body).map_err(|source| StorageError::Malformed {
        key: key.to_string(),
        source,
    })
}

/// Like [`load_json`], but a missing record is `Ok(None)`.
pub async fn load_json_opt<T: DeserializeOwned>(
    store: &dyn ObjectStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match load_json(store, key).await {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Serialize and store a JSON record, replacing any previous version.
pub async fn save_json<T: Serialize>(
    store: &dyn ObjectStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.put(key, body, Some(JSON)).await
}

/// Load every `.json` record under `prefix`, in key order.
///
/// A record removed between listing and loading is skipped.
pub async fn list_json<T: DeserializeOwned>(
    store: &dyn ObjectStore,
    prefix: &str,
) -> Result<Vec<T>, StorageError> {
    let keys = store.list(prefix).await?;
    let mut records = Vec::with_capacity(keys.len());
    for key in keys.iter().filter(|k| k.ends_with(".json")) {
        if let Some(record) = load_json_opt(store, key).await? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Delete every object under `prefix`. Returns how many were removed.
pub async fn delete_prefix(store: &dyn ObjectStore, prefix: &str) -> Result<usize, StorageError> {
    let keys = store.list(prefix).await?;
    for key in &keys {
        store.delete(key).await?;
    }
    tracing::debug!(prefix, count = keys.len(), "deleted objects by prefix");
    Ok(keys.len())
}
