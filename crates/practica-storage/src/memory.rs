use std::collections::BTreeMap;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::store::{BoxFuture, ObjectStore, StoredObject};

/// In-process [`ObjectStore`]. Contents are lost when the process exits.
///
/// Presigned URLs use a `memory://` scheme; nothing serves them.
#[derive(Default)]
pub struct MemoryStore {
    objects: RwLock<BTreeMap<String, StoredObject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored key, sorted.
    pub async fn keys(&self) -> Vec<String> {
        self.objects.read().await.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

fn memory_url(key: &str, expires_in: Duration) -> String {
    format!("memory://{key}?expires_in={}", expires_in.as_secs())
}

impl ObjectStore for MemoryStore {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<StoredObject, StorageError>> {
        Box::pin(async move {
            self.objects
                .read()
                .await
                .get(key)
                .cloned()
                .ok_or_else(|| StorageError::NotFound {
                    key: key.to_string(),
                })
        })
    }

    fn put<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        content_type: Option<&'a str>,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let object = StoredObject {
                body,
                content_type: content_type.map(str::to_string),
            };
            self.objects.write().await.insert(key.to_string(), object);
            Ok(())
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.objects.write().await.remove(key);
            Ok(())
        })
    }

    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>> {
        Box::pin(async move {
            let objects = self.objects.read().await;
            Ok(objects
                .range(prefix.to_string()..)
                .map(|(k, _)| k)
                .take_while(|k| k.starts_with(prefix))
                .cloned()
                .collect())
        })
    }

    fn presign_get<'a>(
        &'a self,
        key: &'a str,
        expires_in: Duration,
    ) -> BoxFuture<'a, Result<String, StorageError>> {
        Box::pin(async move { Ok(memory_url(key, expires_in)) })
    }

    fn presign_put<'a>(
        &'a self,
        key: &'a str,
        _content_type: Option<&'a str>,
        expires_in: Duration,
    ) -> BoxFuture<'a, Result<String, StorageError>> {
        Box::pin(async move { Ok(memory_url(key, expires_in)) })
    }
}
