use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::error::StorageError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Body and metadata of a fetched object.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

/// Flat key/value object storage.
///
/// Keys are `/`-separated paths; listing is by prefix. Deleting a key that
/// does not exist is not an error.
pub trait ObjectStore: Send + Sync {
    fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<StoredObject, StorageError>>;

    fn put<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        content_type: Option<&'a str>,
    ) -> BoxFuture<'a, Result<(), StorageError>>;

    fn delete<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<(), StorageError>>;

    /// All keys under `prefix`, in lexicographic order.
    fn list<'a>(&'a self, prefix: &'a str) -> BoxFuture<'a, Result<Vec<String>, StorageError>>;

    /// Time-limited URL a client can download the object from directly.
    fn presign_get<'a>(
        &'a self,
        key: &'a str,
        expires_in: Duration,
    ) -> BoxFuture<'a, Result<String, StorageError>>;

    /// Time-limited URL a client can upload the object to directly.
    fn presign_put<'a>(
        &'a self,
        key: &'a str,
        content_type: Option<&'a str>,
        expires_in: Duration,
    ) -> BoxFuture<'a, Result<String, StorageError>>;
}
