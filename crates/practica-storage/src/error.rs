use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no object at {key}")]
    NotFound { key: String },

    #[error("record at {key} is not valid JSON: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("record for {key} could not be encoded: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Any failure reported by the backing store.
    #[error("{operation} {key}: {message}")]
    Backend {
        operation: &'static str,
        key: String,
        message: String,
    },
}

impl StorageError {
    pub fn backend(operation: &'static str, key: &str, message: impl ToString) -> Self {
        StorageError::Backend {
            operation,
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}
