use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to serialize cache key arguments: {0}")]
    KeySerialization(#[from] serde_json::Error),

    #[error("Cached value for operation '{0}' has a different type than requested")]
    TypeMismatch(&'static str),
}
