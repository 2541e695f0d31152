use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Analytics calculation error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("Query cache error: {0}")]
    Cache(#[from] query_cache::CacheError),
}
