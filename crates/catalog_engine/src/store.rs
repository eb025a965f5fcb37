use catalog_core::{Counts, Problem};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("problem already exists in database: {url}")]
    DuplicateUrl { url: String },
    #[error("problem identifier {0} is already taken")]
    DuplicateIdentifier(String),
    #[error("problem {0} not found")]
    NotFound(String),
    #[error("stored row for {identifier} is unreadable: {reason}")]
    CorruptRow { identifier: String, reason: String },
    #[error("database error: {0}")]
    Backend(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// Where catalog problems live.
///
/// `insert` must reject a problem whose `source_url` is already stored
/// before writing anything. `update_counts` only ever touches the like and
/// dislike counters.
#[async_trait::async_trait]
pub trait ProblemStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Problem>, StoreError>;

    async fn get(&self, identifier: &str) -> Result<Option<Problem>, StoreError>;

    async fn exists_by_url(&self, url: &str) -> Result<bool, StoreError>;

    /// Stores a new problem and returns its identifier.
    async fn insert(&self, problem: &Problem) -> Result<String, StoreError>;

    async fn update_counts(&self, identifier: &str, counts: Counts)
        -> Result<Problem, StoreError>;
}
