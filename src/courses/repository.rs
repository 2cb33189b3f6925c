//! Persistence port for courses.
//!
//! # Responsibilities
//! - Define the operations the controller needs from storage
//! - Keep the controller independent of the backing store
//!
//! # Design Decisions
//! - Object safe (`async_trait`) so the store is injected as `Arc<dyn CourseRepository>`
//! - Absence is `Ok(None)` / `Ok(false)`; errors are reserved for storage faults
//! - `save` is an upsert keyed by id

use async_trait::async_trait;
use thiserror::Error;

use crate::courses::types::{Course, CourseId, CoursePayload};

/// Storage fault raised by a repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no course ids left to assign")]
    IdSpaceExhausted,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// All courses, ordered by id.
    async fn find_all(&self) -> RepositoryResult<Vec<Course>>;

    async fn find_by_id(&self, id: CourseId) -> RepositoryResult<Option<Course>>;

    /// Insert or replace a course, assigning an id when the payload has none.
    async fn save(&self, payload: CoursePayload) -> RepositoryResult<Course>;

    /// Returns `true` if a course was removed.
    async fn delete_by_id(&self, id: CourseId) -> RepositoryResult<bool>;
}
