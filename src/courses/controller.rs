//! Course request handling.
//!
//! Every operation writes one log line, runs inside a span named after the
//! operation, and updates its metrics. Timers record on success and failure;
//! counters only move once the repository call has succeeded.

use std::sync::Arc;
use thiserror::Error;
use tracing::field;

use crate::courses::repository::{CourseRepository, RepositoryError};
use crate::courses::types::{Course, CourseId, CoursePayload};
use crate::observability::metrics::{
    Metrics, COURSES_ACCESSED, COURSES_ACCESSED_SPECIFIC, COURSES_DELETED, COURSES_SAVED,
    FETCH_ALL_TIMER, FETCH_SINGLE_TIMER,
};
use crate::observability::tracing::{in_span, OUTCOME_OK};

pub const HOME_TEXT: &str = "Course App Home";

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("course {0} not found")]
    NotFound(CourseId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type CourseResult<T> = Result<T, CourseError>;

/// Stateless handler for course operations.
#[derive(Clone)]
pub struct CourseController {
    repository: Arc<dyn CourseRepository>,
    metrics: Metrics,
}

impl CourseController {
    pub fn new(repository: Arc<dyn CourseRepository>, metrics: Metrics) -> Self {
        Self {
            repository,
            metrics,
        }
    }

    pub fn home(&self) -> &'static str {
        tracing::info!("Received request for course app home");
        let _span = tracing::info_span!("getCourseAppHome", outcome = OUTCOME_OK).entered();
        HOME_TEXT
    }

    /// All courses, ordered by id.
    pub async fn list_courses(&self) -> CourseResult<Vec<Course>> {
        tracing::info!("Fetching all courses");
        let span = tracing::info_span!("getCourses", outcome = field::Empty);
        in_span(span, async {
            let _timer = self.metrics.start_timer(FETCH_ALL_TIMER);
            let courses = self.repository.find_all().await?;
            self.metrics.increment(COURSES_ACCESSED);
            tracing::info!(count = courses.len(), "Fetched courses");
            Ok::<_, CourseError>(courses)
        })
        .await
    }

    pub async fn get_course(&self, id: CourseId) -> CourseResult<Course> {
        tracing::info!(%id, "Fetching course");
        let span = tracing::info_span!("getSpecificCourse", course_id = %id, outcome = field::Empty);
        in_span(span, async {
            let _timer = self.metrics.start_timer(FETCH_SINGLE_TIMER);
            let course = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or(CourseError::NotFound(id))?;
            self.metrics.increment(COURSES_ACCESSED_SPECIFIC);
            Ok::<_, CourseError>(course)
        })
        .await
    }

    /// Insert or replace a course. Returns the stored record.
    pub async fn save_course(&self, payload: CoursePayload) -> CourseResult<Course> {
        tracing::info!(coursename = %payload.coursename, "Saving course");
        let span = tracing::info_span!("saveCourse", outcome = field::Empty);
        in_span(span, async {
            let course = self.repository.save(payload).await?;
            self.metrics.increment(COURSES_SAVED);
            tracing::debug!(id = %course.id, "Course saved");
            Ok::<_, CourseError>(course)
        })
        .await
    }

    pub async fn delete_course(&self, id: CourseId) -> CourseResult<()> {
        tracing::info!(%id, "Deleting course");
        let span = tracing::info_span!("deleteCourse", course_id = %id, outcome = field::Empty);
        in_span(span, async {
            if !self.repository.delete_by_id(id).await? {
                return Err(CourseError::NotFound(id));
            }
            self.metrics.increment(COURSES_DELETED);
            Ok::<_, CourseError>(())
        })
        .await
    }
}
