//! In-memory course store with an optional JSON snapshot file.

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::courses::repository::{CourseRepository, RepositoryError, RepositoryResult};
use crate::courses::types::{Course, CourseId, CoursePayload};

/// A thread-safe course store.
///
/// Cloning shares the underlying map. Generated ids come from a sequence that
/// never wraps: `u64::MAX` is never handed out, and once the sequence reaches
/// it every save without an id fails with `IdSpaceExhausted`.
#[derive(Clone)]
pub struct InMemoryCourseRepository {
    inner: Arc<DashMap<CourseId, Course>>,
    /// Next id handed out to payloads without one. Always greater than every
    /// stored id, or `u64::MAX` once exhausted.
    next_id: Arc<AtomicU64>,
    persistence_path: Option<PathBuf>,
}

impl Default for InMemoryCourseRepository {
    fn default() -> Self {
        Self::new(None)
    }
}

impl InMemoryCourseRepository {
    /// Create an empty store, optionally bound to a snapshot file.
    pub fn new(persistence_path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
            persistence_path,
        }
    }

    /// Create a store bound to `path`, loading its snapshot if the file exists.
    pub fn load_from_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let repo = Self::new(Some(path.to_path_buf()));
        if path.exists() {
            let reader = BufReader::new(File::open(path)?);
            let courses: Vec<Course> = serde_json::from_reader(reader)?;
            for course in courses {
                repo.insert(course);
            }
            tracing::info!(path = %path.display(), count = repo.len(), "Loaded course snapshot");
        }
        Ok(repo)
    }

    /// Write every course, ordered by id, to the bound snapshot file.
    pub fn save_to_file(&self) -> RepositoryResult<()> {
        if let Some(path) = &self.persistence_path {
            let writer = BufWriter::new(File::create(path)?);
            let courses = self.sorted();
            serde_json::to_writer_pretty(writer, &courses)?;
            tracing::info!(path = %path.display(), count = courses.len(), "Saved course snapshot");
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn insert(&self, course: Course) {
        self.next_id
            .fetch_max(course.id.0.saturating_add(1), Ordering::SeqCst);
        self.inner.insert(course.id, course);
    }

    /// Reserve the next id from the sequence.
    fn reserve_id(&self) -> RepositoryResult<CourseId> {
        let mut current = self.next_id.load(Ordering::SeqCst);
        loop {
            if current == u64::MAX {
                return Err(RepositoryError::IdSpaceExhausted);
            }
            match self.next_id.compare_exchange(
                current,
                current + 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return Ok(CourseId(current)),
                Err(actual) => current = actual,
            }
        }
    }

    /// Store `coursename` under a freshly generated id.
    ///
    /// An id reserved here may already be taken by a concurrent explicit-id
    /// save; the vacant-entry check skips it and reserves another.
    fn insert_generated(&self, coursename: String) -> RepositoryResult<Course> {
        loop {
            let id = self.reserve_id()?;
            if let Entry::Vacant(slot) = self.inner.entry(id) {
                let course = Course { id, coursename };
                slot.insert(course.clone());
                return Ok(course);
            }
        }
    }

    fn sorted(&self) -> Vec<Course> {
        let mut courses: Vec<Course> = self.inner.iter().map(|r| r.value().clone()).collect();
        courses.sort_by_key(|c| c.id);
        courses
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Course>> {
        Ok(self.sorted())
    }

    async fn find_by_id(&self, id: CourseId) -> RepositoryResult<Option<Course>> {
        Ok(self.inner.get(&id).map(|r| r.value().clone()))
    }

    async fn save(&self, payload: CoursePayload) -> RepositoryResult<Course> {
        match payload.id {
            Some(id) => {
                let course = Course {
                    id,
                    coursename: payload.coursename,
                };
                self.insert(course.clone());
                Ok(course)
            }
            None => self.insert_generated(payload.coursename),
        }
    }

    async fn delete_by_id(&self, id: CourseId) -> RepositoryResult<bool> {
        Ok(self.inner.remove(&id).is_some())
    }
}
