//! Course management.
//!
//! # Data Flow
//! ```text
//! http handler
//!     → controller.rs (log line, span, timer, counter)
//!     → repository.rs (CourseRepository port)
//!     → memory.rs (DashMap store, optional JSON snapshot)
//! ```

pub mod controller;
pub mod memory;
pub mod repository;
pub mod types;

pub use controller::{CourseController, CourseError, HOME_TEXT};
pub use memory::InMemoryCourseRepository;
pub use repository::{CourseRepository, RepositoryError};
pub use types::{Course, CourseId, CoursePayload};
