//! Course management web service library.

pub mod config;
pub mod courses;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use courses::{Course, CourseController, CourseId, CoursePayload};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
