//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, timeout, body limit)
//!     → handlers.rs (extract path/body, call CourseController)
//!     → error.rs (map CourseError to status + JSON body)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
