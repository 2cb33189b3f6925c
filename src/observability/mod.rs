//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every controller operation produces:
//!     → logging.rs (one structured log event)
//!     → tracing.rs (one span with an outcome field)
//!     → metrics.rs (counters and timers on an injected recorder)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape of the metrics listener
//! ```
//!
//! # Design Decisions
//! - Metrics go through an injected `Metrics` handle, not the global recorder
//! - Spans and timers are guards, closed on every exit path

pub mod logging;
pub mod metrics;
pub mod tracing;

pub use self::metrics::Metrics;
