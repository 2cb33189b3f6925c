//! Operation spans.
//!
//! Each controller operation opens an info span named after the operation
//! with an empty `outcome` field. `in_span` runs the operation inside the
//! span and fills `outcome` with `ok` or `error` once it completes.

use std::future::Future;
use tracing::{Instrument, Span};

pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_ERROR: &str = "error";

/// Run `future` inside `span` and record its outcome on the span.
pub async fn in_span<F, T, E>(span: Span, future: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let result = future.instrument(span.clone()).await;
    span.record(
        "outcome",
        if result.is_ok() { OUTCOME_OK } else { OUTCOME_ERROR },
    );
    result
}
