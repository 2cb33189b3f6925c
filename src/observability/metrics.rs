//! Metrics collection and exposition.
//!
//! # Metrics
//! - `courses.accessed` (counter): successful course list fetches
//! - `courses.accessed.specific` (counter): successful single-course fetches
//! - `courses.saved` (counter): successful saves
//! - `courses.deleted` (counter): successful deletes
//! - `courses.fetch.all` (timer, seconds): list fetch latency
//! - `courses.fetch.single` (timer, seconds): single fetch latency
//!
//! Prometheus exposition replaces the dots with underscores.
//!
//! # Design Decisions
//! - Recorder is injected through `Metrics`, so tests and the server can
//!   each hold their own registry
//! - Timers are drop guards and record on every exit path

use axum::{extract::State, routing::get, Router};
use metrics::Recorder;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;

pub const COURSES_ACCESSED: &str = "courses.accessed";
pub const COURSES_ACCESSED_SPECIFIC: &str = "courses.accessed.specific";
pub const COURSES_SAVED: &str = "courses.saved";
pub const COURSES_DELETED: &str = "courses.deleted";
pub const FETCH_ALL_TIMER: &str = "courses.fetch.all";
pub const FETCH_SINGLE_TIMER: &str = "courses.fetch.single";

const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Handle to an injected metrics recorder.
#[derive(Clone)]
pub struct Metrics {
    recorder: Arc<dyn Recorder + Send + Sync>,
}

impl Metrics {
    pub fn new(recorder: Arc<dyn Recorder + Send + Sync>) -> Self {
        Self { recorder }
    }

    /// Increment the named counter by one.
    pub fn increment(&self, name: &'static str) {
        ::metrics::with_local_recorder(self.recorder.as_ref(), || {
            ::metrics::counter!(name).increment(1);
        });
    }

    /// Start a timer that records into the named histogram when dropped.
    pub fn start_timer(&self, name: &'static str) -> TimerGuard {
        TimerGuard {
            metrics: self.clone(),
            name,
            start: Instant::now(),
        }
    }

    fn record_duration(&self, name: &'static str, elapsed: Duration) {
        ::metrics::with_local_recorder(self.recorder.as_ref(), || {
            ::metrics::histogram!(name).record(elapsed.as_secs_f64());
        });
    }
}

/// Records elapsed time into a histogram on drop.
#[must_use = "the timer records when dropped"]
pub struct TimerGuard {
    metrics: Metrics,
    name: &'static str,
    start: Instant,
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.metrics.record_duration(self.name, self.start.elapsed());
    }
}

/// Build a Prometheus recorder and the handle used to render it.
pub fn prometheus_metrics() -> (Metrics, PrometheusHandle) {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    (Metrics::new(Arc::new(recorder)), handle)
}

/// Serve `GET /metrics` on `listener` until shutdown fires.
pub async fn serve_metrics(
    listener: TcpListener,
    handle: PrometheusHandle,
    mut shutdown: broadcast::Receiver<()>,
) -> std::io::Result<()> {
    let upkeep_handle = handle.clone();
    let upkeep = tokio::spawn(async move {
        let mut interval = tokio::time::interval(UPKEEP_INTERVAL);
        loop {
            interval.tick().await;
            upkeep_handle.run_upkeep();
        }
    });

    let app = Router::new()
        .route("/metrics", get(render_metrics))
        .with_state(handle);

    let addr: SocketAddr = listener.local_addr()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await;

    upkeep.abort();
    result
}

async fn render_metrics(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}
