//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Bind server to listener
//! - Stop on the shutdown broadcast

use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::courses::CourseController;
use crate::http::handlers;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<CourseController>,
}

/// HTTP server for the course API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around an already wired controller.
    pub fn new(config: &AppConfig, controller: Arc<CourseController>) -> Self {
        let state = AppState { controller };
        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::home))
            .route(
                "/courses",
                get(handlers::list_courses).post(handlers::save_course),
            )
            .route(
                "/{id}",
                get(handlers::get_course).delete(handlers::delete_course),
            )
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for driving requests in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::courses::{Course, CourseId, CoursePayload, InMemoryCourseRepository};
    use crate::observability::metrics::{prometheus_metrics, testing::sample};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use metrics_exporter_prometheus::PrometheusHandle;
    use tower::ServiceExt;

    fn app() -> (Router, PrometheusHandle) {
        let (metrics, handle) = prometheus_metrics();
        let controller = CourseController::new(Arc::new(InMemoryCourseRepository::default()), metrics);
        let server = HttpServer::new(&AppConfig::default(), Arc::new(controller));
        (server.router(), handle)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_home() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Course App Home");
    }

    #[tokio::test]
    async fn test_post_then_list() {
        let (app, handle) = app();

        let (status, body) = send(&app, Method::POST, "/courses", Some(r#"{"coursename":"Algebra"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());

        let (status, body) = send(&app, Method::GET, "/courses", None).await;
        assert_eq!(status, StatusCode::OK);
        let courses: Vec<Course> = serde_json::from_slice(&body).unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].coursename, "Algebra");

        assert_eq!(sample(&handle, "courses_saved"), 1.0);
        assert_eq!(sample(&handle, "courses_accessed"), 1.0);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let (app, handle) = app();
        let payload = serde_json::to_string(&CoursePayload::with_id(7, "Physics")).unwrap();
        send(&app, Method::POST, "/courses", Some(&payload)).await;

        let (status, body) = send(&app, Method::GET, "/7", None).await;
        assert_eq!(status, StatusCode::OK);
        let course: Course = serde_json::from_slice(&body).unwrap();
        assert_eq!(course, Course { id: CourseId(7), coursename: "Physics".into() });
        assert_eq!(sample(&handle, "courses_accessed_specific"), 1.0);
    }

    #[tokio::test]
    async fn test_missing_course_is_404() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::GET, "/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "course 42 not found");
    }

    #[tokio::test]
    async fn test_delete() {
        let (app, handle) = app();
        let payload = serde_json::to_string(&CoursePayload::with_id(1, "Art")).unwrap();
        send(&app, Method::POST, "/courses", Some(&payload)).await;

        let (status, body) = send(&app, Method::DELETE, "/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
        assert_eq!(sample(&handle, "courses_deleted"), 1.0);

        let (status, _) = send(&app, Method::GET, "/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, "/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(sample(&handle, "courses_deleted"), 1.0);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_rejected() {
        let (app, _) = app();
        let (status, _) = send(&app, Method::GET, "/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let (app, handle) = app();
        let (status, _) = send(&app, Method::POST, "/courses", Some(r#"{"name":1}"#)).await;
        assert!(status.is_client_error());
        assert_eq!(sample(&handle, "courses_saved"), 0.0);
    }

    #[tokio::test]
    async fn test_request_id_is_returned() {
        let (app, _) = app();
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }
}
