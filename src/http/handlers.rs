use axum::{
    extract::{Path, State},
    Json,
};

use crate::courses::{Course, CourseError, CourseId, CoursePayload};
use crate::http::server::AppState;

pub async fn home(State(state): State<AppState>) -> &'static str {
    state.controller.home()
}

pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<Course>>, CourseError> {
    state.controller.list_courses().await.map(Json)
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
) -> Result<Json<Course>, CourseError> {
    state.controller.get_course(id).await.map(Json)
}

/// Responds with an empty body once stored.
pub async fn save_course(
    State(state): State<AppState>,
    Json(payload): Json<CoursePayload>,
) -> Result<(), CourseError> {
    state.controller.save_course(payload).await.map(|_| ())
}

pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
) -> Result<(), CourseError> {
    state.controller.delete_course(id).await
}
