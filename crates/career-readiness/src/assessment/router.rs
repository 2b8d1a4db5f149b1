use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::content::question_bank;
use super::domain::AnswerSubmission;
use super::report::AssessmentReport;
use super::repository::{AssessmentStore, SessionId};
use super::scoring::AssessmentScores;
use super::service::{AssessmentService, AssessmentServiceError};

/// Router builder exposing answer intake, submission, and result endpoints.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: AssessmentStore + 'static,
{
    Router::new()
        .route("/api/v1/assessment/questions", get(questions_handler))
        .route("/api/v1/assessment/evaluate", post(evaluate_handler))
        .route(
            "/api/v1/assessment/sessions/:session_id",
            get(session_handler::<S>),
        )
        .route(
            "/api/v1/assessment/sessions/:session_id/answers",
            post(answer_handler::<S>),
        )
        .route(
            "/api/v1/assessment/sessions/:session_id/technical/calculate",
            post(calculate_handler::<S>),
        )
        .route(
            "/api/v1/assessment/sessions/:session_id/submit",
            post(submit_handler::<S>),
        )
        .route(
            "/api/v1/assessment/sessions/:session_id/results",
            get(results_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn answer_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
    axum::Json(answer): axum::Json<AnswerSubmission>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    let id = SessionId(session_id);
    match run_blocking(service, move |service| service.record_answer(&id, &answer)).await {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn calculate_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    let id = SessionId(session_id);
    match run_blocking(service, move |service| service.calculate_aptitude(&id)).await {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    let id = SessionId(session_id);
    match run_blocking(service, move |service| service.submit(&id)).await {
        Ok(result) => (StatusCode::ACCEPTED, axum::Json(result)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn results_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    let id = SessionId(session_id);
    match run_blocking(service, move |service| service.results(&id)).await {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn session_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    let id = SessionId(session_id);
    match service.session(&id) {
        Some(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        None => {
            let payload = json!({
                "error": format!("session '{id}' has not started"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn evaluate_handler(axum::Json(scores): axum::Json<AssessmentScores>) -> Response {
    let report = AssessmentReport::build(&scores);
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn questions_handler() -> Response {
    (StatusCode::OK, axum::Json(question_bank())).into_response()
}

/// Runs a service call on the blocking pool. Store implementations may touch
/// the filesystem, so they stay off the async workers.
async fn run_blocking<S, T, F>(service: Arc<AssessmentService<S>>, call: F) -> Result<T, Response>
where
    S: AssessmentStore + 'static,
    T: Send + 'static,
    F: FnOnce(&AssessmentService<S>) -> Result<T, AssessmentServiceError> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || call(&service)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(error_response(error)),
        Err(join_error) => {
            tracing::error!(error = %join_error, "assessment task did not complete");
            let payload = json!({
                "error": "assessment task did not complete",
            });
            Err((StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response())
        }
    }
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::Response(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::AlreadySubmitted(_) => StatusCode::CONFLICT,
        AssessmentServiceError::MissingResult(_) | AssessmentServiceError::NotStarted(_) => {
            let payload = json!({
                "error": error.to_string(),
                "redirect": "/",
            });
            return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
        }
        AssessmentServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
