use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use career_readiness::assessment::{assessment_router, AssessmentService, AssessmentStore};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_assessment_routes<S>(service: Arc<AssessmentService<S>>) -> axum::Router
where
    S: AssessmentStore + 'static,
{
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryAssessmentStore;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app(ready: bool) -> (axum::Router, Arc<AtomicBool>) {
        let readiness = Arc::new(AtomicBool::new(ready));
        let state = AppState {
            readiness: readiness.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let service = Arc::new(AssessmentService::new(Arc::new(
            InMemoryAssessmentStore::default(),
        )));
        (with_assessment_routes(service).layer(Extension(state)), readiness)
    }

    async fn status_of(router: axum::Router, uri: &str) -> StatusCode {
        router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes")
            .status()
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_follows_the_flag() {
        let (router, readiness) = app(false);
        assert_eq!(
            status_of(router.clone(), "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );

        readiness.store(true, Ordering::Release);
        assert_eq!(status_of(router, "/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn assessment_routes_are_mounted_beside_health_checks() {
        let (router, _) = app(true);
        assert_eq!(
            status_of(router.clone(), "/api/v1/assessment/questions").await,
            StatusCode::OK
        );
        assert_eq!(status_of(router.clone(), "/metrics").await, StatusCode::OK);
        assert_eq!(
            status_of(router, "/api/v1/assessment/sessions/assessmentData/results").await,
            StatusCode::NOT_FOUND
        );
    }
}
