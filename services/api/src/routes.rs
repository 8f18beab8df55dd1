use crate::infra::AppState;
use admitpath::workflows::admissions::{
    admissions_router, AdmissionsService, DirectoryRepository,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_admissions_routes<R>(service: Arc<AdmissionsService<R>>) -> axum::Router
where
    R: DirectoryRepository + 'static,
{
    admissions_router(service)
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
    use crate::demo::demo_snapshot;
    use crate::infra::directory_from;
    use admitpath::workflows::admissions::EligibilityConfig;
    use serde_json::Value;
    use tower::ServiceExt;

    fn demo_router() -> axum::Router {
        let service = Arc::new(AdmissionsService::new(
            directory_from(demo_snapshot()),
            EligibilityConfig::default(),
        ));
        with_admissions_routes(service)
    }

    async fn read_json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let response = demo_router()
            .oneshot(
                axum::http::Request::get("/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["status"], "ok");
    }

    #[tokio::test]
    async fn analytics_route_serves_the_demo_dataset() {
        let response = demo_router()
            .oneshot(
                axum::http::Request::get("/api/v1/admin/analytics?days=30")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert!(payload["total_students"].as_u64().is_some());
        assert_eq!(
            payload["conversion_funnel"][0]["stage"],
            Value::String("Total Students".to_string())
        );
    }

    #[tokio::test]
    async fn counsellor_route_serves_the_demo_dataset() {
        let response = demo_router()
            .oneshot(
                axum::http::Request::get("/api/v1/admin/counsellor-performance")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert!(payload["total_counsellors"].as_u64().unwrap_or(0) > 0);
    }
}
