use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde_json::Value;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::admissions::router::{
    admissions_router, analytics_handler, AnalyticsQuery,
};
use crate::workflows::admissions::service::AdmissionsService;
use crate::workflows::admissions::{EligibilityConfig, InMemoryDirectory};

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn analytics_route_returns_the_report() {
    let (service, _) = build_service(sample_snapshot());
    let router = admissions_router(Arc::new(service));

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/admin/analytics?days=30")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert!(payload.get("conversion_funnel").is_some());
    assert!(payload.get("growth_rates").is_some());
}

#[tokio::test]
async fn analytics_handler_rejects_zero_day_windows() {
    let (service, _) = build_service(sample_snapshot());

    let response = analytics_handler::<InMemoryDirectory>(
        State(Arc::new(service)),
        Query(AnalyticsQuery { days: Some(0) }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn analytics_handler_reports_repository_failures() {
    let service = Arc::new(AdmissionsService::new(
        Arc::new(UnavailableDirectory),
        EligibilityConfig::default(),
    ));

    let response = analytics_handler::<UnavailableDirectory>(
        State(service),
        Query(AnalyticsQuery { days: Some(30) }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn performance_route_returns_counsellor_metrics() {
    let (service, _) = build_service(sample_snapshot());
    let router = admissions_router(Arc::new(service));

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/admin/counsellor-performance")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert!(payload.get("counsellors").is_some());
    assert!(payload.get("summary").is_some());
}

#[tokio::test]
async fn eligibility_route_scores_submissions() {
    let (service, _) = build_service(sample_snapshot());
    let router = admissions_router(Arc::new(service));

    let mut body = serde_json::to_value(strong_profile()).expect("profile serializes");
    body.as_object_mut()
        .expect("object payload")
        .insert("student_id".to_string(), Value::String("s1".to_string()));

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/eligibility/check")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&body).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["eligible"], Value::Bool(true));
    assert_eq!(payload["score"], Value::from(100));
}
