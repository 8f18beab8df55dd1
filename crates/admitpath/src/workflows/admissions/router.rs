use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::EligibilityProfile;
use super::repository::DirectoryRepository;
use super::service::{AdmissionsService, AdmissionsServiceError};

/// Router builder exposing the dashboard and eligibility endpoints.
pub fn admissions_router<R>(service: Arc<AdmissionsService<R>>) -> Router
where
    R: DirectoryRepository + 'static,
{
    Router::new()
        .route("/api/v1/admin/analytics", get(analytics_handler::<R>))
        .route(
            "/api/v1/admin/counsellor-performance",
            get(performance_handler::<R>),
        )
        .route("/api/v1/eligibility/check", post(eligibility_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyticsQuery {
    #[serde(default)]
    pub(crate) days: Option<i64>,
}

/// Eligibility submission. Authentication happens upstream, so the caller
/// names the student explicitly.
#[derive(Debug, Deserialize)]
pub(crate) struct EligibilityCheckRequest {
    pub(crate) student_id: String,
    #[serde(flatten)]
    pub(crate) profile: EligibilityProfile,
}

pub(crate) async fn analytics_handler<R>(
    State(service): State<Arc<AdmissionsService<R>>>,
    Query(query): Query<AnalyticsQuery>,
) -> Response
where
    R: DirectoryRepository + 'static,
{
    match service.analytics(query.days) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error @ AdmissionsServiceError::InvalidWindow { .. }) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn performance_handler<R>(
    State(service): State<Arc<AdmissionsService<R>>>,
) -> Response
where
    R: DirectoryRepository + 'static,
{
    match service.counsellor_performance() {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn eligibility_handler<R>(
    State(service): State<Arc<AdmissionsService<R>>>,
    axum::Json(request): axum::Json<EligibilityCheckRequest>,
) -> Response
where
    R: DirectoryRepository + 'static,
{
    match service.check_eligibility(&request.student_id, &request.profile) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
