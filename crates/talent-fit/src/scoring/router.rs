use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::config::TenantScoringOverride;
use super::domain::TenantId;
use super::repository::{ConfigStore, ScoringEventStore, StoreError};
use super::resolver::ConfigValidationError;
use super::service::{ScoreOutcome, ScoreRequest, ScoringService, ScoringServiceError};

/// Router builder exposing tenant configuration and scoring endpoints.
pub fn scoring_router<C, E>(service: Arc<ScoringService<C, E>>) -> Router
where
    C: ConfigStore + 'static,
    E: ScoringEventStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/tenants/:tenant/scoring-config",
            get(config_handler::<C, E>).put(update_config_handler::<C, E>),
        )
        .route(
            "/api/v1/tenants/:tenant/score",
            post(score_handler::<C, E>),
        )
        .with_state(service)
}

fn validation_response(error: &ConfigValidationError) -> Response {
    let payload = json!({
        "error": error.to_string(),
        "code": error.code(),
        "detail": error,
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}

fn error_response(error: ScoringServiceError) -> Response {
    match error {
        ScoringServiceError::Validation(error) => validation_response(&error),
        ScoringServiceError::Store(StoreError::NotFound) => {
            let payload = json!({ "error": "tenant not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        ScoringServiceError::Store(StoreError::Conflict) => {
            let payload = json!({ "error": "scoring override was modified concurrently" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn config_handler<C, E>(
    State(service): State<Arc<ScoringService<C, E>>>,
    Path(tenant): Path<String>,
) -> Response
where
    C: ConfigStore + 'static,
    E: ScoringEventStore + 'static,
{
    match service.effective_config(&TenantId(tenant)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_config_handler<C, E>(
    State(service): State<Arc<ScoringService<C, E>>>,
    Path(tenant): Path<String>,
    axum::Json(payload): axum::Json<serde_json::Value>,
) -> Response
where
    C: ConfigStore + 'static,
    E: ScoringEventStore + 'static,
{
    let proposed = match TenantScoringOverride::from_json(payload) {
        Ok(proposed) => proposed,
        Err(error) => return validation_response(&error),
    };

    match service.update_override(&TenantId(tenant), proposed) {
        Ok(validated) => (StatusCode::OK, axum::Json(validated)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler<C, E>(
    State(service): State<Arc<ScoringService<C, E>>>,
    Path(tenant): Path<String>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    C: ConfigStore + 'static,
    E: ScoringEventStore + 'static,
{
    match service.score(&TenantId(tenant), request) {
        Ok(ScoreOutcome::Scored(event)) => {
            let payload = json!({
                "scored": true,
                "event": event,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(ScoreOutcome::Unscored(reason)) => {
            let payload = json!({
                "scored": false,
                "score": serde_json::Value::Null,
                "reason": reason,
                "detail": reason.to_string(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}
