use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::scoring::domain::PlanTier;
use crate::scoring::router::{config_handler, score_handler, update_config_handler};
use crate::scoring::service::ScoringService;

fn json_request(
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn config_route_returns_effective_view() {
    let (service, _, _) = build_service(PlanTier::Pro);
    let router = router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/tenants/acme-talent/scoring-config")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["plan"], json!("pro"));
    assert_eq!(payload["overrides"], serde_json::Value::Null);
    assert_eq!(
        payload["effectiveConfig"]["nlpPolicy"]["maxSemanticBoost"],
        json!(10.0)
    );
}

#[tokio::test]
async fn update_route_rejects_invalid_weights_with_code() {
    let (service, configs, _) = build_service(PlanTier::Pro);
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/v1/tenants/acme-talent/scoring-config",
            json!({
                "categoryWeights": {
                    "coreCompetencies": 30,
                    "experienceQuality": 25,
                    "education": 15,
                    "achievements": 15,
                    "culturalFit": 20
                }
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["code"], json!("weights-sum-mismatch"));
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("105"));
    assert!(configs
        .stored(&tenant())
        .and_then(|stored| stored.overrides)
        .is_none());
}

#[tokio::test]
async fn update_route_rejects_malformed_payloads() {
    let (service, _, _) = build_service(PlanTier::Free);
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/v1/tenants/acme-talent/scoring-config",
            json!({ "tierThresholds": { "A": "high", "B": 65, "C": 50 } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["code"], json!("malformed"));
}

#[tokio::test]
async fn update_handler_stores_valid_override() {
    let (service, configs, _) = build_service(PlanTier::Enterprise);
    let service = Arc::new(service);

    let response = update_config_handler::<MemoryConfigStore, MemoryEvents>(
        State(service.clone()),
        Path("acme-talent".to_string()),
        axum::Json(json!({ "skillsPolicy": { "mustHaveSkillMatchPercent": 50 } })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["skillsPolicy"]["mustHaveSkillMatchPercent"],
        json!(50.0)
    );
    assert!(configs
        .stored(&tenant())
        .and_then(|stored| stored.overrides)
        .is_some());

    let response = config_handler::<MemoryConfigStore, MemoryEvents>(
        State(service),
        Path("acme-talent".to_string()),
    )
    .await;
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["effectiveConfig"]["skillsPolicy"]["mustHaveSkillMatchPercent"],
        json!(50.0)
    );
    assert_eq!(
        payload["effectiveConfig"]["skillsPolicy"]["treatMissingMustHaveAsRedFlag"],
        json!(true)
    );
}

#[tokio::test]
async fn score_route_returns_scored_event() {
    let (service, _, events) = build_service(PlanTier::Free);
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/tenants/acme-talent/score",
            serde_json::to_value(score_request(half_covered_candidate())).unwrap(),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["scored"], json!(true));
    assert_eq!(payload["event"]["score"], json!(79));
    assert_eq!(payload["event"]["tier"], json!("B"));
    assert_eq!(payload["event"]["engine"], json!("fit-scorer-v1"));
    assert_eq!(events.events().len(), 1);
}

#[tokio::test]
async fn score_handler_reports_unscored_candidates_without_score() {
    let (service, _, events) = build_service(PlanTier::Free);

    let response = score_handler::<MemoryConfigStore, MemoryEvents>(
        State(Arc::new(service)),
        Path("acme-talent".to_string()),
        axum::Json(score_request(unscorable_candidate())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["scored"], json!(false));
    assert_eq!(payload["score"], serde_json::Value::Null);
    assert_eq!(payload["reason"], json!("missing-candidate-skills"));
    assert!(events.events().is_empty());
}

#[tokio::test]
async fn handlers_return_internal_error_when_store_unavailable() {
    let service = Arc::new(ScoringService::new(
        Arc::new(UnavailableStore),
        Arc::new(MemoryEvents::default()),
        PlanTier::Free,
    ));

    let response = config_handler::<UnavailableStore, MemoryEvents>(
        State(service.clone()),
        Path("acme-talent".to_string()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = score_handler::<UnavailableStore, MemoryEvents>(
        State(service),
        Path("acme-talent".to_string()),
        axum::Json(score_request(strong_candidate())),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
