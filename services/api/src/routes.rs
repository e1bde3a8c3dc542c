use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use talent_fit::scoring::{scoring_router, ConfigStore, ScoringEventStore, ScoringService, Tier};
use talent_fit::search::search_router;

/// Display treatment for a tier in list views and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct TierBadge {
    pub(crate) tier: Tier,
    pub(crate) label: &'static str,
    pub(crate) colour: &'static str,
    pub(crate) description: &'static str,
}

pub(crate) fn tier_badge(tier: Tier) -> TierBadge {
    let (colour, description) = match tier {
        Tier::A => ("green", "Strong fit"),
        Tier::B => ("blue", "Good fit"),
        Tier::C => ("amber", "Partial fit"),
        Tier::D => ("red", "Weak fit"),
    };

    TierBadge {
        tier,
        label: tier.label(),
        colour,
        description,
    }
}

pub(crate) fn with_service_routes<C, E>(service: Arc<ScoringService<C, E>>) -> axum::Router
where
    C: ConfigStore + 'static,
    E: ScoringEventStore + 'static,
{
    scoring_router(service)
        .merge(search_router())
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/tiers", axum::routing::get(tier_legend))
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

pub(crate) async fn tier_legend() -> Json<Vec<TierBadge>> {
    Json([Tier::A, Tier::B, Tier::C, Tier::D].map(tier_badge).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryConfigStore, InMemoryEventStore};
    use talent_fit::scoring::{PlanTier, TenantId};
    use tower::ServiceExt;

    fn service() -> (
        Arc<ScoringService<InMemoryConfigStore, InMemoryEventStore>>,
        InMemoryConfigStore,
        InMemoryEventStore,
    ) {
        let configs = InMemoryConfigStore::default();
        let events = InMemoryEventStore::default();
        let service = ScoringService::new(
            Arc::new(configs.clone()),
            Arc::new(events.clone()),
            PlanTier::Pro,
        );
        (Arc::new(service), configs, events)
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[test]
    fn every_tier_has_a_distinct_badge() {
        let badges = [Tier::A, Tier::B, Tier::C, Tier::D].map(tier_badge);

        assert_eq!(badges[0].colour, "green");
        assert_eq!(badges[3].colour, "red");
        for (index, badge) in badges.iter().enumerate() {
            assert!(badges[index + 1..]
                .iter()
                .all(|other| other.colour != badge.colour));
        }
    }

    #[tokio::test]
    async fn health_and_legend_routes_respond() {
        let (service, _, _) = service();
        let router = with_service_routes(service);

        let response = router
            .clone()
            .oneshot(
                axum::http::Request::get("/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                axum::http::Request::get("/api/v1/tiers")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        let payload = json_body(response).await;
        assert_eq!(payload[0]["label"], json!("A"));
        assert_eq!(payload[2]["colour"], json!("amber"));
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .build_recorder()
            .handle();
        let state = AppState {
            readiness: Arc::new(std::sync::atomic::AtomicBool::new(false)),
            metrics: Arc::new(handle),
        };

        let response = readiness_endpoint(Extension(state.clone()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state
            .readiness
            .store(true, std::sync::atomic::Ordering::Release);
        let response = readiness_endpoint(Extension(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn merged_router_serves_scoring_and_search() {
        let (service, configs, events) = service();
        configs
            .seed(TenantId("globex".to_string()), PlanTier::Enterprise, None)
            .expect("seed succeeds");
        let router = with_service_routes(service);

        let response = router
            .clone()
            .oneshot(
                axum::http::Request::get("/api/v1/tenants/globex/scoring-config")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        let payload = json_body(response).await;
        assert_eq!(payload["plan"], json!("enterprise"));

        let search = json!({
            "query": "stage:interview -lagos",
            "rows": [
                { "id": "1", "fields": { "name": "Ada", "location": "Lagos", "stage": "interview" } },
                { "id": "2", "fields": { "name": "Bola", "location": "Abuja", "stage": "interview" } }
            ]
        });
        let response = router
            .oneshot(
                axum::http::Request::post("/api/v1/search")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(serde_json::to_vec(&search).unwrap()))
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = json_body(response).await;
        assert_eq!(payload["matches"], json!(["2"]));
        assert!(events.events().is_empty());
    }
}
