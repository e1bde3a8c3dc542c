use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::scoring::domain::{
    Achievement, CandidateProfile, Category, EducationLevel, EducationRecord, ExperienceEntry,
    JobRequirements, PlanTier, TenantId,
};
use crate::scoring::repository::{
    ConfigStore, ScoredCandidate, ScoringEventStore, StoreError, StoredScoringConfig,
};
use crate::scoring::resolver::ValidatedOverride;
use crate::scoring::scorer::{CategoryScore, CategoryScorer};
use crate::scoring::service::{ScoreRequest, ScoringService};
use crate::scoring::{scoring_router, ScoringConfig};

pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date")
}

pub(super) fn tenant() -> TenantId {
    TenantId("acme-talent".to_string())
}

pub(super) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn job() -> JobRequirements {
    JobRequirements {
        job_id: "job-42".to_string(),
        title: "Senior Backend Engineer".to_string(),
        must_have_skills: strings(&["Rust", "PostgreSQL", "Kubernetes", "gRPC"]),
        nice_to_have_skills: strings(&["Terraform"]),
        min_years_experience: 5.0,
        required_education: Some(EducationLevel::Bachelor),
        culture_keywords: strings(&["ownership", "mentorship"]),
        location: Some("Lagos".to_string()),
        remote_friendly: true,
        requirements_text: "Own the payments ledger services end to end.".to_string(),
    }
}

pub(super) fn strong_candidate() -> CandidateProfile {
    CandidateProfile {
        candidate_id: "cand-strong".to_string(),
        skills: Some(strings(&[
            "rust",
            "PostgreSQL",
            "kubernetes",
            "gRPC",
            "Terraform",
        ])),
        education: vec![EducationRecord {
            level: EducationLevel::Master,
            field: Some("Computer Science".to_string()),
            institution: Some("University of Lagos".to_string()),
        }],
        experience: vec![
            ExperienceEntry {
                title: "Backend Engineer".to_string(),
                company: Some("Paystack".to_string()),
                started_on: NaiveDate::from_ymd_opt(2018, 1, 1).expect("valid"),
                ended_on: Some(NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid")),
            },
            ExperienceEntry {
                title: "Senior Software Engineer".to_string(),
                company: Some("Flutterwave".to_string()),
                started_on: NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid"),
                ended_on: None,
            },
        ],
        achievements: vec![
            Achievement {
                summary: "Cut settlement latency by 40%".to_string(),
                quantified: true,
            },
            Achievement {
                summary: "Migrated 12 services to Kubernetes".to_string(),
                quantified: true,
            },
            Achievement {
                summary: "Ran the internal Rust guild".to_string(),
                quantified: false,
            },
        ],
        values: strings(&["Ownership", "mentorship", "curiosity"]),
        location: Some("Lagos".to_string()),
        open_to_remote: true,
    }
}

/// Strong on every axis except must-have coverage: 2 of 4 required skills.
pub(super) fn half_covered_candidate() -> CandidateProfile {
    let mut candidate = strong_candidate();
    candidate.candidate_id = "cand-half".to_string();
    candidate.skills = Some(strings(&["Rust", "PostgreSQL", "Terraform"]));
    candidate
}

pub(super) fn weak_candidate() -> CandidateProfile {
    CandidateProfile {
        candidate_id: "cand-weak".to_string(),
        skills: Some(Vec::new()),
        education: Vec::new(),
        experience: Vec::new(),
        achievements: Vec::new(),
        values: Vec::new(),
        location: None,
        open_to_remote: false,
    }
}

pub(super) fn unscorable_candidate() -> CandidateProfile {
    let mut candidate = strong_candidate();
    candidate.candidate_id = "cand-no-skills".to_string();
    candidate.skills = None;
    candidate
}

pub(super) fn score_request(candidate: CandidateProfile) -> ScoreRequest {
    ScoreRequest {
        candidate,
        job: job(),
        semantic_similarity: None,
        as_of: Some(as_of()),
    }
}

pub(super) fn plan_config(plan: PlanTier) -> ScoringConfig {
    ScoringConfig::for_plan(plan)
}

/// Sub-scorer returning a fixed value, used to isolate policy behavior.
pub(super) struct FixedScorer {
    pub(super) category: Category,
    pub(super) score: f64,
}

impl CategoryScorer for FixedScorer {
    fn category(&self) -> Category {
        self.category
    }

    fn score(&self, _candidate: &CandidateProfile, _job: &JobRequirements) -> CategoryScore {
        CategoryScore {
            score: self.score,
            rationale: format!("fixed {}", self.score),
        }
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryConfigStore {
    pub(super) records: Arc<Mutex<HashMap<TenantId, StoredScoringConfig>>>,
}

impl MemoryConfigStore {
    pub(super) fn with_plan(tenant: &TenantId, plan: PlanTier) -> Self {
        let store = Self::default();
        store.records.lock().expect("store mutex poisoned").insert(
            tenant.clone(),
            StoredScoringConfig {
                plan: Some(plan),
                overrides: None,
            },
        );
        store
    }

    pub(super) fn stored(&self, tenant: &TenantId) -> Option<StoredScoringConfig> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .get(tenant)
            .cloned()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self, tenant: &TenantId) -> Result<StoredScoringConfig, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        guard.get(tenant).cloned().ok_or(StoreError::NotFound)
    }

    fn replace_override(
        &self,
        tenant: &TenantId,
        overrides: ValidatedOverride,
    ) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.entry(tenant.clone()).or_default().overrides = Some(overrides);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryEvents {
    events: Arc<Mutex<Vec<(TenantId, ScoredCandidate)>>>,
}

impl MemoryEvents {
    pub(super) fn events(&self) -> Vec<(TenantId, ScoredCandidate)> {
        self.events.lock().expect("event mutex poisoned").clone()
    }
}

impl ScoringEventStore for MemoryEvents {
    fn record(&self, tenant: &TenantId, scored: ScoredCandidate) -> Result<(), StoreError> {
        self.events
            .lock()
            .expect("event mutex poisoned")
            .push((tenant.clone(), scored));
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl ConfigStore for UnavailableStore {
    fn load(&self, _tenant: &TenantId) -> Result<StoredScoringConfig, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn replace_override(
        &self,
        _tenant: &TenantId,
        _overrides: ValidatedOverride,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service(
    plan: PlanTier,
) -> (
    ScoringService<MemoryConfigStore, MemoryEvents>,
    Arc<MemoryConfigStore>,
    Arc<MemoryEvents>,
) {
    let configs = Arc::new(MemoryConfigStore::with_plan(&tenant(), plan));
    let events = Arc::new(MemoryEvents::default());
    let service = ScoringService::new(configs.clone(), events.clone(), PlanTier::Free);
    (service, configs, events)
}

pub(super) fn router_with_service(
    service: ScoringService<MemoryConfigStore, MemoryEvents>,
) -> axum::Router {
    scoring_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
