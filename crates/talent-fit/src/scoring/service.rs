use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::config::TenantScoringOverride;
use super::domain::{CandidateProfile, JobRequirements, PlanTier, ScoringEvent, TenantId};
use super::repository::{
    ConfigStore, ScoredCandidate, ScoringEventStore, StoreError, StoredScoringConfig,
};
use super::resolver::{ConfigResolver, ConfigValidationError, EffectiveConfigView, ValidatedOverride};
use super::scorer::{FitScorer, ScoringUnavailable};

/// Candidate and job pair submitted for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub candidate: CandidateProfile,
    pub job: JobRequirements,
    #[serde(default)]
    pub semantic_similarity: Option<f64>,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Result of a scoring call. `Unscored` means no score exists, not a score of zero.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreOutcome {
    Scored(ScoringEvent),
    Unscored(ScoringUnavailable),
}

/// Facade composing the config store, resolver, scorer, and event store.
pub struct ScoringService<C, E> {
    configs: Arc<C>,
    events: Arc<E>,
    default_plan: PlanTier,
}

impl<C, E> ScoringService<C, E>
where
    C: ConfigStore + 'static,
    E: ScoringEventStore + 'static,
{
    pub fn new(configs: Arc<C>, events: Arc<E>, default_plan: PlanTier) -> Self {
        Self {
            configs,
            events,
            default_plan,
        }
    }

    fn stored(&self, tenant: &TenantId) -> Result<StoredScoringConfig, StoreError> {
        match self.configs.load(tenant) {
            Err(StoreError::NotFound) => Ok(StoredScoringConfig::default()),
            other => other,
        }
    }

    /// Plan, stored override, and the merged configuration for a tenant.
    pub fn effective_config(
        &self,
        tenant: &TenantId,
    ) -> Result<EffectiveConfigView, ScoringServiceError> {
        let stored = self.stored(tenant)?;
        let plan = stored.plan.unwrap_or(self.default_plan);
        Ok(ConfigResolver::effective_view(plan, stored.overrides.as_ref()))
    }

    /// Validate and persist a replacement override. Nothing is written on rejection.
    pub fn update_override(
        &self,
        tenant: &TenantId,
        proposed: TenantScoringOverride,
    ) -> Result<ValidatedOverride, ScoringServiceError> {
        let validated = match ConfigResolver::validate(proposed) {
            Ok(validated) => validated,
            Err(error) => {
                warn!(tenant = %tenant.0, code = error.code(), %error, "scoring override rejected");
                return Err(error.into());
            }
        };

        self.configs.replace_override(tenant, validated.clone())?;
        info!(tenant = %tenant.0, "scoring override replaced");
        Ok(validated)
    }

    /// Score a candidate under the tenant's effective configuration and record the event.
    pub fn score(
        &self,
        tenant: &TenantId,
        request: ScoreRequest,
    ) -> Result<ScoreOutcome, ScoringServiceError> {
        let stored = self.stored(tenant)?;
        let plan = stored.plan.unwrap_or(self.default_plan);
        let config = ConfigResolver::resolve(
            plan,
            stored.overrides.as_ref().map(ValidatedOverride::as_override),
        );

        let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
        let scorer = FitScorer::standard(as_of);

        match scorer.score(
            &request.candidate,
            &request.job,
            &config,
            request.semantic_similarity,
        ) {
            Ok(event) => {
                info!(
                    tenant = %tenant.0,
                    candidate = %request.candidate.candidate_id,
                    job = %request.job.job_id,
                    score = event.score,
                    tier = event.tier.label(),
                    engine = %event.engine,
                    "candidate scored"
                );
                self.events.record(
                    tenant,
                    ScoredCandidate {
                        candidate_id: request.candidate.candidate_id.clone(),
                        job_id: request.job.job_id.clone(),
                        event: event.clone(),
                    },
                )?;
                Ok(ScoreOutcome::Scored(event))
            }
            Err(reason) => {
                warn!(
                    tenant = %tenant.0,
                    candidate = %request.candidate.candidate_id,
                    job = %request.job.job_id,
                    %reason,
                    "candidate left unscored"
                );
                Ok(ScoreOutcome::Unscored(reason))
            }
        }
    }
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error(transparent)]
    Validation(#[from] ConfigValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
