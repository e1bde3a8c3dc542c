use serde::{Deserialize, Deserializer, Serialize};

use super::config::TenantScoringOverride;
use super::domain::{PlanTier, ScoringEvent, TenantId};
use super::resolver::{ConfigResolver, ValidatedOverride};

/// What the config store holds for a tenant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredScoringConfig {
    #[serde(default)]
    pub plan: Option<PlanTier>,
    #[serde(default, deserialize_with = "revalidate_override")]
    pub overrides: Option<ValidatedOverride>,
}

/// Stored overrides pass the same validation as incoming ones.
fn revalidate_override<'de, D>(deserializer: D) -> Result<Option<ValidatedOverride>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<TenantScoringOverride>::deserialize(deserializer)?
        .map(ConfigResolver::validate)
        .transpose()
        .map_err(serde::de::Error::custom)
}

/// Persistence boundary for per-tenant scoring configuration.
///
/// `replace_override` must apply the override in full or not at all.
pub trait ConfigStore: Send + Sync {
    fn load(&self, tenant: &TenantId) -> Result<StoredScoringConfig, StoreError>;
    fn replace_override(
        &self,
        tenant: &TenantId,
        overrides: ValidatedOverride,
    ) -> Result<(), StoreError>;
}

/// A scoring event tagged with the records it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    pub candidate_id: String,
    pub job_id: String,
    pub event: ScoringEvent,
}

/// Sink for scoring events; timestamps belong to the implementation.
pub trait ScoringEventStore: Send + Sync {
    fn record(&self, tenant: &TenantId, scored: ScoredCandidate) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn stored_config_reloads_a_valid_override() {
        let stored: StoredScoringConfig = serde_json::from_value(json!({
            "plan": "pro",
            "overrides": { "nlpPolicy": { "maxSemanticBoost": 12 } }
        }))
        .expect("valid stored config");

        assert_eq!(stored.plan, Some(PlanTier::Pro));
        let overrides = stored.overrides.expect("override kept");
        let nlp = overrides.as_override().nlp_policy.expect("nlp section");
        assert_eq!(nlp.max_semantic_boost, Some(12.0));

        let round_trip = serde_json::to_value(StoredScoringConfig {
            plan: Some(PlanTier::Pro),
            overrides: Some(overrides),
        })
        .expect("serializes");
        assert_eq!(round_trip["overrides"]["nlpPolicy"]["maxSemanticBoost"], json!(12.0));
    }

    #[test]
    fn stored_config_rejects_an_override_that_fails_validation() {
        let error = serde_json::from_value::<StoredScoringConfig>(json!({
            "overrides": {
                "categoryWeights": {
                    "coreCompetencies": 90,
                    "experienceQuality": 30,
                    "education": 10,
                    "achievements": 10,
                    "culturalFit": 10
                }
            }
        }))
        .expect_err("weights sum to 150");
        assert!(error.to_string().contains("100"), "unexpected error: {error}");

        let stored: StoredScoringConfig =
            serde_json::from_value(json!({})).expect("empty record decodes");
        assert_eq!(stored, StoredScoringConfig::default());
    }
}
