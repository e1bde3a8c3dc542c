use std::fmt;

use serde::Serialize;

use super::config::{
    merge_section, CategoryWeightsOverride, NlpPolicyOverride, ScoringConfig,
    SkillsPolicyOverride, TenantScoringOverride, TierThresholdsOverride,
};
use super::domain::PlanTier;

const REQUIRED_WEIGHT_TOTAL: f64 = 100.0;
const WEIGHT_TOLERANCE: f64 = 1e-6;
const MAX_SEMANTIC_BOOST: f64 = 30.0;

/// An override that passed validation and may be persisted as a unit.
///
/// Only [`ConfigResolver::validate`] constructs one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedOverride(TenantScoringOverride);

impl ValidatedOverride {
    pub fn as_override(&self) -> &TenantScoringOverride {
        &self.0
    }
}

/// Named threshold value reported when the descending order is violated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdPoint {
    pub name: &'static str,
    pub value: f64,
}

impl fmt::Display for ThresholdPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Reason an override was rejected. Rejection is always for the whole override.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "code", rename_all = "kebab-case")]
pub enum ConfigValidationError {
    #[error("category weights must sum to 100 (got {total})")]
    WeightsSumMismatch { total: f64 },
    #[error("tier thresholds must be strictly descending: {higher} must exceed {lower}")]
    ThresholdOrderViolation {
        higher: ThresholdPoint,
        lower: ThresholdPoint,
    },
    #[error("{section}.{field} is required")]
    MissingField {
        section: &'static str,
        field: &'static str,
    },
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("scoring override is malformed: {reason}")]
    Malformed { reason: String },
}

impl ConfigValidationError {
    pub const fn code(&self) -> &'static str {
        match self {
            ConfigValidationError::WeightsSumMismatch { .. } => "weights-sum-mismatch",
            ConfigValidationError::ThresholdOrderViolation { .. } => "threshold-order-violation",
            ConfigValidationError::MissingField { .. } => "missing-field",
            ConfigValidationError::OutOfRange { .. } => "out-of-range",
            ConfigValidationError::NonFinite { .. } => "non-finite",
            ConfigValidationError::Malformed { .. } => "malformed",
        }
    }
}

/// Read model returned to callers inspecting a tenant's configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfigView {
    pub plan: PlanTier,
    pub overrides: Option<TenantScoringOverride>,
    pub effective_config: ScoringConfig,
}

/// Validates proposed overrides and layers stored overrides onto plan defaults.
pub struct ConfigResolver;

impl ConfigResolver {
    pub fn validate(
        proposed: TenantScoringOverride,
    ) -> Result<ValidatedOverride, ConfigValidationError> {
        if let Some(weights) = &proposed.category_weights {
            validate_weights(weights)?;
        }
        if let Some(thresholds) = &proposed.tier_thresholds {
            validate_thresholds(thresholds)?;
        }
        if let Some(skills) = &proposed.skills_policy {
            validate_skills(skills)?;
        }
        if let Some(nlp) = &proposed.nlp_policy {
            validate_nlp(nlp)?;
        }

        Ok(ValidatedOverride(proposed))
    }

    /// Pure merge of plan defaults and an override. Does not re-validate.
    pub fn resolve(plan: PlanTier, overrides: Option<&TenantScoringOverride>) -> ScoringConfig {
        let base = ScoringConfig::for_plan(plan);
        let Some(overrides) = overrides else {
            return base;
        };

        ScoringConfig {
            category_weights: merge_section(
                &base.category_weights,
                overrides.category_weights.as_ref(),
            ),
            tier_thresholds: merge_section(
                &base.tier_thresholds,
                overrides.tier_thresholds.as_ref(),
            ),
            skills_policy: merge_section(&base.skills_policy, overrides.skills_policy.as_ref()),
            bias_policy: merge_section(&base.bias_policy, overrides.bias_policy.as_ref()),
            nlp_policy: merge_section(&base.nlp_policy, overrides.nlp_policy.as_ref()),
        }
    }

    pub fn effective_view(
        plan: PlanTier,
        overrides: Option<&ValidatedOverride>,
    ) -> EffectiveConfigView {
        let overrides = overrides.map(ValidatedOverride::as_override);
        EffectiveConfigView {
            plan,
            overrides: overrides.cloned(),
            effective_config: Self::resolve(plan, overrides),
        }
    }
}

fn require(
    section: &'static str,
    field: &'static str,
    value: Option<f64>,
) -> Result<f64, ConfigValidationError> {
    let value = value.ok_or(ConfigValidationError::MissingField { section, field })?;
    if !value.is_finite() {
        return Err(ConfigValidationError::NonFinite { field });
    }
    Ok(value)
}

fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ConfigValidationError> {
    if !value.is_finite() {
        return Err(ConfigValidationError::NonFinite { field });
    }
    if value < min || value > max {
        return Err(ConfigValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn validate_weights(weights: &CategoryWeightsOverride) -> Result<(), ConfigValidationError> {
    let mut total = 0.0;
    for (field, value) in weights.entries() {
        let value = require("categoryWeights", field, value)?;
        check_range(field, value, 0.0, REQUIRED_WEIGHT_TOTAL)?;
        total += value;
    }

    if (total - REQUIRED_WEIGHT_TOTAL).abs() > WEIGHT_TOLERANCE {
        return Err(ConfigValidationError::WeightsSumMismatch { total });
    }
    Ok(())
}

fn validate_thresholds(thresholds: &TierThresholdsOverride) -> Result<(), ConfigValidationError> {
    let a = ThresholdPoint {
        name: "A",
        value: require("tierThresholds", "A", thresholds.a)?,
    };
    let b = ThresholdPoint {
        name: "B",
        value: require("tierThresholds", "B", thresholds.b)?,
    };
    let c = ThresholdPoint {
        name: "C",
        value: require("tierThresholds", "C", thresholds.c)?,
    };

    for (higher, lower) in [(a, b), (b, c)] {
        if higher.value <= lower.value {
            return Err(ConfigValidationError::ThresholdOrderViolation { higher, lower });
        }
    }

    if c.value < 0.0 {
        return Err(ConfigValidationError::OutOfRange {
            field: "C",
            value: c.value,
            min: 0.0,
            max: a.value,
        });
    }
    Ok(())
}

fn validate_skills(skills: &SkillsPolicyOverride) -> Result<(), ConfigValidationError> {
    if let Some(percent) = skills.must_have_skill_match_percent {
        check_range("mustHaveSkillMatchPercent", percent, 0.0, 100.0)?;
    }
    Ok(())
}

fn validate_nlp(nlp: &NlpPolicyOverride) -> Result<(), ConfigValidationError> {
    if let Some(boost) = nlp.max_semantic_boost {
        check_range("maxSemanticBoost", boost, 0.0, MAX_SEMANTIC_BOOST)?;
    }
    Ok(())
}
