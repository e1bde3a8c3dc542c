//! Tenant-configurable candidate to job fit scoring.
//!
//! The write path validates a proposed [`TenantScoringOverride`] through
//! [`ConfigResolver::validate`] before a [`ConfigStore`] persists it. The read path resolves
//! the stored override onto the plan default and hands the result to [`FitScorer`], whose
//! score is bucketed by [`classify`].

pub mod config;
pub mod domain;
pub mod repository;
pub mod resolver;
pub mod router;
pub mod scorer;
pub mod service;
mod tier;

#[cfg(test)]
mod tests;

pub use config::{
    BiasPolicy, BiasPolicyOverride, CategoryWeights, CategoryWeightsOverride, NlpPolicy,
    NlpPolicyOverride, ScoringConfig, SectionOverride, SkillsPolicy, SkillsPolicyOverride,
    TenantScoringOverride, TierThresholds, TierThresholdsOverride,
};
pub use domain::{
    Achievement, CandidateProfile, Category, CategoryContribution, EducationLevel,
    EducationRecord, ExperienceEntry, JobRequirements, PlanTier, ScoringEvent, TenantId, Tier,
};
pub use repository::{
    ConfigStore, ScoredCandidate, ScoringEventStore, StoreError, StoredScoringConfig,
};
pub use resolver::{
    ConfigResolver, ConfigValidationError, EffectiveConfigView, ThresholdPoint, ValidatedOverride,
};
pub use router::scoring_router;
pub use scorer::{CategoryScore, CategoryScorer, FitScorer, ScoringUnavailable, ENGINE_ID};
pub use service::{ScoreOutcome, ScoreRequest, ScoringService, ScoringServiceError};
pub use tier::classify;
