use std::collections::BTreeSet;

use super::super::config::{CategoryWeights, NlpPolicy, SkillsPolicy};
use super::super::domain::term_key;

/// Maximum weight education may carry while the bias policy caps it.
pub const EDUCATION_WEIGHT_CAP: f64 = 10.0;

/// Weights actually used for combination. With the education cap enabled, any weight
/// above [`EDUCATION_WEIGHT_CAP`] moves to the other four categories in proportion to
/// their configured weights, or evenly when they are all zero. The total is preserved.
pub(crate) fn effective_weights(weights: &CategoryWeights, cap_education: bool) -> CategoryWeights {
    if !cap_education || weights.education <= EDUCATION_WEIGHT_CAP {
        return *weights;
    }

    let excess = weights.education - EDUCATION_WEIGHT_CAP;
    let others = [
        weights.core_competencies,
        weights.experience_quality,
        weights.achievements,
        weights.cultural_fit,
    ];
    let others_total: f64 = others.iter().sum();
    let share = |weight: f64| {
        if others_total > 0.0 {
            weight + excess * weight / others_total
        } else {
            weight + excess / others.len() as f64
        }
    };

    CategoryWeights {
        core_competencies: share(weights.core_competencies),
        experience_quality: share(weights.experience_quality),
        education: EDUCATION_WEIGHT_CAP,
        achievements: share(weights.achievements),
        cultural_fit: share(weights.cultural_fit),
    }
}

/// Percentage of the job's must-have skills the candidate lists; 100 when the job
/// declares none.
pub(crate) fn must_have_coverage(candidate_skills: &[String], must_have: &[String]) -> f64 {
    let required: BTreeSet<String> = must_have
        .iter()
        .map(|skill| term_key(skill))
        .filter(|key| !key.is_empty())
        .collect();
    if required.is_empty() {
        return 100.0;
    }

    let held: BTreeSet<String> = candidate_skills.iter().map(|skill| term_key(skill)).collect();
    let matched = required.intersection(&held).count();
    matched as f64 / required.len() as f64 * 100.0
}

pub(crate) fn gate_trips(policy: &SkillsPolicy, coverage: f64) -> bool {
    policy.treat_missing_must_have_as_red_flag && coverage < policy.must_have_skill_match_percent
}

/// Whole points added for semantic similarity. Similarity is clamped to `[0, 1]`;
/// a missing or NaN similarity adds nothing.
pub(crate) fn semantic_boost(policy: &NlpPolicy, similarity: Option<f64>) -> u8 {
    if !policy.enable_semantic_boost {
        return 0;
    }
    match similarity {
        Some(similarity) if !similarity.is_nan() => {
            let max = policy.max_semantic_boost.clamp(0.0, 100.0);
            (similarity.clamp(0.0, 1.0) * max).round() as u8
        }
        _ => 0,
    }
}
