mod categories;
mod policy;

pub use categories::{
    AchievementScorer, CategoryScore, CategoryScorer, CulturalFitScorer, EducationScorer,
    ExperienceScorer, SkillOverlapScorer,
};
pub use policy::EDUCATION_WEIGHT_CAP;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::config::ScoringConfig;
use super::domain::{CandidateProfile, Category, CategoryContribution, JobRequirements, ScoringEvent};
use super::tier::{classify, top_tier_ceiling};

/// Identifier recorded on every event produced by this algorithm version.
pub const ENGINE_ID: &str = "fit-scorer-v1";

/// Inputs were structurally incomplete; callers record the candidate as unscored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringUnavailable {
    #[error("candidate has no skill list")]
    MissingCandidateSkills,
}

/// Stateless weighted scorer. Holds one sub-scorer per category.
pub struct FitScorer {
    scorers: BTreeMap<Category, Box<dyn CategoryScorer>>,
}

impl FitScorer {
    /// Built-in heuristics; open-ended roles are measured up to `as_of`.
    pub fn standard(as_of: NaiveDate) -> Self {
        let scorers: Vec<Box<dyn CategoryScorer>> = vec![
            Box::new(SkillOverlapScorer),
            Box::new(ExperienceScorer::new(as_of)),
            Box::new(EducationScorer),
            Box::new(AchievementScorer),
            Box::new(CulturalFitScorer),
        ];

        Self {
            scorers: scorers
                .into_iter()
                .map(|scorer| (scorer.category(), scorer))
                .collect(),
        }
    }

    /// Replace the sub-scorer registered for the scorer's category.
    pub fn with_scorer(mut self, scorer: Box<dyn CategoryScorer>) -> Self {
        self.scorers.insert(scorer.category(), scorer);
        self
    }

    pub fn score(
        &self,
        candidate: &CandidateProfile,
        job: &JobRequirements,
        config: &ScoringConfig,
        semantic_similarity: Option<f64>,
    ) -> Result<ScoringEvent, ScoringUnavailable> {
        let candidate_skills = candidate
            .skills
            .as_deref()
            .ok_or(ScoringUnavailable::MissingCandidateSkills)?;
        let must_have = job.must_have_skills.as_slice();

        let weights = policy::effective_weights(
            &config.category_weights,
            config.bias_policy.cap_education_weight,
        );

        let mut base = 0.0;
        let mut breakdown = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let CategoryScore { score, rationale } = match self.scorers.get(&category) {
                Some(scorer) => scorer.score(candidate, job),
                None => CategoryScore {
                    score: 0.0,
                    rationale: "not scored".to_string(),
                },
            };
            let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 100.0) };
            let weight = weights.get(category);

            base += weight / 100.0 * score;
            breakdown.push(CategoryContribution {
                category,
                score,
                weight,
                rationale,
            });
        }

        let coverage = policy::must_have_coverage(candidate_skills, must_have);
        let gated = policy::gate_trips(&config.skills_policy, coverage);
        let boost = policy::semantic_boost(&config.nlp_policy, semantic_similarity);

        let mut score = (base + f64::from(boost)).round().clamp(0.0, 100.0) as u8;
        if gated {
            score = score.min(top_tier_ceiling(&config.tier_thresholds));
        }
        let tier = classify(f64::from(score), &config.tier_thresholds);

        let mut reasons: Vec<String> = breakdown
            .iter()
            .map(|entry| format!("{}: {}", entry.category.label(), entry.rationale))
            .collect();
        if gated {
            reasons.push(format!(
                "must-have coverage {:.0}% below required {:.0}%, top tier withheld",
                coverage, config.skills_policy.must_have_skill_match_percent
            ));
        }
        if boost > 0 {
            reasons.push(format!("semantic similarity +{boost}"));
        }

        Ok(ScoringEvent {
            score,
            tier,
            reason: reasons.join("; "),
            engine: ENGINE_ID.to_string(),
            breakdown,
            must_have_coverage: coverage,
            semantic_boost: boost,
            anonymized: config.bias_policy.anonymize_during_review,
        })
    }
}
