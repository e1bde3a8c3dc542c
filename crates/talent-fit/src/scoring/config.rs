use serde::{Deserialize, Serialize};

use super::domain::{Category, PlanTier};
use super::resolver::ConfigValidationError;

/// Relative importance of each scoring category. Valid weights sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWeights {
    pub core_competencies: f64,
    pub experience_quality: f64,
    pub education: f64,
    pub achievements: f64,
    pub cultural_fit: f64,
}

impl CategoryWeights {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::CoreCompetencies => self.core_competencies,
            Category::ExperienceQuality => self.experience_quality,
            Category::Education => self.education,
            Category::Achievements => self.achievements,
            Category::CulturalFit => self.cultural_fit,
        }
    }

    pub fn total(&self) -> f64 {
        Category::ALL.iter().map(|category| self.get(*category)).sum()
    }
}

/// Lower-inclusive cut points for tiers A, B and C; everything below C is D.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "C")]
    pub c: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsPolicy {
    pub must_have_skill_match_percent: f64,
    pub treat_missing_must_have_as_red_flag: bool,
}

/// `anonymize_during_review` is a display flag and never changes the score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiasPolicy {
    pub anonymize_during_review: bool,
    pub cap_education_weight: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NlpPolicy {
    pub enable_semantic_boost: bool,
    pub max_semantic_boost: f64,
}

/// Fully populated scoring configuration the engine reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub category_weights: CategoryWeights,
    pub tier_thresholds: TierThresholds,
    pub skills_policy: SkillsPolicy,
    pub bias_policy: BiasPolicy,
    pub nlp_policy: NlpPolicy,
}

impl ScoringConfig {
    /// Built-in defaults for a plan. Every plan default satisfies the validation rules.
    pub fn for_plan(plan: PlanTier) -> Self {
        let category_weights = CategoryWeights {
            core_competencies: 30.0,
            experience_quality: 25.0,
            education: 15.0,
            achievements: 15.0,
            cultural_fit: 15.0,
        };
        let tier_thresholds = TierThresholds {
            a: 80.0,
            b: 65.0,
            c: 50.0,
        };
        let skills_policy = SkillsPolicy {
            must_have_skill_match_percent: 70.0,
            treat_missing_must_have_as_red_flag: true,
        };

        let (bias_policy, nlp_policy) = match plan {
            PlanTier::Free => (
                BiasPolicy {
                    anonymize_during_review: false,
                    cap_education_weight: false,
                },
                NlpPolicy {
                    enable_semantic_boost: false,
                    max_semantic_boost: 0.0,
                },
            ),
            PlanTier::Pro => (
                BiasPolicy {
                    anonymize_during_review: false,
                    cap_education_weight: false,
                },
                NlpPolicy {
                    enable_semantic_boost: true,
                    max_semantic_boost: 10.0,
                },
            ),
            PlanTier::Enterprise => (
                BiasPolicy {
                    anonymize_during_review: true,
                    cap_education_weight: true,
                },
                NlpPolicy {
                    enable_semantic_boost: true,
                    max_semantic_boost: 15.0,
                },
            ),
        };

        Self {
            category_weights,
            tier_thresholds,
            skills_policy,
            bias_policy,
            nlp_policy,
        }
    }
}

/// A partial override stored per tenant. Unset sections and fields fall back to the
/// plan default for that section or field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TenantScoringOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_weights: Option<CategoryWeightsOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier_thresholds: Option<TierThresholdsOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_policy: Option<SkillsPolicyOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias_policy: Option<BiasPolicyOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nlp_policy: Option<NlpPolicyOverride>,
}

impl TenantScoringOverride {
    /// Decode a raw override payload. Non-numeric values, unknown keys and wrong
    /// shapes are reported as [`ConfigValidationError::Malformed`].
    pub fn from_json(value: serde_json::Value) -> Result<Self, ConfigValidationError> {
        serde_json::from_value(value).map_err(|err| ConfigValidationError::Malformed {
            reason: err.to_string(),
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigValidationError> {
        serde_json::from_str(raw).map_err(|err| ConfigValidationError::Malformed {
            reason: err.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryWeightsOverride {
    pub core_competencies: Option<f64>,
    pub experience_quality: Option<f64>,
    pub education: Option<f64>,
    pub achievements: Option<f64>,
    pub cultural_fit: Option<f64>,
}

impl CategoryWeightsOverride {
    pub(crate) fn entries(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("coreCompetencies", self.core_competencies),
            ("experienceQuality", self.experience_quality),
            ("education", self.education),
            ("achievements", self.achievements),
            ("culturalFit", self.cultural_fit),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierThresholdsOverride {
    #[serde(rename = "A")]
    pub a: Option<f64>,
    #[serde(rename = "B")]
    pub b: Option<f64>,
    #[serde(rename = "C")]
    pub c: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SkillsPolicyOverride {
    pub must_have_skill_match_percent: Option<f64>,
    pub treat_missing_must_have_as_red_flag: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BiasPolicyOverride {
    pub anonymize_during_review: Option<bool>,
    pub cap_education_weight: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NlpPolicyOverride {
    pub enable_semantic_boost: Option<bool>,
    pub max_semantic_boost: Option<f64>,
}

/// A partial section that can be layered onto its fully populated counterpart.
pub trait SectionOverride {
    type Section: Copy;

    fn overlay(&self, base: &Self::Section) -> Self::Section;
}

/// The single merge step used for every section: an absent patch keeps the base.
pub(crate) fn merge_section<O: SectionOverride>(
    base: &O::Section,
    patch: Option<&O>,
) -> O::Section {
    match patch {
        Some(patch) => patch.overlay(base),
        None => *base,
    }
}

impl SectionOverride for CategoryWeightsOverride {
    type Section = CategoryWeights;

    fn overlay(&self, base: &CategoryWeights) -> CategoryWeights {
        CategoryWeights {
            core_competencies: self.core_competencies.unwrap_or(base.core_competencies),
            experience_quality: self.experience_quality.unwrap_or(base.experience_quality),
            education: self.education.unwrap_or(base.education),
            achievements: self.achievements.unwrap_or(base.achievements),
            cultural_fit: self.cultural_fit.unwrap_or(base.cultural_fit),
        }
    }
}

impl SectionOverride for TierThresholdsOverride {
    type Section = TierThresholds;

    fn overlay(&self, base: &TierThresholds) -> TierThresholds {
        TierThresholds {
            a: self.a.unwrap_or(base.a),
            b: self.b.unwrap_or(base.b),
            c: self.c.unwrap_or(base.c),
        }
    }
}

impl SectionOverride for SkillsPolicyOverride {
    type Section = SkillsPolicy;

    fn overlay(&self, base: &SkillsPolicy) -> SkillsPolicy {
        SkillsPolicy {
            must_have_skill_match_percent: self
                .must_have_skill_match_percent
                .unwrap_or(base.must_have_skill_match_percent),
            treat_missing_must_have_as_red_flag: self
                .treat_missing_must_have_as_red_flag
                .unwrap_or(base.treat_missing_must_have_as_red_flag),
        }
    }
}

impl SectionOverride for BiasPolicyOverride {
    type Section = BiasPolicy;

    fn overlay(&self, base: &BiasPolicy) -> BiasPolicy {
        BiasPolicy {
            anonymize_during_review: self
                .anonymize_during_review
                .unwrap_or(base.anonymize_during_review),
            cap_education_weight: self
                .cap_education_weight
                .unwrap_or(base.cap_education_weight),
        }
    }
}

impl SectionOverride for NlpPolicyOverride {
    type Section = NlpPolicy;

    fn overlay(&self, base: &NlpPolicy) -> NlpPolicy {
        NlpPolicy {
            enable_semantic_boost: self
                .enable_semantic_boost
                .unwrap_or(base.enable_semantic_boost),
            max_semantic_boost: self.max_semantic_boost.unwrap_or(base.max_semantic_boost),
        }
    }
}
