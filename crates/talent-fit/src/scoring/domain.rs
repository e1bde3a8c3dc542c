use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for the tenant owning a scoring configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TenantId(pub String);

/// Subscription plan selecting the built-in default scoring configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Free,
    Pro,
    Enterprise,
}

impl PlanTier {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Some(Self::Free),
            "pro" => Some(Self::Pro),
            "enterprise" => Some(Self::Enterprise),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Pro => "pro",
            PlanTier::Enterprise => "enterprise",
        }
    }
}

/// The five weighted scoring categories, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    CoreCompetencies,
    ExperienceQuality,
    Education,
    Achievements,
    CulturalFit,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::CoreCompetencies,
        Category::ExperienceQuality,
        Category::Education,
        Category::Achievements,
        Category::CulturalFit,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Category::CoreCompetencies => "core competencies",
            Category::ExperienceQuality => "experience",
            Category::Education => "education",
            Category::Achievements => "achievements",
            Category::CulturalFit => "cultural fit",
        }
    }
}

/// Discrete fit bucket, A best and D worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    A,
    B,
    C,
    D,
}

impl Tier {
    pub const fn label(self) -> &'static str {
        match self {
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
        }
    }
}

/// Ordered education levels; comparisons follow declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    Secondary,
    Certificate,
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

impl EducationLevel {
    pub(crate) const fn rank(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationRecord {
    pub level: EducationLevel,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    pub started_on: NaiveDate,
    #[serde(default)]
    pub ended_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub summary: String,
    #[serde(default)]
    pub quantified: bool,
}

/// Read-only candidate snapshot supplied by the surrounding platform.
///
/// `skills` is `None` when the record carries no skill list at all, which makes the
/// candidate unscorable rather than a zero-skill match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub candidate_id: String,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub education: Vec<EducationRecord>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub open_to_remote: bool,
}

/// Read-only job requirements supplied by the surrounding platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequirements {
    pub job_id: String,
    pub title: String,
    #[serde(default)]
    pub must_have_skills: Vec<String>,
    #[serde(default)]
    pub nice_to_have_skills: Vec<String>,
    #[serde(default)]
    pub min_years_experience: f64,
    #[serde(default)]
    pub required_education: Option<EducationLevel>,
    #[serde(default)]
    pub culture_keywords: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub remote_friendly: bool,
    #[serde(default)]
    pub requirements_text: String,
}

/// Weighted share a single category contributed to the final score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryContribution {
    pub category: Category,
    pub score: f64,
    pub weight: f64,
    pub rationale: String,
}

/// Immutable scorer output; the caller persists and timestamps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringEvent {
    pub score: u8,
    pub tier: Tier,
    pub reason: String,
    pub engine: String,
    pub breakdown: Vec<CategoryContribution>,
    pub must_have_coverage: f64,
    pub semantic_boost: u8,
    pub anonymized: bool,
}

/// Case and whitespace insensitive key used to compare skills and keywords.
pub(crate) fn term_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
