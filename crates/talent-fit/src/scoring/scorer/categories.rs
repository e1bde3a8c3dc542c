use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::super::domain::{term_key, CandidateProfile, Category, JobRequirements};

/// Sub-score for one category, in `[0, 100]`, with a short rationale.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub score: f64,
    pub rationale: String,
}

/// Pluggable per-category heuristic. Implementations must stay pure.
pub trait CategoryScorer: Send + Sync {
    fn category(&self) -> Category;
    fn score(&self, candidate: &CandidateProfile, job: &JobRequirements) -> CategoryScore;
}

fn candidate_skill_keys(candidate: &CandidateProfile) -> BTreeSet<String> {
    candidate
        .skills
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|skill| term_key(skill))
        .filter(|key| !key.is_empty())
        .collect()
}

fn key_set(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .map(|value| term_key(value))
        .filter(|key| !key.is_empty())
        .collect()
}

/// Coverage of the job's declared skills; must-haves count double.
pub struct SkillOverlapScorer;

impl CategoryScorer for SkillOverlapScorer {
    fn category(&self) -> Category {
        Category::CoreCompetencies
    }

    fn score(&self, candidate: &CandidateProfile, job: &JobRequirements) -> CategoryScore {
        let held = candidate_skill_keys(candidate);
        let must = key_set(&job.must_have_skills);
        let nice: BTreeSet<String> = key_set(&job.nice_to_have_skills)
            .into_iter()
            .filter(|skill| !must.contains(skill))
            .collect();

        let possible = must.len() * 2 + nice.len();
        if possible == 0 {
            return CategoryScore {
                score: 70.0,
                rationale: "job lists no skills".to_string(),
            };
        }

        let matched_must = must.intersection(&held).count();
        let matched_nice = nice.intersection(&held).count();
        let earned = matched_must * 2 + matched_nice;

        CategoryScore {
            score: earned as f64 / possible as f64 * 100.0,
            rationale: format!(
                "{} of {} listed skills matched",
                matched_must + matched_nice,
                must.len() + nice.len()
            ),
        }
    }
}

/// Tenure against the required years plus a bonus for related past titles.
pub struct ExperienceScorer {
    as_of: NaiveDate,
}

impl ExperienceScorer {
    pub fn new(as_of: NaiveDate) -> Self {
        Self { as_of }
    }

    fn years(&self, candidate: &CandidateProfile) -> f64 {
        candidate
            .experience
            .iter()
            .map(|entry| {
                let end = entry.ended_on.unwrap_or(self.as_of);
                (end - entry.started_on).num_days().max(0) as f64 / 365.25
            })
            .sum()
    }
}

fn title_words(title: &str) -> BTreeSet<String> {
    title
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| word.chars().count() > 2)
        .map(str::to_lowercase)
        .collect()
}

impl CategoryScorer for ExperienceScorer {
    fn category(&self) -> Category {
        Category::ExperienceQuality
    }

    fn score(&self, candidate: &CandidateProfile, job: &JobRequirements) -> CategoryScore {
        let years = self.years(candidate);
        let required = job.min_years_experience.max(0.0);
        let tenure = if required > 0.0 {
            (years / required).min(1.0) * 80.0
        } else {
            80.0
        };

        let wanted = title_words(&job.title);
        let relevant = candidate
            .experience
            .iter()
            .any(|entry| !title_words(&entry.title).is_disjoint(&wanted));
        let bonus = if relevant { 20.0 } else { 0.0 };

        let mut rationale = format!("{years:.1} years against {required:.1} required");
        if relevant {
            rationale.push_str(", related titles");
        }

        CategoryScore {
            score: tenure + bonus,
            rationale,
        }
    }
}

/// Highest completed level against the job's required level.
pub struct EducationScorer;

impl CategoryScorer for EducationScorer {
    fn category(&self) -> Category {
        Category::Education
    }

    fn score(&self, candidate: &CandidateProfile, job: &JobRequirements) -> CategoryScore {
        let highest = candidate.education.iter().map(|record| record.level).max();

        let (score, rationale) = match (job.required_education, highest) {
            (None, Some(level)) => (100.0, format!("{level:?} held, none required")),
            (None, None) => (70.0, "no education listed, none required".to_string()),
            (Some(required), Some(level)) if level >= required => {
                (100.0, format!("{level:?} meets {required:?}"))
            }
            (Some(required), Some(level)) if level.rank() + 1 == required.rank() => {
                (60.0, format!("{level:?} one level below {required:?}"))
            }
            (Some(required), Some(level)) => {
                (30.0, format!("{level:?} below required {required:?}"))
            }
            (Some(required), None) => (30.0, format!("no education listed, {required:?} required")),
        };

        CategoryScore { score, rationale }
    }
}

/// Achievement count, with quantified results weighted higher.
pub struct AchievementScorer;

impl CategoryScorer for AchievementScorer {
    fn category(&self) -> Category {
        Category::Achievements
    }

    fn score(&self, candidate: &CandidateProfile, _job: &JobRequirements) -> CategoryScore {
        if candidate.achievements.is_empty() {
            return CategoryScore {
                score: 0.0,
                rationale: "no achievements listed".to_string(),
            };
        }

        let quantified = candidate
            .achievements
            .iter()
            .filter(|achievement| achievement.quantified)
            .count();
        let plain = candidate.achievements.len() - quantified;
        let score = (quantified as f64 * 30.0 + plain as f64 * 20.0).min(100.0);

        CategoryScore {
            score,
            rationale: format!(
                "{} achievement(s), {} quantified",
                candidate.achievements.len(),
                quantified
            ),
        }
    }
}

/// Shared values with the job's culture keywords plus location compatibility.
pub struct CulturalFitScorer;

impl CulturalFitScorer {
    fn location_compatible(candidate: &CandidateProfile, job: &JobRequirements) -> bool {
        if job.remote_friendly && candidate.open_to_remote {
            return true;
        }
        match (&job.location, &candidate.location) {
            (None, _) => true,
            (Some(wanted), Some(actual)) => term_key(wanted) == term_key(actual),
            (Some(_), None) => false,
        }
    }
}

impl CategoryScorer for CulturalFitScorer {
    fn category(&self) -> Category {
        Category::CulturalFit
    }

    fn score(&self, candidate: &CandidateProfile, job: &JobRequirements) -> CategoryScore {
        let keywords = key_set(&job.culture_keywords);
        let values = key_set(&candidate.values);

        let (overlap, overlap_note) = if keywords.is_empty() {
            (20.0, "no culture keywords".to_string())
        } else {
            let shared = keywords.intersection(&values).count();
            (
                shared as f64 / keywords.len() as f64 * 40.0,
                format!("{} of {} culture keywords shared", shared, keywords.len()),
            )
        };

        let compatible = Self::location_compatible(candidate, job);
        let location = if compatible { 20.0 } else { 0.0 };
        let location_note = if compatible {
            "location compatible"
        } else {
            "location mismatch"
        };

        CategoryScore {
            score: 40.0 + overlap + location,
            rationale: format!("{overlap_note}, {location_note}"),
        }
    }
}
