use crate::infra::{parse_date, parse_plan, InMemoryConfigStore, InMemoryEventStore};
use crate::routes::tier_badge;
use chrono::NaiveDate;
use clap::Args;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use talent_fit::error::AppError;
use talent_fit::scoring::{
    ConfigResolver, PlanTier, ScoreOutcome, ScoreRequest, ScoringEvent, ScoringService,
    ScoringServiceError, TenantId, TenantScoringOverride, ValidatedOverride,
};
use talent_fit::search::{load_rows, parse, SearchRow};

const CLI_TENANT: &str = "cli";

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding `candidate`, `job` and optional `semanticSimilarity`
    pub(crate) input: PathBuf,
    /// Plan whose defaults apply (defaults to FIT_DEFAULT_PLAN)
    #[arg(long, value_parser = parse_plan)]
    pub(crate) plan: Option<PlanTier>,
    /// Optional tenant override JSON file layered onto the plan defaults
    #[arg(long = "override")]
    pub(crate) override_path: Option<PathBuf>,
    /// Evaluation date for open-ended roles (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Print the scoring event as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// CSV export with a header row; an `id` column is used when present
    pub(crate) csv: PathBuf,
    /// Search query, e.g. `stage:interview "backend engineer" -contract`
    pub(crate) query: String,
}

#[derive(Args, Debug)]
pub(crate) struct ConfigValidateArgs {
    /// Override JSON file to validate
    pub(crate) path: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct ConfigShowArgs {
    /// Plan whose defaults apply (defaults to FIT_DEFAULT_PLAN)
    #[arg(long, value_parser = parse_plan)]
    pub(crate) plan: Option<PlanTier>,
    /// Optional tenant override JSON file layered onto the plan defaults
    #[arg(long = "override")]
    pub(crate) override_path: Option<PathBuf>,
}

fn read_override(path: &Path) -> Result<ValidatedOverride, AppError> {
    let raw = fs::read_to_string(path)?;
    let proposed = TenantScoringOverride::from_json_str(&raw)?;
    Ok(ConfigResolver::validate(proposed)?)
}

fn read_optional_override(path: Option<&Path>) -> Result<Option<ValidatedOverride>, AppError> {
    path.map(read_override).transpose()
}

pub(crate) fn score_with_plan(
    request: ScoreRequest,
    plan: PlanTier,
    overrides: Option<ValidatedOverride>,
) -> Result<ScoreOutcome, AppError> {
    let tenant = TenantId(CLI_TENANT.to_string());
    let configs = InMemoryConfigStore::default();
    configs
        .seed(tenant.clone(), plan, overrides)
        .map_err(ScoringServiceError::from)?;

    let service = ScoringService::new(
        Arc::new(configs),
        Arc::new(InMemoryEventStore::default()),
        plan,
    );
    Ok(service.score(&tenant, request)?)
}

pub(crate) fn filter_rows<R: Read>(reader: R, query: &str) -> Result<Vec<SearchRow>, AppError> {
    let rows = load_rows(reader)?;
    let query = parse(query);
    Ok(query.filter(&rows).cloned().collect())
}

pub(crate) fn run_score(args: ScoreArgs, default_plan: PlanTier) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        plan,
        override_path,
        as_of,
        json,
    } = args;

    let plan = plan.unwrap_or(default_plan);
    let overrides = read_optional_override(override_path.as_deref())?;
    let mut request: ScoreRequest = serde_json::from_str(&fs::read_to_string(&input)?)?;
    if as_of.is_some() {
        request.as_of = as_of;
    }
    let candidate_id = request.candidate.candidate_id.clone();
    let job_id = request.job.job_id.clone();

    match score_with_plan(request, plan, overrides)? {
        ScoreOutcome::Scored(event) if json => {
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        ScoreOutcome::Scored(event) => render_event(&candidate_id, &job_id, plan, &event),
        ScoreOutcome::Unscored(reason) => {
            println!("Candidate {candidate_id} for job {job_id}: not scored ({reason})");
        }
    }

    Ok(())
}

fn render_event(candidate_id: &str, job_id: &str, plan: PlanTier, event: &ScoringEvent) {
    let badge = tier_badge(event.tier);
    println!("Candidate {candidate_id} for job {job_id} ({} plan)", plan.label());
    println!(
        "Score {} | Tier {} [{}] {}",
        event.score, badge.label, badge.colour, badge.description
    );
    println!("Engine {}", event.engine);

    println!("\nCategory breakdown");
    for entry in &event.breakdown {
        println!(
            "- {}: {:.0} (weight {:.1}) {}",
            entry.category.label(),
            entry.score,
            entry.weight,
            entry.rationale
        );
    }

    println!("\nMust-have coverage: {:.0}%", event.must_have_coverage);
    if event.semantic_boost > 0 {
        println!("Semantic boost: +{}", event.semantic_boost);
    }
    if event.anonymized {
        println!("Anonymized review: identifying details hidden from reviewers");
    }
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let SearchArgs { csv, query } = args;

    let matches = filter_rows(fs::File::open(&csv)?, &query)?;
    if matches.is_empty() {
        println!("No rows match '{query}'");
        return Ok(());
    }

    println!("{} row(s) match '{query}'", matches.len());
    for row in &matches {
        let name = row.fields().get("name").map(String::as_str).unwrap_or("-");
        let job = row.fields().get("job").map(String::as_str).unwrap_or("-");
        println!("- {} {} ({})", row.id, name, job);
    }

    Ok(())
}

pub(crate) fn run_config_validate(args: ConfigValidateArgs) -> Result<(), AppError> {
    let validated = read_override(&args.path)?;
    if validated.as_override().is_empty() {
        println!("{}: valid (no sections, plan defaults apply)", args.path.display());
    } else {
        println!("{}: valid", args.path.display());
    }
    Ok(())
}

pub(crate) fn run_config_show(
    args: ConfigShowArgs,
    default_plan: PlanTier,
) -> Result<(), AppError> {
    let plan = args.plan.unwrap_or(default_plan);
    let overrides = read_optional_override(args.override_path.as_deref())?;
    let view = ConfigResolver::effective_view(plan, overrides.as_ref());
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
