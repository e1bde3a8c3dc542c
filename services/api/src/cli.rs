use crate::commands::{
    run_config_show, run_config_validate, run_score, run_search, ConfigShowArgs,
    ConfigValidateArgs, ScoreArgs, SearchArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use talent_fit::config::AppConfig;
use talent_fit::error::AppError;
use talent_fit::scoring::PlanTier;
use talent_fit::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Talent Fit",
    about = "Score candidates against job requirements and search candidate lists",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a candidate and job pair read from a JSON file
    Score(ScoreArgs),
    /// Filter candidate rows from a CSV export with a search query
    Search(SearchArgs),
    /// Inspect and validate tenant scoring overrides
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate an override JSON file without storing it
    Validate(ConfigValidateArgs),
    /// Print the effective configuration for a plan and optional override
    Show(ConfigShowArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

/// Load configuration and stderr logging for one-shot commands; yields the default plan.
fn command_context() -> Result<PlanTier, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_stderr(&config.telemetry)?;
    Ok(config.scoring.default_plan)
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args, command_context()?),
        Command::Search(args) => {
            command_context()?;
            run_search(args)
        }
        Command::Config {
            command: ConfigCommand::Validate(args),
        } => {
            command_context()?;
            run_config_validate(args)
        }
        Command::Config {
            command: ConfigCommand::Show(args),
        } => run_config_show(args, command_context()?),
    }
}
