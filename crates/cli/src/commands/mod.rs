//! CLI command definitions and execution
//!
//! Every remote command opens a fresh session from the shared connection
//! arguments, runs its work through the session or batch engine, and maps
//! the outcome to output and an exit code. All storage logic lives in
//! bx-core; this layer only collects input and renders results.

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use bx_core::{BatchResult, ConfigManager, ProfileResolver, Session};
use bx_s3::S3Connector;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod completions;
mod get;
mod ls;
mod mkdir;
mod profiles;
mod put;
mod rm;

/// bx - S3 bucket explorer
///
/// Browse, transfer, and delete objects in an S3 bucket presented as a
/// virtual directory rooted at a key prefix.
#[derive(Parser, Debug)]
#[command(name = "bx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Disable progress indication
    #[arg(long, global = true, default_value = "false")]
    pub no_progress: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List AWS profiles found in the credentials file
    Profiles,

    /// List objects under the root prefix
    Ls(ls::LsArgs),

    /// Download objects into a local directory
    Get(get::GetArgs),

    /// Upload local files or directories
    Put(put::PutArgs),

    /// Remove objects
    Rm(rm::RmArgs),

    /// Create an empty virtual directory
    Mkdir(mkdir::MkdirArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        no_progress: cli.no_progress,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Profiles => profiles::execute(output_config).await,
        Commands::Ls(args) => ls::execute(args, output_config).await,
        Commands::Get(args) => get::execute(args, output_config).await,
        Commands::Put(args) => put::execute(args, output_config).await,
        Commands::Rm(args) => rm::execute(args, output_config).await,
        Commands::Mkdir(args) => mkdir::execute(args, output_config).await,
        Commands::Completions(args) => completions::execute(args),
    }
}

/// Connection arguments shared by all remote commands
#[derive(Args, Debug)]
pub struct ConnectArgs {
    /// Bucket name
    pub bucket: String,

    /// AWS profile (defaults to the configured default profile)
    #[arg(long)]
    pub profile: Option<String>,

    /// Key prefix presented as the root directory
    #[arg(long, default_value = "")]
    pub prefix: String,
}

impl ConnectArgs {
    /// Profile to connect with: the flag, or the configured default
    pub fn profile_name(&self) -> String {
        if let Some(profile) = &self.profile {
            return profile.clone();
        }
        default_profile()
    }
}

/// Default profile name from the config file
pub(crate) fn default_profile() -> String {
    ConfigManager::new()
        .and_then(|manager| manager.load())
        .map(|config| config.defaults.default_profile)
        .unwrap_or_else(|_| "default".to_string())
}

/// Open a connected session or report the failure
pub(crate) async fn open_session(
    args: &ConnectArgs,
    formatter: &Formatter,
) -> Result<Session<S3Connector>, ExitCode> {
    let profile = args.profile_name();
    let mut session = Session::new(S3Connector::new(), ProfileResolver::new());

    if let Err(e) = session.connect(&profile, &args.bucket, &args.prefix).await {
        formatter.error(&format!("Failed to connect: {e}"));
        return Err(ExitCode::from(&e));
    }

    Ok(session)
}

/// JSON shape of an aggregate batch outcome
#[derive(Debug, Serialize)]
pub(crate) struct BatchOutput {
    status: &'static str,
    successes: Vec<BatchItemOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<BatchFailureOutput>,
    total: usize,
}

#[derive(Debug, Serialize)]
struct BatchItemOutput {
    item: String,
    detail: String,
}

#[derive(Debug, Serialize)]
struct BatchFailureOutput {
    item: String,
    error: String,
}

impl From<&BatchResult> for BatchOutput {
    fn from(result: &BatchResult) -> Self {
        Self {
            status: if result.all_succeeded() {
                "success"
            } else if result.successes.is_empty() {
                "failed"
            } else {
                "partial"
            },
            successes: result
                .successes
                .iter()
                .map(|(item, detail)| BatchItemOutput {
                    item: item.clone(),
                    detail: detail.clone(),
                })
                .collect(),
            failures: result
                .failures
                .iter()
                .map(|(item, error)| BatchFailureOutput {
                    item: item.clone(),
                    error: error.clone(),
                })
                .collect(),
            total: result.len(),
        }
    }
}

/// Render a batch outcome and pick the exit code
pub(crate) fn report_batch(formatter: &Formatter, verb: &str, result: &BatchResult) -> ExitCode {
    if formatter.is_json() {
        formatter.json(&BatchOutput::from(result));
    } else {
        for (_, detail) in &result.successes {
            formatter.println(detail);
        }
        for (item, error) in &result.failures {
            formatter.error(&format!("{item}: {error}"));
        }

        if result.failures.is_empty() {
            formatter.success(&format!("{verb} {} object(s).", result.successes.len()));
        } else {
            formatter.warning(&format!(
                "Completed with errors: {} succeeded, {} failed",
                result.successes.len(),
                result.failures.len()
            ));
        }
    }

    if result.all_succeeded() {
        ExitCode::Success
    } else {
        ExitCode::GeneralError
    }
}

/// Re-list after a mutation and report the visible object count
pub(crate) async fn refresh_listing(session: &Session<S3Connector>, formatter: &Formatter) {
    match session.list().await {
        Ok(listing) => {
            if !formatter.is_json() {
                formatter.println(&format!("{} object(s) now visible.", listing.len()));
            }
        }
        Err(e) => formatter.warning(&format!("Failed to refresh listing: {e}")),
    }
}
