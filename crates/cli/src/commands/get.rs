//! get command - Download objects
//!
//! Downloads the named objects into a local directory, one file per display
//! key basename. Individual failures do not stop the batch; every item is
//! reported on its own.

use std::path::PathBuf;

use clap::Args;

use bx_core::{batch, BatchRequest};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

use super::ConnectArgs;

/// Download objects
#[derive(Args, Debug)]
pub struct GetArgs {
    #[command(flatten)]
    pub conn: ConnectArgs,

    /// Display keys of the objects to download
    #[arg(required = true)]
    pub keys: Vec<String>,

    /// Destination directory (must already exist)
    #[arg(short, long, default_value = ".")]
    pub dest: PathBuf,
}

/// Execute the get command
pub async fn execute(args: GetArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    if !args.dest.is_dir() {
        formatter.error(&format!(
            "Destination is not a directory: {}",
            args.dest.display()
        ));
        return ExitCode::UsageError;
    }

    let session = match super::open_session(&args.conn, &formatter).await {
        Ok(session) => session,
        Err(code) => return code,
    };

    let request = BatchRequest::Download {
        keys: args.keys,
        dest_dir: args.dest,
    };

    let spinner = Spinner::new(&output_config, "Downloading...");
    let result = batch::run(&session, &request).await;
    spinner.finish_and_clear();

    super::report_batch(&formatter, "Downloaded", &result)
}
