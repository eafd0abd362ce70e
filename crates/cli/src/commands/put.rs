//! put command - Upload files and directories
//!
//! Files upload under their own names; a directory argument uploads its
//! whole tree with the directory name as the leading key segment. After
//! the batch, the listing is refreshed to reflect the new remote state.

use std::path::PathBuf;

use clap::Args;

use bx_core::{batch, BatchRequest, UploadSource};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

use super::ConnectArgs;

/// Upload files or directories
#[derive(Args, Debug)]
pub struct PutArgs {
    #[command(flatten)]
    pub conn: ConnectArgs,

    /// Local files or directories to upload
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Execute the put command
pub async fn execute(args: PutArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    let mut sources = Vec::new();
    for path in &args.paths {
        if path.is_dir() {
            match UploadSource::from_dir(path) {
                Ok(expanded) => sources.extend(expanded),
                Err(e) => {
                    formatter.error(&format!("Failed to read {}: {e}", path.display()));
                    return ExitCode::GeneralError;
                }
            }
        } else {
            // Unreadable paths surface as per-item failures in the result.
            sources.push(UploadSource::from_file(path));
        }
    }

    if sources.is_empty() {
        formatter.warning("Nothing to upload.");
        return ExitCode::Success;
    }
    tracing::debug!(count = sources.len(), "upload sources collected");

    let session = match super::open_session(&args.conn, &formatter).await {
        Ok(session) => session,
        Err(code) => return code,
    };

    let request = BatchRequest::Upload { sources };

    let spinner = Spinner::new(&output_config, "Uploading...");
    let result = batch::run(&session, &request).await;
    spinner.finish_and_clear();

    let code = super::report_batch(&formatter, "Uploaded", &result);
    super::refresh_listing(&session, &formatter).await;
    code
}
