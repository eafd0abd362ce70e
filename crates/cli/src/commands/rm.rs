//! rm command - Remove objects
//!
//! Deletes the named objects after confirmation. A failed delete leaves the
//! remaining items running; the failed key stays in the bucket and shows up
//! again on the post-batch refresh.

use clap::Args;

use bx_core::{batch, BatchRequest};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig, Spinner};

use super::ConnectArgs;

/// Remove objects
#[derive(Args, Debug)]
pub struct RmArgs {
    #[command(flatten)]
    pub conn: ConnectArgs,

    /// Display keys of the objects to remove
    #[arg(required = true)]
    pub keys: Vec<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

/// Execute the rm command
pub async fn execute(args: RmArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config.clone());

    if !args.force {
        for key in &args.keys {
            formatter.println(key);
        }
        let confirmed = formatter.confirm(&format!(
            "Delete {} object(s) from '{}'?",
            args.keys.len(),
            args.conn.bucket
        ));
        if !confirmed {
            formatter.warning("Aborted.");
            return ExitCode::Success;
        }
    }

    let session = match super::open_session(&args.conn, &formatter).await {
        Ok(session) => session,
        Err(code) => return code,
    };

    let request = BatchRequest::Delete { keys: args.keys };

    let spinner = Spinner::new(&output_config, "Deleting...");
    let result = batch::run(&session, &request).await;
    spinner.finish_and_clear();

    let code = super::report_batch(&formatter, "Removed", &result);
    super::refresh_listing(&session, &formatter).await;
    code
}
