//! mkdir command - Create an empty virtual directory
//!
//! Writes a zero-length folder-marker object at `root_prefix + name + "/"`.
//! Directories are a key-naming convention, not first-class objects; the
//! marker is what makes an otherwise-empty folder visible.

use clap::Args;

use bx_core::{batch, BatchRequest};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

use super::ConnectArgs;

/// Create an empty virtual directory
#[derive(Args, Debug)]
pub struct MkdirArgs {
    #[command(flatten)]
    pub conn: ConnectArgs,

    /// Name of the new folder
    pub name: String,
}

/// Execute the mkdir command
pub async fn execute(args: MkdirArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let session = match super::open_session(&args.conn, &formatter).await {
        Ok(session) => session,
        Err(code) => return code,
    };

    let request = BatchRequest::CreateFolder { name: args.name };
    let result = batch::run(&session, &request).await;

    let code = super::report_batch(&formatter, "Created", &result);
    super::refresh_listing(&session, &formatter).await;
    code
}
