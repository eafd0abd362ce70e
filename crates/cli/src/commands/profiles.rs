//! profiles command - List AWS profiles
//!
//! Enumerates the named sections of the AWS shared credentials file. An
//! absent credentials file is reported as an empty list, not an error.

use serde::Serialize;

use bx_core::ProfileResolver;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

#[derive(Debug, Serialize)]
struct ProfilesOutput {
    profiles: Vec<String>,
}

/// Execute the profiles command
pub async fn execute(output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let resolver = ProfileResolver::new().default_profile(super::default_profile());
    let profiles = resolver.list();

    if formatter.is_json() {
        formatter.json(&ProfilesOutput { profiles });
    } else if profiles.is_empty() {
        formatter.println("No profiles found. Configure ~/.aws/credentials.");
    } else {
        for profile in &profiles {
            formatter.println(profile);
        }
    }

    ExitCode::Success
}
