//! ls command - List objects under the root prefix
//!
//! Connects, fetches one listing page, optionally sorts it, and renders a
//! three-column table (or JSON). An empty listing is reported as such, not
//! as an error.

use clap::Args;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

use bx_core::{Listing, ObjectEntry, SortColumn, SortEngine};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

use super::ConnectArgs;

/// List objects
#[derive(Args, Debug)]
pub struct LsArgs {
    #[command(flatten)]
    pub conn: ConnectArgs,

    /// Sort by column: name, size, or modified
    #[arg(long)]
    pub sort: Option<SortColumn>,

    /// Sort descending
    #[arg(short, long)]
    pub reverse: bool,
}

#[derive(Debug, Serialize)]
struct LsOutput {
    entries: Vec<ObjectEntry>,
    total: usize,
}

/// Execute the ls command
pub async fn execute(args: LsArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let session = match super::open_session(&args.conn, &formatter).await {
        Ok(session) => session,
        Err(code) => return code,
    };

    let listing = match session.list().await {
        Ok(listing) => listing,
        Err(e) => {
            formatter.error(&format!("Failed to list objects: {e}"));
            return ExitCode::from(&e);
        }
    };

    let listing = match args.sort {
        Some(column) => {
            let mut engine = SortEngine::new();
            engine.set_direction(column, args.reverse);
            engine.sort(&listing, column)
        }
        None => listing,
    };

    if formatter.is_json() {
        let output = LsOutput {
            total: listing.len(),
            entries: listing.entries,
        };
        formatter.json(&output);
    } else if listing.is_empty() {
        formatter.println("Bucket is empty.");
    } else {
        formatter.println(&render_table(&listing).to_string());
    }

    ExitCode::Success
}

fn render_table(listing: &Listing) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Name", "Size", "Last Modified"]);

    for entry in listing.iter() {
        table.add_row(vec![
            Cell::new(&entry.display_key),
            Cell::new(entry.size_human()).set_alignment(CellAlignment::Right),
            Cell::new(entry.modified_text()),
        ]);
    }

    table
}
