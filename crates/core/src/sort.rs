//! Listing sort engine
//!
//! Column-typed, toggling sort over a listing snapshot. The per-column
//! direction lives here, keyed by column, rather than in any widget or
//! rendering state: sorting a column uses its remembered direction and then
//! flips it for the next call, while other columns keep theirs.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

use crate::types::{Listing, ObjectEntry};

/// A sortable listing column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    /// Display key, case-insensitive
    Name,
    /// Size in bytes, numeric
    Size,
    /// Last-modified timestamp
    Modified,
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortColumn::Name),
            "size" => Ok(SortColumn::Size),
            "modified" => Ok(SortColumn::Modified),
            other => Err(format!(
                "unknown sort column '{other}' (expected name, size, or modified)"
            )),
        }
    }
}

impl std::fmt::Display for SortColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortColumn::Name => "name",
            SortColumn::Size => "size",
            SortColumn::Modified => "modified",
        };
        write!(f, "{name}")
    }
}

/// Stateful sort engine with one remembered direction per column
#[derive(Debug, Default)]
pub struct SortEngine {
    directions: HashMap<SortColumn, bool>,
}

impl SortEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction the next `sort` call will use for a column
    ///
    /// `false` is ascending; columns start ascending.
    pub fn next_direction(&self, column: SortColumn) -> bool {
        self.directions.get(&column).copied().unwrap_or(false)
    }

    /// Prime a column's direction explicitly
    pub fn set_direction(&mut self, column: SortColumn, reverse: bool) {
        self.directions.insert(column, reverse);
    }

    /// Sort a listing by a column, toggling that column's direction
    ///
    /// Stable in both directions: descending compares swapped operands, so
    /// entries with equal keys keep their input order either way.
    pub fn sort(&mut self, listing: &Listing, column: SortColumn) -> Listing {
        let reverse = self.next_direction(column);

        let mut entries = listing.entries.clone();
        if reverse {
            entries.sort_by(|a, b| compare(b, a, column));
        } else {
            entries.sort_by(|a, b| compare(a, b, column));
        }

        self.directions.insert(column, !reverse);
        Listing { entries }
    }
}

fn compare(a: &ObjectEntry, b: &ObjectEntry, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Size => a.size_bytes.cmp(&b.size_bytes),
        SortColumn::Modified => a.modified_text().cmp(&b.modified_text()),
        SortColumn::Name => a
            .display_key
            .to_lowercase()
            .cmp(&b.display_key.to_lowercase()),
    }
}
