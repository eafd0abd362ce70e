//! Listing data types
//!
//! `RawObject` is what the transport reports for one key; `ObjectEntry` is
//! the prefix-mapped view handed to callers; `Listing` is one wholesale
//! snapshot of the visible entries, rebuilt on every refresh.

use serde::{Deserialize, Serialize};

use crate::prefix;

/// An object as returned by the storage transport, before prefix mapping
#[derive(Debug, Clone)]
pub struct RawObject {
    /// Full object key within the bucket
    pub key: String,

    /// Size in bytes
    pub size_bytes: i64,

    /// Last modified timestamp
    pub last_modified: Option<jiff::Timestamp>,
}

/// One visible entry of a prefix-scoped listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectEntry {
    /// Key relative to the session's root prefix (never empty)
    pub display_key: String,

    /// Full key stored remotely: root prefix + display key
    pub full_key: String,

    /// Size in bytes (non-negative)
    pub size_bytes: i64,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<jiff::Timestamp>,
}

impl ObjectEntry {
    /// Human-readable size
    pub fn size_human(&self) -> String {
        humansize::format_size(self.size_bytes.max(0) as u64, humansize::BINARY)
    }

    /// Fixed-width textual timestamp
    ///
    /// Zero-padded `%Y-%m-%d %H:%M:%S`, so byte order equals chronological
    /// order. Empty when the transport reported no timestamp.
    pub fn modified_text(&self) -> String {
        self.last_modified
            .map(|ts| ts.strftime("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default()
    }
}

/// An ordered snapshot of the visible entries under the session's prefix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Visible entries, in the order the transport returned them
    pub entries: Vec<ObjectEntry>,
}

impl Listing {
    /// Build a listing from raw transport objects
    ///
    /// Keys outside the (normalized) root prefix and the prefix-marker
    /// object itself are excluded.
    pub fn from_raw(raw: Vec<RawObject>, root_prefix: &str) -> Self {
        let entries = raw
            .into_iter()
            .filter_map(|obj| {
                let display_key = prefix::to_display(&obj.key, root_prefix)?.to_string();
                Some(ObjectEntry {
                    display_key,
                    full_key: obj.key,
                    size_bytes: obj.size_bytes,
                    last_modified: obj.last_modified,
                })
            })
            .collect();

        Self { entries }
    }

    /// Number of visible entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the prefix exists but holds no visible entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries
    pub fn iter(&self) -> std::slice::Iter<'_, ObjectEntry> {
        self.entries.iter()
    }
}
