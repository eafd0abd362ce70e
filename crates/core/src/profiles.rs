//! AWS profile enumeration
//!
//! Profiles are the named sections of the AWS shared credentials file
//! (`~/.aws/credentials`). Only section names are read here; credential
//! material is resolved later by the transport when a session connects.

use std::path::{Path, PathBuf};

/// Resolves the profile names available in the shared credentials file
#[derive(Debug, Clone)]
pub struct ProfileResolver {
    credentials_path: Option<PathBuf>,
    default_profile: String,
}

impl ProfileResolver {
    /// Create a resolver for the standard credentials file location
    ///
    /// Honors AWS_SHARED_CREDENTIALS_FILE, falling back to ~/.aws/credentials.
    pub fn new() -> Self {
        let credentials_path = std::env::var_os("AWS_SHARED_CREDENTIALS_FILE")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".aws").join("credentials")));

        Self {
            credentials_path,
            default_profile: "default".to_string(),
        }
    }

    /// Create a resolver reading a specific file (useful for testing)
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: Some(path.into()),
            default_profile: "default".to_string(),
        }
    }

    /// Override the profile name pinned to the front of the listing
    pub fn default_profile(mut self, name: impl Into<String>) -> Self {
        self.default_profile = name.into();
        self
    }

    /// List available profile names
    ///
    /// Deduplicated and sorted, with the default profile first when present.
    /// A missing or unreadable credentials file yields an empty list, never
    /// an error.
    pub fn list(&self) -> Vec<String> {
        let Some(path) = &self.credentials_path else {
            return Vec::new();
        };

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "credentials file not readable");
                return Vec::new();
            }
        };

        let mut profiles = parse_section_names(&content);
        profiles.sort();
        profiles.dedup();

        if let Some(pos) = profiles.iter().position(|p| *p == self.default_profile) {
            let default = profiles.remove(pos);
            profiles.insert(0, default);
        }

        profiles
    }

    /// Check whether a profile name appears in the credentials file
    pub fn exists(&self, name: &str) -> bool {
        self.list().iter().any(|p| p == name)
    }

    /// Path of the credentials file this resolver reads, if one was found
    pub fn credentials_path(&self) -> Option<&Path> {
        self.credentials_path.as_deref()
    }
}

impl Default for ProfileResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract `[section]` names from INI-style content
///
/// Lines that are not well-formed section headers are skipped; the
/// credentials file's key material is never inspected.
fn parse_section_names(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let inner = line.strip_prefix('[')?.strip_suffix(']')?;
            let inner = inner.trim();
            if inner.is_empty() {
                None
            } else {
                Some(inner.to_string())
            }
        })
        .collect()
}
