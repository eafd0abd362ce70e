//! Batch operation engine
//!
//! Drives N independent per-item operations against a session, recording
//! each outcome instead of aborting on the first failure. Items run
//! sequentially; the caller blocks until the whole batch has been
//! attempted and receives one aggregate result. The engine never
//! refreshes the listing itself.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::session::Session;
use crate::traits::Connect;

/// A local file paired with its destination display key
#[derive(Debug, Clone)]
pub struct UploadSource {
    pub path: PathBuf,
    pub key: String,
}

impl UploadSource {
    /// Upload a single file under its own name
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let key = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, key }
    }

    /// Expand a directory into per-file sources
    ///
    /// Keys are `<dir-name>/<relative-path>` with `/` separators, so the
    /// directory uploads with its structure preserved.
    pub fn from_dir(dir: &Path) -> std::io::Result<Vec<UploadSource>> {
        fn walk(
            current: &Path,
            base: &Path,
            dir_name: &str,
            out: &mut Vec<UploadSource>,
        ) -> std::io::Result<()> {
            for entry in std::fs::read_dir(current)? {
                let path = entry?.path();
                if path.is_dir() {
                    walk(&path, base, dir_name, out)?;
                } else if path.is_file() {
                    let relative = path.strip_prefix(base).unwrap_or(&path);
                    let relative = relative.to_string_lossy().replace('\\', "/");
                    out.push(UploadSource {
                        key: format!("{dir_name}/{relative}"),
                        path,
                    });
                }
            }
            Ok(())
        }

        let dir_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut sources = Vec::new();
        walk(dir, dir, &dir_name, &mut sources)?;
        Ok(sources)
    }
}

/// One batch of same-kind operations over a selection of items
#[derive(Debug, Clone)]
pub enum BatchRequest {
    /// Fetch objects into a local directory
    Download { keys: Vec<String>, dest_dir: PathBuf },
    /// Store local files at their destination keys
    Upload { sources: Vec<UploadSource> },
    /// Remove objects by display key
    Delete { keys: Vec<String> },
    /// Write one empty virtual-directory marker
    CreateFolder { name: String },
}

impl BatchRequest {
    /// The item identities this request names
    ///
    /// Display keys for download/delete, local paths for upload, the folder
    /// name for create-folder. Every identity appears in exactly one side
    /// of the returned [`BatchResult`].
    pub fn items(&self) -> Vec<String> {
        match self {
            BatchRequest::Download { keys, .. } | BatchRequest::Delete { keys } => keys.clone(),
            BatchRequest::Upload { sources } => sources
                .iter()
                .map(|s| s.path.display().to_string())
                .collect(),
            BatchRequest::CreateFolder { name } => vec![name.clone()],
        }
    }

    pub fn len(&self) -> usize {
        match self {
            BatchRequest::Download { keys, .. } | BatchRequest::Delete { keys } => keys.len(),
            BatchRequest::Upload { sources } => sources.len(),
            BatchRequest::CreateFolder { .. } => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Aggregate outcome of a batch
///
/// Successes keep request order with a human-readable detail per item;
/// failures map item to error message. Together they partition the
/// request's items.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub successes: Vec<(String, String)>,
    pub failures: BTreeMap<String, String>,
}

impl BatchResult {
    fn success(&mut self, item: impl Into<String>, detail: impl Into<String>) {
        self.successes.push((item.into(), detail.into()));
    }

    fn failure(&mut self, item: impl Into<String>, message: impl Into<String>) {
        self.failures.insert(item.into(), message.into());
    }

    /// Total number of items attempted
    pub fn len(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.successes.is_empty() && self.failures.is_empty()
    }

    /// True when no item failed
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run every item of a request against the session
///
/// Per-item failures are recovered locally: they are recorded under the
/// item's identity and the remaining items still run. Session state is
/// never changed here.
pub async fn run<C: Connect>(session: &Session<C>, request: &BatchRequest) -> BatchResult {
    let mut result = BatchResult::default();

    match request {
        BatchRequest::Download { keys, dest_dir } => {
            for key in keys {
                match session.download(key, dest_dir).await {
                    Ok(path) => result.success(key, format!("{key} -> {}", path.display())),
                    Err(e) => {
                        tracing::warn!(item = %key, error = %e, "download failed");
                        result.failure(key, e.to_string());
                    }
                }
            }
        }
        BatchRequest::Upload { sources } => {
            let bucket = session.bucket().unwrap_or_default().to_string();
            for source in sources {
                let item = source.path.display().to_string();
                match session.upload(&source.path, &source.key).await {
                    Ok(full_key) => {
                        result.success(&item, format!("{item} -> s3://{bucket}/{full_key}"));
                    }
                    Err(e) => {
                        tracing::warn!(item = %item, error = %e, "upload failed");
                        result.failure(item, e.to_string());
                    }
                }
            }
        }
        BatchRequest::Delete { keys } => {
            for key in keys {
                match session.delete(key).await {
                    Ok(()) => result.success(key, "removed"),
                    Err(e) => {
                        tracing::warn!(item = %key, error = %e, "delete failed");
                        result.failure(key, e.to_string());
                    }
                }
            }
        }
        BatchRequest::CreateFolder { name } => match session.create_folder_marker(name).await {
            Ok(full_key) => result.success(name, full_key),
            Err(e) => {
                tracing::warn!(item = %name, error = %e, "create folder failed");
                result.failure(name, e.to_string());
            }
        },
    }

    result
}
