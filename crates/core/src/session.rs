//! Object-store session
//!
//! A session owns the live connection: profile, bucket, normalized root
//! prefix, and the transport handle. All relative operations (list,
//! download, upload, delete, folder markers) resolve display keys against
//! the root prefix before touching the transport.
//!
//! State machine: `Disconnected -> Connecting -> Connected`. A connect
//! attempt always starts from `Disconnected` (the previous connection, if
//! any, is discarded before the attempt), and any connect-time failure
//! lands back in `Disconnected` with nothing retained. A failed refresh
//! leaves the session connected; only the returned listing is invalidated.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::prefix;
use crate::profiles::ProfileResolver;
use crate::traits::{Connect, ObjectStore};
use crate::types::Listing;

/// Connection lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
}

/// A live connection to one bucket under one root prefix
pub struct Connection {
    pub profile: String,
    pub bucket: String,
    /// Normalized: empty, or ending in `/`
    pub root_prefix: String,
    store: Box<dyn ObjectStore>,
}

/// Session over an object-store transport
pub struct Session<C: Connect> {
    connector: C,
    resolver: ProfileResolver,
    state: SessionState,
    conn: Option<Connection>,
}

impl<C: Connect> Session<C> {
    pub fn new(connector: C, resolver: ProfileResolver) -> Self {
        Self {
            connector,
            resolver,
            state: SessionState::Disconnected,
            conn: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == SessionState::Connected
    }

    /// Bucket of the current connection
    pub fn bucket(&self) -> Option<&str> {
        self.conn.as_ref().map(|c| c.bucket.as_str())
    }

    /// Normalized root prefix of the current connection
    pub fn root_prefix(&self) -> Option<&str> {
        self.conn.as_ref().map(|c| c.root_prefix.as_str())
    }

    /// Drop the current connection, if any
    pub fn disconnect(&mut self) {
        self.conn = None;
        self.state = SessionState::Disconnected;
    }

    /// Open a connection for a profile/bucket/prefix triple
    ///
    /// Validation order: non-empty bucket, then profile presence in the
    /// credentials file, then the transport connect (which resolves
    /// credentials and probes the bucket). The prefix is normalized on
    /// success.
    pub async fn connect(&mut self, profile: &str, bucket: &str, root_prefix: &str) -> Result<()> {
        self.disconnect();

        if bucket.is_empty() {
            return Err(Error::Validation("bucket name cannot be empty".into()));
        }

        let known = self.resolver.list();
        if known.is_empty() {
            return Err(Error::NoCredentials(
                "no AWS credentials file found; configure ~/.aws/credentials".into(),
            ));
        }
        if !known.iter().any(|p| p == profile) {
            return Err(Error::ProfileNotFound(profile.to_string()));
        }

        self.state = SessionState::Connecting;
        match self.connector.connect(profile, bucket).await {
            Ok(store) => {
                self.conn = Some(Connection {
                    profile: profile.to_string(),
                    bucket: bucket.to_string(),
                    root_prefix: prefix::normalize(root_prefix),
                    store,
                });
                self.state = SessionState::Connected;
                tracing::debug!(profile, bucket, "session connected");
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Disconnected;
                Err(e)
            }
        }
    }

    /// Fetch a fresh listing of the visible entries under the root prefix
    ///
    /// One listing call, one page. An `Ok` with zero entries means the
    /// prefix holds nothing visible; an `Err` means the call itself failed
    /// and any previously returned listing should no longer be shown as
    /// current.
    pub async fn list(&self) -> Result<Listing> {
        let conn = self.connection()?;
        let raw = conn
            .store
            .list_objects(&conn.bucket, &conn.root_prefix)
            .await?;
        Ok(Listing::from_raw(raw, &conn.root_prefix))
    }

    /// Download one object into a directory
    ///
    /// The target file is named after the display key's basename. The
    /// destination directory must already exist.
    pub async fn download(&self, display_key: &str, dest_dir: &Path) -> Result<PathBuf> {
        let conn = self.connection()?;
        let full_key = prefix::to_full(display_key, &conn.root_prefix);
        let target = dest_dir.join(prefix::basename(display_key));

        let data = conn.store.get_object(&conn.bucket, &full_key).await?;
        std::fs::write(&target, &data)
            .map_err(|e| Error::Transfer(format!("{}: {e}", target.display())))?;

        Ok(target)
    }

    /// Upload a local file to a display key, returning the full key
    pub async fn upload(&self, source: &Path, display_key: &str) -> Result<String> {
        let conn = self.connection()?;
        let full_key = prefix::to_full(display_key, &conn.root_prefix);

        let data = std::fs::read(source)
            .map_err(|e| Error::Transfer(format!("{}: {e}", source.display())))?;
        let content_type = mime_guess::from_path(source)
            .first()
            .map(|m| m.essence_str().to_string());

        conn.store
            .put_object(&conn.bucket, &full_key, data, content_type)
            .await?;

        Ok(full_key)
    }

    /// Delete one object by display key
    pub async fn delete(&self, display_key: &str) -> Result<()> {
        let conn = self.connection()?;
        let full_key = prefix::to_full(display_key, &conn.root_prefix);
        conn.store.delete_object(&conn.bucket, &full_key).await
    }

    /// Create an empty virtual directory
    ///
    /// Writes a zero-length object at `root_prefix + name + "/"`. This is a
    /// naming convention, not a first-class directory object.
    pub async fn create_folder_marker(&self, name: &str) -> Result<String> {
        let conn = self.connection()?;

        let name = name.trim_matches('/');
        if name.is_empty() {
            return Err(Error::Validation("folder name cannot be empty".into()));
        }

        let full_key = format!("{}{}/", conn.root_prefix, name);
        conn.store
            .put_object(&conn.bucket, &full_key, Vec::new(), None)
            .await?;

        Ok(full_key)
    }

    fn connection(&self) -> Result<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| Error::Connection("not connected".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockConnect, MockObjectStore};
    use crate::types::RawObject;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn resolver_with_profiles(profiles: &[&str]) -> (ProfileResolver, NamedTempFile) {
        let mut file = NamedTempFile::new().unwrap();
        for profile in profiles {
            writeln!(file, "[{profile}]").unwrap();
            writeln!(file, "aws_access_key_id = AKIATEST").unwrap();
        }
        (ProfileResolver::with_path(file.path()), file)
    }

    fn raw(key: &str, size: i64) -> RawObject {
        RawObject {
            key: key.to_string(),
            size_bytes: size,
            last_modified: None,
        }
    }

    #[tokio::test]
    async fn test_connect_unknown_profile() {
        let (resolver, _file) = resolver_with_profiles(&["default"]);
        let mut connector = MockConnect::new();
        connector.expect_connect().never();

        let mut session = Session::new(connector, resolver);
        let err = session
            .connect("unknownprofile", "bucket", "")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ProfileNotFound(_)));
        assert_eq!(session.state(), SessionState::Disconnected);
    }

    #[tokio::test]
    async fn test_connect_without_credentials_file() {
        let resolver = ProfileResolver::with_path("/nonexistent/credentials");
        let mut connector = MockConnect::new();
        connector.expect_connect().never();

        let mut session = Session::new(connector, resolver);
        let err = session.connect("default", "bucket", "").await.unwrap_err();

        assert!(matches!(err, Error::NoCredentials(_)));
        assert_eq!(session.state(), SessionState::Disconnected);
    }

    #[tokio::test]
    async fn test_connect_empty_bucket_fails_before_transport() {
        let (resolver, _file) = resolver_with_profiles(&["default"]);
        let mut connector = MockConnect::new();
        connector.expect_connect().never();

        let mut session = Session::new(connector, resolver);
        let err = session.connect("default", "", "logs/").await.unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(session.state(), SessionState::Disconnected);
    }

    #[tokio::test]
    async fn test_connect_normalizes_prefix() {
        let (resolver, _file) = resolver_with_profiles(&["default"]);
        let mut connector = MockConnect::new();
        connector
            .expect_connect()
            .return_once(|_, _| Ok(Box::new(MockObjectStore::new()) as Box<dyn ObjectStore>));

        let mut session = Session::new(connector, resolver);
        session.connect("default", "bucket", "logs").await.unwrap();

        assert!(session.is_connected());
        assert_eq!(session.root_prefix(), Some("logs/"));
        assert_eq!(session.bucket(), Some("bucket"));
    }

    #[tokio::test]
    async fn test_connect_failure_discards_previous_connection() {
        let (resolver, _file) = resolver_with_profiles(&["default"]);
        let mut connector = MockConnect::new();
        let mut seq = mockall::Sequence::new();
        connector
            .expect_connect()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(Box::new(MockObjectStore::new()) as Box<dyn ObjectStore>));
        connector
            .expect_connect()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(Error::Connection("endpoint unreachable".into())));

        let mut session = Session::new(connector, resolver);
        session.connect("default", "first", "").await.unwrap();
        assert!(session.is_connected());

        let err = session.connect("default", "second", "").await.unwrap_err();
        assert!(matches!(err, Error::Connection(_)));
        assert_eq!(session.state(), SessionState::Disconnected);
        assert_eq!(session.bucket(), None);
    }

    #[tokio::test]
    async fn test_list_maps_and_excludes_prefix_marker() {
        let (resolver, _file) = resolver_with_profiles(&["default"]);
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .withf(|bucket, prefix| bucket == "bucket" && prefix == "logs/")
            .returning(|_, _| Ok(vec![raw("logs/2024.txt", 12), raw("logs/", 0)]));

        let mut connector = MockConnect::new();
        connector
            .expect_connect()
            .return_once(move |_, _| Ok(Box::new(store) as Box<dyn ObjectStore>));

        let mut session = Session::new(connector, resolver);
        session.connect("default", "bucket", "logs/").await.unwrap();

        let listing = session.list().await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.entries[0].display_key, "2024.txt");
        assert_eq!(listing.entries[0].full_key, "logs/2024.txt");
    }

    #[tokio::test]
    async fn test_list_failure_leaves_session_connected() {
        let (resolver, _file) = resolver_with_profiles(&["default"]);
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .returning(|_, _| Err(Error::Listing("timeout".into())));

        let mut connector = MockConnect::new();
        connector
            .expect_connect()
            .return_once(move |_, _| Ok(Box::new(store) as Box<dyn ObjectStore>));

        let mut session = Session::new(connector, resolver);
        session.connect("default", "bucket", "").await.unwrap();

        let err = session.list().await.unwrap_err();
        assert!(matches!(err, Error::Listing(_)));
        assert!(session.is_connected());
    }

    #[tokio::test]
    async fn test_operations_require_connection() {
        let (resolver, _file) = resolver_with_profiles(&["default"]);
        let session = Session::new(MockConnect::new(), resolver);

        assert!(matches!(
            session.list().await.unwrap_err(),
            Error::Connection(_)
        ));
        assert!(matches!(
            session.delete("a.txt").await.unwrap_err(),
            Error::Connection(_)
        ));
    }

    #[tokio::test]
    async fn test_download_writes_basename_into_directory() {
        let (resolver, _file) = resolver_with_profiles(&["default"]);
        let mut store = MockObjectStore::new();
        store
            .expect_get_object()
            .withf(|_, key| key == "logs/reports/2024.txt")
            .returning(|_, _| Ok(b"hello".to_vec()));

        let mut connector = MockConnect::new();
        connector
            .expect_connect()
            .return_once(move |_, _| Ok(Box::new(store) as Box<dyn ObjectStore>));

        let mut session = Session::new(connector, resolver);
        session.connect("default", "bucket", "logs/").await.unwrap();

        let dest = TempDir::new().unwrap();
        let path = session
            .download("reports/2024.txt", dest.path())
            .await
            .unwrap();

        assert_eq!(path, dest.path().join("2024.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_download_does_not_create_directories() {
        let (resolver, _file) = resolver_with_profiles(&["default"]);
        let mut store = MockObjectStore::new();
        store
            .expect_get_object()
            .returning(|_, _| Ok(b"data".to_vec()));

        let mut connector = MockConnect::new();
        connector
            .expect_connect()
            .return_once(move |_, _| Ok(Box::new(store) as Box<dyn ObjectStore>));

        let mut session = Session::new(connector, resolver);
        session.connect("default", "bucket", "").await.unwrap();

        let dest = TempDir::new().unwrap();
        let missing = dest.path().join("does-not-exist");
        let err = session.download("a.txt", &missing).await.unwrap_err();
        assert!(matches!(err, Error::Transfer(_)));
    }

    #[tokio::test]
    async fn test_upload_resolves_full_key() {
        let (resolver, _file) = resolver_with_profiles(&["default"]);
        let mut store = MockObjectStore::new();
        store
            .expect_put_object()
            .withf(|_, key, data, _| key == "2024/report.txt" && data == b"content")
            .returning(|_, _, _, _| Ok(()));

        let mut connector = MockConnect::new();
        connector
            .expect_connect()
            .return_once(move |_, _| Ok(Box::new(store) as Box<dyn ObjectStore>));

        let mut session = Session::new(connector, resolver);
        session.connect("default", "bucket", "2024/").await.unwrap();

        let mut source = NamedTempFile::with_suffix(".txt").unwrap();
        source.write_all(b"content").unwrap();

        let full_key = session.upload(source.path(), "report.txt").await.unwrap();
        assert_eq!(full_key, "2024/report.txt");
    }

    #[tokio::test]
    async fn test_create_folder_marker_is_zero_length() {
        let (resolver, _file) = resolver_with_profiles(&["default"]);
        let mut store = MockObjectStore::new();
        store
            .expect_put_object()
            .withf(|_, key, data, _| key == "2024/archive/" && data.is_empty())
            .returning(|_, _, _, _| Ok(()));

        let mut connector = MockConnect::new();
        connector
            .expect_connect()
            .return_once(move |_, _| Ok(Box::new(store) as Box<dyn ObjectStore>));

        let mut session = Session::new(connector, resolver);
        session.connect("default", "bucket", "2024/").await.unwrap();

        let full_key = session.create_folder_marker("archive").await.unwrap();
        assert_eq!(full_key, "2024/archive/");
    }

    #[tokio::test]
    async fn test_create_folder_marker_rejects_empty_name() {
        let (resolver, _file) = resolver_with_profiles(&["default"]);
        let mut connector = MockConnect::new();
        connector
            .expect_connect()
            .return_once(|_, _| Ok(Box::new(MockObjectStore::new()) as Box<dyn ObjectStore>));

        let mut session = Session::new(connector, resolver);
        session.connect("default", "bucket", "").await.unwrap();

        let err = session.create_folder_marker("/").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
