//! Storage transport traits
//!
//! These traits decouple the session and batch engine from the specific S3
//! SDK. The bx-s3 crate provides the real implementations; tests mock them.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::RawObject;

/// Object-store primitives consumed by a session
///
/// Implementations are scoped to one connection; the bucket is passed per
/// call so the trait stays free of connection state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Check that a bucket exists and is reachable
    async fn bucket_exists(&self, bucket: &str) -> Result<bool>;

    /// List objects under a prefix
    ///
    /// Issues exactly one listing call; entries beyond the first page are
    /// not fetched.
    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<RawObject>>;

    /// Fetch an object's content
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Store bytes at a key
    ///
    /// An empty body is valid and is how folder markers are written.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<()>;

    /// Delete a single object by key
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;
}

/// Builds a transport for a profile/bucket pair
///
/// Credential resolution and connect-time reachability validation happen
/// here; the session only sees the outcome.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Connect: Send + Sync {
    /// Resolve credentials for the profile and open a validated transport
    async fn connect(&self, profile: &str, bucket: &str) -> Result<Box<dyn ObjectStore>>;
}
