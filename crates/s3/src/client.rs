//! S3 transport implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore and Connect traits from
//! bx-core.

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_credential_types::provider::ProvideCredentials;

use bx_core::{Connect, Error, ObjectStore, RawObject, Result};

/// Opens profile-backed S3 transports
///
/// Credentials come from the AWS shared config/credentials files via the
/// SDK's default provider chain, scoped to the named profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct S3Connector;

impl S3Connector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connect for S3Connector {
    async fn connect(&self, profile: &str, bucket: &str) -> Result<Box<dyn ObjectStore>> {
        let region = RegionProviderChain::default_provider().or_else("us-east-1");
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .profile_name(profile)
            .region(region)
            .load()
            .await;

        // Probe credential resolution up front so a bad profile surfaces as
        // an auth failure at connect time, not on the first request.
        let provider = config
            .credentials_provider()
            .ok_or_else(|| Error::NoCredentials("no credentials provider configured".into()))?;
        provider
            .provide_credentials()
            .await
            .map_err(|e| Error::NoCredentials(e.to_string()))?;

        // Path-style addressing for compatibility with S3-compatible servers
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();

        let store = S3Store {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        };

        if !store.bucket_exists(bucket).await? {
            return Err(Error::Connection(format!("bucket not found: {bucket}")));
        }

        tracing::debug!(profile, bucket, "S3 transport ready");
        Ok(Box::new(store))
    }
}

/// S3 client wrapper
pub struct S3Store {
    inner: aws_sdk_s3::Client,
}

impl S3Store {
    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self.inner.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                let err_str = e.to_string();
                if is_not_found(&err_str) {
                    Ok(false)
                } else {
                    Err(Error::Connection(err_str))
                }
            }
        }
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<RawObject>> {
        let mut request = self.inner.list_objects_v2().bucket(bucket);
        if !prefix.is_empty() {
            request = request.prefix(prefix);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Listing(e.to_string()))?;

        // Single-page listing: entries beyond the first page are not fetched.
        if response.is_truncated().unwrap_or(false) {
            tracing::warn!(
                bucket,
                prefix,
                "listing truncated; entries beyond the first page are not shown"
            );
        }

        let objects = response
            .contents()
            .iter()
            .map(|object| RawObject {
                key: object.key().unwrap_or_default().to_string(),
                size_bytes: object.size().unwrap_or(0),
                last_modified: object
                    .last_modified()
                    .and_then(|modified| jiff::Timestamp::from_second(modified.secs()).ok()),
            })
            .collect();

        Ok(objects)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let response = self
            .inner
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if is_not_found(&err_str) {
                    Error::Transfer(format!("object not found: {key}"))
                } else {
                    Error::Transfer(err_str)
                }
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| Error::Transfer(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(data)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<()> {
        let body = aws_sdk_s3::primitives::ByteStream::from(data);

        let mut request = self.inner.put_object().bucket(bucket).key(key).body(body);

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        request
            .send()
            .await
            .map_err(|e| Error::Transfer(e.to_string()))?;

        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.inner
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if is_not_found(&err_str) {
                    Error::Delete(format!("object not found: {key}"))
                } else {
                    Error::Delete(err_str)
                }
            })?;

        Ok(())
    }
}

fn is_not_found(err_str: &str) -> bool {
    err_str.contains("NotFound") || err_str.contains("NoSuchKey") || err_str.contains("NoSuchBucket")
}
