//! bx-s3: S3 SDK adapter for the bx bucket explorer
//!
//! This crate implements the ObjectStore and Connect traits from bx-core
//! using aws-sdk-s3. It is the only crate that directly depends on the
//! AWS SDK; credentials are resolved from the shared config/credentials
//! files through the profile named at connect time.

pub mod client;

pub use client::{S3Connector, S3Store};
