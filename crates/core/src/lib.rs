//! bx-core: Core library for the bx bucket explorer
//!
//! This crate provides the storage-facing core of bx, including:
//! - Configuration management
//! - AWS profile enumeration
//! - Virtual-directory key mapping over a root prefix
//! - Listing sort engine
//! - The object-store session and batch-operation engine
//!
//! This crate is independent of any specific S3 SDK; the transport is
//! supplied through the `ObjectStore`/`Connect` traits, which keeps the
//! session and batch engine testable without a server.

pub mod batch;
pub mod config;
pub mod error;
pub mod prefix;
pub mod profiles;
pub mod session;
pub mod sort;
pub mod traits;
pub mod types;

pub use batch::{BatchRequest, BatchResult, UploadSource};
pub use config::{Config, ConfigManager};
pub use error::{Error, Result};
pub use profiles::ProfileResolver;
pub use session::{Session, SessionState};
pub use sort::{SortColumn, SortEngine};
pub use traits::{Connect, ObjectStore};
pub use types::{Listing, ObjectEntry, RawObject};
