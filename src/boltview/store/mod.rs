//! # Storage Layer
//!
//! The [`KvStore`] trait is the whole surface boltview needs from an embedded
//! bucketed key-value store: list everything, read one key, and the four
//! mutations the editor can trigger.
//!
//! ## Implementations
//!
//! - [`db::RedbStore`]: the production store, a single redb file where each
//!   bucket is a table of byte keys to byte values. Every call runs in its own
//!   transaction, so a failed mutation leaves the file untouched.
//!
//! - [`memory::InMemoryStore`]: same semantics over `BTreeMap`s, for tests.
//!
//! ## Semantics shared by all stores
//!
//! - Listings come back in byte order of bucket name, then of key.
//! - `create_bucket` refuses an existing bucket.
//! - `delete_bucket` ignores a missing bucket and refuses a non-empty one.
//! - `put_entry` creates its bucket on demand. In [`PutMode::CreateOnly`] a key
//!   that already holds a non-empty value is a conflict.
//! - `delete_entry` creates its bucket on demand and ignores a missing key.

use crate::error::{BoltError, Result};
use crate::model::{Bucket, PutMode};

pub mod db;
pub mod memory;

pub trait KvStore {
    /// All buckets with their entries.
    fn buckets(&self) -> Result<Vec<Bucket>>;

    /// A single bucket, or `None` if it does not exist.
    fn bucket(&self, name: &str) -> Result<Option<Bucket>>;

    fn get(&self, bucket: &str, key: &[u8]) -> Result<Option<Vec<u8>>>;

    fn create_bucket(&mut self, name: &str) -> Result<()>;

    fn delete_bucket(&mut self, name: &str) -> Result<()>;

    fn put_entry(&mut self, bucket: &str, key: &[u8], value: &[u8], mode: PutMode) -> Result<()>;

    fn delete_entry(&mut self, bucket: &str, key: &[u8]) -> Result<()>;
}

pub(crate) fn check_bucket_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(BoltError::InvalidName("bucket name is empty".to_string()));
    }
    Ok(())
}

pub(crate) fn check_key(key: &[u8]) -> Result<()> {
    if key.is_empty() {
        return Err(BoltError::InvalidName("key is empty".to_string()));
    }
    Ok(())
}

/// Whether `put_entry` in `mode` may replace `existing`.
pub(crate) fn check_put(
    bucket: &str,
    key: &[u8],
    existing: Option<&[u8]>,
    mode: PutMode,
) -> Result<()> {
    match (mode, existing) {
        (PutMode::CreateOnly, Some(value)) if !value.is_empty() => Err(BoltError::KeyExists {
            bucket: bucket.to_string(),
            key: String::from_utf8_lossy(key).into_owned(),
        }),
        _ => Ok(()),
    }
}
