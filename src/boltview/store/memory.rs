use super::{check_bucket_name, check_key, check_put, KvStore};
use crate::error::{BoltError, Result};
use crate::model::{Bucket, Entry, PutMode};
use std::collections::BTreeMap;

type Entries = BTreeMap<Vec<u8>, Vec<u8>>;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    buckets: BTreeMap<String, Entries>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn to_bucket(name: &str, entries: &Entries) -> Bucket {
        Bucket {
            name: name.to_string(),
            entries: entries
                .iter()
                .map(|(k, v)| Entry::new(k.clone(), v.clone()))
                .collect(),
        }
    }
}

impl KvStore for InMemoryStore {
    fn buckets(&self) -> Result<Vec<Bucket>> {
        Ok(self
            .buckets
            .iter()
            .map(|(name, entries)| Self::to_bucket(name, entries))
            .collect())
    }

    fn bucket(&self, name: &str) -> Result<Option<Bucket>> {
        Ok(self
            .buckets
            .get(name)
            .map(|entries| Self::to_bucket(name, entries)))
    }

    fn get(&self, bucket: &str, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.buckets.get(bucket).and_then(|b| b.get(key).cloned()))
    }

    fn create_bucket(&mut self, name: &str) -> Result<()> {
        check_bucket_name(name)?;
        if self.buckets.contains_key(name) {
            return Err(BoltError::BucketExists(name.to_string()));
        }
        self.buckets.insert(name.to_string(), Entries::new());
        Ok(())
    }

    fn delete_bucket(&mut self, name: &str) -> Result<()> {
        match self.buckets.get(name) {
            None => Ok(()),
            Some(entries) if !entries.is_empty() => {
                Err(BoltError::BucketNotEmpty(name.to_string()))
            }
            Some(_) => {
                self.buckets.remove(name);
                Ok(())
            }
        }
    }

    fn put_entry(&mut self, bucket: &str, key: &[u8], value: &[u8], mode: PutMode) -> Result<()> {
        check_bucket_name(bucket)?;
        check_key(key)?;
        let entries = self.buckets.entry(bucket.to_string()).or_default();
        check_put(bucket, key, entries.get(key).map(Vec::as_slice), mode)?;
        entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete_entry(&mut self, bucket: &str, key: &[u8]) -> Result<()> {
        check_bucket_name(bucket)?;
        self.buckets
            .entry(bucket.to_string())
            .or_default()
            .remove(key);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_bucket(mut self, name: &str) -> Self {
            self.store.create_bucket(name).unwrap();
            self
        }

        pub fn with_entry(mut self, bucket: &str, key: &str, value: &str) -> Self {
            self.store
                .put_entry(bucket, key.as_bytes(), value.as_bytes(), PutMode::Overwrite)
                .unwrap();
            self
        }

        /// A small store with one populated bucket and one empty bucket.
        pub fn sample() -> Self {
            Self::new()
                .with_entry("users", "alice", "admin")
                .with_entry("users", "bob", "viewer")
                .with_bucket("sessions")
        }
    }
}
