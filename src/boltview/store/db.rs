use super::{check_bucket_name, check_key, check_put, KvStore};
use crate::error::{BoltError, Result};
use crate::model::{Bucket, Entry, PutMode};
use redb::{
    Database, ReadableTable, ReadableTableMetadata, TableDefinition, TableError, TableHandle,
    WriteTransaction,
};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

type BucketTable<'a> = TableDefinition<'a, &'static [u8], &'static [u8]>;

fn bucket_table(name: &str) -> BucketTable<'_> {
    TableDefinition::new(name)
}

/// A redb file viewed as a set of buckets.
///
/// Each bucket is a redb table mapping byte keys to byte values. The handle is
/// opened once per document and every trait call runs in a single transaction:
/// listings in a read transaction, mutations in a write transaction that is
/// committed only when the whole call succeeds.
pub struct RedbStore {
    db: Database,
    path: PathBuf,
}

impl fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedbStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Opens the store at `path`. With `create_if_missing` a new file is
    /// created when none exists; otherwise the file must already be there.
    ///
    /// Any failure is reported as [`BoltError::OpenFailed`]; the underlying
    /// cause is logged.
    pub fn open<P: AsRef<Path>>(path: P, create_if_missing: bool) -> Result<Self> {
        let path = path.as_ref();
        let opened = if create_if_missing {
            Database::create(path)
        } else {
            Database::open(path)
        };

        let db = opened.map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to open store");
            BoltError::OpenFailed
        })?;

        info!(path = %path.display(), "opened store");
        Ok(Self {
            db,
            path: path.to_path_buf(),
        })
    }

    fn has_bucket(txn: &WriteTransaction, name: &str) -> Result<bool> {
        Ok(txn.list_tables()?.any(|handle| handle.name() == name))
    }
}

fn read_bucket<T>(name: &str, table: &T) -> Result<Bucket>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let mut bucket = Bucket::new(name);
    for item in table.iter()? {
        let (key, value) = item?;
        bucket
            .entries
            .push(Entry::new(key.value().to_vec(), value.value().to_vec()));
    }
    Ok(bucket)
}

impl KvStore for RedbStore {
    fn buckets(&self) -> Result<Vec<Bucket>> {
        let txn = self.db.begin_read()?;
        let mut names: Vec<String> = txn
            .list_tables()?
            .map(|handle| handle.name().to_string())
            .collect();
        names.sort();

        let mut buckets = Vec::with_capacity(names.len());
        for name in &names {
            let table = txn.open_table(bucket_table(name))?;
            buckets.push(read_bucket(name, &table)?);
        }

        debug!(count = buckets.len(), "listed buckets");
        Ok(buckets)
    }

    fn bucket(&self, name: &str) -> Result<Option<Bucket>> {
        let txn = self.db.begin_read()?;
        match txn.open_table(bucket_table(name)) {
            Ok(table) => Ok(Some(read_bucket(name, &table)?)),
            Err(TableError::TableDoesNotExist(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn get(&self, bucket: &str, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let txn = self.db.begin_read()?;
        match txn.open_table(bucket_table(bucket)) {
            Ok(table) => Ok(table.get(key)?.map(|v| v.value().to_vec())),
            Err(TableError::TableDoesNotExist(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn create_bucket(&mut self, name: &str) -> Result<()> {
        check_bucket_name(name)?;
        let txn = self.db.begin_write()?;
        if Self::has_bucket(&txn, name)? {
            // Transaction is aborted on drop
            return Err(BoltError::BucketExists(name.to_string()));
        }
        txn.open_table(bucket_table(name))?;
        txn.commit()?;

        debug!(bucket = name, "created bucket");
        Ok(())
    }

    fn delete_bucket(&mut self, name: &str) -> Result<()> {
        let txn = self.db.begin_write()?;
        if !Self::has_bucket(&txn, name)? {
            return Ok(());
        }

        {
            let table = txn.open_table(bucket_table(name))?;
            if !table.is_empty()? {
                return Err(BoltError::BucketNotEmpty(name.to_string()));
            }
        }

        txn.delete_table(bucket_table(name))?;
        txn.commit()?;

        debug!(bucket = name, "deleted bucket");
        Ok(())
    }

    fn put_entry(&mut self, bucket: &str, key: &[u8], value: &[u8], mode: PutMode) -> Result<()> {
        check_bucket_name(bucket)?;
        check_key(key)?;
        let txn = self.db.begin_write()?;

        {
            let mut table = txn.open_table(bucket_table(bucket))?;
            let existing = table.get(key)?.map(|v| v.value().to_vec());
            check_put(bucket, key, existing.as_deref(), mode)?;
            table.insert(key, value)?;
        }

        txn.commit()?;
        debug!(bucket, key = %String::from_utf8_lossy(key), ?mode, "put entry");
        Ok(())
    }

    fn delete_entry(&mut self, bucket: &str, key: &[u8]) -> Result<()> {
        check_bucket_name(bucket)?;
        let txn = self.db.begin_write()?;

        {
            let mut table = txn.open_table(bucket_table(bucket))?;
            table.remove(key)?;
        }

        txn.commit()?;
        debug!(bucket, key = %String::from_utf8_lossy(key), "deleted entry");
        Ok(())
    }
}
