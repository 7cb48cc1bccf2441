//! Operations driven by the line under the editor's cursor.
//!
//! The line is classified with [`resolve`]; a bucket line acts on the bucket,
//! an entry line on that entry within the nearest bucket above it. Creating
//! leaves the buffer alone since the line is already there. Deleting removes
//! the line once the store has accepted the change; an entry line whose key is
//! not in the store is an error and stays put.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BoltError, Result};
use crate::host::Host;
use crate::model::PutMode;
use crate::projection::{resolve, LineTarget};
use crate::store::KvStore;
use tracing::info;

/// `BoltviewerCreateBucketEntry(row)`
pub fn create_at<S: KvStore, H: Host>(
    store: &mut S,
    host: &H,
    row: usize,
    mode: PutMode,
) -> Result<CmdResult> {
    let lines = host.buffer_lines()?;
    let mut result = CmdResult::default();

    let bucket = match resolve(&lines, row)? {
        LineTarget::Bucket { name } => {
            store.create_bucket(&name)?;
            result.add_message(CmdMessage::success(format!("Bucket created: {}", name)));
            name
        }
        LineTarget::Entry { bucket, key, value } => {
            store.put_entry(&bucket, key.as_bytes(), value.as_bytes(), mode)?;
            result.add_message(CmdMessage::success(format!(
                "Entry saved in {}: {} => {}",
                bucket, key, value
            )));
            bucket
        }
    };
    info!(row, bucket = %bucket, "created from line");

    if let Some(updated) = store.bucket(&bucket)? {
        result.affected_buckets.push(updated);
    }
    Ok(result)
}

/// `BoltviewerDeleteBucketEntry(row)`
pub fn delete_at<S: KvStore, H: Host>(store: &mut S, host: &mut H, row: usize) -> Result<CmdResult> {
    let lines = host.buffer_lines()?;
    let mut result = CmdResult::default();

    match resolve(&lines, row)? {
        LineTarget::Bucket { name } => {
            store.delete_bucket(&name)?;
            result.add_message(CmdMessage::success(format!("Bucket deleted: {}", name)));
        }
        LineTarget::Entry { bucket, key, .. } => {
            if store.get(&bucket, key.as_bytes())?.is_none() {
                return Err(BoltError::KeyNotFound { bucket, key });
            }
            store.delete_entry(&bucket, key.as_bytes())?;
            if let Some(updated) = store.bucket(&bucket)? {
                result.affected_buckets.push(updated);
            }
            result.add_message(CmdMessage::success(format!(
                "Entry deleted from {}: {}",
                bucket, key
            )));
        }
    }

    host.set_buffer_lines(row, Some(row + 1), &[])?;
    info!(row, "deleted from line");
    Ok(result)
}
