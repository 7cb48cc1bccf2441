use crate::commands::{expect_args, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::KvStore;
use tracing::info;

/// `BoltviewerDeleteBucket(bucket)`. Only empty buckets can go.
pub fn bucket<S: KvStore>(store: &mut S, args: &[String]) -> Result<CmdResult> {
    let [name] = expect_args::<1>("bucket delete", args)?;
    let existed = store.bucket(name)?.is_some();
    store.delete_bucket(name)?;

    let mut result = CmdResult::default();
    if existed {
        info!(bucket = name, "bucket deleted");
        result.add_message(CmdMessage::success(format!("Bucket deleted: {}", name)));
    } else {
        result.add_message(CmdMessage::info(format!("No such bucket: {}", name)));
    }
    Ok(result)
}

/// `BoltviewerDeleteEntry(bucket, key)`
pub fn entry<S: KvStore>(store: &mut S, args: &[String]) -> Result<CmdResult> {
    let [bucket, key] = expect_args::<2>("entry delete", args)?;
    store.delete_entry(bucket, key.as_bytes())?;
    info!(bucket, key, "entry deleted");

    let mut result = CmdResult::default();
    if let Some(updated) = store.bucket(bucket)? {
        result.affected_buckets.push(updated);
    }
    result.add_message(CmdMessage::success(format!(
        "Entry deleted from {}: {}",
        bucket, key
    )));
    Ok(result)
}
