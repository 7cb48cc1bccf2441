use crate::commands::{expect_args, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::PutMode;
use crate::store::KvStore;
use tracing::info;

/// `BoltviewerCreateBucket(bucket)`
pub fn bucket<S: KvStore>(store: &mut S, args: &[String]) -> Result<CmdResult> {
    let [name] = expect_args::<1>("bucket", args)?;
    store.create_bucket(name)?;
    info!(bucket = name, "bucket created");

    let mut result = CmdResult::default();
    if let Some(created) = store.bucket(name)? {
        result.affected_buckets.push(created);
    }
    result.add_message(CmdMessage::success(format!("Bucket created: {}", name)));
    Ok(result)
}

/// `BoltviewerCreateEntry(bucket, key, value)`, and with
/// [`PutMode::Overwrite`], `BoltviewerCreateEntryAnyway`.
pub fn entry<S: KvStore>(store: &mut S, args: &[String], mode: PutMode) -> Result<CmdResult> {
    let [bucket, key, value] = expect_args::<3>("entry", args)?;
    store.put_entry(bucket, key.as_bytes(), value.as_bytes(), mode)?;
    info!(bucket, key, ?mode, "entry written");

    let mut result = CmdResult::default();
    if let Some(updated) = store.bucket(bucket)? {
        result.affected_buckets.push(updated);
    }
    result.add_message(CmdMessage::success(format!(
        "Entry saved in {}: {} => {}",
        bucket, key, value
    )));
    Ok(result)
}
