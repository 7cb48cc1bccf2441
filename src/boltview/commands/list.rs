use crate::commands::CmdResult;
use crate::error::Result;
use crate::projection::render;
use crate::store::KvStore;

/// Reads the whole store and renders it with `indent`.
pub fn run<S: KvStore>(store: &S, indent: &str) -> Result<CmdResult> {
    let buckets = store.buckets()?;
    let lines = render(&buckets, indent);
    Ok(CmdResult::default()
        .with_lines(lines)
        .with_listed_buckets(buckets))
}
