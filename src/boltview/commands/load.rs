use crate::commands::{list, CmdMessage, CmdResult};
use crate::config::BoltConfig;
use crate::error::Result;
use crate::host::Host;
use crate::projection::project;
use crate::store::KvStore;
use tracing::debug;

/// `BoltviewerLoad`: prepares the host buffer and fills it with the store.
///
/// The buffer becomes a scratch buffer (`buftype=nofile`) with the configured
/// filetype, its previous content is dropped, and every bucket and entry is
/// written as one line. Whatever has no faithful line is left out and named
/// in a warning.
pub fn run<S: KvStore, H: Host>(store: &S, host: &mut H, config: &BoltConfig) -> Result<CmdResult> {
    host.set_buffer_option("filetype", &config.filetype)?;
    host.set_buffer_option("buftype", "nofile")?;
    host.set_buffer_lines(0, None, &[])?;

    let mut result = list::run(store, &config.indent)?;
    host.set_buffer_lines(0, None, &result.lines)?;
    debug!(lines = result.lines.len(), "buffer loaded");

    result.add_message(CmdMessage::info(format!(
        "{} buckets loaded",
        result.listed_buckets.len()
    )));
    for hidden in project(&result.listed_buckets).describe_hidden() {
        result.add_message(CmdMessage::warning(hidden));
    }
    Ok(result)
}
