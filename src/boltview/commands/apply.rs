use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::projection::{diff, parse_buffer, project, Edit};
use crate::store::KvStore;
use tracing::{info, warn};

/// Writes an edited buffer back to the store.
///
/// The buffer is parsed in full before anything is written, so a malformed
/// line leaves the store untouched. It is compared against what loading the
/// store would show, so entries that have no line are never deleted or
/// overwritten, and a bucket still holding such entries is kept even when its
/// header is removed.
///
/// Edits run one at a time, each in its own transaction; the first failure
/// stops the run and is returned, with the edits before it already committed.
pub fn run<S: KvStore, L: AsRef<str>>(store: &mut S, lines: &[L]) -> Result<CmdResult> {
    let edited = parse_buffer(lines)?;
    let projection = project(&store.buckets()?);

    let mut result = CmdResult::default();
    let mut edits = diff(&projection.shown, &edited);
    edits.retain(|edit| match edit {
        Edit::DeleteBucket(name) if projection.hides_entries_of(name) => {
            result.add_message(CmdMessage::warning(format!(
                "Kept bucket {}: it holds entries that cannot be shown as lines",
                name
            )));
            false
        }
        _ => true,
    });

    if edits.is_empty() {
        result.add_message(CmdMessage::info("No changes"));
        return Ok(result);
    }

    for (done, edit) in edits.iter().enumerate() {
        if let Err(e) = execute(store, edit) {
            warn!(applied = done, failed = %edit, error = %e, "apply stopped");
            return Err(e);
        }
        result.add_message(CmdMessage::success(capitalize(&edit.to_string())));
    }

    info!(edits = edits.len(), "buffer applied");
    Ok(result.with_affected_buckets(store.buckets()?))
}

fn execute<S: KvStore>(store: &mut S, edit: &Edit) -> Result<()> {
    match edit {
        Edit::CreateBucket(name) => store.create_bucket(name),
        Edit::PutEntry {
            bucket,
            key,
            value,
            mode,
        } => store.put_entry(bucket, key, value, *mode),
        Edit::DeleteEntry { bucket, key } => store.delete_entry(bucket, key),
        Edit::DeleteBucket(name) => store.delete_bucket(name),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::BoltError;
    use crate::model::{Bucket, PutMode};
    use crate::projection::render;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn unchanged_buffer_is_a_noop() {
        let mut store = StoreFixture::sample().store;
        let lines = render(&store.buckets().unwrap(), "\t");

        let result = run(&mut store, &lines).unwrap();
        assert_eq!(result.messages[0].content, "No changes");
    }

    #[test]
    fn applies_adds_updates_and_removals() {
        let mut store = StoreFixture::sample().store;
        let lines = [
            "users",
            "\talice => owner",
            "\tcarol => viewer",
            "archive",
            "\told => 1",
        ];

        let result = run(&mut store, &lines).unwrap();

        assert_eq!(
            result.affected_buckets,
            vec![
                Bucket::new("archive").with_entry("old", "1"),
                Bucket::new("users")
                    .with_entry("alice", "owner")
                    .with_entry("carol", "viewer"),
            ]
        );
        assert_eq!(result.messages.len(), 6);
    }

    #[test]
    fn malformed_buffer_writes_nothing() {
        let mut store = StoreFixture::sample().store;
        let before = store.buckets().unwrap();

        let err = run(&mut store, &["users", "\talice => admin", "\tbroken"]).unwrap_err();

        assert!(matches!(err, BoltError::Parse { .. }));
        assert_eq!(store.buckets().unwrap(), before);
    }

    fn store_with_odd_entries() -> InMemoryStore {
        let mut store = StoreFixture::sample().store;
        let odd: [(&[u8], &[u8]); 7] = [
            (&[0x6b, 0xff], b"v"),
            (b"raw", &[0xc3, 0x28]),
            (b"padded", b"  value"),
            (b"multi", b"line1\nextra"),
            (b"empty", b""),
            (b"two words", b"v"),
            (b"a=b", b"v"),
        ];
        for (key, value) in odd {
            store
                .put_entry("users", key, value, PutMode::Overwrite)
                .unwrap();
        }
        store
    }

    #[test]
    fn unchanged_buffer_leaves_odd_entries_alone() {
        let mut store = store_with_odd_entries();
        let before = store.buckets().unwrap();
        let lines = render(&before, "\t");

        let result = run(&mut store, &lines).unwrap();

        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].content, "No changes");
        assert_eq!(store.buckets().unwrap(), before);
    }

    #[test]
    fn edits_around_odd_entries_keep_them() {
        let mut store = store_with_odd_entries();
        let lines = ["sessions", "users", "\talice => owner"];

        run(&mut store, &lines).unwrap();

        assert_eq!(store.get("users", b"alice").unwrap(), Some(b"owner".to_vec()));
        assert_eq!(store.get("users", b"bob").unwrap(), None);
        assert_eq!(
            store.get("users", &[0x6b, 0xff]).unwrap(),
            Some(b"v".to_vec())
        );
        assert_eq!(
            store.get("users", b"padded").unwrap(),
            Some(b"  value".to_vec())
        );
        assert_eq!(
            store.get("users", b"multi").unwrap(),
            Some(b"line1\nextra".to_vec())
        );
        assert!(store.bucket("line1").unwrap().is_none());
    }

    #[test]
    fn removed_header_keeps_bucket_with_odd_entries() {
        let mut store = store_with_odd_entries();

        let result = run(&mut store, &["sessions"]).unwrap();

        let users = store.bucket("users").unwrap().unwrap();
        assert_eq!(users.entries.len(), 7);
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning && m.content.contains("Kept bucket users")));
    }

    #[test]
    fn typed_line_does_not_overwrite_hidden_value() {
        let mut store = store_with_odd_entries();
        let lines = [
            "sessions",
            "users",
            "\talice => admin",
            "\tbob => viewer",
            "\tpadded => value",
        ];

        let err = run(&mut store, &lines).unwrap_err();

        assert!(matches!(err, BoltError::KeyExists { .. }));
        assert_eq!(
            store.get("users", b"padded").unwrap(),
            Some(b"  value".to_vec())
        );
    }

    #[test]
    fn capitalizes_messages() {
        assert_eq!(capitalize("create bucket a"), "Create bucket a");
        assert_eq!(capitalize(""), "");
    }
}
