use boltview::api::BoltApi;
use boltview::config::BoltConfig;
use boltview::error::BoltError;
use boltview::host::BufferHost;
use boltview::model::{Bucket, PutMode};
use boltview::store::db::RedbStore;
use boltview::store::KvStore;
use tempfile::TempDir;

fn setup() -> (TempDir, RedbStore) {
    let dir = TempDir::new().unwrap();
    let store = RedbStore::open(dir.path().join("app.db"), true).unwrap();
    (dir, store)
}

#[test]
fn test_open_missing_without_create_fails() {
    let dir = TempDir::new().unwrap();
    let err = RedbStore::open(dir.path().join("missing.db"), false).unwrap_err();
    assert!(matches!(err, BoltError::OpenFailed));
    assert_eq!(err.to_string(), "failed to open bolt");
}

#[test]
fn test_open_garbage_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "definitely not a database").unwrap();

    assert!(matches!(
        RedbStore::open(&path, true),
        Err(BoltError::OpenFailed)
    ));
}

#[test]
fn test_create_bucket_conflict() {
    let (_dir, mut store) = setup();
    store.create_bucket("users").unwrap();

    let err = store.create_bucket("users").unwrap_err();
    assert!(matches!(err, BoltError::BucketExists(_)));
    assert_eq!(store.buckets().unwrap(), vec![Bucket::new("users")]);
}

#[test]
fn test_delete_bucket_requires_empty() {
    let (_dir, mut store) = setup();
    store
        .put_entry("users", b"alice", b"admin", PutMode::CreateOnly)
        .unwrap();

    let err = store.delete_bucket("users").unwrap_err();
    assert!(matches!(err, BoltError::BucketNotEmpty(_)));

    store.delete_entry("users", b"alice").unwrap();
    store.delete_bucket("users").unwrap();
    assert!(store.buckets().unwrap().is_empty());
}

#[test]
fn test_delete_missing_bucket_is_noop() {
    let (_dir, mut store) = setup();
    store.delete_bucket("ghost").unwrap();
    assert!(store.bucket("ghost").unwrap().is_none());
}

#[test]
fn test_put_create_only_vs_overwrite() {
    let (_dir, mut store) = setup();
    store
        .put_entry("cfg", b"port", b"8080", PutMode::CreateOnly)
        .unwrap();

    let err = store
        .put_entry("cfg", b"port", b"9090", PutMode::CreateOnly)
        .unwrap_err();
    assert!(matches!(err, BoltError::KeyExists { .. }));
    assert_eq!(store.get("cfg", b"port").unwrap(), Some(b"8080".to_vec()));

    store
        .put_entry("cfg", b"port", b"9090", PutMode::Overwrite)
        .unwrap();
    assert_eq!(store.get("cfg", b"port").unwrap(), Some(b"9090".to_vec()));
}

#[test]
fn test_get_from_missing_bucket() {
    let (_dir, store) = setup();
    assert_eq!(store.get("nope", b"k").unwrap(), None);
}

#[test]
fn test_listing_roundtrips_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.db");
    let expected = vec![
        Bucket::new("empty"),
        Bucket::new("sessions").with_entry("abc", "1").with_entry("def", "2"),
        Bucket::new("users")
            .with_entry("alice", "admin")
            .with_entry("bob", "viewer"),
    ];

    {
        let mut store = RedbStore::open(&path, true).unwrap();
        for bucket in expected.iter().rev() {
            store.create_bucket(&bucket.name).unwrap();
            for entry in bucket.entries.iter().rev() {
                store
                    .put_entry(&bucket.name, &entry.key, &entry.value, PutMode::CreateOnly)
                    .unwrap();
            }
        }
    }

    let store = RedbStore::open(&path, false).unwrap();
    assert_eq!(store.buckets().unwrap(), expected);
}

#[test]
fn test_load_edit_apply_cycle() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.db");

    let mut host = BufferHost::for_path(&path);
    let mut api = BoltApi::open_for_host(&host, BoltConfig::default()).unwrap();
    api.create_entry(
        &[
            "users".to_string(),
            "alice".to_string(),
            "admin".to_string(),
        ],
        PutMode::CreateOnly,
    )
    .unwrap();

    api.load(&mut host).unwrap();
    assert_eq!(host.lines(), &["users", "\talice => admin"]);
    assert_eq!(host.option("filetype"), Some("boltdb"));

    let mut edited = host.lines().to_vec();
    edited.push("\tbob => viewer".to_string());
    edited.push("teams".to_string());
    api.apply(&edited).unwrap();

    api.load(&mut host).unwrap();
    assert_eq!(
        host.lines(),
        &["teams", "users", "\talice => admin", "\tbob => viewer"]
    );
}

#[test]
fn test_unchanged_buffer_keeps_entries_without_lines() {
    let (_dir, mut store) = setup();
    let odd: [(&[u8], &[u8]); 7] = [
        (&[0x6b, 0xff], b"v"),
        (b"raw", &[0xc3, 0x28]),
        (b"padded", b"  value"),
        (b"multi", b"line1\nextra"),
        (b"empty", b""),
        (b"two words", b"v"),
        (b"a=b", b"v"),
    ];
    store.put_entry("b", b"k", b"v", PutMode::CreateOnly).unwrap();
    for (key, value) in odd {
        store.put_entry("b", key, value, PutMode::Overwrite).unwrap();
    }
    let before = store.buckets().unwrap();

    let mut api = BoltApi::new(store, BoltConfig::default());
    let mut host = BufferHost::new();
    api.load(&mut host).unwrap();
    assert_eq!(host.lines(), &["b", "\tk => v"]);

    let unchanged = host.lines().to_vec();
    let result = api.apply(&unchanged).unwrap();

    assert_eq!(result.messages[0].content, "No changes");
    assert_eq!(api.store().buckets().unwrap(), before);
    assert_eq!(
        api.store().get("b", &[0x6b, 0xff]).unwrap(),
        Some(b"v".to_vec())
    );
    assert!(api.store().bucket("\tk => line1").unwrap().is_none());
}
