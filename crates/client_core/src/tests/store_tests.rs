use super::*;

#[test]
fn memory_store_roundtrips_and_removes() {
    let mut store = MemorySessionStore::new();
    store.set(EMAIL_KEY, "a@b.com").expect("set");
    assert_eq!(store.get(EMAIL_KEY).expect("get").as_deref(), Some("a@b.com"));

    store.remove(EMAIL_KEY).expect("remove");
    assert_eq!(store.get(EMAIL_KEY).expect("get"), None);
    store.remove(EMAIL_KEY).expect("removing a missing key is fine");
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let mut store = FileSessionStore::open_in_dir(dir.path()).expect("open");
        store.set(EMAIL_KEY, "a@b.com").expect("set email");
        store.set(ATTEMPTS_KEY, "2").expect("set attempts");
    }

    let reopened = FileSessionStore::open_in_dir(dir.path()).expect("reopen");
    assert_eq!(reopened.get(EMAIL_KEY).expect("get").as_deref(), Some("a@b.com"));
    assert_eq!(reopened.get(ATTEMPTS_KEY).expect("get").as_deref(), Some("2"));
    assert!(reopened.path().ends_with("session.json"));
}

#[test]
fn file_store_removal_is_persisted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileSessionStore::open_in_dir(dir.path()).expect("open");
    store.set(EMAIL_KEY, "a@b.com").expect("set");
    store.remove(EMAIL_KEY).expect("remove");

    let reopened = FileSessionStore::open_in_dir(dir.path()).expect("reopen");
    assert_eq!(reopened.get(EMAIL_KEY).expect("get"), None);
}

#[test]
fn creates_missing_data_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("profiles").join("default");
    let mut store = FileSessionStore::open_in_dir(&nested).expect("open");
    store.set(ATTEMPTS_KEY, "3").expect("set");
    assert!(nested.join("session.json").exists());
}

#[test]
fn corrupt_session_file_starts_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ not json").expect("write");

    let store = FileSessionStore::open(&path).expect("open");
    assert_eq!(store.get(EMAIL_KEY).expect("get"), None);
}
