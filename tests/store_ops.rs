//! Integration tests for the directory entity stores over a real filesystem.

use flatstore::cancel::CancelToken;
use flatstore::layout::{Layout, LayoutStore};
use flatstore::server::{Server, ServerStore};
use flatstore::store::EntityStore;
use proptest::prelude::*;
use tempfile::TempDir;

fn write_server(dir: &std::path::Path, file: &str, json: &str) {
    std::fs::write(dir.join(file), json).unwrap();
}

#[test]
fn get_update_get_round_trip() {
    let temp = TempDir::new().unwrap();
    write_server(temp.path(), "a.kap", r#"{"id":1,"name":"alpha"}"#);
    write_server(temp.path(), "b.kap", r#"{"id":2,"name":"beta"}"#);

    let store = ServerStore::new(temp.path());
    let cancel = CancelToken::new();

    let beta = store.get(&2, &cancel).unwrap();
    assert_eq!(beta.name, "beta");

    let updated = Server {
        id: 2,
        name: "beta2".to_string(),
        url: "http://localhost:9092".to_string(),
        active: true,
        ..Server::default()
    };
    store.update(&updated, &cancel).unwrap();

    // The old file is gone and the replacement is named after the new name.
    assert!(!temp.path().join("b.kap").exists());
    assert!(temp.path().join("beta2.kap").exists());

    let fetched = store.get(&2, &cancel).unwrap();
    assert_eq!(fetched, updated);
}

#[test]
fn all_skips_malformed_files_but_returns_the_rest() {
    let temp = TempDir::new().unwrap();
    write_server(temp.path(), "a.kap", r#"{"id":1,"name":"alpha"}"#);
    write_server(temp.path(), "broken.kap", "definitely not json");
    write_server(temp.path(), "c.kap", r#"{"id":3,"name":"gamma"}"#);

    let store = ServerStore::new(temp.path());
    let servers = store.all(&CancelToken::new()).unwrap();
    let names: Vec<&str> = servers.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "gamma"]);
}

#[test]
fn get_fails_strictly_when_a_malformed_peer_sorts_first() {
    let temp = TempDir::new().unwrap();
    write_server(temp.path(), "0broken.kap", "{ truncated");
    write_server(temp.path(), "target.kap", r#"{"id":9,"name":"target"}"#);

    let store = ServerStore::new(temp.path());
    let err = store.get(&9, &CancelToken::new()).unwrap_err();
    assert!(matches!(err, flatstore::error::StoreError::Invalid { .. }));
}

#[test]
fn delete_removes_the_record_and_repeat_delete_is_not_found() {
    let temp = TempDir::new().unwrap();
    write_server(temp.path(), "a.kap", r#"{"id":1,"name":"alpha"}"#);
    write_server(temp.path(), "b.kap", r#"{"id":2,"name":"beta"}"#);

    let store = ServerStore::new(temp.path());
    let cancel = CancelToken::new();

    let beta = store.get(&2, &cancel).unwrap();
    store.delete(&beta, &cancel).unwrap();

    let remaining = store.all(&cancel).unwrap();
    assert_eq!(remaining.len(), 1);
    assert!(remaining.iter().all(|s| s.id != 2));

    let err = store.delete(&beta, &cancel).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn add_is_unsupported_and_never_mutates_the_directory() {
    let temp = TempDir::new().unwrap();
    write_server(temp.path(), "a.kap", r#"{"id":1,"name":"alpha"}"#);

    let store = ServerStore::new(temp.path());
    let cancel = CancelToken::new();

    let new_server = Server {
        id: 5,
        name: "delta".to_string(),
        ..Server::default()
    };
    let err = store.add(&new_server, &cancel).unwrap_err();
    assert!(err.is_unsupported());

    let entries: Vec<_> = std::fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn listing_failure_is_never_swallowed() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("absent");

    let store = ServerStore::new(&missing);
    let err = store.all(&CancelToken::new()).unwrap_err();
    assert!(matches!(err, flatstore::error::StoreError::Io(_)));
}

#[test]
fn kinds_share_one_directory_distinguished_by_extension() {
    let temp = TempDir::new().unwrap();
    write_server(temp.path(), "alpha.kap", r#"{"id":1,"name":"alpha"}"#);
    std::fs::write(
        temp.path().join("postgres.json"),
        r#"{"id":"l1","app":"postgres","measurement":"postgresql"}"#,
    )
    .unwrap();

    let servers = ServerStore::new(temp.path());
    let layouts = LayoutStore::new(temp.path());
    let cancel = CancelToken::new();

    assert_eq!(servers.all(&cancel).unwrap().len(), 1);
    let loaded: Vec<Layout> = layouts.all(&cancel).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "l1");

    // Each kind resolves only through its own extension.
    assert!(layouts.get(&"alpha".to_string(), &cancel).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Directories of well-formed, uniquely identified files produce
    /// exactly one record per file.
    #[test]
    fn all_returns_one_record_per_well_formed_file(count in 1usize..8) {
        let temp = TempDir::new().unwrap();
        for i in 0..count {
            write_server(
                temp.path(),
                &format!("server-{i}.kap"),
                &format!(r#"{{"id":{i},"name":"server-{i}"}}"#),
            );
        }

        let store = ServerStore::new(temp.path());
        let cancel = CancelToken::new();
        let servers = store.all(&cancel).unwrap();
        prop_assert_eq!(servers.len(), count);

        let mut ids: Vec<i64> = servers.iter().map(|s| s.id).collect();
        ids.dedup();
        prop_assert_eq!(ids.len(), count);

        for i in 0..count {
            let found = store.get(&(i as i64), &cancel).unwrap();
            prop_assert_eq!(found.name, format!("server-{i}"));
        }
    }
}
