use lmdbcache::cache::cache::Cache;
use lmdbcache::cache::error::CacheError;
use lmdbcache::lmdb_store::LmdbStore;
mod common;

#[test]
fn persistence_check() {
    let env = common::TestEnvironment::new();
    let store = env.open();
    store.set("a", b"b", None).unwrap();
    store.set("gone", b"soon", None).unwrap();
    store.delete("gone").unwrap();
    store.close().unwrap();

    let store = env.open();
    assert_eq!(&store.get("a").unwrap()[..], b"b");
    assert_eq!(store.get("gone"), Err(CacheError::NotFound));
}

#[test]
fn second_open_of_same_path_fails() {
    let env = common::TestEnvironment::new();
    let store = env.open();
    match LmdbStore::open(&env.config()) {
        Ok(_) => unreachable!(),
        Err(err) => assert!(matches!(err, CacheError::Open(_))),
    }
    store.close().unwrap();
    assert!(LmdbStore::open(&env.config()).is_ok());
}
