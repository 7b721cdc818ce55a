use super::error::ResourceError;
use super::factory::CacheFactory;
use super::resources::CacheResources;
use crate::cache::error::CacheError;
use crate::lmdb_store::lmdb_factory;
use bytes::Bytes;
use tempfile::TempDir;

fn lmdb_yaml(label: &str, dir: &TempDir) -> String {
    format!(
        "label: {}\nlmdb:\n  path: {}\n  map_size: 1048576\n",
        label,
        dir.path().join("db").display()
    )
}

#[test]
fn add_cache_yaml_registers_resource() {
    let dir = TempDir::new().unwrap();
    let mut resources = CacheResources::new(vec![lmdb_factory()]);
    assert!(resources.add_cache_yaml(&lmdb_yaml("lcache", &dir)).is_ok());
    assert_eq!(resources.labels(), vec!["lcache"]);

    let cache = resources.get("lcache").unwrap();
    assert!(cache.set("foo", b"bar", None).is_ok());
    assert_eq!(cache.get("foo"), Ok(Bytes::from("bar")));
    drop(cache);
    resources.close();
}

#[test]
fn add_cache_rejects_unknown_backend() {
    let mut resources = CacheResources::new(vec![lmdb_factory()]);
    let result = resources.add_cache_yaml("label: lcache\nredis:\n  url: redis://localhost\n");
    assert_eq!(
        result,
        Err(ResourceError::UnknownBackend(String::from("redis")))
    );
    assert!(resources.labels().is_empty());
}

#[test]
fn add_cache_without_factories_knows_no_backend() {
    let dir = TempDir::new().unwrap();
    let mut resources = CacheResources::new(Vec::new());
    let result = resources.add_cache_yaml(&lmdb_yaml("lcache", &dir));
    assert_eq!(
        result,
        Err(ResourceError::UnknownBackend(String::from("lmdb")))
    );
}

#[test]
fn add_cache_rejects_duplicate_label() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let mut resources = CacheResources::new(vec![lmdb_factory()]);
    assert!(resources.add_cache_yaml(&lmdb_yaml("lcache", &first)).is_ok());
    assert_eq!(
        resources.add_cache_yaml(&lmdb_yaml("lcache", &second)),
        Err(ResourceError::DuplicateResource(String::from("lcache")))
    );
}

#[test]
fn add_cache_fails_fast_on_backend_error() {
    let mut resources = CacheResources::new(vec![lmdb_factory()]);
    let result = resources.add_cache_yaml("label: lcache\nlmdb:\n  map_size: 1048576\n");
    assert!(matches!(
        result,
        Err(ResourceError::Cache(CacheError::Config(_)))
    ));
    assert_eq!(
        resources.get("lcache").err(),
        Some(ResourceError::UnknownResource(String::from("lcache")))
    );
}

#[test]
fn add_cache_yaml_requires_label() {
    let dir = TempDir::new().unwrap();
    let mut resources = CacheResources::new(vec![lmdb_factory()]);
    let yaml = format!("lmdb:\n  path: {}\n", dir.path().display());
    assert!(matches!(
        resources.add_cache_yaml(&yaml),
        Err(ResourceError::Config(_))
    ));
}

#[test]
fn add_cache_yaml_requires_single_backend() {
    let mut resources = CacheResources::new(vec![lmdb_factory()]);
    let yaml = "label: lcache\nlmdb:\n  path: /tmp/a\nother:\n  path: /tmp/b\n";
    assert!(matches!(
        resources.add_cache_yaml(yaml),
        Err(ResourceError::Config(_))
    ));
    assert!(matches!(
        resources.add_cache_yaml("label: lcache\n"),
        Err(ResourceError::Config(_))
    ));
}

#[test]
fn factory_debug_shows_name() {
    let factory: CacheFactory = lmdb_factory();
    assert_eq!(format!("{:?}", factory), "CacheFactory { name: \"lmdb\" }");
}
