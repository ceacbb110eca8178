use std::path::Path;

use tempfile::TempDir;

use shopkeep::{config::StorageConfig, services::BlobStorage};

fn storage() -> (TempDir, BlobStorage) {
    let dir = TempDir::new().expect("tempdir");
    let config = StorageConfig {
        file_root: dir.path().join("products"),
        public_root: dir.path().join("public"),
    };
    (dir, BlobStorage::new(&config))
}

#[tokio::test]
async fn stored_file_lands_under_the_private_root_with_a_uuid_key() {
    let (_dir, storage) = storage();
    storage.init().await.unwrap();

    let path = storage.store_file("f.pdf", b"pdf bytes").await.unwrap();

    let basename = Path::new(&path).file_name().unwrap().to_str().unwrap();
    assert!(basename.ends_with("-f.pdf"));
    // 36-char UUID, then the separator
    assert_eq!(basename.as_bytes()[36], b'-');

    assert_eq!(storage.read_file(&path).await.unwrap(), b"pdf bytes");
}

#[tokio::test]
async fn stored_image_is_addressed_by_its_web_path() {
    let (dir, storage) = storage();
    storage.init().await.unwrap();

    let web_path = storage.store_image("i.png", b"png bytes").await.unwrap();

    assert!(web_path.starts_with("/products/"));
    assert!(web_path.ends_with("-i.png"));

    let on_disk = dir.path().join("public").join(web_path.trim_start_matches('/'));
    assert_eq!(std::fs::read(on_disk).unwrap(), b"png bytes");
}

#[tokio::test]
async fn replacement_leaves_the_old_key_unresolvable() {
    let (_dir, storage) = storage();
    storage.init().await.unwrap();

    let old_path = storage.store_file("f.pdf", b"v1").await.unwrap();
    storage.delete_file(&old_path).await.unwrap();
    let new_path = storage.store_file("f.pdf", b"v2").await.unwrap();

    assert_ne!(old_path, new_path);
    assert!(storage.read_file(&old_path).await.is_err());
    assert_eq!(storage.read_file(&new_path).await.unwrap(), b"v2");
}

#[tokio::test]
async fn deleting_a_missing_blob_reports_an_error() {
    let (_dir, storage) = storage();
    storage.init().await.unwrap();

    // Callers on the delete path treat this as best-effort and only log it.
    assert!(storage.delete_file("products/does-not-exist.pdf").await.is_err());
    assert!(storage.delete_image("/products/does-not-exist.png").await.is_err());
}

#[tokio::test]
async fn init_is_idempotent() {
    let (_dir, storage) = storage();

    storage.init().await.unwrap();
    storage.init().await.unwrap();
}
