use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::{config::StorageConfig, error::Result};

/// Images are web-addressable under this prefix; the files live in the
/// matching subdirectory of the public root.
const IMAGE_URL_PREFIX: &str = "/products";

/// Filesystem-backed blob store with two roots: a private one for
/// purchasable files and a public, web-served one for product images.
/// Keys are `{uuid}-{original filename}`, so a replacement upload never
/// collides with the blob it replaces.
#[derive(Debug, Clone)]
pub struct BlobStorage {
    file_root: PathBuf,
    public_root: PathBuf,
}

impl BlobStorage {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            file_root: config.file_root.clone(),
            public_root: config.public_root.clone(),
        }
    }

    /// Creates both storage roots if they do not exist yet.
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.file_root).await?;
        fs::create_dir_all(self.image_dir()).await?;
        Ok(())
    }

    /// Writes a purchasable file under the private root and returns the
    /// stored path, e.g. `products/{uuid}-f.pdf`.
    pub async fn store_file(&self, original_name: &str, data: &[u8]) -> Result<String> {
        let path = self.file_root.join(storage_key(original_name));
        fs::write(&path, data).await?;
        Ok(path.to_string_lossy().into_owned())
    }

    /// Writes a product image under the public root and returns its web
    /// path, e.g. `/products/{uuid}-i.png`.
    pub async fn store_image(&self, original_name: &str, data: &[u8]) -> Result<String> {
        let key = storage_key(original_name);
        fs::write(self.image_dir().join(&key), data).await?;
        Ok(format!("{}/{}", IMAGE_URL_PREFIX, key))
    }

    /// Reads back a purchasable file by the path `store_file` returned.
    pub async fn read_file(&self, file_path: &str) -> Result<Vec<u8>> {
        Ok(fs::read(file_path).await?)
    }

    pub async fn delete_file(&self, file_path: &str) -> Result<()> {
        fs::remove_file(file_path).await?;
        Ok(())
    }

    /// Deletes an image by the web path `store_image` returned.
    pub async fn delete_image(&self, image_path: &str) -> Result<()> {
        fs::remove_file(self.image_disk_path(image_path)).await?;
        Ok(())
    }

    fn image_dir(&self) -> PathBuf {
        self.public_root.join(IMAGE_URL_PREFIX.trim_start_matches('/'))
    }

    fn image_disk_path(&self, image_path: &str) -> PathBuf {
        self.public_root.join(image_path.trim_start_matches('/'))
    }
}

/// Client-supplied filenames can carry path separators; only the final
/// component ends up in the key.
fn storage_key(original_name: &str) -> String {
    let base = Path::new(original_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    format!("{}-{}", Uuid::new_v4(), base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_keeps_only_the_final_path_component() {
        let key = storage_key("../../etc/passwd");
        assert!(key.ends_with("-passwd"));
        assert!(!key.contains('/'));
    }

    #[test]
    fn storage_keys_are_unique_per_call() {
        assert_ne!(storage_key("f.pdf"), storage_key("f.pdf"));
    }
}
