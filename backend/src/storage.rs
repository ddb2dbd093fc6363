//! File storage for uploaded ID card photos.
//!
//! The stores only ever see the narrow [`FileStorage`] interface: hand over the
//! bytes, get back a relative path to persist. [`LocalStorage`] keeps files in a
//! namespaced directory below a root that the server also exposes under `/storage`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Directory under the storage root that holds ID card photos.
pub const ID_CARD_NAMESPACE: &str = "id_cards";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to create storage directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// A file received from a form, before it has been stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Upload {
    /// Name reported by the browser. Only its extension is ever used.
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// A file input left empty still sends a part with no name and no bytes.
    pub fn is_empty(&self) -> bool {
        self.filename.is_empty() && self.bytes.is_empty()
    }
}

pub trait FileStorage: Send + Sync {
    /// Persists `bytes` and returns the relative path under which they were stored.
    fn put(&self, bytes: &[u8], name: &str) -> Result<String, StorageError>;
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
    namespace: String,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            namespace: namespace.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the namespace directory up front so `/storage` can be mounted.
    pub fn ensure_dirs(&self) -> Result<(), StorageError> {
        let dir = self.root.join(&self.namespace);
        fs::create_dir_all(&dir).map_err(|source| StorageError::CreateDir { path: dir, source })
    }
}

impl FileStorage for LocalStorage {
    fn put(&self, bytes: &[u8], name: &str) -> Result<String, StorageError> {
        self.ensure_dirs()?;
        let filename = format!("{}.{}", Uuid::new_v4().simple(), extension_for(bytes, name));
        let path = self.root.join(&self.namespace).join(&filename);
        fs::write(&path, bytes).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("Stored upload '{}' as {}", name, path.display());
        Ok(format!("{}/{}", self.namespace, filename))
    }
}

/// Extensions a stored photo may carry. Anything else is stored as `bin`, so the
/// `/storage` mount never serves an upload as markup or script.
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

fn allowed(ext: &str) -> Option<String> {
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Picks the extension from the image signature, then from the uploaded name.
fn extension_for(bytes: &[u8], name: &str) -> String {
    if let Some(ext) = image::guess_format(bytes)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
        .and_then(allowed)
    {
        return ext;
    }

    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(allowed)
        .unwrap_or_else(|| "bin".to_string())
}
