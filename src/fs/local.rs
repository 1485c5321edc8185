//! Local directory storage backend.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::fs::storage::Storage;

/// Stores folders as directories and files as plain files below a root.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a store rooted at `root`. The directory is created on first use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Check that a single folder or file name is safe to join onto a directory.
///
/// Rejects empty names, `.` and `..`, and names containing a backslash or a
/// null byte. Forward slashes never reach this point since destination paths
/// are split on them.
pub fn validate_component(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Name cannot be empty or whitespace-only".to_string(),
        ));
    }

    if name == "." || name == ".." {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in name: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in name: '{}'",
            name
        )));
    }

    Ok(())
}

#[async_trait]
impl Storage for LocalStorage {
    type Folder = PathBuf;

    fn root(&self) -> PathBuf {
        self.root.clone()
    }

    async fn find_folder(&self, parent: &PathBuf, name: &str) -> Result<Option<PathBuf>> {
        validate_component(name)?;
        let path = parent.join(name);

        match fs::metadata(&path).await {
            Ok(meta) if meta.is_dir() => Ok(Some(path)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }

    async fn create_folder(&self, parent: &PathBuf, name: &str) -> Result<PathBuf> {
        validate_component(name)?;
        let path = parent.join(name);

        fs::create_dir_all(&path).await.map_err(|e| {
            Error::Storage(format!("Failed to create folder {}: {}", path.display(), e))
        })?;

        Ok(path)
    }

    async fn has_file(&self, folder: &PathBuf, name: &str) -> Result<bool> {
        validate_component(name)?;

        match fs::symlink_metadata(folder.join(name)).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::Io(e)),
        }
    }

    async fn create_file(&self, folder: &PathBuf, name: &str, data: &[u8]) -> Result<()> {
        validate_component(name)?;
        let path = folder.join(name);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                Error::Storage(format!("Failed to create file {}: {}", path.display(), e))
            })?;

        file.write_all(data).await?;
        file.flush().await?;

        Ok(())
    }
}
