//! Hierarchical file storage capability.

use async_trait::async_trait;

use crate::error::Result;

/// A folder/file store the filer deposits attachments into.
///
/// Folder lookups are by exact name. Implementations never overwrite: the
/// caller checks [`Storage::has_file`] before [`Storage::create_file`].
#[async_trait]
pub trait Storage: Send + Sync {
    /// Handle to a folder in this store.
    type Folder: Clone + Send + Sync;

    /// The folder every destination path is resolved from.
    fn root(&self) -> Self::Folder;

    /// Look up a direct child folder named `name`.
    async fn find_folder(&self, parent: &Self::Folder, name: &str) -> Result<Option<Self::Folder>>;

    /// Create a direct child folder named `name`.
    async fn create_folder(&self, parent: &Self::Folder, name: &str) -> Result<Self::Folder>;

    /// Whether `folder` already holds a file named `name`.
    async fn has_file(&self, folder: &Self::Folder, name: &str) -> Result<bool>;

    /// Create a file named `name` in `folder` holding `data`.
    async fn create_file(&self, folder: &Self::Folder, name: &str, data: &[u8]) -> Result<()>;
}
