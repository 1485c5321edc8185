//! Destination path materialization.

use crate::error::{Error, Result};
use crate::fs::storage::Storage;

/// Outcome of depositing a payload at a destination path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The file was created.
    Created,
    /// A file with the same name was already there and was left untouched.
    AlreadyExists,
}

/// Split a destination path into its folder path and file name.
///
/// The file name is everything after the last `/`.
pub fn split_destination(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(pos) => (&path[..pos], &path[pos + 1..]),
        None => ("", path),
    }
}

/// Get the folder matching a slash-delimited path below the storage root,
/// creating every missing segment.
///
/// Empty segments are skipped, so leading, trailing and doubled slashes are
/// harmless. Calling this twice with the same path yields the same folder.
pub async fn get_or_make_folder<S: Storage>(storage: &S, path: &str) -> Result<S::Folder> {
    let mut folder = storage.root();

    for name in path.split('/').filter(|name| !name.is_empty()) {
        folder = match storage.find_folder(&folder, name).await? {
            Some(existing) => existing,
            None => {
                tracing::debug!("Creating folder {}", name);
                storage.create_folder(&folder, name).await?
            }
        };
    }

    Ok(folder)
}

/// Save `data` at `destination` unless a file with that name already exists.
pub async fn place<S: Storage>(storage: &S, data: &[u8], destination: &str) -> Result<Placement> {
    let (folder_path, file_name) = split_destination(destination);

    if file_name.is_empty() {
        return Err(Error::InvalidFilename(format!(
            "Destination has no file name: '{}'",
            destination
        )));
    }

    let folder = get_or_make_folder(storage, folder_path).await?;

    if storage.has_file(&folder, file_name).await? {
        tracing::warn!(
            "{}/{} already exists. File not overwritten.",
            folder_path,
            file_name
        );
        return Ok(Placement::AlreadyExists);
    }

    storage.create_file(&folder, file_name, data).await?;
    tracing::info!("{}/{} saved.", folder_path, file_name);

    Ok(Placement::Created)
}
