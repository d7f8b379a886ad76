//! Native filesystem provider implementation using `tokio::fs`.

use log::warn;
use std::path::Path;
use tokio::fs;

use crate::error::{ProvisionerError, ProvisionerResult};

/// Native filesystem provider using `tokio::fs` for async file operations.
#[derive(Debug, Clone)]
pub struct NativeFileSystemProvider;

impl NativeFileSystemProvider {
    /// Read the entire contents of a file as a UTF-8 string.
    pub async fn read_file(path: impl AsRef<Path>) -> ProvisionerResult<String> {
        fs::read_to_string(path.as_ref())
            .await
            .map_err(|e| ProvisionerError::file_system("read", path.as_ref(), e))
    }

    /// List the names of regular files in a directory.
    ///
    /// Does not recurse. Symlinks are followed; subdirectories, dangling links and other
    /// non-file entries are skipped, as are names that are not valid UTF-8. Names are sorted so that plans are stable across runs.
    pub async fn list_file_names(dir: &Path) -> ProvisionerResult<Vec<String>> {
        let metadata = fs::metadata(dir)
            .await
            .map_err(|e| ProvisionerError::file_system("access directory", dir, e))?;

        if !metadata.is_dir() {
            return Err(ProvisionerError::file_system(
                "list files",
                dir,
                std::io::Error::new(std::io::ErrorKind::Other, "Path is not a directory"),
            ));
        }

        let mut names = Vec::new();
        let mut entries = fs::read_dir(dir)
            .await
            .map_err(|e| ProvisionerError::file_system("read directory", dir, e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ProvisionerError::file_system("read directory entry", dir, e))?
        {
            let path = entry.path();
            // Follows symlinks, so a link to a regular file is listed like the file itself.
            let metadata = match fs::metadata(&path).await {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    warn!("Skipping dangling symlink: {}", path.display());
                    continue;
                }
                Err(e) => return Err(ProvisionerError::file_system("read metadata", &path, e)),
            };

            if !metadata.is_file() {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!("Skipping non UTF-8 file name: {:?}", raw),
            }
        }

        names.sort();

        Ok(names)
    }
}
