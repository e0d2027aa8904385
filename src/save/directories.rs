//! Well-known save directories
//!
//! Save files may only live under one of a fixed set of base directories.
//! The table is resolved once at startup from the platform's special
//! folders, or rooted under a single directory for tests and sandboxes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::types::SaveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaveDirectory {
    /// Game data folder next to the executable
    DataPath,
    DocumentsDirectory,
    /// Per-user application data
    PersistentDataPath,
    /// Read-mostly assets shipped inside the data folder
    StreamingAssetsPath,
    TemporaryCachePath,
}

impl SaveDirectory {
    pub const ALL: [SaveDirectory; 5] = [
        SaveDirectory::DataPath,
        SaveDirectory::DocumentsDirectory,
        SaveDirectory::PersistentDataPath,
        SaveDirectory::StreamingAssetsPath,
        SaveDirectory::TemporaryCachePath,
    ];

    fn folder_name(self) -> &'static str {
        match self {
            SaveDirectory::DataPath => "data",
            SaveDirectory::DocumentsDirectory => "documents",
            SaveDirectory::PersistentDataPath => "persistent",
            SaveDirectory::StreamingAssetsPath => "streaming_assets",
            SaveDirectory::TemporaryCachePath => "temporary_cache",
        }
    }
}

/// Maps each `SaveDirectory` to a concrete path
#[derive(Debug, Clone)]
pub struct DirectoryTable {
    paths: HashMap<SaveDirectory, PathBuf>,
}

impl DirectoryTable {
    /// Resolves the platform directories for `app_name`
    ///
    /// Directories the platform can't provide are left out; using one later
    /// fails with `SaveError::DirectoryUnavailable`.
    pub fn resolve(app_name: &str) -> Self {
        let mut paths = HashMap::new();

        let data_path = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .map(|dir| dir.join(format!("{}_Data", app_name)));

        if let Some(data_path) = data_path {
            paths.insert(
                SaveDirectory::StreamingAssetsPath,
                data_path.join("StreamingAssets"),
            );
            paths.insert(SaveDirectory::DataPath, data_path);
        }

        if let Some(documents) = dirs::document_dir().or_else(dirs::home_dir) {
            paths.insert(SaveDirectory::DocumentsDirectory, documents);
        }

        if let Some(data_dir) = dirs::data_dir() {
            paths.insert(SaveDirectory::PersistentDataPath, data_dir.join(app_name));
        }

        let cache = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
        paths.insert(SaveDirectory::TemporaryCachePath, cache.join(app_name));

        for (directory, path) in &paths {
            log::debug!("{:?} -> {}", directory, path.display());
        }

        DirectoryTable { paths }
    }

    /// Puts every directory in its own subfolder of `root`
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let paths = SaveDirectory::ALL
            .into_iter()
            .map(|directory| (directory, root.join(directory.folder_name())))
            .collect();

        DirectoryTable { paths }
    }

    pub fn get(&self, directory: SaveDirectory) -> Result<&Path, SaveError> {
        self.paths
            .get(&directory)
            .map(PathBuf::as_path)
            .ok_or(SaveError::DirectoryUnavailable(directory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rooted_table_covers_every_directory() {
        let table = DirectoryTable::rooted_at("/tmp/saves");
        for directory in SaveDirectory::ALL {
            let path = table.get(directory).unwrap();
            assert!(path.starts_with("/tmp/saves"));
        }
    }

    #[test]
    fn test_rooted_directories_are_distinct() {
        let table = DirectoryTable::rooted_at("/tmp/saves");
        let persistent = table.get(SaveDirectory::PersistentDataPath).unwrap();
        let cache = table.get(SaveDirectory::TemporaryCachePath).unwrap();
        assert_ne!(persistent, cache);
    }

    #[test]
    fn test_resolved_table_has_cache_dir() {
        let table = DirectoryTable::resolve("save_manager_test");
        let cache = table.get(SaveDirectory::TemporaryCachePath).unwrap();
        assert!(cache.ends_with("save_manager_test"));
    }

    #[test]
    fn test_missing_directory_is_error() {
        let table = DirectoryTable { paths: HashMap::new() };
        assert!(matches!(
            table.get(SaveDirectory::DataPath),
            Err(SaveError::DirectoryUnavailable(SaveDirectory::DataPath))
        ));
    }
}
