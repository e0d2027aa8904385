//! Save manager for handling save/load operations
//!
//! This module provides the SaveManager struct which handles:
//! - The registry of named `SaveData` handles
//! - Saving a registered handle to a file in the current format
//! - Loading a file back into the registry
//! - Save file listing for the current directory

use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;

use super::data::{SaveData, SaveDataHandle};
use super::directories::{DirectoryTable, SaveDirectory};
use super::format;
use super::types::{DataType, SaveError};
use crate::config::SaveConfig;

/// Result of a `save` call that didn't fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Written(PathBuf),
    /// File already existed and overwriting was disabled
    Skipped(PathBuf),
}

pub struct SaveManager {
    directories: DirectoryTable,
    default_path: SaveDirectory,
    default_data_type: DataType,
    default_file_name: String,
    registry: HashMap<String, SaveDataHandle>,
}

impl SaveManager {
    /// Creates a manager using the platform directories for `config.app_name`
    pub fn new(config: &SaveConfig) -> Self {
        Self::with_directories(config, DirectoryTable::resolve(&config.app_name))
    }

    pub fn with_directories(config: &SaveConfig, directories: DirectoryTable) -> Self {
        SaveManager {
            directories,
            default_path: config.default_path,
            default_data_type: config.default_data_type,
            default_file_name: config.default_file_name.clone(),
            registry: HashMap::new(),
        }
    }

    pub fn set_default_data_type(&mut self, data_type: DataType) {
        self.default_data_type = data_type;
    }

    pub fn set_default_file_name(&mut self, file_name: &str) {
        self.default_file_name = file_name.to_string();
    }

    pub fn set_default_path(&mut self, path: SaveDirectory) {
        self.default_path = path;
    }

    pub fn default_data_type(&self) -> DataType {
        self.default_data_type
    }

    /// Registers `save_data` under `name`
    ///
    /// - name unknown: the caller's handle becomes the registry entry
    /// - name known, `overwrite`: the registry entry is replaced by the caller's
    /// - name known, no `overwrite`: the caller's handle is replaced by the
    ///   registry's, so both share one instance
    pub fn register_save_data(
        &mut self,
        name: &str,
        save_data: &mut SaveDataHandle,
        overwrite: bool,
    ) {
        if !overwrite {
            if let Some(existing) = self.registry.get(name) {
                *save_data = Rc::clone(existing);
                return;
            }
        }
        self.registry.insert(name.to_string(), Rc::clone(save_data));
    }

    /// Registers a fresh empty `SaveData` under `name` and returns the handle
    /// now registered there (the existing one if `name` is taken)
    pub fn register_new(&mut self, name: &str) -> SaveDataHandle {
        let mut handle = SaveData::new().into_handle();
        self.register_save_data(name, &mut handle, false);
        handle
    }

    pub fn get_save_data(&self, name: &str) -> Option<SaveDataHandle> {
        self.registry.get(name).cloned()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    /// Builds `{base directory}/{file name}{extension}`
    ///
    /// An empty `file_path` uses the default file name. The name must be
    /// relative and stay inside the base directory.
    pub fn resolve_path(&self, file_path: &str) -> Result<PathBuf, SaveError> {
        let file_name = if file_path.is_empty() {
            self.default_file_name.as_str()
        } else {
            file_path
        };

        let path = Path::new(file_name);
        let confined = path
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        // `components` normalizes away a trailing "/" or "/.", so check the raw text
        let last_segment = file_name.rsplit(std::path::is_separator).next().unwrap_or("");
        let names_a_file = !matches!(last_segment, "" | "." | "..");
        if !confined || !names_a_file {
            return Err(SaveError::InvalidFileName(file_name.to_string()));
        }

        let base = self.directories.get(self.default_path)?;
        let full_name = format!("{}{}", file_name, self.default_data_type.extension());
        Ok(base.join(full_name))
    }

    /// Writes the data registered under `name` in the current format
    pub fn save(
        &self,
        name: &str,
        file_path: &str,
        overwrite_existing_file: bool,
    ) -> Result<SaveOutcome, SaveError> {
        let path = self.resolve_path(file_path)?;

        if !overwrite_existing_file && path.exists() {
            log::info!(
                "Failed to save: File exists and isn't overwritten: {}",
                path.display()
            );
            return Ok(SaveOutcome::Skipped(path));
        }

        let handle = self
            .registry
            .get(name)
            .ok_or_else(|| SaveError::NotRegistered(name.to_string()))?;
        let bytes = format::encode(self.default_data_type, &handle.borrow())?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, bytes)?;

        log::info!("Saved '{}' to: {}", name, path.display());
        Ok(SaveOutcome::Written(path))
    }

    /// Reads a file in the current format into the registry under `name`
    ///
    /// Returns `Ok(None)` when the file doesn't exist. A successful load
    /// registers a new handle; holders of the previous one keep the old data
    /// until they re-register.
    pub fn load(&mut self, name: &str, file_path: &str) -> Result<Option<SaveDataHandle>, SaveError> {
        let path = self.resolve_path(file_path)?;

        if !path.exists() {
            log::info!("Failed to load: File does not exist: {}", path.display());
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let handle = format::decode(self.default_data_type, &bytes)?.into_handle();
        self.registry.insert(name.to_string(), Rc::clone(&handle));

        log::info!("Loaded '{}' from: {}", name, path.display());
        Ok(Some(handle))
    }

    /// Check if a save file exists for the given name in the current settings
    pub fn save_exists(&self, file_path: &str) -> bool {
        self.resolve_path(file_path)
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// List all save files in the current directory, newest first
    pub fn list_saves(&self) -> Result<Vec<SaveFileInfo>, SaveError> {
        let directory = self.directories.get(self.default_path)?;
        let mut saves = Vec::new();

        if !directory.exists() {
            return Ok(saves);
        }

        for entry in fs::read_dir(directory)? {
            let entry = entry?;
            let path = entry.path();

            let Some(data_type) = path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(DataType::from_extension)
            else {
                continue;
            };
            let Some(file_name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let modified: DateTime<Local> = entry.metadata()?.modified()?.into();
            saves.push(SaveFileInfo {
                file_name: file_name.to_string(),
                data_type,
                modified,
                path: path.clone(),
            });
        }

        saves.sort_by(|a, b| b.modified.cmp(&a.modified));

        Ok(saves)
    }
}

#[derive(Debug, Clone)]
pub struct SaveFileInfo {
    /// Name without extension, as passed to `save`/`load`
    pub file_name: String,
    pub data_type: DataType,
    pub modified: DateTime<Local>,
    pub path: PathBuf,
}

impl SaveFileInfo {
    pub fn modified_label(&self) -> String {
        self.modified.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
