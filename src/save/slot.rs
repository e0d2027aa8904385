//! Per-consumer save data
//!
//! A `SaveSlot` owns a save name and the handle it works with. On start it
//! registers with the manager and, depending on its options, creates the
//! save file or loads it.

use serde::{Deserialize, Serialize};

use super::data::{SaveData, SaveDataHandle};
use super::manager::{SaveManager, SaveOutcome};
use super::types::SaveError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotOptions {
    /// Run the save/load walkthrough right after start
    pub run_save_load_test_on_start: bool,
    /// Write the save file on start unless it already exists
    pub initialize_save_file_if_nonexistent: bool,
    pub load_save_file_on_start: bool,
    pub save_data_name: String,
}

impl Default for SlotOptions {
    fn default() -> Self {
        SlotOptions {
            run_save_load_test_on_start: false,
            initialize_save_file_if_nonexistent: false,
            load_save_file_on_start: false,
            save_data_name: "save".to_string(),
        }
    }
}

pub struct SaveSlot {
    options: SlotOptions,
    save_data: SaveDataHandle,
}

impl SaveSlot {
    pub fn new(options: SlotOptions) -> Self {
        SaveSlot {
            options,
            save_data: SaveData::new().into_handle(),
        }
    }

    pub fn name(&self) -> &str {
        &self.options.save_data_name
    }

    pub fn options(&self) -> &SlotOptions {
        &self.options
    }

    pub fn save_data(&self) -> &SaveDataHandle {
        &self.save_data
    }

    /// Mutable access for re-registration with the manager
    pub fn save_data_mut(&mut self) -> &mut SaveDataHandle {
        &mut self.save_data
    }

    /// Registers with `manager` and applies the startup options
    ///
    /// Registration never overwrites, so a slot started after another with
    /// the same name shares its data.
    pub fn start(&mut self, manager: &mut SaveManager) -> Result<(), SaveError> {
        manager.register_save_data(&self.options.save_data_name, &mut self.save_data, false);

        if self.options.initialize_save_file_if_nonexistent {
            manager.save(&self.options.save_data_name, "", false)?;
        }

        if self.options.load_save_file_on_start {
            self.load(manager)?;
        }

        Ok(())
    }

    /// Saves to the manager's default file
    pub fn save(&self, manager: &SaveManager) -> Result<SaveOutcome, SaveError> {
        manager.save(&self.options.save_data_name, "", true)
    }

    /// Loads the manager's default file and switches to the loaded data
    ///
    /// Returns false, keeping the current data, when there is no file.
    pub fn load(&mut self, manager: &mut SaveManager) -> Result<bool, SaveError> {
        match manager.load(&self.options.save_data_name, "")? {
            Some(loaded) => {
                self.save_data = loaded;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
