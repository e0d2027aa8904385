//! Save/Load system
//!
//! This module provides a small key/value save system with:
//! - Typed get/set of ints, floats and strings (`SaveData`)
//! - A registry of named save data shared between consumers (`SaveManager`)
//! - Binary, JSON and XML save files under a fixed set of directories
//!
//! # Architecture
//!
//! - `types`: values, formats and error types
//! - `data`: the `SaveData` store
//! - `format`: per-format encoding
//! - `directories`: base directory table
//! - `manager`: registry and file operations
//! - `slot`: per-consumer registration and startup behaviour
//!
//! # Example Usage
//!
//! ```ignore
//! let mut save_manager = SaveManager::new(&SaveConfig::default());
//!
//! let mut handle = SaveData::new().into_handle();
//! save_manager.register_save_data("save", &mut handle, false);
//! handle.borrow_mut().set_int("level", 3);
//!
//! save_manager.save("save", "", true)?;
//! let loaded = save_manager.load("save", "")?;
//! ```

pub mod data;
pub mod directories;
pub mod format;
pub mod manager;
pub mod slot;
pub mod types;

// Re-export commonly used types
pub use data::{SaveData, SaveDataHandle};
pub use directories::{DirectoryTable, SaveDirectory};
pub use manager::{SaveFileInfo, SaveManager, SaveOutcome};
pub use slot::{SaveSlot, SlotOptions};
pub use types::*;
