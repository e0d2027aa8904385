//! Key/value game save system with binary, JSON and XML files, plus the
//! lifecycle pieces the demo binary runs on.

pub mod config;
pub mod demo;
pub mod game;
pub mod save;

pub use config::{AppConfig, SaveConfig};
