//! Configuration management for pathcopy

mod settings;

// Re-export main types
pub use settings::{CONFIG_FILE_NAMES, CommandConfig, Config};
