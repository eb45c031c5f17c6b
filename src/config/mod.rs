//! Configuration management for tend.
//!
//! This module handles loading and saving configuration from `~/.tend/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig};
