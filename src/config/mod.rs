//! Configuration for wled-presetgen
//!
//! - **cli**: command line arguments (clap)
//! - **preset_table**: the presets to generate, built-in or loaded from TOML

pub mod cli;
pub mod preset_table;

pub use cli::{Cli, Command};
pub use preset_table::{Preset, PresetTable};
