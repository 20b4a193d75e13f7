//! Preset table configuration
//!
//! The list of presets to generate, in device slot order. Loaded from a TOML
//! file when one is available, otherwise the built-in table is used.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

use crate::constants::preset::{DEFAULT_MAIN_SEL, DEFAULT_QMK_SEL, DEFAULT_TRANSITION};
use crate::types::Rgb;

/// A named preset: indicator color plus selection flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub color: Rgb,
    /// Transition time in device units (100 ms steps)
    #[serde(default = "default_transition")]
    pub transition: u16,
    /// Select the base strip segment when the preset is applied
    #[serde(default = "default_main_sel")]
    pub main_sel: bool,
    /// Select the qmk indicator segment when the preset is applied
    #[serde(default = "default_qmk_sel")]
    pub qmk_sel: bool,
}

/// Ordered preset table; position N becomes slot N+1 in the aggregate config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetTable {
    #[serde(default)]
    pub presets: Vec<Preset>,
}

fn default_transition() -> u16 {
    DEFAULT_TRANSITION
}

fn default_main_sel() -> bool {
    DEFAULT_MAIN_SEL
}

fn default_qmk_sel() -> bool {
    DEFAULT_QMK_SEL
}

impl Preset {
    pub fn new(name: &str, color: [u8; 3], transition: u16, main_sel: bool, qmk_sel: bool) -> Self {
        Self {
            name: name.to_string(),
            color: color.into(),
            transition,
            main_sel,
            qmk_sel,
        }
    }

    /// File name for the per-preset output (`preset_qmk_layer_1.json`)
    pub fn file_name(&self) -> String {
        format!(
            "{}{}.json",
            crate::constants::files::PRESET_PREFIX,
            self.name.replace('-', "_")
        )
    }
}

/// Exactly one normal path component, no separators on any platform
fn is_plain_file_name(file_name: &str) -> bool {
    if file_name.contains(['/', '\\', '\0']) {
        return false;
    }
    let mut components = Path::new(file_name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == file_name
    )
}

fn default_presets() -> Vec<Preset> {
    vec![
        Preset::new("qmk-layer-1", [255, 252, 251], 1, false, true), // base layer
        Preset::new("qmk-layer-2", [92, 172, 240], 1, false, true),  // mouse layer
        Preset::new("qmk-layer-3", [247, 150, 250], 1, false, true), // symbols layer
        Preset::new("qmk-layer-4", [207, 250, 150], 1, false, true), // nav layer
        Preset::new("qmk-layer-5", [255, 0, 0], 1, false, true),     // rect layer
        Preset::new("qmk-layer-6", [171, 0, 255], 1, false, true),   // vscode layer
        Preset::new("qmk-layer-7", [255, 120, 0], 1, false, true),   // fusion layer
        Preset::new("qmk-layer-8", [255, 0, 0], 1, false, true),     // mgmt layer
        Preset::new("background", [66, 205, 255], 7, true, false),
    ]
}

impl Default for PresetTable {
    fn default() -> Self {
        Self {
            presets: default_presets(),
        }
    }
}

impl PresetTable {
    /// `<config_dir>/wled-presetgen/presets.toml`
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::PRESETS_FILENAME);
        path
    }

    /// Pick the table for this run
    /// Priority: explicit path (must exist) > user config file (if present) > built-in
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let path = Self::default_path();
        if path.exists() {
            return Self::load(&path);
        }

        debug!(path = %path.display(), "No preset file found, using built-in table");
        Ok(Self::default())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read preset table from {}", path.display()))?;
        let table = Self::from_toml(&contents)
            .with_context(|| format!("Invalid preset table in {}", path.display()))?;
        info!(path = %path.display(), count = table.presets.len(), "Loaded preset table");
        Ok(table)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let table: PresetTable = toml::from_str(contents).context("Failed to parse TOML")?;
        table.validate()?;
        Ok(table)
    }

    /// Names identify presets and become file names.
    ///
    /// Each name must be non-empty, unique, and map to a distinct plain file
    /// name inside the output directory (`a-b` and `a_b` both map to
    /// `preset_a_b.json`). Runs before anything is written.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        let mut file_names = HashMap::new();
        for (index, preset) in self.presets.iter().enumerate() {
            if preset.name.trim().is_empty() {
                bail!("Preset #{} has an empty name", index + 1);
            }
            if !names.insert(preset.name.as_str()) {
                bail!("Duplicate preset name '{}'", preset.name);
            }

            let file_name = preset.file_name();
            if !is_plain_file_name(&file_name) {
                bail!("Preset name '{}' cannot be used as a file name", preset.name);
            }
            if let Some(other) = file_names.insert(file_name.clone(), preset.name.as_str()) {
                bail!(
                    "Presets '{}' and '{}' would both be written to {}",
                    other,
                    preset.name,
                    file_name
                );
            }
        }
        Ok(())
    }

    /// Write the table as TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize preset table to TOML")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write preset table to {}", path.display()))?;
        info!(path = %path.display(), "Saved preset table");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }
}
