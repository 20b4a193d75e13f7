//! Application-wide constants
//!
//! Wire defaults for the WLED preset format, output file names and the
//! compiled-in defaults used when nothing is passed on the command line.

/// Configuration file locations
pub mod config {
    /// Application directory name under the user config dir
    pub const APP_DIR: &str = "wled-presetgen";

    /// Preset table file name
    pub const PRESETS_FILENAME: &str = "presets.toml";

    /// Default output directory for generated files
    pub const DEFAULT_OUTPUT_DIR: &str = "src/generated_configs";
}

/// Device probe constants
pub mod device {
    /// Address of the WLED controller on the local network
    pub const DEFAULT_HOST: &str = "192.168.86.43";

    /// JSON API path returning the current device state
    pub const STATE_PATH: &str = "/json/state";

    /// Probe timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
}

/// Generated file names
pub mod files {
    pub const SEGMENT_BASE: &str = "segment_base.json";
    pub const SEGMENT_QMK_TEMPLATE: &str = "segment_qmk_template.json";
    pub const SEGMENTS_EMPTY: &str = "segments_empty.json";
    pub const FULL_CONFIG: &str = "recreated_config.json";

    /// Prefix for per-preset files (`preset_<name>.json`)
    pub const PRESET_PREFIX: &str = "preset_";

    /// Indent for segment and per-preset files
    pub const INDENT: &[u8] = b"  ";

    /// Indent for the aggregate config
    pub const FULL_CONFIG_INDENT: &[u8] = b"    ";
}

/// Preset document defaults
pub mod preset {
    pub const BRIGHTNESS: u8 = 100;

    /// Index of the qmk segment, reported as the main segment
    pub const MAIN_SEGMENT: u8 = 1;

    /// Placeholder segments appended after base + qmk
    pub const EMPTY_SEGMENT_COUNT: usize = 30;

    /// Total segments in every preset document
    pub const TOTAL_SEGMENTS: usize = 2 + EMPTY_SEGMENT_COUNT;

    /// Key of the reserved empty slot in the aggregate config
    pub const RESERVED_SLOT_KEY: &str = "0";

    // Defaults for optional keys in preset files
    pub const DEFAULT_TRANSITION: u16 = 1;
    pub const DEFAULT_MAIN_SEL: bool = false;
    pub const DEFAULT_QMK_SEL: bool = true;
}

/// Segment layout on the light strip
pub mod segment {
    use crate::types::Rgb;

    /// Main strip: LEDs 0..=449
    pub const BASE_ID: u8 = 0;
    pub const BASE_START: u16 = 0;
    pub const BASE_STOP: u16 = 449;
    pub const BASE_EFFECT: u8 = 115;
    pub const BASE_PALETTE: u8 = 9;
    pub const BASE_COLOR: Rgb = Rgb::new(255, 207, 33);

    /// Keyboard layer indicator: LEDs 450..470
    pub const QMK_ID: u8 = 1;
    pub const QMK_START: u16 = 450;
    pub const QMK_STOP: u16 = 470;
    pub const QMK_NAME: &str = "qmks-layer";
    pub const QMK_EFFECT: u8 = 0;
    pub const QMK_PALETTE: u8 = 0;

    /// Color of the qmk template file
    pub const QMK_TEMPLATE_COLOR: Rgb = Rgb::new(255, 255, 255);

    // Shared by both segment shapes
    pub const GROUPING: u8 = 1;
    pub const BRIGHTNESS: u8 = 255;
    pub const CCT: u8 = 127;
    pub const SPEED: u8 = 128;
    pub const INTENSITY: u8 = 128;
    pub const CUSTOM1: u8 = 128;
    pub const CUSTOM2: u8 = 128;
    pub const CUSTOM3: u8 = 16;
}
