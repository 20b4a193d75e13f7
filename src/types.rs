//! Core data types for WLED preset documents
//!
//! Field order and serialized names match what the device exports from
//! `/presets.json`, so generated files can be diffed against a device backup.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// RGB color triple as stored in a segment's `col` slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self([red, green, blue])
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(value: [u8; 3]) -> Self {
        Self(value)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    /// Parse `#RRGGBB` (leading `#` optional)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            anyhow::bail!("Invalid hex color '{}': expected #RRGGBB", s);
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|e| anyhow::anyhow!("Invalid hex color '{}': {}", s, e))
        };
        Ok(Self([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }
}

/// Accepts either `[r, g, b]` or `"#RRGGBB"`
impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ArrayOrHex {
            Array([u8; 3]),
            Hex(String),
        }

        match ArrayOrHex::deserialize(deserializer)? {
            ArrayOrHex::Array(rgb) => Ok(Self(rgb)),
            ArrayOrHex::Hex(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// A fully specified segment
///
/// Both the base strip segment and the qmk indicator segment use this shape;
/// they differ only in field values. `name` is written only when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: u8,
    pub start: u16,
    pub stop: u16,
    #[serde(rename = "grp")]
    pub grouping: u8,
    #[serde(rename = "spc")]
    pub spacing: u8,
    #[serde(rename = "of")]
    pub offset: u16,
    pub on: bool,
    #[serde(rename = "frz")]
    pub frozen: bool,
    #[serde(rename = "bri")]
    pub brightness: u8,
    pub cct: u8,
    pub set: u8,
    #[serde(rename = "n", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Primary, secondary and tertiary colors
    #[serde(rename = "col")]
    pub colors: [Rgb; 3],
    #[serde(rename = "fx")]
    pub effect: u8,
    #[serde(rename = "sx")]
    pub speed: u8,
    #[serde(rename = "ix")]
    pub intensity: u8,
    #[serde(rename = "pal")]
    pub palette: u8,
    #[serde(rename = "c1")]
    pub custom1: u8,
    #[serde(rename = "c2")]
    pub custom2: u8,
    #[serde(rename = "c3")]
    pub custom3: u8,
    #[serde(rename = "sel")]
    pub selected: bool,
    #[serde(rename = "rev")]
    pub reversed: bool,
    #[serde(rename = "mi")]
    pub mirror: bool,
    // Effect option checkboxes
    pub o1: bool,
    pub o2: bool,
    pub o3: bool,
    /// Sound simulation mode
    #[serde(rename = "si")]
    pub sound_sim: u8,
    /// 1D to 2D mapping mode
    #[serde(rename = "m12")]
    pub mapping: u8,
}

/// Unused segment slot; the device expects exactly `{"stop": 0}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmptySegment {
    pub stop: u16,
}

/// One entry of a preset's `seg` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SegmentEntry {
    Full(Segment),
    Empty(EmptySegment),
}

/// A complete preset as stored by the device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetDocument {
    pub on: bool,
    #[serde(rename = "bri")]
    pub brightness: u8,
    pub transition: u16,
    #[serde(rename = "mainseg")]
    pub main_segment: u8,
    #[serde(rename = "seg")]
    pub segments: Vec<SegmentEntry>,
    #[serde(rename = "n")]
    pub name: String,
}

/// The aggregate preset file
///
/// Serializes as `{"0": {}, "1": <preset>, "2": <preset>, ...}`. Slot 0 is
/// reserved by the device and always empty; keys stay in numeric order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FullConfig {
    pub presets: Vec<PresetDocument>,
}

impl FullConfig {
    /// Keys in serialization order, including the reserved slot
    pub fn keys(&self) -> Vec<String> {
        (0..=self.presets.len()).map(|i| i.to_string()).collect()
    }
}

#[derive(Serialize)]
struct EmptySlot {}

impl Serialize for FullConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.presets.len() + 1))?;
        map.serialize_entry(crate::constants::preset::RESERVED_SLOT_KEY, &EmptySlot {})?;
        for (index, preset) in self.presets.iter().enumerate() {
            map.serialize_entry(&(index + 1).to_string(), preset)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_hex() {
        assert_eq!("#5CACF0".parse::<Rgb>().unwrap(), Rgb::new(92, 172, 240));
        assert_eq!("ff7800".parse::<Rgb>().unwrap(), Rgb::new(255, 120, 0));
    }

    #[test]
    fn test_rgb_from_hex_invalid() {
        assert!("#FFF".parse::<Rgb>().is_err());
        assert!("#GG0000".parse::<Rgb>().is_err());
        assert!("".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_rgb_display() {
        assert_eq!(Rgb::new(66, 205, 255).to_string(), "#42CDFF");
    }

    #[test]
    fn test_rgb_deserialize_array_or_hex() {
        let from_array: Rgb = serde_json::from_str("[247, 150, 250]").unwrap();
        let from_hex: Rgb = serde_json::from_str("\"#F796FA\"").unwrap();
        assert_eq!(from_array, from_hex);
    }

    #[test]
    fn test_rgb_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rgb>("[256, 0, 0]").is_err());
        assert!(serde_json::from_str::<Rgb>("[1, 2]").is_err());
        assert!(serde_json::from_str::<Rgb>("[1, 2, 3, 4]").is_err());
    }

    #[test]
    fn test_rgb_serializes_as_array() {
        assert_eq!(serde_json::to_string(&Rgb::new(1, 2, 3)).unwrap(), "[1,2,3]");
    }

    #[test]
    fn test_empty_segment_json() {
        assert_eq!(serde_json::to_string(&EmptySegment::default()).unwrap(), r#"{"stop":0}"#);
    }

    #[test]
    fn test_segment_entry_deserialize_empty() {
        let entry: SegmentEntry = serde_json::from_str(r#"{"stop":0}"#).unwrap();
        assert_eq!(entry, SegmentEntry::Empty(EmptySegment { stop: 0 }));
    }

    #[test]
    fn test_full_config_empty_table() {
        let config = FullConfig::default();
        assert_eq!(serde_json::to_string(&config).unwrap(), r#"{"0":{}}"#);
        assert_eq!(config.keys(), vec!["0".to_string()]);
    }

    #[test]
    fn test_full_config_single_preset() {
        let doc = PresetDocument {
            on: true,
            brightness: 100,
            transition: 1,
            main_segment: 1,
            segments: Vec::new(),
            name: "only".to_string(),
        };
        let config = FullConfig { presets: vec![doc] };
        assert_eq!(
            serde_json::to_string(&config).unwrap(),
            r#"{"0":{},"1":{"on":true,"bri":100,"transition":1,"mainseg":1,"seg":[],"n":"only"}}"#
        );
        assert_eq!(config.keys(), vec!["0".to_string(), "1".to_string()]);
    }
}
