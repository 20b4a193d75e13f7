//! Preset assembly
//!
//! Every preset has the same layout: base strip segment, qmk indicator
//! segment, then placeholder slots up to the device's segment count.

use crate::config::{Preset, PresetTable};
use crate::constants::preset::{BRIGHTNESS, EMPTY_SEGMENT_COUNT, MAIN_SEGMENT, TOTAL_SEGMENTS};
use crate::segments::{base_segment, empty_segments, qmk_segment};
use crate::types::{FullConfig, PresetDocument, Rgb, SegmentEntry};

/// Build one preset document
///
/// `main_sel` forces the base segment selected; `qmk_sel` sets the qmk segment's selection
pub fn build_preset(name: &str, color: Rgb, transition: u16, main_sel: bool, qmk_sel: bool) -> PresetDocument {
    let mut base = base_segment();
    if main_sel {
        base.selected = true;
    }

    let mut segments = Vec::with_capacity(TOTAL_SEGMENTS);
    segments.push(SegmentEntry::Full(base));
    segments.push(SegmentEntry::Full(qmk_segment(color, qmk_sel)));
    segments.extend(empty_segments(EMPTY_SEGMENT_COUNT).into_iter().map(SegmentEntry::Empty));

    PresetDocument {
        on: true,
        brightness: BRIGHTNESS,
        transition,
        main_segment: MAIN_SEGMENT,
        segments,
        name: name.to_string(),
    }
}

impl Preset {
    pub fn to_document(&self) -> PresetDocument {
        build_preset(&self.name, self.color, self.transition, self.main_sel, self.qmk_sel)
    }
}

/// Aggregate config: reserved slot "0", then each preset at its 1-based table position
pub fn build_full_config(table: &PresetTable) -> FullConfig {
    FullConfig {
        presets: table.iter().map(Preset::to_document).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;
    use serde_json::json;

    fn full(entry: &SegmentEntry) -> &Segment {
        match entry {
            SegmentEntry::Full(segment) => segment,
            SegmentEntry::Empty(_) => panic!("expected a full segment"),
        }
    }

    #[test]
    fn test_every_default_preset_has_32_segments() {
        for preset in PresetTable::default().iter() {
            let doc = preset.to_document();
            assert_eq!(doc.segments.len(), 32, "preset {}", preset.name);
        }
    }

    #[test]
    fn test_segment_layout_matches_preset() {
        for preset in PresetTable::default().iter() {
            let doc = preset.to_document();

            let base = full(&doc.segments[0]);
            assert_eq!(base.id, 0);
            assert_eq!(base.stop, 449);
            assert_eq!(base.effect, 115);
            assert_eq!(base.selected, preset.main_sel);

            let qmk = full(&doc.segments[1]);
            assert_eq!(qmk.id, 1);
            assert_eq!(qmk.name.as_deref(), Some("qmks-layer"));
            assert_eq!(qmk.colors, [preset.color, Rgb::BLACK, Rgb::BLACK]);
            assert_eq!(qmk.selected, preset.qmk_sel);

            for entry in &doc.segments[2..] {
                assert_eq!(serde_json::to_value(entry).unwrap(), json!({"stop": 0}));
            }
        }
    }

    #[test]
    fn test_main_sel_only_touches_base_selection() {
        let selected = build_preset("a", Rgb::BLACK, 1, true, true);
        let unselected = build_preset("a", Rgb::BLACK, 1, false, true);

        let mut base = full(&selected.segments[0]).clone();
        assert!(base.selected);
        base.selected = false;
        assert_eq!(&base, full(&unselected.segments[0]));
        assert_eq!(selected.segments[1], unselected.segments[1]);
    }

    #[test]
    fn test_qmk_layer_2_document() {
        let doc = build_preset("qmk-layer-2", Rgb::new(92, 172, 240), 1, false, true);
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["on"], json!(true));
        assert_eq!(value["bri"], json!(100));
        assert_eq!(value["transition"], json!(1));
        assert_eq!(value["mainseg"], json!(1));
        assert_eq!(value["n"], json!("qmk-layer-2"));
        assert_eq!(value["seg"][0]["sel"], json!(false));
        assert_eq!(value["seg"][1]["col"], json!([[92, 172, 240], [0, 0, 0], [0, 0, 0]]));
        assert_eq!(value["seg"][1]["sel"], json!(true));
        assert_eq!(value["seg"].as_array().unwrap().len(), 32);
    }

    #[test]
    fn test_document_field_order() {
        let text = serde_json::to_string(&build_preset("x", Rgb::BLACK, 3, false, false)).unwrap();
        assert!(text.starts_with(r#"{"on":true,"bri":100,"transition":3,"mainseg":1,"seg":["#));
        assert!(text.ends_with(r#"{"stop":0}],"n":"x"}"#));
    }

    #[test]
    fn test_background_preset() {
        let table = PresetTable::default();
        let background = table.iter().find(|p| p.name == "background").unwrap();
        let doc = background.to_document();
        assert_eq!(doc.transition, 7);
        assert!(full(&doc.segments[0]).selected);
        assert!(!full(&doc.segments[1]).selected);
    }

    #[test]
    fn test_full_config_keys_follow_table_order() {
        let table = PresetTable::default();
        let config = build_full_config(&table);
        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(value["0"], json!({}));
        for (index, preset) in table.iter().enumerate() {
            let key = (index + 1).to_string();
            assert_eq!(value[key.as_str()]["n"], json!(preset.name));
            assert_eq!(config.presets[index], preset.to_document());
        }
        assert_eq!(value.as_object().unwrap().len(), table.len() + 1);
    }

    #[test]
    fn test_full_config_key_order_past_nine() {
        let presets = (0..11)
            .map(|i| Preset::new(&format!("p{i}"), [i as u8, 0, 0], 1, false, true))
            .collect();
        let config = build_full_config(&PresetTable { presets });
        let text = serde_json::to_string(&config).unwrap();

        let pos = |key: &str| text.find(&format!("\"{key}\":")).unwrap();
        assert!(pos("0") < pos("1"));
        assert!(pos("9") < pos("10"));
        assert!(pos("10") < pos("11"));
    }
}
