//! Segment builders
//!
//! Fixed segment shapes shared by every generated preset. All builders are
//! pure and return fresh values.

use crate::constants::segment::*;
use crate::types::{EmptySegment, Rgb, Segment};

/// Main light strip segment, effect 115 over LEDs 0..=449, not selected
pub fn base_segment() -> Segment {
    Segment {
        id: BASE_ID,
        start: BASE_START,
        stop: BASE_STOP,
        grouping: GROUPING,
        spacing: 0,
        offset: 0,
        on: true,
        frozen: false,
        brightness: BRIGHTNESS,
        cct: CCT,
        set: 0,
        name: None,
        colors: [BASE_COLOR, Rgb::BLACK, Rgb::BLACK],
        effect: BASE_EFFECT,
        speed: SPEED,
        intensity: INTENSITY,
        palette: BASE_PALETTE,
        custom1: CUSTOM1,
        custom2: CUSTOM2,
        custom3: CUSTOM3,
        selected: false,
        reversed: false,
        mirror: false,
        o1: false,
        o2: false,
        o3: false,
        sound_sim: 0,
        mapping: 0,
    }
}

/// Keyboard layer indicator segment showing a solid `color`
pub fn qmk_segment(color: Rgb, selected: bool) -> Segment {
    Segment {
        id: QMK_ID,
        start: QMK_START,
        stop: QMK_STOP,
        name: Some(QMK_NAME.to_string()),
        colors: [color, Rgb::BLACK, Rgb::BLACK],
        effect: QMK_EFFECT,
        palette: QMK_PALETTE,
        selected,
        ..base_segment()
    }
}

/// The qmk segment written to the template file
pub fn qmk_template() -> Segment {
    qmk_segment(QMK_TEMPLATE_COLOR, true)
}

pub fn empty_segments(count: usize) -> Vec<EmptySegment> {
    vec![EmptySegment::default(); count]
}
