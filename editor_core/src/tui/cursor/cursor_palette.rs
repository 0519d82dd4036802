// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::{IndicatorRelation, RgbValue, TuiColor};

/// Colors of the cursor indicators, one per [`IndicatorRelation`], plus the text color
/// that is used on top of them outside of insert mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CursorPalette {
    pub start_exclusive: TuiColor,
    pub start_inclusive: TuiColor,
    pub offset_active: TuiColor,
    pub offset_inactive: TuiColor,
    pub stop_inclusive: TuiColor,
    pub stop_exclusive: TuiColor,
    pub clear: TuiColor,
    pub cursor_text: TuiColor,
}

impl Default for CursorPalette {
    fn default() -> Self {
        let green = TuiColor::Rgb(RgbValue::from_u8(0x00, 0xFF, 0x00));
        let gray = TuiColor::Rgb(RgbValue::from_u8(0xBB, 0xBB, 0xBB));
        Self {
            start_exclusive: green,
            start_inclusive: green,
            offset_active: TuiColor::Rgb(RgbValue::from_u8(0xFF, 0xFF, 0x11)),
            offset_inactive: gray,
            // Orange, between yellow and red.
            stop_inclusive: TuiColor::Rgb(RgbValue::from_u8(0xFF, 0xBE, 0x61)),
            stop_exclusive: TuiColor::Rgb(RgbValue::from_u8(0xFF, 0x00, 0x00)),
            clear: gray,
            cursor_text: TuiColor::Rgb(RgbValue::from_u8(0x00, 0x00, 0x00)),
        }
    }
}

impl CursorPalette {
    #[must_use]
    pub fn color_for(&self, relation: IndicatorRelation) -> TuiColor {
        match relation {
            IndicatorRelation::StartExclusive => self.start_exclusive,
            IndicatorRelation::StartInclusive => self.start_inclusive,
            IndicatorRelation::OffsetActive => self.offset_active,
            IndicatorRelation::StopInclusive => self.stop_inclusive,
            IndicatorRelation::StopExclusive => self.stop_exclusive,
            IndicatorRelation::Clear => self.clear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_palette_json_uses_relation_names() {
        let palette = CursorPalette::default();
        let json = serde_json::to_value(palette).unwrap();
        assert!(json.get("stop-inclusive").is_some());
        assert!(json.get("cursor-text").is_some());

        let round_trip: CursorPalette = serde_json::from_value(json).unwrap();
        assert_eq2!(round_trip, palette);
        assert_eq2!(
            palette.color_for(IndicatorRelation::StartExclusive),
            palette.color_for(IndicatorRelation::StartInclusive)
        );
        assert_eq2!(palette.color_for(IndicatorRelation::Clear), palette.offset_inactive);
    }
}
