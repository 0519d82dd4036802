// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};

/// How a cursor indicator relates to the horizontal range it belongs to. Each class gets
/// its own color from the [`crate::CursorPalette`].
///
/// ```text
///            start                 stop
///              ▼                    ▼
///  ┌─────────┬───┬───────────────┬───┬──────────────┐
///  │ before  │on │    inside     │on │ on or after  │
///  └─────────┴───┴───────────────┴───┴──────────────┘
///   start-     start-  offset-    stop-  stop-
///   exclusive  inclusive active   inclusive exclusive
/// ```
///
/// An indicator over no text at all is [`IndicatorRelation::Clear`].
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum IndicatorRelation {
    StartExclusive,
    StartInclusive,
    OffsetActive,
    StopInclusive,
    StopExclusive,
    Clear,
}

impl IndicatorRelation {
    /// Classify `position` against the `start..stop` range. The checks are made in order,
    /// so an empty range reports [`IndicatorRelation::StopExclusive`], and a one unit
    /// range reports [`IndicatorRelation::StartInclusive`] for its only unit.
    #[must_use]
    pub fn classify(start: isize, stop: isize, position: isize) -> Self {
        if position >= stop {
            IndicatorRelation::StopExclusive
        } else if position < start {
            IndicatorRelation::StartExclusive
        } else if position == start {
            IndicatorRelation::StartInclusive
        } else if position == stop - 1 {
            IndicatorRelation::StopInclusive
        } else {
            IndicatorRelation::OffsetActive
        }
    }

    /// Like [`Self::classify`], but an indicator that covers no text is
    /// [`IndicatorRelation::Clear`].
    #[must_use]
    pub fn classify_marker(start: isize, stop: isize, position: isize, is_empty: bool) -> Self {
        if is_empty {
            IndicatorRelation::Clear
        } else {
            Self::classify(start, stop, position)
        }
    }

    /// The five way numeric relation of `position` to `start..stop`.
    ///
    /// | Value | Meaning                           |
    /// | ----- | --------------------------------- |
    /// | `-2`  | before the first unit             |
    /// | `-1`  | on the first unit                 |
    /// | `0`   | between the first and last units  |
    /// | `+1`  | on the last unit, `stop - 1`      |
    /// | `+2`  | on or after the exclusive `stop`  |
    #[must_use]
    pub fn relation(start: isize, stop: isize, position: isize) -> i8 {
        if position < start {
            -2
        } else if position >= stop {
            2
        } else if position == start {
            -1
        } else if position == stop - 1 {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;
    use test_case::test_case;

    use super::*;
    use crate::assert_eq2;

    #[test_case(2, 4, 1 => IndicatorRelation::StartExclusive ; "before start")]
    #[test_case(2, 4, 2 => IndicatorRelation::StartInclusive ; "on start")]
    #[test_case(2, 6, 3 => IndicatorRelation::OffsetActive ; "inside")]
    #[test_case(2, 4, 3 => IndicatorRelation::StopInclusive ; "on last unit")]
    #[test_case(2, 4, 4 => IndicatorRelation::StopExclusive ; "on stop")]
    #[test_case(2, 2, 2 => IndicatorRelation::StopExclusive ; "empty range")]
    #[test_case(2, 3, 2 => IndicatorRelation::StartInclusive ; "single unit range")]
    fn test_classify(start: isize, stop: isize, position: isize) -> IndicatorRelation {
        IndicatorRelation::classify(start, stop, position)
    }

    #[test_case(0, 5, -1 => -2)]
    #[test_case(0, 5, 0 => -1)]
    #[test_case(0, 5, 2 => 0)]
    #[test_case(0, 5, 4 => 1)]
    #[test_case(0, 5, 5 => 2)]
    #[test_case(3, 4, 3 => -1 ; "first unit wins over last")]
    fn test_relation(start: isize, stop: isize, position: isize) -> i8 {
        IndicatorRelation::relation(start, stop, position)
    }

    #[test]
    fn test_names_are_kebab_case() {
        let names: Vec<String> = IndicatorRelation::iter()
            .map(|it| it.as_ref().to_string())
            .collect();
        assert_eq2!(
            names,
            vec![
                "start-exclusive",
                "start-inclusive",
                "offset-active",
                "stop-inclusive",
                "stop-exclusive",
                "clear"
            ]
        );
        assert_eq2!(
            IndicatorRelation::classify_marker(0, 1, 0, true),
            IndicatorRelation::Clear
        );
    }
}
