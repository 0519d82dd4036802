// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

use crate::{CursorPalette, IndicatorRelation, Measure, Phrase, PhrasePoint, Pos, RangePosition,
            RenderOp, RenderOps, TuiColor, TuiStyle, Whence, pos};

/// The editing mode changes how the cursor looks. In insert mode the indicators are
/// underlined and colored, and the range is left alone. Otherwise the indicators are
/// drawn as colored blocks, and the range is underlined.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize, AsRefStr, Display,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CursorMode {
    Insert,
    #[default]
    Control,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, AsRefStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum IndicatorKind {
    Range,
    Start,
    Stop,
    Position,
}

/// One area of a line that a cursor draws over.
///
/// - `set` is what the indicator looks like.
/// - `reset` is what was there before it, which is what must be drawn to remove it.
/// - `relation` is `None` for the range itself.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Indicator {
    pub kind: IndicatorKind,
    pub cell_offset: usize,
    pub set: Phrase,
    pub reset: Phrase,
    pub relation: Option<IndicatorRelation>,
}

impl Indicator {
    /// The cells covered by the indicator.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.cell_offset..self.cell_offset + self.set.cell_count().max(self.reset.cell_count())
    }

    pub fn push_set(&self, ops: &mut RenderOps, origin: Pos, width: usize) {
        push_phrase_at(ops, origin, width, self.cell_offset, &self.set);
    }

    pub fn push_reset(&self, ops: &mut RenderOps, origin: Pos, width: usize) {
        push_phrase_at(ops, origin, width, self.cell_offset, &self.reset);
    }
}

/// Seek to `cell_offset` on the row at `origin`, and write as much of `phrase` as fits
/// in the `width` of the row.
fn push_phrase_at(
    ops: &mut RenderOps,
    origin: Pos,
    width: usize,
    cell_offset: usize,
    phrase: &Phrase,
) {
    let limit = width.saturating_sub(cell_offset);
    if limit == 0 || phrase.is_empty() {
        return;
    }
    *ops += RenderOp::ResetStyle;
    *ops += RenderOp::Seek(origin + pos(0, cell_offset));
    for word in phrase.clip(Whence::default(), limit).words {
        *ops += RenderOp::WriteText(word.text, word.style);
    }
}

/// The result of [`compose`]: a range and three markers for one line.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Composition {
    /// The range was given with its start after its stop.
    pub inverted: bool,
    pub range: Indicator,
    pub start: Indicator,
    pub stop: Indicator,
    pub position: Indicator,
}

impl Composition {
    /// The indicators in the order they are drawn. The position comes last, so it is on
    /// top when markers coincide.
    #[must_use]
    pub fn draw_order(&self) -> [&Indicator; 4] {
        [&self.range, &self.start, &self.stop, &self.position]
    }

    /// The indicators in the order they are removed. The range comes last, since the
    /// markers restore range styled glyphs.
    #[must_use]
    pub fn erase_order(&self) -> [&Indicator; 4] {
        [&self.start, &self.stop, &self.position, &self.range]
    }

    /// Instructions that draw the cursor on the row at `origin`, and instructions that
    /// remove it again.
    #[must_use]
    pub fn render(&self, origin: Pos, width: usize) -> (RenderOps, RenderOps) {
        let mut set = RenderOps::default();
        let mut reset = RenderOps::default();
        for it in self.draw_order() {
            it.push_set(&mut set, origin, width);
        }
        for it in self.erase_order() {
            it.push_reset(&mut reset, origin, width);
        }
        set += RenderOp::ResetStyle;
        reset += RenderOp::ResetStyle;
        (set, reset)
    }
}

fn to_index(it: isize) -> usize { it.max(0).unsigned_abs() }

/// Slice `line` into the range `start..stop` (in codepoints), and the parts before and
/// after it. Grapheme clusters are never split.
fn collect_range(line: &Phrase, start: usize, stop: usize) -> (Phrase, Phrase, Phrase) {
    let (point, _) = line.seek(PhrasePoint::default(), start, Measure::Codepoint);
    let (prefix, rest) = line.split(point);
    let (point, _) = rest.seek(PhrasePoint::default(), stop - start, Measure::Codepoint);
    let (range, suffix) = rest.split(point);
    (range, prefix, suffix)
}

/// The cell offset of the codepoint `at`, and the one character unit glyph there. Past
/// the end of the line, the glyph is a blank.
fn collect_marker(line: &Phrase, at: usize) -> (usize, Phrase) {
    let blank = || Phrase::from_text(TuiStyle::default(), " ");
    if line.words.is_empty() {
        return (0, blank());
    }

    let (point, remainder) = line.seek(PhrasePoint::default(), at, Measure::Codepoint);
    let point = line.first_non_empty(point);
    let cell_offset = line.tell(point, Measure::Cell) + remainder;
    let (end, _) = line.seek(point, 1, Measure::Unit);
    let glyph = line.slice(point, end);

    if remainder > 0 || glyph.cell_count() == 0 {
        (cell_offset, blank())
    } else {
        (cell_offset, glyph)
    }
}

fn style_marker(
    glyph: &Phrase,
    mode: CursorMode,
    color: TuiColor,
    palette: &CursorPalette,
) -> Phrase {
    match mode {
        CursorMode::Insert => glyph.map_style(|it| TuiStyle {
            color_bg: None,
            ..it.with_underline().with_fg(color)
        }),
        CursorMode::Control => glyph.map_style(|it| it.with_fg(palette.cursor_text).with_bg(color)),
    }
}

/// Compose the cursor overlay for one rendered `line`. The `cursor` carries the
/// horizontal range (`datum` to `datum + magnitude`, in codepoints) and the active
/// position (`datum + offset`). A negative magnitude is an inverted range, made by
/// selecting backwards.
///
/// ```text
/// line      a b c d e f
/// range         └─┘          "cd", underlined outside of insert mode
/// start         ▲            on the start: start-inclusive
/// stop              ▲        on the exclusive stop: stop-exclusive
/// position      ▲
/// ```
///
/// The markers are cut out of the line *after* the range has been styled, so a marker
/// on the range keeps the range's decoration beneath its own.
#[must_use]
pub fn compose(
    line: &Phrase,
    cursor: &RangePosition,
    mode: CursorMode,
    palette: &CursorPalette,
) -> Composition {
    let snapshot = cursor.snapshot();
    let inverted = snapshot.start > snapshot.stop;
    let (start, stop) = if inverted {
        (snapshot.stop, snapshot.start)
    } else {
        (snapshot.start, snapshot.stop)
    };

    let (range, prefix, suffix) = collect_range(line, to_index(start), to_index(stop));
    let range_offset = prefix.cell_count();
    let styled_range = match mode {
        CursorMode::Insert => range.clone(),
        CursorMode::Control => range.map_style(TuiStyle::with_underline),
    };
    let modified = prefix + styled_range.clone() + suffix;

    let marker = |kind: IndicatorKind, at: isize| {
        let (cell_offset, glyph) = collect_marker(&modified, to_index(at));
        let relation = IndicatorRelation::classify_marker(start, stop, at, line.is_empty());
        Indicator {
            kind,
            cell_offset,
            set: style_marker(&glyph, mode, palette.color_for(relation), palette),
            reset: glyph,
            relation: Some(relation),
        }
    };

    Composition {
        inverted,
        range: Indicator {
            kind: IndicatorKind::Range,
            cell_offset: range_offset,
            set: styled_range,
            reset: range,
            relation: None,
        },
        start: marker(IndicatorKind::Start, start),
        stop: marker(IndicatorKind::Stop, stop),
        position: marker(IndicatorKind::Position, snapshot.position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TuiStyledText, assert_eq2};

    fn plain(text: &str) -> Phrase { Phrase::from_text(TuiStyle::default(), text) }

    fn underlined(text: &str) -> Phrase {
        Phrase::from_text(TuiStyle::default().with_underline(), text)
    }

    #[test]
    fn test_control_mode_range_and_markers() {
        let palette = CursorPalette::default();
        let line = plain("abcdef");
        let cursor = RangePosition::new(2, 2, 0);
        let it = compose(&line, &cursor, CursorMode::Control, &palette);

        assert!(!it.inverted);
        assert_eq2!(it.range.set, underlined("cd"));
        assert_eq2!(it.range.reset, plain("cd"));
        assert_eq2!(it.range.cell_offset, 2);

        assert_eq2!(it.start.cell_offset, 2);
        assert_eq2!(it.start.relation, Some(IndicatorRelation::StartInclusive));
        assert_eq2!(it.start.reset, underlined("c"));
        assert_eq2!(
            it.start.set,
            Phrase::from_text(
                TuiStyle::default()
                    .with_underline()
                    .with_fg(palette.cursor_text)
                    .with_bg(palette.start_inclusive),
                "c"
            )
        );

        assert_eq2!(it.stop.cell_offset, 4);
        assert_eq2!(it.stop.relation, Some(IndicatorRelation::StopExclusive));
        assert_eq2!(it.stop.reset, plain("e"));

        assert_eq2!(it.position.cell_offset, 2);
        assert_eq2!(it.position.relation, Some(IndicatorRelation::StartInclusive));
    }

    #[test]
    fn test_insert_mode_leaves_range_alone() {
        let palette = CursorPalette::default();
        let red_bg = TuiStyle::default().with_bg(palette.stop_exclusive);
        let line = Phrase::new(vec![
            TuiStyledText::new(TuiStyle::default(), "ab"),
            TuiStyledText::new(red_bg, "cd"),
        ]);
        let cursor = RangePosition::new(0, 4, 3);
        let it = compose(&line, &cursor, CursorMode::Insert, &palette);

        assert_eq2!(it.range.set, it.range.reset);
        assert_eq2!(it.position.relation, Some(IndicatorRelation::StopInclusive));
        assert_eq2!(
            it.position.set,
            Phrase::from_text(
                TuiStyle::default()
                    .with_underline()
                    .with_fg(palette.stop_inclusive),
                "d"
            )
        );
    }

    #[test]
    fn test_inverted_range_and_wide_glyphs() {
        let palette = CursorPalette::default();
        let line = plain("a中b");
        // Selected backwards from 3 to 1.
        let cursor = RangePosition::new(3, -2, -2);
        let it = compose(&line, &cursor, CursorMode::Control, &palette);

        assert!(it.inverted);
        assert_eq2!(it.range.reset, plain("中b"));
        assert_eq2!(it.range.cell_offset, 1);
        assert_eq2!(it.position.cell_offset, 1);
        assert_eq2!(it.stop.cell_offset, 4);
        assert_eq2!(it.stop.span(), 4..5);
        assert_eq2!(it.position.span(), 1..3);
    }

    #[test]
    fn test_markers_past_the_end_are_blank() {
        let palette = CursorPalette::default();
        let cursor = RangePosition::new(0, 5, 4);
        let it = compose(&plain("ab"), &cursor, CursorMode::Control, &palette);
        assert_eq2!(it.position.cell_offset, 4);
        assert_eq2!(it.position.reset, plain(" "));

        let cursor = RangePosition::default();
        let it = compose(&Phrase::default(), &cursor, CursorMode::Control, &palette);
        assert_eq2!(it.position.relation, Some(IndicatorRelation::Clear));
        assert_eq2!(it.position.cell_offset, 0);
    }

    #[test]
    fn test_render_clips_to_width() {
        let palette = CursorPalette::default();
        let cursor = RangePosition::new(1, 4, 3);
        let it = compose(&plain("abcdef"), &cursor, CursorMode::Control, &palette);
        let (set, reset) = it.render(pos(3, 0), 5);

        // Range, start and position. The stop at cell 5 is outside of the row.
        assert_eq2!(set.seek_count(), 3);
        assert!(set.contains(&RenderOp::Seek(pos(3, 4))));
        assert!(!set.contains(&RenderOp::Seek(pos(3, 5))));
        assert!(set.contains(&RenderOp::WriteText(
            "bcde".into(),
            TuiStyle::default().with_underline()
        )));
        assert_eq2!(reset.seek_count(), 3);
        assert_eq2!(set.last(), Some(&RenderOp::ResetStyle));
    }
}
