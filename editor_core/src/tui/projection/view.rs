// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Range;

use crate::{Measure, Phrase, Pos, RangePosition, RenderOps, Size, Version, Whence, to_signed,
            to_unsigned};

/// The rendered image cache and scroll state of one on screen display of a buffer.
///
/// ```text
///              buffer lines
///             ┌────────────┐
///             │ 0          │
///             │ 1          │
///   offset ─▶ │ 2 ─────────┼──▶ image[0], whence[0]  ─▶ terminal row origin.row + 0
///             │ 3 ─────────┼──▶ image[1], whence[1]  ─▶ terminal row origin.row + 1
///             │ 4 ─────────┼──▶ image[2], whence[2]  ─▶ terminal row origin.row + 2
///             │ 5          │
///             └────────────┘
/// ```
///
/// - `image` holds one rendered [`Phrase`] per row. Rows past the end of the buffer hold
///   an empty phrase.
/// - `whence` holds the horizontal scroll state of each row, see [`Whence`].
/// - `offset` is the buffer line shown in the first row. `version` and `total` are the
///   change log version and the buffer line count that the image reflects.
/// - `visible` is where the view *should* be: its `datum` is the first line the
///   surrounding editor wants shown. [`crate::Projection::update`] scrolls the image to
///   it.
///
/// The image has exactly `size.row_height` rows, except in the middle of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub origin: Pos,
    pub size: Size,
    pub image: Vec<Phrase>,
    pub whence: Vec<Whence>,
    pub offset: usize,
    pub horizontal_offset: usize,
    pub version: Version,
    pub total: usize,
    pub visible: RangePosition,
}

impl View {
    #[must_use]
    pub fn new(origin: Pos, size: Size) -> Self {
        Self {
            origin,
            size,
            image: Vec::with_capacity(size.row_height),
            whence: Vec::with_capacity(size.row_height),
            offset: 0,
            horizontal_offset: 0,
            version: Version::default(),
            total: 0,
            visible: RangePosition::new(0, to_signed(size.row_height), 0),
        }
    }

    #[must_use]
    pub fn height(&self) -> usize { self.size.row_height }

    #[must_use]
    pub fn width(&self) -> usize { self.size.col_width }

    /// The first line the view should show.
    #[must_use]
    pub fn target(&self) -> usize { to_unsigned(self.visible.datum) }

    /// Ask for `line` to be the first line shown, on the next update.
    pub fn scroll_to(&mut self, line: usize) { self.visible.datum = to_signed(line); }

    /// Move the requested first line by `delta`, clamped at zero.
    pub fn scroll_by(&mut self, delta: isize) {
        self.visible.datum = (self.visible.datum + delta).max(0);
    }

    /// The buffer lines that the image currently shows.
    #[must_use]
    pub fn lines(&self) -> Range<usize> { self.offset..self.offset + self.height() }

    /// Set `phrases` into the rows starting at `start`, and reset their whence.
    pub fn set_rows(&mut self, start: usize, phrases: Vec<Phrase>) -> Range<usize> {
        let stop = start + phrases.len();
        if self.image.len() < stop {
            self.image.resize_with(stop, Phrase::default);
            self.whence.resize_with(stop, Whence::default);
        }
        for (row, phrase) in (start..stop).zip(phrases) {
            self.whence[row] = Whence::for_phrase(&phrase, self.horizontal_offset);
            self.image[row] = phrase;
        }
        start..stop
    }

    /// Forget the whole image.
    pub fn truncate(&mut self) {
        self.image.clear();
        self.whence.clear();
    }

    /// Limit the image to the view's height.
    pub fn trim(&mut self) {
        let height = self.height();
        self.image.truncate(height);
        self.whence.truncate(height);
    }

    /// Pad the image with empty rows until it fills the view, and draw them.
    pub fn compensate(&mut self) -> RenderOps {
        let start = self.image.len();
        let count = self.height().saturating_sub(start);
        let area = self.suffix(vec![Phrase::default(); count]);
        debug_assert_eq!(area.start, start);
        self.render_rows(area)
    }

    /// Insert `phrases` in front of the image. The offset moves back by their count.
    pub fn prefix(&mut self, phrases: Vec<Phrase>) -> Range<usize> {
        let count = phrases.len();
        let whence: Vec<Whence> = phrases
            .iter()
            .map(|it| Whence::for_phrase(it, self.horizontal_offset))
            .collect();
        self.image.splice(0..0, phrases);
        self.whence.splice(0..0, whence);
        self.offset = self.offset.saturating_sub(count);
        0..count
    }

    /// Append `phrases` to the image.
    pub fn suffix(&mut self, phrases: Vec<Phrase>) -> Range<usize> {
        let start = self.image.len();
        self.set_rows(start, phrases)
    }

    /// Remove `count` rows starting at the view relative `index`.
    pub fn delete(&mut self, index: usize, count: usize) -> Range<usize> {
        let start = index.min(self.image.len());
        let stop = (index + count).min(self.image.len());
        self.image.drain(start..stop);
        self.whence.drain(start..stop);
        index..index + count
    }

    /// Insert `count` empty rows at the view relative `index`.
    pub fn insert(&mut self, index: usize, count: usize) -> Range<usize> {
        let index = index.min(self.image.len());
        self.image
            .splice(index..index, std::iter::repeat_n(Phrase::default(), count));
        self.whence
            .splice(index..index, std::iter::repeat_n(Whence::default(), count));
        index..index + count
    }

    /// Recompute the whence of the `rows` for a horizontal scroll to `offset` cells.
    pub fn pan_absolute(&mut self, rows: Range<usize>, offset: usize) {
        for row in rows {
            if let (Some(phrase), Some(whence)) = (self.image.get(row), self.whence.get_mut(row))
            {
                *whence = Whence::for_phrase(phrase, offset);
            }
        }
    }

    /// Recompute the whence of the `rows` for a horizontal scroll of `delta` cells from
    /// where each row is now.
    pub fn pan_relative(&mut self, rows: Range<usize>, delta: isize) {
        for row in rows {
            if let (Some(phrase), Some(whence)) = (self.image.get(row), self.whence.get_mut(row))
            {
                let current = phrase.tell(whence.point, Measure::Cell) + whence.remainder;
                let target = current.saturating_add_signed(delta);
                *whence = Whence::for_phrase(phrase, target);
            }
        }
    }

    /// Scroll every row horizontally to `horizontal_offset` cells, and draw them again.
    /// The image itself stays valid.
    pub fn pan(&mut self, horizontal_offset: usize) -> RenderOps {
        self.horizontal_offset = horizontal_offset;
        let rows = 0..self.image.len();
        self.pan_absolute(rows.clone(), horizontal_offset);
        self.render_rows(rows)
    }

    /// Instructions that draw the `rows` of the image.
    #[must_use]
    pub fn render_rows(&self, rows: Range<usize>) -> RenderOps {
        let mut ops = RenderOps::default();
        let width = self.width();
        for row in rows {
            let (Some(phrase), Some(whence)) = (self.image.get(row), self.whence.get(row)) else {
                continue;
            };
            let clipped = phrase.clip(*whence, width);
            ops.push_row(self.origin.down(row), &clipped, width);
        }
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderOp, TuiStyle, assert_eq2, pos, size};

    fn phrase(text: &str) -> Phrase { Phrase::from_text(TuiStyle::default(), text) }

    fn texts(view: &View) -> Vec<String> { view.image.iter().map(Phrase::text).collect() }

    fn view() -> View {
        let mut view = View::new(pos(0, 0), size(4, 3));
        view.set_rows(0, vec![phrase("a"), phrase("b"), phrase("c")]);
        view.offset = 10;
        view
    }

    #[test]
    fn test_prefix_suffix_trim() {
        let mut view = view();
        assert_eq2!(view.prefix(vec![phrase("z")]), 0..1);
        assert_eq2!(view.offset, 9);
        assert_eq2!(view.suffix(vec![phrase("d")]), 4..5);
        assert_eq2!(texts(&view), vec!["z", "a", "b", "c", "d"]);
        view.trim();
        assert_eq2!(texts(&view), vec!["z", "a", "b"]);
        assert_eq2!(view.whence.len(), 3);
    }

    #[test]
    fn test_insert_delete_compensate() {
        let mut view = view();
        assert_eq2!(view.insert(1, 2), 1..3);
        assert_eq2!(texts(&view), vec!["a", "", "", "b", "c"]);
        view.delete(0, 4);
        assert_eq2!(texts(&view), vec!["c"]);

        let ops = view.compensate();
        assert_eq2!(texts(&view), vec!["c", "", ""]);
        assert_eq2!(ops.seek_count(), 2);
        assert!(ops.contains(&RenderOp::Seek(pos(1, 0))));
        assert!(ops.contains(&RenderOp::Erase(4)));

        view.truncate();
        assert!(view.image.is_empty());
    }

    #[test]
    fn test_render_rows_clips_to_width() {
        let mut view = View::new(pos(5, 2), size(3, 1));
        view.set_rows(0, vec![phrase("abcdef")]);
        let ops = view.render_rows(0..1);
        assert!(ops.contains(&RenderOp::Seek(pos(5, 2))));
        assert!(ops.contains(&RenderOp::WriteText("abc".into(), TuiStyle::default())));
        assert!(!ops.iter().any(|it| matches!(it, RenderOp::Erase(_))));
    }

    #[test]
    fn test_pan() {
        let mut view = View::new(pos(0, 0), size(3, 2));
        view.set_rows(0, vec![phrase("abcdef"), phrase("x")]);
        view.pan_absolute(0..2, 2);
        assert_eq2!(view.whence[0].point.codepoint_offset, 2);
        // Past the end of a short row.
        assert_eq2!(view.whence[1].point.codepoint_offset, 1);

        view.pan_relative(0..1, 3);
        assert_eq2!(view.whence[0].point.codepoint_offset, 5);
        view.pan_relative(0..1, -10);
        assert_eq2!(view.whence[0], Whence::default());

        let ops = view.pan(1);
        assert_eq2!(view.horizontal_offset, 1);
        assert_eq2!(ops.seek_count(), 2);
        assert!(ops.contains(&RenderOp::WriteText("bcd".into(), TuiStyle::default())));
        assert!(ops.contains(&RenderOp::Erase(3)));
    }

    #[test]
    fn test_scroll_target() {
        let mut view = view();
        view.scroll_to(20);
        assert_eq2!(view.target(), 20);
        view.scroll_by(-30);
        assert_eq2!(view.target(), 0);
        assert_eq2!(view.lines(), 10..13);
    }
}
