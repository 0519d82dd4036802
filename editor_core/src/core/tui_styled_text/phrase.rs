// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Add;

use crate::{Seg, TuiStyle, TuiStyledText, build_segments_for_str, byte_index_of_codepoint};

/// The coordinate system used to measure text in a [`Phrase`]. See
/// [`crate::core::graphemes`] for a picture.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, strum_macros::Display)]
pub enum Measure {
    Codepoint,
    Cell,
    Unit,
}

impl Measure {
    #[must_use]
    pub fn of_seg(self, seg: &Seg) -> usize {
        match self {
            Measure::Codepoint => seg.codepoint_count,
            Measure::Cell => seg.display_width,
            Measure::Unit => 1,
        }
    }

    #[must_use]
    pub fn of_str(self, arg_str: &str) -> usize {
        build_segments_for_str(arg_str)
            .iter()
            .map(|seg| self.of_seg(seg))
            .sum()
    }
}

/// Address of a `char` boundary inside a [`Phrase`]: the index of the word, and the
/// codepoint offset inside of that word.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug, PartialOrd, Ord)]
pub struct PhrasePoint {
    pub word_index: usize,
    pub codepoint_offset: usize,
}

impl PhrasePoint {
    #[must_use]
    pub fn new(word_index: usize, codepoint_offset: usize) -> Self {
        Self {
            word_index,
            codepoint_offset,
        }
    }
}

/// Horizontal scroll state of one rendered row. `point` is the first glyph that is
/// drawn, and `remainder` is the number of cells of a wide glyph that lie left of the
/// viewport (that glyph is drawn as blanks).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Whence {
    pub point: PhrasePoint,
    pub remainder: usize,
}

impl Whence {
    /// The whence for a phrase scrolled horizontally by `horizontal_offset` cells.
    #[must_use]
    pub fn for_phrase(phrase: &Phrase, horizontal_offset: usize) -> Self {
        let (point, remainder) =
            phrase.seek(PhrasePoint::default(), horizontal_offset, Measure::Cell);
        Self { point, remainder }
    }
}

/// One rendered line: a sequence of styled words. This is what the `render` collaborator
/// produces for a buffer line, and what [`crate::View`] caches for each row.
#[derive(Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct Phrase {
    pub words: Vec<TuiStyledText>,
}

impl From<TuiStyledText> for Phrase {
    fn from(word: TuiStyledText) -> Self { Phrase { words: vec![word] } }
}

impl FromIterator<TuiStyledText> for Phrase {
    fn from_iter<I: IntoIterator<Item = TuiStyledText>>(iter: I) -> Self {
        Phrase {
            words: iter.into_iter().collect(),
        }
    }
}

impl Add for Phrase {
    type Output = Phrase;

    fn add(mut self, rhs: Phrase) -> Phrase {
        self.words.extend(rhs.words);
        self
    }
}

impl Phrase {
    #[must_use]
    pub fn new(words: Vec<TuiStyledText>) -> Self { Self { words } }

    pub fn from_text(style: TuiStyle, arg_text: impl AsRef<str>) -> Self {
        TuiStyledText::new(style, arg_text).into()
    }

    /// True when there is no text in any of the words.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.words.iter().all(|it| it.text.is_empty()) }

    #[must_use]
    pub fn text(&self) -> String { self.words.iter().map(TuiStyledText::get_text).collect() }

    #[must_use]
    pub fn codepoint_count(&self) -> usize { self.count(Measure::Codepoint) }

    #[must_use]
    pub fn cell_count(&self) -> usize { self.count(Measure::Cell) }

    #[must_use]
    pub fn unit_count(&self) -> usize { self.count(Measure::Unit) }

    #[must_use]
    pub fn count(&self, measure: Measure) -> usize {
        self.words
            .iter()
            .map(|it| measure.of_str(it.get_text()))
            .sum()
    }

    /// Advance from `from` by `quantity`, measured in `measure`. Grapheme clusters are
    /// never split: when the next cluster costs more than what is left, the seek stops
    /// in front of it. Returns the point reached and the quantity that could not be
    /// consumed (non zero when a wide glyph is in the way, or the phrase ran out).
    #[must_use]
    pub fn seek(
        &self,
        from: PhrasePoint,
        quantity: usize,
        measure: Measure,
    ) -> (PhrasePoint, usize) {
        let mut remaining = quantity;
        let mut word_index = from.word_index;
        let mut codepoint_offset = from.codepoint_offset;

        while let Some(word) = self.words.get(word_index) {
            for seg in build_segments_for_str(word.get_text()) {
                if seg.start_codepoint_index < codepoint_offset {
                    continue;
                }
                let cost = measure.of_seg(&seg);
                if remaining == 0 || cost > remaining {
                    return (PhrasePoint::new(word_index, codepoint_offset), remaining);
                }
                remaining -= cost;
                codepoint_offset = seg.start_codepoint_index + seg.codepoint_count;
            }

            // Stay at the end of this word, or of the last word.
            if remaining == 0 || word_index + 1 == self.words.len() {
                break;
            }
            word_index += 1;
            codepoint_offset = 0;
        }

        (PhrasePoint::new(word_index, codepoint_offset), remaining)
    }

    /// The distance from the start of the phrase to `point`, measured in `measure`.
    #[must_use]
    pub fn tell(&self, point: PhrasePoint, measure: Measure) -> usize {
        let whole_words: usize = self
            .words
            .iter()
            .take(point.word_index)
            .map(|it| measure.of_str(it.get_text()))
            .sum();
        let partial = self.words.get(point.word_index).map_or(0, |word| {
            let text = word.get_text();
            measure.of_str(&text[..byte_index_of_codepoint(text, point.codepoint_offset)])
        });
        whole_words + partial
    }

    /// Split into the words before `point` and the words from `point` on. Empty pieces
    /// are dropped.
    #[must_use]
    pub fn split(&self, point: PhrasePoint) -> (Phrase, Phrase) {
        let Some(word) = self.words.get(point.word_index) else {
            return (self.clone(), Phrase::default());
        };

        let text = word.get_text();
        let (lhs, rhs) = text.split_at(byte_index_of_codepoint(text, point.codepoint_offset));

        let mut head: Vec<TuiStyledText> = self.words[..point.word_index].to_vec();
        if !lhs.is_empty() {
            head.push(TuiStyledText::new(word.style, lhs));
        }

        let mut tail = Vec::with_capacity(self.words.len() - point.word_index);
        if !rhs.is_empty() {
            tail.push(TuiStyledText::new(word.style, rhs));
        }
        tail.extend(self.words[point.word_index + 1..].iter().cloned());

        (Phrase::new(head), Phrase::new(tail))
    }

    /// The words between `start` and `stop`.
    #[must_use]
    pub fn slice(&self, start: PhrasePoint, stop: PhrasePoint) -> Phrase {
        let (head, _) = self.split(stop);
        let (_, middle) = head.split(start);
        middle
    }

    /// When `point` sits at the end of a word, move it to the start of the next word that
    /// has text. The last word is never left.
    #[must_use]
    pub fn first_non_empty(&self, point: PhrasePoint) -> PhrasePoint {
        let mut it = point;
        while let Some(word) = self.words.get(it.word_index) {
            let is_exhausted = it.codepoint_offset >= Measure::Codepoint.of_str(word.get_text());
            if !is_exhausted || it.word_index + 1 >= self.words.len() {
                break;
            }
            it = PhrasePoint::new(it.word_index + 1, 0);
        }
        it
    }

    /// The part of the phrase that is visible through a window `limit` cells wide whose
    /// left edge is at `whence`. The result never has more than `limit` cells. Wide
    /// glyphs that straddle the left edge are replaced with blanks, and those that don't
    /// fit at the right edge are dropped.
    #[must_use]
    pub fn clip(&self, whence: Whence, limit: usize) -> Phrase {
        let mut acc = Vec::new();
        let mut budget = limit;
        let mut point = self.first_non_empty(whence.point);

        if whence.remainder > 0
            && let Some(word) = self.words.get(point.word_index)
            && let Some(seg) = build_segments_for_str(word.get_text())
                .into_iter()
                .find(|seg| seg.start_codepoint_index >= point.codepoint_offset)
        {
            let blanks = seg.display_width.saturating_sub(whence.remainder).min(budget);
            if blanks > 0 {
                acc.push(TuiStyledText::new(word.style, " ".repeat(blanks)));
            }
            budget -= blanks;
            point.codepoint_offset = seg.start_codepoint_index + seg.codepoint_count;
        }

        for (word_index, word) in self.words.iter().enumerate().skip(point.word_index) {
            let from = if word_index == point.word_index {
                point.codepoint_offset
            } else {
                0
            };
            let text = word.get_text();

            let mut byte_range: Option<(usize, usize)> = None;
            let mut is_full = false;
            for seg in build_segments_for_str(text) {
                if seg.start_codepoint_index < from {
                    continue;
                }
                if seg.display_width > budget {
                    is_full = true;
                    break;
                }
                budget -= seg.display_width;
                let start = byte_range.map_or(seg.start_byte_index, |(start, _)| start);
                byte_range = Some((start, seg.end_byte_index));
            }

            if let Some((start, end)) = byte_range {
                acc.push(TuiStyledText::new(word.style, &text[start..end]));
            }
            if is_full {
                break;
            }
        }

        Phrase::new(acc)
    }

    /// Layer `style` on top of the style of every word.
    #[must_use]
    pub fn apply_style(&self, style: TuiStyle) -> Phrase {
        self.map_style(|it| it + style)
    }

    /// Replace the style of every word with the result of `f`.
    #[must_use]
    pub fn map_style(&self, f: impl Fn(TuiStyle) -> TuiStyle) -> Phrase {
        self.words
            .iter()
            .map(|word| TuiStyledText::new(f(word.style), word.get_text()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ANSIBasicColor, TuiColor, assert_eq2, tui_style_attrib};

    fn red() -> TuiStyle {
        TuiStyle::default().with_fg(TuiColor::Basic(ANSIBasicColor::Red))
    }

    /// `["ab", "中c", "d"]` with different styles.
    fn sample() -> Phrase {
        Phrase::new(vec![
            TuiStyledText::new(TuiStyle::default(), "ab"),
            TuiStyledText::new(red(), "中c"),
            TuiStyledText::new(TuiStyle::default(), "d"),
        ])
    }

    #[test]
    fn test_counts() {
        let phrase = sample();
        assert_eq2!(phrase.codepoint_count(), 5);
        assert_eq2!(phrase.cell_count(), 6);
        assert_eq2!(phrase.unit_count(), 5);
        assert_eq2!(phrase.text(), "ab中cd");
        assert!(!phrase.is_empty());
        assert!(Phrase::default().is_empty());
    }

    #[test]
    fn test_seek_codepoints_crosses_words() {
        let phrase = sample();
        assert_eq2!(
            phrase.seek(PhrasePoint::default(), 2, Measure::Codepoint),
            (PhrasePoint::new(0, 2), 0)
        );
        assert_eq2!(
            phrase.seek(PhrasePoint::default(), 3, Measure::Codepoint),
            (PhrasePoint::new(1, 1), 0)
        );
        // Past the end.
        assert_eq2!(
            phrase.seek(PhrasePoint::default(), 9, Measure::Codepoint),
            (PhrasePoint::new(2, 1), 4)
        );
    }

    #[test]
    fn test_seek_cells_stops_before_wide_glyph() {
        let phrase = sample();
        // "ab" is 2 cells, then "中" needs 2 but only 1 is left.
        assert_eq2!(
            phrase.seek(PhrasePoint::default(), 3, Measure::Cell),
            (PhrasePoint::new(1, 0), 1)
        );
        assert_eq2!(
            phrase.seek(PhrasePoint::default(), 4, Measure::Cell),
            (PhrasePoint::new(1, 1), 0)
        );
    }

    #[test]
    fn test_seek_units_never_split_cluster() {
        let phrase = Phrase::from_text(TuiStyle::default(), "a🙏🏽b");
        let (point, remainder) = phrase.seek(PhrasePoint::default(), 2, Measure::Unit);
        assert_eq2!((point, remainder), (PhrasePoint::new(0, 3), 0));

        // One codepoint into the cluster is not possible.
        let (point, remainder) = phrase.seek(PhrasePoint::default(), 2, Measure::Codepoint);
        assert_eq2!((point, remainder), (PhrasePoint::new(0, 1), 1));
    }

    #[test]
    fn test_tell() {
        let phrase = sample();
        let point = PhrasePoint::new(1, 1);
        assert_eq2!(phrase.tell(point, Measure::Codepoint), 3);
        assert_eq2!(phrase.tell(point, Measure::Cell), 4);
        assert_eq2!(phrase.tell(point, Measure::Unit), 3);
        assert_eq2!(phrase.tell(PhrasePoint::new(9, 0), Measure::Cell), 6);
    }

    #[test]
    fn test_split_and_slice() {
        let phrase = sample();
        let (head, tail) = phrase.split(PhrasePoint::new(1, 1));
        assert_eq2!(head.text(), "ab中");
        assert_eq2!(tail.text(), "cd");
        assert_eq2!(tail.words[0].style, red());
        assert_eq2!((head + tail).text(), phrase.text());

        let middle = phrase.slice(PhrasePoint::new(0, 1), PhrasePoint::new(1, 2));
        assert_eq2!(middle.text(), "b中c");

        let nothing = phrase.slice(PhrasePoint::new(1, 0), PhrasePoint::new(1, 0));
        assert!(nothing.is_empty());
    }

    #[test]
    fn test_first_non_empty() {
        let phrase = Phrase::new(vec![
            TuiStyledText::new(TuiStyle::default(), "ab"),
            TuiStyledText::new(TuiStyle::default(), ""),
            TuiStyledText::new(TuiStyle::default(), "c"),
        ]);
        assert_eq2!(
            phrase.first_non_empty(PhrasePoint::new(0, 2)),
            PhrasePoint::new(2, 0)
        );
        assert_eq2!(
            phrase.first_non_empty(PhrasePoint::new(0, 1)),
            PhrasePoint::new(0, 1)
        );
        assert_eq2!(
            phrase.first_non_empty(PhrasePoint::new(2, 1)),
            PhrasePoint::new(2, 1)
        );
    }

    #[test]
    fn test_clip() {
        let phrase = sample();

        let clipped = phrase.clip(Whence::for_phrase(&phrase, 0), 3);
        assert_eq2!(clipped.text(), "ab");

        let clipped = phrase.clip(Whence::for_phrase(&phrase, 1), 10);
        assert_eq2!(clipped.text(), "b中cd");

        // "中" straddles the left edge.
        let clipped = phrase.clip(Whence::for_phrase(&phrase, 3), 10);
        assert_eq2!(clipped.text(), " cd");
        assert_eq2!(clipped.words[0].style, red());
        assert_eq2!(clipped.cell_count(), 3);

        // Scrolled past the end.
        let clipped = phrase.clip(Whence::for_phrase(&phrase, 40), 10);
        assert!(clipped.is_empty());
    }

    #[test]
    fn test_apply_and_map_style() {
        let phrase = sample();
        let underline = TuiStyle {
            underline: Some(tui_style_attrib::Underline),
            ..Default::default()
        };
        let styled = phrase.apply_style(underline);
        assert!(styled.words.iter().all(|it| it.style.underline.is_some()));
        assert_eq2!(styled.words[1].style.color_fg, red().color_fg);

        let plain = phrase.map_style(|_| TuiStyle::default());
        assert!(plain.words.iter().all(|it| it.style == TuiStyle::default()));
        assert_eq2!(plain.text(), phrase.text());
    }
}
