// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Debug;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// One grapheme cluster in a string slice.
///
/// ```
/// use r3bl_editor_core::build_segments_for_str;
///
/// let segments = build_segments_for_str("a😃");
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[1].start_byte_index, 1);
/// assert_eq!(segments[1].end_byte_index, 5);
/// assert_eq!(segments[1].display_width, 2);
/// assert_eq!(segments[1].codepoint_count, 1);
/// assert_eq!(segments[1].start_display_col_index, 1);
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Seg {
    pub start_byte_index: usize,
    pub end_byte_index: usize,
    /// Display width calculated using [`unicode_width::UnicodeWidthStr`].
    pub display_width: usize,
    /// Number of `char`s in this grapheme cluster. Jumbo emoji like `🙏🏽` have more than
    /// one.
    pub codepoint_count: usize,
    /// The `char` index in the original string slice at which this cluster starts.
    pub start_codepoint_index: usize,
    /// Display col index in the original string slice at which this cluster starts.
    pub start_display_col_index: usize,
}

/// Pretty print for [`Seg`] that is compact and easier to read.
impl Debug for Seg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Seg ┆ byte: [{b_b:>2}, {b_e:>2}] ┆ cp: {c_i:>2} + {c_n} ┆ col({d_i:>2}) ← width({d_w}) →",
            b_b = self.start_byte_index,
            b_e = self.end_byte_index,
            c_i = self.start_codepoint_index,
            c_n = self.codepoint_count,
            d_i = self.start_display_col_index,
            d_w = self.display_width,
        )
    }
}

impl Seg {
    /// Get the string slice for the grapheme cluster segment.
    #[must_use]
    pub fn get_str<'a>(&self, arg_str: &'a str) -> &'a str {
        &arg_str[self.start_byte_index..self.end_byte_index]
    }
}

#[must_use]
pub fn build_segments_for_str(arg_str: &str) -> Vec<Seg> {
    let mut acc = Vec::new();
    let mut codepoint_index = 0;
    let mut display_col_index = 0;
    for (byte_index, grapheme) in arg_str.grapheme_indices(true) {
        let seg = Seg {
            start_byte_index: byte_index,
            end_byte_index: byte_index + grapheme.len(),
            display_width: UnicodeWidthStr::width(grapheme),
            codepoint_count: grapheme.chars().count(),
            start_codepoint_index: codepoint_index,
            start_display_col_index: display_col_index,
        };
        codepoint_index += seg.codepoint_count;
        display_col_index += seg.display_width;
        acc.push(seg);
    }
    acc
}

/// Byte index of the `char` at `codepoint_index`, or the length of the string if it is
/// past the end.
#[must_use]
pub fn byte_index_of_codepoint(arg_str: &str, codepoint_index: usize) -> usize {
    arg_str
        .char_indices()
        .nth(codepoint_index)
        .map_or(arg_str.len(), |(byte_index, _)| byte_index)
}

#[must_use]
pub fn codepoint_count(arg_str: &str) -> usize { arg_str.chars().count() }

#[must_use]
pub fn display_width(arg_str: &str) -> usize { UnicodeWidthStr::width(arg_str) }

#[must_use]
pub fn unit_count(arg_str: &str) -> usize { arg_str.graphemes(true).count() }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_jumbo_emoji_is_one_unit() {
        let text = "x🙏🏽y";
        let segments = build_segments_for_str(text);
        assert_eq2!(segments.len(), 3);
        assert_eq2!(segments[1].get_str(text), "🙏🏽");
        assert_eq2!(segments[1].codepoint_count, 2);
        assert_eq2!(segments[2].start_codepoint_index, 3);
        assert_eq2!(unit_count(text), 3);
        assert_eq2!(codepoint_count(text), 4);
    }

    #[test]
    fn test_byte_index_of_codepoint() {
        let text = "é😃z";
        assert_eq2!(byte_index_of_codepoint(text, 0), 0);
        assert_eq2!(byte_index_of_codepoint(text, 1), 2);
        assert_eq2!(byte_index_of_codepoint(text, 2), 6);
        assert_eq2!(byte_index_of_codepoint(text, 3), 7);
        assert_eq2!(byte_index_of_codepoint(text, 99), 7);
    }

    #[test]
    fn test_display_width() {
        assert_eq2!(display_width("abc"), 3);
        assert_eq2!(display_width("中国人"), 6);
        assert_eq2!(display_width(""), 0);
    }
}
