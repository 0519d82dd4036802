// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The line storage of a [`crate::Resource`].
//!
//! ```text
//! logical index:  0   1   2   3   4   5   6   7   8
//!               ╭───────────╮ ╭───────╮ ╭───────────╮
//! segments:     │ a   b   c │ │ d   e │ │ f   g   h │ ...
//!               ╰───────────╯ ╰───────╯ ╰───────────╯
//!                 segment 0    segment 1   segment 2
//! ```
//!
//! Lines are kept in a list of bounded size chunks, so that an insert or delete in the
//! middle of a large file only ever moves the lines of one chunk (plus the list of
//! chunks). An absolute index is translated into `(segment index, local offset)` with a
//! linear scan over the chunk lengths.
//!
//! Chunks are not rebalanced after edits. Call [`Segments::partition`] to repack them.

use std::{fmt::Debug, iter::FusedIterator};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, DEBUG_EDITOR_CORE_SEGMENTS, ok};

pub const DEFAULT_SEGMENT_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentsConfig {
    /// The soft maximum number of lines held by a single segment.
    pub segment_size: usize,
}

impl Default for SegmentsConfig {
    fn default() -> Self {
        Self {
            segment_size: DEFAULT_SEGMENT_SIZE,
        }
    }
}

impl SegmentsConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroSegmentSize`] if the segment size is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segment_size == 0 {
            return Err(ConfigError::ZeroSegmentSize);
        }
        ok!()
    }
}

/// An ordered sequence of lines stored as a list of chunks. See the [module
/// docs](self).
#[derive(Clone)]
pub struct Segments<T> {
    sequences: Vec<Vec<T>>,
    length: usize,
    segment_size: usize,
}

impl<T> Default for Segments<T> {
    fn default() -> Self { Self::new(SegmentsConfig::default()) }
}

impl<T: Debug> Debug for Segments<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Segments")
            .field("length", &self.length)
            .field("segment_size", &self.segment_size)
            .field("sequences", &self.sequences)
            .finish()
    }
}

/// Two buffers are equal if they hold the same lines, regardless of how the lines are
/// chunked.
impl<T: PartialEq> PartialEq for Segments<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Segments<T> {}

impl<T> FromIterator<T> for Segments<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut it = Segments::default();
        it.partition_from(iter);
        it
    }
}

impl<'a, T> IntoIterator for &'a Segments<T> {
    type Item = &'a T;
    type IntoIter = Selection<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<T> Segments<T> {
    #[must_use]
    pub fn new(config: SegmentsConfig) -> Self {
        Self {
            sequences: Vec::new(),
            length: 0,
            segment_size: config.segment_size.max(1),
        }
    }

    pub fn with_lines(config: SegmentsConfig, lines: impl IntoIterator<Item = T>) -> Self {
        let mut it = Self::new(config);
        it.partition_from(lines);
        it
    }

    #[must_use]
    pub fn len(&self) -> usize { self.length }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.length == 0 }

    #[must_use]
    pub fn segment_size(&self) -> usize { self.segment_size }

    #[must_use]
    pub fn segment_count(&self) -> usize { self.sequences.len() }

    #[must_use]
    pub fn segment_sizes(&self) -> Vec<usize> { self.sequences.iter().map(Vec::len).collect() }

    /// Translate an absolute index into `(segment index, local offset)`. Returns `None`
    /// when the index is at or past the end.
    fn address(&self, index: usize) -> Option<(usize, usize)> {
        let mut remaining = index;
        for (segment_index, segment) in self.sequences.iter().enumerate() {
            if remaining < segment.len() {
                return Some((segment_index, remaining));
            }
            remaining -= segment.len();
        }
        None
    }

    /// A lazy sequence over the lines in `start..stop`. The bounds are clamped to the
    /// length of the buffer, and an inverted range is empty. The returned iterator is
    /// [`Clone`] so it can be restarted.
    #[must_use]
    pub fn select(&self, start: usize, stop: usize) -> Selection<'_, T> {
        let stop = stop.min(self.length);
        let remaining = stop.saturating_sub(start);
        let (segment_index, local_offset) =
            self.address(start).unwrap_or((self.sequences.len(), 0));
        Selection {
            sequences: &self.sequences,
            segment_index,
            local_offset,
            remaining,
        }
    }

    #[must_use]
    pub fn iter(&self) -> Selection<'_, T> { self.select(0, self.length) }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        let (segment_index, local_offset) = self.address(index)?;
        self.sequences[segment_index].get(local_offset)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let (segment_index, local_offset) = self.address(index)?;
        self.sequences[segment_index].get_mut(local_offset)
    }

    /// Replace the line at `index` in place, returning the old line. Returns `None`
    /// (and drops `line`) when `index` is out of range.
    pub fn set(&mut self, index: usize, line: T) -> Option<T> {
        self.get_mut(index)
            .map(|slot| std::mem::replace(slot, line))
    }

    /// Insert `lines` in front of the line at `offset`. When `offset` is at or past the
    /// end, the lines are appended.
    pub fn insert(&mut self, offset: usize, lines: impl IntoIterator<Item = T>) {
        let lines: Vec<T> = lines.into_iter().collect();
        let count = lines.len();
        if count == 0 {
            return;
        }

        match self.address(offset) {
            None => self.extend_tail(lines),
            Some((segment_index, local_offset)) => {
                let segment_size = self.segment_size;
                let segment = &mut self.sequences[segment_index];
                if segment.len() + count <= segment_size {
                    segment.splice(local_offset..local_offset, lines);
                } else {
                    // Split the segment around the insertion point.
                    let tail = segment.split_off(local_offset);
                    let head = std::mem::take(segment);
                    let mut replacement = Vec::new();
                    if !head.is_empty() {
                        replacement.push(head);
                    }
                    replacement.extend(chunks(lines, segment_size));
                    if !tail.is_empty() {
                        replacement.push(tail);
                    }
                    self.sequences
                        .splice(segment_index..=segment_index, replacement);
                }
            }
        }

        self.length += count;

        DEBUG_EDITOR_CORE_SEGMENTS.then(|| {
            tracing::trace!(
                message = "segments::insert",
                offset = offset,
                count = count,
                segment_sizes = ?self.segment_sizes()
            );
        });
    }

    /// Fill the last segment, then add new segments for the rest.
    fn extend_tail(&mut self, lines: Vec<T>) {
        let mut it = lines.into_iter();
        if let Some(last) = self.sequences.last_mut() {
            let room = self.segment_size.saturating_sub(last.len());
            last.extend(it.by_ref().take(room));
        }
        self.sequences
            .extend(chunks(it.collect(), self.segment_size));
    }

    /// Remove the lines in `start..stop` and return them. The bounds are clamped to the
    /// buffer, and swapped if inverted. Segments that become empty are removed.
    pub fn delete(&mut self, start: usize, stop: usize) -> Vec<T> {
        let (start, stop) = {
            let start = start.min(self.length);
            let stop = stop.min(self.length);
            if start > stop { (stop, start) } else { (start, stop) }
        };

        let mut removed = Vec::with_capacity(stop - start);
        let Some((mut segment_index, mut local_offset)) = self.address(start) else {
            return removed;
        };

        let mut remaining = stop - start;
        while remaining > 0 {
            let Some(segment) = self.sequences.get_mut(segment_index) else {
                break;
            };
            let count = remaining.min(segment.len() - local_offset);
            removed.extend(segment.drain(local_offset..local_offset + count));
            remaining -= count;
            if segment.is_empty() {
                self.sequences.remove(segment_index);
            } else {
                segment_index += 1;
            }
            local_offset = 0;
        }

        self.length -= removed.len();

        DEBUG_EDITOR_CORE_SEGMENTS.then(|| {
            tracing::trace!(
                message = "segments::delete",
                start = start,
                stop = stop,
                segment_sizes = ?self.segment_sizes()
            );
        });

        removed
    }

    /// Slice assignment: replace the lines in `start..stop` with `lines`, and return the
    /// lines that were removed.
    pub fn replace(
        &mut self,
        start: usize,
        stop: usize,
        lines: impl IntoIterator<Item = T>,
    ) -> Vec<T> {
        let removed = self.delete(start, stop);
        self.insert(start.min(stop), lines);
        removed
    }

    pub fn append(&mut self, lines: impl IntoIterator<Item = T>) {
        self.insert(self.length, lines);
    }

    pub fn prepend(&mut self, lines: impl IntoIterator<Item = T>) { self.insert(0, lines); }

    pub fn clear(&mut self) {
        self.sequences.clear();
        self.length = 0;
    }

    /// Repack all of the lines into freshly chunked segments. Every segment but the last
    /// holds exactly `segment_size` lines afterwards.
    pub fn partition(&mut self) {
        let sequences = std::mem::take(&mut self.sequences);
        self.partition_from(sequences.into_iter().flatten());
    }

    fn partition_from(&mut self, lines: impl IntoIterator<Item = T>) {
        self.sequences = chunks(lines.into_iter().collect(), self.segment_size).collect();
        self.length = self.sequences.iter().map(Vec::len).sum();
    }
}

impl<T: Clone> Segments<T> {
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> { self.iter().cloned().collect() }
}

fn chunks<T>(lines: Vec<T>, size: usize) -> impl Iterator<Item = Vec<T>> {
    let mut it = lines.into_iter();
    std::iter::from_fn(move || {
        let chunk: Vec<T> = it.by_ref().take(size).collect();
        (!chunk.is_empty()).then_some(chunk)
    })
}

/// Lazy iterator returned by [`Segments::select`].
pub struct Selection<'a, T> {
    sequences: &'a [Vec<T>],
    segment_index: usize,
    local_offset: usize,
    remaining: usize,
}

impl<T> Debug for Selection<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selection")
            .field("segment_count", &self.sequences.len())
            .field("segment_index", &self.segment_index)
            .field("local_offset", &self.local_offset)
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl<T> Clone for Selection<'_, T> {
    fn clone(&self) -> Self {
        Self {
            sequences: self.sequences,
            segment_index: self.segment_index,
            local_offset: self.local_offset,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Selection<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            let segment = self.sequences.get(self.segment_index)?;
            if let Some(line) = segment.get(self.local_offset) {
                self.local_offset += 1;
                self.remaining -= 1;
                return Some(line);
            }
            self.segment_index += 1;
            self.local_offset = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl<T> ExactSizeIterator for Selection<'_, T> {}

impl<T> FusedIterator for Selection<'_, T> {}
