// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ChangeLog, ChangeLogError, EditRecord, Segments, SegmentsConfig, Selection,
            Version, byte_index_of_codepoint};

/// What [`Resource::apply_edit`] does after the records have been applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitOptions {
    /// Merge with the previous edit into a single undo entry, see
    /// [`ChangeLog::collapse`].
    pub collapse: bool,
    /// Close the undo transaction after the commit, see [`ChangeLog::checkpoint`].
    pub checkpoint: bool,
}

impl CommitOptions {
    /// Typing in insert mode: each keystroke extends the current undo entry.
    #[must_use]
    pub fn typing() -> Self {
        Self {
            collapse: true,
            checkpoint: false,
        }
    }

    /// A discrete command that is its own undo entry.
    #[must_use]
    pub fn command() -> Self {
        Self {
            collapse: false,
            checkpoint: true,
        }
    }
}

/// A line buffer together with the [`ChangeLog`] that records its edits. This is the
/// surface that the rest of the editor (key bindings, syntax highlighting, sessions that
/// own views) talks to.
///
/// Views are not referenced from here. Whoever owns the views pulls
/// [`Resource::log_since`] for each of them, see [`crate::Projection::synchronize`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    buffer: Segments<String>,
    log: ChangeLog,
}

impl Resource {
    #[must_use]
    pub fn new(config: SegmentsConfig) -> Self {
        Self {
            buffer: Segments::new(config),
            log: ChangeLog::new(),
        }
    }

    pub fn with_lines(config: SegmentsConfig, lines: impl IntoIterator<Item = String>) -> Self {
        Self {
            buffer: Segments::with_lines(config, lines),
            log: ChangeLog::new(),
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &Segments<String> { &self.buffer }

    #[must_use]
    pub fn log(&self) -> &ChangeLog { &self.log }

    #[must_use]
    pub fn line_count(&self) -> usize { self.buffer.len() }

    #[must_use]
    pub fn snapshot(&self) -> Version { self.log.snapshot() }

    /// Write, apply, and commit `records`. Returns the new version.
    pub fn apply_edit(
        &mut self,
        records: impl IntoIterator<Item = EditRecord>,
        options: CommitOptions,
    ) -> Version {
        for record in records {
            self.log.write(record);
        }
        self.log.apply(&mut self.buffer);
        if options.collapse {
            self.log.collapse();
        }
        let version = self.log.commit();
        if options.checkpoint {
            self.log.checkpoint();
        }
        version
    }

    /// The lines in `start..stop`, clamped to the buffer.
    #[must_use]
    pub fn query_elements(&self, start: usize, stop: usize) -> Selection<'_, String> {
        self.buffer.select(start, stop)
    }

    /// # Errors
    ///
    /// See [`ChangeLog::since`].
    pub fn log_since(&self, version: Version) -> Result<&[EditRecord], ChangeLogError> {
        self.log.since(version)
    }

    pub fn checkpoint(&mut self) { self.log.checkpoint(); }

    pub fn undo(&mut self, quantity: usize) -> usize { self.log.undo(&mut self.buffer, quantity) }

    pub fn redo(&mut self, quantity: usize) -> usize { self.log.redo(&mut self.buffer, quantity) }

    /// Replace the whole content, and discard the history. Views must refresh.
    pub fn reload(&mut self, lines: impl IntoIterator<Item = String>) {
        self.buffer = Segments::with_lines(
            SegmentsConfig {
                segment_size: self.buffer.segment_size(),
            },
            lines,
        );
        self.log.reset();
    }

    /// A record that deletes the lines in `start..stop`, carrying their current content
    /// so it can be undone.
    #[must_use]
    pub fn delete_lines_record(&self, start: usize, stop: usize) -> EditRecord {
        let deletion = self.buffer.select(start, stop).cloned().collect();
        EditRecord::lines(start.min(self.buffer.len()), vec![], deletion)
    }

    /// A record that deletes the codepoints `start..stop` of `line`. Returns `None` when
    /// the line doesn't exist.
    #[must_use]
    pub fn delete_text_record(&self, line: usize, start: usize, stop: usize) -> Option<EditRecord> {
        let text = self.buffer.get(line)?;
        let start_byte = byte_index_of_codepoint(text, start);
        let stop_byte = byte_index_of_codepoint(text, stop.max(start));
        Some(EditRecord::update(
            line,
            "",
            &text[start_byte..stop_byte],
            start,
        ))
    }
}
