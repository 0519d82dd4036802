// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::{ChangeLogError, DEBUG_EDITOR_CORE_CHANGE_LOG, EditRecord, Segments};

/// Opaque, comparable token returned by [`ChangeLog::snapshot`]. A view stores the
/// version it was last synchronized against, and passes it to [`ChangeLog::since`] to
/// get the records it hasn't seen yet.
///
/// The `generation` changes when the log's history is discarded with
/// [`ChangeLog::reset`]; versions from another generation are always stale.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Version {
    pub generation: usize,
    pub sequence: usize,
}

impl Version {
    #[must_use]
    pub fn new(generation: usize, sequence: usize) -> Self {
        Self {
            generation,
            sequence,
        }
    }
}

/// # Change log
///
/// Records every edit made to a [`Segments`] buffer, for undo and redo, and so that views
/// can catch up with the edits they haven't seen.
///
/// The log does not own the buffer: the operations that mutate it take it as an
/// argument. [`crate::Resource`] keeps the two together.
///
/// ## Life of a record
///
/// ```text
///  write ──▶ pending ──apply──▶ pending (applied) ──commit──▶ open transaction
///                                                              + journal
///  checkpoint: open transaction ──▶ history (the undo stack)
/// ```
///
/// 1. [`ChangeLog::write`] only queues the record.
/// 2. [`ChangeLog::apply`] is the only operation that mutates the buffer with queued
///    records. It must be called before [`ChangeLog::commit`].
/// 3. [`ChangeLog::commit`] moves the applied records into the open transaction and
///    appends them to the journal, which advances the [`Version`].
/// 4. [`ChangeLog::checkpoint`] closes the open transaction. Transactions are the
///    granularity of [`ChangeLog::undo`] and [`ChangeLog::redo`].
///
/// ## Journal
///
/// Every record that changes the buffer after a commit is appended to the journal:
/// committed writes, the inverses played by undo, and the records replayed by redo.
/// [`ChangeLog::since`] returns a slice of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeLog {
    pending: Vec<EditRecord>,
    /// How many of the `pending` records have been applied to the buffer.
    applied: usize,
    /// Set by [`ChangeLog::collapse`]. The next commit tries to merge its first record
    /// into the tail of the open transaction.
    fold_on_commit: bool,
    open: Vec<EditRecord>,
    history: Vec<Vec<EditRecord>>,
    future: Vec<Vec<EditRecord>>,
    journal: Vec<EditRecord>,
    /// The sequence number of `journal[0]`.
    base: usize,
    generation: usize,
}

impl ChangeLog {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Queue `record`. Nothing is changed until [`Self::apply`] is called.
    pub fn write(&mut self, record: EditRecord) -> &mut Self {
        self.pending.push(record);
        self
    }

    /// Apply the queued records that haven't been applied yet to `buffer`. Each one is
    /// replaced in the queue by what [`EditRecord::apply`] actually did, so that undo and
    /// [`Self::since`] see the clamped addresses.
    pub fn apply(&mut self, buffer: &mut Segments<String>) -> &mut Self {
        for record in &mut self.pending[self.applied..] {
            *record = record.apply(buffer);
        }
        self.applied = self.pending.len();
        self
    }

    /// Merge adjacent [`EditRecord::Update`] records of the queue, so that a run of
    /// keystrokes becomes one undo entry. Applied and unapplied records are never merged
    /// with each other. The next commit also merges into the last record of the open
    /// transaction when possible.
    ///
    /// The result of applying the queue is the same with or without a collapse.
    pub fn collapse(&mut self) -> &mut Self {
        let before = self.pending.len();
        let unapplied = self.pending.split_off(self.applied);
        let applied = std::mem::take(&mut self.pending);

        let applied = collapse_records(applied);
        self.applied = applied.len();
        self.pending = applied;
        self.pending.extend(collapse_records(unapplied));
        self.fold_on_commit = true;

        DEBUG_EDITOR_CORE_CHANGE_LOG.then(|| {
            tracing::debug!(
                message = "change_log::collapse",
                before = before,
                after = self.pending.len()
            );
        });

        self
    }

    /// Move the applied records into the open transaction and the journal. Does nothing
    /// when no records have been applied. Returns the current version.
    pub fn commit(&mut self) -> Version {
        if self.applied < self.pending.len() {
            tracing::warn!(
                message = "change_log::commit with unapplied records, they stay queued",
                unapplied = self.pending.len() - self.applied
            );
        }

        let committed: Vec<EditRecord> = self.pending.drain(..self.applied).collect();
        self.applied = 0;
        let fold = std::mem::take(&mut self.fold_on_commit);

        if committed.is_empty() {
            return self.snapshot();
        }

        self.journal.extend(committed.iter().cloned());
        self.future.clear();

        let mut it = committed.into_iter();
        if fold && let Some(first) = it.next() {
            match self.open.last().and_then(|last| last.combine(&first)) {
                Some(combined) => {
                    if let Some(last) = self.open.last_mut() {
                        *last = combined;
                    }
                }
                None => self.open.push(first),
            }
        }
        self.open.extend(it);

        let version = self.snapshot();
        DEBUG_EDITOR_CORE_CHANGE_LOG.then(|| {
            tracing::debug!(
                message = "change_log::commit",
                version = ?version,
                open_transaction = self.open.len()
            );
        });
        version
    }

    /// Close the open transaction, if it has any records.
    pub fn checkpoint(&mut self) -> &mut Self {
        if !self.open.is_empty() {
            self.history.push(std::mem::take(&mut self.open));
        }
        self
    }

    /// Retract the applied but uncommitted records from `buffer`, and drop the queue.
    pub fn abort(&mut self, buffer: &mut Segments<String>) -> &mut Self {
        for record in self.pending[..self.applied].iter().rev() {
            record.retract(buffer);
        }
        self.pending.clear();
        self.applied = 0;
        self.fold_on_commit = false;
        self
    }

    /// Revert the last `quantity` transactions. The open transaction is closed first, and
    /// any uncommitted writes are aborted. Returns the number of transactions reverted.
    pub fn undo(&mut self, buffer: &mut Segments<String>, quantity: usize) -> usize {
        self.abort(buffer).checkpoint();

        let mut count = 0;
        while count < quantity {
            let Some(transaction) = self.history.pop() else {
                break;
            };
            for record in transaction.iter().rev() {
                let inverse = record.invert().apply(buffer);
                self.journal.push(inverse);
            }
            self.future.push(transaction);
            count += 1;
        }

        DEBUG_EDITOR_CORE_CHANGE_LOG.then(|| {
            tracing::debug!(
                message = "change_log::undo",
                requested = quantity,
                reverted = count,
                version = ?self.snapshot()
            );
        });

        count
    }

    /// Replay the last `quantity` transactions reverted by [`Self::undo`]. Returns the
    /// number of transactions replayed.
    pub fn redo(&mut self, buffer: &mut Segments<String>, quantity: usize) -> usize {
        self.abort(buffer).checkpoint();

        let mut count = 0;
        while count < quantity {
            let Some(transaction) = self.future.pop() else {
                break;
            };
            for record in &transaction {
                let replayed = record.apply(buffer);
                self.journal.push(replayed);
            }
            self.history.push(transaction);
            count += 1;
        }

        DEBUG_EDITOR_CORE_CHANGE_LOG.then(|| {
            tracing::debug!(
                message = "change_log::redo",
                requested = quantity,
                replayed = count,
                version = ?self.snapshot()
            );
        });

        count
    }

    #[must_use]
    pub fn can_undo(&self) -> bool { !self.open.is_empty() || !self.history.is_empty() }

    #[must_use]
    pub fn can_redo(&self) -> bool { !self.future.is_empty() }

    /// Number of transactions that [`Self::undo`] can revert.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.len() + usize::from(!self.open.is_empty())
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize { self.future.len() }

    /// Records written but not committed yet.
    #[must_use]
    pub fn pending(&self) -> &[EditRecord] { &self.pending }

    #[must_use]
    pub fn snapshot(&self) -> Version {
        Version::new(self.generation, self.base + self.journal.len())
    }

    /// The oldest version that [`Self::since`] can still answer for.
    #[must_use]
    pub fn oldest(&self) -> Version { Version::new(self.generation, self.base) }

    /// Every record that changed the buffer after `version`, in the order they were
    /// committed.
    ///
    /// # Errors
    ///
    /// - [`ChangeLogError::StaleVersion`] if the history after `version` was discarded.
    /// - [`ChangeLogError::FutureVersion`] if `version` was never issued by this log.
    pub fn since(&self, version: Version) -> Result<&[EditRecord], ChangeLogError> {
        let current = self.snapshot();

        if version.generation > self.generation
            || (version.generation == self.generation && version.sequence > current.sequence)
        {
            return Err(ChangeLogError::FutureVersion {
                requested: version,
                current,
            });
        }

        if version.generation < self.generation || version.sequence < self.base {
            return Err(ChangeLogError::StaleVersion {
                requested: version,
                oldest: self.oldest(),
                current,
            });
        }

        Ok(&self.journal[version.sequence - self.base..])
    }

    /// Drop the journal records committed before `version`, to bound memory. Views
    /// holding an older version will have to refresh.
    pub fn forget_before(&mut self, version: Version) {
        if version.generation != self.generation {
            return;
        }
        let count = version
            .sequence
            .saturating_sub(self.base)
            .min(self.journal.len());
        self.journal.drain(..count);
        self.base += count;
    }

    /// Discard all history and start a new generation. Every version issued so far
    /// becomes stale. The buffer is not touched, so uncommitted writes are dropped
    /// without being retracted.
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::default()
        };

        DEBUG_EDITOR_CORE_CHANGE_LOG.then(|| {
            tracing::debug!(message = "change_log::reset", generation = generation);
        });
    }
}

fn collapse_records(records: Vec<EditRecord>) -> Vec<EditRecord> {
    let mut acc: Vec<EditRecord> = Vec::with_capacity(records.len());
    for record in records {
        match acc.last().and_then(|last| last.combine(&record)) {
            Some(combined) => {
                if let Some(last) = acc.last_mut() {
                    *last = combined;
                }
            }
            None => acc.push(record),
        }
    }
    acc
}
