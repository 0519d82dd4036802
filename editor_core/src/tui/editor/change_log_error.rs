// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::Version;

/// Returned by [`crate::ChangeLog::since`] when the log can't produce the records
/// committed after a version. In both cases the caller must redraw the view with
/// [`crate::Projection::refresh`], which is what [`crate::Projection::synchronize`]
/// does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ChangeLogError {
    /// The history that the version refers to was discarded, either by a reset or by
    /// [`crate::ChangeLog::forget_before`].
    #[error(
        "Version {requested:?} is stale, the oldest available version is {oldest:?} and the current version is {current:?}"
    )]
    #[diagnostic(
        code(r3bl_editor_core::change_log::stale_version),
        help("Redraw the view with a full refresh and adopt the current version")
    )]
    StaleVersion {
        requested: Version,
        oldest: Version,
        current: Version,
    },

    /// The version was never issued by this log.
    #[error("Version {requested:?} is ahead of the current version {current:?}")]
    #[diagnostic(
        code(r3bl_editor_core::change_log::future_version),
        help("Versions must come from this log's snapshot, redraw with a full refresh")
    )]
    FutureVersion { requested: Version, current: Version },
}
