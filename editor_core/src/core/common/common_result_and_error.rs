// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! For more information on error types, see:
//!
//! 1. [Article](https://developerlife.com/2024/06/10/rust-miette-error-handling/)
//! 2. [Video](https://youtu.be/TmLF7vI8lKk)

/// Type alias to make it easy to work with:
/// 1. [`std::result::Result`]
/// 2. [`miette::Result`] and [`miette::Report`], which are [`std::error::Error`]
///    wrappers.
///
/// It is basically `miette::Result<T, miette::Report>`, and it works hand in hand with
/// [`ConfigError`], [`crate::ChangeLogError`], and any other type of error.
pub type CommonResult<T> = miette::Result<T>;

/// Invalid values found while validating an [`crate::EditorCoreConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// Segments must be able to hold at least one line.
    #[error("Segment size must be greater than zero")]
    #[diagnostic(
        code(r3bl_editor_core::config::segment_size),
        help("Use the default of 64 lines per segment unless you have measured otherwise")
    )]
    ZeroSegmentSize,

    /// The projection needs at least one cached row before it can reconcile.
    #[error("Refresh threshold must be greater than zero")]
    #[diagnostic(
        code(r3bl_editor_core::config::refresh_threshold),
        help("The default of 4 cached rows prefers a full refresh when context is thin")
    )]
    ZeroRefreshThreshold,

    /// The configuration could not be parsed.
    #[error("Unable to parse configuration: {message}")]
    #[diagnostic(code(r3bl_editor_core::config::parse))]
    Parse { message: String },
}
