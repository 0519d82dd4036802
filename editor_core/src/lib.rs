// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_editor_core
//!
//! The text buffer, edit history, and view synchronization core of a terminal resident
//! syntax editor. Everything that surrounds it (tokenizers and highlighters, keyboard
//! mapping, pane layout, file I/O, popups) talks to this crate through four entry points:
//! apply-edit, query-elements, log-since, and render-line.
//!
//! # Table of contents
//!
//! <!-- TOC -->
//! - [Components](#components)
//! - [Life of an edit](#life-of-an-edit)
//! - [Logging](#logging)
//! <!-- /TOC -->
//!
//! # Components
//!
//! Leaves first:
//!
//! | Component                 | Type                                  |
//! | ------------------------- | ------------------------------------- |
//! | Range position            | [`RangePosition`]                     |
//! | Segmented buffer          | [`Segments`]                          |
//! | Change log                | [`ChangeLog`], [`EditRecord`]         |
//! | View projection           | [`Projection`], [`View`]              |
//! | Cursor overlay compositor | [`compose`], [`CursorOverlay`]        |
//!
//! [`Resource`] bundles a [`Segments`] buffer with the [`ChangeLog`] that owns it, and
//! is the surface that the rest of an editor calls into.
//!
//! # Life of an edit
//!
//! ```text
//! ╭──────────╮ apply_edit  ╭────────────╮ since(v) ╭────────────╮ RenderOps ╭──────────╮
//! │ keyboard │────────────▶│  Resource  │─────────▶│ Projection │──────────▶│ terminal │
//! ╰──────────╯             │ Segments + │          │  + View    │           ╰──────────╯
//!                          │ ChangeLog  │          ╰────────────╯
//!                          ╰────────────╯
//! ```
//!
//! 1. An edit is written to the [`ChangeLog`], applied to the [`Segments`] buffer, and
//!    committed. This advances the log's [`Version`].
//! 2. For each [`View`] that reflects the resource, the session pulls
//!    [`ChangeLog::since`] the view's version, and hands the records to
//!    [`Projection::update`]. The result is a [`RenderOps`] list of seek, copy
//!    rectangle, write, and erase instructions.
//! 3. If the records can't be reconciled cheaply (or the version is stale) the view is
//!    redrawn with [`Projection::refresh`].
//!
//! # Logging
//!
//! Use [`init`] with a [`TracingConfig`] to install a `tracing` subscriber. Each module
//! has a `DEBUG_*` const that gates its log output.

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod core;
pub mod tui;

// Re-export stable public API using glob imports for ergonomic, flat API surface.
pub use core::*;
pub use tui::*;
