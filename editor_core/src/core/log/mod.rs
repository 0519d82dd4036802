// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Structured logging for the editor core. Library code never installs a subscriber on
//! its own; the surrounding application calls [`init`] once with a [`TracingConfig`].
//! After that, each module emits `tracing` events gated by its own `DEBUG_*` const, eg:
//! [`crate::DEBUG_EDITOR_CORE_PROJECTION`].

// Attach sources.
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use tracing_config::*;
pub use tracing_init::*;
