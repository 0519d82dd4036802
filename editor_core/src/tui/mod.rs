// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Enable or disable debug logging for the modules in here.
pub const DEBUG_EDITOR_CORE_CHANGE_LOG: bool = true;
pub const DEBUG_EDITOR_CORE_PROJECTION: bool = true;
pub const DEBUG_EDITOR_CORE_SEGMENTS: bool = false;

// Attach sources.
pub mod cursor;
pub mod editor;
pub mod editor_core_config;
pub mod projection;

// Re-export.
pub use cursor::*;
pub use editor::*;
pub use editor_core_config::*;
pub use projection::*;
