// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod cursor_compositor;
pub mod cursor_overlay;
pub mod cursor_palette;
pub mod indicator_relation;

// Re-export.
pub use cursor_compositor::*;
pub use cursor_overlay::*;
pub use cursor_palette::*;
pub use indicator_relation::*;
