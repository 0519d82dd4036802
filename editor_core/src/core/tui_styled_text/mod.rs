// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod phrase;
pub mod tui_styled_text_impl;

// Re-export.
pub use phrase::*;
pub use tui_styled_text_impl::*;
