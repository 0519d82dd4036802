// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Connect to source file.
pub mod common;
pub mod dimens;
pub mod graphemes;
pub mod log;
pub mod range_position;
pub mod stack_alloc_types;
pub mod tui_style;
pub mod tui_styled_text;

// Re-export.
pub use common::*;
pub use dimens::*;
pub use graphemes::*;
pub use log::*;
pub use range_position::*;
pub use stack_alloc_types::*;
pub use tui_style::*;
pub use tui_styled_text::*;
