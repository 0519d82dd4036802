// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod range_position_impl;

// Re-export.
pub use range_position_impl::*;
