// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod pos;
pub mod size;

// Re-export.
pub use pos::*;
pub use size::*;
