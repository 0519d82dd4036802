// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod change_log;
pub mod change_log_error;
pub mod edit_record;
pub mod resource;
pub mod segments;

// Re-export.
pub use change_log::*;
pub use change_log_error::*;
pub use edit_record::*;
pub use resource::*;
pub use segments::*;
