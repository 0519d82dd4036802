// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod block_copy;
pub mod line_renderer;
pub mod projection_config;
pub mod projection_impl;
pub mod render_op;
pub mod test_fixtures;
pub mod view;

// Re-export.
pub use block_copy::*;
pub use line_renderer::*;
pub use projection_config::*;
pub use projection_impl::*;
pub use render_op::*;
pub use test_fixtures::*;
pub use view::*;
