// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Grapheme cluster segmentation. The editor core treats a grapheme cluster as the
//! smallest user perceived glyph, the "character unit" that cursor motion must respect.
//! Each one is measured in three compatible coordinate systems:
//!
//! | Measure   | What it counts                                    |
//! | --------- | ------------------------------------------------- |
//! | codepoint | Unicode scalar values (`char`s)                   |
//! | cell      | display columns, via [`unicode_width`]            |
//! | unit      | grapheme clusters, via [`unicode_segmentation`]   |
//!
//! Here's a visual depiction for the string `"a😃b"`:
//!
//! ```text
//! codepoint : 0   1   2
//! cell      : 0   1 2 3
//! unit      : 0   1   2
//!             a   😃  b
//! ```

// Attach sources.
pub mod seg;

// Re-export.
pub use seg::*;
