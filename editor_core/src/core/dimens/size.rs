// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Debug, Formatter, Result};

/// Width and height in terminal cells.
#[derive(Copy, Clone, PartialEq, PartialOrd, Ord, Eq, Hash, Default)]
pub struct Size {
    pub col_width: usize,
    pub row_height: usize,
}

/// Shorthand for [`Size::new`].
#[must_use]
pub fn size(col_width: usize, row_height: usize) -> Size { Size::new(col_width, row_height) }

impl Size {
    #[must_use]
    pub fn new(col_width: usize, row_height: usize) -> Self {
        Self {
            col_width,
            row_height,
        }
    }
}

impl Debug for Size {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "[w: {w:?}, h: {h:?}]", w = self.col_width, h = self.row_height)
    }
}
