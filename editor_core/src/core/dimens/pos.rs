// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter, Result},
          ops::Add};

/// Terminal cell coordinates, 0-based.
///
/// ```text
///     0   4    9    1    2    2
///                   4    0    5
///    ┌────┴────┴────┴────┴────┴── col
///  0 ┤     ╭─────────────╮
///  1 ┤     │ origin pos: │
///  2 ┤     │ [5, 0]      │
///  3 ┤     │ size:       │
///  4 ┤     │ [16, 5]     │
///  5 ┤     ╰─────────────╯
///    │
///   row
/// ```
#[derive(Copy, Clone, PartialEq, PartialOrd, Ord, Eq, Hash, Default)]
pub struct Pos {
    pub row_index: usize,
    pub col_index: usize,
}

/// Shorthand for [`Pos::new`].
#[must_use]
pub fn pos(row_index: usize, col_index: usize) -> Pos { Pos::new(row_index, col_index) }

impl Pos {
    #[must_use]
    pub fn new(row_index: usize, col_index: usize) -> Self {
        Self {
            row_index,
            col_index,
        }
    }

    /// The position `rows` rows below this one.
    #[must_use]
    pub fn down(self, rows: usize) -> Self {
        Self {
            row_index: self.row_index + rows,
            ..self
        }
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Self::Output {
        Pos {
            row_index: self.row_index + rhs.row_index,
            col_index: self.col_index + rhs.col_index,
        }
    }
}

impl Debug for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "Pos [c: {a:?}, r: {b:?}]", a = self.col_index, b = self.row_index)
    }
}
