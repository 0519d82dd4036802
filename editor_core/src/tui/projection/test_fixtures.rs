// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! An in memory terminal that executes [`RenderOp`]s, so that tests can compare what
//! different instruction sequences leave on screen.

use crate::{Pos, RenderOp, RenderOps, Size, TuiStyle, build_segments_for_str, pos};

/// One terminal cell. The cells covered by the right half of a wide glyph hold an empty
/// `text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScreenCell {
    pub text: String,
    pub style: TuiStyle,
}

impl Default for ScreenCell {
    fn default() -> Self {
        Self {
            text: " ".into(),
            style: TuiStyle::default(),
        }
    }
}

/// The main constructor is [`VirtualScreen::new`], which starts out blank. Writes that
/// fall outside of the screen are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualScreen {
    pub size: Size,
    pub cursor: Pos,
    pub grid: Vec<Vec<ScreenCell>>,
}

impl VirtualScreen {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            cursor: Pos::default(),
            grid: vec![vec![ScreenCell::default(); size.col_width]; size.row_height],
        }
    }

    #[must_use]
    pub fn grid(&self) -> &[Vec<ScreenCell>] { &self.grid }

    /// The text of each row, without styles.
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        self.grid
            .iter()
            .map(|row| row.iter().map(|cell| cell.text.as_str()).collect())
            .collect()
    }

    fn put(&mut self, cell: ScreenCell) {
        let Pos {
            row_index,
            col_index,
        } = self.cursor;
        if let Some(it) = self
            .grid
            .get_mut(row_index)
            .and_then(|row| row.get_mut(col_index))
        {
            *it = cell;
        }
        self.cursor.col_index += 1;
    }

    pub fn apply(&mut self, ops: &RenderOps) {
        for op in ops.iter() {
            self.apply_op(op);
        }
    }

    pub fn apply_op(&mut self, op: &RenderOp) {
        match op {
            RenderOp::Seek(it) => self.cursor = *it,
            RenderOp::ResetStyle => {}
            RenderOp::Erase(count) => {
                for _ in 0..*count {
                    self.put(ScreenCell::default());
                }
            }
            RenderOp::WriteText(text, style) => {
                for seg in build_segments_for_str(text) {
                    self.put(ScreenCell {
                        text: seg.get_str(text).into(),
                        style: *style,
                    });
                    for _ in 1..seg.display_width {
                        self.put(ScreenCell {
                            text: String::new(),
                            style: *style,
                        });
                    }
                }
            }
            RenderOp::CopyRectangle { src, dst, size } => {
                let block: Vec<Vec<ScreenCell>> = (0..size.row_height)
                    .map(|row| {
                        (0..size.col_width)
                            .map(|col| self.cell(*src + pos(row, col)))
                            .collect()
                    })
                    .collect();
                for (row, cells) in block.into_iter().enumerate() {
                    for (col, cell) in cells.into_iter().enumerate() {
                        let at = *dst + pos(row, col);
                        if let Some(it) = self
                            .grid
                            .get_mut(at.row_index)
                            .and_then(|line| line.get_mut(at.col_index))
                        {
                            *it = cell;
                        }
                    }
                }
            }
        }
    }

    fn cell(&self, at: Pos) -> ScreenCell {
        self.grid
            .get(at.row_index)
            .and_then(|row| row.get(at.col_index))
            .cloned()
            .unwrap_or_default()
    }
}
