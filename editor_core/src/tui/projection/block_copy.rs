// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Block copy instructions that move rows of a [`View`] on the terminal, so rows that
//! are still valid don't have to be drawn again.
//!
//! All row arguments are relative to the view. Each function returns `None` when there
//! is nothing to move.
//!
//! ```text
//! start relative delete (w = 1, d = 2)     start relative insert (w = 1, d = 2)
//! ┌───┐      ┌───┐                         ┌───┐      ┌───┐
//! │ a │      │ a │                         │ a │      │ a │
//! │ b │ ╳    │ d │ ◀─┐                     │ b │ ─┐   │   │ stale
//! │ c │ ╳    │ e │ ◀─┤                     │ c │  │   │   │ stale
//! │ d │ ─────┘   │   │                     │ d │  └─▶ │ b │
//! │ e │ ─────────┘   │ stale               │ e │      │ c │
//! └───┘      └───┘                         └───┘      └───┘
//! ```

use crate::{RenderOp, View, pos, size};

fn copy_rows(view: &View, src_row: usize, dst_row: usize, rows: usize) -> Option<RenderOp> {
    if rows == 0 || src_row == dst_row {
        return None;
    }
    let origin = view.origin;
    Some(RenderOp::CopyRectangle {
        src: origin + pos(src_row, 0),
        dst: origin + pos(dst_row, 0),
        size: size(view.width(), rows),
    })
}

/// Rows move up by `quantity`, for a view that scrolls towards the end of the buffer.
#[must_use]
pub fn scroll_forward(view: &View, quantity: usize) -> Option<RenderOp> {
    let height = view.height();
    if quantity >= height {
        return None;
    }
    copy_rows(view, quantity, 0, height - quantity)
}

/// Rows move down by `quantity`, for a view that scrolls towards the start of the
/// buffer.
#[must_use]
pub fn scroll_backward(view: &View, quantity: usize) -> Option<RenderOp> {
    let height = view.height();
    if quantity >= height {
        return None;
    }
    copy_rows(view, 0, quantity, height - quantity)
}

/// `deleted` rows at `row` disappear and the rows below them move up.
#[must_use]
pub fn start_relative_delete(view: &View, row: usize, deleted: usize) -> Option<RenderOp> {
    let height = view.height();
    let from = row + deleted;
    if from >= height {
        return None;
    }
    copy_rows(view, from, row, height - from)
}

/// `deleted` rows at `row` disappear and the rows above them move down. Used on the last
/// page, where the view keeps its bottom edge anchored to the end of the buffer.
#[must_use]
pub fn stop_relative_delete(view: &View, row: usize, deleted: usize) -> Option<RenderOp> {
    let height = view.height();
    if deleted >= height {
        return None;
    }
    copy_rows(view, 0, deleted, row.min(height - deleted))
}

/// `inserted` rows open at `row` and the rows below them move down.
#[must_use]
pub fn start_relative_insert(view: &View, row: usize, inserted: usize) -> Option<RenderOp> {
    let height = view.height();
    if row + inserted >= height {
        return None;
    }
    copy_rows(view, row, row + inserted, height - row - inserted)
}

/// `inserted` rows open above `row` and the rows above them move up. Used on the last
/// page.
#[must_use]
pub fn stop_relative_insert(view: &View, row: usize, inserted: usize) -> Option<RenderOp> {
    if inserted >= row {
        return None;
    }
    copy_rows(view, inserted, 0, row - inserted)
}
