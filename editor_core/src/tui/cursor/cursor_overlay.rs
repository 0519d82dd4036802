// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Range;

use crate::{Composition, Pos, RenderOp, RenderOps};

/// Remembers the cursor [`Composition`] that is on screen, so that moving the cursor only
/// redraws the indicators that changed.
///
/// ```text
/// previous ─┐
///           ├─▶ reset the indicators that changed ─▶ set the ones that changed,
/// next ─────┘                                        and any indicator the first
///                                                    step painted over
/// ```
///
/// When the row itself is drawn again (its text changed, or the view scrolled), call
/// [`CursorOverlay::forget`] since the indicators are gone from the screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorOverlay {
    drawn: Option<(Pos, Composition)>,
}

fn overlaps(lhs: &Range<usize>, rhs: &Range<usize>) -> bool {
    lhs.start < rhs.end && rhs.start < lhs.end
}

impl CursorOverlay {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// The composition that is on screen, and the origin of its row.
    #[must_use]
    pub fn drawn(&self) -> Option<&(Pos, Composition)> { self.drawn.as_ref() }

    /// Instructions that replace what is on screen with `next`, on the row at `origin`.
    /// Nothing is emitted when `next` is what is already there.
    pub fn update(&mut self, origin: Pos, width: usize, next: Composition) -> RenderOps {
        let mut ops = RenderOps::default();
        let mut painted: Vec<Range<usize>> = vec![];

        let previous = self.drawn.take();
        let same_row = matches!(&previous, Some((it, _)) if *it == origin);

        if let Some((previous_origin, previous)) = &previous {
            for (old, new) in previous.erase_order().into_iter().zip(next.erase_order()) {
                if same_row && old == new {
                    continue;
                }
                old.push_reset(&mut ops, *previous_origin, width);
                if same_row {
                    painted.push(old.span());
                }
            }
        }

        let old_draw_order = previous
            .as_ref()
            .filter(|_| same_row)
            .map(|(_, it)| it.draw_order());
        for (index, new) in next.draw_order().into_iter().enumerate() {
            let is_unchanged = old_draw_order.is_some_and(|old| old[index] == new);
            let span = new.span();
            if !is_unchanged || painted.iter().any(|it| overlaps(it, &span)) {
                new.push_set(&mut ops, origin, width);
                painted.push(span);
            }
        }

        if !ops.is_empty() {
            ops += RenderOp::ResetStyle;
        }
        self.drawn = Some((origin, next));
        ops
    }

    /// Instructions that remove the cursor from the screen.
    pub fn clear(&mut self, width: usize) -> RenderOps {
        let mut ops = RenderOps::default();
        if let Some((origin, previous)) = self.drawn.take() {
            for it in previous.erase_order() {
                it.push_reset(&mut ops, origin, width);
            }
            ops += RenderOp::ResetStyle;
        }
        ops
    }

    /// Drop the composition without emitting anything.
    pub fn forget(&mut self) { self.drawn = None; }
}
