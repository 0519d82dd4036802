// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::BTreeSet, iter::repeat_n};

use crate::{DEBUG_EDITOR_CORE_PROJECTION, EditRecord, LineRenderer, Phrase, PlainTextRenderer,
            ProjectionConfig, RenderOps, Resource, Segments, View, scroll_backward,
            scroll_forward, start_relative_delete, start_relative_insert, stop_relative_delete,
            stop_relative_insert, to_signed, to_unsigned};

/// Brings a [`View`] in line with the buffer it displays, emitting the terminal
/// instructions that turn what is on screen into what should be there.
///
/// There are two ways to get there:
///
/// 1. [`Projection::refresh`] renders every row again. It is always correct.
/// 2. [`Projection::update`] replays the [`EditRecord`]s committed since the view was
///    last synchronized against the cached image. Rows that moved are moved on screen
///    with block copies, and only rows whose content changed are rendered again.
///
/// ```text
/// records ──▶ ┌──────────────────────┐   enough cached rows,   ┌──────────────────┐
///             │ Projection::update   │ ─── small scroll ─────▶ │ copies + dirty   │
///             └──────────┬───────────┘                         │ rows             │
///                        │ thin context or scroll ≥ height     └──────────────────┘
///                        ▼
///             ┌──────────────────────┐
///             │ Projection::refresh  │ ──▶ every row
///             └──────────────────────┘
/// ```
///
/// Both produce the same image, and the same screen contents.
#[derive(Debug, Clone, Default)]
pub struct Projection<R = PlainTextRenderer> {
    pub config: ProjectionConfig,
    pub renderer: R,
}

/// Why [`Projection::update`] gave up on incremental work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
enum RefreshReason {
    ImageSize,
    ThinContext,
    ScrollOverflow,
    StaleVersion,
}

/// One step of replaying a list of records against a view. A [`EditRecord::Lines`]
/// record is a deletion followed by an insertion at the same line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Touch(usize),
    Delete { index: usize, count: usize },
    Insert { index: usize, count: usize },
}

fn steps(records: &[EditRecord]) -> impl Iterator<Item = Step> {
    records.iter().flat_map(|record| {
        let parts = match record {
            EditRecord::Update(it) => [Some(Step::Touch(it.element)), None],
            EditRecord::Lines(it) => [
                (!it.deletion.is_empty()).then_some(Step::Delete {
                    index: it.element,
                    count: it.deletion.len(),
                }),
                (!it.insertion.is_empty()).then_some(Step::Insert {
                    index: it.element,
                    count: it.insertion.len(),
                }),
            ],
        };
        parts.into_iter().flatten()
    })
}

/// A view whose first line is `offset` shows the tail of a buffer of `total` lines.
/// Edits in it keep the bottom edge where it is, instead of the top edge.
fn is_last_page(offset: usize, height: usize, total: usize) -> bool {
    offset > 0 && offset + height >= total
}

/// Where the first line `target` ends up after the `records`, following the same
/// orientation rules that [`Projection::update`] applies to the view.
fn translate_target(
    mut target: usize,
    height: usize,
    mut total: usize,
    records: &[EditRecord],
) -> usize {
    for step in steps(records) {
        let is_last_page = is_last_page(target, height, total);
        match step {
            Step::Touch(_) => {}
            Step::Delete { index, count } => {
                if index + count <= target {
                    target -= count;
                } else if index < target {
                    target = index;
                } else if index < target + height {
                    let overlap = (index + count).min(target + height) - index;
                    if is_last_page && overlap <= target {
                        target -= overlap;
                    }
                }
                total = total.saturating_sub(count);
            }
            Step::Insert { index, count } => {
                let is_stop_relative =
                    is_last_page && index < target + height && index >= target + count;
                if index < target || is_stop_relative {
                    target += count;
                }
                total += count;
            }
        }
    }
    target
}

/// Bookkeeping for one call to [`Projection::update`]. `stale` runs parallel to the
/// view's image and marks the rows whose screen contents are garbage. `dirty` holds the
/// lines whose text changed in place, in the coordinates of the step being replayed.
#[derive(Debug)]
struct Reconcile {
    stale: Vec<bool>,
    dirty: BTreeSet<usize>,
    ops: RenderOps,
    total: usize,
}

impl Reconcile {
    fn new(height: usize, total: usize) -> Self {
        Self {
            stale: vec![false; height],
            dirty: BTreeSet::new(),
            ops: RenderOps::default(),
            total,
        }
    }

    fn cached(&self) -> usize { self.stale.iter().filter(|it| !**it).count() }

    fn delete(&mut self, view: &mut View, index: usize, count: usize) {
        let height = view.height();
        let offset = view.offset;
        let is_last_page = is_last_page(offset, height, self.total);

        if index + count <= offset {
            view.offset -= count;
        } else if index < offset + height {
            let above = offset.saturating_sub(index);
            let row = index.saturating_sub(offset);
            let overlap = (index + count).min(offset + height) - index.max(offset);

            if is_last_page && above == 0 && overlap <= offset {
                self.ops.extend(stop_relative_delete(view, row, overlap));
                view.delete(row, overlap);
                self.stale.drain(row..row + overlap);
                view.prefix(vec![Phrase::default(); overlap]);
                self.stale.splice(0..0, repeat_n(true, overlap));
            } else {
                view.offset -= above;
                self.ops.extend(start_relative_delete(view, row, overlap));
                view.delete(row, overlap);
                self.stale.drain(row..row + overlap);
                view.suffix(vec![Phrase::default(); overlap]);
                self.stale.extend(repeat_n(true, overlap));
            }
        }

        self.total = self.total.saturating_sub(count);
        self.dirty = self
            .dirty
            .iter()
            .filter_map(|&line| {
                if line < index {
                    Some(line)
                } else if line >= index + count {
                    Some(line - count)
                } else {
                    None
                }
            })
            .collect();
    }

    fn insert(&mut self, view: &mut View, index: usize, count: usize) {
        let height = view.height();
        let offset = view.offset;
        let is_last_page = is_last_page(offset, height, self.total);

        if index < offset {
            view.offset += count;
        } else if index < offset + height {
            let row = index - offset;

            if is_last_page && count <= row {
                self.ops.extend(stop_relative_insert(view, row, count));
                view.delete(0, count);
                self.stale.drain(0..count);
                view.insert(row - count, count);
                self.stale
                    .splice(row - count..row - count, repeat_n(true, count));
                view.offset += count;
            } else {
                let opened = count.min(height - row);
                self.ops.extend(start_relative_insert(view, row, opened));
                view.insert(row, opened);
                self.stale.splice(row..row, repeat_n(true, opened));
                view.trim();
                self.stale.truncate(height);
            }
        }

        self.total += count;
        self.dirty = self
            .dirty
            .iter()
            .map(|&line| if line >= index { line + count } else { line })
            .collect();
    }

    /// Move the image so that its first row shows `target`.
    fn scroll(&mut self, view: &mut View, target: usize) {
        let height = view.height();
        if target > view.offset {
            let quantity = target - view.offset;
            self.ops.extend(scroll_forward(view, quantity));
            view.delete(0, quantity);
            self.stale.drain(0..quantity);
            view.offset += quantity;
            view.suffix(vec![Phrase::default(); quantity]);
            self.stale.extend(repeat_n(true, quantity));
        } else if target < view.offset {
            let quantity = view.offset - target;
            self.ops.extend(scroll_backward(view, quantity));
            view.prefix(vec![Phrase::default(); quantity]);
            self.stale.splice(0..0, repeat_n(true, quantity));
            view.trim();
            self.stale.truncate(height);
        }
    }
}

impl<R: LineRenderer> Projection<R> {
    pub fn new(config: ProjectionConfig, renderer: R) -> Self { Self { config, renderer } }

    /// The phrase for `line`, or an empty one past the end of the buffer.
    fn render_line(&self, buffer: &Segments<String>, line: usize) -> Phrase {
        buffer
            .get(line)
            .map_or_else(Phrase::default, |it| self.renderer.render_line(it))
    }

    /// Render the view from scratch, with `start_line` in its first row.
    pub fn refresh(
        &self,
        buffer: &Segments<String>,
        view: &mut View,
        start_line: usize,
    ) -> RenderOps {
        let height = view.height();
        let phrases = (start_line..start_line + height)
            .map(|line| self.render_line(buffer, line))
            .collect();

        view.truncate();
        view.offset = start_line;
        view.total = buffer.len();
        view.visible.datum = to_signed(start_line);
        view.visible.magnitude = to_signed(height);
        let rows = view.set_rows(0, phrases);
        view.render_rows(rows)
    }

    fn fallback(
        &self,
        buffer: &Segments<String>,
        view: &mut View,
        start_line: usize,
        reason: RefreshReason,
    ) -> RenderOps {
        DEBUG_EDITOR_CORE_PROJECTION.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "projection -> refresh",
                reason = %reason,
                start_line = ?start_line,
                offset = ?view.offset,
                height = ?view.height()
            );
        });
        self.refresh(buffer, view, start_line)
    }

    /// Reconcile the view with `buffer`, which already has the `records` applied. The
    /// first line the view should show afterwards is `view.visible.datum`, given in the
    /// coordinates from before the `records`. It is carried across them like a line
    /// anchor.
    ///
    /// The returned instructions come in two groups: block copies that move rows which
    /// are still valid, then the rows that have to be drawn again.
    pub fn update(
        &self,
        buffer: &Segments<String>,
        view: &mut View,
        records: &[EditRecord],
    ) -> RenderOps {
        let height = view.height();
        let total = buffer.len();
        let net_change: isize = records.iter().map(EditRecord::change).sum();
        let total_before = to_unsigned(to_signed(total) - net_change);
        let target = translate_target(view.target(), height, total_before, records);
        let threshold = self.config.threshold_for(height);

        if height == 0 {
            view.offset = target;
            view.total = total;
            view.visible.datum = to_signed(target);
            return RenderOps::default();
        }

        if view.image.len() != height || view.whence.len() != height {
            return self.fallback(buffer, view, target, RefreshReason::ImageSize);
        }

        let mut state = Reconcile::new(height, total_before);
        for step in steps(records) {
            if !matches!(step, Step::Touch(_)) && state.cached() < threshold {
                return self.fallback(buffer, view, target, RefreshReason::ThinContext);
            }
            match step {
                Step::Touch(line) => {
                    state.dirty.insert(line);
                }
                Step::Delete { index, count } => state.delete(view, index, count),
                Step::Insert { index, count } => state.insert(view, index, count),
            }
        }

        if state.cached() < threshold {
            return self.fallback(buffer, view, target, RefreshReason::ThinContext);
        }
        if target.abs_diff(view.offset) >= height {
            return self.fallback(buffer, view, target, RefreshReason::ScrollOverflow);
        }
        state.scroll(view, target);

        for row in 0..height {
            let line = view.offset + row;
            if state.stale[row] || state.dirty.contains(&line) {
                let rows = view.set_rows(row, vec![self.render_line(buffer, line)]);
                state.ops += view.render_rows(rows);
            }
        }

        view.total = total;
        view.visible.datum = to_signed(target);

        DEBUG_EDITOR_CORE_PROJECTION.then(|| {
            tracing::debug!(
                message = "projection -> update",
                records = ?records.len(),
                copies = ?state.ops.copy_count(),
                rows = ?state.ops.seek_count(),
                offset = ?view.offset
            );
        });

        state.ops
    }

    /// Draw the given buffer `lines` again, for the ones that are visible. Use this when
    /// the way a line renders changed without its text changing.
    pub fn render_lines(
        &self,
        buffer: &Segments<String>,
        view: &mut View,
        lines: impl IntoIterator<Item = usize>,
    ) -> RenderOps {
        let mut ops = RenderOps::default();
        for line in lines {
            let Some(row) = line.checked_sub(view.offset) else {
                continue;
            };
            if row >= view.image.len() {
                continue;
            }
            let rows = view.set_rows(row, vec![self.render_line(buffer, line)]);
            ops += view.render_rows(rows);
        }
        ops
    }

    /// Bring `view` up to date with `resource`, and remember the version it now
    /// reflects. A version the change log can't answer for means a full refresh.
    pub fn synchronize(&self, resource: &Resource, view: &mut View) -> RenderOps {
        let ops = match resource.log_since(view.version) {
            Ok(records) => self.update(resource.buffer(), view, records),
            Err(error) => {
                DEBUG_EDITOR_CORE_PROJECTION.then(|| {
                    tracing::debug!(message = "projection -> synchronize", error = %error);
                });
                let start_line = view.target();
                self.fallback(
                    resource.buffer(),
                    view,
                    start_line,
                    RefreshReason::StaleVersion,
                )
            }
        };
        view.version = resource.snapshot();
        ops
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{CommitOptions, RenderOp, SegmentsConfig, VirtualScreen, assert_eq2, pos, size};

    fn projection() -> Projection { Projection::default() }

    fn strings(count: usize) -> Vec<String> { (0..count).map(|it| format!("line {it}")).collect() }

    fn buffer(count: usize) -> Segments<String> {
        Segments::with_lines(SegmentsConfig { segment_size: 4 }, strings(count))
    }

    fn texts(view: &View) -> Vec<String> { view.image.iter().map(Phrase::text).collect() }

    fn refreshed(buffer: &Segments<String>, height: usize, start_line: usize) -> View {
        let mut view = View::new(pos(1, 0), size(12, height));
        projection().refresh(buffer, &mut view, start_line);
        view
    }

    /// Check that the view and the screen after an update match a refresh at the same
    /// offset, drawn on a blank screen.
    fn assert_same_as_refresh(buffer: &Segments<String>, view: &View, screen: &VirtualScreen) {
        let mut expected_view = View::new(view.origin, view.size);
        expected_view.horizontal_offset = view.horizontal_offset;
        let mut expected_screen = VirtualScreen::new(size(12, view.height() + 1));
        let ops = projection().refresh(buffer, &mut expected_view, view.offset);
        expected_screen.apply(&ops);

        assert_eq2!(texts(view), texts(&expected_view));
        assert_eq2!(view.whence, expected_view.whence);
        assert_eq2!(screen.grid(), expected_screen.grid());
    }

    #[test]
    fn test_refresh_pads_with_empty_rows() {
        let buffer = buffer(2);
        let mut view = View::new(pos(0, 0), size(10, 4));
        let ops = projection().refresh(&buffer, &mut view, 1);
        assert_eq2!(texts(&view), vec!["line 1", "", "", ""]);
        assert_eq2!(view.offset, 1);
        assert_eq2!(view.total, 2);
        assert_eq2!(ops.seek_count(), 4);
        assert_eq2!(ops.copy_count(), 0);
    }

    #[test]
    fn test_update_delete_below_window_emits_nothing() {
        let mut buffer = buffer(10);
        let mut view = refreshed(&buffer, 3, 0);
        let record = EditRecord::lines(5, vec![], vec!["line 5".to_string()]);
        record.apply(&mut buffer);

        let ops = projection().update(&buffer, &mut view, &[record]);
        assert!(ops.is_empty());
        assert_eq2!(view.offset, 0);
        assert_eq2!(view.total, 9);
    }

    #[test]
    fn test_update_insert_inside_window_copies_rows_down() {
        let mut buffer = buffer(20);
        let mut view = refreshed(&buffer, 6, 0);
        let mut screen = VirtualScreen::new(size(12, 7));
        screen.apply(&projection().refresh(&buffer, &mut view, 0));

        let record = EditRecord::lines(2, vec!["new".to_string()], vec![]);
        record.apply(&mut buffer);
        let ops = projection().update(&buffer, &mut view, &[record]);

        assert_eq2!(
            ops[0],
            RenderOp::CopyRectangle {
                src: pos(3, 0),
                dst: pos(4, 0),
                size: size(12, 3)
            }
        );
        assert_eq2!(ops.seek_count(), 1);
        screen.apply(&ops);
        assert_same_as_refresh(&buffer, &view, &screen);
    }

    #[test]
    fn test_update_text_edit_renders_one_row() {
        let mut buffer = buffer(10);
        let mut view = refreshed(&buffer, 5, 2);
        let record = EditRecord::update(3, "X", "", 0);
        record.apply(&mut buffer);

        let ops = projection().update(&buffer, &mut view, &[record]);
        assert_eq2!(ops.copy_count(), 0);
        assert_eq2!(ops.seek_count(), 1);
        assert!(ops.contains(&RenderOp::Seek(pos(2, 0))));
        assert_eq2!(view.image[1].text(), "Xline 3");
    }

    #[test]
    fn test_update_edit_above_window_only_moves_offset() {
        let mut buffer = buffer(20);
        let mut view = refreshed(&buffer, 5, 10);
        let record = EditRecord::lines(1, strings(2), vec![]);
        record.apply(&mut buffer);

        let ops = projection().update(&buffer, &mut view, &[record]);
        assert!(ops.is_empty());
        assert_eq2!(view.offset, 12);
        assert_eq2!(view.target(), 12);
    }

    #[test]
    fn test_update_last_page_delete_keeps_bottom_edge() {
        let mut buffer = buffer(10);
        let mut view = refreshed(&buffer, 5, 5);
        let mut screen = VirtualScreen::new(size(12, 6));
        screen.apply(&projection().refresh(&buffer, &mut view, 5));

        let record = EditRecord::lines(7, vec![], vec!["line 7".to_string()]);
        record.apply(&mut buffer);
        let ops = projection().update(&buffer, &mut view, &[record]);

        assert_eq2!(view.offset, 4);
        assert_eq2!(
            ops[0],
            RenderOp::CopyRectangle {
                src: pos(1, 0),
                dst: pos(2, 0),
                size: size(12, 2)
            }
        );
        assert_eq2!(ops.seek_count(), 1);
        screen.apply(&ops);
        assert_same_as_refresh(&buffer, &view, &screen);
    }

    #[test]
    fn test_update_scrolls_to_target() {
        let buffer = buffer(20);
        let mut view = refreshed(&buffer, 5, 0);
        let mut screen = VirtualScreen::new(size(12, 6));
        screen.apply(&projection().refresh(&buffer, &mut view, 0));

        view.scroll_by(2);
        let ops = projection().update(&buffer, &mut view, &[]);
        assert_eq2!(view.offset, 2);
        assert_eq2!(ops.copy_count(), 1);
        assert_eq2!(ops.seek_count(), 2);
        screen.apply(&ops);
        assert_same_as_refresh(&buffer, &view, &screen);

        // A scroll of a whole page can't reuse anything.
        view.scroll_by(5);
        let ops = projection().update(&buffer, &mut view, &[]);
        assert_eq2!(ops.copy_count(), 0);
        assert_eq2!(ops.seek_count(), 5);
    }

    #[test]
    fn test_update_thin_context_refreshes() {
        let mut buffer = buffer(30);
        let mut view = refreshed(&buffer, 5, 0);
        let record = EditRecord::lines(1, strings(3), vec![]);
        let other = EditRecord::lines(0, strings(1), vec![]);
        record.apply(&mut buffer);
        other.apply(&mut buffer);

        // After the first insertion only 2 cached rows are left, under the threshold.
        let ops = projection().update(&buffer, &mut view, &[record, other]);
        assert_eq2!(ops.copy_count(), 0);
        assert_eq2!(ops.seek_count(), 5);
        assert_eq2!(view.offset, 0);
        assert_eq2!(view.image[0].text(), "line 0");
    }

    #[test]
    fn test_update_uninitialized_view_refreshes() {
        let buffer = buffer(3);
        let mut view = View::new(pos(0, 0), size(5, 2));
        let ops = projection().update(&buffer, &mut view, &[]);
        assert_eq2!(ops.seek_count(), 2);
        assert_eq2!(texts(&view), vec!["line 0", "line 1"]);
    }

    #[test]
    fn test_render_lines_skips_invisible() {
        let mut buffer = buffer(10);
        let mut view = refreshed(&buffer, 3, 4);
        if let Some(line) = buffer.get_mut(5) {
            line.push('!');
        }
        let ops = projection().render_lines(&buffer, &mut view, [0, 5, 9]);
        assert_eq2!(ops.seek_count(), 1);
        assert_eq2!(view.image[1].text(), "line 5!");
    }

    #[test]
    fn test_synchronize_follows_the_log() {
        let projection = projection();
        let mut resource = Resource::with_lines(SegmentsConfig::default(), strings(8));
        let mut view = View::new(pos(0, 0), size(12, 4));
        projection.synchronize(&resource, &mut view);
        assert_eq2!(view.version, resource.snapshot());

        resource.apply_edit(
            [EditRecord::update(1, "*", "", 0)],
            CommitOptions::command(),
        );
        let ops = projection.synchronize(&resource, &mut view);
        assert_eq2!(ops.seek_count(), 1);
        assert_eq2!(view.image[1].text(), "*line 1");
        assert_eq2!(view.version, resource.snapshot());

        // A reload makes the version stale.
        resource.reload(strings(2));
        let ops = projection.synchronize(&resource, &mut view);
        assert_eq2!(ops.seek_count(), 4);
        assert_eq2!(texts(&view), vec!["line 0", "line 1", "", ""]);
    }

    #[derive(Debug, Clone)]
    enum Action {
        Insert(usize, usize),
        Delete(usize, usize),
        Replace(usize, usize, usize),
        Type(usize),
        Scroll(isize),
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            (0..40usize, 1..4usize).prop_map(|(at, count)| Action::Insert(at, count)),
            (0..40usize, 1..4usize).prop_map(|(at, count)| Action::Delete(at, count)),
            (0..40usize, 1..3usize, 1..3usize)
                .prop_map(|(at, del, ins)| Action::Replace(at, del, ins)),
            (0..40usize).prop_map(Action::Type),
            (-3..4isize).prop_map(Action::Scroll),
        ]
    }

    proptest! {
        #[test]
        fn prop_update_matches_refresh(
            initial in 0..30usize,
            start in 0..20usize,
            height in 1..8usize,
            pan in 0..3usize,
            batches in prop::collection::vec(prop::collection::vec(action(), 0..4), 1..6),
        ) {
            let projection = projection();
            let mut resource = Resource::with_lines(SegmentsConfig { segment_size: 3 }, strings(initial));
            let mut view = View::new(pos(1, 0), size(12, height));
            view.horizontal_offset = pan;
            view.scroll_to(start);
            let mut screen = VirtualScreen::new(size(12, height + 1));
            screen.apply(&projection.synchronize(&resource, &mut view));

            let mut counter = 0;
            for batch in batches {
                let mut records = vec![];
                for action in batch {
                    let pending: isize = records.iter().map(EditRecord::change).sum();
                    let total = to_unsigned(to_signed(resource.line_count()) + pending);
                    counter += 1;
                    match action {
                        Action::Insert(at, count) => records.push(EditRecord::lines(
                            at.min(total),
                            (0..count).map(|it| format!("new {counter}.{it}")).collect(),
                            vec![],
                        )),
                        Action::Delete(at, count) => {
                            if at < total {
                                let stop = (at + count).min(total);
                                records.push(EditRecord::lines(at, vec![], vec![String::new(); stop - at]));
                            }
                        }
                        Action::Replace(at, del, ins) => {
                            if at < total {
                                let stop = (at + del).min(total);
                                records.push(EditRecord::lines(
                                    at,
                                    (0..ins).map(|it| format!("rep {counter}.{it}")).collect(),
                                    vec![String::new(); stop - at],
                                ));
                            }
                        }
                        Action::Type(at) => {
                            if at < total {
                                records.push(EditRecord::update(at, "中", "", 0));
                            }
                        }
                        Action::Scroll(delta) => view.scroll_by(delta),
                    }
                }
                resource.apply_edit(records, CommitOptions::command());
                screen.apply(&projection.synchronize(&resource, &mut view));
                assert_same_as_refresh(resource.buffer(), &view, &screen);
            }
        }
    }
}
