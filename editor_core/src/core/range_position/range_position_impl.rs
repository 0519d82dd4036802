// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Mutable position state for a point or range on one axis. Used for carets, selections,
/// and the vertical and horizontal windows of a [`crate::View`].
///
/// ```text
///            datum          datum + offset     datum + magnitude
///              ▼                  ▼                   ▼
/// ─────────────┼──────────────────┼───────────────────┼──────────▶
///            start             position              stop
/// ```
///
/// No constraints are enforced: the offset may sit before the start or after the stop.
/// Callers decide when to clamp, using [`RangePosition::limit`] or
/// [`RangePosition::constrain`]. All operations are allocation free.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct RangePosition {
    /// The absolute reference position (the start).
    pub datum: isize,
    /// Position relative to [`Self::datum`].
    pub offset: isize,
    /// Size of the range relative to [`Self::datum`].
    pub magnitude: isize,
}

/// The absolute `(start, position, stop)` triple of a [`RangePosition`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub start: isize,
    pub position: isize,
    pub stop: isize,
}

/// Where [`RangePosition::move_by`] measures the location from.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Perspective {
    /// The location is measured backwards from the stop.
    FromStop,
    /// The location is added to the current offset.
    Relative,
    /// The location is measured forwards from the start.
    FromStart,
}

/// Relation of the offset to the `[0, magnitude]` band.
#[derive(Clone, PartialEq, Copy, Debug)]
pub enum CaretLocationInRange {
    Underflow,
    Contained,
    Overflow,
}

impl CaretLocationInRange {
    /// `-1` for before the start, `0` for within, and `+1` for after the stop.
    #[must_use]
    pub fn as_i8(&self) -> i8 {
        match self {
            CaretLocationInRange::Underflow => -1,
            CaretLocationInRange::Contained => 0,
            CaretLocationInRange::Overflow => 1,
        }
    }
}

/// A line or cell index as a [`RangePosition`] coordinate. Saturates at `isize::MAX`.
#[must_use]
pub fn to_signed(it: usize) -> isize { isize::try_from(it).unwrap_or(isize::MAX) }

/// A [`RangePosition`] coordinate as a line or cell index. Negative values become `0`.
#[must_use]
pub fn to_unsigned(it: isize) -> usize { usize::try_from(it).unwrap_or(0) }

impl RangePosition {
    #[must_use]
    pub fn new(datum: isize, magnitude: isize, offset: isize) -> Self {
        Self {
            datum,
            offset,
            magnitude,
        }
    }

    /// The absolute start.
    #[must_use]
    pub fn minimum(&self) -> isize { self.datum }

    /// The absolute stop.
    #[must_use]
    pub fn maximum(&self) -> isize { self.datum + self.magnitude }

    /// The absolute position.
    #[must_use]
    pub fn get(&self) -> isize { self.datum + self.offset }

    /// Set the absolute position by recalculating the offset. Returns the change that
    /// was applied, as `old offset - new offset`.
    pub fn set(&mut self, position: isize) -> isize {
        let new = position - self.datum;
        let change = self.offset - new;
        self.offset = new;
        change
    }

    pub fn configure(&mut self, datum: isize, magnitude: isize, offset: isize) {
        self.datum = datum;
        self.magnitude = magnitude;
        self.offset = offset;
    }

    /// Clamp the absolute start, position, and stop into `[minimum, maximum]`.
    pub fn limit(&mut self, minimum: isize, maximum: isize) {
        let clamp = |it: isize| it.max(minimum).min(maximum);
        let snapshot = self.snapshot();
        self.restore(PositionSnapshot {
            start: clamp(snapshot.start),
            position: clamp(snapshot.position),
            stop: clamp(snapshot.stop),
        });
    }

    /// Clamp the offset into `[0, magnitude]`. Returns the overflow: positive when the
    /// stop was exceeded, negative when the start was.
    pub fn constrain(&mut self) -> isize {
        let original = self.offset;
        if original > self.magnitude {
            self.offset = self.magnitude;
        } else if original < 0 {
            self.offset = 0;
        }
        original - self.offset
    }

    #[must_use]
    pub fn snapshot(&self) -> PositionSnapshot {
        PositionSnapshot {
            start: self.datum,
            position: self.datum + self.offset,
            stop: self.datum + self.magnitude,
        }
    }

    pub fn restore(&mut self, snapshot: PositionSnapshot) {
        self.datum = snapshot.start;
        self.offset = snapshot.position - snapshot.start;
        self.magnitude = snapshot.stop - snapshot.start;
    }

    /// Move the offset by `quantity`; negative quantities move it back.
    pub fn update(&mut self, quantity: isize) { self.offset += quantity; }

    pub fn clear(&mut self) { *self = Self::default(); }

    /// Zero the offset and magnitude. The datum is not changed.
    pub fn zero(&mut self) {
        self.magnitude = 0;
        self.offset = 0;
    }

    /// Move the offset relatively or absolutely, see [`Perspective`]. Returns the change
    /// that was applied: `location` for relative moves, `old - new` offset for anchored
    /// ones.
    pub fn move_by(&mut self, location: isize, perspective: Perspective) -> isize {
        let offset = match perspective {
            Perspective::Relative => {
                self.offset += location;
                return location;
            }
            Perspective::FromStart => location,
            Perspective::FromStop => self.magnitude - location,
        };
        let change = self.offset - offset;
        self.offset = offset;
        change
    }

    /// Move the datum to the position and zero the offset and magnitude. Returns the
    /// distance the datum moved.
    pub fn collapse(&mut self) -> isize {
        let offset = self.offset;
        self.datum += offset;
        self.offset = 0;
        self.magnitude = 0;
        offset
    }

    /// [`Self::collapse`] only when the position is outside of the range, or on its
    /// stop.
    pub fn normalize(&mut self) -> isize {
        if self.offset >= self.magnitude || self.offset < 0 {
            self.collapse()
        } else {
            0
        }
    }

    /// Move the datum so that the offset equals `offset`. The magnitude is untouched.
    /// Returns the change applied to the datum.
    pub fn reposition(&mut self, offset: isize) -> isize {
        let delta = self.offset - offset;
        self.datum += delta;
        self.offset = offset;
        delta
    }

    /// Start the range at the position, keeping the stop where it is.
    pub fn start_at_offset(&mut self) {
        let change = self.reposition(0);
        self.magnitude -= change;
    }

    /// Place the position in the middle of the range.
    pub fn bisect(&mut self) { self.offset = self.magnitude / 2; }

    /// Halt the range at the position (plus `delta`), keeping the start where it is.
    pub fn halt_at_offset(&mut self, delta: isize) { self.magnitude = self.offset + delta; }

    /// Swap the start and stop, which reverses the direction of the range. The offset is
    /// mirrored so it is now measured backwards from the old stop.
    pub fn invert(&mut self) {
        self.datum += self.magnitude;
        self.offset = -self.offset;
        self.magnitude = -self.magnitude;
    }

    /// Send the datum forwards (or backwards) by `quantity` magnitudes.
    pub fn page(&mut self, quantity: isize) { self.datum += self.magnitude * quantity; }

    /// Increase the magnitude relative to the datum relative `offset`.
    pub fn dilate(&mut self, offset: isize, quantity: isize) {
        self.contract(offset, -quantity);
    }

    /// Decrease the magnitude relative to the datum relative `offset`.
    ///
    /// ```text
    /// pivot before start  → only the datum moves.
    /// pivot inside range  → the magnitude and offset shrink.
    /// pivot after stop    → only the offset moves.
    /// ```
    pub fn contract(&mut self, offset: isize, quantity: isize) {
        if offset < 0 {
            self.datum -= quantity;
        } else if offset <= self.magnitude {
            self.magnitude -= quantity;
            self.offset -= quantity;
        } else {
            self.offset -= quantity;
        }
    }

    /// Compensate for `quantity` elements being inserted (positive) or removed
    /// (negative) at the absolute `offset` of the same coordinate space.
    ///
    /// - Edit before the range: the whole range shifts.
    /// - Edit inside the range: the range grows or shrinks along with the offset.
    /// - Edit after the range: only the offset moves.
    pub fn changed(&mut self, offset: isize, quantity: isize) {
        let relative_offset = offset - self.datum;

        if relative_offset < 0 {
            self.datum += quantity;
        } else if relative_offset > self.magnitude {
            self.update(quantity);
        } else {
            self.update(quantity);
            self.magnitude += quantity;
        }
    }

    #[must_use]
    pub fn relation(&self) -> CaretLocationInRange {
        if self.offset < 0 {
            CaretLocationInRange::Underflow
        } else if self.offset > self.magnitude {
            CaretLocationInRange::Overflow
        } else {
            CaretLocationInRange::Contained
        }
    }

    /// If the position is outside of the range, move the start or the stop onto it.
    pub fn compensate(&mut self) {
        match self.relation() {
            CaretLocationInRange::Overflow => self.magnitude = self.offset,
            CaretLocationInRange::Underflow => {
                self.datum += self.offset;
                self.offset = 0;
            }
            CaretLocationInRange::Contained => {}
        }
    }

    /// The absolute `start..stop` range, shifted by `adjustment`.
    #[must_use]
    pub fn as_range(&self, adjustment: isize) -> Range<isize> {
        let snapshot = self.snapshot();
        (snapshot.start + adjustment)..(snapshot.stop + adjustment)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::assert_eq2;

    fn triple(it: &RangePosition) -> (isize, isize, isize) {
        let snapshot = it.snapshot();
        (snapshot.start, snapshot.position, snapshot.stop)
    }

    #[test]
    fn test_get_set() {
        let mut it = RangePosition::new(10, 5, 2);
        assert_eq2!(it.get(), 12);
        assert_eq2!(it.minimum(), 10);
        assert_eq2!(it.maximum(), 15);

        let change = it.set(14);
        assert_eq2!(change, -2);
        assert_eq2!(it.offset, 4);
        assert_eq2!(it.get(), 14);
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let it = RangePosition::new(-3, 7, 9);
        let mut other = RangePosition::default();
        other.restore(it.snapshot());
        assert_eq2!(other, it);
        assert_eq2!(triple(&other), (-3, 6, 4));
    }

    #[test_case(0, 20, (5, 8, 10) ; "inside limits")]
    #[test_case(6, 9, (6, 8, 9) ; "clamp start and stop")]
    #[test_case(9, 20, (9, 9, 10) ; "clamp start and position")]
    #[test_case(0, 4, (4, 4, 4) ; "everything above maximum")]
    fn test_limit(min: isize, max: isize, expected: (isize, isize, isize)) {
        let mut it = RangePosition::new(5, 5, 3);
        it.limit(min, max);
        assert_eq2!(triple(&it), expected);
    }

    #[test_case(3, 0, 3 ; "contained")]
    #[test_case(8, 3, 5 ; "overflow")]
    #[test_case(-2, -2, 0 ; "underflow")]
    fn test_constrain(offset: isize, overflow: isize, constrained: isize) {
        let mut it = RangePosition::new(0, 5, offset);
        assert_eq2!(it.constrain(), overflow);
        assert_eq2!(it.offset, constrained);
    }

    #[test]
    fn test_update_clear_zero() {
        let mut it = RangePosition::new(4, 6, 1);
        it.update(3);
        assert_eq2!(it.offset, 4);
        it.update(-5);
        assert_eq2!(it.offset, -1);

        it.zero();
        assert_eq2!(it, RangePosition::new(4, 0, 0));

        it.clear();
        assert_eq2!(it, RangePosition::default());
    }

    #[test_case(3, Perspective::Relative, 5, 3 ; "relative")]
    #[test_case(1, Perspective::FromStart, 1, 1 ; "from start")]
    #[test_case(1, Perspective::FromStop, 9, -7 ; "from stop")]
    #[test_case(0, Perspective::FromStop, 10, -8 ; "onto stop")]
    fn test_move_by(location: isize, perspective: Perspective, offset: isize, change: isize) {
        let mut it = RangePosition::new(100, 10, 2);
        assert_eq2!(it.move_by(location, perspective), change);
        assert_eq2!(it.offset, offset);
        assert_eq2!(it.datum, 100);
        assert_eq2!(it.magnitude, 10);
    }

    #[test]
    fn test_move_by_anchors_are_inverse_perspectives() {
        for location in -3..15 {
            let mut from_start = RangePosition::new(7, 10, 4);
            let mut from_stop = from_start;
            from_start.move_by(location, Perspective::FromStart);
            from_stop.move_by(10 - location, Perspective::FromStop);
            assert_eq2!(triple(&from_start), triple(&from_stop));

            // Anchored moves to the current location are the identity.
            let before = triple(&from_start);
            let current = from_start.offset;
            from_start.move_by(current, Perspective::FromStart);
            from_start.move_by(10 - current, Perspective::FromStop);
            assert_eq2!(triple(&from_start), before);
        }
    }

    #[test]
    fn test_move_by_relative_round_trip() {
        let mut it = RangePosition::new(3, 4, 1);
        let before = triple(&it);
        it.move_by(6, Perspective::Relative);
        it.move_by(-6, Perspective::Relative);
        assert_eq2!(triple(&it), before);
    }

    #[test]
    fn test_collapse_and_normalize() {
        let mut it = RangePosition::new(10, 5, 3);
        assert_eq2!(it.collapse(), 3);
        assert_eq2!(it, RangePosition::new(13, 0, 0));

        // Inside: untouched.
        let mut it = RangePosition::new(10, 5, 3);
        assert_eq2!(it.normalize(), 0);
        assert_eq2!(it, RangePosition::new(10, 5, 3));

        // On the stop: collapses.
        let mut it = RangePosition::new(10, 5, 5);
        assert_eq2!(it.normalize(), 5);
        assert_eq2!(it, RangePosition::new(15, 0, 0));

        // Before the start: collapses.
        let mut it = RangePosition::new(10, 5, -2);
        assert_eq2!(it.normalize(), -2);
        assert_eq2!(it, RangePosition::new(8, 0, 0));
    }

    #[test]
    fn test_reposition_start_halt() {
        let mut it = RangePosition::new(10, 8, 5);
        assert_eq2!(it.reposition(2), 3);
        assert_eq2!(triple(&it), (13, 15, 21));

        let mut it = RangePosition::new(10, 8, 5);
        it.start_at_offset();
        assert_eq2!(triple(&it), (15, 15, 18));

        let mut it = RangePosition::new(10, 8, 5);
        it.halt_at_offset(1);
        assert_eq2!(triple(&it), (10, 15, 16));
    }

    #[test]
    fn test_bisect_invert_page() {
        let mut it = RangePosition::new(10, 9, 0);
        it.bisect();
        assert_eq2!(it.offset, 4);

        let mut it = RangePosition::new(10, 6, 2);
        it.invert();
        assert_eq2!(it, RangePosition::new(16, -6, -2));
        assert_eq2!(it.get(), 14);
        it.invert();
        assert_eq2!(it, RangePosition::new(10, 6, 2));

        let mut it = RangePosition::new(0, 24, 0);
        it.page(2);
        assert_eq2!(it.datum, 48);
        it.page(-1);
        assert_eq2!(it.datum, 24);
    }

    #[test_case(-1, (8, 12, 18) ; "pivot before start")]
    #[test_case(3, (10, 12, 18) ; "pivot inside range")]
    #[test_case(11, (10, 12, 20) ; "pivot after stop")]
    fn test_contract(pivot: isize, expected: (isize, isize, isize)) {
        let mut it = RangePosition::new(10, 10, 4);
        it.contract(pivot, 2);
        assert_eq2!(triple(&it), expected);
    }

    #[test]
    fn test_dilate_is_negative_contract() {
        let mut dilated = RangePosition::new(10, 10, 4);
        let mut contracted = dilated;
        dilated.dilate(3, 2);
        contracted.contract(3, -2);
        assert_eq2!(dilated, contracted);
        assert_eq2!(triple(&dilated), (10, 16, 22));
    }

    #[test_case(2, 3, (13, 19, 23) ; "insert before range shifts everything")]
    #[test_case(12, 3, (10, 19, 23) ; "insert inside range grows it")]
    #[test_case(25, 3, (10, 19, 20) ; "insert after range moves the offset")]
    #[test_case(2, -2, (8, 14, 18) ; "delete before range shifts everything")]
    #[test_case(12, -2, (10, 14, 18) ; "delete inside range shrinks it")]
    fn test_changed(offset: isize, quantity: isize, expected: (isize, isize, isize)) {
        let mut it = RangePosition::new(10, 10, 6);
        it.changed(offset, quantity);
        assert_eq2!(triple(&it), expected);
    }

    #[test_case(-1, CaretLocationInRange::Underflow, -1)]
    #[test_case(0, CaretLocationInRange::Contained, 0)]
    #[test_case(5, CaretLocationInRange::Contained, 0)]
    #[test_case(6, CaretLocationInRange::Overflow, 1)]
    fn test_relation(offset: isize, expected: CaretLocationInRange, numeric: i8) {
        let it = RangePosition::new(0, 5, offset);
        assert_eq2!(it.relation(), expected);
        assert_eq2!(it.relation().as_i8(), numeric);
    }

    #[test]
    fn test_compensate() {
        let mut it = RangePosition::new(10, 5, 8);
        it.compensate();
        assert_eq2!(triple(&it), (10, 18, 18));

        let mut it = RangePosition::new(10, 5, -3);
        it.compensate();
        assert_eq2!(triple(&it), (7, 7, 12));

        let mut it = RangePosition::new(10, 5, 3);
        it.compensate();
        assert_eq2!(triple(&it), (10, 13, 15));
    }

    #[test]
    fn test_as_range() {
        let it = RangePosition::new(4, 3, 0);
        assert_eq2!(it.as_range(0), 4..7);
        assert_eq2!(it.as_range(-4), 0..3);
    }

    #[test]
    fn test_signed_and_unsigned_conversions() {
        assert_eq2!(to_signed(7), 7);
        assert_eq2!(to_signed(usize::MAX), isize::MAX);
        assert_eq2!(to_unsigned(7), 7);
        assert_eq2!(to_unsigned(-3), 0);
    }
}
