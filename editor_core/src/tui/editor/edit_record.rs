// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::{RangePosition, Segments, byte_index_of_codepoint, codepoint_count,
            to_signed};

/// A logged, invertible description of one change to a [`Segments`] buffer.
///
/// | Variant                 | Changes                           | `change()`             |
/// | ----------------------- | --------------------------------- | ---------------------- |
/// | [`EditRecord::Update`]  | the text of one line, in place    | always `0`             |
/// | [`EditRecord::Lines`]   | whole lines, inserted and deleted | inserted minus deleted |
///
/// Every record can produce its own inverse with [`EditRecord::invert`], which is what
/// undo and redo are built on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::AsRefStr)]
pub enum EditRecord {
    Update(UpdateRecord),
    Lines(LinesRecord),
}

/// Replace `deletion` with `insertion` at the codepoint `position` of line `element`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub element: usize,
    pub insertion: String,
    pub deletion: String,
    pub position: usize,
}

/// Delete `deletion.len()` lines starting at line `element`, then insert `insertion` in
/// their place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinesRecord {
    pub element: usize,
    pub insertion: Vec<String>,
    pub deletion: Vec<String>,
}

mod convenience_conversions {
    use super::*;

    impl From<UpdateRecord> for EditRecord {
        fn from(it: UpdateRecord) -> Self { EditRecord::Update(it) }
    }

    impl From<LinesRecord> for EditRecord {
        fn from(it: LinesRecord) -> Self { EditRecord::Lines(it) }
    }
}

impl EditRecord {
    pub fn update(
        element: usize,
        insertion: impl Into<String>,
        deletion: impl Into<String>,
        position: usize,
    ) -> Self {
        UpdateRecord {
            element,
            insertion: insertion.into(),
            deletion: deletion.into(),
            position,
        }
        .into()
    }

    #[must_use]
    pub fn lines(element: usize, insertion: Vec<String>, deletion: Vec<String>) -> Self {
        LinesRecord {
            element,
            insertion,
            deletion,
        }
        .into()
    }

    /// The line index the record was written against.
    #[must_use]
    pub fn element(&self) -> usize {
        match self {
            EditRecord::Update(it) => it.element,
            EditRecord::Lines(it) => it.element,
        }
    }

    /// The net change in the number of lines.
    #[must_use]
    pub fn change(&self) -> isize {
        match self {
            EditRecord::Update(_) => 0,
            EditRecord::Lines(it) => to_signed(it.insertion.len()) - to_signed(it.deletion.len()),
        }
    }

    /// The first line touched, and how many lines are touched.
    #[must_use]
    pub fn span(&self) -> (usize, usize) {
        match self {
            EditRecord::Update(it) => (it.element, 1),
            EditRecord::Lines(it) => (it.element, it.insertion.len().max(it.deletion.len())),
        }
    }

    /// The change in the UTF-8 size of the buffer after the record is applied.
    #[must_use]
    pub fn byte_delta(&self) -> isize {
        match self {
            EditRecord::Update(it) => to_signed(it.insertion.len()) - to_signed(it.deletion.len()),
            EditRecord::Lines(it) => {
                let size = |lines: &[String]| lines.iter().map(String::len).sum::<usize>();
                to_signed(size(&it.insertion)) - to_signed(size(&it.deletion))
            }
        }
    }

    #[must_use]
    pub fn is_structural(&self) -> bool { matches!(self, EditRecord::Lines(_)) }

    /// The record that reverses the effect of this one.
    #[must_use]
    pub fn invert(&self) -> Self {
        match self {
            EditRecord::Update(it) => UpdateRecord {
                element: it.element,
                insertion: it.deletion.clone(),
                deletion: it.insertion.clone(),
                position: it.position,
            }
            .into(),
            EditRecord::Lines(it) => LinesRecord {
                element: it.element,
                insertion: it.deletion.clone(),
                deletion: it.insertion.clone(),
            }
            .into(),
        }
    }

    /// Perform the change on `buffer`, and return the record that describes what was
    /// actually done. Addresses past the end of the buffer are clamped:
    ///
    /// - A [`EditRecord::Lines`] element past the last line becomes an append, and only
    ///   the lines that existed are deleted.
    /// - An [`EditRecord::Update`] position past the end of the line moves to its end,
    ///   and only the text that existed is deleted. An update addressed past the last
    ///   line does nothing.
    ///
    /// The inverse of the returned record always restores `buffer`, which is why the
    /// [`crate::ChangeLog`] keeps it instead of `self`.
    pub fn apply(&self, buffer: &mut Segments<String>) -> EditRecord {
        match self {
            EditRecord::Update(it) => {
                let Some(line) = buffer.get_mut(it.element) else {
                    return self.clone();
                };
                let position = it.position.min(codepoint_count(line));
                let start = byte_index_of_codepoint(line, position);
                let stop =
                    byte_index_of_codepoint(line, position + codepoint_count(&it.deletion));
                let deletion = line[start..stop].to_string();
                line.replace_range(start..stop, &it.insertion);
                UpdateRecord {
                    element: it.element,
                    insertion: it.insertion.clone(),
                    deletion,
                    position,
                }
                .into()
            }
            EditRecord::Lines(it) => {
                let element = it.element.min(buffer.len());
                let deletion = buffer.replace(
                    element,
                    element + it.deletion.len(),
                    it.insertion.iter().cloned(),
                );
                LinesRecord {
                    element,
                    insertion: it.insertion.clone(),
                    deletion,
                }
                .into()
            }
        }
    }

    /// Restore `buffer` to the state it was in before [`Self::apply`]. `self` must be the
    /// record that [`Self::apply`] returned.
    pub fn retract(&self, buffer: &mut Segments<String>) { self.invert().apply(buffer); }

    /// Adjust a position on the line axis for this record. Deletions are accounted for
    /// before insertions, and [`EditRecord::Update`] records never move lines.
    pub fn track(&self, position: &mut RangePosition) {
        if let EditRecord::Lines(it) = self {
            let element = to_signed(it.element);
            if !it.deletion.is_empty() {
                position.changed(element, -to_signed(it.deletion.len()));
            }
            if !it.insertion.is_empty() {
                position.changed(element, to_signed(it.insertion.len()));
            }
        }
    }

    /// Merge `following` into this record when the pair can be expressed as a single
    /// record. Only [`EditRecord::Update`] records on the same line combine.
    #[must_use]
    pub fn combine(&self, following: &EditRecord) -> Option<EditRecord> {
        match (self, following) {
            (EditRecord::Update(lhs), EditRecord::Update(rhs)) => {
                lhs.combine(rhs).map(EditRecord::Update)
            }
            _ => None,
        }
    }
}

impl UpdateRecord {
    /// ```text
    /// typing:     insert "ab" @ 3  +  insert "c" @ 5   →  insert "abc" @ 3
    /// correcting: insert "abc" @ 3 +  delete "b" @ 4   →  insert "ac" @ 3
    /// delete fwd: delete "x" @ 3   +  delete "y" @ 3   →  delete "xy" @ 3
    /// backspace:  delete "y" @ 3   +  delete "x" @ 2   →  delete "xy" @ 2
    /// ```
    #[must_use]
    pub fn combine(&self, following: &UpdateRecord) -> Option<UpdateRecord> {
        if following.element != self.element {
            return None;
        }

        if !self.insertion.is_empty() {
            if !self.deletion.is_empty() {
                return None;
            }

            // The following edit must be inside, or directly after, the insertion.
            let stop = self.position + codepoint_count(&self.insertion);
            let following_position = following.position;
            if following_position < self.position || following_position > stop {
                return None;
            }
            let split = byte_index_of_codepoint(
                &self.insertion,
                following_position - self.position,
            );

            if following.deletion.is_empty() {
                let mut insertion = self.insertion.clone();
                insertion.insert_str(split, &following.insertion);
                return Some(UpdateRecord {
                    insertion,
                    ..self.clone()
                });
            }

            if following.insertion.is_empty()
                && following_position < stop
                && self.insertion[split..].starts_with(following.deletion.as_str())
            {
                let mut insertion = self.insertion.clone();
                insertion.replace_range(split..split + following.deletion.len(), "");
                return Some(UpdateRecord {
                    insertion,
                    ..self.clone()
                });
            }

            return None;
        }

        if !self.deletion.is_empty() && following.insertion.is_empty() {
            if following.position == self.position {
                return Some(UpdateRecord {
                    deletion: format!("{}{}", self.deletion, following.deletion),
                    ..self.clone()
                });
            }

            if following.position + codepoint_count(&following.deletion) == self.position {
                return Some(UpdateRecord {
                    deletion: format!("{}{}", following.deletion, self.deletion),
                    position: following.position,
                    ..self.clone()
                });
            }
        }

        None
    }
}
