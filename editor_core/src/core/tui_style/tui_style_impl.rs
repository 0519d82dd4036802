// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::{Add, AddAssign};

use super::TuiColor;

/// Style for a run of text. Each attribute is an `Option` so that two styles can be
/// layered with [`Add`]: attributes that are set on the right hand side override the
/// left hand side, and unset ones leave it alone.
///
/// ```
/// use r3bl_editor_core::{ANSIBasicColor, TuiColor, TuiStyle, tui_style_attrib};
///
/// let keyword = TuiStyle {
///     color_fg: Some(TuiColor::Basic(ANSIBasicColor::Blue)),
///     ..Default::default()
/// };
/// let underline = TuiStyle {
///     underline: Some(tui_style_attrib::Underline),
///     ..Default::default()
/// };
/// let both = keyword + underline;
/// assert_eq!(both.color_fg, keyword.color_fg);
/// assert!(both.underline.is_some());
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct TuiStyle {
    pub bold: Option<tui_style_attrib::Bold>,
    pub dim: Option<tui_style_attrib::Dim>,
    pub underline: Option<tui_style_attrib::Underline>,
    pub reverse: Option<tui_style_attrib::Reverse>,
    pub color_fg: Option<TuiColor>,
    pub color_bg: Option<TuiColor>,
}

pub mod tui_style_attrib {
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
    pub struct Bold;

    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
    pub struct Dim;

    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
    pub struct Underline;

    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
    pub struct Reverse;
}

impl TuiStyle {
    #[must_use]
    pub fn with_underline(self) -> Self {
        Self {
            underline: Some(tui_style_attrib::Underline),
            ..self
        }
    }

    #[must_use]
    pub fn with_fg(self, color: TuiColor) -> Self {
        Self {
            color_fg: Some(color),
            ..self
        }
    }

    #[must_use]
    pub fn with_bg(self, color: TuiColor) -> Self {
        Self {
            color_bg: Some(color),
            ..self
        }
    }
}

mod addition {
    use super::{Add, AddAssign, TuiStyle};

    impl Add for TuiStyle {
        type Output = Self;
        fn add(self, other: Self) -> Self { add_styles(self, other) }
    }

    /// `rhs` (if set) overrides `lhs`.
    #[must_use]
    pub fn add_styles(lhs: TuiStyle, rhs: TuiStyle) -> TuiStyle {
        TuiStyle {
            bold: rhs.bold.or(lhs.bold),
            dim: rhs.dim.or(lhs.dim),
            underline: rhs.underline.or(lhs.underline),
            reverse: rhs.reverse.or(lhs.reverse),
            color_fg: rhs.color_fg.or(lhs.color_fg),
            color_bg: rhs.color_bg.or(lhs.color_bg),
        }
    }

    impl AddAssign<TuiStyle> for TuiStyle {
        fn add_assign(&mut self, rhs: TuiStyle) { *self = add_styles(*self, rhs); }
    }
}
pub use addition::add_styles;
