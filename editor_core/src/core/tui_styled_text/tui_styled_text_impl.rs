// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{InlineString, TuiStyle};

/// A run of text that shares one [`TuiStyle`]. This is a "word" of a
/// [`crate::Phrase`].
///
/// ```
/// use r3bl_editor_core::*;
///
/// let word = TuiStyledText::new(TuiStyle::default().with_underline(), "cd");
/// assert_eq!(word.get_text(), "cd");
/// assert!(word.style.underline.is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TuiStyledText {
    pub style: TuiStyle,
    pub text: InlineString,
}

impl TuiStyledText {
    pub fn new(style: TuiStyle, arg_text: impl AsRef<str>) -> Self {
        TuiStyledText {
            style,
            text: arg_text.as_ref().into(),
        }
    }

    #[must_use]
    pub fn get_text(&self) -> &str { self.text.as_str() }
}
