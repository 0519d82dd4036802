// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Phrase, TuiStyle};

/// Turns one buffer line into a styled [`Phrase`]. Syntax highlighting lives behind this
/// trait; the projection never looks inside a line.
///
/// Any `Fn(&str) -> Phrase` closure is a renderer.
pub trait LineRenderer {
    fn render_line(&self, line: &str) -> Phrase;
}

impl<F> LineRenderer for F
where
    F: Fn(&str) -> Phrase,
{
    fn render_line(&self, line: &str) -> Phrase { self(line) }
}

/// Renders every line as a single unstyled word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainTextRenderer;

impl LineRenderer for PlainTextRenderer {
    fn render_line(&self, line: &str) -> Phrase {
        if line.is_empty() {
            Phrase::default()
        } else {
            Phrase::from_text(TuiStyle::default(), line)
        }
    }
}
