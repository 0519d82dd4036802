// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

/// A [`TuiColor`] can be [`RgbValue`], [`AnsiValue`], or [`ANSIBasicColor`]. The editor
/// core never emits escape sequences itself, so colors are carried through
/// [`crate::RenderOp::WriteText`] to whatever backend paints the terminal.
#[derive(Clone, PartialEq, Eq, Copy, Hash, Debug, Serialize, Deserialize)]
pub enum TuiColor {
    /// ANSI 16 basic colors.
    Basic(ANSIBasicColor),
    /// An RGB color. See [RGB color model] for more info.
    ///
    /// [RGB color model]: https://en.wikipedia.org/wiki/RGB_color_model
    Rgb(RgbValue),
    /// An ANSI color. See [256 colors - cheat sheet] for more info.
    ///
    /// [256 colors - cheat sheet]: https://jonasjacek.github.io/colors/
    Ansi(AnsiValue),
}

#[derive(Clone, PartialEq, Eq, Copy, Hash, Debug, Serialize, Deserialize)]
pub enum ANSIBasicColor {
    Black,
    White,
    Gray,
    DarkGray,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Yellow,
    DarkYellow,
    Blue,
    DarkBlue,
    Magenta,
    DarkMagenta,
    Cyan,
    DarkCyan,
}

#[derive(Clone, PartialEq, Eq, Copy, Hash, Debug, Serialize, Deserialize)]
pub struct RgbValue {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RgbValue {
    #[must_use]
    pub fn from_u8(red: u8, green: u8, blue: u8) -> Self { Self { red, green, blue } }
}

#[derive(Clone, PartialEq, Eq, Copy, Hash, Debug, Serialize, Deserialize)]
pub struct AnsiValue {
    pub index: u8,
}

mod convenience_conversions {
    use super::{ANSIBasicColor, AnsiValue, RgbValue, TuiColor};

    impl From<ANSIBasicColor> for TuiColor {
        fn from(basic_color: ANSIBasicColor) -> Self { TuiColor::Basic(basic_color) }
    }

    impl From<RgbValue> for TuiColor {
        fn from(rgb_value: RgbValue) -> Self { TuiColor::Rgb(rgb_value) }
    }

    impl From<AnsiValue> for TuiColor {
        fn from(ansi_value: AnsiValue) -> Self { TuiColor::Ansi(ansi_value) }
    }
}
