// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter, Result},
          ops::{AddAssign, Deref, DerefMut}};

use crate::{InlineString, InlineVec, Phrase, Pos, Size, TuiStyle};

/// Create or extend [`RenderOps`].
///
/// ```
/// use r3bl_editor_core::*;
///
/// // Empty.
/// let empty_ops = render_ops!();
/// assert!(empty_ops.is_empty());
///
/// // With initial operations.
/// let mut render_ops = render_ops!(
///   @new
///   RenderOp::ResetStyle, RenderOp::Seek(pos(0, 0))
/// );
///
/// // Add to existing.
/// render_ops!(
///   @add_to render_ops =>
///   RenderOp::Erase(10),
///   RenderOp::ResetStyle
/// );
/// assert_eq!(render_ops.len(), 4);
/// ```
#[macro_export]
macro_rules! render_ops {
  // Empty.
  () => {
    $crate::RenderOps::default()
  };

  // @new: Create a RenderOps, and add any ($arg_render_op)* to its list.
  (
    @new
    $(
      $arg_render_op: expr
    )
    ,
    *
    $(,)*
  ) => {
    {
      let mut render_ops = $crate::RenderOps::default();
      $(
        render_ops.list.push($arg_render_op);
      )*
      render_ops
    }
  };

  // @add_to: Add any ($arg_render_op)* to an existing RenderOps.
  (
    @add_to
    $arg_render_ops: expr
    =>
    $(
      $arg_render_op: expr
    )
    ,
    *
    $(,)*
  ) => {
    {
      $(
        $arg_render_ops.list.push($arg_render_op);
      )*
    }
  };
}

/// One low level terminal instruction. Positions are absolute terminal cells.
///
/// | Op                          | Terminal primitive          |
/// | --------------------------- | --------------------------- |
/// | [`RenderOp::Seek`]          | `seek(x, y)`                |
/// | [`RenderOp::CopyRectangle`] | `copy_rectangle(src, dst)`  |
/// | [`RenderOp::WriteText`]     | `write(bytes)` with a style |
/// | [`RenderOp::Erase`]         | `erase(n)`                  |
/// | [`RenderOp::ResetStyle`]    | reset colors and attributes |
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum RenderOp {
    /// Move the cursor.
    Seek(Pos),
    /// Copy the cells of the `size` rectangle at `src` to `dst`. The two areas may
    /// overlap.
    CopyRectangle { src: Pos, dst: Pos, size: Size },
    /// Write text at the cursor and advance it by the width of the text.
    WriteText(InlineString, TuiStyle),
    /// Blank `n` cells starting at the cursor, and advance it.
    Erase(usize),
    ResetStyle,
}

impl Debug for RenderOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            RenderOp::Seek(pos) => write!(f, "Seek({pos:?})"),
            RenderOp::CopyRectangle { src, dst, size } => {
                write!(f, "CopyRectangle({src:?} → {dst:?}, {size:?})")
            }
            RenderOp::WriteText(text, style) => write!(f, "WriteText({text:?}, {style:?})"),
            RenderOp::Erase(count) => write!(f, "Erase({count})"),
            RenderOp::ResetStyle => write!(f, "ResetStyle"),
        }
    }
}

/// An ordered list of [`RenderOp`]. For ease of use, please use the [`render_ops`!]
/// macro.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct RenderOps {
    pub list: InlineVec<RenderOp>,
}

impl RenderOps {
    /// Seek to `origin`, write each word of `phrase`, and erase the rest of the `width`
    /// cells. This draws a whole row.
    pub fn push_row(&mut self, origin: Pos, phrase: &Phrase, width: usize) {
        render_ops!(@add_to self => RenderOp::ResetStyle, RenderOp::Seek(origin));
        for word in &phrase.words {
            self.list
                .push(RenderOp::WriteText(word.text.clone(), word.style));
        }
        let void = width.saturating_sub(phrase.cell_count());
        if void > 0 {
            self.list.push(RenderOp::Erase(void));
        }
        self.list.push(RenderOp::ResetStyle);
    }

    /// Count of [`RenderOp::CopyRectangle`] in the list.
    #[must_use]
    pub fn copy_count(&self) -> usize {
        self.list
            .iter()
            .filter(|it| matches!(it, RenderOp::CopyRectangle { .. }))
            .count()
    }

    /// Count of [`RenderOp::Seek`] in the list, which is the number of rows drawn.
    #[must_use]
    pub fn seek_count(&self) -> usize {
        self.list
            .iter()
            .filter(|it| matches!(it, RenderOp::Seek(_)))
            .count()
    }
}

impl Deref for RenderOps {
    type Target = InlineVec<RenderOp>;

    fn deref(&self) -> &Self::Target { &self.list }
}

impl DerefMut for RenderOps {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.list }
}

impl AddAssign<RenderOp> for RenderOps {
    fn add_assign(&mut self, rhs: RenderOp) { self.list.push(rhs); }
}

impl AddAssign<RenderOps> for RenderOps {
    fn add_assign(&mut self, rhs: RenderOps) { self.list.extend(rhs.list); }
}

impl Debug for RenderOps {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        const DELIM: &str = "\n  - ";
        write!(f, "RenderOps.len(): {}", self.list.len())?;
        for render_op in &self.list {
            write!(f, "{DELIM}{render_op:?}")?;
        }
        Ok(())
    }
}
