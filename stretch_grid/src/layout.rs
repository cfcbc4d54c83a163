use serde::{Deserialize, Serialize};

use crate::Rect;

pub mod grid;

/// Space reserved inside the grid's bounds, around the children.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(n: i32) -> Self {
        Self::new(n, n, n, n)
    }

    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

/// Configured thickness of a separator.
///
/// A separator drawable with a known intrinsic size always wins over the
/// configured value. `Auto` means "use the drawable, or nothing".
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "SeparatorSizeRepr", into = "SeparatorSizeRepr")]
pub enum SeparatorSize {
    #[default]
    Auto,
    Px(i32),
}

impl SeparatorSize {
    pub fn px(self) -> Option<i32> {
        match self {
            Self::Auto => None,
            Self::Px(n) => Some(n),
        }
    }
}

// Attribute files spell the size either as a number or as "auto".
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SeparatorSizeRepr {
    Px(i32),
    Keyword(SeparatorKeyword),
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SeparatorKeyword {
    Auto,
}

impl From<SeparatorSizeRepr> for SeparatorSize {
    fn from(repr: SeparatorSizeRepr) -> Self {
        match repr {
            SeparatorSizeRepr::Px(n) => Self::Px(n),
            SeparatorSizeRepr::Keyword(SeparatorKeyword::Auto) => Self::Auto,
        }
    }
}

impl From<SeparatorSize> for SeparatorSizeRepr {
    fn from(size: SeparatorSize) -> Self {
        match size {
            SeparatorSize::Auto => Self::Keyword(SeparatorKeyword::Auto),
            SeparatorSize::Px(n) => Self::Px(n),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SeparatorKind {
    /// Vertical bar between two adjacent children of a row.
    Column,
    /// Horizontal bar between two rows.
    Row,
}

/// A separator the renderer should draw.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SeparatorRect {
    pub kind: SeparatorKind,
    /// Row the separator belongs to. Row separators sit below their row.
    pub row: usize,
    pub rect: Rect,
}
