use crate::MeasureMode;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The grid cannot size itself horizontally; its width must be imposed by
    /// the host as an exact constraint.
    #[error("width measure mode must be exact, got {mode:?}")]
    UnsupportedConstraint { mode: MeasureMode },

    #[error("column count must be at least 1, got {0}")]
    InvalidColumns(usize),
}

pub type Result<T> = core::result::Result<T, Error>;
