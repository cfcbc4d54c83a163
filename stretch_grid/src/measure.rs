/// A size requirement handed from a parent to a child during measurement.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MeasureSpec {
    /// The child must be exactly this size.
    Exactly(i32),
    /// The child can be as large as it wants up to this size.
    AtMost(i32),
    /// No constraint. The child reports its natural size.
    Unspecified,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MeasureMode {
    Exactly,
    AtMost,
    Unspecified,
}

impl MeasureSpec {
    pub fn mode(self) -> MeasureMode {
        match self {
            Self::Exactly(_) => MeasureMode::Exactly,
            Self::AtMost(_) => MeasureMode::AtMost,
            Self::Unspecified => MeasureMode::Unspecified,
        }
    }

    /// The size carried by the spec, or 0 for `Unspecified`.
    pub fn size(self) -> i32 {
        match self {
            Self::Exactly(n) | Self::AtMost(n) => n,
            Self::Unspecified => 0,
        }
    }

    /// Picks a size for a view whose natural size is `desired`.
    pub fn resolve(self, desired: i32) -> i32 {
        match self {
            Self::Exactly(n) => n,
            Self::AtMost(n) => desired.min(n),
            Self::Unspecified => desired,
        }
    }
}
