use super::*;

/// A child of the grid.
///
/// `measure` may be called several times in one pass with different
/// constraints. A view forced to an exact height can report a different size
/// than its natural one, e.g. text that re-wraps.
pub trait View {
    fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size;

    /// Called once per layout pass with the rectangle assigned to this view,
    /// in the grid's coordinate space.
    fn layout(&self, _rect: &Rect) {}
}

impl core::fmt::Debug for dyn View {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(fmt, "View")
    }
}
