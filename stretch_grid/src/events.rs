use super::*;

/// Receives item clicks from a [`StretchGrid`] populated by an adapter.
pub trait OnItemClickListener {
    /// `view` is the child that was clicked, `position` its index in the
    /// adapter and `id` the adapter's row id for that index.
    fn on_item_click(&self, grid: &StretchGrid, view: &Rc<dyn View>, position: usize, id: i64);
}

impl<F> OnItemClickListener for F
where
    F: Fn(&StretchGrid, &Rc<dyn View>, usize, i64),
{
    fn on_item_click(&self, grid: &StretchGrid, view: &Rc<dyn View>, position: usize, id: i64) {
        self(grid, view, position, id)
    }
}

/// Feedback cues the grid asks the host to play.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SoundEffect {
    Click,
}
