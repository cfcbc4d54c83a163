use super::*;
use crate::layout::grid::{self as engine, GridMetrics};
use std::cell::RefCell;
use std::rc::Weak;
use tracing::{debug, trace, warn};

pub mod builder;

use builder::{GridAttributes, StretchGridBuilder};

/// A container that stretches its children into equal-width columns.
///
/// The host drives it in passes: [`measure`](Self::measure) with the width it
/// imposes, then [`layout`](Self::layout), then [`draw`](Self::draw). Every
/// configuration change marks the layout as requested; the host checks
/// [`is_layout_requested`](Self::is_layout_requested) to schedule a new pass.
///
/// `StretchGrid` is a cheap handle; clones share the same state.
#[derive(Clone)]
pub struct StretchGrid {
    pub(crate) state: Rc<GridState>,
}

assert_not_impl_any!(StretchGrid: Send, Sync);

pub(crate) struct GridState {
    stuck: StuckToThread,
    attributes: Cell<GridAttributes>,
    column_separator: Cell<Option<Rc<dyn Drawable>>>,
    row_separator: Cell<Option<Rc<dyn Drawable>>>,
    children: RefCell<Vec<ChildState>>,
    measured_size: Cell<Size>,
    layout_requested: Cell<bool>,

    adapter: RefCell<Option<Rc<dyn Adapter>>>,
    all_items_enabled: Cell<bool>,
    item_click: RefCell<Option<Rc<dyn OnItemClickListener>>>,
    sound_effects: RefCell<Option<Rc<EventHandler<SoundEffect>>>>,
    observer: Rc<GridObserver>,
}

struct ChildState {
    view: Rc<dyn View>,
    measured: Size,
    rect: Rect,
    /// Adapter position reported when this child is clicked. `None` if the
    /// child is not wired for item clicks.
    click_position: Option<usize>,
}

impl ChildState {
    fn new(view: Rc<dyn View>) -> Self {
        Self {
            view,
            measured: Size::ZERO,
            rect: Rect::default(),
            click_position: None,
        }
    }
}

/// Rebuilds the grid's children when its adapter reports a change.
struct GridObserver {
    grid: Weak<GridState>,
}

impl GridObserver {
    fn setup_children(&self) {
        if let Some(state) = self.grid.upgrade() {
            StretchGrid { state }.setup_children();
        }
    }
}

impl DataSetObserver for GridObserver {
    fn on_changed(&self) {
        self.setup_children();
    }

    fn on_invalidated(&self) {
        self.setup_children();
    }
}

impl Default for StretchGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl StretchGrid {
    pub fn new() -> Self {
        Self::with_attributes(GridAttributes::default())
    }

    pub fn builder() -> StretchGridBuilder {
        StretchGridBuilder::new()
    }

    pub(crate) fn with_attributes(attributes: GridAttributes) -> Self {
        let state = Rc::new_cyclic(|grid| GridState {
            stuck: StuckToThread::new(),
            attributes: Cell::new(attributes),
            column_separator: Cell::new(None),
            row_separator: Cell::new(None),
            children: RefCell::new(Vec::new()),
            measured_size: Cell::new(Size::ZERO),
            layout_requested: Cell::new(true),
            adapter: RefCell::new(None),
            all_items_enabled: Cell::new(false),
            item_click: RefCell::new(None),
            sound_effects: RefCell::new(None),
            observer: Rc::new(GridObserver { grid: grid.clone() }),
        });
        Self { state }
    }

    // Configuration

    pub fn attributes(&self) -> GridAttributes {
        self.state.attributes.get()
    }

    fn update_attributes(&self, f: impl FnOnce(&mut GridAttributes)) {
        let mut attributes = self.state.attributes.get();
        f(&mut attributes);
        self.state.attributes.set(attributes);
        self.request_layout();
    }

    pub fn columns(&self) -> usize {
        self.attributes().columns
    }

    /// Sets the number of columns. 0 is treated as 1.
    pub fn set_columns(&self, columns: usize) {
        if columns == 0 {
            warn!("stretch grid needs at least one column, using 1");
        }
        self.update_attributes(|a| a.columns = columns.max(1));
    }

    pub fn column_separator_size(&self) -> SeparatorSize {
        self.attributes().column_separator_size
    }

    pub fn set_column_separator_size(&self, size: SeparatorSize) {
        self.update_attributes(|a| a.column_separator_size = size);
    }

    pub fn row_separator_size(&self) -> SeparatorSize {
        self.attributes().row_separator_size
    }

    pub fn set_row_separator_size(&self, size: SeparatorSize) {
        self.update_attributes(|a| a.row_separator_size = size);
    }

    pub fn is_force_equal_rows_height(&self) -> bool {
        self.attributes().force_equal_rows_height
    }

    pub fn set_force_equal_rows_height(&self, value: bool) {
        self.update_attributes(|a| a.force_equal_rows_height = value);
    }

    pub fn padding(&self) -> Padding {
        self.attributes().padding
    }

    pub fn set_padding(&self, padding: Padding) {
        self.update_attributes(|a| a.padding = padding);
    }

    pub fn column_separator(&self) -> Option<Rc<dyn Drawable>> {
        clone_cell_opt_rc(&self.state.column_separator)
    }

    pub fn set_column_separator(&self, drawable: Option<Rc<dyn Drawable>>) {
        self.state.column_separator.set(drawable);
        self.request_layout();
    }

    pub fn row_separator(&self) -> Option<Rc<dyn Drawable>> {
        clone_cell_opt_rc(&self.state.row_separator)
    }

    pub fn set_row_separator(&self, drawable: Option<Rc<dyn Drawable>>) {
        self.state.row_separator.set(drawable);
        self.request_layout();
    }

    /// Column separator thickness for the next pass.
    pub fn resolve_column_separator_size(&self) -> i32 {
        engine::resolve_column_separator_size(
            self.column_separator().as_deref(),
            self.column_separator_size(),
        )
    }

    /// Row separator thickness for the next pass.
    pub fn resolve_row_separator_size(&self) -> i32 {
        engine::resolve_row_separator_size(self.row_separator().as_deref(), self.row_separator_size())
    }

    fn metrics(&self) -> GridMetrics {
        let attributes = self.attributes();
        GridMetrics {
            columns: attributes.columns.max(1),
            column_separator: self.resolve_column_separator_size(),
            row_separator: self.resolve_row_separator_size(),
            force_equal_rows_height: attributes.force_equal_rows_height,
            padding: attributes.padding,
        }
    }

    pub fn request_layout(&self) {
        if !self.state.layout_requested.replace(true) {
            trace!("stretch grid layout requested");
        }
    }

    pub fn is_layout_requested(&self) -> bool {
        self.state.layout_requested.get()
    }

    // Children

    pub fn child_count(&self) -> usize {
        self.state.children.borrow().len()
    }

    pub fn child_at(&self, index: usize) -> Option<Rc<dyn View>> {
        self.state
            .children
            .borrow()
            .get(index)
            .map(|child| Rc::clone(&child.view))
    }

    /// Size the child reported in the last measure pass.
    pub fn child_measured_size(&self, index: usize) -> Option<Size> {
        self.state.children.borrow().get(index).map(|child| child.measured)
    }

    /// Rectangle assigned to the child in the last layout pass.
    pub fn child_rect(&self, index: usize) -> Option<Rect> {
        self.state.children.borrow().get(index).map(|child| child.rect)
    }

    pub fn add_child(&self, view: Rc<dyn View>) {
        self.state.children.borrow_mut().push(ChildState::new(view));
        self.request_layout();
    }

    pub fn remove_all_children(&self) {
        let removed = core::mem::take(&mut *self.state.children.borrow_mut());
        drop(removed);
        self.request_layout();
    }

    pub fn row_count(&self) -> usize {
        engine::row_count(self.child_count(), self.columns())
    }

    pub fn row_len(&self, row: usize) -> usize {
        engine::row_len(row, self.columns(), self.child_count())
    }

    // Layout passes

    /// The size computed by the last successful [`measure`](Self::measure).
    pub fn measured_size(&self) -> Size {
        self.state.measured_size.get()
    }

    /// Measures every child and returns the size the grid needs.
    ///
    /// `width` must be exact: the grid fills the width it is given and cannot
    /// pick one itself. `height` is ignored; the grid is as tall as its rows.
    /// On error nothing is measured and the previous geometry is kept.
    pub fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Result<Size> {
        self.state.stuck.check();

        let metrics = self.metrics();
        let views = self.views();
        let measurement = engine::measure(views.len(), width, &metrics, |index, w, h| {
            views[index].measure(w, h)
        })?;

        let size = if views.is_empty() {
            Size::new(metrics.padding.horizontal(), measurement.total_height)
        } else {
            Size::new(width.size(), measurement.total_height)
        };

        {
            let mut children = self.state.children.borrow_mut();
            for (child, measured) in children.iter_mut().zip(measurement.child_sizes) {
                child.measured = measured;
            }
        }
        self.state.measured_size.set(size);

        debug!(
            ?width,
            ?height,
            measured_width = size.width,
            measured_height = size.height,
            "stretch grid measure"
        );
        Ok(size)
    }

    /// Positions every child using the sizes from the last measure pass and
    /// hands each child its rectangle.
    pub fn layout(&self) {
        self.state.stuck.check();

        let metrics = self.metrics();
        let sizes = self.child_sizes();
        let rects = engine::layout(&metrics, &sizes);

        let views: Vec<(Rc<dyn View>, Rect)> = {
            let mut children = self.state.children.borrow_mut();
            children
                .iter_mut()
                .zip(rects)
                .map(|(child, rect)| {
                    child.rect = rect;
                    (Rc::clone(&child.view), rect)
                })
                .collect()
        };

        for (index, (view, rect)) in views.iter().enumerate() {
            trace!(index, ?rect, "layout child");
            view.layout(rect);
        }

        self.state.layout_requested.set(false);
        debug!(children = views.len(), "stretch grid layout");
    }

    /// Separators to draw for the current geometry, in drawing order.
    pub fn separator_rects(&self) -> Vec<SeparatorRect> {
        engine::separator_rects(&self.metrics(), &self.child_sizes(), self.measured_size().width)
    }

    /// Draws the separators whose drawable is set.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.state.stuck.check();

        let column_separator = self.column_separator();
        let row_separator = self.row_separator();
        if column_separator.is_none() && row_separator.is_none() {
            return;
        }

        for separator in self.separator_rects() {
            let drawable = match separator.kind {
                SeparatorKind::Column => column_separator.as_deref(),
                SeparatorKind::Row => row_separator.as_deref(),
            };
            if let Some(drawable) = drawable {
                drawable.draw(canvas, &separator.rect);
            }
        }
    }

    fn views(&self) -> Vec<Rc<dyn View>> {
        self.state
            .children
            .borrow()
            .iter()
            .map(|child| Rc::clone(&child.view))
            .collect()
    }

    fn child_sizes(&self) -> Vec<Size> {
        self.state
            .children
            .borrow()
            .iter()
            .map(|child| child.measured)
            .collect()
    }

    // Adapter

    pub fn adapter(&self) -> Option<Rc<dyn Adapter>> {
        self.state.adapter.borrow().clone()
    }

    /// Replaces the data source and rebuilds the children from it.
    pub fn set_adapter(&self, adapter: Option<Rc<dyn Adapter>>) {
        let observer: Weak<dyn DataSetObserver> = Rc::downgrade(&self.state.observer) as Weak<dyn DataSetObserver>;

        let previous = self.state.adapter.borrow_mut().take();
        if let Some(previous) = previous {
            previous.unregister_observer(&observer);
        }

        if let Some(adapter) = &adapter {
            adapter.register_observer(observer);
            self.state
                .all_items_enabled
                .set(adapter.are_all_items_enabled());
        }
        *self.state.adapter.borrow_mut() = adapter;

        self.setup_children();
    }

    /// Discards every child and asks the adapter for a fresh view per item.
    fn setup_children(&self) {
        let adapter = self.adapter();
        let wire = self.item_click_listener().is_some();

        let mut children = Vec::new();
        if let Some(adapter) = &adapter {
            let count = adapter.count();
            children.reserve(count);
            for position in 0..count {
                let mut child = ChildState::new(adapter.view(position));
                if wire && self.is_clickable(adapter.as_ref(), position) {
                    child.click_position = Some(position);
                }
                children.push(child);
            }
        }

        debug!(children = children.len(), "stretch grid children rebuilt");
        let removed = core::mem::replace(&mut *self.state.children.borrow_mut(), children);
        drop(removed);
        self.request_layout();
    }

    fn is_clickable(&self, adapter: &dyn Adapter, position: usize) -> bool {
        self.state.all_items_enabled.get() || adapter.is_enabled(position)
    }

    // Item clicks

    pub fn item_click_listener(&self) -> Option<Rc<dyn OnItemClickListener>> {
        self.state.item_click.borrow().clone()
    }

    /// Registers the listener for item clicks. Children already present are
    /// wired immediately.
    pub fn set_on_item_click_listener(&self, listener: Option<Rc<dyn OnItemClickListener>>) {
        let wire = listener.is_some();
        *self.state.item_click.borrow_mut() = listener;
        if !wire {
            return;
        }

        let Some(adapter) = self.adapter() else {
            return;
        };
        let clickable: Vec<bool> = (0..self.child_count())
            .map(|position| self.is_clickable(adapter.as_ref(), position))
            .collect();

        let mut children = self.state.children.borrow_mut();
        for (position, (child, clickable)) in children.iter_mut().zip(clickable).enumerate() {
            if clickable {
                child.click_position = Some(position);
            }
        }
    }

    pub fn on_item_click<F>(&self, listener: F)
    where
        F: Fn(&StretchGrid, &Rc<dyn View>, usize, i64) + 'static,
    {
        self.set_on_item_click_listener(Some(Rc::new(listener)));
    }

    /// Host entry point for a click on the child at `index`. Returns whether an
    /// item click was raised.
    pub fn click_child(&self, index: usize) -> bool {
        let target = self
            .state
            .children
            .borrow()
            .get(index)
            .and_then(|child| Some((child.click_position?, Rc::clone(&child.view))));
        let Some((position, view)) = target else {
            return false;
        };

        match (self.item_click_listener(), self.adapter()) {
            (Some(listener), Some(adapter)) => {
                let id = adapter.item_id(position);
                trace!(index, position, id, "item click");
                listener.on_item_click(self, &view, position, id);
                true
            }
            _ => false,
        }
    }

    /// Calls the item click listener directly, playing the click feedback
    /// first. Returns `false` if no listener is registered.
    pub fn perform_item_click(&self, view: &Rc<dyn View>, position: usize, id: i64) -> bool {
        let Some(listener) = self.item_click_listener() else {
            return false;
        };
        self.play_sound_effect(SoundEffect::Click);
        listener.on_item_click(self, view, position, id);
        true
    }

    /// Installs the host's handler for feedback cues.
    pub fn set_sound_effect_handler(&self, handler: Option<EventHandler<SoundEffect>>) {
        *self.state.sound_effects.borrow_mut() = handler.map(Rc::new);
    }

    fn play_sound_effect(&self, effect: SoundEffect) {
        let handler = self.state.sound_effects.borrow().clone();
        if let Some(handler) = handler {
            handler.call(effect);
        }
    }
}

impl core::fmt::Debug for StretchGrid {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        fmt.debug_struct("StretchGrid")
            .field("attributes", &self.attributes())
            .field("children", &self.child_count())
            .field("measured_size", &self.measured_size())
            .field("layout_requested", &self.is_layout_requested())
            .finish()
    }
}
