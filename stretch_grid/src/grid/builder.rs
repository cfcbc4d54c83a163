use super::*;
use serde::{Deserialize, Serialize};

/// Declarative configuration of a [`StretchGrid`], as it would appear in a
/// layout file.
///
/// ```json
/// { "columns": 2, "row_separator_size": 1, "column_separator_size": "auto" }
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridAttributes {
    pub columns: usize,
    pub column_separator_size: SeparatorSize,
    pub row_separator_size: SeparatorSize,
    pub force_equal_rows_height: bool,
    pub padding: Padding,
}

impl Default for GridAttributes {
    fn default() -> Self {
        Self {
            columns: 3,
            column_separator_size: SeparatorSize::Auto,
            row_separator_size: SeparatorSize::Auto,
            force_equal_rows_height: true,
            padding: Padding::default(),
        }
    }
}

impl GridAttributes {
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(Error::InvalidColumns(self.columns));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct StretchGridBuilder {
    attributes: GridAttributes,
    column_separator: Option<Rc<dyn Drawable>>,
    row_separator: Option<Rc<dyn Drawable>>,
    children: Vec<Rc<dyn View>>,
    adapter: Option<Rc<dyn Adapter>>,
    item_click: Option<Rc<dyn OnItemClickListener>>,
    sound_effects: Option<EventHandler<SoundEffect>>,
}

impl StretchGridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a full attribute set, e.g. one read from a layout file.
    #[must_use]
    pub fn attributes(mut self, attributes: GridAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub fn columns(mut self, columns: usize) -> Self {
        self.attributes.columns = columns;
        self
    }

    #[must_use]
    pub fn column_separator_size(mut self, size: SeparatorSize) -> Self {
        self.attributes.column_separator_size = size;
        self
    }

    #[must_use]
    pub fn row_separator_size(mut self, size: SeparatorSize) -> Self {
        self.attributes.row_separator_size = size;
        self
    }

    #[must_use]
    pub fn force_equal_rows_height(mut self, value: bool) -> Self {
        self.attributes.force_equal_rows_height = value;
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: Padding) -> Self {
        self.attributes.padding = padding;
        self
    }

    #[must_use]
    pub fn column_separator(mut self, drawable: Rc<dyn Drawable>) -> Self {
        self.column_separator = Some(drawable);
        self
    }

    #[must_use]
    pub fn row_separator(mut self, drawable: Rc<dyn Drawable>) -> Self {
        self.row_separator = Some(drawable);
        self
    }

    #[must_use]
    pub fn child(mut self, view: Rc<dyn View>) -> Self {
        self.children.push(view);
        self
    }

    /// Populates the grid from `adapter`. Children added with
    /// [`child`](Self::child) are replaced by the adapter's views.
    #[must_use]
    pub fn adapter(mut self, adapter: Rc<dyn Adapter>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    #[must_use]
    pub fn on_item_click<F>(mut self, listener: F) -> Self
    where
        F: Fn(&StretchGrid, &Rc<dyn View>, usize, i64) + 'static,
    {
        self.item_click = Some(Rc::new(listener));
        self
    }

    #[must_use]
    pub fn sound_effects(mut self, handler: EventHandler<SoundEffect>) -> Self {
        self.sound_effects = Some(handler);
        self
    }

    pub fn build(self) -> Result<StretchGrid> {
        self.attributes.validate()?;

        let grid = StretchGrid::with_attributes(self.attributes);
        grid.set_column_separator(self.column_separator);
        grid.set_row_separator(self.row_separator);
        grid.set_sound_effect_handler(self.sound_effects);
        for child in self.children {
            grid.add_child(child);
        }
        // The listener goes in first so the adapter's children are wired as
        // they are created.
        grid.set_on_item_click_listener(self.item_click);
        if let Some(adapter) = self.adapter {
            grid.set_adapter(Some(adapter));
        }
        Ok(grid)
    }
}
