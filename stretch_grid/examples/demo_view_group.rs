//! A grid whose children are added directly, without an adapter.

use std::cell::Cell;
use std::rc::Rc;
use stretch_grid::*;
use tracing_subscriber::EnvFilter;

/// A button whose label length changes between rounds.
struct Button {
    words: Cell<i32>,
}

impl View for Button {
    fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size {
        let w = width.resolve(self.words.get() * 48);
        let per_line = (w / 48).max(1);
        let lines = (self.words.get() + per_line - 1) / per_line;
        Size::new(w, height.resolve(lines.max(1) * 20 + 16))
    }

    fn layout(&self, rect: &Rect) {
        tracing::trace!(words = self.words.get(), ?rect, "button placed");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let attributes = GridAttributes {
        columns: 3,
        column_separator_size: SeparatorSize::Px(4),
        row_separator_size: SeparatorSize::Px(4),
        force_equal_rows_height: true,
        padding: Padding::uniform(8),
    };

    let buttons: Vec<Rc<Button>> = (0..9)
        .map(|i| Rc::new(Button { words: Cell::new(i % 4 + 1) }))
        .collect();
    let mut builder = StretchGrid::builder().attributes(attributes);
    for button in &buttons {
        builder = builder.child(button.clone());
    }
    let grid = builder.build()?;

    for round in 0..3 {
        for (i, button) in buttons.iter().enumerate() {
            button.words.set((i as i32 * 5 + round * 3) % 7 + 1);
        }
        grid.request_layout();
        grid.set_columns(round as usize + 1);
        grid.set_force_equal_rows_height(round % 2 == 0);

        let size = grid.measure(MeasureSpec::Exactly(360), MeasureSpec::Unspecified)?;
        grid.layout();
        println!(
            "round {round}: {} columns, {} rows, {}x{}",
            grid.columns(),
            grid.row_count(),
            size.width,
            size.height
        );
        for separator in grid.separator_rects() {
            println!("  {:?} separator in row {}: {:?}", separator.kind, separator.row, separator.rect);
        }
    }

    Ok(())
}
