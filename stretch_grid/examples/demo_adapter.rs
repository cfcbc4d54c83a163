//! An adapter-backed grid of wrapping text cells.
//!
//! Run with `RUST_LOG=stretch_grid=trace` to see every pass.

use std::cell::RefCell;
use std::rc::Rc;
use stretch_grid::*;
use tracing_subscriber::EnvFilter;

const CHAR_WIDTH: i32 = 8;
const LINE_HEIGHT: i32 = 18;
const CELL_PADDING: i32 = 6;

/// A text cell that wraps at word boundaries.
struct TextCell {
    text: String,
}

impl TextCell {
    fn lines(&self, width: i32) -> i32 {
        let per_line = ((width - 2 * CELL_PADDING) / CHAR_WIDTH).max(1) as usize;
        let mut lines = 1;
        let mut used = 0;
        for word in self.text.split_whitespace() {
            let len = word.len();
            if used > 0 && used + 1 + len > per_line {
                lines += 1;
                used = len;
            } else {
                used += if used > 0 { len + 1 } else { len };
            }
        }
        lines
    }
}

impl View for TextCell {
    fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size {
        let natural_width = self.text.len() as i32 * CHAR_WIDTH + 2 * CELL_PADDING;
        let w = width.resolve(natural_width);
        let natural_height = self.lines(w) * LINE_HEIGHT + 2 * CELL_PADDING;
        Size::new(w, height.resolve(natural_height))
    }
}

/// Prints every fill instead of rasterizing it.
struct ConsoleCanvas;

impl Canvas for ConsoleCanvas {
    fn fill_rect(&mut self, rect: &Rect, color: ColorRef) {
        println!("    fill {rect:?} with #{:08x}", color.as_u32());
    }
}

fn cell_texts(round: usize) -> Vec<String> {
    const WORDS: [&str; 8] = [
        "4312", "87", "29001", "5", "640", "11873", "302", "7",
    ];
    (0..11)
        .map(|i| {
            let len = (i * 7 + round * 3) % 6 + 1;
            (0..len)
                .map(|j| WORDS[(i + j + round) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn run_pass(grid: &StretchGrid, width: i32) -> Result<()> {
    let size = grid.measure(MeasureSpec::Exactly(width), MeasureSpec::Unspecified)?;
    grid.layout();
    println!(
        "  {} columns, equal rows: {} -> {}x{}",
        grid.columns(),
        grid.is_force_equal_rows_height(),
        size.width,
        size.height
    );
    for i in 0..grid.child_count() {
        if let Some(rect) = grid.child_rect(i) {
            println!("    child {i}: {rect:?}");
        }
    }
    grid.draw(&mut ConsoleCanvas);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let adapter = ArrayAdapter::new(cell_texts(0), |_, text: &String| -> Rc<dyn View> {
        Rc::new(TextCell { text: text.clone() })
    });

    let clicked = Rc::new(RefCell::new(Vec::new()));
    let grid = {
        let clicked = clicked.clone();
        let texts = adapter.clone();
        StretchGrid::builder()
            .column_separator(Rc::new(ColorDrawable::with_intrinsic_size(
                ColorRef::LIGHT_GRAY,
                Size::new(1, 1),
            )))
            .row_separator(Rc::new(ColorDrawable::new(ColorRef::GRAY)))
            .row_separator_size(SeparatorSize::Px(2))
            .padding(Padding::uniform(4))
            .adapter(adapter.clone())
            .on_item_click(move |_grid, _view, position, id| {
                let text = texts.get(position).unwrap_or_default();
                println!("  clicked item at position {position} (id {id}) with text: {text}");
                clicked.borrow_mut().push(position);
            })
            .sound_effects(EventHandler::new(|effect: SoundEffect| {
                println!("  play {effect:?}");
            }))
            .build()?
    };

    println!("initial");
    run_pass(&grid, 480)?;

    for columns in [1, 2, 3] {
        grid.set_columns(columns);
        println!("set columns");
        run_pass(&grid, 480)?;
    }

    grid.set_force_equal_rows_height(!grid.is_force_equal_rows_height());
    println!("toggle equal rows height");
    run_pass(&grid, 480)?;

    adapter.set_items(cell_texts(1));
    println!("change cell text");
    run_pass(&grid, 480)?;

    grid.click_child(4);
    if let Some(view) = grid.child_at(0) {
        grid.perform_item_click(&view, 0, 0);
    }
    println!("{} clicks", clicked.borrow().len());

    Ok(())
}
