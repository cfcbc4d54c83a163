//! Stretch grid layout.
//!
//! Children are placed in row-major order into a fixed number of columns. The
//! child at flat index `i` lands in row `i / columns`, column `i % columns`.
//! Every column has the same width, derived from the exact width imposed on the
//! grid. Row heights are either the tallest child of the whole grid or the
//! tallest child of each row.
//!
//! A pass runs in three steps, each a pure function of its inputs:
//!
//! 1. [`measure`] decides every child's size and the grid's total height.
//! 2. [`layout`] turns the measured sizes into child rectangles.
//! 3. [`separator_rects`] lists the separators the renderer should draw.

use core::ops::Range;
use tracing::{debug, trace};

use super::{Padding, SeparatorKind, SeparatorRect, SeparatorSize};
use crate::{Drawable, Error, MeasureSpec, Rect, Result, Size};

/// Resolved inputs of one layout pass.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GridMetrics {
    pub columns: usize,
    /// Resolved column separator thickness, in pixels.
    pub column_separator: i32,
    /// Resolved row separator thickness, in pixels.
    pub row_separator: i32,
    pub force_equal_rows_height: bool,
    pub padding: Padding,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            columns: 3,
            column_separator: 0,
            row_separator: 0,
            force_equal_rows_height: true,
            padding: Padding::default(),
        }
    }
}

/// Output of [`measure`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Measurement {
    pub column_width: i32,
    pub row_heights: Vec<i32>,
    /// Final measured size of every child, in child order.
    pub child_sizes: Vec<Size>,
    /// Height the grid needs, padding included.
    pub total_height: i32,
}

pub fn row_count(child_count: usize, columns: usize) -> usize {
    debug_assert!(columns >= 1);
    child_count.div_ceil(columns)
}

/// Flat child indices of row `row`.
pub fn row_range(row: usize, columns: usize, child_count: usize) -> Range<usize> {
    let start = (row * columns).min(child_count);
    let end = (start + columns).min(child_count);
    start..end
}

pub fn row_len(row: usize, columns: usize, child_count: usize) -> usize {
    row_range(row, columns, child_count).len()
}

pub fn rows(child_count: usize, columns: usize) -> impl Iterator<Item = Range<usize>> {
    (0..row_count(child_count, columns)).map(move |row| row_range(row, columns, child_count))
}

/// Width given to every child. Negative leftovers clamp to 0.
///
/// Computed in `i64` so any column count and separator size is accepted.
pub fn column_width(bounding_width: i32, padding: &Padding, column_separator: i32, columns: usize) -> i32 {
    let columns = i64::try_from(columns.max(1)).unwrap_or(i64::MAX);
    let separators = i64::from(column_separator).saturating_mul(columns - 1);
    let available = (i64::from(bounding_width) - i64::from(padding.left) - i64::from(padding.right))
        .saturating_sub(separators);
    let width = available.div_euclid(columns).max(0);
    i32::try_from(width).unwrap_or(i32::MAX)
}

/// Picks a separator thickness: the drawable's intrinsic size when it has
/// one, then the configured size, then 0.
pub fn resolve_separator_size(intrinsic: Option<i32>, configured: SeparatorSize) -> i32 {
    [intrinsic.filter(|&n| n >= 0), configured.px()]
        .into_iter()
        .flatten()
        .next()
        .unwrap_or(0)
        .max(0)
}

pub fn resolve_column_separator_size(drawable: Option<&dyn Drawable>, configured: SeparatorSize) -> i32 {
    resolve_separator_size(drawable.map(|d| d.intrinsic_width()), configured)
}

pub fn resolve_row_separator_size(drawable: Option<&dyn Drawable>, configured: SeparatorSize) -> i32 {
    resolve_separator_size(drawable.map(|d| d.intrinsic_height()), configured)
}

/// Measures `child_count` children.
///
/// `width` is the constraint imposed on the grid and must be exact; nothing is
/// measured otherwise. `measure_child(index, width, height)` returns the size
/// child `index` wants under the given constraints; it is called twice per
/// child, first with an unspecified height, then with the exact row height.
pub fn measure<F>(child_count: usize, width: MeasureSpec, metrics: &GridMetrics, mut measure_child: F) -> Result<Measurement>
where
    F: FnMut(usize, MeasureSpec, MeasureSpec) -> Size,
{
    let bounding_width = match width {
        MeasureSpec::Exactly(n) => n,
        other => {
            return Err(Error::UnsupportedConstraint { mode: other.mode() });
        }
    };

    if child_count == 0 {
        return Ok(Measurement {
            total_height: metrics.padding.vertical(),
            ..Measurement::default()
        });
    }

    let columns = metrics.columns.max(1);
    let column_width = column_width(bounding_width, &metrics.padding, metrics.column_separator, columns);
    let child_width = MeasureSpec::Exactly(column_width);
    let row_count = row_count(child_count, columns);

    let mut child_sizes = vec![Size::ZERO; child_count];
    let row_heights: Vec<i32> = if metrics.force_equal_rows_height {
        let mut max_height = 0;
        for (index, size) in child_sizes.iter_mut().enumerate() {
            *size = measure_child(index, child_width, MeasureSpec::Unspecified);
            trace!(index, natural_height = size.height, "natural size");
            max_height = max_height.max(size.height);
        }
        for (index, size) in child_sizes.iter_mut().enumerate() {
            *size = measure_child(index, child_width, MeasureSpec::Exactly(max_height));
        }
        vec![max_height; row_count]
    } else {
        let mut heights = Vec::with_capacity(row_count);
        for range in rows(child_count, columns) {
            let mut row_height = 0;
            for index in range.clone() {
                let natural = measure_child(index, child_width, MeasureSpec::Unspecified);
                trace!(index, natural_height = natural.height, "natural size");
                row_height = row_height.max(natural.height);
            }
            for index in range {
                child_sizes[index] = measure_child(index, child_width, MeasureSpec::Exactly(row_height));
            }
            heights.push(row_height);
        }
        heights
    };

    let total_height = row_heights.iter().sum::<i32>()
        + (row_count as i32 - 1) * metrics.row_separator
        + metrics.padding.vertical();

    debug!(
        child_count,
        columns, column_width, row_count, total_height, "measured stretch grid"
    );

    Ok(Measurement {
        column_width,
        row_heights,
        child_sizes,
        total_height,
    })
}

/// Height of a row: its tallest measured child.
fn row_height(child_sizes: &[Size], range: Range<usize>) -> i32 {
    child_sizes[range].iter().map(|size| size.height).max().unwrap_or(0)
}

/// Places children using the sizes produced by [`measure`].
///
/// A child's horizontal offset is `j * (column_separator + width)` where `j`
/// is its column and `width` its own measured width. Children that honour the
/// exact width they were measured with line up on the column grid.
pub fn layout(metrics: &GridMetrics, child_sizes: &[Size]) -> Vec<Rect> {
    let columns = metrics.columns.max(1);
    let mut rects = Vec::with_capacity(child_sizes.len());
    let mut top = metrics.padding.top;

    for range in rows(child_sizes.len(), columns) {
        for (column, size) in child_sizes[range.clone()].iter().enumerate() {
            let left = metrics.padding.left + column as i32 * (metrics.column_separator + size.width);
            rects.push(Rect::from_origin_size(left, top, *size));
        }
        top += row_height(child_sizes, range) + metrics.row_separator;
    }

    rects
}

/// Lists separators in drawing order: row by row, the column separators of a
/// row left to right, then the row separator below it.
///
/// `measured_width` is the grid's own measured width; row separators span it
/// minus the horizontal padding.
pub fn separator_rects(metrics: &GridMetrics, child_sizes: &[Size], measured_width: i32) -> Vec<SeparatorRect> {
    let columns = metrics.columns.max(1);
    let draw_columns = columns > 1 && metrics.column_separator > 0;
    let draw_rows = metrics.row_separator > 0;
    let mut separators = Vec::new();

    if child_sizes.is_empty() || (!draw_columns && !draw_rows) {
        return separators;
    }

    let row_count = row_count(child_sizes.len(), columns);
    let mut top = metrics.padding.top;

    for (row, range) in rows(child_sizes.len(), columns).enumerate() {
        let row_height = row_height(child_sizes, range.clone());

        if draw_columns {
            let row_sizes = &child_sizes[range];
            for (j, size) in row_sizes.iter().take(row_sizes.len().saturating_sub(1)).enumerate() {
                let j = j as i32;
                let left = metrics.padding.left + (j + 1) * size.width + j * metrics.column_separator;
                separators.push(SeparatorRect {
                    kind: SeparatorKind::Column,
                    row,
                    rect: Rect::new(left, top, left + metrics.column_separator, top + size.height),
                });
            }
        }

        if draw_rows && row + 1 < row_count {
            let y = top + row_height;
            separators.push(SeparatorRect {
                kind: SeparatorKind::Row,
                row,
                rect: Rect::new(
                    metrics.padding.left,
                    y,
                    measured_width - metrics.padding.right,
                    y + metrics.row_separator,
                ),
            });
        }

        top += row_height + metrics.row_separator;
    }

    trace!(count = separators.len(), "enumerated separators");
    separators
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorDrawable, ColorRef, MeasureMode};
    use std::cell::RefCell;

    fn metrics(columns: usize) -> GridMetrics {
        GridMetrics {
            columns,
            ..GridMetrics::default()
        }
    }

    /// A child that is `natural` pixels tall unless forced.
    fn fixed_heights(heights: &[i32]) -> impl FnMut(usize, MeasureSpec, MeasureSpec) -> Size + '_ {
        move |index, w, h| Size::new(w.resolve(0), h.resolve(heights[index]))
    }

    #[test]
    fn rows_of_seven_in_three_columns() {
        let lens: Vec<usize> = rows(7, 3).map(|r| r.len()).collect();
        assert_eq!(lens, vec![3, 3, 1]);
        assert_eq!(row_count(7, 3), 3);
        assert_eq!(row_len(2, 3, 7), 1);
        assert_eq!(row_range(1, 3, 7), 3..6);
        assert_eq!(row_count(0, 3), 0);
        assert_eq!(row_count(6, 3), 2);
    }

    #[test]
    fn column_width_floors() {
        assert_eq!(column_width(300, &Padding::default(), 0, 3), 100);
        assert_eq!(column_width(301, &Padding::default(), 0, 3), 100);
        assert_eq!(column_width(300, &Padding::new(10, 0, 10, 0), 5, 3), 90);
        assert_eq!(column_width(10, &Padding::new(10, 0, 10, 0), 5, 3), 0);
    }

    #[test]
    fn column_width_with_huge_column_counts() {
        let padding = Padding::default();
        assert_eq!(column_width(300, &padding, 0, 1 << 31), 0);
        assert_eq!(column_width(300, &padding, 0, 1 << 32), 0);
        assert_eq!(column_width(300, &padding, 4, usize::MAX), 0);
        assert_eq!(column_width(i32::MAX, &padding, i32::MAX, 3), 0);
        assert_eq!(column_width(i32::MAX, &padding, 0, 1), i32::MAX);
    }

    #[test]
    fn huge_column_count_puts_every_child_in_one_row() {
        let heights = [10, 20, 5];
        let metrics = GridMetrics {
            column_separator: 3,
            ..metrics(1 << 32)
        };
        let m = measure(3, MeasureSpec::Exactly(300), &metrics, fixed_heights(&heights)).unwrap();
        assert_eq!(m.column_width, 0);
        assert_eq!(m.row_heights, vec![20]);
        assert_eq!(m.total_height, 20);

        let rects = layout(&metrics, &m.child_sizes);
        assert_eq!(rects[2], Rect::new(6, 0, 6, 20));
        assert_eq!(separator_rects(&metrics, &m.child_sizes, 300).len(), 2);
    }

    #[test]
    fn separator_size_fallback_chain() {
        assert_eq!(resolve_separator_size(Some(4), SeparatorSize::Px(9)), 4);
        assert_eq!(resolve_separator_size(Some(-1), SeparatorSize::Px(9)), 9);
        assert_eq!(resolve_separator_size(None, SeparatorSize::Px(9)), 9);
        assert_eq!(resolve_separator_size(Some(-1), SeparatorSize::Auto), 0);
        assert_eq!(resolve_separator_size(None, SeparatorSize::Auto), 0);

        let line = ColorDrawable::with_intrinsic_size(ColorRef::BLACK, Size::new(2, 6));
        assert_eq!(resolve_column_separator_size(Some(&line), SeparatorSize::Auto), 2);
        assert_eq!(resolve_row_separator_size(Some(&line), SeparatorSize::Px(1)), 6);
        let fill = ColorDrawable::new(ColorRef::BLACK);
        assert_eq!(resolve_row_separator_size(Some(&fill), SeparatorSize::Px(1)), 1);
    }

    #[test]
    fn equal_rows_remeasure_at_max_height() {
        let calls = RefCell::new(Vec::new());
        let heights = [10, 20, 15];
        let metrics = GridMetrics {
            padding: Padding::new(0, 3, 0, 4),
            ..metrics(3)
        };
        let m = measure(3, MeasureSpec::Exactly(300), &metrics, |i, w, h| {
            calls.borrow_mut().push((i, w, h));
            Size::new(w.resolve(0), h.resolve(heights[i]))
        })
        .unwrap();

        assert_eq!(m.column_width, 100);
        assert_eq!(m.child_sizes, vec![Size::new(100, 20); 3]);
        assert_eq!(m.total_height, 20 + 3 + 4);

        let calls = calls.into_inner();
        assert_eq!(calls.len(), 6);
        for (i, w, h) in &calls[..3] {
            assert_eq!((*w, *h), (MeasureSpec::Exactly(100), MeasureSpec::Unspecified), "child {i}");
        }
        for (_, w, h) in &calls[3..] {
            assert_eq!((*w, *h), (MeasureSpec::Exactly(100), MeasureSpec::Exactly(20)));
        }
    }

    #[test]
    fn per_row_heights() {
        let heights = [10, 30, 5, 8, 12];
        let metrics = GridMetrics {
            force_equal_rows_height: false,
            row_separator: 2,
            ..metrics(2)
        };
        let m = measure(5, MeasureSpec::Exactly(200), &metrics, fixed_heights(&heights)).unwrap();

        assert_eq!(m.row_heights, vec![30, 8, 12]);
        let got: Vec<i32> = m.child_sizes.iter().map(|s| s.height).collect();
        assert_eq!(got, vec![30, 30, 8, 8, 12]);
        assert_eq!(m.total_height, 30 + 8 + 12 + 2 * 2);
    }

    #[test]
    fn zero_children_is_padding_only() {
        let metrics = GridMetrics {
            padding: Padding::new(1, 2, 3, 4),
            row_separator: 10,
            ..metrics(3)
        };
        let m = measure(0, MeasureSpec::Exactly(100), &metrics, |_, _, _| {
            panic!("no child should be measured")
        })
        .unwrap();
        assert_eq!(m.total_height, 6);
        assert!(m.child_sizes.is_empty());
        assert!(layout(&metrics, &[]).is_empty());
        assert!(separator_rects(&metrics, &[], 100).is_empty());
    }

    #[test]
    fn inexact_width_is_rejected_before_measuring() {
        for spec in [MeasureSpec::AtMost(100), MeasureSpec::Unspecified] {
            let err = measure(4, spec, &metrics(2), |_, _, _| panic!("measured")).unwrap_err();
            assert_eq!(
                err,
                Error::UnsupportedConstraint { mode: spec.mode() }
            );
        }
        assert!(matches!(
            measure(0, MeasureSpec::AtMost(1), &metrics(2), |_, _, _| Size::ZERO),
            Err(Error::UnsupportedConstraint {
                mode: MeasureMode::AtMost
            })
        ));
    }

    #[test]
    fn layout_places_row_major() {
        let metrics = GridMetrics {
            column_separator: 4,
            row_separator: 6,
            padding: Padding::new(5, 7, 5, 0),
            force_equal_rows_height: false,
            ..metrics(3)
        };
        let sizes = vec![
            Size::new(30, 10),
            Size::new(30, 10),
            Size::new(30, 10),
            Size::new(30, 25),
        ];
        let rects = layout(&metrics, &sizes);
        assert_eq!(
            rects,
            vec![
                Rect::new(5, 7, 35, 17),
                Rect::new(39, 7, 69, 17),
                Rect::new(73, 7, 103, 17),
                Rect::new(5, 23, 35, 48),
            ]
        );
    }

    #[test]
    fn separators_in_drawing_order() {
        let metrics = GridMetrics {
            column_separator: 2,
            row_separator: 3,
            padding: Padding::new(1, 1, 1, 1),
            ..metrics(3)
        };
        let sizes = vec![Size::new(10, 8); 4];
        let seps = separator_rects(&metrics, &sizes, 40);

        let kinds: Vec<(SeparatorKind, usize)> = seps.iter().map(|s| (s.kind, s.row)).collect();
        assert_eq!(
            kinds,
            vec![
                (SeparatorKind::Column, 0),
                (SeparatorKind::Column, 0),
                (SeparatorKind::Row, 0),
            ]
        );
        assert_eq!(seps[0].rect, Rect::new(11, 1, 13, 9));
        assert_eq!(seps[1].rect, Rect::new(23, 1, 25, 9));
        assert_eq!(seps[2].rect, Rect::new(1, 9, 39, 12));
    }

    #[test]
    fn single_column_has_no_column_separators() {
        let metrics = GridMetrics {
            column_separator: 2,
            row_separator: 1,
            ..metrics(1)
        };
        let seps = separator_rects(&metrics, &[Size::new(10, 5); 3], 10);
        assert_eq!(seps.len(), 2);
        assert!(seps.iter().all(|s| s.kind == SeparatorKind::Row));
    }

    #[test]
    fn zero_sized_separators_are_not_emitted() {
        let seps = separator_rects(&metrics(3), &[Size::new(10, 5); 7], 30);
        assert!(seps.is_empty());
    }
}
